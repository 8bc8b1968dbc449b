//! services/api/src/web/protocol.rs
//!
//! Defines the JSON request and response bodies exchanged with the browser client.
//! Domain types are converted here; nothing outside the web layer sees these shapes.

use base64::{engine::general_purpose::STANDARD, Engine as _};
use bytementor_core::domain::{CourseResult, Quiz, QuizQuestion, StudyGuide, Video};
use chrono::SecondsFormat;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::ToSchema;

//=========================================================================================
// Requests
//=========================================================================================

/// Body of `POST /api/generate-course`.
#[derive(Deserialize, Debug, ToSchema)]
pub struct GenerateCourseRequest {
    #[serde(default)]
    pub keyword: Option<String>,
}

/// Body of `POST /api/generate-pdf`.
#[derive(Deserialize, Debug, ToSchema)]
pub struct GeneratePdfRequest {
    #[serde(default)]
    #[schema(value_type = Option<String>)]
    pub text: Option<Value>,
    #[serde(default)]
    pub filename: Option<String>,
}

impl GeneratePdfRequest {
    /// The text to render. `null`, `false`, `0` and `""` count as missing;
    /// other numbers and `true` render as written. Arrays and objects are refused.
    pub fn renderable_text(&self) -> Option<String> {
        match self.text.as_ref()? {
            Value::String(text) if !text.is_empty() => Some(text.clone()),
            Value::Number(n) if n.as_f64() != Some(0.0) => Some(n.to_string()),
            Value::Bool(true) => Some("true".to_string()),
            _ => None,
        }
    }
}

//=========================================================================================
// Responses
//=========================================================================================

#[derive(Serialize, Debug, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct QuizQuestionResponse {
    pub question: String,
    pub options: Vec<String>,
    pub correct_answer: usize,
    pub explanation: String,
}

#[derive(Serialize, Debug, ToSchema)]
pub struct QuizResponse {
    pub questions: Vec<QuizQuestionResponse>,
}

/// A base64-encoded PDF.
#[derive(Serialize, Debug, ToSchema)]
pub struct PdfResponse {
    pub filename: String,
    pub data: String,
}

#[derive(Serialize, Debug, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SummaryResponse {
    pub cheat_sheet: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cheat_sheet_pdf: Option<PdfResponse>,
}

#[derive(Serialize, Debug, ToSchema)]
pub struct VideoResponse {
    pub title: String,
    pub url: String,
    pub thumbnail: String,
    pub channel: String,
}

/// Body of a successful `POST /api/generate-course`.
#[derive(Serialize, Debug, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CourseResponse {
    pub keyword: String,
    pub quiz: QuizResponse,
    pub summary: SummaryResponse,
    pub videos: Vec<VideoResponse>,
    pub bonus_tip: String,
    pub timestamp: String,
}

#[derive(Serialize, Debug, ToSchema)]
pub struct HealthResponse {
    pub status: String,
    pub message: String,
}

/// Body of every 4xx/5xx response.
#[derive(Serialize, Debug, ToSchema)]
pub struct ErrorResponse {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            details: None,
        }
    }

    pub fn with_details(error: impl Into<String>, details: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            details: Some(details.into()),
        }
    }
}

//=========================================================================================
// Domain Conversions
//=========================================================================================

impl From<QuizQuestion> for QuizQuestionResponse {
    fn from(q: QuizQuestion) -> Self {
        Self {
            question: q.question,
            options: q.options,
            correct_answer: q.correct_answer,
            explanation: q.explanation,
        }
    }
}

impl From<Quiz> for QuizResponse {
    fn from(quiz: Quiz) -> Self {
        Self {
            questions: quiz.questions.into_iter().map(Into::into).collect(),
        }
    }
}

impl PdfResponse {
    pub fn encode(filename: String, bytes: &[u8]) -> Self {
        Self {
            filename,
            data: STANDARD.encode(bytes),
        }
    }
}

impl From<StudyGuide> for SummaryResponse {
    fn from(guide: StudyGuide) -> Self {
        Self {
            cheat_sheet: guide.cheat_sheet,
            cheat_sheet_pdf: guide
                .cheat_sheet_pdf
                .map(|pdf| PdfResponse::encode(pdf.filename, &pdf.data)),
        }
    }
}

impl From<Video> for VideoResponse {
    fn from(v: Video) -> Self {
        Self {
            title: v.title,
            url: v.url,
            thumbnail: v.thumbnail,
            channel: v.channel,
        }
    }
}

impl From<CourseResult> for CourseResponse {
    fn from(course: CourseResult) -> Self {
        Self {
            keyword: course.topic.as_str().to_string(),
            quiz: course.quiz.into(),
            summary: course.summary.into(),
            videos: course.videos.into_iter().map(Into::into).collect(),
            bonus_tip: course.bonus_tip,
            timestamp: course
                .generated_at
                .to_rfc3339_opts(SecondsFormat::Millis, true),
        }
    }
}
