//! services/api/src/providers/quiz.rs
//!
//! Generates the five-question quiz.

use crate::providers::{call_generator, fallback, log_fallback};
use bytementor_core::{
    domain::{Quiz, QuizQuestion, Topic, QUIZ_LENGTH},
    extract::extract_json_object,
    ports::{GenerationRequest, PortError, PortResult, ResponseFormat, TextGenerationService},
};
use serde::Deserialize;
use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;

pub const QUIZ_TIMEOUT: Duration = Duration::from_secs(30);

const PROMPT_TEMPLATE: &str = r#"
You are an expert educator. Generate exactly 5 quiz questions about "{topic}".
Return ONLY JSON:
{
  "questions": [
    {
      "question": "Question text",
      "options": ["Option A", "Option B", "Option C", "Option D"],
      "correctAnswer": 0,
      "explanation": "Why this answer is correct"
    }
  ]
}
"#;

/// The upstream shape of one question, before validation.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct QuestionPayload {
    question: String,
    options: Vec<String>,
    correct_answer: usize,
    #[serde(default)]
    explanation: String,
}

impl From<QuestionPayload> for QuizQuestion {
    fn from(p: QuestionPayload) -> Self {
        QuizQuestion {
            question: p.question,
            options: p.options,
            correct_answer: p.correct_answer,
            explanation: p.explanation,
        }
    }
}

pub struct QuizProvider {
    generator: Option<Arc<dyn TextGenerationService>>,
    timeout: Duration,
}

impl QuizProvider {
    pub fn new(generator: Option<Arc<dyn TextGenerationService>>) -> Self {
        Self {
            generator,
            timeout: QUIZ_TIMEOUT,
        }
    }

    pub fn request(topic: &Topic) -> GenerationRequest {
        GenerationRequest::new(
            PROMPT_TEMPLATE.replace("{topic}", topic.as_str()),
            ResponseFormat::Json,
        )
    }

    /// Returns the live quiz, or the fallback quiz on any failure.
    pub async fn generate(&self, topic: &Topic) -> Quiz {
        let outcome = call_generator(self.generator.as_ref(), &Self::request(topic), self.timeout)
            .await
            .and_then(|raw| parse_quiz(&raw));
        match outcome {
            Ok(quiz) => quiz,
            Err(e) => {
                log_fallback("quiz", &e);
                fallback::quiz(topic)
            }
        }
    }
}

/// Keeps the first five questions of the extracted `questions` array.
///
/// Fewer than five are returned as they are; only an empty list, or a question
/// that breaks the four-option shape, rejects the response.
pub fn parse_quiz(raw: &str) -> PortResult<Quiz> {
    let object = extract_json_object(raw).map_err(|e| PortError::MalformedBody(e.to_string()))?;
    let items = match object.get("questions") {
        Some(Value::Array(items)) if !items.is_empty() => items,
        _ => {
            return Err(PortError::MalformedBody(
                "response has no questions array".to_string(),
            ))
        }
    };

    let questions = items
        .iter()
        .take(QUIZ_LENGTH)
        .enumerate()
        .map(|(idx, item)| {
            let question: QuizQuestion = serde_json::from_value::<QuestionPayload>(item.clone())
                .map_err(|e| PortError::MalformedBody(format!("question {}: {}", idx, e)))?
                .into();
            if question.is_well_formed() {
                Ok(question)
            } else {
                Err(PortError::MalformedBody(format!(
                    "question {} does not have four options and a valid answer",
                    idx
                )))
            }
        })
        .collect::<PortResult<Vec<_>>>()?;

    Ok(Quiz { questions })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::providers::fakes::{quiz_json, FixedGenerator, StalledGenerator};

    fn topic() -> Topic {
        Topic::parse("Graph Theory").unwrap()
    }

    #[test]
    fn prompt_names_the_topic_and_asks_for_json() {
        let request = QuizProvider::request(&topic());
        assert!(request.prompt.contains("about \"Graph Theory\""));
        assert_eq!(request.format, ResponseFormat::Json);
    }

    #[test]
    fn over_production_is_truncated() {
        let quiz = parse_quiz(&quiz_json(8)).unwrap();
        assert_eq!(quiz.questions.len(), QUIZ_LENGTH);
        assert_eq!(quiz.questions[4].question, "Q4");
    }

    #[test]
    fn under_production_is_returned_as_is() {
        let quiz = parse_quiz(&quiz_json(3)).unwrap();
        assert_eq!(quiz.questions.len(), 3);
    }

    #[test]
    fn bad_shapes_are_malformed() {
        for raw in [
            "not json at all",
            r#"{"quiz": []}"#,
            r#"{"questions": []}"#,
            r#"{"questions": "five"}"#,
            r#"{"questions": [{"question": "q", "options": ["a", "b"], "correctAnswer": 0}]}"#,
            r#"{"questions": [{"question": "q", "options": ["a","b","c","d"], "correctAnswer": 4}]}"#,
            r#"{"questions": [{"question": "q", "options": ["a","b","c","d"], "correctAnswer": -1}]}"#,
        ] {
            assert!(
                matches!(parse_quiz(raw), Err(PortError::MalformedBody(_))),
                "expected malformed: {}",
                raw
            );
        }
    }

    #[tokio::test]
    async fn missing_credential_serves_fallback() {
        let quiz = QuizProvider::new(None).generate(&topic()).await;
        assert_eq!(quiz, fallback::quiz(&topic()));
    }

    #[tokio::test]
    async fn live_quiz_is_used_when_valid() {
        let generator = Arc::new(FixedGenerator::ok(quiz_json(6)));
        let provider = QuizProvider::new(Some(generator.clone()));
        let quiz = provider.generate(&topic()).await;
        assert_eq!(quiz.questions.len(), 5);
        assert_eq!(quiz.questions[1].correct_answer, 1);
        assert_eq!(generator.calls(), 1);
    }

    #[tokio::test]
    async fn upstream_errors_serve_fallback() {
        for error in [PortError::Status(503), PortError::Transport("reset".into())] {
            let provider = QuizProvider::new(Some(Arc::new(FixedGenerator::err(error))));
            assert_eq!(provider.generate(&topic()).await, fallback::quiz(&topic()));
        }
    }

    #[tokio::test(start_paused = true)]
    async fn slow_upstream_times_out_into_fallback() {
        let provider = QuizProvider::new(Some(Arc::new(StalledGenerator)));
        let started = tokio::time::Instant::now();
        let quiz = provider.generate(&topic()).await;
        assert_eq!(quiz, fallback::quiz(&topic()));
        assert!(started.elapsed() >= QUIZ_TIMEOUT);
        assert!(started.elapsed() < Duration::from_secs(60));
    }
}
