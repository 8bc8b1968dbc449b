//! crates/bytementor_core/src/domain.rs
//!
//! Defines the pure, core data structures for the application.
//! These structs are independent of any HTTP layer or serialization format.

use chrono::{DateTime, Utc};

/// The number of questions a complete quiz carries.
pub const QUIZ_LENGTH: usize = 5;

/// The number of answer options every quiz question carries.
pub const OPTIONS_PER_QUESTION: usize = 4;

/// The maximum number of videos attached to a course.
pub const MAX_VIDEOS: usize = 5;

//=========================================================================================
// Topic
//=========================================================================================

/// Raised when the user-supplied topic is unusable.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TopicError {
    #[error("Keyword is required")]
    Blank,
}

/// The user-supplied subject that drives every provider.
///
/// Always non-empty and trimmed. The displayed form is never normalized;
/// [`Topic::file_stem`] derives the filename-safe form.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Topic(String);

impl Topic {
    pub fn parse(raw: &str) -> Result<Self, TopicError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(TopicError::Blank);
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The topic with every run of whitespace collapsed to a single `_`.
    pub fn file_stem(&self) -> String {
        self.0.split_whitespace().collect::<Vec<_>>().join("_")
    }
}

impl std::fmt::Display for Topic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

//=========================================================================================
// Course Content
//=========================================================================================

/// A single multiple-choice question.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuizQuestion {
    pub question: String,
    pub options: Vec<String>,
    pub correct_answer: usize,
    pub explanation: String,
}

impl QuizQuestion {
    /// Exactly four options, and `correct_answer` points at one of them.
    pub fn is_well_formed(&self) -> bool {
        self.options.len() == OPTIONS_PER_QUESTION && self.correct_answer < self.options.len()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Quiz {
    pub questions: Vec<QuizQuestion>,
}

/// A rendered copy of the study guide.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StudyGuidePdf {
    pub filename: String,
    pub data: Vec<u8>,
}

/// The plain-text study guide and, when rendering succeeded, its PDF.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StudyGuide {
    pub cheat_sheet: String,
    pub cheat_sheet_pdf: Option<StudyGuidePdf>,
}

/// One search hit from the video lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Video {
    pub title: String,
    pub url: String,
    pub thumbnail: String,
    pub channel: String,
}

/// The assembled mini-course. Never mutated after assembly.
#[derive(Debug, Clone)]
pub struct CourseResult {
    pub topic: Topic,
    pub quiz: Quiz,
    pub summary: StudyGuide,
    pub videos: Vec<Video>,
    pub bonus_tip: String,
    pub generated_at: DateTime<Utc>,
}

/// The output of one render call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedDocument {
    pub filename: String,
    pub bytes: Vec<u8>,
    pub page_count: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn topic_is_trimmed_but_not_normalized() {
        let topic = Topic::parse("  Rust Ownership  ").unwrap();
        assert_eq!(topic.as_str(), "Rust Ownership");
    }

    #[test]
    fn blank_topics_are_rejected() {
        assert_eq!(Topic::parse(""), Err(TopicError::Blank));
        assert_eq!(Topic::parse(" \t\n "), Err(TopicError::Blank));
    }

    #[test]
    fn file_stem_collapses_whitespace_runs() {
        let topic = Topic::parse("machine   learning\tbasics").unwrap();
        assert_eq!(topic.file_stem(), "machine_learning_basics");
    }

    #[test]
    fn question_shape_is_checked() {
        let mut question = QuizQuestion {
            question: "q".to_string(),
            options: vec!["a".into(), "b".into(), "c".into(), "d".into()],
            correct_answer: 3,
            explanation: String::new(),
        };
        assert!(question.is_well_formed());

        question.correct_answer = 4;
        assert!(!question.is_well_formed());

        question.correct_answer = 0;
        question.options.pop();
        assert!(!question.is_well_formed());
    }
}
