//! services/api/src/providers/summary.rs
//!
//! Generates the plain-text study guide and renders it to PDF.

use crate::providers::{call_generator, fallback, log_fallback};
use crate::render::{self, sanitize_filename};
use bytementor_core::{
    domain::{StudyGuide, StudyGuidePdf, Topic},
    ports::{GenerationRequest, PortError, ResponseFormat, TextGenerationService},
};
use std::sync::Arc;
use std::time::Duration;
use tracing::warn;

pub const SUMMARY_TIMEOUT: Duration = Duration::from_secs(30);

pub struct SummaryProvider {
    generator: Option<Arc<dyn TextGenerationService>>,
    timeout: Duration,
}

impl SummaryProvider {
    pub fn new(generator: Option<Arc<dyn TextGenerationService>>) -> Self {
        Self {
            generator,
            timeout: SUMMARY_TIMEOUT,
        }
    }

    pub fn request(topic: &Topic) -> GenerationRequest {
        let prompt = format!(
            "\nCreate a plain text study guide for \"{}\". Do not use any markdown, special characters, or formatting symbols.\nUse only numbers for lists.",
            topic
        );
        GenerationRequest {
            top_k: Some(40),
            top_p: Some(0.8),
            max_output_tokens: Some(2048),
            ..GenerationRequest::new(prompt, ResponseFormat::PlainText)
        }
    }

    /// Returns the live study guide, or the fallback outline on any failure.
    pub async fn generate(&self, topic: &Topic) -> StudyGuide {
        let outcome = call_generator(self.generator.as_ref(), &Self::request(topic), self.timeout)
            .await
            .and_then(|raw| {
                let trimmed = raw.trim();
                if trimmed.is_empty() {
                    Err(PortError::MalformedBody("empty study guide".to_string()))
                } else {
                    Ok(trimmed.to_string())
                }
            });

        match outcome {
            Ok(text) => with_pdf(text, &format!("{}_study_guide.pdf", topic.file_stem())),
            Err(e) => {
                log_fallback("summary", &e);
                with_pdf(
                    fallback::study_guide(topic),
                    &format!("{}_guide.pdf", topic.file_stem()),
                )
            }
        }
    }
}

/// Attaches a rendered copy; a render failure leaves the guide without one.
fn with_pdf(cheat_sheet: String, filename: &str) -> StudyGuide {
    let filename = sanitize_filename(filename);
    let cheat_sheet_pdf = match render::render(&cheat_sheet, &filename) {
        Ok(doc) => Some(StudyGuidePdf {
            filename: doc.filename,
            data: doc.bytes,
        }),
        Err(e) => {
            warn!(error = %e, "Study guide rendering failed; returning text only.");
            None
        }
    };
    StudyGuide {
        cheat_sheet,
        cheat_sheet_pdf,
    }
}
