//! services/api/src/providers/bonus_tip.rs
//!
//! Generates the one-sentence bonus learning tip.

use crate::providers::{call_generator, fallback, log_fallback};
use bytementor_core::{
    domain::Topic,
    ports::{GenerationRequest, PortError, ResponseFormat, TextGenerationService},
};
use std::sync::Arc;
use std::time::Duration;

pub const BONUS_TIP_TIMEOUT: Duration = Duration::from_secs(15);

pub struct BonusTipProvider {
    generator: Option<Arc<dyn TextGenerationService>>,
    timeout: Duration,
}

impl BonusTipProvider {
    pub fn new(generator: Option<Arc<dyn TextGenerationService>>) -> Self {
        Self {
            generator,
            timeout: BONUS_TIP_TIMEOUT,
        }
    }

    pub fn request(topic: &Topic) -> GenerationRequest {
        GenerationRequest::new(
            format!(
                "Give a short, actionable bonus learning tip for mastering \"{}\". Format: one clear sentence.",
                topic
            ),
            ResponseFormat::PlainText,
        )
    }

    pub async fn generate(&self, topic: &Topic) -> String {
        let outcome = call_generator(self.generator.as_ref(), &Self::request(topic), self.timeout)
            .await
            .and_then(|raw| match raw.trim() {
                "" => Err(PortError::MalformedBody("empty tip".to_string())),
                tip => Ok(tip.to_string()),
            });
        match outcome {
            Ok(tip) => tip,
            Err(e) => {
                log_fallback("bonus_tip", &e);
                fallback::bonus_tip(topic)
            }
        }
    }
}
