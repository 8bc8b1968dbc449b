//! services/api/src/providers/mod.rs
//!
//! Content providers. Each wraps exactly one upstream call and never fails:
//! a missing credential, transport error, timeout or unusable body resolves to
//! deterministic fallback content (or, for videos, an empty list).

pub mod bonus_tip;
pub mod fallback;
pub mod quiz;
pub mod summary;
pub mod videos;

pub use bonus_tip::BonusTipProvider;
pub use quiz::QuizProvider;
pub use summary::SummaryProvider;
pub use videos::VideoProvider;

use bytementor_core::ports::{GenerationRequest, PortError, PortResult, TextGenerationService};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};

/// Issues one generation call bounded by `limit`.
///
/// `None` means no credential is configured; no call is made.
pub(crate) async fn call_generator(
    generator: Option<&Arc<dyn TextGenerationService>>,
    request: &GenerationRequest,
    limit: Duration,
) -> PortResult<String> {
    let generator = generator
        .ok_or_else(|| PortError::MissingCredential("text generation".to_string()))?;
    tokio::time::timeout(limit, generator.generate(request))
        .await
        .map_err(|_| PortError::Timeout)?
}

/// Logs why a provider is serving fallback content.
pub(crate) fn log_fallback(provider: &'static str, error: &PortError) {
    match error {
        PortError::MissingCredential(_) => {
            debug!(provider, "No credential configured; serving fallback content.")
        }
        other => warn!(provider, error = %other, "Upstream unusable; serving fallback content."),
    }
}

#[cfg(test)]
pub(crate) mod fakes {
    //! Hand-written port implementations for provider and orchestrator tests.

    use async_trait::async_trait;
    use bytementor_core::domain::Video;
    use bytementor_core::ports::{
        GenerationRequest, PortError, PortResult, ResponseFormat, TextGenerationService,
        VideoSearchService,
    };
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    /// Answers every request with a fixed outcome and counts the calls.
    pub struct FixedGenerator {
        pub outcome: PortResult<String>,
        pub calls: AtomicUsize,
    }

    impl FixedGenerator {
        pub fn ok(text: impl Into<String>) -> Self {
            Self {
                outcome: Ok(text.into()),
                calls: AtomicUsize::new(0),
            }
        }

        pub fn err(error: PortError) -> Self {
            Self {
                outcome: Err(error),
                calls: AtomicUsize::new(0),
            }
        }

        pub fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl TextGenerationService for FixedGenerator {
        async fn generate(&self, _request: &GenerationRequest) -> PortResult<String> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.outcome.clone()
        }
    }

    /// Routes JSON requests to the quiz body and plain-text requests by prompt.
    pub struct ScriptedGenerator {
        pub quiz: String,
        pub summary: String,
        pub tip: String,
    }

    #[async_trait]
    impl TextGenerationService for ScriptedGenerator {
        async fn generate(&self, request: &GenerationRequest) -> PortResult<String> {
            if request.format == ResponseFormat::Json {
                Ok(self.quiz.clone())
            } else if request.prompt.contains("study guide") {
                Ok(self.summary.clone())
            } else {
                Ok(self.tip.clone())
            }
        }
    }

    /// Never answers within any provider timeout.
    pub struct StalledGenerator;

    #[async_trait]
    impl TextGenerationService for StalledGenerator {
        async fn generate(&self, _request: &GenerationRequest) -> PortResult<String> {
            tokio::time::sleep(Duration::from_secs(3600)).await;
            Ok("too late".to_string())
        }
    }

    /// Fails the requests `fails` selects and answers the rest like `healthy`.
    pub struct PartlyFailingGenerator {
        pub healthy: ScriptedGenerator,
        pub fails: fn(&GenerationRequest) -> bool,
    }

    #[async_trait]
    impl TextGenerationService for PartlyFailingGenerator {
        async fn generate(&self, request: &GenerationRequest) -> PortResult<String> {
            if (self.fails)(request) {
                Err(PortError::Status(500))
            } else {
                self.healthy.generate(request).await
            }
        }
    }

    pub struct FixedSearch(pub PortResult<Vec<Video>>);

    #[async_trait]
    impl VideoSearchService for FixedSearch {
        async fn search(&self, _query: &str, _max_results: usize) -> PortResult<Vec<Video>> {
            self.0.clone()
        }
    }

    /// Never answers within the video lookup timeout.
    pub struct StalledSearch;

    #[async_trait]
    impl VideoSearchService for StalledSearch {
        async fn search(&self, _query: &str, _max_results: usize) -> PortResult<Vec<Video>> {
            tokio::time::sleep(Duration::from_secs(3600)).await;
            Ok(Vec::new())
        }
    }

    pub fn video(n: usize) -> Video {
        Video {
            title: format!("Video {}", n),
            url: format!("https://www.youtube.com/watch?v=id{}", n),
            thumbnail: format!("https://i.ytimg.com/vi/id{}/mqdefault.jpg", n),
            channel: "Channel".to_string(),
        }
    }

    pub fn quiz_json(count: usize) -> String {
        let questions: Vec<String> = (0..count)
            .map(|i| {
                format!(
                    r#"{{"question":"Q{i}","options":["a","b","c","d"],"correctAnswer":{},"explanation":"E{i}"}}"#,
                    i % 4
                )
            })
            .collect();
        format!("```json\n{{\"questions\":[{}]}}\n```", questions.join(","))
    }
}
