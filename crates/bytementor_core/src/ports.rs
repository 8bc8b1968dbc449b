//! crates/bytementor_core/src/ports.rs
//!
//! Defines the service contracts (traits) for the application's core logic.
//! These traits form the boundary of the hexagonal architecture, allowing the core
//! to stay independent of the concrete text-generation and video-search APIs.

use crate::domain::Video;
use async_trait::async_trait;

//=========================================================================================
// Generic Port Error and Result Types
//=========================================================================================

/// Every way an upstream call can fail to produce a usable payload.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PortError {
    #[error("No credential configured for {0}")]
    MissingCredential(String),
    #[error("Upstream call timed out")]
    Timeout,
    #[error("Transport error: {0}")]
    Transport(String),
    #[error("Upstream returned status {0}")]
    Status(u16),
    #[error("Malformed upstream body: {0}")]
    MalformedBody(String),
    #[error("An unexpected error occurred: {0}")]
    Unexpected(String),
}

/// A convenience type alias for `Result<T, PortError>`.
pub type PortResult<T> = Result<T, PortError>;

//=========================================================================================
// Request Shapes
//=========================================================================================

/// The response format the generator is asked to honor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponseFormat {
    Json,
    PlainText,
}

/// A single prompt together with its sampling parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationRequest {
    pub prompt: String,
    pub format: ResponseFormat,
    pub temperature: f32,
    pub top_k: Option<u32>,
    pub top_p: Option<f32>,
    pub max_output_tokens: Option<u32>,
}

impl GenerationRequest {
    pub fn new(prompt: impl Into<String>, format: ResponseFormat) -> Self {
        Self {
            prompt: prompt.into(),
            format,
            temperature: 0.7,
            top_k: None,
            top_p: None,
            max_output_tokens: None,
        }
    }
}

//=========================================================================================
// Service Ports (Traits)
//=========================================================================================

#[async_trait]
pub trait TextGenerationService: Send + Sync {
    /// Sends one prompt and returns the concatenated text of the first candidate.
    async fn generate(&self, request: &GenerationRequest) -> PortResult<String>;
}

#[async_trait]
pub trait VideoSearchService: Send + Sync {
    /// Returns up to `max_results` videos in upstream relevance order.
    async fn search(&self, query: &str, max_results: usize) -> PortResult<Vec<Video>>;
}
