//! services/api/src/bin/api.rs

use api_lib::{
    adapters::{GeminiTextAdapter, OpenAiTextAdapter, YouTubeSearchAdapter},
    config::{Config, TextBackend},
    course::CourseOrchestrator,
    error::ApiError,
    web::{self, AppState},
};
use async_openai::{config::OpenAIConfig, Client};
use bytementor_core::ports::{TextGenerationService, VideoSearchService};
use std::sync::Arc;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), ApiError> {
    // --- 1. Load Configuration & Set Up Logging ---
    let config = Config::from_env()?;
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(config.log_level.to_string()))
        .with(tracing_subscriber::fmt::layer())
        .init();
    info!("Configuration loaded. Starting server...");

    // --- 2. Initialize Service Adapters ---
    // A missing credential is never fatal: the matching providers run fallback-only.
    let http = reqwest::Client::builder()
        .user_agent(concat!("bytementor/", env!("CARGO_PKG_VERSION")))
        .build()?;

    let text_adapter: Option<Arc<dyn TextGenerationService>> =
        match (config.text_backend, config.text_api_key()) {
            (TextBackend::Gemini, Some(key)) => Some(Arc::new(GeminiTextAdapter::new(
                http.clone(),
                config.gemini_api_url.clone(),
                config.gemini_model.clone(),
                key.to_string(),
            ))),
            (TextBackend::OpenAi, Some(key)) => {
                let openai_client = Client::with_config(OpenAIConfig::new().with_api_key(key));
                Some(Arc::new(OpenAiTextAdapter::new(
                    openai_client,
                    config.openai_model.clone(),
                )))
            }
            (TextBackend::Gemini, None) => {
                warn!("GEMINI_API_KEY not found; quiz, summary and tip will use fallback content.");
                None
            }
            (TextBackend::OpenAi, None) => {
                warn!("OPENAI_API_KEY not found; quiz, summary and tip will use fallback content.");
                None
            }
        };

    let video_adapter: Option<Arc<dyn VideoSearchService>> = match &config.youtube_api_key {
        Some(key) => Some(Arc::new(YouTubeSearchAdapter::new(
            http.clone(),
            config.youtube_api_url.clone(),
            key.clone(),
        ))),
        None => {
            warn!("YOUTUBE_API_KEY not found; courses will not include videos.");
            None
        }
    };

    // --- 3. Build the Shared AppState ---
    let app_state = Arc::new(AppState {
        orchestrator: Arc::new(CourseOrchestrator::new(text_adapter, video_adapter)),
    });

    // --- 4. Create the Web Router & Start the Server ---
    let app = web::router(app_state);

    info!("ByteMentor API running on {}", config.bind_address);
    info!("Health check: http://{}/health", config.bind_address);
    let listener = tokio::net::TcpListener::bind(&config.bind_address).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
