//! services/api/src/config.rs
//!
//! Defines the application's configuration structure and loading logic.
//!
//! All configuration is loaded from environment variables at startup. The `.env`
//! file is used for local development. Credentials are optional: a missing key
//! switches the matching providers to fallback-only mode.

use std::net::SocketAddr;
use std::str::FromStr;
use tracing::Level;

pub const DEFAULT_GEMINI_API_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
pub const DEFAULT_YOUTUBE_API_URL: &str = "https://www.googleapis.com/youtube/v3/search";

/// A custom error type for configuration loading failures.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for the environment variable {0}: {1}")]
    InvalidValue(String, String),
}

/// Which text-generation API backs the quiz, summary and bonus-tip providers.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TextBackend {
    Gemini,
    OpenAi,
}

impl FromStr for TextBackend {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "gemini" => Ok(Self::Gemini),
            "openai" => Ok(Self::OpenAi),
            other => Err(format!("'{}' is not one of: gemini, openai", other)),
        }
    }
}

/// Holds all configuration loaded from the environment at startup.
#[derive(Clone, Debug)]
pub struct Config {
    pub bind_address: SocketAddr,
    pub log_level: Level,
    pub text_backend: TextBackend,
    pub gemini_api_key: Option<String>,
    pub gemini_api_url: String,
    pub gemini_model: String,
    pub openai_api_key: Option<String>,
    pub openai_model: String,
    pub youtube_api_key: Option<String>,
    pub youtube_api_url: String,
}

impl Config {
    /// Loads configuration from environment variables.
    ///
    /// It will look for a `.env` file in the current directory for development,
    /// but this is skipped in test environments to ensure tests are hermetic.
    pub fn from_env() -> Result<Self, ConfigError> {
        if !cfg!(test) {
            dotenvy::dotenv().ok();
        }
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the configuration from an arbitrary variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        // --- Server Settings ---
        let bind_address_str =
            lookup("BIND_ADDRESS").unwrap_or_else(|| "0.0.0.0:3001".to_string());
        let bind_address = bind_address_str.parse::<SocketAddr>().map_err(|e| {
            ConfigError::InvalidValue("BIND_ADDRESS".to_string(), e.to_string())
        })?;

        let log_level_str = lookup("RUST_LOG").unwrap_or_else(|| "INFO".to_string());
        let log_level = log_level_str.parse::<Level>().map_err(|_| {
            ConfigError::InvalidValue(
                "RUST_LOG".to_string(),
                format!("'{}' is not a valid log level", log_level_str),
            )
        })?;

        let text_backend = match lookup("TEXT_BACKEND") {
            Some(value) => value
                .parse::<TextBackend>()
                .map_err(|e| ConfigError::InvalidValue("TEXT_BACKEND".to_string(), e))?,
            None => TextBackend::Gemini,
        };

        // --- API Keys (optional); blank values count as absent ---
        let non_blank = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let gemini_api_key = non_blank("GEMINI_API_KEY");
        let openai_api_key = non_blank("OPENAI_API_KEY");
        let youtube_api_key = non_blank("YOUTUBE_API_KEY");

        // --- Adapter-specific Settings ---
        let gemini_api_url =
            lookup("GEMINI_API_URL").unwrap_or_else(|| DEFAULT_GEMINI_API_URL.to_string());
        let gemini_model =
            lookup("GEMINI_MODEL").unwrap_or_else(|| "gemini-2.0-flash".to_string());
        let openai_model = lookup("OPENAI_MODEL").unwrap_or_else(|| "gpt-4o-mini".to_string());
        let youtube_api_url =
            lookup("YOUTUBE_API_URL").unwrap_or_else(|| DEFAULT_YOUTUBE_API_URL.to_string());

        Ok(Self {
            bind_address,
            log_level,
            text_backend,
            gemini_api_key,
            gemini_api_url,
            gemini_model,
            openai_api_key,
            openai_model,
            youtube_api_key,
            youtube_api_url,
        })
    }

    /// The credential for whichever text backend is selected.
    pub fn text_api_key(&self) -> Option<&str> {
        match self.text_backend {
            TextBackend::Gemini => self.gemini_api_key.as_deref(),
            TextBackend::OpenAi => self.openai_api_key.as_deref(),
        }
    }
}
