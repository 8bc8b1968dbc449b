//! services/api/src/adapters/openai_llm.rs
//!
//! This module contains the adapter for an OpenAI-compatible chat-completions model.
//! It implements the `TextGenerationService` port from the `core` crate.

use async_openai::{
    config::OpenAIConfig,
    types::chat::{
        ChatCompletionRequestSystemMessageArgs, ChatCompletionRequestUserMessageArgs,
        CreateChatCompletionRequestArgs, ResponseFormat as OpenAiResponseFormat,
    },
    Client, error::OpenAIError,
};
use async_trait::async_trait;
use bytementor_core::ports::{
    GenerationRequest, PortError, PortResult, ResponseFormat, TextGenerationService,
};

const SYSTEM_INSTRUCTIONS: &str = "You are ByteMentor, an assistant that writes concise learning material. Follow the requested output format exactly.";

//=========================================================================================
// The Main Adapter Struct
//=========================================================================================

/// An adapter that implements `TextGenerationService` using an OpenAI-compatible LLM.
#[derive(Clone)]
pub struct OpenAiTextAdapter {
    client: Client<OpenAIConfig>,
    model: String,
}

impl OpenAiTextAdapter {
    /// Creates a new `OpenAiTextAdapter`.
    pub fn new(client: Client<OpenAIConfig>, model: String) -> Self {
        Self { client, model }
    }
}

fn to_port_error(e: OpenAIError) -> PortError {
    match e {
        OpenAIError::Reqwest(e) if e.is_timeout() => PortError::Timeout,
        OpenAIError::Reqwest(e) => PortError::Transport(e.to_string()),
        other => PortError::Unexpected(other.to_string()),
    }
}

//=========================================================================================
// `TextGenerationService` Trait Implementation
//=========================================================================================

#[async_trait]
impl TextGenerationService for OpenAiTextAdapter {
    async fn generate(&self, request: &GenerationRequest) -> PortResult<String> {
        let messages = vec![
            ChatCompletionRequestSystemMessageArgs::default()
                .content(SYSTEM_INSTRUCTIONS)
                .build()
                .map_err(|e| PortError::Unexpected(e.to_string()))?
                .into(),
            ChatCompletionRequestUserMessageArgs::default()
                .content(request.prompt.as_str())
                .build()
                .map_err(|e| PortError::Unexpected(e.to_string()))?
                .into(),
        ];

        let mut args = CreateChatCompletionRequestArgs::default();
        args.model(&self.model)
            .messages(messages)
            .n(1)
            .temperature(request.temperature);
        if let Some(top_p) = request.top_p {
            args.top_p(top_p);
        }
        if let Some(max_tokens) = request.max_output_tokens {
            args.max_completion_tokens(max_tokens);
        }
        if request.format == ResponseFormat::Json {
            args.response_format(OpenAiResponseFormat::JsonObject);
        }
        let chat_request = args
            .build()
            .map_err(|e| PortError::Unexpected(e.to_string()))?;

        let response = self
            .client
            .chat()
            .create(chat_request)
            .await
            .map_err(to_port_error)?;

        // Only the first choice is considered; an empty choice list is a malformed body.
        let choice = response.choices.into_iter().next().ok_or_else(|| {
            PortError::MalformedBody("chat completion returned no choices".to_string())
        })?;
        Ok(choice.message.content.unwrap_or_default())
    }
}
