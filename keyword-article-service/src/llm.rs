use async_trait::async_trait;
use rig::{client::CompletionClient, completion::Chat, providers::openrouter};
use tracing::debug;

use crate::error::{GenerationError, Result};

/// A single prompt sent to the chat-completion API
#[derive(Debug, Clone, PartialEq)]
pub struct ChatRequest {
    pub system_prompt: Option<String>,
    pub prompt: String,
    pub max_tokens: u64,
    pub temperature: f64,
}

impl ChatRequest {
    pub fn new(prompt: impl Into<String>, max_tokens: u64, temperature: f64) -> Self {
        Self {
            system_prompt: None,
            prompt: prompt.into(),
            max_tokens,
            temperature,
        }
    }

    pub fn with_system_prompt(mut self, system_prompt: impl Into<String>) -> Self {
        self.system_prompt = Some(system_prompt.into());
        self
    }
}

/// Anything that can turn a prompt into a single text completion
#[async_trait]
pub trait ChatModel: Send + Sync {
    async fn complete(&self, request: ChatRequest) -> Result<String>;
}

/// Chat model served through OpenRouter
pub struct OpenRouterChat {
    client: openrouter::Client,
    model: String,
}

impl OpenRouterChat {
    pub fn new(api_key: &str, model: impl Into<String>) -> Self {
        Self {
            client: openrouter::Client::new(api_key),
            model: model.into(),
        }
    }
}

#[async_trait]
impl ChatModel for OpenRouterChat {
    async fn complete(&self, request: ChatRequest) -> Result<String> {
        debug!(
            model = %self.model,
            max_tokens = request.max_tokens,
            temperature = request.temperature,
            prompt_length = request.prompt.len(),
            "Sending chat completion request"
        );

        let mut builder = self
            .client
            .agent(&self.model)
            .temperature(request.temperature)
            .max_tokens(request.max_tokens);
        if let Some(system_prompt) = &request.system_prompt {
            builder = builder.preamble(system_prompt);
        }
        let agent = builder.build();

        let response = agent
            .chat(request.prompt.as_str(), vec![])
            .await
            .map_err(|e| GenerationError::Upstream(e.to_string()))?;

        Ok(response.trim().to_string())
    }
}
