

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use strum::{Display, EnumString, IntoStaticStr};
use thiserror::Error;


#[derive(Error, Debug)]
pub enum LlmProviderError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON parsing failed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Provider error: {0}")]
    Provider(String),
}


#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString, IntoStaticStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum ChatRole {
    System,
    User,
    Assistant,
}


#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: ChatRole,
    pub content: String,
}

impl ChatMessage {
    pub fn new(role: ChatRole, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
        }
    }

    pub fn system(content: impl Into<String>) -> Self {
        Self::new(ChatRole::System, content)
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self::new(ChatRole::User, content)
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self::new(ChatRole::Assistant, content)
    }
}


/// Sampling parameters for a single completion call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerationParams {
    pub temperature: f64,
    /// `None` leaves the limit to the provider.
    pub max_tokens: Option<u32>,
    pub top_p: f64,
    pub stream: bool,
    pub stop: Option<Vec<String>>,
    /// Forces the provider to emit a single JSON object.
    pub json_output: bool,
}

impl GenerationParams {

    pub fn with_temperature(mut self, temperature: f64) -> Self {
        self.temperature = temperature;
        self
    }

    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = Some(max_tokens);
        self
    }

    pub fn json(mut self) -> Self {
        self.json_output = true;
        self
    }
}

impl Default for GenerationParams {
    fn default() -> Self {
        Self {
            temperature: 1.0,
            max_tokens: None,
            top_p: 1.0,
            stream: false,
            stop: None,
            json_output: false,
        }
    }
}


#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct LlmMetadata {
    pub provider: String,
    pub model: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tokens_prompt: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tokens_completion: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tokens_total: Option<u32>,
}


#[async_trait]
pub trait LlmProvider: Send + Sync {

    async fn complete(
        &self,
        messages: &[ChatMessage],
        params: &GenerationParams,
    ) -> Result<(String, LlmMetadata), LlmProviderError>;


    fn provider_name(&self) -> &str;


    fn model_name(&self) -> &str;
}


#[async_trait]
impl LlmProvider for Arc<dyn LlmProvider> {
    async fn complete(
        &self,
        messages: &[ChatMessage],
        params: &GenerationParams,
    ) -> Result<(String, LlmMetadata), LlmProviderError> {
        (**self).complete(messages, params).await
    }

    fn provider_name(&self) -> &str {
        (**self).provider_name()
    }

    fn model_name(&self) -> &str {
        (**self).model_name()
    }
}
