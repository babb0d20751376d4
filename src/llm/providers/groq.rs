

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::base::{ChatMessage, GenerationParams, LlmMetadata, LlmProvider, LlmProviderError};
use crate::DEFAULT_GROQ_URL;

#[derive(Debug, Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: &'a [ChatMessage],
    temperature: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_tokens: Option<u32>,
    top_p: f64,
    stream: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    stop: Option<&'a [String]>,
    #[serde(skip_serializing_if = "Option::is_none")]
    response_format: Option<ResponseFormat>,
}

#[derive(Debug, Serialize)]
struct ResponseFormat {
    r#type: &'static str,
}

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    choices: Vec<ChatCompletionChoice>,
    usage: Option<ChatCompletionUsage>,
}

#[derive(Debug, Deserialize)]
struct ChatCompletionChoice {
    message: ChatCompletionMessage,
}

#[derive(Debug, Deserialize)]
struct ChatCompletionMessage {
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ChatCompletionUsage {
    prompt_tokens: u32,
    completion_tokens: u32,
    total_tokens: u32,
}


/// Groq chat completions over the OpenAI-compatible API.
pub struct GroqProvider {
    api_key: String,
    model: String,
    base_url: String,
    client: Client,
}

impl GroqProvider {

    pub fn new(api_key: impl Into<String>, model: impl Into<String>) -> Self {
        let model = model.into();
        info!("Groq provider initialized (model={})", model);
        Self {
            api_key: api_key.into(),
            model,
            base_url: DEFAULT_GROQ_URL.to_string(),
            client: Client::new(),
        }
    }


    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }


    pub fn with_client(mut self, client: Client) -> Self {
        self.client = client;
        self
    }
}

#[async_trait]
impl LlmProvider for GroqProvider {
    async fn complete(
        &self,
        messages: &[ChatMessage],
        params: &GenerationParams,
    ) -> Result<(String, LlmMetadata), LlmProviderError> {
        let request = ChatCompletionRequest {
            model: &self.model,
            messages,
            temperature: params.temperature,
            max_tokens: params.max_tokens,
            top_p: params.top_p,
            stream: params.stream,
            stop: params.stop.as_deref(),
            response_format: params
                .json_output
                .then_some(ResponseFormat { r#type: "json_object" }),
        };

        debug!(
            "Groq request: model={}, messages={}, max_tokens={:?}",
            self.model,
            messages.len(),
            params.max_tokens
        );

        let response = self
            .client
            .post(format!("{}/chat/completions", self.base_url))
            .header("Authorization", format!("Bearer {}", self.api_key))
            .json(&request)
            .send()
            .await?
            .error_for_status()
            .map_err(LlmProviderError::Http)?
            .json::<ChatCompletionResponse>()
            .await?;

        let content = response
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| LlmProviderError::Provider("No choices in response".to_string()))?
            .message
            .content
            .ok_or_else(|| LlmProviderError::Provider("Empty message content".to_string()))?;

        let mut metadata = LlmMetadata {
            provider: "groq".to_string(),
            model: self.model.clone(),
            base_url: Some(self.base_url.clone()),
            ..Default::default()
        };

        if let Some(usage) = response.usage {
            metadata.tokens_prompt = Some(usage.prompt_tokens);
            metadata.tokens_completion = Some(usage.completion_tokens);
            metadata.tokens_total = Some(usage.total_tokens);
        }

        Ok((content, metadata))
    }

    fn provider_name(&self) -> &str {
        "groq"
    }

    fn model_name(&self) -> &str {
        &self.model
    }
}
