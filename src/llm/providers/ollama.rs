

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::info;

use super::base::{ChatMessage, GenerationParams, LlmMetadata, LlmProvider, LlmProviderError};

#[derive(Debug, Serialize)]
struct OllamaRequest<'a> {
    model: &'a str,
    messages: &'a [ChatMessage],
    stream: bool,
    options: OllamaOptions<'a>,
    #[serde(skip_serializing_if = "Option::is_none")]
    format: Option<&'static str>,
}

#[derive(Debug, Serialize)]
struct OllamaOptions<'a> {
    temperature: f64,
    top_p: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    num_predict: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    stop: Option<&'a [String]>,
}

#[derive(Debug, Deserialize)]
struct OllamaResponse {
    message: OllamaMessage,
    #[serde(default)]
    prompt_eval_count: u32,
    #[serde(default)]
    eval_count: u32,
}

#[derive(Debug, Deserialize)]
struct OllamaMessage {
    content: String,
}


pub struct OllamaProvider {
    base_url: String,
    model: String,
    client: Client,
}

impl OllamaProvider {

    pub fn new(base_url: impl Into<String>, model: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        let model = model.into();
        info!("Ollama provider initialized (model={}, url={})", model, base_url);
        Self {
            base_url,
            model,
            client: Client::new(),
        }
    }


    pub fn localhost(model: impl Into<String>) -> Self {
        Self::new(crate::DEFAULT_OLLAMA_URL, model)
    }


    pub fn with_client(mut self, client: Client) -> Self {
        self.client = client;
        self
    }
}

#[async_trait]
impl LlmProvider for OllamaProvider {
    async fn complete(
        &self,
        messages: &[ChatMessage],
        params: &GenerationParams,
    ) -> Result<(String, LlmMetadata), LlmProviderError> {
        // Ollama streams by default; a single JSON body is required here.
        let request = OllamaRequest {
            model: &self.model,
            messages,
            stream: false,
            options: OllamaOptions {
                temperature: params.temperature,
                top_p: params.top_p,
                num_predict: params.max_tokens,
                stop: params.stop.as_deref(),
            },
            format: params.json_output.then_some("json"),
        };

        let response = self
            .client
            .post(format!("{}/api/chat", self.base_url))
            .json(&request)
            .send()
            .await?
            .error_for_status()
            .map_err(LlmProviderError::Http)?
            .json::<OllamaResponse>()
            .await?;

        let metadata = LlmMetadata {
            provider: "ollama".to_string(),
            model: self.model.clone(),
            base_url: Some(self.base_url.clone()),
            tokens_prompt: Some(response.prompt_eval_count),
            tokens_completion: Some(response.eval_count),
            tokens_total: Some(response.prompt_eval_count + response.eval_count),
        };

        Ok((response.message.content, metadata))
    }

    fn provider_name(&self) -> &str {
        "ollama"
    }

    fn model_name(&self) -> &str {
        &self.model
    }
}
