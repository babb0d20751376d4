

use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, info};

use super::providers::base::LlmProviderError;
use crate::DEFAULT_GROQ_URL;


/// Speech-to-text boundary. Audio bytes are forwarded as-is.
#[async_trait]
pub trait Transcriber: Send + Sync {

    async fn transcribe(&self, audio: Vec<u8>, file_name: &str) -> Result<String, LlmProviderError>;


    fn model_name(&self) -> &str;
}

#[derive(Debug, Deserialize)]
struct TranscriptionResponse {
    text: String,
}


pub struct GroqTranscriber {
    api_key: String,
    model: String,
    base_url: String,
    client: Client,
}

impl GroqTranscriber {

    pub fn new(api_key: impl Into<String>, model: impl Into<String>) -> Self {
        let model = model.into();
        info!("Groq transcriber initialized (model={})", model);
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
impl Transcriber for GroqTranscriber {
    async fn transcribe(&self, audio: Vec<u8>, file_name: &str) -> Result<String, LlmProviderError> {
        debug!("Transcribing {} bytes ({})", audio.len(), file_name);

        let form = Form::new()
            .text("model", self.model.clone())
            .part("file", Part::bytes(audio).file_name(file_name.to_string()));

        let response = self
            .client
            .post(format!("{}/audio/transcriptions", self.base_url))
            .header("Authorization", format!("Bearer {}", self.api_key))
            .multipart(form)
            .send()
            .await?
            .error_for_status()
            .map_err(LlmProviderError::Http)?
            .json::<TranscriptionResponse>()
            .await?;

        Ok(response.text)
    }

    fn model_name(&self) -> &str {
        &self.model
    }
}
