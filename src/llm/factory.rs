

use std::time::Duration;

use reqwest::Client;
use tracing::info;

use super::providers::base::LlmProvider;
use super::providers::groq::GroqProvider;
use super::providers::ollama::OllamaProvider;
use super::transcription::{GroqTranscriber, Transcriber};
use crate::core::config::{SUPPORTED_PROVIDERS, YeetupConfig};
use crate::core::error::{Result, YeetupError};


pub struct LlmProviderFactory;

impl LlmProviderFactory {

    pub fn create(
        provider: &str,
        model: &str,
        api_key: Option<&str>,
        base_url: Option<&str>,
        timeout_secs: Option<u64>,
    ) -> Result<Box<dyn LlmProvider>> {
        let client = http_client(timeout_secs)?;

        match provider {
            "groq" => {
                let api_key = require_api_key(provider, api_key)?;
                let mut groq = GroqProvider::new(api_key, model).with_client(client);
                if let Some(url) = base_url {
                    groq = groq.with_base_url(url);
                }
                Ok(Box::new(groq))
            }
            "ollama" => {
                let ollama = match base_url {
                    Some(url) => OllamaProvider::new(url, model),
                    None => OllamaProvider::localhost(model),
                };
                Ok(Box::new(ollama.with_client(client)))
            }
            _ => Err(YeetupError::Config(format!(
                "Unknown provider: {provider}. Supported: {}",
                SUPPORTED_PROVIDERS.join(", ")
            ))),
        }
    }


    pub fn from_config(config: &YeetupConfig) -> Result<Box<dyn LlmProvider>> {
        Self::create(
            &config.llm_provider,
            &config.llm_model,
            config.llm_api_key.as_deref(),
            config.llm_base_url.as_deref(),
            config.llm_timeout_secs,
        )
    }
}


pub struct TranscriberFactory;

impl TranscriberFactory {

    /// Only Groq hosts a transcription model; other providers yield `None`.
    pub fn from_config(config: &YeetupConfig) -> Result<Option<Box<dyn Transcriber>>> {
        if config.llm_provider != "groq" {
            info!("Transcription disabled for provider {}", config.llm_provider);
            return Ok(None);
        }

        let api_key = require_api_key(&config.llm_provider, config.llm_api_key.as_deref())?;
        let mut transcriber = GroqTranscriber::new(api_key, config.transcription_model.clone())
            .with_client(http_client(config.llm_timeout_secs)?);
        if let Some(url) = &config.llm_base_url {
            transcriber = transcriber.with_base_url(url.clone());
        }
        Ok(Some(Box::new(transcriber)))
    }
}


fn require_api_key<'a>(provider: &str, api_key: Option<&'a str>) -> Result<&'a str> {
    api_key.filter(|k| !k.is_empty()).ok_or_else(|| {
        YeetupError::Config(format!(
            "{provider} requires an API key (set YEETUP_LLM_API_KEY or GROQ)"
        ))
    })
}


fn http_client(timeout_secs: Option<u64>) -> Result<Client> {
    let mut builder = Client::builder();
    if let Some(secs) = timeout_secs {
        builder = builder.timeout(Duration::from_secs(secs));
    }
    builder
        .build()
        .map_err(|e| YeetupError::Config(format!("Failed to create HTTP client: {e}")))
}
