

use std::path::Path;

use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use url::Url;

use super::error::{Result, YeetupError};
use crate::{DEFAULT_CATALOG_PATH, DEFAULT_LLM_MODEL, DEFAULT_TRANSCRIPTION_MODEL};


pub const ENV_PREFIX: &str = "YEETUP";


pub const LEGACY_API_KEY_VAR: &str = "GROQ";


pub const SUPPORTED_PROVIDERS: &[&str] = &["groq", "ollama"];


#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct YeetupConfig {

    pub llm_provider: String,
    pub llm_model: String,
    pub llm_api_key: Option<String>,
    pub llm_base_url: Option<String>,
    /// Request timeout for model calls. `None` waits indefinitely.
    pub llm_timeout_secs: Option<u64>,


    pub transcription_model: String,


    pub catalog_path: String,
}

impl YeetupConfig {

    pub fn new(llm_provider: &str, llm_model: &str) -> Self {
        Self {
            llm_provider: llm_provider.to_string(),
            llm_model: llm_model.to_string(),
            llm_api_key: None,
            llm_base_url: None,
            llm_timeout_secs: None,

            transcription_model: DEFAULT_TRANSCRIPTION_MODEL.to_string(),

            catalog_path: DEFAULT_CATALOG_PATH.to_string(),
        }
    }

    /// Layers defaults, an optional config file and `YEETUP_*` environment variables.
    ///
    /// When no API key is configured, the `GROQ` variable is used instead.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut builder = Config::builder();
        if let Some(path) = path {
            builder = builder.add_source(File::from(path).required(true));
        }
        builder = builder.add_source(Environment::with_prefix(ENV_PREFIX));

        let mut config: Self = builder.build()?.try_deserialize()?;

        if config.llm_api_key.is_none() {
            config.llm_api_key = std::env::var(LEGACY_API_KEY_VAR).ok();
        }

        config.validate()?;
        Ok(config)
    }


    pub fn validate(&self) -> Result<()> {
        if !SUPPORTED_PROVIDERS.contains(&self.llm_provider.as_str()) {
            return Err(YeetupError::Config(format!(
                "unknown llm_provider '{}', supported: {}",
                self.llm_provider,
                SUPPORTED_PROVIDERS.join(", ")
            )));
        }

        if let Some(base_url) = &self.llm_base_url {
            Url::parse(base_url).map_err(|e| {
                YeetupError::Config(format!("invalid llm_base_url '{base_url}': {e}"))
            })?;
        }

        if self.catalog_path.trim().is_empty() {
            return Err(YeetupError::Config("catalog_path must not be empty".to_string()));
        }

        Ok(())
    }
}

impl Default for YeetupConfig {
    fn default() -> Self {
        Self::new("groq", DEFAULT_LLM_MODEL)
    }
}
