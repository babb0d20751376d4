

use thiserror::Error;

use crate::llm::providers::base::LlmProviderError;


#[derive(Error, Debug)]
pub enum YeetupError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Catalog error: {0}")]
    Catalog(String),

    #[error("LLM provider error: {0}")]
    Llm(#[from] LlmProviderError),

    #[error("Transcription error: {0}")]
    Transcription(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Config loading error: {0}")]
    ConfigLoad(#[from] config::ConfigError),
}


pub type Result<T> = std::result::Result<T, YeetupError>;
