

pub mod base;
pub mod groq;
pub mod ollama;

pub use base::{ChatMessage, ChatRole, GenerationParams, LlmMetadata, LlmProvider, LlmProviderError};
pub use groq::GroqProvider;
pub use ollama::OllamaProvider;
