

pub mod factory;
pub mod providers;
pub mod transcription;

pub use factory::{LlmProviderFactory, TranscriberFactory};
pub use providers::{ChatMessage, ChatRole, GenerationParams, LlmProvider, LlmProviderError};
pub use transcription::{GroqTranscriber, Transcriber};
