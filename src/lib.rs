

pub mod assistant;
pub mod catalog;
pub mod core;
pub mod llm;
pub mod mcp;
pub mod ranking;
pub mod refiner;
pub mod responder;
pub mod session;
pub mod utils;

#[cfg(test)]
pub(crate) mod testing;

pub use utils::{log_preview, safe_truncate, safe_truncate_ellipsis};


pub use assistant::{AssistantReply, EventAssistant, EventSearch};
pub use catalog::{Event, EventCatalog};
pub use core::config::YeetupConfig;
pub use core::error::{Result, YeetupError};
pub use ranking::{filter_and_rank, rank_events, ScoredEvent};
pub use refiner::{QueryRefiner, RefinedQuery};
pub use responder::{Responder, NO_EVENTS_RESPONSE};
pub use session::{InMemorySessionStore, SessionId, SessionStore};


pub const DEFAULT_GROQ_URL: &str = "https://api.groq.com/openai/v1";


pub const DEFAULT_OLLAMA_URL: &str = "http://localhost:11434";


pub const DEFAULT_LLM_MODEL: &str = "llama-3.1-70b-versatile";


pub const DEFAULT_TRANSCRIPTION_MODEL: &str = "whisper-large-v3";


pub const DEFAULT_CATALOG_PATH: &str = "data/events.json";
