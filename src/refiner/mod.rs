

mod engine;
mod models;
mod prompt;

pub use engine::QueryRefiner;
pub use models::RefinedQuery;
pub use prompt::{refine_params, REFINE_MAX_TOKENS, REFINE_SYSTEM_PROMPT};
