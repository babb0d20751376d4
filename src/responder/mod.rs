

mod engine;
mod prompt;

pub use engine::Responder;
pub use prompt::{
    answer_params, build_context_message, gate_params, ANSWER_SYSTEM_PROMPT, GATE_SYSTEM_PROMPT,
    NO_EVENTS_RESPONSE,
};
