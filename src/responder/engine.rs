

use std::sync::Arc;
use tracing::{debug, info};

use super::prompt::{
    answer_params, build_context_message, gate_params, ANSWER_SYSTEM_PROMPT, GATE_SYSTEM_PROMPT,
    NO_EVENTS_RESPONSE,
};
use crate::catalog::Event;
use crate::llm::providers::base::{ChatMessage, LlmProvider, LlmProviderError};
use crate::refiner::RefinedQuery;


pub struct Responder {
    llm: Arc<dyn LlmProvider>,
}

impl Responder {

    pub fn new(llm: Arc<dyn LlmProvider>) -> Self {
        info!("Responder initialized: provider={}", llm.provider_name());
        Self { llm }
    }

    /// Answers `question` from the ranked `events`.
    ///
    /// `history` holds the earlier turns of the conversation, not the current
    /// question. With no events, or when the relevance gate says "no", the
    /// fixed apology is returned and the answer call is skipped.
    pub async fn respond(
        &self,
        question: &str,
        refined: &RefinedQuery,
        events: &[&Event],
        history: &[ChatMessage],
    ) -> Result<String, LlmProviderError> {
        if events.is_empty() {
            debug!("No events matched, skipping model calls");
            return Ok(NO_EVENTS_RESPONSE.to_string());
        }

        let context = build_context_message(question, refined, events)?;

        let gate_messages = build_messages(GATE_SYSTEM_PROMPT, history, &context);
        let (verdict, _metadata) = self.llm.complete(&gate_messages, &gate_params()).await?;

        if is_rejection(&verdict) {
            info!("Relevance gate rejected {} events", events.len());
            return Ok(NO_EVENTS_RESPONSE.to_string());
        }
        debug!("Relevance gate passed: '{}'", verdict.trim());

        let answer_messages = build_messages(ANSWER_SYSTEM_PROMPT, history, &context);
        let (answer, metadata) = self.llm.complete(&answer_messages, &answer_params()).await?;

        info!(
            "Answer generated: {} events, tokens={:?}",
            events.len(),
            metadata.tokens_total
        );

        Ok(answer)
    }
}


fn build_messages(system_prompt: &str, history: &[ChatMessage], context: &str) -> Vec<ChatMessage> {
    let mut messages = Vec::with_capacity(history.len() + 2);
    messages.push(ChatMessage::system(system_prompt));
    messages.extend_from_slice(history);
    messages.push(ChatMessage::user(context));
    messages
}


/// Only the exact reply "no" rejects; anything else proceeds to the answer call.
fn is_rejection(verdict: &str) -> bool {
    verdict == "no"
}
