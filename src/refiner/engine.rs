

use std::sync::Arc;
use tracing::{debug, info};

use super::models::RefinedQuery;
use super::prompt::{refine_params, REFINE_SYSTEM_PROMPT};
use crate::llm::providers::base::{ChatMessage, LlmProvider, LlmProviderError};


pub struct QueryRefiner {
    llm: Arc<dyn LlmProvider>,
}

impl QueryRefiner {

    pub fn new(llm: Arc<dyn LlmProvider>) -> Self {
        info!("QueryRefiner initialized: provider={}", llm.provider_name());
        Self { llm }
    }

    /// Extracts categories and audiences from `question`.
    ///
    /// Malformed model output yields an empty query; transport failures are
    /// returned as errors.
    pub async fn refine(&self, question: &str) -> Result<RefinedQuery, LlmProviderError> {
        let question = question.to_lowercase();
        debug!("Refining question: '{}'", crate::log_preview(&question, 50));

        let messages = [
            ChatMessage::system(REFINE_SYSTEM_PROMPT),
            ChatMessage::user(question),
        ];

        let (response, _metadata) = self.llm.complete(&messages, &refine_params()).await?;
        let refined = RefinedQuery::parse_or_empty(&response);

        info!(
            "Question refined: categories={:?}, target_audience={:?}, specific_audience={:?}",
            refined.categories, refined.target_audience, refined.specific_audience
        );

        Ok(refined)
    }
}
