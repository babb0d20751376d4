//! Test doubles for the model boundary.

use std::collections::VecDeque;

use async_trait::async_trait;
use parking_lot::Mutex;

use crate::catalog::Event;
use crate::llm::providers::base::{
    ChatMessage, GenerationParams, LlmMetadata, LlmProvider, LlmProviderError,
};
use crate::llm::transcription::Transcriber;


/// One recorded `complete` call.
#[derive(Debug, Clone)]
pub struct RecordedCall {
    pub messages: Vec<ChatMessage>,
    pub params: GenerationParams,
}


/// Returns scripted replies in order and records every call.
///
/// A reply of `Err(msg)` is surfaced as `LlmProviderError::Provider(msg)`.
/// Running out of replies is also a provider error.
pub struct ScriptedProvider {
    replies: Mutex<VecDeque<Result<String, String>>>,
    calls: Mutex<Vec<RecordedCall>>,
}

impl ScriptedProvider {
    pub fn new<I, S>(replies: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            replies: Mutex::new(replies.into_iter().map(|r| Ok(r.into())).collect()),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn failing(message: impl Into<String>) -> Self {
        Self {
            replies: Mutex::new(VecDeque::from([Err(message.into())])),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().len()
    }
}

#[async_trait]
impl LlmProvider for ScriptedProvider {
    async fn complete(
        &self,
        messages: &[ChatMessage],
        params: &GenerationParams,
    ) -> Result<(String, LlmMetadata), LlmProviderError> {
        self.calls.lock().push(RecordedCall {
            messages: messages.to_vec(),
            params: params.clone(),
        });

        let reply = self
            .replies
            .lock()
            .pop_front()
            .unwrap_or_else(|| Err("no scripted reply left".to_string()));

        reply
            .map(|content| {
                (
                    content,
                    LlmMetadata {
                        provider: "scripted".to_string(),
                        model: "scripted".to_string(),
                        ..Default::default()
                    },
                )
            })
            .map_err(LlmProviderError::Provider)
    }

    fn provider_name(&self) -> &str {
        "scripted"
    }

    fn model_name(&self) -> &str {
        "scripted"
    }
}


pub struct FixedTranscriber(pub String);

#[async_trait]
impl Transcriber for FixedTranscriber {
    async fn transcribe(&self, _audio: Vec<u8>, _file_name: &str) -> Result<String, LlmProviderError> {
        Ok(self.0.clone())
    }

    fn model_name(&self) -> &str {
        "fixed"
    }
}


pub fn sample_events() -> Vec<Event> {
    vec![
        Event::new("Tech Hackathon", "A weekend of building apps with friends")
            .with_categories(["hackathon"])
            .with_tags(["coding", "technology"])
            .with_audience(["university"]),
        Event::new("Battle of the Bands", "Local high school bands compete for the crown")
            .with_categories(["music", "competition"])
            .with_tags(["social"])
            .with_audience(["highschool"]),
        Event::new("Coding Club Meetup", "Weekly hackathon prep and pair programming")
            .with_categories(["clubs"])
            .with_tags(["coding"])
            .with_audience(["highschool", "university"]),
        Event::new("Math Olympiad Study Group", "Practice problems for the olympiad")
            .with_categories(["study", "math"])
            .with_tags(["academics"])
            .with_audience(["highschool"]),
    ]
}
