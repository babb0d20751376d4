//! Request pipeline: refine the question, rank the catalog, answer, record the turn.

use std::path::Path;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::catalog::{Event, EventCatalog};
use crate::core::config::YeetupConfig;
use crate::core::error::{Result, YeetupError};
use crate::llm::factory::{LlmProviderFactory, TranscriberFactory};
use crate::llm::providers::base::{ChatMessage, LlmProvider};
use crate::llm::transcription::Transcriber;
use crate::ranking::rank_events;
use crate::refiner::{QueryRefiner, RefinedQuery};
use crate::responder::Responder;
use crate::session::{InMemorySessionStore, SessionId, SessionStore};


const DEFAULT_AUDIO_FILE_NAME: &str = "audio.wav";


/// The `{response, session_id}` envelope returned for each question.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssistantReply {
    pub response: String,
    pub session_id: SessionId,
}


#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankedEvent {
    pub event: Event,
    pub score: u32,
}


#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EventSearch {
    pub refined: RefinedQuery,
    pub events: Vec<RankedEvent>,
}


pub struct EventAssistant {
    catalog: EventCatalog,
    refiner: QueryRefiner,
    responder: Responder,
    sessions: Arc<dyn SessionStore>,
    transcriber: Option<Arc<dyn Transcriber>>,
}

impl EventAssistant {

    pub fn new(
        catalog: EventCatalog,
        llm: Arc<dyn LlmProvider>,
        sessions: Arc<dyn SessionStore>,
    ) -> Self {
        info!(
            "EventAssistant initialized: {} events, provider={}/{}",
            catalog.len(),
            llm.provider_name(),
            llm.model_name()
        );
        Self {
            catalog,
            refiner: QueryRefiner::new(Arc::clone(&llm)),
            responder: Responder::new(llm),
            sessions,
            transcriber: None,
        }
    }


    pub fn with_transcriber(mut self, transcriber: Arc<dyn Transcriber>) -> Self {
        self.transcriber = Some(transcriber);
        self
    }

    /// Loads the catalog and builds providers described by `config`, with an
    /// in-memory session store.
    pub fn from_config(config: &YeetupConfig) -> Result<Self> {
        let catalog = EventCatalog::load(&config.catalog_path)?;
        let llm: Arc<dyn LlmProvider> = Arc::from(LlmProviderFactory::from_config(config)?);
        let sessions: Arc<dyn SessionStore> = Arc::new(InMemorySessionStore::new());

        let mut assistant = Self::new(catalog, llm, sessions);
        if let Some(transcriber) = TranscriberFactory::from_config(config)? {
            assistant = assistant.with_transcriber(Arc::from(transcriber));
        }
        Ok(assistant)
    }

    pub fn catalog(&self) -> &EventCatalog {
        &self.catalog
    }

    pub fn sessions(&self) -> &Arc<dyn SessionStore> {
        &self.sessions
    }

    /// Answers `question` within a conversation.
    ///
    /// A missing or blank `session_id` starts a new conversation. The user and
    /// assistant turns are recorded together once the answer is ready.
    pub async fn ask(&self, question: &str, session_id: Option<&str>) -> Result<AssistantReply> {
        let session_id = session_id
            .map(str::trim)
            .filter(|id| !id.is_empty())
            .map(SessionId::from)
            .unwrap_or_default();

        info!(
            "Question for session {}: '{}'",
            crate::safe_truncate(session_id.as_str(), 8),
            crate::log_preview(question, 50)
        );

        let history = self.sessions.get(&session_id);
        let refined = self.refiner.refine(question).await?;
        let ranked = rank_events(self.catalog.events(), &refined);
        debug!("{} events matched", ranked.len());

        let events: Vec<&Event> = ranked.iter().map(|scored| scored.event).collect();
        let response = self
            .responder
            .respond(question, &refined, &events, &history)
            .await?;

        self.sessions.extend(
            &session_id,
            vec![
                ChatMessage::user(question),
                ChatMessage::assistant(response.clone()),
            ],
        );

        Ok(AssistantReply {
            response,
            session_id,
        })
    }

    /// Refines and ranks without generating an answer or touching any session.
    pub async fn find_events(&self, question: &str) -> Result<EventSearch> {
        let refined = self.refiner.refine(question).await?;
        let events = rank_events(self.catalog.events(), &refined)
            .into_iter()
            .map(|scored| RankedEvent {
                event: scored.event.clone(),
                score: scored.score,
            })
            .collect();

        Ok(EventSearch { refined, events })
    }


    pub async fn transcribe(&self, audio: Vec<u8>, file_name: &str) -> Result<String> {
        let transcriber = self.transcriber.as_ref().ok_or_else(|| {
            YeetupError::Transcription("no transcription provider configured".to_string())
        })?;

        let text = transcriber.transcribe(audio, file_name).await?;
        info!("Transcribed audio: '{}'", crate::log_preview(&text, 50));
        Ok(text)
    }

    /// Reads a local audio file and transcribes it under its own file name.
    pub async fn transcribe_file(&self, path: &Path) -> Result<String> {
        let audio = tokio::fs::read(path).await?;
        debug!("Read {} bytes of audio from {}", audio.len(), path.display());

        let file_name = path
            .file_name()
            .and_then(|name| name.to_str())
            .unwrap_or(DEFAULT_AUDIO_FILE_NAME);
        self.transcribe(audio, file_name).await
    }


    pub fn history(&self, session_id: &str) -> Vec<ChatMessage> {
        self.sessions.get(&SessionId::from(session_id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::responder::NO_EVENTS_RESPONSE;
    use crate::testing::{sample_events, FixedTranscriber, ScriptedProvider};

    const HACKATHON_QUERY: &str =
        r#"{"categories": ["hackathon"], "target_audience": ["university"], "specific_audience": ["any"]}"#;

    fn assistant(llm: Arc<ScriptedProvider>) -> EventAssistant {
        EventAssistant::new(
            EventCatalog::from_events(sample_events()),
            llm,
            Arc::new(InMemorySessionStore::new()),
        )
    }

    #[tokio::test]
    async fn test_ask_runs_full_pipeline_and_records_turn() {
        let llm = Arc::new(ScriptedProvider::new([
            HACKATHON_QUERY,
            "yes",
            "The Tech Hackathon is perfect for you!",
        ]));
        let assistant = assistant(llm.clone());

        let reply = assistant.ask("Any hackathons?", None).await.unwrap();

        assert_eq!(reply.response, "The Tech Hackathon is perfect for you!");
        assert_eq!(llm.call_count(), 3);
        assert_eq!(
            assistant.history(reply.session_id.as_str()),
            vec![
                ChatMessage::user("Any hackathons?"),
                ChatMessage::assistant("The Tech Hackathon is perfect for you!"),
            ]
        );

        let answer_call = &llm.calls()[2];
        let context = &answer_call.messages.last().unwrap().content;
        assert!(context.starts_with("Question:\nAny hackathons?"));
        assert!(context.contains("Tech Hackathon"));
        assert!(context.contains("Coding Club Meetup"));
        assert!(!context.contains("Battle of the Bands"));
    }

    #[tokio::test]
    async fn test_follow_up_sees_previous_turns() {
        let llm = Arc::new(ScriptedProvider::new([
            HACKATHON_QUERY,
            "yes",
            "Try the Tech Hackathon.",
            HACKATHON_QUERY,
            "yes",
            "It runs all weekend.",
        ]));
        let assistant = assistant(llm.clone());

        let first = assistant.ask("Any hackathons?", None).await.unwrap();
        let second = assistant
            .ask("How long is it?", Some(first.session_id.as_str()))
            .await
            .unwrap();

        assert_eq!(second.session_id, first.session_id);

        let follow_up_gate = &llm.calls()[4];
        assert_eq!(follow_up_gate.messages[1], ChatMessage::user("Any hackathons?"));
        assert_eq!(follow_up_gate.messages[2], ChatMessage::assistant("Try the Tech Hackathon."));
        assert_eq!(assistant.history(first.session_id.as_str()).len(), 4);
    }

    #[tokio::test]
    async fn test_unmatched_question_returns_apology_after_one_call() {
        let llm = Arc::new(ScriptedProvider::new(["not json at all"]));
        let assistant = assistant(llm.clone());

        let reply = assistant.ask("what's 2+2?", Some("session-1")).await.unwrap();

        assert_eq!(reply.response, NO_EVENTS_RESPONSE);
        assert_eq!(reply.session_id, SessionId::from("session-1"));
        assert_eq!(llm.call_count(), 1);
        assert_eq!(
            assistant.history("session-1"),
            vec![
                ChatMessage::user("what's 2+2?"),
                ChatMessage::assistant(NO_EVENTS_RESPONSE),
            ]
        );
    }

    #[tokio::test]
    async fn test_blank_session_id_starts_new_session() {
        let llm = Arc::new(ScriptedProvider::new(["{}"]));
        let assistant = assistant(llm);

        let reply = assistant.ask("hello", Some("  ")).await.unwrap();
        assert!(!reply.session_id.as_str().trim().is_empty());
        assert_eq!(assistant.sessions().len(), 1);
    }

    #[tokio::test]
    async fn test_failed_call_records_nothing() {
        let llm = Arc::new(ScriptedProvider::failing("timeout"));
        let assistant = assistant(llm);

        let result = assistant.ask("Any hackathons?", Some("s")).await;
        assert!(matches!(result, Err(YeetupError::Llm(_))));
        assert!(assistant.history("s").is_empty());
    }

    #[tokio::test]
    async fn test_find_events_returns_scores() {
        let llm = Arc::new(ScriptedProvider::new([HACKATHON_QUERY]));
        let assistant = assistant(llm);

        let search = assistant.find_events("hackathons").await.unwrap();

        assert_eq!(search.refined.categories, vec!["hackathon"]);
        let scored: Vec<(&str, u32)> = search
            .events
            .iter()
            .map(|r| (r.event.name.as_str(), r.score))
            .collect();
        assert_eq!(scored, vec![("Tech Hackathon", 3), ("Coding Club Meetup", 1)]);
        assert!(assistant.sessions().is_empty());
    }

    #[tokio::test]
    async fn test_transcribe_requires_provider() {
        let assistant = assistant(Arc::new(ScriptedProvider::new(Vec::<String>::new())));
        let result = assistant.transcribe(vec![1, 2, 3], "audio.wav").await;
        assert!(matches!(result, Err(YeetupError::Transcription(_))));

        let assistant = assistant
            .with_transcriber(Arc::new(FixedTranscriber("any gaming events".to_string())));
        let text = assistant.transcribe(vec![1, 2, 3], "audio.wav").await.unwrap();
        assert_eq!(text, "any gaming events");
    }

    #[tokio::test]
    async fn test_transcribe_file_reads_audio() {
        let assistant = assistant(Arc::new(ScriptedProvider::new(Vec::<String>::new())))
            .with_transcriber(Arc::new(FixedTranscriber("music festivals".to_string())));

        let file = tempfile::Builder::new().suffix(".m4a").tempfile().unwrap();
        std::fs::write(file.path(), b"fake audio").unwrap();

        let text = assistant.transcribe_file(file.path()).await.unwrap();
        assert_eq!(text, "music festivals");
    }

    #[tokio::test]
    async fn test_transcribe_missing_file_is_io_error() {
        let assistant = assistant(Arc::new(ScriptedProvider::new(Vec::<String>::new())))
            .with_transcriber(Arc::new(FixedTranscriber("unused".to_string())));

        let result = assistant
            .transcribe_file(Path::new("/nonexistent/question.wav"))
            .await;
        assert!(matches!(result, Err(YeetupError::Io(_))));
    }
}
