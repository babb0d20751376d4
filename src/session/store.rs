

use std::collections::HashMap;
use std::fmt;

use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use tracing::debug;
use uuid::Uuid;

use crate::llm::providers::base::ChatMessage;


/// Opaque conversation key. New ids are random UUIDs.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionId(String);

impl SessionId {
    pub fn new() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for SessionId {
    fn default() -> Self {
        Self::new()
    }
}

impl From<String> for SessionId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl From<&str> for SessionId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}


/// Conversation history keyed by session.
pub trait SessionStore: Send + Sync {

    /// History of `id` in append order; empty for unknown sessions.
    fn get(&self, id: &SessionId) -> Vec<ChatMessage>;


    fn append(&self, id: &SessionId, message: ChatMessage);

    /// Appends `messages` as one unit so concurrent writers cannot interleave them.
    fn extend(&self, id: &SessionId, messages: Vec<ChatMessage>);


    fn len(&self) -> usize;


    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}


/// Process-lifetime store. Histories are never evicted.
#[derive(Default)]
pub struct InMemorySessionStore {
    sessions: RwLock<HashMap<SessionId, Vec<ChatMessage>>>,
}

impl InMemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SessionStore for InMemorySessionStore {
    fn get(&self, id: &SessionId) -> Vec<ChatMessage> {
        self.sessions.read().get(id).cloned().unwrap_or_default()
    }

    fn append(&self, id: &SessionId, message: ChatMessage) {
        self.extend(id, vec![message]);
    }

    fn extend(&self, id: &SessionId, messages: Vec<ChatMessage>) {
        let mut sessions = self.sessions.write();
        let history = sessions.entry(id.clone()).or_default();
        history.extend(messages);
        debug!("Session {} now holds {} messages", crate::safe_truncate(id.as_str(), 8), history.len());
    }

    fn len(&self) -> usize {
        self.sessions.read().len()
    }
}
