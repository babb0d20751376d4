

mod models;

pub use models::{Event, TargetAudience};

use std::path::Path;
use std::sync::Arc;

use tracing::info;

use crate::core::error::{Result, YeetupError};


/// Immutable snapshot of the event catalog, shared by reference count.
#[derive(Debug, Clone)]
pub struct EventCatalog {
    events: Arc<[Event]>,
}

impl EventCatalog {

    pub fn from_events(events: Vec<Event>) -> Self {
        Self {
            events: events.into(),
        }
    }


    pub fn from_json(json: &str) -> Result<Self> {
        let events: Vec<Event> = serde_json::from_str(json)
            .map_err(|e| YeetupError::Catalog(format!("invalid catalog JSON: {e}")))?;
        Ok(Self::from_events(events))
    }

    /// Reads a JSON array of events from `path`.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|e| {
            YeetupError::Catalog(format!("cannot read catalog {}: {e}", path.display()))
        })?;
        let catalog = Self::from_json(&raw)?;
        info!("Event catalog loaded: {} events from {}", catalog.len(), path.display());
        Ok(catalog)
    }

    pub fn events(&self) -> &[Event] {
        &self.events
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn names(&self) -> Vec<&str> {
        self.events.iter().map(|e| e.name.as_str()).collect()
    }
}
