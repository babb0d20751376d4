

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};


#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct TargetAudience {
    /// Audience class, e.g. "highschool" or "university".
    #[serde(default)]
    pub level: String,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl TargetAudience {
    pub fn new(level: impl Into<String>) -> Self {
        Self {
            level: level.into(),
            extra: Map::new(),
        }
    }
}


/// A catalog entry. Fields the ranker does not read (dates, venues, links)
/// are kept in `extra` and passed through to the answer prompt.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Event {
    #[serde(default)]
    pub name: String,

    #[serde(default)]
    pub description: String,

    #[serde(default)]
    pub category: Vec<String>,

    #[serde(default)]
    pub tags: Vec<String>,

    #[serde(default, rename = "targetAudience")]
    pub target_audience: Vec<TargetAudience>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Event {

    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            ..Default::default()
        }
    }


    pub fn with_categories<I, S>(mut self, categories: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.category = categories.into_iter().map(Into::into).collect();
        self
    }


    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags = tags.into_iter().map(Into::into).collect();
        self
    }


    pub fn with_audience<I, S>(mut self, levels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.target_audience = levels.into_iter().map(TargetAudience::new).collect();
        self
    }


    pub fn audience_levels(&self) -> impl Iterator<Item = &str> {
        self.target_audience.iter().map(|a| a.level.as_str())
    }
}
