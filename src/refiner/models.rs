

use serde::{Deserialize, Serialize};
use tracing::warn;


/// Search keywords inferred from a student's question.
///
/// All three keys are required on the wire; a reply missing any of them is
/// treated as malformed.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct RefinedQuery {
    pub categories: Vec<String>,
    pub target_audience: Vec<String>,
    pub specific_audience: Vec<String>,
}

impl RefinedQuery {

    pub fn new<C, T, S>(categories: C, target_audience: T, specific_audience: S) -> Self
    where
        C: IntoIterator,
        C::Item: Into<String>,
        T: IntoIterator,
        T::Item: Into<String>,
        S: IntoIterator,
        S::Item: Into<String>,
    {
        Self {
            categories: categories.into_iter().map(Into::into).collect(),
            target_audience: target_audience.into_iter().map(Into::into).collect(),
            specific_audience: specific_audience.into_iter().map(Into::into).collect(),
        }
    }


    pub fn empty() -> Self {
        Self::default()
    }


    pub fn is_empty(&self) -> bool {
        self.categories.is_empty() && self.target_audience.is_empty() && self.specific_audience.is_empty()
    }


    pub fn parse(raw: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(raw)
    }

    /// Parses a model reply, falling back to `RefinedQuery::empty()` on any
    /// shape violation so downstream stages always get a well-formed query.
    pub fn parse_or_empty(raw: &str) -> Self {
        match Self::parse(raw) {
            Ok(query) => query,
            Err(e) => {
                warn!("Failed to parse refined query: {}", e);
                warn!("Response was: {}", crate::log_preview(raw, 200));
                Self::empty()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_valid_reply() {
        let raw = r#"{
            "categories": ["hackathon", "technology", "coding"],
            "target_audience": ["highschool"],
            "specific_audience": ["any"]
        }"#;

        let query = RefinedQuery::parse(raw).unwrap();
        assert_eq!(query.categories, vec!["hackathon", "technology", "coding"]);
        assert_eq!(query.target_audience, vec!["highschool"]);
        assert_eq!(query.specific_audience, vec!["any"]);
    }

    #[test]
    fn test_extra_keys_are_ignored() {
        let raw = r#"{"categories": ["music"], "target_audience": ["university"], "specific_audience": ["any"], "reasoning": "x"}"#;
        assert_eq!(
            RefinedQuery::parse(raw).unwrap(),
            RefinedQuery::new(["music"], ["university"], ["any"])
        );
    }

    #[test]
    fn test_non_json_falls_back_to_empty() {
        let query = RefinedQuery::parse_or_empty("Sure! Here are some keywords: hackathon");
        assert_eq!(
            query,
            RefinedQuery {
                categories: vec![],
                target_audience: vec![],
                specific_audience: vec![],
            }
        );
        assert!(query.is_empty());
    }

    #[test]
    fn test_missing_key_falls_back_to_empty() {
        let query = RefinedQuery::parse_or_empty(r#"{"categories": ["music"], "target_audience": ["university"]}"#);
        assert!(query.is_empty());
    }

    #[test]
    fn test_wrong_value_type_falls_back_to_empty() {
        let query = RefinedQuery::parse_or_empty(
            r#"{"categories": "music", "target_audience": ["university"], "specific_audience": ["any"]}"#,
        );
        assert!(query.is_empty());
    }
}
