

use serde::Serialize;

use crate::catalog::Event;
use crate::refiner::RefinedQuery;


pub const EXACT_MATCH_POINTS: u32 = 2;


pub const TEXT_MATCH_POINTS: u32 = 1;


pub const ANY_AUDIENCE: &str = "any";


#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ScoredEvent<'a> {
    pub event: &'a Event,
    pub score: u32,
}


/// Sums the per-category points for `event`.
///
/// A category equal to a `category` or `tags` entry earns 2; a category found
/// in the lower-cased name or description earns 1. Both can apply.
pub fn score_event(event: &Event, categories: &[String]) -> u32 {
    let name = event.name.to_lowercase();
    let description = event.description.to_lowercase();

    categories
        .iter()
        .map(|category| {
            let mut points = 0;
            if event.category.contains(category) || event.tags.contains(category) {
                points += EXACT_MATCH_POINTS;
            }
            if name.contains(category.as_str()) || description.contains(category.as_str()) {
                points += TEXT_MATCH_POINTS;
            }
            points
        })
        .sum()
}


pub fn matches_audience(event: &Event, target_audience: &[String]) -> bool {
    if target_audience.iter().any(|a| a == ANY_AUDIENCE) {
        return true;
    }

    event
        .audience_levels()
        .any(|level| target_audience.iter().any(|a| a == level))
}


/// Scores every event, drops zero scores and audience mismatches, and orders
/// the rest by descending score. Equal scores keep catalog order.
pub fn rank_events<'a>(events: &'a [Event], query: &RefinedQuery) -> Vec<ScoredEvent<'a>> {
    let mut ranked: Vec<ScoredEvent<'a>> = events
        .iter()
        .filter_map(|event| {
            let score = score_event(event, &query.categories);
            (score > 0 && matches_audience(event, &query.target_audience))
                .then_some(ScoredEvent { event, score })
        })
        .collect();

    // Vec::sort_by is stable.
    ranked.sort_by(|a, b| b.score.cmp(&a.score));
    ranked
}


pub fn filter_and_rank<'a>(events: &'a [Event], query: &RefinedQuery) -> Vec<&'a Event> {
    rank_events(events, query)
        .into_iter()
        .map(|scored| scored.event)
        .collect()
}
