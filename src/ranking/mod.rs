

mod ranker;

pub use ranker::{
    filter_and_rank, matches_audience, rank_events, score_event, ScoredEvent, ANY_AUDIENCE,
    EXACT_MATCH_POINTS, TEXT_MATCH_POINTS,
};
