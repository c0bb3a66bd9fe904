// Core algorithm exports
pub mod filters;
pub mod ranker;
pub mod scoring;

pub use filters::{is_recommendable, match_required_skills};
pub use ranker::{RankResult, Ranker};
pub use scoring::{calculate_match_score, DEFAULT_SCORE, MAX_SCORE};
