//! Talent Algo - candidate/job match scoring engine for the Talently hiring platform
//!
//! This library computes the compatibility score between candidates and job
//! postings and builds the ranked listings both sides of the marketplace see:
//! job recommendations for candidates and scored application lists for
//! employers. Persistence and HTTP belong to the host application; this crate
//! consumes records through the `TalentStore` collaborator trait.

pub mod config;
pub mod core;
pub mod models;
pub mod policy;
pub mod scorer;
pub mod services;

// Re-export commonly used types
pub use crate::core::{calculate_match_score, RankResult, Ranker, DEFAULT_SCORE, MAX_SCORE};
pub use crate::models::{
    CandidateProfile, CandidateSkill, CandidateSnapshot, Importance, JobApplication,
    JobPosting, JobRecommendation, JobRequiredSkill, JobSnapshot, Proficiency, RankingPolicy,
    ScoredApplication, ScoringWeights,
};
pub use crate::policy::{can, Action, Principal, Resource, Role};
pub use crate::scorer::{MatchScorer, ScorerError};
pub use crate::services::{MemoryStore, PgTalentStore, StoreError, TalentStore};
