// Service exports
pub mod memory;
pub mod postgres;

use async_trait::async_trait;
use std::collections::HashMap;
use thiserror::Error;

use crate::models::{
    CandidateId, CandidateSnapshot, JobApplication, JobId, JobPosting, JobRequiredSkill,
    JobSnapshot,
};

pub use memory::MemoryStore;
pub use postgres::PgTalentStore;

/// Errors that can occur in the data-access layer
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// Data-access collaborator the scorer consumes.
///
/// The platform owns the records; this trait is the read-only slice of
/// them that scoring needs. Absent records come back as `None` or drop
/// out of bulk maps — resolving them is the caller's decision.
#[async_trait]
pub trait TalentStore: Send + Sync {
    /// Fetch a candidate's profile together with their skill set
    async fn candidate_snapshot(
        &self,
        candidate_id: CandidateId,
    ) -> Result<Option<CandidateSnapshot>, StoreError>;

    /// Fetch a posting together with its required-skill set
    async fn job_snapshot(&self, job_id: JobId) -> Result<Option<JobSnapshot>, StoreError>;

    /// All currently active postings
    async fn active_jobs(&self) -> Result<Vec<JobPosting>, StoreError>;

    /// Ids of the jobs a candidate has already applied to
    async fn applied_job_ids(&self, candidate_id: CandidateId) -> Result<Vec<JobId>, StoreError>;

    /// Required-skill sets for many postings in one round trip
    async fn job_required_skills_bulk(
        &self,
        job_ids: &[JobId],
    ) -> Result<HashMap<JobId, Vec<JobRequiredSkill>>, StoreError>;

    /// All applications submitted for a posting
    async fn applications_for_job(&self, job_id: JobId)
        -> Result<Vec<JobApplication>, StoreError>;

    /// Candidate snapshots for many candidates in one round trip
    async fn candidate_snapshots_bulk(
        &self,
        candidate_ids: &[CandidateId],
    ) -> Result<HashMap<CandidateId, CandidateSnapshot>, StoreError>;
}
