use async_trait::async_trait;
use std::collections::HashMap;

use crate::models::{
    CandidateId, CandidateProfile, CandidateSkill, CandidateSnapshot, JobApplication, JobId,
    JobPosting, JobRequiredSkill, JobSnapshot,
};
use crate::services::{StoreError, TalentStore};

/// In-memory talent store
///
/// Backs tests and lets the service layer be exercised without a
/// database. Populate it up front, then hand it to the scorer.
#[derive(Debug, Default)]
pub struct MemoryStore {
    candidates: HashMap<CandidateId, CandidateSnapshot>,
    jobs: HashMap<JobId, JobSnapshot>,
    applications: Vec<JobApplication>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert_candidate(&mut self, profile: CandidateProfile, skills: Vec<CandidateSkill>) {
        self.candidates
            .insert(profile.id, CandidateSnapshot { profile, skills });
    }

    pub fn insert_job(&mut self, posting: JobPosting, required_skills: Vec<JobRequiredSkill>) {
        self.jobs.insert(
            posting.id,
            JobSnapshot {
                posting,
                required_skills,
            },
        );
    }

    pub fn insert_application(&mut self, application: JobApplication) {
        self.applications.push(application);
    }
}

#[async_trait]
impl TalentStore for MemoryStore {
    async fn candidate_snapshot(
        &self,
        candidate_id: CandidateId,
    ) -> Result<Option<CandidateSnapshot>, StoreError> {
        Ok(self.candidates.get(&candidate_id).cloned())
    }

    async fn job_snapshot(&self, job_id: JobId) -> Result<Option<JobSnapshot>, StoreError> {
        Ok(self.jobs.get(&job_id).cloned())
    }

    async fn active_jobs(&self) -> Result<Vec<JobPosting>, StoreError> {
        Ok(self
            .jobs
            .values()
            .filter(|job| job.posting.is_active)
            .map(|job| job.posting.clone())
            .collect())
    }

    async fn applied_job_ids(&self, candidate_id: CandidateId) -> Result<Vec<JobId>, StoreError> {
        Ok(self
            .applications
            .iter()
            .filter(|application| application.candidate_id == candidate_id)
            .map(|application| application.job_id)
            .collect())
    }

    async fn job_required_skills_bulk(
        &self,
        job_ids: &[JobId],
    ) -> Result<HashMap<JobId, Vec<JobRequiredSkill>>, StoreError> {
        Ok(job_ids
            .iter()
            .filter_map(|id| {
                self.jobs
                    .get(id)
                    .map(|job| (*id, job.required_skills.clone()))
            })
            .collect())
    }

    async fn applications_for_job(
        &self,
        job_id: JobId,
    ) -> Result<Vec<JobApplication>, StoreError> {
        Ok(self
            .applications
            .iter()
            .filter(|application| application.job_id == job_id)
            .cloned()
            .collect())
    }

    async fn candidate_snapshots_bulk(
        &self,
        candidate_ids: &[CandidateId],
    ) -> Result<HashMap<CandidateId, CandidateSnapshot>, StoreError> {
        Ok(candidate_ids
            .iter()
            .filter_map(|id| self.candidates.get(id).map(|snapshot| (*id, snapshot.clone())))
            .collect())
    }
}
