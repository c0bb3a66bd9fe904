use thiserror::Error;

use crate::config::Settings;
use crate::core::{calculate_match_score, Ranker, DEFAULT_SCORE};
use crate::models::{
    CandidateId, JobId, JobRecommendation, JobSnapshot, RecommendationQuery, ScoredApplication,
};
use crate::policy::{can, Action, Principal, Resource};
use crate::services::{StoreError, TalentStore};

/// Errors surfaced by the listing operations.
///
/// `score` itself never returns one: a ranking signal must not be able
/// to take a listing page down, so it degrades to the default instead.
#[derive(Debug, Error)]
pub enum ScorerError {
    #[error("access denied")]
    Forbidden,

    #[error("job {0} not found")]
    JobNotFound(JobId),

    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Match scoring service
///
/// Owns the data-access collaborator and the ranking configuration, and
/// exposes the three operations the platform consumes: a single
/// candidate/job score, the candidate-side recommendation listing, and
/// the employer-side application ranking.
pub struct MatchScorer<S> {
    store: S,
    ranker: Ranker,
}

impl<S: TalentStore> MatchScorer<S> {
    pub fn new(store: S, ranker: Ranker) -> Self {
        Self { store, ranker }
    }

    pub fn from_settings(store: S, settings: &Settings) -> Self {
        Self::new(
            store,
            Ranker::new(settings.scoring_weights(), settings.ranking_policy()),
        )
    }

    pub fn ranker(&self) -> &Ranker {
        &self.ranker
    }

    /// Compatibility score between a candidate and a job, in [0, 100].
    ///
    /// Pure read: nothing is persisted and the result is recomputed on
    /// every call. A candidate or job that does not resolve, or a store
    /// failure, yields the default score rather than an error.
    pub async fn score(&self, candidate_id: CandidateId, job_id: JobId) -> f64 {
        let candidate = match self.store.candidate_snapshot(candidate_id).await {
            Ok(Some(candidate)) => candidate,
            Ok(None) => {
                tracing::debug!("Candidate {} not found, scoring default", candidate_id);
                return DEFAULT_SCORE;
            }
            Err(e) => {
                tracing::warn!("Failed to fetch candidate {}: {}", candidate_id, e);
                return DEFAULT_SCORE;
            }
        };

        let job = match self.store.job_snapshot(job_id).await {
            Ok(Some(job)) => job,
            Ok(None) => {
                tracing::debug!("Job {} not found, scoring default", job_id);
                return DEFAULT_SCORE;
            }
            Err(e) => {
                tracing::warn!("Failed to fetch job {}: {}", job_id, e);
                return DEFAULT_SCORE;
            }
        };

        let (score, _) = calculate_match_score(
            &job.required_skills,
            &candidate.skills,
            candidate.profile.experience_years,
            job.posting.experience_required,
            self.ranker.weights(),
        );

        score
    }

    /// Personalized job recommendations for a candidate.
    ///
    /// Open postings the candidate has not applied to, scored and ranked,
    /// thresholded and truncated per the ranking policy. Required-skill
    /// sets are fetched in one bulk round trip. A candidate that does not
    /// resolve gets an empty listing.
    pub async fn recommend_jobs(
        &self,
        principal: &Principal,
        candidate_id: CandidateId,
    ) -> Result<Vec<JobRecommendation>, ScorerError> {
        let Some(candidate) = self.store.candidate_snapshot(candidate_id).await? else {
            tracing::debug!("Candidate {} not found, empty recommendations", candidate_id);
            return Ok(Vec::new());
        };

        let resource = Resource::Candidate {
            user_id: candidate.profile.user_id,
        };
        if !can(principal, Action::ViewRecommendations, &resource) {
            return Err(ScorerError::Forbidden);
        }

        let applied = self.store.applied_job_ids(candidate_id).await?;
        let postings = self.store.active_jobs().await?;

        let job_ids: Vec<JobId> = postings.iter().map(|posting| posting.id).collect();
        let mut skills_by_job = self.store.job_required_skills_bulk(&job_ids).await?;

        let jobs: Vec<JobSnapshot> = postings
            .into_iter()
            .map(|posting| JobSnapshot {
                required_skills: skills_by_job.remove(&posting.id).unwrap_or_default(),
                posting,
            })
            .collect();

        let query = RecommendationQuery {
            exclude_job_ids: applied,
        };
        let result = self.ranker.recommend_jobs(&candidate, jobs, &query);

        tracing::info!(
            "Built {} recommendations for candidate {} (from {} open jobs)",
            result.recommendations.len(),
            candidate_id,
            result.total_jobs
        );

        Ok(result.recommendations)
    }

    /// Ranked application listing for an employer's posting.
    ///
    /// Every application row gets a score attached; candidate snapshots
    /// are bulk-fetched once for the whole listing.
    pub async fn rank_applications(
        &self,
        principal: &Principal,
        job_id: JobId,
    ) -> Result<Vec<ScoredApplication>, ScorerError> {
        let Some(job) = self.store.job_snapshot(job_id).await? else {
            return Err(ScorerError::JobNotFound(job_id));
        };

        let resource = Resource::Job {
            company_id: job.posting.company_id,
        };
        if !can(principal, Action::ViewApplicantRanking, &resource) {
            return Err(ScorerError::Forbidden);
        }

        let applications = self.store.applications_for_job(job_id).await?;
        let candidate_ids: Vec<CandidateId> = applications
            .iter()
            .map(|application| application.candidate_id)
            .collect();
        let candidates = self.store.candidate_snapshots_bulk(&candidate_ids).await?;

        let rows = self.ranker.rank_applications(&job, applications, &candidates);

        tracing::info!(
            "Ranked {} applications for job {}",
            rows.len(),
            job_id
        );

        Ok(rows)
    }
}
