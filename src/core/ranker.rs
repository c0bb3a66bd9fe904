use crate::core::filters::is_recommendable;
use crate::core::scoring::{calculate_match_score, DEFAULT_SCORE};
use crate::models::{
    CandidateId, CandidateSnapshot, JobApplication, JobRecommendation, JobSnapshot,
    RankingPolicy, RecommendationQuery, ScoredApplication, ScoringWeights,
};
use std::collections::HashMap;

/// Result of the recommendation pipeline
#[derive(Debug)]
pub struct RankResult {
    pub recommendations: Vec<JobRecommendation>,
    pub total_jobs: usize,
}

/// Ranking orchestrator for both sides of the marketplace
///
/// # Pipelines
/// * Candidate side: eligibility filter -> score -> threshold -> rank -> truncate
/// * Employer side: score every application -> rank (no filtering)
#[derive(Debug, Clone)]
pub struct Ranker {
    weights: ScoringWeights,
    policy: RankingPolicy,
}

impl Ranker {
    pub fn new(weights: ScoringWeights, policy: RankingPolicy) -> Self {
        Self { weights, policy }
    }

    pub fn with_defaults() -> Self {
        Self {
            weights: ScoringWeights::default(),
            policy: RankingPolicy::default(),
        }
    }

    pub fn weights(&self) -> &ScoringWeights {
        &self.weights
    }

    pub fn policy(&self) -> &RankingPolicy {
        &self.policy
    }

    /// Build the recommendation listing for a candidate
    ///
    /// Scores every eligible posting, keeps only those strictly above the
    /// configured threshold, and returns the top matches sorted by score.
    ///
    /// # Arguments
    /// * `candidate` - the candidate's profile and skill snapshot
    /// * `jobs` - open postings with their required-skill sets
    /// * `query` - postings to exclude (already applied to)
    pub fn recommend_jobs(
        &self,
        candidate: &CandidateSnapshot,
        jobs: Vec<JobSnapshot>,
        query: &RecommendationQuery,
    ) -> RankResult {
        let total_jobs = jobs.len();

        let mut recommendations: Vec<JobRecommendation> = jobs
            .into_iter()
            .filter(|job| is_recommendable(&job.posting, query))
            .filter_map(|job| {
                let (score, matched_skills) = calculate_match_score(
                    &job.required_skills,
                    &candidate.skills,
                    candidate.profile.experience_years,
                    job.posting.experience_required,
                    &self.weights,
                );

                if score > self.policy.min_score {
                    Some(JobRecommendation {
                        job_id: job.posting.id,
                        title: job.posting.title,
                        company_name: job.posting.company_name,
                        experience_required: job.posting.experience_required,
                        match_score: score,
                        matched_skills,
                    })
                } else {
                    None
                }
            })
            .collect();

        // Sort by score (descending), job id as a stable tie-break
        recommendations.sort_by(|a, b| {
            b.match_score
                .partial_cmp(&a.match_score)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then_with(|| a.job_id.cmp(&b.job_id))
        });

        recommendations.truncate(self.policy.max_recommendations);

        RankResult {
            recommendations,
            total_jobs,
        }
    }

    /// Attach a match score to every application for a posting
    ///
    /// Nothing is filtered out: the employer sees the full list, ranked.
    /// Applications whose candidate record is missing score the documented
    /// default instead of breaking the listing.
    pub fn rank_applications(
        &self,
        job: &JobSnapshot,
        applications: Vec<JobApplication>,
        candidates: &HashMap<CandidateId, CandidateSnapshot>,
    ) -> Vec<ScoredApplication> {
        let mut rows: Vec<ScoredApplication> = applications
            .into_iter()
            .map(|application| match candidates.get(&application.candidate_id) {
                Some(candidate) => {
                    let (score, matched_skills) = calculate_match_score(
                        &job.required_skills,
                        &candidate.skills,
                        candidate.profile.experience_years,
                        job.posting.experience_required,
                        &self.weights,
                    );

                    ScoredApplication {
                        application_id: application.id,
                        candidate_id: application.candidate_id,
                        candidate_name: Some(candidate.profile.full_name.clone()),
                        status: application.status,
                        applied_at: application.applied_at,
                        match_score: score,
                        matched_skills,
                    }
                }
                None => {
                    tracing::warn!(
                        "Candidate {} missing for application {}, scoring default",
                        application.candidate_id,
                        application.id
                    );

                    ScoredApplication {
                        application_id: application.id,
                        candidate_id: application.candidate_id,
                        candidate_name: None,
                        status: application.status,
                        applied_at: application.applied_at,
                        match_score: DEFAULT_SCORE,
                        matched_skills: Vec::new(),
                    }
                }
            })
            .collect();

        // Sort by score (descending), earlier application wins ties
        rows.sort_by(|a, b| {
            b.match_score
                .partial_cmp(&a.match_score)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then_with(|| a.applied_at.cmp(&b.applied_at))
        });

        rows
    }
}

impl Default for Ranker {
    fn default() -> Self {
        Self::with_defaults()
    }
}
