use crate::models::{
    CandidateSkill, JobPosting, JobRequiredSkill, MatchedSkill, RecommendationQuery,
};
use std::collections::HashMap;

/// Pair each of the job's required skills with the candidate's entry for it.
///
/// Set semantics: lookup is by skill id, order of either input is
/// irrelevant. Required skills the candidate lacks are simply absent
/// from the result.
#[inline]
pub fn match_required_skills(
    required_skills: &[JobRequiredSkill],
    candidate_skills: &[CandidateSkill],
) -> Vec<MatchedSkill> {
    let by_id: HashMap<_, _> = candidate_skills
        .iter()
        .map(|s| (s.skill_id, s))
        .collect();

    required_skills
        .iter()
        .filter_map(|req| {
            by_id.get(&req.skill_id).map(|candidate| MatchedSkill {
                skill_id: req.skill_id,
                skill_name: req.skill_name.clone(),
                importance: req.importance,
                proficiency: candidate.proficiency,
            })
        })
        .collect()
}

/// Check whether a posting belongs in a candidate's recommendation listing.
///
/// Inactive postings and jobs the candidate already applied to are
/// excluded before any scoring happens.
#[inline]
pub fn is_recommendable(posting: &JobPosting, query: &RecommendationQuery) -> bool {
    posting.is_active && !query.exclude_job_ids.contains(&posting.id)
}
