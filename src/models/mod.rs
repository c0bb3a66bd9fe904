// Model exports
pub mod domain;

pub use domain::{
    ApplicationId, ApplicationStatus, CandidateId, CandidateProfile, CandidateSkill,
    CandidateSnapshot, CompanyId, Importance, JobApplication, JobId, JobPosting,
    JobRecommendation, JobRequiredSkill, JobSnapshot, MatchedSkill, Proficiency,
    RankingPolicy, RecommendationQuery, ScoredApplication, ScoringWeights, Skill, SkillId,
    UserId,
};
