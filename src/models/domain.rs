use serde::{Deserialize, Serialize};
use std::str::FromStr;

pub type UserId = i64;
pub type CandidateId = i64;
pub type JobId = i64;
pub type SkillId = i64;
pub type CompanyId = i64;
pub type ApplicationId = i64;

/// Canonical skill reference data
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Skill {
    pub id: SkillId,
    pub name: String,
}

/// Candidate proficiency in a skill, ordered from Beginner to Expert
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Proficiency {
    Beginner,
    Intermediate,
    Advanced,
    Expert,
}

impl Proficiency {
    /// Minimum proficiency a matched skill is expected to carry.
    /// Levels at or below this earn no proficiency bonus.
    pub const BASELINE: Proficiency = Proficiency::Intermediate;

    /// Numeric level (1-4)
    pub fn level(self) -> u8 {
        match self {
            Proficiency::Beginner => 1,
            Proficiency::Intermediate => 2,
            Proficiency::Advanced => 3,
            Proficiency::Expert => 4,
        }
    }
}

impl FromStr for Proficiency {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "beginner" => Ok(Proficiency::Beginner),
            "intermediate" => Ok(Proficiency::Intermediate),
            "advanced" => Ok(Proficiency::Advanced),
            "expert" => Ok(Proficiency::Expert),
            other => Err(format!("unknown proficiency level: {other}")),
        }
    }
}

/// Weight category on a job's required skill
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Importance {
    Preferred,
    Required,
}

impl Importance {
    /// Coverage weight: required skills count double
    pub fn weight(self) -> f64 {
        match self {
            Importance::Preferred => 1.0,
            Importance::Required => 2.0,
        }
    }
}

impl FromStr for Importance {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "preferred" => Ok(Importance::Preferred),
            "required" => Ok(Importance::Required),
            other => Err(format!("unknown importance: {other}")),
        }
    }
}

/// A candidate's skill with their proficiency level.
/// A candidate has at most one entry per skill.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CandidateSkill {
    pub skill_id: SkillId,
    pub skill_name: String,
    pub proficiency: Proficiency,
}

/// A skill a job posting asks for, tagged with its importance weight.
/// A job lists a skill at most once.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobRequiredSkill {
    pub skill_id: SkillId,
    pub skill_name: String,
    pub importance: Importance,
}

/// Candidate profile fields relevant to scoring
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CandidateProfile {
    pub id: CandidateId,
    pub user_id: UserId,
    pub full_name: String,
    pub experience_years: u8,
}

/// Job posting fields relevant to scoring and recommendation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobPosting {
    pub id: JobId,
    pub company_id: CompanyId,
    pub company_name: String,
    pub title: String,
    pub experience_required: u8,
    #[serde(default = "default_true")]
    pub is_active: bool,
    #[serde(default)]
    pub posted_at: Option<chrono::DateTime<chrono::Utc>>,
}

fn default_true() -> bool {
    true
}

/// Lifecycle state of a job application
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ApplicationStatus {
    Submitted,
    UnderReview,
    Shortlisted,
    Rejected,
    Hired,
}

impl FromStr for ApplicationStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "submitted" => Ok(ApplicationStatus::Submitted),
            "under_review" => Ok(ApplicationStatus::UnderReview),
            "shortlisted" => Ok(ApplicationStatus::Shortlisted),
            "rejected" => Ok(ApplicationStatus::Rejected),
            "hired" => Ok(ApplicationStatus::Hired),
            other => Err(format!("unknown application status: {other}")),
        }
    }
}

/// A candidate's application to a job posting
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobApplication {
    pub id: ApplicationId,
    pub job_id: JobId,
    pub candidate_id: CandidateId,
    pub status: ApplicationStatus,
    pub applied_at: chrono::DateTime<chrono::Utc>,
}

/// Everything the scorer needs to know about a candidate,
/// fetched as one consistent snapshot
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CandidateSnapshot {
    pub profile: CandidateProfile,
    pub skills: Vec<CandidateSkill>,
}

/// Everything the scorer needs to know about a job posting
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobSnapshot {
    pub posting: JobPosting,
    pub required_skills: Vec<JobRequiredSkill>,
}

/// A required skill the candidate actually has, with both sides' weights
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchedSkill {
    pub skill_id: SkillId,
    pub skill_name: String,
    pub importance: Importance,
    pub proficiency: Proficiency,
}

/// Candidate-side recommendation listing row
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobRecommendation {
    pub job_id: JobId,
    pub title: String,
    pub company_name: String,
    pub experience_required: u8,
    pub match_score: f64,
    pub matched_skills: Vec<String>,
}

/// Employer-side application listing row with the score attached
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoredApplication {
    pub application_id: ApplicationId,
    pub candidate_id: CandidateId,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub candidate_name: Option<String>,
    pub status: ApplicationStatus,
    pub applied_at: chrono::DateTime<chrono::Utc>,
    pub match_score: f64,
    pub matched_skills: Vec<String>,
}

/// Recommendation query parameters
#[derive(Debug, Clone, Default)]
pub struct RecommendationQuery {
    pub exclude_job_ids: Vec<JobId>,
}

/// Scoring weights: how the skill and experience components blend,
/// plus the cap on the proficiency bonus inside the skill component
#[derive(Debug, Clone, Copy)]
pub struct ScoringWeights {
    pub skill: f64,
    pub experience: f64,
    pub proficiency_bonus: f64,
}

impl Default for ScoringWeights {
    fn default() -> Self {
        Self {
            skill: 0.7,
            experience: 0.3,
            proficiency_bonus: 0.1,
        }
    }
}

/// Ranking policy for the recommendation listing
#[derive(Debug, Clone, Copy)]
pub struct RankingPolicy {
    /// Scores must be strictly above this to surface as recommendations
    pub min_score: f64,
    pub max_recommendations: usize,
}

impl Default for RankingPolicy {
    fn default() -> Self {
        Self {
            min_score: 30.0,
            max_recommendations: 10,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_proficiency_ordering() {
        assert!(Proficiency::Beginner < Proficiency::Intermediate);
        assert!(Proficiency::Advanced < Proficiency::Expert);
        assert_eq!(Proficiency::Expert.level(), 4);
    }

    #[test]
    fn test_proficiency_parse() {
        assert_eq!("expert".parse::<Proficiency>(), Ok(Proficiency::Expert));
        assert_eq!("Advanced".parse::<Proficiency>(), Ok(Proficiency::Advanced));
        assert!("wizard".parse::<Proficiency>().is_err());
    }

    #[test]
    fn test_importance_weight() {
        assert_eq!(Importance::Required.weight(), 2.0);
        assert_eq!(Importance::Preferred.weight(), 1.0);
    }

    #[test]
    fn test_status_wire_names() {
        let json = serde_json::to_string(&ApplicationStatus::UnderReview).unwrap();
        assert_eq!(json, "\"under_review\"");
        assert_eq!(
            "under_review".parse::<ApplicationStatus>(),
            Ok(ApplicationStatus::UnderReview)
        );
    }

    #[test]
    fn test_skill_round_trip() {
        let skill = Skill {
            id: 3,
            name: "Python".to_string(),
        };
        let json = serde_json::to_string(&skill).unwrap();
        assert_eq!(serde_json::from_str::<Skill>(&json).unwrap(), skill);
    }

    #[test]
    fn test_default_weights_sum_to_one() {
        let weights = ScoringWeights::default();
        assert!((weights.skill + weights.experience - 1.0).abs() < 1e-9);
    }
}
