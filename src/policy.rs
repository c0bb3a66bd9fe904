use serde::{Deserialize, Serialize};

use crate::models::{CompanyId, UserId};

/// Who a request is acting as. Built by the host application from its
/// session and passed explicitly into every entry point, so nothing in
/// this crate reads ambient authentication state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Principal {
    pub user_id: UserId,
    pub role: Role,
    /// Set for employer accounts; the company the account belongs to
    #[serde(default)]
    pub company_id: Option<CompanyId>,
}

impl Principal {
    pub fn candidate(user_id: UserId) -> Self {
        Self {
            user_id,
            role: Role::Candidate,
            company_id: None,
        }
    }

    pub fn employer(user_id: UserId, company_id: CompanyId) -> Self {
        Self {
            user_id,
            role: Role::Employer,
            company_id: Some(company_id),
        }
    }

    pub fn interviewer(user_id: UserId) -> Self {
        Self {
            user_id,
            role: Role::Interviewer,
            company_id: None,
        }
    }

    pub fn admin(user_id: UserId) -> Self {
        Self {
            user_id,
            role: Role::Admin,
            company_id: None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Candidate,
    Employer,
    Interviewer,
    Admin,
}

/// Operations this crate exposes that need an authorization decision
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    ViewRecommendations,
    ViewApplicantRanking,
    ViewMatchScore,
}

/// The record an action targets, carrying its ownership facts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resource {
    Candidate { user_id: UserId },
    Job { company_id: CompanyId },
}

/// Policy decision for a principal acting on a resource.
///
/// * Admins can do anything.
/// * Candidates see only their own recommendations.
/// * Employers see rankings and scores only for their own company's jobs.
/// * Interviewers may look up match scores for the jobs they assess.
pub fn can(principal: &Principal, action: Action, resource: &Resource) -> bool {
    match (principal.role, action, resource) {
        (Role::Admin, _, _) => true,

        (Role::Candidate, Action::ViewRecommendations, Resource::Candidate { user_id }) => {
            *user_id == principal.user_id
        }

        (
            Role::Employer,
            Action::ViewApplicantRanking | Action::ViewMatchScore,
            Resource::Job { company_id },
        ) => principal.company_id == Some(*company_id),

        (Role::Interviewer, Action::ViewMatchScore, Resource::Job { .. }) => true,

        _ => false,
    }
}
