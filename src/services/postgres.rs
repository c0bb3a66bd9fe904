use async_trait::async_trait;
use sqlx::postgres::PgPoolOptions;
use sqlx::{PgPool, Row};
use std::collections::HashMap;
use std::str::FromStr;
use std::time::Duration;

use crate::config::DatabaseSettings;
use crate::models::{
    ApplicationStatus, CandidateId, CandidateProfile, CandidateSkill, CandidateSnapshot,
    Importance, JobApplication, JobId, JobPosting, JobRequiredSkill, JobSnapshot, Proficiency,
};
use crate::services::{StoreError, TalentStore};

/// PostgreSQL-backed talent store
///
/// Reads the platform's own tables (profiles, postings, skills,
/// applications); this crate never writes to or migrates that schema.
/// Rows carrying values the domain cannot parse (an unknown proficiency
/// or status string) are skipped with a warning so one inconsistent
/// record cannot take down a whole listing.
pub struct PgTalentStore {
    pool: PgPool,
}

impl PgTalentStore {
    /// Create a new store from a connection string
    pub async fn new(
        database_url: &str,
        max_connections: u32,
        min_connections: u32,
    ) -> Result<Self, StoreError> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .min_connections(min_connections)
            .acquire_timeout(Duration::from_secs(5))
            .idle_timeout(Duration::from_secs(600))
            .test_before_acquire(true)
            .connect(database_url)
            .await?;

        Ok(Self { pool })
    }

    /// Create a new store from settings
    pub async fn from_settings(settings: &DatabaseSettings) -> Result<Self, StoreError> {
        tracing::info!("Connecting to PostgreSQL with URL: {}", settings.url);

        Self::new(
            &settings.url,
            settings.max_connections.unwrap_or(10),
            settings.min_connections.unwrap_or(1),
        )
        .await
    }

    /// Health check for the database connection
    pub async fn health_check(&self) -> Result<bool, StoreError> {
        sqlx::query("SELECT 1")
            .fetch_one(&self.pool)
            .await
            .map(|_| true)
            .map_err(Into::into)
    }

    fn posting_from_row(row: &sqlx::postgres::PgRow) -> JobPosting {
        JobPosting {
            id: row.get("id"),
            company_id: row.get("company_id"),
            company_name: row.get("company_name"),
            title: row.get("title"),
            experience_required: clamp_years(row.get("experience_required")),
            is_active: row.get("is_active"),
            posted_at: row.get("posted_at"),
        }
    }
}

/// Experience columns are plain INTs; negative or absurd values are data
/// entry noise and get clamped into the domain range.
fn clamp_years(years: i32) -> u8 {
    years.clamp(0, u8::MAX as i32) as u8
}

#[async_trait]
impl TalentStore for PgTalentStore {
    async fn candidate_snapshot(
        &self,
        candidate_id: CandidateId,
    ) -> Result<Option<CandidateSnapshot>, StoreError> {
        let query = r#"
            SELECT id, user_id, full_name, experience_years
            FROM candidate_profiles
            WHERE id = $1
        "#;

        let Some(row) = sqlx::query(query)
            .bind(candidate_id)
            .fetch_optional(&self.pool)
            .await?
        else {
            return Ok(None);
        };

        let profile = CandidateProfile {
            id: row.get("id"),
            user_id: row.get("user_id"),
            full_name: row.get("full_name"),
            experience_years: clamp_years(row.get("experience_years")),
        };

        // The join drops skill references with no skill record
        let skills_query = r#"
            SELECT cs.skill_id, s.skill_name, cs.proficiency_level
            FROM candidate_skills cs
            JOIN skills s ON s.id = cs.skill_id
            WHERE cs.candidate_id = $1
        "#;

        let rows = sqlx::query(skills_query)
            .bind(candidate_id)
            .fetch_all(&self.pool)
            .await?;

        let skills = rows
            .iter()
            .filter_map(|row| {
                let level: String = row.get("proficiency_level");
                match Proficiency::from_str(&level) {
                    Ok(proficiency) => Some(CandidateSkill {
                        skill_id: row.get("skill_id"),
                        skill_name: row.get("skill_name"),
                        proficiency,
                    }),
                    Err(e) => {
                        tracing::warn!("Skipping skill row for candidate {}: {}", candidate_id, e);
                        None
                    }
                }
            })
            .collect();

        Ok(Some(CandidateSnapshot { profile, skills }))
    }

    async fn job_snapshot(&self, job_id: JobId) -> Result<Option<JobSnapshot>, StoreError> {
        let query = r#"
            SELECT j.id, j.company_id, c.company_name, j.title,
                   j.experience_required, j.is_active, j.posted_at
            FROM job_postings j
            JOIN companies c ON c.id = j.company_id
            WHERE j.id = $1
        "#;

        let Some(row) = sqlx::query(query)
            .bind(job_id)
            .fetch_optional(&self.pool)
            .await?
        else {
            return Ok(None);
        };

        let posting = Self::posting_from_row(&row);

        let mut skills_by_job = self.job_required_skills_bulk(&[job_id]).await?;
        let required_skills = skills_by_job.remove(&job_id).unwrap_or_default();

        Ok(Some(JobSnapshot {
            posting,
            required_skills,
        }))
    }

    async fn active_jobs(&self) -> Result<Vec<JobPosting>, StoreError> {
        let query = r#"
            SELECT j.id, j.company_id, c.company_name, j.title,
                   j.experience_required, j.is_active, j.posted_at
            FROM job_postings j
            JOIN companies c ON c.id = j.company_id
            WHERE j.is_active
            ORDER BY j.posted_at DESC
        "#;

        let rows = sqlx::query(query).fetch_all(&self.pool).await?;

        Ok(rows.iter().map(Self::posting_from_row).collect())
    }

    async fn applied_job_ids(&self, candidate_id: CandidateId) -> Result<Vec<JobId>, StoreError> {
        let query = r#"
            SELECT job_id
            FROM job_applications
            WHERE candidate_id = $1
        "#;

        let rows = sqlx::query(query)
            .bind(candidate_id)
            .fetch_all(&self.pool)
            .await?;

        Ok(rows.iter().map(|row| row.get("job_id")).collect())
    }

    async fn job_required_skills_bulk(
        &self,
        job_ids: &[JobId],
    ) -> Result<HashMap<JobId, Vec<JobRequiredSkill>>, StoreError> {
        if job_ids.is_empty() {
            return Ok(HashMap::new());
        }

        let query = r#"
            SELECT jr.job_id, jr.skill_id, s.skill_name, jr.importance
            FROM job_required_skills jr
            JOIN skills s ON s.id = jr.skill_id
            WHERE jr.job_id = ANY($1)
        "#;

        let rows = sqlx::query(query)
            .bind(job_ids)
            .fetch_all(&self.pool)
            .await?;

        let mut by_job: HashMap<JobId, Vec<JobRequiredSkill>> = HashMap::new();
        for row in &rows {
            let job_id: JobId = row.get("job_id");
            let importance: String = row.get("importance");
            match Importance::from_str(&importance) {
                Ok(importance) => by_job.entry(job_id).or_default().push(JobRequiredSkill {
                    skill_id: row.get("skill_id"),
                    skill_name: row.get("skill_name"),
                    importance,
                }),
                Err(e) => {
                    tracing::warn!("Skipping required-skill row for job {}: {}", job_id, e);
                }
            }
        }

        Ok(by_job)
    }

    async fn applications_for_job(
        &self,
        job_id: JobId,
    ) -> Result<Vec<JobApplication>, StoreError> {
        let query = r#"
            SELECT id, job_id, candidate_id, status, applied_at
            FROM job_applications
            WHERE job_id = $1
        "#;

        let rows = sqlx::query(query)
            .bind(job_id)
            .fetch_all(&self.pool)
            .await?;

        let applications = rows
            .iter()
            .filter_map(|row| {
                let status: String = row.get("status");
                match ApplicationStatus::from_str(&status) {
                    Ok(status) => Some(JobApplication {
                        id: row.get("id"),
                        job_id: row.get("job_id"),
                        candidate_id: row.get("candidate_id"),
                        status,
                        applied_at: row.get("applied_at"),
                    }),
                    Err(e) => {
                        tracing::warn!("Skipping application row for job {}: {}", job_id, e);
                        None
                    }
                }
            })
            .collect();

        Ok(applications)
    }

    async fn candidate_snapshots_bulk(
        &self,
        candidate_ids: &[CandidateId],
    ) -> Result<HashMap<CandidateId, CandidateSnapshot>, StoreError> {
        if candidate_ids.is_empty() {
            return Ok(HashMap::new());
        }

        let profiles_query = r#"
            SELECT id, user_id, full_name, experience_years
            FROM candidate_profiles
            WHERE id = ANY($1)
        "#;

        let profile_rows = sqlx::query(profiles_query)
            .bind(candidate_ids)
            .fetch_all(&self.pool)
            .await?;

        let mut snapshots: HashMap<CandidateId, CandidateSnapshot> = profile_rows
            .iter()
            .map(|row| {
                let profile = CandidateProfile {
                    id: row.get("id"),
                    user_id: row.get("user_id"),
                    full_name: row.get("full_name"),
                    experience_years: clamp_years(row.get("experience_years")),
                };
                (
                    profile.id,
                    CandidateSnapshot {
                        profile,
                        skills: Vec::new(),
                    },
                )
            })
            .collect();

        let skills_query = r#"
            SELECT cs.candidate_id, cs.skill_id, s.skill_name, cs.proficiency_level
            FROM candidate_skills cs
            JOIN skills s ON s.id = cs.skill_id
            WHERE cs.candidate_id = ANY($1)
        "#;

        let skill_rows = sqlx::query(skills_query)
            .bind(candidate_ids)
            .fetch_all(&self.pool)
            .await?;

        for row in &skill_rows {
            let candidate_id: CandidateId = row.get("candidate_id");
            let level: String = row.get("proficiency_level");
            match Proficiency::from_str(&level) {
                Ok(proficiency) => {
                    if let Some(snapshot) = snapshots.get_mut(&candidate_id) {
                        snapshot.skills.push(CandidateSkill {
                            skill_id: row.get("skill_id"),
                            skill_name: row.get("skill_name"),
                            proficiency,
                        });
                    }
                }
                Err(e) => {
                    tracing::warn!("Skipping skill row for candidate {}: {}", candidate_id, e);
                }
            }
        }

        Ok(snapshots)
    }
}
