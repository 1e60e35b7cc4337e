use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Job {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub company_name: String,
    pub posted_on: DateTime<Utc>,
    pub posted_by: Uuid,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Application {
    pub id: Uuid,
    pub user_id: Uuid,
    pub job_id: Uuid,
    pub application_date: DateTime<Utc>,
}

/// Applicant summary shown on an admin's job detail page.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ApplicantDetails {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub profile_headline: String,
}

#[derive(Debug, Deserialize)]
pub struct CreateJobRequest {
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub company_name: String,
}

#[derive(Debug, Serialize)]
pub struct JobWithApplicantsResponse {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub company_name: String,
    pub posted_on: DateTime<Utc>,
    pub total_applications: usize,
    pub applicants: Vec<ApplicantDetails>,
}

impl JobWithApplicantsResponse {
    pub fn new(job: Job, applicants: Vec<ApplicantDetails>) -> Self {
        Self {
            id: job.id,
            title: job.title,
            description: job.description,
            company_name: job.company_name,
            posted_on: job.posted_on,
            total_applications: applicants.len(),
            applicants,
        }
    }
}
