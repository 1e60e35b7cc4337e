use axum::{
    extract::{rejection::JsonRejection, Path, Query, State},
    http::StatusCode,
    Json,
};
use chrono::Utc;
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::info;
use uuid::Uuid;

use crate::auth::gate::Principal;
use crate::errors::AppError;
use crate::jobs::registry;
use crate::models::job::{CreateJobRequest, Job, JobWithApplicantsResponse};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct ApplyQuery {
    pub job_id: Option<String>,
}

fn parse_job_id(raw: Option<&str>) -> Result<Uuid, AppError> {
    raw.and_then(|s| Uuid::parse_str(s.trim()).ok())
        .ok_or_else(|| AppError::BadRequest("Invalid job ID".to_string()))
}

/// POST /admin/job
pub async fn handle_create_job(
    State(state): State<AppState>,
    principal: Principal,
    payload: Result<Json<CreateJobRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<Job>), AppError> {
    let Json(request) = payload?;
    if request.title.trim().is_empty() {
        return Err(AppError::BadRequest("title cannot be empty".to_string()));
    }

    let job = Job {
        id: Uuid::new_v4(),
        title: request.title,
        description: request.description,
        company_name: request.company_name,
        posted_on: Utc::now(),
        posted_by: principal.user_id,
    };
    state.store.create_job(&job).await?;

    info!("Admin {} posted job {}", principal.user_id, job.id);
    Ok((StatusCode::CREATED, Json(job)))
}

/// GET /admin/job/:id
pub async fn handle_get_job(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> Result<Json<JobWithApplicantsResponse>, AppError> {
    let job_id = parse_job_id(Some(&raw_id))?;
    let job = state
        .store
        .get_job(job_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Job {job_id} not found")))?;
    let applicants = state.store.job_applicants(job_id).await?;

    Ok(Json(JobWithApplicantsResponse::new(job, applicants)))
}

/// GET /jobs
pub async fn handle_list_jobs(State(state): State<AppState>) -> Result<Json<Vec<Job>>, AppError> {
    Ok(Json(state.store.list_jobs().await?))
}

/// GET /jobs/apply?job_id=
pub async fn handle_apply(
    State(state): State<AppState>,
    principal: Principal,
    Query(query): Query<ApplyQuery>,
) -> Result<Json<Value>, AppError> {
    let job_id = parse_job_id(query.job_id.as_deref())?;
    registry::apply(state.store.as_ref(), principal.user_id, job_id).await?;

    Ok(Json(json!({
        "message": "Successfully applied for the job"
    })))
}
