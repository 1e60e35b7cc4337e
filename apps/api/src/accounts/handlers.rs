use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    Json,
};
use serde_json::{json, Value};
use uuid::Uuid;

use crate::accounts::service::{log_in, sign_up};
use crate::errors::AppError;
use crate::models::profile::Profile;
use crate::models::user::{Account, LoginRequest, SignUpRequest};
use crate::state::AppState;

/// POST /signup
pub async fn handle_signup(
    State(state): State<AppState>,
    payload: Result<Json<SignUpRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<Value>), AppError> {
    let Json(request) = payload?;
    sign_up(state.store.as_ref(), request).await?;
    Ok((
        StatusCode::CREATED,
        Json(json!({ "message": "User created successfully" })),
    ))
}

/// POST /login
pub async fn handle_login(
    State(state): State<AppState>,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> Result<Json<Value>, AppError> {
    let Json(request) = payload?;
    let token = log_in(state.store.as_ref(), &state.tokens, request).await?;
    Ok(Json(json!({ "token": token })))
}

/// GET /admin/applicants
pub async fn handle_list_applicants(
    State(state): State<AppState>,
) -> Result<Json<Vec<Account>>, AppError> {
    Ok(Json(state.store.list_applicants().await?))
}

/// GET /admin/applicant/:id
pub async fn handle_get_applicant_profile(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> Result<Json<Profile>, AppError> {
    let applicant_id = Uuid::parse_str(raw_id.trim())
        .map_err(|_| AppError::BadRequest("Invalid applicant ID".to_string()))?;

    let profile = state
        .store
        .get_profile(applicant_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Applicant profile not found".to_string()))?;
    Ok(Json(profile))
}
