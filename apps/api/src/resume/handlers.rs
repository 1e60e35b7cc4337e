use axum::{
    extract::{Multipart, State},
    Json,
};
use serde_json::{json, Value};

use crate::auth::gate::Principal;
use crate::errors::AppError;
use crate::resume::ingest::{Ingestion, UploadedFile};
use crate::state::AppState;

/// Multipart field carrying the resume.
pub const RESUME_FIELD: &str = "resume";

/// Pulls the `resume` field out of the form, enforcing `max_bytes`.
pub async fn extract_resume(
    multipart: &mut Multipart,
    max_bytes: usize,
) -> Result<UploadedFile, AppError> {
    while let Some(field) = multipart.next_field().await? {
        if field.name() != Some(RESUME_FIELD) {
            continue;
        }
        let file_name = field
            .file_name()
            .map(str::to_string)
            .ok_or_else(|| AppError::BadUpload("Uploaded resume has no file name".to_string()))?;
        let bytes = field.bytes().await?;
        if bytes.is_empty() {
            return Err(AppError::BadUpload("Uploaded resume is empty".to_string()));
        }
        if bytes.len() > max_bytes {
            return Err(AppError::BadUpload(format!(
                "Uploaded resume exceeds the {max_bytes} byte limit"
            )));
        }
        return Ok(UploadedFile { file_name, bytes });
    }
    Err(AppError::BadUpload("Could not get uploaded file".to_string()))
}

/// POST /uploadResume
pub async fn handle_upload_resume(
    State(state): State<AppState>,
    principal: Principal,
    mut multipart: Multipart,
) -> Result<Json<Value>, AppError> {
    let file = extract_resume(&mut multipart, state.config.max_upload_bytes).await?;

    let ingestion = Ingestion {
        store: state.store.as_ref(),
        parser: state.parser.as_ref(),
        upload_dir: &state.config.upload_dir,
    };
    let profile = ingestion.run(principal.user_id, file).await?;

    Ok(Json(json!({
        "message": "Resume uploaded and processed successfully",
        "skills": profile.skill_list()
    })))
}
