pub mod health;


use axum::{
    extract::DefaultBodyLimit,
    middleware,
    routing::{get, post},
    Router,
};

use crate::accounts::handlers as accounts;
use crate::auth::gate::{authenticate, require_admin, require_applicant};
use crate::jobs::handlers as jobs;
use crate::resume::handlers as resume;
use crate::state::AppState;

/// Room for multipart boundaries and part headers on top of the file itself.
const MULTIPART_OVERHEAD_BYTES: usize = 64 * 1024;

pub fn build_router(state: AppState) -> Router {
    let upload_limit = state
        .config
        .max_upload_bytes
        .saturating_add(MULTIPART_OVERHEAD_BYTES);

    let applicant = Router::new()
        .route(
            "/uploadResume",
            post(resume::handle_upload_resume).layer(DefaultBodyLimit::max(upload_limit)),
        )
        .route("/jobs/apply", get(jobs::handle_apply))
        .route_layer(middleware::from_fn(require_applicant));

    let admin = Router::new()
        .route("/admin/job", post(jobs::handle_create_job))
        .route("/admin/job/:id", get(jobs::handle_get_job))
        .route("/admin/applicants", get(accounts::handle_list_applicants))
        .route(
            "/admin/applicant/:id",
            get(accounts::handle_get_applicant_profile),
        )
        .route_layer(middleware::from_fn(require_admin));

    // Role checks above run inside authentication, never instead of it.
    let authenticated = Router::new()
        .route("/jobs", get(jobs::handle_list_jobs))
        .merge(applicant)
        .merge(admin)
        .route_layer(middleware::from_fn_with_state(state.clone(), authenticate));

    Router::new()
        .route("/health", get(health::health_handler))
        .route("/signup", post(accounts::handle_signup))
        .route("/login", post(accounts::handle_login))
        .merge(authenticated)
        .with_state(state)
}
