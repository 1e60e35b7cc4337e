use std::sync::Arc;

use crate::auth::token::TokenService;
use crate::config::Config;
use crate::resume::parser::ResumeParser;
use crate::store::Store;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// `PgStore` in production; swapped for the in-memory store in tests.
    pub store: Arc<dyn Store>,
    pub tokens: TokenService,
    /// Third-party resume parser. Default: `HttpResumeParser`.
    pub parser: Arc<dyn ResumeParser>,
    pub config: Config,
}
