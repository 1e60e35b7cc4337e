use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};

const DEFAULT_JWT_SECRET: &str = "default_secret";
const DEFAULT_PARSER_URL: &str = "https://api.apilayer.com/resume_parser/upload";
const DEFAULT_MAX_UPLOAD_BYTES: usize = 10 << 20;
/// Ten years.
const MAX_JWT_EXPIRATION_HOURS: i64 = 24 * 365 * 10;

/// Application configuration loaded from environment variables.
/// Startup fails if `DATABASE_URL` or `RESUME_PARSER_API_KEY` is missing.
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub jwt_secret: String,
    pub jwt_expiration_hours: i64,
    pub resume_parser_api_key: String,
    pub resume_parser_url: String,
    pub resume_parser_timeout: Duration,
    pub upload_dir: PathBuf,
    pub max_upload_bytes: usize,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            database_url: require_env("DATABASE_URL")?,
            jwt_secret: std::env::var("JWT_SECRET")
                .unwrap_or_else(|_| DEFAULT_JWT_SECRET.to_string()),
            jwt_expiration_hours: token_lifetime_hours(parse_env("JWT_EXPIRATION_HOURS", 72)?)?,
            resume_parser_api_key: require_env("RESUME_PARSER_API_KEY")?,
            resume_parser_url: std::env::var("RESUME_PARSER_URL")
                .unwrap_or_else(|_| DEFAULT_PARSER_URL.to_string()),
            resume_parser_timeout: Duration::from_secs(parse_env(
                "RESUME_PARSER_TIMEOUT_SECS",
                30,
            )?),
            upload_dir: std::env::var("UPLOAD_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("./uploads")),
            max_upload_bytes: parse_env("MAX_UPLOAD_BYTES", DEFAULT_MAX_UPLOAD_BYTES)?,
            port: parse_env("PORT", 8080)?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        })
    }

    /// True when tokens would be signed with the built-in fallback secret.
    pub fn uses_default_jwt_secret(&self) -> bool {
        self.jwt_secret == DEFAULT_JWT_SECRET
    }
}

fn require_env(key: &str) -> Result<String> {
    match std::env::var(key) {
        Ok(value) if !value.trim().is_empty() => Ok(value),
        _ => anyhow::bail!("Required environment variable '{key}' is not set"),
    }
}

fn token_lifetime_hours(hours: i64) -> Result<i64> {
    if !(1..=MAX_JWT_EXPIRATION_HOURS).contains(&hours) {
        anyhow::bail!(
            "JWT_EXPIRATION_HOURS must be between 1 and {MAX_JWT_EXPIRATION_HOURS}, got {hours}"
        );
    }
    Ok(hours)
}

fn parse_env<T>(key: &str, default: T) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match std::env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse::<T>()
            .with_context(|| format!("{key} must be a valid value, got '{raw}'")),
        Err(_) => Ok(default),
    }
}

#[cfg(test)]
impl Config {
    /// Configuration for router-level tests. Nothing here touches the environment.
    pub fn for_tests(upload_dir: PathBuf, resume_parser_url: String) -> Self {
        Config {
            database_url: "postgres://unused".to_string(),
            jwt_secret: "test-secret-key-at-least-32-characters-long".to_string(),
            jwt_expiration_hours: 72,
            resume_parser_api_key: "test-api-key".to_string(),
            resume_parser_url,
            resume_parser_timeout: Duration::from_secs(5),
            upload_dir,
            max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
            port: 0,
            rust_log: "debug".to_string(),
        }
    }
}
