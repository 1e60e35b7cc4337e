//! Persistence seam for accounts, profiles, jobs and applications.
//!
//! `AppState` carries an `Arc<dyn Store>`. Production uses [`postgres::PgStore`];
//! tests use the in-memory store, which enforces the same uniqueness rules.

use async_trait::async_trait;
use thiserror::Error;
use uuid::Uuid;

use crate::models::job::{ApplicantDetails, Application, Job};
use crate::models::profile::Profile;
use crate::models::user::{Account, NewAccount};

#[cfg(test)]
pub mod memory;
pub mod postgres;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("email {0} is already registered")]
    EmailTaken(String),

    #[error("application already exists")]
    DuplicateApplication,

    #[error("no profile for user {0}")]
    ProfileNotFound(Uuid),

    #[error("stored row is inconsistent: {0}")]
    Corrupt(String),

    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

#[async_trait]
pub trait Store: Send + Sync {
    /// Inserts the account and its empty profile atomically.
    async fn create_account(&self, account: NewAccount) -> Result<Account, StoreError>;

    async fn find_account_by_email(&self, email: &str) -> Result<Option<Account>, StoreError>;

    async fn list_applicants(&self) -> Result<Vec<Account>, StoreError>;

    async fn get_profile(&self, user_id: Uuid) -> Result<Option<Profile>, StoreError>;

    /// Replaces every mutable field of the user's profile in one write.
    async fn replace_profile(&self, profile: &Profile) -> Result<(), StoreError>;

    async fn create_job(&self, job: &Job) -> Result<(), StoreError>;

    async fn get_job(&self, job_id: Uuid) -> Result<Option<Job>, StoreError>;

    async fn list_jobs(&self) -> Result<Vec<Job>, StoreError>;

    async fn job_applicants(&self, job_id: Uuid) -> Result<Vec<ApplicantDetails>, StoreError>;

    async fn find_application(
        &self,
        user_id: Uuid,
        job_id: Uuid,
    ) -> Result<Option<Application>, StoreError>;

    /// Fails with [`StoreError::DuplicateApplication`] when `(user_id, job_id)` exists.
    async fn insert_application(&self, application: &Application) -> Result<(), StoreError>;
}
