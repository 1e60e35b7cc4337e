//! Application registry: at most one application per (applicant, job).
//!
//! The lookup before insert gives a clean answer for the common case. Concurrent
//! submits can both pass the lookup, so the insert itself relies on the storage
//! unique constraint on `(user_id, job_id)` and maps its violation to the same error.

use chrono::Utc;
use thiserror::Error;
use tracing::info;
use uuid::Uuid;

use crate::models::job::Application;
use crate::store::{Store, StoreError};

#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("job {0} not found")]
    JobNotFound(Uuid),

    #[error("applicant has already applied for this job")]
    DuplicateApplication,

    #[error(transparent)]
    Store(StoreError),
}

impl From<StoreError> for RegistryError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::DuplicateApplication => RegistryError::DuplicateApplication,
            other => RegistryError::Store(other),
        }
    }
}

pub async fn apply(
    store: &dyn Store,
    applicant_id: Uuid,
    job_id: Uuid,
) -> Result<Application, RegistryError> {
    if store.get_job(job_id).await?.is_none() {
        return Err(RegistryError::JobNotFound(job_id));
    }

    if store.find_application(applicant_id, job_id).await?.is_some() {
        return Err(RegistryError::DuplicateApplication);
    }

    let application = Application {
        id: Uuid::new_v4(),
        user_id: applicant_id,
        job_id,
        application_date: Utc::now(),
    };
    store.insert_application(&application).await?;

    info!("User {applicant_id} applied for job {job_id}");
    Ok(application)
}
