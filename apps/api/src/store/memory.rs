use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::Utc;
use uuid::Uuid;

use crate::models::job::{ApplicantDetails, Application, Job};
use crate::models::profile::Profile;
use crate::models::user::{Account, NewAccount, Role};
use crate::store::{Store, StoreError};

#[derive(Default)]
struct Tables {
    users: Vec<Account>,
    profiles: HashMap<Uuid, Profile>,
    jobs: Vec<Job>,
    applications: Vec<Application>,
}

/// In-process store with the same uniqueness rules as the Postgres schema.
#[derive(Default)]
pub struct MemoryStore {
    tables: Mutex<Tables>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn account_count(&self) -> usize {
        self.tables.lock().unwrap().users.len()
    }

    pub fn application_count(&self, user_id: Uuid, job_id: Uuid) -> usize {
        self.tables
            .lock()
            .unwrap()
            .applications
            .iter()
            .filter(|a| a.user_id == user_id && a.job_id == job_id)
            .count()
    }

    pub fn password_hash_of(&self, email: &str) -> Option<String> {
        self.tables
            .lock()
            .unwrap()
            .users
            .iter()
            .find(|u| u.email == email)
            .map(|u| u.password_hash.clone())
    }

    pub fn remove_profile(&self, user_id: Uuid) {
        self.tables.lock().unwrap().profiles.remove(&user_id);
    }
}

#[async_trait]
impl Store for MemoryStore {
    async fn create_account(&self, account: NewAccount) -> Result<Account, StoreError> {
        let mut tables = self.tables.lock().unwrap();
        if tables.users.iter().any(|u| u.email == account.email) {
            return Err(StoreError::EmailTaken(account.email));
        }
        let created = Account {
            id: Uuid::new_v4(),
            name: account.name,
            email: account.email,
            address: account.address,
            user_type: account.user_type,
            password_hash: account.password_hash,
            profile_headline: account.profile_headline,
            created_at: Utc::now(),
        };
        tables
            .profiles
            .insert(created.id, Profile::empty(created.id));
        tables.users.push(created.clone());
        Ok(created)
    }

    async fn find_account_by_email(&self, email: &str) -> Result<Option<Account>, StoreError> {
        let tables = self.tables.lock().unwrap();
        Ok(tables.users.iter().find(|u| u.email == email).cloned())
    }

    async fn list_applicants(&self) -> Result<Vec<Account>, StoreError> {
        let tables = self.tables.lock().unwrap();
        Ok(tables
            .users
            .iter()
            .filter(|u| u.user_type == Role::Applicant)
            .cloned()
            .collect())
    }

    async fn get_profile(&self, user_id: Uuid) -> Result<Option<Profile>, StoreError> {
        Ok(self.tables.lock().unwrap().profiles.get(&user_id).cloned())
    }

    async fn replace_profile(&self, profile: &Profile) -> Result<(), StoreError> {
        let mut tables = self.tables.lock().unwrap();
        match tables.profiles.get_mut(&profile.user_id) {
            Some(existing) => {
                *existing = Profile {
                    id: existing.id,
                    updated_at: Utc::now(),
                    ..profile.clone()
                };
                Ok(())
            }
            None => Err(StoreError::ProfileNotFound(profile.user_id)),
        }
    }

    async fn create_job(&self, job: &Job) -> Result<(), StoreError> {
        self.tables.lock().unwrap().jobs.push(job.clone());
        Ok(())
    }

    async fn get_job(&self, job_id: Uuid) -> Result<Option<Job>, StoreError> {
        let tables = self.tables.lock().unwrap();
        Ok(tables.jobs.iter().find(|j| j.id == job_id).cloned())
    }

    async fn list_jobs(&self) -> Result<Vec<Job>, StoreError> {
        let mut jobs = self.tables.lock().unwrap().jobs.clone();
        jobs.sort_by(|a, b| b.posted_on.cmp(&a.posted_on));
        Ok(jobs)
    }

    async fn job_applicants(&self, job_id: Uuid) -> Result<Vec<ApplicantDetails>, StoreError> {
        let tables = self.tables.lock().unwrap();
        Ok(tables
            .applications
            .iter()
            .filter(|a| a.job_id == job_id)
            .filter_map(|a| tables.users.iter().find(|u| u.id == a.user_id))
            .map(|u| ApplicantDetails {
                id: u.id,
                name: u.name.clone(),
                email: u.email.clone(),
                profile_headline: u.profile_headline.clone(),
            })
            .collect())
    }

    async fn find_application(
        &self,
        user_id: Uuid,
        job_id: Uuid,
    ) -> Result<Option<Application>, StoreError> {
        let tables = self.tables.lock().unwrap();
        Ok(tables
            .applications
            .iter()
            .find(|a| a.user_id == user_id && a.job_id == job_id)
            .cloned())
    }

    async fn insert_application(&self, application: &Application) -> Result<(), StoreError> {
        let mut tables = self.tables.lock().unwrap();
        let exists = tables
            .applications
            .iter()
            .any(|a| a.user_id == application.user_id && a.job_id == application.job_id);
        if exists {
            return Err(StoreError::DuplicateApplication);
        }
        tables.applications.push(application.clone());
        Ok(())
    }
}
