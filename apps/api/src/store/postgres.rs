use async_trait::async_trait;
use chrono::Utc;
use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;

use crate::models::job::{ApplicantDetails, Application, Job};
use crate::models::profile::Profile;
use crate::models::user::{Account, AccountRow, NewAccount, Role};
use crate::store::{Store, StoreError};

#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn is_unique_violation(err: &sqlx::Error) -> bool {
    err.as_database_error()
        .map(|db| db.is_unique_violation())
        .unwrap_or(false)
}

fn into_account(row: AccountRow) -> Result<Account, StoreError> {
    let id = row.id;
    Account::try_from(row).map_err(|e| StoreError::Corrupt(format!("user {id}: {e}")))
}

#[async_trait]
impl Store for PgStore {
    async fn create_account(&self, account: NewAccount) -> Result<Account, StoreError> {
        let mut tx = self.pool.begin().await?;

        let row = sqlx::query_as::<_, AccountRow>(
            r#"
            INSERT INTO users
                (id, name, email, address, user_type, password_hash, profile_headline)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(&account.name)
        .bind(&account.email)
        .bind(&account.address)
        .bind(account.user_type.as_str())
        .bind(&account.password_hash)
        .bind(&account.profile_headline)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| {
            if is_unique_violation(&e) {
                StoreError::EmailTaken(account.email.clone())
            } else {
                StoreError::Database(e)
            }
        })?;

        let profile = Profile::empty(row.id);
        sqlx::query(
            r#"
            INSERT INTO profiles (id, user_id, education, experience)
            VALUES ($1, $2, $3, $4)
            "#,
        )
        .bind(profile.id)
        .bind(profile.user_id)
        .bind(&profile.education)
        .bind(&profile.experience)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;

        info!("Created {} account {}", account.user_type, row.id);
        into_account(row)
    }

    async fn find_account_by_email(&self, email: &str) -> Result<Option<Account>, StoreError> {
        sqlx::query_as::<_, AccountRow>("SELECT * FROM users WHERE email = $1")
            .bind(email)
            .fetch_optional(&self.pool)
            .await?
            .map(into_account)
            .transpose()
    }

    async fn list_applicants(&self) -> Result<Vec<Account>, StoreError> {
        sqlx::query_as::<_, AccountRow>(
            "SELECT * FROM users WHERE user_type = $1 ORDER BY created_at ASC",
        )
        .bind(Role::Applicant.as_str())
        .fetch_all(&self.pool)
        .await?
        .into_iter()
        .map(into_account)
        .collect()
    }

    async fn get_profile(&self, user_id: Uuid) -> Result<Option<Profile>, StoreError> {
        Ok(
            sqlx::query_as::<_, Profile>("SELECT * FROM profiles WHERE user_id = $1")
                .bind(user_id)
                .fetch_optional(&self.pool)
                .await?,
        )
    }

    async fn replace_profile(&self, profile: &Profile) -> Result<(), StoreError> {
        let result = sqlx::query(
            r#"
            UPDATE profiles
            SET resume_file_address = $2,
                skills = $3,
                education = $4,
                experience = $5,
                name = $6,
                email = $7,
                phone = $8,
                updated_at = $9
            WHERE user_id = $1
            "#,
        )
        .bind(profile.user_id)
        .bind(&profile.resume_file_address)
        .bind(&profile.skills)
        .bind(&profile.education)
        .bind(&profile.experience)
        .bind(&profile.name)
        .bind(&profile.email)
        .bind(&profile.phone)
        .bind(Utc::now())
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(StoreError::ProfileNotFound(profile.user_id));
        }
        Ok(())
    }

    async fn create_job(&self, job: &Job) -> Result<(), StoreError> {
        sqlx::query(
            r#"
            INSERT INTO jobs (id, title, description, company_name, posted_on, posted_by)
            VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(job.id)
        .bind(&job.title)
        .bind(&job.description)
        .bind(&job.company_name)
        .bind(job.posted_on)
        .bind(job.posted_by)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn get_job(&self, job_id: Uuid) -> Result<Option<Job>, StoreError> {
        Ok(sqlx::query_as::<_, Job>("SELECT * FROM jobs WHERE id = $1")
            .bind(job_id)
            .fetch_optional(&self.pool)
            .await?)
    }

    async fn list_jobs(&self) -> Result<Vec<Job>, StoreError> {
        Ok(
            sqlx::query_as::<_, Job>("SELECT * FROM jobs ORDER BY posted_on DESC")
                .fetch_all(&self.pool)
                .await?,
        )
    }

    async fn job_applicants(&self, job_id: Uuid) -> Result<Vec<ApplicantDetails>, StoreError> {
        Ok(sqlx::query_as::<_, ApplicantDetails>(
            r#"
            SELECT u.id, u.name, u.email, u.profile_headline
            FROM job_applications a
            JOIN users u ON u.id = a.user_id
            WHERE a.job_id = $1
            ORDER BY a.application_date ASC
            "#,
        )
        .bind(job_id)
        .fetch_all(&self.pool)
        .await?)
    }

    async fn find_application(
        &self,
        user_id: Uuid,
        job_id: Uuid,
    ) -> Result<Option<Application>, StoreError> {
        Ok(sqlx::query_as::<_, Application>(
            "SELECT * FROM job_applications WHERE user_id = $1 AND job_id = $2",
        )
        .bind(user_id)
        .bind(job_id)
        .fetch_optional(&self.pool)
        .await?)
    }

    async fn insert_application(&self, application: &Application) -> Result<(), StoreError> {
        sqlx::query(
            r#"
            INSERT INTO job_applications (id, user_id, job_id, application_date)
            VALUES ($1, $2, $3, $4)
            "#,
        )
        .bind(application.id)
        .bind(application.user_id)
        .bind(application.job_id)
        .bind(application.application_date)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            if is_unique_violation(&e) {
                StoreError::DuplicateApplication
            } else {
                StoreError::Database(e)
            }
        })?;
        Ok(())
    }
}
