use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sqlx::FromRow;
use uuid::Uuid;

/// Separator used when flattening extracted skills into the `skills` column.
pub const SKILLS_DELIMITER: &str = ", ";

/// Applicant metadata populated from the most recent parsed resume.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Profile {
    pub id: Uuid,
    pub user_id: Uuid,
    pub resume_file_address: String,
    pub skills: String,
    pub education: Value,
    pub experience: Value,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub updated_at: DateTime<Utc>,
}

impl Profile {
    /// An empty profile, created alongside its account at signup.
    pub fn empty(user_id: Uuid) -> Self {
        Profile {
            id: Uuid::new_v4(),
            user_id,
            resume_file_address: String::new(),
            skills: String::new(),
            education: Value::Array(Vec::new()),
            experience: Value::Array(Vec::new()),
            name: String::new(),
            email: String::new(),
            phone: String::new(),
            updated_at: Utc::now(),
        }
    }

    pub fn skill_list(&self) -> Vec<String> {
        split_skills(&self.skills)
    }
}

pub fn join_skills(skills: &[String]) -> String {
    skills.join(SKILLS_DELIMITER)
}

pub fn split_skills(joined: &str) -> Vec<String> {
    if joined.is_empty() {
        return Vec::new();
    }
    joined.split(SKILLS_DELIMITER).map(String::from).collect()
}
