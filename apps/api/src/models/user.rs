use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// The two account roles. Closed set; there is no role-change operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Role {
    Admin,
    Applicant,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "Admin",
            Role::Applicant => "Applicant",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown role '{0}', expected 'Admin' or 'Applicant'")]
pub struct UnknownRole(pub String);

impl FromStr for Role {
    type Err = UnknownRole;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Admin" => Ok(Role::Admin),
            "Applicant" => Ok(Role::Applicant),
            other => Err(UnknownRole(other.to_string())),
        }
    }
}

/// An account as returned to callers. The password hash never leaves the server.
#[derive(Debug, Clone, Serialize)]
pub struct Account {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub address: String,
    pub user_type: Role,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub profile_headline: String,
    pub created_at: DateTime<Utc>,
}

/// Raw `users` row; `user_type` is stored as text and checked on the way out.
#[derive(Debug, Clone, FromRow)]
pub struct AccountRow {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub address: String,
    pub user_type: String,
    pub password_hash: String,
    pub profile_headline: String,
    pub created_at: DateTime<Utc>,
}

impl TryFrom<AccountRow> for Account {
    type Error = UnknownRole;

    fn try_from(row: AccountRow) -> Result<Self, Self::Error> {
        Ok(Account {
            id: row.id,
            name: row.name,
            email: row.email,
            address: row.address,
            user_type: row.user_type.parse()?,
            password_hash: row.password_hash,
            profile_headline: row.profile_headline,
            created_at: row.created_at,
        })
    }
}

/// Everything needed to insert an account. The password is already hashed.
#[derive(Debug, Clone)]
pub struct NewAccount {
    pub name: String,
    pub email: String,
    pub address: String,
    pub user_type: Role,
    pub password_hash: String,
    pub profile_headline: String,
}

#[derive(Debug, Deserialize)]
pub struct SignUpRequest {
    #[serde(default)]
    pub name: String,
    pub email: String,
    pub password: String,
    pub user_type: String,
    #[serde(default)]
    pub profile_headline: String,
    #[serde(default)]
    pub address: String,
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}
