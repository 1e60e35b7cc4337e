//! Resume ingestion: type check → persist → external parse → merge into profile.
//!
//! Each step gates the next. The file is written only after the type check passes,
//! and it stays on disk if parsing or the profile write fails afterwards.

use std::path::Path;

use bytes::Bytes;
use serde_json::Value;
use thiserror::Error;
use tracing::{info, warn};
use uuid::Uuid;

use crate::models::profile::{join_skills, Profile};
use crate::resume::parser::{ParsedResume, ParserError, ResumeParser};
use crate::resume::upload::{persist, validate_extension};
use crate::store::{Store, StoreError};

#[derive(Debug, Error)]
pub enum IngestError {
    #[error("unsupported file extension '{0}'")]
    UnsupportedType(String),

    #[error("could not store uploaded file: {0}")]
    Storage(#[from] std::io::Error),

    #[error(transparent)]
    Parser(#[from] ParserError),

    #[error(transparent)]
    Store(#[from] StoreError),
}

/// A resume already pulled out of the request and size-checked.
#[derive(Debug, Clone)]
pub struct UploadedFile {
    pub file_name: String,
    pub bytes: Bytes,
}

pub struct Ingestion<'a> {
    pub store: &'a dyn Store,
    pub parser: &'a dyn ResumeParser,
    pub upload_dir: &'a Path,
}

impl Ingestion<'_> {
    pub async fn run(&self, user_id: Uuid, file: UploadedFile) -> Result<Profile, IngestError> {
        let ext = validate_extension(&file.file_name).map_err(IngestError::UnsupportedType)?;

        let path = persist(self.upload_dir, user_id, ext, &file.bytes).await?;
        let stored_at = path.to_string_lossy().into_owned();
        info!("Stored resume for user {user_id} at {stored_at}");

        let parsed = match self.parser.parse(file.bytes.clone()).await {
            Ok(parsed) => parsed,
            Err(e) => {
                warn!("Resume parsing failed for user {user_id}; keeping {stored_at}: {e}");
                return Err(e.into());
            }
        };

        let existing = self
            .store
            .get_profile(user_id)
            .await?
            .ok_or(StoreError::ProfileNotFound(user_id))?;

        let profile = merge_parsed(existing, stored_at, parsed);
        self.store.replace_profile(&profile).await?;

        info!("Updated profile for user {user_id} from parsed resume");
        Ok(profile)
    }
}

/// Overwrites every resume-derived field of `profile` with the parser's output.
pub fn merge_parsed(profile: Profile, resume_path: String, parsed: ParsedResume) -> Profile {
    Profile {
        resume_file_address: resume_path,
        skills: join_skills(&parsed.skills),
        education: Value::Array(parsed.education),
        experience: Value::Array(parsed.experience),
        name: parsed.name,
        email: parsed.email,
        phone: parsed.phone,
        ..profile
    }
}
