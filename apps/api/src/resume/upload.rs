use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use tokio::io::AsyncWriteExt;
use uuid::Uuid;

/// Extensions accepted for resumes, matched exactly as received.
pub const ALLOWED_EXTENSIONS: [&str; 2] = [".pdf", ".docx"];

/// Name collisions tolerated before giving up on a single upload.
const MAX_NAME_ATTEMPTS: u32 = 100;

/// Returns the file's extension including the leading dot, if it has one.
pub fn file_extension(file_name: &str) -> Option<&str> {
    let name = Path::new(file_name).file_name()?.to_str()?;
    let dot = name.rfind('.')?;
    Some(&name[dot..])
}

/// Checks the extension against [`ALLOWED_EXTENSIONS`]. Case-sensitive: `.PDF` is rejected.
pub fn validate_extension(file_name: &str) -> Result<&str, String> {
    match file_extension(file_name) {
        Some(ext) if ALLOWED_EXTENSIONS.contains(&ext) => Ok(ext),
        Some(ext) => Err(ext.to_string()),
        None => Err(String::new()),
    }
}

/// `{user_id}-{unix_timestamp}{ext}`, or `{user_id}-{unix_timestamp}-{n}{ext}` on retry.
pub fn stored_file_name(user_id: Uuid, at: DateTime<Utc>, ext: &str, attempt: u32) -> String {
    match attempt {
        0 => format!("{user_id}-{}{ext}", at.timestamp()),
        n => format!("{user_id}-{}-{n}{ext}", at.timestamp()),
    }
}

/// Writes `bytes` under `dir`, creating the directory if needed. Never overwrites.
pub async fn persist(
    dir: &Path,
    user_id: Uuid,
    ext: &str,
    bytes: &[u8],
) -> std::io::Result<PathBuf> {
    tokio::fs::create_dir_all(dir).await?;
    let now = Utc::now();

    for attempt in 0..MAX_NAME_ATTEMPTS {
        let path = dir.join(stored_file_name(user_id, now, ext, attempt));
        let mut file = match tokio::fs::OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&path)
            .await
        {
            Ok(file) => file,
            Err(e) if e.kind() == ErrorKind::AlreadyExists => continue,
            Err(e) => return Err(e),
        };
        file.write_all(bytes).await?;
        file.flush().await?;
        return Ok(path);
    }

    Err(std::io::Error::new(
        ErrorKind::AlreadyExists,
        format!("no free file name for user {user_id} after {MAX_NAME_ATTEMPTS} attempts"),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extension_extraction() {
        assert_eq!(file_extension("cv.pdf"), Some(".pdf"));
        assert_eq!(file_extension("my.cv.docx"), Some(".docx"));
        assert_eq!(file_extension("../../etc/cv.pdf"), Some(".pdf"));
        assert_eq!(file_extension("README"), None);
    }

    #[test]
    fn test_only_pdf_and_docx_pass() {
        assert_eq!(validate_extension("cv.pdf"), Ok(".pdf"));
        assert_eq!(validate_extension("cv.docx"), Ok(".docx"));
        assert_eq!(validate_extension("cv.png"), Err(".png".to_string()));
        assert_eq!(validate_extension("cv.PDF"), Err(".PDF".to_string()));
        assert_eq!(validate_extension("cv"), Err(String::new()));
    }

    #[test]
    fn test_stored_name_scheme() {
        let user_id = Uuid::new_v4();
        let at = DateTime::from_timestamp(1_700_000_000, 0).unwrap();
        assert_eq!(
            stored_file_name(user_id, at, ".pdf", 0),
            format!("{user_id}-1700000000.pdf")
        );
        assert_eq!(
            stored_file_name(user_id, at, ".pdf", 2),
            format!("{user_id}-1700000000-2.pdf")
        );
    }

    #[tokio::test]
    async fn test_persist_creates_dir_and_never_overwrites() {
        let root = tempfile::tempdir().unwrap();
        let dir = root.path().join("uploads");
        let user_id = Uuid::new_v4();

        let first = persist(&dir, user_id, ".pdf", b"first").await.unwrap();
        let second = persist(&dir, user_id, ".pdf", b"second").await.unwrap();

        assert_ne!(first, second);
        assert_eq!(tokio::fs::read(&first).await.unwrap(), b"first");
        assert_eq!(tokio::fs::read(&second).await.unwrap(), b"second");
    }
}
