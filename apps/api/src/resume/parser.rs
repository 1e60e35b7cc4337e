//! Client for the third-party resume parsing service.
//!
//! The service takes the raw file as `application/octet-stream` with an `apikey`
//! header and answers 200 with the extracted fields. Every other outcome, including
//! hitting the request timeout, is a [`ParserError`]. No retries.

use std::time::Duration;

use async_trait::async_trait;
use bytes::Bytes;
use reqwest::{header::CONTENT_TYPE, Client};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use thiserror::Error;
use tracing::{debug, warn};

#[derive(Debug, Error)]
pub enum ParserError {
    #[error("request to resume parser failed: {0}")]
    Transport(#[source] reqwest::Error),

    #[error("resume parser timed out")]
    Timeout,

    #[error("resume parser returned status {status}")]
    Status { status: u16 },

    #[error("resume parser returned an undecodable body: {0}")]
    Decode(#[from] serde_json::Error),
}

impl From<reqwest::Error> for ParserError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            ParserError::Timeout
        } else {
            ParserError::Transport(err)
        }
    }
}

/// Fields extracted from a resume. Anything the service omits or sends as `null`
/// defaults to empty.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ParsedResume {
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub email: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub phone: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub skills: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub education: Vec<Value>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub experience: Vec<Value>,
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Carried in `AppState` as `Arc<dyn ResumeParser>`.
#[async_trait]
pub trait ResumeParser: Send + Sync {
    async fn parse(&self, file: Bytes) -> Result<ParsedResume, ParserError>;
}

#[derive(Clone)]
pub struct HttpResumeParser {
    client: Client,
    url: String,
    api_key: String,
}

impl HttpResumeParser {
    pub fn new(url: String, api_key: String, timeout: Duration) -> Result<Self, ParserError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(ParserError::Transport)?;
        Ok(Self {
            client,
            url,
            api_key,
        })
    }
}

#[async_trait]
impl ResumeParser for HttpResumeParser {
    async fn parse(&self, file: Bytes) -> Result<ParsedResume, ParserError> {
        let response = self
            .client
            .post(&self.url)
            .header(CONTENT_TYPE, "application/octet-stream")
            .header("apikey", &self.api_key)
            .body(file)
            .send()
            .await?;

        let status = response.status();
        let body = response.bytes().await?;

        if status != reqwest::StatusCode::OK {
            warn!(
                "Resume parser returned {}: {}",
                status,
                String::from_utf8_lossy(&body)
            );
            return Err(ParserError::Status {
                status: status.as_u16(),
            });
        }

        let parsed: ParsedResume = serde_json::from_slice(&body)?;
        debug!(
            "Resume parser extracted {} skills, {} education and {} experience entries",
            parsed.skills.len(),
            parsed.education.len(),
            parsed.experience.len()
        );
        Ok(parsed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{body_bytes, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn parser_for(server: &MockServer, timeout: Duration) -> HttpResumeParser {
        HttpResumeParser::new(
            format!("{}/resume_parser/upload", server.uri()),
            "test-api-key".to_string(),
            timeout,
        )
        .unwrap()
    }

    #[tokio::test]
    async fn test_posts_raw_bytes_with_api_key() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/resume_parser/upload"))
            .and(header("apikey", "test-api-key"))
            .and(header("content-type", "application/octet-stream"))
            .and(body_bytes(b"%PDF-1.4 fake".to_vec()))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "name": "Jo Doe",
                "email": "jo@example.com",
                "phone": "555-0100",
                "skills": ["Go", "SQL"],
                "education": [{"name": "State University"}],
                "experience": [{"title": "Engineer", "organization": "Acme"}]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let parsed = parser_for(&server, Duration::from_secs(5))
            .parse(Bytes::from_static(b"%PDF-1.4 fake"))
            .await
            .unwrap();

        assert_eq!(parsed.name, "Jo Doe");
        assert_eq!(parsed.skills, vec!["Go", "SQL"]);
        assert_eq!(parsed.education.len(), 1);
        assert_eq!(parsed.experience[0]["organization"], "Acme");
    }

    #[tokio::test]
    async fn test_missing_fields_default_to_empty() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(serde_json::json!({"name": "Jo"})),
            )
            .mount(&server)
            .await;

        let parsed = parser_for(&server, Duration::from_secs(5))
            .parse(Bytes::from_static(b"x"))
            .await
            .unwrap();
        assert_eq!(parsed.name, "Jo");
        assert!(parsed.skills.is_empty());
        assert!(parsed.education.is_empty());
    }

    #[tokio::test]
    async fn test_null_fields_read_as_empty() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "name": "Jo Doe",
                "email": null,
                "phone": null,
                "skills": ["Go"],
                "education": null,
                "experience": []
            })))
            .mount(&server)
            .await;

        let parsed = parser_for(&server, Duration::from_secs(5))
            .parse(Bytes::from_static(b"x"))
            .await
            .unwrap();
        assert_eq!(parsed.name, "Jo Doe");
        assert_eq!(parsed.email, "");
        assert_eq!(parsed.phone, "");
        assert_eq!(parsed.skills, vec!["Go"]);
        assert!(parsed.education.is_empty());
        assert!(parsed.experience.is_empty());
    }

    #[tokio::test]
    async fn test_non_200_is_status_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(401).set_body_string("bad key"))
            .mount(&server)
            .await;

        let err = parser_for(&server, Duration::from_secs(5))
            .parse(Bytes::from_static(b"x"))
            .await
            .unwrap_err();
        assert!(matches!(err, ParserError::Status { status: 401 }));
    }

    #[tokio::test]
    async fn test_slow_service_times_out() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(serde_json::json!({}))
                    .set_delay(Duration::from_secs(2)),
            )
            .mount(&server)
            .await;

        let err = parser_for(&server, Duration::from_millis(200))
            .parse(Bytes::from_static(b"x"))
            .await
            .unwrap_err();
        assert!(matches!(err, ParserError::Timeout), "{err:?}");
    }

    #[tokio::test]
    async fn test_garbage_body_is_decode_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
            .mount(&server)
            .await;

        let err = parser_for(&server, Duration::from_secs(5))
            .parse(Bytes::from_static(b"x"))
            .await
            .unwrap_err();
        assert!(matches!(err, ParserError::Decode(_)));
    }
}
