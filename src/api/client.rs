//! HTTP client for the classification backend.
//!
//! [`HttpBackend`] is the real `reqwest` implementation; the
//! [`AnalysisBackend`] trait is the seam that lets the core and TUI be
//! tested without a network.

use std::fmt;
use std::path::Path;

use async_trait::async_trait;
use log::{debug, info, warn};
use serde::Serialize;
use serde::de::DeserializeOwned;

use super::types::{AnalysisResponse, ServiceHealth};

/// Errors from backend operations.
#[derive(Debug)]
pub enum ApiError {
    /// Network-level failure (connection refused, DNS, timeout).
    Network(String),
    /// The backend answered with a non-2xx status. `message` is the
    /// server-provided error text when the body carried one.
    Api { status: u16, message: String },
    /// The response body did not match the documented shape.
    Parse(String),
    /// Local file could not be read for upload.
    Io(String),
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::Network(msg) => write!(f, "network error: {msg}"),
            ApiError::Api { status, message } => {
                write!(f, "backend error (HTTP {status}): {message}")
            }
            ApiError::Parse(msg) => write!(f, "parse error: {msg}"),
            ApiError::Io(msg) => write!(f, "file error: {msg}"),
        }
    }
}

impl std::error::Error for ApiError {}

impl ApiError {
    /// Text for the error banner. Backend-reported messages and local file
    /// errors are shown verbatim; transport and parse failures collapse to
    /// the caller's generic fallback (the details still go to the log).
    pub fn user_message(&self, fallback: &str) -> String {
        match self {
            ApiError::Api { message, .. } if !message.is_empty() => message.clone(),
            ApiError::Io(msg) => msg.clone(),
            _ => fallback.to_string(),
        }
    }
}

/// Request body for `POST /api/identify`.
#[derive(Serialize, Debug)]
struct IdentifyRequest<'a> {
    text: &'a str,
}

/// Error body the backend attaches to non-2xx responses.
#[derive(serde::Deserialize, Debug)]
struct ErrorBody {
    error: String,
}

/// The two analysis calls plus the health probe, abstracted so tests can
/// substitute a stub.
#[async_trait]
pub trait AnalysisBackend: Send + Sync {
    /// Short name for logs and the title bar.
    fn name(&self) -> &str;

    /// Classify raw clinical text.
    async fn identify(&self, text: &str) -> Result<AnalysisResponse, ApiError>;

    /// Upload a document (PDF/DOCX/TXT) for extraction + classification.
    async fn upload(&self, path: &Path) -> Result<AnalysisResponse, ApiError>;

    /// Probe `GET /` for service metadata. Non-fatal if it fails.
    async fn health(&self) -> Result<ServiceHealth, ApiError>;
}

/// `reqwest`-backed implementation of [`AnalysisBackend`].
pub struct HttpBackend {
    base_url: String,
    client: reqwest::Client,
}

impl HttpBackend {
    pub fn new(base_url: String) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client: reqwest::Client::new(),
        }
    }

    /// Resolve a response into `T`, turning non-2xx statuses into
    /// `ApiError::Api` with the server's `{"error": ...}` message when the
    /// body carries one.
    async fn read_response<T: DeserializeOwned>(
        response: reqwest::Response,
    ) -> Result<T, ApiError> {
        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;

        if !status.is_success() {
            let message = serde_json::from_str::<ErrorBody>(&body)
                .map(|b| b.error)
                .unwrap_or_else(|_| body.clone());
            warn!("Backend error: HTTP {} - {}", status.as_u16(), message);
            return Err(ApiError::Api {
                status: status.as_u16(),
                message,
            });
        }

        serde_json::from_str(&body).map_err(|e| {
            warn!("Failed to parse backend response: {e}");
            ApiError::Parse(e.to_string())
        })
    }
}

#[async_trait]
impl AnalysisBackend for HttpBackend {
    fn name(&self) -> &str {
        &self.base_url
    }

    async fn identify(&self, text: &str) -> Result<AnalysisResponse, ApiError> {
        info!("POST /api/identify ({} chars)", text.len());
        let response = self
            .client
            .post(format!("{}/api/identify", self.base_url))
            .json(&IdentifyRequest { text })
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;

        debug!("identify response status: {}", response.status());
        Self::read_response(response).await
    }

    async fn upload(&self, path: &Path) -> Result<AnalysisResponse, ApiError> {
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "upload".to_string());

        let bytes = tokio::fs::read(path)
            .await
            .map_err(|e| ApiError::Io(format!("could not read {}: {e}", path.display())))?;

        info!("POST /api/upload ({}, {} bytes)", file_name, bytes.len());
        let part = reqwest::multipart::Part::bytes(bytes).file_name(file_name);
        let form = reqwest::multipart::Form::new().part("file", part);

        let response = self
            .client
            .post(format!("{}/api/upload", self.base_url))
            .multipart(form)
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;

        debug!("upload response status: {}", response.status());
        Self::read_response(response).await
    }

    async fn health(&self) -> Result<ServiceHealth, ApiError> {
        let response = self
            .client
            .get(format!("{}/", self.base_url))
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;

        Self::read_response(response).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_url_trailing_slash_is_trimmed() {
        let backend = HttpBackend::new("http://localhost:5000/".to_string());
        assert_eq!(backend.name(), "http://localhost:5000");
    }

    #[test]
    fn user_message_shows_backend_errors_verbatim() {
        let err = ApiError::Api {
            status: 400,
            message: "Document text must be at least 50 characters".to_string(),
        };
        assert_eq!(
            err.user_message("Failed to identify components"),
            "Document text must be at least 50 characters"
        );
    }

    #[test]
    fn user_message_falls_back_for_transport_and_parse_errors() {
        let fallback = "Failed to identify components";
        let network = ApiError::Network("connection refused".to_string());
        let parse = ApiError::Parse("expected value at line 1".to_string());
        assert_eq!(network.user_message(fallback), fallback);
        assert_eq!(parse.user_message(fallback), fallback);
    }

    #[test]
    fn user_message_shows_file_errors_verbatim() {
        let err = ApiError::Io("could not read /tmp/x.pdf: not found".to_string());
        assert_eq!(
            err.user_message("Failed to process file"),
            "could not read /tmp/x.pdf: not found"
        );
    }

    #[test]
    fn identify_request_serializes_text_field() {
        let req = IdentifyRequest { text: "hello" };
        assert_eq!(serde_json::to_string(&req).unwrap(), r#"{"text":"hello"}"#);
    }
}
