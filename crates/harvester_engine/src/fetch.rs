use std::time::Duration;

use engine_logging::engine_trace;
use futures_util::StreamExt;
use reqwest::header::CONTENT_TYPE;
use reqwest::StatusCode;

use crate::{FailureKind, FetchError, FetchMetadata, FetchOutput};

/// Per-request limit for document downloads. Vendor servers can be slow.
pub const DOCUMENT_REQUEST_TIMEOUT: Duration = Duration::from_secs(15 * 60);

/// Media types a document response may declare.
pub const DOCUMENT_CONTENT_TYPES: &[&str] = &["application/pdf", "binary/octet-stream"];

#[derive(Debug, Clone)]
pub struct FetchSettings {
    pub connect_timeout: Duration,
    /// Whole-request limit. `None` waits as long as the server keeps the connection.
    pub request_timeout: Option<Duration>,
    pub redirect_limit: usize,
    /// Accepted media types, compared without parameters. Empty accepts anything,
    /// including a response without a `Content-Type` header.
    pub allowed_content_types: Vec<String>,
}

impl FetchSettings {
    /// Settings for seed pages: no request timeout, any content type.
    pub fn pages() -> Self {
        Self {
            connect_timeout: Duration::from_secs(10),
            request_timeout: None,
            redirect_limit: 10,
            allowed_content_types: Vec::new(),
        }
    }

    /// Settings for PDF downloads: 15 minute limit, PDF-ish content types only.
    pub fn documents() -> Self {
        Self {
            request_timeout: Some(DOCUMENT_REQUEST_TIMEOUT),
            allowed_content_types: DOCUMENT_CONTENT_TYPES
                .iter()
                .map(|ct| ct.to_string())
                .collect(),
            ..Self::pages()
        }
    }
}

impl Default for FetchSettings {
    fn default() -> Self {
        Self::pages()
    }
}

#[async_trait::async_trait]
pub trait Fetcher: Send + Sync {
    async fn fetch(&self, url: &str) -> Result<FetchOutput, FetchError>;
}

#[derive(Debug, Clone)]
pub struct ReqwestFetcher {
    settings: FetchSettings,
}

impl ReqwestFetcher {
    pub fn new(settings: FetchSettings) -> Self {
        Self { settings }
    }

    pub fn settings(&self) -> &FetchSettings {
        &self.settings
    }

    fn build_client(&self) -> Result<reqwest::Client, FetchError> {
        let mut builder = reqwest::Client::builder()
            .connect_timeout(self.settings.connect_timeout)
            .redirect(reqwest::redirect::Policy::limited(
                self.settings.redirect_limit,
            ));
        if let Some(timeout) = self.settings.request_timeout {
            builder = builder.timeout(timeout);
        }
        builder
            .build()
            .map_err(|err| FetchError::new(FailureKind::Network, err.to_string()))
    }

    fn check_content_type(&self, content_type: Option<&str>) -> Result<(), FetchError> {
        if self.settings.allowed_content_types.is_empty() {
            return Ok(());
        }
        let Some(content_type) = content_type else {
            return Err(FetchError::new(
                FailureKind::MissingContentType,
                "response has no content type",
            ));
        };
        // Repeated or combined headers arrive comma-joined; any listed type may match.
        let allowed = content_type.split(',').any(|media_type| {
            let ct = media_type.split(';').next().unwrap_or(media_type).trim();
            self.settings
                .allowed_content_types
                .iter()
                .any(|allowed| allowed.eq_ignore_ascii_case(ct))
        });
        if allowed {
            Ok(())
        } else {
            Err(FetchError::new(
                FailureKind::UnsupportedContentType {
                    content_type: content_type.to_string(),
                },
                format!(
                    "expected one of {}",
                    self.settings.allowed_content_types.join(", ")
                ),
            ))
        }
    }
}

#[async_trait::async_trait]
impl Fetcher for ReqwestFetcher {
    async fn fetch(&self, url: &str) -> Result<FetchOutput, FetchError> {
        let parsed = reqwest::Url::parse(url)
            .map_err(|err| FetchError::new(FailureKind::InvalidUrl, err.to_string()))?;
        let client = self.build_client()?;

        let response = client
            .get(parsed)
            .send()
            .await
            .map_err(map_reqwest_error)?;

        let status = response.status();
        if status != StatusCode::OK {
            return Err(FetchError::new(
                FailureKind::HttpStatus(status.as_u16()),
                status.to_string(),
            ));
        }

        let final_url = response.url().to_string();
        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .map(|value| value.to_string());
        self.check_content_type(content_type.as_deref())?;

        let mut bytes = Vec::new();
        let mut stream = response.bytes_stream();
        while let Some(chunk) = stream.next().await {
            let chunk = chunk.map_err(map_reqwest_error)?;
            bytes.extend_from_slice(&chunk);
            engine_trace!("{}: {} bytes received", url, bytes.len());
        }

        let metadata = FetchMetadata {
            original_url: url.to_string(),
            final_url,
            content_type,
            byte_len: bytes.len() as u64,
        };

        Ok(FetchOutput { bytes, metadata })
    }
}

fn map_reqwest_error(err: reqwest::Error) -> FetchError {
    if err.is_timeout() {
        return FetchError::new(FailureKind::Timeout, err.to_string());
    }
    if err.is_redirect() {
        return FetchError::new(FailureKind::RedirectLimitExceeded, err.to_string());
    }
    FetchError::new(FailureKind::Network, err.to_string())
}
