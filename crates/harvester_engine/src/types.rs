use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

use crate::persist::PersistError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchOutput {
    pub bytes: Vec<u8>,
    pub metadata: FetchMetadata,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchMetadata {
    pub original_url: String,
    /// URL the body was served from after redirects.
    pub final_url: String,
    pub content_type: Option<String>,
    pub byte_len: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{kind}: {message}")]
pub struct FetchError {
    pub kind: FailureKind,
    pub message: String,
}

impl FetchError {
    pub(crate) fn new(kind: FailureKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailureKind {
    InvalidUrl,
    HttpStatus(u16),
    Timeout,
    RedirectLimitExceeded,
    UnsupportedContentType { content_type: String },
    MissingContentType,
    Network,
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureKind::InvalidUrl => write!(f, "invalid url"),
            FailureKind::HttpStatus(code) => write!(f, "http status {code}"),
            FailureKind::Timeout => write!(f, "timeout"),
            FailureKind::RedirectLimitExceeded => write!(f, "redirect limit exceeded"),
            FailureKind::UnsupportedContentType { content_type } => {
                write!(f, "unsupported content type {content_type}")
            }
            FailureKind::MissingContentType => write!(f, "missing content type"),
            FailureKind::Network => write!(f, "network error"),
        }
    }
}

/// What a successful download call did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DownloadOutcome {
    /// A new file was written. `final_url` differs from the requested URL
    /// when the server redirected.
    Downloaded {
        path: PathBuf,
        bytes: u64,
        final_url: String,
    },
    /// The target file was already on disk; nothing was fetched or written.
    AlreadyPresent { path: PathBuf },
}

#[derive(Debug, Error)]
pub enum DownloadError {
    #[error("fetch failed: {0}")]
    Fetch(#[from] FetchError),
    #[error("response body was empty")]
    EmptyBody,
    #[error("persist failed: {0}")]
    Persist(#[from] PersistError),
}

/// A seed page that could not be fetched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageFailure {
    pub url: String,
    pub error: FetchError,
}

#[derive(Debug)]
pub struct DownloadRecord {
    pub url: String,
    pub result: Result<DownloadOutcome, DownloadError>,
}

/// Summary of one harvest run.
#[derive(Debug, Default)]
pub struct HarvestReport {
    pub pages_fetched: usize,
    pub page_failures: Vec<PageFailure>,
    /// Raw `.pdf` hrefs found in the aggregate text, duplicates included.
    pub links_found: usize,
    /// Unique links that could not be turned into an absolute URL.
    pub dropped_links: Vec<String>,
    /// Set when the output directory could not be prepared. The run still
    /// attempts every download.
    pub output_dir_error: Option<String>,
    pub downloads: Vec<DownloadRecord>,
}

impl HarvestReport {
    pub fn downloaded_count(&self) -> usize {
        self.count(|result| matches!(result, Ok(DownloadOutcome::Downloaded { .. })))
    }

    pub fn already_present_count(&self) -> usize {
        self.count(|result| matches!(result, Ok(DownloadOutcome::AlreadyPresent { .. })))
    }

    pub fn failed_count(&self) -> usize {
        self.count(Result::is_err)
    }

    fn count(&self, pred: impl Fn(&Result<DownloadOutcome, DownloadError>) -> bool) -> usize {
        self.downloads
            .iter()
            .filter(|record| pred(&record.result))
            .count()
    }
}
