use std::path::PathBuf;

use harvester_core::DEFAULT_BASE_ORIGIN;
use thiserror::Error;
use url::Url;

use crate::fetch::FetchSettings;

/// Directory the vendor documents are saved into when nothing else is configured.
pub const DEFAULT_OUTPUT_DIR: &str = "PDFs";

#[derive(Debug, Clone)]
pub struct HarvestConfig {
    /// Origin that relative document links resolve against.
    pub base_origin: String,
    pub output_dir: PathBuf,
    /// Pages scanned for document links, fetched in this order.
    pub seeds: Vec<String>,
    pub page_fetch: FetchSettings,
    pub document_fetch: FetchSettings,
    /// When set, the aggregate page text is written here (replaced each run).
    pub page_dump: Option<PathBuf>,
}

impl HarvestConfig {
    pub fn default_with_output(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
            ..Self::default()
        }
    }

    pub fn base_url(&self) -> Result<Url, ConfigError> {
        let url = Url::parse(&self.base_origin).map_err(|err| ConfigError::InvalidBaseOrigin {
            origin: self.base_origin.clone(),
            message: err.to_string(),
        })?;
        if url.host_str().is_none() {
            return Err(ConfigError::InvalidBaseOrigin {
                origin: self.base_origin.clone(),
                message: "origin has no host".into(),
            });
        }
        Ok(url)
    }
}

impl Default for HarvestConfig {
    fn default() -> Self {
        Self {
            base_origin: DEFAULT_BASE_ORIGIN.to_string(),
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            seeds: Vec::new(),
            page_fetch: FetchSettings::pages(),
            document_fetch: FetchSettings::documents(),
            page_dump: None,
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid base origin {origin:?}: {message}")]
    InvalidBaseOrigin { origin: String, message: String },
}
