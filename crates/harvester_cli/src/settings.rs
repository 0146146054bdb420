use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::Context;
use harvester_engine::HarvestConfig;
use serde::Deserialize;

use crate::logging::DEFAULT_LOG_FILE;
use crate::seeds::builtin_seeds;

/// Settings file looked up in the working directory when no path is given.
pub const DEFAULT_SETTINGS_FILE: &str = "harvester.ron";

/// Optional overrides read from a RON file. Every field may be omitted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub output_dir: Option<PathBuf>,
    pub base_origin: Option<String>,
    pub seeds: Option<Vec<String>>,
    pub page_timeout_secs: Option<u64>,
    pub download_timeout_secs: Option<u64>,
    pub accepted_content_types: Option<Vec<String>>,
    pub page_dump: Option<PathBuf>,
    pub log_level: Option<String>,
    /// `None` logs to `harvester.log`; an empty path disables the log file.
    pub log_file: Option<PathBuf>,
}

impl Settings {
    /// Read settings from `path`. A missing file yields `Ok(None)`.
    pub fn load(path: &Path) -> anyhow::Result<Option<Self>> {
        let text = match fs::read_to_string(path) {
            Ok(text) => text,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(err) => {
                return Err(err).with_context(|| format!("reading settings {}", path.display()))
            }
        };
        let settings = ron::from_str(&text)
            .with_context(|| format!("parsing settings {}", path.display()))?;
        Ok(Some(settings))
    }

    pub fn log_level(&self) -> log::LevelFilter {
        self.log_level
            .as_deref()
            .map(engine_logging::level_from_name)
            .unwrap_or(log::LevelFilter::Info)
    }

    pub fn log_file(&self) -> Option<PathBuf> {
        match &self.log_file {
            Some(path) if path.as_os_str().is_empty() => None,
            Some(path) => Some(path.clone()),
            None => Some(PathBuf::from(DEFAULT_LOG_FILE)),
        }
    }

    pub fn into_config(self) -> HarvestConfig {
        let mut config = HarvestConfig::default();
        if let Some(dir) = self.output_dir {
            config.output_dir = dir;
        }
        if let Some(origin) = self.base_origin {
            config.base_origin = origin;
        }
        config.seeds = self.seeds.unwrap_or_else(builtin_seeds);
        if let Some(secs) = self.page_timeout_secs {
            config.page_fetch.request_timeout = Some(Duration::from_secs(secs));
        }
        if let Some(secs) = self.download_timeout_secs {
            config.document_fetch.request_timeout = Some(Duration::from_secs(secs));
        }
        if let Some(types) = self.accepted_content_types {
            config.document_fetch.allowed_content_types = types;
        }
        config.page_dump = self.page_dump;
        config
    }
}
