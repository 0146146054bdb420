use std::path::Path;
use std::sync::Arc;

use engine_logging::{engine_error, engine_info, engine_warn};
use harvester_core::{extract_pdf_links, normalize_candidates};
use url::Url;

use crate::config::{ConfigError, HarvestConfig};
use crate::download::Downloader;
use crate::fetch::{Fetcher, ReqwestFetcher};
use crate::pages::collect_pages;
use crate::persist::{ensure_output_dir, AtomicFileWriter, PersistError};
use crate::{DownloadRecord, HarvestReport};

/// Runs the whole pipeline: seed pages, link extraction, normalization, downloads.
///
/// Everything runs sequentially; one request is in flight at a time.
pub struct Harvester {
    config: HarvestConfig,
    base: Url,
    page_fetcher: Arc<dyn Fetcher>,
    downloader: Downloader,
}

impl Harvester {
    pub fn new(config: HarvestConfig) -> Result<Self, ConfigError> {
        let page_fetcher = Arc::new(ReqwestFetcher::new(config.page_fetch.clone()));
        let document_fetcher = Arc::new(ReqwestFetcher::new(config.document_fetch.clone()));
        Self::with_fetchers(config, page_fetcher, document_fetcher)
    }

    pub fn with_fetchers(
        config: HarvestConfig,
        page_fetcher: Arc<dyn Fetcher>,
        document_fetcher: Arc<dyn Fetcher>,
    ) -> Result<Self, ConfigError> {
        let base = config.base_url()?;
        let downloader = Downloader::new(document_fetcher, config.output_dir.clone());
        Ok(Self {
            config,
            base,
            page_fetcher,
            downloader,
        })
    }

    pub fn config(&self) -> &HarvestConfig {
        &self.config
    }

    pub async fn run(&self) -> HarvestReport {
        let mut report = HarvestReport::default();

        if let Err(err) = ensure_output_dir(&self.config.output_dir) {
            engine_error!(
                "Output directory {} unusable, downloads will likely fail: {}",
                self.config.output_dir.display(),
                err
            );
            report.output_dir_error = Some(err.to_string());
        }

        let pages = collect_pages(self.page_fetcher.as_ref(), &self.config.seeds).await;
        report.pages_fetched = pages.bodies.len();
        let text = pages.text();
        report.page_failures = pages.failures;

        if let Some(path) = self.config.page_dump.as_deref() {
            match dump_pages(path, &text) {
                Ok(()) => engine_info!("Wrote page dump to {}", path.display()),
                Err(err) => engine_warn!("Failed to write page dump {}: {}", path.display(), err),
            }
        }

        let links = extract_pdf_links(&text);
        report.links_found = links.len();
        let normalized = normalize_candidates(&links, &self.base);
        for dropped in &normalized.dropped {
            engine_warn!("Skipping malformed link {:?}", dropped);
        }
        report.dropped_links = normalized.dropped;
        engine_info!(
            "Found {} PDF links, {} actionable",
            report.links_found,
            normalized.urls.len()
        );

        for url in normalized.urls {
            let result = self.downloader.download(&url).await;
            report.downloads.push(DownloadRecord { url, result });
        }

        report
    }
}

fn dump_pages(path: &Path, text: &str) -> Result<(), PersistError> {
    let dir = path
        .parent()
        .filter(|parent| !parent.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    let filename = path
        .file_name()
        .and_then(|name| name.to_str())
        .ok_or_else(|| PersistError::OutputDir(format!("not a file path: {}", path.display())))?;
    AtomicFileWriter::new(dir.to_path_buf()).write(filename, text)?;
    Ok(())
}
