use std::path::{Path, PathBuf};
use std::sync::Arc;

use engine_logging::{engine_error, engine_info, engine_warn};
use harvester_core::target_filename;

use crate::fetch::Fetcher;
use crate::persist::{AtomicFileWriter, PersistError};
use crate::{DownloadError, DownloadOutcome};

/// Turns one document URL into at most one file in the output directory.
///
/// Calls are expected one at a time. The existence check is a fast path; the
/// no-clobber rename in [`AtomicFileWriter::write_new`] is the actual guard.
pub struct Downloader {
    fetcher: Arc<dyn Fetcher>,
    writer: AtomicFileWriter,
}

impl Downloader {
    pub fn new(fetcher: Arc<dyn Fetcher>, output_dir: PathBuf) -> Self {
        Self {
            fetcher,
            writer: AtomicFileWriter::new(output_dir),
        }
    }

    pub fn output_dir(&self) -> &Path {
        self.writer.dir()
    }

    pub async fn download(&self, url: &str) -> Result<DownloadOutcome, DownloadError> {
        let filename = target_filename(url);
        let path = self.writer.target(&filename);

        if path.is_file() {
            engine_info!("File already exists, skipping: {}", path.display());
            return Ok(DownloadOutcome::AlreadyPresent { path });
        }

        let output = match self.fetcher.fetch(url).await {
            Ok(output) => output,
            Err(err) => {
                engine_warn!("Failed to download {}: {}", url, err);
                return Err(err.into());
            }
        };

        if output.bytes.is_empty() {
            engine_warn!("Downloaded 0 bytes for {}; not creating file", url);
            return Err(DownloadError::EmptyBody);
        }

        let bytes = output.bytes.len() as u64;
        let final_url = output.metadata.final_url;
        if final_url != url {
            engine_info!("{} redirected to {}", url, final_url);
        }
        match self.writer.write_new(&filename, &output.bytes) {
            Ok(path) => {
                engine_info!(
                    "Successfully downloaded {} bytes: {} -> {}",
                    bytes,
                    url,
                    path.display()
                );
                Ok(DownloadOutcome::Downloaded {
                    path,
                    bytes,
                    final_url,
                })
            }
            Err(PersistError::AlreadyExists(path)) => {
                engine_info!("File appeared while downloading, keeping it: {}", path.display());
                Ok(DownloadOutcome::AlreadyPresent { path })
            }
            Err(err) => {
                engine_error!("Failed to write PDF for {}: {}", url, err);
                Err(err.into())
            }
        }
    }
}
