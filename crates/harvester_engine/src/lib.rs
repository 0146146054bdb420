//! Harvester engine: page fetching, document downloads and the run pipeline.
mod config;
mod decode;
mod download;
mod engine;
mod fetch;
mod pages;
mod persist;
mod types;

pub use config::{ConfigError, HarvestConfig, DEFAULT_OUTPUT_DIR};
pub use decode::{decode_page_lossy, DecodedPage};
pub use download::Downloader;
pub use engine::Harvester;
pub use fetch::{
    FetchSettings, Fetcher, ReqwestFetcher, DOCUMENT_CONTENT_TYPES, DOCUMENT_REQUEST_TIMEOUT,
};
pub use pages::{collect_pages, PageAggregate, PAGE_DELIMITER};
pub use persist::{ensure_output_dir, AtomicFileWriter, PersistError};
pub use types::{
    DownloadError, DownloadOutcome, DownloadRecord, FailureKind, FetchError, FetchMetadata,
    FetchOutput, HarvestReport, PageFailure,
};
