//! Harvester core: pure link extraction, URL normalization and filename rules.
mod filename;
mod links;
mod normalize;

pub use filename::{target_filename, PDF_EXTENSION};
pub use links::extract_pdf_links;
pub use normalize::{
    dedupe_preserving_order, has_host, normalize_candidates, normalize_url, NormalizedLinks,
    DEFAULT_BASE_ORIGIN,
};
