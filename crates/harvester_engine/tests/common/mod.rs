use std::sync::atomic::{AtomicUsize, Ordering};

use harvester_engine::{FailureKind, FetchError, FetchMetadata, FetchOutput, Fetcher};

/// Fetcher that counts calls and answers every request with a fixed PDF body.
#[derive(Default)]
pub struct CountingFetcher {
    calls: AtomicUsize,
}

impl CountingFetcher {
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait::async_trait]
impl Fetcher for CountingFetcher {
    async fn fetch(&self, url: &str) -> Result<FetchOutput, FetchError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if url.contains("unreachable") {
            return Err(FetchError {
                kind: FailureKind::Network,
                message: "connection refused".to_string(),
            });
        }
        let bytes = b"%PDF-1.4 fake".to_vec();
        Ok(FetchOutput {
            metadata: FetchMetadata {
                original_url: url.to_string(),
                final_url: url.to_string(),
                content_type: Some("application/pdf".to_string()),
                byte_len: bytes.len() as u64,
            },
            bytes,
        })
    }
}
