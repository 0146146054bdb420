use engine_logging::{engine_debug, engine_info, engine_warn};

use crate::decode::decode_page_lossy;
use crate::fetch::Fetcher;
use crate::PageFailure;

/// Separator appended after every page body in the aggregate text.
pub const PAGE_DELIMITER: &str = "\n";

/// Bodies of the seed pages that could be fetched, in seed order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageAggregate {
    pub bodies: Vec<String>,
    pub failures: Vec<PageFailure>,
}

impl PageAggregate {
    /// All bodies as one blob, each followed by [`PAGE_DELIMITER`].
    pub fn text(&self) -> String {
        let capacity = self
            .bodies
            .iter()
            .map(|body| body.len() + PAGE_DELIMITER.len())
            .sum();
        let mut text = String::with_capacity(capacity);
        for body in &self.bodies {
            text.push_str(body);
            text.push_str(PAGE_DELIMITER);
        }
        text
    }
}

/// Fetch every seed page in order. A failed page is logged and recorded; the
/// remaining seeds are still fetched.
pub async fn collect_pages<S: AsRef<str>>(fetcher: &dyn Fetcher, seeds: &[S]) -> PageAggregate {
    let mut aggregate = PageAggregate::default();
    for seed in seeds {
        let url = seed.as_ref();
        engine_info!("Scraping {}", url);
        match fetcher.fetch(url).await {
            Ok(output) => {
                let page = decode_page_lossy(&output.bytes, output.metadata.content_type.as_deref());
                engine_debug!(
                    "Fetched {} ({} bytes, {})",
                    output.metadata.final_url,
                    output.metadata.byte_len,
                    page.encoding_label
                );
                aggregate.bodies.push(page.text);
            }
            Err(error) => {
                engine_warn!("Failed to fetch page {}: {}", url, error);
                aggregate.failures.push(PageFailure {
                    url: url.to_string(),
                    error,
                });
            }
        }
    }
    aggregate
}

#[cfg(test)]
mod tests {
    use super::PageAggregate;

    #[test]
    fn text_terminates_every_body() {
        let aggregate = PageAggregate {
            bodies: vec!["<a>".to_string(), String::new(), "<b>".to_string()],
            failures: Vec::new(),
        };
        assert_eq!(aggregate.text(), "<a>\n\n<b>\n");
    }

    #[test]
    fn empty_aggregate_is_empty_text() {
        assert_eq!(PageAggregate::default().text(), "");
    }
}
