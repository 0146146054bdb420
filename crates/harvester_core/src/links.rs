use std::sync::LazyLock;

use regex::Regex;

/// `href="..."` attribute whose value ends in `.pdf`. The first `"` closes the value.
static PDF_HREF: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"href="([^"]+\.pdf)""#).expect("pdf href regex is valid"));

/// Scan raw page text for PDF `href` values, in document order.
///
/// This is a plain pattern scan rather than an HTML parse, so broken markup is
/// fine. Values are returned exactly as written (relative paths stay relative).
pub fn extract_pdf_links(text: &str) -> Vec<String> {
    PDF_HREF
        .captures_iter(text)
        .filter_map(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::extract_pdf_links;

    #[test]
    fn uppercase_extension_is_not_matched() {
        assert!(extract_pdf_links(r#"<a href="/x/SHEET.PDF">"#).is_empty());
    }

    #[test]
    fn single_quoted_href_is_ignored() {
        assert!(extract_pdf_links("<a href='/x/a.pdf'>").is_empty());
    }

    #[test]
    fn query_after_extension_is_not_matched() {
        assert!(extract_pdf_links(r#"<a href="/x/a.pdf?v=2">"#).is_empty());
    }
}
