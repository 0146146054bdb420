/// Extension every target filename ends with.
pub const PDF_EXTENSION: &str = ".pdf";

/// Token removed wherever it appears once the name is reduced to `[a-z0-9_]`.
const STRIPPED_TOKEN: &str = "_pdf";

/// Deterministic local filename for a document URL.
///
/// The last path segment is lowercased, every character outside `[a-z0-9]`
/// becomes `_`, runs of `_` collapse, edge underscores are trimmed, every `_pdf`
/// is removed and `.pdf` is appended. URLs sharing a basename in different
/// directories map to the same name.
pub fn target_filename(url: &str) -> String {
    let segment = last_segment(url).to_lowercase();
    // Bare extension is what an empty name sanitizes to; keep it stable.
    if segment == PDF_EXTENSION {
        return segment;
    }

    let mut compacted = String::with_capacity(segment.len());
    let mut prev_underscore = false;
    for c in segment.chars() {
        if c.is_ascii_lowercase() || c.is_ascii_digit() {
            compacted.push(c);
            prev_underscore = false;
        } else {
            if !prev_underscore {
                compacted.push('_');
            }
            prev_underscore = true;
        }
    }

    let mut name = strip_token(compacted.trim_matches('_'));
    if !name.ends_with(PDF_EXTENSION) {
        name.push_str(PDF_EXTENSION);
    }
    name
}

fn last_segment(url: &str) -> &str {
    let trimmed = url.trim_end_matches('/');
    match trimmed.rfind('/') {
        Some(idx) => &trimmed[idx + 1..],
        None => trimmed,
    }
}

/// Removing one `_pdf` can splice a new one together (`a_p_pdfdf`), so repeat
/// until none is left; otherwise re-sanitizing a result would shorten it again.
fn strip_token(input: &str) -> String {
    let mut out = input.to_string();
    while out.contains(STRIPPED_TOKEN) {
        out = out.replace(STRIPPED_TOKEN, "");
    }
    out
}

#[cfg(test)]
mod tests {
    use super::{last_segment, strip_token};

    #[test]
    fn last_segment_ignores_trailing_slash() {
        assert_eq!(last_segment("https://x.com/a/b/"), "b");
        assert_eq!(last_segment("plain"), "plain");
    }

    #[test]
    fn bare_extension_is_a_fixed_point() {
        assert_eq!(super::target_filename(".pdf"), ".pdf");
        assert_eq!(super::target_filename("/docs/.PDF"), ".pdf");
    }

    #[test]
    fn spliced_token_is_stripped_too() {
        assert_eq!(strip_token("a_p_pdfdf"), "a");
    }
}
