use std::collections::HashSet;

use url::Url;

/// Origin that relative document links on the vendor site resolve against.
pub const DEFAULT_BASE_ORIGIN: &str = "https://www.nclonline.com";

/// Keep only the first occurrence of each string, in input order.
///
/// Comparison is exact: no case folding, no percent-decoding.
pub fn dedupe_preserving_order<S: AsRef<str>>(items: &[S]) -> Vec<String> {
    let mut seen = HashSet::with_capacity(items.len());
    items
        .iter()
        .map(AsRef::<str>::as_ref)
        .filter(|item| seen.insert(*item))
        .map(str::to_string)
        .collect()
}

/// True when `raw` parses as an absolute URL carrying a non-empty host.
pub fn has_host(raw: &str) -> bool {
    Url::parse(raw)
        .ok()
        .and_then(|url| url.host_str().map(|host| !host.is_empty()))
        .unwrap_or(false)
}

/// Turn a candidate link into an absolute URL, or `None` when it is not actionable.
///
/// Absolute candidates are returned unchanged. A root-relative path gets the
/// origin of `base` prepended verbatim, so its text (and therefore its target
/// filename) matches the absolute spelling of the same link. Any other relative
/// form is resolved with `base.join`. The result must carry a host.
pub fn normalize_url(candidate: &str, base: &Url) -> Option<String> {
    let candidate = candidate.trim();
    if candidate.is_empty() {
        return None;
    }
    if has_host(candidate) {
        return Some(candidate.to_string());
    }
    if candidate.starts_with('/') && !candidate.starts_with("//") {
        let prefixed = format!("{}{}", base.origin().ascii_serialization(), candidate);
        return has_host(&prefixed).then_some(prefixed);
    }
    let resolved = base.join(candidate).ok()?;
    resolved.host_str()?;
    Some(resolved.into())
}

/// Normalized survivors plus the candidates that had to be dropped.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NormalizedLinks {
    pub urls: Vec<String>,
    pub dropped: Vec<String>,
}

/// Dedupe `candidates` and normalize every survivor against `base`.
///
/// Dedup runs on the raw strings, before resolution, so `/a.pdf` and its absolute
/// spelling are both kept; they map to the same target file anyway.
pub fn normalize_candidates<S: AsRef<str>>(candidates: &[S], base: &Url) -> NormalizedLinks {
    let mut out = NormalizedLinks::default();
    for candidate in dedupe_preserving_order(candidates) {
        match normalize_url(&candidate, base) {
            Some(url) => out.urls.push(url),
            None => out.dropped.push(candidate),
        }
    }
    out
}
