use chardetng::EncodingDetector;
use encoding_rs::Encoding;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedPage {
    pub text: String,
    pub encoding_label: String,
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub(crate) enum DecodeError {
    #[error("failed to decode bytes with {encoding}: {message}")]
    DecodeFailure { encoding: String, message: String },
}

/// Decode raw page bytes into UTF-8 using: BOM -> Content-Type charset -> chardetng fallback.
pub(crate) fn decode_page(bytes: &[u8], content_type: Option<&str>) -> Result<DecodedPage, DecodeError> {
    if let Some((encoding, _)) = Encoding::for_bom(bytes) {
        return decode_with(bytes, encoding);
    }

    if let Some(label) = content_type.and_then(extract_charset) {
        if let Some(enc) = Encoding::for_label(label.as_bytes()) {
            return decode_with(bytes, enc);
        }
    }

    let mut detector = EncodingDetector::new();
    detector.feed(bytes, true);
    let enc = detector.guess(None, true);
    decode_with(bytes, enc)
}

/// Like [`decode_page`], but never fails: undecodable bytes become U+FFFD.
///
/// Link extraction only needs the ASCII `href` attributes to survive, so a
/// page with a wrong charset label is still worth scanning.
pub fn decode_page_lossy(bytes: &[u8], content_type: Option<&str>) -> DecodedPage {
    decode_page(bytes, content_type).unwrap_or_else(|_| DecodedPage {
        text: String::from_utf8_lossy(bytes).into_owned(),
        encoding_label: "UTF-8 (lossy)".to_string(),
    })
}

fn extract_charset(content_type: &str) -> Option<String> {
    content_type
        .split(';')
        .filter_map(|part| {
            let part = part.trim();
            part.strip_prefix("charset=")
                .or_else(|| part.strip_prefix("Charset="))
                .or_else(|| part.strip_prefix("CHARSET="))
                .map(|v| v.trim_matches([' ', '"', '\''].as_ref()))
        })
        .next()
        .map(|s| s.to_string())
}

fn decode_with(bytes: &[u8], enc: &'static Encoding) -> Result<DecodedPage, DecodeError> {
    let (text, _, had_errors) = enc.decode(bytes);
    if had_errors {
        return Err(DecodeError::DecodeFailure {
            encoding: enc.name().to_string(),
            message: "decoding error".into(),
        });
    }
    Ok(DecodedPage {
        text: text.into_owned(),
        encoding_label: enc.name().to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn charset_from_content_type_is_used() {
        let bytes = b"caf\xe9 <a href=\"/x.pdf\">";
        let page = decode_page(bytes, Some("text/html; charset=\"ISO-8859-1\"")).unwrap();
        assert_eq!(page.encoding_label, "windows-1252");
        assert!(page.text.starts_with("café"));
    }

    #[test]
    fn utf8_bom_wins_over_header() {
        let bytes = b"\xEF\xBB\xBFhello";
        let page = decode_page(bytes, Some("text/html; charset=windows-1252")).unwrap();
        assert_eq!(page.encoding_label, "UTF-8");
        assert_eq!(page.text, "hello");
    }

    #[test]
    fn mislabelled_bytes_fall_back_to_lossy_utf8() {
        let bytes = b"<a href=\"/sds/a.pdf\">\xff\xfe\xfd";
        let page = decode_page_lossy(bytes, Some("text/html; charset=utf-8"));
        assert!(page.text.contains(r#"href="/sds/a.pdf""#));
        assert_eq!(page.encoding_label, "UTF-8 (lossy)");
    }
}
