use chardetng::EncodingDetector;
use encoding_rs::Encoding;
use harvest_logging::harvest_debug;

/// How the encoding of a fetched body was chosen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EncodingSource {
    ByteOrderMark,
    ContentType,
    Detected,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedText {
    pub text: String,
    pub encoding: &'static Encoding,
    pub source: EncodingSource,
    /// Some input was malformed and replaced with U+FFFD.
    pub had_replacements: bool,
}

/// Turn a report body into text.
///
/// A byte order mark decides first, then the `charset` of `content_type`,
/// then statistical detection. Malformed sequences become U+FFFD; the
/// caller decides whether that is worth a warning.
pub fn decode_body(bytes: &[u8], content_type: Option<&str>) -> DecodedText {
    let (encoding, source) = choose_encoding(bytes, content_type);
    let (text, had_replacements) = match source {
        EncodingSource::ByteOrderMark => encoding.decode_with_bom_removal(bytes),
        _ => encoding.decode_without_bom_handling(bytes),
    };
    harvest_debug!("decoded {} bytes as {} ({:?})", bytes.len(), encoding.name(), source);
    DecodedText {
        text: text.into_owned(),
        encoding,
        source,
        had_replacements,
    }
}

fn choose_encoding(bytes: &[u8], content_type: Option<&str>) -> (&'static Encoding, EncodingSource) {
    if let Some((encoding, _)) = Encoding::for_bom(bytes) {
        return (encoding, EncodingSource::ByteOrderMark);
    }
    if let Some(encoding) = content_type
        .and_then(charset_param)
        .and_then(|label| Encoding::for_label(label.as_bytes()))
    {
        return (encoding, EncodingSource::ContentType);
    }
    let mut detector = EncodingDetector::new();
    detector.feed(bytes, true);
    (detector.guess(None, true), EncodingSource::Detected)
}

/// Value of the `charset` parameter, key matched case-insensitively.
fn charset_param(content_type: &str) -> Option<&str> {
    content_type.split(';').skip(1).find_map(|param| {
        let (key, value) = param.split_once('=')?;
        key.trim()
            .eq_ignore_ascii_case("charset")
            .then(|| value.trim().trim_matches(['"', '\'']))
    })
}
