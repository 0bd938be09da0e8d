const MAX_STEM_BYTES: usize = 80;
const FALLBACK_STEM: &str = "untitled";

/// Device names Windows refuses as file stems.
const WINDOWS_DEVICES: [&str; 22] = [
    "CON", "PRN", "AUX", "NUL", "COM1", "COM2", "COM3", "COM4", "COM5", "COM6", "COM7", "COM8",
    "COM9", "LPT1", "LPT2", "LPT3", "LPT4", "LPT5", "LPT6", "LPT7", "LPT8", "LPT9",
];

/// File stem for a form name, safe on every platform we write to.
///
/// The extension is added by the caller. Two forms whose names differ only
/// in replaced characters end up with the same stem.
pub fn sanitize_form_name(name: &str) -> String {
    let mut replaced = String::with_capacity(name.len());
    for c in name.chars() {
        let c = if needs_replacing(c) { '_' } else { c };
        if c == '_' && replaced.ends_with('_') {
            continue;
        }
        replaced.push(c);
    }

    let trimmed = replaced.trim_matches(['_', '.']);
    let mut stem = byte_prefix(trimmed, MAX_STEM_BYTES)
        .trim_end_matches(['_', '.'])
        .to_string();
    if stem.is_empty() {
        stem.push_str(FALLBACK_STEM);
    }
    if WINDOWS_DEVICES
        .iter()
        .any(|device| device.eq_ignore_ascii_case(&stem))
    {
        stem.push('_');
    }
    stem
}

fn needs_replacing(c: char) -> bool {
    c.is_whitespace()
        || c.is_control()
        || matches!(c, '\\' | '/' | ':' | '*' | '?' | '"' | '<' | '>' | '|')
}

/// Longest prefix of `text` within `max` bytes that ends on a char boundary.
fn byte_prefix(text: &str, max: usize) -> &str {
    if text.len() <= max {
        return text;
    }
    let end = (0..=max)
        .rev()
        .find(|&i| text.is_char_boundary(i))
        .unwrap_or(0);
    &text[..end]
}
