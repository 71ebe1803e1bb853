use once_cell::sync::Lazy;
use regex::Regex;
use std::borrow::Cow;

static UNSAFE_CHARS_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"[\\/:*?"<>|\x00-\x1F]+"#).unwrap());

static EXPORT_NAME_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[0-9a-f]{8}-[0-9a-f]{4}-[0-9a-f]{4}-[0-9a-f]{4}-[0-9a-f]{12}\.png$").unwrap()
});

/// Reduce a client-supplied filename to its final path segment and strip
/// characters that are unsafe on disk. Never returns an empty string.
pub fn sanitize_upload_filename(raw: &str) -> String {
    let last_segment = raw
        .rsplit(['/', '\\'])
        .next()
        .unwrap_or(raw);

    let cleaned = match UNSAFE_CHARS_RE.replace_all(last_segment, "_") {
        Cow::Borrowed(s) => s.to_string(), // no replacements
        Cow::Owned(s) => s,
    };

    let trimmed = cleaned.trim_matches(['.', ' ']).to_string();
    if trimmed.is_empty() {
        "file.dss".to_string()
    } else {
        trimmed
    }
}

/// Export names are always `<uuid4>.png`; anything else never came from
/// this server and is rejected before touching the filesystem.
pub fn is_valid_export_name(name: &str) -> bool {
    EXPORT_NAME_RE.is_match(name)
}
