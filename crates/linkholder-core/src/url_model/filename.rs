//! Download filename derivation from a link URL.

use super::sanitize::{percent_decode_strict, replace_unsafe_chars};

/// Filename used when the URL yields no usable segment.
pub const DEFAULT_FILENAME: &str = "download";

/// Derives the filename a link is saved under.
///
/// Takes the final path segment (the text after the last `/` of the path, so a
/// trailing slash yields nothing), percent-decodes it and replaces unsafe
/// characters with `_`. The query string never contributes.
///
/// If the URL does not parse or the segment does not decode, falls back to the
/// raw text after the last `/` of the whole string, cut at the first `?`.
///
/// # Examples
///
/// - `https://host/a/b/widget.stp?x=1` → `widget.stp`
/// - `https://host/` → `download`
pub fn derive_download_filename(url: &str) -> String {
    match filename_from_parsed(url) {
        Some(name) => name,
        None => {
            tracing::warn!(url, "could not parse URL for filename; using raw tail");
            filename_from_raw(url)
        }
    }
}

/// None means "fall back to the raw form" (parse or decode failure).
fn filename_from_parsed(url: &str) -> Option<String> {
    let parsed = url::Url::parse(url).ok()?;
    let last = parsed.path().rsplit('/').next().unwrap_or("");
    if last.is_empty() {
        return Some(DEFAULT_FILENAME.to_string());
    }
    let decoded = percent_decode_strict(last)?;
    Some(replace_unsafe_chars(&decoded))
}

fn filename_from_raw(url: &str) -> String {
    let tail = url.rsplit('/').next().unwrap_or(url);
    let simple = tail.split('?').next().unwrap_or("");
    if simple.is_empty() {
        DEFAULT_FILENAME.to_string()
    } else {
        replace_unsafe_chars(simple)
    }
}
