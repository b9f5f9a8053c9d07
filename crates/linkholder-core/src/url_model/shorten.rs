//! Display-only URL shortening for the panel.
//!
//! Pure and deterministic: the short form is re-derived from the stored URL
//! every time and never written back. Lengths are counted in characters.

use url::Url;

/// Default display width used by the panel.
pub const DEFAULT_MAX_LENGTH: usize = 50;

const ELLIPSIS: &str = "...";

/// Shortens `url` to at most `max_length` characters for display.
///
/// - Short enough already: returned unchanged.
/// - `host/.../file` when the last path segment fits.
/// - Otherwise `host` + path, the path cut with `...` when it does not fit.
/// - Unparseable input (or a host too long to leave room for any path) is cut
///   naively to `max_length - 3` characters plus `...`.
pub fn shorten(url: &str, max_length: usize) -> String {
    if char_len(url) <= max_length {
        return url.to_string();
    }
    match Url::parse(url) {
        Ok(parsed) => shorten_parsed(url, &parsed, max_length),
        Err(_) => truncate_with_ellipsis(url, max_length),
    }
}

fn shorten_parsed(raw: &str, parsed: &Url, max_length: usize) -> String {
    let host = parsed.host_str().unwrap_or("");
    let path = parsed.path();
    let file = path.split('/').filter(|s| !s.is_empty()).last().unwrap_or("");

    if !file.is_empty() {
        let host_plus_file = format!("{host}/.../{file}");
        if char_len(&host_plus_file) <= max_length {
            return host_plus_file;
        }
    }

    // One character goes to the slash between host and path.
    let Some(max_path) = max_length.checked_sub(char_len(host) + 1) else {
        return truncate_with_ellipsis(raw, max_length);
    };
    if char_len(path) <= max_path {
        return format!("{host}{path}");
    }
    if max_path < ELLIPSIS.len() {
        return truncate_with_ellipsis(raw, max_length);
    }
    format!("{host}{}{ELLIPSIS}", take_chars(path, max_path - ELLIPSIS.len()))
}

/// First `max_length - 3` characters plus `...`, or `s` itself if it fits.
pub fn truncate_with_ellipsis(s: &str, max_length: usize) -> String {
    if char_len(s) <= max_length {
        return s.to_string();
    }
    if max_length < ELLIPSIS.len() {
        return take_chars(s, max_length).to_string();
    }
    format!("{}{ELLIPSIS}", take_chars(s, max_length - ELLIPSIS.len()))
}

fn char_len(s: &str) -> usize {
    s.chars().count()
}

fn take_chars(s: &str, n: usize) -> &str {
    match s.char_indices().nth(n) {
        Some((idx, _)) => &s[..idx],
        None => s,
    }
}
