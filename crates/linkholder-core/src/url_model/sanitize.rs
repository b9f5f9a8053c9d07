//! Filename character replacement and percent-decoding.

/// Characters a download filename may not contain.
const UNSAFE_CHARS: [char; 10] = ['/', '\\', '?', '%', '*', ':', '|', '"', '<', '>'];

/// Replaces each of `/ \ ? % * : | " < >` with `_`. Nothing else is touched.
pub fn replace_unsafe_chars(name: &str) -> String {
    name.chars()
        .map(|c| if UNSAFE_CHARS.contains(&c) { '_' } else { c })
        .collect()
}

/// Strict percent-decode of a URL path segment.
///
/// Returns None on a `%` not followed by two hex digits or when the decoded
/// bytes are not UTF-8; callers treat that like an unparseable URL.
pub fn percent_decode_strict(input: &str) -> Option<String> {
    let mut out = Vec::with_capacity(input.len());
    let mut bytes = input.bytes();
    while let Some(b) = bytes.next() {
        if b == b'%' {
            let high = bytes.next().and_then(hex_digit)?;
            let low = bytes.next().and_then(hex_digit)?;
            out.push(high << 4 | low);
        } else {
            out.push(b);
        }
    }
    String::from_utf8(out).ok()
}

fn hex_digit(b: u8) -> Option<u8> {
    match b {
        b'0'..=b'9' => Some(b - b'0'),
        b'a'..=b'f' => Some(b - b'a' + 10),
        b'A'..=b'F' => Some(b - b'A' + 10),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn replaces_every_unsafe_char() {
        assert_eq!(
            replace_unsafe_chars(r#"a/b\c?d%e*f:g|h"i<j>k"#),
            "a_b_c_d_e_f_g_h_i_j_k"
        );
    }

    #[test]
    fn keeps_other_chars() {
        assert_eq!(replace_unsafe_chars("part 1 (rev.B)_ü.step"), "part 1 (rev.B)_ü.step");
    }

    #[test]
    fn decodes_utf8_sequences() {
        assert_eq!(percent_decode_strict("caf%C3%A9.txt").as_deref(), Some("café.txt"));
        assert_eq!(percent_decode_strict("a%20b").as_deref(), Some("a b"));
        assert_eq!(percent_decode_strict("plain").as_deref(), Some("plain"));
    }

    #[test]
    fn rejects_malformed_escapes() {
        assert_eq!(percent_decode_strict("bad%zz"), None);
        assert_eq!(percent_decode_strict("trail%4"), None);
        assert_eq!(percent_decode_strict("%FF%FE"), None);
    }
}
