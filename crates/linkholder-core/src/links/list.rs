//! In-memory list operations used by every read-modify-write sequence.
//!
//! The store hands out whole lists; callers compute the new list here and
//! write it back in full.

use std::collections::BTreeSet;

use super::types::{LinkEntry, LinkId};

/// True if any entry in `links` has exactly this URL.
pub fn contains_url(links: &[LinkEntry], url: &str) -> bool {
    links.iter().any(|l| l.url == url)
}

/// Removes every entry with `id`. Returns how many were removed (0 when absent).
pub fn remove_id(links: &mut Vec<LinkEntry>, id: LinkId) -> usize {
    let before = links.len();
    links.retain(|l| l.id != id);
    before - links.len()
}

pub fn find_id(links: &[LinkEntry], id: LinkId) -> Option<&LinkEntry> {
    links.iter().find(|l| l.id == id)
}

/// Id for a new entry created at `now_ms`: the timestamp itself, or the next
/// value above it that no entry in any of `lists` uses yet.
///
/// Pass every list an entry can later move into, so ids stay unique per list
/// after assignment.
pub fn next_id<'a, I>(lists: I, now_ms: LinkId) -> LinkId
where
    I: IntoIterator<Item = &'a [LinkEntry]>,
{
    let taken: BTreeSet<LinkId> = lists.into_iter().flatten().map(|l| l.id).collect();
    let mut id = now_ms;
    while taken.contains(&id) {
        id += 1;
    }
    id
}

/// Decodes a stored list value, skipping elements that are not
/// `{url: non-empty string, id: integer}` objects.
pub fn decode_lenient(value: serde_json::Value) -> Vec<LinkEntry> {
    let items = match value {
        serde_json::Value::Array(items) => items,
        serde_json::Value::Null => return Vec::new(),
        other => {
            tracing::warn!("expected a list of links, found {}; treating as empty", other);
            return Vec::new();
        }
    };

    let mut out = Vec::with_capacity(items.len());
    for item in items {
        match serde_json::from_value::<LinkEntry>(item.clone()) {
            Ok(entry) if !entry.url.is_empty() => out.push(entry),
            _ => tracing::warn!("skipping invalid link data: {}", item),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn entries() -> Vec<LinkEntry> {
        vec![
            LinkEntry::new("https://a.example/x.step", 10),
            LinkEntry::new("https://b.example/y.kicad_mod", 11),
        ]
    }

    #[test]
    fn contains_url_is_exact() {
        let links = entries();
        assert!(contains_url(&links, "https://a.example/x.step"));
        assert!(!contains_url(&links, "https://a.example/x.step?v=2"));
    }

    #[test]
    fn remove_missing_id_is_noop() {
        let mut links = entries();
        assert_eq!(remove_id(&mut links, 42), 0);
        assert_eq!(links, entries());
        assert_eq!(remove_id(&mut links, 10), 1);
        assert_eq!(links.len(), 1);
        assert_eq!(links[0].id, 11);
    }

    #[test]
    fn next_id_skips_taken_values() {
        let links = entries();
        assert_eq!(next_id([links.as_slice()], 5), 5);
        assert_eq!(next_id([links.as_slice()], 10), 12);
        assert_eq!(next_id([&[][..]], 10), 10);
    }

    #[test]
    fn next_id_checks_every_list() {
        let pending = vec![LinkEntry::new("https://h/p", 20)];
        let model = vec![LinkEntry::new("https://h/m", 21), LinkEntry::new("https://h/n", 22)];
        assert_eq!(next_id([pending.as_slice(), model.as_slice()], 20), 23);
        assert_eq!(next_id([pending.as_slice(), model.as_slice()], 21), 23);
        assert_eq!(next_id([pending.as_slice(), model.as_slice()], 19), 19);
    }

    #[test]
    fn decode_skips_malformed_elements() {
        let value = json!([
            {"url": "https://a.example/x", "id": 1},
            "not an object",
            {"url": "", "id": 2},
            {"url": "https://b.example/y"},
            {"url": "https://c.example/z", "id": 3},
            null
        ]);
        let links = decode_lenient(value);
        assert_eq!(
            links,
            vec![
                LinkEntry::new("https://a.example/x", 1),
                LinkEntry::new("https://c.example/z", 3),
            ]
        );
    }

    #[test]
    fn decode_non_array_is_empty() {
        assert!(decode_lenient(json!({"url": "x"})).is_empty());
        assert!(decode_lenient(serde_json::Value::Null).is_empty());
    }
}
