//! Capture: append an activated link to the pending list.

use anyhow::Result;

use crate::links::{self, LinkEntry, ListKey};
use crate::store::LinkStore;

/// Result of one capture.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CaptureOutcome {
    /// Appended to `pending`.
    Added(LinkEntry),
    /// The URL was already pending; nothing written.
    Duplicate,
}

/// Reads `pending`, appends `url` unless already present, writes it back.
/// The new id is unused in all four lists.
pub async fn capture_link(store: &LinkStore, url: &str) -> Result<CaptureOutcome> {
    capture_link_at(store, url, links::now_millis()).await
}

pub(crate) async fn capture_link_at(
    store: &LinkStore,
    url: &str,
    now_ms: links::LinkId,
) -> Result<CaptureOutcome> {
    let snapshot = store.snapshot().await?;
    if links::contains_url(&snapshot.pending, url) {
        tracing::info!(url, "link already in the list to categorize");
        return Ok(CaptureOutcome::Duplicate);
    }
    let id = links::next_id(ListKey::ALL.map(|list| snapshot.list(list)), now_ms);
    let entry = LinkEntry::new(url, id);
    let mut pending = snapshot.pending;
    pending.push(entry.clone());
    store.set_list(ListKey::Pending, pending).await?;
    tracing::info!(url, id = entry.id, "stored link to categorize");
    Ok(CaptureOutcome::Added(entry))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::open_memory;

    #[tokio::test]
    async fn capturing_twice_keeps_one_entry() {
        let store = open_memory().await.unwrap();
        let url = "https://example.com/parts/resistor.step";

        let first = capture_link(&store, url).await.unwrap();
        assert!(matches!(first, CaptureOutcome::Added(ref e) if e.url == url));
        assert_eq!(capture_link(&store, url).await.unwrap(), CaptureOutcome::Duplicate);

        let pending = store.get_list(ListKey::Pending).await.unwrap();
        assert_eq!(pending.len(), 1);
        assert_eq!(pending[0].url, url);
    }

    #[tokio::test]
    async fn same_millisecond_gets_distinct_ids() {
        let store = open_memory().await.unwrap();
        let a = capture_link_at(&store, "https://h/a", 1000).await.unwrap();
        let b = capture_link_at(&store, "https://h/b", 1000).await.unwrap();
        match (a, b) {
            (CaptureOutcome::Added(a), CaptureOutcome::Added(b)) => {
                assert_eq!(a.id, 1000);
                assert_eq!(b.id, 1001);
            }
            other => panic!("expected two additions, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn id_is_unique_across_lists() {
        let store = open_memory().await.unwrap();
        store
            .set_list(ListKey::Model, vec![LinkEntry::new("https://h/m", 1000)])
            .await
            .unwrap();
        let CaptureOutcome::Added(e) = capture_link_at(&store, "https://h/a", 1000).await.unwrap()
        else {
            panic!("expected capture");
        };
        assert_eq!(e.id, 1001);
    }

    #[tokio::test]
    async fn preserves_insertion_order() {
        let store = open_memory().await.unwrap();
        for (i, u) in ["https://h/1", "https://h/2", "https://h/3"].iter().enumerate() {
            capture_link_at(&store, u, 10 + i as i64).await.unwrap();
        }
        let urls: Vec<String> = store
            .get_list(ListKey::Pending)
            .await
            .unwrap()
            .into_iter()
            .map(|e| e.url)
            .collect();
        assert_eq!(urls, vec!["https://h/1", "https://h/2", "https://h/3"]);
    }
}
