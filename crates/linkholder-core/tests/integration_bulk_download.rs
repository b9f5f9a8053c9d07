//! Integration test: categorized links in an on-disk store are fetched from a
//! local HTTP server into `{root}/{folder}/{filename}`.

mod common;

use std::sync::Arc;

use linkholder_core::config::LinkholderConfig;
use linkholder_core::download::{bulk_download, BulkOptions, ConflictAction, CurlDownloader};
use linkholder_core::links::{LinkEntry, ListKey};
use linkholder_core::store::LinkStore;
use tempfile::tempdir;

#[tokio::test]
async fn bulk_download_writes_files_and_isolates_failures() {
    let base = common::file_server::start(&[
        ("/a/b/widget.stp", b"widget body".as_slice()),
        ("/lib/part%20one.kicad_sym", b"symbol body".as_slice()),
    ]);

    let state = tempdir().unwrap();
    let root = tempdir().unwrap();
    let store = LinkStore::open_at(state.path().join("store.db")).await.unwrap();
    store
        .set_list(
            ListKey::Model,
            vec![
                LinkEntry::new(format!("{}/a/b/widget.stp?x=1", base), 1),
                LinkEntry::new(format!("{}/missing/gone.step", base), 2),
            ],
        )
        .await
        .unwrap();
    store
        .set_list(
            ListKey::Symbol,
            vec![LinkEntry::new(format!("{}/lib/part%20one.kicad_sym", base), 3)],
        )
        .await
        .unwrap();
    store.set_folder_name(" MyParts ").await.unwrap();

    let downloader = Arc::new(CurlDownloader::new(root.path(), &LinkholderConfig::default()));
    let report = bulk_download(&store, downloader, BulkOptions::default())
        .await
        .unwrap();

    assert_eq!(report.total, 3);
    assert_eq!(report.started.len(), 2);
    assert_eq!(report.failed.len(), 1);
    assert_eq!(report.failed[0].filename, "gone.step");
    assert_eq!(report.summary(), "Attempted to start 2 out of 3 downloads.");

    let folder = root.path().join("MyParts");
    assert_eq!(std::fs::read(folder.join("widget.stp")).unwrap(), b"widget body");
    assert_eq!(
        std::fs::read(folder.join("part one.kicad_sym")).unwrap(),
        b"symbol body"
    );
    assert!(!folder.join("gone.step").exists());
    assert!(!folder.join("gone.step.part").exists());
}

#[tokio::test]
async fn same_filename_is_uniquified_not_overwritten() {
    let base = common::file_server::start(&[
        ("/v1/widget.stp", b"first".as_slice()),
        ("/v2/widget.stp", b"second".as_slice()),
    ]);

    let state = tempdir().unwrap();
    let root = tempdir().unwrap();
    let folder = root.path().join("Parts");
    std::fs::create_dir_all(&folder).unwrap();
    std::fs::write(folder.join("widget.stp"), b"existing").unwrap();

    let store = LinkStore::open_at(state.path().join("store.db")).await.unwrap();
    store
        .set_list(
            ListKey::Footprint,
            vec![
                LinkEntry::new(format!("{}/v1/widget.stp", base), 1),
                LinkEntry::new(format!("{}/v2/widget.stp", base), 2),
            ],
        )
        .await
        .unwrap();
    store.set_folder_name("Parts").await.unwrap();

    let downloader = Arc::new(CurlDownloader::new(root.path(), &LinkholderConfig::default()));
    let report = bulk_download(
        &store,
        downloader,
        BulkOptions {
            max_concurrent: 1,
            conflict: ConflictAction::Uniquify,
        },
    )
    .await
    .unwrap();
    assert_eq!(report.started.len(), 2);

    assert_eq!(std::fs::read(folder.join("widget.stp")).unwrap(), b"existing");
    assert_eq!(std::fs::read(folder.join("widget (1).stp")).unwrap(), b"first");
    assert_eq!(std::fs::read(folder.join("widget (2).stp")).unwrap(), b"second");
}

#[tokio::test]
async fn overwrite_replaces_existing_file() {
    let base = common::file_server::start(&[("/x/data.bin", b"fresh".as_slice())]);

    let state = tempdir().unwrap();
    let root = tempdir().unwrap();
    let folder = root.path().join("Out");
    std::fs::create_dir_all(&folder).unwrap();
    std::fs::write(folder.join("data.bin"), b"stale").unwrap();

    let store = LinkStore::open_at(state.path().join("store.db")).await.unwrap();
    store
        .set_list(ListKey::Model, vec![LinkEntry::new(format!("{}/x/data.bin", base), 1)])
        .await
        .unwrap();
    store.set_folder_name("Out").await.unwrap();

    let downloader = Arc::new(CurlDownloader::new(root.path(), &LinkholderConfig::default()));
    let report = bulk_download(
        &store,
        downloader,
        BulkOptions {
            max_concurrent: 2,
            conflict: ConflictAction::Overwrite,
        },
    )
    .await
    .unwrap();
    assert_eq!(report.started.len(), 1);
    assert_eq!(std::fs::read(folder.join("data.bin")).unwrap(), b"fresh");
    assert!(!folder.join("data (1).bin").exists());
}
