mod common;

use chordd::{client_ops, maintenance};

#[tokio::test]
async fn file_stored_before_join_stays_reachable_after_a_peer_joins() {
    let dir_a = tempfile::tempdir().unwrap();
    let dir_b = tempfile::tempdir().unwrap();
    let dest = tempfile::tempdir().unwrap();

    let (node_a, _handle_a) = common::spawn_node("node-a", dir_a.path()).await;

    let source_path = dir_a.path().join("blob.txt");
    std::fs::write(&source_path, b"hello chord").unwrap();
    client_ops::store_file(&node_a, &source_path).await.unwrap();

    let (node_b, _handle_b) = common::spawn_node("node-b", dir_b.path()).await;
    client_ops::join(&node_b, &node_a.address).await.unwrap();

    // Enough rounds for the ring to settle and for any handoff triggered by
    // the new predecessor to complete.
    for _ in 0..6 {
        maintenance::stabilize(&node_a).await;
        maintenance::stabilize(&node_b).await;
    }

    let fetched = client_ops::get_file(&node_a, "blob.txt", dest.path()).await.unwrap();
    assert_eq!(std::fs::read(&fetched).unwrap(), b"hello chord");

    let fetched_via_b = client_ops::get_file(&node_b, "blob.txt", dest.path()).await.unwrap();
    assert_eq!(std::fs::read(&fetched_via_b).unwrap(), b"hello chord");
}
