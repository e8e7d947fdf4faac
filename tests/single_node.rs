mod common;

use chordd::{client_ops, ring};

#[tokio::test]
async fn solo_ring_is_its_own_successor_and_has_no_predecessor() {
    let dir = tempfile::tempdir().unwrap();
    let (node, _handle) = common::spawn_node("solo-node", dir.path()).await;

    assert_eq!(node.successor(), node.address);
    assert_eq!(node.predecessor(), None);

    for id in [0u64, node.identifier, (1 << ring::RING_BITS) - 1] {
        let owner = node.find_successor(id % (1 << ring::RING_BITS)).await.unwrap();
        assert_eq!(owner, node.address);
    }
}

#[tokio::test]
async fn store_file_then_get_file_round_trips_on_a_single_node() {
    let dir = tempfile::tempdir().unwrap();
    let dest = tempfile::tempdir().unwrap();
    let (node, _handle) = common::spawn_node("solo-node-roundtrip", dir.path()).await;

    let source_path = dir.path().join("note.txt");
    std::fs::write(&source_path, b"round trip me").unwrap();

    client_ops::store_file(&node, &source_path).await.unwrap();
    let fetched = client_ops::get_file(&node, "note.txt", dest.path()).await.unwrap();

    assert_eq!(std::fs::read(&fetched).unwrap(), b"round trip me");
}
