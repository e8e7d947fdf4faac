mod common;

use chordd::{client_ops, maintenance};

#[tokio::test]
async fn two_nodes_converge_to_a_mutual_ring() {
    let dir_a = tempfile::tempdir().unwrap();
    let dir_b = tempfile::tempdir().unwrap();

    let (node_a, _handle_a) = common::spawn_node("node-a", dir_a.path()).await;
    let (node_b, _handle_b) = common::spawn_node("node-b", dir_b.path()).await;

    client_ops::join(&node_b, &node_a.address).await.unwrap();
    assert_eq!(node_b.successor(), node_a.address);

    // A handful of stabilize rounds on both sides is enough for a two-node
    // ring to settle: each round can only move one side's successor or
    // predecessor closer to correct.
    for _ in 0..4 {
        maintenance::stabilize(&node_a).await;
        maintenance::stabilize(&node_b).await;
    }

    assert_eq!(node_a.successor(), node_b.address);
    assert_eq!(node_b.successor(), node_a.address);
    assert_eq!(node_a.predecessor(), Some(node_b.address.clone()));
    assert_eq!(node_b.predecessor(), Some(node_a.address.clone()));
}
