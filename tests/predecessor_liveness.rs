mod common;

use chordd::maintenance;

#[tokio::test]
async fn dead_predecessor_is_cleared_on_check() {
    let dir = tempfile::tempdir().unwrap();
    let (node, _handle) = common::spawn_node("liveness-node", dir.path()).await;

    // Nothing is listening on this port: any dial will fail.
    node.set_predecessor(Some("127.0.0.1:1".to_string()));
    maintenance::check_predecessor(&node).await;

    assert_eq!(node.predecessor(), None);
}

#[tokio::test]
async fn live_predecessor_survives_check() {
    let dir_a = tempfile::tempdir().unwrap();
    let dir_b = tempfile::tempdir().unwrap();
    let (node_a, _handle_a) = common::spawn_node("node-a", dir_a.path()).await;
    let (node_b, _handle_b) = common::spawn_node("node-b", dir_b.path()).await;

    node_a.set_predecessor(Some(node_b.address.clone()));
    maintenance::check_predecessor(&node_a).await;

    assert_eq!(node_a.predecessor(), Some(node_b.address));
}
