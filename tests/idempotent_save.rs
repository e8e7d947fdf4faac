mod common;

use chordd::ring;

#[tokio::test]
async fn saving_the_same_id_twice_keeps_the_first_copy() {
    let dir = tempfile::tempdir().unwrap();
    let (node, _handle) = common::spawn_node("idempotent-node", dir.path()).await;

    let id = ring::hash_to_ring(b"dup.txt");
    node.handle_save_file(id, "dup.txt".to_string(), b"first".to_vec()).unwrap();
    node.handle_save_file(id, "dup.txt".to_string(), b"second".to_vec()).unwrap();

    let (name, content) = node.handle_get_file(id).unwrap();
    assert_eq!(name, "dup.txt");
    assert_eq!(content, b"first");
}
