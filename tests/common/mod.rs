use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;
use tonic::transport::Server;

use chordd::node::ChordNode;
use chordd::rpc::chord_proto::chord_server::ChordServer;
use chordd::rpc::ChordService;

pub const TEST_TIMEOUT: Duration = Duration::from_millis(500);

/// Spins up a real node behind a real `tonic` server on a loopback port and
/// returns it alongside the server's join handle, matching the "drive real
/// servers over localhost" style used for multi-node Chord scenarios.
pub async fn spawn_node(identifier_seed: &str, base_dir: &std::path::Path) -> (Arc<ChordNode>, JoinHandle<()>) {
    let std_listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let address = std_listener.local_addr().unwrap().to_string();
    drop(std_listener);

    let node = Arc::new(
        ChordNode::new(address.clone(), Some(identifier_seed), base_dir, TEST_TIMEOUT).unwrap(),
    );

    let server_node = node.clone();
    let socket_addr: std::net::SocketAddr = address.parse().unwrap();
    let handle = tokio::spawn(async move {
        Server::builder()
            .add_service(ChordServer::new(ChordService::new(server_node)))
            .serve(socket_addr)
            .await
            .unwrap();
    });

    // give the listener a moment to come up before the caller dials it
    tokio::time::sleep(Duration::from_millis(50)).await;
    (node, handle)
}
