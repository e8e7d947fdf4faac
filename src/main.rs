use std::process::exit;
use std::sync::Arc;
use std::time::Duration;

use clap::Parser;
use log::{info, warn, LevelFilter};
use tonic::transport::Server;

use chordd::cli::Cli;
use chordd::client_ops;
use chordd::maintenance;
use chordd::node::ChordNode;
use chordd::rpc::chord_proto::chord_server::ChordServer;
use chordd::rpc::chord_proto::FILE_DESCRIPTOR_SET;
use chordd::rpc::ChordService;
use chordd::shell;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    simple_logger::SimpleLogger::new()
        .env()
        .with_level(LevelFilter::Info)
        .init()
        .unwrap();

    let args = Cli::parse();
    let bind_address = args.bind_address();
    let rpc_timeout = Duration::from_millis(args.rpc_timeout_ms);

    let node = Arc::new(ChordNode::new(
        bind_address.clone(),
        args.identifier.as_deref(),
        &args.files_dir,
        rpc_timeout,
    )?);
    info!("node identifier is {}", node.identifier);

    let mut handles = Vec::new();

    let rpc_node = node.clone();
    let rpc_bind_address = bind_address
        .parse()
        .expect("bind address must be a valid socket address");
    handles.push(tokio::spawn(async move {
        let reflection_service = tonic_reflection::server::Builder::configure()
            .register_encoded_file_descriptor_set(FILE_DESCRIPTOR_SET)
            .build()
            .expect("failed building reflection service");

        info!("gRPC service listening on {}", rpc_bind_address);
        Server::builder()
            .add_service(ChordServer::new(ChordService::new(rpc_node)))
            .add_service(reflection_service)
            .serve(rpc_bind_address)
            .await
            .expect("gRPC server failed");
    }));

    // Give the listener a moment to come up before we might dial ourselves
    // (a notify during join, or a peer's find-successor, could arrive as
    // soon as we start talking to the ring).
    tokio::time::sleep(Duration::from_millis(50)).await;

    if let Some(peer) = args.join_peer() {
        if let Err(e) = client_ops::join(&node, &peer).await {
            warn!("failed to join ring via {}: {}", peer, e);
            exit(1);
        }
    } else {
        info!("no join peer given, starting a new ring");
    }

    handles.extend(maintenance::spawn_maintenance_tasks(
        node.clone(),
        Duration::from_millis(args.stabilize_ms),
        Duration::from_millis(args.fix_fingers_ms),
        Duration::from_millis(args.check_predecessor_ms),
    ));

    shell::run(node).await;

    for handle in handles {
        handle.abort();
    }

    Ok(())
}
