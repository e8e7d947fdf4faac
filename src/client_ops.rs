//! Client operations invoked from the host shell: lookup, store-file,
//! get-file, and the join-vs-create bootstrap performed once at startup.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use log::{info, warn};

use crate::error::{ChordError, ChordResult};
use crate::node::ChordNode;
use crate::ring;
use crate::router;
use crate::rpc::client as rpc_client;

/// Joins an existing ring through `peer_address`. A failure here is fatal
/// at the call site: the node has no valid successor without it.
pub async fn join(node: &Arc<ChordNode>, peer_address: &str) -> ChordResult<()> {
    info!("joining existing ring via {}", peer_address);
    let successor = router::find(peer_address, node.identifier, node.timeout).await?;
    node.set_successor_from_join(successor.clone());
    info!("joined ring, successor is {}", successor);

    // Retrying the notify (rather than treating it as join-fatal too) is an
    // accepted strengthening: the next stabilize cycle will notify again.
    if let Err(e) = node.peer_notify(&successor, &node.address).await {
        warn!("initial notify to {} failed, stabilize will retry: {}", successor, e);
    }
    Ok(())
}

pub async fn lookup(node: &Arc<ChordNode>, key: &str) -> ChordResult<String> {
    let id = ring::hash_to_ring(key.as_bytes());
    router::find(&node.address, id, node.timeout).await
}

pub async fn store_file(node: &Arc<ChordNode>, path: &Path) -> ChordResult<()> {
    let name = path
        .file_name()
        .and_then(|s| s.to_str())
        .ok_or_else(|| ChordError::FileNotFound(path.display().to_string()))?
        .to_string();
    let content = std::fs::read(path)?;
    let id = ring::hash_to_ring(name.as_bytes());

    let responsible = router::find(&node.address, id, node.timeout).await?;
    node.peer_save_file(&responsible, id, name, content).await
}

pub async fn get_file(node: &Arc<ChordNode>, name: &str, dest_dir: &Path) -> ChordResult<PathBuf> {
    let id = ring::hash_to_ring(name.as_bytes());
    let responsible = router::find(&node.address, id, node.timeout).await?;

    let (returned_name, content) = if responsible == node.address {
        node.handle_get_file(id)?
    } else {
        rpc_client::get_file(&responsible, id, node.timeout).await?
    };

    let dest = dest_dir.join(&returned_name);
    std::fs::write(&dest, &content)?;
    Ok(dest)
}
