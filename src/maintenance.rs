//! The three periodic maintenance tasks: stabilize, fix-fingers and
//! check-predecessor. Each is spawned as its own loop so that a slow
//! invocation never overlaps itself, while the three tasks run independent
//! of one another.

use std::sync::Arc;
use std::time::Duration;

use log::{info, warn};
use tokio::task::JoinHandle;

use crate::node::ChordNode;
use crate::ring;

/// Spawns the three maintenance loops and returns their join handles so the
/// caller can await them alongside the RPC listener and the shell.
pub fn spawn_maintenance_tasks(
    node: Arc<ChordNode>,
    stabilize_period: Duration,
    fix_fingers_period: Duration,
    check_predecessor_period: Duration,
) -> Vec<JoinHandle<()>> {
    let stabilize_node = node.clone();
    let fix_fingers_node = node.clone();
    let check_predecessor_node = node;

    vec![
        tokio::spawn(async move {
            loop {
                tokio::time::sleep(stabilize_period).await;
                stabilize(&stabilize_node).await;
            }
        }),
        tokio::spawn(async move {
            loop {
                tokio::time::sleep(fix_fingers_period).await;
                fix_fingers(&fix_fingers_node).await;
            }
        }),
        tokio::spawn(async move {
            loop {
                tokio::time::sleep(check_predecessor_period).await;
                check_predecessor(&check_predecessor_node).await;
            }
        }),
    ]
}

/// Validates and refines the successor pointer, then notifies it.
pub async fn stabilize(node: &Arc<ChordNode>) {
    let successor = node.successor();

    let successors_predecessor = match node.peer_predecessor(&successor).await {
        Ok(pred) => pred,
        Err(e) => {
            warn!("successor {} unreachable during stabilize, collapsing to solo ring: {}", successor, e);
            node.set_successor(node.address.clone());
            None
        }
    };

    if let Some(candidate) = successors_predecessor {
        let successor_now = node.successor();
        let successor_id = node.peer_identifier(&successor_now).await.ok();
        let candidate_id = node.peer_identifier(&candidate).await.ok();
        if let (Some(successor_id), Some(candidate_id)) = (successor_id, candidate_id) {
            if ring::in_interval(node.identifier, candidate_id, successor_id, false) {
                info!("stabilize: adopting closer successor {} (was {})", candidate, successor_now);
                node.set_successor(candidate);
            }
        }
    }

    let successor_now = node.successor();
    if let Err(e) = node.peer_notify(&successor_now, &node.address).await {
        warn!("notify to {} failed: {}", successor_now, e);
    }
}

/// Refreshes exactly one finger entry per invocation, round-robin.
pub async fn fix_fingers(node: &Arc<ChordNode>) {
    let logical_k = node.advance_next_finger();
    let target = ring::finger_target(node.identifier, logical_k as u32);

    match node.find_successor(target).await {
        Ok(address) => node.update_finger(logical_k, target, Some(address)),
        Err(e) => warn!("fix_fingers: could not resolve finger {}: {}", logical_k, e),
    }
}

/// Clears the predecessor if it can no longer be reached.
pub async fn check_predecessor(node: &Arc<ChordNode>) {
    let Some(predecessor) = node.predecessor() else {
        return;
    };
    if !node.probe_liveness(&predecessor).await {
        warn!("predecessor {} appears dead, clearing", predecessor);
        node.set_predecessor(None);
    }
}
