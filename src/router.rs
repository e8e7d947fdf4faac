//! find-successor / closest-preceding-finger: the routing algorithm that
//! lets a node answer "who owns this id" without knowing the whole ring.

use log::debug;

use crate::error::{ChordError, ChordResult};
use crate::node::ChordNode;
use crate::ring::{self, RingId};
use crate::rpc::client as rpc_client;

pub const HOP_LIMIT: usize = 10;

impl ChordNode {
    /// Returns the endpoint of the node whose identifier is the smallest
    /// ring element `>= request_id` in clockwise order.
    pub async fn find_successor(&self, request_id: RingId) -> ChordResult<String> {
        let successor = self.successor();
        let successor_id = self.peer_identifier(&successor).await?;

        if ring::in_interval(self.identifier, request_id, successor_id, true) {
            return Ok(successor);
        }

        let next_hop = self.closest_preceding_finger(request_id).await;
        match rpc_client::find_successor(&next_hop, request_id, self.timeout).await {
            Ok(outcome) if outcome.found => Ok(outcome.address),
            _ => Err(ChordError::NotFound),
        }
    }

    /// Walks the finger table from index `m` down to `1`, returning the
    /// address of the furthest finger whose current identifier still
    /// precedes `request_id`. Entries whose peer cannot be reached are
    /// skipped, not removed — fix-fingers is what repairs them.
    pub(crate) async fn closest_preceding_finger(&self, request_id: RingId) -> String {
        let fingers = self.snapshot_fingers();
        for entry in fingers.iter().rev() {
            match self.peer_identifier(&entry.address).await {
                Ok(peer_id) => {
                    if ring::in_interval(self.identifier, peer_id, request_id, false) {
                        return entry.address.clone();
                    }
                }
                Err(e) => {
                    debug!("skipping unreachable finger {}: {}", entry.address, e);
                    continue;
                }
            }
        }
        self.successor()
    }
}

/// Top-level client-side find: follows find-successor-RPC hops starting at
/// `seed`, bounded by [`HOP_LIMIT`].
pub async fn find(seed: &str, id: RingId, timeout: std::time::Duration) -> ChordResult<String> {
    let mut hop = seed.to_string();
    for _ in 0..HOP_LIMIT {
        if hop.is_empty() {
            return Err(ChordError::NotFound);
        }
        let outcome = rpc_client::find_successor(&hop, id, timeout).await?;
        if outcome.found {
            return Ok(outcome.address);
        }
        hop = outcome.address;
    }
    Err(ChordError::HopLimitExceeded)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hop_limit_is_reasonable() {
        assert_eq!(HOP_LIMIT, 10);
    }
}
