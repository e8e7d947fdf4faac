//! Blob handoff and the notify handler: when a closer predecessor appears,
//! the files it now owns move from our bucket to its.

use log::{info, warn};

use crate::error::ChordResult;
use crate::node::ChordNode;
use crate::ring::{self, RingId};

impl ChordNode {
    /// Invoked (locally or via the RPC handler) when `candidate_address`
    /// claims to be our predecessor. Runs the handoff before updating our
    /// own predecessor, using the candidate's identifier to decide which
    /// blobs it now owns.
    pub async fn handle_notify(&self, candidate_address: String) -> ChordResult<()> {
        let candidate_id = self.peer_identifier(&candidate_address).await?;

        if self.successor() != self.address {
            self.migrate_bucket_to(&candidate_address, candidate_id).await;
        }

        let predecessor = self.predecessor();
        let should_adopt = match &predecessor {
            None => true,
            Some(pred) => {
                let pred_id = self.peer_identifier(pred).await?;
                ring::in_interval(pred_id, candidate_id, self.identifier, false)
            }
        };

        if should_adopt {
            info!("predecessor now {} (was {:?})", candidate_address, predecessor);
            self.set_predecessor(Some(candidate_address));
        }

        Ok(())
    }

    /// For each locally owned file the candidate now owns, push it over and
    /// drop it from our own bucket and disk. A failed migration leaves the
    /// file in our bucket untouched so the next notify retries it.
    async fn migrate_bucket_to(&self, candidate_address: &str, candidate_id: RingId) {
        let entries: Vec<(RingId, String)> = {
            let state = self.state.lock().unwrap();
            state.bucket.iter().map(|(id, name)| (*id, name.clone())).collect()
        };

        for (file_id, name) in entries {
            let candidate_owns = (ring::in_interval(file_id, candidate_id, self.identifier, false)
                && file_id != self.identifier)
                || file_id == candidate_id;
            if !candidate_owns {
                continue;
            }

            let content = match self.store.read(&name) {
                Ok(content) => content,
                Err(e) => {
                    warn!("handoff: failed reading {} locally, will retry: {}", name, e);
                    continue;
                }
            };

            match self.peer_save_file(candidate_address, file_id, name.clone(), content).await {
                Ok(()) => {
                    self.state.lock().unwrap().bucket.remove(&file_id);
                    if let Err(e) = self.store.remove(&name) {
                        warn!("handoff: moved {} but failed deleting local copy: {}", name, e);
                    }
                }
                Err(e) => {
                    warn!("handoff: save_file for {} to {} failed, will retry: {}", name, candidate_address, e);
                }
            }
        }
    }
}
