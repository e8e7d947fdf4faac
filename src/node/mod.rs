//! Node state: the identifier, address, successor/predecessor, finger table
//! and bucket that the rest of the core reads and mutates.

pub mod finger_table;

use std::collections::HashMap;
use std::path::Path;
use std::sync::Mutex;
use std::time::Duration;

use log::debug;

use crate::error::{ChordError, ChordResult};
use crate::ring::{self, RingId};
use crate::rpc::client as rpc_client;
use crate::store::BlobStore;
use finger_table::FingerTable;

/// Everything that mutates under the maintenance tasks and RPC handlers,
/// behind one coarse lock. Per the concurrency design, outbound RPCs are
/// never issued while this lock is held.
pub(crate) struct MutableState {
    pub successor: String,
    pub predecessor: Option<String>,
    pub fingers: FingerTable,
    pub next_finger: usize,
    pub bucket: HashMap<RingId, String>,
}

pub struct ChordNode {
    pub identifier: RingId,
    pub address: String,
    pub(crate) timeout: Duration,
    pub(crate) store: BlobStore,
    pub(crate) state: Mutex<MutableState>,
}

impl ChordNode {
    /// Builds a solo node: successor is self, predecessor is unknown, every
    /// finger points at self, and the bucket is seeded from whatever files
    /// already sit under `base_dir/<identifier>`.
    pub fn new(
        address: String,
        identifier_seed: Option<&str>,
        base_dir: impl AsRef<Path>,
        timeout: Duration,
    ) -> ChordResult<Self> {
        let preimage = identifier_seed.filter(|s| !s.is_empty()).unwrap_or(&address);
        let identifier = ring::hash_to_ring(preimage.as_bytes());

        let store = BlobStore::new(base_dir, identifier)?;
        let bucket: HashMap<RingId, String> = store
            .scan_existing(ring::hash_to_ring)?
            .into_iter()
            .collect();
        debug!("seeded bucket with {} pre-existing file(s)", bucket.len());

        let fingers = FingerTable::new_self(identifier, &address);

        Ok(ChordNode {
            identifier,
            address: address.clone(),
            timeout,
            store,
            state: Mutex::new(MutableState {
                successor: address,
                predecessor: None,
                fingers,
                next_finger: 0,
                bucket,
            }),
        })
    }

    pub fn successor(&self) -> String {
        self.state.lock().unwrap().successor.clone()
    }

    pub fn predecessor(&self) -> Option<String> {
        self.state.lock().unwrap().predecessor.clone()
    }

    pub fn set_successor(&self, address: String) {
        self.state.lock().unwrap().successor = address;
    }

    pub fn set_predecessor(&self, address: Option<String>) {
        self.state.lock().unwrap().predecessor = address;
    }

    /// Used once at join time: seed the successor from the bootstrap peer's
    /// answer before the maintenance tasks take over.
    pub fn set_successor_from_join(&self, address: String) {
        self.set_successor(address);
    }

    pub fn snapshot_fingers(&self) -> FingerTable {
        self.state.lock().unwrap().fingers.clone()
    }

    /// Advances the fix-fingers cursor, wrapping from `m` back to `1`, and
    /// returns the logical finger index (`1..=RING_BITS`) to refresh next.
    pub fn advance_next_finger(&self) -> usize {
        let mut state = self.state.lock().unwrap();
        let bits = ring::RING_BITS as usize;
        state.next_finger = if state.next_finger >= bits { 1 } else { state.next_finger + 1 };
        state.next_finger
    }

    /// Records `target` as finger `logical_k`'s target; its address is only
    /// overwritten when `new_address` is non-empty and differs from what is
    /// already stored.
    pub fn update_finger(&self, logical_k: usize, target: RingId, new_address: Option<String>) {
        let mut state = self.state.lock().unwrap();
        let index = logical_k - 1;
        let address = match new_address {
            Some(addr) if !addr.is_empty() && addr != state.fingers.get(index).address => addr,
            _ => state.fingers.get(index).address.clone(),
        };
        state.fingers.set(index, target, address);
    }

    /// The identifier of a peer, special-cased to a local read when the
    /// address is our own: dialing ourselves over the RPC transport would
    /// work (the listener is always up) but is wasted round-trip latency,
    /// and some peers in the wild refuse self-connections outright.
    pub(crate) async fn peer_identifier(&self, address: &str) -> ChordResult<RingId> {
        if address == self.address {
            return Ok(self.identifier);
        }
        rpc_client::get_identifier(address, self.timeout).await
    }

    pub(crate) async fn peer_predecessor(&self, address: &str) -> ChordResult<Option<String>> {
        if address == self.address {
            return Ok(self.predecessor());
        }
        let reply = rpc_client::get_predecessor(address, self.timeout).await?;
        Ok(if reply.is_empty() { None } else { Some(reply) })
    }

    pub(crate) async fn peer_notify(&self, target: &str, candidate_address: &str) -> ChordResult<()> {
        if target == self.address {
            return self.handle_notify(candidate_address.to_string()).await;
        }
        rpc_client::notify(target, candidate_address, self.timeout).await
    }

    pub(crate) async fn peer_save_file(
        &self,
        target: &str,
        id: RingId,
        name: String,
        content: Vec<u8>,
    ) -> ChordResult<()> {
        if target == self.address {
            return self.handle_save_file(id, name, content);
        }
        rpc_client::save_file(target, id, name, content, self.timeout).await
    }

    /// Probes predecessor liveness: opening a transport connection suffices,
    /// no application-level ping is required.
    pub(crate) async fn probe_liveness(&self, address: &str) -> bool {
        if address == self.address {
            return true;
        }
        rpc_client::health_probe(address, self.timeout).await.is_ok()
    }

    pub fn handle_save_file(&self, id: RingId, name: String, content: Vec<u8>) -> ChordResult<()> {
        let already_present = {
            let state = self.state.lock().unwrap();
            state.bucket.contains_key(&id)
        };
        if already_present {
            return Ok(());
        }
        self.store.write(&name, &content)?;
        self.state.lock().unwrap().bucket.insert(id, name);
        Ok(())
    }

    pub fn handle_get_file(&self, id: RingId) -> ChordResult<(String, Vec<u8>)> {
        let name = {
            let state = self.state.lock().unwrap();
            state
                .bucket
                .get(&id)
                .cloned()
                .ok_or_else(|| ChordError::FileNotFound(id.to_string()))?
        };
        let content = self.store.read(&name)?;
        Ok((name, content))
    }
}
