//! Local backing storage for the bucket: files live under
//! `<base_dir>/<node identifier>/<name>`, one file per ring entry, no index
//! or metadata sidecar.

use std::path::{Path, PathBuf};

use crate::ring::RingId;

#[derive(Debug, Clone)]
pub struct BlobStore {
    node_dir: PathBuf,
}

impl BlobStore {
    pub fn new(base_dir: impl AsRef<Path>, identifier: RingId) -> std::io::Result<Self> {
        let node_dir = base_dir.as_ref().join(identifier.to_string());
        std::fs::create_dir_all(&node_dir)?;
        Ok(BlobStore { node_dir })
    }

    fn path_for(&self, name: &str) -> PathBuf {
        self.node_dir.join(name)
    }

    /// Scans the node-scoped directory and returns every file found, paired
    /// with its ring id, for seeding the bucket at construction time.
    pub fn scan_existing(&self, hash: impl Fn(&[u8]) -> RingId) -> std::io::Result<Vec<(RingId, String)>> {
        let mut found = Vec::new();
        for entry in std::fs::read_dir(&self.node_dir)? {
            let entry = entry?;
            if !entry.file_type()?.is_file() {
                continue;
            }
            let name = entry.file_name().to_string_lossy().into_owned();
            let id = hash(name.as_bytes());
            found.push((id, name));
        }
        Ok(found)
    }

    pub fn read(&self, name: &str) -> std::io::Result<Vec<u8>> {
        std::fs::read(self.path_for(name))
    }

    pub fn write(&self, name: &str, content: &[u8]) -> std::io::Result<()> {
        std::fs::write(self.path_for(name), content)
    }

    pub fn remove(&self, name: &str) -> std::io::Result<()> {
        std::fs::remove_file(self.path_for(name))
    }
}
