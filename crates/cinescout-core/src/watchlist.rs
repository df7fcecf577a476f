use anyhow::Result;
use cinescout_models::WatchlistEntry;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::storage::SnapshotStorage;

const SNAPSHOT_VERSION: u32 = 1;

#[derive(Debug, Serialize, Deserialize)]
struct Snapshot {
    version: u32,
    entries: Vec<WatchlistEntry>,
}

/// The saved-movie set, one entry per imdb_id, insertion-ordered.
///
/// Every mutation writes the full set back through the storage
/// collaborator before returning, so a reader of the underlying slot
/// always sees the latest set.
pub struct WatchlistStore<S: SnapshotStorage> {
    storage: S,
    entries: Vec<WatchlistEntry>,
}

impl<S: SnapshotStorage> WatchlistStore<S> {
    /// Load the persisted set. A missing or corrupt payload falls open
    /// to an empty watchlist; this never fails.
    pub fn load(storage: S) -> Self {
        let entries = match storage.read() {
            Ok(Some(raw)) => decode_snapshot(&raw),
            Ok(None) => Vec::new(),
            Err(err) => {
                warn!(error = %err, "failed to read watchlist storage, starting empty");
                Vec::new()
            }
        };
        debug!(count = entries.len(), "watchlist loaded");
        Self { storage, entries }
    }

    /// Insert if the id is not already present. Returns whether the set
    /// changed; an already-present id is a no-op.
    pub fn add(&mut self, entry: WatchlistEntry) -> Result<bool> {
        if self.contains(&entry.imdb_id) {
            debug!(imdb_id = %entry.imdb_id, "already in watchlist");
            return Ok(false);
        }
        self.entries.push(entry);
        self.persist()?;
        Ok(true)
    }

    /// Remove any entry with this id. Removing a non-member is a no-op,
    /// not an error.
    pub fn remove(&mut self, imdb_id: &str) -> Result<bool> {
        let before = self.entries.len();
        self.entries.retain(|entry| entry.imdb_id != imdb_id);
        if self.entries.len() == before {
            return Ok(false);
        }
        self.persist()?;
        Ok(true)
    }

    pub fn contains(&self, imdb_id: &str) -> bool {
        self.entries.iter().any(|entry| entry.imdb_id == imdb_id)
    }

    pub fn entries(&self) -> &[WatchlistEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) -> Result<()> {
        self.entries.clear();
        self.persist()
    }

    fn persist(&self) -> Result<()> {
        let snapshot = Snapshot {
            version: SNAPSHOT_VERSION,
            entries: self.entries.clone(),
        };
        let raw = serde_json::to_string(&snapshot)?;
        self.storage.write(&raw)
    }
}

fn decode_snapshot(raw: &str) -> Vec<WatchlistEntry> {
    if let Ok(snapshot) = serde_json::from_str::<Snapshot>(raw) {
        return snapshot.entries;
    }
    // Payloads written by the browser version were a bare array
    if let Ok(entries) = serde_json::from_str::<Vec<WatchlistEntry>>(raw) {
        return entries;
    }
    warn!("watchlist payload did not parse, starting empty");
    Vec::new()
}
