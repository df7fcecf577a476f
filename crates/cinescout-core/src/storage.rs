use anyhow::Result;
use std::path::{Path, PathBuf};

/// A single string slot of persistent storage.
pub trait SnapshotStorage {
    /// None when nothing has been persisted yet.
    fn read(&self) -> Result<Option<String>>;

    /// Overwrite the slot; the payload must be durable when this returns.
    fn write(&self, payload: &str) -> Result<()>;
}

/// Snapshot slot backed by one file on disk.
pub struct FileStorage {
    path: PathBuf,
}

impl FileStorage {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SnapshotStorage for FileStorage {
    fn read(&self) -> Result<Option<String>> {
        if !self.path.exists() {
            return Ok(None);
        }
        Ok(Some(std::fs::read_to_string(&self.path)?))
    }

    fn write(&self, payload: &str) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        // Atomic write: write to temp file, then rename
        let temp_path = self.path.with_extension("tmp");
        std::fs::write(&temp_path, payload)?;
        std::fs::rename(&temp_path, &self.path)?;
        Ok(())
    }
}
