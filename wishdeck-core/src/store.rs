/// Durable local store: JSON snapshots of both collections.
///
/// Reads and writes are synchronous and never propagate failures
/// outward. A missing, unreadable, or corrupt snapshot reads as an
/// empty collection; a failed write is logged and ignored. Durability
/// is best-effort, in-memory correctness never depends on it.
use std::fs;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::{Error, Result};
use crate::types::{Card, Stack};

const STACKS_FILE: &str = "stacks.json";
const CARDS_FILE: &str = "cards.json";

/// File-backed store holding the persisted stack and card snapshots.
///
/// Only the synchronization engine writes to it; presentation code
/// never touches it directly.
#[derive(Debug, Clone)]
pub struct LocalStore {
    dir: PathBuf,
}

impl LocalStore {
    /// Open a store rooted at `dir`, creating the directory if needed.
    /// A directory that cannot be created still yields a usable store;
    /// it will simply read empty and drop writes.
    pub fn open(dir: impl Into<PathBuf>) -> Self {
        let dir = dir.into();
        if let Err(e) = fs::create_dir_all(&dir) {
            tracing::warn!(dir = %dir.display(), error = %e, "failed to create store directory");
        }
        Self { dir }
    }

    pub fn path(&self) -> &Path {
        &self.dir
    }

    pub fn stacks(&self) -> Vec<Stack> {
        self.read(STACKS_FILE)
    }

    pub fn save_stacks(&self, stacks: &[Stack]) {
        self.write(STACKS_FILE, stacks);
    }

    pub fn cards(&self) -> Vec<Card> {
        self.read(CARDS_FILE)
    }

    pub fn save_cards(&self, cards: &[Card]) {
        self.write(CARDS_FILE, cards);
    }

    /// Remove both snapshot files.
    pub fn clear_all(&self) {
        for file in [STACKS_FILE, CARDS_FILE] {
            let path = self.dir.join(file);
            if let Err(e) = fs::remove_file(&path) {
                if e.kind() != std::io::ErrorKind::NotFound {
                    tracing::warn!(file, error = %e, "failed to clear store file");
                }
            }
        }
    }

    fn read<T: DeserializeOwned>(&self, file: &str) -> Vec<T> {
        match self.try_read(file) {
            Ok(records) => records,
            Err(e) => {
                tracing::warn!(file, error = %e, "store read failed, treating as empty");
                Vec::new()
            }
        }
    }

    fn try_read<T: DeserializeOwned>(&self, file: &str) -> Result<Vec<T>> {
        let path = self.dir.join(file);
        if !path.exists() {
            return Ok(Vec::new());
        }
        let json = fs::read_to_string(&path)
            .map_err(|e| Error::StorageFailure(format!("read {}: {}", file, e)))?;
        serde_json::from_str(&json)
            .map_err(|e| Error::StorageFailure(format!("decode {}: {}", file, e)))
    }

    fn write<T: Serialize>(&self, file: &str, records: &[T]) {
        if let Err(e) = self.try_write(file, records) {
            tracing::warn!(file, error = %e, "store write failed, durability skipped");
        }
    }

    fn try_write<T: Serialize>(&self, file: &str, records: &[T]) -> Result<()> {
        let json = serde_json::to_string(records)
            .map_err(|e| Error::StorageFailure(format!("encode {}: {}", file, e)))?;
        fs::write(self.dir.join(file), json)
            .map_err(|e| Error::StorageFailure(format!("write {}: {}", file, e)))
    }
}
