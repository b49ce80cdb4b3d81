//! Durable storage for the business collection.

use std::path::PathBuf;

use repsim_core::BusinessRecord;

use crate::error::SnapshotError;

/// Stores the whole collection as a single blob.
///
/// Loading must never fail the caller: absent or corrupt data degrades to an
/// empty collection. Saving reports its error so the store can log it, but a
/// failed save never fails the operation that triggered it.
pub trait SnapshotStore {
    fn load(&self) -> Vec<BusinessRecord>;

    /// # Errors
    ///
    /// Returns [`SnapshotError`] if the collection cannot be written.
    fn save(&self, records: &[BusinessRecord]) -> Result<(), SnapshotError>;
}

impl<S: SnapshotStore> SnapshotStore for std::sync::Arc<S> {
    fn load(&self) -> Vec<BusinessRecord> {
        S::load(self)
    }

    fn save(&self, records: &[BusinessRecord]) -> Result<(), SnapshotError> {
        S::save(self, records)
    }
}

/// Persists the collection as one pretty-printed JSON file.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl SnapshotStore for JsonFileStore {
    fn load(&self) -> Vec<BusinessRecord> {
        let raw = match std::fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Vec::new(),
            Err(e) => {
                tracing::warn!(
                    path = %self.path.display(),
                    error = %e,
                    "failed to read business snapshot, starting with an empty collection"
                );
                return Vec::new();
            }
        };

        match serde_json::from_str(&raw) {
            Ok(records) => records,
            Err(e) => {
                tracing::warn!(
                    path = %self.path.display(),
                    error = %e,
                    "business snapshot is not valid JSON, starting with an empty collection"
                );
                Vec::new()
            }
        }
    }

    fn save(&self, records: &[BusinessRecord]) -> Result<(), SnapshotError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        let json = serde_json::to_string_pretty(records)?;
        std::fs::write(&self.path, json)?;
        Ok(())
    }
}

/// In-memory snapshot store for tests and ephemeral sessions.
#[derive(Debug, Default)]
pub struct MemoryStore {
    records: std::sync::Mutex<Vec<BusinessRecord>>,
}

impl SnapshotStore for MemoryStore {
    fn load(&self) -> Vec<BusinessRecord> {
        self.records.lock().expect("snapshot mutex poisoned").clone()
    }

    fn save(&self, records: &[BusinessRecord]) -> Result<(), SnapshotError> {
        *self.records.lock().expect("snapshot mutex poisoned") = records.to_vec();
        Ok(())
    }
}
