//! Identity-scoped persistence of tour progress.
//!
//! [`ProgressStore`] never fails outward: unreadable or corrupt records load
//! as defaults, and failed writes are logged and dropped. The caller keeps
//! the in-memory value as the authoritative one for the rest of the session.

mod identity;
mod record;
mod storage;

pub use identity::{DEVICE_ID_KEY, DeviceId, Identity};
pub use record::TourProgress;
pub use storage::{FileStore, KeyValueStore, MemoryStore};

use chrono::Utc;

use crate::error::TourError;

/// Reads and writes the progress record for the current identity.
pub struct ProgressStore {
    backend: Box<dyn KeyValueStore>,
    prefix: String,
    key: String,
}

impl ProgressStore {
    pub fn new(backend: Box<dyn KeyValueStore>, prefix: impl Into<String>, identity: &Identity) -> Self {
        let prefix = prefix.into();
        let key = identity.storage_key(&prefix);
        Self {
            backend,
            prefix,
            key,
        }
    }

    /// Key the current record lives under.
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Address a different identity's record. Nothing is copied or migrated.
    pub fn set_identity(&mut self, identity: &Identity) {
        self.key = identity.storage_key(&self.prefix);
        tracing::debug!(key = %self.key, "progress store re-addressed");
    }

    /// The current identity's record, or defaults when missing or unreadable.
    pub fn load(&self) -> TourProgress {
        self.load_key(&self.key)
    }

    /// Any identity's record, or defaults when missing or unreadable.
    pub fn load_key(&self, key: &str) -> TourProgress {
        match self.read(key) {
            Ok(Some(progress)) => progress,
            Ok(None) => TourProgress::default(),
            Err(e) => {
                tracing::warn!(key, error = %e, "progress unreadable; using defaults");
                TourProgress::default()
            }
        }
    }

    /// Stamp `updated_at`, persist best-effort, and return the stamped value.
    pub fn save(&mut self, progress: &TourProgress) -> TourProgress {
        let stamped = progress.stamped(Utc::now());
        if let Err(e) = self.write(&stamped) {
            tracing::warn!(key = %self.key, error = %e, "progress not persisted");
        }
        stamped
    }

    fn read(&self, key: &str) -> Result<Option<TourProgress>, TourError> {
        let Some(raw) = self.backend.get(key)? else {
            return Ok(None);
        };
        serde_json::from_str(&raw)
            .map(Some)
            .map_err(|e| TourError::CorruptRecord {
                key: key.to_string(),
                reason: e.to_string(),
            })
    }

    fn write(&mut self, progress: &TourProgress) -> Result<(), TourError> {
        let json = serde_json::to_string(progress)?;
        self.backend.set(&self.key, &json)
    }
}
