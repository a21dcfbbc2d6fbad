//! Key/value backends standing in for browser storage.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::error::TourError;

/// Durable string storage addressed by key.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>, TourError>;
    fn set(&mut self, key: &str, value: &str) -> Result<(), TourError>;
}

/// In-process storage. Lost when dropped.
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, TourError> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), TourError> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// One file per key under a directory.
#[derive(Debug, Clone)]
pub struct FileStore {
    root: PathBuf,
}

impl FileStore {
    /// Uses `root` as the storage directory, creating it on first write.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.root.join(format!("{}.json", encode_key(key)))
    }
}

/// File name for a key. Bytes outside `[A-Za-z0-9.-]`, `_` included, become
/// `_XX` hex escapes, so distinct keys never share a file.
fn encode_key(key: &str) -> String {
    let mut name = String::with_capacity(key.len());
    for byte in key.bytes() {
        if byte.is_ascii_alphanumeric() || matches!(byte, b'-' | b'.') {
            name.push(char::from(byte));
        } else {
            name.push_str(&format!("_{byte:02X}"));
        }
    }
    name
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, TourError> {
        let path = self.path_for(key);
        match std::fs::read_to_string(&path) {
            Ok(contents) => Ok(Some(contents)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), TourError> {
        std::fs::create_dir_all(&self.root)?;
        let path = self.path_for(key);
        let tmp = path.with_extension("json.tmp");
        std::fs::write(&tmp, value)?;
        std::fs::rename(&tmp, &path)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_store_roundtrip() {
        let mut store = MemoryStore::new();
        assert_eq!(store.get("a").unwrap(), None);
        store.set("a", "1").unwrap();
        assert_eq!(store.get("a").unwrap().as_deref(), Some("1"));
    }

    #[test]
    fn file_store_creates_directory_on_write() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = FileStore::new(dir.path().join("nested"));
        assert_eq!(store.get("shift_tour_v1__anon").unwrap(), None);

        store.set("shift_tour_v1__anon", "{}").unwrap();
        assert_eq!(
            store.get("shift_tour_v1__anon").unwrap().as_deref(),
            Some("{}")
        );
    }

    #[test]
    fn file_store_escapes_unsafe_keys() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = FileStore::new(dir.path());
        store.set("p__u_../../etc", "x").unwrap();

        let names: Vec<_> = std::fs::read_dir(dir.path())
            .unwrap()
            .map(|e| e.unwrap().file_name().into_string().unwrap())
            .collect();
        assert_eq!(names, vec!["p_5F_5Fu_5F.._2F.._2Fetc.json".to_string()]);
        assert_eq!(store.get("p__u_../../etc").unwrap().as_deref(), Some("x"));
    }

    #[test]
    fn file_store_keeps_similar_keys_apart() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = FileStore::new(dir.path());
        store.set("t__u_a.b@x.com", "at").unwrap();
        store.set("t__u_a/b", "slash").unwrap();

        assert_eq!(store.get("t__u_a.b_x.com").unwrap(), None);
        assert_eq!(store.get("t__u_a_b").unwrap(), None);
        assert_eq!(store.get("t__u_a.b@x.com").unwrap().as_deref(), Some("at"));
        assert_eq!(store.get("t__u_a/b").unwrap().as_deref(), Some("slash"));
    }

    #[test]
    fn encoded_names_keep_safe_characters() {
        assert_eq!(encode_key("shift-tour.v1"), "shift-tour.v1");
        assert_eq!(encode_key("a_b"), "a_5Fb");
        assert_eq!(encode_key("é"), "_C3_A9");
    }
}
