//! Durable key-value backends for client-scoped state.
//!
//! The wall only needs a get/set-by-key string store that survives restarts of the same client.
//! [`KeyValueStore`] is that seam; [`FileStore`] keeps one file per key on local disk and
//! [`MemoryStore`] keeps everything in a `HashMap` for tests and throwaway sessions.
//!
//! # File layout
//!
//! ```text
//! <data_dir>/
//! └── likedStories.json     # one file per key, value stored verbatim
//! ```
//!
//! Keys are restricted to ASCII alphanumerics, `-` and `_` so that a key always names a file
//! directly inside the data directory.

use crate::constants::STORAGE_FILE_EXTENSION;
use crate::{StorageError, StorageResult};
use std::collections::HashMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

const MAX_KEY_LEN: usize = 128;

/// A string key-value store that outlives a single session.
pub trait KeyValueStore {
    /// Reads the value stored under `key`, or `None` if nothing has been written yet.
    fn get(&self, key: &str) -> StorageResult<Option<String>>;

    /// Replaces the value stored under `key`.
    fn set(&mut self, key: &str, value: &str) -> StorageResult<()>;
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for Box<S> {
    fn get(&self, key: &str) -> StorageResult<Option<String>> {
        (**self).get(key)
    }

    fn set(&mut self, key: &str, value: &str) -> StorageResult<()> {
        (**self).set(key, value)
    }
}

/// Validates that a storage key is safe to use as a file name.
///
/// # Errors
///
/// Returns `StorageError::InvalidKey` if the key is empty, longer than 128 bytes, or contains
/// anything other than ASCII alphanumerics, `-` and `_`.
pub fn validate_key(key: &str) -> StorageResult<()> {
    if key.is_empty() {
        return Err(StorageError::InvalidKey("key cannot be empty".into()));
    }

    if key.len() > MAX_KEY_LEN {
        return Err(StorageError::InvalidKey(format!(
            "key exceeds maximum length of {} characters",
            MAX_KEY_LEN
        )));
    }

    let ok = key
        .bytes()
        .all(|b| matches!(b, b'0'..=b'9' | b'a'..=b'z' | b'A'..=b'Z' | b'-' | b'_'));

    if !ok {
        return Err(StorageError::InvalidKey(format!(
            "key '{}' contains invalid characters (only alphanumeric, '-', '_' allowed)",
            key
        )));
    }

    Ok(())
}

/// In-memory backend. Nothing survives the process, but values survive moving the store
/// between owners, which is enough to simulate a reload in tests.
#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a store pre-populated with a single entry.
    pub fn with_entry(key: impl Into<String>, value: impl Into<String>) -> Self {
        let mut entries = HashMap::new();
        entries.insert(key.into(), value.into());
        Self { entries }
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> StorageResult<Option<String>> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> StorageResult<()> {
        self.entries.insert(key.to_owned(), value.to_owned());
        Ok(())
    }
}

/// File-per-key backend rooted at a data directory.
///
/// The directory is created lazily on the first write. Writes go to a sibling temporary file
/// which is then renamed over the target, so a crash mid-write leaves the previous value intact.
#[derive(Debug)]
pub struct FileStore {
    data_dir: PathBuf,
}

impl FileStore {
    /// Creates a store rooted at `data_dir`.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Unavailable` if `data_dir` exists but is not a directory.
    pub fn new(data_dir: impl Into<PathBuf>) -> StorageResult<Self> {
        let data_dir = data_dir.into();

        if data_dir.exists() && !data_dir.is_dir() {
            return Err(StorageError::Unavailable(format!(
                "Path is not a directory: {}",
                data_dir.display()
            )));
        }

        Ok(Self { data_dir })
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    /// Returns the file that backs `key`.
    pub fn path_for(&self, key: &str) -> StorageResult<PathBuf> {
        validate_key(key)?;
        Ok(self
            .data_dir
            .join(format!("{}.{}", key, STORAGE_FILE_EXTENSION)))
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> StorageResult<Option<String>> {
        let path = self.path_for(key)?;
        match fs::read_to_string(&path) {
            Ok(contents) => Ok(Some(contents)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(StorageError::Io(e)),
        }
    }

    fn set(&mut self, key: &str, value: &str) -> StorageResult<()> {
        let path = self.path_for(key)?;
        fs::create_dir_all(&self.data_dir)?;

        let tmp_path = path.with_extension(format!("{}.tmp", STORAGE_FILE_EXTENSION));
        fs::write(&tmp_path, value)?;
        fs::rename(&tmp_path, &path)?;

        tracing::debug!("wrote {} bytes to {}", value.len(), path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_validate_key_accepts_safe_keys() {
        assert!(validate_key("likedStories").is_ok());
        assert!(validate_key("wall-likes_v2").is_ok());
    }

    #[test]
    fn test_validate_key_rejects_unsafe_keys() {
        for key in ["", "../escape", "a/b", "with space", "dot.json", "قصص"] {
            assert!(
                matches!(validate_key(key), Err(StorageError::InvalidKey(_))),
                "expected {key:?} to be rejected"
            );
        }
        assert!(validate_key(&"k".repeat(129)).is_err());
    }

    #[test]
    fn test_memory_store_get_set() {
        let mut store = MemoryStore::new();
        assert_eq!(store.get("k").unwrap(), None);

        store.set("k", "[1]").unwrap();
        store.set("k", "[1,2]").unwrap();
        assert_eq!(store.get("k").unwrap().as_deref(), Some("[1,2]"));
    }

    #[test]
    fn test_file_store_missing_key_is_none() {
        let temp = TempDir::new().unwrap();
        let store = FileStore::new(temp.path().join("data")).unwrap();

        assert_eq!(store.get("likedStories").unwrap(), None);
        // Reading does not create the directory.
        assert!(!store.data_dir().exists());
    }

    #[test]
    fn test_file_store_persists_across_instances() {
        let temp = TempDir::new().unwrap();
        let dir = temp.path().join("data");

        let mut first = FileStore::new(&dir).unwrap();
        first.set("likedStories", "[3,1]").unwrap();

        let second = FileStore::new(&dir).unwrap();
        assert_eq!(second.get("likedStories").unwrap().as_deref(), Some("[3,1]"));
        assert!(dir.join("likedStories.json").is_file());
        assert!(!dir.join("likedStories.json.tmp").exists());
    }

    #[test]
    fn test_file_store_rejects_invalid_key() {
        let temp = TempDir::new().unwrap();
        let mut store = FileStore::new(temp.path()).unwrap();

        assert!(matches!(
            store.set("../outside", "x"),
            Err(StorageError::InvalidKey(_))
        ));
        assert!(matches!(store.get("a/b"), Err(StorageError::InvalidKey(_))));
    }

    #[test]
    fn test_file_store_root_not_directory() {
        let temp = TempDir::new().unwrap();
        let file = temp.path().join("not_a_dir");
        fs::write(&file, "x").unwrap();

        assert!(matches!(
            FileStore::new(&file),
            Err(StorageError::Unavailable(_))
        ));
    }

    #[test]
    fn test_boxed_store_delegates() {
        let mut store: Box<dyn KeyValueStore> = Box::new(MemoryStore::new());
        store.set("k", "v").unwrap();
        assert_eq!(store.get("k").unwrap().as_deref(), Some("v"));
    }
}
