//! Client-scoped record of liked stories.
//!
//! [`PersistedLikeSet`] remembers which stories this client has liked, written through to a
//! [`KeyValueStore`] on every change. It is a best-effort cache: unreadable or corrupt data
//! loads as an empty set, and failed writes are logged and ignored so the in-memory set keeps
//! working for the rest of the session.

use crate::storage::KeyValueStore;
use std::collections::BTreeSet;
use wall_ids::StoryId;

/// Set of liked story ids backed by durable storage.
#[derive(Debug)]
pub struct PersistedLikeSet<S> {
    storage: S,
    key: String,
    liked: BTreeSet<StoryId>,
}

impl<S: KeyValueStore> PersistedLikeSet<S> {
    /// Loads the like-set stored under `key`.
    ///
    /// Missing, unreadable or malformed records all produce an empty set.
    pub fn load(storage: S, key: impl Into<String>) -> Self {
        let key = key.into();
        let liked = read_liked(&storage, &key);

        tracing::debug!("loaded {} liked stories from '{}'", liked.len(), key);

        Self {
            storage,
            key,
            liked,
        }
    }

    pub fn contains(&self, id: StoryId) -> bool {
        self.liked.contains(&id)
    }

    pub fn len(&self) -> usize {
        self.liked.len()
    }

    pub fn is_empty(&self) -> bool {
        self.liked.is_empty()
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    /// Marks `id` as liked and persists the set. Returns false if it was already liked.
    pub fn add(&mut self, id: StoryId) -> bool {
        let inserted = self.liked.insert(id);
        if inserted {
            self.persist();
        }
        inserted
    }

    /// Clears the like on `id` and persists the set. Returns false if it was not liked.
    pub fn remove(&mut self, id: StoryId) -> bool {
        let removed = self.liked.remove(&id);
        if removed {
            self.persist();
        }
        removed
    }

    /// Gives the backend back, dropping the in-memory set.
    pub fn into_storage(self) -> S {
        self.storage
    }

    fn persist(&mut self) {
        let ids: Vec<StoryId> = self.liked.iter().copied().collect();
        let encoded = match serde_json::to_string(&ids) {
            Ok(encoded) => encoded,
            Err(e) => {
                tracing::warn!("failed to encode like-set '{}': {}", self.key, e);
                return;
            }
        };

        if let Err(e) = self.storage.set(&self.key, &encoded) {
            tracing::warn!(
                "failed to persist like-set '{}', likes will not survive reload: {}",
                self.key,
                e
            );
        }
    }
}

fn read_liked<S: KeyValueStore>(storage: &S, key: &str) -> BTreeSet<StoryId> {
    let raw = match storage.get(key) {
        Ok(Some(raw)) => raw,
        Ok(None) => return BTreeSet::new(),
        Err(e) => {
            tracing::warn!("failed to read like-set '{}': {}", key, e);
            return BTreeSet::new();
        }
    };

    match serde_json::from_str::<Vec<StoryId>>(&raw) {
        Ok(ids) => ids.into_iter().collect(),
        Err(e) => {
            tracing::warn!("ignoring malformed like-set '{}': {}", key, e);
            BTreeSet::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::{FileStore, MemoryStore};
    use crate::{StorageError, StorageResult};
    use tempfile::TempDir;

    const KEY: &str = "likedStories";

    /// Backend standing in for disabled storage or an exhausted quota.
    #[derive(Default)]
    struct FailingStore {
        write_attempts: usize,
    }

    impl KeyValueStore for FailingStore {
        fn get(&self, _key: &str) -> StorageResult<Option<String>> {
            Err(StorageError::Unavailable("storage disabled".into()))
        }

        fn set(&mut self, _key: &str, _value: &str) -> StorageResult<()> {
            self.write_attempts += 1;
            Err(StorageError::Unavailable("quota exceeded".into()))
        }
    }

    #[test]
    fn test_load_absent_is_empty() {
        let likes = PersistedLikeSet::load(MemoryStore::new(), KEY);
        assert!(likes.is_empty());
        assert_eq!(likes.key(), KEY);
    }

    #[test]
    fn test_load_existing_record() {
        let store = MemoryStore::with_entry(KEY, "[5,1,1726000000000]");
        let likes = PersistedLikeSet::load(store, KEY);

        assert_eq!(likes.len(), 3);
        assert!(likes.contains(StoryId::new(1)));
        assert!(likes.contains(StoryId::new(1_726_000_000_000)));
        assert!(!likes.contains(StoryId::new(2)));
    }

    #[test]
    fn test_load_malformed_is_empty() {
        for raw in ["not json", "{\"a\":1}", "[\"x\"]", "[-1]", ""] {
            let likes = PersistedLikeSet::load(MemoryStore::with_entry(KEY, raw), KEY);
            assert!(likes.is_empty(), "expected {raw:?} to load as empty");
        }
    }

    #[test]
    fn test_add_remove_write_through() {
        let mut likes = PersistedLikeSet::load(MemoryStore::new(), KEY);

        assert!(likes.add(StoryId::new(3)));
        assert!(!likes.add(StoryId::new(3)));
        assert!(likes.add(StoryId::new(1)));

        let store = likes.into_storage();
        assert_eq!(store.get(KEY).unwrap().as_deref(), Some("[1,3]"));

        let mut likes = PersistedLikeSet::load(store, KEY);
        assert!(likes.remove(StoryId::new(3)));
        assert!(!likes.remove(StoryId::new(3)));

        let store = likes.into_storage();
        assert_eq!(store.get(KEY).unwrap().as_deref(), Some("[1]"));
    }

    #[test]
    fn test_round_trip_through_reload() {
        let mut likes = PersistedLikeSet::load(MemoryStore::new(), KEY);
        likes.add(StoryId::new(42));

        let reloaded = PersistedLikeSet::load(likes.into_storage(), KEY);
        assert!(reloaded.contains(StoryId::new(42)));
    }

    #[test]
    fn test_round_trip_through_file_store() {
        let temp = TempDir::new().unwrap();

        let mut likes = PersistedLikeSet::load(FileStore::new(temp.path()).unwrap(), KEY);
        likes.add(StoryId::new(6));
        drop(likes);

        let reloaded = PersistedLikeSet::load(FileStore::new(temp.path()).unwrap(), KEY);
        assert!(reloaded.contains(StoryId::new(6)));
        assert_eq!(reloaded.len(), 1);
    }

    #[test]
    fn test_unavailable_storage_degrades_to_memory() {
        let mut likes = PersistedLikeSet::load(FailingStore::default(), KEY);
        assert!(likes.is_empty());

        assert!(likes.add(StoryId::new(9)));
        assert!(likes.contains(StoryId::new(9)));
        assert!(likes.remove(StoryId::new(9)));
        assert!(!likes.contains(StoryId::new(9)));

        assert_eq!(likes.into_storage().write_attempts, 2);
    }

    #[test]
    fn test_keys_are_independent() {
        let mut likes = PersistedLikeSet::load(MemoryStore::new(), "wall_a");
        likes.add(StoryId::new(1));

        let other = PersistedLikeSet::load(likes.into_storage(), "wall_b");
        assert!(other.is_empty());
    }
}
