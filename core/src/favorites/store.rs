use super::command::UndoCommand;
use crate::models::{Attraction, AttractionId, FavoriteItem};
use crate::storage::KeyValueStore;
use tracing::{debug, error, warn};

/// Storage key holding the serialized favorites list
pub const DEFAULT_STORAGE_KEY: &str = "@potrero_favorites";

/// Result of a [`FavoritesStore::toggle`] call
#[derive(Debug, Clone, PartialEq)]
pub struct Toggled {
    /// `true` when the attraction became a favorite, `false` when it was removed
    pub was_added: bool,
    /// Display name of the toggled attraction
    pub label: String,
    /// Command that reverses this toggle
    pub undo: UndoCommand,
}

/// Owns the list of favorited attractions and keeps it persisted.
///
/// Mutations update memory first and then write the whole list under a single
/// key. Durability is best effort: storage failures are logged and the
/// in-memory list stays authoritative for the rest of the session. No
/// operation returns an error to the caller.
pub struct FavoritesStore<S: KeyValueStore> {
    storage: S,
    key: String,
    items: Vec<FavoriteItem>,
    loading: bool,
}

impl<S: KeyValueStore> FavoritesStore<S> {
    /// Create a store over `storage` using [`DEFAULT_STORAGE_KEY`]
    pub fn new(storage: S) -> Self {
        Self::with_key(storage, DEFAULT_STORAGE_KEY)
    }

    /// Create a store persisting under a custom key
    pub fn with_key(storage: S, key: impl Into<String>) -> Self {
        Self {
            storage,
            key: key.into(),
            items: Vec::new(),
            loading: true,
        }
    }

    /// Read the persisted list. A missing, unreadable or corrupt record
    /// yields an empty list.
    pub fn load(&mut self) {
        self.loading = true;
        self.items = match self.storage.read(&self.key) {
            Ok(Some(bytes)) => match serde_json::from_slice::<Vec<FavoriteItem>>(&bytes) {
                Ok(items) => dedup_by_id(items),
                Err(err) => {
                    warn!(key = %self.key, error = %err, "discarding corrupt favorites record");
                    Vec::new()
                }
            },
            Ok(None) => Vec::new(),
            Err(err) => {
                error!(key = %self.key, error = %err, "failed to read favorites");
                Vec::new()
            }
        };
        self.loading = false;
        debug!(count = self.items.len(), "favorites loaded");
    }

    /// `true` until the first [`load`](Self::load) completes
    pub fn loading(&self) -> bool {
        self.loading
    }

    /// Favorites in insertion order
    pub fn items(&self) -> &[FavoriteItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn get(&self, id: &AttractionId) -> Option<&FavoriteItem> {
        self.items.iter().find(|item| &item.id == id)
    }

    pub fn is_favorite(&self, id: &AttractionId) -> bool {
        self.items.iter().any(|item| &item.id == id)
    }

    /// Append `attraction` to the favorites.
    ///
    /// Adding an id that is already present is a logged no-op: the existing
    /// entry and its `date_added` are kept. Returns whether an item was added.
    pub fn add(&mut self, attraction: &Attraction) -> bool {
        if self.is_favorite(&attraction.id) {
            warn!(id = %attraction.id, "attraction is already a favorite");
            return false;
        }
        self.items.push(FavoriteItem::new(attraction));
        self.persist();
        true
    }

    /// Remove the favorite with `id`. Returns whether an item was removed.
    pub fn remove(&mut self, id: &AttractionId) -> bool {
        let before = self.items.len();
        self.items.retain(|item| &item.id != id);
        if self.items.len() == before {
            return false;
        }
        self.persist();
        true
    }

    /// Remove the attraction if it is a favorite, add it otherwise
    pub fn toggle(&mut self, attraction: &Attraction) -> Toggled {
        let previous = match self.get(&attraction.id) {
            Some(existing) => existing.to_attraction(),
            None => attraction.clone(),
        };
        let was_added = if self.is_favorite(&attraction.id) {
            self.remove(&attraction.id);
            false
        } else {
            self.add(attraction)
        };
        Toggled {
            was_added,
            label: previous.label(),
            undo: UndoCommand::ToggleFavorite {
                id: previous.id.clone(),
                previous,
            },
        }
    }

    /// Drop every favorite and delete the persisted record
    pub fn clear_all(&mut self) {
        self.items.clear();
        if let Err(err) = self.storage.delete(&self.key) {
            error!(key = %self.key, error = %err, "failed to delete favorites record");
        }
    }

    /// The storage backend this store writes to
    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    fn persist(&self) {
        let bytes = match serde_json::to_vec(&self.items) {
            Ok(bytes) => bytes,
            Err(err) => {
                error!(error = %err, "failed to serialize favorites");
                return;
            }
        };
        match self.storage.write(&self.key, &bytes) {
            Ok(()) => debug!(key = %self.key, count = self.items.len(), "favorites saved"),
            Err(err) => error!(key = %self.key, error = %err, "failed to save favorites"),
        }
    }
}

fn dedup_by_id(items: Vec<FavoriteItem>) -> Vec<FavoriteItem> {
    let mut unique: Vec<FavoriteItem> = Vec::with_capacity(items.len());
    for item in items {
        if unique.iter().any(|kept| kept.id == item.id) {
            warn!(id = %item.id, "dropping duplicate favorite from stored record");
            continue;
        }
        unique.push(item);
    }
    unique
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::{MemoryStore, SqliteStore};
    use crate::{Error, Result};
    use tempfile::tempdir;
    use tracing_test::traced_test;

    struct FailingStore;

    impl KeyValueStore for FailingStore {
        fn read(&self, _key: &str) -> Result<Option<Vec<u8>>> {
            Err(Error::Storage("device unavailable".to_string()))
        }

        fn write(&self, _key: &str, _value: &[u8]) -> Result<()> {
            Err(Error::Storage("disk full".to_string()))
        }

        fn delete(&self, _key: &str) -> Result<()> {
            Err(Error::Storage("disk full".to_string()))
        }
    }

    fn salto() -> Attraction {
        Attraction::new("salto-moneda")
            .with_attribute("title", "Salto de la Moneda")
            .with_attribute("category", "water")
    }

    fn loaded<S: KeyValueStore>(storage: S) -> FavoritesStore<S> {
        let mut store = FavoritesStore::new(storage);
        store.load();
        store
    }

    #[test]
    fn test_loading_until_load() {
        let mut store = FavoritesStore::new(MemoryStore::new());
        assert!(store.loading());
        store.load();
        assert!(!store.loading());
        assert!(store.is_empty());
    }

    #[test]
    fn test_add_makes_favorite() {
        let mut store = loaded(MemoryStore::new());
        let attraction = salto();

        assert!(!store.is_favorite(&attraction.id));
        assert!(store.add(&attraction));
        assert!(store.is_favorite(&attraction.id));
        assert_eq!(store.items()[0].title(), Some("Salto de la Moneda"));
    }

    #[test]
    fn test_add_preserves_insertion_order() {
        let mut store = loaded(MemoryStore::new());
        store.add(&Attraction::new(3));
        store.add(&Attraction::new(1));
        store.add(&Attraction::new("dique"));

        let ids: Vec<String> = store.items().iter().map(|i| i.id.to_string()).collect();
        assert_eq!(ids, vec!["3", "1", "dique"]);
    }

    #[test]
    fn test_duplicate_add_is_rejected() {
        let mut store = loaded(MemoryStore::new());
        let attraction = salto();

        assert!(store.add(&attraction));
        let first_added = store.items()[0].date_added;
        assert!(!store.add(&attraction.clone().with_attribute("title", "Renamed")));

        assert_eq!(store.len(), 1);
        assert_eq!(store.items()[0].date_added, first_added);
        assert_eq!(store.items()[0].title(), Some("Salto de la Moneda"));
    }

    #[test]
    fn test_double_toggle_restores_state() {
        let mut store = loaded(MemoryStore::new());
        let attraction = salto();

        let first = store.toggle(&attraction);
        assert!(first.was_added);
        assert!(store.is_favorite(&attraction.id));

        let second = store.toggle(&attraction);
        assert!(!second.was_added);
        assert!(!store.is_favorite(&attraction.id));
        assert_eq!(second.label, "Salto de la Moneda");
    }

    #[test]
    fn test_remove_absent_is_noop() {
        let storage = MemoryStore::new();
        let mut store = loaded(&storage);
        store.add(&Attraction::new(1));
        let before = store.items().to_vec();

        assert!(!store.remove(&AttractionId::Int(2)));
        assert_eq!(store.items(), before.as_slice());
    }

    #[test]
    fn test_clear_all_deletes_record() {
        let storage = MemoryStore::new();
        {
            let mut store = loaded(&storage);
            store.add(&salto());
            assert!(storage.contains(DEFAULT_STORAGE_KEY));

            store.clear_all();
            assert!(store.is_empty());
            assert!(!storage.contains(DEFAULT_STORAGE_KEY));
        }

        let restarted = loaded(&storage);
        assert!(restarted.is_empty());
    }

    #[test]
    fn test_restart_round_trip() {
        let storage = MemoryStore::new();
        let attraction = salto().with_attribute("rating", 4.5);
        {
            let mut store = loaded(&storage);
            store.add(&attraction);
        }

        let restarted = loaded(&storage);
        assert_eq!(restarted.len(), 1);
        let item = &restarted.items()[0];
        assert_eq!(item.id, attraction.id);
        assert_eq!(item.attributes, attraction.attributes);
    }

    #[test]
    fn test_restart_round_trip_sqlite() {
        let dir = tempdir().unwrap();
        let db_path = dir.path().join("favorites.db");
        {
            let mut store = loaded(SqliteStore::open(&db_path).unwrap());
            store.add(&Attraction::new(9).with_attribute("title", "Mirador"));
            store.add(&salto());
            store.remove(&AttractionId::Int(9));
        }

        let restarted = loaded(SqliteStore::open(&db_path).unwrap());
        assert_eq!(restarted.len(), 1);
        assert!(restarted.is_favorite(&AttractionId::from("salto-moneda")));
    }

    #[test]
    fn test_custom_key() {
        let storage = MemoryStore::new();
        let mut store = FavoritesStore::with_key(&storage, "@other");
        store.load();
        store.add(&Attraction::new(1));

        assert_eq!(store.key(), "@other");
        assert!(storage.contains("@other"));
        assert!(!storage.contains(DEFAULT_STORAGE_KEY));
    }

    #[test]
    #[traced_test]
    fn test_corrupt_record_loads_empty() {
        let storage = MemoryStore::new();
        storage.write(DEFAULT_STORAGE_KEY, b"{not json").unwrap();

        let store = loaded(&storage);
        assert!(store.is_empty());
        assert!(!store.loading());
        assert!(logs_contain("discarding corrupt favorites record"));
    }

    #[test]
    fn test_duplicates_in_record_are_dropped() {
        let storage = MemoryStore::new();
        storage
            .write(
                DEFAULT_STORAGE_KEY,
                br#"[{"id": 1, "dateAdded": "2024-01-01T00:00:00Z", "title": "A"},
                     {"id": 1, "dateAdded": "2024-02-01T00:00:00Z", "title": "B"}]"#,
            )
            .unwrap();

        let store = loaded(&storage);
        assert_eq!(store.len(), 1);
        assert_eq!(store.items()[0].title(), Some("A"));
    }

    #[test]
    #[traced_test]
    fn test_read_failure_loads_empty() {
        let store = loaded(FailingStore);
        assert!(store.is_empty());
        assert!(!store.loading());
        assert!(logs_contain("failed to read favorites"));
    }

    #[test]
    #[traced_test]
    fn test_write_failure_keeps_memory_state() {
        let mut store = loaded(FailingStore);
        let attraction = salto();

        let toggled = store.toggle(&attraction);
        assert!(toggled.was_added);
        assert!(store.is_favorite(&attraction.id));
        assert!(logs_contain("failed to save favorites"));

        store.clear_all();
        assert!(store.is_empty());
        assert!(logs_contain("failed to delete favorites record"));
    }
}
