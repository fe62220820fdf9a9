use crate::{Error, Result};
use std::collections::HashMap;
use std::sync::Mutex;

/// Durable key-value storage used for the favorites record.
///
/// Methods take `&self`; implementations that need mutation use interior
/// mutability. Deleting a key that does not exist is not an error.
pub trait KeyValueStore {
    /// Read the value stored under `key`, `None` if absent
    fn read(&self, key: &str) -> Result<Option<Vec<u8>>>;

    /// Insert or replace the value stored under `key`
    fn write(&self, key: &str, value: &[u8]) -> Result<()>;

    /// Remove `key` and its value
    fn delete(&self, key: &str) -> Result<()>;
}

impl<T: KeyValueStore + ?Sized> KeyValueStore for &T {
    fn read(&self, key: &str) -> Result<Option<Vec<u8>>> {
        (**self).read(key)
    }

    fn write(&self, key: &str, value: &[u8]) -> Result<()> {
        (**self).write(key, value)
    }

    fn delete(&self, key: &str) -> Result<()> {
        (**self).delete(key)
    }
}

impl<T: KeyValueStore + ?Sized> KeyValueStore for Box<T> {
    fn read(&self, key: &str) -> Result<Option<Vec<u8>>> {
        (**self).read(key)
    }

    fn write(&self, key: &str, value: &[u8]) -> Result<()> {
        (**self).write(key, value)
    }

    fn delete(&self, key: &str) -> Result<()> {
        (**self).delete(key)
    }
}

/// Process-local store. Nothing survives the process, but a single instance
/// can be shared by reference to simulate a restart.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: Mutex<HashMap<String, Vec<u8>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether a value is stored under `key`
    pub fn contains(&self, key: &str) -> bool {
        self.entries
            .lock()
            .map(|entries| entries.contains_key(key))
            .unwrap_or(false)
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, HashMap<String, Vec<u8>>>> {
        self.entries
            .lock()
            .map_err(|_| Error::Storage("memory store lock poisoned".to_string()))
    }
}

impl KeyValueStore for MemoryStore {
    fn read(&self, key: &str) -> Result<Option<Vec<u8>>> {
        Ok(self.lock()?.get(key).cloned())
    }

    fn write(&self, key: &str, value: &[u8]) -> Result<()> {
        self.lock()?.insert(key.to_string(), value.to_vec());
        Ok(())
    }

    fn delete(&self, key: &str) -> Result<()> {
        self.lock()?.remove(key);
        Ok(())
    }
}
