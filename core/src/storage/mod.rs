mod database;
mod kv_store;
mod sqlite_store;

pub use database::{Connection, Database};
pub use kv_store::{KeyValueStore, MemoryStore};
pub use sqlite_store::SqliteStore;
