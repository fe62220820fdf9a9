//! Persisted favorites and the queries run over them.

mod command;
mod query;
mod store;

pub use command::UndoCommand;
pub use query::{FavoritesStats, SearchFilter, RECENT_DAYS};
pub use store::{FavoritesStore, Toggled, DEFAULT_STORAGE_KEY};
