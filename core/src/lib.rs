//! Favorites core of the Potrero tourism guide.
//!
//! [`favorites::FavoritesStore`] keeps the list of favorited attractions and
//! persists it through a [`storage::KeyValueStore`].
//! [`notification::Notification`] acknowledges each toggle and can replay its
//! [`favorites::UndoCommand`].

pub mod catalog;
pub mod favorites;
pub mod models;
pub mod notification;
pub mod storage;

mod error;

pub use error::{Error, Result};
