use super::store::{FavoritesStore, Toggled};
use crate::models::{Attraction, AttractionId};
use crate::storage::KeyValueStore;

/// A reversible action handed to a notification.
///
/// The command carries everything needed to replay the toggle, so it stays
/// valid after the call that produced it has returned.
#[derive(Debug, Clone, PartialEq)]
pub enum UndoCommand {
    /// Toggle `previous` again, restoring the state before the original toggle
    ToggleFavorite {
        id: AttractionId,
        previous: Attraction,
    },
}

impl UndoCommand {
    /// The attraction the command acts on
    pub fn id(&self) -> &AttractionId {
        match self {
            UndoCommand::ToggleFavorite { id, .. } => id,
        }
    }

    /// Run the command against `store`
    pub fn apply<S: KeyValueStore>(self, store: &mut FavoritesStore<S>) -> Toggled {
        match self {
            UndoCommand::ToggleFavorite { previous, .. } => store.toggle(&previous),
        }
    }
}
