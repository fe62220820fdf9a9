//! Transient acknowledgment shown after a favorites toggle.
//!
//! A [`Notification`] is either hidden or showing one [`Toast`]. Showing a new
//! toast replaces the current one and restarts the timer; there is no queue.
//! Time is passed in by the caller so the owner's tick loop drives expiry.

use crate::favorites::{FavoritesStore, Toggled, UndoCommand};
use crate::storage::KeyValueStore;
use std::time::{Duration, Instant};

/// How long a toast stays visible unless dismissed earlier
pub const DEFAULT_DURATION: Duration = Duration::from_millis(3000);

#[derive(Debug, Clone, PartialEq)]
pub struct Toast {
    pub was_added: bool,
    pub label: String,
    undo: Option<UndoCommand>,
    shown_at: Instant,
}

impl Toast {
    pub fn message(&self) -> &'static str {
        if self.was_added {
            "Added to favorites!"
        } else {
            "Removed from favorites"
        }
    }

    /// Whether an undo action is still on offer
    pub fn has_undo(&self) -> bool {
        self.undo.is_some()
    }
}

#[derive(Debug, Clone)]
pub struct Notification {
    duration: Duration,
    current: Option<Toast>,
}

impl Default for Notification {
    fn default() -> Self {
        Self::new(DEFAULT_DURATION)
    }
}

impl Notification {
    pub fn new(duration: Duration) -> Self {
        Self {
            duration,
            current: None,
        }
    }

    pub fn duration(&self) -> Duration {
        self.duration
    }

    /// Show a toast, replacing any visible one
    pub fn show(
        &mut self,
        was_added: bool,
        label: impl Into<String>,
        undo: Option<UndoCommand>,
        now: Instant,
    ) {
        self.current = Some(Toast {
            was_added,
            label: label.into(),
            undo,
            shown_at: now,
        });
    }

    /// Show the outcome of a toggle, offering its undo command
    pub fn show_toggled(&mut self, toggled: &Toggled, now: Instant) {
        self.show(
            toggled.was_added,
            toggled.label.clone(),
            Some(toggled.undo.clone()),
            now,
        );
    }

    /// Hide immediately; any pending undo is dropped
    pub fn dismiss(&mut self) {
        self.current = None;
    }

    /// Expire the toast once its display time has elapsed.
    /// Returns `true` if this call hid it.
    pub fn tick(&mut self, now: Instant) -> bool {
        let expired = self.is_expired(now);
        if expired {
            self.dismiss();
        }
        expired
    }

    fn is_expired(&self, now: Instant) -> bool {
        match &self.current {
            Some(toast) => now.saturating_duration_since(toast.shown_at) >= self.duration,
            None => false,
        }
    }

    pub fn is_visible(&self) -> bool {
        self.current.is_some()
    }

    pub fn current(&self) -> Option<&Toast> {
        self.current.as_ref()
    }

    /// Share of the display time still left, from 1.0 down to 0.0
    pub fn remaining_fraction(&self, now: Instant) -> f64 {
        match &self.current {
            Some(toast) if !self.duration.is_zero() => {
                let elapsed = now.saturating_duration_since(toast.shown_at);
                let left = self.duration.saturating_sub(elapsed);
                left.as_secs_f64() / self.duration.as_secs_f64()
            }
            _ => 0.0,
        }
    }

    /// Take the pending undo command and hide the toast.
    /// The command can be taken at most once, and only before the toast's
    /// deadline; an expired toast is hidden and yields `None`.
    pub fn take_undo(&mut self, now: Instant) -> Option<UndoCommand> {
        if self.is_expired(now) {
            self.dismiss();
            return None;
        }
        self.current.take().and_then(|toast| toast.undo)
    }

    /// Run the pending undo against `store`, then stay hidden
    pub fn undo<S: KeyValueStore>(
        &mut self,
        store: &mut FavoritesStore<S>,
        now: Instant,
    ) -> Option<Toggled> {
        self.take_undo(now).map(|command| command.apply(store))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Attraction, AttractionId};
    use crate::storage::MemoryStore;

    fn loaded_store() -> FavoritesStore<MemoryStore> {
        let mut store = FavoritesStore::new(MemoryStore::new());
        store.load();
        store
    }

    #[test]
    fn test_starts_hidden() {
        let notification = Notification::default();
        assert!(!notification.is_visible());
        assert_eq!(notification.duration(), Duration::from_millis(3000));
    }

    #[test]
    fn test_auto_dismiss_at_deadline() {
        let start = Instant::now();
        let mut notification = Notification::new(Duration::from_millis(3000));
        notification.show(true, "Salto de la Moneda", None, start);

        assert!(!notification.tick(start + Duration::from_millis(2999)));
        assert!(notification.is_visible());

        assert!(notification.tick(start + Duration::from_millis(3000)));
        assert!(!notification.is_visible());
    }

    #[test]
    fn test_show_replaces_and_restarts_timer() {
        let start = Instant::now();
        let mut notification = Notification::new(Duration::from_millis(3000));
        notification.show(true, "First", None, start);
        notification.show(false, "Second", None, start + Duration::from_millis(2000));

        let toast = notification.current().unwrap();
        assert_eq!(toast.label, "Second");
        assert_eq!(toast.message(), "Removed from favorites");

        // The first deadline has passed but the second has not
        assert!(!notification.tick(start + Duration::from_millis(3500)));
        assert!(notification.tick(start + Duration::from_millis(5000)));
    }

    #[test]
    fn test_remaining_fraction() {
        let start = Instant::now();
        let mut notification = Notification::new(Duration::from_millis(2000));
        assert_eq!(notification.remaining_fraction(start), 0.0);

        notification.show(true, "x", None, start);
        assert_eq!(notification.remaining_fraction(start), 1.0);
        let half = notification.remaining_fraction(start + Duration::from_millis(1000));
        assert!((half - 0.5).abs() < 1e-9);
    }

    #[test]
    fn test_dismiss_drops_undo() {
        let mut store = loaded_store();
        let toggled = store.toggle(&Attraction::new(1));
        let mut notification = Notification::default();
        let now = Instant::now();
        notification.show_toggled(&toggled, now);
        assert!(notification.current().unwrap().has_undo());

        notification.dismiss();
        assert!(notification.undo(&mut store, now).is_none());
        assert!(store.is_favorite(&AttractionId::Int(1)));
    }

    #[test]
    fn test_toggle_then_undo_scenario() {
        let mut store = loaded_store();
        let mut notification = Notification::default();
        let attraction = Attraction::new("salto-moneda").with_attribute("title", "Salto de la Moneda");

        let now = Instant::now();
        let toggled = store.toggle(&attraction);
        notification.show_toggled(&toggled, now);

        assert_eq!(store.len(), 1);
        assert_eq!(store.items()[0].id, AttractionId::from("salto-moneda"));
        let toast = notification.current().unwrap();
        assert!(toast.was_added);
        assert_eq!(toast.message(), "Added to favorites!");
        assert_eq!(toast.label, "Salto de la Moneda");

        let undone = notification.undo(&mut store, now).unwrap();
        assert!(!undone.was_added);
        assert!(store.is_empty());
        assert!(!notification.is_visible());
    }

    #[test]
    fn test_undo_is_single_shot() {
        let mut store = loaded_store();
        let mut notification = Notification::default();
        let attraction = Attraction::new(2);

        let now = Instant::now();
        let toggled = store.toggle(&attraction);
        notification.show_toggled(&toggled, now);

        assert!(notification.undo(&mut store, now).is_some());
        assert!(notification.undo(&mut store, now).is_none());
        assert!(!store.is_favorite(&attraction.id));
    }

    #[test]
    fn test_show_without_undo() {
        let mut notification = Notification::default();
        let now = Instant::now();
        notification.show(true, "x", None, now);
        assert!(!notification.current().unwrap().has_undo());
        assert!(notification.take_undo(now).is_none());
        assert!(!notification.is_visible());
    }

    #[test]
    fn test_undo_closes_at_deadline_without_tick() {
        let mut store = loaded_store();
        let mut notification = Notification::new(Duration::from_millis(3000));
        let attraction = Attraction::new("salto-moneda");
        let start = Instant::now();

        let toggled = store.toggle(&attraction);
        notification.show_toggled(&toggled, start);

        // No tick has run, but the window is over
        assert!(notification.undo(&mut store, start + Duration::from_millis(3000)).is_none());
        assert!(!notification.is_visible());
        assert!(store.is_favorite(&attraction.id));
    }

    #[test]
    fn test_undo_still_open_just_before_deadline() {
        let mut store = loaded_store();
        let mut notification = Notification::new(Duration::from_millis(3000));
        let attraction = Attraction::new("salto-moneda");
        let start = Instant::now();

        let toggled = store.toggle(&attraction);
        notification.show_toggled(&toggled, start);

        assert!(notification.undo(&mut store, start + Duration::from_millis(2999)).is_some());
        assert!(!store.is_favorite(&attraction.id));
    }
}
