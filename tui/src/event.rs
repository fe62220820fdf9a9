use crate::app::App;
use crate::config::Keymap;
use anyhow::Result;
use crossterm::event::{self, Event as CEvent, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use potrero_core::storage::KeyValueStore;
use std::time::{Duration, Instant};

/// Terminal events
#[derive(Debug, Clone, Copy)]
pub enum Event {
    /// Key press event
    Key(KeyEvent),
    /// Terminal tick event
    Tick,
}

/// Event handler for the terminal
pub struct EventHandler {
    /// Tick rate in milliseconds
    tick_rate: Duration,
}

impl EventHandler {
    /// Create a new event handler
    pub fn new(tick_rate_ms: u64) -> Self {
        Self {
            tick_rate: Duration::from_millis(tick_rate_ms),
        }
    }

    /// Poll for the next event
    pub fn next(&self) -> Result<Event> {
        if event::poll(self.tick_rate)? {
            if let CEvent::Key(key) = event::read()? {
                return Ok(Event::Key(key));
            }
        }
        Ok(Event::Tick)
    }
}

/// Handle key events for the application
pub fn handle_key_event<S: KeyValueStore>(key: KeyEvent, app: &mut App<S>, now: Instant) {
    // On Windows, crossterm reports both key press and release events.
    if key.kind != KeyEventKind::Press {
        return;
    }

    // Key bursts can starve the tick event; expire a stale toast here too
    app.tick(now);

    // Confirmation dialog takes precedence
    if app.confirming_clear {
        match key.code {
            KeyCode::Char('y') | KeyCode::Char('Y') => app.confirm_clear_all(),
            KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => app.cancel_clear_all(),
            _ => {}
        }
        return;
    }

    if app.search_open {
        match key.code {
            KeyCode::Esc => app.clear_search(),
            KeyCode::Enter => app.close_search(),
            KeyCode::Backspace => app.backspace_search(),
            KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                app.update_search(c)
            }
            _ => {}
        }
        return;
    }

    let keymap = app.config.keymap.clone();
    if Keymap::matches(&keymap.quit, &key) {
        app.quit();
    } else if Keymap::matches(&keymap.toggle_favorite, &key) {
        app.toggle_selected(now);
    } else if Keymap::matches(&keymap.undo, &key) {
        app.undo(now);
    } else if Keymap::matches(&keymap.dismiss, &key) {
        if app.notification.is_visible() {
            app.dismiss_notification();
        } else if !app.filter.is_empty() {
            app.filter = Default::default();
            app.cursor_position = 0;
        }
    } else if Keymap::matches(&keymap.switch_view, &key) {
        app.switch_view();
    } else if Keymap::matches(&keymap.cursor_up, &key) {
        app.cursor_up();
    } else if Keymap::matches(&keymap.cursor_down, &key) {
        app.cursor_down();
    } else if Keymap::matches(&keymap.search, &key) {
        app.open_search();
    } else if Keymap::matches(&keymap.next_category, &key) {
        app.next_category();
    } else if Keymap::matches(&keymap.clear_all, &key) {
        app.request_clear_all();
    }
}
