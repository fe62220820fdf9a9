use crate::config::{load_config, Config};
use anyhow::Result;
use chrono::Utc;
use potrero_core::{
    catalog::{Catalog, CATEGORIES},
    favorites::{FavoritesStats, FavoritesStore, SearchFilter},
    models::{Attraction, FavoriteItem},
    notification::Notification,
    storage::{KeyValueStore, SqliteStore},
};
use std::path::Path;
use std::time::{Duration, Instant};
use tracing::info;

/// Which list the main pane shows
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    Attractions,
    Favorites,
}

impl View {
    pub fn title(&self) -> &'static str {
        match self {
            View::Attractions => "Attractions",
            View::Favorites => "Favorites",
        }
    }
}

/// Application state
pub struct App<S: KeyValueStore = SqliteStore> {
    pub should_quit: bool,
    pub config: Config,
    pub catalog: Catalog,
    pub favorites: FavoritesStore<S>,
    pub notification: Notification,
    pub view: View,
    pub cursor_position: usize,
    // Search & category filter, shared by both views
    pub filter: SearchFilter,
    pub search_open: bool,
    pub confirming_clear: bool,
}

impl App<SqliteStore> {
    /// Create an App storing its database and config under `data_dir`
    pub fn new(data_dir: &Path) -> Result<Self> {
        std::fs::create_dir_all(data_dir)?;
        let config = load_config(&data_dir.join("config.toml"))?;
        let storage = SqliteStore::open(data_dir.join("potrero.db"))?;
        let catalog = Catalog::load_embedded()?;
        info!(data_dir = %data_dir.display(), attractions = catalog.len(), "starting guide");
        Ok(Self::with_parts(config, catalog, storage))
    }
}

impl<S: KeyValueStore> App<S> {
    /// Assemble an App from its parts and load the favorites
    pub fn with_parts(config: Config, catalog: Catalog, storage: S) -> Self {
        let mut favorites = FavoritesStore::new(storage);
        favorites.load();
        let notification = Notification::new(Duration::from_millis(config.toast_duration_ms));
        Self {
            should_quit: false,
            config,
            catalog,
            favorites,
            notification,
            view: View::Attractions,
            cursor_position: 0,
            filter: SearchFilter::default(),
            search_open: false,
            confirming_clear: false,
        }
    }

    /// Handle tick events
    pub fn tick(&mut self, now: Instant) {
        self.notification.tick(now);
    }

    /// Quit the application
    pub fn quit(&mut self) {
        self.should_quit = true;
    }

    pub fn visible_attractions(&self) -> Vec<&Attraction> {
        self.catalog.filter(&self.filter)
    }

    pub fn visible_favorites(&self) -> Vec<&FavoriteItem> {
        self.filter.apply(self.favorites.items())
    }

    fn visible_len(&self) -> usize {
        match self.view {
            View::Attractions => self.visible_attractions().len(),
            View::Favorites => self.visible_favorites().len(),
        }
    }

    /// The attraction under the cursor in the current view
    pub fn selected_attraction(&self) -> Option<Attraction> {
        match self.view {
            View::Attractions => self
                .visible_attractions()
                .get(self.cursor_position)
                .map(|a| (*a).clone()),
            View::Favorites => self
                .visible_favorites()
                .get(self.cursor_position)
                .map(|item| item.to_attraction()),
        }
    }

    pub fn stats(&self) -> FavoritesStats {
        FavoritesStats::compute(self.favorites.items(), Utc::now())
    }

    // Navigation

    pub fn cursor_up(&mut self) {
        self.cursor_position = self.cursor_position.saturating_sub(1);
    }

    pub fn cursor_down(&mut self) {
        if self.cursor_position + 1 < self.visible_len() {
            self.cursor_position += 1;
        }
    }

    fn clamp_cursor(&mut self) {
        let len = self.visible_len();
        if self.cursor_position >= len {
            self.cursor_position = len.saturating_sub(1);
        }
    }

    pub fn switch_view(&mut self) {
        self.view = match self.view {
            View::Attractions => View::Favorites,
            View::Favorites => View::Attractions,
        };
        self.cursor_position = 0;
    }

    // Favorites

    /// Toggle the selected attraction and acknowledge it with a toast
    pub fn toggle_selected(&mut self, now: Instant) {
        let Some(attraction) = self.selected_attraction() else {
            return;
        };
        let toggled = self.favorites.toggle(&attraction);
        self.notification.show_toggled(&toggled, now);
        self.clamp_cursor();
    }

    /// Reverse the toggle offered by the visible toast, if it is still open
    pub fn undo(&mut self, now: Instant) {
        if self.notification.undo(&mut self.favorites, now).is_some() {
            self.clamp_cursor();
        }
    }

    pub fn dismiss_notification(&mut self) {
        self.notification.dismiss();
    }

    pub fn request_clear_all(&mut self) {
        if !self.favorites.is_empty() {
            self.confirming_clear = true;
        }
    }

    pub fn confirm_clear_all(&mut self) {
        self.confirming_clear = false;
        self.favorites.clear_all();
        // Undo would re-add a single item of a list the user just wiped
        self.notification.dismiss();
        self.clamp_cursor();
    }

    pub fn cancel_clear_all(&mut self) {
        self.confirming_clear = false;
    }

    // Search & filter

    pub fn open_search(&mut self) {
        self.search_open = true;
    }

    pub fn close_search(&mut self) {
        self.search_open = false;
    }

    pub fn update_search(&mut self, c: char) {
        self.filter.search.push(c);
        self.cursor_position = 0;
    }

    pub fn backspace_search(&mut self) {
        self.filter.search.pop();
        self.cursor_position = 0;
    }

    pub fn clear_search(&mut self) {
        self.filter.search.clear();
        self.search_open = false;
        self.cursor_position = 0;
    }

    /// Cycle the category filter: all, then each category in turn
    pub fn next_category(&mut self) {
        let current = self
            .filter
            .category
            .as_deref()
            .and_then(|c| CATEGORIES.iter().position(|(id, _)| *id == c));
        self.filter.category = match current {
            None => CATEGORIES.first().map(|(id, _)| id.to_string()),
            Some(i) => CATEGORIES.get(i + 1).map(|(id, _)| id.to_string()),
        };
        self.cursor_position = 0;
    }
}
