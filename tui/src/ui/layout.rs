use crate::app::{App, View};
use potrero_core::storage::KeyValueStore;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    Frame,
};
use std::time::Instant;

use super::{
    render_attractions, render_clear_confirmation, render_favorites, render_header,
    render_search_overlay, render_stats_panel, render_status_bar, render_toast,
};

/// Render the complete UI
pub fn render<S: KeyValueStore>(frame: &mut Frame, app: &App<S>) {
    let size = frame.size();

    // Header, content, status bar
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(0),
            Constraint::Length(1),
        ])
        .split(size);

    render_header(frame, app, chunks[0]);
    render_content(frame, app, chunks[1]);
    render_status_bar(frame, app, chunks[2]);

    // Overlays (drawn last)
    if app.search_open {
        render_search_overlay(frame, app, size);
    }
    if app.confirming_clear {
        render_clear_confirmation(frame, app, size);
    }
    if app.notification.is_visible() {
        render_toast(frame, app, size, Instant::now());
    }
}

fn render_content<S: KeyValueStore>(frame: &mut Frame, app: &App<S>, area: Rect) {
    match app.view {
        View::Attractions => render_attractions(frame, app, area),
        View::Favorites => {
            let chunks = Layout::default()
                .direction(Direction::Horizontal)
                .constraints([Constraint::Min(0), Constraint::Length(28)])
                .split(area);
            render_favorites(frame, app, chunks[0]);
            render_stats_panel(frame, app, chunks[1]);
        }
    }
}
