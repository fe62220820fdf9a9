use crate::app::{App, View};
use chrono::Local;
use potrero_core::{catalog::category_label, storage::KeyValueStore};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    symbols,
    text::{Line, Span},
    widgets::{Block, Borders, Clear, LineGauge, List, ListItem, ListState, Paragraph, Wrap},
    Frame,
};
use std::time::Instant;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Render the header with title, view tabs and key hints
pub fn render_header<S: KeyValueStore>(frame: &mut Frame, app: &App<S>, area: Rect) {
    let tab = |view: View| {
        let style = if app.view == view {
            Style::default().fg(Color::Black).bg(Color::Cyan).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::Gray)
        };
        Span::styled(format!(" {} ", view.title()), style)
    };

    let key_hints = if app.search_open {
        " [Enter:Apply] [Esc:Clear] [Type to search] "
    } else if app.confirming_clear {
        " [y:Confirm] [n:Cancel] "
    } else {
        " [q:Quit] [Tab:View] [↑/↓:Move] [f:Favorite] [u:Undo] [/:Search] [c:Category] [Ctrl+D:Clear] "
    };

    let header_spans = vec![
        Span::styled(
            " Potrero de los Funes ",
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        ),
        Span::raw("| "),
        tab(View::Attractions),
        Span::raw(" "),
        tab(View::Favorites),
        Span::raw(" |"),
        Span::styled(key_hints, Style::default().fg(Color::DarkGray)),
    ];

    let header = Paragraph::new(Line::from(header_spans))
        .block(Block::default().borders(Borders::ALL))
        .alignment(Alignment::Left);

    frame.render_widget(header, area);
}

fn heart(is_favorite: bool) -> Span<'static> {
    if is_favorite {
        Span::styled("♥ ", Style::default().fg(Color::Red))
    } else {
        Span::styled("♡ ", Style::default().fg(Color::DarkGray))
    }
}

fn category_span(category: Option<&str>) -> Span<'static> {
    let label = category
        .map(|c| category_label(c).unwrap_or(c).to_string())
        .unwrap_or_default();
    Span::styled(format!("  [{}]", label), Style::default().fg(Color::Yellow))
}

/// Render the attraction catalog
pub fn render_attractions<S: KeyValueStore>(frame: &mut Frame, app: &App<S>, area: Rect) {
    let attractions = app.visible_attractions();
    let title = format!(" {} ({}) ", View::Attractions.title(), attractions.len());

    if attractions.is_empty() {
        let empty = Paragraph::new("No attractions match the current filter. Press Esc to reset it.")
            .block(Block::default().borders(Borders::ALL).title(title))
            .alignment(Alignment::Center)
            .style(Style::default().fg(Color::DarkGray));
        frame.render_widget(empty, area);
        return;
    }

    let items: Vec<ListItem> = attractions
        .iter()
        .map(|a| {
            let mut lines = vec![Line::from(vec![
                heart(app.favorites.is_favorite(&a.id)),
                Span::styled(a.label(), Style::default().add_modifier(Modifier::BOLD)),
                category_span(a.category()),
            ])];
            if let Some(description) = a.description() {
                let width = area.width.saturating_sub(6) as usize;
                lines.push(Line::from(Span::styled(
                    format!("  {}", truncate_to_width(description, width)),
                    Style::default().fg(Color::DarkGray),
                )));
            }
            ListItem::new(lines)
        })
        .collect();

    render_list(frame, items, app.cursor_position, title, area);
}

/// Render the favorites list
pub fn render_favorites<S: KeyValueStore>(frame: &mut Frame, app: &App<S>, area: Rect) {
    let favorites = app.visible_favorites();
    let title = format!(" {} ({}) ", View::Favorites.title(), favorites.len());

    if app.favorites.loading() {
        let loading = Paragraph::new("Loading favorites...")
            .block(Block::default().borders(Borders::ALL).title(title))
            .alignment(Alignment::Center);
        frame.render_widget(loading, area);
        return;
    }

    if favorites.is_empty() {
        let message = if app.favorites.is_empty() {
            "No favorites yet. Press f on an attraction to add it."
        } else {
            "No favorites match the current filter."
        };
        let empty = Paragraph::new(message)
            .block(Block::default().borders(Borders::ALL).title(title))
            .alignment(Alignment::Center)
            .style(Style::default().fg(Color::DarkGray));
        frame.render_widget(empty, area);
        return;
    }

    let items: Vec<ListItem> = favorites
        .iter()
        .map(|item| {
            let added = item.date_added.with_timezone(&Local).format("%d %b %Y");
            ListItem::new(vec![
                Line::from(vec![
                    heart(true),
                    Span::styled(item.label(), Style::default().add_modifier(Modifier::BOLD)),
                    category_span(item.category()),
                ]),
                Line::from(Span::styled(
                    format!("  added {}", added),
                    Style::default().fg(Color::DarkGray),
                )),
            ])
        })
        .collect();

    render_list(frame, items, app.cursor_position, title, area);
}

fn render_list(frame: &mut Frame, items: Vec<ListItem>, selected: usize, title: String, area: Rect) {
    let mut state = ListState::default();
    state.select(Some(selected));

    let list = List::new(items)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(title)
                .title_alignment(Alignment::Left),
        )
        .highlight_style(Style::default().bg(Color::Blue).fg(Color::White));

    frame.render_stateful_widget(list, area, &mut state);
}

/// Render favorites counts next to the favorites list
pub fn render_stats_panel<S: KeyValueStore>(frame: &mut Frame, app: &App<S>, area: Rect) {
    let stats = app.stats();
    let mut lines = vec![
        Line::from(format!("Total: {}", stats.total)),
        Line::from(format!("Last 7 days: {}", stats.recent)),
        Line::from(""),
    ];
    for (id, label) in potrero_core::catalog::CATEGORIES {
        lines.push(Line::from(format!("{}: {}", label, stats.category_count(id))));
    }

    let panel = Paragraph::new(lines)
        .block(Block::default().borders(Borders::ALL).title(" Stats "))
        .wrap(Wrap { trim: true });
    frame.render_widget(panel, area);
}

/// Render the status bar at the bottom
pub fn render_status_bar<S: KeyValueStore>(frame: &mut Frame, app: &App<S>, area: Rect) {
    let category = app
        .filter
        .category
        .as_deref()
        .map(|c| category_label(c).unwrap_or(c))
        .unwrap_or("All");
    let mut status_text = format!(
        " {} favorites | Category: {} ",
        app.favorites.len(),
        category
    );
    if !app.filter.search.is_empty() {
        status_text.push_str(&format!("| Search: \"{}\" ", app.filter.search));
    }

    let status_bar = Paragraph::new(status_text)
        .style(Style::default().bg(Color::DarkGray).fg(Color::White))
        .alignment(Alignment::Center);

    frame.render_widget(status_bar, area);
}

/// Render the search prompt
pub fn render_search_overlay<S: KeyValueStore>(frame: &mut Frame, app: &App<S>, area: Rect) {
    let popup = centered_rect(area, 50, 3);
    let input = Paragraph::new(Line::from(vec![
        Span::raw(app.filter.search.clone()),
        Span::styled("▊", Style::default().fg(Color::Yellow)),
    ]))
    .block(Block::default().borders(Borders::ALL).title(" Search "));

    frame.render_widget(Clear, popup);
    frame.render_widget(input, popup);
}

pub fn render_clear_confirmation<S: KeyValueStore>(frame: &mut Frame, app: &App<S>, area: Rect) {
    let popup = centered_rect(area, 60, 5);

    let text = format!(
        "Remove all {} favorites? This cannot be undone. (y/n)",
        app.favorites.len()
    );
    let paragraph = Paragraph::new(text)
        .block(
            Block::default()
                .title("Clear Favorites")
                .borders(Borders::ALL)
                .style(Style::default().fg(Color::Yellow)),
        )
        .style(Style::default().fg(Color::White))
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true });

    frame.render_widget(Clear, popup);
    frame.render_widget(paragraph, popup);
}

/// Render the favorites toast at the top of the screen, with a bar showing
/// the time left before it closes
pub fn render_toast<S: KeyValueStore>(frame: &mut Frame, app: &App<S>, area: Rect, now: Instant) {
    let Some(toast) = app.notification.current() else {
        return;
    };

    let width = area.width.saturating_sub(4).min(60);
    let popup = Rect::new(
        area.x + (area.width.saturating_sub(width)) / 2,
        area.y + 3.min(area.height),
        width,
        5.min(area.height.saturating_sub(3)),
    );
    if popup.height < 3 {
        return;
    }

    let color = if toast.was_added { Color::Red } else { Color::Gray };
    let icon = if toast.was_added { "♥" } else { "♡" };
    let mut actions = String::new();
    if toast.has_undo() {
        actions.push_str("[u:Undo] ");
    }
    actions.push_str("[Esc:Close]");

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(color));
    let inner = block.inner(popup);
    frame.render_widget(Clear, popup);
    frame.render_widget(block, popup);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Length(1), Constraint::Min(0)])
        .split(inner);

    let label_width = (inner.width as usize).saturating_sub(actions.width() + 1);
    let message = Paragraph::new(Line::from(vec![
        Span::styled(format!("{} ", icon), Style::default().fg(color)),
        Span::styled(toast.message(), Style::default().add_modifier(Modifier::BOLD)),
    ]));
    frame.render_widget(message, rows[0]);

    let details = Paragraph::new(Line::from(vec![
        Span::raw(truncate_to_width(&toast.label, label_width)),
        Span::raw(" "),
        Span::styled(actions, Style::default().fg(Color::Cyan)),
    ]));
    frame.render_widget(details, rows[1]);

    if rows[2].height > 0 {
        let progress = LineGauge::default()
            .gauge_style(Style::default().fg(color))
            .line_set(symbols::line::THICK)
            .label("")
            .ratio(app.notification.remaining_fraction(now).clamp(0.0, 1.0));
        frame.render_widget(progress, rows[2]);
    }
}

fn centered_rect(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect::new(
        area.x + (area.width - width) / 2,
        area.y + (area.height - height) / 2,
        width,
        height,
    )
}

/// Cut `text` to at most `max_width` terminal columns, marking the cut with `…`
fn truncate_to_width(text: &str, max_width: usize) -> String {
    if text.width() <= max_width {
        return text.to_string();
    }
    let mut out = String::new();
    let mut used = 0;
    for c in text.chars() {
        let w = c.width().unwrap_or(0);
        if used + w + 1 > max_width {
            break;
        }
        out.push(c);
        used += w;
    }
    if max_width > 0 {
        out.push('…');
    }
    out
}
