mod layout;
mod widgets;

pub use layout::render;
pub use widgets::{
    render_attractions,
    render_clear_confirmation,
    render_favorites,
    render_header,
    render_search_overlay,
    render_stats_panel,
    render_status_bar,
    render_toast,
};
