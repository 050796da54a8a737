pub mod charts;
pub mod controls;
pub mod footer;
pub mod help;
pub mod status;

use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::widgets::Block;

use crate::app::{App, AppMode};

/// Screen zones, top to bottom
#[derive(Debug, Clone, Copy)]
pub struct Areas {
    pub controls: Rect,
    pub status: Rect,
    pub speed_chart: Rect,
    pub ping_chart: Rect,
    pub footer: Rect,
}

/// Split the terminal area; mouse hit-testing uses the same split
pub fn split(area: Rect) -> Areas {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),      // threshold + start button
            Constraint::Length(1),      // status line
            Constraint::Percentage(50), // speed chart
            Constraint::Min(4),         // ping & loss chart
            Constraint::Length(1),      // footer key bar
        ])
        .split(area);

    Areas {
        controls: rows[0],
        status: rows[1],
        speed_chart: rows[2],
        ping_chart: rows[3],
        footer: rows[4],
    }
}

/// Render the complete UI
pub fn draw(f: &mut Frame, app: &App) {
    let size = f.area();
    f.render_widget(Block::default().style(app.color_scheme.base()), size);

    let areas = split(size);
    controls::draw_controls(f, app, areas.controls);
    status::draw_status(f, app, areas.status);
    charts::draw_speed_chart(f, app, areas.speed_chart);
    charts::draw_ping_chart(f, app, areas.ping_chart);
    footer::draw_footer(f, app, areas.footer);

    if app.mode == AppMode::Help {
        help::draw_help(f, app);
    }
}
