use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use unicode_width::UnicodeWidthStr;

use crate::app::{App, AppMode, MonitorState};

pub const THRESHOLD_LABEL: &str = " Alert ↓ below (Mbps): ";
/// "[ 10000 ▴▾]": five digits plus brackets and arrows
const VALUE_BOX_WIDTH: u16 = 11;

pub fn start_label(state: MonitorState) -> &'static str {
    match state {
        MonitorState::Idle => " ▶ Start Monitoring ",
        MonitorState::Monitoring => " ↻ Restart Monitoring ",
        MonitorState::Stopped => " Stopped ",
    }
}

/// Cells occupied by the threshold value box (scroll target)
pub fn threshold_rect(area: Rect) -> Rect {
    let label_w = THRESHOLD_LABEL.width() as u16;
    let x = area.x.saturating_add(label_w).min(area.right());
    Rect {
        x,
        y: area.y,
        width: VALUE_BOX_WIDTH.min(area.right().saturating_sub(x)),
        height: area.height.min(1),
    }
}

/// Cells occupied by the start button (right-aligned, one column margin)
pub fn start_button_rect(area: Rect, state: MonitorState) -> Rect {
    let w = (start_label(state).width() as u16).min(area.width);
    Rect {
        x: area.right().saturating_sub(w + 1).max(area.x),
        y: area.y,
        width: w,
        height: area.height.min(1),
    }
}

/// Draw the top row: threshold spin control on the left, start button on the right
pub fn draw_controls(f: &mut Frame, app: &App, area: Rect) {
    let cs = &app.color_scheme;

    let value = if app.mode == AppMode::ThresholdEdit {
        format!("[{:>5}_  ]", app.threshold_input)
    } else {
        format!("[ {:>5} ▴▾]", app.threshold_mbps)
    };
    let value_style = if app.mode == AppMode::ThresholdEdit {
        Style::default()
            .fg(cs.control_value)
            .bg(cs.control_edit_bg)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(cs.control_value).bg(cs.bg)
    };

    let line = Line::from(vec![
        Span::styled(THRESHOLD_LABEL, Style::default().fg(cs.control_label).bg(cs.bg)),
        Span::styled(value, value_style),
    ]);
    f.render_widget(Paragraph::new(line), area);

    let button = start_button_rect(area, app.state);
    let button_style = if app.can_start() {
        Style::default()
            .fg(cs.button_fg)
            .bg(cs.button_bg)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(cs.button_disabled_fg).bg(cs.button_disabled_bg)
    };
    f.render_widget(
        Paragraph::new(Span::styled(start_label(app.state), button_style)),
        button,
    );
}
