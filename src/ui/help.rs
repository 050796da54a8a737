use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};

use crate::app::{App, THRESHOLD_MAX, THRESHOLD_MIN};

/// Draw the help popup (F1 / ?)
pub fn draw_help(f: &mut Frame, app: &App) {
    let cs = &app.color_scheme;
    let area = centered_rect(60, 70, f.area());
    f.render_widget(Clear, area);

    let heading = |text: &'static str| {
        Line::from(Span::styled(
            text,
            Style::default().fg(cs.popup_title).add_modifier(Modifier::BOLD),
        ))
    };

    let help_text = vec![
        heading(" netpulse - network throughput, ping and loss monitor "),
        Line::from(""),
        Line::from(format!(
            "  Samples once per second. Ping target: {}",
            app.host
        )),
        Line::from(format!(
            "  History keeps the last {} samples.",
            app.history.capacity()
        )),
        Line::from(""),
        heading(" Monitoring "),
        Line::from("  s / Enter   Start monitoring (restarts if running)"),
        Line::from("  click       Start button starts/restarts too"),
        Line::from(""),
        heading(" Speed alert "),
        Line::from(format!(
            "  ↑/↓         Threshold ±1 Mbps (range {}-{})",
            THRESHOLD_MIN, THRESHOLD_MAX
        )),
        Line::from("  PgUp/PgDn   Threshold ±10 Mbps"),
        Line::from("  scroll      Over the threshold box: ±1 Mbps"),
        Line::from("  t           Type a threshold, Enter to accept"),
        Line::from("  The alert fires when download < threshold."),
        Line::from(""),
        heading(" Display "),
        Line::from(format!(
            "  c           Cycle color scheme ({})",
            app.color_scheme_id.name()
        )),
        Line::from("  F1/?        Show this help"),
        Line::from("  q/F10       Quit (settings are saved)"),
        Line::from(""),
        Line::from(Span::styled(
            "  Press Esc or any key to close",
            Style::default().fg(cs.status_idle),
        )),
    ];

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(cs.popup_border))
        .style(Style::default().fg(cs.popup_text).bg(cs.popup_bg))
        .title(" Help ");
    let p = Paragraph::new(help_text)
        .block(block)
        .wrap(Wrap { trim: false });
    f.render_widget(p, area);
}

/// Rect of `percent_x` × `percent_y` centered inside `r`
pub fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}
