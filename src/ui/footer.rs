use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::app::{App, AppMode};

/// Key bar entries: (key_label, description)
const KEYS_NORMAL: &[(&str, &str)] = &[
    ("s", "Start "),
    ("↑↓", "Alert±1 "),
    ("PgUp/Dn", "±10 "),
    ("t", "Type alert "),
    ("c", "Colors "),
    ("F1", "Help "),
    ("q", "Quit "),
];

const KEYS_EDIT: &[(&str, &str)] = &[
    ("0-9", "Digits "),
    ("Bksp", "Delete "),
    ("Enter", "Accept "),
    ("Esc", "Cancel "),
];

const KEYS_HELP: &[(&str, &str)] = &[("Esc", "Close "), ("q", "Quit ")];

/// Draw the bottom key bar
pub fn draw_footer(f: &mut Frame, app: &App, area: Rect) {
    let cs = &app.color_scheme;

    // Full-width background first
    let bg_fill = " ".repeat(area.width as usize);
    f.render_widget(
        Paragraph::new(bg_fill).style(Style::default().bg(cs.footer_label_bg)),
        area,
    );

    let keys = match app.mode {
        AppMode::ThresholdEdit => KEYS_EDIT,
        AppMode::Help => KEYS_HELP,
        AppMode::Normal => KEYS_NORMAL,
    };

    let mut spans: Vec<Span> = Vec::new();
    for (key, desc) in keys {
        spans.push(Span::styled(
            key.to_string(),
            Style::default()
                .fg(cs.footer_key_fg)
                .bg(cs.footer_key_bg)
                .add_modifier(Modifier::BOLD),
        ));
        spans.push(Span::styled(
            desc.to_string(),
            Style::default().fg(cs.footer_label_fg).bg(cs.footer_label_bg),
        ));
    }

    f.render_widget(Paragraph::new(Line::from(spans)), area);
}
