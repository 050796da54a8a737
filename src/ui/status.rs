use ratatui::Frame;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::widgets::Paragraph;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use crate::app::App;

/// Cut `text` to at most `max` display columns, marking the cut with `…`
pub fn truncate_to_width(text: &str, max: usize) -> String {
    if text.width() <= max {
        return text.to_string();
    }
    if max == 0 {
        return String::new();
    }
    let mut out = String::new();
    let mut used = 0;
    for c in text.chars() {
        let w = c.width().unwrap_or(0);
        if used + w + 1 > max {
            break;
        }
        out.push(c);
        used += w;
    }
    out.push('…');
    out
}

/// Centered status line; alert styling while download is below the threshold
pub fn draw_status(f: &mut Frame, app: &App, area: Rect) {
    let cs = &app.color_scheme;
    let style = if app.is_alerting() || app.tool_unavailable() {
        cs.alert()
    } else if app.last_sample.is_some() {
        Style::default().fg(cs.status_fg).bg(cs.bg)
    } else {
        Style::default()
            .fg(cs.status_idle)
            .bg(cs.bg)
            .add_modifier(Modifier::ITALIC)
    };

    let text = truncate_to_width(&app.status, area.width as usize);
    f.render_widget(
        Paragraph::new(text).style(style).alignment(Alignment::Center),
        area,
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_text_is_untouched() {
        assert_eq!(truncate_to_width("Status: Idle", 40), "Status: Idle");
    }

    #[test]
    fn long_text_is_cut_with_ellipsis() {
        let cut = truncate_to_width("↓ 12.00 Mbps | ↑ 3.00 Mbps", 10);
        assert_eq!(cut.width(), 10);
        assert!(cut.ends_with('…'));
    }

    #[test]
    fn zero_width_gives_empty() {
        assert_eq!(truncate_to_width("abc", 0), "");
    }
}
