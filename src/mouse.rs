use crossterm::event::{MouseButton, MouseEvent, MouseEventKind};
use ratatui::layout::{Position, Rect};

use crate::app::{App, AppMode};
use crate::ui;
use crate::ui::controls::{start_button_rect, threshold_rect};

/// Handle a mouse event.
/// Requires the terminal size (columns, rows) to compute layout areas.
pub fn handle_mouse(app: &mut App, mouse: MouseEvent, term_width: u16, term_height: u16) {
    // Overlays and the edit field own the keyboard; ignore the mouse there
    if app.mode != AppMode::Normal {
        return;
    }

    let areas = ui::split(Rect::new(0, 0, term_width, term_height));
    let pos = Position::new(mouse.column, mouse.row);
    let spin = threshold_rect(areas.controls);
    let button = start_button_rect(areas.controls, app.state);

    match mouse.kind {
        MouseEventKind::ScrollUp if spin.contains(pos) => app.adjust_threshold(1),
        MouseEventKind::ScrollDown if spin.contains(pos) => app.adjust_threshold(-1),

        MouseEventKind::Down(MouseButton::Left) => {
            if button.contains(pos) && app.can_start() {
                app.start();
            } else if spin.contains(pos) {
                app.begin_threshold_edit();
            }
        }

        _ => {}
    }
}
