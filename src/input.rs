use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::app::{App, AppMode};

/// Handle a single key input event.
pub fn handle_input(app: &mut App, key: KeyEvent) {
    // Ctrl+C always quits, whatever the mode
    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        app.should_quit = true;
        return;
    }

    match app.mode {
        AppMode::Normal        => handle_normal_mode(app, key),
        AppMode::ThresholdEdit => handle_threshold_edit_mode(app, key),
        AppMode::Help          => handle_help_mode(app, key),
    }
}

// ── Normal mode ─────────────────────────────────────────────────────────

fn handle_normal_mode(app: &mut App, key: KeyEvent) {
    match key.code {
        // ── Quit ──
        KeyCode::F(10) | KeyCode::Char('q') | KeyCode::Char('Q') => app.should_quit = true,

        // ── Start / restart ──
        KeyCode::Char('s') | KeyCode::Char('S') | KeyCode::Enter => app.start(),

        // ── Threshold spin control ──
        KeyCode::Up | KeyCode::Char('+') | KeyCode::Char('=') => app.adjust_threshold(1),
        KeyCode::Down | KeyCode::Char('-') => app.adjust_threshold(-1),
        KeyCode::PageUp => app.adjust_threshold(10),
        KeyCode::PageDown => app.adjust_threshold(-10),
        KeyCode::Char('t') | KeyCode::Char('T') => app.begin_threshold_edit(),
        // A bare digit starts editing with that digit
        KeyCode::Char(c) if c.is_ascii_digit() => {
            app.begin_threshold_edit();
            app.threshold_input.clear();
            app.threshold_input_push(c);
        }

        // ── Display ──
        KeyCode::Char('c') => app.cycle_color_scheme(),
        KeyCode::F(1) | KeyCode::Char('?') | KeyCode::Char('h') => app.mode = AppMode::Help,

        _ => {}
    }
}

// ── Threshold edit mode ─────────────────────────────────────────────────

fn handle_threshold_edit_mode(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Esc => app.cancel_threshold_edit(),
        KeyCode::Enter => app.commit_threshold_edit(),
        KeyCode::Backspace => app.threshold_input_backspace(),
        KeyCode::Char(c) if c.is_ascii_digit() => app.threshold_input_push(c),
        KeyCode::F(10) => app.should_quit = true,
        _ => {}
    }
}

// ── Help mode ───────────────────────────────────────────────────────────

fn handle_help_mode(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::F(10) | KeyCode::Char('q') => app.should_quit = true,
        // Any other key closes help
        _ => app.mode = AppMode::Normal,
    }
}
