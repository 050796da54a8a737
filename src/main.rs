//! netpulse: a terminal network monitor.
//!
//! Features:
//!   - Download/upload throughput sampled once per second
//!   - Ping latency and cumulative packet loss to a fixed host
//!   - Rolling charts redrawn ~33 times per second
//!   - Speed-drop alert below a configurable threshold
//!
//! Keybindings: Press F1 or '?' for help.

#![allow(dead_code)]

mod app;
mod color_scheme;
mod config;
mod input;
mod mouse;
mod system;
mod ui;

use std::fs::File;
use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};

use app::App;
use config::NetpulseConfig;

/// Redraw cadence in milliseconds
const TICK_RATE_MS: u64 = 30;

#[derive(Parser, Debug)]
#[command(name = "netpulse")]
#[command(about = "Live network throughput, ping and packet-loss monitor")]
#[command(version)]
struct Cli {
    /// Host to ping once per second
    #[arg(long, value_parser = system::ping::validate_host)]
    host: Option<String>,

    /// Alert when download drops below this many Mbps (1-10000)
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..=10_000))]
    threshold: Option<u32>,

    /// Number of samples kept for the charts
    #[arg(long)]
    capacity: Option<usize>,

    /// Config file to read and save instead of the platform default
    #[arg(long)]
    config: Option<PathBuf>,

    /// Write logs to this file (RUST_LOG controls the level, default info)
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Begin monitoring immediately instead of waiting for Start
    #[arg(long)]
    autostart: bool,
}

fn init_logging(path: &Path) -> Result<()> {
    let file = File::create(path)
        .with_context(|| format!("failed to create log file {}", path.display()))?;
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .target(env_logger::Target::Pipe(Box::new(file)))
        .init();
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // stderr belongs to the terminal UI, so logs only go to an explicit file
    if let Some(path) = &cli.log_file {
        init_logging(path)?;
    }

    let config_path = cli.config.clone().or_else(config::default_config_path);
    let file_cfg = NetpulseConfig::load(config_path.as_deref());
    let mut cfg = file_cfg.clone();
    if let Some(host) = &cli.host {
        cfg.host = host.clone();
    }
    if let Some(threshold) = cli.threshold {
        cfg.alert_threshold_mbps = threshold;
    }
    if let Some(capacity) = cli.capacity {
        cfg.history_capacity = config::clamp_capacity(capacity);
    }

    let mut app = App::new(cfg.host.clone(), cfg.history_capacity);
    cfg.apply_to(&mut app);
    if cli.autostart {
        app.start();
    }

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    // Run the app
    let result = run_app(&mut terminal, &mut app);

    // Restore terminal; the sampler is stopped and settings saved either way
    let restored = restore_terminal(&mut terminal);
    shutdown(&mut app, config_path.as_deref(), &file_cfg, &cfg);

    if let Err(e) = result {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }

    restored
}

fn restore_terminal(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>) -> Result<()> {
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;
    Ok(())
}

/// Stop sampling and write back settings changed during the session
fn shutdown(
    app: &mut App,
    config_path: Option<&Path>,
    file_cfg: &NetpulseConfig,
    launched: &NetpulseConfig,
) {
    // Joins the sampler; at most one cycle of extra latency
    app.stop();

    let Some(path) = config_path else {
        return;
    };
    let cfg = file_cfg.persisted(launched, &NetpulseConfig::from_app(app));
    match cfg.save(path) {
        Ok(()) => log::info!("saved config to {}", path.display()),
        Err(e) => log::warn!("could not save config: {:#}", e),
    }
}

/// Main application loop
fn run_app(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>, app: &mut App) -> Result<()> {
    let tick = Duration::from_millis(TICK_RATE_MS);

    loop {
        // Pull whatever the sampler produced since the last tick
        app.poll_samples();

        // Draw
        terminal.draw(|f| ui::draw(f, app))?;

        if app.should_quit {
            return Ok(());
        }

        if event::poll(tick)? {
            match event::read()? {
                Event::Key(key) => {
                    // On Windows, crossterm fires Press and Release; only handle Press
                    if key.kind == KeyEventKind::Press {
                        input::handle_input(app, key);
                    }
                }
                Event::Mouse(mouse) => {
                    let size = terminal.size()?;
                    mouse::handle_mouse(app, mouse, size.width, size.height);
                }
                Event::Resize(_, _) => {
                    // Terminal resize - will be handled on next draw
                }
                _ => {}
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn threshold_flag_is_range_checked() {
        assert!(Cli::try_parse_from(["netpulse", "--threshold", "0"]).is_err());
        assert!(Cli::try_parse_from(["netpulse", "--threshold", "10001"]).is_err());
        let cli = Cli::try_parse_from(["netpulse", "--threshold", "75", "--host", "1.1.1.1"]).unwrap();
        assert_eq!(cli.threshold, Some(75));
        assert_eq!(cli.host.as_deref(), Some("1.1.1.1"));
        assert!(!cli.autostart);
    }

    #[test]
    fn option_like_host_is_rejected() {
        assert!(Cli::try_parse_from(["netpulse", "--host=-f"]).is_err());
    }

    #[test]
    fn shutdown_stops_and_saves_only_session_changes() {
        let dir = std::env::temp_dir().join(format!("netpulse-shutdown-{}", std::process::id()));
        let path = dir.join("netpulserc");

        let file_cfg = NetpulseConfig::default();
        let launched = NetpulseConfig {
            alert_threshold_mbps: 75,
            ..file_cfg.clone()
        };
        let mut app = App::new(launched.host.clone(), launched.history_capacity);
        launched.apply_to(&mut app);
        app.cycle_color_scheme();

        shutdown(&mut app, Some(path.as_path()), &file_cfg, &launched);

        assert_eq!(app.state, app::MonitorState::Stopped);
        let saved = NetpulseConfig::load(Some(path.as_path()));
        assert_eq!(saved.alert_threshold_mbps, file_cfg.alert_threshold_mbps);
        assert_eq!(saved.color_scheme_id, app.color_scheme_id);
        let _ = std::fs::remove_dir_all(&dir);
    }
}
