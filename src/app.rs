use crate::color_scheme::{ColorScheme, ColorSchemeId};
use crate::system::history::History;
use crate::system::sampler::Sample;
use crate::system::session::MonitorSession;

pub const DEFAULT_THRESHOLD_MBPS: u32 = 50;
pub const THRESHOLD_MIN: u32 = 1;
pub const THRESHOLD_MAX: u32 = 10_000;

pub const ALERT_MARKER: &str = "⚠ SPEED DROP";
pub const TOOL_MARKER: &str = "⚠ PING TOOL UNAVAILABLE";

/// Clamp any integer into the alert threshold range
pub fn clamp_threshold(value: i64) -> u32 {
    value.clamp(THRESHOLD_MIN as i64, THRESHOLD_MAX as i64) as u32
}

/// Download below the threshold raises the alert; equal does not
pub fn is_speed_drop(download_mbps: f64, threshold_mbps: u32) -> bool {
    download_mbps < threshold_mbps as f64
}

/// Status line for one sample, with markers appended
pub fn format_status(sample: &Sample, threshold_mbps: u32) -> String {
    let mut msg = format!(
        "[{}]  ↓ {:.2} Mbps | ↑ {:.2} Mbps | Ping {:.1} ms",
        sample.timestamp, sample.download_mbps, sample.upload_mbps, sample.ping_ms
    );
    if is_speed_drop(sample.download_mbps, threshold_mbps) {
        msg.push_str("  ");
        msg.push_str(ALERT_MARKER);
    }
    if sample.tool_unavailable {
        msg.push_str("  ");
        msg.push_str(TOOL_MARKER);
    }
    msg
}

/// Presenter lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MonitorState {
    Idle,
    Monitoring,
    Stopped,
}

/// Which view/mode the app is currently in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppMode {
    Normal,
    ThresholdEdit, // t: type a new threshold
    Help,
}

/// Main application state
pub struct App {
    pub mode: AppMode,
    pub state: MonitorState,
    pub should_quit: bool,

    /// Probe target for new sessions
    pub host: String,

    // Alert threshold spin control
    pub threshold_mbps: u32,
    pub threshold_input: String,

    // Sample data
    pub history: History,
    pub last_sample: Option<Sample>,
    pub status: String,

    // Color scheme
    pub color_scheme_id: ColorSchemeId,
    pub color_scheme: ColorScheme,

    session: Option<MonitorSession>,
    /// Replaced sessions still winding down; joined on stop()
    retired: Vec<MonitorSession>,
}

impl App {
    pub fn new(host: impl Into<String>, history_capacity: usize) -> Self {
        Self {
            mode: AppMode::Normal,
            state: MonitorState::Idle,
            should_quit: false,

            host: host.into(),

            threshold_mbps: DEFAULT_THRESHOLD_MBPS,
            threshold_input: String::new(),

            history: History::new(history_capacity),
            last_sample: None,
            status: "Status: Idle".to_string(),

            color_scheme_id: ColorSchemeId::Default,
            color_scheme: ColorScheme::from_id(ColorSchemeId::Default),

            session: None,
            retired: Vec::new(),
        }
    }

    // ── Session lifecycle ───────────────────────────────────────────────

    /// Start (or restart) monitoring against the real network stack
    pub fn start(&mut self) {
        if self.state == MonitorState::Stopped {
            return;
        }
        match MonitorSession::spawn_system(&self.host) {
            Ok(session) => self.start_with(session),
            Err(e) => {
                log::error!("failed to spawn sampler thread: {}", e);
                self.status = format!("Status: failed to start sampler ({})", e);
            }
        }
    }

    /// Reset all session data and take ownership of `session`.
    /// A session already running is retired, never orphaned.
    pub fn start_with(&mut self, session: MonitorSession) {
        self.history.clear();
        self.last_sample = None;

        if let Some(old) = self.session.replace(session) {
            old.request_stop();
            self.retired.push(old);
            log::info!("restarted monitoring, previous session retired");
        } else {
            log::info!("monitoring started (host {})", self.host);
        }

        self.state = MonitorState::Monitoring;
        self.status = format!("Status: Monitoring {}, waiting for first sample", self.host);
    }

    /// Stop every sampler and wait for them; the app cannot restart afterwards
    pub fn stop(&mut self) {
        if let Some(session) = self.session.take() {
            session.stop();
        }
        for session in self.retired.drain(..) {
            session.stop();
        }
        if self.state == MonitorState::Monitoring {
            log::info!(
                "monitoring stopped after {} samples ({:.1}% loss)",
                self.history.total_samples(),
                self.history.loss_pct()
            );
        }
        self.state = MonitorState::Stopped;
    }

    /// Drain pending samples from the active session (UI tick)
    pub fn poll_samples(&mut self) {
        // Retired samplers disconnect once their thread exits
        self.retired.retain(|s| s.drain().is_some());

        let Some(session) = self.session.as_ref() else {
            return;
        };
        match session.drain() {
            Some(batch) => {
                for sample in batch {
                    self.on_sample(sample);
                }
            }
            None => {
                log::warn!("sampler thread ended unexpectedly");
                self.session = None;
                self.state = MonitorState::Idle;
                self.status = "Status: sampler stopped, press s to restart".to_string();
            }
        }
    }

    /// Fold one sample into history, loss ratio and the status line
    pub fn on_sample(&mut self, sample: Sample) {
        self.history.push(&sample);
        self.status = format_status(&sample, self.threshold_mbps);
        self.last_sample = Some(sample);
    }

    pub fn is_monitoring(&self) -> bool {
        self.state == MonitorState::Monitoring
    }

    pub fn can_start(&self) -> bool {
        self.state != MonitorState::Stopped
    }

    pub fn is_alerting(&self) -> bool {
        self.last_sample
            .as_ref()
            .is_some_and(|s| is_speed_drop(s.download_mbps, self.threshold_mbps))
    }

    pub fn tool_unavailable(&self) -> bool {
        self.last_sample.as_ref().is_some_and(|s| s.tool_unavailable)
    }

    pub fn loss_pct(&self) -> f64 {
        self.history.loss_pct()
    }

    // ── Threshold spin control ──────────────────────────────────────────

    pub fn set_threshold(&mut self, value: i64) {
        self.threshold_mbps = clamp_threshold(value);
        self.refresh_status();
    }

    pub fn adjust_threshold(&mut self, delta: i64) {
        self.set_threshold(self.threshold_mbps as i64 + delta);
    }

    pub fn begin_threshold_edit(&mut self) {
        self.threshold_input = self.threshold_mbps.to_string();
        self.mode = AppMode::ThresholdEdit;
    }

    pub fn threshold_input_push(&mut self, c: char) {
        // 10000 is five digits; anything longer clamps anyway
        if c.is_ascii_digit() && self.threshold_input.len() < 5 {
            self.threshold_input.push(c);
        }
    }

    pub fn threshold_input_backspace(&mut self) {
        self.threshold_input.pop();
    }

    /// Accept the typed value (clamped); an empty field keeps the old one
    pub fn commit_threshold_edit(&mut self) {
        if let Ok(v) = self.threshold_input.parse::<i64>() {
            self.set_threshold(v);
        }
        self.threshold_input.clear();
        self.mode = AppMode::Normal;
    }

    pub fn cancel_threshold_edit(&mut self) {
        self.threshold_input.clear();
        self.mode = AppMode::Normal;
    }

    // ── Display ─────────────────────────────────────────────────────────

    pub fn cycle_color_scheme(&mut self) {
        self.color_scheme_id = self.color_scheme_id.next();
        self.color_scheme = ColorScheme::from_id(self.color_scheme_id);
    }

    fn refresh_status(&mut self) {
        if let Some(sample) = &self.last_sample {
            self.status = format_status(sample, self.threshold_mbps);
        }
    }
}

impl Drop for App {
    fn drop(&mut self) {
        if self.session.is_some() || !self.retired.is_empty() {
            self.stop();
        }
    }
}
