//! netpulse configuration persistence (rc-style key=value format)
//!
//! Windows: `%APPDATA%/netpulse/netpulserc`.
//! Elsewhere: `$XDG_CONFIG_HOME/netpulse/netpulserc`, falling back to
//! `~/.config/netpulse/netpulserc`.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::app::{clamp_threshold, App, DEFAULT_THRESHOLD_MBPS};
use crate::color_scheme::{ColorScheme, ColorSchemeId};
use crate::system::history::{DEFAULT_CAPACITY, MIN_CAPACITY};
use crate::system::ping::{validate_host, DEFAULT_HOST};

/// Upper bound on retained points (about a day at 1 Hz)
pub const MAX_CAPACITY: usize = 86_400;

/// Platform config file location
pub fn default_config_path() -> Option<PathBuf> {
    if cfg!(windows) {
        return std::env::var_os("APPDATA")
            .map(|appdata| PathBuf::from(appdata).join("netpulse").join("netpulserc"));
    }
    let base = std::env::var_os("XDG_CONFIG_HOME")
        .filter(|v| !v.is_empty())
        .map(PathBuf::from)
        .or_else(|| std::env::var_os("HOME").map(|home| PathBuf::from(home).join(".config")))?;
    Some(base.join("netpulse").join("netpulserc"))
}

pub fn clamp_capacity(capacity: usize) -> usize {
    capacity.clamp(MIN_CAPACITY, MAX_CAPACITY)
}

/// Persistable settings (subset of App state)
#[derive(Debug, Clone, PartialEq)]
pub struct NetpulseConfig {
    pub host: String,
    pub alert_threshold_mbps: u32,
    pub history_capacity: usize,
    pub color_scheme_id: ColorSchemeId,
}

impl Default for NetpulseConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            alert_threshold_mbps: DEFAULT_THRESHOLD_MBPS,
            history_capacity: DEFAULT_CAPACITY,
            color_scheme_id: ColorSchemeId::Default,
        }
    }
}

impl NetpulseConfig {
    /// Load config from `path`, returning defaults if it is missing or unreadable
    pub fn load(path: Option<&Path>) -> Self {
        let Some(path) = path else {
            return Self::default();
        };
        match fs::read_to_string(path) {
            Ok(content) => {
                log::info!("loaded config from {}", path.display());
                Self::parse(&content)
            }
            Err(e) => {
                log::debug!("no config at {}: {}", path.display(), e);
                Self::default()
            }
        }
    }

    /// Parse rc content; unknown keys are ignored and bad values keep the default
    pub fn parse(content: &str) -> Self {
        let mut cfg = Self::default();

        for line in content.lines() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let Some((key, value)) = line.split_once('=') else {
                continue;
            };
            let value = value.trim();
            match key.trim() {
                "host" => match validate_host(value) {
                    Ok(host) => cfg.host = host,
                    Err(e) => log::warn!("ignoring config host: {}", e),
                },
                "alert_threshold_mbps" => {
                    if let Ok(v) = value.parse::<i64>() {
                        cfg.alert_threshold_mbps = clamp_threshold(v);
                    }
                }
                "history_capacity" => {
                    if let Ok(v) = value.parse::<usize>() {
                        cfg.history_capacity = clamp_capacity(v);
                    }
                }
                "color_scheme" => {
                    if let Ok(idx) = value.parse::<usize>() {
                        cfg.color_scheme_id = ColorSchemeId::from_index(idx);
                    }
                }
                _ => {}
            }
        }

        cfg
    }

    pub fn to_rc_string(&self) -> String {
        let lines = [
            "# netpulse configuration file".to_string(),
            "# Rewritten on exit".to_string(),
            String::new(),
            format!("host={}", self.host),
            format!("alert_threshold_mbps={}", self.alert_threshold_mbps),
            format!("history_capacity={}", self.history_capacity),
            format!("color_scheme={}", self.color_scheme_id as usize),
        ];
        lines.join("\n") + "\n"
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("failed to create config dir {}", parent.display()))?;
        }
        let mut file = fs::File::create(path)
            .with_context(|| format!("failed to create config file {}", path.display()))?;
        file.write_all(self.to_rc_string().as_bytes())
            .with_context(|| format!("failed to write config file {}", path.display()))?;
        Ok(())
    }

    /// Build config from current App state
    pub fn from_app(app: &App) -> Self {
        Self {
            host: app.host.clone(),
            alert_threshold_mbps: app.threshold_mbps,
            history_capacity: app.history.capacity(),
            color_scheme_id: app.color_scheme_id,
        }
    }

    /// Settings to write back on exit. `self` is what the file held, `launched`
    /// is what the session started with after command-line overrides, and
    /// `current` is the state at exit. Only values changed during the session
    /// replace the file's, so one-off flags are not persisted.
    pub fn persisted(&self, launched: &Self, current: &Self) -> Self {
        fn pick<T: PartialEq + Clone>(file: &T, launched: &T, current: &T) -> T {
            if current != launched {
                current.clone()
            } else {
                file.clone()
            }
        }
        Self {
            host: pick(&self.host, &launched.host, &current.host),
            alert_threshold_mbps: pick(
                &self.alert_threshold_mbps,
                &launched.alert_threshold_mbps,
                &current.alert_threshold_mbps,
            ),
            history_capacity: pick(
                &self.history_capacity,
                &launched.history_capacity,
                &current.history_capacity,
            ),
            color_scheme_id: pick(
                &self.color_scheme_id,
                &launched.color_scheme_id,
                &current.color_scheme_id,
            ),
        }
    }

    /// Apply display settings that can change without restarting a session
    pub fn apply_to(&self, app: &mut App) {
        app.host = self.host.clone();
        app.threshold_mbps = self.alert_threshold_mbps;
        app.color_scheme_id = self.color_scheme_id;
        app.color_scheme = ColorScheme::from_id(self.color_scheme_id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_content_gives_defaults() {
        assert_eq!(NetpulseConfig::parse(""), NetpulseConfig::default());
    }

    #[test]
    fn parses_known_keys_and_skips_noise() {
        let cfg = NetpulseConfig::parse(
            "# comment\n\nhost = 1.1.1.1\nalert_threshold_mbps=200\nhistory_capacity=600\n\
             color_scheme=2\nunknown=1\nnot a pair\n",
        );
        assert_eq!(cfg.host, "1.1.1.1");
        assert_eq!(cfg.alert_threshold_mbps, 200);
        assert_eq!(cfg.history_capacity, 600);
        assert_eq!(cfg.color_scheme_id, ColorSchemeId::LightTerminal);
    }

    #[test]
    fn out_of_range_values_are_clamped() {
        let cfg = NetpulseConfig::parse("alert_threshold_mbps=0\nhistory_capacity=1\n");
        assert_eq!(cfg.alert_threshold_mbps, 1);
        assert_eq!(cfg.history_capacity, MIN_CAPACITY);

        let cfg = NetpulseConfig::parse("alert_threshold_mbps=99999\nhistory_capacity=9999999\n");
        assert_eq!(cfg.alert_threshold_mbps, 10_000);
        assert_eq!(cfg.history_capacity, MAX_CAPACITY);
    }

    #[test]
    fn garbage_values_keep_defaults() {
        let cfg = NetpulseConfig::parse("alert_threshold_mbps=fast\nhost=\nhost=a b\nhost=-c\n");
        assert_eq!(cfg.alert_threshold_mbps, DEFAULT_THRESHOLD_MBPS);
        assert_eq!(cfg.host, DEFAULT_HOST);
    }

    #[test]
    fn save_then_load_restores_settings() {
        let dir = std::env::temp_dir().join(format!("netpulse-cfg-{}", std::process::id()));
        let path = dir.join("netpulserc");
        let cfg = NetpulseConfig {
            host: "9.9.9.9".into(),
            alert_threshold_mbps: 75,
            history_capacity: 120,
            color_scheme_id: ColorSchemeId::DarkVivid,
        };
        cfg.save(&path).unwrap();
        assert_eq!(NetpulseConfig::load(Some(path.as_path())), cfg);
        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn command_line_overrides_are_not_persisted() {
        let file = NetpulseConfig::default();
        let launched = NetpulseConfig {
            host: "1.1.1.1".into(),
            alert_threshold_mbps: 75,
            ..file.clone()
        };
        // Threshold edited in the UI, host left as the flag set it
        let current = NetpulseConfig {
            alert_threshold_mbps: 120,
            color_scheme_id: ColorSchemeId::Monochrome,
            ..launched.clone()
        };
        let saved = file.persisted(&launched, &current);
        assert_eq!(saved.host, DEFAULT_HOST);
        assert_eq!(saved.alert_threshold_mbps, 120);
        assert_eq!(saved.history_capacity, DEFAULT_CAPACITY);
        assert_eq!(saved.color_scheme_id, ColorSchemeId::Monochrome);
    }

    #[test]
    fn missing_file_gives_defaults() {
        let path = std::env::temp_dir().join("netpulse-definitely-missing").join("rc");
        assert_eq!(NetpulseConfig::load(Some(path.as_path())), NetpulseConfig::default());
        assert_eq!(NetpulseConfig::load(None), NetpulseConfig::default());
    }
}
