//! Latency probe that shells out to the system `ping` binary.
//!
//! No ICMP is issued from this process. Every failure mode collapses into a
//! lost packet for the caller; only a missing/unspawnable binary is kept
//! distinguishable so the UI can say so instead of reporting 100% loss.

use std::io;
use std::process::{Command, Stdio};

use thiserror::Error;

/// Probe target used when nothing else is configured
pub const DEFAULT_HOST: &str = "8.8.8.8";

/// Result of a single echo request
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PingOutcome {
    /// Reply received, round-trip time in milliseconds
    Reply(f64),
    /// No usable reply (timeout, unreachable, unparsable output)
    Lost,
    /// The ping binary itself could not be started
    ToolUnavailable,
}

impl PingOutcome {
    pub fn latency_ms(&self) -> f64 {
        match self {
            PingOutcome::Reply(ms) => *ms,
            _ => 0.0,
        }
    }

    pub fn is_lost(&self) -> bool {
        !matches!(self, PingOutcome::Reply(_))
    }
}

#[derive(Debug, Error)]
pub enum PingError {
    #[error("failed to spawn ping: {0}")]
    Spawn(#[source] io::Error),
    #[error("ping exited with status {0:?}")]
    Exit(Option<i32>),
    #[error("no time= token in ping output")]
    MissingLatency,
    #[error("unparsable latency value {0:?}")]
    BadLatency(String),
}

impl From<PingError> for PingOutcome {
    fn from(err: PingError) -> Self {
        match err {
            PingError::Spawn(_) => PingOutcome::ToolUnavailable,
            _ => PingOutcome::Lost,
        }
    }
}

/// Anything that can measure round-trip latency once
pub trait LatencyProbe {
    fn probe(&mut self) -> PingOutcome;
}

/// Probe backed by the OS `ping` command
pub struct SystemPing {
    program: String,
    host: String,
    /// Remember the last failure kind so repeats are not logged every second
    last_error: Option<String>,
}

impl SystemPing {
    pub fn new(host: impl Into<String>) -> Self {
        Self::with_program("ping", host)
    }

    /// Use `program` in place of `ping`; it gets the same arguments
    pub fn with_program(program: impl Into<String>, host: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            host: host.into(),
            last_error: None,
        }
    }
}

impl LatencyProbe for SystemPing {
    fn probe(&mut self) -> PingOutcome {
        match run_ping(&self.program, &self.host) {
            Ok(ms) => {
                if self.last_error.take().is_some() {
                    log::info!("ping to {} recovered ({:.1} ms)", self.host, ms);
                }
                PingOutcome::Reply(ms)
            }
            Err(err) => {
                let msg = err.to_string();
                if self.last_error.as_deref() != Some(msg.as_str()) {
                    log::warn!("ping to {} failed: {}", self.host, msg);
                    self.last_error = Some(msg);
                }
                err.into()
            }
        }
    }
}

/// Send one echo request to `host`, swallowing every failure.
pub fn ping_host(host: &str) -> PingOutcome {
    SystemPing::new(host).probe()
}

/// Reject targets `ping` would misread: empty, whitespace, or option-like
pub fn validate_host(host: &str) -> Result<String, String> {
    let host = host.trim();
    if host.is_empty() {
        return Err("host must not be empty".into());
    }
    if host.starts_with('-') {
        return Err(format!("host {:?} looks like a command-line option", host));
    }
    if host.contains(char::is_whitespace) {
        return Err(format!("host {:?} contains whitespace", host));
    }
    Ok(host.to_string())
}

/// Count flag differs by OS family: `-n` on Windows, `-c` elsewhere
pub fn ping_args(host: &str) -> [&str; 3] {
    if cfg!(windows) {
        ["-n", "1", host]
    } else {
        ["-c", "1", host]
    }
}

fn run_ping(program: &str, host: &str) -> Result<f64, PingError> {
    let output = Command::new(program)
        .args(ping_args(host))
        .stdin(Stdio::null())
        .stderr(Stdio::null())
        .output()
        .map_err(PingError::Spawn)?;

    if !output.status.success() {
        return Err(PingError::Exit(output.status.code()));
    }

    parse_latency(&String::from_utf8_lossy(&output.stdout))
}

/// Extract the round-trip time from ping's textual reply.
///
/// Matches the last `time=` token case-insensitively and reads its leading
/// number, so `time=23.4 ms` (Unix) and `time=23ms` (Windows) both work.
/// Exponent notation is rejected rather than cut short.
pub fn parse_latency(output: &str) -> Result<f64, PingError> {
    let lower = output.to_lowercase();
    let start = lower.rfind("time=").ok_or(PingError::MissingLatency)? + "time=".len();
    let token = lower[start..].split_whitespace().next().unwrap_or("");

    let numeric_len = token
        .char_indices()
        .take_while(|(_, c)| c.is_ascii_digit() || *c == '.')
        .map(|(i, c)| i + c.len_utf8())
        .last()
        .unwrap_or(0);

    if token[numeric_len..].starts_with('e') {
        return Err(PingError::BadLatency(token.to_string()));
    }

    token[..numeric_len]
        .parse::<f64>()
        .ok()
        .filter(|ms| ms.is_finite())
        .ok_or_else(|| PingError::BadLatency(token.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    const LINUX_REPLY: &str = "PING 8.8.8.8 (8.8.8.8) 56(84) bytes of data.\n\
        64 bytes from 8.8.8.8: icmp_seq=1 ttl=117 time=23.4 ms\n\n\
        --- 8.8.8.8 ping statistics ---\n\
        1 packets transmitted, 1 received, 0% packet loss, time 0ms\n\
        rtt min/avg/max/mdev = 23.400/23.400/23.400/0.000 ms\n";

    const WINDOWS_REPLY: &str = "Pinging 8.8.8.8 with 32 bytes of data:\r\n\
        Reply from 8.8.8.8: bytes=32 time=17ms TTL=117\r\n\r\n\
        Ping statistics for 8.8.8.8:\r\n";

    #[test]
    fn parses_unix_reply() {
        let ms = parse_latency(LINUX_REPLY).unwrap();
        assert!((ms - 23.4).abs() < 1e-9);
    }

    #[test]
    fn parses_windows_reply_without_space() {
        assert_eq!(parse_latency(WINDOWS_REPLY).unwrap(), 17.0);
    }

    #[test]
    fn token_is_case_insensitive() {
        assert_eq!(parse_latency("Reply TIME=5.5 MS").unwrap(), 5.5);
    }

    #[test]
    fn missing_token_is_an_error() {
        let err = parse_latency("Request timed out.\n").unwrap_err();
        assert!(matches!(err, PingError::MissingLatency));
        assert_eq!(PingOutcome::from(err), PingOutcome::Lost);
    }

    #[test]
    fn non_numeric_value_is_an_error() {
        let err = parse_latency("time=abc ms").unwrap_err();
        assert!(matches!(err, PingError::BadLatency(_)));
    }

    #[test]
    fn exponent_value_is_rejected() {
        let err = parse_latency("time=1e3 ms").unwrap_err();
        assert!(matches!(err, PingError::BadLatency(ref t) if t == "1e3"));
    }

    #[test]
    fn sub_millisecond_marker_is_not_a_reply() {
        // Windows prints `time<1ms`, which carries no `time=` token
        assert!(parse_latency("bytes=32 time<1ms TTL=64").is_err());
    }

    #[test]
    fn outcome_maps_to_latency_and_loss() {
        assert_eq!(PingOutcome::Reply(23.4).latency_ms(), 23.4);
        assert!(!PingOutcome::Reply(23.4).is_lost());
        assert_eq!(PingOutcome::Lost.latency_ms(), 0.0);
        assert!(PingOutcome::Lost.is_lost());
        assert!(PingOutcome::ToolUnavailable.is_lost());
    }

    #[test]
    fn spawn_failure_is_tool_unavailable() {
        let err = PingError::Spawn(io::Error::new(io::ErrorKind::NotFound, "no ping"));
        assert_eq!(PingOutcome::from(err), PingOutcome::ToolUnavailable);
        assert_eq!(PingOutcome::from(PingError::Exit(Some(1))), PingOutcome::Lost);
    }

    #[test]
    fn missing_binary_is_tool_unavailable() {
        let mut probe = SystemPing::with_program("netpulse-no-such-ping-binary", "127.0.0.1");
        assert_eq!(probe.probe(), PingOutcome::ToolUnavailable);
        // Repeats keep the same outcome
        assert_eq!(probe.probe(), PingOutcome::ToolUnavailable);
    }

    #[cfg(unix)]
    #[test]
    fn nonzero_exit_is_lost_even_with_a_time_token() {
        // `false` ignores its arguments and exits 1
        let mut probe = SystemPing::with_program("false", "time=5.0");
        assert_eq!(probe.probe(), PingOutcome::Lost);
    }

    #[cfg(unix)]
    #[test]
    fn successful_run_is_parsed_from_stdout() {
        // `echo` prints its arguments back, host included
        let mut probe = SystemPing::with_program("echo", "time=23.4");
        assert_eq!(probe.probe(), PingOutcome::Reply(23.4));
    }

    #[test]
    fn unresolvable_host_counts_as_lost() {
        // .invalid never resolves; without a ping binary this is still a loss
        assert!(ping_host("netpulse.invalid").is_lost());
    }

    #[test]
    fn host_validation() {
        assert_eq!(validate_host(" 8.8.8.8 ").unwrap(), "8.8.8.8");
        assert!(validate_host("example.com").is_ok());
        assert!(validate_host("").is_err());
        assert!(validate_host("-f").is_err());
        assert!(validate_host("a b").is_err());
    }

    #[test]
    fn count_flag_matches_platform() {
        let args = ping_args("1.1.1.1");
        assert_eq!(args[1], "1");
        assert_eq!(args[2], "1.1.1.1");
        if cfg!(windows) {
            assert_eq!(args[0], "-n");
        } else {
            assert_eq!(args[0], "-c");
        }
    }
}
