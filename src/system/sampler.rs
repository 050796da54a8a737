use chrono::Local;

use crate::system::network::{CounterSnapshot, CounterSource, Throughput};
use crate::system::ping::{LatencyProbe, PingOutcome};

/// Timestamp layout carried by every sample
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// One second's worth of measurements
#[derive(Debug, Clone, PartialEq)]
pub struct Sample {
    pub download_mbps: f64,
    pub upload_mbps: f64,
    pub ping_ms: f64,
    pub packet_lost: bool,
    /// Ping binary could not be started (always implies `packet_lost`)
    pub tool_unavailable: bool,
    pub timestamp: String,
}

impl Sample {
    pub fn new(throughput: Throughput, ping: PingOutcome, timestamp: String) -> Self {
        Self {
            download_mbps: throughput.download_mbps,
            upload_mbps: throughput.upload_mbps,
            ping_ms: ping.latency_ms(),
            packet_lost: ping.is_lost(),
            tool_unavailable: ping == PingOutcome::ToolUnavailable,
            timestamp,
        }
    }
}

/// Produces samples from a counter source and a latency probe.
///
/// Holds only the most recent counter snapshot; every `measure()` replaces it.
pub struct Sampler<C, P> {
    counters: C,
    probe: P,
    previous: CounterSnapshot,
}

impl<C: CounterSource, P: LatencyProbe> Sampler<C, P> {
    /// Takes the baseline snapshot immediately so the first sample is a real delta
    pub fn new(mut counters: C, probe: P) -> Self {
        let previous = counters.read();
        Self {
            counters,
            probe,
            previous,
        }
    }

    /// Throughput since the previous call (or since construction)
    pub fn measure(&mut self) -> Throughput {
        let current = self.counters.read();
        let throughput = Throughput::between(self.previous, current);
        self.previous = current;
        throughput
    }

    pub fn ping(&mut self) -> PingOutcome {
        self.probe.probe()
    }

    /// One full cycle: timestamp, counter delta, then the (blocking) ping
    pub fn sample(&mut self) -> Sample {
        let timestamp = Local::now().format(TIMESTAMP_FORMAT).to_string();
        let throughput = self.measure();
        let ping = self.ping();
        Sample::new(throughput, ping, timestamp)
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use std::collections::VecDeque;

    /// Replays a fixed list of snapshots, repeating the last one
    pub(crate) struct ScriptedCounters(pub VecDeque<CounterSnapshot>);

    impl CounterSource for ScriptedCounters {
        fn read(&mut self) -> CounterSnapshot {
            if self.0.len() > 1 {
                self.0.pop_front().unwrap_or_default()
            } else {
                self.0.front().copied().unwrap_or_default()
            }
        }
    }

    /// Replays a fixed list of ping outcomes, repeating the last one
    pub(crate) struct ScriptedProbe(pub VecDeque<PingOutcome>);

    impl LatencyProbe for ScriptedProbe {
        fn probe(&mut self) -> PingOutcome {
            if self.0.len() > 1 {
                self.0.pop_front().unwrap_or(PingOutcome::Lost)
            } else {
                self.0.front().copied().unwrap_or(PingOutcome::Lost)
            }
        }
    }

    pub(crate) fn snap(sent: u64, recv: u64) -> CounterSnapshot {
        CounterSnapshot { bytes_sent: sent, bytes_received: recv }
    }

    #[test]
    fn measure_uses_previous_snapshot() {
        let counters = ScriptedCounters(VecDeque::from([
            snap(0, 0),
            snap(250_000, 1_000_000),
            snap(250_000, 3_500_000),
        ]));
        let mut sampler = Sampler::new(counters, ScriptedProbe(VecDeque::new()));

        let first = sampler.measure();
        assert!((first.download_mbps - 8.0).abs() < 1e-9);
        assert!((first.upload_mbps - 2.0).abs() < 1e-9);

        let second = sampler.measure();
        assert!((second.download_mbps - 20.0).abs() < 1e-9);
        assert_eq!(second.upload_mbps, 0.0);
    }

    #[test]
    fn sample_carries_ping_outcome() {
        let counters = ScriptedCounters(VecDeque::from([snap(0, 0)]));
        let probe = ScriptedProbe(VecDeque::from([
            PingOutcome::Reply(12.5),
            PingOutcome::Lost,
            PingOutcome::ToolUnavailable,
        ]));
        let mut sampler = Sampler::new(counters, probe);

        let ok = sampler.sample();
        assert_eq!(ok.ping_ms, 12.5);
        assert!(!ok.packet_lost);

        let lost = sampler.sample();
        assert_eq!(lost.ping_ms, 0.0);
        assert!(lost.packet_lost);
        assert!(!lost.tool_unavailable);

        let missing = sampler.sample();
        assert!(missing.packet_lost);
        assert!(missing.tool_unavailable);
    }

    #[test]
    fn timestamp_uses_fixed_layout() {
        let counters = ScriptedCounters(VecDeque::from([snap(0, 0)]));
        let mut sampler = Sampler::new(counters, ScriptedProbe(VecDeque::new()));
        let sample = sampler.sample();
        assert!(chrono::NaiveDateTime::parse_from_str(&sample.timestamp, TIMESTAMP_FORMAT).is_ok());
    }
}
