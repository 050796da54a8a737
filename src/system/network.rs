use sysinfo::Networks;

/// Cumulative byte counters summed over every interface
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CounterSnapshot {
    /// Total transmitted since boot (bytes)
    pub bytes_sent: u64,
    /// Total received since boot (bytes)
    pub bytes_received: u64,
}

/// Throughput over one sampling cycle, in megabits
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Throughput {
    pub download_mbps: f64,
    pub upload_mbps: f64,
}

impl Throughput {
    /// Bytes → bits → megabits for the delta between two snapshots.
    /// A counter that went backwards (reset, interface removed) yields 0.
    pub fn between(prev: CounterSnapshot, curr: CounterSnapshot) -> Self {
        Self {
            download_mbps: bytes_to_megabits(curr.bytes_received.saturating_sub(prev.bytes_received)),
            upload_mbps: bytes_to_megabits(curr.bytes_sent.saturating_sub(prev.bytes_sent)),
        }
    }
}

fn bytes_to_megabits(bytes: u64) -> f64 {
    bytes as f64 * 8.0 / 1_000_000.0
}

/// Anything that can report cumulative interface counters
pub trait CounterSource {
    fn read(&mut self) -> CounterSnapshot;
}

/// Counter source backed by the `sysinfo` crate
pub struct SysinfoCounters {
    networks: Networks,
}

impl SysinfoCounters {
    pub fn new() -> Self {
        Self {
            networks: Networks::new_with_refreshed_list(),
        }
    }
}

impl CounterSource for SysinfoCounters {
    fn read(&mut self) -> CounterSnapshot {
        // true = drop interfaces that vanished since the last refresh
        self.networks.refresh(true);

        let mut snapshot = CounterSnapshot::default();
        for (_name, data) in self.networks.iter() {
            snapshot.bytes_received = snapshot.bytes_received.saturating_add(data.total_received());
            snapshot.bytes_sent = snapshot.bytes_sent.saturating_add(data.total_transmitted());
        }
        snapshot
    }
}
