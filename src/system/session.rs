//! One monitoring session: a sampler thread, its running flag, and the
//! receiving end of the sample channel.
//!
//! The sampler never touches UI state. It only sends owned `Sample` values
//! over an mpsc channel; the UI drains them in order on its own tick.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;

use crate::system::network::{CounterSource, SysinfoCounters};
use crate::system::ping::{LatencyProbe, SystemPing};
use crate::system::sampler::{Sample, Sampler};

/// Fixed sampling cadence
pub const SAMPLE_INTERVAL: Duration = Duration::from_secs(1);

pub struct MonitorSession {
    running: Arc<AtomicBool>,
    handle: Option<JoinHandle<()>>,
    rx: Receiver<Sample>,
}

impl MonitorSession {
    /// Start a session against the real OS counters and `ping` binary
    pub fn spawn_system(host: &str) -> std::io::Result<Self> {
        let sampler = Sampler::new(SysinfoCounters::new(), SystemPing::new(host));
        Self::spawn(sampler, SAMPLE_INTERVAL)
    }

    /// Move `sampler` onto its own thread, emitting one sample per `interval`
    pub fn spawn<C, P>(mut sampler: Sampler<C, P>, interval: Duration) -> std::io::Result<Self>
    where
        C: CounterSource + Send + 'static,
        P: LatencyProbe + Send + 'static,
    {
        let (tx, rx) = mpsc::channel();
        let running = Arc::new(AtomicBool::new(true));
        let flag = Arc::clone(&running);

        let handle = thread::Builder::new()
            .name("netpulse-sampler".into())
            .spawn(move || {
                while flag.load(Ordering::Relaxed) {
                    thread::sleep(interval);
                    if !flag.load(Ordering::Relaxed) {
                        break;
                    }
                    // Receiver gone: the session was dropped without stop()
                    if tx.send(sampler.sample()).is_err() {
                        break;
                    }
                }
                log::debug!("sampler thread exiting");
            })?;

        Ok(Self {
            running,
            handle: Some(handle),
            rx,
        })
    }

    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::Relaxed)
    }

    /// Ask the sampler to stop after its in-flight cycle; does not block
    pub fn request_stop(&self) {
        self.running.store(false, Ordering::Relaxed);
    }

    /// Non-blocking drain of every sample emitted since the last call, in order.
    /// Returns `None` once the sampler thread has gone away and nothing is left.
    pub fn drain(&self) -> Option<Vec<Sample>> {
        let mut samples = Vec::new();
        loop {
            match self.rx.try_recv() {
                Ok(sample) => samples.push(sample),
                Err(TryRecvError::Empty) => return Some(samples),
                Err(TryRecvError::Disconnected) => {
                    return if samples.is_empty() { None } else { Some(samples) };
                }
            }
        }
    }

    /// Clear the running flag and wait for the sampler thread to finish
    pub fn stop(mut self) {
        self.request_stop();
        self.join();
    }

    fn join(&mut self) {
        if let Some(handle) = self.handle.take() {
            if handle.join().is_err() {
                log::error!("sampler thread panicked");
            }
        }
    }
}

impl Drop for MonitorSession {
    fn drop(&mut self) {
        self.request_stop();
        self.join();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::system::ping::PingOutcome;
    use crate::system::sampler::tests::{snap, ScriptedCounters, ScriptedProbe};
    use std::collections::VecDeque;
    use std::time::Instant;

    fn fake_session(interval: Duration) -> MonitorSession {
        let counters = ScriptedCounters(VecDeque::from([
            snap(0, 0),
            snap(0, 125_000),
            snap(0, 375_000),
            snap(0, 750_000),
        ]));
        let probe = ScriptedProbe(VecDeque::from([PingOutcome::Reply(10.0)]));
        MonitorSession::spawn(Sampler::new(counters, probe), interval).unwrap()
    }

    fn collect(session: &MonitorSession, want: usize) -> Vec<Sample> {
        let deadline = Instant::now() + Duration::from_secs(5);
        let mut got = Vec::new();
        while got.len() < want && Instant::now() < deadline {
            if let Some(batch) = session.drain() {
                got.extend(batch);
            }
            thread::sleep(Duration::from_millis(5));
        }
        got
    }

    #[test]
    fn delivers_samples_in_order() {
        let session = fake_session(Duration::from_millis(10));
        let samples = collect(&session, 3);
        assert!(samples.len() >= 3);
        // Each step grows, so a reorder or duplicate changes this sequence
        let rates: Vec<f64> = samples[..3].iter().map(|s| s.download_mbps).collect();
        assert_eq!(rates, [1.0, 2.0, 3.0]);
        assert!(samples.iter().all(|s| s.ping_ms == 10.0 && !s.packet_lost));
        session.stop();
    }

    #[test]
    fn stop_ends_the_thread() {
        let session = fake_session(Duration::from_millis(10));
        assert!(session.is_running());
        let started = Instant::now();
        session.stop();
        assert!(started.elapsed() < Duration::from_secs(2));
    }

    #[test]
    fn request_stop_disconnects_the_channel() {
        let session = fake_session(Duration::from_millis(10));
        session.request_stop();
        assert!(!session.is_running());

        let deadline = Instant::now() + Duration::from_secs(5);
        loop {
            if session.drain().is_none() {
                break;
            }
            assert!(Instant::now() < deadline, "sampler never exited");
            thread::sleep(Duration::from_millis(5));
        }
    }
}
