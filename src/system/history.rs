//! Bounded in-memory sample history.
//!
//! The oldest point is discarded once capacity is reached. Sample indices and
//! the loss counters cover the whole session, including evicted points.

use std::collections::VecDeque;

use crate::system::sampler::Sample;

/// Default retention: one hour at 1 Hz
pub const DEFAULT_CAPACITY: usize = 3600;
pub const MIN_CAPACITY: usize = 10;

/// Fixed-capacity FIFO; pushing onto a full buffer drops the oldest value
#[derive(Debug, Clone)]
pub struct RingBuffer<T> {
    data: VecDeque<T>,
    capacity: usize,
}

impl<T> RingBuffer<T> {
    /// # Panics
    ///
    /// Panics if capacity is 0.
    pub fn new(capacity: usize) -> Self {
        assert!(capacity > 0, "ring buffer capacity must be greater than 0");
        Self {
            data: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    pub fn push(&mut self, value: T) {
        if self.data.len() >= self.capacity {
            self.data.pop_front();
        }
        self.data.push_back(value);
    }

    pub fn latest(&self) -> Option<&T> {
        self.data.back()
    }

    pub fn oldest(&self) -> Option<&T> {
        self.data.front()
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Oldest to newest
    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.data.iter()
    }

    pub fn clear(&mut self) {
        self.data.clear();
    }
}

/// One plotted point, derived from a sample at the time it arrived
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HistoryPoint {
    /// 1-based sample index within the session
    pub index: u64,
    pub download_mbps: f64,
    pub upload_mbps: f64,
    pub ping_ms: f64,
    /// Cumulative loss percentage after this sample
    pub loss_pct: f64,
}

#[derive(Debug, Clone)]
pub struct History {
    points: RingBuffer<HistoryPoint>,
    total_samples: u64,
    lost_samples: u64,
}

impl History {
    pub fn new(capacity: usize) -> Self {
        Self {
            points: RingBuffer::new(capacity.max(MIN_CAPACITY)),
            total_samples: 0,
            lost_samples: 0,
        }
    }

    /// Record a sample and return the updated loss percentage
    pub fn push(&mut self, sample: &Sample) -> f64 {
        self.total_samples += 1;
        if sample.packet_lost {
            self.lost_samples += 1;
        }
        let loss_pct = self.loss_pct();
        self.points.push(HistoryPoint {
            index: self.total_samples,
            download_mbps: sample.download_mbps,
            upload_mbps: sample.upload_mbps,
            ping_ms: sample.ping_ms,
            loss_pct,
        });
        loss_pct
    }

    /// Cumulative lost/total × 100; 0 before the first sample
    pub fn loss_pct(&self) -> f64 {
        if self.total_samples == 0 {
            0.0
        } else {
            (self.lost_samples as f64 / self.total_samples as f64) * 100.0
        }
    }

    pub fn total_samples(&self) -> u64 {
        self.total_samples
    }

    pub fn lost_samples(&self) -> u64 {
        self.lost_samples
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.points.capacity()
    }

    pub fn latest(&self) -> Option<&HistoryPoint> {
        self.points.latest()
    }

    pub fn points(&self) -> impl Iterator<Item = &HistoryPoint> {
        self.points.iter()
    }

    /// (index, value) pairs ready for a chart dataset
    pub fn series(&self, value: impl Fn(&HistoryPoint) -> f64) -> Vec<(f64, f64)> {
        self.points.iter().map(|p| (p.index as f64, value(p))).collect()
    }

    /// Inclusive sample-index span of the retained points
    pub fn index_bounds(&self) -> Option<(u64, u64)> {
        Some((self.points.oldest()?.index, self.points.latest()?.index))
    }

    pub fn clear(&mut self) {
        self.points.clear();
        self.total_samples = 0;
        self.lost_samples = 0;
    }
}
