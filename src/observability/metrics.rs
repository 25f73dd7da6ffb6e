use std::collections::VecDeque;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Mutex;
use std::time::{Duration, Instant};

const DEFAULT_WINDOW: usize = 32;

/// Per-node counters plus a window of recent call start times for
/// call-frequency estimation. Purely observational.
pub struct NodeMetrics {
    node_id: String,
    frames_processed: AtomicU64,
    frames_dropped: AtomicU64,
    errors_count: AtomicU64,
    total_latency_us: AtomicU64,
    latency_samples: AtomicU64,
    recent_calls: Mutex<VecDeque<Instant>>,
    window: usize,
}

impl NodeMetrics {
    pub fn new(node_id: impl Into<String>) -> Self {
        Self::with_window(node_id, DEFAULT_WINDOW)
    }

    pub fn with_window(node_id: impl Into<String>, window: usize) -> Self {
        Self {
            node_id: node_id.into(),
            frames_processed: AtomicU64::new(0),
            frames_dropped: AtomicU64::new(0),
            errors_count: AtomicU64::new(0),
            total_latency_us: AtomicU64::new(0),
            latency_samples: AtomicU64::new(0),
            recent_calls: Mutex::new(VecDeque::with_capacity(window)),
            window: window.max(2),
        }
    }

    pub fn node_id(&self) -> &str {
        &self.node_id
    }

    pub fn frames_processed(&self) -> u64 {
        self.frames_processed.load(Ordering::Relaxed)
    }

    pub fn frames_dropped(&self) -> u64 {
        self.frames_dropped.load(Ordering::Relaxed)
    }

    pub fn errors_count(&self) -> u64 {
        self.errors_count.load(Ordering::Relaxed)
    }

    pub fn record_frame_processed(&self) {
        self.frames_processed.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_frame_dropped(&self) {
        self.frames_dropped.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_error(&self) {
        self.errors_count.fetch_add(1, Ordering::Relaxed);
    }

    /// Marks the start of a processing call
    pub fn start_processing(&self) -> Instant {
        let now = Instant::now();
        let mut calls = self
            .recent_calls
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        if calls.len() == self.window {
            calls.pop_front();
        }
        calls.push_back(now);
        now
    }

    pub fn finish_processing(&self, start: Instant) {
        let latency_us = start.elapsed().as_micros() as u64;
        self.total_latency_us.fetch_add(latency_us, Ordering::Relaxed);
        self.latency_samples.fetch_add(1, Ordering::Relaxed);
    }

    pub fn avg_latency_us(&self) -> u64 {
        let samples = self.latency_samples.load(Ordering::Relaxed);
        if samples == 0 {
            return 0;
        }
        self.total_latency_us.load(Ordering::Relaxed) / samples
    }

    /// Start times of the most recent calls, oldest first
    pub fn recent_calls(&self) -> Vec<Instant> {
        self.recent_calls
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .iter()
            .copied()
            .collect()
    }

    /// Calls per second over the recent window, 0.0 until two calls are seen
    pub fn call_frequency_hz(&self) -> f64 {
        let calls = self
            .recent_calls
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        let (Some(first), Some(last)) = (calls.front(), calls.back()) else {
            return 0.0;
        };
        let span = last.duration_since(*first);
        if calls.len() < 2 || span == Duration::ZERO {
            return 0.0;
        }
        (calls.len() - 1) as f64 / span.as_secs_f64()
    }
}
