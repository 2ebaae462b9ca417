//! Named start/stop timing with aggregate statistics.

use bevy::prelude::*;
use std::collections::HashMap;
use std::time::{Duration, Instant};

/// Aggregate statistics over one label's recorded timings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimingStats {
    pub avg: Duration,
    pub min: Duration,
    pub max: Duration,
    pub count: usize,
}

/// Wall-clock instrumentation for pipeline stages.
///
/// Supports one in-flight mark per label: a second `start` under the same
/// label overwrites the first, so interleaved measurements of the same label
/// are a known limitation, not an error. Missing marks and empty histories
/// read back as `None`.
///
/// Lives as an explicitly constructed resource owned by the app - there is
/// deliberately no global instance.
#[derive(Resource, Default)]
pub struct PerformanceMonitor {
    marks: HashMap<String, Instant>,
    history: HashMap<String, Vec<Duration>>,
}

impl PerformanceMonitor {
    /// Open a mark for `label`, overwriting any unterminated one.
    pub fn start(&mut self, label: &str) {
        self.marks.insert(label.to_string(), Instant::now());
    }

    /// Close the mark for `label` and record the elapsed time.
    ///
    /// Returns `None` when no mark is open for the label.
    pub fn end(&mut self, label: &str) -> Option<Duration> {
        let started = self.marks.remove(label)?;
        let elapsed = started.elapsed();
        self.record(label, elapsed);
        Some(elapsed)
    }

    fn record(&mut self, label: &str, elapsed: Duration) {
        self.history
            .entry(label.to_string())
            .or_default()
            .push(elapsed);
    }

    /// Statistics over everything recorded for `label`, or `None` when
    /// nothing has been recorded yet.
    pub fn stats(&self, label: &str) -> Option<TimingStats> {
        let samples = self.history.get(label)?;
        if samples.is_empty() {
            return None;
        }

        let total: Duration = samples.iter().sum();
        Some(TimingStats {
            avg: total / samples.len() as u32,
            min: *samples.iter().min()?,
            max: *samples.iter().max()?,
            count: samples.len(),
        })
    }

    /// Labels with recorded history, sorted for stable display.
    pub fn labels(&self) -> Vec<&str> {
        let mut labels: Vec<&str> = self.history.keys().map(String::as_str).collect();
        labels.sort_unstable();
        labels
    }

    /// Drop all marks and recorded history.
    pub fn clear(&mut self) {
        self.marks.clear();
        self.history.clear();
    }
}
