use serde::{Deserialize, Serialize};
use std::sync::Mutex;

/// Line accounting for one extraction pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractionSnapshot {
    pub lines: usize,
    pub candidates: usize,
    pub accepted: usize,
    pub malformed: usize,
}

impl ExtractionSnapshot {
    /// Lines that never carried the tag marker.
    pub fn untagged(&self) -> usize {
        self.lines - self.candidates
    }
}

pub struct MetricsRecorder {
    inner: Mutex<ExtractionSnapshot>,
}

impl MetricsRecorder {
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(ExtractionSnapshot::default()),
        }
    }

    pub fn record_line(&self) {
        if let Ok(mut metrics) = self.inner.lock() {
            metrics.lines += 1;
        }
    }

    pub fn record_candidate(&self) {
        if let Ok(mut metrics) = self.inner.lock() {
            metrics.candidates += 1;
        }
    }

    pub fn record_accepted(&self) {
        if let Ok(mut metrics) = self.inner.lock() {
            metrics.accepted += 1;
        }
    }

    pub fn record_malformed(&self) {
        if let Ok(mut metrics) = self.inner.lock() {
            metrics.malformed += 1;
        }
    }

    pub fn snapshot(&self) -> ExtractionSnapshot {
        if let Ok(metrics) = self.inner.lock() {
            *metrics
        } else {
            ExtractionSnapshot::default()
        }
    }
}

impl Default for MetricsRecorder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recorder_snapshot_tracks_counts() {
        let recorder = MetricsRecorder::new();
        recorder.record_line();
        recorder.record_line();
        recorder.record_candidate();
        recorder.record_malformed();

        let snapshot = recorder.snapshot();
        assert_eq!(snapshot.lines, 2);
        assert_eq!(snapshot.candidates, 1);
        assert_eq!(snapshot.accepted, 0);
        assert_eq!(snapshot.malformed, 1);
        assert_eq!(snapshot.untagged(), 1);
    }
}
