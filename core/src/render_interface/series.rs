use crate::ingest::record::OperationalMode;
use serde::{Deserialize, Serialize};

/// Conditioned power sample handed to the renderer.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PowerPoint {
    pub time: f64,
    pub mode: OperationalMode,
    /// Rectified current in microamps.
    pub current_raw: f64,
    pub current_smoothed: f64,
    pub level: f64,
}

/// Haptic pulse marker handed to the renderer.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PulsePoint {
    pub time: f64,
    pub intensity: f64,
}

/// Maximal run of power samples sharing one mode.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ModeRun {
    pub mode: OperationalMode,
    pub start_time: f64,
    pub end_time: f64,
}

impl ModeRun {
    pub fn duration(&self) -> f64 {
        self.end_time - self.start_time
    }
}

/// Scalars the renderer needs. Extremes are `None` when the power stream is
/// empty.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SeriesStats {
    pub min_current: Option<f64>,
    pub min_level: Option<f64>,
    pub max_level: Option<f64>,
    pub mode_runs: Vec<ModeRun>,
}

impl SeriesStats {
    /// Vertical range of the fuel-level panel, padded by one percent point.
    pub fn level_bounds(&self) -> Option<(f64, f64)> {
        match (self.min_level, self.max_level) {
            (Some(min), Some(max)) => Some((min - 1.0, max + 1.0)),
            _ => None,
        }
    }
}

/// Everything the renderer receives. It must not be altered downstream.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RenderPayload {
    pub power_series: Vec<PowerPoint>,
    pub pulse_series: Vec<PulsePoint>,
    pub stats: SeriesStats,
}

impl RenderPayload {
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    pub fn from_json(contents: &str) -> serde_json::Result<Self> {
        serde_json::from_str(contents)
    }

    /// First and last timestamp across both series.
    pub fn time_span(&self) -> Option<(f64, f64)> {
        let times = self
            .power_series
            .iter()
            .map(|point| point.time)
            .chain(self.pulse_series.iter().map(|pulse| pulse.time));
        times.fold(None, |span, time| match span {
            None => Some((time, time)),
            Some((start, end)) => Some((start.min(time), end.max(time))),
        })
    }
}
