use crate::prelude::{ProcessingStage, StageConfig, StageInput, StageResult};
use crate::processing::classifier::PowerSample;
use crate::processing::rectify::RectifyStage;
use crate::processing::smoothing::SmoothingStage;
use crate::render_interface::PowerPoint;
use crate::telemetry::log::LogManager;

/// Chains rectification and smoothing over the power stream and zips the
/// results back onto the samples.
pub struct SignalConditioner {
    config: StageConfig,
    logger: LogManager,
}

impl SignalConditioner {
    pub fn new(config: StageConfig) -> Self {
        Self {
            config,
            logger: LogManager::new("conditioner"),
        }
    }

    pub fn condition(&self, power: &[PowerSample]) -> StageResult<Vec<PowerPoint>> {
        let currents: Vec<f64> = power.iter().map(|sample| sample.current as f64).collect();

        let mut rectify = RectifyStage::new();
        rectify.initialize(&self.config)?;
        let rectified = rectify.execute(StageInput { samples: currents })?;
        rectify.cleanup();

        let mut smoothing = SmoothingStage::new();
        smoothing.initialize(&self.config)?;
        let smoothed = smoothing.execute(StageInput {
            samples: rectified.samples.clone(),
        })?;
        smoothing.cleanup();

        let points: Vec<PowerPoint> = power
            .iter()
            .zip(rectified.samples.iter().zip(smoothed.samples.iter()))
            .map(|(sample, (&current_raw, &current_smoothed))| PowerPoint {
                time: sample.time,
                mode: sample.mode,
                current_raw,
                current_smoothed,
                level: f64::from(sample.level),
            })
            .collect();

        let mut notes = rectified.metadata.notes;
        notes.extend(smoothed.metadata.notes);
        self.logger.record(&format!(
            "conditioned {} samples ({})",
            points.len(),
            notes.join(", ")
        ));
        Ok(points)
    }
}

impl Default for SignalConditioner {
    fn default() -> Self {
        Self::new(StageConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ingest::record::OperationalMode;

    fn sample(time: f64, current: i64) -> PowerSample {
        PowerSample {
            time,
            mode: OperationalMode::Stealth,
            current,
            voltage: 3700,
            level: 80,
        }
    }

    #[test]
    fn conditioner_rectifies_and_smooths_in_place() {
        let power = vec![sample(0.0, -5), sample(1.0, 5), sample(2.0, -20)];
        let points = SignalConditioner::default().condition(&power).unwrap();

        assert_eq!(points.len(), 3);
        let raw: Vec<f64> = points.iter().map(|p| p.current_raw).collect();
        let smooth: Vec<f64> = points.iter().map(|p| p.current_smoothed).collect();
        assert_eq!(raw, vec![5.0, 5.0, 20.0]);
        assert_eq!(smooth, vec![5.0, 5.0, 10.0]);
        assert_eq!(points[2].time, 2.0);
        assert_eq!(points[2].level, 80.0);
    }

    #[test]
    fn empty_power_stream_conditions_to_empty() {
        let points = SignalConditioner::default().condition(&[]).unwrap();
        assert!(points.is_empty());
    }
}
