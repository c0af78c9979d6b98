use crate::math::stats::StatsHelper;
use crate::prelude::{
    ProcessingStage, StageConfig, StageError, StageInput, StageMetadata, StageOutput, StageResult,
};
use crate::telemetry::log::LogManager;

/// Trailing moving average over the rectified current. Leading samples use
/// every sample seen so far, so the output has no gap.
pub struct SmoothingStage {
    window: Option<usize>,
    logger: LogManager,
}

impl SmoothingStage {
    pub fn new() -> Self {
        Self {
            window: None,
            logger: LogManager::new("smoothing"),
        }
    }
}

impl Default for SmoothingStage {
    fn default() -> Self {
        Self::new()
    }
}

impl ProcessingStage for SmoothingStage {
    fn initialize(&mut self, config: &StageConfig) -> StageResult<()> {
        if config.smoothing_window == 0 {
            return Err(StageError::InvalidInput(
                "smoothing window must be at least 1".into(),
            ));
        }
        self.window = Some(config.smoothing_window);
        Ok(())
    }

    fn execute(&mut self, input: StageInput) -> StageResult<StageOutput> {
        let window = self
            .window
            .ok_or_else(|| StageError::Internal("stage not initialized".into()))?;

        let samples = StatsHelper::trailing_mean(&input.samples, window);
        self.logger.detail(&format!(
            "smoothed {} samples over window {}",
            samples.len(),
            window
        ));

        Ok(StageOutput {
            samples,
            metadata: StageMetadata {
                window: Some(window),
                notes: vec![format!("window {}", window)],
            },
        })
    }

    fn cleanup(&mut self) {
        self.window = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(samples: Vec<f64>) -> Vec<f64> {
        let mut stage = SmoothingStage::new();
        stage.initialize(&StageConfig::default()).unwrap();
        let output = stage.execute(StageInput { samples }).unwrap();
        stage.cleanup();
        output.samples
    }

    #[test]
    fn constant_signal_stays_constant() {
        let output = run(vec![42.0; 20]);
        assert!(output.iter().all(|&v| v == 42.0));
        assert_eq!(output.len(), 20);
    }

    #[test]
    fn leading_samples_average_everything_seen() {
        let input: Vec<f64> = (1..=10).map(f64::from).collect();
        let output = run(input.clone());
        for k in 0..8 {
            let expected = input[..=k].iter().sum::<f64>() / (k + 1) as f64;
            assert_eq!(output[k], expected);
        }
        // Full window from index 7 on: mean of 2..=9 and 3..=10.
        assert_eq!(output[8], 5.5);
        assert_eq!(output[9], 6.5);
    }

    #[test]
    fn empty_input_smooths_to_empty() {
        assert!(run(Vec::new()).is_empty());
    }

    #[test]
    fn zero_window_is_rejected() {
        let mut stage = SmoothingStage::new();
        let err = stage
            .initialize(&StageConfig {
                smoothing_window: 0,
            })
            .unwrap_err();
        assert!(matches!(err, StageError::InvalidInput(_)));
    }
}
