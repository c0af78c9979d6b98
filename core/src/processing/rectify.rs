use crate::prelude::{
    ProcessingStage, StageConfig, StageError, StageInput, StageMetadata, StageOutput, StageResult,
};
use crate::telemetry::log::LogManager;

/// Drops the charge-direction sign from current samples.
pub struct RectifyStage {
    config: Option<StageConfig>,
    logger: LogManager,
}

impl RectifyStage {
    pub fn new() -> Self {
        Self {
            config: None,
            logger: LogManager::new("rectify"),
        }
    }
}

impl Default for RectifyStage {
    fn default() -> Self {
        Self::new()
    }
}

impl ProcessingStage for RectifyStage {
    fn initialize(&mut self, config: &StageConfig) -> StageResult<()> {
        self.config = Some(config.clone());
        Ok(())
    }

    fn execute(&mut self, input: StageInput) -> StageResult<StageOutput> {
        if self.config.is_none() {
            return Err(StageError::Internal("stage not initialized".into()));
        }

        let flipped = input.samples.iter().filter(|&&v| v < 0.0).count();
        let samples: Vec<f64> = input.samples.into_iter().map(f64::abs).collect();
        self.logger
            .detail(&format!("rectified {} of {} samples", flipped, samples.len()));

        Ok(StageOutput {
            samples,
            metadata: StageMetadata {
                notes: vec![format!("negated {}", flipped)],
                ..Default::default()
            },
        })
    }

    fn cleanup(&mut self) {
        self.config = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rectify_stage_takes_magnitude() {
        let mut stage = RectifyStage::new();
        stage.initialize(&StageConfig::default()).unwrap();
        let output = stage
            .execute(StageInput {
                samples: vec![-5.0, 5.0, 0.0],
            })
            .unwrap();
        assert_eq!(output.samples, vec![5.0, 5.0, 0.0]);
        assert_eq!(output.metadata.notes, vec!["negated 1".to_string()]);
        stage.cleanup();
    }

    #[test]
    fn rectify_stage_requires_initialization() {
        let mut stage = RectifyStage::new();
        let err = stage.execute(StageInput::default()).unwrap_err();
        assert!(matches!(err, StageError::Internal(_)));
    }
}
