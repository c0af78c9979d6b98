use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Trailing moving-average window applied to the rectified current.
pub const SMOOTHING_WINDOW: usize = 8;

/// Shared configuration for each conditioning stage.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StageConfig {
    pub smoothing_window: usize,
}

impl Default for StageConfig {
    fn default() -> Self {
        Self {
            smoothing_window: SMOOTHING_WINDOW,
        }
    }
}

/// Input payload for a conditioning stage.
#[derive(Debug, Clone, Default)]
pub struct StageInput {
    pub samples: Vec<f64>,
}

/// Output produced by each stage. The sample count always matches the input.
#[derive(Debug, Clone)]
pub struct StageOutput {
    pub samples: Vec<f64>,
    pub metadata: StageMetadata,
}

/// Metadata used for chaining stages and logging.
#[derive(Debug, Clone, Default)]
pub struct StageMetadata {
    pub window: Option<usize>,
    pub notes: Vec<String>,
}

/// Common error type for stage execution.
#[derive(thiserror::Error, Debug)]
pub enum StageError {
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("internal failure: {0}")]
    Internal(String),
}

pub type StageResult<T> = Result<T, StageError>;

/// Trait describing the sample-vector conditioning stages.
pub trait ProcessingStage {
    fn initialize(&mut self, config: &StageConfig) -> StageResult<()>;
    fn execute(&mut self, input: StageInput) -> StageResult<StageOutput>;
    fn cleanup(&mut self);
}

/// Whole-pipeline failures. Per-line problems never reach this type.
#[derive(thiserror::Error, Debug)]
pub enum PipelineError {
    #[error("could not read {}: {source}", path.display())]
    UnreadableInput {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("could not decode {} with any supported encoding", path.display())]
    Undecodable { path: PathBuf },
    #[error("no valid data found in {}", path.display())]
    NoValidData { path: PathBuf },
    #[error(transparent)]
    Stage(#[from] StageError),
}

pub type PipelineResult<T> = Result<T, PipelineError>;
