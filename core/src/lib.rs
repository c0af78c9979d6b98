//! Ingestion and signal-conditioning core for NEON FLUX device telemetry.
//!
//! A telemetry log mixes battery samples and haptic pulse events on tagged lines.
//! The modules load the log under an unknown encoding, extract fixed six-field
//! records, split them into power and pulse streams on a shared time origin, and
//! condition the power stream for the renderer.

pub mod ingest;
pub mod math;
pub mod pipeline;
pub mod prelude;
pub mod processing;
pub mod render_interface;
pub mod telemetry;

pub use pipeline::{run_pipeline, PipelineOutput};
pub use prelude::{PipelineError, ProcessingStage, StageInput, StageOutput};
