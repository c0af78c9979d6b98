pub mod assembly;
pub mod classifier;
pub mod conditioner;
pub mod rectify;
pub mod smoothing;
pub mod timebase;

pub use assembly::assemble;
pub use classifier::{ClassifiedStreams, PowerSample, PulseEvent, RecordClassifier};
pub use conditioner::SignalConditioner;
pub use rectify::RectifyStage;
pub use smoothing::SmoothingStage;
pub use timebase::{normalize_time, TimedRecord};
