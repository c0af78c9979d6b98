pub mod series;
pub mod style;

pub use series::{ModeRun, PowerPoint, PulsePoint, RenderPayload, SeriesStats};
pub use style::{Palette, Rgb, StyleConfig, StyleError};
