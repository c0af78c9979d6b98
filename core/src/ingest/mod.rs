pub mod extractor;
pub mod loader;
pub mod record;

pub use extractor::{Extraction, RecordExtractor, TAG_MARKER};
pub use loader::{DecodedLog, LogLoader, TextEncoding};
pub use record::{OperationalMode, Record, PULSE_STATE};
