use crate::ingest::{LogLoader, RecordExtractor, TextEncoding};
use crate::prelude::{PipelineError, PipelineResult, StageConfig};
use crate::processing::{assemble, normalize_time, RecordClassifier, SignalConditioner};
use crate::render_interface::RenderPayload;
use crate::telemetry::ExtractionSnapshot;
use std::path::Path;

/// Result of a full run: the renderer payload plus ingest diagnostics.
#[derive(Debug, Clone)]
pub struct PipelineOutput {
    pub payload: RenderPayload,
    pub encoding: TextEncoding,
    pub extraction: ExtractionSnapshot,
}

/// Loads, extracts, classifies and conditions one log file.
pub fn run_pipeline<P: AsRef<Path>>(path: P) -> PipelineResult<PipelineOutput> {
    let path = path.as_ref();
    let decoded = LogLoader::new().load(path)?;
    process_text(path, &decoded.text).map(|(payload, extraction)| PipelineOutput {
        payload,
        encoding: decoded.encoding,
        extraction,
    })
}

/// Everything after decoding. `path` is only used for diagnostics.
pub fn process_text(
    path: &Path,
    text: &str,
) -> PipelineResult<(RenderPayload, ExtractionSnapshot)> {
    let extraction = RecordExtractor::new().extract(text);
    if extraction.records.is_empty() {
        return Err(PipelineError::NoValidData {
            path: path.to_path_buf(),
        });
    }

    let timed = normalize_time(&extraction.records);
    let streams = RecordClassifier::new().classify(&timed);
    let power_series = SignalConditioner::new(StageConfig::default()).condition(&streams.power)?;
    Ok((assemble(power_series, &streams.pulses), extraction.metrics))
}
