use crate::workflow::config::WorkflowConfig;
use anyhow::Context;
use fluxcore::ingest::TextEncoding;
use fluxcore::render_interface::RenderPayload;
use fluxcore::run_pipeline;
use fluxcore::telemetry::ExtractionSnapshot;
use serde_json::json;
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::Path;

pub struct WorkflowResult {
    pub payload: RenderPayload,
    pub encoding: TextEncoding,
    pub extraction: ExtractionSnapshot,
}

impl WorkflowResult {
    pub fn summary(&self) -> String {
        format!(
            "Plotting {} power readings and {} haptic events...",
            self.payload.power_series.len(),
            self.payload.pulse_series.len()
        )
    }
}

#[derive(Clone)]
pub struct Runner {
    config: WorkflowConfig,
}

impl Runner {
    pub fn new(config: WorkflowConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &WorkflowConfig {
        &self.config
    }

    pub fn execute(&self) -> anyhow::Result<WorkflowResult> {
        let output = run_pipeline(&self.config.input)
            .with_context(|| format!("processing {}", self.config.input.display()))?;
        let result = WorkflowResult {
            payload: output.payload,
            encoding: output.encoding,
            extraction: output.extraction,
        };

        if let Some(path) = &self.config.export {
            write_export(path, &result.payload)?;
        }
        if let Some(path) = &self.config.report {
            append_report(path, &self.config, &result)?;
        }
        Ok(result)
    }
}

fn ensure_parent(path: &Path) -> anyhow::Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("creating directory {}", parent.display()))?;
    }
    Ok(())
}

pub fn write_export(path: &Path, payload: &RenderPayload) -> anyhow::Result<()> {
    ensure_parent(path)?;
    let contents = payload.to_json().context("serializing render payload")?;
    fs::write(path, contents).with_context(|| format!("writing export {}", path.display()))?;
    log::info!("render payload written to {}", path.display());
    Ok(())
}

/// Appends one JSON line describing the run.
pub fn append_report(
    path: &Path,
    config: &WorkflowConfig,
    result: &WorkflowResult,
) -> anyhow::Result<()> {
    ensure_parent(path)?;
    let stats = &result.payload.stats;
    let line = json!({
        "input": config.input.display().to_string(),
        "encoding": result.encoding.to_string(),
        "lines": result.extraction.lines,
        "records": result.extraction.accepted,
        "malformed": result.extraction.malformed,
        "power_readings": result.payload.power_series.len(),
        "haptic_events": result.payload.pulse_series.len(),
        "min_current": stats.min_current,
        "level_range": stats.min_level.zip(stats.max_level),
        "mode_runs": stats.mode_runs.len(),
        "time_span": result.payload.time_span(),
    });
    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("opening report {}", path.display()))?;
    writeln!(file, "{}", line).with_context(|| format!("appending report {}", path.display()))?;
    Ok(())
}
