use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

pub const DEFAULT_INPUT: &str = "power_data.csv";

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct WorkflowConfig {
    pub input: PathBuf,
    pub export: Option<PathBuf>,
    pub report: Option<PathBuf>,
}

impl Default for WorkflowConfig {
    fn default() -> Self {
        Self {
            input: PathBuf::from(DEFAULT_INPUT),
            export: None,
            report: None,
        }
    }
}

impl WorkflowConfig {
    pub fn load<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let path_ref = path.as_ref();
        let contents = fs::read_to_string(path_ref)
            .with_context(|| format!("reading workflow config {}", path_ref.display()))?;
        serde_yaml::from_str(&contents)
            .with_context(|| format!("parsing workflow config {}", path_ref.display()))
    }

    pub fn from_args(input: PathBuf, export: Option<PathBuf>, report: Option<PathBuf>) -> Self {
        Self {
            input,
            export,
            report,
        }
    }

    /// Command-line values win over the file for anything given explicitly.
    pub fn override_with(
        mut self,
        input: Option<PathBuf>,
        export: Option<PathBuf>,
        report: Option<PathBuf>,
    ) -> Self {
        if let Some(input) = input {
            self.input = input;
        }
        if export.is_some() {
            self.export = export;
        }
        if report.is_some() {
            self.report = report;
        }
        self
    }
}
