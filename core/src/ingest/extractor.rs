use crate::ingest::record::Record;
use crate::telemetry::log::LogManager;
use crate::telemetry::metrics::{ExtractionSnapshot, MetricsRecorder};
use regex::Regex;
use std::sync::OnceLock;

/// Literal marker the firmware prints in front of every telemetry tuple.
pub const TAG_MARKER: &str = "NEON_PWR";

const FIELD_COUNT: usize = 6;

fn tuple_re() -> &'static Regex {
    static TUPLE_RE: OnceLock<Regex> = OnceLock::new();
    TUPLE_RE.get_or_init(|| Regex::new(r"(-?\d+,){5}-?\d+").expect("valid telemetry tuple regex"))
}

/// Records pulled from a log, in file order, plus line accounting.
#[derive(Debug, Clone)]
pub struct Extraction {
    pub records: Vec<Record>,
    pub metrics: ExtractionSnapshot,
}

fn is_line_break(c: char) -> bool {
    matches!(
        c,
        '\n' | '\r' | '\u{0b}' | '\u{0c}' | '\u{1c}' | '\u{1d}' | '\u{1e}' | '\u{85}' | '\u{2028}' | '\u{2029}'
    )
}

/// Splits on every Unicode line boundary, not just `\n`: logs pulled through
/// different hosts end lines with a lone `\r`, and Latin-1 byte 0x85 decodes to
/// NEL. `\r\n` counts as one boundary and a trailing boundary adds no line.
pub fn split_lines(text: &str) -> Vec<&str> {
    let mut lines = Vec::new();
    let mut start = 0;
    let mut chars = text.char_indices().peekable();
    while let Some((idx, c)) = chars.next() {
        if !is_line_break(c) {
            continue;
        }
        lines.push(&text[start..idx]);
        start = idx + c.len_utf8();
        if c == '\r' {
            if let Some(&(next, '\n')) = chars.peek() {
                chars.next();
                start = next + 1;
            }
        }
    }
    if start < text.len() {
        lines.push(&text[start..]);
    }
    lines
}

/// Two-stage line filter: a cheap tag check, then the structural tuple match.
pub struct RecordExtractor {
    logger: LogManager,
}

impl RecordExtractor {
    pub fn new() -> Self {
        Self {
            logger: LogManager::new("extractor"),
        }
    }

    pub fn extract(&self, text: &str) -> Extraction {
        let recorder = MetricsRecorder::new();
        let mut records = Vec::new();
        for (idx, line) in split_lines(text).into_iter().enumerate() {
            recorder.record_line();
            if !line.contains(TAG_MARKER) {
                continue;
            }
            recorder.record_candidate();
            match parse_line(line) {
                Some(record) => {
                    recorder.record_accepted();
                    records.push(record);
                }
                None => {
                    recorder.record_malformed();
                    self.logger
                        .detail(&format!("skipping malformed line {}: {}", idx + 1, line));
                }
            }
        }

        let metrics = recorder.snapshot();
        self.logger.record(&format!(
            "{} records from {} lines ({} malformed)",
            metrics.accepted, metrics.lines, metrics.malformed
        ));
        Extraction { records, metrics }
    }
}

impl Default for RecordExtractor {
    fn default() -> Self {
        Self::new()
    }
}

/// Parses the first six-integer run on a tagged line.
pub fn parse_line(line: &str) -> Option<Record> {
    let matched = tuple_re().find(line)?;
    let tokens: Vec<&str> = matched.as_str().split(',').collect();
    if tokens.len() != FIELD_COUNT {
        return None;
    }
    Record::from_tokens(&tokens)
}
