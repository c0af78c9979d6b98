use anyhow::Context;
use clap::ValueEnum;
use fluxcore::ingest::{OperationalMode, PULSE_STATE, TAG_MARKER};
use rand::{rngs::StdRng, Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use std::fmt::Write as _;
use std::fs;
use std::path::Path;

/// Configuration for generating a synthetic watch telemetry log.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    /// Number of power samples; pulses and noise lines come on top.
    pub samples: usize,
    pub seed: u64,
    pub start_millis: i64,
    pub sample_period_millis: i64,
    pub start_level: u32,
    /// Probability that a pulse follows a power sample.
    pub pulse_rate: f64,
    /// Probability that a free-text line follows a power sample.
    pub noise_rate: f64,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            samples: 600,
            seed: 0,
            start_millis: 1_731_000_000_000,
            sample_period_millis: 500,
            start_level: 92,
            pulse_rate: 0.35,
            noise_rate: 0.1,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogEncoding {
    Utf8,
    Utf16,
    Latin1,
}

impl LogEncoding {
    /// UTF-16 is written little-endian with a BOM, the way adb dumps it on
    /// Windows hosts.
    pub fn encode(self, text: &str) -> anyhow::Result<Vec<u8>> {
        match self {
            Self::Utf8 => Ok(text.as_bytes().to_vec()),
            Self::Utf16 => {
                let mut bytes = vec![0xFF, 0xFE];
                for unit in text.encode_utf16() {
                    bytes.extend_from_slice(&unit.to_le_bytes());
                }
                Ok(bytes)
            }
            Self::Latin1 => text
                .chars()
                .map(|c| u8::try_from(u32::from(c)).ok())
                .collect::<Option<Vec<u8>>>()
                .context("text contains characters outside latin-1"),
        }
    }
}

const NOISE_LINES: [&str; 5] = [
    "D/FluxService: RX Config Sync: 72 BPM",
    "D/BatteryService: idle drain 12 µA",
    "W/Vibrator: amplitude control unavailable",
    "I/ActivityManager: Start proc com.snakesan.neonflux",
    "D/BatteryService: level changed 1000,2000 (not a record)",
];

/// Mean draw in microamps for each mode.
fn base_current(mode: OperationalMode) -> f64 {
    match mode {
        OperationalMode::Stealth => 18_000.0,
        OperationalMode::Flux => 95_000.0,
        OperationalMode::Clinical => 42_000.0,
    }
}

fn logcat_prefix(millis: i64) -> String {
    let seconds = millis.rem_euclid(86_400_000) / 1000;
    format!(
        "11-07 {:02}:{:02}:{:02}.{:03}  4242  4242 I FluxService:",
        seconds / 3600,
        (seconds / 60) % 60,
        seconds % 60,
        millis.rem_euclid(1000)
    )
}

pub fn build_log_text(config: &GeneratorConfig) -> String {
    let mut rng = StdRng::seed_from_u64(config.seed);
    let mut text = String::new();
    let mut time = config.start_millis;
    let mut mode = OperationalMode::Stealth;
    let mut level = f64::from(config.start_level.min(100));
    let period = config.sample_period_millis.max(1);

    for _ in 0..config.samples {
        if rng.gen_bool(0.02) {
            mode = OperationalMode::ALL[rng.gen_range(0..OperationalMode::ALL.len())];
        }
        let draw = base_current(mode) * rng.gen_range(0.8..1.2);
        // Negative current means the battery is discharging.
        let current = -(draw.round() as i64);
        let voltage = 3_600 + (level * 6.0) as u32 + rng.gen_range(0..15);
        level = (level - draw / 4_000_000.0).max(0.0);

        let _ = writeln!(
            text,
            "{} {} {},{},{},{},{},{}",
            logcat_prefix(time),
            TAG_MARKER,
            time,
            rng.gen_range(0..2),
            mode.code(),
            current,
            voltage,
            level.round() as u32
        );

        if rng.gen_bool(config.pulse_rate.clamp(0.0, 1.0)) {
            let offset = rng.gen_range(0..period);
            let _ = writeln!(
                text,
                "{} {} {},{},{},{},0,0",
                logcat_prefix(time + offset),
                TAG_MARKER,
                time + offset,
                PULSE_STATE,
                mode.code(),
                rng.gen_range(20..=100)
            );
        }
        if rng.gen_bool(config.noise_rate.clamp(0.0, 1.0)) {
            let line = NOISE_LINES[rng.gen_range(0..NOISE_LINES.len())];
            let _ = writeln!(text, "{} {}", logcat_prefix(time), line);
        }
        time += period;
    }
    text
}

pub fn write_log(path: &Path, config: &GeneratorConfig, encoding: LogEncoding) -> anyhow::Result<()> {
    let bytes = encoding.encode(&build_log_text(config))?;
    fs::write(path, bytes).with_context(|| format!("writing synthetic log {}", path.display()))
}
