use serde::{Deserialize, Serialize};
use std::fmt;

/// `state` value that marks a haptic pulse rather than a power sample.
pub const PULSE_STATE: u32 = 99;

/// Device operating mode, derived from the firmware's profile index.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(try_from = "u8", into = "u8")]
pub enum OperationalMode {
    Stealth,
    Flux,
    Clinical,
}

impl OperationalMode {
    pub const ALL: [OperationalMode; 3] = [Self::Stealth, Self::Flux, Self::Clinical];

    pub fn from_code(code: u8) -> Option<Self> {
        match code {
            0 => Some(Self::Stealth),
            1 => Some(Self::Flux),
            2 => Some(Self::Clinical),
            _ => None,
        }
    }

    /// Mode for a raw power-sample code. Codes the firmware does not define
    /// render as stealth.
    pub fn from_raw(code: u32) -> Self {
        u8::try_from(code)
            .ok()
            .and_then(Self::from_code)
            .unwrap_or(Self::Stealth)
    }

    pub fn code(self) -> u8 {
        match self {
            Self::Stealth => 0,
            Self::Flux => 1,
            Self::Clinical => 2,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Stealth => "STEALTH",
            Self::Flux => "FLUX",
            Self::Clinical => "CLINICAL",
        }
    }
}

impl From<OperationalMode> for u8 {
    fn from(mode: OperationalMode) -> Self {
        mode.code()
    }
}

impl TryFrom<u8> for OperationalMode {
    type Error = String;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        Self::from_code(code).ok_or_else(|| format!("unknown operational mode {}", code))
    }
}

impl fmt::Display for OperationalMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One parsed telemetry tuple: `Time, State, Mode, Value, Voltage, Level`.
///
/// Only `time_raw` and `value` may be negative. `value` is a signed current in
/// microamps for power samples and a 0-100 intensity for pulses. `mode` stays
/// the raw code; it only means something for power samples.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    pub time_raw: i64,
    pub state: u32,
    pub mode: u32,
    pub value: i64,
    pub voltage: u32,
    pub level: u32,
}

impl Record {
    pub fn is_pulse(&self) -> bool {
        self.state == PULSE_STATE
    }

    /// Coerces six comma-separated tokens into a record. Any token that does
    /// not fit its field yields `None`.
    pub fn from_tokens(tokens: &[&str]) -> Option<Self> {
        let [time_raw, state, mode, value, voltage, level] = tokens else {
            return None;
        };
        Some(Self {
            time_raw: time_raw.parse().ok()?,
            state: state.parse().ok()?,
            mode: mode.parse().ok()?,
            value: value.parse().ok()?,
            voltage: voltage.parse().ok()?,
            level: level.parse().ok()?,
        })
    }
}
