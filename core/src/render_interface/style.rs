use crate::ingest::record::OperationalMode;
use serde::{Deserialize, Serialize};

#[derive(thiserror::Error, Debug, PartialEq, Eq)]
pub enum StyleError {
    #[error("invalid colour {value:?} for {field}")]
    InvalidColour { field: &'static str, value: String },
}

/// 8-bit RGB triple parsed from a `#RRGGBB` string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub fn parse(field: &'static str, value: &str) -> Result<Self, StyleError> {
        let invalid = || StyleError::InvalidColour {
            field,
            value: value.to_string(),
        };
        let hex = value.strip_prefix('#').ok_or_else(invalid)?;
        if hex.len() != 6 || !hex.is_ascii() {
            return Err(invalid());
        }
        let channel = |range: std::ops::Range<usize>| {
            u8::from_str_radix(&hex[range], 16).map_err(|_| invalid())
        };
        Ok(Self {
            r: channel(0..2)?,
            g: channel(2..4)?,
            b: channel(4..6)?,
        })
    }

    pub fn to_unit(self) -> [f32; 3] {
        [
            self.r as f32 / 255.0,
            self.g as f32 / 255.0,
            self.b as f32 / 255.0,
        ]
    }
}

/// Presentation constants for the three-panel figure. Passed to the renderer
/// explicitly; never global.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StyleConfig {
    pub title: String,
    pub background: String,
    pub text: String,
    pub grid: String,
    pub power: String,
    pub level: String,
    pub pulse: String,
    pub mode_stealth: String,
    pub mode_flux: String,
    pub mode_clinical: String,
    pub raw_alpha: f32,
    pub pulse_alpha: f32,
    pub band_alpha: f32,
}

impl Default for StyleConfig {
    fn default() -> Self {
        Self {
            title: "NEON FLUX // HAPTIC & POWER ANALYSIS".into(),
            background: "#050505".into(),
            text: "#00F3FF".into(),
            grid: "#222222".into(),
            power: "#FF0055".into(),
            level: "#00FF41".into(),
            pulse: "#FFFFFF".into(),
            mode_stealth: "#444444".into(),
            mode_flux: "#D400FF".into(),
            mode_clinical: "#00F3FF".into(),
            raw_alpha: 0.15,
            pulse_alpha: 0.6,
            band_alpha: 0.2,
        }
    }
}

/// Parsed form of [`StyleConfig`], ready for drawing.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Palette {
    pub background: Rgb,
    pub text: Rgb,
    pub grid: Rgb,
    pub power: Rgb,
    pub level: Rgb,
    pub pulse: Rgb,
    pub modes: [Rgb; 3],
    pub raw_alpha: f32,
    pub pulse_alpha: f32,
    pub band_alpha: f32,
}

impl Palette {
    pub fn mode(&self, mode: OperationalMode) -> Rgb {
        self.modes[mode.code() as usize]
    }
}

impl StyleConfig {
    pub fn palette(&self) -> Result<Palette, StyleError> {
        Ok(Palette {
            background: Rgb::parse("background", &self.background)?,
            text: Rgb::parse("text", &self.text)?,
            grid: Rgb::parse("grid", &self.grid)?,
            power: Rgb::parse("power", &self.power)?,
            level: Rgb::parse("level", &self.level)?,
            pulse: Rgb::parse("pulse", &self.pulse)?,
            modes: [
                Rgb::parse("mode_stealth", &self.mode_stealth)?,
                Rgb::parse("mode_flux", &self.mode_flux)?,
                Rgb::parse("mode_clinical", &self.mode_clinical)?,
            ],
            raw_alpha: self.raw_alpha.clamp(0.0, 1.0),
            pulse_alpha: self.pulse_alpha.clamp(0.0, 1.0),
            band_alpha: self.band_alpha.clamp(0.0, 1.0),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_palette_parses() {
        let palette = StyleConfig::default().palette().unwrap();
        assert_eq!(palette.power, Rgb { r: 0xFF, g: 0x00, b: 0x55 });
        assert_eq!(
            palette.mode(OperationalMode::Flux),
            Rgb { r: 0xD4, g: 0x00, b: 0xFF }
        );
    }

    #[test]
    fn malformed_colour_is_rejected() {
        let style = StyleConfig {
            grid: "222222".into(),
            ..Default::default()
        };
        assert_eq!(
            style.palette().unwrap_err(),
            StyleError::InvalidColour {
                field: "grid",
                value: "222222".into()
            }
        );
        assert!(Rgb::parse("pulse", "#GGGGGG").is_err());
        assert!(Rgb::parse("pulse", "#FFF").is_err());
    }
}
