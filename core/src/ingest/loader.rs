use crate::prelude::{PipelineError, PipelineResult};
use crate::telemetry::log::LogManager;
use encoding_rs::{UTF_16BE, UTF_16LE, UTF_8};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::Path;

/// Candidate encodings, in the order the loader tries them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TextEncoding {
    Utf8,
    Utf16,
    Latin1,
}

impl TextEncoding {
    pub const CANDIDATES: [TextEncoding; 3] = [Self::Utf8, Self::Utf16, Self::Latin1];

    /// Decodes the full buffer, or returns `None` on the first malformed
    /// sequence. Latin-1 accepts any input.
    pub fn decode(self, bytes: &[u8]) -> Option<String> {
        match self {
            Self::Utf8 => {
                let (text, had_errors) = UTF_8.decode_with_bom_removal(bytes);
                (!had_errors).then(|| text.into_owned())
            }
            Self::Utf16 => {
                let (encoding, body) = match bytes {
                    [0xFF, 0xFE, rest @ ..] => (UTF_16LE, rest),
                    [0xFE, 0xFF, rest @ ..] => (UTF_16BE, rest),
                    _ => (UTF_16LE, bytes),
                };
                encoding
                    .decode_without_bom_handling_and_without_replacement(body)
                    .map(|text| text.into_owned())
            }
            Self::Latin1 => Some(encoding_rs::mem::decode_latin1(bytes).into_owned()),
        }
    }
}

impl fmt::Display for TextEncoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Utf8 => "utf-8",
            Self::Utf16 => "utf-16",
            Self::Latin1 => "latin-1",
        })
    }
}

/// Text content of a log together with the encoding that decoded it.
#[derive(Debug, Clone)]
pub struct DecodedLog {
    pub text: String,
    pub encoding: TextEncoding,
}

/// Reads a telemetry log whose character encoding is not declared.
pub struct LogLoader {
    logger: LogManager,
}

impl LogLoader {
    pub fn new() -> Self {
        Self {
            logger: LogManager::new("loader"),
        }
    }

    pub fn load<P: AsRef<Path>>(&self, path: P) -> PipelineResult<DecodedLog> {
        let path = path.as_ref();
        let bytes = fs::read(path).map_err(|source| PipelineError::UnreadableInput {
            path: path.to_path_buf(),
            source,
        })?;
        self.decode(path, &bytes)
    }

    /// First candidate that decodes the whole buffer wins; the decoded text
    /// is not checked for plausibility.
    pub fn decode(&self, path: &Path, bytes: &[u8]) -> PipelineResult<DecodedLog> {
        for encoding in TextEncoding::CANDIDATES {
            match encoding.decode(bytes) {
                Some(text) => {
                    self.logger.detail(&format!(
                        "decoded {} ({} bytes) as {}",
                        path.display(),
                        bytes.len(),
                        encoding
                    ));
                    return Ok(DecodedLog { text, encoding });
                }
                None => self
                    .logger
                    .detail(&format!("{} is not valid {}", path.display(), encoding)),
            }
        }
        Err(PipelineError::Undecodable {
            path: path.to_path_buf(),
        })
    }
}

impl Default for LogLoader {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const CONTENT: &str = "I/Flux: NEON_PWR 1000,0,0,-50,3700,80\nI/Flux: NEON_PWR 1500,99,0,75,0,0\n";

    fn utf16le_with_bom(text: &str) -> Vec<u8> {
        let mut bytes = vec![0xFF, 0xFE];
        for unit in text.encode_utf16() {
            bytes.extend_from_slice(&unit.to_le_bytes());
        }
        bytes
    }

    fn write_temp(bytes: &[u8]) -> NamedTempFile {
        let mut temp = NamedTempFile::new().unwrap();
        temp.write_all(bytes).unwrap();
        temp
    }

    #[test]
    fn loader_prefers_utf8() {
        let temp = write_temp(CONTENT.as_bytes());
        let decoded = LogLoader::new().load(temp.path()).unwrap();
        assert_eq!(decoded.encoding, TextEncoding::Utf8);
        assert_eq!(decoded.text, CONTENT);
    }

    #[test]
    fn loader_strips_utf8_bom() {
        let mut bytes = vec![0xEF, 0xBB, 0xBF];
        bytes.extend_from_slice(CONTENT.as_bytes());
        let temp = write_temp(&bytes);
        let decoded = LogLoader::new().load(temp.path()).unwrap();
        assert_eq!(decoded.text, CONTENT);
    }

    #[test]
    fn loader_falls_back_to_utf16() {
        let temp = write_temp(&utf16le_with_bom(CONTENT));
        let decoded = LogLoader::new().load(temp.path()).unwrap();
        assert_eq!(decoded.encoding, TextEncoding::Utf16);
        assert_eq!(decoded.text, CONTENT);
    }

    #[test]
    fn big_endian_utf16_is_sniffed_from_bom() {
        let mut bytes = vec![0xFE, 0xFF];
        for unit in CONTENT.encode_utf16() {
            bytes.extend_from_slice(&unit.to_be_bytes());
        }
        let decoded = LogLoader::new()
            .decode(Path::new("be.log"), &bytes)
            .unwrap();
        assert_eq!(decoded.encoding, TextEncoding::Utf16);
        assert_eq!(decoded.text, CONTENT);
    }

    #[test]
    fn loader_falls_back_to_latin1() {
        // 0xB5 is not valid UTF-8 and the odd length rules out UTF-16.
        let bytes = b"NEON_PWR 1000,0,0,-50,3700,80 \xB5A\n".to_vec();
        assert_eq!(bytes.len() % 2, 1);
        let temp = write_temp(&bytes);
        let decoded = LogLoader::new().load(temp.path()).unwrap();
        assert_eq!(decoded.encoding, TextEncoding::Latin1);
        assert_eq!(decoded.text, "NEON_PWR 1000,0,0,-50,3700,80 \u{b5}A\n");
    }

    #[test]
    fn missing_file_is_unreadable() {
        let dir = tempfile::tempdir().unwrap();
        let err = LogLoader::new()
            .load(dir.path().join("power_data.csv"))
            .unwrap_err();
        assert!(matches!(err, PipelineError::UnreadableInput { .. }));
    }
}
