use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ZenhanError;
use crate::mode::{Direction, Mode};
use crate::walker;

/// A saved conversion setup: direction, categories and exclusions.
///
/// Profiles are plain JSON, with `mode` written in its string form:
///
/// ```json
/// { "direction": "z2h", "mode": "ascii|digit", "ignore": ["＠"] }
/// ```
///
/// `mode` defaults to `"all"` and `ignore` to an empty list when omitted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConvertProfile {
    pub direction: Direction,
    #[serde(default = "default_mode")]
    pub mode: Mode,
    #[serde(default)]
    pub ignore: Vec<String>,
}

fn default_mode() -> Mode {
    Mode::ALL
}

impl ConvertProfile {
    pub fn new(direction: Direction, mode: Mode) -> Self {
        Self {
            direction,
            mode,
            ignore: Vec::new(),
        }
    }

    pub fn with_ignore<I, S>(mut self, ignore: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.ignore = ignore.into_iter().map(Into::into).collect();
        self
    }

    pub fn from_json_str(json: &str) -> Result<Self, ZenhanError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Reads a profile from a JSON file.
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self, ZenhanError> {
        let path = path.as_ref();
        let json = fs::read_to_string(path).map_err(|err| {
            ZenhanError::IoError(format!("Failed to read profile {}: {}", path.display(), err))
        })?;
        serde_json::from_str(&json).map_err(|err| {
            ZenhanError::ParseError(format!(
                "Failed to parse profile {}: {}",
                path.display(),
                err
            ))
        })
    }

    pub fn to_json(&self, pretty: bool) -> Result<String, ZenhanError> {
        let json = if pretty {
            serde_json::to_string_pretty(self)?
        } else {
            serde_json::to_string(self)?
        };
        Ok(json)
    }

    /// Converts `text` with this profile's settings.
    pub fn apply(&self, text: &str) -> String {
        walker::convert(text, self.direction, self.mode, &self.ignore)
    }

    /// Byte-level [`apply`](Self::apply); malformed UTF-8 is returned as is.
    pub fn apply_bytes(&self, input: &[u8]) -> Vec<u8> {
        walker::convert_bytes(input, self.direction, self.mode, &self.ignore).into_owned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_minimal_profile() {
        let profile = ConvertProfile::from_json_str(r#"{"direction":"h2z"}"#).unwrap();
        assert_eq!(profile.direction, Direction::H2z);
        assert_eq!(profile.mode, Mode::ALL);
        assert!(profile.ignore.is_empty());
    }

    #[test]
    fn parse_full_profile() {
        let json = r#"{"direction":"z2h","mode":"ascii|digit","ignore":["＠"]}"#;
        let profile = ConvertProfile::from_json_str(json).unwrap();
        assert_eq!(profile.mode, Mode::ASCII | Mode::DIGIT);
        assert_eq!(profile.apply("ａ＠１ア"), "a＠1ア");
    }

    #[test]
    fn bad_mode_is_a_parse_error() {
        let err = ConvertProfile::from_json_str(r#"{"direction":"h2z","mode":"emoji"}"#)
            .unwrap_err();
        assert!(matches!(err, ZenhanError::ParseError(_)));
        assert!(err.to_string().contains("emoji"));
    }

    #[test]
    fn json_round_trip_keeps_mode_string() {
        let profile = ConvertProfile::new(Direction::H2z, Mode::KANA).with_ignore(["ｰ"]);
        let json = profile.to_json(false).unwrap();
        assert!(json.contains(r#""mode":"kana""#));
        assert_eq!(ConvertProfile::from_json_str(&json).unwrap(), profile);
    }

    #[test]
    fn apply_bytes_passes_malformed_input() {
        let profile = ConvertProfile::new(Direction::H2z, Mode::ALL);
        assert_eq!(profile.apply_bytes(&[0xff, 0xfe]), vec![0xff, 0xfe]);
        assert_eq!(profile.apply_bytes(b"a"), "ａ".as_bytes().to_vec());
    }
}
