//! Team display colour and its `#RRGGBB` text form.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// 24-bit RGB colour.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct TeamColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl TeamColor {
    /// Used whenever a stored colour cannot be parsed.
    pub const DEFAULT: TeamColor = TeamColor::rgb(0x00, 0x7A, 0xFF);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parse `RGB`, `RRGGBB` or `AARRGGBB`, with or without a leading `#`.
    /// Alpha is accepted and discarded.
    pub fn from_hex(hex: &str) -> Option<Self> {
        let digits = hex.trim().trim_start_matches('#');
        if !digits.chars().all(|c| c.is_ascii_hexdigit()) {
            return None;
        }
        let value = u32::from_str_radix(digits, 16).ok()?;
        match digits.len() {
            3 => {
                let nibble = |shift: u32| ((value >> shift) & 0xF) as u8 * 17;
                Some(Self::rgb(nibble(8), nibble(4), nibble(0)))
            }
            6 | 8 => Some(Self::rgb(
                (value >> 16) as u8,
                (value >> 8) as u8,
                value as u8,
            )),
            _ => None,
        }
    }

    /// Like [`TeamColor::from_hex`] but never fails.
    pub fn from_hex_or_default(hex: &str) -> Self {
        Self::from_hex(hex).unwrap_or_else(|| {
            log::warn!("Unparseable team colour {:?}, using default", hex);
            Self::DEFAULT
        })
    }

    /// Upper-case `#RRGGBB`.
    pub fn to_hex(self) -> String {
        format!("#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }
}

impl Default for TeamColor {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl fmt::Display for TeamColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl Serialize for TeamColor {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

/// A malformed string decodes to the default colour rather than failing the
/// surrounding record.
impl<'de> Deserialize<'de> for TeamColor {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let hex = String::deserialize(deserializer)?;
        Ok(Self::from_hex_or_default(&hex))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_six_digit_hex() {
        assert_eq!(TeamColor::from_hex("#5A189A"), Some(TeamColor::rgb(0x5A, 0x18, 0x9A)));
        assert_eq!(TeamColor::from_hex("c77dff"), Some(TeamColor::rgb(0xC7, 0x7D, 0xFF)));
    }

    #[test]
    fn parses_short_and_argb_forms() {
        assert_eq!(TeamColor::from_hex("#F0A"), Some(TeamColor::rgb(0xFF, 0x00, 0xAA)));
        assert_eq!(TeamColor::from_hex("#80240046"), Some(TeamColor::rgb(0x24, 0x00, 0x46)));
    }

    #[test]
    fn rejects_garbage() {
        assert_eq!(TeamColor::from_hex(""), None);
        assert_eq!(TeamColor::from_hex("#12345"), None);
        assert_eq!(TeamColor::from_hex("#GG0000"), None);
        assert_eq!(TeamColor::from_hex("+12345"), None);
    }

    #[test]
    fn hex_round_trips() {
        let c = TeamColor::rgb(0x5A, 0x18, 0x9A);
        assert_eq!(c.to_hex(), "#5A189A");
        assert_eq!(TeamColor::from_hex(&c.to_hex()), Some(c));
    }

    #[test]
    fn malformed_json_value_decodes_to_default() {
        let c: TeamColor = serde_json::from_str("\"not a colour\"").unwrap();
        assert_eq!(c, TeamColor::DEFAULT);
    }
}
