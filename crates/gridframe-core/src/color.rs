//! Grid stroke colour

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::constants::DEFAULT_STROKE_COLOR;

/// An opaque RGB colour stored as `#RRGGBB`
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct StrokeColor(String);

impl StrokeColor {
    /// Red, green and blue components
    pub fn rgb(&self) -> (u8, u8, u8) {
        let hex = &self.0[1..];
        let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).unwrap_or(0);
        (channel(0), channel(2), channel(4))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for StrokeColor {
    fn default() -> Self {
        Self(DEFAULT_STROKE_COLOR.to_string())
    }
}

impl fmt::Display for StrokeColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for StrokeColor {
    type Err = String;

    /// Accepts `#RRGGBB` and `#RGB` (with or without the leading `#`)
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let hex = trimmed.strip_prefix('#').unwrap_or(trimmed);

        if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(format!("Invalid colour: {}", s));
        }

        let expanded = match hex.len() {
            6 => hex.to_string(),
            3 => hex.chars().flat_map(|c| [c, c]).collect(),
            _ => return Err(format!("Invalid colour: {}", s)),
        };

        Ok(Self(format!("#{}", expanded.to_uppercase())))
    }
}

impl TryFrom<String> for StrokeColor {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<StrokeColor> for String {
    fn from(color: StrokeColor) -> Self {
        color.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_full_and_short() {
        assert_eq!("#ff0080".parse::<StrokeColor>().unwrap().as_str(), "#FF0080");
        assert_eq!("0F0".parse::<StrokeColor>().unwrap().as_str(), "#00FF00");
    }

    #[test]
    fn test_rejects_garbage() {
        assert!("#12345".parse::<StrokeColor>().is_err());
        assert!("#GGGGGG".parse::<StrokeColor>().is_err());
        assert!("".parse::<StrokeColor>().is_err());
    }

    #[test]
    fn test_rgb_components() {
        let color: StrokeColor = "#102030".parse().unwrap();
        assert_eq!(color.rgb(), (0x10, 0x20, 0x30));
        assert_eq!(StrokeColor::default().rgb(), (255, 255, 255));
    }

    #[test]
    fn test_serde_validates() {
        let color: StrokeColor = serde_json::from_str("\"#abc\"").unwrap();
        assert_eq!(color.as_str(), "#AABBCC");
        assert!(serde_json::from_str::<StrokeColor>("\"blue\"").is_err());
    }
}
