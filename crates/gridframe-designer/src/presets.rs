//! Paper sizes and aspect-ratio presets.

use gridframe_core::units::PhysicalUnit;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Named paper size used to give an image real-world dimensions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "UPPERCASE")]
pub enum PaperPreset {
    /// No paper size chosen; real-world dimensions are meaningless
    #[default]
    Unset,
    A0,
    A1,
    A2,
    A3,
    A4,
    A5,
    /// User-entered width and height
    Custom,
}

impl PaperPreset {
    pub const ISO: [PaperPreset; 6] = [
        PaperPreset::A0,
        PaperPreset::A1,
        PaperPreset::A2,
        PaperPreset::A3,
        PaperPreset::A4,
        PaperPreset::A5,
    ];

    /// Portrait (short, long) size in millimetres for ISO 216 presets
    pub fn dimensions_mm(&self) -> Option<(f64, f64)> {
        match self {
            Self::A0 => Some((841.0, 1189.0)),
            Self::A1 => Some((594.0, 841.0)),
            Self::A2 => Some((420.0, 594.0)),
            Self::A3 => Some((297.0, 420.0)),
            Self::A4 => Some((210.0, 297.0)),
            Self::A5 => Some((148.0, 210.0)),
            Self::Unset | Self::Custom => None,
        }
    }

    /// Short/long side ratio for ISO 216 presets
    pub fn ratio(&self) -> Option<f64> {
        self.dimensions_mm().map(|(short, long)| short / long)
    }

    pub fn is_set(&self) -> bool {
        !matches!(self, Self::Unset)
    }
}

impl fmt::Display for PaperPreset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unset => write!(f, "None"),
            Self::A0 => write!(f, "A0"),
            Self::A1 => write!(f, "A1"),
            Self::A2 => write!(f, "A2"),
            Self::A3 => write!(f, "A3"),
            Self::A4 => write!(f, "A4"),
            Self::A5 => write!(f, "A5"),
            Self::Custom => write!(f, "Custom"),
        }
    }
}

impl FromStr for PaperPreset {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "" | "NONE" | "UNSET" => Ok(Self::Unset),
            "A0" => Ok(Self::A0),
            "A1" => Ok(Self::A1),
            "A2" => Ok(Self::A2),
            "A3" => Ok(Self::A3),
            "A4" => Ok(Self::A4),
            "A5" => Ok(Self::A5),
            "CUSTOM" => Ok(Self::Custom),
            _ => Err(format!("Unknown paper preset: {}", s)),
        }
    }
}

/// Target aspect ratio for the crop rectangle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RatioPreset {
    /// Free-form crop, no ratio constraint
    #[default]
    Free,
    /// Natural aspect ratio of the loaded image
    Original,
    Square,
    A0,
    A1,
    A2,
    A3,
    A4,
    A5,
    #[serde(rename = "16:9")]
    Widescreen,
    #[serde(rename = "4:3")]
    Standard,
    #[serde(rename = "3:2")]
    Classic,
    /// Ratio derived from user-entered width and height
    Custom,
}

impl RatioPreset {
    /// Fixed ratio (width / height) for presets that have one.
    ///
    /// `Original` and `Custom` depend on the image or user input and
    /// `Free` has no ratio, so all three return `None`.
    pub fn fixed_ratio(&self) -> Option<f64> {
        match self {
            Self::Square => Some(1.0),
            Self::A0 => PaperPreset::A0.ratio(),
            Self::A1 => PaperPreset::A1.ratio(),
            Self::A2 => PaperPreset::A2.ratio(),
            Self::A3 => PaperPreset::A3.ratio(),
            Self::A4 => PaperPreset::A4.ratio(),
            Self::A5 => PaperPreset::A5.ratio(),
            Self::Widescreen => Some(16.0 / 9.0),
            Self::Standard => Some(4.0 / 3.0),
            Self::Classic => Some(3.0 / 2.0),
            Self::Free | Self::Original | Self::Custom => None,
        }
    }

    /// The ratio preset matching a paper preset, if any
    pub fn for_paper(paper: PaperPreset) -> Option<Self> {
        match paper {
            PaperPreset::A0 => Some(Self::A0),
            PaperPreset::A1 => Some(Self::A1),
            PaperPreset::A2 => Some(Self::A2),
            PaperPreset::A3 => Some(Self::A3),
            PaperPreset::A4 => Some(Self::A4),
            PaperPreset::A5 => Some(Self::A5),
            PaperPreset::Custom => Some(Self::Custom),
            PaperPreset::Unset => None,
        }
    }
}

impl fmt::Display for RatioPreset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Free => write!(f, "Free"),
            Self::Original => write!(f, "Original"),
            Self::Square => write!(f, "Square"),
            Self::A0 => write!(f, "A0"),
            Self::A1 => write!(f, "A1"),
            Self::A2 => write!(f, "A2"),
            Self::A3 => write!(f, "A3"),
            Self::A4 => write!(f, "A4"),
            Self::A5 => write!(f, "A5"),
            Self::Widescreen => write!(f, "16:9"),
            Self::Standard => write!(f, "4:3"),
            Self::Classic => write!(f, "3:2"),
            Self::Custom => write!(f, "Custom"),
        }
    }
}

/// Real-world page size in a chosen unit
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PaperSize {
    pub width: f64,
    pub height: f64,
    pub unit: PhysicalUnit,
}

impl PaperSize {
    /// Portrait size of an ISO preset in millimetres
    pub fn from_preset(preset: PaperPreset) -> Option<Self> {
        preset.dimensions_mm().map(|(width, height)| Self {
            width,
            height,
            unit: PhysicalUnit::Mm,
        })
    }

    pub fn ratio(&self) -> Option<f64> {
        if self.width > 0.0 && self.height > 0.0 {
            Some(self.width / self.height)
        } else {
            None
        }
    }
}
