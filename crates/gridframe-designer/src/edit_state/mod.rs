//! Edit state for the photo grid editor.
//!
//! This module is split into submodules:
//! - `commands`: one typed command per editing operation
//! - `reducer`: the pure `apply(state, command) -> state` function
//! - `snapshot`: the persisted subset of the state
//! - `store`: the injectable store with history and manipulation log

mod commands;
mod reducer;
mod snapshot;
mod store;

pub use commands::EditCommand;
pub use reducer::{apply, apply_with_initial};
pub use snapshot::EditSnapshot;
pub use store::{EditStore, ImageGeometry, Manipulation};

use crate::crop::CropRect;
use crate::grid::LabelStyle;
use crate::presets::{PaperPreset, RatioPreset};
use crate::transform::Flip;
use gridframe_core::constants::{DEFAULT_CELL_SIZE_MM, DEFAULT_STROKE_WIDTH_MM};
use gridframe_core::units::{LengthUnit, Measurement};
use gridframe_core::StrokeColor;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Grid sizing mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum GridMode {
    /// Fixed 20 mm square cells
    #[default]
    Default,
    /// User-chosen cell width and height
    Advanced,
}

impl fmt::Display for GridMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Default => write!(f, "default"),
            Self::Advanced => write!(f, "advanced"),
        }
    }
}

/// Colour treatment applied to the working image
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ImageEffect {
    #[default]
    None,
    Grayscale,
    Sepia,
    Invert,
    HighContrast,
    Sketch,
}

impl fmt::Display for ImageEffect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::None => write!(f, "None"),
            Self::Grayscale => write!(f, "Grayscale"),
            Self::Sepia => write!(f, "Sepia"),
            Self::Invert => write!(f, "Invert"),
            Self::HighContrast => write!(f, "High Contrast"),
            Self::Sketch => write!(f, "Sketch"),
        }
    }
}

/// Grid overlay settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GridConfig {
    pub is_grid_visible: bool,
    pub is_diagonal_visible: bool,
    pub cell_width: Measurement,
    pub cell_height: Measurement,
    pub stroke_color: StrokeColor,
    /// Stroke width in millimetres
    pub stroke_width: Measurement,
    pub show_labels: bool,
    pub label_style: LabelStyle,
    pub mode: GridMode,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            is_grid_visible: false,
            is_diagonal_visible: false,
            cell_width: Measurement::mm(DEFAULT_CELL_SIZE_MM),
            cell_height: Measurement::mm(DEFAULT_CELL_SIZE_MM),
            stroke_color: StrokeColor::default(),
            stroke_width: Measurement::mm(DEFAULT_STROKE_WIDTH_MM),
            show_labels: false,
            label_style: LabelStyle::None,
            mode: GridMode::Default,
        }
    }
}

impl GridConfig {
    /// True when either the square grid or the diagonal grid is shown
    pub fn any_grid_visible(&self) -> bool {
        self.is_grid_visible || self.is_diagonal_visible
    }
}

/// Paper size selection and custom dimensions
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct PaperSettings {
    pub preset: PaperPreset,
    pub width: Option<f64>,
    pub height: Option<f64>,
    pub unit: LengthUnit,
}

impl PaperSettings {
    /// Width / height when both dimensions are positive
    pub fn ratio(&self) -> Option<f64> {
        match (self.width, self.height) {
            (Some(w), Some(h)) if w > 0.0 && h > 0.0 => Some(w / h),
            _ => None,
        }
    }
}

/// Values seeding the initial edit state, typically from configuration
#[derive(Debug, Clone, PartialEq)]
pub struct EditDefaults {
    /// Square cell size; anything but the default starts in advanced mode
    pub cell_size_mm: f64,
    pub stroke_color: StrokeColor,
    pub stroke_width_mm: f64,
    pub label_style: LabelStyle,
}

impl Default for EditDefaults {
    fn default() -> Self {
        Self {
            cell_size_mm: DEFAULT_CELL_SIZE_MM,
            stroke_color: StrokeColor::default(),
            stroke_width_mm: DEFAULT_STROKE_WIDTH_MM,
            label_style: LabelStyle::Both,
        }
    }
}

/// Complete editor state
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EditState {
    pub grid: GridConfig,
    pub crop: CropRect,
    /// Degrees in `[0, 360)`
    pub rotation: f64,
    pub flip: Flip,
    pub ratio_preset: RatioPreset,
    /// Target crop ratio (width / height) for the current preset
    pub ratio_value: Option<f64>,
    pub paper: PaperSettings,
    pub image_effect: ImageEffect,
    /// Natural width / height of the loaded image
    pub natural_aspect: Option<f64>,
    pub locked: bool,
    /// Label style restored when labels are switched back on
    pub preferred_label_style: LabelStyle,
}

impl Default for EditState {
    fn default() -> Self {
        Self::with_defaults(&EditDefaults::default())
    }
}

impl EditState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Initial state using configured stroke and label preferences
    pub fn with_defaults(defaults: &EditDefaults) -> Self {
        let mut grid = GridConfig {
            stroke_color: defaults.stroke_color.clone(),
            stroke_width: Measurement::mm(defaults.stroke_width_mm),
            ..GridConfig::default()
        };
        if defaults.cell_size_mm != DEFAULT_CELL_SIZE_MM {
            grid.mode = GridMode::Advanced;
            grid.cell_width = Measurement::mm(defaults.cell_size_mm);
            grid.cell_height = Measurement::mm(defaults.cell_size_mm);
        }

        Self {
            grid,
            crop: CropRect::FULL,
            rotation: 0.0,
            flip: Flip::default(),
            ratio_preset: RatioPreset::Free,
            ratio_value: None,
            paper: PaperSettings::default(),
            image_effect: ImageEffect::None,
            natural_aspect: None,
            locked: false,
            preferred_label_style: match defaults.label_style {
                LabelStyle::None => LabelStyle::Both,
                style => style,
            },
        }
    }
}
