//! Typed edit commands and their lock and history classification.

use super::{EditSnapshot, GridMode, ImageEffect};
use crate::crop::CropRect;
use crate::grid::LabelStyle;
use crate::presets::{PaperPreset, RatioPreset};
use gridframe_core::units::{LengthUnit, Measurement};
use gridframe_core::StrokeColor;
use serde::{Deserialize, Serialize};

/// One editing operation with its typed payload.
///
/// Commands serialize as `{"op": "...", "value": ...}`; the serialized
/// form is what gets recorded in a project's manipulation log.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", content = "value", rename_all = "snake_case")]
pub enum EditCommand {
    // ========== Grid ==========
    SetGridVisible(bool),
    ToggleGrid,
    SetDiagonalVisible(bool),
    ToggleDiagonal,
    SetShowLabels(bool),
    SetLabelStyle(LabelStyle),
    SetGridMode(GridMode),
    /// Switches the grid to advanced mode
    SetCellWidth(Measurement),
    /// Switches the grid to advanced mode
    SetCellHeight(Measurement),
    /// Re-express both cell sizes in another unit
    SetCellUnit(LengthUnit),
    SetStrokeColor(StrokeColor),
    /// Stroke width in millimetres
    SetStrokeWidth(f64),

    // ========== Crop & ratio ==========
    SetCropRect(CropRect),
    ResetCrop,
    SetRatioPreset(RatioPreset),
    SetPaperPreset(PaperPreset),
    SetCustomDimensions {
        width: Option<f64>,
        height: Option<f64>,
        unit: LengthUnit,
    },
    /// Pixel size of the loaded image, used by the `Original` ratio
    SetNaturalSize { width: f64, height: f64 },

    // ========== Transform ==========
    RotateLeft,
    RotateRight,
    SetRotation(f64),
    FlipHorizontal,
    FlipVertical,

    // ========== Effects & lifecycle ==========
    SetImageEffect(ImageEffect),
    SetLocked(bool),
    ToggleLock,
    ResetAll,
    Restore(Box<EditSnapshot>),
}

impl EditCommand {
    /// Human-readable name used in logs and the manipulation history
    pub fn name(&self) -> &'static str {
        match self {
            Self::SetGridVisible(_) => "Set grid visibility",
            Self::ToggleGrid => "Toggle grid",
            Self::SetDiagonalVisible(_) => "Set diagonal grid visibility",
            Self::ToggleDiagonal => "Toggle diagonal grid",
            Self::SetShowLabels(_) => "Set labels",
            Self::SetLabelStyle(_) => "Set label style",
            Self::SetGridMode(_) => "Set grid mode",
            Self::SetCellWidth(_) => "Set cell width",
            Self::SetCellHeight(_) => "Set cell height",
            Self::SetCellUnit(_) => "Set cell unit",
            Self::SetStrokeColor(_) => "Set stroke colour",
            Self::SetStrokeWidth(_) => "Set stroke width",
            Self::SetCropRect(_) => "Crop",
            Self::ResetCrop => "Reset crop",
            Self::SetRatioPreset(_) => "Set aspect ratio",
            Self::SetPaperPreset(_) => "Set paper size",
            Self::SetCustomDimensions { .. } => "Set custom dimensions",
            Self::SetNaturalSize { .. } => "Set image size",
            Self::RotateLeft => "Rotate left",
            Self::RotateRight => "Rotate right",
            Self::SetRotation(_) => "Set rotation",
            Self::FlipHorizontal => "Flip horizontal",
            Self::FlipVertical => "Flip vertical",
            Self::SetImageEffect(_) => "Set effect",
            Self::SetLocked(_) => "Set lock",
            Self::ToggleLock => "Toggle lock",
            Self::ResetAll => "Reset all edits",
            Self::Restore(_) => "Restore edits",
        }
    }

    /// Commands still honoured while the state is locked
    pub fn bypasses_lock(&self) -> bool {
        matches!(
            self,
            Self::SetLocked(_)
                | Self::ToggleLock
                | Self::ResetAll
                | Self::Restore(_)
                | Self::SetNaturalSize { .. }
        )
    }

    /// Commands that are bookkeeping rather than user edits and are kept
    /// out of the manipulation log
    pub fn is_bookkeeping(&self) -> bool {
        matches!(
            self,
            Self::SetNaturalSize { .. } | Self::ResetAll | Self::Restore(_)
        )
    }
}
