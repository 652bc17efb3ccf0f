//! Persistable subset of the edit state

use super::{EditState, GridConfig, ImageEffect, PaperSettings};
use crate::crop::CropRect;
use crate::grid::LabelStyle;
use crate::presets::RatioPreset;
use crate::transform::{normalize_rotation, Flip};
use serde::{Deserialize, Serialize};

/// The persisted subset of [`EditState`].
///
/// Transient fields (lock, natural image aspect, label preference) are
/// left out. Missing fields deserialize to their defaults so older
/// records still load.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct EditSnapshot {
    pub grid: GridConfig,
    pub crop: CropRect,
    pub rotation: f64,
    pub flip: Flip,
    pub ratio_preset: RatioPreset,
    pub ratio_value: Option<f64>,
    pub paper: PaperSettings,
    pub image_effect: ImageEffect,
}

impl From<&EditState> for EditSnapshot {
    fn from(state: &EditState) -> Self {
        Self {
            grid: state.grid.clone(),
            crop: state.crop,
            rotation: state.rotation,
            flip: state.flip,
            ratio_preset: state.ratio_preset,
            ratio_value: state.ratio_value,
            paper: state.paper,
            image_effect: state.image_effect,
        }
    }
}

impl EditSnapshot {
    /// Overlay the snapshot onto `base`, repairing values that could not
    /// have come from the reducer.
    pub fn restore_onto(&self, base: &EditState) -> EditState {
        let mut grid = self.grid.clone();
        if !grid.any_grid_visible() {
            grid.show_labels = false;
            grid.label_style = LabelStyle::None;
        }

        EditState {
            grid,
            crop: self.crop.validated(),
            rotation: normalize_rotation(self.rotation),
            flip: self.flip,
            ratio_preset: self.ratio_preset,
            ratio_value: self.ratio_value,
            paper: self.paper,
            image_effect: self.image_effect,
            natural_aspect: base.natural_aspect,
            locked: false,
            preferred_label_style: base.preferred_label_style,
        }
    }
}
