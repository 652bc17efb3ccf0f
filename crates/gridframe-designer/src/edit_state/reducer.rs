//! Pure reducer: one command applied to one state.
//!
//! Lock gating, label visibility rules and grid mode switching all live
//! here so that the store only sequences states.

use super::{EditCommand, EditState, GridConfig, GridMode};
use crate::crop::{adjust_to_ratio, CropRect};
use crate::grid::LabelStyle;
use crate::presets::{PaperPreset, RatioPreset};
use crate::transform::normalize_rotation;
use gridframe_core::constants::{DEFAULT_CELL_SIZE_MM, ROTATION_STEP_DEG};
use gridframe_core::units::{LengthUnit, Measurement};

/// Apply one command to `state`, resetting to `EditState::default()` on
/// [`EditCommand::ResetAll`].
pub fn apply(state: EditState, command: &EditCommand) -> EditState {
    apply_with_initial(&EditState::default(), state, command)
}

/// Apply one command to `state`.
///
/// `initial` is the state restored by [`EditCommand::ResetAll`] and the
/// base that [`EditCommand::Restore`] merges a snapshot into. While the
/// state is locked every command except those reported by
/// [`EditCommand::bypasses_lock`] returns the state unchanged.
pub fn apply_with_initial(initial: &EditState, state: EditState, command: &EditCommand) -> EditState {
    if state.locked && !command.bypasses_lock() {
        return state;
    }

    let mut next = state;
    match command {
        // ========== Grid ==========
        EditCommand::SetGridVisible(visible) => {
            next.grid.is_grid_visible = *visible;
            enforce_label_visibility(&mut next.grid);
        }
        EditCommand::ToggleGrid => {
            next.grid.is_grid_visible = !next.grid.is_grid_visible;
            enforce_label_visibility(&mut next.grid);
        }
        EditCommand::SetDiagonalVisible(visible) => {
            next.grid.is_diagonal_visible = *visible;
            enforce_label_visibility(&mut next.grid);
        }
        EditCommand::ToggleDiagonal => {
            next.grid.is_diagonal_visible = !next.grid.is_diagonal_visible;
            enforce_label_visibility(&mut next.grid);
        }
        EditCommand::SetShowLabels(show) => {
            if *show && next.grid.any_grid_visible() {
                next.grid.show_labels = true;
                if next.grid.label_style == LabelStyle::None {
                    next.grid.label_style = next.preferred_label_style;
                }
            } else {
                hide_labels(&mut next);
            }
        }
        EditCommand::SetLabelStyle(style) => {
            if *style == LabelStyle::None {
                hide_labels(&mut next);
            } else {
                next.preferred_label_style = *style;
                if next.grid.any_grid_visible() {
                    next.grid.label_style = *style;
                    next.grid.show_labels = true;
                }
            }
        }
        EditCommand::SetGridMode(mode) => {
            next.grid.mode = *mode;
            if *mode == GridMode::Default {
                next.grid.cell_width = Measurement::mm(DEFAULT_CELL_SIZE_MM);
                next.grid.cell_height = Measurement::mm(DEFAULT_CELL_SIZE_MM);
            }
        }
        EditCommand::SetCellWidth(width) => {
            next.grid.cell_width = *width;
            next.grid.mode = GridMode::Advanced;
        }
        EditCommand::SetCellHeight(height) => {
            next.grid.cell_height = *height;
            next.grid.mode = GridMode::Advanced;
        }
        EditCommand::SetCellUnit(unit) => {
            next.grid.cell_width = reexpress(next.grid.cell_width, *unit);
            next.grid.cell_height = reexpress(next.grid.cell_height, *unit);
            next.grid.mode = GridMode::Advanced;
        }
        EditCommand::SetStrokeColor(color) => next.grid.stroke_color = color.clone(),
        EditCommand::SetStrokeWidth(mm) => next.grid.stroke_width = Measurement::mm(*mm),

        // ========== Crop & ratio ==========
        EditCommand::SetCropRect(rect) => next.crop = rect.validated(),
        EditCommand::ResetCrop => next.crop = adjust_to_ratio(&CropRect::FULL, next.ratio_value),
        EditCommand::SetRatioPreset(preset) => {
            next.ratio_preset = *preset;
            next.ratio_value = match preset {
                RatioPreset::Free => None,
                RatioPreset::Original => next.natural_aspect,
                RatioPreset::Custom => next.paper.ratio().or(next.ratio_value),
                fixed => fixed.fixed_ratio(),
            };
            next.crop = adjust_to_ratio(&next.crop, next.ratio_value);
        }
        EditCommand::SetPaperPreset(preset) => {
            next.paper.preset = *preset;
            if let Some((width, height)) = preset.dimensions_mm() {
                next.paper.width = Some(width);
                next.paper.height = Some(height);
                next.paper.unit = LengthUnit::Mm;
            }
            if let Some(ratio_preset) = RatioPreset::for_paper(*preset) {
                next.ratio_preset = ratio_preset;
                next.ratio_value = match preset {
                    PaperPreset::Custom => next.paper.ratio().or(next.ratio_value),
                    iso => iso.ratio(),
                };
                next.crop = adjust_to_ratio(&next.crop, next.ratio_value);
            }
        }
        EditCommand::SetCustomDimensions {
            width,
            height,
            unit,
        } => {
            next.paper.preset = PaperPreset::Custom;
            next.paper.width = *width;
            next.paper.height = *height;
            next.paper.unit = *unit;
            if let Some(ratio) = next.paper.ratio() {
                next.ratio_preset = RatioPreset::Custom;
                next.ratio_value = Some(ratio);
                next.crop = adjust_to_ratio(&next.crop, next.ratio_value);
            }
        }
        EditCommand::SetNaturalSize { width, height } => {
            next.natural_aspect = if *width > 0.0 && *height > 0.0 {
                Some(width / height)
            } else {
                None
            };
            if next.ratio_preset == RatioPreset::Original {
                next.ratio_value = next.natural_aspect;
                next.crop = adjust_to_ratio(&next.crop, next.ratio_value);
            }
        }

        // ========== Transform ==========
        EditCommand::RotateLeft => next.rotation = normalize_rotation(next.rotation - ROTATION_STEP_DEG),
        EditCommand::RotateRight => next.rotation = normalize_rotation(next.rotation + ROTATION_STEP_DEG),
        EditCommand::SetRotation(degrees) => next.rotation = normalize_rotation(*degrees),
        EditCommand::FlipHorizontal => next.flip = next.flip.toggled_horizontal(),
        EditCommand::FlipVertical => next.flip = next.flip.toggled_vertical(),

        // ========== Effects & lifecycle ==========
        EditCommand::SetImageEffect(effect) => next.image_effect = *effect,
        EditCommand::SetLocked(locked) => next.locked = *locked,
        EditCommand::ToggleLock => next.locked = !next.locked,
        EditCommand::ResetAll => next = initial.clone(),
        EditCommand::Restore(snapshot) => next = snapshot.restore_onto(initial),
    }

    next
}

/// Labels need a visible grid to sit on.
fn enforce_label_visibility(grid: &mut GridConfig) {
    if !grid.any_grid_visible() {
        grid.show_labels = false;
        grid.label_style = LabelStyle::None;
    }
}

fn hide_labels(state: &mut EditState) {
    if state.grid.label_style != LabelStyle::None {
        state.preferred_label_style = state.grid.label_style;
    }
    state.grid.show_labels = false;
    state.grid.label_style = LabelStyle::None;
}

/// Convert between physical units; pixel cells only change their tag.
fn reexpress(measurement: Measurement, unit: LengthUnit) -> Measurement {
    match unit.physical().and_then(|target| measurement.to_physical(target)) {
        Some(value) => Measurement::new(value, unit),
        None => Measurement::new(measurement.value, unit),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::edit_state::ImageEffect;

    fn run(commands: &[EditCommand]) -> EditState {
        commands
            .iter()
            .fold(EditState::default(), |state, cmd| apply(state, cmd))
    }

    #[test]
    fn test_hiding_last_grid_clears_labels() {
        let state = run(&[
            EditCommand::SetGridVisible(true),
            EditCommand::SetShowLabels(true),
        ]);
        assert!(state.grid.show_labels);
        assert_eq!(state.grid.label_style, LabelStyle::Both);

        let state = apply(state, &EditCommand::ToggleGrid);
        assert!(!state.grid.show_labels);
        assert_eq!(state.grid.label_style, LabelStyle::None);

        // Showing the grid again leaves labels off.
        let state = apply(state, &EditCommand::ToggleGrid);
        assert!(state.grid.is_grid_visible);
        assert!(!state.grid.show_labels);
        assert_eq!(state.grid.label_style, LabelStyle::None);
    }

    #[test]
    fn test_labels_survive_while_diagonal_visible() {
        let state = run(&[
            EditCommand::SetGridVisible(true),
            EditCommand::SetDiagonalVisible(true),
            EditCommand::SetLabelStyle(LabelStyle::Row),
            EditCommand::SetGridVisible(false),
        ]);
        assert!(state.grid.show_labels);
        assert_eq!(state.grid.label_style, LabelStyle::Row);
    }

    #[test]
    fn test_labels_need_a_visible_grid() {
        let state = run(&[EditCommand::SetShowLabels(true)]);
        assert!(!state.grid.show_labels);

        let state = run(&[
            EditCommand::SetLabelStyle(LabelStyle::Col),
            EditCommand::SetGridVisible(true),
            EditCommand::SetShowLabels(true),
        ]);
        assert_eq!(state.grid.label_style, LabelStyle::Col);
    }

    #[test]
    fn test_grid_mode() {
        let state = run(&[EditCommand::SetCellWidth(Measurement::new(3.0, LengthUnit::Cm))]);
        assert_eq!(state.grid.mode, GridMode::Advanced);
        assert_eq!(state.grid.cell_width, Measurement::new(3.0, LengthUnit::Cm));

        let state = apply(state, &EditCommand::SetGridMode(GridMode::Default));
        assert_eq!(state.grid.cell_width, Measurement::mm(20.0));
        assert_eq!(state.grid.cell_height, Measurement::mm(20.0));
    }

    #[test]
    fn test_cell_unit_converts_physical_sizes() {
        let state = run(&[EditCommand::SetCellUnit(LengthUnit::Cm)]);
        assert!((state.grid.cell_width.value - 2.0).abs() < 1e-12);
        assert_eq!(state.grid.cell_width.unit, LengthUnit::Cm);

        let state = apply(state, &EditCommand::SetCellUnit(LengthUnit::Px));
        assert!((state.grid.cell_width.value - 2.0).abs() < 1e-12);
        assert_eq!(state.grid.cell_width.unit, LengthUnit::Px);
    }

    #[test]
    fn test_custom_dimensions_need_both_sides() {
        let state = run(&[EditCommand::SetCustomDimensions {
            width: Some(30.0),
            height: None,
            unit: LengthUnit::Cm,
        }]);
        assert_eq!(state.ratio_preset, RatioPreset::Free);
        assert_eq!(state.ratio_value, None);

        let state = apply(
            state,
            &EditCommand::SetCustomDimensions {
                width: Some(30.0),
                height: Some(0.0),
                unit: LengthUnit::Cm,
            },
        );
        assert_eq!(state.ratio_value, None);

        let state = apply(
            state,
            &EditCommand::SetCustomDimensions {
                width: Some(30.0),
                height: Some(20.0),
                unit: LengthUnit::Cm,
            },
        );
        assert_eq!(state.ratio_preset, RatioPreset::Custom);
        assert_eq!(state.ratio_value, Some(1.5));
        assert!((state.crop.ratio() - 1.5).abs() < 1e-3);
    }

    #[test]
    fn test_paper_preset_sets_dimensions_and_ratio() {
        let state = run(&[EditCommand::SetPaperPreset(PaperPreset::A4)]);
        assert_eq!(state.paper.width, Some(210.0));
        assert_eq!(state.paper.height, Some(297.0));
        assert_eq!(state.ratio_preset, RatioPreset::A4);
        assert_eq!(state.ratio_value, Some(210.0 / 297.0));
    }

    #[test]
    fn test_original_ratio_waits_for_image_size() {
        let state = run(&[EditCommand::SetRatioPreset(RatioPreset::Original)]);
        assert_eq!(state.ratio_value, None);
        assert!(state.crop.is_full());

        let state = apply(
            state,
            &EditCommand::SetNaturalSize {
                width: 400.0,
                height: 200.0,
            },
        );
        assert_eq!(state.ratio_value, Some(2.0));
        assert!((state.crop.ratio() - 2.0).abs() < 1e-3);
    }

    #[test]
    fn test_set_crop_rect_shifts_back_inside() {
        let state = run(&[EditCommand::SetCropRect(CropRect::new(0.7, 0.8, 0.5, 0.4))]);
        assert!((state.crop.x - 0.5).abs() < 1e-12);
        assert!((state.crop.y - 0.6).abs() < 1e-12);
        assert_eq!(state.crop.width, 0.5);
        assert_eq!(state.crop.height, 0.4);
    }

    #[test]
    fn test_rotation_is_normalized() {
        let state = run(&[EditCommand::RotateLeft]);
        assert_eq!(state.rotation, 270.0);
        let state = apply(state, &EditCommand::RotateRight);
        assert_eq!(state.rotation, 0.0);
        let state = apply(state, &EditCommand::SetRotation(-450.0));
        assert_eq!(state.rotation, 270.0);
    }

    #[test]
    fn test_lock_gates_edits() {
        let locked = run(&[EditCommand::SetLocked(true)]);
        let after = apply(locked.clone(), &EditCommand::RotateRight);
        assert_eq!(after, locked);
        let after = apply(after, &EditCommand::SetImageEffect(ImageEffect::Sepia));
        assert_eq!(after.image_effect, ImageEffect::None);

        let unlocked = apply(after, &EditCommand::ToggleLock);
        assert!(!unlocked.locked);
        let rotated = apply(unlocked, &EditCommand::RotateRight);
        assert_eq!(rotated.rotation, 90.0);
    }

    #[test]
    fn test_reset_all_is_full_replace() {
        let state = run(&[
            EditCommand::SetGridVisible(true),
            EditCommand::RotateRight,
            EditCommand::FlipVertical,
            EditCommand::SetLocked(true),
            EditCommand::ResetAll,
        ]);
        assert_eq!(state, EditState::default());
    }
}
