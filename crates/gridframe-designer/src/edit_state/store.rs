//! Edit store with bounded undo/redo and a manipulation log.

use super::reducer::apply_with_initial;
use super::{EditCommand, EditDefaults, EditSnapshot, EditState};
use crate::grid::{compute_grid, GridDimensions, GridLayout, LabelStyle, OverlayOptions};
use chrono::{DateTime, Utc};
use gridframe_core::constants::MAX_UNDO_HISTORY;
use gridframe_core::units::{Measurement, PhysicalUnit};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

/// One entry of the manipulation log kept with a project
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Manipulation {
    pub description: String,
    pub timestamp: DateTime<Utc>,
    #[serde(default)]
    pub params: serde_json::Value,
}

impl Manipulation {
    pub fn from_command(command: &EditCommand) -> Self {
        Self {
            description: command.name().to_string(),
            timestamp: Utc::now(),
            params: serde_json::to_value(command).unwrap_or(serde_json::Value::Null),
        }
    }
}

/// Real-world size of the image being gridded
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ImageGeometry {
    pub real_width: f64,
    pub real_height: f64,
    pub unit: PhysicalUnit,
}

/// Edit state holder with undo/redo and a manipulation log.
///
/// Every instance is independent; construct one per editor session.
#[derive(Debug, Clone)]
pub struct EditStore {
    initial: EditState,
    state: EditState,
    undo_stack: VecDeque<EditState>,
    redo_stack: Vec<EditState>,
    manipulations: Vec<Manipulation>,
}

impl Default for EditStore {
    fn default() -> Self {
        Self::new(EditState::default())
    }
}

impl EditStore {
    pub fn new(initial: EditState) -> Self {
        Self {
            state: initial.clone(),
            initial,
            undo_stack: VecDeque::new(),
            redo_stack: Vec::new(),
            manipulations: Vec::new(),
        }
    }

    pub fn with_defaults(defaults: &EditDefaults) -> Self {
        Self::new(EditState::with_defaults(defaults))
    }

    pub fn state(&self) -> &EditState {
        &self.state
    }

    pub fn initial(&self) -> &EditState {
        &self.initial
    }

    pub fn manipulations(&self) -> &[Manipulation] {
        &self.manipulations
    }

    /// Apply a command. Returns true when the state changed.
    pub fn dispatch(&mut self, command: EditCommand) -> bool {
        let next = apply_with_initial(&self.initial, self.state.clone(), &command);

        if matches!(command, EditCommand::ResetAll | EditCommand::Restore(_)) {
            self.clear_history();
        }

        if next == self.state {
            tracing::debug!(command = command.name(), locked = self.state.locked, "Edit had no effect");
            return false;
        }

        tracing::debug!(command = command.name(), "Edit applied");

        if records_history(&command) {
            let previous = std::mem::replace(&mut self.state, next);
            self.push_undo(previous);
            self.redo_stack.clear();
        } else {
            self.state = next;
        }

        if !command.is_bookkeeping() {
            self.manipulations.push(Manipulation::from_command(&command));
        }

        true
    }

    pub fn can_undo(&self) -> bool {
        !self.state.locked && !self.undo_stack.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.state.locked && !self.redo_stack.is_empty()
    }

    /// Step back one edit. The lock flag is not part of history.
    pub fn undo(&mut self) -> bool {
        if !self.can_undo() {
            return false;
        }
        let Some(mut previous) = self.undo_stack.pop_back() else {
            return false;
        };
        previous.locked = self.state.locked;
        previous.natural_aspect = self.state.natural_aspect;
        let current = std::mem::replace(&mut self.state, previous);
        self.redo_stack.push(current);
        tracing::debug!(undo = self.undo_stack.len(), redo = self.redo_stack.len(), "Undo");
        true
    }

    pub fn redo(&mut self) -> bool {
        if !self.can_redo() {
            return false;
        }
        let Some(mut next) = self.redo_stack.pop() else {
            return false;
        };
        next.locked = self.state.locked;
        next.natural_aspect = self.state.natural_aspect;
        let current = std::mem::replace(&mut self.state, next);
        self.push_undo(current);
        tracing::debug!(undo = self.undo_stack.len(), redo = self.redo_stack.len(), "Redo");
        true
    }

    /// Back to the initial state with empty history and log
    pub fn reset(&mut self) {
        self.dispatch(EditCommand::ResetAll);
        self.manipulations.clear();
    }

    /// Replace the working state with a saved project's edits
    pub fn load(&mut self, snapshot: EditSnapshot, manipulations: Vec<Manipulation>) {
        self.dispatch(EditCommand::Restore(Box::new(snapshot)));
        self.manipulations = manipulations;
    }

    pub fn snapshot(&self) -> EditSnapshot {
        EditSnapshot::from(&self.state)
    }

    /// Grid layout for the current state drawn over a container.
    ///
    /// Cell sizes are converted into the image's unit through the
    /// physical table. Pixel cell sizes are read as container pixels.
    /// A hidden grid yields an empty layout.
    pub fn grid_layout(
        &self,
        container_width_px: f64,
        container_height_px: f64,
        image: &ImageGeometry,
    ) -> GridLayout {
        let grid = &self.state.grid;
        if !grid.any_grid_visible() {
            return GridLayout::default();
        }

        let dims = GridDimensions {
            container_width_px,
            container_height_px,
            real_width: image.real_width,
            real_height: image.real_height,
            cell_width: cell_in_image_unit(grid.cell_width, image.unit, image.real_width, container_width_px),
            cell_height: cell_in_image_unit(
                grid.cell_height,
                image.unit,
                image.real_height,
                container_height_px,
            ),
        };
        let options = OverlayOptions {
            diagonals: grid.is_diagonal_visible,
            labels: if grid.show_labels {
                grid.label_style
            } else {
                LabelStyle::None
            },
        };

        let mut layout = compute_grid(&dims, &options);
        if !grid.is_grid_visible {
            layout.vertical_lines.clear();
            layout.horizontal_lines.clear();
        }
        layout
    }

    fn push_undo(&mut self, state: EditState) {
        if self.undo_stack.len() >= MAX_UNDO_HISTORY {
            self.undo_stack.pop_front();
        }
        self.undo_stack.push_back(state);
    }

    fn clear_history(&mut self) {
        self.undo_stack.clear();
        self.redo_stack.clear();
    }
}

fn records_history(command: &EditCommand) -> bool {
    !command.is_bookkeeping() && !matches!(command, EditCommand::SetLocked(_) | EditCommand::ToggleLock)
}

fn cell_in_image_unit(cell: Measurement, unit: PhysicalUnit, real: f64, container_px: f64) -> f64 {
    cell.to_physical(unit)
        .unwrap_or_else(|| cell.value * real / container_px)
}
