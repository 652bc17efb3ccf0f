//! # GridFrame Designer
//!
//! Geometry and editing logic for laying a real-world grid over a photo.
//!
//! ## Core Components
//!
//! - **Grid**: lines, partial strips, diagonals and labels for a container
//! - **Crop**: normalized crop rectangle and aspect-ratio fitting
//! - **Presets**: ISO paper sizes and named crop ratios
//! - **Transform**: rotation normalization and mirroring
//! - **Edit State**: command reducer, snapshot, and a store with
//!   undo/redo and a manipulation log
//!
//! ## Architecture
//!
//! ```text
//! EditCommand ──> apply(state, command) ──> EditState
//!                                              │
//!        EditStore (history, log) ─────────────┤
//!                                              v
//!                 grid_layout() ──> compute_grid() ──> GridLayout
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use gridframe_designer::{EditCommand, EditStore, ImageGeometry};
//! use gridframe_core::PhysicalUnit;
//!
//! let mut store = EditStore::default();
//! store.dispatch(EditCommand::SetGridVisible(true));
//!
//! let a4 = ImageGeometry { real_width: 210.0, real_height: 297.0, unit: PhysicalUnit::Mm };
//! let layout = store.grid_layout(420.0, 594.0, &a4);
//! ```

pub mod crop;
pub mod edit_state;
pub mod grid;
pub mod presets;
pub mod transform;

pub use crop::{adjust_to_ratio, CropRect};
pub use edit_state::{
    apply, apply_with_initial, EditCommand, EditDefaults, EditSnapshot, EditState, EditStore,
    GridConfig, GridMode, ImageEffect, ImageGeometry, Manipulation, PaperSettings,
};
pub use grid::{
    compute_grid, DiagonalKind, DiagonalSegment, GridDimensions, GridLabel, GridLayout, LabelAxis,
    LabelStyle, OverlayOptions, PixelRect,
};
pub use presets::{PaperPreset, PaperSize, RatioPreset};
pub use transform::{normalize_rotation, Flip};
