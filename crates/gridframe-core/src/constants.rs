//! Shared constants

/// Maximum number of projects kept in the summary index
pub const MAX_PROJECTS: usize = 50;

/// Storage key holding the project summary index
pub const PROJECT_LIST_KEY: &str = "PROJECT_LIST_V2";

/// Prefix of per-project detail record keys (`project:<id>`)
pub const PROJECT_KEY_PREFIX: &str = "project:";

/// Smallest normalized crop width/height
pub const MIN_CROP_SIZE: f64 = 0.1;

/// Ratios closer than this are treated as equal
pub const RATIO_TOLERANCE: f64 = 0.001;

/// Cell size forced by the default grid mode, in millimetres
pub const DEFAULT_CELL_SIZE_MM: f64 = 20.0;

/// Most grid lines drawn along one axis; denser grids are not drawn
pub const MAX_GRID_LINES: u32 = 5_000;

/// Most cells (partial cells included) in one drawn grid
pub const MAX_GRID_CELLS: u64 = 1_200_000;

/// Default grid stroke width, in millimetres
pub const DEFAULT_STROKE_WIDTH_MM: f64 = 0.5;

/// Default grid stroke colour
pub const DEFAULT_STROKE_COLOR: &str = "#FFFFFF";

/// Rotation step applied by rotate-left / rotate-right, in degrees
pub const ROTATION_STEP_DEG: f64 = 90.0;

/// Maximum number of undo states retained by the edit store
pub const MAX_UNDO_HISTORY: usize = 100;

/// Build the detail record key for a project id
pub fn project_key(id: &str) -> String {
    format!("{}{}", PROJECT_KEY_PREFIX, id)
}
