//! Grid geometry engine.
//!
//! Lays a grid of real-world cells over a rendering container. All
//! real-world inputs share one unit (the caller converts first); the output
//! is in container pixels with the origin at the top-left corner and y
//! growing downward.
//!
//! ```text
//! +------+------+------+--+
//! |      |      |      |  |   full cells: cols x rows
//! +------+------+------+--+
//! |      |      |      |  |   right strip: partial column
//! +------+------+------+--+
//! |______|______|______|__|   bottom strip: partial row
//! ```
//!
//! Scaling is independent per axis, so a container whose aspect ratio
//! differs from the real-world page stretches the cells.

use gridframe_core::constants::{MAX_GRID_CELLS, MAX_GRID_LINES};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Slack applied before truncating `real / cell`, so that float noise such
/// as `0.3 / 0.1 = 2.9999999999999996` still counts three full cells.
const COUNT_EPSILON: f64 = 1e-9;

/// Partial strips narrower than this many pixels are not reported.
const REGION_EPSILON: f64 = 1e-6;

/// Which cell labels to draw
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "UPPERCASE")]
pub enum LabelStyle {
    #[default]
    None,
    Row,
    Col,
    Both,
}

impl LabelStyle {
    pub fn shows_columns(&self) -> bool {
        matches!(self, Self::Col | Self::Both)
    }

    pub fn shows_rows(&self) -> bool {
        matches!(self, Self::Row | Self::Both)
    }
}

impl fmt::Display for LabelStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::None => write!(f, "NONE"),
            Self::Row => write!(f, "ROW"),
            Self::Col => write!(f, "COL"),
            Self::Both => write!(f, "BOTH"),
        }
    }
}

/// Inputs to [`compute_grid`]
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GridDimensions {
    pub container_width_px: f64,
    pub container_height_px: f64,
    pub real_width: f64,
    pub real_height: f64,
    pub cell_width: f64,
    pub cell_height: f64,
}

impl GridDimensions {
    fn is_drawable(&self) -> bool {
        [
            self.container_width_px,
            self.container_height_px,
            self.real_width,
            self.real_height,
            self.cell_width,
            self.cell_height,
        ]
        .iter()
        .all(|v| v.is_finite() && *v > 0.0)
    }
}

/// Optional overlays computed alongside the grid lines
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct OverlayOptions {
    pub diagonals: bool,
    pub labels: LabelStyle,
}

/// Direction of a cell diagonal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DiagonalKind {
    /// `/` from bottom-left to top-right
    Forward,
    /// `\` from top-left to bottom-right
    Back,
}

/// One diagonal line across a cell.
///
/// `angle_deg` follows the y-up convention: `atan(h / w)` for forward
/// diagonals and its negation for back diagonals.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DiagonalSegment {
    pub kind: DiagonalKind,
    pub row: u32,
    pub col: u32,
    pub start: (f64, f64),
    pub end: (f64, f64),
    pub length: f64,
    pub angle_deg: f64,
}

/// Axis a label belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LabelAxis {
    Column,
    Row,
}

/// A cell label anchored at the cell's top-left corner
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GridLabel {
    pub axis: LabelAxis,
    /// Zero-based column or row index
    pub index: u32,
    pub text: String,
    pub x: f64,
    pub y: f64,
    /// True when the labelled column/row is a partial cell
    pub partial: bool,
}

/// Rectangle in container pixels
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PixelRect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

/// Everything the renderer needs to paint the grid
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct GridLayout {
    pub cols: u32,
    pub rows: u32,
    pub cell_width_px: f64,
    pub cell_height_px: f64,
    pub grid_width_px: f64,
    pub grid_height_px: f64,
    pub remainder_width_px: f64,
    pub remainder_height_px: f64,
    /// x offsets of vertical lines `i = 1..=cols`
    pub vertical_lines: Vec<f64>,
    /// y offsets of horizontal lines `i = 1..=rows`
    pub horizontal_lines: Vec<f64>,
    /// Right strip (beside full rows) then bottom strip (full width)
    pub partial_regions: Vec<PixelRect>,
    pub diagonals: Vec<DiagonalSegment>,
    pub labels: Vec<GridLabel>,
}

impl GridLayout {
    /// True when there is nothing to draw
    pub fn is_empty(&self) -> bool {
        self.cols == 0
            && self.rows == 0
            && self.partial_regions.is_empty()
            && self.diagonals.is_empty()
    }

    /// Column count including a trailing partial column
    pub fn extended_cols(&self) -> u32 {
        self.cols + u32::from(self.remainder_width_px > REGION_EPSILON)
    }

    /// Row count including a trailing partial row
    pub fn extended_rows(&self) -> u32 {
        self.rows + u32::from(self.remainder_height_px > REGION_EPSILON)
    }
}

/// Compute grid lines, partial strips and the requested overlays.
///
/// Any non-positive or non-finite input produces an empty layout, as
/// does a cell size so small that the grid would exceed
/// [`MAX_GRID_LINES`] per axis or [`MAX_GRID_CELLS`] in total.
pub fn compute_grid(dims: &GridDimensions, options: &OverlayOptions) -> GridLayout {
    if !dims.is_drawable() {
        return GridLayout::default();
    }

    let cols = cell_count(dims.real_width, dims.cell_width);
    let rows = cell_count(dims.real_height, dims.cell_height);
    if !within_limits(cols, rows) {
        tracing::warn!(cols, rows, "Grid too dense to draw");
        return GridLayout::default();
    }

    let scale_x = dims.container_width_px / dims.real_width;
    let scale_y = dims.container_height_px / dims.real_height;
    let cell_width_px = dims.cell_width * scale_x;
    let cell_height_px = dims.cell_height * scale_y;

    let grid_width_px = (f64::from(cols) * cell_width_px).min(dims.container_width_px);
    let grid_height_px = (f64::from(rows) * cell_height_px).min(dims.container_height_px);
    let remainder_width_px = (dims.container_width_px - grid_width_px).max(0.0);
    let remainder_height_px = (dims.container_height_px - grid_height_px).max(0.0);

    let vertical_lines = (1..=cols).map(|i| f64::from(i) * cell_width_px).collect();
    let horizontal_lines = (1..=rows).map(|i| f64::from(i) * cell_height_px).collect();

    let mut partial_regions = Vec::new();
    if remainder_width_px > REGION_EPSILON && grid_height_px > REGION_EPSILON {
        partial_regions.push(PixelRect {
            x: grid_width_px,
            y: 0.0,
            width: remainder_width_px,
            height: grid_height_px,
        });
    }
    if remainder_height_px > REGION_EPSILON {
        partial_regions.push(PixelRect {
            x: 0.0,
            y: grid_height_px,
            width: dims.container_width_px,
            height: remainder_height_px,
        });
    }

    let mut layout = GridLayout {
        cols,
        rows,
        cell_width_px,
        cell_height_px,
        grid_width_px,
        grid_height_px,
        remainder_width_px,
        remainder_height_px,
        vertical_lines,
        horizontal_lines,
        partial_regions,
        diagonals: Vec::new(),
        labels: Vec::new(),
    };

    if options.diagonals {
        layout.diagonals = diagonal_segments(&layout, dims);
    }
    if options.labels != LabelStyle::None {
        layout.labels = grid_labels(&layout, options.labels);
    }

    layout
}

/// Whole cells that fit along one axis (truncating, never rounding up)
fn cell_count(real: f64, cell: f64) -> u32 {
    let count = (real / cell + COUNT_EPSILON).floor();
    if count.is_finite() && count > 0.0 {
        count.min(f64::from(u32::MAX)) as u32
    } else {
        0
    }
}

fn within_limits(cols: u32, rows: u32) -> bool {
    let extended = |n: u32| u64::from(n) + 1;
    cols <= MAX_GRID_LINES
        && rows <= MAX_GRID_LINES
        && extended(cols)
            .checked_mul(extended(rows))
            .is_some_and(|cells| cells <= MAX_GRID_CELLS)
}

/// Both diagonals of every cell, partial cells included
fn diagonal_segments(layout: &GridLayout, dims: &GridDimensions) -> Vec<DiagonalSegment> {
    let cols = layout.extended_cols();
    let rows = layout.extended_rows();
    let capacity = (cols as usize)
        .checked_mul(rows as usize)
        .and_then(|cells| cells.checked_mul(2))
        .unwrap_or_default();
    let mut segments = Vec::with_capacity(capacity);

    for row in 0..rows {
        let y = f64::from(row) * layout.cell_height_px;
        let h = layout.cell_height_px.min(dims.container_height_px - y);
        if h <= REGION_EPSILON {
            continue;
        }

        for col in 0..cols {
            let x = f64::from(col) * layout.cell_width_px;
            let w = layout.cell_width_px.min(dims.container_width_px - x);
            if w <= REGION_EPSILON {
                continue;
            }

            let length = (w * w + h * h).sqrt();
            let angle_deg = (h / w).atan().to_degrees();

            segments.push(DiagonalSegment {
                kind: DiagonalKind::Forward,
                row,
                col,
                start: (x, y + h),
                end: (x + w, y),
                length,
                angle_deg,
            });
            segments.push(DiagonalSegment {
                kind: DiagonalKind::Back,
                row,
                col,
                start: (x, y),
                end: (x + w, y + h),
                length,
                angle_deg: -angle_deg,
            });
        }
    }

    segments
}

/// Column labels along the top edge and row labels along the left edge
fn grid_labels(layout: &GridLayout, style: LabelStyle) -> Vec<GridLabel> {
    let mut labels = Vec::new();

    if style.shows_columns() {
        for col in 0..layout.extended_cols() {
            labels.push(GridLabel {
                axis: LabelAxis::Column,
                index: col,
                text: (col + 1).to_string(),
                x: f64::from(col) * layout.cell_width_px,
                y: 0.0,
                partial: col >= layout.cols,
            });
        }
    }

    if style.shows_rows() {
        for row in 0..layout.extended_rows() {
            labels.push(GridLabel {
                axis: LabelAxis::Row,
                index: row,
                text: row_label(row),
                x: 0.0,
                y: f64::from(row) * layout.cell_height_px,
                partial: row >= layout.rows,
            });
        }
    }

    labels
}

/// Spreadsheet-style row name: A..Z, AA..AZ, BA..
fn row_label(index: u32) -> String {
    let mut n = index + 1;
    let mut name = Vec::new();
    while n > 0 {
        let rem = ((n - 1) % 26) as u8;
        name.push(b'A' + rem);
        n = (n - 1) / 26;
    }
    name.reverse();
    String::from_utf8(name).unwrap_or_default()
}
