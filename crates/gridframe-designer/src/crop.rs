//! Normalized crop rectangle and aspect-ratio fitting.
//!
//! Coordinates are fractions of the image size: `(0, 0)` is the top-left
//! corner and `(1, 1)` the bottom-right. Every rectangle leaving this
//! module has been passed through [`CropRect::validated`].

use gridframe_core::constants::{MIN_CROP_SIZE, RATIO_TOLERANCE};
use serde::{Deserialize, Serialize};

/// Crop rectangle in normalized image coordinates
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CropRect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Default for CropRect {
    /// The full image
    fn default() -> Self {
        Self::FULL
    }
}

impl CropRect {
    pub const FULL: CropRect = CropRect {
        x: 0.0,
        y: 0.0,
        width: 1.0,
        height: 1.0,
    };

    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn center(&self) -> (f64, f64) {
        (self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    /// Width divided by height
    pub fn ratio(&self) -> f64 {
        self.width / self.height
    }

    pub fn is_full(&self) -> bool {
        *self == Self::FULL
    }

    /// Clamp into the unit square.
    ///
    /// Size is clamped to `[MIN_CROP_SIZE, 1]` first. An origin that would
    /// push the rectangle past the right or bottom edge is shifted back
    /// rather than shrinking the rectangle. Non-finite components fall back
    /// to the full-frame value for that component.
    pub fn validated(&self) -> Self {
        let finite_or = |v: f64, fallback: f64| if v.is_finite() { v } else { fallback };

        let width = finite_or(self.width, 1.0).clamp(MIN_CROP_SIZE, 1.0);
        let height = finite_or(self.height, 1.0).clamp(MIN_CROP_SIZE, 1.0);
        let x = finite_or(self.x, 0.0).clamp(0.0, 1.0 - width);
        let y = finite_or(self.y, 0.0).clamp(0.0, 1.0 - height);

        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Fit this rectangle to `target` (width / height) around its centre.
    ///
    /// See [`adjust_to_ratio`].
    pub fn with_ratio(&self, target: Option<f64>) -> Self {
        adjust_to_ratio(self, target)
    }
}

/// Reshape `rect` to the target aspect ratio, keeping its centre.
///
/// A missing, non-positive or non-finite target leaves the rectangle as
/// is, as does a target within [`RATIO_TOLERANCE`] of the current ratio.
/// The rectangle grows along one axis: width when the target is wider than
/// the current shape, height otherwise. Only if that axis saturates at the
/// full image is the other axis shrunk to reach the target.
///
/// Targets beyond what [`MIN_CROP_SIZE`] allows end at the minimum size on
/// the short side. Applying the same target again returns the rectangle
/// unchanged.
pub fn adjust_to_ratio(rect: &CropRect, target: Option<f64>) -> CropRect {
    let Some(target) = target.filter(|t| t.is_finite() && *t > 0.0) else {
        return *rect;
    };

    let current = rect.ratio();
    if (current - target).abs() < RATIO_TOLERANCE {
        return *rect;
    }

    let (center_x, center_y) = rect.center();

    let (width, height) = if target > current {
        let width = (rect.height * target).min(1.0);
        if width >= 1.0 {
            (width, width / target)
        } else {
            (width, rect.height)
        }
    } else {
        let height = (rect.width / target).min(1.0);
        if height >= 1.0 {
            (height * target, height)
        } else {
            (rect.width, height)
        }
    };

    let width = width.clamp(MIN_CROP_SIZE, 1.0);
    let height = height.clamp(MIN_CROP_SIZE, 1.0);
    if width == rect.width && height == rect.height {
        return rect.validated();
    }

    let x = (center_x - width / 2.0).clamp(0.0, 1.0 - width);
    let y = (center_y - height / 2.0).clamp(0.0, 1.0 - height);

    CropRect {
        x,
        y,
        width,
        height,
    }
    .validated()
}
