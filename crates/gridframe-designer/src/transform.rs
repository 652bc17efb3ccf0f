//! Rotation and mirroring of the working image.

use serde::{Deserialize, Serialize};

/// Normalize an angle in degrees into `[0, 360)`.
///
/// Non-finite angles normalize to `0`.
pub fn normalize_rotation(degrees: f64) -> f64 {
    if !degrees.is_finite() {
        return 0.0;
    }
    let normalized = ((degrees % 360.0) + 360.0) % 360.0;
    // -0.0 and float noise just below 360 both belong at 0.
    if normalized == 0.0 || normalized >= 360.0 {
        0.0
    } else {
        normalized
    }
}

/// Mirror state of the working image
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Flip {
    pub horizontal: bool,
    pub vertical: bool,
}

impl Flip {
    pub fn toggled_horizontal(self) -> Self {
        Self {
            horizontal: !self.horizontal,
            ..self
        }
    }

    pub fn toggled_vertical(self) -> Self {
        Self {
            vertical: !self.vertical,
            ..self
        }
    }

    pub fn is_identity(&self) -> bool {
        !self.horizontal && !self.vertical
    }
}
