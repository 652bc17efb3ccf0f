//! # GridFrame Core
//!
//! Core types and utilities shared by the GridFrame crates:
//! unit conversion on the image (pixel) and physical (millimetre) scales,
//! the grid stroke colour type, shared constants, and the unified error
//! taxonomy.

pub mod color;
pub mod constants;
pub mod error;
pub mod units;

pub use color::StrokeColor;
pub use error::{Error, Result};
pub use units::{LengthUnit, Measurement, PhysicalUnit};
