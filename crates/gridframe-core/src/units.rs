//! Unit conversion utilities
//!
//! Two independent scales live here and must not be mixed:
//! - [`image`] converts on-screen/image lengths with pixels as the base
//!   (96 px per inch).
//! - [`physical`] converts real-world paper and grid lengths with
//!   millimetres as the base. Pixels have no physical size, so this
//!   namespace takes a [`PhysicalUnit`], which cannot express `px`.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Linear unit for a measurement
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LengthUnit {
    /// Pixels
    Px,
    /// Millimetres
    Mm,
    /// Centimetres
    Cm,
    /// Metres
    M,
    /// Inches
    Inch,
    /// Feet
    Ft,
}

impl Default for LengthUnit {
    fn default() -> Self {
        Self::Mm
    }
}

impl LengthUnit {
    /// All units, in display order
    pub const ALL: [LengthUnit; 6] = [
        LengthUnit::Px,
        LengthUnit::Mm,
        LengthUnit::Cm,
        LengthUnit::M,
        LengthUnit::Inch,
        LengthUnit::Ft,
    ];

    /// Short label used in UI and when formatting measurements
    pub fn label(&self) -> &'static str {
        match self {
            Self::Px => "px",
            Self::Mm => "mm",
            Self::Cm => "cm",
            Self::M => "m",
            Self::Inch => "in",
            Self::Ft => "ft",
        }
    }

    /// The physical counterpart of this unit, `None` for pixels
    pub fn physical(&self) -> Option<PhysicalUnit> {
        PhysicalUnit::try_from(*self).ok()
    }
}

impl fmt::Display for LengthUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl FromStr for LengthUnit {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "px" | "pixel" | "pixels" => Ok(Self::Px),
            "mm" | "millimeter" | "millimetre" => Ok(Self::Mm),
            "cm" | "centimeter" | "centimetre" => Ok(Self::Cm),
            "m" | "meter" | "metre" => Ok(Self::M),
            "in" | "inch" | "inches" | "\"" => Ok(Self::Inch),
            "ft" | "foot" | "feet" | "'" => Ok(Self::Ft),
            _ => Err(format!("Unknown length unit: {}", s)),
        }
    }
}

/// A length unit with a real-world size
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PhysicalUnit {
    Mm,
    Cm,
    M,
    Inch,
    Ft,
}

impl Default for PhysicalUnit {
    fn default() -> Self {
        Self::Mm
    }
}

impl From<PhysicalUnit> for LengthUnit {
    fn from(unit: PhysicalUnit) -> Self {
        match unit {
            PhysicalUnit::Mm => LengthUnit::Mm,
            PhysicalUnit::Cm => LengthUnit::Cm,
            PhysicalUnit::M => LengthUnit::M,
            PhysicalUnit::Inch => LengthUnit::Inch,
            PhysicalUnit::Ft => LengthUnit::Ft,
        }
    }
}

impl TryFrom<LengthUnit> for PhysicalUnit {
    type Error = LengthUnit;

    fn try_from(unit: LengthUnit) -> Result<Self, Self::Error> {
        match unit {
            LengthUnit::Px => Err(unit),
            LengthUnit::Mm => Ok(PhysicalUnit::Mm),
            LengthUnit::Cm => Ok(PhysicalUnit::Cm),
            LengthUnit::M => Ok(PhysicalUnit::M),
            LengthUnit::Inch => Ok(PhysicalUnit::Inch),
            LengthUnit::Ft => Ok(PhysicalUnit::Ft),
        }
    }
}

impl fmt::Display for PhysicalUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", LengthUnit::from(*self))
    }
}

/// Image-space conversions (base unit: pixel at 96 DPI)
pub mod image {
    use super::LengthUnit;

    /// Pixels per millimetre at 96 DPI
    pub const PX_PER_MM: f64 = 3.7795275591;

    /// Size of one unit expressed in pixels
    pub fn px_per_unit(unit: LengthUnit) -> f64 {
        match unit {
            LengthUnit::Px => 1.0,
            LengthUnit::Mm => PX_PER_MM,
            LengthUnit::Cm => 37.795275591,
            LengthUnit::M => 3779.5275591,
            LengthUnit::Inch => 96.0,
            LengthUnit::Ft => 1152.0,
        }
    }

    /// Convert a length between units on the pixel scale
    pub fn convert(value: f64, from: LengthUnit, to: LengthUnit) -> f64 {
        if from == to {
            return value;
        }
        value * px_per_unit(from) / px_per_unit(to)
    }
}

/// Real-world conversions (base unit: millimetre)
pub mod physical {
    use super::PhysicalUnit;

    /// Size of one unit expressed in millimetres
    pub fn mm_per_unit(unit: PhysicalUnit) -> f64 {
        match unit {
            PhysicalUnit::Mm => 1.0,
            PhysicalUnit::Cm => 10.0,
            PhysicalUnit::M => 1000.0,
            PhysicalUnit::Inch => 25.4,
            PhysicalUnit::Ft => 304.8,
        }
    }

    /// Convert a length between physical units
    pub fn convert(value: f64, from: PhysicalUnit, to: PhysicalUnit) -> f64 {
        if from == to {
            return value;
        }
        value * mm_per_unit(from) / mm_per_unit(to)
    }

    /// Convert a length to millimetres
    pub fn to_mm(value: f64, from: PhysicalUnit) -> f64 {
        convert(value, from, PhysicalUnit::Mm)
    }
}

/// A scalar length tagged with its unit
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Measurement {
    pub value: f64,
    pub unit: LengthUnit,
}

impl Measurement {
    pub const fn new(value: f64, unit: LengthUnit) -> Self {
        Self { value, unit }
    }

    pub const fn mm(value: f64) -> Self {
        Self::new(value, LengthUnit::Mm)
    }

    pub const fn px(value: f64) -> Self {
        Self::new(value, LengthUnit::Px)
    }

    /// True when the value is finite and strictly positive
    pub fn is_positive(&self) -> bool {
        self.value.is_finite() && self.value > 0.0
    }

    /// Express this measurement in another physical unit.
    ///
    /// Returns `None` when this measurement is in pixels, which have no
    /// real-world size.
    pub fn to_physical(&self, unit: PhysicalUnit) -> Option<f64> {
        let from = self.unit.physical()?;
        Some(physical::convert(self.value, from, unit))
    }

    /// Express this measurement in another unit on the pixel scale
    pub fn to_image_unit(&self, unit: LengthUnit) -> f64 {
        image::convert(self.value, self.unit, unit)
    }
}

impl fmt::Display for Measurement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.value, self.unit)
    }
}

impl FromStr for Measurement {
    type Err = String;

    /// Parse strings such as `20mm`, `1.5 in`, `3 ft` or `1e-3mm`
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let input = s.trim();
        if input.is_empty() {
            return Err("Empty measurement".to_string());
        }

        let (number, unit) = input.split_at(numeric_prefix_len(input));

        let value = number
            .trim()
            .parse::<f64>()
            .map_err(|e| format!("Invalid number '{}': {}", number.trim(), e))?;
        if !value.is_finite() {
            return Err(format!("Measurement must be finite: {}", input));
        }

        let unit = if unit.trim().is_empty() {
            LengthUnit::default()
        } else {
            unit.parse()?
        };

        Ok(Self { value, unit })
    }
}

/// Length of the leading number, including an `e`/`E` exponent when
/// digits follow it
fn numeric_prefix_len(input: &str) -> usize {
    let bytes = input.as_bytes();
    let is_mantissa = |b: &u8| b.is_ascii_digit() || matches!(b, b'.' | b'-' | b'+');

    let mut end = bytes
        .iter()
        .position(|b| !is_mantissa(b))
        .unwrap_or(bytes.len());
    if matches!(bytes.get(end), Some(b'e' | b'E')) {
        let mut exponent = end + 1;
        if matches!(bytes.get(exponent), Some(b'-' | b'+')) {
            exponent += 1;
        }
        let digits = bytes[exponent..]
            .iter()
            .take_while(|b| b.is_ascii_digit())
            .count();
        if digits > 0 {
            end = exponent + digits;
        }
    }
    end
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9 * a.abs().max(b.abs()).max(1.0)
    }

    #[test]
    fn test_same_unit_is_identity() {
        let v = 0.1 + 0.2;
        assert_eq!(image::convert(v, LengthUnit::Cm, LengthUnit::Cm), v);
        assert_eq!(physical::convert(v, PhysicalUnit::Ft, PhysicalUnit::Ft), v);
    }

    #[test]
    fn test_image_scale() {
        assert!(approx(image::convert(1.0, LengthUnit::Inch, LengthUnit::Px), 96.0));
        assert!(approx(image::convert(1.0, LengthUnit::Ft, LengthUnit::Inch), 12.0));
        assert!(approx(image::convert(10.0, LengthUnit::Mm, LengthUnit::Cm), 1.0));
        assert!(approx(
            image::convert(96.0, LengthUnit::Px, LengthUnit::Mm),
            96.0 / 3.7795275591
        ));
    }

    #[test]
    fn test_physical_scale() {
        assert!(approx(physical::convert(1.0, PhysicalUnit::Inch, PhysicalUnit::Mm), 25.4));
        assert!(approx(physical::convert(1.0, PhysicalUnit::Ft, PhysicalUnit::Inch), 12.0));
        assert!(approx(physical::convert(2.5, PhysicalUnit::M, PhysicalUnit::Cm), 250.0));
        assert!(approx(physical::to_mm(3.0, PhysicalUnit::Cm), 30.0));
    }

    #[test]
    fn test_pixels_have_no_physical_size() {
        assert_eq!(LengthUnit::Px.physical(), None);
        assert_eq!(Measurement::px(10.0).to_physical(PhysicalUnit::Mm), None);
        assert_eq!(
            Measurement::new(2.0, LengthUnit::Cm).to_physical(PhysicalUnit::Mm),
            Some(20.0)
        );
    }

    #[test]
    fn test_unit_parsing() {
        assert_eq!("mm".parse::<LengthUnit>().unwrap(), LengthUnit::Mm);
        assert_eq!(" Inch ".parse::<LengthUnit>().unwrap(), LengthUnit::Inch);
        assert_eq!("in".parse::<LengthUnit>().unwrap(), LengthUnit::Inch);
        assert_eq!("feet".parse::<LengthUnit>().unwrap(), LengthUnit::Ft);
        assert!("furlong".parse::<LengthUnit>().is_err());
    }

    #[test]
    fn test_measurement_parsing() {
        assert_eq!("20mm".parse::<Measurement>().unwrap(), Measurement::mm(20.0));
        assert_eq!(
            "1.5 in".parse::<Measurement>().unwrap(),
            Measurement::new(1.5, LengthUnit::Inch)
        );
        assert_eq!("12".parse::<Measurement>().unwrap(), Measurement::mm(12.0));
        assert!("abc".parse::<Measurement>().is_err());
        assert!("".parse::<Measurement>().is_err());
        assert!("5 parsecs".parse::<Measurement>().is_err());

        assert_eq!("1e-3mm".parse::<Measurement>().unwrap(), Measurement::mm(1e-3));
        assert_eq!(
            "2.5E2 px".parse::<Measurement>().unwrap(),
            Measurement::px(250.0)
        );
        assert!("1e mm".parse::<Measurement>().is_err());
    }

    #[test]
    fn test_measurement_display() {
        assert_eq!(Measurement::mm(20.0).to_string(), "20mm");
        assert_eq!(Measurement::new(0.5, LengthUnit::Inch).to_string(), "0.5in");
    }

    #[test]
    fn test_serde_names() {
        let json = serde_json::to_string(&Measurement::new(3.0, LengthUnit::Inch)).unwrap();
        assert_eq!(json, r#"{"value":3.0,"unit":"inch"}"#);
        let unit: LengthUnit = serde_json::from_str("\"ft\"").unwrap();
        assert_eq!(unit, LengthUnit::Ft);
    }
}
