//! Physical units used by prepared documents.
//!
//! All geometry inside the pipeline stays in one document unit. Conversion to
//! device space happens only where a surface binds to an output device.

use serde::{Deserialize, Serialize};

pub const POINTS_PER_INCH: f32 = 72.0;
pub const MM_PER_INCH: f32 = 25.4;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Unit {
    /// 1/72 inch. Font sizes are always given in points.
    #[default]
    #[serde(alias = "pt")]
    Point,
    #[serde(alias = "mm")]
    Millimeter,
}

impl Unit {
    /// Converts a value expressed in this unit to points.
    pub fn to_points(self, value: f32) -> f32 {
        match self {
            Unit::Point => value,
            Unit::Millimeter => value * POINTS_PER_INCH / MM_PER_INCH,
        }
    }

    /// Converts a value in points to this unit.
    pub fn from_points(self, value: f32) -> f32 {
        match self {
            Unit::Point => value,
            Unit::Millimeter => value * MM_PER_INCH / POINTS_PER_INCH,
        }
    }

    /// Converts a value in this unit to device pixels at the given resolution.
    pub fn to_device(self, value: f32, dpi: f32) -> f32 {
        self.to_points(value) * dpi / POINTS_PER_INCH
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_millimeter_conversion() {
        let pt = Unit::Millimeter.to_points(25.4);
        assert!((pt - 72.0).abs() < 1e-4);
        let back = Unit::Millimeter.from_points(pt);
        assert!((back - 25.4).abs() < 1e-4);
    }

    #[test]
    fn test_device_conversion_at_72_dpi_is_identity_for_points() {
        assert_eq!(Unit::Point.to_device(100.0, 72.0), 100.0);
        assert_eq!(Unit::Point.to_device(100.0, 144.0), 200.0);
    }
}
