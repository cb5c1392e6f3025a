#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Geographic coordinate type shared by the risk scorer and the safe-place
//! finder.
//!
//! Coordinates arrive from an external location provider and are consumed
//! immediately. Out-of-range values are rejected, never clamped.

use serde::{Deserialize, Serialize};

/// Valid latitude range in degrees.
pub const LATITUDE_RANGE: std::ops::RangeInclusive<f64> = -90.0..=90.0;

/// Valid longitude range in degrees.
pub const LONGITUDE_RANGE: std::ops::RangeInclusive<f64> = -180.0..=180.0;

/// A WGS84 latitude/longitude pair in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Coordinate {
    /// Latitude in degrees, `-90..=90`.
    pub latitude: f64,
    /// Longitude in degrees, `-180..=180`.
    pub longitude: f64,
}

impl Coordinate {
    /// Creates a coordinate after checking both components are in range.
    ///
    /// # Errors
    ///
    /// Returns [`CoordinateError::OutOfRange`] if either component is
    /// outside its valid range or is not a finite number.
    pub fn new(latitude: f64, longitude: f64) -> Result<Self, CoordinateError> {
        let coordinate = Self {
            latitude,
            longitude,
        };
        coordinate.validate()?;
        Ok(coordinate)
    }

    /// Checks that the coordinate lies within the valid bounds.
    ///
    /// Coordinates built through struct literals or deserialization skip
    /// the check in [`Coordinate::new`], so consumers call this before
    /// using one.
    ///
    /// # Errors
    ///
    /// Returns [`CoordinateError::OutOfRange`] if either component is
    /// outside its valid range or is NaN.
    pub fn validate(&self) -> Result<(), CoordinateError> {
        if LATITUDE_RANGE.contains(&self.latitude) && LONGITUDE_RANGE.contains(&self.longitude) {
            Ok(())
        } else {
            Err(CoordinateError::OutOfRange {
                latitude: self.latitude,
                longitude: self.longitude,
            })
        }
    }

    /// Returns `true` if [`Coordinate::validate`] would succeed.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.validate().is_ok()
    }
}

impl std::fmt::Display for Coordinate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.6}, {:.6}", self.latitude, self.longitude)
    }
}

impl From<Coordinate> for geo::Point<f64> {
    fn from(value: Coordinate) -> Self {
        Self::new(value.longitude, value.latitude)
    }
}

impl From<geo::Point<f64>> for Coordinate {
    fn from(value: geo::Point<f64>) -> Self {
        Self {
            latitude: value.y(),
            longitude: value.x(),
        }
    }
}

/// Error returned when a coordinate falls outside the valid lat/long
/// bounds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CoordinateError {
    /// Latitude or longitude is outside its valid range.
    OutOfRange {
        /// The rejected latitude.
        latitude: f64,
        /// The rejected longitude.
        longitude: f64,
    },
}

impl std::fmt::Display for CoordinateError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::OutOfRange {
                latitude,
                longitude,
            } => write!(
                f,
                "coordinate ({latitude}, {longitude}) out of range: expected latitude -90..=90 and longitude -180..=180"
            ),
        }
    }
}

impl std::error::Error for CoordinateError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_bounds_inclusive() {
        assert!(Coordinate::new(90.0, 180.0).is_ok());
        assert!(Coordinate::new(-90.0, -180.0).is_ok());
        assert!(Coordinate::new(0.0, 0.0).is_ok());
    }

    #[test]
    fn rejects_out_of_range() {
        assert!(Coordinate::new(90.000_1, 0.0).is_err());
        assert!(Coordinate::new(0.0, -180.5).is_err());
        assert_eq!(
            Coordinate::new(120.0, 10.0),
            Err(CoordinateError::OutOfRange {
                latitude: 120.0,
                longitude: 10.0,
            })
        );
    }

    #[test]
    fn rejects_nan() {
        assert!(Coordinate::new(f64::NAN, 0.0).is_err());
        assert!(Coordinate::new(0.0, f64::NAN).is_err());
    }

    #[test]
    fn struct_literal_can_be_validated_later() {
        let coordinate = Coordinate {
            latitude: -95.0,
            longitude: 0.0,
        };
        assert!(!coordinate.is_valid());
    }

    #[test]
    fn geo_point_uses_x_for_longitude() {
        let coordinate = Coordinate::new(40.7128, -74.0060).unwrap();
        let point: geo::Point<f64> = coordinate.into();
        assert!((point.x() - -74.0060).abs() < f64::EPSILON);
        assert!((point.y() - 40.7128).abs() < f64::EPSILON);
        assert_eq!(Coordinate::from(point), coordinate);
    }

    #[test]
    fn serializes_camel_case() {
        let coordinate = Coordinate::new(1.5, -2.25).unwrap();
        let json = serde_json::to_string(&coordinate).unwrap();
        assert_eq!(json, r#"{"latitude":1.5,"longitude":-2.25}"#);
    }
}
