//! Project site geolocation.

use crate::error::{CoreError, CoreResult};
use serde::{Deserialize, Serialize};

/// Geographic location of a project site.
///
/// Optional on a project record; used by the (external) map rendering layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    /// Latitude in degrees (-90 to 90).
    pub latitude: f64,

    /// Longitude in degrees (-180 to 180).
    pub longitude: f64,

    /// Optional site label ("Water Treatment Facility 12", ...).
    pub label: Option<String>,
}

impl GeoPoint {
    /// Creates a new point with validated coordinates.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::InvalidCoordinate` for out-of-range values.
    pub fn new(latitude: f64, longitude: f64) -> CoreResult<Self> {
        if !latitude.is_finite() || !(-90.0..=90.0).contains(&latitude) {
            return Err(CoreError::InvalidCoordinate {
                field: "latitude",
                value: latitude,
            });
        }
        if !longitude.is_finite() || !(-180.0..=180.0).contains(&longitude) {
            return Err(CoreError::InvalidCoordinate {
                field: "longitude",
                value: longitude,
            });
        }
        Ok(Self {
            latitude,
            longitude,
            label: None,
        })
    }

    /// Sets the site label.
    #[must_use]
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_point() {
        let point = GeoPoint::new(40.7128, -74.0060)
            .unwrap()
            .with_label("New York Hub");
        assert_eq!(point.label.as_deref(), Some("New York Hub"));
    }

    #[test]
    fn test_rejects_out_of_range() {
        assert!(GeoPoint::new(95.0, 0.0).is_err());
        assert!(GeoPoint::new(0.0, 181.0).is_err());
        assert!(GeoPoint::new(f64::NAN, 0.0).is_err());
    }
}
