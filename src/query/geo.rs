//! Geographic filter inputs.
//!
//! These are plain values; distance, containment and intersection are
//! evaluated by PostGIS when a plan is executed.

use serde::{Deserialize, Serialize};

/// A WGS-84 point in degrees
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub lat: f64,
    pub lon: f64,
}

impl GeoPoint {
    pub fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }

    /// Finite and inside the latitude/longitude ranges
    pub fn is_valid(&self) -> bool {
        self.lat.is_finite()
            && self.lon.is_finite()
            && (-90.0..=90.0).contains(&self.lat)
            && (-180.0..=180.0).contains(&self.lon)
    }
}

/// An axis-aligned lat/lon envelope
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub min_lat: f64,
    pub min_lon: f64,
    pub max_lat: f64,
    pub max_lon: f64,
}

impl Bounds {
    /// Build from the conventional `bbox` order: west, south, east, north
    pub fn from_bbox(min_lon: f64, min_lat: f64, max_lon: f64, max_lat: f64) -> Self {
        Self {
            min_lat,
            min_lon,
            max_lat,
            max_lon,
        }
    }

    pub fn south_west(&self) -> GeoPoint {
        GeoPoint::new(self.min_lat, self.min_lon)
    }

    pub fn north_east(&self) -> GeoPoint {
        GeoPoint::new(self.max_lat, self.max_lon)
    }

    /// Both corners valid and ordered
    pub fn is_valid(&self) -> bool {
        self.south_west().is_valid()
            && self.north_east().is_valid()
            && self.min_lat <= self.max_lat
            && self.min_lon <= self.max_lon
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_point_validation() {
        assert!(GeoPoint::new(40.0, -73.0).is_valid());
        assert!(GeoPoint::new(-90.0, 180.0).is_valid());
        assert!(!GeoPoint::new(90.5, 0.0).is_valid());
        assert!(!GeoPoint::new(0.0, -180.1).is_valid());
        assert!(!GeoPoint::new(f64::NAN, 0.0).is_valid());
    }

    #[test]
    fn test_bbox_order() {
        let bounds = Bounds::from_bbox(-74.1, 40.6, -73.8, 40.9);
        assert_eq!(bounds.min_lon, -74.1);
        assert_eq!(bounds.min_lat, 40.6);
        assert_eq!(bounds.max_lon, -73.8);
        assert_eq!(bounds.max_lat, 40.9);
        assert!(bounds.is_valid());
    }

    #[test]
    fn test_inverted_bounds_invalid() {
        let bounds = Bounds::from_bbox(-73.8, 40.9, -74.1, 40.6);
        assert!(!bounds.is_valid());
    }
}
