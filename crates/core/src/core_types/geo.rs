//! Geographic coordinates and great-circle distance

use serde::{Deserialize, Serialize};

/// Mean Earth radius used for great-circle distances (km)
const EARTH_RADIUS_KM: f64 = 6373.0;

/// A geographic coordinate pair in decimal degrees
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoLocation {
    /// Latitude in decimal degrees (positive north)
    pub latitude: f64,
    /// Longitude in decimal degrees (positive east)
    pub longitude: f64,
}

impl GeoLocation {
    /// Create a location from decimal degrees
    pub fn new(latitude: f64, longitude: f64) -> Self {
        GeoLocation {
            latitude,
            longitude,
        }
    }

    /// Great-circle distance to another location in meters (haversine formula)
    pub fn distance_m(&self, other: &GeoLocation) -> f64 {
        let lat_a = self.latitude.to_radians();
        let lat_b = other.latitude.to_radians();
        let dlat = lat_b - lat_a;
        let dlon = (other.longitude - self.longitude).to_radians();

        let a = (dlat / 2.0).sin().powi(2) + lat_a.cos() * lat_b.cos() * (dlon / 2.0).sin().powi(2);
        let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

        EARTH_RADIUS_KM * c * 1000.0
    }
}
