use serde::{Deserialize, Serialize};

/// Fixed observation site, in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub latitude: f64,
    pub longitude: f64,
}

impl GeoPoint {
    pub fn new(latitude: f64, longitude: f64) -> Result<Self, String> {
        if !(-90.0..=90.0).contains(&latitude) {
            return Err(format!("Latitude must be between -90 and 90, got {latitude}"));
        }

        if !(-180.0..=180.0).contains(&longitude) {
            return Err(format!(
                "Longitude must be between -180 and 180, got {longitude}"
            ));
        }

        Ok(GeoPoint {
            latitude,
            longitude,
        })
    }
}
