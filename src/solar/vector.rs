use serde::{Deserialize, Serialize};
use std::fmt;

use super::angles::{deg, rad};
use super::error::SolarError;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Vector3 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Vector3 {
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    pub fn dot(&self, other: &Vector3) -> f64 {
        self.x * other.x + self.y * other.y + self.z * other.z
    }

    pub fn norm(&self) -> f64 {
        self.dot(self).sqrt()
    }
}

impl fmt::Display for Vector3 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:.6}, {:.6}, {:.6})", self.x, self.y, self.z)
    }
}

/// Outward normal of a fixed, south-facing panel.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PanelNormal(Vector3);

impl PanelNormal {
    /// Normal of a panel tilted `tilt_deg` degrees up from vertical towards
    /// the sky, i.e. `(0, -cos(tilt), sin(tilt))`.
    pub fn from_tilt(tilt_deg: f64) -> Self {
        let tilt = rad(tilt_deg);
        PanelNormal(Vector3::new(0.0, -tilt.cos(), tilt.sin()))
    }

    pub fn vector(&self) -> &Vector3 {
        &self.0
    }
}

/// Reverse solar vector `(x, y, z)` from elevation and azimuth (radians).
///
/// NOTE: `c` and `d` are both `cos(azimuth)`, so the azimuth cancels out of
/// the result unless it is ±90°. Switching `d` to `sin(azimuth)` changes every
/// generated profile.
pub fn solar_vector(elevation: f64, azimuth: f64) -> Vector3 {
    let a = elevation.cos();
    let b = elevation.sin();
    let c = azimuth.cos();
    let d = azimuth.cos();

    let ratio = (b.powi(2) * c.powi(2)) / (d.powi(2) + b.powi(2) * c.powi(2));

    Vector3 {
        x: ratio.sqrt(),
        y: -a * (1.0 - ratio).sqrt(),
        z: b * (1.0 - ratio).sqrt(),
    }
}

/// Efficiency coefficient in [0, 0.90] from the angle between the panel
/// normal and the sun: `(90 - angle) / 100`.
pub fn efficiency_coefficient(
    panel_normal: &PanelNormal,
    solar_vector: &Vector3,
) -> Result<f64, SolarError> {
    let normal = panel_normal.vector();
    let cos_angle = normal.dot(solar_vector) / (normal.norm() * solar_vector.norm());
    let angle_deg = deg(cos_angle.clamp(-1.0, 1.0).acos());

    if !(0.0..=90.0).contains(&angle_deg) {
        return Err(SolarError::EfficiencyAngle {
            angle_deg,
            solar_vector: *solar_vector,
        });
    }

    Ok((90.0 - angle_deg.abs()) / 100.0)
}
