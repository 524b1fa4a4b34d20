use thiserror::Error;

use super::vector::Vector3;

/// Geometric model violations. Any of these aborts profile generation.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SolarError {
    #[error("azimuth quadrant out of bounds for hour angle {hour_angle_deg}°")]
    AzimuthQuadrant { hour_angle_deg: f64 },
    #[error("efficiency angle {angle_deg}° outside [0°, 90°] for solar vector {solar_vector}")]
    EfficiencyAngle {
        angle_deg: f64,
        solar_vector: Vector3,
    },
}
