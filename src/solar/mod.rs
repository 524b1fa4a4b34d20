pub mod angles;
pub mod error;
pub mod vector;

pub use angles::{
    SolarAngles, corrected_local_solar_time, declination_angle, deg, rad, solar_azimuth_angle,
    solar_elevation_angle, solar_hour_angle,
};
pub use error::SolarError;
pub use vector::{PanelNormal, Vector3, efficiency_coefficient, solar_vector};
