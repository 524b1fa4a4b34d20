//! Solar geometry kernel
//!
//! Closed-form approximations for the sun's position seen from a fixed site.
//! Every angle leaving this module is in radians; `day` is the 0-based day of
//! the year and `time` is local clock time in minutes since midnight.
use std::f64::consts::PI;

use super::error::SolarError;
use crate::date_gen::YearKind;
use crate::geo::GeoPoint;

/// Obliquity of the ecliptic, signed for the `day + 10` winter-solstice phase.
const AXIAL_TILT_DEG: f64 = -23.44;
const ORBIT_ECCENTRICITY: f64 = 0.0167;

pub fn rad(degrees: f64) -> f64 {
    degrees * PI / 180.0
}

pub fn deg(radians: f64) -> f64 {
    radians * 180.0 / PI
}

/// Solar declination angle in radians.
///
/// # Arguments
/// * `day` - Day of the year, 0-based (0 = January 1st)
/// * `days_in_year` - 365 or 366
pub fn declination_angle(day: u32, days_in_year: u32) -> f64 {
    let year_len = days_in_year as f64;
    let day = day as f64;

    let orbit_correction =
        360.0 / PI * ORBIT_ECCENTRICITY * rad(360.0 / year_len * (day - 2.0)).sin();

    (rad(AXIAL_TILT_DEG).sin() * rad(360.0 / year_len * (day + 10.0) + orbit_correction).cos())
        .asin()
}

/// Local solar time in minutes, corrected with the equation of time and the
/// offset between the site longitude and its time zone meridian.
///
/// # Arguments
/// * `time` - Local clock time in minutes since 00:00
/// * `day` - Day of the year, 0-based
/// * `longitude` - Longitude in decimal degrees
/// * `tz_offset_hours` - Time zone offset from UTC in hours
/// * `days_in_year` - 365 or 366
pub fn corrected_local_solar_time(
    time: f64,
    day: u32,
    longitude: f64,
    tz_offset_hours: f64,
    days_in_year: u32,
) -> f64 {
    // Fractional year, already in radians
    let gamma = 2.0 * PI / days_in_year as f64 * (day as f64 - 1.0 + (time / 60.0 - 12.0) / 24.0);

    let equation_of_time = 229.18
        * (0.000075 + 0.001868 * gamma.cos()
            - 0.032077 * gamma.sin()
            - 0.014615 * (2.0 * gamma).cos()
            - 0.040849 * (2.0 * gamma).sin());

    time + equation_of_time + 4.0 * (longitude - 15.0 * tz_offset_hours)
}

/// Solar hour angle in radians, negative before solar noon.
pub fn solar_hour_angle(
    time: f64,
    day: u32,
    longitude: f64,
    tz_offset_hours: f64,
    days_in_year: u32,
) -> f64 {
    let lst = corrected_local_solar_time(time, day, longitude, tz_offset_hours, days_in_year);
    rad(lst / 4.0 - 180.0)
}

/// Solar elevation angle in radians.
///
/// # Arguments
/// * `latitude` - Latitude in decimal degrees
/// * `declination` - Solar declination in radians
/// * `hour_angle` - Solar hour angle in radians
pub fn solar_elevation_angle(latitude: f64, declination: f64, hour_angle: f64) -> f64 {
    let lat = rad(latitude);
    let sin_elevation =
        lat.sin() * declination.sin() + lat.cos() * declination.cos() * hour_angle.cos();
    sin_elevation.clamp(-1.0, 1.0).asin()
}

/// Solar azimuth angle in radians, resolved from the hour angle quadrant.
///
/// The morning/afternoon hemisphere is read off the sign of the hour angle:
/// due south at solar noon is -90°, and the usable arc of the sky maps onto
/// (-180°, 0°).
///
/// Only the hour angle is taken: latitude, declination and elevation would
/// feed an `acos` base angle that no branch below ever uses.
#[allow(clippy::float_cmp)]
pub fn solar_azimuth_angle(hour_angle: f64) -> Result<f64, SolarError> {
    let hour_angle_deg = deg(hour_angle);

    if hour_angle_deg == 0.0 {
        Ok(rad(-90.0))
    } else if hour_angle_deg == -90.0 {
        Ok(0.0)
    } else if hour_angle_deg == 90.0 {
        Ok(rad(180.0))
    } else if hour_angle_deg < -90.0
        || (hour_angle_deg > 0.0 && hour_angle_deg < 90.0)
        || (hour_angle_deg > -90.0 && hour_angle_deg < 0.0)
    {
        Ok(-hour_angle - rad(90.0))
    } else if hour_angle_deg > 90.0 {
        Ok(rad(270.0) - hour_angle)
    } else {
        Err(SolarError::AzimuthQuadrant { hour_angle_deg })
    }
}

/// Sun elevation and azimuth for one minute of one day, in radians.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SolarAngles {
    pub elevation: f64,
    pub azimuth: f64,
}

impl SolarAngles {
    /// # Arguments
    /// * `site` - Observation point
    /// * `day` - Day of the year, 0-based
    /// * `time` - Local clock time in minutes since 00:00
    /// * `tz_offset_hours` - Time zone offset from UTC in hours
    /// * `year` - Calendar variant, selects the 365/366 divisor
    pub fn calculate(
        site: &GeoPoint,
        day: u32,
        time: u32,
        tz_offset_hours: f64,
        year: YearKind,
    ) -> Result<Self, SolarError> {
        let days_in_year = year.days();
        let declination = declination_angle(day, days_in_year);
        let hour_angle = solar_hour_angle(
            time as f64,
            day,
            site.longitude,
            tz_offset_hours,
            days_in_year,
        );
        let elevation = solar_elevation_angle(site.latitude, declination, hour_angle);
        let azimuth = solar_azimuth_angle(hour_angle)?;

        Ok(SolarAngles { elevation, azimuth })
    }

    pub fn elevation_deg(&self) -> f64 {
        deg(self.elevation)
    }

    pub fn azimuth_deg(&self) -> f64 {
        deg(self.azimuth)
    }

    /// Sun above the horizon and inside the (-180°, 0°) azimuth arc.
    pub fn is_usable(&self) -> bool {
        let azimuth = self.azimuth_deg();
        self.elevation_deg() >= 0.0 && azimuth < 0.0 && azimuth > -180.0
    }
}
