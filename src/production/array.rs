use serde::Serialize;

use crate::readers::WeatherRecord;

/// Cell temperature above which output derates.
const DERATING_THRESHOLD_C: f64 = 25.0;
/// Output lost per °C above the threshold.
const DERATING_PER_DEGREE: f64 = 0.03;

/// A field of identical panels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PanelArray {
    panel_watts: f64,
    panel_count: u32,
}

impl Default for PanelArray {
    fn default() -> Self {
        Self {
            panel_watts: 610.0,
            panel_count: 90,
        }
    }
}

impl PanelArray {
    pub fn new(panel_watts: f64, panel_count: u32) -> Result<Self, String> {
        if !(panel_watts > 0.0 && panel_watts.is_finite()) {
            return Err(format!("panel_watts must be positive, got {panel_watts}"));
        }

        if panel_count == 0 {
            return Err("panel_count must be at least 1".to_string());
        }

        Ok(Self {
            panel_watts,
            panel_count,
        })
    }

    pub fn panel_watts(&self) -> f64 {
        self.panel_watts
    }

    pub fn panel_count(&self) -> u32 {
        self.panel_count
    }

    /// kW·min produced over one minute at `coefficient`, rounded to 3 decimals.
    pub fn minute_production(&self, coefficient: f64) -> f64 {
        round_to(
            self.panel_watts * self.panel_count as f64 * coefficient / 1000.0,
            3,
        )
    }

    /// kWh produced over one hour of weather, one coefficient per usable minute.
    pub fn hourly_production(&self, weather: &WeatherRecord, efficiency_data: &[f64]) -> f64 {
        let temp_drop = temperature_derating(weather.temperature_f);
        let clear_sky = 1.0 - weather.cloud_cover / 100.0;

        let kw_minutes: f64 = efficiency_data
            .iter()
            .map(|e| self.minute_production(e * temp_drop * clear_sky))
            .sum();

        kw_minutes / 60.0
    }
}

pub fn fahrenheit_to_celsius(temperature_f: f64) -> f64 {
    (temperature_f - 32.0) / 1.8
}

/// Linear output factor: 1 up to 25 °C, minus 3% per degree above.
pub fn temperature_derating(temperature_f: f64) -> f64 {
    let temperature_c = fahrenheit_to_celsius(temperature_f);
    if temperature_c <= DERATING_THRESHOLD_C {
        1.0
    } else {
        1.0 - (temperature_c - DERATING_THRESHOLD_C) * DERATING_PER_DEGREE
    }
}

pub(crate) fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}
