use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("end_year cannot be earlier than start_year")]
    YearOrder,
    #[error("tz_offset_hours should be between -12 and 14, got {0}")]
    TimeZone(f64),
    #[error("panel tilt should be between 0 and 90 degrees, got {0}")]
    Tilt(f64),
    #[error("Invalid site: {0}")]
    Site(String),
    #[error("Invalid panel array: {0}")]
    Array(String),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to parse JSON: {0}")]
    Json(#[from] serde_json::Error),
}
