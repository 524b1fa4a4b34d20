use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

pub trait WeatherReader {
    fn read_records(&self) -> Result<Vec<WeatherRecord>, ReadError>;
}

#[derive(Debug, Error)]
pub enum ReadError {
    #[error("Failed to open weather file: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to parse weather JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Invalid timestamp: {0}")]
    Timestamp(String),
    #[error(
        "Hourly columns differ in length: time={time}, temperature={temperature}, cloud_cover={cloud_cover}"
    )]
    ColumnLength {
        time: usize,
        temperature: usize,
        cloud_cover: usize,
    },
    #[error("Unknown weather file type: {}", .0.display())]
    UnknownFileType(PathBuf),
}

pub enum FileType {
    OpenMeteoJson,
}

/// One hour of observed weather at naive local time.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WeatherRecord {
    pub timestamp: NaiveDateTime,
    pub temperature_f: f64,
    pub cloud_cover: f64,
}

impl fmt::Display for WeatherRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: {:.1}°F, {:.0}% cloud cover",
            self.timestamp.format("%Y-%m-%d %H:%M"),
            self.temperature_f,
            self.cloud_cover
        )
    }
}
