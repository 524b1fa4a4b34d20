use super::{ReadError, WeatherReader, WeatherRecord};
use chrono::{DateTime, NaiveDateTime};
use serde::Deserialize;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::PathBuf;
use tracing::{debug, info};

/// Reads a cached Open-Meteo archive response (`hourly` block with
/// `temperature_2m` in °F and `cloud_cover` in %).
pub struct OpenMeteoReader {
    pub file_name: PathBuf,
}

#[derive(Debug, Deserialize)]
struct ArchiveResponse {
    #[serde(default)]
    utc_offset_seconds: i64,
    hourly: HourlyBlock,
}

#[derive(Debug, Deserialize)]
struct HourlyBlock {
    time: Vec<TimeValue>,
    temperature_2m: Vec<Option<f64>>,
    #[serde(alias = "cloudcover")]
    cloud_cover: Vec<Option<f64>>,
}

// `timeformat=iso8601` (default) or `timeformat=unixtime`
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum TimeValue {
    Unix(i64),
    Iso(String),
}

impl TimeValue {
    fn to_local(&self, utc_offset_seconds: i64) -> Result<NaiveDateTime, ReadError> {
        match self {
            TimeValue::Iso(raw) => NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M")
                .or_else(|_| NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S"))
                .map_err(|e| ReadError::Timestamp(format!("{raw}: {e}"))),
            TimeValue::Unix(seconds) => DateTime::from_timestamp(seconds + utc_offset_seconds, 0)
                .map(|dt| dt.naive_utc())
                .ok_or_else(|| ReadError::Timestamp(seconds.to_string())),
        }
    }
}

impl OpenMeteoReader {
    pub fn new<P: Into<PathBuf>>(file_name: P) -> Self {
        Self {
            file_name: file_name.into(),
        }
    }

    /// Parses an archive response. Hours with a missing temperature or cloud
    /// cover are dropped.
    pub fn parse<R: Read>(reader: R) -> Result<Vec<WeatherRecord>, ReadError> {
        let response: ArchiveResponse = serde_json::from_reader(reader)?;
        let hourly = response.hourly;

        if hourly.time.len() != hourly.temperature_2m.len()
            || hourly.time.len() != hourly.cloud_cover.len()
        {
            return Err(ReadError::ColumnLength {
                time: hourly.time.len(),
                temperature: hourly.temperature_2m.len(),
                cloud_cover: hourly.cloud_cover.len(),
            });
        }

        let total = hourly.time.len();
        let mut records = Vec::with_capacity(total);

        for ((time, temperature), cloud_cover) in hourly
            .time
            .iter()
            .zip(hourly.temperature_2m)
            .zip(hourly.cloud_cover)
        {
            let timestamp = time.to_local(response.utc_offset_seconds)?;

            let (Some(temperature_f), Some(cloud_cover)) = (temperature, cloud_cover) else {
                debug!(%timestamp, "skipping hour with missing weather values");
                continue;
            };

            records.push(WeatherRecord {
                timestamp,
                temperature_f,
                cloud_cover,
            });
        }

        info!(
            records = records.len(),
            skipped = total - records.len(),
            "weather records parsed"
        );

        Ok(records)
    }
}

impl WeatherReader for OpenMeteoReader {
    fn read_records(&self) -> Result<Vec<WeatherRecord>, ReadError> {
        let file = File::open(&self.file_name)?;
        Self::parse(BufReader::new(file))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, Timelike};
    use std::io::Write;
    use tempfile::tempdir;

    const ISO_RESPONSE: &str = r#"
    {
        "latitude": 40.0,
        "longitude": -75.0,
        "utc_offset_seconds": -18000,
        "timezone": "America/New_York",
        "hourly_units": { "time": "iso8601", "temperature_2m": "°F", "cloud_cover": "%" },
        "hourly": {
            "time": ["2010-01-01T00:00", "2010-01-01T01:00", "2010-01-01T02:00"],
            "temperature_2m": [30.5, null, 31.2],
            "cloud_cover": [100, 90, null]
        }
    }
    "#;

    #[test]
    fn test_parse_iso_skips_missing_values() {
        let records = OpenMeteoReader::parse(ISO_RESPONSE.as_bytes()).unwrap();

        assert_eq!(records.len(), 1);
        assert_eq!(
            records[0].timestamp,
            NaiveDate::from_ymd_opt(2010, 1, 1)
                .unwrap()
                .and_hms_opt(0, 0, 0)
                .unwrap()
        );
        assert_eq!(records[0].temperature_f, 30.5);
        assert_eq!(records[0].cloud_cover, 100.0);
    }

    #[test]
    fn test_parse_unix_time_shifts_to_local() {
        // 2010-01-01T05:00:00Z is midnight in UTC-5
        let response = r#"
        {
            "utc_offset_seconds": -18000,
            "hourly": {
                "time": [1262322000, 1262325600],
                "temperature_2m": [20.0, 21.0],
                "cloudcover": [0, 50]
            }
        }
        "#;

        let records = OpenMeteoReader::parse(response.as_bytes()).unwrap();

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].timestamp.hour(), 0);
        assert_eq!(records[1].timestamp.hour(), 1);
        assert_eq!(records[1].cloud_cover, 50.0);
    }

    #[test]
    fn test_parse_column_length_mismatch() {
        let response = r#"
        {
            "hourly": {
                "time": ["2010-01-01T00:00", "2010-01-01T01:00"],
                "temperature_2m": [20.0],
                "cloud_cover": [0, 50]
            }
        }
        "#;

        let err = OpenMeteoReader::parse(response.as_bytes()).unwrap_err();
        assert!(matches!(
            err,
            ReadError::ColumnLength {
                time: 2,
                temperature: 1,
                cloud_cover: 2
            }
        ));
    }

    #[test]
    fn test_parse_bad_timestamp() {
        let response = r#"
        {
            "hourly": {
                "time": ["01/01/2010 00:00"],
                "temperature_2m": [20.0],
                "cloud_cover": [0]
            }
        }
        "#;

        let err = OpenMeteoReader::parse(response.as_bytes()).unwrap_err();
        assert!(matches!(err, ReadError::Timestamp(_)));
    }

    #[test]
    fn test_read_records_from_file() {
        let dir = tempdir().unwrap();
        let file_path = dir.path().join("archive.json");
        let mut file = File::create(&file_path).unwrap();
        file.write_all(ISO_RESPONSE.as_bytes()).unwrap();

        let reader = OpenMeteoReader::new(&file_path);
        let records = reader.read_records().unwrap();
        assert_eq!(records.len(), 1);

        let missing = OpenMeteoReader::new(dir.path().join("missing.json"));
        assert!(matches!(missing.read_records(), Err(ReadError::Io(_))));
    }
}
