use serde::Deserialize;
use serde::Deserializer;
use serde::de::Error;

use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use crate::geo::GeoPoint;
use crate::production::PanelArray;

pub mod error;
pub use error::ConfigError;

const DEFAULT_TZ_OFFSET_HOURS: f64 = -5.0;
const DEFAULT_TILT_DEG: f64 = 45.0;
const DEFAULT_START_YEAR: i32 = 2010;
const DEFAULT_END_YEAR: i32 = 2023;

fn default_tz_offset() -> f64 {
    DEFAULT_TZ_OFFSET_HOURS
}

fn default_tilt() -> f64 {
    DEFAULT_TILT_DEG
}

fn default_start_year() -> i32 {
    DEFAULT_START_YEAR
}

fn default_end_year() -> i32 {
    DEFAULT_END_YEAR
}

#[derive(Debug, Clone)]
pub struct Config {
    site: GeoPoint,
    tz_offset_hours: f64,
    winter_tilt_deg: f64,
    summer_tilt_deg: f64,
    array: PanelArray,
    start_year: i32,
    end_year: i32,
    weather_file: PathBuf,
    report_file: Option<PathBuf>,
}

// Deserializes a Config through a helper struct, then checks the site, the
// time zone, the panel tilts, the array and the year span before building it.
impl<'de> Deserialize<'de> for Config {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        struct ConfigHelper {
            site: SiteHelper,
            #[serde(default = "default_tz_offset")]
            tz_offset_hours: f64,
            #[serde(default)]
            panels: PanelsHelper,
            #[serde(default)]
            array: Option<ArrayHelper>,
            #[serde(default = "default_start_year")]
            start_year: i32,
            #[serde(default = "default_end_year")]
            end_year: i32,
            weather_file: PathBuf,
            report_file: Option<PathBuf>,
        }

        #[derive(Deserialize)]
        struct SiteHelper {
            latitude: f64,
            longitude: f64,
        }

        #[derive(Deserialize)]
        struct PanelsHelper {
            #[serde(default = "default_tilt")]
            winter_tilt_deg: f64,
            #[serde(default = "default_tilt")]
            summer_tilt_deg: f64,
        }

        impl Default for PanelsHelper {
            fn default() -> Self {
                Self {
                    winter_tilt_deg: DEFAULT_TILT_DEG,
                    summer_tilt_deg: DEFAULT_TILT_DEG,
                }
            }
        }

        #[derive(Deserialize)]
        struct ArrayHelper {
            panel_watts: f64,
            panel_count: u32,
        }

        let helper = ConfigHelper::deserialize(deserializer)?;

        let site = GeoPoint::new(helper.site.latitude, helper.site.longitude)
            .map_err(|e| D::Error::custom(ConfigError::Site(e)))?;

        if !(-12.0..=14.0).contains(&helper.tz_offset_hours) {
            return Err(D::Error::custom(ConfigError::TimeZone(
                helper.tz_offset_hours,
            )));
        }

        for tilt in [helper.panels.winter_tilt_deg, helper.panels.summer_tilt_deg] {
            if !(0.0..=90.0).contains(&tilt) {
                return Err(D::Error::custom(ConfigError::Tilt(tilt)));
            }
        }

        let array = match helper.array {
            Some(array) => PanelArray::new(array.panel_watts, array.panel_count)
                .map_err(|e| D::Error::custom(ConfigError::Array(e)))?,
            None => PanelArray::default(),
        };

        if helper.start_year > helper.end_year {
            return Err(D::Error::custom(ConfigError::YearOrder));
        }

        Ok(Config {
            site,
            tz_offset_hours: helper.tz_offset_hours,
            winter_tilt_deg: helper.panels.winter_tilt_deg,
            summer_tilt_deg: helper.panels.summer_tilt_deg,
            array,
            start_year: helper.start_year,
            end_year: helper.end_year,
            weather_file: helper.weather_file,
            report_file: helper.report_file,
        })
    }
}

impl Config {
    /// Configuration with the default time zone, tilts, array and year span.
    pub fn new<P: Into<PathBuf>>(site: GeoPoint, weather_file: P) -> Self {
        Self {
            site,
            tz_offset_hours: DEFAULT_TZ_OFFSET_HOURS,
            winter_tilt_deg: DEFAULT_TILT_DEG,
            summer_tilt_deg: DEFAULT_TILT_DEG,
            array: PanelArray::default(),
            start_year: DEFAULT_START_YEAR,
            end_year: DEFAULT_END_YEAR,
            weather_file: weather_file.into(),
            report_file: None,
        }
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Config, ConfigError> {
        let file = File::open(path)?;
        let reader = BufReader::new(file);

        let config: Config = serde_json::from_reader(reader)?;

        Ok(config)
    }

    pub fn site(&self) -> GeoPoint {
        self.site
    }

    pub fn tz_offset_hours(&self) -> f64 {
        self.tz_offset_hours
    }

    pub fn winter_tilt_deg(&self) -> f64 {
        self.winter_tilt_deg
    }

    pub fn summer_tilt_deg(&self) -> f64 {
        self.summer_tilt_deg
    }

    pub fn array(&self) -> &PanelArray {
        &self.array
    }

    pub fn start_year(&self) -> i32 {
        self.start_year
    }

    pub fn end_year(&self) -> i32 {
        self.end_year
    }

    pub fn weather_file(&self) -> &Path {
        &self.weather_file
    }

    pub fn report_file(&self) -> Option<&Path> {
        self.report_file.as_deref()
    }
}
