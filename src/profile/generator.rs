use tracing::{debug, info};

use super::daylight::{ClockTime, DaylightWindow};
use super::types::{HourRecord, PanelSeason, ProfileSet, SeasonalNormals, YearProfile};
use crate::config::Config;
use crate::date_gen::YearKind;
use crate::geo::GeoPoint;
use crate::solar::{SolarAngles, SolarError, efficiency_coefficient, solar_vector};

/// Clock hours sampled each day, inclusive.
pub const FIRST_HOUR: u32 = 5;
pub const LAST_HOUR: u32 = 21;
pub const HOURS_PER_DAY: usize = (LAST_HOUR - FIRST_HOUR + 1) as usize;

/// Sun positions use the 365-day divisor for both calendar variants; the leap
/// variant only differs in its calendar.
const GEOMETRY_YEAR: YearKind = YearKind::Regular;

/// Usable sun positions of one clock hour.
struct HourSamples {
    hour: u32,
    angles: Vec<SolarAngles>,
}

struct DaySamples {
    month: u32,
    day: u32,
    hours: Vec<HourSamples>,
    window: DaylightWindow,
}

#[derive(Debug, Clone)]
pub struct ProfileGenerator {
    site: GeoPoint,
    tz_offset_hours: f64,
    normals: SeasonalNormals,
}

impl ProfileGenerator {
    pub fn new(site: GeoPoint, tz_offset_hours: f64, normals: SeasonalNormals) -> Self {
        Self {
            site,
            tz_offset_hours,
            normals,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(
            config.site(),
            config.tz_offset_hours(),
            SeasonalNormals::from_tilts(config.winter_tilt_deg(), config.summer_tilt_deg()),
        )
    }

    /// Regular and leap profiles, computed side by side.
    pub fn generate_all(&self) -> Result<ProfileSet, SolarError> {
        let (regular, leap) = rayon::join(
            || self.generate(YearKind::Regular),
            || self.generate(YearKind::Leap),
        );

        Ok(ProfileSet {
            regular: regular?,
            leap: leap?,
        })
    }

    /// Hour records for every day of one calendar variant.
    ///
    /// The panel season is folded over the days in order, starting in winter.
    /// A day whose daylight window triggers a toggle already uses the new
    /// season for its own records. `kind` selects the calendar only, see
    /// `GEOMETRY_YEAR`.
    pub fn generate(&self, kind: YearKind) -> Result<YearProfile, SolarError> {
        let capacity = kind.days() as usize * HOURS_PER_DAY;

        let (_, toggles, records) = kind.calendar().try_fold(
            (PanelSeason::Winter, 0usize, Vec::with_capacity(capacity)),
            |(season, toggles, mut records), (day_of_year, month, day)| {
                let samples = self.sample_day(day_of_year, month, day)?;
                let next = season.next(&samples.window);

                let toggles = if next != season {
                    debug!(
                        ?kind,
                        month,
                        day,
                        season = ?next,
                        "panel season toggled"
                    );
                    toggles + 1
                } else {
                    toggles
                };

                records.extend(self.day_records(samples, next)?);
                Ok::<_, SolarError>((next, toggles, records))
            },
        )?;

        info!(
            ?kind,
            days = kind.days(),
            records = records.len(),
            toggles,
            "efficiency profile generated"
        );

        Ok(YearProfile { kind, records })
    }

    fn sample_day(
        &self,
        day_of_year: u32,
        month: u32,
        day: u32,
    ) -> Result<DaySamples, SolarError> {
        let mut window = DaylightWindow::new();
        let mut hours = Vec::with_capacity(HOURS_PER_DAY);

        for hour in FIRST_HOUR..=LAST_HOUR {
            let mut angles = Vec::new();

            for minute in 0..60 {
                let sun = SolarAngles::calculate(
                    &self.site,
                    day_of_year,
                    hour * 60 + minute,
                    self.tz_offset_hours,
                    GEOMETRY_YEAR,
                )?;
                let usable = sun.is_usable();
                window.observe(ClockTime::new(hour, minute), usable);
                if usable {
                    angles.push(sun);
                }
            }

            hours.push(HourSamples { hour, angles });
        }

        Ok(DaySamples {
            month,
            day,
            hours,
            window,
        })
    }

    fn day_records(
        &self,
        samples: DaySamples,
        season: PanelSeason,
    ) -> Result<Vec<HourRecord>, SolarError> {
        let normal = self.normals.for_season(season);

        samples
            .hours
            .into_iter()
            .map(|hour| {
                let efficiency_data = hour
                    .angles
                    .iter()
                    .map(|sun| efficiency_coefficient(normal, &solar_vector(sun.elevation, sun.azimuth)))
                    .collect::<Result<Vec<f64>, SolarError>>()?;

                Ok(HourRecord {
                    month: samples.month,
                    day: samples.day,
                    hour: hour.hour,
                    season,
                    efficiency_data,
                })
            })
            .collect()
    }
}
