use chrono::{Datelike, NaiveDateTime};
use std::collections::HashMap;
use tracing::{info, warn};

use super::array::{PanelArray, round_to};
use super::report::ProductionReport;
use crate::date_gen::DateTimeGenerator;
use crate::profile::ProfileSet;
use crate::readers::WeatherRecord;

/// Joins hourly weather onto efficiency profiles expanded over the year span.
pub struct ProductionAggregator<'a> {
    array: PanelArray,
    years: DateTimeGenerator,
    efficiency: HashMap<NaiveDateTime, &'a [f64]>,
}

impl<'a> ProductionAggregator<'a> {
    pub fn new(array: PanelArray, years: DateTimeGenerator, profiles: &'a ProfileSet) -> Self {
        let efficiency = years
            .generate_datetime_series(profiles)
            .into_iter()
            .map(|(timestamp, record)| (timestamp, record.efficiency_data.as_slice()))
            .collect();

        Self {
            array,
            years,
            efficiency,
        }
    }

    /// Weather hours outside the year span are ignored; hours without a
    /// profile record or without usable minutes contribute nothing.
    pub fn aggregate(&self, weather: &[WeatherRecord]) -> ProductionReport {
        let mut report = ProductionReport::new(self.years.generate_year_series().len());
        let mut matched = 0usize;
        let mut unmatched = 0usize;
        let mut outside_span = 0usize;

        for record in weather {
            let year = record.timestamp.year();
            if !self.years.contains_year(year) {
                outside_span += 1;
                continue;
            }
            report.ensure_year(year);

            match self.efficiency.get(&record.timestamp) {
                Some(data) if !data.is_empty() => {
                    let kwh = self.array.hourly_production(record, data);
                    report.add(year, record.timestamp.month(), round_to(kwh, 3));
                    matched += 1;
                }
                _ => unmatched += 1,
            }
        }

        info!(matched, unmatched, outside_span, "weather joined to profiles");
        if matched == 0 && !weather.is_empty() {
            warn!("no weather hour matched an efficiency profile");
        }

        report
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::date_gen::YearKind;
    use crate::profile::{HourRecord, PanelSeason, YearProfile};
    use chrono::NaiveDate;

    fn record(month: u32, day: u32, hour: u32, efficiency_data: Vec<f64>) -> HourRecord {
        HourRecord {
            month,
            day,
            hour,
            season: PanelSeason::Winter,
            efficiency_data,
        }
    }

    fn weather(y: i32, m: u32, d: u32, h: u32, temperature_f: f64, cloud_cover: f64) -> WeatherRecord {
        WeatherRecord {
            timestamp: NaiveDate::from_ymd_opt(y, m, d)
                .unwrap()
                .and_hms_opt(h, 0, 0)
                .unwrap(),
            temperature_f,
            cloud_cover,
        }
    }

    fn profiles() -> ProfileSet {
        ProfileSet {
            regular: YearProfile {
                kind: YearKind::Regular,
                records: vec![
                    record(6, 1, 12, vec![0.5]),
                    record(6, 1, 13, vec![]),
                    record(7, 4, 12, vec![0.9; 60]),
                ],
            },
            leap: YearProfile {
                kind: YearKind::Leap,
                records: vec![record(2, 29, 12, vec![0.5, 0.5])],
            },
        }
    }

    #[test]
    fn test_single_hot_cloudy_hour() {
        let profiles = profiles();
        let aggregator = ProductionAggregator::new(
            PanelArray::default(),
            DateTimeGenerator::from_years(2010, 2023),
            &profiles,
        );

        let report = aggregator.aggregate(&[weather(2015, 6, 1, 12, 86.0, 50.0)]);

        let expected = round_to(round_to(610.0 * 90.0 * 0.5 * 0.85 * 0.5 / 1000.0, 3) / 60.0, 3);
        let june = report.monthly_production(2015).unwrap()[5];
        assert!((june - expected).abs() < 1e-9, "{june}");
        assert!((june - 0.194).abs() < 1e-9, "{june}");
    }

    #[test]
    fn test_missing_data_is_skipped() {
        let profiles = profiles();
        let aggregator = ProductionAggregator::new(
            PanelArray::default(),
            DateTimeGenerator::from_years(2010, 2023),
            &profiles,
        );

        let report = aggregator.aggregate(&[
            // empty efficiency sequence
            weather(2015, 6, 1, 13, 60.0, 0.0),
            // no profile record for this hour
            weather(2015, 6, 1, 3, 60.0, 0.0),
            // outside the configured span
            weather(2024, 7, 4, 12, 60.0, 0.0),
        ]);

        assert_eq!(report.years().collect::<Vec<_>>(), vec![2015]);
        assert_eq!(report.monthly_production(2015).unwrap(), &[0.0; 12]);
    }

    #[test]
    fn test_leap_years_use_leap_profile() {
        let profiles = profiles();
        let aggregator = ProductionAggregator::new(
            PanelArray::default(),
            DateTimeGenerator::from_years(2010, 2023),
            &profiles,
        );

        let report = aggregator.aggregate(&[
            weather(2012, 2, 29, 12, 50.0, 0.0),
            // 2012 has no July 4th record in the leap profile
            weather(2012, 7, 4, 12, 50.0, 0.0),
            weather(2013, 7, 4, 12, 50.0, 0.0),
        ]);

        let leap = report.monthly_production(2012).unwrap();
        assert!((leap[1] - round_to(2.0 * 27.45 / 60.0, 3)).abs() < 1e-9, "{}", leap[1]);
        assert_eq!(leap[6], 0.0);

        let regular = report.monthly_production(2013).unwrap();
        assert!((regular[6] - 49.41).abs() < 1e-9, "{}", regular[6]);
    }

    #[test]
    fn test_monthly_average_uses_span_length() {
        let profiles = profiles();
        let aggregator = ProductionAggregator::new(
            PanelArray::default(),
            DateTimeGenerator::from_years(2013, 2014),
            &profiles,
        );

        let report = aggregator.aggregate(&[weather(2013, 7, 4, 12, 50.0, 0.0)]);
        assert!((report.monthly_averages()[6] - 49.41 / 2.0).abs() < 1e-9);
    }
}
