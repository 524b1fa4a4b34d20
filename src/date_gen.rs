use crate::config::Config;
use crate::profile::{HourRecord, ProfileSet};
use chrono::NaiveDate;
use chrono::NaiveDateTime;
use serde::Serialize;

const REGULAR_MONTH_LENGTHS: [u32; 12] = [31, 28, 31, 30, 31, 30, 31, 31, 30, 31, 30, 31];
const LEAP_MONTH_LENGTHS: [u32; 12] = [31, 29, 31, 30, 31, 30, 31, 31, 30, 31, 30, 31];

/// Calendar variant an efficiency profile is computed for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum YearKind {
    Regular,
    Leap,
}

impl YearKind {
    /// Every year divisible by four gets the leap profile.
    pub fn for_year(year: i32) -> Self {
        if year.rem_euclid(4) == 0 {
            YearKind::Leap
        } else {
            YearKind::Regular
        }
    }

    pub fn days(self) -> u32 {
        match self {
            YearKind::Regular => 365,
            YearKind::Leap => 366,
        }
    }

    pub fn month_lengths(self) -> &'static [u32; 12] {
        match self {
            YearKind::Regular => &REGULAR_MONTH_LENGTHS,
            YearKind::Leap => &LEAP_MONTH_LENGTHS,
        }
    }

    /// Maps a 0-based day of the year to `(month, day_of_month)`, both 1-based.
    pub fn month_day(self, day: u32) -> Option<(u32, u32)> {
        let mut remaining = day;
        for (month_idx, &length) in self.month_lengths().iter().enumerate() {
            if remaining < length {
                return Some((month_idx as u32 + 1, remaining + 1));
            }
            remaining -= length;
        }
        None
    }

    /// `(day_of_year, month, day_of_month)` for every day, in order.
    pub fn calendar(self) -> impl Iterator<Item = (u32, u32, u32)> {
        (0..self.days())
            .filter_map(move |day| self.month_day(day).map(|(month, dom)| (day, month, dom)))
    }
}

/// Expands year profiles over the analysis span.
pub struct DateTimeGenerator {
    start_year: i32,
    end_year: i32,
}

impl DateTimeGenerator {
    pub fn new(config: &Config) -> Self {
        Self::from_years(config.start_year(), config.end_year())
    }

    pub fn from_years(start_year: i32, end_year: i32) -> Self {
        Self {
            start_year,
            end_year,
        }
    }

    pub fn generate_year_series(&self) -> Vec<i32> {
        (self.start_year..=self.end_year).collect()
    }

    pub fn contains_year(&self, year: i32) -> bool {
        (self.start_year..=self.end_year).contains(&year)
    }

    /// Timestamps `year-month-day hour:00:00` of every profile record, paired
    /// with the record. Dates chrono rejects are dropped.
    pub fn generate_datetime_series<'a>(
        &self,
        profiles: &'a ProfileSet,
    ) -> Vec<(NaiveDateTime, &'a HourRecord)> {
        let mut series = Vec::new();

        for year in self.generate_year_series() {
            let profile = profiles.for_kind(YearKind::for_year(year));
            for record in &profile.records {
                if let Some(timestamp) = hour_timestamp(year, record) {
                    series.push((timestamp, record));
                }
            }
        }

        series
    }
}

fn hour_timestamp(year: i32, record: &HourRecord) -> Option<NaiveDateTime> {
    NaiveDate::from_ymd_opt(year, record.month, record.day)?.and_hms_opt(record.hour, 0, 0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::profile::{PanelSeason, YearProfile};
    use chrono::{Datelike, Timelike};

    fn record(month: u32, day: u32, hour: u32) -> HourRecord {
        HourRecord {
            month,
            day,
            hour,
            season: PanelSeason::Winter,
            efficiency_data: vec![0.5],
        }
    }

    #[test]
    fn test_year_kind_for_year() {
        assert_eq!(YearKind::for_year(2012), YearKind::Leap);
        assert_eq!(YearKind::for_year(2013), YearKind::Regular);
        assert_eq!(YearKind::for_year(2000), YearKind::Leap);
        assert_eq!(YearKind::Regular.days(), 365);
        assert_eq!(YearKind::Leap.days(), 366);
    }

    #[test]
    fn test_month_lengths_sum_to_days() {
        for kind in [YearKind::Regular, YearKind::Leap] {
            assert_eq!(kind.month_lengths().iter().sum::<u32>(), kind.days());
        }
    }

    #[test]
    fn test_month_day_regular_boundaries() {
        let kind = YearKind::Regular;
        assert_eq!(kind.month_day(0), Some((1, 1)));
        assert_eq!(kind.month_day(30), Some((1, 31)));
        assert_eq!(kind.month_day(31), Some((2, 1)));
        assert_eq!(kind.month_day(58), Some((2, 28)));
        assert_eq!(kind.month_day(59), Some((3, 1)));
        assert_eq!(kind.month_day(333), Some((11, 30)));
        assert_eq!(kind.month_day(334), Some((12, 1)));
        assert_eq!(kind.month_day(364), Some((12, 31)));
        assert_eq!(kind.month_day(365), None);
    }

    #[test]
    fn test_month_day_leap_boundaries() {
        let kind = YearKind::Leap;
        assert_eq!(kind.month_day(58), Some((2, 28)));
        assert_eq!(kind.month_day(59), Some((2, 29)));
        assert_eq!(kind.month_day(60), Some((3, 1)));
        assert_eq!(kind.month_day(181), Some((6, 30)));
        assert_eq!(kind.month_day(182), Some((7, 1)));
        assert_eq!(kind.month_day(365), Some((12, 31)));
        assert_eq!(kind.month_day(366), None);
    }

    #[test]
    fn test_month_day_matches_chrono() {
        for (kind, year) in [(YearKind::Regular, 2023), (YearKind::Leap, 2024)] {
            for day in 0..kind.days() {
                let date = NaiveDate::from_yo_opt(year, day + 1).unwrap();
                assert_eq!(kind.month_day(day), Some((date.month(), date.day())));
            }
        }
    }

    #[test]
    fn test_generate_datetime_series() {
        let profiles = ProfileSet {
            regular: YearProfile {
                kind: YearKind::Regular,
                records: vec![record(1, 1, 5), record(12, 31, 21)],
            },
            leap: YearProfile {
                kind: YearKind::Leap,
                records: vec![record(2, 29, 12)],
            },
        };

        let generator = DateTimeGenerator::from_years(2011, 2013);
        let series = generator.generate_datetime_series(&profiles);

        // 2011 and 2013 use the regular profile, 2012 the leap one
        assert_eq!(series.len(), 5);
        assert_eq!(series[0].0.year(), 2011);
        assert_eq!(series[0].0.hour(), 5);
        assert_eq!(
            series[2].0.date(),
            NaiveDate::from_ymd_opt(2012, 2, 29).unwrap()
        );
        assert_eq!(series[4].0.hour(), 21);
    }

    #[test]
    fn test_generate_datetime_series_skips_invalid_dates() {
        let profiles = ProfileSet {
            regular: YearProfile {
                kind: YearKind::Regular,
                records: vec![],
            },
            leap: YearProfile {
                kind: YearKind::Leap,
                records: vec![record(2, 29, 12)],
            },
        };

        // 2100 is divisible by four but has no February 29th
        let generator = DateTimeGenerator::from_years(2100, 2100);
        assert!(generator.generate_datetime_series(&profiles).is_empty());
    }
}
