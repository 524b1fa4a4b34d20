use chrono::Month;
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;

use super::array::round_to;

/// Monthly production totals (kWh) per calendar year.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProductionReport {
    span_years: usize,
    yearly: BTreeMap<i32, [f64; 12]>,
}

/// Machine-readable view of a report, values rounded to 3 decimals.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReportSummary {
    pub average_monthly_production_kwh: BTreeMap<i32, f64>,
    pub monthly_average_production_kwh: BTreeMap<String, f64>,
    pub monthly_production_kwh: BTreeMap<i32, [f64; 12]>,
}

impl ProductionReport {
    /// `span_years` is the divisor of the per-month averages.
    pub fn new(span_years: usize) -> Self {
        Self {
            span_years,
            yearly: BTreeMap::new(),
        }
    }

    pub fn ensure_year(&mut self, year: i32) {
        self.yearly.entry(year).or_insert([0.0; 12]);
    }

    /// Adds `kwh` to `month` (1-12) of `year`.
    pub fn add(&mut self, year: i32, month: u32, kwh: f64) {
        let months = self.yearly.entry(year).or_insert([0.0; 12]);
        if let Some(total) = month
            .checked_sub(1)
            .and_then(|idx| months.get_mut(idx as usize))
        {
            *total += kwh;
        }
    }

    pub fn years(&self) -> impl Iterator<Item = i32> + '_ {
        self.yearly.keys().copied()
    }

    pub fn monthly_production(&self, year: i32) -> Option<&[f64; 12]> {
        self.yearly.get(&year)
    }

    pub fn average_monthly_production(&self, year: i32) -> Option<f64> {
        self.yearly
            .get(&year)
            .map(|months| months.iter().sum::<f64>() / 12.0)
    }

    /// Per calendar month, the sum over all years divided by the span length.
    pub fn monthly_averages(&self) -> [f64; 12] {
        let mut sums = [0.0; 12];
        for months in self.yearly.values() {
            for (sum, value) in sums.iter_mut().zip(months) {
                *sum += value;
            }
        }

        if self.span_years > 0 {
            for sum in sums.iter_mut() {
                *sum /= self.span_years as f64;
            }
        }

        sums
    }

    pub fn summary(&self) -> ReportSummary {
        let average_monthly_production_kwh = self
            .years()
            .filter_map(|year| {
                self.average_monthly_production(year)
                    .map(|avg| (year, round_to(avg, 3)))
            })
            .collect();

        let monthly_average_production_kwh = self
            .monthly_averages()
            .iter()
            .enumerate()
            .map(|(idx, avg)| (month_name(idx), round_to(*avg, 3)))
            .collect();

        let monthly_production_kwh = self
            .yearly
            .iter()
            .map(|(year, months)| (*year, months.map(|kwh| round_to(kwh, 3))))
            .collect();

        ReportSummary {
            average_monthly_production_kwh,
            monthly_average_production_kwh,
            monthly_production_kwh,
        }
    }
}

fn month_name(idx: usize) -> String {
    Month::try_from(idx as u8 + 1)
        .map(|month| month.name().to_string())
        .unwrap_or_else(|_| format!("Month {}", idx + 1))
}

impl fmt::Display for ProductionReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for year in self.years() {
            if let Some(avg) = self.average_monthly_production(year) {
                writeln!(
                    f,
                    "{} Average Monthly Production: {}kWh",
                    year,
                    round_to(avg, 3)
                )?;
            }
        }

        for (idx, avg) in self.monthly_averages().iter().enumerate() {
            writeln!(
                f,
                "{} Average Production: {}kWh",
                month_name(idx),
                round_to(*avg, 3)
            )?;
        }

        Ok(())
    }
}
