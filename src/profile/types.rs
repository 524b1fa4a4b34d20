use serde::Serialize;

use crate::date_gen::YearKind;
use crate::solar::PanelNormal;

/// Which of the two panel orientations is in use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PanelSeason {
    Winter,
    Summer,
}

impl PanelSeason {
    pub fn toggled(self) -> Self {
        match self {
            PanelSeason::Winter => PanelSeason::Summer,
            PanelSeason::Summer => PanelSeason::Winter,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SeasonalNormals {
    pub winter: PanelNormal,
    pub summer: PanelNormal,
}

impl SeasonalNormals {
    pub fn new(winter: PanelNormal, summer: PanelNormal) -> Self {
        Self { winter, summer }
    }

    pub fn from_tilts(winter_tilt_deg: f64, summer_tilt_deg: f64) -> Self {
        Self::new(
            PanelNormal::from_tilt(winter_tilt_deg),
            PanelNormal::from_tilt(summer_tilt_deg),
        )
    }

    pub fn for_season(&self, season: PanelSeason) -> &PanelNormal {
        match season {
            PanelSeason::Winter => &self.winter,
            PanelSeason::Summer => &self.summer,
        }
    }
}

/// Per-minute efficiency coefficients of one clock hour of one day.
///
/// `efficiency_data` holds one value in [0, 0.90] per usable minute and is
/// empty when the sun never entered the usable window during the hour.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HourRecord {
    pub month: u32,
    pub day: u32,
    pub hour: u32,
    pub season: PanelSeason,
    pub efficiency_data: Vec<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct YearProfile {
    pub kind: YearKind,
    pub records: Vec<HourRecord>,
}

impl YearProfile {
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// The regular and leap year profiles of one site.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProfileSet {
    pub regular: YearProfile,
    pub leap: YearProfile,
}

impl ProfileSet {
    pub fn for_kind(&self, kind: YearKind) -> &YearProfile {
        match kind {
            YearKind::Regular => &self.regular,
            YearKind::Leap => &self.leap,
        }
    }
}
