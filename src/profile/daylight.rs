use super::types::PanelSeason;

/// Daylight length, in hours, that flips the panel season.
const TOGGLE_HOURS: i32 = 12;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ClockTime {
    pub hour: u32,
    pub minute: u32,
}

impl ClockTime {
    pub fn new(hour: u32, minute: u32) -> Self {
        Self { hour, minute }
    }
}

/// First and last usable minute of a day.
///
/// Both bounds stay at 00:00 until a usable minute is observed; the end is
/// only tracked once the window has started.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DaylightWindow {
    start: ClockTime,
    end: ClockTime,
    started: bool,
}

impl DaylightWindow {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_bounds(start: ClockTime, end: ClockTime) -> Self {
        Self {
            start,
            end,
            started: true,
        }
    }

    pub fn observe(&mut self, time: ClockTime, usable: bool) {
        if !usable {
            return;
        }
        if !self.started {
            self.start = time;
            self.started = true;
        }
        self.end = time;
    }

    pub fn start(&self) -> ClockTime {
        self.start
    }

    pub fn end(&self) -> ClockTime {
        self.end
    }

    pub fn has_started(&self) -> bool {
        self.started
    }

    /// `(hours, minutes)` from the start up to 12:00, plus the end clock time.
    ///
    /// Minutes carry into hours only when they exceed 60.
    pub fn duration(&self) -> (i32, i32) {
        let start_hour = self.start.hour as i32;
        let start_minute = self.start.minute as i32;

        let (mut hours, mut minutes) = if start_minute > 0 {
            (11 - start_hour, 60 - start_minute)
        } else {
            (12 - start_hour, 0)
        };

        minutes += self.end.minute as i32;
        hours += self.end.hour as i32;

        if minutes > 60 {
            hours += 1;
            minutes -= 60;
        }

        (hours, minutes)
    }

    pub fn toggles_season(&self) -> bool {
        self.duration().0 == TOGGLE_HOURS
    }
}

impl PanelSeason {
    /// Season in effect for the day whose daylight window is `window`.
    pub fn next(self, window: &DaylightWindow) -> Self {
        if window.toggles_season() {
            self.toggled()
        } else {
            self
        }
    }
}
