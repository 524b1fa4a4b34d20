pub mod daylight;
pub mod generator;
pub mod types;

// Re-export the main structures for convenience
pub use daylight::{ClockTime, DaylightWindow};
pub use generator::{FIRST_HOUR, HOURS_PER_DAY, LAST_HOUR, ProfileGenerator};
pub use types::{HourRecord, PanelSeason, ProfileSet, SeasonalNormals, YearProfile};
