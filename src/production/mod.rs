pub mod aggregator;
pub mod array;
pub mod batch_process;
pub mod report;

pub use aggregator::ProductionAggregator;
pub use array::{PanelArray, fahrenheit_to_celsius, temperature_derating};
pub use batch_process::BatchProcessor;
pub use report::{ProductionReport, ReportSummary};

use thiserror::Error;

use crate::readers::ReadError;
use crate::solar::SolarError;

#[derive(Debug, Error)]
pub enum ProductionError {
    #[error(transparent)]
    Solar(#[from] SolarError),

    #[error("failed to read weather data: {0}")]
    Read(#[from] ReadError),

    #[error("failed to write report: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to serialize report: {0}")]
    Json(#[from] serde_json::Error),
}
