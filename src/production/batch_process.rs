use std::fs::{self, File};
use std::io::BufWriter;
use tracing::info;

use super::{ProductionAggregator, ProductionError, ProductionReport};
use crate::config::Config;
use crate::date_gen::DateTimeGenerator;
use crate::profile::ProfileGenerator;
use crate::readers::create_reader;

/// Runs the full pipeline for one configuration: weather, profiles, join.
#[derive(Debug)]
pub struct BatchProcessor {
    config: Config,
}

impl BatchProcessor {
    pub fn new(config: Config) -> Self {
        BatchProcessor { config }
    }

    pub fn process(&self) -> Result<ProductionReport, ProductionError> {
        let reader = create_reader(self.config.weather_file())?;
        let weather = reader.read_records()?;

        let profiles = ProfileGenerator::from_config(&self.config).generate_all()?;

        let aggregator = ProductionAggregator::new(
            *self.config.array(),
            DateTimeGenerator::new(&self.config),
            &profiles,
        );
        let report = aggregator.aggregate(&weather);

        if let Some(path) = self.config.report_file() {
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                fs::create_dir_all(parent)?;
            }
            let writer = BufWriter::new(File::create(path)?);
            serde_json::to_writer_pretty(writer, &report.summary())?;
            info!(path = %path.display(), "report written");
        }

        Ok(report)
    }
}
