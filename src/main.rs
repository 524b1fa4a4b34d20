use clap::Parser;
use std::path::PathBuf;
use std::time::Instant;
use tracing::info;

use sunyield::config::Config;
use sunyield::production::BatchProcessor;
use sunyield::telemetry::init_tracing;

/// Estimates monthly solar array production from historical hourly weather.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// JSON configuration file
    #[arg(short, long, default_value = "./data/config/sunyield.json")]
    config: PathBuf,

    /// Print the report as JSON instead of text
    #[arg(long)]
    json: bool,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();
    init_tracing();

    let config = Config::from_file(&args.config)?;
    info!(config = %args.config.display(), site = ?config.site(), "starting production estimate");

    let start = Instant::now();
    let processor = BatchProcessor::new(config);
    let report = processor.process()?;
    info!(elapsed_ms = start.elapsed().as_millis() as u64, "processing finished");

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report.summary())?);
    } else {
        print!("{report}");
    }

    Ok(())
}
