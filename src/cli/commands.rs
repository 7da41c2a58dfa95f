//! Command execution for the innovation statistics harvester CLI
//!
//! Sets up logging, validates the configuration path, runs the harvest, and
//! reports a summary. Errors are not caught here: they propagate to `main`,
//! which terminates the process with a non-zero status.

use crate::app::adapters::filesystem;
use crate::cli::args::Args;
use crate::registry::{self, ConfigSource};
use crate::{HarvestOutput, Result};
use colored::*;
use std::time::Instant;
use tracing::{debug, info};

/// Run the harvest described by the command-line arguments
pub fn run(args: Args) -> Result<HarvestOutput> {
    setup_logging(&args);

    info!("Starting innovation statistics harvest");
    debug!("Command line arguments: {:?}", args);

    // a bad configuration path aborts before the YAML loader touches it
    filesystem::require_readable_file(&args.config_file)?;

    let start_time = Instant::now();
    let output = registry::harvest(ConfigSource::File(args.config_file.clone()))?;

    if !args.quiet {
        report_summary(&output, start_time);
    }

    Ok(output)
}

/// Set up tracing output based on verbosity flags
fn setup_logging(args: &Args) {
    use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("innov_harvester={}", args.get_log_level())));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_target(false)
                .with_level(true)
                .with_writer(std::io::stderr)
                .compact(),
        )
        .init();
}

/// Print a human-readable summary of the completed harvest
fn report_summary(output: &HarvestOutput, start_time: Instant) {
    println!("\n{}", "Harvest Summary".bright_green().bold());
    println!("{}", "─".repeat(40));

    match output {
        HarvestOutput::Records(records) => {
            println!(
                "  Records harvested: {}",
                records.len().to_string().bright_white().bold()
            );
        }
        HarvestOutput::Frame(frame) => {
            println!(
                "  DataFrame harvested: {} rows x {} columns",
                frame.height().to_string().bright_white().bold(),
                frame.width().to_string().bright_white().bold()
            );
        }
    }

    println!("  Elapsed: {:.2?}", start_time.elapsed());
}
