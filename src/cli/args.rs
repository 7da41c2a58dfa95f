//! Command-line argument definitions for the innovation statistics harvester
//!
//! One positional argument names the YAML configuration file driving the
//! harvest; verbosity flags control log output.

use clap::Parser;
use std::path::PathBuf;

/// CLI arguments for the innovation statistics harvester
///
/// Harvests observation-minus-forecast innovation statistics (bias, count,
/// RMSD) from NetCDF files into flat records or a DataFrame.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "innov-harvester",
    version,
    about = "Harvest innovation statistics from NetCDF files into tabular records",
    long_about = "Reads observation-minus-forecast innovation statistics (bias, count, RMSD) \
                  for temperature, specific humidity, and UV wind from NetCDF files organized \
                  by geographic region and vertical level, and flattens them into a uniform \
                  tabular record format for downstream statistical analysis."
)]
pub struct Args {
    /// Configuration YAML file driving the harvest
    ///
    /// Must name a registered harvester and the file naming metadata for
    /// every requested metric. Validated before the harvest runs.
    #[arg(value_name = "CONFIG_FILE", help = "YAML configuration file for driving the harvest")]
    pub config_file: PathBuf,

    /// Logging verbosity level
    #[arg(
        short = 'v',
        long = "verbose",
        action = clap::ArgAction::Count,
        help = "Increase logging verbosity (-v: info, -vv: debug, -vvv: trace)"
    )]
    pub verbose: u8,

    /// Suppress output (quiet mode)
    ///
    /// Only show errors. Overrides verbose settings.
    #[arg(
        short = 'q',
        long = "quiet",
        help = "Suppress output except errors",
        conflicts_with = "verbose"
    )]
    pub quiet: bool,
}

impl Args {
    /// Determine the appropriate log level based on verbosity flags
    pub fn get_log_level(&self) -> &'static str {
        if self.quiet {
            "error"
        } else {
            match self.verbose {
                0 => "warn",
                1 => "info",
                2 => "debug",
                _ => "trace",
            }
        }
    }
}
