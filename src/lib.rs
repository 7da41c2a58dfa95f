//! Innovation Statistics Harvester Library
//!
//! A Rust library for harvesting observation-minus-forecast innovation
//! statistics (bias, count, RMSD) from NetCDF files into a uniform tabular
//! record format for downstream statistical analysis.
//!
//! This library provides tools for:
//! - Dispatching harvester kinds through a static registry keyed by name
//! - Validating raw harvest configurations into typed, immutable configs
//! - Resolving metric file locations from templated date/time patterns
//! - Extracting per-level statistics for every metric/region/stat combination
//! - Reshaping the flat record sequence into a polars DataFrame on request

pub mod config;
pub mod constants;
pub mod registry;

// Core application modules
pub mod app {
    pub mod models;
    pub mod services {
        pub mod locator;
        pub mod netcdf_harvester;
        pub mod yaml_loader;
    }
    pub mod adapters {
        pub mod filesystem;
    }
}

// CLI modules
pub mod cli {
    pub mod args;
    pub mod commands;
}

// Re-export commonly used types
pub use app::models::{HarvestOutput, HarvestedRecord, Metric, OutputFormat, Region, Stat};
pub use config::{HarvestConfig, HarvesterKind, RawConfig};
pub use registry::{harvest, ConfigSource};

/// Result type alias for the innovation statistics harvester
pub type Result<T> = std::result::Result<T, Error>;

/// Comprehensive error types for harvest operations
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// I/O operation failed
    #[error("I/O error: {message}")]
    Io {
        message: String,
        #[source]
        source: std::io::Error,
    },

    /// File path failed the validity check
    #[error("Invalid file path '{path}': {reason}")]
    InvalidPath { path: String, reason: String },

    /// Configuration error
    #[error("Configuration error: {message}")]
    Configuration { message: String },

    /// Cycle time outside the allowed historical window
    #[error("Cycle time out of range: {message}")]
    TimeRange { message: String },

    /// Unknown harvester name
    #[error("Harvester '{name}' is not registered")]
    Registry { name: String },

    /// YAML document error
    #[error("YAML error in file '{file}': {message}")]
    YamlParsing { file: String, message: String },

    /// NetCDF extraction error, scoped to the file being read
    #[error("Extraction error in file '{file}': {message}")]
    Extraction { file: String, message: String },

    /// NetCDF library error
    #[error("NetCDF error: {0}")]
    Netcdf(#[from] netcdf::Error),

    /// DataFrame construction error
    #[error("DataFrame error: {0}")]
    Polars(#[from] polars::error::PolarsError),
}

impl Error {
    /// Create an I/O error with context
    pub fn io(message: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            message: message.into(),
            source,
        }
    }

    /// Create an invalid path error
    pub fn invalid_path(path: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidPath {
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Create a configuration error
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// Create a cycle time range error
    pub fn time_range(message: impl Into<String>) -> Self {
        Self::TimeRange {
            message: message.into(),
        }
    }

    /// Create a registry lookup error
    pub fn registry(name: impl Into<String>) -> Self {
        Self::Registry { name: name.into() }
    }

    /// Create a YAML parsing error with the offending file
    pub fn yaml_parsing(file: impl Into<String>, message: impl Into<String>) -> Self {
        Self::YamlParsing {
            file: file.into(),
            message: message.into(),
        }
    }

    /// Create an extraction error with the offending file
    pub fn extraction(file: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Extraction {
            file: file.into(),
            message: message.into(),
        }
    }
}

// Automatic conversions from common error types
impl From<std::io::Error> for Error {
    fn from(error: std::io::Error) -> Self {
        Self::Io {
            message: "I/O operation failed".to_string(),
            source: error,
        }
    }
}
