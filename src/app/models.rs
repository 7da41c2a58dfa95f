//! Data models for innovation statistics harvesting
//!
//! This module contains the core data structures shared by the configuration
//! layer and the extraction engine: metric and statistic enums, validated
//! geographic regions, the flat harvested record, and the harvest output
//! wrapper.

use crate::constants::{
    DEFAULT_REGION_BOUNDS, MAX_LONGITUDE, MIN_LONGITUDE, NAMED_TUPLES_LIST, PANDAS_DATAFRAME,
    VALID_METRICS, VALID_STATS,
};
use crate::{Error, Result};
use chrono::NaiveDateTime;
use polars::prelude::DataFrame;
use std::fmt;
use std::str::FromStr;

// =============================================================================
// Metric and Statistic Types
// =============================================================================

/// Physical metrics with innovation statistics files
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Metric {
    Temperature,
    Spechumid,
    Uvwind,
}

impl Metric {
    /// Lowercase name as it appears in configurations and filenames
    pub fn as_str(&self) -> &'static str {
        match self {
            Metric::Temperature => "temperature",
            Metric::Spechumid => "spechumid",
            Metric::Uvwind => "uvwind",
        }
    }
}

impl FromStr for Metric {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "temperature" => Ok(Metric::Temperature),
            "spechumid" => Ok(Metric::Spechumid),
            "uvwind" => Ok(Metric::Uvwind),
            other => Err(Error::configuration(format!(
                "invalid metric '{}', must be one of {:?}",
                other, VALID_METRICS
            ))),
        }
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Statistics precomputed upstream and stored per region in each file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stat {
    Bias,
    Count,
    Rmsd,
}

impl Stat {
    /// Lowercase name as it appears in configurations and variable names
    pub fn as_str(&self) -> &'static str {
        match self {
            Stat::Bias => "bias",
            Stat::Count => "count",
            Stat::Rmsd => "rmsd",
        }
    }
}

impl FromStr for Stat {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "bias" => Ok(Stat::Bias),
            "count" => Ok(Stat::Count),
            "rmsd" => Ok(Stat::Rmsd),
            other => Err(Error::configuration(format!(
                "invalid stat '{}', must be one of {:?}",
                other, VALID_STATS
            ))),
        }
    }
}

impl fmt::Display for Stat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// =============================================================================
// Output Format
// =============================================================================

/// Requested shape of the harvest result
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// Flat sequence of harvested records
    #[default]
    Records,
    /// Column-oriented DataFrame with one column per record field
    Frame,
}

impl OutputFormat {
    /// Resolve a configured output format name
    pub fn from_name(name: &str) -> Result<Self> {
        match name {
            NAMED_TUPLES_LIST => Ok(OutputFormat::Records),
            PANDAS_DATAFRAME => Ok(OutputFormat::Frame),
            other => Err(Error::configuration(format!(
                "invalid output_format '{}', must be '{}' or '{}'",
                other, NAMED_TUPLES_LIST, PANDAS_DATAFRAME
            ))),
        }
    }
}

// =============================================================================
// Region
// =============================================================================

/// Named geographic bounding box spanning the full longitude range
///
/// Instances are validated on construction and never mutated afterwards.
/// The closed boundary ring is derived once here and carried into every
/// record touching the region.
#[derive(Debug, Clone, PartialEq)]
pub struct Region {
    /// Region name, used to derive per-region variable names
    pub name: String,

    /// Southern latitude bound in degrees
    pub min_lat: f64,

    /// Northern latitude bound in degrees
    pub max_lat: f64,

    /// Closed five-vertex boundary ring rendered as a string
    pub grid: String,
}

impl Region {
    /// Create a new Region with validation
    pub fn new(name: impl Into<String>, min_lat: f64, max_lat: f64) -> Result<Self> {
        let name = name.into();

        if name.trim().is_empty() {
            return Err(Error::configuration(
                "region name must be a non-empty string".to_string(),
            ));
        }

        if !min_lat.is_finite() || !max_lat.is_finite() {
            return Err(Error::configuration(format!(
                "min and max lat must be finite numbers - min_lat: {}, max_lat: {}",
                min_lat, max_lat
            )));
        }

        if min_lat > max_lat {
            return Err(Error::configuration(format!(
                "min_lat must be less than or equal to max_lat - min_lat: {}, max_lat: {}",
                min_lat, max_lat
            )));
        }

        if min_lat.abs() > 90.0 || max_lat.abs() > 90.0 {
            return Err(Error::configuration(format!(
                "min_lat or max_lat is out of the allowed [-90, 90] range - min_lat: {}, max_lat: {}",
                min_lat, max_lat
            )));
        }

        let grid = Self::render_ring(min_lat, max_lat);

        Ok(Self {
            name,
            min_lat,
            max_lat,
            grid,
        })
    }

    /// Boundary ring vertices: NW, NE, SE, SW, back to NW
    pub fn ring(&self) -> [(f64, f64); 5] {
        [
            (MIN_LONGITUDE, self.max_lat),
            (MAX_LONGITUDE, self.max_lat),
            (MAX_LONGITUDE, self.min_lat),
            (MIN_LONGITUDE, self.min_lat),
            (MIN_LONGITUDE, self.max_lat),
        ]
    }

    fn render_ring(min_lat: f64, max_lat: f64) -> String {
        format!(
            "(({MIN_LONGITUDE},{max_lat}),({MAX_LONGITUDE},{max_lat}),({MAX_LONGITUDE},{min_lat}),({MIN_LONGITUDE},{min_lat}),({MIN_LONGITUDE},{max_lat}))"
        )
    }

    /// Canonical default regions substituted when a configuration carries
    /// no `regions` mapping
    pub fn defaults() -> Result<Vec<Region>> {
        DEFAULT_REGION_BOUNDS
            .iter()
            .map(|(name, min_lat, max_lat)| Region::new(*name, *min_lat, *max_lat))
            .collect()
    }
}

// =============================================================================
// Harvested Record and Output
// =============================================================================

/// One flat record per (metric, region, stat, level) combination
///
/// Records are immutable once emitted by the extraction engine. The first
/// generation leaves `name` empty and consumers read the latitude pair; the
/// second generation fills `name` and consumers read the boundary ring.
#[derive(Debug, Clone, PartialEq)]
pub struct HarvestedRecord {
    /// Synthesized record name (second generation only)
    pub name: Option<String>,

    /// Observation time reported by the metric locator
    pub observed_at: NaiveDateTime,

    /// Region name
    pub region_name: String,

    /// Southern latitude bound of the region
    pub region_min_lat: f64,

    /// Northern latitude bound of the region
    pub region_max_lat: f64,

    /// Closed boundary ring of the region
    pub region_grid: String,

    /// Vertical level or depth value at this record's index
    pub elevation: f64,

    /// Unit label for the elevation value
    pub elevation_unit: String,

    /// Metric the value belongs to
    pub metric: Metric,

    /// Statistic the value belongs to
    pub stat: Stat,

    /// Harvested numeric value
    pub value: f64,
}

/// Complete harvest result, shaped per the configured output format
#[derive(Debug, Clone)]
pub enum HarvestOutput {
    /// Flat sequence of records in extraction order
    Records(Vec<HarvestedRecord>),
    /// Column-oriented DataFrame with one column per record field
    Frame(DataFrame),
}

impl HarvestOutput {
    /// Number of harvested rows regardless of shape
    pub fn len(&self) -> usize {
        match self {
            HarvestOutput::Records(records) => records.len(),
            HarvestOutput::Frame(frame) => frame.height(),
        }
    }

    /// True when the harvest produced no rows
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Flat records, when that shape was requested
    pub fn records(&self) -> Option<&[HarvestedRecord]> {
        match self {
            HarvestOutput::Records(records) => Some(records),
            HarvestOutput::Frame(_) => None,
        }
    }

    /// DataFrame, when that shape was requested
    pub fn frame(&self) -> Option<&DataFrame> {
        match self {
            HarvestOutput::Records(_) => None,
            HarvestOutput::Frame(frame) => Some(frame),
        }
    }
}
