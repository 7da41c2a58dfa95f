//! Application constants for the innovation statistics harvester
//!
//! This module contains the metric/statistic allow-lists, the canonical
//! default region table, the allowed cycle time window, and the name
//! strings used by the harvester registry and output format selection.

use chrono::{NaiveDate, NaiveDateTime, Utc};

// =============================================================================
// Metric and Statistic Allow-Lists
// =============================================================================

/// Metric names with innovation statistics files
pub const VALID_METRICS: &[&str] = &["temperature", "spechumid", "uvwind"];

/// Statistics precomputed upstream and stored per region
pub const VALID_STATS: &[&str] = &["bias", "count", "rmsd"];

// =============================================================================
// Region Defaults and Bounds
// =============================================================================

/// Longitude extremes spanned by every region boundary ring
pub const MIN_LONGITUDE: f64 = -180.0;
pub const MAX_LONGITUDE: f64 = 180.0;

/// Canonical default regions (name, min_lat, max_lat), substituted when a
/// configuration carries no `regions` mapping
pub const DEFAULT_REGION_BOUNDS: &[(&str, f64, f64)] = &[
    ("equatorial", -5.0, 5.0),
    ("global", -90.0, 90.0),
    ("north_hemis", 20.0, 60.0),
    ("tropics", -20.0, 20.0),
    ("south_hemis", -60.0, -20.0),
];

// =============================================================================
// Cycle Time Window
// =============================================================================

/// Earliest cycle time accepted by the metric locator
pub fn min_cycle_datetime() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(1988, 1, 1)
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .expect("1988-01-01 00:00:00 is a valid datetime")
}

/// Latest cycle time accepted by the metric locator
pub fn max_cycle_datetime() -> NaiveDateTime {
    Utc::now().naive_utc()
}

/// Hours between a datetime-style cycle and its reported observation time
pub const CYCLE_OFFSET_HOURS: i64 = 6;

// =============================================================================
// File Naming
// =============================================================================

/// Literal token substituted with the metric name in filename templates
pub const METRIC_PLACEHOLDER: &str = "metric";

/// Level coordinate variable read by the first-generation harvester
pub const PLEV_VARIABLE: &str = "plevs";

/// Pressure unit label attached to first-generation records
pub const PLEV_PRESSURE_UNIT: &str = "mb";

/// Level coordinate variable assumed when a second-generation configuration
/// does not name one
pub const DEFAULT_ELEVATION_UNIT: &str = "plevs";

// =============================================================================
// Registry and Output Format Names
// =============================================================================

/// First-generation harvester registry key
pub const INNOV_TEMPERATURE_NETCDF: &str = "innov_temperature_netcdf";

/// Second-generation harvester registry key
pub const INNOV_STATS_NETCDF: &str = "innov_stats_netcdf";

/// Output format name selecting the flat record sequence
pub const NAMED_TUPLES_LIST: &str = "tuples_list";

/// Output format name selecting the column-oriented DataFrame
pub const PANDAS_DATAFRAME: &str = "pandas_dataframe";

/// Prefix of the record name synthesized by the second generation
pub const RECORD_NAME_PREFIX: &str = "innov_stats";
