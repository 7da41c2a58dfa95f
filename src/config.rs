//! Harvest configuration validation
//!
//! Parses a raw configuration mapping into a validated, typed configuration:
//! statistic list checked against the fixed allow-list, region list with a
//! canonical default set, one resolved metric file location per metric, and
//! the second generation's elevation variable and output shape selections.
//!
//! Validation phases run in sequence and each wraps its own failures with
//! context naming the phase that failed.

use crate::app::models::{Metric, OutputFormat, Region, Stat};
use crate::app::services::locator::{FileMeta, MetricLocation};
use crate::constants::{
    DEFAULT_ELEVATION_UNIT, PLEV_PRESSURE_UNIT, PLEV_VARIABLE, VALID_METRICS, VALID_STATS,
};
use crate::{Error, Result};
use serde::Deserialize;
use tracing::debug;

/// Harvester generations registered under distinct names
///
/// The temperature-era harvester reads `plevs` levels labelled in `mb` and
/// always returns the flat record sequence. The stats-era harvester reads a
/// configurable level variable, synthesizes record names, and can reshape
/// its output into a DataFrame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HarvesterKind {
    InnovTemperature,
    InnovStats,
}

/// Raw harvest configuration as deserialized from YAML or an in-process
/// mapping, before any validation
#[derive(Debug, Clone, Deserialize)]
pub struct RawConfig {
    /// Registry key selecting the harvester kind
    #[serde(default)]
    pub harvester_name: Option<String>,

    /// File naming metadata shared by every metric
    #[serde(default)]
    pub file_meta: Option<FileMeta>,

    /// Statistic names to extract
    #[serde(default)]
    pub stats: Option<Vec<String>>,

    /// Metric names to extract
    #[serde(default)]
    pub metrics: Option<Vec<String>>,

    /// Region name to latitude bounds mapping, in configuration order
    #[serde(default)]
    pub regions: Option<serde_yaml::Mapping>,

    /// Level coordinate variable name (second generation only)
    #[serde(default)]
    pub elevation_unit: Option<String>,

    /// Requested output shape (second generation only)
    #[serde(default)]
    pub output_format: Option<String>,
}

/// Validated harvest configuration, immutable once constructed
///
/// Owns its regions and metric locations exclusively; the extraction engine
/// borrows it through the read-only accessors.
#[derive(Debug, Clone)]
pub struct HarvestConfig {
    kind: HarvesterKind,
    stats: Vec<Stat>,
    regions: Vec<Region>,
    metric_locations: Vec<MetricLocation>,
    elevation_var: String,
    elevation_unit: String,
    output_format: OutputFormat,
}

impl HarvestConfig {
    /// Validate a raw configuration for the given harvester kind.
    ///
    /// Phases run in order: statistics, regions, metric locations, then the
    /// second generation's elevation and output shape selections.
    pub fn new(raw: &RawConfig, kind: HarvesterKind) -> Result<Self> {
        let stats = Self::parse_stats(raw)?;
        let regions = Self::parse_regions(raw)?;
        let metric_locations = Self::parse_metric_locations(raw)?;

        let (elevation_var, elevation_unit) = match kind {
            HarvesterKind::InnovTemperature => {
                (PLEV_VARIABLE.to_string(), PLEV_PRESSURE_UNIT.to_string())
            }
            // the configured variable name doubles as the unit label
            HarvesterKind::InnovStats => {
                let var = raw
                    .elevation_unit
                    .clone()
                    .unwrap_or_else(|| DEFAULT_ELEVATION_UNIT.to_string());
                (var.clone(), var)
            }
        };

        let output_format = match kind {
            HarvesterKind::InnovTemperature => OutputFormat::Records,
            HarvesterKind::InnovStats => match raw.output_format.as_deref() {
                None => OutputFormat::Records,
                Some(name) => OutputFormat::from_name(name)?,
            },
        };

        debug!(
            "validated harvest configuration: {} metrics, {} stats, {} regions",
            metric_locations.len(),
            stats.len(),
            regions.len()
        );

        Ok(Self {
            kind,
            stats,
            regions,
            metric_locations,
            elevation_var,
            elevation_unit,
            output_format,
        })
    }

    fn parse_stats(raw: &RawConfig) -> Result<Vec<Stat>> {
        let entries = raw.stats.as_ref().ok_or_else(|| {
            Error::configuration(format!(
                "'stats' key missing, entries must be one of {:?}",
                VALID_STATS
            ))
        })?;

        entries
            .iter()
            .map(|entry| entry.parse::<Stat>())
            .collect::<Result<Vec<_>>>()
            .map_err(|err| Error::configuration(format!("problem parsing stats: {err}")))
    }

    fn parse_regions(raw: &RawConfig) -> Result<Vec<Region>> {
        let Some(mapping) = &raw.regions else {
            return Region::defaults();
        };

        let mut regions = Vec::with_capacity(mapping.len());
        for (key, bounds) in mapping {
            let region = Self::parse_region(key, bounds)
                .map_err(|err| Error::configuration(format!("problem parsing regions: {err}")))?;
            regions.push(region);
        }

        Ok(regions)
    }

    fn parse_region(key: &serde_yaml::Value, bounds: &serde_yaml::Value) -> Result<Region> {
        let name = key.as_str().ok_or_else(|| {
            Error::configuration(format!("region name must be a string, found: {key:?}"))
        })?;

        let lat_min = Self::latitude_bound(bounds, "lat_min")?;
        let lat_max = Self::latitude_bound(bounds, "lat_max")?;

        Region::new(name, lat_min, lat_max)
    }

    fn latitude_bound(bounds: &serde_yaml::Value, field: &str) -> Result<f64> {
        bounds.get(field).and_then(|v| v.as_f64()).ok_or_else(|| {
            Error::configuration(format!(
                "region bounds must carry a numeric '{field}', found: {bounds:?}"
            ))
        })
    }

    fn parse_metric_locations(raw: &RawConfig) -> Result<Vec<MetricLocation>> {
        let names = raw.metrics.as_ref().ok_or_else(|| {
            Error::configuration(format!(
                "'metrics' key missing, entries must be one of {:?}",
                VALID_METRICS
            ))
        })?;

        let metrics = names
            .iter()
            .map(|name| name.parse::<Metric>())
            .collect::<Result<Vec<_>>>()
            .map_err(|err| Error::configuration(format!("problem parsing metrics: {err}")))?;

        let file_meta = raw.file_meta.as_ref().ok_or_else(|| {
            Error::configuration("'file_meta' key missing from configuration".to_string())
        })?;

        metrics
            .into_iter()
            .map(|metric| MetricLocation::resolve(metric, file_meta))
            .collect()
    }

    /// Harvester generation this configuration was validated for
    pub fn kind(&self) -> HarvesterKind {
        self.kind
    }

    /// Statistics to extract, in configured order
    pub fn stats(&self) -> &[Stat] {
        &self.stats
    }

    /// Regions to extract, in configured order
    pub fn regions(&self) -> &[Region] {
        &self.regions
    }

    /// Resolved metric file locations, in configured order
    pub fn metric_locations(&self) -> &[MetricLocation] {
        &self.metric_locations
    }

    /// Name of the level coordinate variable to read from each file
    pub fn elevation_var(&self) -> &str {
        &self.elevation_var
    }

    /// Unit label attached to every record's elevation value
    pub fn elevation_unit(&self) -> &str {
        &self.elevation_unit
    }

    /// Requested shape of the harvest result
    pub fn output_format(&self) -> OutputFormat {
        self.output_format
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    /// Raw config pointing at an existing (non-NetCDF) file; enough for
    /// configuration-level validation, which never opens the file
    fn raw_config(dir: &TempDir) -> RawConfig {
        fs::write(
            dir.path().join("innov_stats.temperature.2015120206.nc"),
            b"stub",
        )
        .unwrap();

        RawConfig {
            harvester_name: Some("innov_stats_netcdf".to_string()),
            file_meta: Some(FileMeta {
                filepath: dir.path().to_string_lossy().into_owned(),
                filename_str: "innov_stats.metric.%Y%m%d%H.nc".to_string(),
                cycle: Some("2015120206".to_string()),
                cycletime_str: Some("%Y%m%d%H".to_string()),
                cycletime: None,
            }),
            stats: Some(vec!["bias".to_string(), "rmsd".to_string()]),
            metrics: Some(vec!["temperature".to_string()]),
            regions: None,
            elevation_unit: None,
            output_format: None,
        }
    }

    #[test]
    fn test_default_regions_substituted_when_absent() {
        let dir = TempDir::new().unwrap();
        let config = HarvestConfig::new(&raw_config(&dir), HarvesterKind::InnovStats).unwrap();

        let names: Vec<&str> = config.regions().iter().map(|r| r.name.as_str()).collect();
        assert_eq!(
            names,
            vec!["equatorial", "global", "north_hemis", "tropics", "south_hemis"]
        );
    }

    #[test]
    fn test_configured_regions_keep_order() {
        let dir = TempDir::new().unwrap();
        let mut raw = raw_config(&dir);
        raw.regions = serde_yaml::from_str(
            "tropics: {lat_min: -20.0, lat_max: 20.0}\nglobal: {lat_min: -90.0, lat_max: 90.0}\n",
        )
        .unwrap();

        let config = HarvestConfig::new(&raw, HarvesterKind::InnovStats).unwrap();
        let names: Vec<&str> = config.regions().iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["tropics", "global"]);
    }

    #[test]
    fn test_unknown_stat_fails() {
        let dir = TempDir::new().unwrap();
        let mut raw = raw_config(&dir);
        raw.stats = Some(vec!["bias".to_string(), "variance".to_string()]);

        let err = HarvestConfig::new(&raw, HarvesterKind::InnovStats).unwrap_err();
        assert!(err.to_string().contains("stats"));
    }

    #[test]
    fn test_missing_stats_key_fails() {
        let dir = TempDir::new().unwrap();
        let mut raw = raw_config(&dir);
        raw.stats = None;

        let err = HarvestConfig::new(&raw, HarvesterKind::InnovStats).unwrap_err();
        assert!(err.to_string().contains("'stats' key missing"));
    }

    #[test]
    fn test_missing_metrics_key_fails() {
        let dir = TempDir::new().unwrap();
        let mut raw = raw_config(&dir);
        raw.metrics = None;

        let err = HarvestConfig::new(&raw, HarvesterKind::InnovStats).unwrap_err();
        assert!(err.to_string().contains("'metrics' key missing"));
    }

    #[test]
    fn test_malformed_region_bounds_fail() {
        let dir = TempDir::new().unwrap();
        let mut raw = raw_config(&dir);
        raw.regions =
            serde_yaml::from_str("broken: {lat_min: -20.0}\n").unwrap();

        let err = HarvestConfig::new(&raw, HarvesterKind::InnovStats).unwrap_err();
        assert!(err.to_string().contains("problem parsing regions"));
    }

    #[test]
    fn test_generation_elevation_defaults() {
        let dir = TempDir::new().unwrap();
        let raw = raw_config(&dir);

        let first = HarvestConfig::new(&raw, HarvesterKind::InnovTemperature).unwrap();
        assert_eq!(first.elevation_var(), "plevs");
        assert_eq!(first.elevation_unit(), "mb");

        let second = HarvestConfig::new(&raw, HarvesterKind::InnovStats).unwrap();
        assert_eq!(second.elevation_var(), "plevs");
        assert_eq!(second.elevation_unit(), "plevs");
    }

    #[test]
    fn test_elevation_unit_override() {
        let dir = TempDir::new().unwrap();
        let mut raw = raw_config(&dir);
        raw.elevation_unit = Some("depth".to_string());

        let config = HarvestConfig::new(&raw, HarvesterKind::InnovStats).unwrap();
        assert_eq!(config.elevation_var(), "depth");
        assert_eq!(config.elevation_unit(), "depth");

        // the first generation pins its level variable regardless
        let first = HarvestConfig::new(&raw, HarvesterKind::InnovTemperature).unwrap();
        assert_eq!(first.elevation_var(), "plevs");
    }

    #[test]
    fn test_output_format_selection() {
        let dir = TempDir::new().unwrap();
        let mut raw = raw_config(&dir);

        let config = HarvestConfig::new(&raw, HarvesterKind::InnovStats).unwrap();
        assert_eq!(config.output_format(), OutputFormat::Records);

        raw.output_format = Some("pandas_dataframe".to_string());
        let config = HarvestConfig::new(&raw, HarvesterKind::InnovStats).unwrap();
        assert_eq!(config.output_format(), OutputFormat::Frame);

        // the first generation always returns the flat sequence
        let first = HarvestConfig::new(&raw, HarvesterKind::InnovTemperature).unwrap();
        assert_eq!(first.output_format(), OutputFormat::Records);

        raw.output_format = Some("spreadsheet".to_string());
        assert!(HarvestConfig::new(&raw, HarvesterKind::InnovStats).is_err());
    }
}
