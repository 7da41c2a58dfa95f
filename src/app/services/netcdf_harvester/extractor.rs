//! Nested-loop extraction over configured NetCDF files

use crate::app::models::{HarvestOutput, HarvestedRecord, Metric, OutputFormat, Stat};
use crate::app::services::locator::MetricLocation;
use crate::config::{HarvestConfig, HarvesterKind};
use crate::constants::RECORD_NAME_PREFIX;
use crate::{Error, Result};
use std::path::Path;
use tracing::{debug, info};

use super::frame::records_to_frame;

/// Extraction engine over a validated harvest configuration
///
/// Borrows the configuration for the duration of one harvest; produces an
/// independently owned output collection. Each file handle is scoped to its
/// metric's region/statistic loop and released when the loop completes or
/// fails.
pub struct InnovStatsExtractor<'a> {
    config: &'a HarvestConfig,
}

impl<'a> InnovStatsExtractor<'a> {
    /// Create an extractor over a validated configuration
    pub fn new(config: &'a HarvestConfig) -> Self {
        Self { config }
    }

    /// Harvest every (metric, region, stat, level) combination.
    ///
    /// Metrics, regions, and statistics are walked in configured order, so
    /// repeated harvests of an unchanged configuration against unchanged
    /// files yield identical output.
    pub fn harvest(&self) -> Result<HarvestOutput> {
        let mut records = Vec::new();

        for location in self.config.metric_locations() {
            self.harvest_metric(location, &mut records)?;
        }

        info!("harvested {} records", records.len());

        match self.config.output_format() {
            OutputFormat::Records => Ok(HarvestOutput::Records(records)),
            OutputFormat::Frame => Ok(HarvestOutput::Frame(records_to_frame(&records)?)),
        }
    }

    fn harvest_metric(
        &self,
        location: &MetricLocation,
        records: &mut Vec<HarvestedRecord>,
    ) -> Result<()> {
        debug!(
            "harvesting metric '{}' from {}",
            location.metric,
            location.path.display()
        );

        // the handle closes when `file` drops, read failures included
        let file = netcdf::open(&location.path).map_err(|err| {
            Error::extraction(
                location.path.display().to_string(),
                format!("could not open NetCDF file: {err}"),
            )
        })?;

        let elevations = read_variable(&file, self.config.elevation_var(), &location.path)?;

        for region in self.config.regions() {
            for stat in self.config.stats() {
                let var_name = format!("{}_{}", stat, region.name);
                let values = read_variable(&file, &var_name, &location.path)?;

                if values.len() != elevations.len() {
                    return Err(Error::extraction(
                        location.path.display().to_string(),
                        format!(
                            "variable '{}' has {} values but level variable '{}' has {}",
                            var_name,
                            values.len(),
                            self.config.elevation_var(),
                            elevations.len()
                        ),
                    ));
                }

                for (idx, value) in values.iter().enumerate() {
                    records.push(HarvestedRecord {
                        name: self.record_name(location.metric, *stat),
                        observed_at: location.observed_at,
                        region_name: region.name.clone(),
                        region_min_lat: region.min_lat,
                        region_max_lat: region.max_lat,
                        region_grid: region.grid.clone(),
                        elevation: elevations[idx],
                        elevation_unit: self.config.elevation_unit().to_string(),
                        metric: location.metric,
                        stat: *stat,
                        value: *value,
                    });
                }
            }
        }

        Ok(())
    }

    fn record_name(&self, metric: Metric, stat: Stat) -> Option<String> {
        match self.config.kind() {
            HarvesterKind::InnovTemperature => None,
            HarvesterKind::InnovStats => {
                Some(format!("{RECORD_NAME_PREFIX}_{metric}_{stat}"))
            }
        }
    }
}

/// Read a named one-dimensional variable as f64 values
fn read_variable(file: &netcdf::File, name: &str, path: &Path) -> Result<Vec<f64>> {
    let variable = file.variable(name).ok_or_else(|| {
        Error::extraction(
            path.display().to_string(),
            format!("variable '{name}' not found"),
        )
    })?;

    variable.get_values::<f64, _>(..).map_err(|err| {
        Error::extraction(
            path.display().to_string(),
            format!("could not read variable '{name}': {err}"),
        )
    })
}
