//! Tests for the NetCDF extraction engine
//!
//! Fixtures are generated NetCDF files carrying a level coordinate and one
//! `{stat}_{region}` variable per combination, mirroring the layout of real
//! innovation statistics files.


use crate::config::{HarvestConfig, HarvesterKind, RawConfig};
use std::path::Path;

/// Pressure levels used by every generated fixture
pub const FIXTURE_LEVELS: &[f64] = &[850.0, 500.0, 250.0];

/// Write a NetCDF fixture with a `plevs` coordinate and one variable per
/// (stat, region) combination. Values are deterministic per variable so
/// tests can assert on them.
pub fn write_innov_file(path: &Path, regions: &[&str], stats: &[&str]) {
    let mut file = netcdf::create(path).unwrap();
    file.add_dimension("plev", FIXTURE_LEVELS.len()).unwrap();
    put_levels_var(&mut file, "plevs", FIXTURE_LEVELS);

    for (region_idx, region) in regions.iter().enumerate() {
        for (stat_idx, stat) in stats.iter().enumerate() {
            let values: Vec<f64> = (0..FIXTURE_LEVELS.len())
                .map(|level| fixture_value(region_idx, stat_idx, level))
                .collect();
            put_levels_var(&mut file, &format!("{stat}_{region}"), &values);
        }
    }
}

/// Deterministic fixture value for one (region, stat, level) slot
pub fn fixture_value(region_idx: usize, stat_idx: usize, level: usize) -> f64 {
    region_idx as f64 * 100.0 + stat_idx as f64 * 10.0 + level as f64
}

fn put_levels_var(file: &mut netcdf::FileMut, name: &str, values: &[f64]) {
    let mut var = file.add_variable::<f64>(name, &["plev"]).unwrap();
    var.put_values(values, ..).unwrap();
}

/// Build a validated configuration from YAML text
pub fn build_config(yaml: &str, kind: HarvesterKind) -> HarvestConfig {
    let raw: RawConfig = serde_yaml::from_str(yaml).unwrap();
    HarvestConfig::new(&raw, kind).unwrap()
}

/// YAML configuration text pointing at `dir` with a single string cycle
pub fn config_yaml(dir: &Path, metrics: &[&str], stats: &[&str], regions: Option<&str>) -> String {
    let mut yaml = format!(
        "harvester_name: innov_stats_netcdf\n\
         file_meta:\n\
         \x20 filepath: {}\n\
         \x20 cycletime_str: '%Y%m%d%H'\n\
         \x20 cycle: '2015120206'\n\
         \x20 filename_str: innov_stats.metric.%Y%m%d%H.nc\n\
         metrics: [{}]\n\
         stats: [{}]\n",
        dir.display(),
        metrics.join(", "),
        stats.join(", "),
    );
    if let Some(regions) = regions {
        yaml.push_str(regions);
    }
    yaml
}

/// Fixture filename matching the cycle in [`config_yaml`]
pub fn fixture_filename(metric: &str) -> String {
    format!("innov_stats.{metric}.2015120206.nc")
}
