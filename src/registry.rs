//! Harvester registry and top-level harvest entry point
//!
//! A static table maps harvester-name strings to harvester kinds, keeping
//! the entry point generic: adding a harvester kind means adding one table
//! entry, not modifying dispatch logic.

use crate::app::services::netcdf_harvester::InnovStatsExtractor;
use crate::app::services::yaml_loader;
use crate::config::{HarvestConfig, HarvesterKind, RawConfig};
use crate::constants::{INNOV_STATS_NETCDF, INNOV_TEMPERATURE_NETCDF};
use crate::{Error, HarvestOutput, Result};
use std::path::{Path, PathBuf};
use tracing::info;

/// One registered harvester kind
#[derive(Debug, Clone, Copy)]
pub struct Harvester {
    /// Registry key as it appears in configurations
    pub name: &'static str,

    /// Human-readable description
    pub description: &'static str,

    /// Generation dispatched to
    pub kind: HarvesterKind,
}

/// Static harvester registry, read-only after process start
pub const HARVESTER_REGISTRY: &[Harvester] = &[
    Harvester {
        name: INNOV_TEMPERATURE_NETCDF,
        description: "innovation statistics temperature (netcdf)",
        kind: HarvesterKind::InnovTemperature,
    },
    Harvester {
        name: INNOV_STATS_NETCDF,
        description: "innovation statistics for temperature, spechumid, and uvwind (netcdf)",
        kind: HarvesterKind::InnovStats,
    },
];

/// Look up a harvester by its registry key
pub fn find_harvester(name: &str) -> Option<&'static Harvester> {
    HARVESTER_REGISTRY
        .iter()
        .find(|harvester| harvester.name == name)
}

/// Source of a harvest configuration: an in-process mapping, or a YAML file
/// loaded through the YAML collaborator
#[derive(Debug, Clone)]
pub enum ConfigSource {
    /// Structured mapping supplied in-process
    Data(serde_yaml::Value),
    /// Path to a single-document YAML file
    File(PathBuf),
}

impl From<serde_yaml::Value> for ConfigSource {
    fn from(value: serde_yaml::Value) -> Self {
        ConfigSource::Data(value)
    }
}

impl From<PathBuf> for ConfigSource {
    fn from(path: PathBuf) -> Self {
        ConfigSource::File(path)
    }
}

impl From<&Path> for ConfigSource {
    fn from(path: &Path) -> Self {
        ConfigSource::File(path.to_path_buf())
    }
}

/// Run one harvest to completion.
///
/// Resolves the configuration source, dispatches through the registry,
/// validates the configuration, and extracts the full result set. A failure
/// anywhere aborts the harvest; there is no partial-success mode.
pub fn harvest(source: impl Into<ConfigSource>) -> Result<HarvestOutput> {
    let value = match source.into() {
        ConfigSource::Data(value) => value,
        ConfigSource::File(path) => yaml_loader::load_yaml_file(&path)?,
    };

    let raw: RawConfig = serde_yaml::from_value(value)
        .map_err(|err| Error::configuration(format!("malformed harvest configuration: {err}")))?;

    let name = raw
        .harvester_name
        .as_deref()
        .ok_or_else(|| Error::registry("<unset>"))?;
    let harvester = find_harvester(name).ok_or_else(|| Error::registry(name))?;

    info!(
        "dispatching harvester '{}' ({})",
        harvester.name, harvester.description
    );

    let config = HarvestConfig::new(&raw, harvester.kind)?;
    InnovStatsExtractor::new(&config).harvest()
}
