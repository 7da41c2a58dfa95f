//! Metric file location resolution
//!
//! Resolves a metric name plus templated file naming metadata into a single
//! concrete, validated file path and its associated observation time. Two
//! naming schemes are supported: a string cycle parsed against a
//! strptime-style pattern, and a datetime cycle whose observation time is
//! offset by a fixed number of hours.

use crate::app::adapters::filesystem;
use crate::app::models::Metric;
use crate::constants::{self, CYCLE_OFFSET_HOURS, METRIC_PLACEHOLDER};
use crate::{Error, Result};
use chrono::format::{parse, Item, Parsed, StrftimeItems};
use chrono::{Duration, NaiveDateTime};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::debug;

/// File naming metadata shared by every metric in a harvest configuration
///
/// Carries the directory, the filename template with its `metric`
/// placeholder, and exactly one cycle designation: a `cycle` string parsed
/// against `cycletime_str`, or a `cycletime` datetime value.
#[derive(Debug, Clone, Deserialize)]
pub struct FileMeta {
    /// Directory holding the metric files, or a strftime template for it
    /// when a datetime cycle is supplied
    pub filepath: String,

    /// Filename template; the literal token `metric` is substituted with
    /// the metric name and the rest is rendered through strftime
    pub filename_str: String,

    /// Cycle designation as a string, e.g. `"2015120206"`
    #[serde(default)]
    pub cycle: Option<String>,

    /// strptime-style pattern that `cycle` is parsed against
    #[serde(default)]
    pub cycletime_str: Option<String>,

    /// Cycle designation as a datetime value, e.g. `2015-12-02T00:00:00`
    #[serde(default)]
    pub cycletime: Option<NaiveDateTime>,
}

/// A metric name resolved to a concrete, validated file path
#[derive(Debug, Clone, PartialEq)]
pub struct MetricLocation {
    /// Metric whose statistics the file holds
    pub metric: Metric,

    /// Fully qualified path that passed the filesystem validity check
    pub path: PathBuf,

    /// Observation time carried into every record read from this file
    pub observed_at: NaiveDateTime,
}

impl MetricLocation {
    /// Resolve a metric against its file naming metadata.
    ///
    /// The resolved cycle time must fall inside the allowed historical
    /// window and the resolved path must pass the filesystem validity
    /// check. Failures other than the window check are wrapped with the
    /// offending metric and the file_meta used.
    pub fn resolve(metric: Metric, meta: &FileMeta) -> Result<Self> {
        Self::build(metric, meta).map_err(|err| match err {
            err @ Error::TimeRange { .. } => err,
            err => Error::configuration(format!(
                "could not locate file for metric '{metric}', file_meta: {meta:?} - {err}"
            )),
        })
    }

    fn build(metric: Metric, meta: &FileMeta) -> Result<Self> {
        let (path, observed_at) = match (&meta.cycle, meta.cycletime) {
            (Some(cycle), _) => Self::resolve_string_cycle(metric, meta, cycle)?,
            (None, Some(cycletime)) => Self::resolve_datetime_cycle(metric, meta, cycletime)?,
            (None, None) => {
                return Err(Error::configuration(
                    "file_meta must carry either a 'cycle' string or a 'cycletime' datetime"
                        .to_string(),
                ))
            }
        };

        debug!("resolved metric '{}' to {}", metric, path.display());
        filesystem::require_readable_file(&path)?;

        Ok(Self {
            metric,
            path,
            observed_at,
        })
    }

    /// String cycle: parse against the configured pattern, substitute the
    /// metric into the filename template, render it with the cycle time,
    /// and append to the literal directory.
    fn resolve_string_cycle(
        metric: Metric,
        meta: &FileMeta,
        cycle: &str,
    ) -> Result<(PathBuf, NaiveDateTime)> {
        let pattern = meta.cycletime_str.as_deref().ok_or_else(|| {
            Error::configuration("'cycletime_str' is required alongside 'cycle'".to_string())
        })?;

        let cycletime = parse_cycle(cycle, pattern)?;
        check_cycle_window(metric, cycletime)?;

        let template = meta.filename_str.replace(METRIC_PLACEHOLDER, metric.as_str());
        let filename = render_strftime(cycletime, &template)?;

        Ok((Path::new(&meta.filepath).join(filename), cycletime))
    }

    /// Datetime cycle: render the directory from the cycle time and the
    /// filename from the cycle time plus the fixed offset; the offset time
    /// is the observation time reported for later records.
    fn resolve_datetime_cycle(
        metric: Metric,
        meta: &FileMeta,
        cycletime: NaiveDateTime,
    ) -> Result<(PathBuf, NaiveDateTime)> {
        check_cycle_window(metric, cycletime)?;

        let directory = render_strftime(cycletime, &meta.filepath)?;
        let observed_at = cycletime + Duration::hours(CYCLE_OFFSET_HOURS);

        let template = meta.filename_str.replace(METRIC_PLACEHOLDER, metric.as_str());
        let filename = render_strftime(observed_at, &template)?;

        Ok((Path::new(&directory).join(filename), observed_at))
    }
}

/// Parse a cycle string against a strptime-style pattern.
///
/// Cycle patterns commonly stop at the hour, so unset time-of-day fields
/// default to zero.
fn parse_cycle(cycle: &str, pattern: &str) -> Result<NaiveDateTime> {
    let mut parsed = Parsed::new();
    parse(&mut parsed, cycle, StrftimeItems::new(pattern)).map_err(|err| {
        Error::configuration(format!(
            "could not parse cycle '{cycle}' with pattern '{pattern}': {err}"
        ))
    })?;

    let _ = parsed.set_hour(0);
    let _ = parsed.set_minute(0);
    let _ = parsed.set_second(0);

    parsed.to_naive_datetime_with_offset(0).map_err(|err| {
        Error::configuration(format!(
            "cycle '{cycle}' with pattern '{pattern}' does not designate a datetime: {err}"
        ))
    })
}

/// Render a strftime template, rejecting malformed directives up front
/// instead of panicking during formatting.
fn render_strftime(when: NaiveDateTime, template: &str) -> Result<String> {
    let items: Vec<Item<'_>> = StrftimeItems::new(template).collect();
    if items.iter().any(|item| matches!(item, Item::Error)) {
        return Err(Error::configuration(format!(
            "invalid date format directive in template '{template}'"
        )));
    }

    Ok(when.format_with_items(items.iter()).to_string())
}

fn check_cycle_window(metric: Metric, cycletime: NaiveDateTime) -> Result<()> {
    let min = constants::min_cycle_datetime();
    let max = constants::max_cycle_datetime();

    if cycletime < min || cycletime > max {
        return Err(Error::time_range(format!(
            "cycle time {cycletime} for metric '{metric}' is out of range, must be no earlier \
             than {min} and no later than {max}"
        )));
    }

    Ok(())
}
