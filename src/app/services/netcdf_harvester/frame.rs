//! Record sequence to DataFrame conversion

use crate::app::models::HarvestedRecord;
use crate::Result;
use polars::prelude::{Column, DataFrame, DataType, TimeUnit};

/// Reshape a flat record sequence into a column-oriented DataFrame with one
/// column per record field.
///
/// Column order matches the record field order: `name`, `cycletime`,
/// `region_name`, `region_bounds`, `elevation`, `elevation_units`,
/// `metric`, `stat`, `value`.
pub fn records_to_frame(records: &[HarvestedRecord]) -> Result<DataFrame> {
    let names: Vec<Option<String>> = records.iter().map(|r| r.name.clone()).collect();
    let cycletimes: Vec<i64> = records
        .iter()
        .map(|r| r.observed_at.and_utc().timestamp_micros())
        .collect();
    let region_names: Vec<String> = records.iter().map(|r| r.region_name.clone()).collect();
    let region_bounds: Vec<String> = records.iter().map(|r| r.region_grid.clone()).collect();
    let elevations: Vec<f64> = records.iter().map(|r| r.elevation).collect();
    let elevation_units: Vec<String> =
        records.iter().map(|r| r.elevation_unit.clone()).collect();
    let metrics: Vec<String> = records.iter().map(|r| r.metric.to_string()).collect();
    let stats: Vec<String> = records.iter().map(|r| r.stat.to_string()).collect();
    let values: Vec<f64> = records.iter().map(|r| r.value).collect();

    let columns = vec![
        Column::new("name".into(), names),
        Column::new("cycletime".into(), cycletimes)
            .cast(&DataType::Datetime(TimeUnit::Microseconds, None))?,
        Column::new("region_name".into(), region_names),
        Column::new("region_bounds".into(), region_bounds),
        Column::new("elevation".into(), elevations),
        Column::new("elevation_units".into(), elevation_units),
        Column::new("metric".into(), metrics),
        Column::new("stat".into(), stats),
        Column::new("value".into(), values),
    ];

    Ok(DataFrame::new(columns)?)
}
