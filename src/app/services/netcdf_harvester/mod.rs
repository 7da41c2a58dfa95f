//! NetCDF extraction engine for innovation statistics
//!
//! Walks every configured metric file and materializes the metric x region
//! x statistic x level cross product into flat records, optionally reshaped
//! into a column-oriented DataFrame.
//!
//! The module is organized into two components:
//! - [`extractor`] - nested-loop extraction over the configured files
//! - [`frame`] - record sequence to DataFrame conversion

pub mod extractor;
pub mod frame;

pub use extractor::InnovStatsExtractor;
pub use frame::records_to_frame;

#[cfg(test)]
mod tests;
