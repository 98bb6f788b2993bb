//! Core trip-log summary library implemented in Rust.
//!
//! Parses a semicolon-delimited trip export into per-field value sequences,
//! derives aggregate statistics, and renders histogram/report text blocks.

use thiserror::Error;

pub mod histogram;
pub mod ingest;
pub mod parse;
pub mod report;
pub mod stats;

#[derive(Error, Debug)]
pub enum TripError {
    #[error("input is not valid UTF-16 text")]
    Decode,
    #[error("failed to read CSV: {0}")]
    Csv(String),
    #[error("no usable trip rows found")]
    NoUsableRows,
}

pub use histogram::{bin_values, render_histogram, render_hour_histogram, Bin};
pub use ingest::scan_trips;
pub use parse::{format_minutes, parse_duration_minutes, parse_number, parse_timestamp};
pub use report::render_summary;
pub use stats::{mean, median, TripAccumulator, TripSummary};
