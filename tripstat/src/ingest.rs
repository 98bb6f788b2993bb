//! UTF-16 decode and semicolon-delimited CSV scan.
//!
//! The export is UTF-16 with a BOM (little-endian assumed when the BOM is
//! missing). Columns are resolved by header name; a missing column simply
//! behaves as an always-empty cell.

use encoding_rs::UTF_16LE;
use tracing::debug;

use crate::stats::TripAccumulator;
use crate::TripError;

pub const COL_DISTANCE: &str = "Distance (km)";
pub const COL_FUEL: &str = "Fuel consumption (litres)";
pub const COL_DURATION: &str = "Duration";
pub const COL_STARTED: &str = "Started";
pub const COL_STOPPED: &str = "Stopped";

fn decode_utf16(bytes: &[u8]) -> Result<String, TripError> {
    let (text, _, had_errors) = UTF_16LE.decode(bytes);
    if had_errors {
        return Err(TripError::Decode);
    }
    Ok(text.into_owned())
}

/// Decode the raw export and fold every row into a [`TripAccumulator`].
/// Field-level failures are silent; only undecodable input or a broken CSV
/// stream is an error here.
pub fn scan_trips(bytes: &[u8]) -> Result<TripAccumulator, TripError> {
    let text = decode_utf16(bytes)?;
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(b';')
        .flexible(true)
        .from_reader(text.as_bytes());

    let headers = reader
        .headers()
        .map_err(|e| TripError::Csv(e.to_string()))?
        .clone();
    let column = |name: &str| headers.iter().position(|h| h.trim() == name);
    let distance_col = column(COL_DISTANCE);
    let fuel_col = column(COL_FUEL);
    let duration_col = column(COL_DURATION);
    let started_col = column(COL_STARTED);
    let stopped_col = column(COL_STOPPED);

    let mut acc = TripAccumulator::default();
    for (idx, result) in reader.records().enumerate() {
        let record = result.map_err(|e| TripError::Csv(e.to_string()))?;
        let cell = |col: Option<usize>| col.and_then(|i| record.get(i)).unwrap_or("");
        let usable = acc.record_row(
            cell(distance_col),
            cell(fuel_col),
            cell(duration_col),
            cell(started_col),
            cell(stopped_col),
        );
        if !usable {
            // header is line 1, so the first record is line 2
            debug!(line = idx + 2, "row has no parsable distance, excluded");
        }
    }
    Ok(acc)
}
