//! Row aggregation and aggregate statistics.

use chrono::Timelike;

use crate::parse::{parse_duration_minutes, parse_number, parse_timestamp};
use crate::TripError;

/// Accumulates per-field value sequences across the scanned rows. Field
/// failures are local: a row missing its fuel cell still contributes its
/// distance, and vice versa.
#[derive(Debug, Default)]
pub struct TripAccumulator {
    distances: Vec<f64>,
    durations: Vec<f64>,
    fuels: Vec<f64>,
    speeds: Vec<f64>,
    hours: Vec<u32>,
}

/// Aggregate statistics over the full record set.
#[derive(Clone, Debug, PartialEq)]
pub struct TripSummary {
    pub trips: usize,
    pub total_distance_km: f64,
    pub total_duration_min: Option<f64>,
    pub total_fuel_l: Option<f64>,
    pub fuel_per_100km: Option<f64>,
    pub avg_speed_kmh: Option<f64>,
    pub distance_mean: Option<f64>,
    pub distance_median: Option<f64>,
    pub duration_mean: Option<f64>,
    pub duration_median: Option<f64>,
    pub speed_mean: Option<f64>,
    pub speed_median: Option<f64>,
}

impl TripAccumulator {
    /// Fold one raw row into the accumulator. Each field is parsed
    /// independently; a per-trip speed is derived only when both distance and
    /// a positive duration are present. Returns whether a distance parsed.
    pub fn record_row(
        &mut self,
        distance: &str,
        fuel: &str,
        duration: &str,
        started: &str,
        stopped: &str,
    ) -> bool {
        let d = parse_number(distance);
        let fu = parse_number(fuel);
        let du = parse_duration_minutes(duration, started, stopped);

        if let Some(d) = d {
            self.distances.push(d);
        }
        if let Some(du) = du {
            self.durations.push(du);
        }
        if let (Some(d), Some(du)) = (d, du) {
            if du > 0.0 {
                self.speeds.push(d / (du / 60.0));
            }
        }
        if let Some(fu) = fu {
            self.fuels.push(fu);
        }
        if let Some(ts) = parse_timestamp(started) {
            self.hours.push(ts.hour());
        }
        d.is_some()
    }

    pub fn distances(&self) -> &[f64] {
        &self.distances
    }

    pub fn durations(&self) -> &[f64] {
        &self.durations
    }

    pub fn start_hours(&self) -> &[u32] {
        &self.hours
    }

    /// Derive the aggregate statistics. Errors when no row yielded a distance,
    /// the one signal that the input was not a usable trip export.
    pub fn summary(&self) -> Result<TripSummary, TripError> {
        if self.distances.is_empty() {
            return Err(TripError::NoUsableRows);
        }

        let trips = self.distances.len();
        let total_distance_km: f64 = self.distances.iter().sum();
        let total_duration_min =
            (!self.durations.is_empty()).then(|| self.durations.iter().sum::<f64>());
        let total_fuel_l = (!self.fuels.is_empty()).then(|| self.fuels.iter().sum::<f64>());

        // Ratio gates are on positive totals: a zero total still prints as a
        // total but cannot produce a meaningful rate.
        let fuel_per_100km = total_fuel_l
            .filter(|&fuel| fuel > 0.0)
            .map(|fuel| fuel / total_distance_km * 100.0);
        let avg_speed_kmh = total_duration_min
            .filter(|&minutes| minutes > 0.0)
            .map(|minutes| total_distance_km / (minutes / 60.0));

        Ok(TripSummary {
            trips,
            total_distance_km,
            total_duration_min,
            total_fuel_l,
            fuel_per_100km,
            avg_speed_kmh,
            distance_mean: mean(&self.distances),
            distance_median: median(&self.distances),
            duration_mean: mean(&self.durations),
            duration_median: median(&self.durations),
            speed_mean: mean(&self.speeds),
            speed_median: median(&self.speeds),
        })
    }
}

pub fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<f64>() / values.len() as f64)
}

pub fn median(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
    let mid = sorted.len() / 2;
    Some(if sorted.len() % 2 == 0 {
        (sorted[mid - 1] + sorted[mid]) / 2.0
    } else {
        sorted[mid]
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn timestamp_fallback_row_yields_speed() {
        let mut acc = TripAccumulator::default();
        acc.record_row("10", "", "", "2025-09-01T10:00:00", "2025-09-01T10:15:00");
        let summary = acc.summary().unwrap();
        assert_eq!(summary.trips, 1);
        assert_eq!(summary.total_distance_km, 10.0);
        assert_eq!(summary.total_duration_min, Some(15.0));
        assert_eq!(summary.avg_speed_kmh, Some(40.0));
        assert_eq!(summary.speed_mean, Some(40.0));
    }

    #[test]
    fn no_distances_is_an_error() {
        let mut acc = TripAccumulator::default();
        acc.record_row("", "4,2", "30", "", "");
        assert!(matches!(acc.summary(), Err(TripError::NoUsableRows)));
    }

    #[test]
    fn field_failures_stay_local() {
        let mut acc = TripAccumulator::default();
        acc.record_row("12,5", "not a number", "junk", "junk", "");
        acc.record_row("", "3.0", "10", "", "");
        let summary = acc.summary().unwrap();
        assert_eq!(summary.trips, 1);
        assert_eq!(summary.total_distance_km, 12.5);
        assert_eq!(summary.total_duration_min, Some(10.0));
        assert_eq!(summary.total_fuel_l, Some(3.0));
        // second row has duration but no distance, so no speed sample
        assert_eq!(summary.speed_mean, None);
    }

    #[test]
    fn zero_duration_produces_no_speed_sample() {
        let mut acc = TripAccumulator::default();
        acc.record_row("5", "", "0", "", "");
        let summary = acc.summary().unwrap();
        assert_eq!(summary.total_duration_min, Some(0.0));
        assert_eq!(summary.avg_speed_kmh, None);
        assert_eq!(summary.speed_median, None);
    }

    #[test]
    fn fuel_efficiency_per_100km() {
        let mut acc = TripAccumulator::default();
        acc.record_row("60", "3.3", "60", "", "");
        acc.record_row("40", "2.2", "40", "", "");
        let summary = acc.summary().unwrap();
        assert_eq!(summary.total_fuel_l, Some(5.5));
        assert_eq!(summary.fuel_per_100km, Some(5.5));
        assert_eq!(summary.avg_speed_kmh, Some(60.0));
    }

    #[test]
    fn start_hours_collected_from_parsable_timestamps() {
        let mut acc = TripAccumulator::default();
        acc.record_row("1", "", "5", "2025-09-01T08:12:00Z", "");
        acc.record_row("2", "", "5", "not a timestamp", "");
        assert_eq!(acc.start_hours(), &[8]);
    }

    #[test]
    fn median_even_and_odd() {
        assert_eq!(median(&[3.0, 1.0, 2.0]), Some(2.0));
        assert_eq!(median(&[4.0, 1.0, 2.0, 3.0]), Some(2.5));
        assert_eq!(median(&[]), None);
        assert_eq!(mean(&[2.0, 4.0]), Some(3.0));
    }
}
