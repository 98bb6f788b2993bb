//! Fixed-layout summary block for terminal output.

use crate::parse::format_minutes;
use crate::stats::TripSummary;

/// Render the labeled summary block. Lines for optional aggregates are
/// omitted when the backing field never parsed.
pub fn render_summary(summary: &TripSummary) -> String {
    let mut out = String::new();
    out.push_str("\n====================  TRIP SUMMARY  ====================\n");
    out.push_str(&format!(
        "{:<36}{}\n",
        "Total number of trips:", summary.trips
    ));
    out.push_str(&format!(
        "{:<36}{:.1} km\n",
        "Total distance driven:", summary.total_distance_km
    ));
    out.push_str(&format!(
        "{:<36}{}\n",
        "Total driving time:",
        format_minutes(summary.total_duration_min)
    ));
    if let Some(fuel) = summary.total_fuel_l {
        out.push_str(&format!("{:<36}{:.2} liters\n", "Total fuel consumed:", fuel));
    }
    if let Some(rate) = summary.fuel_per_100km {
        out.push_str(&format!(
            "{:<36}{:.1} liters/100km\n",
            "Average fuel consumption:", rate
        ));
    }
    if let (Some(mean), Some(median)) = (summary.distance_mean, summary.distance_median) {
        out.push_str("Average distance per trip:\n");
        out.push_str(&format!("{:<36}{:.1} km\n", "  Mean distance:", mean));
        out.push_str(&format!("{:<36}{:.1} km\n", "  Median distance:", median));
    }
    if let (Some(mean), Some(median)) = (summary.duration_mean, summary.duration_median) {
        out.push_str("Average trip duration:\n");
        out.push_str(&format!("{:<36}{:.1} minutes\n", "  Mean duration:", mean));
        out.push_str(&format!("{:<36}{:.1} minutes\n", "  Median duration:", median));
    }
    if let (Some(mean), Some(median)) = (summary.speed_mean, summary.speed_median) {
        out.push_str("Average speed:\n");
        out.push_str(&format!("{:<36}{:.1} km/h\n", "  Mean per-trip speed:", mean));
        out.push_str(&format!(
            "{:<36}{:.1} km/h\n",
            "  Median per-trip speed:", median
        ));
    }
    out.push_str("========================================================\n\n");
    out
}
