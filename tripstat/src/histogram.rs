//! Equal-width histogram binning and ASCII bar rendering.

/// One histogram bucket covering `[low, high)` (the last bucket is closed).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Bin {
    pub low: f64,
    pub high: f64,
    pub count: usize,
}

/// Bucket `values` into `bin_count` equal-width bins spanning `[vmin, vmax]`.
///
/// A degenerate range (all values equal) is widened to 1 so the division is
/// defined; a value exactly at `vmax` is clamped into the last bin.
pub fn bin_values(values: &[f64], bin_count: usize) -> Vec<Bin> {
    if values.is_empty() || bin_count == 0 {
        return Vec::new();
    }
    let vmin = values.iter().copied().fold(f64::INFINITY, f64::min);
    let vmax = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let range = if vmax > vmin { vmax - vmin } else { 1.0 };
    let step = range / bin_count as f64;

    let mut counts = vec![0usize; bin_count];
    for &value in values {
        let idx = ((value - vmin) / range * bin_count as f64) as usize;
        counts[idx.min(bin_count - 1)] += 1;
    }

    counts
        .into_iter()
        .enumerate()
        .map(|(i, count)| {
            let low = vmin + i as f64 * step;
            Bin {
                low,
                high: low + step,
                count,
            }
        })
        .collect()
}

/// Render a labeled histogram block, one bin per row with a `*` bar scaled to
/// the peak bin. Returns `None` for an empty sequence.
pub fn render_histogram(
    values: &[f64],
    tag: &str,
    unit: &str,
    bin_count: usize,
    bar_width: usize,
) -> Option<String> {
    if values.is_empty() {
        return None;
    }
    let bins = bin_values(values, bin_count);
    let peak = bins.iter().map(|b| b.count).max().unwrap_or(0).max(1);

    let mut out = format!("{} histogram ({})  —  scaled to {}\n", tag, unit, bar_width);
    for bin in &bins {
        let stars = (bin.count as f64 / peak as f64 * bar_width as f64).round() as usize;
        let label = format!("{:.1} – {:.1} {}", bin.low, bin.high, unit);
        out.push_str(&format!(
            "{:<20} \t | {:>3} | {}\n",
            label,
            bin.count,
            "*".repeat(stars)
        ));
    }
    out.push('\n');
    Some(out)
}

/// 24-bin usage histogram over calendar hours `[0..23]`.
pub fn render_hour_histogram(hours: &[u32], bar_width: usize) -> Option<String> {
    if hours.is_empty() {
        return None;
    }
    let mut counts = [0usize; 24];
    for &hour in hours {
        if (hour as usize) < counts.len() {
            counts[hour as usize] += 1;
        }
    }
    let peak = counts.iter().copied().max().unwrap_or(0).max(1);

    let mut out = format!("Usage by hour of day — scaled to {}\n", bar_width);
    for (hour, &count) in counts.iter().enumerate() {
        let stars = (count as f64 / peak as f64 * bar_width as f64).round() as usize;
        let label = format!("{:02}:00–{:02}:00", hour, (hour + 1) % 24);
        out.push_str(&format!(
            "{:<11} \t\t | {:>3} | {}\n",
            label,
            count,
            "*".repeat(stars)
        ));
    }
    out.push('\n');
    Some(out)
}
