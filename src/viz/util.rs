//! Utility functions for visualization: colors, ranges, histogram binning.

use crate::models::{Column, Record, Species};
use plotters::prelude::*;

/// Per-species series colors (Microsoft Office chart palette).
/// Order matches [`Species::ALL`]: blue, orange, green.
const SPECIES3: [RGBColor; 3] = [
    RGBColor(68, 114, 196), // blue   (#4472C4)
    RGBColor(237, 125, 49), // orange (#ED7D31)
    RGBColor(112, 173, 71), // green  (#70AD47)
];

/// Get the series color for a species.
#[inline]
pub fn species_color(species: Species) -> RGBAColor {
    let idx = Species::ALL
        .iter()
        .position(|s| *s == species)
        .unwrap_or(0);
    SPECIES3[idx].to_rgba()
}

/// Finite min/max of one column, widened when degenerate so Plotters always
/// gets a non-empty range.
pub fn column_range(records: &[Record], column: Column) -> (f64, f64) {
    let values = records.iter().map(|r| column.value(r)).filter(|v| v.is_finite());
    let (mut min, mut max) = values.fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
        (lo.min(v), hi.max(v))
    });
    if !min.is_finite() || !max.is_finite() {
        return (0.0, 1.0);
    }
    if (max - min).abs() < f64::EPSILON {
        min -= 0.5;
        max += 0.5;
    }
    (min, max)
}

/// Pad a range by 5% on both ends.
pub fn padded(min: f64, max: f64) -> (f64, f64) {
    let pad = (max - min) * 0.05;
    (min - pad, max + pad)
}

/// Bin counts over `[min, max)` with the last bin closed at `max`.
pub fn histogram_counts(values: impl Iterator<Item = f64>, min: f64, max: f64, bins: usize) -> Vec<usize> {
    let mut counts = vec![0usize; bins];
    let width = (max - min) / bins as f64;
    for v in values {
        if !v.is_finite() || v < min || v > max {
            continue;
        }
        let idx = (((v - min) / width) as usize).min(bins - 1);
        counts[idx] += 1;
    }
    counts
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn histogram_counts_cover_all_values() {
        let values = [0.0, 0.1, 0.5, 0.99, 1.0];
        let counts = histogram_counts(values.iter().copied(), 0.0, 1.0, 4);
        assert_eq!(counts.iter().sum::<usize>(), values.len());
        // max lands in the last bin, not out of range
        assert_eq!(counts[3], 2);
    }

    #[test]
    fn degenerate_range_is_widened() {
        let records = vec![crate::models::Record {
            sepal_length: 5.0,
            sepal_width: 3.0,
            petal_length: 1.0,
            petal_width: 0.2,
            species: Species::Setosa,
        }];
        let (lo, hi) = column_range(&records, Column::SepalLength);
        assert!(hi - lo >= 1.0);
    }
}
