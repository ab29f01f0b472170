use crate::models::{Column, Record, Species};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Descriptive statistics for one numeric column.
///
/// `std` is the sample standard deviation (n − 1 denominator); quartiles use
/// linear interpolation between closest ranks. `missing` counts non-finite
/// values (zero for the reference data).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ColumnSummary {
    pub column: Column,
    pub count: usize,
    pub missing: usize,
    pub mean: f64,
    pub std: f64,
    pub min: f64,
    pub q1: f64,
    pub median: f64,
    pub q3: f64,
    pub max: f64,
}

/// Per-species means of the four numeric columns.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GroupMeans {
    pub species: Species,
    /// Means indexed in [`Column::ALL`] order.
    pub means: [f64; 4],
}

impl GroupMeans {
    pub fn mean(&self, column: Column) -> f64 {
        let idx = Column::ALL.iter().position(|c| *c == column).unwrap_or(0);
        self.means[idx]
    }
}

/// Interpolated quantile over sorted values (closest-ranks method).
fn quantile(sorted: &[f64], p: f64) -> f64 {
    debug_assert!(!sorted.is_empty());
    if sorted.len() == 1 {
        return sorted[0];
    }
    let pos = p * (sorted.len() - 1) as f64;
    let lo = pos.floor() as usize;
    let hi = (lo + 1).min(sorted.len() - 1);
    let frac = pos - lo as f64;
    sorted[lo] + (sorted[hi] - sorted[lo]) * frac
}

/// Compute descriptive statistics for every numeric column.
///
/// An empty dataset yields an empty vec; callers wanting a hard failure on
/// empty input must check before calling (the reporter does).
pub fn describe(records: &[Record]) -> Vec<ColumnSummary> {
    if records.is_empty() {
        return Vec::new();
    }
    let mut out = Vec::with_capacity(Column::ALL.len());
    for column in Column::ALL {
        let mut vals: Vec<f64> = records
            .iter()
            .map(|r| column.value(r))
            .filter(|v| v.is_finite())
            .collect();
        let missing = records.len() - vals.len();
        vals.sort_by(|a, b| a.partial_cmp(b).expect("finite values"));
        let count = vals.len();
        let mean = vals.iter().sum::<f64>() / count as f64;
        let std = if count > 1 {
            let ss: f64 = vals.iter().map(|v| (v - mean).powi(2)).sum();
            (ss / (count - 1) as f64).sqrt()
        } else {
            0.0
        };
        out.push(ColumnSummary {
            column,
            count,
            missing,
            mean,
            std,
            min: vals[0],
            q1: quantile(&vals, 0.25),
            median: quantile(&vals, 0.5),
            q3: quantile(&vals, 0.75),
            max: vals[count - 1],
        });
    }
    out
}

/// Mean of each numeric column per species, in alphabetical species order
/// (setosa, versicolor, virginica). Species absent from the input are absent
/// from the output.
pub fn grouped_means(records: &[Record]) -> Vec<GroupMeans> {
    let mut groups: BTreeMap<Species, Vec<&Record>> = BTreeMap::new();
    for r in records {
        groups.entry(r.species).or_default().push(r);
    }

    let mut out = Vec::with_capacity(groups.len());
    for (species, members) in groups {
        let n = members.len() as f64;
        let mut means = [0.0f64; 4];
        for (i, column) in Column::ALL.iter().enumerate() {
            means[i] = members.iter().map(|r| column.value(r)).sum::<f64>() / n;
        }
        out.push(GroupMeans { species, means });
    }
    out
}

/// Non-finite value count per column. All zeros for the reference data.
pub fn missing_counts(records: &[Record]) -> [(Column, usize); 4] {
    Column::ALL.map(|column| {
        let missing = records
            .iter()
            .filter(|r| !column.value(r).is_finite())
            .count();
        (column, missing)
    })
}
