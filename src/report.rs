//! Summary Reporter: human-readable exploration and analysis text.
//!
//! Everything writes to a caller-supplied writer so the end-to-end test can
//! capture output instead of scraping process stdout.

use crate::models::{Column, Record};
use crate::stats::{self, GroupMeans};
use anyhow::{Result, bail};
use std::io::Write;

/// Format a statistic with up to 4 decimals, trailing zeros trimmed.
fn fmt_num(x: f64) -> String {
    if !x.is_finite() {
        return "NA".to_string();
    }
    let s = format!("{x:.4}");
    let s = s.trim_end_matches('0').trim_end_matches('.');
    if s.is_empty() { "0".to_string() } else { s.to_string() }
}

/// Print the first rows, the table shape, and the missing-value check.
pub fn explore<W: Write>(out: &mut W, records: &[Record]) -> Result<()> {
    writeln!(out, "First 5 rows of the dataset:")?;
    writeln!(
        out,
        "{:>19}  {:>18}  {:>19}  {:>18}  species",
        Column::SepalLength.header(),
        Column::SepalWidth.header(),
        Column::PetalLength.header(),
        Column::PetalWidth.header(),
    )?;
    for r in records.iter().take(5) {
        writeln!(
            out,
            "{:>19}  {:>18}  {:>19}  {:>18}  {}",
            fmt_num(r.sepal_length),
            fmt_num(r.sepal_width),
            fmt_num(r.petal_length),
            fmt_num(r.petal_width),
            r.species,
        )?;
    }

    writeln!(
        out,
        "\nDataset shape: {} rows x {} columns",
        records.len(),
        Column::ALL.len() + 1
    )?;

    writeln!(out, "\nNumber of missing values in each column:")?;
    let mut total_missing = 0;
    for (column, missing) in stats::missing_counts(records) {
        writeln!(out, "  {column}: {missing}")?;
        total_missing += missing;
    }
    if total_missing == 0 {
        writeln!(out, "\nNo missing values detected. Dataset is clean!")?;
    }
    Ok(())
}

/// Print descriptive statistics, grouped means, and the observations.
///
/// Fails on an empty dataset instead of printing a degenerate table.
pub fn analyze<W: Write>(out: &mut W, records: &[Record]) -> Result<()> {
    if records.is_empty() {
        bail!("dataset is empty; nothing to analyze");
    }

    writeln!(out, "Basic statistics:")?;
    writeln!(
        out,
        "{:<19} {:>6} {:>8} {:>8} {:>6} {:>6} {:>6} {:>6} {:>6}",
        "column", "count", "mean", "std", "min", "25%", "50%", "75%", "max"
    )?;
    for s in stats::describe(records) {
        writeln!(
            out,
            "{:<19} {:>6} {:>8} {:>8} {:>6} {:>6} {:>6} {:>6} {:>6}",
            s.column.header(),
            s.count,
            fmt_num(s.mean),
            fmt_num(s.std),
            fmt_num(s.min),
            fmt_num(s.q1),
            fmt_num(s.median),
            fmt_num(s.q3),
            fmt_num(s.max),
        )?;
    }

    writeln!(out, "\nMean values of numerical columns grouped by species:")?;
    let groups = stats::grouped_means(records);
    write_grouped_means(out, &groups)?;

    writeln!(out, "\nObservations:")?;
    writeln!(
        out,
        "1. Virginica species has the highest mean for petal length and petal width."
    )?;
    writeln!(
        out,
        "2. Setosa species has the smallest mean for all numerical columns."
    )?;
    Ok(())
}

fn write_grouped_means<W: Write>(out: &mut W, groups: &[GroupMeans]) -> Result<()> {
    write!(out, "{:<12}", "species")?;
    for column in Column::ALL {
        write!(out, " {:>19}", column.header())?;
    }
    writeln!(out)?;
    for g in groups {
        write!(out, "{:<12}", g.species.label())?;
        for column in Column::ALL {
            write!(out, " {:>19}", fmt_num(g.mean(column)))?;
        }
        writeln!(out)?;
    }
    Ok(())
}
