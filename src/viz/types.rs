//! Public types and constants for the visualization module.

use crate::models::Column;

/// Fixed histogram bin count, matching the reference charts.
pub const HISTOGRAM_BINS: usize = 15;

/// Chart kinds supported by this module.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChartKind {
    /// One polyline per species; x is the row index within that species'
    /// subset (each subset independently indexed from 0).
    Line { column: Column },
    /// One bar per species, height = grouped mean of the column.
    Bar { column: Column },
    /// Distribution of one column, [`HISTOGRAM_BINS`] bins, raw counts.
    Histogram { column: Column },
    /// Two columns as x/y, point color keyed by species.
    Scatter { x: Column, y: Column },
    /// All numeric column pairs; univariate histograms on the diagonal.
    PairGrid,
}

impl ChartKind {
    /// Default chart title.
    pub fn title(&self) -> String {
        match self {
            ChartKind::Line { column } => format!("{} Trend by Species", title_case(column)),
            ChartKind::Bar { column } => format!("Average {} by Species", title_case(column)),
            ChartKind::Histogram { column } => format!("Distribution of {}", title_case(column)),
            ChartKind::Scatter { x, y } => format!("{} vs. {}", title_case(x), title_case(y)),
            ChartKind::PairGrid => "Pairwise Relationships Among Features".to_string(),
        }
    }

    /// File stem used by the pipeline when naming chart artifacts.
    pub fn file_stem(&self) -> String {
        match self {
            ChartKind::Line { column } => format!("line_{}", column.slug()),
            ChartKind::Bar { column } => format!("bar_{}", column.slug()),
            ChartKind::Histogram { column } => format!("hist_{}", column.slug()),
            ChartKind::Scatter { x, y } => format!("scatter_{}_{}", x.slug(), y.slug()),
            ChartKind::PairGrid => "pairs".to_string(),
        }
    }
}

/// "sepal length (cm)" -> "Sepal Length (cm)".
fn title_case(column: &Column) -> String {
    match column {
        Column::SepalLength => "Sepal Length (cm)",
        Column::SepalWidth => "Sepal Width (cm)",
        Column::PetalLength => "Petal Length (cm)",
        Column::PetalWidth => "Petal Width (cm)",
    }
    .to_string()
}
