//! End-to-end pipeline: load → explore → analyze → render charts.
//!
//! The reference behavior is a single linear run; configuration is passed in
//! explicitly instead of read from globals, and charts are written as file
//! artifacts so the whole pipeline runs headless.

use crate::dataset::{BuiltinIris, CsvFileProvider, DataProvider};
use crate::models::{Column, Record};
use crate::viz::{self, ChartKind};
use crate::report;
use anyhow::{Context, Result};
use log::info;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Where the dataset comes from.
#[derive(Debug, Clone)]
pub enum DataSource {
    /// The embedded 150-row reference table.
    Builtin,
    /// A CSV previously written by [`crate::storage::save_csv`].
    CsvFile(PathBuf),
}

/// Chart output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ChartFormat {
    #[default]
    Svg,
    Png,
}

impl ChartFormat {
    pub fn extension(self) -> &'static str {
        match self {
            ChartFormat::Svg => "svg",
            ChartFormat::Png => "png",
        }
    }
}

/// Pipeline configuration. Replaces the reference's global path constant.
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    pub source: DataSource,
    pub chart_dir: PathBuf,
    pub chart_format: ChartFormat,
    pub width: u32,
    pub height: u32,
}

impl PipelineConfig {
    pub fn new(chart_dir: impl Into<PathBuf>) -> Self {
        Self {
            source: DataSource::Builtin,
            chart_dir: chart_dir.into(),
            chart_format: ChartFormat::default(),
            width: 800,
            height: 600,
        }
    }
}

/// The five reference charts, in run order, with the observation printed
/// after each.
fn chart_plan() -> [(ChartKind, &'static str); 5] {
    [
        (
            ChartKind::Line {
                column: Column::PetalLength,
            },
            "Observation: The line chart shows clear differences in petal length trends across species.",
        ),
        (
            ChartKind::Bar {
                column: Column::PetalWidth,
            },
            "Observation: Virginica species has the largest average petal width.",
        ),
        (
            ChartKind::Histogram {
                column: Column::SepalLength,
            },
            "Observation: Most sepal lengths are concentrated between 5 and 6 cm.",
        ),
        (
            ChartKind::Scatter {
                x: Column::SepalLength,
                y: Column::PetalLength,
            },
            "Observation: There is a strong positive correlation between petal length and sepal length.",
        ),
        (
            ChartKind::PairGrid,
            "Observation: Pairplot shows clear separations among species in petal-related dimensions.",
        ),
    ]
}

/// Run the full pipeline, writing all text to `out` and the chart artifacts
/// into `config.chart_dir`. Returns the chart paths written.
///
/// A load failure aborts before any downstream stage and surfaces as `Err`,
/// so the CLI exits non-zero (the reference exited 0 on load failure; see
/// DESIGN.md).
pub fn run<W: Write>(config: &PipelineConfig, out: &mut W) -> Result<Vec<PathBuf>> {
    writeln!(out, "Loading and exploring the dataset...")?;
    let records = load(&config.source).context("An error occurred while loading the dataset")?;
    report::explore(out, &records)?;

    writeln!(out, "\nPerforming basic data analysis...")?;
    report::analyze(out, &records)?;

    writeln!(out, "\nCreating visualizations...")?;
    let paths = render_all(config, &records, out)?;

    writeln!(out, "\nAll pipeline stages completed successfully!")?;
    Ok(paths)
}

fn load(source: &DataSource) -> Result<Vec<Record>> {
    let records = match source {
        DataSource::Builtin => BuiltinIris.produce()?,
        DataSource::CsvFile(path) => CsvFileProvider::new(path.clone()).produce()?,
    };
    info!("dataset loaded: {} records", records.len());
    Ok(records)
}

fn render_all<W: Write>(
    config: &PipelineConfig,
    records: &[Record],
    out: &mut W,
) -> Result<Vec<PathBuf>> {
    std::fs::create_dir_all(&config.chart_dir).with_context(|| {
        format!("creating chart directory {}", config.chart_dir.display())
    })?;

    let mut paths = Vec::new();
    for (kind, observation) in chart_plan() {
        let path = chart_path(&config.chart_dir, &kind, config.chart_format);
        viz::render_chart(records, kind, &path, config.width, config.height)
            .with_context(|| format!("rendering {}", path.display()))?;
        info!("wrote chart {}", path.display());
        writeln!(out, "{observation}")?;
        paths.push(path);
    }
    Ok(paths)
}

fn chart_path(dir: &Path, kind: &ChartKind, format: ChartFormat) -> PathBuf {
    dir.join(format!("{}.{}", kind.file_stem(), format.extension()))
}
