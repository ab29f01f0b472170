//! Visualization utilities: render iris charts to **SVG** or **PNG** files.
//!
//! - One fixed color per species (Office palette)
//! - Chart kinds: `Line`, `Bar`, `Histogram`, `Scatter`, `PairGrid`
//! - Output format chosen by file extension (`.svg` vs bitmap)
//!
//! Charts are file artifacts rather than interactive windows so the pipeline
//! and its tests run headless.

pub mod types;
pub mod util;

pub use types::{ChartKind, HISTOGRAM_BINS};

use crate::models::{Column, Record, Species};
use crate::stats;
use anyhow::{Result, anyhow};

use plotters::backend::DrawingBackend;
use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::series::LineSeries;
use plotters::style::FontFamily;

use plotters_bitmap::BitMapBackend;
use plotters_svg::SVGBackend;

use std::path::Path;
use std::sync::Once;

use util::{column_range, histogram_counts, padded, species_color};

/// One-time registration for a fallback "sans-serif" font when using the
/// `ab_glyph` text path. Required because `ab_glyph` doesn't discover OS fonts.
static INIT_FONTS: Once = Once::new();

fn ensure_fonts_registered() {
    // Safe to call many times; only runs once.
    INIT_FONTS.call_once(|| {
        let _ = plotters::style::register_font(
            "sans-serif",
            plotters::style::FontStyle::Normal,
            include_bytes!("../../assets/DejaVuSans.ttf"),
        );
    });
}

/// Render one chart for the given records.
///
/// The output format follows the file extension: `.svg` uses the SVG backend,
/// anything else the bitmap backend (PNG). An empty dataset is an error.
pub fn render_chart<P: AsRef<Path>>(
    records: &[Record],
    kind: ChartKind,
    out_path: P,
    width: u32,
    height: u32,
) -> Result<()> {
    if records.is_empty() {
        return Err(anyhow!("no data to plot"));
    }
    ensure_fonts_registered();
    let out_path = out_path.as_ref();
    let path_string = out_path.to_string_lossy().into_owned();

    if out_path.extension().and_then(|s| s.to_str()) == Some("svg") {
        let root = SVGBackend::new(path_string.as_str(), (width, height)).into_drawing_area();
        draw_chart(root, records, kind)?;
    } else {
        let root = BitMapBackend::new(path_string.as_str(), (width, height)).into_drawing_area();
        draw_chart(root, records, kind)?;
    }
    Ok(())
}

fn draw_chart<DB>(root: DrawingArea<DB, Shift>, records: &[Record], kind: ChartKind) -> Result<()>
where
    DB: DrawingBackend,
{
    root.fill(&WHITE).map_err(|e| anyhow!("{:?}", e))?;
    match kind {
        ChartKind::Line { column } => draw_line(&root, records, column)?,
        ChartKind::Bar { column } => draw_bar(&root, records, column)?,
        ChartKind::Histogram { column } => draw_histogram(&root, records, column)?,
        ChartKind::Scatter { x, y } => draw_scatter(&root, records, x, y)?,
        ChartKind::PairGrid => draw_pair_grid(&root, records)?,
    }
    root.present().map_err(|e| anyhow!("{:?}", e))?;
    Ok(())
}

/// Values of one column for one species, indexed from 0 within the subset.
fn species_series(records: &[Record], species: Species, column: Column) -> Vec<(f64, f64)> {
    records
        .iter()
        .filter(|r| r.species == species)
        .map(|r| column.value(r))
        .enumerate()
        .map(|(i, v)| (i as f64, v))
        .collect()
}

fn draw_line<DB>(root: &DrawingArea<DB, Shift>, records: &[Record], column: Column) -> Result<()>
where
    DB: DrawingBackend,
{
    let max_len = Species::ALL
        .iter()
        .map(|s| records.iter().filter(|r| r.species == *s).count())
        .max()
        .unwrap_or(0);
    let x_max = max_len.saturating_sub(1).max(1) as f64;
    let (vmin, vmax) = column_range(records, column);
    let (vmin, vmax) = padded(vmin, vmax);

    let mut chart = ChartBuilder::on(root)
        .margin(16)
        .caption(ChartKind::Line { column }.title(), (FontFamily::SansSerif, 24))
        .set_label_area_size(LabelAreaPosition::Left, 60)
        .set_label_area_size(LabelAreaPosition::Bottom, 48)
        .build_cartesian_2d(0f64..x_max, vmin..vmax)
        .map_err(|e| anyhow!("{:?}", e))?;

    chart
        .configure_mesh()
        .x_desc("Index")
        .y_desc(column.header())
        .label_style((FontFamily::SansSerif, 12))
        .axis_desc_style((FontFamily::SansSerif, 14))
        .draw()
        .map_err(|e| anyhow!("{:?}", e))?;

    for species in Species::ALL {
        let series = species_series(records, species, column);
        if series.is_empty() {
            continue;
        }
        let color = species_color(species);
        let style = ShapeStyle {
            color,
            filled: false,
            stroke_width: 2,
        };
        let elem = chart
            .draw_series(LineSeries::new(series, style))
            .map_err(|e| anyhow!("{:?}", e))?;
        let legend_color = color;
        elem.label(species.label()).legend(move |(x, y)| {
            EmptyElement::at((x, y))
                + Circle::new((x + 8, y), 4, legend_color.filled())
                + Text::new(species.label(), (x + 20, y), (FontFamily::SansSerif, 14))
        });
    }

    draw_inside_legend(&mut chart)
}

fn draw_bar<DB>(root: &DrawingArea<DB, Shift>, records: &[Record], column: Column) -> Result<()>
where
    DB: DrawingBackend,
{
    let groups = stats::grouped_means(records);
    let y_max = groups
        .iter()
        .map(|g| g.mean(column))
        .fold(0.0f64, f64::max)
        .max(f64::EPSILON)
        * 1.1;

    let mut chart = ChartBuilder::on(root)
        .margin(16)
        .caption(ChartKind::Bar { column }.title(), (FontFamily::SansSerif, 24))
        .set_label_area_size(LabelAreaPosition::Left, 60)
        .set_label_area_size(LabelAreaPosition::Bottom, 48)
        .build_cartesian_2d(-0.5f64..2.5f64, 0f64..y_max)
        .map_err(|e| anyhow!("{:?}", e))?;

    chart
        .configure_mesh()
        .x_desc("Species")
        .y_desc(column.header())
        .x_labels(3)
        .x_label_formatter(&|x: &f64| {
            let idx = x.round();
            if (idx - *x).abs() > 0.01 || idx < 0.0 {
                return String::new();
            }
            Species::ALL
                .get(idx as usize)
                .map(|s| s.label().to_string())
                .unwrap_or_default()
        })
        .label_style((FontFamily::SansSerif, 12))
        .axis_desc_style((FontFamily::SansSerif, 14))
        .draw()
        .map_err(|e| anyhow!("{:?}", e))?;

    for g in &groups {
        let Some(i) = Species::ALL.iter().position(|s| *s == g.species) else {
            continue;
        };
        let x = i as f64;
        let bar = Rectangle::new(
            [(x - 0.35, 0.0), (x + 0.35, g.mean(column))],
            species_color(g.species).filled(),
        );
        chart
            .draw_series(std::iter::once(bar))
            .map_err(|e| anyhow!("{:?}", e))?;
    }
    Ok(())
}

fn draw_histogram<DB>(
    root: &DrawingArea<DB, Shift>,
    records: &[Record],
    column: Column,
) -> Result<()>
where
    DB: DrawingBackend,
{
    let (vmin, vmax) = column_range(records, column);
    let counts = histogram_counts(
        records.iter().map(|r| column.value(r)),
        vmin,
        vmax,
        HISTOGRAM_BINS,
    );
    let y_max = counts.iter().copied().max().unwrap_or(0).max(1) as f64 * 1.05;
    let bin_width = (vmax - vmin) / HISTOGRAM_BINS as f64;

    let mut chart = ChartBuilder::on(root)
        .margin(16)
        .caption(
            ChartKind::Histogram { column }.title(),
            (FontFamily::SansSerif, 24),
        )
        .set_label_area_size(LabelAreaPosition::Left, 60)
        .set_label_area_size(LabelAreaPosition::Bottom, 48)
        .build_cartesian_2d(vmin..vmax, 0f64..y_max)
        .map_err(|e| anyhow!("{:?}", e))?;

    chart
        .configure_mesh()
        .x_desc(column.header())
        .y_desc("Frequency")
        .label_style((FontFamily::SansSerif, 12))
        .axis_desc_style((FontFamily::SansSerif, 14))
        .draw()
        .map_err(|e| anyhow!("{:?}", e))?;

    let fill = RGBColor(135, 206, 235); // sky blue
    for (i, count) in counts.iter().enumerate() {
        if *count == 0 {
            continue;
        }
        let x0 = vmin + i as f64 * bin_width;
        let x1 = x0 + bin_width;
        let y1 = *count as f64;
        chart
            .draw_series(std::iter::once(Rectangle::new(
                [(x0, 0.0), (x1, y1)],
                fill.filled(),
            )))
            .map_err(|e| anyhow!("{:?}", e))?;
        chart
            .draw_series(std::iter::once(Rectangle::new(
                [(x0, 0.0), (x1, y1)],
                BLACK.stroke_width(1),
            )))
            .map_err(|e| anyhow!("{:?}", e))?;
    }
    Ok(())
}

fn draw_scatter<DB>(
    root: &DrawingArea<DB, Shift>,
    records: &[Record],
    x_col: Column,
    y_col: Column,
) -> Result<()>
where
    DB: DrawingBackend,
{
    let (xmin, xmax) = padded_range(records, x_col);
    let (ymin, ymax) = padded_range(records, y_col);

    let mut chart = ChartBuilder::on(root)
        .margin(16)
        .caption(
            ChartKind::Scatter { x: x_col, y: y_col }.title(),
            (FontFamily::SansSerif, 24),
        )
        .set_label_area_size(LabelAreaPosition::Left, 60)
        .set_label_area_size(LabelAreaPosition::Bottom, 48)
        .build_cartesian_2d(xmin..xmax, ymin..ymax)
        .map_err(|e| anyhow!("{:?}", e))?;

    chart
        .configure_mesh()
        .x_desc(x_col.header())
        .y_desc(y_col.header())
        .label_style((FontFamily::SansSerif, 12))
        .axis_desc_style((FontFamily::SansSerif, 14))
        .draw()
        .map_err(|e| anyhow!("{:?}", e))?;

    for species in Species::ALL {
        let color = species_color(species);
        let elem = chart
            .draw_series(
                records
                    .iter()
                    .filter(|r| r.species == species)
                    .map(|r| Circle::new((x_col.value(r), y_col.value(r)), 3, color.filled())),
            )
            .map_err(|e| anyhow!("{:?}", e))?;
        let legend_color = color;
        elem.label(species.label()).legend(move |(x, y)| {
            EmptyElement::at((x, y))
                + Circle::new((x + 8, y), 4, legend_color.filled())
                + Text::new(species.label(), (x + 20, y), (FontFamily::SansSerif, 14))
        });
    }

    draw_inside_legend(&mut chart)
}

fn draw_pair_grid<DB>(root: &DrawingArea<DB, Shift>, records: &[Record]) -> Result<()>
where
    DB: DrawingBackend,
{
    let titled = root
        .titled(
            ChartKind::PairGrid.title().as_str(),
            (FontFamily::SansSerif, 20),
        )
        .map_err(|e| anyhow!("{:?}", e))?;
    let cells = titled.split_evenly((Column::ALL.len(), Column::ALL.len()));

    for (idx, cell) in cells.iter().enumerate() {
        let row = idx / Column::ALL.len();
        let col = idx % Column::ALL.len();
        let y_col = Column::ALL[row];
        let x_col = Column::ALL[col];
        if row == col {
            draw_grid_histogram(cell, records, x_col, row)?;
        } else {
            draw_grid_scatter(cell, records, x_col, y_col, row, col)?;
        }
    }
    Ok(())
}

fn draw_grid_scatter<DB>(
    cell: &DrawingArea<DB, Shift>,
    records: &[Record],
    x_col: Column,
    y_col: Column,
    row: usize,
    col: usize,
) -> Result<()>
where
    DB: DrawingBackend,
{
    let (xmin, xmax) = padded_range(records, x_col);
    let (ymin, ymax) = padded_range(records, y_col);

    let mut chart = ChartBuilder::on(cell)
        .margin(6)
        .set_label_area_size(LabelAreaPosition::Left, 30)
        .set_label_area_size(LabelAreaPosition::Bottom, 22)
        .build_cartesian_2d(xmin..xmax, ymin..ymax)
        .map_err(|e| anyhow!("{:?}", e))?;

    let mut mesh = chart.configure_mesh();
    mesh.x_labels(3)
        .y_labels(3)
        .label_style((FontFamily::SansSerif, 9))
        .axis_desc_style((FontFamily::SansSerif, 10));
    if row == Column::ALL.len() - 1 {
        mesh.x_desc(x_col.header());
    }
    if col == 0 {
        mesh.y_desc(y_col.header());
    }
    mesh.draw().map_err(|e| anyhow!("{:?}", e))?;

    for species in Species::ALL {
        let color = species_color(species);
        chart
            .draw_series(
                records
                    .iter()
                    .filter(|r| r.species == species)
                    .map(|r| Circle::new((x_col.value(r), y_col.value(r)), 2, color.filled())),
            )
            .map_err(|e| anyhow!("{:?}", e))?;
    }
    Ok(())
}

/// Diagonal cell: per-species histograms of one column, translucent overlays
/// in shared bins.
fn draw_grid_histogram<DB>(
    cell: &DrawingArea<DB, Shift>,
    records: &[Record],
    column: Column,
    row: usize,
) -> Result<()>
where
    DB: DrawingBackend,
{
    let (vmin, vmax) = column_range(records, column);
    let bin_width = (vmax - vmin) / HISTOGRAM_BINS as f64;

    let per_species: Vec<(Species, Vec<usize>)> = Species::ALL
        .iter()
        .map(|s| {
            let counts = histogram_counts(
                records
                    .iter()
                    .filter(|r| r.species == *s)
                    .map(|r| column.value(r)),
                vmin,
                vmax,
                HISTOGRAM_BINS,
            );
            (*s, counts)
        })
        .collect();
    let y_max = per_species
        .iter()
        .flat_map(|(_, c)| c.iter().copied())
        .max()
        .unwrap_or(0)
        .max(1) as f64
        * 1.05;

    let mut chart = ChartBuilder::on(cell)
        .margin(6)
        .set_label_area_size(LabelAreaPosition::Left, 30)
        .set_label_area_size(LabelAreaPosition::Bottom, 22)
        .build_cartesian_2d(vmin..vmax, 0f64..y_max)
        .map_err(|e| anyhow!("{:?}", e))?;

    let mut mesh = chart.configure_mesh();
    mesh.x_labels(3)
        .y_labels(3)
        .label_style((FontFamily::SansSerif, 9))
        .axis_desc_style((FontFamily::SansSerif, 10));
    if row == Column::ALL.len() - 1 {
        mesh.x_desc(column.header());
    }
    mesh.draw().map_err(|e| anyhow!("{:?}", e))?;

    for (species, counts) in &per_species {
        let fill = species_color(*species).mix(0.55).filled();
        for (i, count) in counts.iter().enumerate() {
            if *count == 0 {
                continue;
            }
            let x0 = vmin + i as f64 * bin_width;
            let x1 = x0 + bin_width;
            chart
                .draw_series(std::iter::once(Rectangle::new(
                    [(x0, 0.0), (x1, *count as f64)],
                    fill,
                )))
                .map_err(|e| anyhow!("{:?}", e))?;
        }
    }
    Ok(())
}

fn padded_range(records: &[Record], column: Column) -> (f64, f64) {
    let (min, max) = column_range(records, column);
    padded(min, max)
}

fn draw_inside_legend<'a, DB, CT>(chart: &mut ChartContext<'a, DB, CT>) -> Result<()>
where
    DB: DrawingBackend + 'a,
    CT: plotters::coord::CoordTranslate,
{
    chart
        .configure_series_labels()
        .border_style(BLACK)
        .position(SeriesLabelPosition::UpperLeft)
        .background_style(WHITE.mix(0.85))
        .label_font((FontFamily::SansSerif, 14))
        .draw()
        .map_err(|e| anyhow!("{:?}", e))?;
    Ok(())
}
