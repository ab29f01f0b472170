//! iris-rs
//!
//! A lightweight Rust library for loading, storing, visualizing, and analyzing
//! the classic Iris dataset. Pairs with the `iris` CLI.
//!
//! ### Features
//! - Deterministic embedded reference dataset (150 records, 3 species)
//! - Save/reload as CSV or JSON in a tidy, analysis-friendly schema
//! - Descriptive statistics (count, mean, std, quartiles) and per-species means
//! - Five chart kinds rendered to SVG/PNG files: line, bar, histogram,
//!   scatter, pairwise grid
//!
//! ### Example
//! ```no_run
//! use iris_rs::dataset::{BuiltinIris, DataProvider};
//! use iris_rs::models::Column;
//! use iris_rs::viz::ChartKind;
//!
//! let records = BuiltinIris.produce()?;
//! iris_rs::storage::save_csv(&records, "iris.csv")?;
//! iris_rs::viz::render_chart(
//!     &records,
//!     ChartKind::Scatter { x: Column::SepalLength, y: Column::PetalLength },
//!     "scatter.svg",
//!     800,
//!     600,
//! )?;
//! let stats = iris_rs::stats::grouped_means(&records);
//! println!("{:#?}", stats);
//! # Ok::<(), anyhow::Error>(())
//! ```

pub mod dataset;
pub mod models;
pub mod pipeline;
pub mod report;
pub mod stats;
pub mod storage;
pub mod viz;

pub use dataset::{BuiltinIris, CsvFileProvider, DataProvider};
pub use models::{Column, Record, Species};
pub use storage::LoadError;
