use iris_rs::pipeline::{self, ChartFormat, DataSource, PipelineConfig};
use tempfile::tempdir;

#[test]
fn full_pipeline_against_builtin_dataset() {
    let dir = tempdir().unwrap();
    let config = PipelineConfig {
        source: DataSource::Builtin,
        chart_dir: dir.path().join("charts"),
        chart_format: ChartFormat::Svg,
        width: 640,
        height: 480,
    };

    let mut buf = Vec::new();
    let paths = pipeline::run(&config, &mut buf).unwrap();
    let text = String::from_utf8(buf).unwrap();

    // Statistics block: every numeric column reports count=150.
    assert!(text.contains("Basic statistics:"));
    for header in ["sepal length", "sepal width", "petal length", "petal width"] {
        let line = text
            .lines()
            .find(|l| l.starts_with(header))
            .unwrap_or_else(|| panic!("no stats line for {header}"));
        assert!(line.contains("150"), "count missing in: {line}");
    }

    // Three distinct label groups in the grouped-mean output.
    for label in ["setosa", "versicolor", "virginica"] {
        assert!(text.contains(label), "missing group {label}");
    }

    // Five chart artifacts, all written.
    assert_eq!(paths.len(), 5);
    for p in &paths {
        assert!(p.exists(), "chart not written: {}", p.display());
        assert!(p.extension().unwrap() == "svg");
    }

    assert!(text.contains("All pipeline stages completed successfully!"));
}

#[test]
fn load_failure_skips_downstream_stages() {
    let dir = tempdir().unwrap();
    let chart_dir = dir.path().join("charts");
    let config = PipelineConfig {
        source: DataSource::CsvFile(dir.path().join("missing.csv")),
        chart_dir: chart_dir.clone(),
        chart_format: ChartFormat::Svg,
        width: 640,
        height: 480,
    };

    let mut buf = Vec::new();
    let err = pipeline::run(&config, &mut buf).unwrap_err();
    assert!(
        format!("{err:#}").contains("loading the dataset"),
        "unexpected error: {err:#}"
    );

    // No charts were attempted.
    assert!(!chart_dir.exists());

    // Output stops after the loading announcement.
    let text = String::from_utf8(buf).unwrap();
    assert!(text.contains("Loading and exploring the dataset..."));
    assert!(!text.contains("Creating visualizations..."));
}

#[test]
fn pipeline_reads_back_exported_csv() {
    let dir = tempdir().unwrap();
    let data_path = dir.path().join("iris.csv");

    use iris_rs::dataset::{BuiltinIris, DataProvider};
    let records = BuiltinIris.produce().unwrap();
    iris_rs::storage::save_csv(&records, &data_path).unwrap();

    let config = PipelineConfig {
        source: DataSource::CsvFile(data_path),
        chart_dir: dir.path().join("charts"),
        chart_format: ChartFormat::Svg,
        width: 640,
        height: 480,
    };
    let mut buf = Vec::new();
    let paths = pipeline::run(&config, &mut buf).unwrap();
    assert_eq!(paths.len(), 5);
}
