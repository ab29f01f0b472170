use anyhow::Result;
use clap::{Args, Parser, Subcommand, ValueEnum};
use iris_rs::dataset::{BuiltinIris, DataProvider};
use iris_rs::pipeline::{self, ChartFormat, DataSource, PipelineConfig};
use iris_rs::storage;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "iris",
    version,
    about = "Load, store, visualize & summarize the Iris dataset"
)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run the full pipeline: explore, analyze, and render all five charts.
    Run(RunArgs),
    /// Write the built-in dataset to a file.
    Export(ExportArgs),
}

#[derive(ValueEnum, Clone, Debug)]
enum OutFormat {
    Csv,
    Json,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum PlotFormat {
    Svg,
    Png,
}

impl From<PlotFormat> for ChartFormat {
    fn from(f: PlotFormat) -> Self {
        match f {
            PlotFormat::Svg => ChartFormat::Svg,
            PlotFormat::Png => ChartFormat::Png,
        }
    }
}

#[derive(Args, Debug)]
struct RunArgs {
    /// Load the dataset from a previously exported CSV instead of the
    /// built-in table.
    #[arg(long)]
    data: Option<PathBuf>,
    /// Directory for the chart artifacts (default: "charts").
    #[arg(long, default_value = "charts")]
    out_dir: PathBuf,
    /// Chart file format.
    #[arg(long, value_enum, default_value_t = PlotFormat::Svg)]
    format: PlotFormat,
    /// Width of each chart (default 800).
    #[arg(long, default_value_t = 800)]
    width: u32,
    /// Height of each chart (default 600).
    #[arg(long, default_value_t = 600)]
    height: u32,
}

#[derive(Args, Debug)]
struct ExportArgs {
    /// Destination file (format inferred by --format or extension).
    #[arg(long)]
    out: PathBuf,
    /// Output format (csv or json). If omitted, inferred from --out extension.
    #[arg(long, value_enum)]
    format: Option<OutFormat>,
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    match cli.cmd {
        Command::Run(args) => cmd_run(args),
        Command::Export(args) => cmd_export(args),
    }
}

fn cmd_run(args: RunArgs) -> Result<()> {
    let config = PipelineConfig {
        source: match args.data {
            Some(path) => DataSource::CsvFile(path),
            None => DataSource::Builtin,
        },
        chart_dir: args.out_dir,
        chart_format: args.format.into(),
        width: args.width,
        height: args.height,
    };
    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    let paths = pipeline::run(&config, &mut out)?;
    eprintln!("Wrote {} charts to {}", paths.len(), config.chart_dir.display());
    Ok(())
}

fn cmd_export(args: ExportArgs) -> Result<()> {
    let records = BuiltinIris.produce()?;
    let fmt = match args.format {
        Some(OutFormat::Csv) => "csv",
        Some(OutFormat::Json) => "json",
        None => args
            .out
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("csv"),
    }
    .to_ascii_lowercase();
    match fmt.as_str() {
        "csv" => storage::save_csv(&records, &args.out)?,
        "json" => storage::save_json(&records, &args.out)?,
        other => anyhow::bail!("unsupported format: {}", other),
    }
    eprintln!("Saved {} rows to {}", records.len(), args.out.display());
    Ok(())
}
