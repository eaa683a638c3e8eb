//! FlagScope viewer.
//!
//! ```bash
//! # Open an Excel or CSV file (first column is time)
//! flagscope data.xlsx
//!
//! # Generate 2000 rows with 9 signals
//! flagscope --demo 2000 9
//!
//! # Battery charge/discharge demo
//! flagscope --demo batt
//! ```

use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::Parser;

use flagscope::config::{PlotConfig, DEFAULT_SETTINGS_FILE};
use flagscope::data::demo;
use flagscope::{ClassifiedDataset, Dataset};

/// Files tried, in order, when neither a path nor `--demo` is given.
const DEFAULT_DATA_FILES: [&str; 3] = ["data.xls", "data.xlsx", "data.csv"];

/// Synchronized telemetry viewer with click-to-zoom flag rows
#[derive(Parser)]
#[command(name = "flagscope")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Excel (xls/xlsx) or CSV file to open
    #[arg(value_name = "FILE")]
    file: Option<PathBuf>,

    /// Generate demo data instead of loading a file: `batt`, or POINTS SIGNALS
    #[arg(long, num_args = 1..=2, value_name = "batt | POINTS SIGNALS", conflicts_with = "file")]
    demo: Option<Vec<String>>,

    /// Settings file
    #[arg(long, value_name = "PATH", default_value = DEFAULT_SETTINGS_FILE)]
    settings: PathBuf,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = PlotConfig::load_or_default(&cli.settings);
    let (title, dataset) = load_dataset(&cli)?;
    let data = ClassifiedDataset::new(dataset).context("failed to classify dataset columns")?;

    flagscope::run_app(&title, data, config, cli.settings)
        .map_err(|e| anyhow::anyhow!("window error: {e}"))
}

fn load_dataset(cli: &Cli) -> Result<(String, Dataset)> {
    if let Some(args) = &cli.demo {
        let ds = match args.as_slice() {
            [mode] if mode == "batt" => demo::battery(),
            [points, signals] => {
                let points = points.parse().context("POINTS must be an integer")?;
                let signals = signals.parse().context("SIGNALS must be an integer")?;
                demo::generate(points, signals)
            }
            _ => bail!("--demo expects `batt` or POINTS SIGNALS"),
        }
        .context("failed to generate demo data")?;
        return Ok(("FlagScope (demo)".to_string(), ds));
    }

    let default_file = DEFAULT_DATA_FILES
        .into_iter()
        .map(PathBuf::from)
        .find(|p| p.exists());
    let path = match (&cli.file, default_file) {
        (Some(p), _) => p.clone(),
        (None, Some(p)) => p,
        (None, None) => match rfd::FileDialog::new()
            .add_filter("Excel files", &["xls", "xlsx"])
            .add_filter("CSV files", &["csv"])
            .pick_file()
        {
            Some(p) => p,
            None => bail!("no data file selected"),
        },
    };
    log::info!("loading {}", path.display());
    let ds = Dataset::from_path(&path)
        .with_context(|| format!("failed to load {}", path.display()))?;
    Ok((format!("FlagScope - {}", path.display()), ds))
}
