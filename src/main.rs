//! lightlist-bc - Light List to Bridge Command converter
//!
//! # Usage
//!
//! ```bash
//! # Convert a District 1 extract with the default New York Harbor box
//! lightlist-bc convert district1.csv
//!
//! # Another area, 0..360 longitudes, JSON report
//! lightlist-bc convert d7.csv --bbox=-71.7,17.3,-68.3,19.9 --lon-mode wrap360 --json
//!
//! # Check how one characteristic is read
//! lightlist-bc interpret "Fl(2) W 5s 12m 9M"
//!
//! # Dump the effective configuration as a starting lightlist.toml
//! lightlist-bc print-config > lightlist.toml
//! ```
//!
//! # Environment Variables
//!
//! - `LIGHTLIST_CONFIG`: Path to a TOML config file
//! - `RUST_LOG`: Logging level (default: info)

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;

use lightlist_bc::geo::{BoundingBox, LongitudeMode};
use lightlist_bc::{ConverterConfig, Converter, InputFormat, Interpreter};

// ============================================================================
// CLI Arguments
// ============================================================================

#[derive(Parser, Debug)]
#[command(name = "lightlist-bc")]
#[command(about = "Convert NOAA/USCG Light List data into Bridge Command Buoy.ini and Light.ini")]
#[command(version)]
struct CliArgs {
    #[command(subcommand)]
    command: SubCommand,
}

#[derive(clap::Subcommand, Debug)]
enum SubCommand {
    /// Convert Light List files into Buoy.ini and Light.ini
    Convert {
        /// Light List files (CSV, two-line text or PDF-extracted text)
        #[arg(required = true)]
        inputs: Vec<PathBuf>,

        /// Config file (overrides LIGHTLIST_CONFIG and ./lightlist.toml)
        #[arg(long)]
        config: Option<PathBuf>,

        /// Directory receiving the INI files
        #[arg(short, long)]
        output_dir: Option<PathBuf>,

        /// Area to keep: MIN_LON,MIN_LAT,MAX_LON,MAX_LAT
        #[arg(long, value_name = "MIN_LON,MIN_LAT,MAX_LON,MAX_LAT", allow_hyphen_values = true)]
        bbox: Option<BoundingBox>,

        /// Output longitude convention: neg_west, wrap360 or force_west_neg
        #[arg(long)]
        lon_mode: Option<LongitudeMode>,

        /// Input layout: auto, table, two_line, positional or pdf_text
        #[arg(long)]
        format: Option<InputFormat>,

        /// Parse and classify but write nothing
        #[arg(long)]
        dry_run: bool,

        /// Print the run report as JSON
        #[arg(long)]
        json: bool,
    },

    /// Interpret one characteristic string and print the result as JSON
    Interpret {
        /// Characteristic text, e.g. "Fl G 4s 6M"
        text: String,

        /// Structure / remarks text
        #[arg(long, default_value = "")]
        structure: String,

        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Print the effective configuration as TOML
    PrintConfig {
        #[arg(long)]
        config: Option<PathBuf>,
    },
}

// ============================================================================
// Main Entry Point
// ============================================================================

fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let args = CliArgs::parse();

    match args.command {
        SubCommand::Convert {
            inputs,
            config,
            output_dir,
            bbox,
            lon_mode,
            format,
            dry_run,
            json,
        } => {
            let mut cfg = load_config(config.as_deref())?;
            if let Some(dir) = output_dir {
                cfg.output.dir = dir;
            }
            if let Some(bbox) = bbox {
                cfg.bbox = bbox;
            }
            if let Some(mode) = lon_mode {
                cfg.longitude.mode = mode;
            }
            if let Some(format) = format {
                cfg.input.format = format;
            }

            let converter = Converter::new(cfg)
                .context("Invalid converter configuration")?
                .with_dry_run(dry_run);

            let cfg = converter.config();
            info!(
                inputs = inputs.len(),
                bbox = %cfg.bbox,
                format = %cfg.input.format,
                output = %cfg.output.dir.display(),
                "Starting conversion"
            );
            let report = converter.convert(&inputs).context("Conversion failed")?;

            if json {
                println!(
                    "{}",
                    serde_json::to_string_pretty(&report).context("Failed to serialize report")?
                );
            } else {
                report.print_summary();
            }
        }

        SubCommand::Interpret {
            text,
            structure,
            config,
        } => {
            let cfg = load_config(config.as_deref())?;
            let interpreter =
                Interpreter::new(cfg.interpreter).context("Invalid interpreter configuration")?;
            let interpretation = interpreter.interpret(&text, &structure);
            println!(
                "{}",
                serde_json::to_string_pretty(&interpretation)
                    .context("Failed to serialize interpretation")?
            );
        }

        SubCommand::PrintConfig { config } => {
            let cfg = load_config(config.as_deref())?;
            print!("{}", cfg.to_toml().context("Failed to serialize config")?);
        }
    }

    Ok(())
}

fn load_config(path: Option<&std::path::Path>) -> Result<ConverterConfig> {
    ConverterConfig::load(path).context("Failed to load converter config")
}
