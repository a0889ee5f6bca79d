//! hrtfsynth CLI - Synthetic HRTF fixture dataset generator
//!
//! This binary writes, previews, and checks the directional impulse response
//! datasets used as test fixtures for binaural spatialization code.

use clap::{Parser, Subcommand};
use std::process::ExitCode;

use hrtfsynth_cli::commands;
use hrtfsynth_cli::input::{GenerateOptions, DEFAULT_OUTPUT_DIR};
use hrtfsynth_spec::{DEFAULT_DURATION_MS, DEFAULT_SAMPLE_RATE};

/// hrtfsynth - Synthetic HRTF Dataset Generator
#[derive(Parser)]
#[command(name = "hrtfsynth")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate the dataset: per-elevation WAV files and a JSON manifest
    Generate {
        /// Output directory
        #[arg(short, long, default_value = DEFAULT_OUTPUT_DIR)]
        output: String,

        /// Sample rate in Hz
        #[arg(long, default_value_t = DEFAULT_SAMPLE_RATE)]
        sample_rate: u32,

        /// Impulse response duration in milliseconds
        #[arg(long, default_value_t = DEFAULT_DURATION_MS)]
        duration_ms: f64,

        /// JSON grid file replacing the default sampling grid
        #[arg(short, long)]
        grid: Option<String>,

        /// Dataset name written to the manifest
        #[arg(long)]
        name: Option<String>,

        /// Dataset description written to the manifest
        #[arg(long)]
        description: Option<String>,

        /// Output machine-readable JSON diagnostics (no colored output)
        #[arg(long)]
        json: bool,
    },

    /// List the directions a grid would generate, without writing anything
    Grid {
        /// JSON grid file (default grid when omitted)
        #[arg(short, long)]
        grid: Option<String>,

        /// Output machine-readable JSON diagnostics (no colored output)
        #[arg(long)]
        json: bool,
    },

    /// Check a generated dataset against its manifest
    Verify {
        /// Dataset root containing the manifest
        #[arg(short, long)]
        dataset: String,

        /// Output machine-readable JSON diagnostics (no colored output)
        #[arg(long)]
        json: bool,
    },
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Generate {
            output,
            sample_rate,
            duration_ms,
            grid,
            name,
            description,
            json,
        } => {
            let options = GenerateOptions {
                output,
                sample_rate,
                duration_ms,
                grid,
                name,
                description,
            };
            commands::generate::run(&options, json)
        }
        Commands::Grid { grid, json } => commands::grid::run(grid.as_deref(), json),
        Commands::Verify { dataset, json } => commands::verify::run(&dataset, json),
    };

    match result {
        Ok(code) => code,
        Err(e) => {
            eprintln!("{}: {:#}", colored::Colorize::red("error"), e);
            ExitCode::from(1)
        }
    }
}
