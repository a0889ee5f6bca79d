//! Grid command implementation
//!
//! Dry run: validates a grid and lists the directions a generation run would
//! produce, without writing anything.

use anyhow::{Context, Result};
use colored::Colorize;
use hrtfsynth_spec::naming;
use hrtfsynth_spec::GridConfig;
use std::process::ExitCode;

use super::json_output::{CommandOutput, ElevationSummary, GridSummary, JsonError};
use crate::input::load_grid;

/// Run the grid command
///
/// # Arguments
/// * `grid_path` - Optional JSON grid file (default grid when absent)
/// * `json_output` - Whether to output machine-readable JSON
pub fn run(grid_path: Option<&str>, json_output: bool) -> Result<ExitCode> {
    if json_output {
        run_json(grid_path)
    } else {
        run_human(grid_path)
    }
}

fn run_human(grid_path: Option<&str>) -> Result<ExitCode> {
    let grid = load_grid(grid_path).context("Failed to load grid")?;
    grid.validate().context("Invalid grid")?;

    println!(
        "{} {}",
        "Grid:".cyan().bold(),
        grid_path.unwrap_or("default")
    );
    for band in &grid.bands {
        let azimuths: Vec<String> = band.azimuths().map(|a| format!("{:+}", a)).collect();
        println!(
            "  {} {:>3} {}",
            naming::elevation_dir(band.elevation),
            band.len(),
            azimuths.join(" ").dimmed()
        );
    }
    println!(
        "\n{} {} elevations, {} directions, {} files",
        "Total:".cyan().bold(),
        grid.bands.len(),
        grid.direction_count(),
        grid.direction_count() * 2
    );

    Ok(ExitCode::SUCCESS)
}

fn run_json(grid_path: Option<&str>) -> Result<ExitCode> {
    match load_grid(grid_path).and_then(|grid| grid.validate().map(|_| grid)) {
        Ok(grid) => {
            CommandOutput::success(summarize(&grid)).print()?;
            Ok(ExitCode::SUCCESS)
        }
        Err(e) => {
            let mut error = JsonError::from_coded(&e);
            if let Some(path) = grid_path {
                error = error.with_file(path);
            }
            CommandOutput::<GridSummary>::failure(vec![error]).print()?;
            Ok(ExitCode::from(1))
        }
    }
}

/// Builds the plan summary for a validated grid.
pub fn summarize(grid: &GridConfig) -> GridSummary {
    GridSummary {
        direction_count: grid.direction_count(),
        file_count: grid.direction_count() * 2,
        elevations: grid
            .bands
            .iter()
            .map(|band| ElevationSummary {
                elevation: band.elevation,
                directory: naming::elevation_dir(band.elevation),
                azimuths: band.azimuths().collect(),
            })
            .collect(),
    }
}
