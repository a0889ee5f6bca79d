//! Generate command implementation
//!
//! Writes the synthetic HRTF dataset: one directory per elevation, one WAV
//! per (direction, ear), and the manifest last.

use anyhow::{Context, Result};
use colored::Colorize;
use hrtfsynth_backend::{generate, GenerateError, GenerateResult};
use hrtfsynth_spec::naming;
use hrtfsynth_spec::DatasetSpec;
use std::path::Path;
use std::process::ExitCode;

use super::json_output::{CommandOutput, GenerateSummary, JsonError};
use crate::input::GenerateOptions;

/// Run the generate command
///
/// # Returns
/// Exit code: 0 success, 1 on any configuration or generation error
pub fn run(options: &GenerateOptions, json_output: bool) -> Result<ExitCode> {
    if json_output {
        run_json(options)
    } else {
        run_human(options)
    }
}

/// Run generate with human-readable (colored) output.
fn run_human(options: &GenerateOptions) -> Result<ExitCode> {
    let spec = options.to_spec().context("Invalid dataset configuration")?;

    println!("{} {}", "Generating:".cyan().bold(), spec.name);
    println!("{} {}", "Output:".cyan().bold(), options.output);
    println!(
        "{} {} Hz, {:.2} ms ({} samples)",
        "Format:".dimmed(),
        spec.params.sample_rate,
        spec.params.duration_ms,
        spec.params.sample_count()
    );
    if let Some(grid) = &options.grid {
        println!("{} {}", "Grid file:".dimmed(), grid);
    }

    let result = generate(&spec, Path::new(&options.output))
        .with_context(|| format!("Failed to generate dataset in {}", options.output))?;

    for band in &spec.grid.bands {
        println!(
            "  {} {} {} azimuths",
            "ok".green(),
            naming::elevation_dir(band.elevation),
            band.len()
        );
    }

    println!(
        "{} {} directions ({} stereo pairs) across {} elevations",
        "Grid:".dimmed(),
        spec.grid.direction_count(),
        result.manifest.pair_count(),
        spec.grid.bands.len()
    );
    println!(
        "\n{} Wrote {} files and {}",
        "SUCCESS".green().bold(),
        result.file_count(),
        result.manifest_path.display()
    );
    println!("{} {}", "Dataset hash:".dimmed(), result.dataset_hash);

    Ok(ExitCode::SUCCESS)
}

/// Run generate with machine-readable JSON output.
fn run_json(options: &GenerateOptions) -> Result<ExitCode> {
    let spec = match options.to_spec() {
        Ok(spec) => spec,
        Err(e) => {
            CommandOutput::<GenerateSummary>::failure(vec![JsonError::from_coded(&e)]).print()?;
            return Ok(ExitCode::from(1));
        }
    };

    match generate(&spec, Path::new(&options.output)) {
        Ok(result) => {
            CommandOutput::success(summarize(&spec, options, &result)).print()?;
            Ok(ExitCode::SUCCESS)
        }
        Err(e) => {
            CommandOutput::<GenerateSummary>::failure(vec![generate_error_to_json(&e)]).print()?;
            Ok(ExitCode::from(1))
        }
    }
}

fn generate_error_to_json(err: &GenerateError) -> JsonError {
    let json = JsonError::from_coded(err);
    match err {
        GenerateError::Io { path, .. } => json.with_file(path.display().to_string()),
        _ => json,
    }
}

fn summarize(spec: &DatasetSpec, options: &GenerateOptions, result: &GenerateResult) -> GenerateSummary {
    GenerateSummary {
        output_dir: options.output.clone(),
        manifest_path: result.manifest_path.display().to_string(),
        direction_count: result.manifest.pair_count(),
        file_count: result.file_count(),
        sample_rate: spec.params.sample_rate,
        num_samples: spec.params.sample_count(),
        dataset_hash: result.dataset_hash.clone(),
    }
}
