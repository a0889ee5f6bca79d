//! Verify command implementation
//!
//! Checks a generated dataset on disk against its manifest and the naming
//! scheme, and recomputes its dataset hash.

use anyhow::{Context, Result};
use colored::Colorize;
use hrtfsynth_backend::{verify_dataset, GenerateError, VerifyReport};
use std::path::Path;
use std::process::ExitCode;

use super::json_output::{error_codes, CommandOutput, JsonError, VerifySummary};

/// Run the verify command
///
/// # Returns
/// Exit code: 0 if the dataset is consistent, 1 otherwise
pub fn run(dataset: &str, json_output: bool) -> Result<ExitCode> {
    if json_output {
        run_json(dataset)
    } else {
        run_human(dataset)
    }
}

fn run_human(dataset: &str) -> Result<ExitCode> {
    println!("{} {}", "Dataset:".cyan().bold(), dataset);

    let report = verify_dataset(Path::new(dataset))
        .with_context(|| format!("Failed to read dataset manifest in {}", dataset))?;

    println!("{} {}", "Name:".dimmed(), report.manifest.name);
    println!(
        "{} {} records, {} files checked",
        "Measurements:".dimmed(),
        report.manifest.measurements.len(),
        report.files_checked
    );

    for issue in &report.issues {
        println!("  {} {}", "!!".red(), issue);
    }

    if let Some(hash) = &report.dataset_hash {
        println!("{} {}", "Dataset hash:".dimmed(), hash);
    }

    if report.is_ok() {
        println!("\n{} Dataset is consistent", "PASSED".green().bold());
        Ok(ExitCode::SUCCESS)
    } else {
        println!(
            "\n{} {} issue(s) found",
            "FAILED".red().bold(),
            report.issues.len()
        );
        Ok(ExitCode::from(1))
    }
}

fn run_json(dataset: &str) -> Result<ExitCode> {
    let report = match verify_dataset(Path::new(dataset)) {
        Ok(report) => report,
        Err(e) => {
            CommandOutput::<VerifySummary>::failure(vec![load_error_to_json(&e)]).print()?;
            return Ok(ExitCode::from(1));
        }
    };

    let success = report.is_ok();
    let errors = report
        .issues
        .iter()
        .map(|issue| {
            JsonError::new(error_codes::INVALID_DATASET, &issue.message).with_file(&issue.path)
        })
        .collect();
    CommandOutput {
        success,
        errors,
        result: Some(summarize(report)),
    }
    .print()?;

    Ok(if success {
        ExitCode::SUCCESS
    } else {
        ExitCode::from(1)
    })
}

fn load_error_to_json(err: &GenerateError) -> JsonError {
    match err {
        GenerateError::Io { path, .. } => JsonError::new(error_codes::FILE_READ, err.to_string())
            .with_file(path.display().to_string()),
        GenerateError::Manifest(_) => JsonError::new(error_codes::JSON_PARSE, err.to_string()),
        _ => JsonError::from_coded(err),
    }
}

fn summarize(report: VerifyReport) -> VerifySummary {
    VerifySummary {
        name: report.manifest.name,
        sample_rate: report.manifest.sample_rate,
        measurement_count: report.manifest.measurements.len(),
        files_checked: report.files_checked,
        dataset_hash: report.dataset_hash,
    }
}
