//! JSON output types for machine-readable CLI output.
//!
//! Every command accepts `--json`. Output is a single pretty-printed object
//! with a `success` flag, a list of structured errors, and a command-specific
//! `result` when there is one to report.

use hrtfsynth_spec::CodedError;
use serde::{Deserialize, Serialize};

/// Error codes for CLI operations.
///
/// These codes are stable. Library errors pass their own codes through
/// (`CFG_*`, `NAME_*`, `CAT_*`, `GEN_*`).
pub mod error_codes {
    /// Dataset manifest could not be read
    pub const FILE_READ: &str = "CLI_001";
    /// Dataset manifest could not be parsed
    pub const JSON_PARSE: &str = "CLI_002";
    /// A dataset failed verification
    pub const INVALID_DATASET: &str = "CLI_003";
}

/// A structured error in JSON output.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct JsonError {
    /// Stable error code (e.g., "CFG_008", "CLI_003")
    pub code: String,
    /// Human-readable error message
    pub message: String,
    /// File the error refers to, relative to the dataset root when applicable
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file: Option<String>,
}

impl JsonError {
    /// Creates a new error with code and message.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            file: None,
        }
    }

    /// Creates an error from a library error, keeping its code.
    pub fn from_coded(err: &dyn CodedError) -> Self {
        Self::new(err.code(), err.to_string())
    }

    /// Sets the file path for this error.
    pub fn with_file(mut self, file: impl Into<String>) -> Self {
        self.file = Some(file.into());
        self
    }
}

/// Top-level JSON envelope shared by all commands.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommandOutput<T> {
    /// Whether the command succeeded
    pub success: bool,
    /// Errors encountered
    pub errors: Vec<JsonError>,
    /// Command result, when one was produced
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<T>,
}

impl<T: Serialize> CommandOutput<T> {
    /// Creates a successful output.
    pub fn success(result: T) -> Self {
        Self {
            success: true,
            errors: Vec::new(),
            result: Some(result),
        }
    }

    /// Creates a failed output with no result.
    pub fn failure(errors: Vec<JsonError>) -> Self {
        Self {
            success: false,
            errors,
            result: None,
        }
    }

    /// Prints the output as pretty JSON on stdout.
    pub fn print(&self) -> anyhow::Result<()> {
        println!("{}", serde_json::to_string_pretty(self)?);
        Ok(())
    }
}

/// Per-elevation entry of a grid plan.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ElevationSummary {
    /// Elevation in degrees
    pub elevation: i32,
    /// Directory name under the dataset root
    pub directory: String,
    /// Azimuths in generation order
    pub azimuths: Vec<i32>,
}

/// Result of `generate`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct GenerateSummary {
    /// Dataset root
    pub output_dir: String,
    /// Path of the written manifest
    pub manifest_path: String,
    /// Number of directions generated
    pub direction_count: usize,
    /// Number of WAV files written
    pub file_count: usize,
    /// Sample rate in Hz
    pub sample_rate: u32,
    /// Samples per file
    pub num_samples: usize,
    /// Aggregate BLAKE3 hash of the dataset
    pub dataset_hash: String,
}

/// Result of `grid`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct GridSummary {
    /// Number of directions
    pub direction_count: usize,
    /// Number of files a generation run would write
    pub file_count: usize,
    /// Bands in generation order
    pub elevations: Vec<ElevationSummary>,
}

/// Result of `verify`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct VerifySummary {
    /// Dataset name from the manifest
    pub name: String,
    /// Sample rate from the manifest
    pub sample_rate: u32,
    /// Number of manifest records
    pub measurement_count: usize,
    /// Number of WAV files opened
    pub files_checked: usize,
    /// Aggregate hash, if every file could be hashed
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dataset_hash: Option<String>,
}
