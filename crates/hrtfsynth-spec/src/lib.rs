//! hrtfsynth Data Model
//!
//! This crate provides the types shared by every stage of synthetic HRTF
//! fixture generation: the sampling grid, the per-file naming scheme, the
//! synthesis parameters, and the dataset manifest.
//!
//! # Overview
//!
//! A dataset is a directory tree with one subdirectory per elevation and one
//! mono WAV file per (direction, ear), plus a `dataset_info.json` manifest at
//! the root:
//!
//! ```text
//! synthetic_test/
//! ├── dataset_info.json
//! ├── elev+00/
//! │   ├── H-090e+00l.wav
//! │   ├── H-090e+00r.wav
//! │   └── ...
//! └── elev+90/
//!     ├── H+000e+90l.wav
//!     └── H+000e+90r.wav
//! ```
//!
//! # Example
//!
//! ```
//! use hrtfsynth_spec::{GridConfig, Ear, naming};
//!
//! let grid = GridConfig::default();
//! grid.validate().unwrap();
//!
//! let directions = grid.plan();
//! assert_eq!(directions.len(), 290);
//!
//! let first = directions[0];
//! let name = naming::measurement_filename(first, Ear::Left);
//! assert_eq!(name, "H-080e-40l.wav");
//! assert_eq!(naming::decode_filename(&name).unwrap(), (first, Ear::Left));
//! ```
//!
//! # Modules
//!
//! - [`direction`]: Sampling directions and ears
//! - [`grid`]: Elevation band table and grid planning
//! - [`naming`]: Directory and filename encoding
//! - [`params`]: Synthesis parameters and dataset description
//! - [`manifest`]: Manifest types and the catalog accumulator
//! - [`error`]: Error taxonomy

pub mod direction;
pub mod error;
pub mod grid;
pub mod manifest;
pub mod naming;
pub mod params;

// Re-export commonly used types at the crate root
pub use direction::{Direction, Ear};
pub use error::{CatalogError, CodedError, ConfigError, FilenameError};
pub use grid::{ElevationBand, GridConfig};
pub use manifest::{CatalogBuilder, DatasetManifest, FileFormat, MeasurementRecord};
pub use params::{DatasetSpec, DatasetSpecBuilder, SynthesisParams, MAX_SAMPLES};

/// Default sample rate in Hz.
pub const DEFAULT_SAMPLE_RATE: u32 = 44100;

/// Default impulse response duration in milliseconds.
pub const DEFAULT_DURATION_MS: f64 = 5.0;

/// Name of the manifest file at the dataset root.
pub const MANIFEST_FILENAME: &str = "dataset_info.json";

/// Default dataset name written to the manifest.
pub const DEFAULT_DATASET_NAME: &str = "Synthetic Test HRTF Dataset";

/// Default dataset description written to the manifest.
pub const DEFAULT_DATASET_DESCRIPTION: &str = "Generated synthetic HRTF data for testing";
