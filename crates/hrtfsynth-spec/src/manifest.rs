//! Dataset manifest types and the catalog accumulator.
//!
//! The manifest is the last file written by a generation run, so its presence
//! marks a complete dataset.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::direction::{Direction, Ear};
use crate::error::CatalogError;
use crate::naming;

/// Sample file format tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FileFormat {
    /// Mono 16-bit PCM WAV.
    Wav,
}

impl FileFormat {
    /// Returns the file extension for this format.
    pub fn extension(&self) -> &'static str {
        match self {
            FileFormat::Wav => "wav",
        }
    }
}

impl std::fmt::Display for FileFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.extension())
    }
}

/// Metadata for one persisted measurement file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MeasurementRecord {
    /// Elevation in degrees.
    pub elevation: i32,
    /// Azimuth in degrees.
    pub azimuth: i32,
    /// Ear.
    pub ear: Ear,
    /// Path relative to the dataset root.
    pub filename: String,
}

impl MeasurementRecord {
    /// Creates the record for a measurement, deriving its relative path.
    pub fn new(direction: Direction, ear: Ear) -> Self {
        Self {
            elevation: direction.elevation,
            azimuth: direction.azimuth,
            ear,
            filename: naming::relative_path(direction, ear),
        }
    }

    /// The measurement's direction.
    pub fn direction(&self) -> Direction {
        Direction::new(self.elevation, self.azimuth)
    }
}

/// The `dataset_info.json` document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatasetManifest {
    /// Dataset name.
    pub name: String,
    /// Dataset description.
    pub description: String,
    /// Sample rate of every file in Hz.
    pub sample_rate: u32,
    /// Sample file format.
    pub format: FileFormat,
    /// One record per file, in generation order.
    pub measurements: Vec<MeasurementRecord>,
}

impl DatasetManifest {
    /// Parses a manifest from JSON.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Serializes the manifest as pretty-printed JSON.
    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Number of stereo pairs (directions).
    pub fn pair_count(&self) -> usize {
        self.measurements.len() / 2
    }

    /// Records for one elevation, in generation order.
    pub fn at_elevation(&self, elevation: i32) -> impl Iterator<Item = &MeasurementRecord> {
        self.measurements
            .iter()
            .filter(move |m| m.elevation == elevation)
    }
}

/// Accumulates measurement records and finalizes the manifest.
///
/// The builder is an explicit value threaded through the generation loop;
/// nothing else holds catalog state.
#[derive(Debug, Clone)]
pub struct CatalogBuilder {
    name: String,
    description: String,
    sample_rate: u32,
    format: FileFormat,
    measurements: Vec<MeasurementRecord>,
}

impl CatalogBuilder {
    /// Creates an empty catalog.
    pub fn new(name: impl Into<String>, description: impl Into<String>, sample_rate: u32) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            sample_rate,
            format: FileFormat::Wav,
            measurements: Vec::new(),
        }
    }

    /// Reserves capacity for `directions` stereo pairs.
    pub fn with_capacity(mut self, directions: usize) -> Self {
        self.measurements.reserve(directions * 2);
        self
    }

    /// Appends one record.
    pub fn push(&mut self, record: MeasurementRecord) {
        self.measurements.push(record);
    }

    /// Number of records so far.
    pub fn len(&self) -> usize {
        self.measurements.len()
    }

    /// Returns true if no records have been added.
    pub fn is_empty(&self) -> bool {
        self.measurements.is_empty()
    }

    /// Finalizes the manifest, checking it holds exactly two unique records
    /// per planned direction.
    pub fn finish(self, direction_count: usize) -> Result<DatasetManifest, CatalogError> {
        let expected = direction_count * 2;
        if self.measurements.len() != expected {
            return Err(CatalogError::RecordCount {
                expected,
                actual: self.measurements.len(),
            });
        }

        let mut seen = HashSet::with_capacity(self.measurements.len());
        for record in &self.measurements {
            if !seen.insert(record.filename.as_str()) {
                return Err(CatalogError::DuplicatePath {
                    path: record.filename.clone(),
                });
            }
        }

        Ok(DatasetManifest {
            name: self.name,
            description: self.description,
            sample_rate: self.sample_rate,
            format: self.format,
            measurements: self.measurements,
        })
    }
}
