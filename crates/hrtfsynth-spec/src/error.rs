//! Error types for grid configuration, filename decoding, and cataloging.

use thiserror::Error;

/// Common interface for errors that carry a stable code.
///
/// Codes are stable across releases so that tooling wrapping the CLI can
/// match on them instead of on message text.
pub trait CodedError: std::error::Error {
    /// Returns the error code string (e.g., "CFG_001").
    fn code(&self) -> &'static str;

    /// Returns the error category (e.g., "config").
    fn category(&self) -> &'static str;
}

/// Invalid grid table or synthesis parameters.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    /// The grid contains no elevation bands.
    #[error("grid contains no elevation bands")]
    EmptyGrid,

    /// The same elevation appears in more than one band.
    #[error("duplicate elevation band: {elevation}")]
    DuplicateElevation {
        /// The repeated elevation.
        elevation: i32,
    },

    /// Elevation outside [-90, 90].
    #[error("elevation {elevation} is outside [-90, 90]")]
    ElevationOutOfRange {
        /// The invalid elevation.
        elevation: i32,
    },

    /// Azimuth endpoint outside [-180, 180].
    #[error("elevation {elevation}: azimuth {azimuth} is outside [-180, 180]")]
    AzimuthOutOfRange {
        /// Elevation of the offending band.
        elevation: i32,
        /// The invalid azimuth endpoint.
        azimuth: i32,
    },

    /// Azimuth step of zero.
    #[error("elevation {elevation}: azimuth step must be positive")]
    ZeroStep {
        /// Elevation of the offending band.
        elevation: i32,
    },

    /// Range start greater than range stop.
    #[error("elevation {elevation}: azimuth start {start} is greater than stop {stop}")]
    InvertedRange {
        /// Elevation of the offending band.
        elevation: i32,
        /// Range start.
        start: i32,
        /// Range stop.
        stop: i32,
    },

    /// Range not symmetric about 0.
    #[error("elevation {elevation}: azimuth range {start}..={stop} is not symmetric about 0")]
    AsymmetricRange {
        /// Elevation of the offending band.
        elevation: i32,
        /// Range start.
        start: i32,
        /// Range stop.
        stop: i32,
    },

    /// The step does not land on the range stop.
    #[error("elevation {elevation}: step {step} does not reach stop {stop} from start {start}")]
    UnreachableEndpoint {
        /// Elevation of the offending band.
        elevation: i32,
        /// Range start.
        start: i32,
        /// Range stop.
        stop: i32,
        /// Azimuth step.
        step: u32,
    },

    /// Sample rate of zero.
    #[error("invalid sample rate: {rate}")]
    InvalidSampleRate {
        /// The invalid sample rate.
        rate: u32,
    },

    /// Non-finite or non-positive duration.
    #[error("invalid duration: {duration_ms} ms")]
    InvalidDuration {
        /// The invalid duration.
        duration_ms: f64,
    },

    /// The grid file could not be parsed.
    #[error("invalid grid configuration: {message}")]
    Parse {
        /// Parser message.
        message: String,
    },

    /// Duration yields more samples than a WAV data chunk can hold.
    #[error("duration {duration_ms} ms at {sample_rate} Hz exceeds {max_samples} samples")]
    DurationTooLong {
        /// The requested duration.
        duration_ms: f64,
        /// The requested sample rate.
        sample_rate: u32,
        /// Largest sample count a 16-bit mono WAV can carry.
        max_samples: u64,
    },

    /// The grid file could not be read.
    #[error("cannot read grid file {path}: {message}")]
    Read {
        /// Path of the grid file.
        path: String,
        /// Underlying I/O message.
        message: String,
    },
}

impl CodedError for ConfigError {
    fn code(&self) -> &'static str {
        match self {
            ConfigError::EmptyGrid => "CFG_001",
            ConfigError::DuplicateElevation { .. } => "CFG_002",
            ConfigError::ElevationOutOfRange { .. } => "CFG_003",
            ConfigError::AzimuthOutOfRange { .. } => "CFG_004",
            ConfigError::ZeroStep { .. } => "CFG_005",
            ConfigError::InvertedRange { .. } => "CFG_006",
            ConfigError::AsymmetricRange { .. } => "CFG_007",
            ConfigError::UnreachableEndpoint { .. } => "CFG_008",
            ConfigError::InvalidSampleRate { .. } => "CFG_009",
            ConfigError::InvalidDuration { .. } => "CFG_010",
            ConfigError::Parse { .. } => "CFG_011",
            ConfigError::DurationTooLong { .. } => "CFG_012",
            ConfigError::Read { .. } => "CFG_013",
        }
    }

    fn category(&self) -> &'static str {
        "config"
    }
}

/// A filename that does not follow the measurement naming scheme.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("not a measurement filename: '{filename}'")]
pub struct FilenameError {
    /// The rejected filename.
    pub filename: String,
}

impl FilenameError {
    /// Creates a new filename error.
    pub fn new(filename: impl Into<String>) -> Self {
        Self {
            filename: filename.into(),
        }
    }
}

impl CodedError for FilenameError {
    fn code(&self) -> &'static str {
        "NAME_001"
    }

    fn category(&self) -> &'static str {
        "naming"
    }
}

/// Catalog invariant violations detected while finalizing a manifest.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CatalogError {
    /// Record count differs from two per planned direction.
    #[error("catalog has {actual} records, expected {expected} (2 per direction)")]
    RecordCount {
        /// Expected record count.
        expected: usize,
        /// Actual record count.
        actual: usize,
    },

    /// The same relative path was recorded twice.
    #[error("duplicate measurement path: {path}")]
    DuplicatePath {
        /// The repeated path.
        path: String,
    },
}

impl CodedError for CatalogError {
    fn code(&self) -> &'static str {
        match self {
            CatalogError::RecordCount { .. } => "CAT_001",
            CatalogError::DuplicatePath { .. } => "CAT_002",
        }
    }

    fn category(&self) -> &'static str {
        "catalog"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_error_codes_are_unique() {
        let errors = [
            ConfigError::EmptyGrid,
            ConfigError::DuplicateElevation { elevation: 0 },
            ConfigError::ElevationOutOfRange { elevation: 100 },
            ConfigError::AzimuthOutOfRange {
                elevation: 0,
                azimuth: 190,
            },
            ConfigError::ZeroStep { elevation: 0 },
            ConfigError::InvertedRange {
                elevation: 0,
                start: 10,
                stop: -10,
            },
            ConfigError::AsymmetricRange {
                elevation: 0,
                start: -10,
                stop: 20,
            },
            ConfigError::UnreachableEndpoint {
                elevation: 0,
                start: -10,
                stop: 10,
                step: 3,
            },
            ConfigError::InvalidSampleRate { rate: 0 },
            ConfigError::InvalidDuration { duration_ms: -1.0 },
            ConfigError::Parse {
                message: "eof".to_string(),
            },
            ConfigError::DurationTooLong {
                duration_ms: 1e300,
                sample_rate: 44100,
                max_samples: 10,
            },
            ConfigError::Read {
                path: "grid.json".to_string(),
                message: "not found".to_string(),
            },
        ];

        let mut codes: Vec<_> = errors.iter().map(|e| e.code()).collect();
        codes.sort_unstable();
        codes.dedup();
        assert_eq!(codes.len(), errors.len());
        assert!(errors.iter().all(|e| e.category() == "config"));
    }

    #[test]
    fn test_error_messages() {
        let err = ConfigError::AsymmetricRange {
            elevation: 30,
            start: -80,
            stop: 90,
        };
        assert!(err.to_string().contains("-80..=90"));

        let err = ConfigError::Read {
            path: "grids/dense.json".to_string(),
            message: "No such file or directory".to_string(),
        };
        assert!(err.to_string().starts_with("cannot read grid file grids/dense.json"));

        let err = FilenameError::new("foo.wav");
        assert!(err.to_string().contains("foo.wav"));

        let err = CatalogError::RecordCount {
            expected: 4,
            actual: 3,
        };
        assert!(err.to_string().contains("expected 4"));
    }
}
