//! Synthesis parameters and dataset description.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::grid::GridConfig;
use crate::{
    DEFAULT_DATASET_DESCRIPTION, DEFAULT_DATASET_NAME, DEFAULT_DURATION_MS, DEFAULT_SAMPLE_RATE,
};

/// Largest sample count whose 16-bit PCM payload and 36-byte header fit the
/// 32-bit RIFF size field.
pub const MAX_SAMPLES: u64 = (u32::MAX as u64 - 36) / 2;

/// Inputs to impulse response synthesis.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SynthesisParams {
    /// Impulse response duration in milliseconds.
    pub duration_ms: f64,
    /// Sample rate in Hz.
    pub sample_rate: u32,
}

impl Default for SynthesisParams {
    fn default() -> Self {
        Self {
            duration_ms: DEFAULT_DURATION_MS,
            sample_rate: DEFAULT_SAMPLE_RATE,
        }
    }
}

impl SynthesisParams {
    /// Creates new synthesis parameters.
    pub fn new(duration_ms: f64, sample_rate: u32) -> Self {
        Self {
            duration_ms,
            sample_rate,
        }
    }

    /// Rejects a zero sample rate, non-finite or non-positive durations, and
    /// durations too long for a WAV data chunk.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.sample_rate == 0 {
            return Err(ConfigError::InvalidSampleRate {
                rate: self.sample_rate,
            });
        }
        if !self.duration_ms.is_finite() || self.duration_ms <= 0.0 {
            return Err(ConfigError::InvalidDuration {
                duration_ms: self.duration_ms,
            });
        }
        let samples = self.duration_seconds() * f64::from(self.sample_rate);
        if samples >= (MAX_SAMPLES + 1) as f64 {
            return Err(ConfigError::DurationTooLong {
                duration_ms: self.duration_ms,
                sample_rate: self.sample_rate,
                max_samples: MAX_SAMPLES,
            });
        }
        Ok(())
    }

    /// Duration in seconds.
    pub fn duration_seconds(&self) -> f64 {
        self.duration_ms / 1000.0
    }

    /// Number of samples per impulse response.
    ///
    /// Fractional samples are truncated: 5 ms at 44.1 kHz is 220 samples.
    pub fn sample_count(&self) -> usize {
        (self.duration_seconds() * f64::from(self.sample_rate)) as usize
    }
}

/// Everything needed to generate one dataset.
#[derive(Debug, Clone, PartialEq)]
pub struct DatasetSpec {
    /// Dataset name written to the manifest.
    pub name: String,
    /// Dataset description written to the manifest.
    pub description: String,
    /// Synthesis parameters shared by every measurement.
    pub params: SynthesisParams,
    /// Sampling grid.
    pub grid: GridConfig,
}

impl Default for DatasetSpec {
    fn default() -> Self {
        Self::builder().build()
    }
}

impl DatasetSpec {
    /// Creates a new builder populated with defaults.
    pub fn builder() -> DatasetSpecBuilder {
        DatasetSpecBuilder::new()
    }

    /// Validates the grid and the synthesis parameters.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.grid.validate()?;
        self.params.validate()
    }
}

/// Builder for [`DatasetSpec`].
#[derive(Debug, Clone)]
pub struct DatasetSpecBuilder {
    name: String,
    description: String,
    params: SynthesisParams,
    grid: GridConfig,
}

impl Default for DatasetSpecBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl DatasetSpecBuilder {
    /// Creates a builder with the default name, description, parameters and grid.
    pub fn new() -> Self {
        Self {
            name: DEFAULT_DATASET_NAME.to_string(),
            description: DEFAULT_DATASET_DESCRIPTION.to_string(),
            params: SynthesisParams::default(),
            grid: GridConfig::default(),
        }
    }

    /// Sets the dataset name.
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Sets the dataset description.
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Sets the sample rate.
    pub fn sample_rate(mut self, sample_rate: u32) -> Self {
        self.params.sample_rate = sample_rate;
        self
    }

    /// Sets the impulse response duration.
    pub fn duration_ms(mut self, duration_ms: f64) -> Self {
        self.params.duration_ms = duration_ms;
        self
    }

    /// Sets the sampling grid.
    pub fn grid(mut self, grid: GridConfig) -> Self {
        self.grid = grid;
        self
    }

    /// Builds the dataset spec.
    pub fn build(self) -> DatasetSpec {
        DatasetSpec {
            name: self.name,
            description: self.description,
            params: self.params,
            grid: self.grid,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::ElevationBand;

    #[test]
    fn test_default_sample_count() {
        assert_eq!(SynthesisParams::default().sample_count(), 220);
    }

    #[test]
    fn test_sample_count_truncates() {
        assert_eq!(SynthesisParams::new(1.0, 48000).sample_count(), 48);
        assert_eq!(SynthesisParams::new(0.01, 44100).sample_count(), 0);
    }

    #[test]
    fn test_params_validation() {
        assert!(SynthesisParams::default().validate().is_ok());
        assert_eq!(
            SynthesisParams::new(5.0, 0).validate(),
            Err(ConfigError::InvalidSampleRate { rate: 0 })
        );
        assert!(matches!(
            SynthesisParams::new(-1.0, 44100).validate(),
            Err(ConfigError::InvalidDuration { .. })
        ));
        assert!(matches!(
            SynthesisParams::new(f64::NAN, 44100).validate(),
            Err(ConfigError::InvalidDuration { .. })
        ));
    }

    #[test]
    fn test_duration_bounded_by_wav_size() {
        assert!(matches!(
            SynthesisParams::new(1e300, 44100).validate(),
            Err(ConfigError::DurationTooLong {
                sample_rate: 44100,
                max_samples: MAX_SAMPLES,
                ..
            })
        ));
        // 2^31 samples at 1 kHz is past the limit
        assert!(matches!(
            SynthesisParams::new(2_147_483_648.0, 1000).validate(),
            Err(ConfigError::DurationTooLong { .. })
        ));
        // One hour at 44.1 kHz fits
        assert!(SynthesisParams::new(3_600_000.0, 44100).validate().is_ok());
        assert!(2 * MAX_SAMPLES + 36 <= u64::from(u32::MAX));
    }

    #[test]
    fn test_builder() {
        let spec = DatasetSpec::builder()
            .name("tiny")
            .description("two bands")
            .sample_rate(48000)
            .duration_ms(2.0)
            .grid(GridConfig::new(vec![
                ElevationBand::symmetric(0, 90, 45),
                ElevationBand::pole(90),
            ]))
            .build();

        assert_eq!(spec.name, "tiny");
        assert_eq!(spec.params, SynthesisParams::new(2.0, 48000));
        assert_eq!(spec.grid.direction_count(), 6);
        assert!(spec.validate().is_ok());
    }

    #[test]
    fn test_default_spec() {
        let spec = DatasetSpec::default();
        assert_eq!(spec.name, DEFAULT_DATASET_NAME);
        assert_eq!(spec.description, DEFAULT_DATASET_DESCRIPTION);
        assert_eq!(spec.params.sample_rate, 44100);
    }
}
