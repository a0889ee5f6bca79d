//! Assembles a [`DatasetSpec`] from command-line options.

use std::path::Path;

use hrtfsynth_spec::{
    ConfigError, DatasetSpec, GridConfig, DEFAULT_DATASET_DESCRIPTION, DEFAULT_DATASET_NAME,
    DEFAULT_DURATION_MS, DEFAULT_SAMPLE_RATE,
};

/// Options accepted by `generate`.
#[derive(Debug, Clone, PartialEq)]
pub struct GenerateOptions {
    /// Output directory.
    pub output: String,
    /// Sample rate in Hz.
    pub sample_rate: u32,
    /// Impulse response duration in milliseconds.
    pub duration_ms: f64,
    /// Optional JSON grid file replacing the default grid.
    pub grid: Option<String>,
    /// Dataset name for the manifest.
    pub name: Option<String>,
    /// Dataset description for the manifest.
    pub description: Option<String>,
}

impl Default for GenerateOptions {
    fn default() -> Self {
        Self {
            output: DEFAULT_OUTPUT_DIR.to_string(),
            sample_rate: DEFAULT_SAMPLE_RATE,
            duration_ms: DEFAULT_DURATION_MS,
            grid: None,
            name: None,
            description: None,
        }
    }
}

/// Default output directory for `generate`.
pub const DEFAULT_OUTPUT_DIR: &str = "hrtf_data/synthetic_test";

/// Loads the grid from `path`, or returns the default grid.
pub fn load_grid(path: Option<&str>) -> Result<GridConfig, ConfigError> {
    match path {
        Some(path) => {
            log::debug!("loading grid from {}", path);
            GridConfig::from_file(Path::new(path))
        }
        None => Ok(GridConfig::default()),
    }
}

impl GenerateOptions {
    /// Builds and validates the dataset description.
    pub fn to_spec(&self) -> Result<DatasetSpec, ConfigError> {
        let spec = DatasetSpec::builder()
            .name(self.name.as_deref().unwrap_or(DEFAULT_DATASET_NAME))
            .description(
                self.description
                    .as_deref()
                    .unwrap_or(DEFAULT_DATASET_DESCRIPTION),
            )
            .sample_rate(self.sample_rate)
            .duration_ms(self.duration_ms)
            .grid(load_grid(self.grid.as_deref())?)
            .build();
        spec.validate()?;
        Ok(spec)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hrtfsynth_spec::ElevationBand;

    #[test]
    fn test_default_options_give_default_spec() {
        let spec = GenerateOptions::default().to_spec().unwrap();
        assert_eq!(spec, DatasetSpec::default());
    }

    #[test]
    fn test_grid_file_and_overrides() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("grid.json");
        let grid = GridConfig::new(vec![ElevationBand::pole(90)]);
        std::fs::write(&path, grid.to_json_pretty().unwrap()).unwrap();

        let options = GenerateOptions {
            sample_rate: 48000,
            grid: Some(path.to_string_lossy().into_owned()),
            name: Some("Tiny".to_string()),
            ..Default::default()
        };
        let spec = options.to_spec().unwrap();
        assert_eq!(spec.grid, grid);
        assert_eq!(spec.params.sample_rate, 48000);
        assert_eq!(spec.name, "Tiny");
        assert_eq!(spec.description, DEFAULT_DATASET_DESCRIPTION);
    }

    #[test]
    fn test_invalid_params_rejected() {
        let options = GenerateOptions {
            sample_rate: 0,
            ..Default::default()
        };
        assert!(matches!(
            options.to_spec(),
            Err(ConfigError::InvalidSampleRate { rate: 0 })
        ));
    }

    #[test]
    fn test_missing_grid_file_is_read_error() {
        assert!(matches!(
            load_grid(Some("/nonexistent/grid.json")),
            Err(ConfigError::Read { .. })
        ));
    }
}
