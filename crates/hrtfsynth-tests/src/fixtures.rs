//! Grids and specs shared by the integration tests.

use std::path::{Path, PathBuf};

use hrtfsynth_spec::{DatasetSpec, ElevationBand, GridConfig};

/// The horizontal plane at 5° spacing: 37 directions.
pub fn horizon_grid() -> GridConfig {
    GridConfig::new(vec![ElevationBand::symmetric(0, 90, 5)])
}

/// A few sparse bands covering both hemispheres and the pole.
pub fn sparse_grid() -> GridConfig {
    GridConfig::new(vec![
        ElevationBand::symmetric(-40, 80, 40),
        ElevationBand::symmetric(0, 90, 30),
        ElevationBand::symmetric(60, 60, 60),
        ElevationBand::pole(90),
    ])
}

/// Default parameters over `grid`.
pub fn spec_with_grid(grid: GridConfig) -> DatasetSpec {
    DatasetSpec::builder().grid(grid).build()
}

/// Writes `grid` as JSON into `dir` and returns the file path.
pub fn write_grid_file(dir: &Path, grid: &GridConfig) -> PathBuf {
    let path = dir.join("grid.json");
    std::fs::write(&path, grid.to_json_pretty().expect("grid serializes"))
        .expect("failed to write grid file");
    path
}
