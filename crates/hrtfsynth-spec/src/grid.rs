//! Elevation band table and grid planning.
//!
//! The sampling grid is an ordered list of elevation bands, each with a
//! symmetric azimuth range. Resolution is finest near the horizon, where
//! interaural cues matter most, and coarsens toward the poles.

use std::collections::HashSet;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::direction::Direction;
use crate::error::ConfigError;

/// Largest absolute azimuth accepted in a band.
pub const MAX_AZIMUTH: i32 = 180;

/// Largest absolute elevation accepted in a band.
pub const MAX_ELEVATION: i32 = 90;

/// One row of the grid table: an elevation and its azimuth range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ElevationBand {
    /// Elevation in degrees.
    pub elevation: i32,
    /// First azimuth (inclusive).
    pub start: i32,
    /// Last azimuth (inclusive).
    pub stop: i32,
    /// Azimuth step in degrees.
    pub step: u32,
}

impl ElevationBand {
    /// Creates a symmetric band `-half_width..=half_width`.
    pub fn symmetric(elevation: i32, half_width: i32, step: u32) -> Self {
        Self {
            elevation,
            start: -half_width,
            stop: half_width,
            step,
        }
    }

    /// Creates a band with the single azimuth 0.
    pub fn pole(elevation: i32) -> Self {
        Self {
            elevation,
            start: 0,
            stop: 0,
            step: 1,
        }
    }

    /// Azimuths of this band in ascending order, endpoints included.
    ///
    /// Yields nothing for a zero step or an inverted range.
    pub fn azimuths(&self) -> impl Iterator<Item = i32> {
        let (start, stop) = (self.start, self.stop);
        let count = if self.step == 0 || start > stop {
            0
        } else {
            let span = (i64::from(stop) - i64::from(start)) as u64;
            usize::try_from(span / u64::from(self.step) + 1).unwrap_or(usize::MAX)
        };
        (start..=stop)
            .step_by(usize::try_from(self.step.max(1)).unwrap_or(usize::MAX))
            .take(count)
    }

    /// Number of azimuths in this band.
    pub fn len(&self) -> usize {
        self.azimuths().count()
    }

    /// Returns true if this band yields no azimuths.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Directions of this band in azimuth order.
    pub fn directions(&self) -> impl Iterator<Item = Direction> + '_ {
        self.azimuths()
            .map(move |azimuth| Direction::new(self.elevation, azimuth))
    }

    fn validate(&self) -> Result<(), ConfigError> {
        let elevation = self.elevation;
        if elevation.unsigned_abs() > MAX_ELEVATION as u32 {
            return Err(ConfigError::ElevationOutOfRange { elevation });
        }
        for azimuth in [self.start, self.stop] {
            if azimuth.unsigned_abs() > MAX_AZIMUTH as u32 {
                return Err(ConfigError::AzimuthOutOfRange { elevation, azimuth });
            }
        }
        if self.step == 0 {
            return Err(ConfigError::ZeroStep { elevation });
        }
        if self.start > self.stop {
            return Err(ConfigError::InvertedRange {
                elevation,
                start: self.start,
                stop: self.stop,
            });
        }
        if self.start != -self.stop {
            return Err(ConfigError::AsymmetricRange {
                elevation,
                start: self.start,
                stop: self.stop,
            });
        }
        if (self.stop - self.start) as u32 % self.step != 0 {
            return Err(ConfigError::UnreachableEndpoint {
                elevation,
                start: self.start,
                stop: self.stop,
                step: self.step,
            });
        }
        Ok(())
    }
}

/// Ordered elevation band table.
///
/// Band order is generation order; directions within a band run from the
/// most negative azimuth to the most positive.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GridConfig {
    /// Elevation bands in generation order.
    pub bands: Vec<ElevationBand>,
}

impl Default for GridConfig {
    /// The standard 14-band table: 5° steps within 20° of the horizon,
    /// 10° steps elsewhere, narrowing above 50°, and a single direction at
    /// the +90° pole.
    fn default() -> Self {
        let mut bands = Vec::with_capacity(14);
        for elevation in [-40, -30, -20] {
            bands.push(ElevationBand::symmetric(elevation, 80, 10));
        }
        for elevation in [-10, 0, 10, 20] {
            bands.push(ElevationBand::symmetric(elevation, 90, 5));
        }
        for elevation in [30, 40, 50] {
            bands.push(ElevationBand::symmetric(elevation, 80, 10));
        }
        for elevation in [60, 70, 80] {
            bands.push(ElevationBand::symmetric(elevation, 60, 10));
        }
        bands.push(ElevationBand::pole(90));
        Self { bands }
    }
}

impl GridConfig {
    /// Creates a grid from an explicit band list.
    pub fn new(bands: Vec<ElevationBand>) -> Self {
        Self { bands }
    }

    /// Parses a grid from JSON.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        serde_json::from_str(json).map_err(|e| ConfigError::Parse {
            message: e.to_string(),
        })
    }

    /// Loads a grid from a JSON file.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path).map_err(|e| ConfigError::Read {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        Self::from_json(&json)
    }

    /// Serializes the grid as pretty-printed JSON.
    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Checks the table for emptiness, duplicate elevations, and malformed
    /// azimuth ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.bands.is_empty() {
            return Err(ConfigError::EmptyGrid);
        }

        let mut seen = HashSet::with_capacity(self.bands.len());
        for band in &self.bands {
            if !seen.insert(band.elevation) {
                return Err(ConfigError::DuplicateElevation {
                    elevation: band.elevation,
                });
            }
            band.validate()?;
        }

        Ok(())
    }

    /// Returns every direction of the grid in generation order.
    pub fn plan(&self) -> Vec<Direction> {
        self.bands.iter().flat_map(|b| b.directions()).collect()
    }

    /// Total number of directions.
    pub fn direction_count(&self) -> usize {
        self.bands.iter().map(ElevationBand::len).sum()
    }

    /// Elevations in band order.
    pub fn elevations(&self) -> Vec<i32> {
        self.bands.iter().map(|b| b.elevation).collect()
    }

    /// Looks up the band for an elevation.
    pub fn band(&self, elevation: i32) -> Option<&ElevationBand> {
        self.bands.iter().find(|b| b.elevation == elevation)
    }
}
