//! Sampling directions and ears.

use serde::{Deserialize, Serialize};

/// A sampling point on the listener-centered sphere, in integer degrees.
///
/// Elevation is positive above the horizon; azimuth is positive to the
/// listener's right.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Direction {
    /// Elevation in degrees, [-90, 90].
    pub elevation: i32,
    /// Azimuth in degrees, [-180, 180].
    pub azimuth: i32,
}

impl Direction {
    /// Creates a new direction.
    pub fn new(elevation: i32, azimuth: i32) -> Self {
        Self {
            elevation,
            azimuth,
        }
    }

    /// Azimuth in radians.
    pub fn azimuth_radians(&self) -> f64 {
        f64::from(self.azimuth).to_radians()
    }
}

impl std::fmt::Display for Direction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "el {:+} az {:+}", self.elevation, self.azimuth)
    }
}

/// Which ear a measurement belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Ear {
    /// Left ear.
    #[serde(rename = "L")]
    Left,
    /// Right ear.
    #[serde(rename = "R")]
    Right,
}

impl Ear {
    /// Both ears in generation order.
    pub const BOTH: [Ear; 2] = [Ear::Left, Ear::Right];

    /// Single lowercase letter used in filenames.
    pub fn letter(&self) -> char {
        match self {
            Ear::Left => 'l',
            Ear::Right => 'r',
        }
    }

    /// Parses the filename letter.
    pub fn from_letter(letter: char) -> Option<Self> {
        match letter {
            'l' => Some(Ear::Left),
            'r' => Some(Ear::Right),
            _ => None,
        }
    }
}

impl std::fmt::Display for Ear {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Ear::Left => write!(f, "L"),
            Ear::Right => write!(f, "R"),
        }
    }
}
