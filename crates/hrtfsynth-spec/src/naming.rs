//! Directory and filename encoding for measurements.
//!
//! Each measurement lives at `elev<E>/H<AAA>e<EE><x>.wav`, where azimuth and
//! elevation are sign-prefixed and zero-padded (`+04` and `+03` widths) and
//! `x` is the ear letter. Both fields fit their widths for every valid grid,
//! which makes the encoding injective and exactly reversible.

use std::sync::OnceLock;

use regex::Regex;

use crate::direction::{Direction, Ear};
use crate::error::FilenameError;
use crate::manifest::FileFormat;

static FILENAME_REGEX: OnceLock<Regex> = OnceLock::new();

const FILENAME_PATTERN: &str = r"^H([+-]\d{3})e([+-]\d{2})([lr])\.wav$";

fn filename_regex() -> &'static Regex {
    FILENAME_REGEX.get_or_init(|| Regex::new(FILENAME_PATTERN).expect("invalid regex pattern"))
}

/// Name of the subdirectory holding one elevation's measurements.
///
/// ```
/// use hrtfsynth_spec::naming::elevation_dir;
///
/// assert_eq!(elevation_dir(40), "elev+40");
/// assert_eq!(elevation_dir(0), "elev+00");
/// assert_eq!(elevation_dir(-10), "elev-10");
/// ```
pub fn elevation_dir(elevation: i32) -> String {
    format!("elev{:+03}", elevation)
}

/// Filename of one measurement, without directory.
pub fn measurement_filename(direction: Direction, ear: Ear) -> String {
    format!(
        "H{:+04}e{:+03}{}.{}",
        direction.azimuth,
        direction.elevation,
        ear.letter(),
        FileFormat::Wav.extension()
    )
}

/// Path of one measurement relative to the dataset root, `/`-separated.
pub fn relative_path(direction: Direction, ear: Ear) -> String {
    format!(
        "{}/{}",
        elevation_dir(direction.elevation),
        measurement_filename(direction, ear)
    )
}

/// Recovers `(direction, ear)` from a measurement filename.
///
/// Accepts a bare filename or a `/`-separated relative path; only the final
/// component is decoded.
pub fn decode_filename(name: &str) -> Result<(Direction, Ear), FilenameError> {
    let file = name.rsplit('/').next().unwrap_or(name);
    let caps = filename_regex()
        .captures(file)
        .ok_or_else(|| FilenameError::new(name))?;

    let azimuth: i32 = caps[1].parse().map_err(|_| FilenameError::new(name))?;
    let elevation: i32 = caps[2].parse().map_err(|_| FilenameError::new(name))?;
    let ear = caps[3]
        .chars()
        .next()
        .and_then(Ear::from_letter)
        .ok_or_else(|| FilenameError::new(name))?;

    Ok((Direction::new(elevation, azimuth), ear))
}
