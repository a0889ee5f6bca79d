//! hrtfsynth CLI library.
//!
//! This crate provides the command implementations behind the `hrtfsynth`
//! binary: dataset generation, grid dry runs, and dataset verification.

pub mod commands;
pub mod input;
