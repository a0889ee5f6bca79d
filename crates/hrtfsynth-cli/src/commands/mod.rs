//! CLI command implementations

pub mod generate;
pub mod grid;
pub mod json_output;
pub mod verify;
