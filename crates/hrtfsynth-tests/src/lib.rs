//! hrtfsynth End-to-End Test Infrastructure
//!
//! This crate provides integration tests for the full generation flow:
//!
//! - Generation: dataset spec -> directory tree + manifest
//! - Validation: file layout, WAV format, quantization bound
//! - **Determinism**: byte-identical trees across runs
//!
//! ## Running Tests
//!
//! ```bash
//! cargo test -p hrtfsynth-tests
//! ```

pub mod determinism;
pub mod fixtures;
pub mod harness;

// Re-export commonly used items
pub use determinism::{first_difference, tree_digest};
pub use harness::{read_wav, DatasetHarness, WavInfo};
