//! hrtfsynth Backend
//!
//! This crate synthesizes a directional HRTF fixture dataset: one mono WAV
//! file per (direction, ear) over a sampling grid, plus a JSON manifest.
//!
//! # Overview
//!
//! Generation runs in four stages per measurement:
//!
//! - **Impulse synthesis** - a unit impulse plus four fixed resonances under an
//!   exponential decay ([`impulse`])
//! - **Binaural differentiation** - interaural time and level differences
//!   derived from azimuth ([`binaural`])
//! - **Quantization** - peak normalization to 0.8 of full scale and rounding to
//!   16-bit integers ([`quantize`])
//! - **Encoding** - canonical mono WAV bytes ([`wav`])
//!
//! A written tree can be checked afterwards with [`verify_dataset`].
//!
//! # Determinism
//!
//! Nothing in the pipeline is random. Given the same [`DatasetSpec`], every
//! buffer, every WAV file, and the manifest are byte-identical across runs
//! (on the same platform).
//!
//! # Example
//!
//! ```no_run
//! use hrtfsynth_backend::generate;
//! use hrtfsynth_spec::DatasetSpec;
//! use std::path::Path;
//!
//! let spec = DatasetSpec::default();
//! let result = generate(&spec, Path::new("hrtf_data/synthetic_test"))?;
//!
//! println!("{} files, dataset hash {}", result.file_count(), result.dataset_hash);
//! # Ok::<(), hrtfsynth_backend::GenerateError>(())
//! ```
//!
//! [`DatasetSpec`]: hrtfsynth_spec::DatasetSpec

pub mod binaural;
pub mod error;
pub mod generate;
pub mod impulse;
pub mod output;
pub mod quantize;
pub mod verify;
pub mod wav;

// Re-export main types at crate root
pub use binaural::{BinauralDifferentiator, BinauralPair};
pub use error::{BackendResult, GenerateError};
pub use generate::{
    dataset_hash, generate, GeneratedFile, GenerateResult, Generator, RenderedMeasurement,
};
pub use impulse::{ImpulseResponse, ImpulseSynthesizer};
pub use quantize::{quantize, MAX_QUANTIZED};
pub use verify::{verify_dataset, VerifyIssue, VerifyReport};
pub use wav::WavResult;
