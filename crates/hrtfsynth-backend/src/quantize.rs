//! Peak normalization and 16-bit quantization.

use crate::error::{BackendResult, GenerateError};
use crate::impulse::ImpulseResponse;

/// Fraction of full scale the buffer peak is normalized to.
pub const TARGET_PEAK: f64 = 0.8;

/// Full-scale multiplier for signed 16-bit PCM.
pub const FULL_SCALE: f64 = 32767.0;

/// Largest magnitude a quantized sample can take: `round(0.8 * 32767)`.
pub const MAX_QUANTIZED: i16 = 26214;

/// Normalizes `response` so its peak sits at [`TARGET_PEAK`] of full scale,
/// then rounds to signed 16-bit integers.
///
/// An empty, all-zero, or non-finite buffer cannot be normalized and is
/// reported as a synthesis error.
pub fn quantize(response: &ImpulseResponse) -> BackendResult<Vec<i16>> {
    if response.is_empty() {
        return Err(GenerateError::synthesis("cannot quantize an empty buffer"));
    }
    if response.samples().iter().any(|s| !s.is_finite()) {
        return Err(GenerateError::synthesis(
            "buffer contains non-finite samples",
        ));
    }

    let peak = response.peak();
    if peak == 0.0 {
        return Err(GenerateError::synthesis(format!(
            "cannot normalize an all-zero buffer of {} samples",
            response.len()
        )));
    }

    let scale = TARGET_PEAK * FULL_SCALE / peak;
    Ok(response
        .samples()
        .iter()
        .map(|&s| (s * scale).round() as i16)
        .collect())
}

/// Largest absolute quantized value.
pub fn peak_magnitude(samples: &[i16]) -> u16 {
    samples.iter().map(|s| s.unsigned_abs()).max().unwrap_or(0)
}
