//! Mono 16-bit PCM WAV encoding.
//!
//! Files carry a fixed 44-byte header and no timestamps or variable metadata,
//! so identical samples always encode to identical bytes. The BLAKE3 hash of
//! the PCM payload identifies a measurement's audio content independently of
//! the container.

use crate::error::{BackendResult, GenerateError};

/// Size of the RIFF/fmt/data header.
pub const HEADER_LEN: usize = 44;

const CHANNELS: u16 = 1;
const BITS_PER_SAMPLE: u16 = 16;
const BLOCK_ALIGN: u16 = CHANNELS * BITS_PER_SAMPLE / 8;

/// Builds the header for `data_len` bytes of mono 16-bit PCM.
pub fn mono16_header(sample_rate: u32, data_len: u32) -> [u8; HEADER_LEN] {
    let byte_rate = sample_rate * u32::from(BLOCK_ALIGN);
    let riff_len = data_len + (HEADER_LEN as u32 - 8);

    let mut header = [0u8; HEADER_LEN];
    let fields: [(usize, &[u8]); 13] = [
        (0, b"RIFF"),
        (4, &riff_len.to_le_bytes()),
        (8, b"WAVE"),
        (12, b"fmt "),
        (16, &16u32.to_le_bytes()),
        (20, &1u16.to_le_bytes()), // PCM
        (22, &CHANNELS.to_le_bytes()),
        (24, &sample_rate.to_le_bytes()),
        (28, &byte_rate.to_le_bytes()),
        (32, &BLOCK_ALIGN.to_le_bytes()),
        (34, &BITS_PER_SAMPLE.to_le_bytes()),
        (36, b"data"),
        (40, &data_len.to_le_bytes()),
    ];
    for (offset, bytes) in fields {
        header[offset..offset + bytes.len()].copy_from_slice(bytes);
    }
    header
}

/// Converts quantized samples to little-endian PCM bytes.
pub fn pcm16_bytes(samples: &[i16]) -> Vec<u8> {
    samples.iter().flat_map(|s| s.to_le_bytes()).collect()
}

/// BLAKE3 hash of PCM bytes as lowercase hex.
pub fn pcm_hash(pcm: &[u8]) -> String {
    blake3::hash(pcm).to_hex().to_string()
}

/// An encoded mono WAV file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WavResult {
    /// Complete WAV file bytes.
    pub wav_data: Vec<u8>,
    /// BLAKE3 hash of the PCM payload only.
    pub pcm_hash: String,
    /// Sample rate in Hz.
    pub sample_rate: u32,
    /// Number of samples.
    pub num_samples: usize,
}

impl WavResult {
    /// Encodes quantized mono samples.
    ///
    /// Fails if the payload does not fit the 32-bit RIFF size fields.
    pub fn from_mono(samples: &[i16], sample_rate: u32) -> BackendResult<Self> {
        let pcm = pcm16_bytes(samples);
        let data_len = u32::try_from(pcm.len())
            .ok()
            .filter(|len| len.checked_add(HEADER_LEN as u32 - 8).is_some())
            .ok_or_else(|| {
                GenerateError::synthesis(format!(
                    "{} samples do not fit in a WAV file",
                    samples.len()
                ))
            })?;

        let mut wav_data = Vec::with_capacity(HEADER_LEN + pcm.len());
        wav_data.extend_from_slice(&mono16_header(sample_rate, data_len));
        wav_data.extend_from_slice(&pcm);

        Ok(Self {
            pcm_hash: pcm_hash(&pcm),
            wav_data,
            sample_rate,
            num_samples: samples.len(),
        })
    }

    /// Returns the duration in seconds.
    pub fn duration_seconds(&self) -> f64 {
        self.num_samples as f64 / self.sample_rate as f64
    }
}
