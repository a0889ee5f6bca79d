//! Dataset generation pipeline.
//!
//! Each measurement is produced by a chain of pure stages:
//!
//! ```text
//! Direction ─► ImpulseResponse ─► {Left, Right} ─► i16 samples ─► WAV bytes + record
//! ```
//!
//! [`Generator::render_direction`] runs that chain without touching the
//! filesystem. [`Generator::run`] removes any previous manifest, renders the
//! whole grid in memory, then writes every file and the manifest last. A
//! synthesis failure therefore writes nothing, and a run that fails during
//! I/O leaves no manifest describing a mix of old and new files.

use std::path::{Path, PathBuf};

use hrtfsynth_spec::naming;
use hrtfsynth_spec::{
    CatalogBuilder, DatasetManifest, DatasetSpec, Direction, Ear, MeasurementRecord,
    MANIFEST_FILENAME,
};

use crate::binaural::BinauralDifferentiator;
use crate::error::{BackendResult, GenerateError};
use crate::impulse::{ImpulseResponse, ImpulseSynthesizer};
use crate::output::{ensure_dir, remove_if_exists, write_atomic};
use crate::quantize::{peak_magnitude, quantize};
use crate::wav::WavResult;

/// One measurement, fully encoded but not yet persisted.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderedMeasurement {
    /// Manifest record.
    pub record: MeasurementRecord,
    /// Ear response before quantization.
    pub response: ImpulseResponse,
    /// Quantized samples.
    pub samples: Vec<i16>,
    /// Encoded WAV file.
    pub wav: WavResult,
}

/// Summary of one persisted file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedFile {
    /// Manifest record.
    pub record: MeasurementRecord,
    /// BLAKE3 hash of the PCM payload.
    pub pcm_hash: String,
    /// Number of samples.
    pub num_samples: usize,
    /// Largest absolute quantized sample.
    pub peak: u16,
}

/// Result of a complete generation run.
#[derive(Debug, Clone)]
pub struct GenerateResult {
    /// The manifest as written.
    pub manifest: DatasetManifest,
    /// Where the manifest was written.
    pub manifest_path: PathBuf,
    /// Every file in generation order.
    pub files: Vec<GeneratedFile>,
    /// Aggregate hash over the manifest and every PCM payload.
    pub dataset_hash: String,
}

impl GenerateResult {
    /// Number of files written.
    pub fn file_count(&self) -> usize {
        self.files.len()
    }
}

/// Combines the manifest bytes and per-file PCM hashes into one hash.
///
/// The PCM hashes must be in manifest order.
pub fn dataset_hash<'a>(manifest_json: &str, pcm_hashes: impl IntoIterator<Item = &'a str>) -> String {
    let mut hasher = blake3::Hasher::new();
    hasher.update(manifest_json.as_bytes());
    for hash in pcm_hashes {
        hasher.update(hash.as_bytes());
    }
    hasher.finalize().to_hex().to_string()
}

/// The synthesis and differentiation models used for a run.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Generator {
    /// Mono impulse response model.
    pub synthesizer: ImpulseSynthesizer,
    /// Interaural difference model.
    pub differentiator: BinauralDifferentiator,
}

impl Generator {
    /// Renders one ear of one direction from a precomputed mono response.
    pub fn render_measurement(
        &self,
        mono: &ImpulseResponse,
        direction: Direction,
        ear: Ear,
        sample_rate: u32,
    ) -> BackendResult<RenderedMeasurement> {
        let response = self
            .differentiator
            .apply(mono, ear, direction.azimuth, sample_rate);
        let samples = quantize(&response).map_err(|e| match e {
            GenerateError::Synthesis { message } => {
                GenerateError::synthesis(format!("{} {}: {}", direction, ear, message))
            }
            other => other,
        })?;
        let wav = WavResult::from_mono(&samples, sample_rate)?;

        Ok(RenderedMeasurement {
            record: MeasurementRecord::new(direction, ear),
            response,
            samples,
            wav,
        })
    }

    /// Renders both ears of one direction, left first.
    pub fn render_direction(
        &self,
        mono: &ImpulseResponse,
        direction: Direction,
        sample_rate: u32,
    ) -> BackendResult<[RenderedMeasurement; 2]> {
        Ok([
            self.render_measurement(mono, direction, Ear::Left, sample_rate)?,
            self.render_measurement(mono, direction, Ear::Right, sample_rate)?,
        ])
    }

    /// Generates the full dataset under `out_root`.
    pub fn run(&self, spec: &DatasetSpec, out_root: &Path) -> BackendResult<GenerateResult> {
        spec.validate()?;

        let directions = spec.grid.plan();
        let params = spec.params;
        log::info!(
            "generating {} directions at {} Hz into {}",
            directions.len(),
            params.sample_rate,
            out_root.display()
        );

        let manifest_path = out_root.join(MANIFEST_FILENAME);
        remove_if_exists(&manifest_path)?;

        // The mono response depends only on duration and sample rate.
        let mono = self.synthesizer.synthesize(&params);
        let rendered = directions
            .iter()
            .map(|&direction| self.render_direction(&mono, direction, params.sample_rate))
            .collect::<BackendResult<Vec<_>>>()?;

        ensure_dir(out_root)?;
        for elevation in spec.grid.elevations() {
            ensure_dir(&out_root.join(naming::elevation_dir(elevation)))?;
        }

        let mut catalog = CatalogBuilder::new(&spec.name, &spec.description, params.sample_rate)
            .with_capacity(directions.len());
        let mut files = Vec::with_capacity(rendered.len() * 2);
        for measurement in rendered.into_iter().flatten() {
            let path = out_root.join(&measurement.record.filename);
            write_atomic(&path, &measurement.wav.wav_data)?;
            log::debug!("wrote {}", path.display());

            files.push(GeneratedFile {
                record: measurement.record.clone(),
                pcm_hash: measurement.wav.pcm_hash,
                num_samples: measurement.wav.num_samples,
                peak: peak_magnitude(&measurement.samples),
            });
            catalog.push(measurement.record);
        }

        let manifest = catalog.finish(directions.len())?;
        let manifest_json = manifest.to_json_pretty()?;
        write_atomic(&manifest_path, manifest_json.as_bytes())?;

        let dataset_hash = dataset_hash(&manifest_json, files.iter().map(|f| f.pcm_hash.as_str()));
        log::info!(
            "wrote {} files and {}",
            files.len(),
            manifest_path.display()
        );

        Ok(GenerateResult {
            manifest,
            manifest_path,
            files,
            dataset_hash,
        })
    }
}

/// Generates a dataset with the default models.
pub fn generate(spec: &DatasetSpec, out_root: &Path) -> BackendResult<GenerateResult> {
    Generator::default().run(spec, out_root)
}
