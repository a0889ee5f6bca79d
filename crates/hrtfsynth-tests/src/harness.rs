//! Test harness for generating datasets into scratch directories and
//! inspecting what landed on disk.

use std::path::{Path, PathBuf};

use tempfile::TempDir;
use walkdir::WalkDir;

use hrtfsynth_backend::{generate, GenerateResult};
use hrtfsynth_spec::{DatasetManifest, DatasetSpec, MANIFEST_FILENAME};

/// Decoded contents of a WAV file.
#[derive(Debug, Clone, PartialEq)]
pub struct WavInfo {
    pub channels: u16,
    pub sample_rate: u32,
    pub bits_per_sample: u16,
    pub is_int: bool,
    pub samples: Vec<i16>,
}

impl WavInfo {
    /// Largest absolute sample value.
    pub fn peak(&self) -> u16 {
        self.samples
            .iter()
            .map(|s| s.unsigned_abs())
            .max()
            .unwrap_or(0)
    }
}

/// Reads a 16-bit WAV file with hound.
pub fn read_wav(path: &Path) -> WavInfo {
    let reader = hound::WavReader::open(path)
        .unwrap_or_else(|e| panic!("failed to open {}: {}", path.display(), e));
    let spec = reader.spec();
    let samples = reader
        .into_samples::<i16>()
        .collect::<Result<Vec<_>, _>>()
        .unwrap_or_else(|e| panic!("failed to decode {}: {}", path.display(), e));

    WavInfo {
        channels: spec.channels,
        sample_rate: spec.sample_rate,
        bits_per_sample: spec.bits_per_sample,
        is_int: spec.sample_format == hound::SampleFormat::Int,
        samples,
    }
}

/// A scratch directory holding one generated dataset.
pub struct DatasetHarness {
    /// Working directory for test outputs.
    pub work_dir: TempDir,
}

impl DatasetHarness {
    /// Creates a harness with an empty working directory.
    pub fn new() -> Self {
        Self {
            work_dir: TempDir::new().expect("failed to create temp dir"),
        }
    }

    /// Dataset root inside the working directory.
    pub fn root(&self) -> PathBuf {
        self.work_dir.path().join("dataset")
    }

    /// Generates `spec` into [`Self::root`].
    pub fn generate(&self, spec: &DatasetSpec) -> GenerateResult {
        generate(spec, &self.root()).expect("generation failed")
    }

    /// Parses the manifest written to the dataset root.
    pub fn manifest(&self) -> DatasetManifest {
        let json = std::fs::read_to_string(self.root().join(MANIFEST_FILENAME))
            .expect("failed to read manifest");
        DatasetManifest::from_json(&json).expect("failed to parse manifest")
    }

    /// All WAV files under the dataset root as sorted relative paths.
    pub fn wav_files(&self) -> Vec<String> {
        let root = self.root();
        let mut files: Vec<String> = WalkDir::new(&root)
            .into_iter()
            .filter_map(|e| e.ok())
            .filter(|e| e.file_type().is_file())
            .filter(|e| e.path().extension().is_some_and(|ext| ext == "wav"))
            .map(|e| {
                e.path()
                    .strip_prefix(&root)
                    .expect("walked path is under root")
                    .to_string_lossy()
                    .replace('\\', "/")
            })
            .collect();
        files.sort();
        files
    }

    /// WAV files in one elevation directory, by file name.
    pub fn files_in(&self, dir: &str) -> Vec<String> {
        let prefix = format!("{}/", dir);
        self.wav_files()
            .into_iter()
            .filter_map(|f| f.strip_prefix(&prefix).map(str::to_string))
            .collect()
    }

    /// Subdirectory names of the dataset root, sorted.
    pub fn directories(&self) -> Vec<String> {
        let mut dirs: Vec<String> = std::fs::read_dir(self.root())
            .expect("failed to list dataset root")
            .filter_map(|e| e.ok())
            .filter(|e| e.path().is_dir())
            .map(|e| e.file_name().to_string_lossy().into_owned())
            .collect();
        dirs.sort();
        dirs
    }
}

impl Default for DatasetHarness {
    fn default() -> Self {
        Self::new()
    }
}
