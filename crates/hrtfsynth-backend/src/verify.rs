//! Consistency check of a generated dataset on disk.
//!
//! Reads the manifest back and checks every record against the naming scheme
//! and its WAV file. Problems are collected rather than returned early so a
//! single pass reports everything wrong with a tree. Only records whose
//! filename is the canonical path for their direction and ear are opened.

use std::collections::BTreeMap;
use std::io::Cursor;
use std::path::Path;

use hrtfsynth_spec::naming;
use hrtfsynth_spec::{DatasetManifest, Direction, Ear, MANIFEST_FILENAME};

use crate::error::{BackendResult, GenerateError};
use crate::generate::dataset_hash;
use crate::quantize::MAX_QUANTIZED;
use crate::wav::{pcm16_bytes, pcm_hash};

/// One problem found in a dataset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerifyIssue {
    /// Path relative to the dataset root.
    pub path: String,
    /// What is wrong.
    pub message: String,
}

impl VerifyIssue {
    fn new(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
        }
    }
}

impl std::fmt::Display for VerifyIssue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.path, self.message)
    }
}

/// Outcome of verifying a dataset.
#[derive(Debug, Clone)]
pub struct VerifyReport {
    /// The parsed manifest.
    pub manifest: DatasetManifest,
    /// Number of WAV files that were opened and checked.
    pub files_checked: usize,
    /// Every problem found, in manifest order.
    pub issues: Vec<VerifyIssue>,
    /// Aggregate hash, present only when every file could be hashed.
    ///
    /// Matches the hash reported by the generation run that wrote the tree.
    pub dataset_hash: Option<String>,
}

impl VerifyReport {
    /// Returns true if no issues were found.
    pub fn is_ok(&self) -> bool {
        self.issues.is_empty()
    }
}

/// Verifies the dataset rooted at `root`.
///
/// Fails only when the manifest itself cannot be read or parsed; everything
/// else is reported as an issue.
pub fn verify_dataset(root: &Path) -> BackendResult<VerifyReport> {
    let manifest_path = root.join(MANIFEST_FILENAME);
    let manifest_json =
        std::fs::read_to_string(&manifest_path).map_err(|e| GenerateError::io(&manifest_path, e))?;
    let manifest = DatasetManifest::from_json(&manifest_json)?;

    let mut issues = Vec::new();
    let mut files_checked = 0;
    let mut pcm_hashes = Vec::with_capacity(manifest.measurements.len());
    let mut ears: BTreeMap<Direction, Vec<Ear>> = BTreeMap::new();
    let mut reference_len: Option<usize> = None;

    for record in &manifest.measurements {
        let direction = record.direction();
        ears.entry(direction).or_default().push(record.ear);

        match naming::decode_filename(&record.filename) {
            Ok(decoded) if decoded == (direction, record.ear) => {}
            Ok((d, e)) => {
                issues.push(VerifyIssue::new(
                    &record.filename,
                    format!(
                        "filename encodes {} {} but record says {} {}",
                        d, e, direction, record.ear
                    ),
                ));
                continue;
            }
            Err(e) => {
                issues.push(VerifyIssue::new(&record.filename, e.to_string()));
                continue;
            }
        }

        let expected = naming::relative_path(direction, record.ear);
        if record.filename != expected {
            issues.push(VerifyIssue::new(
                &record.filename,
                format!("expected path {}", expected),
            ));
            continue;
        }

        let bytes = match std::fs::read(root.join(&expected)) {
            Ok(bytes) => bytes,
            Err(e) => {
                issues.push(VerifyIssue::new(&record.filename, e.to_string()));
                continue;
            }
        };
        files_checked += 1;

        let checked = match check_wav(&bytes, manifest.sample_rate) {
            Ok(checked) => checked,
            Err(message) => {
                issues.push(VerifyIssue::new(&record.filename, message));
                continue;
            }
        };
        issues.extend(
            checked
                .problems
                .into_iter()
                .map(|m| VerifyIssue::new(&record.filename, m)),
        );

        let len = checked.samples.len();
        match reference_len {
            None => reference_len = Some(len),
            Some(reference) if reference != len => issues.push(VerifyIssue::new(
                &record.filename,
                format!("has {} samples, expected {}", len, reference),
            )),
            Some(_) => {}
        }

        pcm_hashes.push(pcm_hash(&pcm16_bytes(&checked.samples)));
    }

    for (direction, found) in &ears {
        let mut sorted = found.clone();
        sorted.sort();
        if sorted != Ear::BOTH {
            issues.push(VerifyIssue::new(
                naming::elevation_dir(direction.elevation),
                format!("{} has ears {:?}, expected one L and one R", direction, found),
            ));
        }
    }

    let dataset_hash = (pcm_hashes.len() == manifest.measurements.len())
        .then(|| dataset_hash(&manifest_json, pcm_hashes.iter().map(String::as_str)));

    Ok(VerifyReport {
        manifest,
        files_checked,
        issues,
        dataset_hash,
    })
}

/// A decoded WAV file and the problems found in it.
struct CheckedWav {
    problems: Vec<String>,
    samples: Vec<i16>,
}

/// Decodes one WAV file and checks its format and level.
///
/// Fails when the file cannot be decoded as 16-bit integer PCM.
fn check_wav(bytes: &[u8], sample_rate: u32) -> Result<CheckedWav, String> {
    let mut problems = Vec::new();
    let mut reader = hound::WavReader::new(Cursor::new(bytes)).map_err(|e| e.to_string())?;
    let spec = reader.spec();

    if spec.channels != 1 {
        problems.push(format!("expected mono, found {} channels", spec.channels));
    }
    if spec.bits_per_sample != 16 || spec.sample_format != hound::SampleFormat::Int {
        return Err(format!(
            "expected 16-bit integer PCM, found {}-bit {:?}",
            spec.bits_per_sample, spec.sample_format
        ));
    }
    if spec.sample_rate != sample_rate {
        problems.push(format!(
            "sample rate {} does not match manifest {}",
            spec.sample_rate, sample_rate
        ));
    }

    let samples = reader
        .samples::<i16>()
        .collect::<Result<Vec<_>, _>>()
        .map_err(|e| e.to_string())?;
    let peak = samples.iter().map(|s| s.unsigned_abs()).max().unwrap_or(0);
    if peak != MAX_QUANTIZED as u16 {
        problems.push(format!(
            "peak {} differs from normalized peak {}",
            peak, MAX_QUANTIZED
        ));
    }

    Ok(CheckedWav { problems, samples })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generate::generate;
    use hrtfsynth_spec::{DatasetSpec, ElevationBand, GridConfig};

    fn generate_small(root: &Path) -> crate::GenerateResult {
        let spec = DatasetSpec::builder()
            .grid(GridConfig::new(vec![
                ElevationBand::symmetric(-10, 90, 30),
                ElevationBand::pole(90),
            ]))
            .build();
        generate(&spec, root).unwrap()
    }

    #[test]
    fn test_fresh_dataset_verifies() {
        let tmp = tempfile::tempdir().unwrap();
        let result = generate_small(tmp.path());

        let report = verify_dataset(tmp.path()).unwrap();
        assert!(report.is_ok(), "{:?}", report.issues);
        assert_eq!(report.files_checked, result.file_count());
        assert_eq!(report.dataset_hash.as_deref(), Some(result.dataset_hash.as_str()));
    }

    #[test]
    fn test_missing_manifest_is_error() {
        let tmp = tempfile::tempdir().unwrap();
        assert!(matches!(
            verify_dataset(tmp.path()),
            Err(GenerateError::Io { .. })
        ));
    }

    #[test]
    fn test_missing_file_is_reported() {
        let tmp = tempfile::tempdir().unwrap();
        generate_small(tmp.path());
        std::fs::remove_file(tmp.path().join("elev+90/H+000e+90r.wav")).unwrap();

        let report = verify_dataset(tmp.path()).unwrap();
        assert!(!report.is_ok());
        assert!(report.dataset_hash.is_none());
        assert!(report
            .issues
            .iter()
            .any(|i| i.path == "elev+90/H+000e+90r.wav"));
    }

    #[test]
    fn test_corrupted_file_is_reported() {
        let tmp = tempfile::tempdir().unwrap();
        generate_small(tmp.path());
        std::fs::write(tmp.path().join("elev-10/H+030e-10l.wav"), b"garbage").unwrap();

        let report = verify_dataset(tmp.path()).unwrap();
        assert_eq!(report.issues.len(), 1);
        assert_eq!(report.issues[0].path, "elev-10/H+030e-10l.wav");
    }

    #[test]
    fn test_mismatched_record_is_reported() {
        let tmp = tempfile::tempdir().unwrap();
        generate_small(tmp.path());

        let manifest_path = tmp.path().join(MANIFEST_FILENAME);
        let json = std::fs::read_to_string(&manifest_path).unwrap();
        let mut manifest = DatasetManifest::from_json(&json).unwrap();
        manifest.measurements[0].azimuth = 45;
        std::fs::write(&manifest_path, manifest.to_json_pretty().unwrap()).unwrap();

        let report = verify_dataset(tmp.path()).unwrap();
        assert!(report
            .issues
            .iter()
            .any(|i| i.message.contains("filename encodes")));
        // The altered direction now has only a left ear, and the first
        // direction only a right ear
        assert!(report
            .issues
            .iter()
            .any(|i| i.message.contains("expected one L and one R")));
    }

    fn write_mono(path: &Path, samples: &[i16]) {
        let spec = hound::WavSpec {
            channels: 1,
            sample_rate: 44100,
            bits_per_sample: 16,
            sample_format: hound::SampleFormat::Int,
        };
        let mut writer = hound::WavWriter::create(path, spec).unwrap();
        for &sample in samples {
            writer.write_sample(sample).unwrap();
        }
        writer.finalize().unwrap();
    }

    #[test]
    fn test_inconsistent_length_is_reported() {
        let tmp = tempfile::tempdir().unwrap();
        let result = generate_small(tmp.path());
        write_mono(
            &tmp.path().join("elev+90/H+000e+90l.wav"),
            &[MAX_QUANTIZED as i16, 0, 0],
        );

        let report = verify_dataset(tmp.path()).unwrap();
        assert_eq!(report.issues.len(), 1, "{:?}", report.issues);
        assert_eq!(report.issues[0].path, "elev+90/H+000e+90l.wav");
        assert_eq!(report.issues[0].message, "has 3 samples, expected 220");
        assert_eq!(report.files_checked, result.file_count());
        assert_ne!(report.dataset_hash.as_deref(), Some(result.dataset_hash.as_str()));
    }

    #[test]
    fn test_hash_follows_decoded_samples() {
        let tmp = tempfile::tempdir().unwrap();
        let result = generate_small(tmp.path());

        // Re-encoding the same samples through another writer keeps the hash
        let path = tmp.path().join("elev-10/H+030e-10l.wav");
        let mut reader = hound::WavReader::open(&path).unwrap();
        let samples: Vec<i16> = reader.samples::<i16>().map(|s| s.unwrap()).collect();
        drop(reader);
        write_mono(&path, &samples);

        let report = verify_dataset(tmp.path()).unwrap();
        assert!(report.is_ok(), "{:?}", report.issues);
        assert_eq!(report.dataset_hash.as_deref(), Some(result.dataset_hash.as_str()));
    }

    #[test]
    fn test_non_canonical_path_is_not_opened() {
        let tmp = tempfile::tempdir().unwrap();
        let root = tmp.path().join("dataset");
        let result = generate_small(&root);

        // A readable file sits where the escaping path points
        let target = tmp.path().join("elev-10");
        std::fs::create_dir(&target).unwrap();
        std::fs::copy(
            root.join("elev-10/H-090e-10l.wav"),
            target.join("H-090e-10l.wav"),
        )
        .unwrap();

        let manifest_path = root.join(MANIFEST_FILENAME);
        let json = std::fs::read_to_string(&manifest_path).unwrap();
        let mut manifest = DatasetManifest::from_json(&json).unwrap();
        assert_eq!(manifest.measurements[0].filename, "elev-10/H-090e-10l.wav");
        manifest.measurements[0].filename = "../elev-10/H-090e-10l.wav".to_string();
        std::fs::write(&manifest_path, manifest.to_json_pretty().unwrap()).unwrap();

        let report = verify_dataset(&root).unwrap();
        assert_eq!(report.issues.len(), 1, "{:?}", report.issues);
        assert_eq!(report.issues[0].message, "expected path elev-10/H-090e-10l.wav");
        assert_eq!(report.files_checked, result.file_count() - 1);
        assert!(report.dataset_hash.is_none());
    }

    #[test]
    fn test_undecodable_name_is_not_opened() {
        let tmp = tempfile::tempdir().unwrap();
        let result = generate_small(tmp.path());

        let manifest_path = tmp.path().join(MANIFEST_FILENAME);
        let json = std::fs::read_to_string(&manifest_path).unwrap();
        let mut manifest = DatasetManifest::from_json(&json).unwrap();
        manifest.measurements[0].filename = "/etc/passwd".to_string();
        std::fs::write(&manifest_path, manifest.to_json_pretty().unwrap()).unwrap();

        let report = verify_dataset(tmp.path()).unwrap();
        assert_eq!(report.issues.len(), 1, "{:?}", report.issues);
        assert_eq!(report.issues[0].path, "/etc/passwd");
        assert_eq!(report.files_checked, result.file_count() - 1);
    }
}
