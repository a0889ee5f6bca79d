//! Verification of generated trees, including tampered ones.

use hrtfsynth_backend::verify_dataset;
use hrtfsynth_spec::{DatasetManifest, MANIFEST_FILENAME};
use hrtfsynth_tests::fixtures::{sparse_grid, spec_with_grid};
use hrtfsynth_tests::DatasetHarness;

#[test]
fn test_generated_dataset_verifies() {
    let harness = DatasetHarness::new();
    let result = harness.generate(&spec_with_grid(sparse_grid()));

    let report = verify_dataset(&harness.root()).unwrap();
    assert!(report.is_ok(), "{:?}", report.issues);
    assert_eq!(report.files_checked, result.file_count());
    assert_eq!(report.dataset_hash, Some(result.dataset_hash));
}

#[test]
fn test_truncated_wav_is_reported() {
    let harness = DatasetHarness::new();
    harness.generate(&spec_with_grid(sparse_grid()));

    let path = harness.root().join("elev+60/H+060e+60r.wav");
    let bytes = std::fs::read(&path).unwrap();
    std::fs::write(&path, &bytes[..20]).unwrap();

    let report = verify_dataset(&harness.root()).unwrap();
    assert!(!report.is_ok());
    assert!(report.issues.iter().all(|i| i.path == "elev+60/H+060e+60r.wav"));
    assert!(report.dataset_hash.is_none());
}

#[test]
fn test_rescaled_wav_is_reported() {
    let harness = DatasetHarness::new();
    harness.generate(&spec_with_grid(sparse_grid()));

    // Rewrite one file at half level with hound
    let path = harness.root().join("elev+00/H+030e+00l.wav");
    let info = hrtfsynth_tests::read_wav(&path);
    let spec = hound::WavSpec {
        channels: 1,
        sample_rate: info.sample_rate,
        bits_per_sample: 16,
        sample_format: hound::SampleFormat::Int,
    };
    let mut writer = hound::WavWriter::create(&path, spec).unwrap();
    for s in &info.samples {
        writer.write_sample(s / 2).unwrap();
    }
    writer.finalize().unwrap();

    let report = verify_dataset(&harness.root()).unwrap();
    assert_eq!(report.issues.len(), 1);
    assert!(report.issues[0].message.contains("peak"));
    // Still hashable, but no longer the generated content
    assert!(report.dataset_hash.is_some());
}

#[test]
fn test_dropped_record_is_reported() {
    let harness = DatasetHarness::new();
    harness.generate(&spec_with_grid(sparse_grid()));

    let manifest_path = harness.root().join(MANIFEST_FILENAME);
    let mut manifest = harness.manifest();
    manifest.measurements.remove(1);
    std::fs::write(&manifest_path, manifest.to_json_pretty().unwrap()).unwrap();

    let report = verify_dataset(&harness.root()).unwrap();
    assert_eq!(report.issues.len(), 1);
    assert!(report.issues[0].message.contains("expected one L and one R"));
}

#[test]
fn test_malformed_manifest_is_error() {
    let harness = DatasetHarness::new();
    harness.generate(&spec_with_grid(sparse_grid()));
    std::fs::write(harness.root().join(MANIFEST_FILENAME), "{ not json").unwrap();

    assert!(verify_dataset(&harness.root()).is_err());
    assert!(DatasetManifest::from_json("{ not json").is_err());
}
