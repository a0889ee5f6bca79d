//! Byte-level comparison of generated dataset trees.

use std::collections::BTreeMap;
use std::path::Path;

use walkdir::WalkDir;

/// Maps every file under `root` (relative path) to its BLAKE3 hash.
pub fn tree_digest(root: &Path) -> BTreeMap<String, String> {
    WalkDir::new(root)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file())
        .map(|e| {
            let bytes = std::fs::read(e.path())
                .unwrap_or_else(|err| panic!("failed to read {}: {}", e.path().display(), err));
            let relative = e
                .path()
                .strip_prefix(root)
                .expect("walked path is under root")
                .to_string_lossy()
                .replace('\\', "/");
            (relative, blake3::hash(&bytes).to_hex().to_string())
        })
        .collect()
}

/// Describes the first difference between two digests, if any.
pub fn first_difference(
    a: &BTreeMap<String, String>,
    b: &BTreeMap<String, String>,
) -> Option<String> {
    for (path, hash) in a {
        match b.get(path) {
            None => return Some(format!("{} missing from second tree", path)),
            Some(other) if other != hash => return Some(format!("{} differs", path)),
            Some(_) => {}
        }
    }
    b.keys()
        .find(|path| !a.contains_key(*path))
        .map(|path| format!("{} missing from first tree", path))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn digest(entries: &[(&str, &str)]) -> BTreeMap<String, String> {
        entries
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_first_difference() {
        let a = digest(&[("x.wav", "1"), ("y.wav", "2")]);
        assert_eq!(first_difference(&a, &a), None);

        let changed = digest(&[("x.wav", "1"), ("y.wav", "3")]);
        assert_eq!(first_difference(&a, &changed).as_deref(), Some("y.wav differs"));

        let extra = digest(&[("x.wav", "1"), ("y.wav", "2"), ("z.wav", "4")]);
        assert_eq!(
            first_difference(&a, &extra).as_deref(),
            Some("z.wav missing from first tree")
        );
    }

    #[test]
    fn test_tree_digest_relative_paths() {
        let tmp = tempfile::tempdir().unwrap();
        std::fs::create_dir(tmp.path().join("elev+00")).unwrap();
        std::fs::write(tmp.path().join("elev+00/a.wav"), b"abc").unwrap();

        let d = tree_digest(tmp.path());
        assert_eq!(d.len(), 1);
        assert_eq!(d["elev+00/a.wav"], blake3::hash(b"abc").to_hex().to_string());
    }
}
