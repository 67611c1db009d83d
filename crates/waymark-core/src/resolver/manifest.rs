//! Package manifest `main` lookup.

use super::{CandidateResolver, PossibleResolution};
use crate::error::Error;
use serde_json::Value;
use std::path::Path;
use tracing::warn;
use waymark_util::fs::{probe, read_to_string_lossy, EntryKind};
use waymark_util::path::join_relative;

/// Manifest file name looked up inside a package directory.
pub const MANIFEST_FILE: &str = "package.json";

/// Read the `main` field of the manifest at `path`.
///
/// Returns `Ok(None)` when there is no manifest file, the manifest is not an
/// object, or it has no (or an empty) `main` field. A `main` that is not a
/// string is a parse error.
pub fn read_main_entry(path: &Path) -> Result<Option<String>, Error> {
    if !probe(path, Some(EntryKind::File)).is_found() {
        return Ok(None);
    }

    let content = read_to_string_lossy(path).map_err(|source| Error::ManifestRead {
        path: path.to_path_buf(),
        source,
    })?;
    let parse_error = |source| Error::ManifestParse {
        path: path.to_path_buf(),
        source,
    };
    let manifest: Value = serde_json::from_str(&content).map_err(parse_error)?;

    match manifest.get("main") {
        None | Some(Value::Null) => Ok(None),
        Some(main) => {
            let main: String = serde_json::from_value(main.clone()).map_err(parse_error)?;
            Ok(Some(main).filter(|main| !main.is_empty()))
        }
    }
}

/// Treats the specifier as a package directory and answers with its `main` entry.
///
/// Most directories have no manifest, so every failure here is a "no answer".
/// Unreadable or malformed manifests are logged.
#[derive(Debug, Clone, Copy, Default)]
pub struct PackageMain;

impl CandidateResolver for PackageMain {
    fn resolve(&self, source: &str) -> PossibleResolution {
        let dir = Path::new(source);
        let manifest = join_relative(dir, MANIFEST_FILE);

        match read_main_entry(&manifest) {
            Ok(Some(main)) => Some(vec![join_relative(dir, &main)]),
            Ok(None) => None,
            Err(err) => {
                warn!(path = %source, error = %err, "error resolving package manifest");
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_main_entry() {
        let dir = tempdir().unwrap();
        let pkg = dir.path().join("pkg");
        fs::create_dir(&pkg).unwrap();
        fs::write(pkg.join("package.json"), r#"{"main": "lib/index.js"}"#).unwrap();

        let result = PackageMain.resolve(&pkg.to_string_lossy());
        assert_eq!(result, Some(vec![pkg.join("lib/index.js")]));
    }

    #[test]
    fn test_main_entry_is_normalized() {
        // The target is not checked for existence.
        let dir = tempdir().unwrap();
        let pkg = dir.path().join("pkg");
        fs::create_dir(&pkg).unwrap();
        fs::write(pkg.join("package.json"), r#"{"main": "./dist/main.js"}"#).unwrap();

        let result = PackageMain.resolve(&pkg.to_string_lossy()).unwrap();
        assert_eq!(result, vec![pkg.join("dist/main.js")]);
    }

    #[test]
    fn test_no_main_field() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("package.json"), r#"{"name": "x"}"#).unwrap();
        assert_eq!(PackageMain.resolve(&dir.path().to_string_lossy()), None);
    }

    #[test]
    fn test_empty_main_field() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("package.json"), r#"{"main": ""}"#).unwrap();
        assert_eq!(PackageMain.resolve(&dir.path().to_string_lossy()), None);
    }

    #[test]
    fn test_no_manifest() {
        let dir = tempdir().unwrap();
        assert_eq!(PackageMain.resolve(&dir.path().to_string_lossy()), None);
    }

    #[test]
    fn test_malformed_manifest_is_no_answer() {
        let dir = tempdir().unwrap();
        let manifest = dir.path().join("package.json");
        fs::write(&manifest, "{ not json").unwrap();

        assert_eq!(PackageMain.resolve(&dir.path().to_string_lossy()), None);
        assert!(matches!(
            read_main_entry(&manifest),
            Err(Error::ManifestParse { .. })
        ));
    }

    #[test]
    fn test_non_object_manifest_declines_quietly() {
        let dir = tempdir().unwrap();
        let manifest = dir.path().join("package.json");

        for body in ["[]", "\"pkg\"", "null"] {
            fs::write(&manifest, body).unwrap();
            assert!(matches!(read_main_entry(&manifest), Ok(None)), "{body}");
            assert_eq!(PackageMain.resolve(&dir.path().to_string_lossy()), None);
        }
    }

    #[test]
    fn test_non_string_main_is_parse_error() {
        let dir = tempdir().unwrap();
        let manifest = dir.path().join("package.json");
        fs::write(&manifest, r#"{"main": 42}"#).unwrap();

        assert!(read_main_entry(&manifest).is_err());
        assert_eq!(PackageMain.resolve(&dir.path().to_string_lossy()), None);
    }
}
