use std::fs;
use std::io;
use std::path::Path;

/// Kind of filesystem entry a probe may insist on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    File,
    Dir,
}

impl EntryKind {
    fn matches(self, meta: &fs::Metadata) -> bool {
        match self {
            Self::File => meta.is_file(),
            Self::Dir => meta.is_dir(),
        }
    }
}

/// Outcome of probing a single path.
#[derive(Debug)]
pub enum ProbeOutcome {
    /// The entry exists (and has the requested kind, if any).
    Found,
    /// Nothing there, or an entry of the wrong kind.
    Missing,
    /// The lookup itself failed for a reason other than "not found".
    Failed(io::Error),
}

impl ProbeOutcome {
    /// Whether the probe found a matching entry.
    #[must_use]
    pub fn is_found(&self) -> bool {
        matches!(self, Self::Found)
    }
}

/// Check whether `path` exists, optionally requiring a specific entry kind.
///
/// Symlinks are followed. A missing path is `Missing`, never `Failed`.
#[must_use]
pub fn probe(path: &Path, kind: Option<EntryKind>) -> ProbeOutcome {
    match fs::metadata(path) {
        Ok(meta) => match kind {
            Some(kind) if !kind.matches(&meta) => ProbeOutcome::Missing,
            _ => ProbeOutcome::Found,
        },
        Err(e) if is_not_found(&e) => ProbeOutcome::Missing,
        Err(e) => ProbeOutcome::Failed(e),
    }
}

/// `true` for errors that only mean "there is nothing at this path".
fn is_not_found(err: &io::Error) -> bool {
    if err.kind() == io::ErrorKind::NotFound {
        return true;
    }
    // ENOTDIR shows up when a path component is a regular file (`a.js/index`).
    #[cfg(unix)]
    {
        const ENOTDIR: i32 = 20;
        if err.raw_os_error() == Some(ENOTDIR) {
            return true;
        }
    }
    false
}

/// Read a file to string, replacing invalid UTF-8 sequences with the replacement character.
///
/// # Errors
/// Returns an error if the file cannot be read.
pub fn read_to_string_lossy(path: &Path) -> io::Result<String> {
    let bytes = fs::read(path)?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_probe_file_and_dir() {
        let dir = tempdir().unwrap();
        let file = dir.path().join("a.js");
        fs::write(&file, "x").unwrap();

        assert!(probe(&file, None).is_found());
        assert!(probe(&file, Some(EntryKind::File)).is_found());
        assert!(!probe(&file, Some(EntryKind::Dir)).is_found());

        assert!(probe(dir.path(), Some(EntryKind::Dir)).is_found());
        assert!(!probe(dir.path(), Some(EntryKind::File)).is_found());
    }

    #[test]
    fn test_probe_missing_is_not_failure() {
        let dir = tempdir().unwrap();
        let outcome = probe(&dir.path().join("nope.js"), None);
        assert!(matches!(outcome, ProbeOutcome::Missing));
    }

    #[cfg(unix)]
    #[test]
    fn test_probe_through_file_component_is_missing() {
        let dir = tempdir().unwrap();
        let file = dir.path().join("a.js");
        fs::write(&file, "x").unwrap();

        let outcome = probe(&file.join("index.js"), Some(EntryKind::File));
        assert!(matches!(outcome, ProbeOutcome::Missing));
    }

    #[cfg(unix)]
    #[test]
    fn test_probe_io_error_is_failed() {
        let dir = tempdir().unwrap();
        let too_long = dir.path().join("x".repeat(300));

        let outcome = probe(&too_long, None);
        assert!(matches!(outcome, ProbeOutcome::Failed(_)), "{outcome:?}");
        assert!(!outcome.is_found());
    }

    #[test]
    fn test_read_to_string_lossy_invalid_utf8() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("bad.json");
        fs::write(&path, [0x7b, 0x80, 0x7d]).unwrap();

        let content = read_to_string_lossy(&path).unwrap();
        assert!(content.starts_with('{'));
        assert!(content.contains('\u{FFFD}'));
    }
}
