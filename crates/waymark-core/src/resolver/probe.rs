//! Existence probes exposed as resolvers.

use super::{CandidateResolver, PossibleResolution};
use std::path::{Path, PathBuf};
use tracing::trace;
use waymark_util::fs::{probe, EntryKind, ProbeOutcome};

/// Probe `path` and answer with it as the sole candidate if it exists.
///
/// I/O failures other than "not found" are traced and then treated like a
/// missing entry.
#[must_use]
pub fn probe_candidate(path: &Path, kind: Option<EntryKind>) -> PossibleResolution {
    match probe(path, kind) {
        ProbeOutcome::Found => Some(vec![path.to_path_buf()]),
        ProbeOutcome::Missing => None,
        ProbeOutcome::Failed(err) => {
            trace!(path = %path.display(), error = %err, "probe failed");
            None
        }
    }
}

/// Answers with the specifier itself, unchecked.
#[derive(Debug, Clone, Copy, Default)]
pub struct Identity;

impl CandidateResolver for Identity {
    fn resolve(&self, source: &str) -> PossibleResolution {
        Some(vec![PathBuf::from(source)])
    }
}

/// Answers with the specifier itself if it exists on disk.
#[derive(Debug, Clone, Copy, Default)]
pub struct Existing {
    kind: Option<EntryKind>,
}

impl Existing {
    /// Accept files and directories.
    #[must_use]
    pub fn any() -> Self {
        Self { kind: None }
    }

    /// Accept regular files only.
    #[must_use]
    pub fn file() -> Self {
        Self {
            kind: Some(EntryKind::File),
        }
    }

    /// Accept directories only.
    #[must_use]
    pub fn dir() -> Self {
        Self {
            kind: Some(EntryKind::Dir),
        }
    }
}

impl CandidateResolver for Existing {
    fn resolve(&self, source: &str) -> PossibleResolution {
        probe_candidate(Path::new(source), self.kind)
    }
}
