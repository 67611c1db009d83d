//! Candidate resolution.
//!
//! A [`CandidateResolver`] turns one import specifier into the filesystem
//! paths it *might* resolve to. Resolvers are small values that compose:
//! [`Merge`] concatenates several of them, [`Alias`] rewrites a prefix and
//! hands the result to a [`Merge`], and [`alias_table`] builds one [`Alias`]
//! per configured rule.
//!
//! ## Answers
//!
//! - `None`: the resolver does not apply to this specifier.
//! - `Some(vec![])`: it ran but had nothing to contribute.
//! - `Some(paths)`: candidates in declaration order. Nothing guarantees the
//!   first one exists; callers wanting "first existing wins" must probe.
//!
//! Resolvers keep no state between calls and run strictly one after another
//! inside a combinator, so candidate order and log order are deterministic.

mod combinators;
mod exclude;
mod extension;
mod manifest;
mod probe;

use std::path::PathBuf;
use std::sync::Arc;

pub use combinators::{alias_table, Alias, AliasRule, Merge};
pub use exclude::{ExclusionSet, DEFAULT_EXCLUDE};
pub use extension::{DirectoryIndex, Extension, Stylesheet, SCRIPT_EXTENSIONS, STYLE_EXTENSIONS};
pub use manifest::{read_main_entry, PackageMain, MANIFEST_FILE};
pub use probe::{probe_candidate, Existing, Identity};

/// Candidate paths for one specifier, or `None` for "not applicable".
pub type PossibleResolution = Option<Vec<PathBuf>>;

/// A resolver shared between several combinators.
pub type SharedResolver = Arc<dyn CandidateResolver>;

/// Produces candidate paths for an import specifier.
pub trait CandidateResolver: Send + Sync {
    /// Return the paths `source` might resolve to.
    fn resolve(&self, source: &str) -> PossibleResolution;
}

impl<F> CandidateResolver for F
where
    F: Fn(&str) -> PossibleResolution + Send + Sync,
{
    fn resolve(&self, source: &str) -> PossibleResolution {
        self(source)
    }
}
