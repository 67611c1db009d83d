//! Extension guessing, stylesheet partials, and directory indexes.

use super::probe::probe_candidate;
use super::{CandidateResolver, PossibleResolution};
use std::path::{Path, PathBuf};
use waymark_util::fs::EntryKind;
use waymark_util::path::{basename, dirname, join_relative, trim_trailing_separators};

/// Default script extensions, in probe order.
pub const SCRIPT_EXTENSIONS: &[&str] = &["js", "cjs", "mjs"];

/// Default stylesheet extensions, in probe order.
pub const STYLE_EXTENSIONS: &[&str] = &["sass", "scss", "css"];

/// Appends each extension to the specifier and keeps the ones that exist as files.
///
/// The specifier is never assumed to carry an extension already: `foo.js`
/// is probed as `foo.js.js`, `foo.js.cjs`, ...
#[derive(Debug, Clone)]
pub struct Extension {
    extensions: Vec<String>,
}

impl Extension {
    /// Create an extension resolver. Extensions are given without the dot.
    pub fn new<I, S>(extensions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            extensions: extensions.into_iter().map(Into::into).collect(),
        }
    }

    /// `js`, `cjs`, `mjs`.
    #[must_use]
    pub fn script() -> Self {
        Self::new(SCRIPT_EXTENSIONS.iter().copied())
    }

    /// `sass`, `scss`, `css`.
    #[must_use]
    pub fn style() -> Self {
        Self::new(STYLE_EXTENSIONS.iter().copied())
    }

    /// The configured extensions, in probe order.
    #[must_use]
    pub fn extensions(&self) -> &[String] {
        &self.extensions
    }

    /// Whether `source` already ends in one of the extensions.
    #[must_use]
    pub fn has_extension(&self, source: &str) -> bool {
        self.extensions.iter().any(|ext| {
            source
                .strip_suffix(ext.as_str())
                .is_some_and(|rest| rest.ends_with('.'))
        })
    }
}

impl CandidateResolver for Extension {
    fn resolve(&self, source: &str) -> PossibleResolution {
        let found: Vec<PathBuf> = self
            .extensions
            .iter()
            .filter_map(|ext| {
                let file = PathBuf::from(format!("{source}.{ext}"));
                probe_candidate(&file, Some(EntryKind::File))
            })
            .flatten()
            .collect();

        if found.is_empty() {
            None
        } else {
            Some(found)
        }
    }
}

/// Stylesheet import conventions layered on [`Extension`].
///
/// A specifier that already has a stylesheet extension is returned as is.
/// Otherwise `foo`, `foo/index`, `foo/_index` and the partial `_foo` are
/// each run through the extension resolver, in that order. The partial is
/// skipped when the last segment already starts with `_`.
#[derive(Debug, Clone)]
pub struct Stylesheet {
    extension: Extension,
}

impl Stylesheet {
    #[must_use]
    pub fn new(extension: Extension) -> Self {
        Self { extension }
    }

    /// Path variants probed for `source`, in order.
    #[must_use]
    pub fn variants(source: &str) -> Vec<String> {
        let trimmed = trim_trailing_separators(source);
        let mut variants = vec![
            source.to_string(),
            format!("{trimmed}/index"),
            format!("{trimmed}/_index"),
        ];

        let base = basename(source);
        if !base.starts_with('_') {
            variants.push(match dirname(source) {
                Some(dir) => format!("{dir}/_{base}"),
                None => format!("_{base}"),
            });
        }

        variants
    }
}

impl Default for Stylesheet {
    fn default() -> Self {
        Self::new(Extension::style())
    }
}

impl CandidateResolver for Stylesheet {
    fn resolve(&self, source: &str) -> PossibleResolution {
        if self.extension.has_extension(source) {
            return Some(vec![PathBuf::from(source)]);
        }

        let resolutions = Self::variants(source)
            .iter()
            .filter_map(|variant| self.extension.resolve(variant))
            .flatten()
            .collect();

        Some(resolutions)
    }
}

/// Treats the specifier as a directory and looks for `index.<ext>` inside it.
#[derive(Debug, Clone)]
pub struct DirectoryIndex {
    extension: Extension,
}

impl DirectoryIndex {
    #[must_use]
    pub fn new(extension: Extension) -> Self {
        Self { extension }
    }
}

impl Default for DirectoryIndex {
    fn default() -> Self {
        Self::new(Extension::script())
    }
}

impl CandidateResolver for DirectoryIndex {
    fn resolve(&self, source: &str) -> PossibleResolution {
        let index = join_relative(Path::new(source), "index");
        self.extension.resolve(&index.to_string_lossy())
    }
}
