//! Specifiers that must never be aliased.

use crate::error::Error;
use regex_lite::Regex;

/// Default exclusion: the bundler's own client modules (`/@vite/client`, ...).
pub const DEFAULT_EXCLUDE: &[&str] = &["@vite"];

/// Patterns checked before any alias prefix is tried.
///
/// Patterns are unanchored regular expressions; a specifier is excluded if
/// any of them matches anywhere in it.
#[derive(Debug, Clone, Default)]
pub struct ExclusionSet {
    patterns: Vec<Regex>,
}

impl ExclusionSet {
    /// Compile the given patterns.
    pub fn new<I, S>(patterns: I) -> Result<Self, Error>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let patterns = patterns
            .into_iter()
            .map(|pattern| {
                let pattern = pattern.as_ref();
                Regex::new(pattern).map_err(|source| Error::InvalidExcludePattern {
                    pattern: pattern.to_string(),
                    source,
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self { patterns })
    }

    /// Whether `specifier` matches any exclusion pattern.
    #[must_use]
    pub fn is_excluded(&self, specifier: &str) -> bool {
        self.patterns.iter().any(|re| re.is_match(specifier))
    }

    /// Source text of each pattern.
    pub fn patterns(&self) -> impl Iterator<Item = &str> {
        self.patterns.iter().map(Regex::as_str)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }
}
