//! Custom resolve hook for a host bundler.
//!
//! The bundler routes every specifier that matches an [`AliasEntry`] to
//! [`BundlerAliasResolver::resolve_id`]. Candidates from the alias table are
//! handed back to the bundler's own resolver one at a time; the first one it
//! accepts wins. If none does, the original specifier is resolved by the
//! bundler as is, and failing that returned verbatim so later stages get a
//! stable id instead of an error.

use crate::config::ResolveConfig;
use crate::error::Error;
use crate::resolver::{
    alias_table, AliasRule, CandidateResolver, DirectoryIndex, ExclusionSet, Extension, Identity,
    Merge, PackageMain, PossibleResolution, SharedResolver,
};
use regex_lite::Regex;
use std::path::Path;
use std::sync::Arc;
use tracing::debug;

/// A module id produced by the host bundler's resolver.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedId {
    /// Resolved module ID (usually a file path).
    pub id: String,
    /// Whether this module is external (don't bundle).
    pub external: bool,
}

impl ResolvedId {
    /// Create a resolved module result.
    pub fn resolved(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            external: false,
        }
    }

    /// Create an external module result.
    pub fn external(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            external: true,
        }
    }
}

/// Options forwarded to the host resolver.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HostResolveOptions {
    /// Skip the calling plugin when the host resolves. `None` leaves the
    /// choice to whoever forwards the options.
    pub skip_self: Option<bool>,
}

impl HostResolveOptions {
    /// These options with `skip_self` defaulted to `true` unless already set.
    #[must_use]
    pub fn skipping_self(&self) -> Self {
        Self {
            skip_self: Some(self.skip_self.unwrap_or(true)),
            ..self.clone()
        }
    }
}

/// The host bundler's own resolution step.
pub trait HostResolver {
    /// Resolve `specifier` as imported from `importer`, or `None` if the host
    /// cannot resolve it.
    fn resolve(
        &self,
        specifier: &str,
        importer: Option<&str>,
        options: &HostResolveOptions,
    ) -> Option<ResolvedId>;
}

/// How the host bundler decides which specifiers go to the custom resolver.
///
/// `find` is `^<alias>(.+)` and `replacement` is `<alias>$1`, so matching
/// specifiers reach [`BundlerAliasResolver::resolve_id`] unchanged.
#[derive(Debug, Clone)]
pub struct AliasEntry {
    /// The alias prefix this entry was built from.
    pub alias: String,
    /// Pattern the host tests specifiers against.
    pub find: Regex,
    /// Replacement the host applies before calling the custom resolver.
    pub replacement: String,
    exclude: ExclusionSet,
}

impl AliasEntry {
    fn new(alias: &str, exclude: ExclusionSet) -> Result<Self, Error> {
        let find = Regex::new(&format!("^{}(.+)", regex_lite::escape(alias))).map_err(
            |source| Error::InvalidAliasPattern {
                alias: alias.to_string(),
                source,
            },
        )?;
        Ok(Self {
            alias: alias.to_string(),
            find,
            replacement: format!("{alias}$1"),
            exclude,
        })
    }

    /// Whether the host should route `specifier` through this entry.
    ///
    /// Exclusions are checked first.
    #[must_use]
    pub fn matches(&self, specifier: &str) -> bool {
        !self.exclude.is_excluded(specifier) && self.find.is_match(specifier)
    }
}

/// Alias-aware resolve hook for a host bundler.
///
/// Downstream of the aliases: package `main`, then `index.<ext>`, then the
/// rewritten path itself.
#[derive(Debug, Clone)]
pub struct BundlerAliasResolver {
    rules: Vec<AliasRule>,
    entries: Vec<AliasEntry>,
    exclude: ExclusionSet,
    table: Merge,
}

impl BundlerAliasResolver {
    pub fn new(
        rules: Vec<AliasRule>,
        exclude: ExclusionSet,
        extension: Extension,
    ) -> Result<Self, Error> {
        let entries = rules
            .iter()
            .map(|rule| AliasEntry::new(&rule.prefix, exclude.clone()))
            .collect::<Result<Vec<_>, _>>()?;
        let downstream: Vec<SharedResolver> = vec![
            Arc::new(PackageMain),
            Arc::new(DirectoryIndex::new(extension)),
            Arc::new(Identity),
        ];
        let table = alias_table(&rules, &downstream);
        Ok(Self {
            rules,
            entries,
            exclude,
            table,
        })
    }

    /// Build from a loaded config, resolving alias targets against `root`.
    pub fn from_config(config: &ResolveConfig, root: &Path) -> Result<Self, Error> {
        Self::new(
            config.alias_rules(root),
            config.exclusion_set()?,
            config.script_extension(),
        )
    }

    #[must_use]
    pub fn rules(&self) -> &[AliasRule] {
        &self.rules
    }

    #[must_use]
    pub fn exclusions(&self) -> &ExclusionSet {
        &self.exclude
    }

    /// One host alias entry per rule, in rule order.
    #[must_use]
    pub fn entries(&self) -> &[AliasEntry] {
        &self.entries
    }

    /// Whether `specifier` is handled by this resolver rather than passed
    /// straight to the host.
    #[must_use]
    pub fn is_eligible(&self, specifier: &str) -> bool {
        !self.exclude.is_excluded(specifier)
            && self.rules.iter().any(|rule| rule.suffix(specifier).is_some())
    }

    /// Candidates from the alias table, without consulting the host.
    #[must_use]
    pub fn candidates(&self, specifier: &str) -> PossibleResolution {
        self.table.resolve(specifier)
    }

    /// Resolve `importee` for the host bundler.
    ///
    /// Specifiers that are excluded or match no alias go to the host
    /// unchanged and its answer is returned as is. Eligible specifiers always
    /// produce an id.
    pub fn resolve_id(
        &self,
        importee: &str,
        importer: Option<&str>,
        options: &HostResolveOptions,
        host: &dyn HostResolver,
    ) -> Option<ResolvedId> {
        if !self.is_eligible(importee) {
            debug!(specifier = importee, "not aliased, deferring to host");
            return host.resolve(importee, importer, options);
        }

        let options = options.skipping_self();

        let candidates = self.candidates(importee).unwrap_or_default();
        debug!(specifier = importee, candidates = ?candidates, "alias candidates");

        for candidate in &candidates {
            if let Some(resolved) = host.resolve(&candidate.to_string_lossy(), importer, &options) {
                debug!(specifier = importee, id = %resolved.id, "resolved alias candidate");
                return Some(resolved);
            }
        }

        let fallback = host.resolve(importee, importer, &options).unwrap_or_else(|| {
            debug!(specifier = importee, "unresolved, returning specifier verbatim");
            ResolvedId::resolved(importee)
        });
        Some(fallback)
    }
}
