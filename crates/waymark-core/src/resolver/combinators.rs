//! Resolvers built out of other resolvers.

use super::{CandidateResolver, PossibleResolution, SharedResolver};
use std::path::PathBuf;
use std::sync::Arc;
use waymark_util::path::join_relative;

/// Runs resolvers in order and concatenates every answer.
///
/// Always answers, possibly with an empty list. Resolvers run one at a time.
#[derive(Clone, Default)]
pub struct Merge {
    resolvers: Vec<SharedResolver>,
}

impl Merge {
    #[must_use]
    pub fn new(resolvers: Vec<SharedResolver>) -> Self {
        Self { resolvers }
    }
}

impl std::fmt::Debug for Merge {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Merge")
            .field("resolvers", &self.resolvers.len())
            .finish()
    }
}

impl CandidateResolver for Merge {
    fn resolve(&self, source: &str) -> PossibleResolution {
        let mut results = Vec::new();
        for resolver in &self.resolvers {
            if let Some(candidates) = resolver.resolve(source) {
                results.extend(candidates);
            }
        }
        Some(results)
    }
}

/// A prefix-to-directory rewrite, e.g. `@` → `/project/src`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AliasRule {
    /// Specifier prefix to match.
    pub prefix: String,
    /// Directory substituted for the prefix.
    pub directory: PathBuf,
}

impl AliasRule {
    pub fn new(prefix: impl Into<String>, directory: impl Into<PathBuf>) -> Self {
        Self {
            prefix: prefix.into(),
            directory: directory.into(),
        }
    }

    /// The part of `source` after the prefix, if the prefix matches and
    /// something follows it.
    #[must_use]
    pub fn suffix<'a>(&self, source: &'a str) -> Option<&'a str> {
        source
            .strip_prefix(self.prefix.as_str())
            .filter(|rest| !rest.is_empty())
    }

    /// Substitute the prefix of `source` with the target directory.
    #[must_use]
    pub fn rewrite(&self, source: &str) -> Option<PathBuf> {
        self.suffix(source)
            .map(|rest| join_relative(&self.directory, rest))
    }
}

/// Rewrites aliased specifiers and hands the result to downstream resolvers.
///
/// A specifier equal to the prefix is not rewritten.
#[derive(Debug, Clone)]
pub struct Alias {
    rule: AliasRule,
    downstream: Merge,
}

impl Alias {
    #[must_use]
    pub fn new(rule: AliasRule, downstream: Vec<SharedResolver>) -> Self {
        Self {
            rule,
            downstream: Merge::new(downstream),
        }
    }

    #[must_use]
    pub fn rule(&self) -> &AliasRule {
        &self.rule
    }
}

impl CandidateResolver for Alias {
    fn resolve(&self, source: &str) -> PossibleResolution {
        let rewritten = self.rule.rewrite(source)?;
        self.downstream.resolve(&rewritten.to_string_lossy())
    }
}

/// One [`Alias`] per rule, all sharing the same downstream resolvers, merged
/// in rule order.
#[must_use]
pub fn alias_table(rules: &[AliasRule], downstream: &[SharedResolver]) -> Merge {
    Merge::new(
        rules
            .iter()
            .map(|rule| {
                Arc::new(Alias::new(rule.clone(), downstream.to_vec())) as SharedResolver
            })
            .collect(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resolver::Identity;
    use std::sync::Mutex;

    fn fixed(paths: &'static [&'static str]) -> SharedResolver {
        Arc::new(move |_: &str| -> PossibleResolution {
            Some(paths.iter().map(PathBuf::from).collect())
        })
    }

    fn identity() -> SharedResolver {
        Arc::new(Identity)
    }

    fn declined() -> SharedResolver {
        Arc::new(|_: &str| -> PossibleResolution { None })
    }

    #[test]
    fn test_merge_concatenates_in_order() {
        let merge = Merge::new(vec![fixed(&["a", "b"]), declined(), fixed(&["c"])]);
        let result = merge.resolve("x").unwrap();
        assert_eq!(
            result,
            vec![PathBuf::from("a"), PathBuf::from("b"), PathBuf::from("c")]
        );
    }

    #[test]
    fn test_merge_of_nothing_is_empty_answer() {
        assert_eq!(Merge::default().resolve("x"), Some(vec![]));
        assert_eq!(Merge::new(vec![declined()]).resolve("x"), Some(vec![]));
    }

    #[test]
    fn test_merge_is_associative() {
        let (a, b, c) = (fixed(&["a"]), fixed(&["b1", "b2"]), fixed(&["c"]));

        let nested = Merge::new(vec![
            Arc::new(Merge::new(vec![a.clone(), b.clone()])) as SharedResolver,
            c.clone(),
        ]);
        let flat = Merge::new(vec![a, b, c]);

        assert_eq!(nested.resolve("s"), flat.resolve("s"));
    }

    #[test]
    fn test_merge_runs_sequentially() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let recorder = |name: &'static str| -> SharedResolver {
            let log = Arc::clone(&log);
            Arc::new(move |_: &str| -> PossibleResolution {
                log.lock().unwrap().push(name);
                None
            })
        };

        let merge = Merge::new(vec![recorder("first"), recorder("second"), recorder("third")]);
        merge.resolve("x");
        assert_eq!(*log.lock().unwrap(), vec!["first", "second", "third"]);
    }

    #[test]
    fn test_alias_rewrites_prefix() {
        let alias = Alias::new(AliasRule::new("@", "/project/src"), vec![identity()]);
        assert_eq!(
            alias.resolve("@/components/x"),
            Some(vec![PathBuf::from("/project/src/components/x")])
        );
    }

    #[test]
    fn test_alias_without_separator() {
        let alias = Alias::new(
            AliasRule::new("~", "/project/node_modules"),
            vec![identity()],
        );
        assert_eq!(
            alias.resolve("~pkg/dist"),
            Some(vec![PathBuf::from("/project/node_modules/pkg/dist")])
        );
    }

    #[test]
    fn test_alias_exact_prefix_is_no_answer() {
        let alias = Alias::new(AliasRule::new("@", "/project/src"), vec![identity()]);
        assert_eq!(alias.resolve("@"), None);
    }

    #[test]
    fn test_alias_non_matching_is_no_answer() {
        let alias = Alias::new(AliasRule::new("@", "/project/src"), vec![identity()]);
        assert_eq!(alias.resolve("lodash"), None);
    }

    #[test]
    fn test_alias_table_accumulates_overlapping_prefixes() {
        let rules = [
            AliasRule::new("@", "/a"),
            AliasRule::new("@lib", "/b"),
            AliasRule::new("~", "/c"),
        ];
        let table = alias_table(&rules, &[identity()]);

        assert_eq!(
            table.resolve("@lib/x"),
            Some(vec![PathBuf::from("/a/lib/x"), PathBuf::from("/b/x")])
        );
        assert_eq!(table.resolve("lodash"), Some(vec![]));
    }
}
