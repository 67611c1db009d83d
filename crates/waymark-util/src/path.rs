//! Lexical path helpers.
//!
//! Joins behave like Node's `path.join`: the appended part is always treated
//! as relative, and `.`/`..` segments are folded without touching the disk.

use std::path::{Component, Path, PathBuf};

/// Join `tail` onto `base`, treating `tail` as relative even if it starts
/// with a separator, then normalize the result.
#[must_use]
pub fn join_relative(base: &Path, tail: &str) -> PathBuf {
    let tail = tail.trim_start_matches(['/', '\\']);
    normalize(&base.join(tail))
}

/// Fold `.` and `..` components lexically.
///
/// Leading `..` components of a relative path are kept; `..` directly
/// under the root is dropped. An empty result becomes `.`.
#[must_use]
pub fn normalize(path: &Path) -> PathBuf {
    let mut out: Vec<Component<'_>> = Vec::new();

    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => match out.last() {
                Some(Component::Normal(_)) => {
                    out.pop();
                }
                Some(Component::RootDir | Component::Prefix(_)) => {}
                _ => out.push(component),
            },
            other => out.push(other),
        }
    }

    if out.is_empty() {
        return PathBuf::from(".");
    }
    out.iter().collect()
}

/// `spec` without trailing separators.
#[must_use]
pub fn trim_trailing_separators(spec: &str) -> &str {
    spec.trim_end_matches(['/', '\\'])
}

/// Final path segment of a `/`-separated specifier, ignoring trailing
/// separators.
#[must_use]
pub fn basename(spec: &str) -> &str {
    let spec = trim_trailing_separators(spec);
    spec.rsplit(['/', '\\']).next().unwrap_or(spec)
}

/// Everything before the final segment, without the separator.
///
/// Trailing separators are ignored. Returns `None` when the specifier has a
/// single segment.
#[must_use]
pub fn dirname(spec: &str) -> Option<&str> {
    let spec = trim_trailing_separators(spec);
    spec.rfind(['/', '\\']).map(|idx| &spec[..idx])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_join_relative_strips_leading_separator() {
        let joined = join_relative(Path::new("/project/src"), "/components/x");
        assert_eq!(joined, PathBuf::from("/project/src/components/x"));
    }

    #[test]
    fn test_join_relative_folds_dots() {
        let joined = join_relative(Path::new("/project/src"), "./a/../b");
        assert_eq!(joined, PathBuf::from("/project/src/b"));
    }

    #[test]
    fn test_normalize_keeps_leading_parent_dirs() {
        assert_eq!(normalize(Path::new("../a/./b")), PathBuf::from("../a/b"));
        assert_eq!(normalize(Path::new("a/..")), PathBuf::from("."));
        assert_eq!(normalize(Path::new("/../a")), PathBuf::from("/a"));
    }

    #[test]
    fn test_basename_dirname() {
        assert_eq!(basename("dir/foo"), "foo");
        assert_eq!(basename("foo"), "foo");
        assert_eq!(dirname("a/b/foo"), Some("a/b"));
        assert_eq!(dirname("foo"), None);
        assert_eq!(dirname("/foo"), Some(""));
    }

    #[test]
    fn test_basename_dirname_ignore_trailing_separator() {
        assert_eq!(basename("dir/foo/"), "foo");
        assert_eq!(dirname("dir/foo/"), Some("dir"));
        assert_eq!(dirname("foo//"), None);
        assert_eq!(trim_trailing_separators("a/b//"), "a/b");
    }
}
