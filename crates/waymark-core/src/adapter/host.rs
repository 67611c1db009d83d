//! Filesystem host resolver.
//!
//! Stands in for a bundler's native resolution when the alias adapter is
//! driven from the CLI. Handles:
//!
//! - Relative: `./utils`, `../lib/foo` (against the importer's directory)
//! - Absolute: `/abs/path/to/module`
//! - Bare: `lodash`, `@scope/pkg`, `react/jsx-runtime` (`node_modules` lookup)
//! - Builtins: `node:fs` (reported as external)
//!
//! Nothing is cached between calls.

#![allow(clippy::unused_self)]

use super::bundler::{HostResolveOptions, HostResolver, ResolvedId};
use crate::resolver::MANIFEST_FILE;
use serde_json::Value;
use std::path::{Path, PathBuf};
use tracing::trace;

/// Extensions tried for extensionless files, in order.
pub const HOST_EXTENSIONS: &[&str] = &[".ts", ".tsx", ".js", ".jsx", ".mjs", ".cjs", ".json"];

/// Index files tried inside directories, in order.
const INDEX_FILES: &[&str] = &["index.ts", "index.tsx", "index.js", "index.jsx", "index.mjs"];

/// Resolves specifiers against the local filesystem.
#[derive(Debug, Clone)]
pub struct FsHostResolver {
    /// Project root; bare lookups stop here.
    root: PathBuf,
}

impl FsHostResolver {
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn resolve_path(&self, specifier: &str, importer: Option<&str>) -> Option<PathBuf> {
        if specifier.starts_with("./") || specifier.starts_with("../") {
            let from_dir = importer
                .and_then(|i| Path::new(i).parent())
                .unwrap_or(&self.root);
            return self.resolve_file_or_directory(&from_dir.join(specifier));
        }

        if Path::new(specifier).is_absolute() {
            return self.resolve_file_or_directory(Path::new(specifier));
        }

        self.resolve_bare(specifier, importer)
    }

    /// Walk up from the importer looking for `node_modules/<pkg>`.
    fn resolve_bare(&self, specifier: &str, importer: Option<&str>) -> Option<PathBuf> {
        let (pkg_name, subpath) = parse_bare_specifier(specifier);

        let start = importer
            .and_then(|i| Path::new(i).parent())
            .unwrap_or(&self.root);
        let mut current = Some(start);

        while let Some(dir) = current {
            let pkg_dir = dir.join("node_modules").join(pkg_name);

            if pkg_dir.is_dir() {
                let found = match subpath {
                    Some(sub) => self.resolve_file_or_directory(&pkg_dir.join(sub)),
                    None => self.resolve_package_entry(&pkg_dir),
                };
                if found.is_some() {
                    return found;
                }
            }

            if dir == self.root {
                break;
            }
            current = dir.parent();
        }

        trace!(specifier, "package not found in node_modules");
        None
    }

    /// Entry point of a package directory: `exports["."]`, `module`, `main`, then index files.
    fn resolve_package_entry(&self, pkg_dir: &Path) -> Option<PathBuf> {
        let manifest = read_manifest(&pkg_dir.join(MANIFEST_FILE));

        if let Some(json) = &manifest {
            let fields = [
                json.get("exports").and_then(root_export),
                json.get("module").and_then(Value::as_str).map(String::from),
                json.get("main").and_then(Value::as_str).map(String::from),
            ];
            for entry in fields.into_iter().flatten() {
                if let Some(found) = self.resolve_file_or_directory(&pkg_dir.join(entry)) {
                    return Some(found);
                }
            }
        }

        self.resolve_index(pkg_dir)
    }

    /// A file as is, with an extension appended, or a directory's index file.
    fn resolve_file_or_directory(&self, target: &Path) -> Option<PathBuf> {
        if target.is_file() {
            return Some(target.to_path_buf());
        }

        for ext in HOST_EXTENSIONS {
            let with_ext = PathBuf::from(format!("{}{}", target.display(), ext));
            if with_ext.is_file() {
                return Some(with_ext);
            }
        }

        if target.is_dir() {
            if let Some(json) = read_manifest(&target.join(MANIFEST_FILE)) {
                if let Some(main) = json.get("main").and_then(Value::as_str) {
                    let main = target.join(main);
                    if main.is_file() {
                        return Some(main);
                    }
                }
            }
            return self.resolve_index(target);
        }

        None
    }

    fn resolve_index(&self, dir: &Path) -> Option<PathBuf> {
        INDEX_FILES
            .iter()
            .map(|index| dir.join(index))
            .find(|path| path.is_file())
    }
}

impl HostResolver for FsHostResolver {
    fn resolve(
        &self,
        specifier: &str,
        importer: Option<&str>,
        _options: &HostResolveOptions,
    ) -> Option<ResolvedId> {
        if specifier.is_empty() {
            return None;
        }
        if specifier.starts_with("node:") {
            return Some(ResolvedId::external(specifier));
        }

        let path = self.resolve_path(specifier, importer)?;
        let path = dunce::canonicalize(&path).unwrap_or(path);
        Some(ResolvedId::resolved(path.to_string_lossy()))
    }
}

/// Split a bare specifier into package name and subpath.
fn parse_bare_specifier(specifier: &str) -> (&str, Option<&str>) {
    let split_at = if specifier.starts_with('@') {
        // Scoped package: @scope/pkg or @scope/pkg/subpath
        specifier
            .match_indices('/')
            .nth(1)
            .map(|(idx, _)| idx)
    } else {
        specifier.find('/')
    };

    match split_at {
        Some(idx) => (&specifier[..idx], Some(&specifier[idx + 1..])),
        None => (specifier, None),
    }
}

fn read_manifest(path: &Path) -> Option<Value> {
    let content = std::fs::read_to_string(path).ok()?;
    serde_json::from_str(&content).ok()
}

/// The `"."` target of an `exports` field (string, `"."` key, or root conditions).
fn root_export(exports: &Value) -> Option<String> {
    match exports {
        Value::String(s) => Some(s.clone()),
        Value::Object(map) => map
            .get(".")
            .and_then(export_target)
            .or_else(|| {
                let is_conditions = map.keys().all(|k| !k.starts_with('.'));
                is_conditions.then(|| export_target(exports)).flatten()
            }),
        _ => None,
    }
}

/// Pick a target from a conditional export: import > default > require.
fn export_target(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Object(map) => map
            .get("import")
            .or_else(|| map.get("default"))
            .or_else(|| map.get("require"))
            .and_then(export_target),
        _ => None,
    }
}
