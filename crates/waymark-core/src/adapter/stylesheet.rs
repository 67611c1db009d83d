//! Import hooks for a legacy stylesheet preprocessor.
//!
//! The preprocessor calls each importer with the `@import` URL and the path
//! of the importing file. An importer either points at a file, supplies the
//! stylesheet contents directly, or defers to the next importer (and
//! eventually the preprocessor's own lookup).

use crate::config::ResolveConfig;
use crate::error::Error;
use crate::resolver::{
    alias_table, AliasRule, CandidateResolver, Extension, Merge, PackageMain, PossibleResolution,
    SharedResolver, Stylesheet,
};
use serde_json::Value;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, warn};
use waymark_util::fs::{probe, read_to_string_lossy, EntryKind};
use waymark_util::path::{basename, join_relative};

/// Answer of a stylesheet importer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImporterResult {
    /// Load this file.
    File(PathBuf),
    /// Use these contents as the imported stylesheet.
    Contents(String),
    /// No opinion; continue with default resolution.
    Defer,
}

impl ImporterResult {
    #[must_use]
    pub fn is_defer(&self) -> bool {
        matches!(self, Self::Defer)
    }
}

/// An `@import` hook.
pub trait LegacyImporter: Send + Sync {
    /// Resolve `url` as imported from the stylesheet at `prev`.
    fn import(&self, url: &str, prev: &str) -> ImporterResult;

    /// Callback form of [`import`](Self::import). `done` is called exactly once.
    fn import_with<F>(&self, url: &str, prev: &str, done: F)
    where
        F: FnOnce(ImporterResult),
        Self: Sized,
    {
        done(self.import(url, prev));
    }
}

/// Resolves aliased stylesheet imports using partial and index conventions.
///
/// The first candidate wins; no candidate defers.
#[derive(Debug, Clone)]
pub struct AliasImporter {
    table: Merge,
}

impl AliasImporter {
    #[must_use]
    pub fn new(rules: &[AliasRule], extension: Extension) -> Self {
        let downstream: Vec<SharedResolver> =
            vec![Arc::new(Stylesheet::new(extension)), Arc::new(PackageMain)];
        Self {
            table: alias_table(rules, &downstream),
        }
    }

    /// Every candidate for `url`, not just the first.
    #[must_use]
    pub fn candidates(&self, url: &str) -> PossibleResolution {
        self.table.resolve(url)
    }
}

impl LegacyImporter for AliasImporter {
    fn import(&self, url: &str, _prev: &str) -> ImporterResult {
        match self.candidates(url).and_then(|c| c.into_iter().next()) {
            Some(file) => {
                debug!(url, file = %file.display(), "resolved stylesheet alias");
                ImporterResult::File(file)
            }
            None => ImporterResult::Defer,
        }
    }
}

/// Turns `@import "json:theme"` into variable declarations read from
/// `theme.json` next to the importing stylesheet.
///
/// Keys are kebab-cased and dash-joined under the file's own kebab-cased
/// name, so `{"colorPrimary": {"base": "#fff"}}` in `theme.json` becomes
/// `$theme-color-primary-base: #fff;`.
#[derive(Debug, Clone)]
pub struct JsonVariablesImporter {
    scheme: String,
}

impl JsonVariablesImporter {
    pub fn new(scheme: impl Into<String>) -> Self {
        Self {
            scheme: scheme.into(),
        }
    }

    fn load(&self, path: &Path) -> Result<Option<Value>, Error> {
        if !probe(path, Some(EntryKind::File)).is_found() {
            return Ok(None);
        }
        let content = read_to_string_lossy(path).map_err(|source| Error::JsonRead {
            path: path.to_path_buf(),
            source,
        })?;
        let value = serde_json::from_str(&content).map_err(|source| Error::JsonParse {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(Some(value))
    }
}

impl Default for JsonVariablesImporter {
    fn default() -> Self {
        Self::new(crate::config::DEFAULT_JSON_SCHEME)
    }
}

impl LegacyImporter for JsonVariablesImporter {
    fn import(&self, url: &str, prev: &str) -> ImporterResult {
        let Some(name) = url.strip_prefix(self.scheme.as_str()) else {
            return ImporterResult::Defer;
        };

        let dir = Path::new(prev).parent().unwrap_or_else(|| Path::new(""));
        let path = join_relative(dir, &format!("{name}.json"));

        match self.load(&path) {
            Ok(Some(value)) => {
                let prefix = kebab_case(basename(name));
                ImporterResult::Contents(render_variables(&prefix, &value).join("\n"))
            }
            Ok(None) => {
                debug!(url, path = %path.display(), "no JSON document for import");
                ImporterResult::Defer
            }
            Err(err) => {
                warn!(url, error = %err, "error importing JSON variables");
                ImporterResult::Defer
            }
        }
    }
}

/// Runs importers in order; the first one that does not defer wins.
#[derive(Default)]
pub struct ImporterChain {
    importers: Vec<Box<dyn LegacyImporter>>,
}

impl ImporterChain {
    #[must_use]
    pub fn new(importers: Vec<Box<dyn LegacyImporter>>) -> Self {
        Self { importers }
    }

    /// The alias importer followed by the JSON variable importer.
    #[must_use]
    pub fn from_config(config: &ResolveConfig, root: &Path) -> Self {
        Self::new(vec![
            Box::new(AliasImporter::new(
                &config.alias_rules(root),
                config.style_extension(),
            )),
            Box::new(JsonVariablesImporter::new(config.json_scheme.clone())),
        ])
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.importers.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.importers.is_empty()
    }
}

impl LegacyImporter for ImporterChain {
    fn import(&self, url: &str, prev: &str) -> ImporterResult {
        self.importers
            .iter()
            .map(|importer| importer.import(url, prev))
            .find(|result| !result.is_defer())
            .unwrap_or(ImporterResult::Defer)
    }
}

/// Flatten a JSON value into `$name: value;` declarations under `prefix`.
///
/// Objects recurse with `prefix-key`, arrays become one comma-separated
/// declaration, `null` produces nothing.
#[must_use]
pub fn render_variables(prefix: &str, value: &Value) -> Vec<String> {
    let mut lines = Vec::new();
    collect_variables(prefix, value, &mut lines);
    lines
}

fn collect_variables(prefix: &str, value: &Value, out: &mut Vec<String>) {
    match value {
        Value::Object(map) => {
            for (key, child) in map {
                let key = kebab_case(key);
                let name = if prefix.is_empty() {
                    key
                } else {
                    format!("{prefix}-{key}")
                };
                collect_variables(&name, child, out);
            }
        }
        Value::Array(items) => {
            let joined = items.iter().map(scalar_text).collect::<Vec<_>>().join(", ");
            out.push(format!("${prefix}: {joined};"));
        }
        Value::Null => {}
        scalar => out.push(format!("${prefix}: {};", scalar_text(scalar))),
    }
}

fn scalar_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// `colorPrimary` → `color-primary`, `URLPath` → `url-path`, `font_size` → `font-size`.
///
/// Leading `_` and `-` are kept, so `_private` stays distinct from `private`.
#[must_use]
pub fn kebab_case(s: &str) -> String {
    let chars: Vec<char> = s.chars().collect();
    let mut out = String::with_capacity(s.len() + 4);

    for (i, &c) in chars.iter().enumerate() {
        if matches!(c, '_' | '-' | ' ') {
            let leading = out.chars().all(|o| o == '_' || o == '-');
            if leading {
                if c != ' ' {
                    out.push(c);
                }
            } else if !out.ends_with('-') {
                out.push('-');
            }
            continue;
        }

        if c.is_uppercase() {
            let prev = i.checked_sub(1).map(|j| chars[j]);
            let next = chars.get(i + 1);
            let boundary = match prev {
                Some(p) if p.is_lowercase() || p.is_ascii_digit() => true,
                Some(p) if p.is_uppercase() => next.is_some_and(|n| n.is_lowercase()),
                _ => false,
            };
            if boundary && !out.is_empty() && !out.ends_with('-') {
                out.push('-');
            }
            out.extend(c.to_lowercase());
        } else {
            out.push(c);
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    fn touch(path: &Path) {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(path, "").unwrap();
    }

    #[test]
    fn test_kebab_case() {
        assert_eq!(kebab_case("colorPrimary"), "color-primary");
        assert_eq!(kebab_case("base"), "base");
        assert_eq!(kebab_case("URLPath"), "url-path");
        assert_eq!(kebab_case("font_size"), "font-size");
        assert_eq!(kebab_case("h1Size"), "h1-size");
        assert_eq!(kebab_case("Theme"), "theme");
    }

    #[test]
    fn test_kebab_case_keeps_leading_underscore() {
        assert_eq!(kebab_case("_private"), "_private");
        assert_eq!(kebab_case("__x_y"), "__x-y");

        let value: Value = serde_json::from_str(r#"{"_private": "a", "private": "b"}"#).unwrap();
        assert_eq!(
            render_variables("t", &value),
            vec!["$t-_private: a;", "$t-private: b;"]
        );
    }

    #[test]
    fn test_render_nested_and_arrays() {
        let value: Value =
            serde_json::from_str(r##"{"colorPrimary": {"base": "#fff"}, "spacing": ["1px","2px"]}"##)
                .unwrap();
        assert_eq!(
            render_variables("theme", &value),
            vec!["$theme-color-primary-base: #fff;", "$theme-spacing: 1px, 2px;"]
        );
    }

    #[test]
    fn test_render_keeps_document_order() {
        let value: Value = serde_json::from_str(r#"{"z": "1", "a": "2", "m": "3"}"#).unwrap();
        assert_eq!(
            render_variables("t", &value),
            vec!["$t-z: 1;", "$t-a: 2;", "$t-m: 3;"]
        );
    }

    #[test]
    fn test_render_scalars_and_null() {
        let value: Value =
            serde_json::from_str(r#"{"size": 4, "flag": true, "none": null}"#).unwrap();
        assert_eq!(
            render_variables("t", &value),
            vec!["$t-size: 4;", "$t-flag: true;"]
        );
    }

    #[test]
    fn test_json_importer() {
        let dir = tempdir().unwrap();
        let styles = dir.path().join("styles");
        fs::create_dir(&styles).unwrap();
        fs::write(
            styles.join("theme.json"),
            r##"{"colorPrimary": {"base": "#fff"}, "spacing": ["1px","2px"]}"##,
        )
        .unwrap();

        let prev = styles.join("main.scss");
        let result = JsonVariablesImporter::default().import("json:theme", &prev.to_string_lossy());
        assert_eq!(
            result,
            ImporterResult::Contents(
                "$theme-color-primary-base: #fff;\n$theme-spacing: 1px, 2px;".to_string()
            )
        );
    }

    #[test]
    fn test_json_importer_prefix_from_basename() {
        let dir = tempdir().unwrap();
        fs::create_dir(dir.path().join("tokens")).unwrap();
        fs::write(dir.path().join("tokens/brandColors.json"), r#"{"main": "red"}"#).unwrap();

        let prev = dir.path().join("app.scss");
        let result = JsonVariablesImporter::default()
            .import("json:tokens/brandColors", &prev.to_string_lossy());
        assert_eq!(
            result,
            ImporterResult::Contents("$brand-colors-main: red;".to_string())
        );
    }

    #[test]
    fn test_json_importer_defers() {
        let dir = tempdir().unwrap();
        let prev = dir.path().join("main.scss");
        let prev = prev.to_string_lossy();
        let importer = JsonVariablesImporter::default();

        // Other schemes and plain paths.
        assert!(importer.import("theme", &prev).is_defer());
        assert!(importer.import("@/styles/x", &prev).is_defer());

        // Missing document.
        assert!(importer.import("json:missing", &prev).is_defer());

        // Malformed document.
        fs::write(dir.path().join("broken.json"), "{ nope").unwrap();
        assert!(importer.import("json:broken", &prev).is_defer());
    }

    #[test]
    fn test_alias_importer_first_candidate() {
        let dir = tempdir().unwrap();
        touch(&dir.path().join("src/styles/_variables.scss"));
        touch(&dir.path().join("src/styles/variables/index.css"));

        let rules = [AliasRule::new("@", dir.path().join("src"))];
        let importer = AliasImporter::new(&rules, Extension::style());

        let result = importer.import("@/styles/variables", "/any/file.scss");
        assert_eq!(
            result,
            ImporterResult::File(dir.path().join("src/styles/variables/index.css"))
        );
    }

    #[test]
    fn test_alias_importer_defers_without_candidates() {
        let dir = tempdir().unwrap();
        let rules = [AliasRule::new("@", dir.path().join("src"))];
        let importer = AliasImporter::new(&rules, Extension::style());

        assert!(importer.import("@/styles/none", "x.scss").is_defer());
        assert!(importer.import("bootstrap/scss/grid", "x.scss").is_defer());
    }

    #[test]
    fn test_alias_importer_with_extension_is_not_probed() {
        let rules = [AliasRule::new("@", PathBuf::from("/project/src"))];
        let importer = AliasImporter::new(&rules, Extension::style());
        assert_eq!(
            importer.import("@/styles/main.scss", "x.scss"),
            ImporterResult::File(PathBuf::from("/project/src/styles/main.scss"))
        );
    }

    #[test]
    fn test_chain_first_non_deferred_wins() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("theme.json"), r#"{"a": "b"}"#).unwrap();
        touch(&dir.path().join("src/_theme.scss"));

        let chain = ImporterChain::from_config(&ResolveConfig::default(), dir.path());
        assert_eq!(chain.len(), 2);
        let prev = dir.path().join("main.scss");
        let prev = prev.to_string_lossy();

        assert_eq!(
            chain.import("@/theme", &prev),
            ImporterResult::File(dir.path().join("src/_theme.scss"))
        );
        assert_eq!(
            chain.import("json:theme", &prev),
            ImporterResult::Contents("$theme-a: b;".to_string())
        );
        assert!(chain.import("plain", &prev).is_defer());
    }

    #[test]
    fn test_import_with_calls_back_once() {
        let mut calls = Vec::new();
        JsonVariablesImporter::default().import_with("plain", "x.scss", |r| calls.push(r));
        assert_eq!(calls, vec![ImporterResult::Defer]);
    }
}
