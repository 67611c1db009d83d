//! Configuration: runtime options and the resolution config file.
//!
//! The resolution config is read once from `waymark.json` in the project
//! root (or an explicit path) and is immutable afterwards:
//!
//! ```json
//! {
//!   "aliases": { "@": "./src", "~": "./node_modules" },
//!   "exclude": ["@vite"],
//!   "scriptExtensions": ["js", "cjs", "mjs"],
//!   "styleExtensions": ["sass", "scss", "css"],
//!   "jsonScheme": "json:"
//! }
//! ```
//!
//! Missing fields take the defaults shown above.

use crate::error::Error;
use crate::resolver::{
    AliasRule, ExclusionSet, Extension, DEFAULT_EXCLUDE, SCRIPT_EXTENSIONS, STYLE_EXTENSIONS,
};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use waymark_util::path::normalize;

/// Config file name looked up in the project root.
pub const CONFIG_FILE: &str = "waymark.json";

/// Default scheme prefix of the JSON variable importer.
pub const DEFAULT_JSON_SCHEME: &str = "json:";

/// Runtime configuration for the waymark CLI.
#[derive(Debug, Clone)]
pub struct Config {
    /// Current working directory (project root).
    pub cwd: PathBuf,

    /// Whether to emit JSON logs.
    pub json_logs: bool,

    /// Verbosity level (0 = WARN, 1 = DEBUG, 2+ = TRACE).
    pub verbosity: u8,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            cwd: std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")),
            json_logs: false,
            verbosity: 0,
        }
    }
}

impl Config {
    /// Create a new config with the given working directory.
    #[must_use]
    pub fn new(cwd: PathBuf) -> Self {
        Self {
            cwd,
            ..Default::default()
        }
    }

    /// Set verbosity level.
    #[must_use]
    pub fn with_verbosity(mut self, verbosity: u8) -> Self {
        self.verbosity = verbosity;
        self
    }

    /// Set JSON log output.
    #[must_use]
    pub fn with_json_logs(mut self, json: bool) -> Self {
        self.json_logs = json;
        self
    }
}

/// Alias prefixes mapped to target directories, in declaration order.
///
/// A prefix declared twice keeps its first position and takes the later
/// directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Aliases(IndexMap<String, String>);

impl Aliases {
    #[must_use]
    pub fn new(entries: Vec<(String, String)>) -> Self {
        Self(entries.into_iter().collect())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl Default for Aliases {
    fn default() -> Self {
        Self::new(vec![
            ("@".to_string(), "./src".to_string()),
            ("~".to_string(), "./node_modules".to_string()),
        ])
    }
}

/// Resolution configuration, shared read-only by every resolution call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ResolveConfig {
    /// Alias prefix → directory (relative to the project root or absolute).
    pub aliases: Aliases,
    /// Regular expressions of specifiers that are never aliased.
    pub exclude: Vec<String>,
    /// Extensions probed for scripts.
    pub script_extensions: Vec<String>,
    /// Extensions probed for stylesheets.
    pub style_extensions: Vec<String>,
    /// Scheme prefix handled by the JSON variable importer.
    pub json_scheme: String,
}

impl Default for ResolveConfig {
    fn default() -> Self {
        Self {
            aliases: Aliases::default(),
            exclude: DEFAULT_EXCLUDE.iter().map(ToString::to_string).collect(),
            script_extensions: SCRIPT_EXTENSIONS.iter().map(ToString::to_string).collect(),
            style_extensions: STYLE_EXTENSIONS.iter().map(ToString::to_string).collect(),
            json_scheme: DEFAULT_JSON_SCHEME.to_string(),
        }
    }
}

impl ResolveConfig {
    /// Load the config for `root`.
    ///
    /// With an explicit path, that file must exist. Otherwise `waymark.json`
    /// in `root` is used if present, and defaults if not. Returns the path
    /// the config was read from, if any.
    pub fn load(root: &Path, explicit: Option<&Path>) -> Result<(Option<PathBuf>, Self), Error> {
        let path = match explicit {
            Some(p) => {
                let abs = if p.is_absolute() {
                    p.to_path_buf()
                } else {
                    root.join(p)
                };
                if !abs.is_file() {
                    return Err(Error::ConfigNotFound { path: abs });
                }
                abs
            }
            None => {
                let candidate = root.join(CONFIG_FILE);
                if !candidate.is_file() {
                    return Ok((None, Self::default()));
                }
                candidate
            }
        };

        let config = Self::from_file(&path)?;
        Ok((Some(path), config))
    }

    /// Read and parse a config file.
    pub fn from_file(path: &Path) -> Result<Self, Error> {
        let source = std::fs::read_to_string(path).map_err(|source| Error::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&source).map_err(|source| Error::ConfigParse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Alias rules with target directories made absolute against `root`.
    #[must_use]
    pub fn alias_rules(&self, root: &Path) -> Vec<AliasRule> {
        self.aliases
            .iter()
            .map(|(alias, dir)| AliasRule::new(alias, normalize(&root.join(dir))))
            .collect()
    }

    /// Compile the exclusion patterns.
    pub fn exclusion_set(&self) -> Result<ExclusionSet, Error> {
        ExclusionSet::new(&self.exclude)
    }

    #[must_use]
    pub fn script_extension(&self) -> Extension {
        Extension::new(self.script_extensions.iter().cloned())
    }

    #[must_use]
    pub fn style_extension(&self) -> Extension {
        Extension::new(self.style_extensions.iter().cloned())
    }
}
