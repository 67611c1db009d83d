pub mod aliases;
pub mod candidates;
pub mod import;
pub mod resolve;
pub mod version;

use miette::{IntoDiagnostic, Result};
use std::path::{Path, PathBuf};
use waymark_core::{Config, ResolveConfig};

/// Load the resolution config for the project at `config.cwd`.
pub fn load_resolve_config(config: &Config, explicit: Option<&Path>) -> Result<ResolveConfig> {
    let (path, resolve_config) = ResolveConfig::load(&config.cwd, explicit).into_diagnostic()?;
    match path {
        Some(path) => tracing::debug!(path = %path.display(), "loaded resolution config"),
        None => tracing::debug!("no config file, using defaults"),
    }
    Ok(resolve_config)
}

/// Make `path` absolute against the project root.
pub fn absolutize(cwd: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        cwd.join(path)
    }
}

/// Render paths for output.
pub fn display_paths(paths: &[PathBuf]) -> Vec<String> {
    paths
        .iter()
        .map(|p| p.to_string_lossy().into_owned())
        .collect()
}
