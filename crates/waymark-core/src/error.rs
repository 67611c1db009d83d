use std::path::PathBuf;
use thiserror::Error;

/// Core error type for waymark operations.
#[derive(Error, Debug)]
pub enum Error {
    #[error("Failed to read config at {path}: {source}")]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config at {path}: {source}")]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Config file not found: {path}")]
    ConfigNotFound { path: PathBuf },

    #[error("Invalid exclude pattern `{pattern}`: {source}")]
    InvalidExcludePattern {
        pattern: String,
        #[source]
        source: regex_lite::Error,
    },

    #[error("Invalid alias `{alias}`: {source}")]
    InvalidAliasPattern {
        alias: String,
        #[source]
        source: regex_lite::Error,
    },

    #[error("Failed to read package manifest {path}: {source}")]
    ManifestRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse package manifest {path}: {source}")]
    ManifestParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to read JSON import {path}: {source}")]
    JsonRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse JSON import {path}: {source}")]
    JsonParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}
