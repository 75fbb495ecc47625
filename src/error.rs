use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::descriptor::Scope;

/// Crate-wide error type. Adapter failures are converted into per-client
/// results at the orchestrator boundary; only descriptor construction errors
/// are expected to reach the caller directly.
#[derive(Debug, Error)]
pub enum Error {
    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("{client} has no {scope} configuration")]
    UnsupportedScope { client: &'static str, scope: Scope },

    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to serialize JSON: {source}")]
    JsonSerialize {
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to serialize YAML: {source}")]
    YamlSerialize {
        #[source]
        source: serde_yaml::Error,
    },

    #[error("configuration error: {0}")]
    Config(String),
}

impl Error {
    pub fn io(path: &Path, source: std::io::Error) -> Self {
        Self::Io {
            path: path.to_path_buf(),
            source,
        }
    }
}
