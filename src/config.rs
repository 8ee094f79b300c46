use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use skout_core::Schema;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Number of similar players reported by default
pub const DEFAULT_TOP_K: usize = 5;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Cannot read config {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid config {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Settings of one exploration session
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SessionConfig {
    /// CSV file holding the player dataset
    pub dataset: PathBuf,
    pub schema: Schema,
    /// How many similar players to return
    pub top_k: usize,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            dataset: PathBuf::from("players.csv"),
            schema: Schema::default(),
            top_k: DEFAULT_TOP_K,
        }
    }
}

impl SessionConfig {
    /// Read a JSON config; absent fields keep their defaults
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        read_json(path.as_ref())
    }

    /// Read a standalone schema JSON file
    pub fn schema_from_json_file<P: AsRef<Path>>(path: P) -> Result<Schema, ConfigError> {
        read_json(path.as_ref())
    }
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T, ConfigError> {
    let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&text).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })
}
