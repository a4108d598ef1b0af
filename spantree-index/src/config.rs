use std::ffi::OsStr;
use std::fs::read_to_string;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::pool::{DEFAULT_MAX_BUFFERS, DEFAULT_MAX_CAPACITY};
use crate::predicates::PredicateKind;

#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct PoolConfig {
    #[serde(default = "default_max_buffers")]
    pub max_buffers: usize,
    #[serde(default = "default_max_capacity")]
    pub max_capacity: usize,
}

fn default_max_buffers() -> usize {
    DEFAULT_MAX_BUFFERS
}

fn default_max_capacity() -> usize {
    DEFAULT_MAX_CAPACITY
}

impl Default for PoolConfig {
    fn default() -> Self {
        PoolConfig {
            max_buffers: DEFAULT_MAX_BUFFERS,
            max_capacity: DEFAULT_MAX_CAPACITY,
        }
    }
}

#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct QueryConfig {
    #[serde(default)]
    pub predicate: PredicateKind,
    #[serde(default)]
    pub first_only: bool,
}

///
/// Settings read from a `toml` file, e.g.
///
/// ```toml
/// [pool]
/// max_buffers = 64
///
/// [query]
/// predicate = "intersects"
/// first_only = true
/// ```
///
#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct IndexConfig {
    #[serde(default)]
    pub pool: PoolConfig,
    #[serde(default)]
    pub query: QueryConfig,
}

#[derive(Error, Debug)]
pub enum IndexConfigError {
    #[error("Missing or invalid file extension in index config file. It must be `toml`")]
    InvalidFileType,
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Toml(#[from] toml::de::Error),
}

pub type IndexConfigResult<T> = std::result::Result<T, IndexConfigError>;

impl TryFrom<&Path> for IndexConfig {
    type Error = IndexConfigError;

    fn try_from(path: &Path) -> IndexConfigResult<Self> {
        if path.extension().and_then(OsStr::to_str) != Some("toml") {
            return Err(IndexConfigError::InvalidFileType);
        }
        let toml_str = read_to_string(path)?;
        let config = toml::from_str(&toml_str)?;
        Ok(config)
    }
}
