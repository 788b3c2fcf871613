use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::types::Issue;

#[derive(Error, Debug)]
pub enum CacheError {
    #[error("Failed to read cache file at {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed to parse cache file at {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to serialize issues: {0}")]
    Serialize(#[source] serde_json::Error),

    #[error("Failed to write cache file at {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl CacheError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::Read { source, .. } if source.kind() == io::ErrorKind::NotFound)
    }
}

/// Last successfully fetched issue list, kept on disk between launches.
#[derive(Debug, Clone)]
pub struct IssueCache {
    path: PathBuf,
}

impl IssueCache {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn load(&self) -> Result<Vec<Issue>, CacheError> {
        let contents = std::fs::read(&self.path).map_err(|e| CacheError::Read {
            path: self.path.clone(),
            source: e,
        })?;

        serde_json::from_slice(&contents).map_err(|e| CacheError::Parse {
            path: self.path.clone(),
            source: e,
        })
    }

    pub fn save(&self, issues: &[Issue]) -> Result<(), CacheError> {
        let contents = serde_json::to_vec(issues).map_err(CacheError::Serialize)?;

        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| CacheError::Write {
                path: self.path.clone(),
                source: e,
            })?;
        }

        std::fs::write(&self.path, contents).map_err(|e| CacheError::Write {
            path: self.path.clone(),
            source: e,
        })
    }
}
