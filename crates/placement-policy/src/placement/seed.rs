//! JSON seed files for the student and company collections.

use std::fs;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use tracing::{info, warn};

use super::domain::{Company, Student};

#[derive(Debug, thiserror::Error)]
pub enum SeedError {
    #[error("failed to read seed file {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to parse seed file {path}: {source}")]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
}

pub fn load_students(path: &Path) -> Result<Vec<Student>, SeedError> {
    load(path)
}

pub fn load_companies(path: &Path) -> Result<Vec<Company>, SeedError> {
    load(path)
}

/// Load a seed file, starting from an empty collection when it is missing or malformed.
pub fn load_or_empty<T: DeserializeOwned>(path: &Path) -> Vec<T> {
    match load(path) {
        Ok(records) => {
            info!(path = %path.display(), count = records.len(), "seed data loaded");
            records
        }
        Err(err) => {
            warn!(error = %err, "starting with an empty collection");
            Vec::new()
        }
    }
}

fn load<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>, SeedError> {
    let raw = fs::read_to_string(path).map_err(|source| SeedError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&raw).map_err(|source| SeedError::Parse {
        path: path.to_path_buf(),
        source,
    })
}
