use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use thiserror::Error;

use super::types::LevelDesc;

#[derive(Debug, Error)]
pub enum LevelLoadError {
    #[error("failed to read level file {path}: {source}")]
    ReadFile {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to parse level json at {json_path}: {source}")]
    Parse {
        json_path: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("failed to parse level file {path} at {json_path}: {source}")]
    ParseFile {
        path: PathBuf,
        json_path: String,
        #[source]
        source: serde_json::Error,
    },
}

impl LevelLoadError {
    pub fn json_path(&self) -> Option<&str> {
        match self {
            LevelLoadError::ReadFile { .. } => None,
            LevelLoadError::Parse { json_path, .. }
            | LevelLoadError::ParseFile { json_path, .. } => Some(json_path.as_str()),
        }
    }
}

pub fn parse_level_json(raw: &str) -> Result<LevelDesc, LevelLoadError> {
    parse_json_at_path(raw)
        .map_err(|(json_path, source)| LevelLoadError::Parse { json_path, source })
}

pub fn read_level_file(path: &Path) -> Result<LevelDesc, LevelLoadError> {
    let raw = fs::read_to_string(path).map_err(|source| LevelLoadError::ReadFile {
        path: path.to_path_buf(),
        source,
    })?;
    parse_json_at_path(&raw).map_err(|(json_path, source)| LevelLoadError::ParseFile {
        path: path.to_path_buf(),
        json_path,
        source,
    })
}

pub(crate) fn parse_json_at_path<T: DeserializeOwned>(
    raw: &str,
) -> Result<T, (String, serde_json::Error)> {
    let mut deserializer = serde_json::Deserializer::from_str(raw);
    match serde_path_to_error::deserialize::<_, T>(&mut deserializer) {
        Ok(value) => Ok(value),
        Err(error) => {
            let path = error.path().to_string();
            let source = error.into_inner();
            if path.is_empty() {
                Err((".".to_string(), source))
            } else {
                Err((path, source))
            }
        }
    }
}
