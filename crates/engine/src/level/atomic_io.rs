use std::fs::{self, File};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::info;

use super::types::LevelDesc;

#[derive(Debug, Error)]
pub enum LevelExportError {
    #[error("failed to encode level json for {path}: {source}")]
    Encode {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("failed to write level file {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

pub fn write_level_json(path: &Path, level: &LevelDesc) -> Result<(), LevelExportError> {
    let mut text =
        serde_json::to_string_pretty(level).map_err(|source| LevelExportError::Encode {
            path: path.to_path_buf(),
            source,
        })?;
    text.push('\n');
    write_text_atomic(path, &text).map_err(|source| LevelExportError::Write {
        path: path.to_path_buf(),
        source,
    })?;
    info!(
        path = %path.display(),
        platforms = level.platforms.len(),
        "level_exported"
    );
    Ok(())
}

pub fn write_text_atomic(path: &Path, text: &str) -> io::Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }

    let staging = staging_path(path);
    let result = stage_and_swap(&staging, path, text.as_bytes());
    if result.is_err() {
        let _ = fs::remove_file(&staging);
    }
    result
}

fn stage_and_swap(staging: &Path, target: &Path, bytes: &[u8]) -> io::Result<()> {
    let mut file = File::create(staging)?;
    file.write_all(bytes)?;
    file.sync_all()?;
    drop(file);
    fs::rename(staging, target)
}

fn staging_path(path: &Path) -> PathBuf {
    let name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| "level.json".to_string());
    path.with_file_name(format!(".{name}.{}.partial", std::process::id()))
}
