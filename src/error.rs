use std::path::PathBuf;

use thiserror::Error;

use crate::map::MapError;

/// Errors surfaced by the fallible edges of the crate: config files, the
/// embedded level table and frame export. The per-frame core never fails;
/// it recovers locally with sentinel values instead.
#[derive(Debug, Error)]
pub enum Error {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid level grid: {0}")]
    Map(#[from] MapError),
    #[error("level {level}: {reason}")]
    Level { level: u32, reason: String },
    #[error("failed to export frame: {0}")]
    Image(#[from] image::ImageError),
}

pub type Result<T> = std::result::Result<T, Error>;
