use std::io;
use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum StageError {
    #[error("{marker} not found after extraction in '{source_root}'")]
    MarkerMissing { marker: String, source_root: PathBuf },

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("failed to read config '{path}': {source}")]
    ConfigRead { path: PathBuf, source: io::Error },

    #[error("failed to parse config '{path}': {source}")]
    ConfigParse {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error(transparent)]
    Archive(#[from] srcstage_archive::Error),

    #[error(transparent)]
    Fs(#[from] srcstage_fs::Error),
}

pub type Result<T> = std::result::Result<T, StageError>;
