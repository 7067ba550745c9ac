use std::io;
use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("failed to open archive '{path}': {source}")]
    Open { path: PathBuf, source: io::Error },

    #[error("archive is corrupted: {0}")]
    Corrupted(#[from] zip::result::ZipError),

    #[error("zip-slip attack detected: entry '{entry}' resolves to '{resolved}'")]
    ZipSlip { entry: PathBuf, resolved: PathBuf },

    #[error("symlink target escapes base directory: '{target}' -> '{resolved}'")]
    SymlinkEscape { target: PathBuf, resolved: PathBuf },

    #[error("entry '{entry}' would be written through symlink '{symlink}'")]
    SymlinkInPath { entry: PathBuf, symlink: PathBuf },

    #[error("symlink target is absolute path: '{target}' in '{symlink}'")]
    AbsoluteSymlinkTarget { target: PathBuf, symlink: PathBuf },

    #[error("entry path is empty or contains a null byte: '{0}'")]
    InvalidPath(String),

    #[error("failed to extract '{path}': {source}")]
    ExtractionFailed { path: PathBuf, source: io::Error },

    #[error("failed to create directory: {path}: {source}")]
    DirectoryCreationFailed { path: PathBuf, source: io::Error },

    #[error("failed to create symlink: {source}")]
    SymlinkCreationFailed { source: srcstage_fs::Error },

    #[error(transparent)]
    Io(#[from] io::Error),
}

impl From<srcstage_fs::Error> for Error {
    fn from(e: srcstage_fs::Error) -> Self {
        Self::SymlinkCreationFailed { source: e }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
