use crate::{Error, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// Remove the directory tree at `path` if one exists.
///
/// Returns `true` when something was removed.
pub fn remove_dir_if_exists(path: impl AsRef<Path>) -> Result<bool> {
    let path = path.as_ref();
    if !path.is_dir() {
        return Ok(false);
    }
    fs::remove_dir_all(path).map_err(|e| Error::Remove {
        path: path.to_path_buf(),
        source: e,
    })?;
    tracing::debug!(path = %path.display(), "removed existing directory");
    Ok(true)
}

/// Leave an empty directory at `path`, discarding anything already there.
pub fn reset_dir(path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    remove_dir_if_exists(path)?;
    fs::create_dir_all(path).map_err(|e| Error::CreateDir {
        path: path.to_path_buf(),
        source: e,
    })
}

/// Create the parent directory of `path` and its ancestors.
pub fn ensure_parent(path: impl AsRef<Path>) -> Result<()> {
    let Some(parent) = path.as_ref().parent() else {
        return Ok(());
    };
    if parent.as_os_str().is_empty() {
        return Ok(());
    }
    fs::create_dir_all(parent).map_err(|e| Error::CreateDir {
        path: parent.to_path_buf(),
        source: e,
    })
}

/// Immediate children of `dir`, sorted by path.
pub fn list_children(dir: impl AsRef<Path>) -> Result<Vec<PathBuf>> {
    let dir = dir.as_ref();
    let mut children = fs::read_dir(dir)
        .map_err(|e| Error::Read {
            path: dir.to_path_buf(),
            source: e,
        })?
        .map(|entry| {
            entry.map(|e| e.path()).map_err(|e| Error::Read {
                path: dir.to_path_buf(),
                source: e,
            })
        })
        .collect::<Result<Vec<_>>>()?;
    children.sort();
    Ok(children)
}
