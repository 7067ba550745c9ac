use std::path::{Component, Path, PathBuf};

use crate::error::{Error, Result};

/// Result of sanitizing an archive entry path.
#[derive(Clone, Debug)]
pub struct SanitizedPath {
    pub original: PathBuf,
    /// Normalized path relative to the extraction base. Empty for entries
    /// that name the base itself (such as `./`).
    pub relative: PathBuf,
    pub resolved: PathBuf,
}

/// Sanitize an entry path for extraction under `base`.
///
/// Absolute entries are rejected. `..` components are collapsed lexically and
/// cannot climb above the archive root, so the result always lies inside `base`.
pub fn sanitize_path<P: AsRef<Path>, B: AsRef<Path>>(entry_path: P, base: B) -> Result<SanitizedPath> {
    let entry_path = entry_path.as_ref();
    let base = base.as_ref();

    // Reject absolute paths (zip-slip protection)
    if is_rooted(entry_path) {
        return Err(Error::ZipSlip {
            entry: entry_path.to_path_buf(),
            resolved: entry_path.to_path_buf(),
        });
    }

    let relative = normalize_path(entry_path);
    let resolved = base.join(&relative);

    if !resolved.starts_with(base) {
        return Err(Error::ZipSlip {
            entry: entry_path.to_path_buf(),
            resolved,
        });
    }

    Ok(SanitizedPath {
        original: entry_path.to_path_buf(),
        relative,
        resolved,
    })
}

/// Check that a symlink stored at `link` (relative to `base`) pointing at
/// `target` stays inside `base`, returning the resolved target location.
pub fn sanitize_symlink_target<P: AsRef<Path>, L: AsRef<Path>, B: AsRef<Path>>(
    target: P,
    link: L,
    base: B,
) -> Result<PathBuf> {
    let target = target.as_ref();
    let link = link.as_ref();
    let base = base.as_ref();

    // Reject absolute symlink targets
    if is_rooted(target) {
        return Err(Error::AbsoluteSymlinkTarget {
            target: target.to_path_buf(),
            symlink: link.to_path_buf(),
        });
    }

    let joined = link
        .parent()
        .map(|p| p.join(target))
        .unwrap_or_else(|| target.to_path_buf());

    match resolve_within(&joined) {
        Some(relative) => Ok(base.join(relative)),
        None => Err(Error::SymlinkEscape {
            target: target.to_path_buf(),
            resolved: base.join(&joined),
        }),
    }
}

/// Fail if any existing component of `relative` under `base`, the leaf
/// included, is a symlink.
///
/// Symlink targets are only checked lexically, so an earlier entry can
/// redirect a directory on disk. Writing through it could land outside `base`.
pub fn ensure_no_symlink_components<R: AsRef<Path>, B: AsRef<Path>>(
    relative: R,
    base: B,
) -> Result<()> {
    let relative = relative.as_ref();
    let mut current = base.as_ref().to_path_buf();

    for component in relative.components() {
        current.push(component);
        match std::fs::symlink_metadata(&current) {
            Ok(meta) if meta.file_type().is_symlink() => {
                return Err(Error::SymlinkInPath {
                    entry: relative.to_path_buf(),
                    symlink: current,
                });
            }
            Ok(_) => {}
            // Nothing below a missing component can exist yet.
            Err(_) => break,
        }
    }

    Ok(())
}

fn is_rooted(path: &Path) -> bool {
    path.components()
        .any(|c| matches!(c, Component::RootDir | Component::Prefix(_)))
}

/// Resolve relative components, clamping `..` at the root.
fn normalize_path(path: &Path) -> PathBuf {
    let mut result = PathBuf::new();

    for component in path.components() {
        match component {
            Component::ParentDir => {
                result.pop();
            }
            Component::Normal(part) => result.push(part),
            Component::RootDir | Component::Prefix(_) | Component::CurDir => {}
        }
    }

    result
}

/// Like [`normalize_path`] but `None` when `..` would climb above the root.
fn resolve_within(path: &Path) -> Option<PathBuf> {
    let mut result = PathBuf::new();

    for component in path.components() {
        match component {
            Component::ParentDir => {
                if !result.pop() {
                    return None;
                }
            }
            Component::Normal(part) => result.push(part),
            Component::CurDir => {}
            Component::RootDir | Component::Prefix(_) => return None,
        }
    }

    Some(result)
}
