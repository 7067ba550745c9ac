use std::path::Path;

use crate::Result;

#[derive(Clone, Debug, Default)]
pub struct ExtractOptions {
    pub perm_strategy: PermissionStrategy,
}

impl ExtractOptions {
    pub fn permission_strategy(mut self, strategy: PermissionStrategy) -> Self {
        self.perm_strategy = strategy;
        self
    }
}

/// How unix mode bits recorded in the archive are applied to extracted files.
///
/// Only regular files are affected. On non-unix platforms every strategy is a no-op.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum PermissionStrategy {
    /// Apply the archived permission bits when the entry records any.
    #[default]
    Preserve,
    /// Keep whatever the process umask produced.
    Ignore,
}

impl PermissionStrategy {
    pub fn apply_to_path(&self, path: &Path, mode: Option<u32>) -> Result<()> {
        match (self, mode) {
            (Self::Preserve, Some(mode)) => set_mode(path, mode),
            _ => Ok(()),
        }
    }
}

#[cfg(unix)]
fn set_mode(path: &Path, mode: u32) -> Result<()> {
    use std::os::unix::fs::PermissionsExt;

    let bits = mode & 0o7777;
    if bits == 0 {
        return Ok(());
    }
    std::fs::set_permissions(path, std::fs::Permissions::from_mode(bits))?;
    Ok(())
}

#[cfg(not(unix))]
fn set_mode(_path: &Path, _mode: u32) -> Result<()> {
    Ok(())
}
