use crate::{Error, Result};
use std::fs;
use std::path::Path;

/// Counts of what [`copy_dir_all`] wrote.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CopyReport {
    pub files: usize,
    pub directories: usize,
    pub symlinks: usize,
    pub bytes: u64,
}

/// Recursively copy `src` into `dest`, creating `dest` and any missing parents.
///
/// Regular files keep their permission bits. Symlinks are recreated with the
/// same target instead of being followed.
pub fn copy_dir_all(src: impl AsRef<Path>, dest: impl AsRef<Path>) -> Result<CopyReport> {
    let mut report = CopyReport::default();
    copy_into(src.as_ref(), dest.as_ref(), &mut report)?;
    tracing::debug!(
        files = report.files,
        directories = report.directories,
        symlinks = report.symlinks,
        bytes = report.bytes,
        "copied directory tree"
    );
    Ok(report)
}

fn copy_into(src: &Path, dest: &Path, report: &mut CopyReport) -> Result<()> {
    if !dest.exists() {
        fs::create_dir_all(dest).map_err(|e| Error::CreateDir {
            path: dest.to_path_buf(),
            source: e,
        })?;
    }
    report.directories += 1;

    for entry in fs::read_dir(src).map_err(|e| Error::Read {
        path: src.to_path_buf(),
        source: e,
    })? {
        let entry = entry.map_err(|e| Error::Read {
            path: src.to_path_buf(),
            source: e,
        })?;
        let file_type = entry.file_type().map_err(|e| Error::Read {
            path: entry.path(),
            source: e,
        })?;

        let src_path = entry.path();
        let dest_path = dest.join(entry.file_name());

        if file_type.is_dir() {
            copy_into(&src_path, &dest_path, report)?;
        } else if file_type.is_symlink() {
            let target = fs::read_link(&src_path).map_err(|e| Error::Read {
                path: src_path,
                source: e,
            })?;
            crate::primitives::symlink::create_symlink(target, &dest_path)?;
            report.symlinks += 1;
        } else {
            report.bytes += fs::copy(&src_path, &dest_path).map_err(|e| Error::Write {
                path: dest_path,
                source: e,
            })?;
            report.files += 1;
        }
    }
    Ok(())
}
