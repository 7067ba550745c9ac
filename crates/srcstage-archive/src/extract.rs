//! Zip extraction into a directory.
//!
//! # Platform Behavior
//!
//! **Unix**: symlink entries become symlinks and archived mode bits are applied
//! according to the selected `PermissionStrategy`.
//!
//! **Windows (non-Unix)**: symlink entries are written as regular files holding
//! the link target, and permission handling is a no-op.

use std::fs::File;
use std::io::{BufReader, Read, Seek};
use std::path::Path;

use crate::entry::{ArchiveReport, EntryKind, ExtractedEntry};
use crate::error::{Error, Result};
use crate::options::ExtractOptions;
use crate::sanitize::{ensure_no_symlink_components, sanitize_path, sanitize_symlink_target};

mod zip;

pub use self::zip::{PendingEntry, ZipSource};

/// Extract every entry of the zip archive read from `reader` into `destination`.
///
/// The internal directory layout is preserved. `destination` is created if missing.
pub fn extract_zip<R: Read + Seek>(
    reader: R,
    destination: impl AsRef<Path>,
    options: &ExtractOptions,
) -> Result<ArchiveReport> {
    let destination = destination.as_ref();
    let mut source = ZipSource::new(reader)?;
    let mut report = ArchiveReport::default();

    ensure_directory(destination)?;

    for index in 0..source.entry_count() {
        let mut pending = source.entry(index)?;
        let sanitized = sanitize_path(&pending.original_path, destination)?;

        if sanitized.relative.as_os_str().is_empty() {
            tracing::trace!(
                entry = %pending.original_path.display(),
                "skipping archive root entry"
            );
            continue;
        }

        ensure_no_symlink_components(&sanitized.relative, destination)?;
        write_entry(&mut pending, &sanitized.relative, destination, &sanitized.resolved)?;

        if pending.kind == EntryKind::File {
            options
                .perm_strategy
                .apply_to_path(&sanitized.resolved, pending.mode)?;
        }

        let entry = ExtractedEntry {
            original_path: pending.original_path,
            target_path: sanitized.resolved,
            size: pending.size,
            mode: pending.mode,
            kind: pending.kind,
        };
        tracing::trace!(
            entry = %entry.original_path.display(),
            size = entry.size,
            executable = entry.is_executable(),
            "extracted"
        );
        report.push(entry);
    }

    tracing::debug!(
        destination = %destination.display(),
        entries = report.entry_count,
        bytes = report.total_bytes,
        "extracted zip archive"
    );

    Ok(report)
}

/// Open the zip archive at `archive` and extract it into `destination`.
///
/// The archive file is closed before this returns, on success or failure.
pub fn extract_zip_file(
    archive: impl AsRef<Path>,
    destination: impl AsRef<Path>,
    options: &ExtractOptions,
) -> Result<ArchiveReport> {
    let archive = archive.as_ref();
    let file = File::open(archive).map_err(|e| Error::Open {
        path: archive.to_path_buf(),
        source: e,
    })?;
    extract_zip(BufReader::new(file), destination, options)
}

fn write_entry<Rd: Read>(
    pending: &mut PendingEntry<Rd>,
    relative: &Path,
    base: &Path,
    target_path: &Path,
) -> Result<()> {
    match &pending.kind {
        EntryKind::File => write_file(&mut pending.reader, target_path),
        EntryKind::Directory => ensure_directory(target_path),
        EntryKind::Symlink { target } => {
            sanitize_symlink_target(target, relative, base)?;
            write_symlink(target, target_path)
        }
    }
}

fn write_file(reader: &mut impl Read, target_path: &Path) -> Result<()> {
    if let Some(parent) = target_path.parent() {
        ensure_directory(parent)?;
    }

    let mut file = File::create(target_path).map_err(|e| Error::ExtractionFailed {
        path: target_path.to_path_buf(),
        source: e,
    })?;
    std::io::copy(reader, &mut file).map_err(|e| Error::ExtractionFailed {
        path: target_path.to_path_buf(),
        source: e,
    })?;

    Ok(())
}

fn ensure_directory(path: &Path) -> Result<()> {
    if !path.exists() {
        std::fs::create_dir_all(path).map_err(|e| Error::DirectoryCreationFailed {
            path: path.to_path_buf(),
            source: e,
        })?;
    }
    Ok(())
}

#[cfg(unix)]
fn write_symlink(target: &Path, link: &Path) -> Result<()> {
    if let Some(parent) = link.parent() {
        ensure_directory(parent)?;
    }
    srcstage_fs::create_symlink(target, link)?;
    Ok(())
}

#[cfg(not(unix))]
fn write_symlink(target: &Path, link: &Path) -> Result<()> {
    let content = target.to_string_lossy().into_owned();
    write_file(&mut content.as_bytes(), link)
}
