//! Unpack a source archive and stage the validated tree.
//!
//! A run resets the extraction root, extracts the archive into it, picks the
//! source root, checks for the marker file, then replaces the destination with
//! a copy of the source root. Any failure aborts the run. A failure before the
//! destination is reset leaves it untouched.

use std::path::{Path, PathBuf};

use srcstage_archive::{ArchiveReport, ExtractOptions};
use srcstage_fs::CopyReport;
use tracing::{debug, info};

use crate::config::StageConfig;
use crate::error::{Result, StageError};

/// Outcome of a successful [`Stager::stage`] run.
#[derive(Clone, Debug)]
pub struct StageReport {
    pub source_root: PathBuf,
    /// Whether the archive's single top-level directory was used as the source root.
    pub unwrapped: bool,
    pub archive: ArchiveReport,
    pub copied: CopyReport,
}

pub struct Stager {
    config: StageConfig,
    extract_options: ExtractOptions,
}

impl Stager {
    pub fn new(config: StageConfig) -> Self {
        Self {
            config,
            extract_options: ExtractOptions::default(),
        }
    }

    pub fn extract_options(mut self, options: ExtractOptions) -> Self {
        self.extract_options = options;
        self
    }

    pub fn config(&self) -> &StageConfig {
        &self.config
    }

    pub fn stage(&self) -> Result<StageReport> {
        let config = &self.config;
        config.validate()?;

        info!(path = %config.extract_root.display(), "resetting extraction root");
        srcstage_fs::reset_dir(&config.extract_root)?;

        info!(archive = %config.archive.display(), "extracting archive");
        let archive = srcstage_archive::extract_zip_file(
            &config.archive,
            &config.extract_root,
            &self.extract_options,
        )?;
        debug!(
            entries = archive.entry_count,
            bytes = archive.total_bytes,
            "archive extracted"
        );

        let source_root = resolve_source_root(&config.extract_root)?;
        let unwrapped = source_root != config.extract_root;
        debug!(source_root = %source_root.display(), unwrapped, "resolved source root");

        validate_source_root(&source_root, &config.marker)?;

        if srcstage_fs::remove_dir_if_exists(&config.destination)? {
            debug!(path = %config.destination.display(), "removed previous destination");
        }
        srcstage_fs::ensure_parent(&config.destination)?;

        info!(
            from = %source_root.display(),
            to = %config.destination.display(),
            "copying source tree"
        );
        let copied = srcstage_fs::copy_dir_all(&source_root, &config.destination)?;
        info!(
            files = copied.files,
            bytes = copied.bytes,
            destination = %config.destination.display(),
            "staged source tree"
        );

        Ok(StageReport {
            source_root,
            unwrapped,
            archive,
            copied,
        })
    }
}

/// Pick the top of the extracted source tree.
///
/// An extraction root holding exactly one entry that is a directory is treated
/// as a packaging wrapper and that directory is returned. Anything else (no
/// entries, several entries, a single file) returns `extract_root` itself.
pub fn resolve_source_root(extract_root: impl AsRef<Path>) -> Result<PathBuf> {
    let extract_root = extract_root.as_ref();
    let mut children = srcstage_fs::list_children(extract_root)?;

    if children.len() == 1 && children[0].is_dir() {
        return Ok(children.remove(0));
    }
    Ok(extract_root.to_path_buf())
}

/// Fail unless `marker` exists directly inside `source_root`.
pub fn validate_source_root(source_root: impl AsRef<Path>, marker: &str) -> Result<()> {
    let source_root = source_root.as_ref();
    if source_root.join(marker).exists() {
        return Ok(());
    }
    Err(StageError::MarkerMissing {
        marker: marker.to_string(),
        source_root: source_root.to_path_buf(),
    })
}
