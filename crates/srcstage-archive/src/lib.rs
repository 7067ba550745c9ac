//! Zip extraction for staging third-party source archives.
//!
//! # Architecture
//!
//! - `sanitize.rs` - Entry path and symlink target sanitization (zip-slip prevention)
//! - `extract.rs` - Extraction pipeline writing entries to disk
//! - `extract/zip.rs` - Zip entry source
//! - `options.rs` - Extraction options
//! - `entry.rs` - Extraction report types

pub use entry::{ArchiveReport, EntryKind, ExtractedEntry};
pub use error::{Error, Result};
pub use extract::{extract_zip, extract_zip_file};
pub use options::{ExtractOptions, PermissionStrategy};
pub use sanitize::{
    SanitizedPath, ensure_no_symlink_components, sanitize_path, sanitize_symlink_target,
};

pub mod entry;
mod error;
pub mod extract;
pub mod options;
mod sanitize;
