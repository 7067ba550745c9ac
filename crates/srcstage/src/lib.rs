//! Stage a bundled third-party source archive for a later build step.
//!
//! The archive is unpacked into a scratch directory, its source root is
//! located and checked for a marker file (`configure` by default), and the
//! tree is copied to the destination directory, replacing whatever was there.

pub mod config;
mod error;
pub mod stager;

pub use config::StageConfig;
pub use error::{Result, StageError};
pub use stager::{StageReport, Stager, resolve_source_root, validate_source_root};
