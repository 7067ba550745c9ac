//! Filesystem primitives used to stage an unpacked source tree.
//!
//! Every operation is synchronous and assumes exclusive access to the
//! paths it is given. Errors carry the offending path alongside the
//! underlying [`std::io::Error`].

mod error;
pub mod primitives;

pub use error::{Error, Result};
pub use primitives::{
    CopyReport, copy_dir_all, create_symlink, ensure_parent, list_children, remove_dir_if_exists,
    reset_dir,
};
