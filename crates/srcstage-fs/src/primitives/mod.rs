pub mod copy_dir;
pub mod reset_dir;
pub mod symlink;

pub use copy_dir::{CopyReport, copy_dir_all};
pub use reset_dir::{ensure_parent, list_children, remove_dir_if_exists, reset_dir};
pub use symlink::create_symlink;
