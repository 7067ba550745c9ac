use std::io::{Read, Seek};
use std::path::PathBuf;

use crate::entry::EntryKind;
use crate::error::{Error, Result};

const S_IFMT: u32 = 0o170000;
const S_IFLNK: u32 = 0o120000;

/// An entry read from the archive but not yet written.
pub struct PendingEntry<Rd> {
    pub original_path: PathBuf,
    pub size: u64,
    pub mode: Option<u32>,
    pub kind: EntryKind,
    pub reader: Rd,
}

pub struct ZipSource<R: Read + Seek> {
    archive: zip::ZipArchive<R>,
}

impl<R: Read + Seek> ZipSource<R> {
    pub fn new(reader: R) -> Result<Self> {
        let archive = zip::ZipArchive::new(reader)?;
        Ok(Self { archive })
    }

    pub fn entry_count(&self) -> usize {
        self.archive.len()
    }

    /// Read the metadata of entry `index`; file content streams from `reader`.
    pub fn entry(&mut self, index: usize) -> Result<PendingEntry<impl Read + '_>> {
        let mut file = self.archive.by_index(index)?;

        let name = entry_name(file.name())?;

        let size = file.size();
        let mode = file.unix_mode();
        let kind = if file.is_dir() {
            EntryKind::Directory
        } else if mode.is_some_and(|m| m & S_IFMT == S_IFLNK) {
            let mut target = String::new();
            file.read_to_string(&mut target).map_err(|e| Error::ExtractionFailed {
                path: PathBuf::from(&name),
                source: e,
            })?;
            EntryKind::Symlink {
                target: PathBuf::from(target),
            }
        } else {
            EntryKind::File
        };

        Ok(PendingEntry {
            original_path: PathBuf::from(name),
            size,
            mode,
            kind,
            reader: file,
        })
    }
}

/// Entry name with `/` separators; archives written on Windows may use `\\`.
fn entry_name(raw: &str) -> Result<String> {
    let name = raw.replace('\\', "/");
    if name.is_empty() || name.contains('\0') {
        return Err(Error::InvalidPath(name));
    }
    Ok(name)
}
