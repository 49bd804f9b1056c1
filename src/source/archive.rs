use std::cell::RefCell;
use std::fs::File;
use std::io::{self, BufReader, Read};
use std::path::{Path, PathBuf};

use zip::ZipArchive;
use zip::result::ZipError;

use crate::error::AppResult;

use super::EntrySource;

const MAX_SIZE_HINT: u64 = 64 * 1024;

/// Entries of a zip container such as an installed application package.
pub struct ArchiveEntries {
    path: PathBuf,
    archive: RefCell<ZipArchive<BufReader<File>>>,
}

impl ArchiveEntries {
    pub fn open(path: impl AsRef<Path>) -> AppResult<Self> {
        let path = path.as_ref().to_path_buf();
        let file = File::open(&path)?;
        let archive = ZipArchive::new(BufReader::new(file))?;
        Ok(Self {
            path,
            archive: RefCell::new(archive),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

fn into_io(err: ZipError) -> io::Error {
    match err {
        ZipError::Io(err) => err,
        ZipError::FileNotFound => io::Error::new(io::ErrorKind::NotFound, "entry not found"),
        other => io::Error::new(io::ErrorKind::InvalidData, other),
    }
}

impl EntrySource for ArchiveEntries {
    fn location(&self) -> String {
        self.path.display().to_string()
    }

    fn list_entries(&self) -> io::Result<Vec<String>> {
        let mut archive = self.archive.borrow_mut();
        let mut names = Vec::with_capacity(archive.len());
        for index in 0..archive.len() {
            let entry = archive.by_index_raw(index).map_err(into_io)?;
            if entry.is_file() {
                names.push(entry.name().to_string());
            }
        }
        Ok(names)
    }

    fn read_entry(&self, name: &str) -> io::Result<Vec<u8>> {
        let mut archive = self.archive.borrow_mut();
        let mut entry = archive.by_name(name).map_err(into_io)?;
        // Header sizes are untrusted; only use them as a bounded hint.
        let mut bytes = Vec::with_capacity(entry.size().min(MAX_SIZE_HINT) as usize);
        entry.read_to_end(&mut bytes)?;
        Ok(bytes)
    }
}
