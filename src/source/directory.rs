use std::fs::{self, DirEntry};
use std::io;
use std::path::{Path, PathBuf};

use tracing::debug;

use super::EntrySource;

/// Regular files directly inside one directory.
#[derive(Debug, Clone)]
pub struct DirectoryEntries {
    root: PathBuf,
}

impl DirectoryEntries {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn entry_path(&self, name: &str) -> Option<PathBuf> {
        let mut components = Path::new(name).components();
        match (components.next(), components.next()) {
            (Some(std::path::Component::Normal(_)), None) => Some(self.root.join(name)),
            _ => None,
        }
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entry_path(name).is_some_and(|path| path.is_file())
    }
}

/// Name of a regular file entry. Unreadable entries are skipped rather than
/// failing the whole listing.
fn regular_file_name(entry: io::Result<DirEntry>) -> Option<String> {
    let entry = match entry {
        Ok(entry) => entry,
        Err(err) => {
            debug!("skipping unreadable directory entry: {err}");
            return None;
        }
    };
    if !entry.path().is_file() {
        return None;
    }
    entry.file_name().to_str().map(str::to_string)
}

impl EntrySource for DirectoryEntries {
    fn location(&self) -> String {
        self.root.display().to_string()
    }

    fn list_entries(&self) -> io::Result<Vec<String>> {
        Ok(fs::read_dir(&self.root)?
            .filter_map(regular_file_name)
            .collect())
    }

    fn read_entry(&self, name: &str) -> io::Result<Vec<u8>> {
        let path = self.entry_path(name).ok_or_else(|| {
            io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("not a plain file name: {name}"),
            )
        })?;
        fs::read(path)
    }
}
