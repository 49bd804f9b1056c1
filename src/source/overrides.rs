use std::io;
use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

use crate::profile::{DeviceIndex, PropertyBag, reader};

use super::{DirectoryEntries, EntrySource, collect_index};

/// User supplied profiles that replace or extend the bundled ones.
///
/// The directory is optional; when it does not exist there are simply no
/// overrides.
#[derive(Debug, Clone)]
pub struct DirectorySource {
    entries: DirectoryEntries,
}

impl DirectorySource {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            entries: DirectoryEntries::new(dir),
        }
    }

    pub fn dir(&self) -> &Path {
        self.entries.root()
    }

    pub fn list_overrides(&self) -> DeviceIndex {
        let names = match self.entries.list_entries() {
            Ok(names) => names,
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                debug!(dir = %self.dir().display(), "no override directory");
                return DeviceIndex::new();
            }
            Err(err) => {
                warn!(
                    dir = %self.dir().display(),
                    "could not list override directory: {err}"
                );
                return DeviceIndex::new();
            }
        };

        collect_index(&self.entries, names)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains(name)
    }

    pub fn load(&self, name: &str) -> PropertyBag {
        info!(
            path = %self.dir().join(name).display(),
            "loading device profile from override directory"
        );
        reader::load(&self.entries, name)
    }
}
