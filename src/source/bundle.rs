use std::path::{Path, PathBuf};

use tracing::{error, info};

use crate::profile::{DeviceIndex, PropertyBag, reader};

use super::{ArchiveEntries, EntrySource, collect_index};

/// Default profiles shipped inside the application's own package archive.
#[derive(Debug, Clone)]
pub struct BundleSource {
    package: Option<PathBuf>,
}

impl BundleSource {
    /// `package` is `None` when the package location could not be resolved.
    pub fn new(package: Option<PathBuf>) -> Self {
        Self { package }
    }

    pub fn package(&self) -> Option<&Path> {
        self.package.as_deref()
    }

    fn open(&self) -> Option<ArchiveEntries> {
        let Some(package) = &self.package else {
            error!("application package location is unknown, no bundled profiles available");
            return None;
        };

        match ArchiveEntries::open(package) {
            Ok(archive) => Some(archive),
            Err(err) => {
                error!(
                    package = %package.display(),
                    "could not open application package as an archive: {err}"
                );
                None
            }
        }
    }

    pub fn list_defaults(&self) -> DeviceIndex {
        let Some(archive) = self.open() else {
            return DeviceIndex::new();
        };

        let names = match archive.list_entries() {
            Ok(names) => names,
            Err(err) => {
                error!(
                    package = %archive.path().display(),
                    "could not list package entries: {err}"
                );
                return DeviceIndex::new();
            }
        };

        let index = collect_index(&archive, names);
        info!(
            package = %archive.path().display(),
            count = index.len(),
            "loaded bundled device profiles"
        );
        index
    }

    pub fn load(&self, name: &str) -> PropertyBag {
        let Some(archive) = self.open() else {
            return PropertyBag::default();
        };

        info!(
            package = %archive.path().display(),
            entry = name,
            "loading device profile from package"
        );
        reader::load(&archive, name)
    }
}
