pub mod archive;
pub mod bundle;
pub mod directory;
pub mod overrides;

use std::io;

use tracing::debug;

use crate::profile::{DeviceIndex, filename_valid, reader};

pub use archive::ArchiveEntries;
pub use bundle::BundleSource;
pub use directory::DirectoryEntries;
pub use overrides::DirectorySource;

/// A named collection of readable entries: a zip container or a plain
/// directory.
pub trait EntrySource {
    /// Human readable location, used in log lines.
    fn location(&self) -> String;
    /// Names of the regular entries this source holds.
    fn list_entries(&self) -> io::Result<Vec<String>>;
    fn read_entry(&self, name: &str) -> io::Result<Vec<u8>>;
}

/// Loads the conventionally named `names` from `source` into an index.
pub(crate) fn collect_index(source: &dyn EntrySource, names: Vec<String>) -> DeviceIndex {
    let mut index = DeviceIndex::new();
    for name in names {
        if !filename_valid(&name) {
            continue;
        }
        let display_name = reader::load(source, &name).display_name();
        debug!(
            source = %source.location(),
            entry = %name,
            display_name = %display_name,
            "found device profile"
        );
        index.insert(name, display_name);
    }
    index
}
