use tracing::error;

use crate::source::EntrySource;

use super::PropertyBag;

/// Reads `entry_name` from `source` as a properties file.
///
/// Never fails: an unreadable entry is logged and comes back as an empty bag,
/// so one broken profile cannot abort a listing.
pub fn load(source: &dyn EntrySource, entry_name: &str) -> PropertyBag {
    match source.read_entry(entry_name) {
        Ok(bytes) => PropertyBag::from_bytes(&bytes),
        Err(err) => {
            error!(
                source = %source.location(),
                entry = entry_name,
                "could not read device profile: {err}"
            );
            PropertyBag::default()
        }
    }
}
