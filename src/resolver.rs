use tracing::{debug, warn};

use crate::profile::{DeviceIndex, PropertyBag, filename_valid};
use crate::source::{BundleSource, DirectorySource};
use crate::store::{CacheStore, PreferenceStore};

/// Resolves device profiles from the cache, the bundled package and the
/// override directory.
///
/// Override files always win over bundled entries and are re-read on every
/// call; only the bundled index is cached. Neither operation fails: every
/// error is logged and degrades to an empty result.
#[derive(Debug)]
pub struct DeviceResolver<S> {
    cache: CacheStore<S>,
    bundle: BundleSource,
    overrides: DirectorySource,
}

impl<S: PreferenceStore> DeviceResolver<S> {
    pub fn new(cache: CacheStore<S>, bundle: BundleSource, overrides: DirectorySource) -> Self {
        Self {
            cache,
            bundle,
            overrides,
        }
    }

    pub fn cache(&self) -> &CacheStore<S> {
        &self.cache
    }

    pub fn bundle(&self) -> &BundleSource {
        &self.bundle
    }

    pub fn overrides(&self) -> &DirectorySource {
        &self.overrides
    }

    pub fn get_devices(&self) -> DeviceIndex {
        let mut devices = self.cache.read_index();
        if devices.is_empty() {
            debug!(key = %self.cache.key(), "device cache is empty, reading bundled profiles");
            devices = self.bundle.list_defaults();
            if let Err(err) = self.cache.write_index(&devices) {
                warn!(key = %self.cache.key(), "could not cache device index: {err}");
            }
        }

        devices.extend(self.overrides.list_overrides());
        devices
    }

    pub fn get_profile(&self, name: &str) -> PropertyBag {
        if !filename_valid(name) {
            warn!(name, "not a device profile name");
            return PropertyBag::default();
        }

        if self.overrides.contains(name) {
            self.overrides.load(name)
        } else {
            self.bundle.load(name)
        }
    }
}
