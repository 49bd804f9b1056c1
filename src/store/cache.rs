use tracing::debug;

use crate::error::AppResult;
use crate::profile::DeviceIndex;

use super::{PreferenceEdits, PreferenceStore};

const DEVICE_LIST_KEY_PREFIX: &str = "DEVICE_LIST_";

/// The bundled device index, persisted per application version.
///
/// The name set lives under `DEVICE_LIST_<version>`; each display name is
/// stored under the profile filename itself. A new version means a new key,
/// so an upgrade starts from an empty cache.
#[derive(Debug)]
pub struct CacheStore<S> {
    store: S,
    key: String,
}

impl<S: PreferenceStore> CacheStore<S> {
    pub fn new(store: S, app_version: &str) -> Self {
        Self {
            store,
            key: device_list_key(app_version),
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn read_index(&self) -> DeviceIndex {
        let names = self.store.get_string_set(&self.key).unwrap_or_default();
        let index: DeviceIndex = names
            .into_iter()
            .map(|name| {
                let display_name = self.store.get_string(&name).unwrap_or_default();
                (name, display_name)
            })
            .collect();
        debug!(key = %self.key, count = index.len(), "read cached device index");
        index
    }

    pub fn write_index(&self, index: &DeviceIndex) -> AppResult<()> {
        let mut edits = PreferenceEdits::new();
        edits.put_string_set(self.key.as_str(), index.keys().map(String::as_str));
        for (name, display_name) in index {
            edits.put_string(name.as_str(), display_name.as_str());
        }
        self.store.commit(edits)?;
        debug!(key = %self.key, count = index.len(), "cached device index");
        Ok(())
    }
}

pub fn device_list_key(app_version: &str) -> String {
    format!("{DEVICE_LIST_KEY_PREFIX}{app_version}")
}
