use std::collections::{BTreeMap, BTreeSet};
use std::fs;
use std::path::PathBuf;
use std::sync::{Mutex, MutexGuard, PoisonError};

use serde::{Deserialize, Serialize};

use crate::error::AppResult;

/// One stored value. Keys written by the rest of the application may hold
/// any JSON value; those are kept as [`PreferenceValue::Other`], read as
/// absent and written back unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PreferenceValue {
    String(String),
    StringSet(BTreeSet<String>),
    Other(serde_json::Value),
}

/// Writes staged with [`PreferenceEdits`] become visible together on
/// [`PreferenceStore::commit`].
#[derive(Debug, Default)]
pub struct PreferenceEdits {
    values: Vec<(String, PreferenceValue)>,
}

impl PreferenceEdits {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn put_string(&mut self, key: impl Into<String>, value: impl Into<String>) -> &mut Self {
        self.values
            .push((key.into(), PreferenceValue::String(value.into())));
        self
    }

    pub fn put_string_set<I, S>(&mut self, key: impl Into<String>, values: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let set = values.into_iter().map(Into::into).collect();
        self.values
            .push((key.into(), PreferenceValue::StringSet(set)));
        self
    }

    fn apply(self, map: &mut BTreeMap<String, PreferenceValue>) {
        for (key, value) in self.values {
            map.insert(key, value);
        }
    }
}

/// Key-value preference space shared with the rest of the application.
///
/// A key holding the other kind of value reads as absent.
pub trait PreferenceStore {
    fn get_string(&self, key: &str) -> Option<String>;
    fn get_string_set(&self, key: &str) -> Option<BTreeSet<String>>;
    fn commit(&self, edits: PreferenceEdits) -> AppResult<()>;
}

impl<T: PreferenceStore + ?Sized> PreferenceStore for Box<T> {
    fn get_string(&self, key: &str) -> Option<String> {
        (**self).get_string(key)
    }

    fn get_string_set(&self, key: &str) -> Option<BTreeSet<String>> {
        (**self).get_string_set(key)
    }

    fn commit(&self, edits: PreferenceEdits) -> AppResult<()> {
        (**self).commit(edits)
    }
}

fn string_of(value: Option<&PreferenceValue>) -> Option<String> {
    match value? {
        PreferenceValue::String(value) => Some(value.clone()),
        _ => None,
    }
}

fn string_set_of(value: Option<&PreferenceValue>) -> Option<BTreeSet<String>> {
    match value? {
        PreferenceValue::StringSet(values) => Some(values.clone()),
        _ => None,
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Preferences persisted as one JSON object.
///
/// Commits write a sibling temp file and rename it into place, so readers
/// see either the previous snapshot or the new one.
#[derive(Debug)]
pub struct FilePreferenceStore {
    path: PathBuf,
    values: Mutex<BTreeMap<String, PreferenceValue>>,
}

impl FilePreferenceStore {
    pub fn open(path: impl Into<PathBuf>) -> AppResult<Self> {
        let path = path.into();
        let values = if path.exists() {
            let raw = fs::read_to_string(&path)?;
            serde_json::from_str(&raw)?
        } else {
            BTreeMap::new()
        };

        Ok(Self {
            path,
            values: Mutex::new(values),
        })
    }

    fn persist(&self, values: &BTreeMap<String, PreferenceValue>) -> AppResult<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }

        let payload = serde_json::to_string_pretty(values)?;
        let staging = self.path.with_extension("json.tmp");
        fs::write(&staging, payload)?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;

            let mut perms = fs::metadata(&staging)?.permissions();
            perms.set_mode(0o600);
            fs::set_permissions(&staging, perms)?;
        }

        fs::rename(&staging, &self.path)?;
        Ok(())
    }
}

impl PreferenceStore for FilePreferenceStore {
    fn get_string(&self, key: &str) -> Option<String> {
        string_of(lock(&self.values).get(key))
    }

    fn get_string_set(&self, key: &str) -> Option<BTreeSet<String>> {
        string_set_of(lock(&self.values).get(key))
    }

    fn commit(&self, edits: PreferenceEdits) -> AppResult<()> {
        let mut values = lock(&self.values);
        let mut next = values.clone();
        edits.apply(&mut next);
        self.persist(&next)?;
        *values = next;
        Ok(())
    }
}

/// Process-local preferences, used when nothing should touch disk.
#[derive(Debug, Default)]
pub struct MemoryPreferenceStore {
    values: Mutex<BTreeMap<String, PreferenceValue>>,
}

impl MemoryPreferenceStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl PreferenceStore for MemoryPreferenceStore {
    fn get_string(&self, key: &str) -> Option<String> {
        string_of(lock(&self.values).get(key))
    }

    fn get_string_set(&self, key: &str) -> Option<BTreeSet<String>> {
        string_set_of(lock(&self.values).get(key))
    }

    fn commit(&self, edits: PreferenceEdits) -> AppResult<()> {
        edits.apply(&mut lock(&self.values));
        Ok(())
    }
}
