pub mod cache;
pub mod prefs;

pub use cache::CacheStore;
pub use prefs::{
    FilePreferenceStore, MemoryPreferenceStore, PreferenceEdits, PreferenceStore, PreferenceValue,
};
