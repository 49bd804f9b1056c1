use tracing::{debug, warn};

use crate::cli::SourceArgs;
use crate::config::{self, AppPaths, Settings};
use crate::error::AppResult;
use crate::output::Output;
use crate::resolver::DeviceResolver;
use crate::source::{BundleSource, DirectorySource};
use crate::store::{CacheStore, FilePreferenceStore, MemoryPreferenceStore, PreferenceStore};

pub type AppResolver = DeviceResolver<Box<dyn PreferenceStore>>;

pub struct AppContext {
    pub resolver: AppResolver,
    pub output: Output,
}

impl AppContext {
    pub fn bootstrap(source: SourceArgs, json: bool) -> AppResult<Self> {
        let paths = AppPaths::discover()?;
        let settings = apply_overrides(config::load_settings(&paths)?, &source);
        let resolver = build_resolver(&paths, &settings, source.no_cache)?;
        let output = Output::new(json);

        Ok(Self { resolver, output })
    }
}

fn apply_overrides(mut settings: Settings, source: &SourceArgs) -> Settings {
    if let Some(package) = &source.package {
        settings.package_path = Some(package.clone());
    }
    if let Some(dir) = &source.overrides {
        settings.overrides_dir = Some(dir.clone());
    }
    if let Some(version) = &source.app_version {
        settings.app_version = Some(version.clone());
    }
    settings
}

pub fn build_resolver(
    paths: &AppPaths,
    settings: &Settings,
    in_memory: bool,
) -> AppResult<AppResolver> {
    let store: Box<dyn PreferenceStore> = if in_memory {
        Box::new(MemoryPreferenceStore::new())
    } else {
        open_preferences(paths)
    };

    let app_version = settings.app_version()?;
    let package = settings.package_path(paths);
    let overrides_dir = settings.overrides_dir(paths);
    debug!(
        app_version = %app_version,
        package = ?package,
        overrides = %overrides_dir.display(),
        "resolver configured"
    );

    Ok(DeviceResolver::new(
        CacheStore::new(store, &app_version),
        BundleSource::new(package),
        DirectorySource::new(overrides_dir),
    ))
}

/// An unreadable preferences file leaves the device cache in memory for this
/// run; the file itself is left untouched.
fn open_preferences(paths: &AppPaths) -> Box<dyn PreferenceStore> {
    let path = paths.preferences_file();
    match FilePreferenceStore::open(&path) {
        Ok(store) => Box::new(store),
        Err(err) => {
            warn!(
                path = %path.display(),
                "could not open preferences, caching in memory: {err}"
            );
            Box::new(MemoryPreferenceStore::new())
        }
    }
}
