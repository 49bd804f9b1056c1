use std::fs;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};

use super::AppPaths;

const DEFAULT_APP_VERSION: &str = env!("CARGO_PKG_VERSION");

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub package_path: Option<PathBuf>,
    #[serde(default)]
    pub overrides_dir: Option<PathBuf>,
    #[serde(default)]
    pub app_version: Option<String>,
}

impl Settings {
    /// Version qualifying the device cache key.
    pub fn app_version(&self) -> AppResult<String> {
        match self.app_version.as_deref().map(str::trim) {
            None => Ok(DEFAULT_APP_VERSION.to_string()),
            Some("") => Err(AppError::Config(
                "app_version must not be empty".to_string(),
            )),
            Some(version) => Ok(version.to_string()),
        }
    }

    /// The application package to read bundled profiles from. `None` when no
    /// package is configured and none is installed at the default location.
    pub fn package_path(&self, paths: &AppPaths) -> Option<PathBuf> {
        if let Some(path) = &self.package_path {
            return Some(path.clone());
        }

        let installed = paths.package_file();
        installed.is_file().then_some(installed)
    }

    pub fn overrides_dir(&self, paths: &AppPaths) -> PathBuf {
        self.overrides_dir
            .clone()
            .unwrap_or_else(|| paths.overrides_dir())
    }
}

pub fn load(path: PathBuf) -> AppResult<Settings> {
    if !path.exists() {
        return Ok(Settings::default());
    }

    let raw = fs::read_to_string(path)?;
    let settings = serde_json::from_str(&raw)?;
    Ok(settings)
}
