use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{AppError, AppResult};

const APP_DIR: &str = "spoofdev";

#[derive(Debug, Clone)]
pub struct AppPaths {
    config_dir: PathBuf,
    data_dir: PathBuf,
}

impl AppPaths {
    pub fn discover() -> AppResult<Self> {
        let config_root = dirs::config_dir()
            .ok_or_else(|| AppError::Config("unable to resolve config directory".to_string()))?;
        let data_root = dirs::data_dir()
            .ok_or_else(|| AppError::Config("unable to resolve data directory".to_string()))?;

        let paths = Self::with_roots(config_root.join(APP_DIR), data_root.join(APP_DIR));
        fs::create_dir_all(&paths.config_dir)?;
        fs::create_dir_all(&paths.data_dir)?;
        Ok(paths)
    }

    pub fn with_roots(config_dir: impl Into<PathBuf>, data_dir: impl Into<PathBuf>) -> Self {
        Self {
            config_dir: config_dir.into(),
            data_dir: data_dir.into(),
        }
    }

    pub fn settings_file(&self) -> PathBuf {
        self.config_dir.join("settings.json")
    }

    pub fn preferences_file(&self) -> PathBuf {
        self.data_dir.join("preferences.json")
    }

    /// Where user supplied `device-*.properties` files are picked up. Not
    /// created on discovery; a missing directory just means no overrides.
    pub fn overrides_dir(&self) -> PathBuf {
        self.data_dir.join("devices")
    }

    pub fn package_file(&self) -> PathBuf {
        self.data_dir.join("package.zip")
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }
}
