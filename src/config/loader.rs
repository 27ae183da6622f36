// src/config/loader.rs

use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::config::model::{ConfigFile, RawConfigFile};
use crate::errors::{Result, StartupError};

/// File name looked up in the workspace root when `--config` is not given.
pub const DEFAULT_CONFIG_FILE: &str = "esqlate-startup.toml";

/// Load a configuration file from a given path and return the raw
/// `RawConfigFile`, without validation.
pub fn load_from_path(path: impl AsRef<Path>) -> Result<RawConfigFile> {
    let path = path.as_ref();
    let contents = fs::read_to_string(path)?;

    let config: RawConfigFile = toml::from_str(&contents)?;

    Ok(config)
}

/// Load a configuration file from path and validate it.
pub fn load_and_validate(path: impl AsRef<Path>) -> Result<ConfigFile> {
    let raw_config = load_from_path(&path)?;
    let config = ConfigFile::try_from(raw_config)?;
    Ok(config)
}

pub fn default_config_path(root: &Path) -> PathBuf {
    root.join(DEFAULT_CONFIG_FILE)
}

/// Resolve the configuration to use.
///
/// - An explicit path must exist.
/// - Without one, `<root>/esqlate-startup.toml` is used if present, and the
///   built-in defaults otherwise.
pub fn resolve(explicit: Option<&Path>, root: &Path) -> Result<ConfigFile> {
    if let Some(path) = explicit {
        if !path.is_file() {
            return Err(StartupError::Config(format!(
                "config file {} does not exist",
                path.display()
            )));
        }
        return load_and_validate(path);
    }

    let path = default_config_path(root);
    if path.is_file() {
        debug!(path = ?path, "loading default config file");
        load_and_validate(&path)
    } else {
        debug!(path = ?path, "no config file; using defaults");
        Ok(ConfigFile::default())
    }
}
