// src/config/validate.rs

use crate::config::model::{ConfigFile, RawConfigFile};
use crate::errors::{Result, StartupError};

impl TryFrom<RawConfigFile> for ConfigFile {
    type Error = StartupError;

    fn try_from(raw: RawConfigFile) -> std::result::Result<Self, Self::Error> {
        validate_tools(&raw)?;
        Ok(ConfigFile::new_unchecked(raw.tools))
    }
}

fn validate_tools(cfg: &RawConfigFile) -> Result<()> {
    let tools = [
        ("git", &cfg.tools.git),
        ("npm", &cfg.tools.npm),
        ("node", &cfg.tools.node),
        ("webview", &cfg.tools.webview),
    ];

    for (key, value) in tools {
        if value.trim().is_empty() {
            return Err(StartupError::Config(format!(
                "[tools].{key} must not be empty"
            )));
        }
    }

    Ok(())
}
