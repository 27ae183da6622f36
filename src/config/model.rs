// src/config/model.rs

use serde::Deserialize;

/// Optional configuration file contents.
///
/// ```toml
/// [tools]
/// git = "git"
/// npm = "npm"
/// node = "node"
/// webview = "wv_linewise"
/// ```
///
/// Every section and key is optional. Pinned revisions and URLs are not
/// configurable; only the names of the external programs are.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RawConfigFile {
    #[serde(default)]
    pub tools: Tools,
}

/// Validated configuration. Construct through `TryFrom<RawConfigFile>`.
#[derive(Debug, Clone, Default)]
pub struct ConfigFile {
    pub tools: Tools,
}

impl ConfigFile {
    pub(crate) fn new_unchecked(tools: Tools) -> Self {
        Self { tools }
    }
}

/// `[tools]` section: program names (or paths) of the external tools.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Tools {
    #[serde(default = "default_git")]
    pub git: String,

    #[serde(default = "default_npm")]
    pub npm: String,

    #[serde(default = "default_node")]
    pub node: String,

    /// Host for the front-end HTML.
    #[serde(default = "default_webview")]
    pub webview: String,
}

fn default_git() -> String {
    "git".to_string()
}

fn default_npm() -> String {
    "npm".to_string()
}

fn default_node() -> String {
    "node".to_string()
}

fn default_webview() -> String {
    "wv_linewise".to_string()
}

impl Default for Tools {
    fn default() -> Self {
        Self {
            git: default_git(),
            npm: default_npm(),
            node: default_node(),
            webview: default_webview(),
        }
    }
}
