// src/pipeline/pins.rs

//! Pinned sources and fixed workspace layout. Changing a pin means a new
//! build of this tool.

use crate::steps::Repository;

pub const SERVER_REPO: Repository = Repository {
    url: "https://github.com/forbesmyester/esqlate-server.git",
    dir: "dep-esqlate-server",
    revision: Some("v1.2.0"),
};

pub const FRONT_REPO: Repository = Repository {
    url: "https://github.com/forbesmyester/esqlate-front.git",
    dir: "dep-esqlate-front",
    revision: Some("v1.1.2"),
};

pub const FRONT_ASSET_URL: &str =
    "https://github.com/forbesmyester/esqlate-front/releases/download/v1.1.2/index.html";

/// Where the front-end HTML lives, whether downloaded or built.
pub const FRONT_ASSET: &str = "dep-esqlate-front.html";

/// Inside the server checkout.
pub const EXAMPLE_DEFINITIONS: &str = "dep-esqlate-server/example_definition";
pub const DEFINITION_DIR: &str = "definition";

/// Compiled server entry point, relative to the server checkout.
pub const SERVER_MARKER: &str = "dist/cmd.js";

/// Built front-end HTML, relative to the front checkout.
pub const FRONT_MARKER: &str = "dist/index.html";

/// The server runs inside its checkout, so the definitions are one level up.
pub const DEFINITION_ENV: (&str, &str) = ("DEFINITION_DIRECTORY", "../definition");

pub const WEBVIEW_TITLE: &str = "eSQLate";
pub const WEBVIEW_STREAMS: &str = "IN=-";
