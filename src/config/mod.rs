// src/config/mod.rs

//! Optional TOML configuration (`esqlate-startup.toml`).

pub mod loader;
pub mod model;
pub mod validate;

pub use loader::{load_and_validate, resolve};
pub use model::{ConfigFile, RawConfigFile, Tools};
