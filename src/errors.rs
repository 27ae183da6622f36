// src/errors.rs

//! Crate-wide error type and result alias.

use thiserror::Error;

use crate::exec::SetupFailure;

#[derive(Error, Debug)]
pub enum StartupError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parsing error: {0}")]
    Toml(#[from] toml::de::Error),

    /// A setup command (clone, checkout, install, build) failed.
    ///
    /// Boxed because the captured output makes it much larger than the other
    /// variants.
    #[error("{0}")]
    Setup(Box<SetupFailure>),

    #[error("failed to start '{program}': {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to download {url}: {source}")]
    Download {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl StartupError {
    /// The process exit code this error should terminate with.
    ///
    /// Setup failures carry the failing child's own code; everything else
    /// maps to `1`.
    pub fn exit_code(&self) -> i32 {
        match self {
            StartupError::Setup(failure) => failure.exit_code(),
            _ => 1,
        }
    }
}

impl From<SetupFailure> for StartupError {
    fn from(failure: SetupFailure) -> Self {
        StartupError::Setup(Box::new(failure))
    }
}

pub type Result<T> = std::result::Result<T, StartupError>;
