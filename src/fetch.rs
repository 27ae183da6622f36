// src/fetch.rs

//! Fetching remote bytes by URL.
//!
//! Wraps [`reqwest`] behind a small trait so the download step can be tested
//! without a network.

use std::future::Future;
use std::pin::Pin;

use tracing::{debug, info};

use crate::errors::{Result, StartupError};

pub type FetchFuture<'a> = Pin<Box<dyn Future<Output = Result<Vec<u8>>> + Send + 'a>>;

/// Fetches the body of a resource.
pub trait Fetcher: Send + Sync {
    fn fetch<'a>(&'a self, url: &'a str) -> FetchFuture<'a>;
}

/// HTTP(S) fetcher. Follows redirects (release assets are served through one)
/// and treats any non-2xx final status as an error.
#[derive(Debug, Clone, Default)]
pub struct HttpFetcher {
    client: reqwest::Client,
}

impl HttpFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    async fn get(&self, url: &str) -> std::result::Result<Vec<u8>, reqwest::Error> {
        let response = self.client.get(url).send().await?.error_for_status()?;
        debug!(url, status = %response.status(), "download response received");
        let body = response.bytes().await?;
        Ok(body.to_vec())
    }
}

impl Fetcher for HttpFetcher {
    fn fetch<'a>(&'a self, url: &'a str) -> FetchFuture<'a> {
        Box::pin(async move {
            info!(url, "downloading");
            self.get(url).await.map_err(|source| StartupError::Download {
                url: url.to_string(),
                source,
            })
        })
    }
}
