use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use esqlate_startup::errors::StartupError;
use esqlate_startup::fetch::{FetchFuture, Fetcher};

/// A fetcher that serves canned bodies and records every URL requested.
#[derive(Debug, Clone, Default)]
pub struct FakeFetcher {
    bodies: Arc<Mutex<HashMap<String, Vec<u8>>>>,
    requested: Arc<Mutex<Vec<String>>>,
}

impl FakeFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn serve(self, url: &str, body: impl Into<Vec<u8>>) -> Self {
        self.bodies
            .lock()
            .unwrap()
            .insert(url.to_string(), body.into());
        self
    }

    pub fn requested(&self) -> Vec<String> {
        self.requested.lock().unwrap().clone()
    }
}

impl Fetcher for FakeFetcher {
    fn fetch<'a>(&'a self, url: &'a str) -> FetchFuture<'a> {
        Box::pin(async move {
            self.requested.lock().unwrap().push(url.to_string());
            let body = self.bodies.lock().unwrap().get(url).cloned();
            body.ok_or_else(|| StartupError::Other(anyhow::anyhow!("404 for {url}")))
        })
    }
}
