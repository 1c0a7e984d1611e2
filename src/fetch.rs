// File: fetch.rs
// SPDX-License-Identifier: MIT OR Apache-2.0
//
// Copyright (c) 2023-2025
// - Volker Schwaberow <volker@schwaberow.de>

use futures::future::BoxFuture;
use log::{debug, warn};
use std::time::Duration;

use crate::error::FetchError;

/// Retrieves the body of a web page.
pub trait PageFetcher: Send + Sync {
    fn fetch<'a>(&'a self, url: &'a str) -> BoxFuture<'a, Result<String, FetchError>>;
}

#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: reqwest::Client,
    timeout: Duration,
}

impl HttpFetcher {
    pub fn new(timeout_secs: u64) -> Result<Self, FetchError> {
        let client = reqwest::Client::builder()
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self {
            client,
            timeout: Duration::from_secs(timeout_secs),
        })
    }

    async fn get(&self, url: &str) -> Result<String, FetchError> {
        debug!("Fetching {} (timeout {:?})", url, self.timeout);

        // The timeout spans connect, headers and body.
        let response = self.client.get(url).timeout(self.timeout).send().await;

        match response {
            Ok(resp) => {
                let status = resp.status();
                match resp.text().await {
                    Ok(body) => {
                        debug!("Fetched {} bytes from {} ({})", body.len(), url, status);
                        Ok(body)
                    }
                    Err(e) => {
                        warn!("Failed to read body of {}: {}", url, e);
                        Err(e.into())
                    }
                }
            }
            Err(e) => {
                warn!("Failed to fetch {}: {}", url, e);
                Err(e.into())
            }
        }
    }
}

impl PageFetcher for HttpFetcher {
    fn fetch<'a>(&'a self, url: &'a str) -> BoxFuture<'a, Result<String, FetchError>> {
        Box::pin(self.get(url))
    }
}
