// SPDX-License-Identifier: MIT OR Apache-2.0

//! JSON fetching over HTTP
//!
//! One GET per call, no retries. Callers decide what to do with failures.

use std::time::Duration;

use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::debug;

use crate::errors::{Result, SearchError};

const USER_AGENT: &str = concat!("ember-search/", env!("CARGO_PKG_VERSION"));

/// Something that can turn a URL into a parsed JSON document.
pub trait JsonFetcher {
    fn fetch_json(&self, url: &str) -> Result<Value>;
}

/// Fetch `url` and deserialize it into `T`, mapping shape mismatches to
/// [`SearchError::Decode`].
pub fn fetch_as<T: DeserializeOwned>(fetcher: &dyn JsonFetcher, url: &str) -> Result<T> {
    let value = fetcher.fetch_json(url)?;
    serde_json::from_value(value).map_err(|source| SearchError::Decode {
        url: url.to_string(),
        source,
    })
}

/// Blocking reqwest-backed fetcher
pub struct HttpFetcher {
    client: reqwest::blocking::Client,
}

impl HttpFetcher {
    /// Build a fetcher. `timeout` of `None` waits indefinitely.
    pub fn new(timeout: Option<Duration>) -> Result<Self> {
        // The blocking client defaults to a 30s timeout, so `None` must be set explicitly.
        let client = reqwest::blocking::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(timeout)
            .build()
            .map_err(SearchError::HttpClient)?;

        Ok(Self { client })
    }
}

impl JsonFetcher for HttpFetcher {
    fn fetch_json(&self, url: &str) -> Result<Value> {
        debug!(url, "fetching");
        let response = self
            .client
            .get(url)
            .header("Accept", "application/json")
            .send()
            .map_err(|source| SearchError::Transport {
                url: url.to_string(),
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(SearchError::HttpStatus {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        let body = response.text().map_err(|source| SearchError::Transport {
            url: url.to_string(),
            source,
        })?;
        debug!(url, bytes = body.len(), "fetched");

        serde_json::from_str(&body).map_err(|source| SearchError::Decode {
            url: url.to_string(),
            source,
        })
    }
}
