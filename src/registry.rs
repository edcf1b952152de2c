// SPDX-License-Identifier: MIT OR Apache-2.0

//! Ember Observer API client
//!
//! Builds endpoint URLs, fetches through a [`JsonFetcher`], and maps the wire
//! shapes onto the value types the rest of the crate works with.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use reqwest::Url;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use tracing::{debug, warn};

use crate::errors::{Result, SearchError};
use crate::fetch::{fetch_as, JsonFetcher};

pub const DEFAULT_REGISTRY_URL: &str = "https://emberobserver.com";

/// One entry of the full addon listing
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AddonSummary {
    pub name: String,
    pub description: String,
    pub score: Option<f64>,
    pub last_updated: Option<DateTime<Utc>>,
}

/// Per-addon occurrence count from a cross-addon code search
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CodeOccurrence {
    #[serde(rename = "addon")]
    pub addon_name: String,
    #[serde(rename = "count")]
    pub occurrence_count: u64,
}

/// A single line of source surrounding a match
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContextLine {
    pub number: u64,
    pub text: String,
}

/// One line-level match inside a specific addon
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CodeMatchDetail {
    pub filename: String,
    #[serde(rename = "line_number")]
    pub matched_line_number: u64,
    #[serde(rename = "lines", default)]
    pub context_lines: Vec<ContextLine>,
}

#[derive(Debug, Deserialize)]
struct AddonListing {
    addons: Vec<WireAddon>,
}

#[derive(Debug, Deserialize)]
struct WireAddon {
    name: String,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    score: Option<f64>,
    #[serde(default, deserialize_with = "lenient_date")]
    latest_version_date: Option<DateTime<Utc>>,
}

/// Accept any date the registry may send; unparseable values become `None`
/// instead of failing the whole listing.
pub(crate) fn lenient_date<'de, D>(deserializer: D) -> std::result::Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<Value>::deserialize(deserializer)?;
    Ok(match raw {
        Some(Value::String(text)) => {
            let parsed = parse_registry_date(&text);
            if parsed.is_none() {
                warn!(date = %text, "ignoring unparseable latest_version_date");
            }
            parsed
        }
        _ => None,
    })
}

fn parse_registry_date(text: &str) -> Option<DateTime<Utc>> {
    let text = text.trim();
    if let Ok(date) = DateTime::parse_from_rfc3339(text) {
        return Some(date.with_timezone(&Utc));
    }
    for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(text, format) {
            return Some(naive.and_utc());
        }
    }
    NaiveDate::parse_from_str(text, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

impl From<WireAddon> for AddonSummary {
    fn from(wire: WireAddon) -> Self {
        Self {
            name: wire.name,
            description: wire.description.unwrap_or_default(),
            score: wire.score,
            last_updated: wire.latest_version_date,
        }
    }
}

#[derive(Debug, Deserialize)]
struct Results<T> {
    results: Vec<T>,
}

/// Client for the registry's JSON endpoints
pub struct RegistryClient<'a> {
    base: Url,
    fetcher: &'a dyn JsonFetcher,
}

impl<'a> RegistryClient<'a> {
    pub fn new(base_url: &str, fetcher: &'a dyn JsonFetcher) -> Result<Self> {
        let base = parse_base_url(base_url)?;
        Ok(Self { base, fetcher })
    }

    /// `GET /api/addons`
    pub fn addons(&self) -> Result<Vec<AddonSummary>> {
        let url = self.endpoint("api/addons", &[])?;
        let listing: AddonListing = fetch_as(self.fetcher, &url)?;
        let total = listing.addons.len();
        let addons: Vec<AddonSummary> = listing
            .addons
            .into_iter()
            .filter(|addon| !addon.name.is_empty())
            .map(AddonSummary::from)
            .collect();
        debug!(total, kept = addons.len(), "addon listing loaded");
        Ok(addons)
    }

    /// `GET /api/search/addons?query=<snippet>&sort=usages`
    pub fn addon_occurrences(&self, snippet: &str) -> Result<Vec<CodeOccurrence>> {
        let url = self.endpoint("api/search/addons", &[("query", snippet), ("sort", "usages")])?;
        let body: Results<CodeOccurrence> = fetch_as(self.fetcher, &url)?;
        Ok(body.results)
    }

    /// `GET /api/search/source?addon=<name>&query=<snippet>`
    pub fn source_matches(&self, addon: &str, snippet: &str) -> Result<Vec<CodeMatchDetail>> {
        let url = self.endpoint("api/search/source", &[("addon", addon), ("query", snippet)])?;
        let body: Results<CodeMatchDetail> = fetch_as(self.fetcher, &url)?;
        Ok(body.results)
    }

    fn endpoint(&self, path: &str, query: &[(&str, &str)]) -> Result<String> {
        let mut url = self
            .base
            .join(path)
            .map_err(|e| SearchError::InvalidConfig(format!("bad endpoint '{}': {}", path, e)))?;
        if !query.is_empty() {
            let encoded: Vec<String> = query
                .iter()
                .map(|(key, value)| format!("{}={}", encode_component(key), encode_component(value)))
                .collect();
            url.set_query(Some(&encoded.join("&")));
        }
        Ok(url.to_string())
    }
}

/// RFC 3986 unreserved characters stay bare; everything else is escaped
const COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~');

/// Percent-encode one query component, spaces as `%20`.
fn encode_component(raw: &str) -> String {
    utf8_percent_encode(raw, COMPONENT).to_string()
}

/// Parse a base URL so that relative joins append to it instead of
/// replacing its last path segment.
pub(crate) fn parse_base_url(base_url: &str) -> Result<Url> {
    let normalized = if base_url.ends_with('/') {
        base_url.to_string()
    } else {
        format!("{}/", base_url)
    };
    Url::parse(&normalized)
        .map_err(|e| SearchError::InvalidConfig(format!("invalid registry url '{}': {}", base_url, e)))
}
