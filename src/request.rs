// SPDX-License-Identifier: MIT OR Apache-2.0

//! Turning raw command input into a search request

use crate::errors::{Result, SearchError};

/// What the user asked for. Exactly one mode per invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchRequest {
    /// Addons whose name or description matches a pattern
    NameSearch { name_pattern: String },
    /// Line-level matches of a snippet inside one exact addon
    ScopedCodeSearch { addon_name: String, code_snippet: String },
    /// Per-addon occurrence counts of a snippet across all addons
    GlobalCodeSearch { code_snippet: String },
}

/// Build a request from the addon fragment and code snippet.
///
/// Both inputs are trimmed; blank counts as absent.
pub fn normalize(addon: Option<&str>, code: Option<&str>) -> Result<SearchRequest> {
    let addon = present(addon);
    let code = present(code);

    match (addon, code) {
        (Some(addon_name), Some(code_snippet)) => Ok(SearchRequest::ScopedCodeSearch {
            addon_name,
            code_snippet,
        }),
        (None, Some(code_snippet)) => Ok(SearchRequest::GlobalCodeSearch { code_snippet }),
        (Some(name_pattern), None) => Ok(SearchRequest::NameSearch { name_pattern }),
        (None, None) => Err(SearchError::InvalidRequest),
    }
}

/// Resolve the addon fragment from `--addon`, falling back to positional keywords.
pub fn addon_fragment(addon: Option<&str>, keywords: &[String]) -> Option<String> {
    match present(addon) {
        Some(addon) => Some(addon),
        None if keywords.is_empty() => None,
        None => present(Some(keywords.join(" ").as_str())),
    }
}

fn present(raw: Option<&str>) -> Option<String> {
    raw.map(str::trim)
        .filter(|value| !value.is_empty())
        .map(str::to_string)
}

impl SearchRequest {
    /// Spinner label while the request is in flight
    pub fn loading_label(&self) -> String {
        match self {
            Self::NameSearch { name_pattern } => {
                format!("searching addons that contain: '{}'", name_pattern)
            }
            Self::GlobalCodeSearch { code_snippet } => {
                format!("searching all addons that contain the code: '{}'", code_snippet)
            }
            Self::ScopedCodeSearch {
                addon_name,
                code_snippet,
            } => format!("searching '{}' for the code: '{}'", addon_name, code_snippet),
        }
    }
}
