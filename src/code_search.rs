// SPDX-License-Identifier: MIT OR Apache-2.0

//! Code search across addons, or inside one addon

use serde::Serialize;
use tracing::debug;

use crate::errors::Result;
use crate::registry::{CodeMatchDetail, CodeOccurrence, RegistryClient};

/// The two shapes a code search can come back in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum CodeSearchResult {
    /// How often the snippet occurs in each addon
    Unscoped { results: Vec<CodeOccurrence> },
    /// Where exactly the snippet occurs in the requested addon
    Scoped {
        addon_name: String,
        results: Vec<CodeMatchDetail>,
    },
}

impl CodeSearchResult {
    pub fn len(&self) -> usize {
        match self {
            Self::Unscoped { results } => results.len(),
            Self::Scoped { results, .. } => results.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Search for `snippet`, scoped to `addon_name` when given.
///
/// Fetch failures propagate untouched.
pub fn search_code(
    client: &RegistryClient<'_>,
    snippet: &str,
    addon_name: Option<&str>,
) -> Result<CodeSearchResult> {
    let result = match addon_name {
        None => CodeSearchResult::Unscoped {
            results: client.addon_occurrences(snippet)?,
        },
        Some(addon) => CodeSearchResult::Scoped {
            addon_name: addon.to_string(),
            results: client.source_matches(addon, snippet)?,
        },
    };
    debug!(snippet, addon = addon_name, results = result.len(), "code search finished");
    Ok(result)
}
