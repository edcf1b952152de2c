// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error types with helpful suggestions
//!
//! Every failure a search can hit is one variant of [`SearchError`]. Display
//! strings are written for the terminal, not for logs.

use thiserror::Error;

/// Result alias used throughout the library
pub type Result<T> = std::result::Result<T, SearchError>;

#[derive(Debug, Error)]
pub enum SearchError {
    /// Neither an addon fragment nor a code snippet was given
    #[error("{}", suggestions::missing_query_message())]
    InvalidRequest,

    /// The remote endpoint could not be reached at all
    #[error("Search failed: could not reach {url}\n\nSuggestion: check your network connection and try again.")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// The HTTP client could not be built with the requested settings
    #[error("Could not set up the HTTP client: {0}")]
    HttpClient(#[source] reqwest::Error),

    /// The remote endpoint answered with a non-2xx status
    #[error("Search failed: received [{status}] status from {url}")]
    HttpStatus { status: u16, url: String },

    /// The body was not JSON, or not the JSON shape we expected
    #[error("Search failed: unexpected response from {url}: {source}")]
    Decode {
        url: String,
        #[source]
        source: serde_json::Error,
    },

    /// Our own results could not be serialized for output
    #[error("Failed to write results as JSON: {0}")]
    Output(#[source] serde_json::Error),

    /// The interactive prompt itself failed
    #[error("Prompt failed: {0}")]
    Prompt(String),

    /// The addon install collaborator failed
    #[error("Install failed: {0}")]
    Install(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

impl SearchError {
    /// Whether this error is a usage problem rather than a runtime failure
    pub fn is_usage(&self) -> bool {
        matches!(self, Self::InvalidRequest | Self::InvalidConfig(_))
    }
}

/// Helper functions for creating helpful error messages
pub mod suggestions {
    /// Message shown when the search command gets nothing to search for
    pub fn missing_query_message() -> String {
        "The `ember-search search` command requires --addon or --code to be specified.\n\n\
         Examples:\n\
         $ ember-search search --addon websocket\n\
         $ ember-search search --code socketFor\n\n\
         For more details, use `ember-search search --help`."
            .to_string()
    }

    /// Hint printed after a global code search
    pub fn scoped_code_search_hint(code: &str) -> String {
        format!("ember search --addon addon-name --code {}", code)
    }
}
