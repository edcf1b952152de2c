// SPDX-License-Identifier: MIT OR Apache-2.0

//! CLI argument parsing using clap

use clap::{Parser, Subcommand};
use clap_complete::Shell;

/// ember-search - Find Ember addons from your terminal
///
/// Search Ember Observer by addon name, or search the source code of every
/// indexed addon for a snippet.
#[derive(Parser, Debug)]
#[command(name = "ember-search")]
#[command(
    author,
    version,
    about,
    long_about = None,
    after_help = "Search quickstart:\n  ember-search search websocket\n  ember-search search --code socketFor\n  ember-search search --addon ember-websockets --code socketFor"
)]
pub struct Cli {
    /// Base URL of the addon registry (defaults to https://emberobserver.com)
    #[arg(long, global = true, value_name = "URL")]
    pub registry_url: Option<String>,

    /// Give up on a request after this many seconds
    #[arg(long, global = true, value_name = "SECS")]
    pub timeout: Option<u64>,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Log debug details to stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Output format for results
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

impl From<OutputFormat> for ember_search::engine::OutputFormat {
    fn from(format: OutputFormat) -> Self {
        match format {
            OutputFormat::Text => Self::Text,
            OutputFormat::Json => Self::Json,
        }
    }
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Search addons by name, or addon source code by snippet
    #[command(
        visible_aliases = ["s"],
        after_help = "Examples:\n  ember-search search socket\n  ember-search s -a websocket\n  ember-search search -c socketFor\n  ember-search search -a ember-websockets -c socketFor"
    )]
    Search {
        /// Keywords to search addon names and descriptions for (used when --addon is absent)
        #[arg(value_name = "KEYWORDS")]
        keywords: Vec<String>,

        /// A partial name of an addon to search for. If combined with --code then this must be an exact addon name match
        #[arg(short, long)]
        addon: Option<String>,

        /// A code snippet to search addons for
        #[arg(short, long)]
        code: Option<String>,

        /// Results shown per page
        #[arg(short = 'n', long)]
        page_size: Option<usize>,

        /// Output format (text or json)
        #[arg(long, value_enum)]
        format: Option<OutputFormat>,
    },

    /// Search npm for packages tagged ember-addon and offer to install one
    Npm {
        /// Search query
        #[arg(required = true, value_name = "QUERY")]
        query: Vec<String>,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}
