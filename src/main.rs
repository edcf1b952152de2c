// SPDX-License-Identifier: MIT OR Apache-2.0

//! ember-search - Find Ember addons from your terminal
//!
//! Searches Ember Observer by addon name or by code snippet, pages the
//! results, and can fall back to an npm search with an install prompt.

mod cli;
mod logging;

use std::io;
use std::process::ExitCode;

use anyhow::Result;
use clap::{CommandFactory, Parser};
use colored::Colorize;
use ember_search::config::{CliOverrides, Config};
use ember_search::engine::AddonSearch;
use ember_search::errors::SearchError;
use ember_search::fetch::HttpFetcher;
use ember_search::npm::{EmberCliInstaller, NpmSearch};
use ember_search::registry::RegistryClient;
use ember_search::render::Renderer;
use ember_search::request::{addon_fragment, normalize};
use ember_search::ui::ConsoleUi;

use cli::{Cli, Commands};

/// Exit status for usage errors, matching clap's own
const USAGE_EXIT: u8 = 2;

fn main() -> ExitCode {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => match err.downcast_ref::<SearchError>() {
            Some(search_err) if search_err.is_usage() => {
                eprintln!("{}", search_err.to_string().yellow());
                ExitCode::from(USAGE_EXIT)
            }
            _ => {
                eprintln!("{} {:#}", "Error:".red(), err);
                ExitCode::FAILURE
            }
        },
    }
}

fn run(cli: Cli) -> Result<()> {
    let config = Config::load();
    let mut overrides = CliOverrides {
        registry_url: cli.registry_url,
        timeout_secs: cli.timeout,
        no_color: cli.no_color,
        ..CliOverrides::default()
    };
    let use_color = config.use_color(&overrides);
    colored::control::set_override(use_color);

    match cli.command {
        Commands::Search {
            keywords,
            addon,
            code,
            page_size,
            format,
        } => {
            overrides.page_size = page_size;
            overrides.format = format.map(Into::into);
            let options = config.search_options(&overrides)?;
            let addon = addon_fragment(addon.as_deref(), &keywords);
            let request = normalize(addon.as_deref(), code.as_deref())?;

            let fetcher = HttpFetcher::new(config.timeout(&overrides))?;
            let registry_url = config.registry_url(&overrides);
            let client = RegistryClient::new(&registry_url, &fetcher)?;
            let mut ui = ConsoleUi::new();
            let mut search = AddonSearch::new(&client, &mut ui, Renderer::new(use_color), options);
            search.run(&request)?;
        }
        Commands::Npm { query } => {
            let fetcher = HttpFetcher::new(config.timeout(&overrides))?;
            let installer = EmberCliInstaller;
            let npm_url = config.npm_registry_url();
            let search = NpmSearch::new(&npm_url, &fetcher, &installer, use_color);
            let mut ui = ConsoleUi::new();
            search.run(&query.join(" "), &mut ui)?;
        }
        Commands::Completions { shell } => {
            clap_complete::generate(shell, &mut Cli::command(), "ember-search", &mut io::stdout());
        }
    }

    Ok(())
}
