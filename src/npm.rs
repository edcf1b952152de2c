// SPDX-License-Identifier: MIT OR Apache-2.0

//! npm registry search with an install prompt
//!
//! Queries npms.io for packages tagged `ember-addon`, lists the first page,
//! and offers to install one of them through `ember install`.

use std::process::Command;

use chrono::{DateTime, Utc};
use colored::Colorize;
use serde::Deserialize;
use tracing::{debug, info};

use crate::errors::{Result, SearchError};
use crate::fetch::{fetch_as, JsonFetcher};
use crate::registry::parse_base_url;
use crate::render::distance_in_words;
use crate::ui::{with_progress, Terminal};

pub const DEFAULT_NPM_REGISTRY_URL: &str = "https://api.npms.io";

/// Choice that ends the command without installing anything
pub const DECLINE_CHOICE: &str = "Nope";

const RESULT_SIZE: &str = "10";

#[derive(Debug, Deserialize)]
struct SearchResponse {
    total: u64,
    #[serde(default)]
    results: Vec<SearchHit>,
}

#[derive(Debug, Deserialize)]
struct SearchHit {
    package: NpmPackage,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct NpmPackage {
    pub name: String,
    pub version: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "crate::registry::lenient_date")]
    pub date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub links: PackageLinks,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct PackageLinks {
    #[serde(default)]
    pub repository: Option<String>,
}

/// Installs an addon into the current project.
pub trait AddonInstaller {
    fn install(&self, package: &str) -> Result<()>;
}

/// Shells out to `ember install <package>`.
#[derive(Debug, Default)]
pub struct EmberCliInstaller;

impl AddonInstaller for EmberCliInstaller {
    fn install(&self, package: &str) -> Result<()> {
        info!(package, "running ember install");
        let status = Command::new("ember")
            .args(["install", package])
            .status()
            .map_err(|e| SearchError::Install(format!("could not run `ember install`: {}", e)))?;
        if status.success() {
            Ok(())
        } else {
            Err(SearchError::Install(format!(
                "`ember install {}` exited with {}",
                package, status
            )))
        }
    }
}

/// What happened at the end of an npm search
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NpmOutcome {
    NoResults,
    Declined,
    Installed(String),
}

pub struct NpmSearch<'a> {
    base_url: String,
    fetcher: &'a dyn JsonFetcher,
    installer: &'a dyn AddonInstaller,
    use_color: bool,
    now: DateTime<Utc>,
}

impl<'a> NpmSearch<'a> {
    pub fn new(
        base_url: &str,
        fetcher: &'a dyn JsonFetcher,
        installer: &'a dyn AddonInstaller,
        use_color: bool,
    ) -> Self {
        Self {
            base_url: base_url.to_string(),
            fetcher,
            installer,
            use_color,
            now: Utc::now(),
        }
    }

    #[cfg(test)]
    fn at(mut self, now: DateTime<Utc>) -> Self {
        self.now = now;
        self
    }

    fn search_url(&self, query: &str) -> Result<String> {
        let mut url = parse_base_url(&self.base_url)?
            .join("v2/search")
            .map_err(|e| SearchError::InvalidConfig(format!("bad npm search url: {}", e)))?;
        url.query_pairs_mut()
            .append_pair("from", "0")
            .append_pair("size", RESULT_SIZE)
            .append_pair("q", &format!("keywords:ember-addon {}", query));
        Ok(url.to_string())
    }

    /// Search, list the hits, and offer to install one.
    pub fn run(&self, query: &str, ui: &mut dyn Terminal) -> Result<NpmOutcome> {
        let url = self.search_url(query)?;
        let label = format!("searching npm for ember addons matching: '{}'", query);
        let response: SearchResponse =
            with_progress(&mut *ui, &label, || fetch_as(self.fetcher, &url))?;
        debug!(total = response.total, shown = response.results.len(), "npm search finished");

        ui.write_line("");
        let packages: Vec<NpmPackage> = response.results.into_iter().map(|hit| hit.package).collect();
        for package in &packages {
            for line in self.package_lines(package) {
                ui.write_line(&line);
            }
        }

        if response.total == 0 || packages.is_empty() {
            ui.write_line("No addons matched your search.");
            return Ok(NpmOutcome::NoResults);
        }

        let mut choices = vec![DECLINE_CHOICE.to_string()];
        choices.extend(packages.iter().map(|p| p.name.clone()));
        let picked = ui.choose("Would you like to install an addon?", &choices)?;

        match choices.get(picked) {
            Some(name) if picked > 0 => {
                self.installer.install(name)?;
                Ok(NpmOutcome::Installed(name.clone()))
            }
            _ => Ok(NpmOutcome::Declined),
        }
    }

    fn package_lines(&self, package: &NpmPackage) -> Vec<String> {
        let updated = match package.date {
            Some(date) => format!("v{} updated {}", package.version, distance_in_words(date, self.now)),
            None => format!("v{}", package.version),
        };
        let title = if self.use_color {
            format!("{} ({})", package.name.underline(), updated.dimmed())
        } else {
            format!("{} ({})", package.name, updated)
        };

        let mut lines = vec![title, package.description.clone().unwrap_or_default()];
        if let Some(repository) = &package.links.repository {
            lines.push(repository.clone());
        }
        lines.push(String::new());
        lines
    }
}
