// SPDX-License-Identifier: MIT OR Apache-2.0

//! Addon search engine
//!
//! Dispatches a [`SearchRequest`] to the matching registry endpoint, narrows
//! and orders the results, and drives paging and rendering.

use serde::Serialize;
use tracing::{debug, info};

use crate::code_search::{search_code, CodeSearchResult};
use crate::errors::{suggestions, Result, SearchError};
use crate::paginate::{paginate, PageOutcome, PageStatus, PageView};
use crate::ranking;
use crate::registry::{AddonSummary, CodeMatchDetail, RegistryClient};
use crate::render::Renderer;
use crate::request::SearchRequest;
use crate::ui::{with_progress, Terminal};

/// How results are written
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// Colored, paged text
    #[default]
    Text,
    /// Every result as one JSON document, no prompts
    Json,
}

#[derive(Debug, Clone)]
pub struct SearchOptions {
    pub addon_page_size: usize,
    pub code_page_size: usize,
    pub format: OutputFormat,
}

impl Default for SearchOptions {
    fn default() -> Self {
        Self {
            addon_page_size: 10,
            code_page_size: 5,
            format: OutputFormat::Text,
        }
    }
}

pub struct AddonSearch<'a> {
    client: &'a RegistryClient<'a>,
    ui: &'a mut dyn Terminal,
    renderer: Renderer,
    options: SearchOptions,
}

impl<'a> AddonSearch<'a> {
    pub fn new(
        client: &'a RegistryClient<'a>,
        ui: &'a mut dyn Terminal,
        renderer: Renderer,
        options: SearchOptions,
    ) -> Self {
        Self {
            client,
            ui,
            renderer,
            options,
        }
    }

    /// Run one search to completion.
    pub fn run(&mut self, request: &SearchRequest) -> Result<PageOutcome> {
        info!(?request, "search started");
        let label = request.loading_label();
        let client = self.client;

        match request {
            SearchRequest::NameSearch { name_pattern } => {
                let addons = with_progress(&mut *self.ui, &label, || client.addons())?;
                let ranked = ranking::filter(name_pattern, addons);
                debug!(matches = ranked.len(), "addons ranked");
                self.show_addons(&ranked)
            }
            SearchRequest::GlobalCodeSearch { code_snippet } => {
                let result = with_progress(&mut *self.ui, &label, || search_code(client, code_snippet, None))?;
                self.show_code_results(&result, code_snippet)
            }
            SearchRequest::ScopedCodeSearch {
                addon_name,
                code_snippet,
            } => {
                let result = with_progress(&mut *self.ui, &label, || {
                    search_code(client, code_snippet, Some(addon_name.as_str()))
                })?;
                self.show_code_results(&result, code_snippet)
            }
        }
    }

    fn show_addons(&mut self, addons: &[AddonSummary]) -> Result<PageOutcome> {
        if self.options.format == OutputFormat::Json {
            return self.print_json(addons, addons.len());
        }
        let mut view = AddonPages {
            ui: &mut *self.ui,
            renderer: &self.renderer,
        };
        paginate(addons, self.options.addon_page_size, &mut view)
    }

    fn show_code_results(&mut self, result: &CodeSearchResult, code: &str) -> Result<PageOutcome> {
        if self.options.format == OutputFormat::Json {
            return self.print_json(result, result.len());
        }
        match result {
            CodeSearchResult::Unscoped { results: occurrences } => {
                self.ui.write_line("");
                if occurrences.is_empty() {
                    self.ui.write_line(&format!("No addons contained '{}'.", code));
                    self.ui.write_line("Please try a different code snippet.");
                    return Ok(PageOutcome::Empty);
                }
                for occurrence in occurrences {
                    self.ui.write_line(&self.renderer.occurrence(occurrence));
                }
                self.ui.write_line("");
                self.ui.write_line(&format!(
                    "For more information run: {}",
                    suggestions::scoped_code_search_hint(code)
                ));
                Ok(PageOutcome::Exhausted { pages: 1 })
            }
            CodeSearchResult::Scoped {
                addon_name,
                results: matches,
            } => {
                let mut view = CodeMatchPages {
                    ui: &mut *self.ui,
                    renderer: &self.renderer,
                    addon_name,
                    code,
                };
                paginate(matches, self.options.code_page_size, &mut view)
            }
        }
    }

    fn print_json<T: Serialize + ?Sized>(&mut self, value: &T, len: usize) -> Result<PageOutcome> {
        let json = serde_json::to_string_pretty(value).map_err(SearchError::Output)?;
        self.ui.write_line(&json);
        Ok(if len == 0 {
            PageOutcome::Empty
        } else {
            PageOutcome::Exhausted { pages: 1 }
        })
    }
}

struct AddonPages<'u, 'r> {
    ui: &'u mut dyn Terminal,
    renderer: &'r Renderer,
}

impl PageView<AddonSummary> for AddonPages<'_, '_> {
    fn render(&mut self, addon: &AddonSummary) -> Result<()> {
        self.ui.write_line("");
        self.ui.write_line(&self.renderer.addon_header(addon));
        self.ui.write_line(&self.renderer.addon_description(addon));
        Ok(())
    }

    fn no_results(&mut self) -> Result<()> {
        self.ui.write_line("");
        self.ui.write_line("No results matched your search.");
        Ok(())
    }

    fn confirm_next(&mut self, status: &PageStatus) -> Result<bool> {
        self.ui.confirm(&format!(
            "Showing page {} of {}. View next page?",
            status.page, status.total_pages
        ))
    }
}

struct CodeMatchPages<'u, 'r> {
    ui: &'u mut dyn Terminal,
    renderer: &'r Renderer,
    addon_name: &'r str,
    code: &'r str,
}

impl PageView<CodeMatchDetail> for CodeMatchPages<'_, '_> {
    fn render(&mut self, detail: &CodeMatchDetail) -> Result<()> {
        self.ui.write_line("");
        self.ui
            .write_line(&self.renderer.code_match_header(self.addon_name, detail));
        for line in self.renderer.code_context(detail) {
            self.ui.write_line(&line);
        }
        Ok(())
    }

    fn no_results(&mut self) -> Result<()> {
        self.ui.write_line("");
        self.ui.write_line(&format!(
            "No occurrences of '{}' found for {}.",
            self.code, self.addon_name
        ));
        self.ui.write_line(&format!(
            "Please make sure that {} is spelt correctly.",
            self.addon_name
        ));
        Ok(())
    }

    fn confirm_next(&mut self, status: &PageStatus) -> Result<bool> {
        self.ui.confirm(&format!(
            "Viewing {} of {} occurrences. View the next page?",
            status.shown, status.total_items
        ))
    }
}
