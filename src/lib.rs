// SPDX-License-Identifier: MIT OR Apache-2.0

//! ember-search - Ember addon search library
//!
//! Name search and code search against the Ember Observer registry, plus a
//! legacy npm search, shared by the ember-search CLI tool.

pub mod code_search;
pub mod config;
pub mod engine;
pub mod errors;
pub mod fetch;
pub mod npm;
pub mod paginate;
pub mod ranking;
pub mod registry;
pub mod render;
pub mod request;
pub mod ui;
