// SPDX-License-Identifier: MIT OR Apache-2.0

//! Filtering the addon listing and ordering it by score

use regex::{Regex, RegexBuilder};
use std::cmp::Ordering;

use crate::registry::AddonSummary;

/// Addons whose name or description matches `pattern`, best score first.
pub fn filter(pattern: &str, addons: Vec<AddonSummary>) -> Vec<AddonSummary> {
    let mut matched = search_by(pattern, addons);
    sort_by_score(&mut matched);
    matched
}

/// Keep entries whose name or description matches `pattern` case-insensitively.
///
/// `pattern` is tried as a regular expression first; if it does not compile
/// it is matched as a literal substring instead.
pub fn search_by(pattern: &str, addons: Vec<AddonSummary>) -> Vec<AddonSummary> {
    let Some(re) = compile_pattern(pattern) else {
        return Vec::new();
    };
    addons
        .into_iter()
        .filter(|addon| re.is_match(&addon.name) || re.is_match(&addon.description))
        .collect()
}

/// Sort descending by score; absent scores sort as 0.
pub fn sort_by_score(addons: &mut [AddonSummary]) {
    addons.sort_by(|a, b| compare_scores(b.score, a.score));
}

fn compare_scores(a: Option<f64>, b: Option<f64>) -> Ordering {
    a.unwrap_or(0.0).total_cmp(&b.unwrap_or(0.0))
}

fn compile_pattern(pattern: &str) -> Option<Regex> {
    RegexBuilder::new(pattern)
        .case_insensitive(true)
        .build()
        .or_else(|_| {
            RegexBuilder::new(&regex::escape(pattern))
                .case_insensitive(true)
                .build()
        })
        .ok()
}
