// SPDX-License-Identifier: MIT OR Apache-2.0

//! Text rendering for addons and code matches

use chrono::{DateTime, Datelike, Utc};
use colored::{Color, Colorize};

use crate::registry::{AddonSummary, CodeMatchDetail, CodeOccurrence};

/// Marker in front of the context line that matched
pub const MATCH_MARKER: &str = ">";

/// Color class of an addon score
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScoreColor {
    Good,
    Moderate,
    Poor,
}

impl ScoreColor {
    fn color(self) -> Color {
        match self {
            Self::Good => Color::Green,
            Self::Moderate => Color::Yellow,
            Self::Poor => Color::Red,
        }
    }
}

/// Above 6 is good, exactly 4, 5 or 6 is moderate, anything else is poor.
pub fn score_to_color(score: Option<f64>) -> ScoreColor {
    match score {
        Some(s) if s > 6.0 => ScoreColor::Good,
        Some(s) if s == 4.0 || s == 5.0 || s == 6.0 => ScoreColor::Moderate,
        _ => ScoreColor::Poor,
    }
}

/// Builds display lines. Holds the clock so output is reproducible in tests.
#[derive(Debug, Clone)]
pub struct Renderer {
    use_color: bool,
    now: DateTime<Utc>,
}

impl Renderer {
    pub fn new(use_color: bool) -> Self {
        Self::at(use_color, Utc::now())
    }

    pub fn at(use_color: bool, now: DateTime<Utc>) -> Self {
        Self { use_color, now }
    }

    fn paint(&self, text: &str, color: Color) -> String {
        if self.use_color {
            text.color(color).to_string()
        } else {
            text.to_string()
        }
    }

    fn dim(&self, text: &str) -> String {
        if self.use_color {
            text.dimmed().to_string()
        } else {
            text.to_string()
        }
    }

    /// `<score> <name> updated <distance> ago`
    pub fn addon_header(&self, addon: &AddonSummary) -> String {
        let score = addon.score.unwrap_or(0.0).to_string();
        let updated = match addon.last_updated {
            Some(date) => format!("updated {} ago", distance_in_words(date, self.now)),
            None => "update date unknown".to_string(),
        };
        format!(
            "{} {} {}",
            self.paint(&score, score_to_color(addon.score).color()),
            self.paint(&addon.name, Color::Cyan),
            self.dim(&updated)
        )
    }

    pub fn addon_description(&self, addon: &AddonSummary) -> String {
        self.dim(&addon.description)
    }

    /// `<addon> contains <count> occurrences`
    pub fn occurrence(&self, occurrence: &CodeOccurrence) -> String {
        format!(
            "{} contains {} occurrences",
            self.paint(&occurrence.addon_name, Color::Cyan),
            occurrence.occurrence_count
        )
    }

    /// `<addon>/<filename>:<line>`
    pub fn code_match_header(&self, addon_name: &str, detail: &CodeMatchDetail) -> String {
        let header = format!(
            "{}/{}:{}",
            addon_name, detail.filename, detail.matched_line_number
        );
        self.paint(&header, Color::Cyan)
    }

    /// Context lines, numbered, the matched one marked and highlighted.
    pub fn code_context(&self, detail: &CodeMatchDetail) -> Vec<String> {
        let width = detail
            .context_lines
            .iter()
            .map(|line| line.number.to_string().len())
            .max()
            .unwrap_or(1);

        detail
            .context_lines
            .iter()
            .map(|line| {
                let text = line.text.trim_end_matches(['\n', '\r']);
                let number = format!("{:>width$}", line.number, width = width);
                if line.number == detail.matched_line_number {
                    let rendered = format!("{} {} | {}", MATCH_MARKER, number, text);
                    self.paint(&rendered, Color::Yellow)
                } else {
                    format!("  {} | {}", number, text)
                }
            })
            .collect()
    }
}

const MINUTES_IN_DAY: i64 = 1440;
const MINUTES_IN_ALMOST_TWO_DAYS: i64 = 2520;
const MINUTES_IN_MONTH: i64 = 43200;
const MINUTES_IN_TWO_MONTHS: i64 = 86400;

/// Human distance between two instants, e.g. "about 3 hours" or "over 1 year".
pub fn distance_in_words(from: DateTime<Utc>, to: DateTime<Utc>) -> String {
    let seconds = (to - from).num_seconds().abs();
    let minutes = (seconds as f64 / 60.0).round() as i64;

    if minutes < 2 {
        return if minutes == 0 {
            "less than a minute".to_string()
        } else {
            "1 minute".to_string()
        };
    }
    if minutes < 45 {
        return format!("{} minutes", minutes);
    }
    if minutes < 90 {
        return "about 1 hour".to_string();
    }
    if minutes < MINUTES_IN_DAY {
        let hours = (minutes as f64 / 60.0).round() as i64;
        return format!("about {} hours", hours);
    }
    if minutes < MINUTES_IN_ALMOST_TWO_DAYS {
        return "1 day".to_string();
    }
    if minutes < MINUTES_IN_MONTH {
        let days = (minutes as f64 / MINUTES_IN_DAY as f64).round() as i64;
        return format!("{} days", days);
    }
    if minutes < MINUTES_IN_TWO_MONTHS {
        let months = (minutes as f64 / MINUTES_IN_MONTH as f64).round() as i64;
        return format!("about {} {}", months, plural(months, "month"));
    }

    let months = calendar_months_between(from, to);
    if months < 12 {
        let months = (minutes as f64 / MINUTES_IN_MONTH as f64).round() as i64;
        return format!("{} months", months);
    }

    let years = months / 12;
    let into_year = months % 12;
    if into_year < 3 {
        format!("about {} {}", years, plural(years, "year"))
    } else if into_year < 9 {
        format!("over {} {}", years, plural(years, "year"))
    } else {
        format!("almost {} years", years + 1)
    }
}

/// Whole calendar months between two instants, in either order.
fn calendar_months_between(a: DateTime<Utc>, b: DateTime<Utc>) -> i64 {
    let (earlier, later) = if a <= b { (a, b) } else { (b, a) };
    let mut months = i64::from(later.year() - earlier.year()) * 12
        + i64::from(later.month())
        - i64::from(earlier.month());
    // The last month only counts once its day and time have been reached.
    if (later.day(), later.time()) < (earlier.day(), earlier.time()) {
        months -= 1;
    }
    months.max(0)
}

fn plural(count: i64, unit: &str) -> String {
    if count == 1 {
        unit.to_string()
    } else {
        format!("{}s", unit)
    }
}
