//! # Estimate Parsing
//!
//! Items carry their effort inline as `(estimate:: <number><unit>)`, where the
//! unit is `h` or `m` (any case) and the number may use a dot or a comma as the
//! decimal separator:
//!
//! ```text
//! - [ ] write the migration (estimate:: 1,5h)
//! - [ ] review (estimate:: 30m)
//! ```
//!
//! Everything here normalizes to minutes. Text without a token contributes
//! nothing, and a token whose number does not parse (`1.2.3`) is skipped rather
//! than reported: estimates are annotations, not input to validate.
//!
//! Two narrower readings exist next to the general parser because the progress
//! display depends on them:
//! - [`calculate_total_estimate`] is the coarse, text-only total shown before
//!   any render. It only sees hour tokens inside sections starting with `Tarea`.
//! - [`label_minutes`] only reads minute values, and is what the remaining-time
//!   figure is built from.

use once_cell::sync::Lazy;
use regex::Regex;

static ESTIMATE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\(estimate::\s*([\d.,]+)([mh])\)").expect("estimate pattern is valid")
});

static HOUR_ESTIMATE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\(estimate::\s*(\d+(?:\.\d+)?)h\)").expect("hour estimate pattern is valid")
});

static LABEL_MINUTES_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"estimate::\s*([\d.]+)m").expect("label pattern is valid"));

static LEVEL_ONE_SPLIT_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?m)^# ").expect("heading split pattern is valid"));

/// Marker that tells the aggregators an item has its own estimate.
pub const ESTIMATE_KEY: &str = "estimate::";

/// Returns every well-formed estimate in `text`, in minutes, in order of appearance.
pub fn parse_estimates(text: &str) -> Vec<f64> {
    ESTIMATE_RE
        .captures_iter(text)
        .filter_map(|caps| to_minutes(&caps[1], &caps[2]))
        .collect()
}

/// Returns the first well-formed estimate in `text`, in minutes.
pub fn first_estimate_minutes(text: &str) -> Option<f64> {
    ESTIMATE_RE
        .captures_iter(text)
        .find_map(|caps| to_minutes(&caps[1], &caps[2]))
}

/// Sum of all estimates in `text`, in minutes.
pub fn sum_minutes(text: &str) -> f64 {
    parse_estimates(text).iter().sum()
}

fn to_minutes(value: &str, unit: &str) -> Option<f64> {
    let value: f64 = value.replace(',', ".").parse().ok()?;
    if unit.eq_ignore_ascii_case("h") {
        Some(value * 60.0)
    } else {
        Some(value)
    }
}

/// Minute value of a checkbox label, as read by the remaining-time figure.
///
/// Only `m` values count here; an item estimated in hours contributes nothing
/// to the remaining time.
pub fn label_minutes(label: &str) -> Option<f64> {
    LABEL_MINUTES_RE
        .captures(label)
        .and_then(|caps| caps[1].parse().ok())
}

/// Coarse whole-document estimate, in hours.
///
/// The markdown is split on level-one headings. Every section whose text starts
/// with the word `Tarea` contributes the hour tokens it contains. No colon is
/// required after `Tarea`, unlike the per-task aggregation.
pub fn calculate_total_estimate(markdown: &str) -> f64 {
    LEVEL_ONE_SPLIT_RE
        .split(markdown)
        .filter(|section| section.trim().starts_with("Tarea"))
        .flat_map(|section| HOUR_ESTIMATE_RE.captures_iter(section))
        .filter_map(|caps| caps[1].parse::<f64>().ok())
        .fold(0.0, |total, hours| total + hours)
}
