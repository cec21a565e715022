//! Field extraction from characteristic text
//!
//! Each extractor returns `None` when the text does not name the value, so
//! the caller decides which default applies.

use std::sync::OnceLock;

use regex::Regex;

use crate::config::defaults::{FT_TO_M, MIN_MEANINGFUL_PERIOD_S};
use crate::types::LightColor;

// ============================================================================
// Color
// ============================================================================

/// Whole color words in priority order
const COLOR_WORDS: &[(&str, LightColor)] = &[
    ("red", LightColor::Red),
    ("green", LightColor::Green),
    ("yellow", LightColor::Yellow),
    ("amber", LightColor::Yellow),
    ("white", LightColor::White),
    ("blue", LightColor::Blue),
];

/// Standalone color letters in priority order
const COLOR_LETTERS: &[(&str, LightColor)] = &[
    ("R", LightColor::Red),
    ("G", LightColor::Green),
    ("Y", LightColor::Yellow),
    ("W", LightColor::White),
    ("B", LightColor::Blue),
];

fn color_patterns() -> &'static [(Regex, LightColor)] {
    static RE: OnceLock<Vec<(Regex, LightColor)>> = OnceLock::new();
    RE.get_or_init(|| {
        COLOR_WORDS
            .iter()
            .chain(COLOR_LETTERS)
            .map(|(token, color)| {
                let re = Regex::new(&format!(r"(?i)\b{}\b", regex::escape(token)))
                    .expect("color pattern is valid");
                (re, *color)
            })
            .collect()
    })
}

/// First color named in the text: whole words before single letters.
///
/// Letters must stand alone, so "Range" never reads as red.
pub fn extract_color(text: &str) -> Option<LightColor> {
    color_patterns()
        .iter()
        .find(|(re, _)| re.is_match(text))
        .map(|(_, color)| *color)
}

// ============================================================================
// Period, Range, Height
// ============================================================================

fn period_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?i)(\d+(?:\.\d+)?)\s*s\b").expect("period pattern is valid"))
}

// Upper-case M only: lower-case m is metres of height
fn range_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(\d+(?:\.\d+)?)\s*M\b").expect("range pattern is valid"))
}

fn height_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(\d+(?:\.\d+)?)\s*(m|ft)\b").expect("height pattern is valid")
    })
}

fn leading_number_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(?i)^\s*(\d+(?:\.\d+)?)\s*(ft|feet|')?").expect("number pattern is valid")
    })
}

fn first_number(re: &Regex, text: &str) -> Option<f64> {
    re.captures(text)
        .and_then(|caps| caps.get(1))
        .and_then(|m| m.as_str().parse::<f64>().ok())
}

fn positive(value: f64) -> Option<f64> {
    (value.is_finite() && value > 0.0).then_some(value)
}

/// Period in seconds, e.g. `Fl W 4s` -> 4.0. Values of 0.5 s or less are noise.
pub fn extract_period(text: &str) -> Option<f64> {
    first_number(period_regex(), text)
        .filter(|p| p.is_finite() && *p > MIN_MEANINGFUL_PERIOD_S)
}

/// Nominal range in nautical miles, e.g. `Q G 6M` -> 6.0.
pub fn extract_range(text: &str) -> Option<f64> {
    first_number(range_regex(), text).and_then(positive)
}

/// Focal height in metres from `<n>m` or `<n>ft`.
pub fn extract_height(text: &str) -> Option<f64> {
    let caps = height_regex().captures(text)?;
    let value: f64 = caps.get(1)?.as_str().parse().ok()?;
    let metres = match caps.get(2).map(|m| m.as_str()) {
        Some("ft") => value * FT_TO_M,
        _ => value,
    };
    positive(metres)
}

/// Dedicated height column. A bare number is metres; a feet suffix converts.
pub fn parse_height_field(field: &str) -> Option<f64> {
    let caps = leading_number_regex().captures(field)?;
    let value: f64 = caps.get(1)?.as_str().parse().ok()?;
    let metres = if caps.get(2).is_some() { value * FT_TO_M } else { value };
    positive(metres)
}

/// Dedicated range column: its leading number in nautical miles.
pub fn parse_range_field(field: &str) -> Option<f64> {
    first_number(leading_number_regex(), field).and_then(positive)
}
