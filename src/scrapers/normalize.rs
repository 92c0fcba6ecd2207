//! Text cleanup for scraped fields.
//!
//! Every function here is total: when the input does not have the expected
//! shape it falls back to the input itself, zero, or an empty value.

use once_cell::sync::Lazy;
use regex::Regex;

static WHITESPACE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").unwrap());
static ENLISTED_DATE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[A-Za-z0-9]*([A-Z][a-z]+\s+\d+(?:,\s*|\s+)\d{4})").unwrap());
static LOCATION: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z0-9]*?([A-Z][^,]*(?:,[^,]*)*)$").unwrap());
static MEMBER_COUNT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)(\d[\d,]*)\s*members?").unwrap());
static NUMBER: Lazy<Regex> = Lazy::new(|| Regex::new(r"\d[\d,]*(?:\.\d+)?").unwrap());
static BOX_RANGE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(\d+)\s*-\s*(\d+)").unwrap());

const UNITED_KINGDOM: &str = "United Kingdom";

/// Collapse whitespace runs to one space and trim.
pub fn clean_text(s: &str) -> String {
    WHITESPACE.replace_all(s, " ").trim().to_string()
}

/// Pull "Jan 5, 2021" out of text such as "handleJan 5, 2021".
pub fn clean_enlisted_date(s: &str) -> String {
    ENLISTED_DATE
        .captures(s)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
        .unwrap_or_else(|| s.to_string())
}

/// Normalize a "Country, Region" location.
///
/// Parts mentioning `handle` (case-insensitive) are dropped, since the
/// profile markup can glue the handle onto neighbouring text.
pub fn clean_location(s: &str, handle: &str) -> String {
    let cleaned = clean_text(s);
    let Some(captured) = LOCATION.captures(&cleaned).and_then(|caps| caps.get(1)) else {
        return cleaned;
    };

    let handle = handle.to_lowercase();
    let parts: Vec<String> = captured
        .as_str()
        .split(',')
        .map(clean_text)
        .filter(|part| !part.is_empty())
        .filter(|part| handle.is_empty() || !part.to_lowercase().contains(&handle))
        .collect();

    if let [single] = parts.as_slice() {
        if let Some(pos) = single.find(UNITED_KINGDOM) {
            let rest = &single[pos + UNITED_KINGDOM.len()..];
            return match rest.split_whitespace().next() {
                Some(region) => format!("{UNITED_KINGDOM}, {region}"),
                None => UNITED_KINGDOM.to_string(),
            };
        }
    }
    parts.join(", ")
}

/// "42 members" -> 42.
///
/// Also accepts thousands separators and any letter case, so
/// "1,204 Members" -> 1204 rather than 204.
pub fn extract_member_count(s: &str) -> u32 {
    MEMBER_COUNT
        .captures(s)
        .and_then(|caps| caps.get(1))
        .and_then(|m| m.as_str().replace(',', "").parse().ok())
        .unwrap_or(0)
}

/// First number in the text, thousands separators removed. "1,234.5 aUEC" -> 1234.5
///
/// Only the longest valid prefix is read, so "12.50." gives 12.5.
pub fn extract_number(s: &str) -> f64 {
    NUMBER
        .find(s)
        .and_then(|m| m.as_str().replace(',', "").parse().ok())
        .unwrap_or(0.0)
}

/// Expand a "1-32" box range into the container sizes 1, 2, 4, ... 32.
pub fn parse_scu_box_sizes(s: &str) -> Vec<u32> {
    let Some(end) = BOX_RANGE
        .captures(s)
        .and_then(|caps| caps.get(2))
        .and_then(|m| m.as_str().parse::<u32>().ok())
    else {
        return Vec::new();
    };

    let mut sizes = Vec::new();
    let mut size: u32 = 1;
    while size <= end {
        sizes.push(size);
        match size.checked_mul(2) {
            Some(next) => size = next,
            None => break,
        }
    }
    sizes
}
