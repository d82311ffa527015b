use chrono::NaiveDateTime;

use crate::domain::entities::record::{Record, Value};
use crate::domain::entities::view::SortDirection;

const AVATAR_FALLBACK: &str = "https://api.dicebear.com/6.x/identicon/svg?seed=";

pub fn format_number_with_commas(value: f64, decimals: usize) -> String {
    let formatted = format!("{:.*}", decimals, value.abs());
    let (integer, fraction) = match formatted.split_once('.') {
        Some((integer, fraction)) => (integer, Some(fraction)),
        None => (formatted.as_str(), None),
    };

    let mut grouped = String::new();
    for (idx, ch) in integer.chars().enumerate() {
        if idx > 0 && (integer.len() - idx) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    let sign = if value < 0.0 && formatted.chars().any(|c| c != '0' && c != '.') {
        "-"
    } else {
        ""
    };
    match fraction {
        Some(fraction) => format!("{sign}{grouped}.{fraction}"),
        None => format!("{sign}{grouped}"),
    }
}

pub fn format_score(value: &Value) -> String {
    match value {
        Value::Number(score) if score.fract() == 0.0 => format_number_with_commas(*score, 0),
        Value::Number(score) => format_number_with_commas(*score, 2),
        other => other.to_string(),
    }
}

/// `Mar 5, 2024`
pub fn format_date(value: &Value) -> String {
    match value.as_date() {
        Some(date) => format_naive_date(date),
        None => value.to_string(),
    }
}

fn format_naive_date(date: NaiveDateTime) -> String {
    date.format("%b %-d, %Y").to_string()
}

pub fn rank_class(rank: usize) -> &'static str {
    match rank {
        1 => "rank-1",
        2 => "rank-2",
        3 => "rank-3",
        _ => "rank-other",
    }
}

pub fn sort_indicator(
    field: &str,
    active: Option<&str>,
    direction: SortDirection,
) -> &'static str {
    if active != Some(field) {
        return "";
    }
    match direction {
        SortDirection::Asc => " ▲",
        SortDirection::Desc => " ▼",
    }
}

pub fn display_name(record: &Record) -> String {
    let first = record.get("first_name").to_string();
    let last = record.get("last_name").to_string();
    let joined = format!("{first} {last}");
    let joined = joined.trim();
    if joined.is_empty() {
        record.get("name").to_string()
    } else {
        joined.to_string()
    }
}

pub fn avatar_url(record: &Record) -> String {
    match record.get("avatar_url").as_text() {
        Some(url) if !url.trim().is_empty() => url.to_string(),
        _ => format!(
            "{AVATAR_FALLBACK}{}",
            encode_uri_component(&record.get("name").to_string())
        ),
    }
}

fn encode_uri_component(text: &str) -> String {
    let mut encoded = String::new();
    for byte in text.bytes() {
        match byte {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'_' | b'.' | b'!' | b'~' | b'*'
            | b'\'' | b'(' | b')' => encoded.push(byte as char),
            _ => encoded.push_str(&format!("%{byte:02X}")),
        }
    }
    encoded
}

/// Message under the search box; `None` while no query is active.
pub fn search_summary(query: &str, filtered: usize, total: usize) -> Option<String> {
    if query.trim().is_empty() {
        return None;
    }
    if filtered == 0 {
        Some(format!("No players found matching \"{query}\""))
    } else {
        Some(format!("Found {filtered} of {total} players"))
    }
}
