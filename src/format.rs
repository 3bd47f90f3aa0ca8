//! Display formatting for counts, dates and language labels.

use chrono::{DateTime, Utc};

/// Swatch color for languages missing from [`LANGUAGE_COLORS`].
pub const FALLBACK_LANGUAGE_COLOR: &str = "#f59e0b";

/// Known language labels and their swatch colors.
pub const LANGUAGE_COLORS: &[(&str, &str)] = &[
    ("JavaScript", "#f7df1e"),
    ("TypeScript", "#3178c6"),
    ("Python", "#3776ab"),
    ("Java", "#b07219"),
    ("C++", "#f34b7d"),
    ("C", "#555555"),
    ("C#", "#178600"),
    ("Ruby", "#701516"),
    ("Go", "#00ADD8"),
    ("Rust", "#dea584"),
    ("PHP", "#4F5D95"),
    ("Swift", "#ffac45"),
    ("Kotlin", "#A97BFF"),
    ("Dart", "#00B4AB"),
    ("HTML", "#e34c26"),
    ("CSS", "#563d7c"),
    ("Vue", "#41b883"),
    ("React", "#61dafb"),
    ("Shell", "#89e051"),
];

/// Formats a counter, abbreviating thousands: `1234` becomes `"1.2k"`.
///
/// Halves round up (`1250` is `"1.3k"`).
pub fn format_count(n: u64) -> String {
    if n >= 1000 {
        let tenths = (n + 50) / 100;
        format!("{}.{}k", tenths / 10, tenths % 10)
    } else {
        n.to_string()
    }
}

/// Describes how long ago `timestamp` was relative to `now`.
///
/// The distance is taken in whole days regardless of direction, so a
/// timestamp in the future reads the same as one equally far in the past.
pub fn format_relative_date(timestamp: DateTime<Utc>, now: DateTime<Utc>) -> String {
    // num_days truncates toward zero, so its magnitude is the floored distance.
    let days = (now - timestamp).num_days().unsigned_abs();

    match days {
        0 => "today".to_string(),
        1 => "yesterday".to_string(),
        2..=6 => format!("{days} days ago"),
        7..=29 => format!("{} weeks ago", days / 7),
        30..=364 => format!("{} months ago", days / 30),
        _ => format!("{} years ago", days / 365),
    }
}

/// Looks up the swatch color for a repository language.
pub fn language_color(language: Option<&str>) -> &'static str {
    language
        .and_then(|label| {
            LANGUAGE_COLORS
                .iter()
                .find(|(name, _)| *name == label)
                .map(|(_, color)| *color)
        })
        .unwrap_or(FALLBACK_LANGUAGE_COLOR)
}

/// Escapes text for safe inclusion in HTML markup or a quoted attribute.
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            c => escaped.push(c),
        }
    }
    escaped
}
