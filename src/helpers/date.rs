//! Date helper functions

use chrono::format::{Item, StrftimeItems};
use chrono::NaiveDate;
use std::fmt::Write;

/// Format a date using a Moment.js-style format string
///
/// An unusable format falls back to `YYYY-MM-DD`.
///
/// # Examples
/// ```ignore
/// format_date(&date, "MMMM DD, YYYY") // -> "May 11, 2020"
/// ```
pub fn format_date(date: &NaiveDate, format: &str) -> String {
    let mut out = String::new();
    if write!(out, "{}", date.format(&moment_to_chrono_format(format))).is_err() {
        tracing::warn!("Invalid date format {:?}, using YYYY-MM-DD", format);
        return date_xml(date);
    }
    out
}

/// Whether a Moment.js-style format string can be used by [`format_date`]
pub fn is_valid_date_format(format: &str) -> bool {
    let chrono_format = moment_to_chrono_format(format);
    !StrftimeItems::new(&chrono_format).any(|item| matches!(item, Item::Error))
}

/// Format a date for the `datetime` attribute of a `<time>` element
pub fn date_xml(date: &NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

/// Convert Moment.js format to chrono format
fn moment_to_chrono_format(format: &str) -> String {
    // Longer tokens first so `MMMM` never matches as `MM` twice
    let replacements = [
        ("YYYY", "%Y"),
        ("YY", "%y"),
        ("MMMM", "%B"),
        ("MMM", "%b"),
        ("MM", "%m"),
        ("DDDD", "%j"),
        ("DD", "%d"),
        ("dddd", "%A"),
        ("ddd", "%a"),
    ];

    let mut result = format.to_string();

    for (from, to) in replacements {
        result = result.replace(from, to);
    }

    result
}
