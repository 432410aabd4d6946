//! Pure UI helpers extracted from components for non-wasm testing.

use crate::core::error::ValidationError;
use chrono::NaiveDate;
use std::fmt::Write;

/// Read one `key=value` parameter from a URL fragment or query string.
///
/// Accepts the raw string with or without its leading `#`/`?`. Values are
/// form-urlencoded (`+` is a space); empty values count as absent.
#[must_use]
pub fn url_param(raw: &str, key: &str) -> Option<String> {
    url::form_urlencoded::parse(raw.trim_start_matches(['#', '?']).as_bytes())
        .find(|(name, _)| *name == key)
        .map(|(_, value)| value.into_owned())
        .filter(|value| !value.trim().is_empty())
}

/// Parse a `YYYY-MM-DD` date input; an empty input is `None`.
///
/// # Errors
/// Returns [`ValidationError::InvalidDate`] for non-empty unparseable input.
pub fn parse_date_input(
    field: &'static str,
    raw: &str,
) -> Result<Option<NaiveDate>, ValidationError> {
    let value = raw.trim();
    if value.is_empty() {
        return Ok(None);
    }
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .map(Some)
        .map_err(|_| ValidationError::InvalidDate {
            field,
            value: value.to_string(),
        })
}

/// Parse a guest/room count input with a lower bound.
///
/// # Errors
/// Returns [`ValidationError::InvalidCount`] when the input is not a number or below `min`.
pub fn parse_count(field: &'static str, raw: &str, min: u32) -> Result<u32, ValidationError> {
    raw.trim()
        .parse::<u32>()
        .ok()
        .filter(|value| *value >= min)
        .ok_or(ValidationError::InvalidCount { field, min })
}

/// Format a price in major units, e.g. `USD 120.50`.
#[must_use]
pub fn format_price(amount: f64, currency: &str) -> String {
    format!("{} {amount:.2}", currency.to_uppercase())
}

/// Format an amount given in minor units (cents), e.g. `USD 240.00`.
#[must_use]
pub fn format_minor_units(amount_total: i64, currency: Option<&str>) -> String {
    let sign = if amount_total < 0 { "-" } else { "" };
    let abs = amount_total.unsigned_abs();
    let mut out = String::new();
    if let Some(code) = currency.filter(|c| !c.trim().is_empty()) {
        let _ = write!(out, "{} ", code.to_uppercase());
    }
    let _ = write!(out, "{sign}{}.{:02}", abs / 100, abs % 100);
    out
}

/// Short label for a stay length.
#[must_use]
pub fn nights_label(nights: u32) -> String {
    if nights == 1 {
        "1 night".to_string()
    } else {
        format!("{nights} nights")
    }
}

/// Long-form date used on cards and summaries, e.g. `Sun, Jun 1 2025`.
#[must_use]
pub fn format_stay_date(date: NaiveDate) -> String {
    date.format("%a, %b %-d %Y").to_string()
}

/// One-decimal guest rating, or a dash when unrated.
#[must_use]
pub fn format_rating(rating: Option<f64>) -> String {
    rating.map_or_else(|| "-".to_string(), |value| format!("{value:.1}"))
}
