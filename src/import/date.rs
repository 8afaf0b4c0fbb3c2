use super::cell::RawCell;
use super::rules::ImportRules;
use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use once_cell::sync::Lazy;
use regex::Regex;

/// Days between Excel's 1900 epoch and 1970-01-01. Excel's phantom
/// 1900-02-29 is absorbed by this constant for every serial after it.
const EXCEL_UNIX_EPOCH_DAYS: f64 = 25569.0;
const MS_PER_DAY: f64 = 86_400_000.0;
/// 9999-12-31, the last date Excel can represent.
const EXCEL_MAX_SERIAL: f64 = 2_958_465.0;

static NAMED_MONTH_DATE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(\d{1,2})[\s./-]+([A-Za-z]{3,})[\s.,/-]+(\d{2,4})$").unwrap()
});

static DAY_FIRST_DATE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(\d{1,2})/(\d{1,2})/(\d{4})$").unwrap());

const FALLBACK_DATE_FORMATS: &[&str] = &[
    "%Y-%m-%d",
    "%Y/%m/%d",
    "%Y.%m.%d",
    "%b %d, %Y",
    "%b %d %Y",
];

const FALLBACK_DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
];

fn iso(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

/// Normalizes a date cell to `YYYY-MM-DD`. Anything that cannot be read as a
/// date is returned as its (trimmed) text so the import can carry on.
pub fn normalize_date(rules: &ImportRules, cell: &RawCell) -> String {
    match cell {
        RawCell::Empty => String::new(),
        RawCell::Number(serial) => {
            excel_serial_to_iso(*serial).unwrap_or_else(|| cell.as_text())
        }
        RawCell::Text(text) => normalize_date_text(rules, text),
    }
}

pub fn excel_serial_to_iso(serial: f64) -> Option<String> {
    if !serial.is_finite() || !(0.0..EXCEL_MAX_SERIAL + 1.0).contains(&serial) {
        return None;
    }
    let millis = ((serial - EXCEL_UNIX_EPOCH_DAYS) * MS_PER_DAY).round() as i64;
    DateTime::<Utc>::from_timestamp_millis(millis).map(|dt| iso(dt.date_naive()))
}

pub fn normalize_date_text(rules: &ImportRules, raw: &str) -> String {
    let text = raw.trim();
    if text.is_empty() {
        return String::new();
    }
    parse_named_month(rules, text)
        .or_else(|| parse_day_first(text))
        .or_else(|| parse_fallback(text))
        .map(iso)
        .unwrap_or_else(|| text.to_string())
}

/// Two-digit years: 50..=99 are 19xx, 00..=49 are 20xx.
fn expand_year(digits: &str) -> Option<i32> {
    let y: i32 = digits.parse().ok()?;
    if digits.len() == 2 {
        Some(if y >= 50 { 1900 + y } else { 2000 + y })
    } else {
        Some(y)
    }
}

fn parse_named_month(rules: &ImportRules, text: &str) -> Option<NaiveDate> {
    let caps = NAMED_MONTH_DATE.captures(text)?;
    let day: u32 = caps[1].parse().ok()?;
    let month = rules.month(&caps[2])?;
    let year = expand_year(&caps[3])?;
    NaiveDate::from_ymd_opt(year, month, day)
}

fn parse_day_first(text: &str) -> Option<NaiveDate> {
    let caps = DAY_FIRST_DATE.captures(text)?;
    let day: u32 = caps[1].parse().ok()?;
    let month: u32 = caps[2].parse().ok()?;
    let year: i32 = caps[3].parse().ok()?;
    NaiveDate::from_ymd_opt(year, month, day)
}

fn parse_fallback(text: &str) -> Option<NaiveDate> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(text) {
        return Some(dt.with_timezone(&Utc).date_naive());
    }
    for fmt in FALLBACK_DATE_FORMATS {
        if let Ok(d) = NaiveDate::parse_from_str(text, fmt) {
            return Some(d);
        }
    }
    for fmt in FALLBACK_DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(text, fmt) {
            return Some(dt.date());
        }
    }
    None
}

/// True for a real calendar date written as `YYYY-MM-DD`.
pub fn is_iso_date(text: &str) -> bool {
    text.len() == 10 && NaiveDate::parse_from_str(text, "%Y-%m-%d").is_ok()
}
