use super::cell::RawCell;
use super::date::{excel_serial_to_iso, normalize_date_text};
use super::rules::ImportRules;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;

/// A date inside a "place, date" cell: `07-Sep-2001` / `7 Mei 01`,
/// `2001-09-07`, or `07/09/2001`.
static EMBEDDED_DATE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"\d{1,2}[\s./-]+[A-Za-z]{3,}[\s./-]+\d{2,4}|\d{4}-\d{1,2}-\d{1,2}|\d{1,2}/\d{1,2}/\d{4}",
    )
    .unwrap()
});

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaceAndDate {
    pub place_of_birth: String,
    pub date_of_birth: String,
}

pub fn parse_place_and_date_of_birth(rules: &ImportRules, cell: &RawCell) -> PlaceAndDate {
    match cell {
        RawCell::Empty => PlaceAndDate::default(),
        // A bare number in this column is a date serial with no place.
        RawCell::Number(serial) => PlaceAndDate {
            place_of_birth: String::new(),
            date_of_birth: excel_serial_to_iso(*serial).unwrap_or_else(|| cell.as_text()),
        },
        RawCell::Text(text) => split_place_and_date(rules, text),
    }
}

fn split_place_and_date(rules: &ImportRules, text: &str) -> PlaceAndDate {
    let Some(m) = EMBEDDED_DATE.find(text) else {
        return PlaceAndDate {
            place_of_birth: trim_separators(text).to_string(),
            date_of_birth: String::new(),
        };
    };
    let rest = format!("{}{}", &text[..m.start()], &text[m.end()..]);
    PlaceAndDate {
        place_of_birth: trim_separators(&rest).to_string(),
        date_of_birth: normalize_date_text(rules, m.as_str()),
    }
}

fn trim_separators(s: &str) -> &str {
    s.trim_matches(|c: char| c == ',' || c.is_whitespace())
}
