use super::columns::normalize_key;
use super::rules::ImportRules;
use super::vocab::UNKNOWN;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;

static EDUCATION_KEYWORDS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)school|diploma|bachelor|master|doctoral").unwrap());

/// Trimmed lowercase passthrough on a miss; empty stays empty.
pub fn normalize_gender(rules: &ImportRules, raw: &str) -> String {
    let key = normalize_key(raw);
    if key.is_empty() {
        return String::new();
    }
    match rules.gender_alias(&key) {
        Some(g) => g.to_string(),
        None => raw.trim().to_lowercase(),
    }
}

fn education_label(rules: &ImportRules, key: &str) -> Option<String> {
    rules
        .education_alias(key)
        .map(str::to_string)
        .or_else(|| rules.education_option(key).map(str::to_string))
}

fn occupation_label(rules: &ImportRules, key: &str) -> Option<String> {
    rules
        .occupation_alias(key)
        .map(str::to_string)
        .or_else(|| rules.occupation_option(key).map(str::to_string))
}

/// Alias or option label, else `"Unknown"`. Free text outside the
/// vocabulary, such as "Vocational school", is dropped to `"Unknown"` rather
/// than kept as typed.
pub fn normalize_education(rules: &ImportRules, raw: &str) -> String {
    education_label(rules, &normalize_key(raw)).unwrap_or_else(|| UNKNOWN.to_string())
}

/// Same fallback as `normalize_education`.
pub fn normalize_occupation(rules: &ImportRules, raw: &str) -> String {
    occupation_label(rules, &normalize_key(raw)).unwrap_or_else(|| UNKNOWN.to_string())
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EducationOrOccupation {
    pub education: String,
    pub occupation: String,
}

impl EducationOrOccupation {
    fn education(label: String) -> Self {
        EducationOrOccupation {
            education: label,
            occupation: UNKNOWN.to_string(),
        }
    }

    fn occupation(label: String) -> Self {
        EducationOrOccupation {
            education: UNKNOWN.to_string(),
            occupation: label,
        }
    }
}

type Step = fn(&ImportRules, &str, &str) -> Option<EducationOrOccupation>;

fn by_education_alias(
    rules: &ImportRules,
    key: &str,
    _raw: &str,
) -> Option<EducationOrOccupation> {
    let label = rules.education_alias(key)?;
    Some(EducationOrOccupation::education(label.to_string()))
}

fn by_education_option(
    rules: &ImportRules,
    key: &str,
    _raw: &str,
) -> Option<EducationOrOccupation> {
    let label = rules.education_option(key)?;
    Some(EducationOrOccupation::education(label.to_string()))
}

fn by_occupation_alias(
    rules: &ImportRules,
    key: &str,
    _raw: &str,
) -> Option<EducationOrOccupation> {
    let label = rules.occupation_alias(key)?;
    Some(EducationOrOccupation::occupation(label.to_string()))
}

fn by_occupation_option(
    rules: &ImportRules,
    key: &str,
    _raw: &str,
) -> Option<EducationOrOccupation> {
    let label = rules.occupation_option(key)?;
    Some(EducationOrOccupation::occupation(label.to_string()))
}

fn by_education_keyword(
    rules: &ImportRules,
    _key: &str,
    raw: &str,
) -> Option<EducationOrOccupation> {
    if !EDUCATION_KEYWORDS.is_match(raw) {
        return None;
    }
    Some(EducationOrOccupation::education(normalize_education(rules, raw)))
}

fn as_occupation(
    rules: &ImportRules,
    _key: &str,
    raw: &str,
) -> Option<EducationOrOccupation> {
    Some(EducationOrOccupation::occupation(normalize_occupation(rules, raw)))
}

/// Evaluated top to bottom, first hit wins. Exact dictionary matches come
/// before the keyword guess, and occupation is the catch-all. Reordering
/// changes results for ambiguous cells.
const CASCADE: &[Step] = &[
    by_education_alias,
    by_education_option,
    by_occupation_alias,
    by_occupation_option,
    by_education_keyword,
    as_occupation,
];

/// Places a cell from an "education or occupation" column into exactly one
/// of the two fields; the other is `"Unknown"`.
pub fn classify_education_or_occupation(
    rules: &ImportRules,
    raw: &str,
) -> EducationOrOccupation {
    let key = normalize_key(raw);
    CASCADE
        .iter()
        .find_map(|step| step(rules, &key, raw))
        .unwrap_or_else(|| EducationOrOccupation::occupation(UNKNOWN.to_string()))
}
