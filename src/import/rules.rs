use super::columns::{normalize_key, ColumnTarget, HeaderMatch, COLUMN_MAPPING};
use super::vocab::{
    EDUCATION_OPTIONS, EDUCATION_VALUE_MAP, FEMALE, GENDER_MAP, MALE, MONTHS, OCCUPATION_OPTIONS,
    OCCUPATION_VALUE_MAP, UNKNOWN,
};
use anyhow::Context;
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::path::Path;

/// Header aliases, value vocabularies and month names in effect for an
/// import. Built from the static tables, optionally extended from a rules
/// file; read-only while rows are transformed.
#[derive(Debug, Clone)]
pub struct ImportRules {
    headers: HashMap<String, Option<ColumnTarget>>,
    gender: HashMap<String, String>,
    education: HashMap<String, String>,
    occupation: HashMap<String, String>,
    months: HashMap<String, u32>,
}

static BUILTIN: Lazy<ImportRules> = Lazy::new(ImportRules::from_tables);

fn owned_table(table: &[(&str, &str)]) -> HashMap<String, String> {
    table
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

fn option_label(options: &'static [&'static str], key: &str) -> Option<&'static str> {
    options
        .iter()
        .copied()
        .find(|label| label.to_uppercase() == key)
}

impl Default for ImportRules {
    fn default() -> Self {
        ImportRules::builtin().clone()
    }
}

impl ImportRules {
    pub fn builtin() -> &'static ImportRules {
        &BUILTIN
    }

    fn from_tables() -> Self {
        ImportRules {
            headers: COLUMN_MAPPING
                .iter()
                .map(|(k, t)| (k.to_string(), *t))
                .collect(),
            gender: owned_table(GENDER_MAP),
            education: owned_table(EDUCATION_VALUE_MAP),
            occupation: owned_table(OCCUPATION_VALUE_MAP),
            months: MONTHS.iter().map(|(k, v)| (k.to_string(), *v)).collect(),
        }
    }

    pub fn header(&self, raw: &str) -> HeaderMatch {
        match self.headers.get(&normalize_key(raw)) {
            Some(Some(target)) => HeaderMatch::Target(*target),
            Some(None) => HeaderMatch::Ignored,
            None => HeaderMatch::Unmapped,
        }
    }

    /// `key` must already be in lookup form.
    pub fn gender_alias(&self, key: &str) -> Option<&str> {
        self.gender.get(key).map(String::as_str)
    }

    pub fn education_alias(&self, key: &str) -> Option<&str> {
        self.education.get(key).map(String::as_str)
    }

    pub fn occupation_alias(&self, key: &str) -> Option<&str> {
        self.occupation.get(key).map(String::as_str)
    }

    pub fn education_option(&self, key: &str) -> Option<&'static str> {
        option_label(EDUCATION_OPTIONS, key)
    }

    pub fn occupation_option(&self, key: &str) -> Option<&'static str> {
        option_label(OCCUPATION_OPTIONS, key)
    }

    /// Full word first, then its first three letters.
    pub fn month(&self, name: &str) -> Option<u32> {
        let lower = name.trim().trim_end_matches('.').to_lowercase();
        if let Some(m) = self.months.get(&lower) {
            return Some(*m);
        }
        let prefix: String = lower.chars().take(3).collect();
        if prefix.chars().count() < 3 {
            return None;
        }
        self.months.get(&prefix).copied()
    }

    /// Merges `overlay` over the current tables. The overlay is validated as a
    /// whole first, so a rejected file leaves the rules untouched.
    pub fn apply(&mut self, overlay: &RulesOverlay) -> anyhow::Result<()> {
        let mut headers = Vec::new();
        for (alias, target) in &overlay.headers {
            let target = match target.as_deref() {
                None => None,
                Some(name) => Some(
                    ColumnTarget::from_name(name)
                        .with_context(|| format!("header {alias:?}: unknown target {name:?}"))?,
                ),
            };
            headers.push((normalize_key(alias), target));
        }

        let gender = checked_aliases("gender", &overlay.gender, |v| v == MALE || v == FEMALE)?;
        let education = checked_aliases("education", &overlay.education, |v| {
            v == UNKNOWN || EDUCATION_OPTIONS.contains(&v)
        })?;
        let occupation = checked_aliases("occupation", &overlay.occupation, |v| {
            v == UNKNOWN || OCCUPATION_OPTIONS.contains(&v)
        })?;

        let mut months = Vec::new();
        for (name, month) in &overlay.months {
            if !(1..=12).contains(month) {
                anyhow::bail!("month {name:?}: {month} is not in 1..=12");
            }
            months.push((name.trim().to_lowercase(), *month));
        }

        self.headers.extend(headers);
        self.gender.extend(gender);
        self.education.extend(education);
        self.occupation.extend(occupation);
        self.months.extend(months);
        Ok(())
    }

    pub fn load_file(&mut self, path: &Path) -> anyhow::Result<()> {
        let overlay = RulesOverlay::read(path)?;
        self.apply(&overlay)
            .with_context(|| format!("invalid rules in {}", path.display()))
    }

    pub fn summary(&self) -> RulesSummary {
        RulesSummary {
            headers: self.headers.len(),
            gender: self.gender.len(),
            education: self.education.len(),
            occupation: self.occupation.len(),
            months: self.months.len(),
        }
    }

    /// Sorted snapshot of every table, in the same shape a rules file uses.
    pub fn snapshot(&self) -> RulesOverlay {
        RulesOverlay {
            headers: self
                .headers
                .iter()
                .map(|(k, t)| (k.clone(), t.map(|t| t.name().to_string())))
                .collect(),
            gender: self.gender.clone().into_iter().collect(),
            education: self.education.clone().into_iter().collect(),
            occupation: self.occupation.clone().into_iter().collect(),
            months: self.months.clone().into_iter().collect(),
        }
    }
}

fn checked_aliases(
    table: &str,
    entries: &BTreeMap<String, String>,
    valid: impl Fn(&str) -> bool,
) -> anyhow::Result<Vec<(String, String)>> {
    let mut out = Vec::new();
    for (alias, label) in entries {
        if !valid(label) {
            anyhow::bail!("{table} alias {alias:?}: {label:?} is not a canonical value");
        }
        out.push((normalize_key(alias), label.clone()));
    }
    Ok(out)
}

/// On-disk rules file. Every table is optional.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RulesOverlay {
    pub headers: BTreeMap<String, Option<String>>,
    pub gender: BTreeMap<String, String>,
    pub education: BTreeMap<String, String>,
    pub occupation: BTreeMap<String, String>,
    pub months: BTreeMap<String, u32>,
}

impl RulesOverlay {
    pub fn read(path: &Path) -> anyhow::Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("read rules file {}", path.display()))?;
        serde_json::from_str(&text).with_context(|| format!("parse rules file {}", path.display()))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RulesSummary {
    pub headers: usize,
    pub gender: usize,
    pub education: usize,
    pub occupation: usize,
    pub months: usize,
}
