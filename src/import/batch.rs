use super::cell::RawCell;
use super::record::{is_blank_row, transform_row, StudentRecord};
use super::review::{review, Warning};
use super::rules::ImportRules;
use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportedRow {
    /// Source row number as the caller counts it.
    pub row: usize,
    pub record: StudentRecord,
    pub warnings: Vec<Warning>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HeaderReport {
    pub header: String,
    pub status: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target: Option<&'static str>,
}

#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportReport {
    pub headers: Vec<HeaderReport>,
    pub records: Vec<ImportedRow>,
    pub skipped_blank_rows: usize,
    pub warning_count: usize,
}

pub fn map_headers<'a, I>(rules: &ImportRules, headers: I) -> Vec<HeaderReport>
where
    I: IntoIterator<Item = &'a str>,
{
    headers
        .into_iter()
        .map(|h| {
            let m = rules.header(h);
            HeaderReport {
                header: h.to_string(),
                status: m.status(),
                target: m.target().map(|t| t.name()),
            }
        })
        .collect()
}

/// Transforms numbered rows in order. Headers are reported in order of first
/// appearance across all rows.
pub fn transform_rows(
    rules: &ImportRules,
    rows: &[(usize, Vec<(String, RawCell)>)],
) -> ImportReport {
    let mut seen: Vec<&str> = Vec::new();
    for (_, row) in rows {
        for (header, _) in row {
            if !seen.contains(&header.as_str()) {
                seen.push(header.as_str());
            }
        }
    }

    let mut report = ImportReport {
        headers: map_headers(rules, seen),
        ..Default::default()
    };

    for (n, row) in rows {
        if is_blank_row(row) {
            tracing::debug!(row = n, "skipping blank row");
            report.skipped_blank_rows += 1;
            continue;
        }
        let record = transform_row(rules, row);
        let warnings = review(&record);
        report.warning_count += warnings.len();
        report.records.push(ImportedRow {
            row: *n,
            record,
            warnings,
        });
    }

    for h in report.headers.iter().filter(|h| h.target.is_none()) {
        tracing::debug!(header = %h.header, status = h.status, "column not imported");
    }
    report
}
