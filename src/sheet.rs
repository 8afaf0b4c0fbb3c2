use crate::import::{HeaderMatch, ImportRules, RawCell};
use anyhow::Context;
use calamine::{open_workbook_auto, Data, Reader};
use std::path::Path;

/// Rows scanned for the header before giving up.
const HEADER_SCAN_ROWS: usize = 10;
/// A header row must map at least this many columns.
const HEADER_MIN_TARGETS: usize = 2;

pub struct SheetGrid {
    pub sheet: String,
    pub cells: Vec<Vec<RawCell>>,
}

pub struct SheetRows {
    pub sheet: String,
    /// 1-based spreadsheet row of the header.
    pub header_row: usize,
    pub headers: Vec<String>,
    /// `(1-based row number, cells keyed by header)`.
    pub rows: Vec<(usize, Vec<(String, RawCell)>)>,
}

fn is_csv(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| e.eq_ignore_ascii_case("csv") || e.eq_ignore_ascii_case("txt"))
        .unwrap_or(false)
}

pub fn read_grid(path: &Path, sheet: Option<&str>) -> anyhow::Result<SheetGrid> {
    if is_csv(path) {
        read_csv_grid(path)
    } else {
        read_workbook_grid(path, sheet)
    }
}

fn cell_from_data(d: &Data) -> RawCell {
    match d {
        Data::Empty | Data::Error(_) => RawCell::Empty,
        Data::String(s) | Data::DateTimeIso(s) | Data::DurationIso(s) => RawCell::from(s.as_str()),
        Data::Float(f) => RawCell::Number(*f),
        Data::Int(i) => RawCell::Number(*i as f64),
        Data::Bool(b) => RawCell::Text(b.to_string()),
        Data::DateTime(dt) => RawCell::Number(dt.as_f64()),
    }
}

fn read_workbook_grid(path: &Path, sheet: Option<&str>) -> anyhow::Result<SheetGrid> {
    let mut workbook = open_workbook_auto(path)
        .with_context(|| format!("open workbook {}", path.display()))?;
    let names = workbook.sheet_names().to_vec();
    let index = match sheet {
        Some(name) => names
            .iter()
            .position(|n| n.eq_ignore_ascii_case(name))
            .with_context(|| format!("no sheet named {name:?} (have {names:?})"))?,
        None => 0,
    };
    let name = names
        .get(index)
        .cloned()
        .context("workbook has no worksheets")?;
    let range = workbook
        .worksheet_range_at(index)
        .context("workbook has no worksheets")?
        .with_context(|| format!("read sheet {name:?}"))?;

    let cells = range
        .rows()
        .map(|row| row.iter().map(cell_from_data).collect())
        .collect();
    Ok(SheetGrid { sheet: name, cells })
}

/// Picks the delimiter that splits the first lines most consistently.
pub fn detect_delimiter(content: &str) -> u8 {
    let sample: Vec<&str> = content.lines().take(HEADER_SCAN_ROWS).collect();
    let mut best = b',';
    let mut best_score = 0.0f32;
    for delimiter in [b',', b';', b'\t', b'|'] {
        if sample.is_empty() {
            break;
        }
        let counts: Vec<f32> = sample
            .iter()
            .map(|line| line.bytes().filter(|b| *b == delimiter).count() as f32)
            .collect();
        let avg = counts.iter().sum::<f32>() / counts.len() as f32;
        let variance =
            counts.iter().map(|c| (c - avg).powi(2)).sum::<f32>() / counts.len() as f32;
        let score = avg / (1.0 + variance.sqrt());
        if score > best_score {
            best_score = score;
            best = delimiter;
        }
    }
    best
}

fn read_csv_grid(path: &Path) -> anyhow::Result<SheetGrid> {
    let bytes = std::fs::read(path).with_context(|| format!("read {}", path.display()))?;
    let content = String::from_utf8_lossy(&bytes);
    let content = content.trim_start_matches('\u{feff}');
    let delimiter = detect_delimiter(content);

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .delimiter(delimiter)
        .from_reader(content.as_bytes());

    let mut cells = Vec::new();
    for (i, record) in reader.records().enumerate() {
        let record = record.with_context(|| format!("csv line {}", i + 1))?;
        cells.push(record.iter().map(RawCell::from).collect());
    }

    let sheet = path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("csv")
        .to_string();
    Ok(SheetGrid { sheet, cells })
}

/// Index of the first row, among the first few, that maps enough columns to
/// be a header. Title rows above it are skipped.
pub fn detect_header_row(rules: &ImportRules, grid: &[Vec<RawCell>]) -> Option<usize> {
    grid.iter().take(HEADER_SCAN_ROWS).position(|row| {
        let mapped = row
            .iter()
            .filter(|c| matches!(rules.header(&c.as_text()), HeaderMatch::Target(_)))
            .count();
        mapped >= HEADER_MIN_TARGETS
    })
}

/// Keys every row below the header by header text. Columns with a blank
/// header are dropped.
pub fn rows_below_header(grid: SheetGrid, header_index: usize) -> SheetRows {
    let headers: Vec<String> = grid
        .cells
        .get(header_index)
        .map(|row| row.iter().map(|c| c.as_text().trim().to_string()).collect())
        .unwrap_or_default();

    let rows = grid
        .cells
        .into_iter()
        .enumerate()
        .skip(header_index + 1)
        .map(|(i, row)| {
            let keyed = headers
                .iter()
                .zip(row.into_iter().chain(std::iter::repeat(RawCell::Empty)))
                .filter(|(h, _)| !h.is_empty())
                .map(|(h, c)| (h.clone(), c))
                .collect();
            (i + 1, keyed)
        })
        .collect();

    SheetRows {
        sheet: grid.sheet,
        header_row: header_index + 1,
        headers,
        rows,
    }
}
