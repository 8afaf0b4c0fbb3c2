use crate::import::{
    classify_education_or_occupation, map_headers, normalize_date, normalize_education,
    normalize_gender, normalize_occupation, normalize_phone, parse_place_and_date_of_birth,
    split_full_name, title_case, transform_rows, RawCell,
};
use crate::ipc::error::{err, ok};
use crate::ipc::types::{AppState, Request};
use crate::sheet;
use serde_json::json;
use std::path::PathBuf;

fn handle_map_headers(state: &mut AppState, req: &Request) -> serde_json::Value {
    let Some(headers) = req.params.get("headers").and_then(|v| v.as_array()) else {
        return err(&req.id, "bad_params", "missing params.headers", None);
    };
    let mut names = Vec::with_capacity(headers.len());
    for (i, h) in headers.iter().enumerate() {
        match h {
            serde_json::Value::String(s) => names.push(s.clone()),
            serde_json::Value::Null => names.push(String::new()),
            other => names.push(RawCell::from(other).as_text()),
        }
        if names[i].len() > 512 {
            return err(
                &req.id,
                "bad_params",
                "header too long",
                Some(json!({ "index": i })),
            );
        }
    }
    let report = map_headers(&state.rules, names.iter().map(String::as_str));
    ok(&req.id, json!({ "headers": report }))
}

fn handle_normalize(state: &mut AppState, req: &Request) -> serde_json::Value {
    let Some(kind) = req.params.get("kind").and_then(|v| v.as_str()) else {
        return err(&req.id, "bad_params", "missing params.kind", None);
    };
    let cell = req
        .params
        .get("value")
        .map(RawCell::from)
        .unwrap_or(RawCell::Empty);
    let rules = &state.rules;
    let text = cell.as_text();

    let value = match kind {
        "date" => json!(normalize_date(rules, &cell)),
        "phone" => json!(normalize_phone(&cell)),
        "gender" => json!(normalize_gender(rules, &text)),
        "education" => json!(normalize_education(rules, &text)),
        "occupation" => json!(normalize_occupation(rules, &text)),
        "educationOrOccupation" => json!(classify_education_or_occupation(rules, &text)),
        "fullName" => json!(split_full_name(&text)),
        "placeAndDateOfBirth" => json!(parse_place_and_date_of_birth(rules, &cell)),
        "name" => json!(title_case(
            &text.split_whitespace().collect::<Vec<_>>().join(" ")
        )),
        other => {
            return err(
                &req.id,
                "bad_params",
                format!("unknown normalizer kind: {other}"),
                None,
            )
        }
    };
    ok(&req.id, json!({ "kind": kind, "value": value }))
}

fn parse_rows(params: &serde_json::Value) -> Result<Vec<(usize, Vec<(String, RawCell)>)>, String> {
    let rows = params
        .get("rows")
        .and_then(|v| v.as_array())
        .ok_or_else(|| "missing params.rows".to_string())?;
    let first_row = match params.get("firstRow") {
        None | Some(serde_json::Value::Null) => 1,
        Some(v) => v
            .as_u64()
            .and_then(|n| usize::try_from(n).ok())
            .ok_or_else(|| "params.firstRow must be a non-negative integer".to_string())?,
    };
    // Numbering must fit for the last row too.
    if first_row.checked_add(rows.len()).is_none() {
        return Err(format!(
            "params.firstRow {first_row} is too large for {} rows",
            rows.len()
        ));
    }

    let mut out = Vec::with_capacity(rows.len());
    for (i, row) in rows.iter().enumerate() {
        let Some(obj) = row.as_object() else {
            return Err(format!("rows[{i}] must be an object of header -> cell"));
        };
        let cells = obj
            .iter()
            .map(|(header, v)| (header.clone(), RawCell::from(v)))
            .collect();
        out.push((first_row + i, cells));
    }
    Ok(out)
}

fn handle_transform_rows(state: &mut AppState, req: &Request) -> serde_json::Value {
    let rows = match parse_rows(&req.params) {
        Ok(v) => v,
        Err(message) => return err(&req.id, "bad_params", message, None),
    };
    if rows.len() > state.max_rows {
        return err(
            &req.id,
            "too_many_rows",
            format!("{} rows exceeds the limit of {}", rows.len(), state.max_rows),
            Some(json!({ "rows": rows.len(), "maxRows": state.max_rows })),
        );
    }

    let report = transform_rows(&state.rules, &rows);
    tracing::info!(
        rows = rows.len(),
        records = report.records.len(),
        warnings = report.warning_count,
        "transformed rows"
    );
    ok(&req.id, json!(report))
}

fn handle_preview_file(state: &mut AppState, req: &Request) -> serde_json::Value {
    let Some(path) = req
        .params
        .get("path")
        .and_then(|v| v.as_str())
        .map(PathBuf::from)
    else {
        return err(&req.id, "bad_params", "missing params.path", None);
    };
    let sheet_name = req.params.get("sheet").and_then(|v| v.as_str());
    let limit = req
        .params
        .get("limit")
        .and_then(|v| v.as_u64())
        .map(|n| (n as usize).min(state.max_rows))
        .unwrap_or(state.max_rows);

    let grid = match sheet::read_grid(&path, sheet_name) {
        Ok(g) => g,
        Err(e) => {
            return err(
                &req.id,
                "sheet_read_failed",
                format!("{e:#}"),
                Some(json!({ "path": path.to_string_lossy() })),
            )
        }
    };
    tracing::info!(
        path = %path.display(),
        sheet = %grid.sheet,
        rows = grid.cells.len(),
        "read sheet"
    );

    let Some(header_index) = sheet::detect_header_row(&state.rules, &grid.cells) else {
        return err(
            &req.id,
            "no_header_row",
            "no row in the first lines maps at least two known columns",
            Some(json!({ "path": path.to_string_lossy(), "sheet": grid.sheet })),
        );
    };

    let mut sheet_rows = sheet::rows_below_header(grid, header_index);
    let total_rows = sheet_rows.rows.len();
    sheet_rows.rows.truncate(limit);

    let report = transform_rows(&state.rules, &sheet_rows.rows);
    tracing::info!(
        rows = sheet_rows.rows.len(),
        records = report.records.len(),
        warnings = report.warning_count,
        "previewed sheet"
    );
    ok(
        &req.id,
        json!({
            "sheet": sheet_rows.sheet,
            "headerRow": sheet_rows.header_row,
            "totalRows": total_rows,
            "truncated": total_rows > sheet_rows.rows.len(),
            "headers": report.headers,
            "records": report.records,
            "skippedBlankRows": report.skipped_blank_rows,
            "warningCount": report.warning_count,
        }),
    )
}

pub fn try_handle(state: &mut AppState, req: &Request) -> Option<serde_json::Value> {
    match req.method.as_str() {
        "import.mapHeaders" => Some(handle_map_headers(state, req)),
        "import.normalize" => Some(handle_normalize(state, req)),
        "import.transformRows" => Some(handle_transform_rows(state, req)),
        "import.previewFile" => Some(handle_preview_file(state, req)),
        _ => None,
    }
}
