use crate::import::ImportRules;
use crate::ipc::error::{err, ok};
use crate::ipc::types::{AppState, Request};
use serde_json::json;
use std::path::PathBuf;

fn handle_rules_get(state: &mut AppState, req: &Request) -> serde_json::Value {
    ok(
        &req.id,
        json!({
            "rulesPath": state.rules_path.as_ref().map(|p| p.to_string_lossy().to_string()),
            "summary": state.rules.summary(),
            "rules": state.rules.snapshot(),
        }),
    )
}

fn handle_rules_load(state: &mut AppState, req: &Request) -> serde_json::Value {
    let Some(path) = req
        .params
        .get("path")
        .and_then(|v| v.as_str())
        .map(PathBuf::from)
    else {
        return err(&req.id, "bad_params", "missing params.path", None);
    };

    // Load into a copy so a rejected file leaves the active rules alone.
    let mut rules = state.rules.clone();
    if let Err(e) = rules.load_file(&path) {
        return err(
            &req.id,
            "rules_load_failed",
            format!("{e:#}"),
            Some(json!({ "path": path.to_string_lossy() })),
        );
    }

    tracing::info!(path = %path.display(), "loaded import rules");
    state.rules = rules;
    state.rules_path = Some(path.clone());
    ok(
        &req.id,
        json!({
            "rulesPath": path.to_string_lossy(),
            "summary": state.rules.summary(),
        }),
    )
}

fn handle_rules_reset(state: &mut AppState, req: &Request) -> serde_json::Value {
    state.rules = ImportRules::default();
    state.rules_path = None;
    tracing::info!("reset import rules to built-ins");
    ok(&req.id, json!({ "summary": state.rules.summary() }))
}

pub fn try_handle(state: &mut AppState, req: &Request) -> Option<serde_json::Value> {
    match req.method.as_str() {
        "rules.get" => Some(handle_rules_get(state, req)),
        "rules.load" => Some(handle_rules_load(state, req)),
        "rules.reset" => Some(handle_rules_reset(state, req)),
        _ => None,
    }
}
