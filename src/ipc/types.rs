use std::path::PathBuf;

use crate::config::DaemonConfig;
use crate::import::ImportRules;
use serde::Deserialize;

#[derive(Debug, Deserialize, Clone)]
pub struct Request {
    pub id: String,
    pub method: String,
    #[serde(default)]
    pub params: serde_json::Value,
}

pub struct AppState {
    pub rules: ImportRules,
    /// Last rules file merged into `rules`, if any.
    pub rules_path: Option<PathBuf>,
    pub max_rows: usize,
}

impl AppState {
    pub fn new(config: &DaemonConfig) -> Self {
        let mut state = AppState {
            rules: ImportRules::default(),
            rules_path: None,
            max_rows: config.max_rows,
        };
        // A broken rules file must not keep the sidecar from starting.
        if let Some(path) = &config.rules_path {
            match state.rules.load_file(path) {
                Ok(()) => {
                    tracing::info!(path = %path.display(), "loaded import rules");
                    state.rules_path = Some(path.clone());
                }
                Err(e) => {
                    tracing::warn!(path = %path.display(), "keeping built-in rules: {e:#}");
                }
            }
        }
        state
    }
}
