use std::path::PathBuf;

pub const RULES_ENV: &str = "LMSIMPORTD_RULES";
pub const MAX_ROWS_ENV: &str = "LMSIMPORTD_MAX_ROWS";
pub const DEFAULT_MAX_ROWS: usize = 5000;

#[derive(Debug, Clone)]
pub struct DaemonConfig {
    /// Rules file merged over the built-in tables at startup.
    pub rules_path: Option<PathBuf>,
    /// Upper bound on rows per transform/preview request.
    pub max_rows: usize,
}

impl Default for DaemonConfig {
    fn default() -> Self {
        DaemonConfig {
            rules_path: None,
            max_rows: DEFAULT_MAX_ROWS,
        }
    }
}

impl DaemonConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let rules_path = lookup(RULES_ENV)
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
            .map(PathBuf::from);

        let max_rows = match lookup(MAX_ROWS_ENV) {
            None => DEFAULT_MAX_ROWS,
            Some(raw) => match raw.trim().parse::<usize>() {
                Ok(n) if n > 0 => n,
                _ => {
                    tracing::warn!(value = %raw, "ignoring invalid {MAX_ROWS_ENV}");
                    DEFAULT_MAX_ROWS
                }
            },
        };

        DaemonConfig {
            rules_path,
            max_rows,
        }
    }
}
