use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

pub const WORKSPACE_ENV: &str = "DEGREETRACK_WORKSPACE";
pub const LOG_ENV: &str = "DEGREETRACK_LOG";
const DEFAULT_LOG_FILTER: &str = "info";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Workspace opened at startup, before any `workspace.select`.
    pub workspace: Option<PathBuf>,
    pub log_filter: String,
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let workspace = non_empty(WORKSPACE_ENV).map(PathBuf::from);
        let log_filter = non_empty(LOG_ENV)
            .or_else(|| non_empty("RUST_LOG"))
            .unwrap_or_else(|| DEFAULT_LOG_FILTER.to_string());
        Self {
            workspace,
            log_filter,
        }
    }
}

/// Logs go to stderr; stdout carries the response stream.
pub fn init_tracing(config: &Config) {
    let filter = EnvFilter::try_new(&config.log_filter)
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |k| map.get(k).cloned()
    }

    #[test]
    fn defaults_without_env() {
        let cfg = Config::from_lookup(lookup(&[]));
        assert_eq!(cfg.workspace, None);
        assert_eq!(cfg.log_filter, "info");
    }

    #[test]
    fn own_log_var_wins_over_rust_log() {
        let cfg = Config::from_lookup(lookup(&[
            ("RUST_LOG", "warn"),
            (LOG_ENV, "debug"),
            (WORKSPACE_ENV, "/tmp/ws"),
        ]));
        assert_eq!(cfg.log_filter, "debug");
        assert_eq!(cfg.workspace, Some(PathBuf::from("/tmp/ws")));

        let cfg = Config::from_lookup(lookup(&[("RUST_LOG", "warn"), (LOG_ENV, "  ")]));
        assert_eq!(cfg.log_filter, "warn");
    }
}
