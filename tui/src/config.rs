use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::Context;
use serde::Deserialize;

use crate::cli::Cli;

/// Looked up in the working directory when `--config` is not given.
pub const DEFAULT_CONFIG_FILE: &str = "task-view.toml";

pub const DEFAULT_BASE_URL: &str = "http://localhost:30080";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum BackendKind {
    /// The REST resource at `base_url`.
    Remote,
    /// In-memory placeholder rows.
    Fixture,
}

#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct AppConfig {
    pub base_url: String,
    pub backend: BackendKind,
    pub fixture_latency_ms: u64,
    pub log_file: Option<PathBuf>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            backend: BackendKind::Fixture,
            fixture_latency_ms: 500,
            log_file: None,
        }
    }
}

impl AppConfig {
    pub fn fixture_latency(&self) -> Duration {
        Duration::from_millis(self.fixture_latency_ms)
    }

    /// Command-line flags win over the file.
    pub fn apply_cli(&mut self, cli: &Cli) {
        if let Some(base_url) = &cli.base_url {
            self.base_url = base_url.clone();
        }
        if let Some(backend) = cli.backend {
            self.backend = backend;
        }
        if let Some(log_file) = &cli.log_file {
            self.log_file = Some(log_file.clone());
        }
    }
}

/// Priority: explicit path, then `./task-view.toml`, then defaults.
pub fn load(path: Option<&Path>) -> anyhow::Result<AppConfig> {
    let path = match path {
        Some(path) => path,
        None => {
            let local = Path::new(DEFAULT_CONFIG_FILE);
            if !local.exists() {
                return Ok(AppConfig::default());
            }
            local
        }
    };
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read config {}", path.display()))?;
    parse(&raw).with_context(|| format!("invalid config {}", path.display()))
}

pub fn parse(raw: &str) -> anyhow::Result<AppConfig> {
    Ok(toml::from_str(raw)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn empty_file_yields_defaults() {
        let config = parse("").unwrap();
        assert_eq!(config, AppConfig::default());
        assert_eq!(config.base_url, "http://localhost:30080");
        assert_eq!(config.fixture_latency(), Duration::from_millis(500));
    }

    #[test]
    fn file_values_override_defaults() {
        let config = parse(
            r#"
            base_url = "http://tasks.internal:8080"
            backend = "remote"
            log_file = "task-view.log"
            "#,
        )
        .unwrap();
        assert_eq!(config.backend, BackendKind::Remote);
        assert_eq!(config.base_url, "http://tasks.internal:8080");
        assert_eq!(config.fixture_latency_ms, 500);
        assert_eq!(config.log_file, Some(PathBuf::from("task-view.log")));
    }

    #[test]
    fn unknown_backend_is_rejected() {
        assert!(parse(r#"backend = "carrier-pigeon""#).is_err());
    }

    #[test]
    fn flags_override_file() {
        let mut config = parse(r#"backend = "fixture""#).unwrap();
        let cli = Cli::parse_from(["task-view", "--backend", "remote", "--base-url", "http://127.0.0.1:9000"]);
        config.apply_cli(&cli);
        assert_eq!(config.backend, BackendKind::Remote);
        assert_eq!(config.base_url, "http://127.0.0.1:9000");
        assert_eq!(config.log_file, None);
    }

    #[test]
    fn missing_explicit_file_is_an_error() {
        let err = load(Some(Path::new("/nonexistent/task-view.toml"))).unwrap_err();
        assert!(err.to_string().contains("failed to read config"));
    }
}
