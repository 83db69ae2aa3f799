//! Gateway configuration.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Base URL used when nothing else is configured (local development server).
pub const DEFAULT_BASE_URL: &str = "http://localhost:5000/api";

/// Environment variable that overrides the configured base URL.
pub const BASE_URL_ENV: &str = "GRADEBOOK_API_URL";

/// Where and how to reach the grading backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GatewayConfig {
    /// Backend base URL, without a trailing slash.
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Per-request timeout in seconds.
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_timeout() -> u64 {
    30
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout(),
        }
    }
}

impl GatewayConfig {
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Self::default()
        }
    }

    /// Base URL with any trailing slash removed.
    pub fn normalized_base_url(&self) -> &str {
        self.base_url.trim_end_matches('/')
    }
}

/// Resolve environment variable references like `${VAR_NAME}` in a string.
fn resolve_env_vars(s: &str) -> String {
    let mut result = s.to_string();
    while let Some(start) = result.find("${") {
        if let Some(end) = result[start..].find('}') {
            let var_name = &result[start + 2..start + end];
            let value = std::env::var(var_name).unwrap_or_default();
            result = format!(
                "{}{}{}",
                &result[..start],
                value,
                &result[start + end + 1..]
            );
        } else {
            break;
        }
    }
    result
}

/// Load configuration from well-known paths.
///
/// Search order:
/// 1. `gradebook.toml` in the current directory
/// 2. `~/.config/gradebook/config.toml`
///
/// `GRADEBOOK_API_URL` overrides the base URL from either file.
pub fn load_config() -> Result<GatewayConfig> {
    load_config_from(None)
}

/// Load config from an explicit path, or search the default locations.
pub fn load_config_from(path: Option<&Path>) -> Result<GatewayConfig> {
    let config_path = if let Some(p) = path {
        if p.exists() {
            Some(p.to_path_buf())
        } else {
            anyhow::bail!("config file not found: {}", p.display());
        }
    } else {
        let local = PathBuf::from("gradebook.toml");
        if local.exists() {
            Some(local)
        } else {
            dirs_path()
                .map(|home| home.join("config.toml"))
                .filter(|global| global.exists())
        }
    };

    let mut config = match config_path {
        Some(path) => {
            let content = std::fs::read_to_string(&path)
                .with_context(|| format!("failed to read config: {}", path.display()))?;
            toml::from_str::<GatewayConfig>(&content)
                .with_context(|| format!("failed to parse config: {}", path.display()))?
        }
        None => GatewayConfig::default(),
    };

    if let Ok(url) = std::env::var(BASE_URL_ENV) {
        if !url.trim().is_empty() {
            config.base_url = url;
        }
    }
    config.base_url = resolve_env_vars(&config.base_url);

    anyhow::ensure!(
        config.timeout_secs >= 1,
        "timeout_secs must be at least 1"
    );

    Ok(config)
}

fn dirs_path() -> Option<PathBuf> {
    std::env::var("HOME")
        .ok()
        .map(|h| PathBuf::from(h).join(".config").join("gradebook"))
}
