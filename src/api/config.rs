//! Backend endpoint configuration.
//!
//! Reads `trace.yaml` and resolves environment variables. Config is the single
//! source of truth for the backend base URL, the optional bearer credential,
//! and request timeouts. A missing file is not an error; the defaults target
//! a local backend.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;

use super::errors::ApiError;

/// Config file name searched for from the working directory upward.
const CONFIG_FILE: &str = "trace.yaml";

// ─── Public Types ────────────────────────────────────────────────────────────

/// Client-side settings for the TRACE backend.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiConfig {
    /// Backend base URL, no trailing slash.
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Optional bearer credential attached to every request. Supports
    /// `${VAR}` interpolation so the token never lives in the file.
    #[serde(default)]
    pub bearer_token: Option<String>,
    /// TCP connect timeout in seconds.
    #[serde(default = "default_connect_timeout_secs")]
    pub connect_timeout_secs: u64,
    /// Total request timeout in seconds.
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
}

fn default_base_url() -> String {
    "http://localhost:8000".to_string()
}
fn default_connect_timeout_secs() -> u64 {
    5
}
fn default_request_timeout_secs() -> u64 {
    30
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            bearer_token: None,
            connect_timeout_secs: default_connect_timeout_secs(),
            request_timeout_secs: default_request_timeout_secs(),
        }
    }
}

impl ApiConfig {
    /// The bearer credential, with blank interpolation results treated as
    /// "no credential" (an unset `${TRACE_API_TOKEN:-}` resolves to "").
    pub fn bearer(&self) -> Option<&str> {
        self.bearer_token
            .as_deref()
            .map(str::trim)
            .filter(|t| !t.is_empty())
    }

    /// TCP connect timeout.
    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_secs)
    }

    /// Total request timeout.
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

// ─── Loading ─────────────────────────────────────────────────────────────────

/// Resolve the config path relative to the project root.
///
/// Searches upward from `start` for `trace.yaml`. Falls back to
/// `TRACE_PROJECT_ROOT` env var if set.
pub fn find_config_path(start: &Path) -> Option<PathBuf> {
    if let Ok(root) = std::env::var("TRACE_PROJECT_ROOT") {
        let candidate = PathBuf::from(&root).join(CONFIG_FILE);
        if candidate.exists() {
            return Some(candidate);
        }
    }

    let mut dir = start.to_path_buf();
    loop {
        let candidate = dir.join(CONFIG_FILE);
        if candidate.exists() {
            return Some(candidate);
        }
        if !dir.pop() {
            break;
        }
    }

    None
}

/// Load and parse the config file.
///
/// Performs environment-variable interpolation on string values matching
/// `${VAR_NAME}` or `${VAR_NAME:-default}`.
pub fn load_api_config(path: &Path) -> Result<ApiConfig, ApiError> {
    let raw = std::fs::read_to_string(path).map_err(|e| ApiError::ConfigError {
        reason: format!("failed to read {}: {e}", path.display()),
    })?;

    let interpolated = interpolate_env_vars(&raw);

    serde_yaml::from_str(&interpolated).map_err(|e| ApiError::ConfigError {
        reason: format!("failed to parse {}: {e}", path.display()),
    })
}

/// Load the config found from `start`, or fall back to defaults.
///
/// A file that exists but does not parse is still an error: silently ignoring
/// a broken config would send requests to the wrong backend.
pub fn load_or_default(start: &Path) -> Result<ApiConfig, ApiError> {
    match find_config_path(start) {
        Some(path) => {
            tracing::debug!(path = %path.display(), "loading config");
            load_api_config(&path)
        }
        None => Ok(ApiConfig::default()),
    }
}

// ─── Env-var interpolation ───────────────────────────────────────────────────

/// Replace `${VAR}` and `${VAR:-default}` in a string.
fn interpolate_env_vars(input: &str) -> String {
    let mut result = String::with_capacity(input.len());
    let mut chars = input.chars().peekable();

    while let Some(ch) = chars.next() {
        if ch == '$' && chars.peek() == Some(&'{') {
            chars.next(); // consume '{'
            let mut var_expr = String::new();
            for c in chars.by_ref() {
                if c == '}' {
                    break;
                }
                var_expr.push(c);
            }
            result.push_str(&resolve_var_expr(&var_expr));
        } else {
            result.push(ch);
        }
    }

    result
}

/// Resolve a variable expression like `VAR` or `VAR:-default`.
fn resolve_var_expr(expr: &str) -> String {
    if let Some(idx) = expr.find(":-") {
        let var_name = &expr[..idx];
        let default = &expr[idx + 2..];
        std::env::var(var_name).unwrap_or_else(|_| expand_tilde(default))
    } else {
        std::env::var(expr).unwrap_or_default()
    }
}

/// Expand a leading `~` to the user's home directory.
fn expand_tilde(path: &str) -> String {
    if let Some(rest) = path.strip_prefix('~') {
        if let Some(home) = dirs::home_dir() {
            return format!("{}{rest}", home.display());
        }
    }
    path.to_string()
}

// ─── Tests ───────────────────────────────────────────────────────────────────
