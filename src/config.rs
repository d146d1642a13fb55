use crate::api::{DEFAULT_BASE_URL, DEFAULT_TIMEOUT};
use anyhow::{anyhow, Context, Result};
use std::env;
use std::time::Duration;

const DEFAULT_PORT: u16 = 3000;

#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub scratch_api_base_url: String,
    pub upstream_timeout: Duration,
    /// Normalized mount prefix, empty when the API lives at the root.
    pub base_path: String,
    pub log_dir: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        let port = match env::var("PORT") {
            Ok(value) => value
                .trim()
                .parse::<u16>()
                .with_context(|| format!("PORT must be a port number, got {value:?}"))?,
            Err(_) => DEFAULT_PORT,
        };

        let upstream_timeout = match env::var("UPSTREAM_TIMEOUT_SECS") {
            Ok(value) => {
                let secs = value.trim().parse::<u64>().with_context(|| {
                    format!("UPSTREAM_TIMEOUT_SECS must be a whole number, got {value:?}")
                })?;
                if secs == 0 {
                    return Err(anyhow!("UPSTREAM_TIMEOUT_SECS must be greater than zero"));
                }
                Duration::from_secs(secs)
            }
            Err(_) => DEFAULT_TIMEOUT,
        };

        Ok(Self {
            port,
            scratch_api_base_url: env::var("SCRATCH_API_BASE_URL")
                .unwrap_or_else(|_| DEFAULT_BASE_URL.to_string()),
            upstream_timeout,
            base_path: normalize_base_path(&env::var("BASE_PATH").unwrap_or_default()),
            log_dir: env::var("LOG_DIR").unwrap_or_else(|_| "logs".to_string()),
        })
    }
}

/// `""`, `"/"` and blanks mean no prefix; otherwise exactly one leading
/// slash and no trailing ones.
pub fn normalize_base_path(value: &str) -> String {
    let trimmed = value.trim();
    if trimmed.is_empty() || trimmed == "/" {
        return String::new();
    }

    let prefixed = if trimmed.starts_with('/') {
        trimmed.to_string()
    } else {
        format!("/{trimmed}")
    };
    prefixed.trim_end_matches('/').to_string()
}
