//! Global user configuration (`~/.ctxdocs/config.toml`).
//!
//! The global configuration holds settings that belong to the user rather than
//! the project: network endpoints, the documentation API key, and fetch
//! limits. It is never committed to version control and is saved with owner
//! read/write permissions only, since it may carry a credential.
//!
//! The location can be overridden with the `CTXDOCS_CONFIG_PATH` environment
//! variable. A missing file yields the defaults.
//!
//! ```toml
//! [network]
//! docs_url = "https://context7.com/api/v1"
//! registry_url = "https://registry.npmjs.org"
//! api_key = "ctx7sk-..."
//! max_concurrency = 5
//! timeout_ms = 5000
//! ```

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tokio::fs;

use crate::constants::{
    DEFAULT_DOCS_URL, DEFAULT_FETCH_TIMEOUT_MS, DEFAULT_MAX_CONCURRENCY, DEFAULT_REGISTRY_URL,
};

/// Environment variable overriding the global configuration path.
pub const CONFIG_PATH_ENV: &str = "CTXDOCS_CONFIG_PATH";

/// Global configuration for ctxdocs.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GlobalConfig {
    /// Network settings
    #[serde(default)]
    pub network: NetworkConfig,
}

/// Endpoints and limits for remote lookups.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NetworkConfig {
    /// Documentation source base URL
    #[serde(default = "default_docs_url")]
    pub docs_url: String,

    /// Package registry base URL
    #[serde(default = "default_registry_url")]
    pub registry_url: String,

    /// Bearer token for the documentation source
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,

    /// Maximum lookups in flight
    #[serde(default = "default_max_concurrency")]
    pub max_concurrency: usize,

    /// Per-lookup timeout in milliseconds
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
}

fn default_docs_url() -> String {
    DEFAULT_DOCS_URL.to_string()
}

fn default_registry_url() -> String {
    DEFAULT_REGISTRY_URL.to_string()
}

const fn default_max_concurrency() -> usize {
    DEFAULT_MAX_CONCURRENCY
}

const fn default_timeout_ms() -> u64 {
    DEFAULT_FETCH_TIMEOUT_MS
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self {
            docs_url: default_docs_url(),
            registry_url: default_registry_url(),
            api_key: None,
            max_concurrency: DEFAULT_MAX_CONCURRENCY,
            timeout_ms: DEFAULT_FETCH_TIMEOUT_MS,
        }
    }
}

/// Keys accepted by [`NetworkConfig::set`].
pub const NETWORK_KEYS: &[&str] =
    &["docs_url", "registry_url", "api_key", "max_concurrency", "timeout_ms"];

impl NetworkConfig {
    /// Per-lookup timeout.
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    /// Set one field from its textual value. An empty `api_key` clears it.
    ///
    /// # Errors
    ///
    /// Fails for unknown keys, non-numeric or zero limits, and URLs without an
    /// `http://` or `https://` scheme.
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        match key {
            "docs_url" => self.docs_url = parse_url(key, value)?,
            "registry_url" => self.registry_url = parse_url(key, value)?,
            "api_key" => {
                self.api_key = Some(value.to_string()).filter(|v| !v.is_empty());
            }
            "max_concurrency" => self.max_concurrency = parse_positive(key, value)?,
            "timeout_ms" => self.timeout_ms = parse_positive(key, value)?,
            _ => anyhow::bail!(
                "Unknown configuration key '{key}' (expected one of: {})",
                NETWORK_KEYS.join(", ")
            ),
        }
        Ok(())
    }

    /// A copy with the API key masked, for display.
    #[must_use]
    pub fn redacted(&self) -> Self {
        Self {
            api_key: self.api_key.as_ref().map(|_| "********".to_string()),
            ..self.clone()
        }
    }
}

fn parse_url(key: &str, value: &str) -> Result<String> {
    let value = value.trim().trim_end_matches('/');
    if !(value.starts_with("http://") || value.starts_with("https://")) {
        anyhow::bail!("{key} must be an http:// or https:// URL, got '{value}'");
    }
    Ok(value.to_string())
}

fn parse_positive<T>(key: &str, value: &str) -> Result<T>
where
    T: std::str::FromStr + PartialEq + Default,
{
    match value.trim().parse::<T>() {
        Ok(parsed) if parsed != T::default() => Ok(parsed),
        _ => anyhow::bail!("{key} must be a positive integer, got '{value}'"),
    }
}

impl GlobalConfig {
    /// Load from the default location, or defaults if no file exists.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub async fn load() -> Result<Self> {
        Self::load_with_optional(None).await
    }

    /// Load from `path` if given, otherwise from the default location.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub async fn load_with_optional(path: Option<PathBuf>) -> Result<Self> {
        let path = match path {
            Some(path) => path,
            None => Self::default_path()?,
        };
        if path.exists() {
            Self::load_from(&path).await
        } else {
            Ok(Self::default())
        }
    }

    /// Load from a specific file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or contains invalid TOML.
    pub async fn load_from(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .await
            .with_context(|| format!("Failed to read global config from {}", path.display()))?;

        toml::from_str(&content)
            .with_context(|| format!("Failed to parse global config from {}", path.display()))
    }

    /// Save to a specific file, creating parent directories.
    ///
    /// On Unix the file is restricted to mode `0600`.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written.
    pub async fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).await.with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        let content = toml::to_string_pretty(self).context("Failed to serialize global config")?;

        fs::write(path, content)
            .await
            .with_context(|| format!("Failed to write global config to {}", path.display()))?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;

            let mut perms = fs::metadata(path)
                .await
                .with_context(|| format!("Failed to read permissions for {}", path.display()))?
                .permissions();
            perms.set_mode(0o600);
            fs::set_permissions(path, perms).await.with_context(|| {
                format!("Failed to set secure permissions on {}", path.display())
            })?;
        }

        Ok(())
    }

    /// Default configuration path.
    ///
    /// `CTXDOCS_CONFIG_PATH` wins; otherwise `~/.ctxdocs/config.toml`, or
    /// `%LOCALAPPDATA%\ctxdocs\config.toml` on Windows.
    ///
    /// # Errors
    ///
    /// Returns an error if the home directory cannot be determined.
    pub fn default_path() -> Result<PathBuf> {
        if let Ok(path) = std::env::var(CONFIG_PATH_ENV)
            && !path.is_empty()
        {
            return Ok(PathBuf::from(path));
        }

        let config_dir = if cfg!(target_os = "windows") {
            dirs::data_local_dir()
                .ok_or_else(|| anyhow::anyhow!("Unable to determine local data directory"))?
                .join("ctxdocs")
        } else {
            dirs::home_dir()
                .ok_or_else(|| anyhow::anyhow!("Unable to determine home directory"))?
                .join(".ctxdocs")
        };

        Ok(config_dir.join("config.toml"))
    }
}
