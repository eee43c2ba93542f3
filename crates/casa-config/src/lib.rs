//! Configuration for the casa CLI.
//!
//! A flat TOML file plus `CASA_*` environment overrides, translated into
//! `casa_core::CasaConfig`. The CLI layers its own flags on top.

use std::path::{Path, PathBuf};
use std::time::Duration;

use directories::ProjectDirs;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use url::Url;

use casa_core::CasaConfig;

/// Environment variable prefix for overrides (`CASA_API_URL`, ...).
pub const ENV_PREFIX: &str = "CASA_";

// ── Error ───────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid {field}: {reason}")]
    Validation { field: String, reason: String },

    #[error("failed to serialize config: {0}")]
    Serialization(#[from] toml::ser::Error),

    #[error("config loading failed: {0}")]
    Figment(Box<figment::Error>),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        Self::Figment(Box::new(err))
    }
}

// ── TOML config ─────────────────────────────────────────────────────

/// On-disk configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct Config {
    /// Preferred backend base URL.
    pub api_url: String,

    /// Extra base URLs tried after `api_url`, before the built-in ones.
    pub fallback_hosts: Vec<String>,

    /// Whether to append the built-in LAN fallback list.
    pub default_fallbacks: bool,

    /// Per-host request deadline.
    pub request_timeout_ms: u64,

    /// Per-host probe deadline.
    pub probe_timeout_ms: u64,

    /// Default output format for the CLI.
    pub output: String,

    /// Color mode: `auto`, `always`, or `never`.
    pub color: String,
}

impl Default for Config {
    fn default() -> Self {
        let runtime = CasaConfig::default();
        Self {
            api_url: runtime.primary.to_string(),
            fallback_hosts: Vec::new(),
            default_fallbacks: true,
            request_timeout_ms: millis(runtime.request_timeout),
            probe_timeout_ms: millis(runtime.probe_timeout),
            output: "table".into(),
            color: "auto".into(),
        }
    }
}

fn millis(d: Duration) -> u64 {
    u64::try_from(d.as_millis()).unwrap_or(u64::MAX)
}

// ── Config file path ────────────────────────────────────────────────

/// Resolve the config file path via XDG / platform conventions.
pub fn config_path() -> PathBuf {
    ProjectDirs::from("mx", "casa", "casa").map_or_else(
        || {
            let mut p = PathBuf::from(std::env::var("HOME").unwrap_or_else(|_| ".".into()));
            p.push(".config");
            p.push("casa");
            p.push("config.toml");
            p
        },
        |dirs| dirs.config_dir().join("config.toml"),
    )
}

// ── Loading and saving ──────────────────────────────────────────────

/// Load from `path` plus environment. A missing file yields the defaults.
pub fn load_config_from(path: &Path) -> Result<Config, ConfigError> {
    let config: Config = Figment::new()
        .merge(Serialized::defaults(Config::default()))
        .merge(Toml::file(path))
        .merge(Env::prefixed(ENV_PREFIX))
        .extract()?;
    Ok(config)
}

/// Serialize to TOML at `path`, creating parent directories.
pub fn save_config_to(cfg: &Config, path: &Path) -> Result<(), ConfigError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, toml::to_string_pretty(cfg)?)?;
    Ok(())
}

// ── Translation ─────────────────────────────────────────────────────

impl Config {
    /// Build the runtime config. Fallback order: `fallback_hosts`, then the
    /// built-in list when `default_fallbacks` is set.
    pub fn to_casa_config(&self) -> Result<CasaConfig, ConfigError> {
        let primary = parse_url("api_url", &self.api_url)?;
        let mut fallbacks = self
            .fallback_hosts
            .iter()
            .map(|h| parse_url("fallback_hosts", h))
            .collect::<Result<Vec<_>, _>>()?;
        if self.default_fallbacks {
            fallbacks.extend(CasaConfig::default().fallbacks);
        }

        Ok(CasaConfig {
            primary,
            fallbacks,
            request_timeout: positive_ms("request_timeout_ms", self.request_timeout_ms)?,
            probe_timeout: positive_ms("probe_timeout_ms", self.probe_timeout_ms)?,
        })
    }
}

fn parse_url(field: &str, raw: &str) -> Result<Url, ConfigError> {
    let url: Url = raw.trim().parse().map_err(|e| ConfigError::Validation {
        field: field.into(),
        reason: format!("'{raw}' is not a URL ({e})"),
    })?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(ConfigError::Validation {
            field: field.into(),
            reason: format!("'{raw}' must use http or https"),
        });
    }
    Ok(url)
}

fn positive_ms(field: &str, ms: u64) -> Result<Duration, ConfigError> {
    if ms == 0 {
        return Err(ConfigError::Validation {
            field: field.into(),
            reason: "must be greater than zero".into(),
        });
    }
    Ok(Duration::from_millis(ms))
}
