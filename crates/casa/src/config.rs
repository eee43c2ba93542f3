//! CLI configuration: `casa_config` plus `GlobalOpts` flag overrides.

use std::path::PathBuf;
use std::time::Duration;

use clap::ValueEnum;

use casa_core::CasaConfig;

use crate::cli::{ColorMode, GlobalOpts, OutputFormat};
use crate::error::CliError;

pub use casa_config::{Config, config_path, load_config_from, save_config_to};

/// Everything a command needs after merging file, env, and flags.
#[derive(Debug)]
pub struct Settings {
    pub casa: CasaConfig,
    pub output: OutputFormat,
    pub color: ColorMode,
    pub quiet: bool,
    pub yes: bool,
}

/// The config file in effect: `--config` / `CASA_CONFIG`, else the default.
pub fn active_path(global: &GlobalOpts) -> PathBuf {
    global.config_file.clone().unwrap_or_else(config_path)
}

/// Load the file and environment, then apply flag overrides.
pub fn load(global: &GlobalOpts) -> Result<(Config, Settings), CliError> {
    let mut cfg = load_config_from(&active_path(global))?;
    apply_overrides(&mut cfg, global);

    let mut casa = cfg.to_casa_config()?;
    if let Some(ms) = global.timeout {
        if ms == 0 {
            return Err(CliError::Validation {
                field: "timeout".into(),
                reason: "must be greater than zero".into(),
            });
        }
        casa.request_timeout = Duration::from_millis(ms);
    }

    let settings = Settings {
        casa,
        output: match global.output {
            Some(output) => output,
            None => parse_enum("output", &cfg.output)?,
        },
        color: match global.color {
            Some(color) => color,
            None => parse_enum("color", &cfg.color)?,
        },
        quiet: global.quiet,
        yes: global.yes,
    };
    Ok((cfg, settings))
}

/// Fold `--api-url`, `--fallback`, and `--no-fallbacks` into the file config.
pub fn apply_overrides(cfg: &mut Config, global: &GlobalOpts) {
    if let Some(url) = &global.api_url {
        cfg.api_url.clone_from(url);
    }
    if !global.fallbacks.is_empty() {
        cfg.fallback_hosts.clone_from(&global.fallbacks);
    }
    if global.no_fallbacks {
        cfg.default_fallbacks = false;
        if global.fallbacks.is_empty() {
            cfg.fallback_hosts.clear();
        }
    }
}

fn parse_enum<E: ValueEnum>(field: &str, raw: &str) -> Result<E, CliError> {
    E::from_str(raw, true).map_err(|reason| CliError::Validation {
        field: field.into(),
        reason,
    })
}
