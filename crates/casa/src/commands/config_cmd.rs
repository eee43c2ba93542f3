//! Config subcommand handlers.

use crate::cli::{ConfigArgs, ConfigCommand, GlobalOpts};
use crate::config::{self, Config};
use crate::error::CliError;
use crate::output;

pub fn handle(args: ConfigArgs, global: &GlobalOpts) -> Result<(), CliError> {
    match args.command {
        ConfigCommand::Show => {
            let (cfg, settings) = config::load(global)?;
            let out = output::render_single(settings.output, &cfg, to_toml, |c| c.api_url.clone());
            output::print_output(&out, settings.quiet);
            Ok(())
        }

        ConfigCommand::Path => {
            output::print_output(&config::active_path(global).display().to_string(), global.quiet);
            Ok(())
        }

        ConfigCommand::Init { force } => {
            let path = config::active_path(global);
            if path.exists() && !force {
                return Err(CliError::ConfigExists {
                    path: path.display().to_string(),
                });
            }

            let mut cfg = Config::default();
            config::apply_overrides(&mut cfg, global);
            if let Some(ms) = global.timeout {
                cfg.request_timeout_ms = ms;
            }
            // Refuse to write something that would not load back.
            cfg.to_casa_config()?;

            config::save_config_to(&cfg, &path)?;
            output::print_status(
                &format!("Configuration written to {}", path.display()),
                global.quiet,
            );
            Ok(())
        }
    }
}

fn to_toml(cfg: &Config) -> String {
    toml::to_string_pretty(cfg).unwrap_or_else(|e| format!("<serialization failed: {e}>"))
}
