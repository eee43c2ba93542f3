mod cli;
mod commands;
mod config;
mod error;
mod output;

use clap::Parser;
use tracing::{debug, warn};
use tracing_subscriber::EnvFilter;

use casa_core::Casa;

use crate::cli::{Cli, Command};
use crate::error::{CliError, During};

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    init_tracing(cli.global.verbose);

    if let Err(err) = run(cli).await {
        let code = err.exit_code();
        eprintln!("{:?}", miette::Report::new(err));
        std::process::exit(code);
    }
}

fn init_tracing(verbosity: u8) {
    let filter = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

async fn run(cli: Cli) -> Result<(), CliError> {
    match cli.command {
        // Config commands don't need a backend
        Command::Config(args) => commands::config_cmd::handle(args, &cli.global),

        Command::Completions(args) => {
            use clap::CommandFactory;
            use clap_complete::generate;

            let mut cmd = Cli::command();
            generate(args.shell, &mut cmd, "casa", &mut std::io::stdout());
            Ok(())
        }

        Command::Endpoints => {
            let (_, settings) = config::load(&cli.global)?;
            commands::connection::list_endpoints(&settings);
            Ok(())
        }

        cmd => {
            let (_, settings) = config::load(&cli.global)?;
            let casa = Casa::new(settings.casa.clone()).during("start the client")?;

            // Ctrl-C cancels in-flight requests instead of killing the process
            let interrupt = casa.clone();
            let watcher = tokio::spawn(async move {
                if tokio::signal::ctrl_c().await.is_ok() {
                    warn!("interrupted, cancelling requests");
                    interrupt.shutdown();
                }
            });

            debug!(command = ?cmd, "dispatching command");
            let result = commands::dispatch(cmd, &casa, &settings).await;
            watcher.abort();
            result
        }
    }
}
