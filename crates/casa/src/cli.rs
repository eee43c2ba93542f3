//! Clap derive structures for the `casa` CLI.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_complete::Shell;

// ── Top-Level CLI ────────────────────────────────────────────────────

/// casa -- control lights and doors on a casa home-automation backend
#[derive(Debug, Parser)]
#[command(
    name = "casa",
    version,
    about = "Control lights and doors on a casa home-automation backend",
    long_about = "Talks to a casa backend that may live at any of several addresses.\n\n\
        Requests try the last host that answered first, then the configured\n\
        URL, then the fallback list, each with its own timeout.",
    propagate_version = true,
    subcommand_required = true,
    arg_required_else_help = true
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalOpts,

    #[command(subcommand)]
    pub command: Command,
}

// ── Global Options ───────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct GlobalOpts {
    /// Config file (defaults to the platform config directory)
    #[arg(long = "config", env = "CASA_CONFIG", global = true)]
    pub config_file: Option<PathBuf>,

    /// Backend base URL, e.g. http://192.168.1.20:4000
    #[arg(long, short = 'u', global = true)]
    pub api_url: Option<String>,

    /// Extra fallback base URL (repeatable)
    #[arg(long = "fallback", global = true)]
    pub fallbacks: Vec<String>,

    /// Only try --api-url and --fallback hosts
    #[arg(long, global = true)]
    pub no_fallbacks: bool,

    /// Per-host request timeout in milliseconds
    #[arg(long, global = true)]
    pub timeout: Option<u64>,

    /// Output format (defaults to the config file's, then table)
    #[arg(long, short = 'o', global = true)]
    pub output: Option<OutputFormat>,

    /// When to use color output
    #[arg(long, global = true)]
    pub color: Option<ColorMode>,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(long, short = 'v', action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,

    /// Skip confirmation prompts
    #[arg(long, short = 'y', global = true)]
    pub yes: bool,
}

// ── Output & Color Enums ─────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Pretty table (default, interactive)
    Table,
    /// Pretty-printed JSON
    Json,
    /// Compact single-line JSON
    JsonCompact,
    /// YAML
    Yaml,
    /// Plain text, one value per line (scripting)
    Plain,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ColorMode {
    /// Auto-detect (color if terminal is interactive)
    Auto,
    /// Always emit color codes
    Always,
    /// Never emit color codes
    Never,
}

// ── Top-Level Command Enum ───────────────────────────────────────────

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Check credentials against the backend
    Login(LoginArgs),

    /// Create a user account
    Register(RegisterArgs),

    /// Manage user accounts
    #[command(alias = "u")]
    Users(UsersArgs),

    /// List and switch lights
    #[command(alias = "l")]
    Lights(LightsArgs),

    /// List and move doors
    #[command(alias = "d")]
    Doors(DoorsArgs),

    /// Lights and doors at a glance
    Overview,

    /// Find a reachable backend
    Ping,

    /// Forget the remembered host, probe again, and show the candidates
    Diagnose,

    /// List the backend endpoints this tool uses
    Endpoints,

    /// Manage CLI configuration
    Config(ConfigArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

// ── Users ────────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct LoginArgs {
    /// Account email
    pub email: String,

    /// Password (prompted for when omitted)
    #[arg(long, env = "CASA_PASSWORD", hide_env_values = true)]
    pub password: Option<String>,
}

#[derive(Debug, Args)]
pub struct RegisterArgs {
    /// Display name
    pub name: String,

    /// Account email
    pub email: String,

    /// Password (prompted for when omitted)
    #[arg(long, env = "CASA_PASSWORD", hide_env_values = true)]
    pub password: Option<String>,

    /// Account status (backend default: activo)
    #[arg(long)]
    pub status: Option<String>,
}

#[derive(Debug, Args)]
pub struct UsersArgs {
    #[command(subcommand)]
    pub command: UsersCommand,
}

#[derive(Debug, Subcommand)]
pub enum UsersCommand {
    /// List user accounts
    #[command(alias = "ls")]
    List,

    /// Delete a user account
    #[command(alias = "rm")]
    Delete {
        /// User ID
        id: i64,
    },
}

// ── Lights ───────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct LightsArgs {
    #[command(subcommand)]
    pub command: LightsCommand,
}

#[derive(Debug, Subcommand)]
pub enum LightsCommand {
    /// List all lights
    #[command(alias = "ls")]
    List,

    /// Show one light
    Get {
        /// Light ID
        id: i64,
    },

    /// Switch a light on
    On {
        /// Light ID
        id: i64,
    },

    /// Switch a light off
    Off {
        /// Light ID
        id: i64,
    },

    /// Flip a light's current state
    Toggle {
        /// Light ID
        id: i64,
    },

    /// List lights at a location
    At {
        /// Location name, e.g. "Sala"
        location: String,
    },
}

// ── Doors ────────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct DoorsArgs {
    #[command(subcommand)]
    pub command: DoorsCommand,
}

#[derive(Debug, Subcommand)]
pub enum DoorsCommand {
    /// List all doors
    #[command(alias = "ls")]
    List,

    /// Show one door
    Get {
        /// Door ID
        id: i64,
    },

    /// Open (unlock) a door
    #[command(alias = "unlock")]
    Open {
        /// Door ID
        id: i64,
    },

    /// Close (lock) a door
    #[command(alias = "lock")]
    Close {
        /// Door ID
        id: i64,
    },

    /// Flip a door's current state
    Toggle {
        /// Door ID
        id: i64,
    },

    /// List doors of a given type
    OfType {
        /// Door type, e.g. "principal"
        door_type: String,
    },
}

// ── Config ───────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Print the effective configuration
    Show,

    /// Print the config file path
    Path,

    /// Write a config file (stores --api-url and --fallback when given)
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Target shell
    pub shell: Shell,
}
