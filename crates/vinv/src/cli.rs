//! Clap derive structures for the `vinv` CLI.
//!
//! Defines the command tree, global flags, and shared types. Kept free of
//! workspace crate dependencies so `build.rs` can compile it for man pages.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

// ── Top-Level CLI ────────────────────────────────────────────────────

/// vinv -- SD-WAN inventory from vManage or a local backup
#[derive(Debug, Parser)]
#[command(
    name = "vinv",
    version,
    about = "List SD-WAN device inventory from Cisco vManage",
    long_about = "List SD-WAN device inventory and edge certificates from a Cisco vManage\n\
        controller, or from a local backup directory (--workdir), and render\n\
        them as a table, CSV, JSON, YAML or plain identifiers.",
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
    /// Configuration profile to use
    #[arg(long, short = 'p', env = "VMANAGE_PROFILE", global = true)]
    pub profile: Option<String>,

    /// vManage IP address or hostname (overrides profile)
    #[arg(long, short = 'a', env = "VMANAGE_IP", global = true)]
    pub address: Option<String>,

    /// vManage HTTPS port [default: 8443]
    #[arg(long, env = "VMANAGE_PORT", global = true)]
    pub port: Option<u16>,

    /// Username
    #[arg(long, short = 'u', env = "VMANAGE_USER", global = true)]
    pub user: Option<String>,

    /// Password. Without this flag the profile's password_env, the keyring,
    /// then $VMANAGE_PASSWORD are tried in that order
    #[arg(long, global = true)]
    pub password: Option<String>,

    /// Tenant name, for provider accounts in multi-tenant deployments
    #[arg(long, env = "VMANAGE_TENANT", global = true)]
    pub tenant: Option<String>,

    /// REST API timeout in seconds [default: 300]
    #[arg(long, env = "VMANAGE_TIMEOUT", global = true)]
    pub timeout: Option<u64>,

    /// Accept self-signed TLS certificates
    #[arg(long, short = 'k', env = "VMANAGE_INSECURE", global = true)]
    pub insecure: bool,

    /// Read from a local backup directory instead of querying vManage
    #[arg(long, short = 'w', global = true)]
    pub workdir: Option<PathBuf>,

    /// Output format [default: table]
    #[arg(long, short = 'o', global = true)]
    pub output: Option<OutputFormat>,

    /// Also write logs to vinv.log in this directory
    #[arg(long, global = true)]
    pub log_dir: Option<PathBuf>,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(long, short = 'v', action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,
}

// ── Output Enum ──────────────────────────────────────────────────────

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
    /// CSV with a header row
    Csv,
    /// Plain text, one identifier per line (scripting)
    Plain,
}

// ── Top-Level Command Enum ───────────────────────────────────────────

#[derive(Debug, Subcommand)]
pub enum Command {
    /// List devices, optionally filtered
    #[command(alias = "inv", alias = "i")]
    Inventory(InventoryArgs),

    /// List WAN edge certificates
    #[command(alias = "cert")]
    Certificate(CertificateArgs),

    /// Manage CLI configuration and profiles
    Config(ConfigArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

// ── Shared selection / export arguments ──────────────────────────────

/// Hostname selection. The two options are mutually exclusive.
#[derive(Debug, Args)]
pub struct NameArgs {
    /// Keep entries whose name matches this regular expression
    #[arg(long)]
    pub regex: Option<String>,

    /// Keep entries whose name does not match this regular expression
    #[arg(long)]
    pub not_regex: Option<String>,
}

#[derive(Debug, Args)]
pub struct ExportArgs {
    /// Also write the result as CSV to this file
    #[arg(long, value_name = "FILE")]
    pub save_csv: Option<PathBuf>,

    /// Also write the result as JSON to this file
    #[arg(long, value_name = "FILE")]
    pub save_json: Option<PathBuf>,
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  INVENTORY
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct InventoryArgs {
    #[command(flatten)]
    pub name: NameArgs,

    /// Only devices in reachable state
    #[arg(long)]
    pub reachable: bool,

    /// Only devices with this site id
    #[arg(long, value_name = "ID")]
    pub site: Option<String>,

    /// Only the device with this system IP
    #[arg(long, value_name = "IP")]
    pub system_ip: Option<String>,

    /// Only devices of this type (cedge, vedge, vsmart, vbond, vmanage, ...)
    #[arg(long, value_name = "TYPE")]
    pub device_type: Option<String>,

    #[command(flatten)]
    pub export: ExportArgs,
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  CERTIFICATE
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct CertificateArgs {
    // Matched against hostname or chassis number
    #[command(flatten)]
    pub name: NameArgs,

    #[command(flatten)]
    pub export: ExportArgs,
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  CONFIG
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Create initial config file with guided setup
    Init,

    /// Display current configuration (secrets masked)
    Show,

    /// Set a value on the active profile
    Set {
        /// Profile key (address, port, user, password_env, tenant, ...)
        key: String,

        /// Value to set
        value: String,
    },

    /// List configured profiles
    Profiles,

    /// Set the default profile
    Use {
        /// Profile name to set as default
        name: String,
    },

    /// Store a password in the system keyring
    SetPassword {
        /// Profile name
        #[arg(long)]
        profile: Option<String>,
    },

    /// Print the config file path
    Path,
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  COMPLETIONS
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    pub shell: clap_complete::Shell,
}
