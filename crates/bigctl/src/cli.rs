//! Clap derive structures for the `bigctl` CLI.
//!
//! Defines the complete command tree, global flags, and shared types.
//! Depends on nothing but clap so `build.rs` can reuse it for man pages.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

// ── Top-Level CLI ────────────────────────────────────────────────────

/// bigctl -- move members in and out of F5 BigIP LTM pools
#[derive(Debug, Parser)]
#[command(
    name = "bigctl",
    version,
    about = "Manage F5 BigIP LTM pool membership from the command line",
    long_about = "Adds and removes pool members through the iControl REST API.\n\n\
        Run without a subcommand for the interactive rollback menu.\n\
        Credentials are read from BIGIP_USER and BIGIP_PASS.",
    propagate_version = true
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalOpts,

    /// Omit to open the interactive menu
    #[command(subcommand)]
    pub command: Option<Command>,
}

// ── Global Options ───────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct GlobalOpts {
    /// Appliance profile to use
    #[arg(long, short = 'p', env = "BIGCTL_PROFILE", global = true)]
    pub profile: Option<String>,

    /// Config file (defaults to the platform config directory)
    #[arg(long, env = "BIGCTL_CONFIG", global = true)]
    pub config: Option<PathBuf>,

    /// Management host, optionally host:port (overrides profile)
    #[arg(long, short = 'H', env = "BIGCTL_HOST", global = true)]
    pub host: Option<String>,

    /// URL scheme for the management interface
    #[arg(long, value_parser = ["http", "https"], global = true)]
    pub protocol: Option<String>,

    /// iControl REST prefix (overrides profile)
    #[arg(long, global = true)]
    pub mgmt_path: Option<String>,

    /// Partition to operate in (overrides profile)
    #[arg(long, short = 'P', env = "BIGCTL_PARTITION", global = true)]
    pub partition: Option<String>,

    /// Output format
    #[arg(long, short = 'o', default_value = "table", global = true)]
    pub output: OutputFormat,

    /// When to use color output
    #[arg(long, default_value = "auto", global = true)]
    pub color: ColorMode,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(long, short = 'v', action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,

    /// Skip confirmation prompts
    #[arg(long, short = 'y', global = true)]
    pub yes: bool,

    /// Accept self-signed TLS certificates
    #[arg(long, short = 'k', global = true)]
    pub insecure: bool,

    /// Request timeout in seconds (overrides profile)
    #[arg(long, global = true)]
    pub timeout: Option<u64>,
}

// ── Output & Color Enums ─────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Pretty table, or pretty JSON for raw responses (default)
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

/// LTM collection an object-level command addresses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum ObjectKind {
    #[default]
    Virtual,
    Pool,
    Node,
}

// ── Top-Level Command Enum ───────────────────────────────────────────

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Add or remove the configured pool members in one batch
    #[command(alias = "m")]
    Migrate(MigrateArgs),

    /// Inspect and toggle virtual servers (or any LTM object with --type)
    #[command(alias = "vs")]
    Virtual(VirtualArgs),

    /// Inspect pools and manage single members
    Pool(PoolArgs),

    /// Manage nodes
    Node(NodeArgs),

    /// Inspect CLI configuration
    Config(ConfigArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

// ── Migrate ──────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct MigrateArgs {
    #[command(subcommand)]
    pub command: MigrateCommand,
}

#[derive(Debug, Subcommand)]
pub enum MigrateCommand {
    /// Add every configured member to its pool
    Add,

    /// Remove every configured member from its pool (asks per member unless --yes)
    Remove,

    /// Show the pools and members a migration would touch
    Plan,
}

// ── Virtual servers ──────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct VirtualArgs {
    #[command(subcommand)]
    pub command: VirtualCommand,
}

/// Shared target for single-object commands.
#[derive(Debug, Args)]
pub struct ObjectTarget {
    /// Object name inside the partition
    pub name: String,

    /// Object collection
    #[arg(long = "type", short = 't', value_enum, default_value = "virtual")]
    pub kind: ObjectKind,
}

#[derive(Debug, Subcommand)]
pub enum VirtualCommand {
    /// List virtual servers as a summary table
    #[command(alias = "ls")]
    List {
        /// Print the raw collection instead of the summary
        #[arg(long)]
        raw: bool,
    },

    /// Show one object
    Get(ObjectTarget),

    /// Show statistics for one object
    Stats(ObjectTarget),

    /// Show attached profiles
    Profiles(ObjectTarget),

    /// Enable an object
    Enable(ObjectTarget),

    /// Disable an object
    Disable(ObjectTarget),

    /// Delete an object
    #[command(alias = "rm")]
    Delete(ObjectTarget),
}

// ── Pools ────────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct PoolArgs {
    #[command(subcommand)]
    pub command: PoolCommand,
}

#[derive(Debug, Subcommand)]
pub enum PoolCommand {
    /// List every pool
    #[command(alias = "ls")]
    List,

    /// Show statistics for a pool
    Stats {
        /// Pool name
        pool: String,
    },

    /// List the members of a pool
    Members {
        /// Pool name
        pool: String,
    },

    /// Show statistics for one pool member
    MemberStats {
        /// Pool name
        pool: String,
        /// Member name, usually address:port
        member: String,
    },

    /// Add one member to a pool
    AddMember {
        /// Pool name
        pool: String,
        /// Member address or node name
        member: String,
        /// Service port
        port: String,
    },

    /// Remove one member from a pool
    RemoveMember {
        /// Pool name
        pool: String,
        /// Member address or node name
        member: String,
        /// Service port
        port: String,
    },
}

// ── Nodes ────────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct NodeArgs {
    #[command(subcommand)]
    pub command: NodeCommand,
}

#[derive(Debug, Subcommand)]
pub enum NodeCommand {
    /// Register a backend address as a node
    Create {
        /// Node name
        name: String,
        /// IP address of the node
        address: String,
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
    /// Display current resolved configuration
    Show,

    /// Print the config file location
    Path,
}

// ── Completions ──────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    pub shell: clap_complete::Shell,
}
