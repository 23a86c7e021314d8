//! Clap derive structures for the `sidepanel` CLI.
//!
//! Defines the command tree, global flags, and shared types.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

// ── Top-Level CLI ────────────────────────────────────────────────────

/// sidepanel -- drive browser side panel settings from the command line
#[derive(Debug, Parser)]
#[command(
    name = "sidepanel",
    version,
    about = "Inspect and change side panel settings for a browser profile",
    long_about = "Toggle and query the assistant entry in the side panel, reset\n\
        assistant settings, list assistant models, and look up layout constants.\n\n\
        `sidepanel serve` speaks the settings page protocol as JSON lines on\n\
        stdin/stdout.",
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
    /// Browser profile to use
    #[arg(long, short = 'p', env = "SIDEPANEL_PROFILE", global = true)]
    pub profile: Option<String>,

    /// Config file (overrides the platform default location)
    #[arg(long, env = "SIDEPANEL_CONFIG", global = true)]
    pub config: Option<PathBuf>,

    /// Preferences file (overrides the profile's location)
    #[arg(long, env = "SIDEPANEL_PREFS", global = true)]
    pub prefs: Option<PathBuf>,

    /// Output format [default: table, or `defaults.output` from config]
    #[arg(long, short = 'o', env = "SIDEPANEL_OUTPUT", global = true)]
    pub output: Option<OutputFormat>,

    /// When to use color output
    #[arg(long, default_value = "auto", global = true)]
    pub color: ColorMode,

    /// Use touch-optimized layout values
    #[arg(long, global = true)]
    pub touch: bool,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(long, short = 'v', action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Emit logs as JSON on stderr
    #[arg(long, global = true)]
    pub log_json: bool,

    /// Suppress non-error output
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,
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

#[derive(Debug, Clone, Copy, ValueEnum)]
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
    /// Show or hide the assistant entry
    #[command(alias = "t")]
    Toggle,

    /// Report whether the assistant entry is visible
    #[command(alias = "vis")]
    Visibility,

    /// Restore the assistant entry and clear assistant preferences
    Reset,

    /// List assistant models in display order
    #[command(alias = "m")]
    Models,

    /// Look up branded layout constants
    Layout(LayoutArgs),

    /// List feature flags and their resolved state
    Features,

    /// List profile preferences with their effective values
    Prefs,

    /// Serve settings page requests as JSON lines on stdin/stdout
    Serve,

    /// Manage CLI configuration
    Config(ConfigArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

// ── Subcommand Arguments ─────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct LayoutArgs {
    /// Constant name, e.g. TAB_HEIGHT. Lists every constant when omitted.
    pub name: Option<String>,
}

#[derive(Debug, Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Print the config file location
    Path,

    /// Display current resolved configuration
    Show,

    /// Write the resolved configuration to the config file
    Init,
}

#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    pub shell: clap_complete::Shell,
}
