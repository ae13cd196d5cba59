//! CLI argument definitions.
//!
//! This module defines all CLI arguments using clap's derive macros.
//! The main entry point is the [`Cli`] struct.

use clap::{Parser, Subcommand};
use clap_complete::Shell;
use std::path::PathBuf;

/// Packmule - fetch sysfetch and everything it needs.
#[derive(Debug, Parser)]
#[command(name = "packmule")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Show verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Minimal output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Enable debug logging
    #[arg(long, global = true)]
    pub debug: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Install sysfetch and its dependencies (default if no command specified)
    Install(InstallArgs),

    /// Report on the host without changing anything
    Check(CheckArgs),

    /// Verify an existing install
    Verify(VerifyArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

/// Arguments for the `install` command.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct InstallArgs {
    /// Download URL (defaults to the official sysfetch script)
    #[arg(long, value_name = "URL")]
    pub url: Option<String>,

    /// Destination path (defaults to /usr/local/bin/sysfetch)
    #[arg(long, value_name = "PATH")]
    pub dest: Option<PathBuf>,

    /// Answer yes to safety prompts
    #[arg(short, long)]
    pub yes: bool,

    /// Never prompt; take safe defaults
    #[arg(long)]
    pub non_interactive: bool,

    /// Treat missing network connectivity as fatal
    #[arg(long)]
    pub strict_network: bool,

    /// Skip dependency installation
    #[arg(long)]
    pub skip_deps: bool,

    /// Skip sensor configuration
    #[arg(long)]
    pub skip_sensors: bool,

    /// Reinstall even if the destination is already up to date
    #[arg(long)]
    pub force: bool,

    /// Allow running without root, for user-writable destinations
    #[arg(long)]
    pub no_root_check: bool,
}

/// Arguments for the `check` command.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct CheckArgs {
    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the `verify` command.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct VerifyArgs {
    /// Output as JSON
    #[arg(long)]
    pub json: bool,

    /// Path of the install to verify (defaults to /usr/local/bin/sysfetch)
    #[arg(long, value_name = "PATH")]
    pub dest: Option<PathBuf>,
}

/// Arguments for the `completions` command.
#[derive(Debug, Clone, clap::Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: Shell,
}
