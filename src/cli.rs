// src/cli.rs

//! CLI argument parsing using `clap`.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

use crate::config::default_config_path;

/// Command-line arguments for `wslctl`.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "wslctl",
    version,
    about = "Manage Linux environments through the WSL front end.",
    long_about = None
)]
pub struct CliArgs {
    /// Path to the config file (TOML). A missing file means defaults.
    #[arg(long, value_name = "PATH", default_value_os_t = default_config_path())]
    pub config: PathBuf,

    /// Target environment; overrides `[config].default_environment`.
    #[arg(short = 'd', long, value_name = "NAME", global = true)]
    pub environment: Option<String>,

    /// Timeout for this call in milliseconds; overrides the configured
    /// budget for the command.
    #[arg(long, value_name = "MS", global = true)]
    pub timeout_ms: Option<u64>,

    /// Logging level (error, warn, info, debug, trace).
    ///
    /// If omitted, `WSLCTL_LOG` or a default level will be used.
    #[arg(long, value_enum, value_name = "LEVEL", global = true)]
    pub log_level: Option<LogLevel>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// List environments from the catalog.
    List {
        /// Also show names matched by `[catalog].exclude`.
        #[arg(long)]
        all: bool,
    },
    /// Check that the subsystem and the VM platform are enabled.
    Probe,
    /// Remove a directory (recursively) inside the environment.
    Rmdir { dir: String },
    /// Create a directory inside the environment.
    Mkdir { dir: String },
    /// Mark a file executable inside the environment.
    Chmod { path: String },
    /// Launch an executable inside the environment.
    Launch { path: String },
    /// Run a program inside the environment.
    ///
    /// Arguments are passed through unchanged. With `--shell` they are joined
    /// into one line for `sh -c`, so pipes and redirections work.
    Exec {
        /// Run as root.
        #[arg(long)]
        root: bool,

        /// Interpret the command through the remote shell.
        #[arg(long)]
        shell: bool,

        #[arg(required = true, trailing_var_arg = true, allow_hyphen_values = true)]
        command: Vec<String>,
    },
    /// Run the `[provision].commands` as root, stopping at the first failure.
    Provision {
        /// Print the composed command lines without running them.
        #[arg(long)]
        dry_run: bool,
    },
}

/// Log level as exposed on the CLI.
#[derive(Debug, Copy, Clone, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// Convenience wrapper around `CliArgs::parse()`.
pub fn parse() -> CliArgs {
    CliArgs::parse()
}
