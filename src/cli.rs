//! CLI argument parser for kill-others
//!
//! Provides type-safe argument parsing using clap derive.

use clap::Parser;

/// Execution mode determined from CLI arguments
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExecutionMode {
    /// Sweep duplicates of this process
    Sweep {
        /// Report matches without signaling them
        dry_run: bool,
    },
    /// Print this process's resolved name and exit
    ShowName,
}

/// CLI arguments for kill-others
#[derive(Parser, Debug)]
#[command(
    name = "kill-others",
    version,
    about = "Kills duplicate instances of this program",
    long_about = "Walks /proc for processes that share this process's owner and command-line\n\
                  name, and SIGKILLs every one of them with retries and confirmation.\n\
                  Other users' processes are never signaled."
)]
pub struct CliArgs {
    /// Dry run mode (report duplicates without signaling them)
    #[arg(short = 'n', long)]
    pub dry_run: bool,

    /// Print this process's resolved name instead of sweeping
    #[arg(long)]
    pub show_name: bool,

    /// Suppress the sweep report on stdout
    #[arg(short, long)]
    pub quiet: bool,
}

impl CliArgs {
    /// Parse CLI arguments from command line
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Determine the execution mode
    ///
    /// --show-name wins over the sweep flags; combining it with --dry-run
    /// is accepted and the sweep flags are ignored.
    pub fn mode(&self) -> ExecutionMode {
        if self.show_name {
            ExecutionMode::ShowName
        } else {
            ExecutionMode::Sweep {
                dry_run: self.dry_run,
            }
        }
    }
}
