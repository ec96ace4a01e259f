//! Command-line arguments and subcommands for the scmdoc CLI.

use clap::{ArgAction, Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(
    name = "scmdoc",
    version,
    about = "Read Scheme signatures and cross-reference them across documentation sources."
)]
pub struct ScmdocArgs {
    /// More log output (-v: info, -vv: debug, -vvv: trace).
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Parse one signature and print its normalized form and name.
    Parse {
        /// Signature text, e.g. "(make-foo bar baz)".
        #[arg(required = true)]
        signature: String,
    },
    /// Incrementally build a source directory and report warnings.
    Build {
        #[command(flatten)]
        opts: BuildOpts,
    },
    /// Build, then list every registered object.
    Inventory {
        #[command(flatten)]
        opts: BuildOpts,
        /// Print the inventory as JSON.
        #[arg(long)]
        json: bool,
    },
}

#[derive(Debug, Args)]
pub struct BuildOpts {
    /// Directory containing documentation sources.
    #[arg(required = true)]
    pub srcdir: PathBuf,
    /// Saved environment (default: <SRCDIR>/.scmdoc-env.json).
    #[arg(long)]
    pub env: Option<PathBuf>,
    /// YAML config file (default: <SRCDIR>/scmdoc.yaml if present).
    #[arg(long)]
    pub config: Option<PathBuf>,
    /// Warn about every unresolved reference.
    #[arg(short = 'n', long)]
    pub nitpicky: bool,
}
