//! The scmdoc command-line interface.
//!
//! Parses arguments, sets up logging, and dispatches to the library.

use std::path::{Path, PathBuf};
use std::process;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use crate::cli::args::{BuildOpts, Command, ScmdocArgs};
use crate::config::Config;
use crate::host::{incremental_build, BuildReport};
use crate::session::BuildSession;
use crate::syntax;
use crate::ScmError;

pub mod args;
pub mod output;

/// Config file picked up from the source dir when `--config` is not given.
pub const DEFAULT_CONFIG_FILE: &str = "scmdoc.yaml";

/// The main entry point for the CLI.
pub fn run() {
    let args = ScmdocArgs::parse();
    init_logging(args.verbose);

    let result = match args.command {
        Command::Parse { signature } => handle_parse(&signature),
        Command::Build { opts } => handle_build(&opts),
        Command::Inventory { opts, json } => handle_inventory(&opts, json),
    };

    match result {
        Ok(true) => {}
        Ok(false) => process::exit(1),
        Err(e) => {
            eprintln!("{:?}", miette::Report::new(e));
            process::exit(1);
        }
    }
}

fn init_logging(verbose: u8) {
    // RUST_LOG wins over -v when set.
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(match verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        })
    });
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

fn handle_parse(signature: &str) -> Result<bool, ScmError> {
    let sexp = syntax::parse(signature)?;
    let name = syntax::extract_name(&sexp).map_err(|e| e.with_source("signature", signature))?;
    output::print_parsed(&sexp, Some(name));
    Ok(true)
}

fn handle_build(opts: &BuildOpts) -> Result<bool, ScmError> {
    let (session, report, warnings) = build(opts)?;
    output::print_summary(&report, warnings);
    session.discard();
    Ok(report.is_clean())
}

fn handle_inventory(opts: &BuildOpts, json: bool) -> Result<bool, ScmError> {
    let (session, report, _) = build(opts)?;
    output::print_inventory(session.domain().get_objects(), json)?;
    session.discard();
    Ok(report.is_clean())
}

fn build(opts: &BuildOpts) -> Result<(BuildSession, BuildReport, usize), ScmError> {
    let mut config = load_config(&opts.srcdir, opts.config.as_deref())?;
    config.nitpicky |= opts.nitpicky;
    let env_file = opts
        .env
        .clone()
        .unwrap_or_else(|| resolve_env_path(&opts.srcdir, &config.env_file));

    let mut sink = output::StderrSink::new();
    let (session, report) = incremental_build(&opts.srcdir, &env_file, config, &mut sink)?;
    for err in &report.skipped {
        output::print_error(err);
    }
    Ok((session, report, sink.count))
}

fn load_config(srcdir: &Path, explicit: Option<&Path>) -> Result<Config, ScmError> {
    match explicit {
        Some(path) => Config::load(path),
        None => {
            let default = srcdir.join(DEFAULT_CONFIG_FILE);
            if default.is_file() {
                Config::load(&default)
            } else {
                Ok(Config::default())
            }
        }
    }
}

fn resolve_env_path(srcdir: &Path, env_file: &Path) -> PathBuf {
    if env_file.is_absolute() {
        env_file.to_path_buf()
    } else {
        srcdir.join(env_file)
    }
}
