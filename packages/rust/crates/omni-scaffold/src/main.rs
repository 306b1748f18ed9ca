//! omni-scaffold CLI: write one agent service tree into the current directory.
//!
//! Logging: set `RUST_LOG=omni_scaffold=debug` to see per-artifact logs on stderr.

mod cli;

use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use clap::error::ErrorKind;
use tracing_subscriber::EnvFilter;

use omni_roles::RoleRegistry;
use omni_scaffold::{EXIT_USAGE, Materializer, drive, load_scaffold_settings, write_usage};

use crate::cli::Cli;

fn main() -> ExitCode {
    let parsed = Cli::try_parse();

    // Initialize tracing: RUST_LOG overrides; else warnings only
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("omni_scaffold=warn,omni_roles=warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();

    let result = match parsed {
        Ok(cli) => run(&cli),
        Err(err) if matches!(err.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
            let _ = err.print();
            return ExitCode::SUCCESS;
        }
        Err(err) => {
            let _ = err.print();
            usage()
        }
    };

    match result {
        Ok(code) => ExitCode::from(code),
        Err(error) => {
            eprintln!("Error: {error:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> anyhow::Result<u8> {
    let registry = RoleRegistry::builtin().context("built-in role registry is invalid")?;
    let materializer = Materializer::new(registry, load_scaffold_settings())?;
    let output_root = std::env::current_dir().context("failed to resolve current directory")?;

    let mut stdout = std::io::stdout().lock();
    let outcome = drive(cli.role.as_deref(), &output_root, &materializer, &mut stdout)?;
    Ok(outcome.exit_code())
}

/// Command-line errors other than `--help` / `--version` end here.
fn usage() -> anyhow::Result<u8> {
    let registry = RoleRegistry::builtin().context("built-in role registry is invalid")?;
    write_usage(&registry, &mut std::io::stdout().lock())?;
    Ok(EXIT_USAGE)
}
