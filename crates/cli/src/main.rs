// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! `drv`: build compiler-driver jobs from a plan file.

mod commands;
mod exit_error;
mod output;
mod plan;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use crate::exit_error::ExitError;

#[derive(Parser)]
#[command(name = "drv", version, about = "Turn a compiler action graph into concrete jobs")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Build and print the jobs for a plan
    Jobs(commands::jobs::JobsArgs),
    /// Print the file type for an extension
    Type(commands::file_type::TypeArgs),
}

/// Log to stderr, filtered by `DRV_LOG` (default `warn`).
fn init_tracing() {
    let filter = EnvFilter::try_from_env("DRV_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

fn run(cli: Cli) -> anyhow::Result<()> {
    match cli.command {
        Command::Jobs(args) => commands::jobs::handle(args),
        Command::Type(args) => commands::file_type::handle(args),
    }
}

fn main() {
    init_tracing();
    let cli = Cli::parse();
    if let Err(err) = run(cli) {
        let code = match err.downcast_ref::<ExitError>() {
            Some(exit) => exit.code,
            None => 1,
        };
        eprintln!("error: {err:#}");
        std::process::exit(code);
    }
}
