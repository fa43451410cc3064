//! # confd-cli
//!
//! Command-line front end for confd.
//!
//! Resolves a node of a configuration fragment tree and prints the result as
//! JSON on stdout. Logs and diagnostics go to stderr.

use anyhow::Context;
use clap::{Parser, Subcommand};
use confd_core::error::ConfdError;
use tracing::{error, info};

mod commands;
mod output;

use commands::CommandContext;
use output::errors::ErrorFormatter;

/// Resolve directory trees of configuration fragments
#[derive(Parser)]
#[command(name = "confd", version, about = "Resolve directory trees of configuration fragments")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Root of the configuration tree
    #[arg(
        long = "from",
        value_name = "ROOT",
        global = true,
        env = "CONFD_ROOT",
        default_value = "."
    )]
    pub root: String,

    /// Resolution strategy: LEAVES, BACKCURSION or ARRAY
    #[arg(long, global = true, env = "CONFD_STRATEGY", default_value = "LEAVES")]
    pub strategy: String,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Resolve the node named by SEGMENTS (the root when omitted)
    Get {
        segments: Vec<String>,
        /// Print single-line JSON
        #[arg(long)]
        compact: bool,
    },
    /// List the available strategies
    Strategies,
}

fn main() {
    let cli = Cli::parse();

    setup_logging(cli.verbose);
    setup_panic_handler();

    info!("Starting confd v{}", env!("CARGO_PKG_VERSION"));

    if let Err(err) = run_cli(cli) {
        let formatter = ErrorFormatter::new();
        let message = match err.downcast_ref::<ConfdError>() {
            Some(confd_error) => formatter.format_error(confd_error),
            None => formatter.format_simple(&format!("{:#}", err)),
        };
        eprintln!("{}", message);
        std::process::exit(1);
    }
}

fn run_cli(cli: Cli) -> anyhow::Result<()> {
    // Resolution runs cooperatively on a single thread
    let rt = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("Failed to create async runtime")?;

    rt.block_on(async {
        let ctx = CommandContext::new(&cli.root, &cli.strategy)?;
        commands::dispatch_command(cli.command, &ctx).await
    })
}

fn setup_logging(verbose: bool) {
    let level = if verbose { "debug" } else { "info" };
    // Target prefix "confd" covers confd_cli, confd_core and confd_resolver
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(format!("confd={level}")));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn setup_panic_handler() {
    std::panic::set_hook(Box::new(|panic_info| {
        error!("confd encountered an unexpected error: {}", panic_info);
        eprintln!("confd crashed! This is a bug.");
        eprintln!("Error: {}", panic_info);
    }));
}
