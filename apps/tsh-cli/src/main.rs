//! `tsh` binary entry point.
//!
//! Parses arguments, prepares logging under the project directory and hands
//! over to [`Cli::run`], which starts the interactive shell.

mod cli;
mod console;
mod logging;

use anyhow::Result;
use clap::Parser;

use crate::cli::Cli;

fn main() -> Result<()> {
    let cli = Cli::parse();

    let log_root = cli.log_root()?;

    // Best effort, before tracing is initialized.
    logging::cleanup_old_logs(&log_root);

    let _guard = logging::init_tracing(&log_root, cli.log_file)?;

    cli.run()
}
