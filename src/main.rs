//! tiercache CLI entry point
//!
//! Parses arguments, installs logging and runs the selected command. Errors
//! are printed with their full cause chain and exit with status 1.

use clap::Parser;
use colored::Colorize;
use tiercache::cli::{self, Cli};

fn main() {
    let cli = Cli::parse();

    // Set up colored output for Windows
    #[cfg(windows)]
    colored::control::set_virtual_terminal(true).ok();

    cli::init_logging(cli.log_level());

    if let Err(e) = cli.execute() {
        eprintln!("{} {e:#}", "error:".red().bold());
        std::process::exit(1);
    }
}
