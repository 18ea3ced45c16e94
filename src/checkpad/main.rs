//! # Checkpad CLI
//!
//! The binary is thin: it runs [`cli::run`] and turns an error into a message
//! on stderr and exit code 1. Everything else lives in `cli/`, which talks to
//! the library only through `checkpad::api`.

use colored::Colorize;

mod cli;

fn main() {
    if let Err(e) = cli::run() {
        eprintln!("{} {}", "Error:".red().bold(), e);
        std::process::exit(1);
    }
}
