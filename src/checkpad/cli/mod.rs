//! # CLI Behavior
//!
//! One client of the checkpad library. This is the only place that knows about
//! stdout, stderr, exit codes and output formatting.
//!
//! ## Naked Execution
//!
//! Running `checkpad` with no arguments lists the documents.
//!
//! ## Where Documents Come From
//!
//! The project is the nearest directory (upwards from the working directory)
//! holding a `.checkpad/`; without one, the working directory is used.
//! Documents are read from `docs-dir` under the project root, or from the
//! server at `server-url` when that is set. `--global` switches both config and
//! documents to the user's data directory.
//!
//! ## Writing Back
//!
//! `check`, `uncheck`, `toggle` and `all` rewrite only the state character of
//! the affected lines and save the document. Items that come from an embedded
//! `![[...]]` document are shown but cannot be written; they are reported.
//!
//! ## Logging
//!
//! Warnings go to stderr through `env_logger`. `--verbose` raises the level to
//! debug; `RUST_LOG` overrides both.

mod commands;
mod render;
pub mod setup;
mod styles;
mod templates;

pub use commands::run;
