//! # Checkpad Architecture
//!
//! Checkpad turns markdown checklists into trackable plans: it numbers the
//! `- [ ]` items, embeds other documents through `![[name#section]]`, adds up
//! `(estimate:: 30m)` labels per task, and writes checkbox changes back into the
//! markdown. It is a library first; the `checkpad` binary is one client.
//!
//! ## Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  CLI (cli/, wired by main.rs)                               │
//! │  - Arguments, terminal output, exit codes                   │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  API (api.rs)                                               │
//! │  - Thin facade, normalizes names and item numbers           │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Commands (commands/*.rs) and the Session                   │
//! │  - One render / toggle / export per call, returns CmdResult │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Document pipeline                                          │
//! │  transclusion → checklist numbering → view → aggregate      │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Sources (source/)                                          │
//! │  - DirSource, HttpSource, InMemorySource                    │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## The Document Cycle
//!
//! A [`model::DocumentState`] is the stored markdown plus a revision. Rendering
//! it ([`view::render`]) is pure: references are resolved against a source,
//! items are numbered, and the result is a [`view::ViewModel`] whose items
//! remember which source line they came from. Toggling goes the other way
//! through [`checklist::reconcile`], which rewrites exactly those lines and
//! yields the next revision.
//!
//! Nothing from `api.rs` inward prints or exits.
//!
//! ## Module Overview
//!
//! - [`api`]: The facade every client uses
//! - [`commands`]: One module per operation
//! - [`session`]: Active document, its view, and render generations
//! - [`source`]: Where documents come from
//! - [`transclusion`]: `![[...]]` expansion
//! - [`checklist`]: Item numbering, front matter, write-back
//! - [`view`]: Markdown to blocks, items and HTML
//! - [`estimate`]: `estimate::` label parsing
//! - [`aggregate`]: Progress, task totals, remaining time
//! - [`export`]: Standalone HTML and markdown exports
//! - [`suggest`]: Reference completion
//! - [`config`]: Configuration management
//! - [`init`]: Project discovery and source selection
//! - [`model`]: Core data types
//! - [`error`]: Error types
//! - `cli`: Argument parsing and terminal rendering for the binary (not part of the lib API)

pub mod aggregate;
pub mod api;
pub mod checklist;
pub mod commands;
pub mod config;
pub mod error;
pub mod estimate;
pub mod export;
pub mod init;
pub mod model;
pub mod session;
pub mod source;
pub mod suggest;
pub mod transclusion;
pub mod view;
