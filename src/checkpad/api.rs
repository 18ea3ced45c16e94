//! # API Facade
//!
//! A thin layer over the commands. Every client goes through [`CheckpadApi`],
//! which:
//!
//! - normalizes inputs (document names get their `.md`, typed item numbers
//!   become [`ItemId`]s),
//! - dispatches to the matching `commands::*::run`,
//! - returns a [`CmdResult`] and never prints.
//!
//! `CheckpadApi<S: DocumentSource>` works the same over a directory, a
//! server, or the in-memory source the tests use.

use crate::commands;
use crate::error::Result;
use crate::export::ExportFormat;
use crate::model::{ItemId, Scope};
use crate::source::{with_document_ext, DocumentSource};
use std::path::Path;

pub use crate::commands::config::ConfigAction;
pub use crate::commands::toggle::ToggleAction;
pub use commands::{CheckpadPaths, CmdMessage, CmdResult, DocumentReport, MessageLevel};

pub struct CheckpadApi<S: DocumentSource> {
    source: S,
    paths: CheckpadPaths,
}

impl<S: DocumentSource> CheckpadApi<S> {
    pub fn new(source: S, paths: CheckpadPaths) -> Self {
        Self { source, paths }
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn list_documents(&self) -> Result<CmdResult> {
        commands::list::run(&self.source)
    }

    pub fn show(&self, name: &str) -> Result<CmdResult> {
        commands::show::run(&self.source, &with_document_ext(name))
    }

    pub fn check<I: AsRef<str>>(&mut self, name: &str, items: &[I]) -> Result<CmdResult> {
        let ids = commands::toggle::parse_item_ids(items)?;
        self.apply(name, ToggleAction::Check(ids))
    }

    pub fn uncheck<I: AsRef<str>>(&mut self, name: &str, items: &[I]) -> Result<CmdResult> {
        let ids = commands::toggle::parse_item_ids(items)?;
        self.apply(name, ToggleAction::Uncheck(ids))
    }

    pub fn toggle<I: AsRef<str>>(&mut self, name: &str, items: &[I]) -> Result<CmdResult> {
        let ids = commands::toggle::parse_item_ids(items)?;
        self.apply(name, ToggleAction::Toggle(ids))
    }

    pub fn toggle_all(&mut self, name: &str) -> Result<CmdResult> {
        self.apply(name, ToggleAction::All)
    }

    pub fn set_items(&mut self, name: &str, ids: &[ItemId], checked: bool) -> Result<CmdResult> {
        let action = if checked {
            ToggleAction::Check(ids.to_vec())
        } else {
            ToggleAction::Uncheck(ids.to_vec())
        };
        self.apply(name, action)
    }

    fn apply(&mut self, name: &str, action: ToggleAction) -> Result<CmdResult> {
        commands::toggle::run(&mut self.source, &with_document_ext(name), action)
    }

    pub fn export(
        &self,
        name: &str,
        format: ExportFormat,
        file_name: Option<&str>,
        default_name: &str,
        out_dir: &Path,
    ) -> Result<CmdResult> {
        let document = with_document_ext(name);
        let request = commands::export::ExportRequest {
            document: &document,
            format,
            file_name,
            default_name,
        };
        commands::export::run(&self.source, &request, out_dir)
    }

    pub fn complete(&self, input: &str) -> Result<CmdResult> {
        commands::complete::run(&self.source, input)
    }

    pub fn config(&self, scope: Scope, action: ConfigAction) -> Result<CmdResult> {
        commands::config::run(&self.paths, scope, action)
    }

    pub fn init(&self, scope: Scope) -> Result<CmdResult> {
        commands::init::run(&self.paths, scope)
    }

    pub fn paths(&self) -> &CheckpadPaths {
        &self.paths
    }
}
