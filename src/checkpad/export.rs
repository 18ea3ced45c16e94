//! # Standalone Export
//!
//! Produces a single HTML file that works with nothing but a browser: the
//! rendered checklist with its current states, a progress panel, and an
//! embedded script that keeps the panel live and can save an updated copy.
//!
//! The panel's initial texts and the task estimates are computed here, with
//! the same aggregation the terminal shows. The script recomputes them from the
//! page on load and after every change; both sides implement the same rules,
//! so the numbers do not jump when the page opens.
//!
//! The markdown export is the stored source as is.

use crate::aggregate::{apply_task_estimates, Summary};
use crate::error::{CheckpadError, Result};
use crate::model::DocumentState;
use crate::view::ViewModel;
use minijinja::{context, Environment};
use once_cell::sync::Lazy;
use regex::Regex;

const EXPORT_TEMPLATE: &str = include_str!("assets/export.html");
const EXPORT_SCRIPT: &str = include_str!("assets/export.js");

pub const DEFAULT_HTML_NAME: &str = "checklist_exportado";
pub const DEFAULT_MARKDOWN_NAME: &str = "checklist";
pub const INVALID_FILENAME_CHARS: &[char] = &['<', '>', ':', '"', '/', '\\', '|', '?', '*'];

static EXTENSION_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\.[^/.]+$").expect("extension pattern is valid"));

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Html,
    Markdown,
}

impl ExportFormat {
    pub fn extension(self) -> &'static str {
        match self {
            ExportFormat::Html => ".html",
            ExportFormat::Markdown => ".md",
        }
    }

    pub fn default_name(self) -> &'static str {
        match self {
            ExportFormat::Html => DEFAULT_HTML_NAME,
            ExportFormat::Markdown => DEFAULT_MARKDOWN_NAME,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ExportOptions {
    pub title: String,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            title: "Checklist Export".to_string(),
        }
    }
}

pub fn validate_filename(name: &str) -> Result<()> {
    if name.contains(INVALID_FILENAME_CHARS) {
        return Err(CheckpadError::Validation(
            "El nombre del archivo contiene caracteres no válidos: <>:\"/\\|?*".to_string(),
        ));
    }
    Ok(())
}

/// Validates `name` and forces the format's extension onto it.
///
/// A blank name falls back to the format's default.
pub fn export_filename(name: &str, format: ExportFormat) -> Result<String> {
    let name = name.trim();
    let name = if name.is_empty() {
        format.default_name()
    } else {
        name
    };
    validate_filename(name)?;
    let stem = EXTENSION_RE.replace(name, "");
    Ok(format!("{}{}", stem, format.extension()))
}

/// The self-contained HTML document for `view` with the given checked states.
///
/// `checked` is indexed like [`ViewModel::items`]; missing entries keep the
/// rendered state.
pub fn export_html(view: &ViewModel, checked: &[bool], options: &ExportOptions) -> Result<String> {
    let mut view = view.clone();
    for (item, state) in view.items.iter_mut().zip(checked) {
        item.checked = *state;
    }

    let summary = Summary::of(&view);
    let checklist = apply_task_estimates(&view, &summary.tasks);
    let toggle_label = if view.all_checked() {
        "☐ Deseleccionar todos"
    } else {
        "☑️ Seleccionar todos"
    };

    let mut env = Environment::new();
    env.add_template("export.html", EXPORT_TEMPLATE)?;
    let tmpl = env.get_template("export.html")?;
    let html = tmpl.render(context! {
        title => &options.title,
        toggle_label => toggle_label,
        progress => summary.progress,
        percent_text => summary.progress.percent_text(),
        steps_text => summary.progress.steps_text(),
        remaining_text => summary.remaining.line(),
        checklist => checklist,
        script => EXPORT_SCRIPT,
    })?;

    log::debug!(
        "exported {} revision {} ({} items)",
        view.name,
        view.revision,
        view.items.len()
    );
    Ok(html)
}

pub fn export_markdown(state: &DocumentState) -> String {
    state.source.clone()
}
