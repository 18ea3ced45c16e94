use crate::aggregate::Summary;
use crate::config::CheckpadConfig;
use crate::error::{CheckpadError, Result};
use crate::model::{DocumentState, Scope};
use crate::source::{DocumentEntry, DocumentSource};
use crate::view::{ViewItem, ViewModel};
use serde::Serialize;
use std::path::PathBuf;

pub mod complete;
pub mod config;
pub mod export;
pub mod init;
pub mod list;
pub mod show;
pub mod toggle;

#[derive(Debug, Clone)]
pub struct CheckpadPaths {
    /// The project's `.checkpad` directory, when there is one.
    pub project: Option<PathBuf>,
    pub global: PathBuf,
}

impl CheckpadPaths {
    pub fn scope_dir(&self, scope: Scope) -> Result<PathBuf> {
        match scope {
            Scope::Project => self
                .project
                .clone()
                .ok_or_else(|| CheckpadError::Api("Project scope is not available".to_string())),
            Scope::Global => Ok(self.global.clone()),
        }
    }

    /// Directory relative document paths are resolved against: the project
    /// root for the project scope, the data directory for the global one.
    pub fn docs_root(&self, scope: Scope) -> Result<PathBuf> {
        let dir = self.scope_dir(scope)?;
        match scope {
            Scope::Project => Ok(dir.parent().map(PathBuf::from).unwrap_or(dir)),
            Scope::Global => Ok(dir),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum MessageLevel {
    Info,
    Success,
    Warning,
    Error,
}

#[derive(Debug, Clone, Serialize)]
pub struct CmdMessage {
    pub level: MessageLevel,
    pub content: String,
}

impl CmdMessage {
    pub fn info(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Info,
            content: content.into(),
        }
    }

    pub fn success(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Success,
            content: content.into(),
        }
    }

    pub fn warning(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Warning,
            content: content.into(),
        }
    }

    pub fn error(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Error,
            content: content.into(),
        }
    }
}

/// Everything the terminal shows about one rendered document.
#[derive(Debug, Clone, Serialize)]
pub struct DocumentReport {
    pub name: String,
    pub revision: u64,
    pub numbered_text: String,
    pub items: Vec<ViewItem>,
    pub summary: Summary,
}

impl DocumentReport {
    pub fn of(view: &ViewModel) -> Self {
        Self {
            name: view.name.clone(),
            revision: view.revision,
            numbered_text: view.numbered_text.clone(),
            items: view.items.clone(),
            summary: Summary::of(view),
        }
    }
}

#[derive(Debug, Default)]
pub struct CmdResult {
    pub documents: Vec<DocumentEntry>,
    pub report: Option<DocumentReport>,
    pub written_paths: Vec<PathBuf>,
    pub suggestions: Vec<String>,
    pub config: Option<CheckpadConfig>,
    pub messages: Vec<CmdMessage>,
}

impl CmdResult {
    pub fn add_message(&mut self, message: CmdMessage) {
        self.messages.push(message);
    }

    pub fn with_documents(mut self, documents: Vec<DocumentEntry>) -> Self {
        self.documents = documents;
        self
    }

    pub fn with_report(mut self, report: DocumentReport) -> Self {
        self.report = Some(report);
        self
    }

    pub fn with_written_paths(mut self, paths: Vec<PathBuf>) -> Self {
        self.written_paths = paths;
        self
    }

    pub fn with_suggestions(mut self, suggestions: Vec<String>) -> Self {
        self.suggestions = suggestions;
        self
    }

    pub fn with_config(mut self, config: CheckpadConfig) -> Self {
        self.config = Some(config);
        self
    }
}

/// Reads a document into its first revision.
pub(crate) fn load_document<S: DocumentSource + ?Sized>(
    source: &S,
    name: &str,
) -> Result<DocumentState> {
    let text = source.fetch(name)?;
    Ok(DocumentState::new(name, text))
}
