//! # Document Sources
//!
//! Checklists are read from, and written back to, a [`DocumentSource`]. The
//! rest of the crate never touches files or sockets directly: the render
//! pipeline only asks a source for a listing and for raw text by name.
//!
//! ## Implementations
//!
//! - [`fs::DirSource`]: a local directory of `.md` files (`markdown-files/` by default).
//! - [`http::HttpSource`]: a running checklist server, through its
//!   `GET /api/files` and `GET /api/files/{name}` endpoints. Read-only.
//! - [`memory::InMemorySource`]: a map of names to text, for tests.
//!
//! ## Failure Model
//!
//! Listing failures are surfaced to the caller, which degrades to an empty
//! list and a warning. Fetch failures inside transclusion never halt a render;
//! the resolver turns them into inline error text.

use crate::error::Result;
use chrono::{DateTime, Utc};
use serde::Serialize;

pub mod fs;
pub mod http;
pub mod memory;

/// Extension every listed document carries.
pub const DOCUMENT_EXT: &str = ".md";

/// One entry of a source listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DocumentEntry {
    pub name: String,
    /// Last modification time, when the source knows it.
    pub modified: Option<DateTime<Utc>>,
}

impl DocumentEntry {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            modified: None,
        }
    }

    pub fn with_modified(mut self, modified: DateTime<Utc>) -> Self {
        self.modified = Some(modified);
        self
    }
}

/// Abstract access to a set of markdown documents.
pub trait DocumentSource {
    /// Markdown documents available, sorted by name.
    fn list_documents(&self) -> Result<Vec<DocumentEntry>>;

    /// Raw text of the named document.
    fn fetch(&self, name: &str) -> Result<String>;

    /// Replace the named document's text.
    fn save(&mut self, name: &str, content: &str) -> Result<()>;
}

impl<T: DocumentSource + ?Sized> DocumentSource for Box<T> {
    fn list_documents(&self) -> Result<Vec<DocumentEntry>> {
        (**self).list_documents()
    }

    fn fetch(&self, name: &str) -> Result<String> {
        (**self).fetch(name)
    }

    fn save(&mut self, name: &str, content: &str) -> Result<()> {
        (**self).save(name, content)
    }
}

/// Appends `.md` unless the name already ends with it.
pub fn with_document_ext(name: &str) -> String {
    if name.ends_with(DOCUMENT_EXT) {
        name.to_string()
    } else {
        format!("{}{}", name, DOCUMENT_EXT)
    }
}

pub(crate) fn is_document_name(name: &str) -> bool {
    name.ends_with(DOCUMENT_EXT)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_with_document_ext() {
        assert_eq!(with_document_ext("notes"), "notes.md");
        assert_eq!(with_document_ext("notes.md"), "notes.md");
        assert_eq!(with_document_ext("notes.txt"), "notes.txt.md");
    }

    #[test]
    fn test_boxed_source_forwards() {
        let mut source: Box<dyn DocumentSource> = Box::new(memory::InMemorySource::new());
        source.save("a.md", "- [ ] x").unwrap();
        assert_eq!(source.fetch("a.md").unwrap(), "- [ ] x");
        assert_eq!(source.list_documents().unwrap().len(), 1);
    }
}
