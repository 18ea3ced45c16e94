use super::{is_document_name, DocumentEntry, DocumentSource};
use crate::error::{CheckpadError, Result};
use std::collections::BTreeMap;

/// In-memory documents for testing.
/// Does NOT persist data.
#[derive(Debug, Default, Clone)]
pub struct InMemorySource {
    documents: BTreeMap<String, String>,
    offline: bool,
}

impl InMemorySource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: impl Into<String>, content: impl Into<String>) {
        self.documents.insert(name.into(), content.into());
    }

    /// Makes every listing fail, as an unreachable server would.
    pub fn set_offline(&mut self, offline: bool) {
        self.offline = offline;
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.documents.get(name).map(String::as_str)
    }
}

impl DocumentSource for InMemorySource {
    fn list_documents(&self) -> Result<Vec<DocumentEntry>> {
        if self.offline {
            return Err(CheckpadError::Source("Source is offline".to_string()));
        }
        Ok(self
            .documents
            .keys()
            .filter(|name| is_document_name(name))
            .map(DocumentEntry::new)
            .collect())
    }

    fn fetch(&self, name: &str) -> Result<String> {
        self.documents
            .get(name)
            .cloned()
            .ok_or_else(|| CheckpadError::DocumentNotFound(name.to_string()))
    }

    fn save(&mut self, name: &str, content: &str) -> Result<()> {
        self.documents.insert(name.to_string(), content.to_string());
        Ok(())
    }
}

// --- Test Fixtures ---

#[cfg(any(test, feature = "test_utils"))]
pub mod fixtures {
    use super::*;

    /// The worked example: one task, one checked and one unchecked step.
    pub const SAMPLE_PLAN: &str =
        "# Tarea: A\n- [ ] step (estimate:: 30m)\n- [x] step2 (estimate:: 1h)";

    pub const SAMPLE_NOTES: &str = "# Intro\nFirst words.\n\n# Details\n- [ ] read (estimate:: 10m)";

    pub struct SourceFixture {
        pub source: InMemorySource,
    }

    impl Default for SourceFixture {
        fn default() -> Self {
            Self::new()
        }
    }

    impl SourceFixture {
        pub fn new() -> Self {
            Self {
                source: InMemorySource::new(),
            }
        }

        pub fn with_document(mut self, name: &str, content: &str) -> Self {
            self.source.insert(name, content);
            self
        }

        pub fn with_sample_plan(self) -> Self {
            self.with_document("plan.md", SAMPLE_PLAN)
        }

        pub fn with_sample_notes(self) -> Self {
            self.with_document("notes.md", SAMPLE_NOTES)
        }

        pub fn offline(mut self) -> Self {
            self.source.set_offline(true);
            self
        }
    }
}

#[cfg(test)]
mod tests {
    use super::fixtures::SourceFixture;
    use super::*;

    #[test]
    fn test_listing_skips_non_markdown_names() {
        let fixture = SourceFixture::new()
            .with_document("b.md", "b")
            .with_document("a.md", "a")
            .with_document("raw.txt", "x");
        let names: Vec<String> = fixture
            .source
            .list_documents()
            .unwrap()
            .into_iter()
            .map(|d| d.name)
            .collect();
        assert_eq!(names, vec!["a.md", "b.md"]);
    }

    #[test]
    fn test_offline_listing_fails() {
        let fixture = SourceFixture::new().with_sample_plan().offline();
        assert!(fixture.source.list_documents().is_err());
        assert!(fixture.source.fetch("plan.md").is_ok());
    }

    #[test]
    fn test_save_overwrites() {
        let mut source = SourceFixture::new().with_sample_plan().source;
        source.save("plan.md", "- [x] done").unwrap();
        assert_eq!(source.get("plan.md"), Some("- [x] done"));
    }
}
