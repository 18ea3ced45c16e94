use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Scope {
    Project,
    Global,
}

/// Stable identifier of a checklist item within one document revision.
///
/// This is the 1-based display index the numberer assigns, so it is also the
/// number the user sees next to the checkbox.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ItemId(pub usize);

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Checked state of one checkbox, as reported by the UI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckboxState {
    pub id: ItemId,
    pub checked: bool,
}

impl CheckboxState {
    pub fn new(id: ItemId, checked: bool) -> Self {
        Self { id, checked }
    }
}

/// The raw markdown of one document at one revision.
///
/// A `DocumentState` is never mutated in place: sync writes produce the next
/// revision through [`DocumentState::with_source`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DocumentState {
    pub name: String,
    pub source: String,
    pub revision: u64,
}

impl DocumentState {
    pub fn new(name: impl Into<String>, source: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            source: source.into(),
            revision: 0,
        }
    }

    pub fn with_source(&self, source: String) -> Self {
        Self {
            name: self.name.clone(),
            source,
            revision: self.revision + 1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_with_source_bumps_revision_and_keeps_name() {
        let doc = DocumentState::new("plan.md", "- [ ] a");
        let next = doc.with_source("- [x] a".to_string());
        assert_eq!(next.name, "plan.md");
        assert_eq!(next.revision, 1);
        assert_eq!(doc.source, "- [ ] a");
    }
}
