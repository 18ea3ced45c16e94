use super::{is_document_name, DocumentEntry, DocumentSource};
use crate::error::{CheckpadError, Result};
use chrono::{DateTime, Utc};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// Documents stored as `.md` files directly inside one directory.
pub struct DirSource {
    root: PathBuf,
}

impl DirSource {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Resolves a document name to its path, refusing anything that would
    /// leave the root directory.
    fn document_path(&self, name: &str) -> Result<PathBuf> {
        if name.is_empty() || name.contains(['/', '\\']) || name == ".." || name == "." {
            return Err(CheckpadError::Source(format!(
                "Invalid document name: {}",
                name
            )));
        }
        Ok(self.root.join(name))
    }

    fn ensure_root(&self) -> Result<()> {
        if !self.root.exists() {
            fs::create_dir_all(&self.root).map_err(CheckpadError::Io)?;
        }
        Ok(())
    }
}

impl DocumentSource for DirSource {
    fn list_documents(&self) -> Result<Vec<DocumentEntry>> {
        let entries = fs::read_dir(&self.root).map_err(|e| {
            CheckpadError::Source(format!("Cannot read {}: {}", self.root.display(), e))
        })?;

        let mut documents = Vec::new();
        for entry in entries {
            let entry = entry.map_err(CheckpadError::Io)?;
            let Some(name) = entry.file_name().to_str().map(str::to_string) else {
                continue;
            };
            if !is_document_name(&name) {
                continue;
            }
            let metadata = entry.metadata().map_err(CheckpadError::Io)?;
            if !metadata.is_file() {
                continue;
            }
            let mut doc = DocumentEntry::new(name);
            if let Ok(modified) = metadata.modified() {
                doc = doc.with_modified(DateTime::<Utc>::from(modified));
            }
            documents.push(doc);
        }

        documents.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(documents)
    }

    fn fetch(&self, name: &str) -> Result<String> {
        let path = self.document_path(name)?;
        log::debug!("reading {}", path.display());
        fs::read_to_string(&path).map_err(|e| match e.kind() {
            ErrorKind::NotFound => CheckpadError::DocumentNotFound(name.to_string()),
            _ => CheckpadError::Io(e),
        })
    }

    fn save(&mut self, name: &str, content: &str) -> Result<()> {
        let path = self.document_path(name)?;
        self.ensure_root()?;
        fs::write(&path, content).map_err(CheckpadError::Io)?;
        log::debug!("wrote {}", path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn source_with(files: &[(&str, &str)]) -> (TempDir, DirSource) {
        let dir = TempDir::new().unwrap();
        for (name, content) in files {
            fs::write(dir.path().join(name), content).unwrap();
        }
        let source = DirSource::new(dir.path());
        (dir, source)
    }

    #[test]
    fn test_lists_only_markdown_files_sorted() {
        let (_dir, source) = source_with(&[
            ("b.md", "# B"),
            ("a.md", "# A"),
            ("notes.txt", "ignored"),
        ]);

        let names: Vec<String> = source
            .list_documents()
            .unwrap()
            .into_iter()
            .map(|d| d.name)
            .collect();
        assert_eq!(names, vec!["a.md", "b.md"]);
    }

    #[test]
    fn test_listing_reports_modified_time() {
        let (_dir, source) = source_with(&[("a.md", "# A")]);
        let docs = source.list_documents().unwrap();
        assert!(docs[0].modified.is_some());
    }

    #[test]
    fn test_listing_missing_directory_fails() {
        let dir = TempDir::new().unwrap();
        let source = DirSource::new(dir.path().join("missing"));
        assert!(matches!(
            source.list_documents(),
            Err(CheckpadError::Source(_))
        ));
    }

    #[test]
    fn test_fetch_missing_document() {
        let (_dir, source) = source_with(&[]);
        assert!(matches!(
            source.fetch("nope.md"),
            Err(CheckpadError::DocumentNotFound(name)) if name == "nope.md"
        ));
    }

    #[test]
    fn test_rejects_names_outside_root() {
        let (_dir, source) = source_with(&[]);
        assert!(source.fetch("../secret.md").is_err());
        assert!(source.fetch("sub/dir.md").is_err());
    }

    #[test]
    fn test_save_then_fetch() {
        let (_dir, mut source) = source_with(&[("a.md", "- [ ] a")]);
        source.save("a.md", "- [x] a").unwrap();
        assert_eq!(source.fetch("a.md").unwrap(), "- [x] a");
    }
}
