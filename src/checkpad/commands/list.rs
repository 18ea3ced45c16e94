use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::source::DocumentSource;

pub fn run<S: DocumentSource + ?Sized>(source: &S) -> Result<CmdResult> {
    match source.list_documents() {
        Ok(documents) => {
            let mut result = CmdResult::default();
            if documents.is_empty() {
                result.add_message(CmdMessage::info("No documents found"));
            }
            Ok(result.with_documents(documents))
        }
        Err(e) => {
            log::warn!("document listing failed: {}", e);
            let mut result = CmdResult::default();
            result.add_message(CmdMessage::warning(format!(
                "Could not load the document list: {}",
                e
            )));
            Ok(result)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::MessageLevel;
    use crate::source::memory::fixtures::SourceFixture;

    #[test]
    fn test_lists_documents() {
        let fixture = SourceFixture::new().with_sample_plan().with_sample_notes();
        let result = run(&fixture.source).unwrap();
        let names: Vec<&str> = result.documents.iter().map(|d| d.name.as_str()).collect();
        assert_eq!(names, vec!["notes.md", "plan.md"]);
        assert!(result.messages.is_empty());
    }

    #[test]
    fn test_failed_listing_degrades_to_empty_with_warning() {
        let fixture = SourceFixture::new().with_sample_plan().offline();
        let result = run(&fixture.source).unwrap();
        assert!(result.documents.is_empty());
        assert_eq!(result.messages.len(), 1);
        assert_eq!(result.messages[0].level, MessageLevel::Warning);
    }
}
