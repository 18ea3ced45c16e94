use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::source::DocumentSource;
use crate::suggest::{pending_reference, suggest};

/// Suggests document names for `input`.
///
/// `input` is either the text before the cursor, in which case the partial
/// name after an open `![[` is used, or a bare partial name.
pub fn run<S: DocumentSource + ?Sized>(source: &S, input: &str) -> Result<CmdResult> {
    let partial = pending_reference(input).unwrap_or(input).trim();

    let names: Vec<String> = match source.list_documents() {
        Ok(documents) => documents.into_iter().map(|doc| doc.name).collect(),
        Err(e) => {
            log::warn!("no suggestions, listing failed: {}", e);
            let mut result = CmdResult::default();
            result.add_message(CmdMessage::warning(format!(
                "Could not load the document list: {}",
                e
            )));
            return Ok(result);
        }
    };

    Ok(CmdResult::default().with_suggestions(suggest(&names, partial)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::memory::fixtures::SourceFixture;

    #[test]
    fn test_completes_open_reference() {
        let fixture = SourceFixture::new().with_sample_plan().with_sample_notes();
        let result = run(&fixture.source, "see ![[NO").unwrap();
        assert_eq!(result.suggestions, vec!["notes"]);
    }

    #[test]
    fn test_bare_partial() {
        let fixture = SourceFixture::new().with_sample_plan().with_sample_notes();
        let result = run(&fixture.source, "").unwrap();
        assert_eq!(result.suggestions, vec!["notes", "plan"]);
    }

    #[test]
    fn test_offline_source_gives_no_suggestions() {
        let fixture = SourceFixture::new().with_sample_plan().offline();
        let result = run(&fixture.source, "pl").unwrap();
        assert!(result.suggestions.is_empty());
        assert_eq!(result.messages.len(), 1);
    }
}
