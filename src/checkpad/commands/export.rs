use crate::commands::{load_document, CmdMessage, CmdResult};
use crate::error::{CheckpadError, Result};
use crate::export::{export_filename, export_html, export_markdown, ExportFormat, ExportOptions};
use crate::session::Session;
use crate::source::{DocumentSource, DOCUMENT_EXT};
use std::fs;
use std::path::Path;

#[derive(Debug, Clone)]
pub struct ExportRequest<'a> {
    pub document: &'a str,
    pub format: ExportFormat,
    /// Output file name; blank means `default_name`.
    pub file_name: Option<&'a str>,
    pub default_name: &'a str,
}

pub fn run<S: DocumentSource + ?Sized>(
    source: &S,
    request: &ExportRequest<'_>,
    out_dir: &Path,
) -> Result<CmdResult> {
    let requested = request
        .file_name
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .unwrap_or(request.default_name);
    let file_name = export_filename(requested, request.format)?;

    let mut session = Session::new();
    session.load(load_document(source, request.document)?);
    let content = match request.format {
        ExportFormat::Html => {
            let view = session.render_with(source)?;
            let options = ExportOptions {
                title: request
                    .document
                    .strip_suffix(DOCUMENT_EXT)
                    .unwrap_or(request.document)
                    .to_string(),
            };
            export_html(view, &view.checked_states(), &options)?
        }
        ExportFormat::Markdown => {
            let document = session
                .document()
                .ok_or_else(|| CheckpadError::Api("No document loaded".to_string()))?;
            export_markdown(document)
        }
    };

    fs::create_dir_all(out_dir)?;
    let path = out_dir.join(&file_name);
    fs::write(&path, content)?;
    log::info!("exported {} to {}", request.document, path.display());

    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success(format!("Exported {}", path.display())));
    Ok(result.with_written_paths(vec![path]))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::export::DEFAULT_HTML_NAME;
    use crate::source::memory::fixtures::{SourceFixture, SAMPLE_PLAN};
    use tempfile::tempdir;

    fn request(format: ExportFormat, file_name: Option<&str>) -> ExportRequest<'_> {
        ExportRequest {
            document: "plan.md",
            format,
            file_name,
            default_name: DEFAULT_HTML_NAME,
        }
    }

    #[test]
    fn test_html_export_uses_default_name() {
        let fixture = SourceFixture::new().with_sample_plan();
        let dir = tempdir().unwrap();
        let result = run(&fixture.source, &request(ExportFormat::Html, None), dir.path()).unwrap();

        let path = dir.path().join("checklist_exportado.html");
        assert_eq!(result.written_paths, vec![path.clone()]);
        let html = fs::read_to_string(path).unwrap();
        assert!(html.contains("Progreso: 50%"));
        assert!(html.contains("<title>plan</title>"));
    }

    #[test]
    fn test_extension_is_forced() {
        let fixture = SourceFixture::new().with_sample_plan();
        let dir = tempdir().unwrap();
        run(
            &fixture.source,
            &request(ExportFormat::Markdown, Some("week.txt")),
            dir.path(),
        )
        .unwrap();

        let written = fs::read_to_string(dir.path().join("week.md")).unwrap();
        assert_eq!(written, SAMPLE_PLAN);
    }

    #[test]
    fn test_invalid_name_writes_nothing() {
        let fixture = SourceFixture::new().with_sample_plan();
        let dir = tempdir().unwrap();
        let err = run(
            &fixture.source,
            &request(ExportFormat::Html, Some("a/b")),
            dir.path(),
        )
        .unwrap_err();

        assert!(matches!(err, CheckpadError::Validation(_)));
        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 0);
    }
}
