use crate::commands::{load_document, CmdResult, DocumentReport};
use crate::error::Result;
use crate::session::Session;
use crate::source::DocumentSource;

pub fn run<S: DocumentSource + ?Sized>(source: &S, name: &str) -> Result<CmdResult> {
    let mut session = Session::new();
    session.load(load_document(source, name)?);
    let view = session.render_with(source)?;
    Ok(CmdResult::default().with_report(DocumentReport::of(view)))
}
