use crate::commands::{load_document, CmdMessage, CmdResult, DocumentReport};
use crate::error::{CheckpadError, Result};
use crate::model::ItemId;
use crate::session::Session;
use crate::source::DocumentSource;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ToggleAction {
    Check(Vec<ItemId>),
    Uncheck(Vec<ItemId>),
    Toggle(Vec<ItemId>),
    /// Checks everything, or unchecks everything when all is checked.
    All,
}

/// Parses item numbers as typed: `3`, `3.` or a range such as `2-4`.
pub fn parse_item_ids<S: AsRef<str>>(inputs: &[S]) -> Result<Vec<ItemId>> {
    let mut ids = Vec::new();
    for input in inputs {
        let raw = input.as_ref().trim().trim_end_matches('.');
        if let Some((start, end)) = raw.split_once('-') {
            let start = parse_number(start)?;
            let end = parse_number(end)?;
            if start > end {
                return Err(CheckpadError::Validation(format!(
                    "Invalid range: {}",
                    input.as_ref()
                )));
            }
            ids.extend((start..=end).map(ItemId));
        } else {
            ids.push(ItemId(parse_number(raw)?));
        }
    }
    ids.sort();
    ids.dedup();
    Ok(ids)
}

fn parse_number(raw: &str) -> Result<usize> {
    match raw.trim().parse::<usize>() {
        Ok(n) if n > 0 => Ok(n),
        _ => Err(CheckpadError::Validation(format!(
            "Invalid item number: {}",
            raw.trim()
        ))),
    }
}

fn join_ids(ids: &[ItemId]) -> String {
    ids.iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

pub fn run<S: DocumentSource + ?Sized>(
    source: &mut S,
    name: &str,
    action: ToggleAction,
) -> Result<CmdResult> {
    let mut session = Session::new();
    session.load(load_document(&*source, name)?);
    session.render_with(&*source)?;

    let outcome = match &action {
        ToggleAction::Check(ids) => session.set_checked(ids, true)?,
        ToggleAction::Uncheck(ids) => session.set_checked(ids, false)?,
        ToggleAction::Toggle(ids) => session.toggle(ids)?,
        ToggleAction::All => session.toggle_all()?,
    };

    let mut result = CmdResult::default();
    if outcome.changed() {
        source.save(name, &outcome.document.source)?;
        log::info!(
            "saved {} at revision {}",
            outcome.document.name,
            outcome.document.revision
        );
        result.add_message(CmdMessage::success(format!(
            "Updated {} ({} item{})",
            name,
            outcome.applied.len(),
            if outcome.applied.len() == 1 { "" } else { "s" }
        )));
    } else if outcome.detached.is_empty() && outcome.unknown.is_empty() {
        result.add_message(CmdMessage::info("Nothing to change"));
    }
    if !outcome.detached.is_empty() {
        result.add_message(CmdMessage::warning(format!(
            "Items {} come from embedded documents and were not saved",
            join_ids(&outcome.detached)
        )));
    }
    if !outcome.unknown.is_empty() {
        result.add_message(CmdMessage::error(format!(
            "No such item: {}",
            join_ids(&outcome.unknown)
        )));
    }

    let view = session
        .view()
        .ok_or_else(|| CheckpadError::Api("Document has not been rendered".to_string()))?;
    Ok(result.with_report(DocumentReport::of(view)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::MessageLevel;
    use crate::source::memory::fixtures::SourceFixture;

    #[test]
    fn test_parse_item_ids() {
        let ids = parse_item_ids(&["1", "3.", "5-7"]).unwrap();
        assert_eq!(
            ids,
            vec![ItemId(1), ItemId(3), ItemId(5), ItemId(6), ItemId(7)]
        );
    }

    #[test]
    fn test_parse_item_ids_drops_repeats() {
        let ids = parse_item_ids(&["3", "1", "3", "2-3"]).unwrap();
        assert_eq!(ids, vec![ItemId(1), ItemId(2), ItemId(3)]);
    }

    #[test]
    fn test_parse_item_ids_rejects_garbage() {
        assert!(parse_item_ids(&["0"]).is_err());
        assert!(parse_item_ids(&["abc"]).is_err());
        assert!(parse_item_ids(&["4-2"]).is_err());
    }

    #[test]
    fn test_check_saves_source() {
        let mut fixture = SourceFixture::new().with_sample_plan();
        let result = run(
            &mut fixture.source,
            "plan.md",
            ToggleAction::Check(vec![ItemId(1)]),
        )
        .unwrap();

        assert_eq!(
            fixture.source.get("plan.md").unwrap(),
            "# Tarea: A\n- [x] step (estimate:: 30m)\n- [x] step2 (estimate:: 1h)"
        );
        let report = result.report.unwrap();
        assert_eq!(report.summary.progress.percentage, 100);
        assert_eq!(report.revision, 1);
        assert_eq!(result.messages[0].level, MessageLevel::Success);
    }

    #[test]
    fn test_already_checked_is_a_no_op() {
        let mut fixture = SourceFixture::new().with_sample_plan();
        let result = run(
            &mut fixture.source,
            "plan.md",
            ToggleAction::Check(vec![ItemId(2)]),
        )
        .unwrap();

        assert_eq!(result.report.unwrap().revision, 0);
        assert_eq!(result.messages[0].content, "Nothing to change");
    }

    #[test]
    fn test_toggle_all_unchecks_when_complete() {
        let mut fixture = SourceFixture::new()
            .with_document("done.md", "- [x] a\n- [x] b");
        run(&mut fixture.source, "done.md", ToggleAction::All).unwrap();
        assert_eq!(fixture.source.get("done.md").unwrap(), "- [ ] a\n- [ ] b");
    }

    #[test]
    fn test_unknown_item_is_reported() {
        let mut fixture = SourceFixture::new().with_sample_plan();
        let result = run(
            &mut fixture.source,
            "plan.md",
            ToggleAction::Toggle(vec![ItemId(9)]),
        )
        .unwrap();
        assert!(result
            .messages
            .iter()
            .any(|m| m.level == MessageLevel::Error && m.content == "No such item: 9"));
    }
}
