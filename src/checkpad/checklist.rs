//! # Checklist Numbering and Sync
//!
//! The markdown source is the single source of truth for checked state. This
//! module moves state in both directions between that text and the rendered
//! checkboxes.
//!
//! ## Line Syntax
//!
//! A checklist line is `- [ ]`, `- [x]` or `- [X]` after any amount of leading
//! whitespace. The space inside the brackets is required for the unchecked form.
//!
//! ## Forward: Numbering
//!
//! [`number_checklist`] inserts a display number right after each marker:
//!
//! ```text
//! - [ ] plan          - [ ] 1. plan
//!   - [x] research      - [x] 2. research
//! - [ ] build         - [ ] 3. build
//! ```
//!
//! There is one counter for the whole document, regardless of depth or
//! state, and it restarts at 1 on every call. Numbering always runs on the stored
//! source, never on its own output, so re-rendering assigns identical numbers.
//!
//! ## Reverse: Sync
//!
//! - [`sync_positional`] zips checklist lines with a list of checked states.
//!   It stops as soon as either side runs out.
//! - [`reconcile`] applies states keyed by [`ItemId`]. Each rendered item knows
//!   which source line it came from, so order mismatches cannot shift states
//!   onto the wrong line. Items that came from transcluded documents have no
//!   source line and are reported as detached.

use crate::error::{CheckpadError, Result};
use crate::model::{CheckboxState, DocumentState, ItemId};
use crate::view::ViewModel;
use once_cell::sync::Lazy;
use regex::Regex;

static CHECKLIST_LINE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(\s*)- \[( |x|X)\]").expect("checklist pattern is valid"));

/// A line recognized as a checklist item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChecklistLine<'a> {
    pub indent: &'a str,
    pub checked: bool,
    /// Everything after the closing bracket, leading space included.
    pub rest: &'a str,
}

impl<'a> ChecklistLine<'a> {
    pub fn parse(line: &'a str) -> Option<Self> {
        let caps = CHECKLIST_LINE_RE.captures(line)?;
        let indent = caps.get(1).map_or("", |m| m.as_str());
        let marker_end = caps.get(0).map_or(0, |m| m.end());
        Some(Self {
            indent,
            checked: &caps[2] != " ",
            rest: &line[marker_end..],
        })
    }

    /// Byte offset of the state character inside the brackets.
    fn state_offset(&self) -> usize {
        self.indent.len() + "- [".len()
    }
}

pub fn is_checklist_line(line: &str) -> bool {
    CHECKLIST_LINE_RE.is_match(line)
}

/// Output of numbering: the rewritten text plus, per line, the id it was given.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NumberedDocument {
    pub text: String,
    pub line_items: Vec<Option<ItemId>>,
}

impl NumberedDocument {
    pub fn item_count(&self) -> usize {
        self.line_items.iter().flatten().count()
    }
}

pub fn number_lines<S: AsRef<str>>(lines: &[S]) -> NumberedDocument {
    let mut counter = 1;
    let mut out = Vec::with_capacity(lines.len());
    let mut line_items = Vec::with_capacity(lines.len());

    for line in lines {
        let line = line.as_ref();
        match ChecklistLine::parse(line) {
            Some(item) => {
                let mark = if item.checked { 'x' } else { ' ' };
                out.push(format!(
                    "{}- [{}] {}.{}",
                    item.indent, mark, counter, item.rest
                ));
                line_items.push(Some(ItemId(counter)));
                counter += 1;
            }
            None => {
                out.push(line.to_string());
                line_items.push(None);
            }
        }
    }

    NumberedDocument {
        text: out.join("\n"),
        line_items,
    }
}

/// Numbers every checklist line of `markdown`, starting at 1.
pub fn number_checklist(markdown: &str) -> String {
    let lines: Vec<&str> = markdown.split('\n').collect();
    number_lines(&lines).text
}

/// Inclusive line ranges of `---` delimited blocks.
///
/// A block opens on a line starting with `---` and closes on a later line that
/// is exactly `---`. An opener with no closer is left alone.
pub fn front_matter_blocks<S: AsRef<str>>(lines: &[S]) -> Vec<(usize, usize)> {
    let mut blocks = Vec::new();
    let mut i = 0;
    while i < lines.len() {
        if lines[i].as_ref().starts_with("---") {
            let close = (i + 1..lines.len()).find(|&j| lines[j].as_ref() == "---");
            match close {
                Some(j) => {
                    blocks.push((i, j));
                    i = j + 1;
                    continue;
                }
                None => break,
            }
        }
        i += 1;
    }
    blocks
}

/// Replaces every `---` delimited block with a single empty line.
pub fn strip_front_matter(markdown: &str) -> String {
    let lines: Vec<&str> = markdown.split('\n').collect();
    let blocks = front_matter_blocks(&lines);
    if blocks.is_empty() {
        return markdown.to_string();
    }

    let mut out: Vec<&str> = Vec::with_capacity(lines.len());
    let mut next = 0;
    for (start, end) in blocks {
        out.extend_from_slice(&lines[next..start]);
        out.push("");
        next = end + 1;
    }
    out.extend_from_slice(&lines[next..]);
    out.join("\n")
}

/// Rewrites the state character of a checklist line.
pub(crate) fn set_state(line: &str, checked: bool) -> Option<String> {
    let parsed = ChecklistLine::parse(line)?;
    let offset = parsed.state_offset();
    let mark = if checked { "x" } else { " " };
    let mut rewritten = String::with_capacity(line.len());
    rewritten.push_str(&line[..offset]);
    rewritten.push_str(mark);
    rewritten.push_str(&line[offset + 1..]);
    Some(rewritten)
}

/// Positional reverse sync: the n-th checklist line takes the n-th state.
///
/// Lines past the last state, and states past the last checklist line, are
/// left untouched.
pub fn sync_positional(markdown: &str, checked: &[bool]) -> String {
    let mut states = checked.iter();
    let mut lines: Vec<String> = Vec::new();
    let mut exhausted = checked.is_empty();

    for line in markdown.split('\n') {
        if !exhausted && is_checklist_line(line) {
            match states.next() {
                Some(&state) => {
                    lines.push(set_state(line, state).unwrap_or_else(|| line.to_string()));
                    continue;
                }
                None => exhausted = true,
            }
        }
        lines.push(line.to_string());
    }

    lines.join("\n")
}

/// Result of applying UI states to a document.
#[derive(Debug, Clone)]
pub struct SyncOutcome {
    pub document: DocumentState,
    /// Items whose source line was rewritten.
    pub applied: Vec<ItemId>,
    /// Items rendered from transcluded content; they have no line to write to.
    pub detached: Vec<ItemId>,
    /// Ids that match no rendered item.
    pub unknown: Vec<ItemId>,
}

impl SyncOutcome {
    pub fn changed(&self) -> bool {
        !self.applied.is_empty()
    }
}

/// Writes `states` back into the source lines their items were rendered from.
///
/// The view must have been rendered from `state`; a stale view is rejected
/// instead of being applied to lines it no longer describes.
pub fn reconcile(
    state: &DocumentState,
    view: &ViewModel,
    states: &[CheckboxState],
) -> Result<SyncOutcome> {
    if view.name != state.name || view.revision != state.revision {
        return Err(CheckpadError::Api(format!(
            "View of {} (revision {}) does not match revision {}",
            view.name, view.revision, state.revision
        )));
    }

    let mut lines: Vec<String> = state.source.split('\n').map(str::to_string).collect();
    let mut applied = Vec::new();
    let mut detached = Vec::new();
    let mut unknown = Vec::new();

    for cb in states {
        let Some(item) = view.item(cb.id) else {
            unknown.push(cb.id);
            continue;
        };
        let Some(line_no) = item.source_line else {
            detached.push(cb.id);
            continue;
        };
        match lines.get(line_no).and_then(|l| set_state(l, cb.checked)) {
            Some(rewritten) => {
                if rewritten != lines[line_no] {
                    lines[line_no] = rewritten;
                    applied.push(cb.id);
                }
            }
            None => unknown.push(cb.id),
        }
    }

    if !detached.is_empty() {
        log::warn!(
            "{}: {} item(s) come from transcluded documents and were not written back",
            state.name,
            detached.len()
        );
    }
    if !unknown.is_empty() {
        log::warn!("{}: unknown checklist ids {:?}", state.name, unknown);
    }

    let document = if applied.is_empty() {
        state.clone()
    } else {
        state.with_source(lines.join("\n"))
    };

    Ok(SyncOutcome {
        document,
        applied,
        detached,
        unknown,
    })
}
