//! # View Rendering
//!
//! Turns a document into a [`ViewModel`]: the top-level block structure the
//! aggregator walks, the checkbox items with their states and texts, and
//! HTML fragments that can be reassembled with any set of checked states.
//!
//! ## Pipeline
//!
//! ```text
//! DocumentState ─► transclusion ─► front-matter strip ─► numbering ─► pulldown-cmark ─► ViewModel
//!                       │
//!                       └─► coarse estimate (hours in "Tarea" sections)
//! ```
//!
//! ## Checkbox Markup
//!
//! Task list markers are rendered as an input followed by a label that wraps
//! the item's own inline text, the same shape the export script queries:
//!
//! ```html
//! <li><input type="checkbox" id="checkbox0" data-item="1"><label for="checkbox0">1. plan</label></li>
//! ```
//!
//! The label closes at the end of the item's first paragraph, or where a
//! nested list begins, so nested items are never part of a parent's label.
//!
//! ## Item Identity
//!
//! Each [`ViewItem`] records the [`ItemId`] its line received from numbering
//! and, when the line belongs to the host document, that line's number in the
//! stored source. Checkboxes that numbering did not recognize (`* [ ]`,
//! ordered task lists) still render and count toward progress, but have no id.

use crate::checklist::{number_lines, set_state, NumberedDocument};
use crate::estimate::calculate_total_estimate;
use crate::model::{CheckboxState, DocumentState, ItemId};
use crate::source::DocumentSource;
use crate::transclusion::{resolve, LineOrigin};
use pulldown_cmark::{html, CowStr, Event, Options, Parser, Tag, TagEnd};
use serde::Serialize;
use std::collections::BTreeMap;
use std::ops::Range;

/// Kind of a top-level block, with what the aggregator needs from it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum BlockKind {
    Heading { level: u8 },
    Paragraph,
    /// Indices into [`ViewModel::items`] of every checkbox in the list, nested ones included.
    List { items: Vec<usize> },
    Other,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HtmlPart {
    Markup(String),
    Checkbox(usize),
}

#[derive(Debug, Clone)]
pub struct Block {
    pub kind: BlockKind,
    /// Plain text content, breaks kept as newlines.
    pub text: String,
    parts: Vec<HtmlPart>,
}

impl Block {
    pub fn is_heading(&self, level: u8) -> bool {
        matches!(self.kind, BlockKind::Heading { level: l } if l == level)
    }

    pub fn list_items(&self) -> &[usize] {
        match &self.kind {
            BlockKind::List { items } => items,
            _ => &[],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ViewItem {
    pub id: Option<ItemId>,
    /// Line of [`ViewModel::numbered_text`] holding the marker.
    pub line: usize,
    /// Line of the stored source this item was rendered from.
    pub source_line: Option<usize>,
    pub checked: bool,
    /// The item's own inline text, display number included.
    pub label: String,
    /// All text inside the list item, nested items included.
    pub text: String,
}

#[derive(Debug, Clone)]
pub struct ViewModel {
    pub name: String,
    pub revision: u64,
    pub blocks: Vec<Block>,
    pub items: Vec<ViewItem>,
    /// Coarse whole-document estimate, in hours.
    pub coarse_estimate_hours: f64,
    /// Markdown after transclusion, front-matter removal and numbering.
    pub numbered_text: String,
}

impl ViewModel {
    pub fn item(&self, id: ItemId) -> Option<&ViewItem> {
        self.items.iter().find(|item| item.id == Some(id))
    }

    /// Sets one item's state, keeping `numbered_text` in step.
    pub fn set_checked(&mut self, index: usize, checked: bool) {
        let Some(item) = self.items.get_mut(index) else {
            return;
        };
        item.checked = checked;
        let line = item.line;

        let mut lines: Vec<String> = self.numbered_text.split('\n').map(str::to_string).collect();
        if let Some(rewritten) = lines.get(line).and_then(|l| set_state(l, checked)) {
            lines[line] = rewritten;
            self.numbered_text = lines.join("\n");
        }
    }

    pub fn checked_states(&self) -> Vec<bool> {
        self.items.iter().map(|item| item.checked).collect()
    }

    /// States of every item that has an id.
    pub fn checkbox_states(&self) -> Vec<CheckboxState> {
        self.items
            .iter()
            .filter_map(|item| item.id.map(|id| CheckboxState::new(id, item.checked)))
            .collect()
    }

    pub fn all_checked(&self) -> bool {
        self.items.iter().all(|item| item.checked)
    }

    /// HTML of the whole document with the states captured at render time.
    pub fn to_html(&self) -> String {
        self.to_html_with(&self.checked_states(), &BTreeMap::new())
    }

    /// HTML with explicit checked states (by item index) and paragraph
    /// replacements (by block index).
    pub fn to_html_with(&self, checked: &[bool], replacements: &BTreeMap<usize, String>) -> String {
        let mut out = String::new();
        for (idx, block) in self.blocks.iter().enumerate() {
            if let Some(text) = replacements.get(&idx) {
                out.push_str("<p>");
                out.push_str(text);
                out.push_str("</p>\n");
                continue;
            }
            for part in &block.parts {
                match part {
                    HtmlPart::Markup(html) => out.push_str(html),
                    HtmlPart::Checkbox(item) => {
                        let state = checked
                            .get(*item)
                            .copied()
                            .unwrap_or(self.items[*item].checked);
                        out.push_str(&checkbox_markup(*item, self.items[*item].id, state));
                    }
                }
            }
        }
        out
    }
}

fn checkbox_markup(index: usize, id: Option<ItemId>, checked: bool) -> String {
    let data = id.map(|id| format!(" data-item=\"{}\"", id)).unwrap_or_default();
    let checked = if checked { " checked" } else { "" };
    format!(
        "<input type=\"checkbox\" id=\"checkbox{index}\"{data}{checked}><label for=\"checkbox{index}\">"
    )
}

fn parser_options() -> Options {
    Options::ENABLE_TABLES | Options::ENABLE_STRIKETHROUGH | Options::ENABLE_TASKLISTS
}

/// Full render pipeline for one document revision.
pub fn render<S: DocumentSource + ?Sized>(doc: &DocumentState, docs: &S) -> ViewModel {
    let expansion = resolve(&doc.source, docs);
    let coarse = calculate_total_estimate(&expansion.text());
    let expansion = expansion.strip_front_matter();
    let numbered = number_lines(&expansion.lines);

    let mut view = render_view(doc, &numbered, &expansion.origins);
    view.coarse_estimate_hours = coarse;
    view
}

/// Renders already-numbered text. `origins` maps each of its lines to the stored source.
pub fn render_view(
    doc: &DocumentState,
    numbered: &NumberedDocument,
    origins: &[LineOrigin],
) -> ViewModel {
    let markup = markup_text(numbered);
    let text = markup.as_str();
    let line_starts: Vec<usize> = std::iter::once(0)
        .chain(text.match_indices('\n').map(|(i, _)| i + 1))
        .collect();

    let mut builder = ViewBuilder {
        numbered,
        origins,
        line_starts: &line_starts,
        blocks: Vec::new(),
        items: Vec::new(),
        current: None,
    };
    for (event, range) in Parser::new_ext(text, parser_options()).into_offset_iter() {
        builder.push(event, range);
    }

    ViewModel {
        name: doc.name.clone(),
        revision: doc.revision,
        blocks: builder.blocks,
        items: builder.items,
        coarse_estimate_hours: calculate_total_estimate(&numbered.text),
        numbered_text: numbered.text.clone(),
    }
}

/// Numbered text as handed to the markdown parser.
///
/// `- [ ] 1. step` would open an ordered list inside the item, so the period
/// after each display number is escaped. Lines keep their positions.
fn markup_text(numbered: &NumberedDocument) -> String {
    numbered
        .text
        .split('\n')
        .zip(numbered.line_items.iter())
        .map(|(line, id)| match id {
            Some(id) => line.replacen(&format!("] {}.", id), &format!("] {}\\.", id), 1),
            None => line.to_string(),
        })
        .collect::<Vec<_>>()
        .join("\n")
}

struct ViewBuilder<'a, 'b> {
    numbered: &'b NumberedDocument,
    origins: &'b [LineOrigin],
    line_starts: &'b [usize],
    blocks: Vec<Block>,
    items: Vec<ViewItem>,
    current: Option<BlockBuilder<'a>>,
}

impl<'a, 'b> ViewBuilder<'a, 'b> {
    fn line_of(&self, offset: usize) -> usize {
        self.line_starts
            .partition_point(|&start| start <= offset)
            .saturating_sub(1)
    }

    fn push(&mut self, event: Event<'a>, range: Range<usize>) {
        if self.current.is_none() {
            if let Event::Start(tag) = &event {
                self.current = Some(BlockBuilder::new(block_kind(tag)));
            } else {
                // Standalone top-level event, such as a rule.
                let mut html = String::new();
                html::push_html(&mut html, std::iter::once(event));
                self.blocks.push(Block {
                    kind: BlockKind::Other,
                    text: String::new(),
                    parts: vec![HtmlPart::Markup(html)],
                });
                return;
            }
        }

        if let Event::TaskListMarker(checked) = event {
            let line = self.line_of(range.start);
            let id = self.numbered.line_items.get(line).copied().flatten();
            let source_line = id.and_then(|_| self.origins.get(line).and_then(|o| o.source_line()));
            self.items.push(ViewItem {
                id,
                line,
                source_line,
                checked,
                label: String::new(),
                text: String::new(),
            });
            let index = self.items.len() - 1;
            if let Some(block) = self.current.as_mut() {
                block.open_checkbox(index);
            }
            return;
        }

        let Some(block) = self.current.as_mut() else {
            return;
        };
        block.handle(event, &mut self.items);
        if block.depth == 0 {
            if let Some(block) = self.current.take() {
                self.blocks.push(block.finish(&mut self.items));
            }
        }
    }
}

fn block_kind(tag: &Tag) -> BlockKind {
    match tag {
        Tag::Heading { level, .. } => BlockKind::Heading {
            level: *level as u8,
        },
        Tag::Paragraph => BlockKind::Paragraph,
        Tag::List(_) => BlockKind::List { items: Vec::new() },
        _ => BlockKind::Other,
    }
}

#[derive(Default)]
struct ItemFrame {
    text: String,
    task: Option<usize>,
}

struct BlockBuilder<'a> {
    kind: BlockKind,
    text: String,
    parts: Vec<HtmlPart>,
    pending: Vec<Event<'a>>,
    depth: usize,
    frames: Vec<ItemFrame>,
    open_label: Option<usize>,
}

impl<'a> BlockBuilder<'a> {
    fn new(kind: BlockKind) -> Self {
        Self {
            kind,
            text: String::new(),
            parts: Vec::new(),
            pending: Vec::new(),
            depth: 0,
            frames: Vec::new(),
            open_label: None,
        }
    }

    fn flush(&mut self) {
        if self.pending.is_empty() {
            return;
        }
        let mut html = String::new();
        html::push_html(&mut html, self.pending.drain(..));
        self.parts.push(HtmlPart::Markup(html));
    }

    fn open_checkbox(&mut self, index: usize) {
        self.flush();
        self.parts.push(HtmlPart::Checkbox(index));
        if let BlockKind::List { items } = &mut self.kind {
            items.push(index);
        }
        if let Some(frame) = self.frames.last_mut() {
            frame.task = Some(index);
        }
        self.open_label = Some(index);
    }

    fn close_label(&mut self) {
        if self.open_label.take().is_some() {
            self.pending
                .push(Event::InlineHtml(CowStr::Borrowed("</label>")));
        }
    }

    fn push_text(&mut self, text: &str, items: &mut [ViewItem]) {
        self.text.push_str(text);
        for frame in &mut self.frames {
            frame.text.push_str(text);
        }
        if let Some(index) = self.open_label {
            items[index].label.push_str(text);
        }
    }

    fn handle(&mut self, event: Event<'a>, items: &mut [ViewItem]) {
        match &event {
            Event::Start(tag) => {
                if matches!(tag, Tag::List(_)) {
                    self.close_label();
                }
                if matches!(tag, Tag::Item) {
                    self.frames.push(ItemFrame::default());
                }
                self.depth += 1;
            }
            Event::End(tag) => {
                if matches!(tag, TagEnd::Paragraph | TagEnd::Item) {
                    self.close_label();
                }
                if matches!(tag, TagEnd::Item) {
                    if let Some(frame) = self.frames.pop() {
                        if let Some(index) = frame.task {
                            items[index].text = frame.text;
                        }
                    }
                }
                self.depth = self.depth.saturating_sub(1);
            }
            Event::Text(text) | Event::Code(text) => self.push_text(text, items),
            Event::SoftBreak | Event::HardBreak => self.push_text("\n", items),
            _ => {}
        }
        self.pending.push(event);
    }

    fn finish(mut self, items: &mut [ViewItem]) -> Block {
        self.close_label();
        while let Some(frame) = self.frames.pop() {
            if let Some(index) = frame.task {
                items[index].text = frame.text;
            }
        }
        self.flush();
        Block {
            kind: self.kind,
            text: self.text,
            parts: self.parts,
        }
    }
}
