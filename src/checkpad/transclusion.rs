//! # Transclusion
//!
//! A document can pull in another document, or one section of it, with an
//! embed reference on a single line:
//!
//! ```text
//! ![[notes]]            whole notes.md
//! ![[notes#Intro]]      the "Intro" heading of notes.md and its body
//! ```
//!
//! Resolution is textual and runs before front-matter stripping, numbering
//! and rendering, so embedded checklist items are numbered together with the
//! host document's own items.
//!
//! ## Resolution Rules
//!
//! - The reference is trimmed and split on the first `#`. `.md` is appended
//!   to the path when missing.
//! - Each distinct path is fetched once per [`resolve`] call.
//! - A section is located by a heading line of any level whose text matches
//!   the section name, ignoring case. The embedded text is the heading line and
//!   the body up to the next heading, each trimmed.
//! - A failed fetch or a missing section becomes an inline `**Error:**` line.
//!   Rendering continues.
//!
//! Embedded content is not scanned again: a reference inside a transcluded
//! document is left verbatim.
//!
//! ## Line Origins
//!
//! [`Expansion`] remembers, for every output line, whether it came from the
//! host document and from which line. Sync uses this to write checkbox states
//! back only where the host document actually holds them.

use crate::checklist::{front_matter_blocks, is_checklist_line};
use crate::source::{with_document_ext, DocumentSource};
use once_cell::sync::Lazy;
use regex::{Regex, RegexBuilder};
use std::collections::HashMap;

static REFERENCE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"!\[\[(.*?)\]\]").expect("reference pattern is valid"));

/// Where an output line of an [`Expansion`] came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineOrigin {
    /// Line of the host document, zero-based.
    Source(usize),
    /// Embedded text, or a line with no single counterpart in the host.
    Transcluded,
}

impl LineOrigin {
    pub fn source_line(self) -> Option<usize> {
        match self {
            LineOrigin::Source(line) => Some(line),
            LineOrigin::Transcluded => None,
        }
    }
}

/// A parsed `![[path#section]]` reference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reference {
    pub path: String,
    pub section: Option<String>,
}

impl Reference {
    pub fn parse(raw: &str) -> Self {
        let raw = raw.trim();
        let (path, section) = match raw.split_once('#') {
            Some((path, rest)) => {
                let section = rest.split('#').next().unwrap_or_default();
                (path, (!section.is_empty()).then(|| section.to_string()))
            }
            None => (raw, None),
        };
        Self {
            path: with_document_ext(path),
            section,
        }
    }
}

pub fn file_error(path: &str) -> String {
    format!("**Error:** No se pudo cargar el archivo: {}", path)
}

pub fn section_error(section: &str) -> String {
    format!("**Error:** No se encontró la sección \"{}\".", section)
}

/// Extracts a section (heading line plus body) from `content`.
pub fn extract_section(content: &str, section: &str) -> Option<String> {
    let pattern = format!(
        r"(^|\n)(#+\s*{}\s*\n)([\s\S]*?)(\n#+|$)",
        regex::escape(section)
    );
    let re = RegexBuilder::new(&pattern)
        .case_insensitive(true)
        .build()
        .ok()?;
    let caps = re.captures(content)?;
    Some(format!("{}\n{}", caps[2].trim(), caps[3].trim()))
}

/// Markdown after transclusion, one entry per output line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Expansion {
    pub lines: Vec<String>,
    pub origins: Vec<LineOrigin>,
}

impl Expansion {
    /// An expansion of `source` with nothing substituted.
    pub fn identity(source: &str) -> Self {
        let lines: Vec<String> = source.split('\n').map(str::to_string).collect();
        let origins = (0..lines.len()).map(LineOrigin::Source).collect();
        Self { lines, origins }
    }

    pub fn text(&self) -> String {
        self.lines.join("\n")
    }

    /// Collapses `---` blocks into one empty line each, keeping origins aligned.
    pub fn strip_front_matter(self) -> Self {
        let blocks = front_matter_blocks(&self.lines);
        if blocks.is_empty() {
            return self;
        }

        let mut lines = Vec::with_capacity(self.lines.len());
        let mut origins = Vec::with_capacity(self.origins.len());
        let mut next = 0;
        for (start, end) in blocks {
            lines.extend_from_slice(&self.lines[next..start]);
            origins.extend_from_slice(&self.origins[next..start]);
            lines.push(String::new());
            origins.push(LineOrigin::Transcluded);
            next = end + 1;
        }
        lines.extend_from_slice(&self.lines[next..]);
        origins.extend_from_slice(&self.origins[next..]);
        Self { lines, origins }
    }
}

/// Resolves every reference in `source`, fetching through `docs`.
pub fn resolve<S: DocumentSource + ?Sized>(source: &str, docs: &S) -> Expansion {
    let mut cache: HashMap<String, Option<String>> = HashMap::new();
    let mut substitutions: HashMap<&str, String> = HashMap::new();

    // Worklist of distinct references, in order of first appearance.
    let worklist: Vec<&str> = {
        let mut seen = Vec::new();
        for caps in REFERENCE_RE.captures_iter(source) {
            let token = caps.get(0).map_or("", |m| m.as_str());
            if !seen.contains(&token) {
                seen.push(token);
            }
        }
        seen
    };

    for token in worklist {
        let inner = &token[3..token.len() - 2];
        let reference = Reference::parse(inner);
        let content = cache
            .entry(reference.path.clone())
            .or_insert_with(|| match docs.fetch(&reference.path) {
                Ok(text) => {
                    log::debug!("transcluded {}", reference.path);
                    Some(text)
                }
                Err(e) => {
                    log::warn!("cannot transclude {}: {}", reference.path, e);
                    None
                }
            })
            .as_deref();

        let replacement = match (content, &reference.section) {
            (None, _) => file_error(&reference.path),
            (Some(text), None) => text.to_string(),
            (Some(text), Some(section)) => {
                extract_section(text, section).unwrap_or_else(|| section_error(section))
            }
        };
        substitutions.insert(token, replacement);
    }

    if substitutions.is_empty() {
        return Expansion::identity(source);
    }

    let mut lines = Vec::new();
    let mut origins = Vec::new();
    for (idx, line) in source.split('\n').enumerate() {
        if !REFERENCE_RE.is_match(line) {
            lines.push(line.to_string());
            origins.push(LineOrigin::Source(idx));
            continue;
        }

        let expanded = REFERENCE_RE.replace_all(line, |caps: &regex::Captures| {
            let token = caps.get(0).map_or("", |m| m.as_str());
            substitutions.get(token).cloned().unwrap_or_default()
        });
        let keeps_item = is_checklist_line(line);
        for (n, piece) in expanded.split('\n').enumerate() {
            lines.push(piece.to_string());
            origins.push(if n == 0 && keeps_item {
                LineOrigin::Source(idx)
            } else {
                LineOrigin::Transcluded
            });
        }
    }

    Expansion { lines, origins }
}
