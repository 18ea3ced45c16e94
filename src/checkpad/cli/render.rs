//! # Rendering Module
//!
//! Turns command results into terminal text through the templates in
//! [`super::templates`].
//!
//! Layout math (widths, truncation, padding) stays in Rust because it has to
//! be Unicode aware. Templates pick styles by name through the `style` filter;
//! colors are applied only when stdout supports them.

use super::styles::{self, names};
use super::templates::{
    CONFIG_TEMPLATE, LIST_TEMPLATE, MESSAGES_TEMPLATE, REPORT_TEMPLATE, TEXT_LIST_TEMPLATE,
};
use checkpad::api::{CmdMessage, DocumentReport, MessageLevel};
use checkpad::checklist::ChecklistLine;
use checkpad::config::CheckpadConfig;
use checkpad::source::DocumentEntry;
use chrono::{DateTime, Utc};
use console::Term;
use minijinja::{Environment, Value};
use serde::Serialize;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

pub const LINE_WIDTH: usize = 80;
pub const TIME_WIDTH: usize = 16;

#[derive(Serialize)]
struct DocumentLine {
    name: String,
    padding: String,
    time_ago: String,
}

#[derive(Serialize)]
struct ListData {
    documents: Vec<DocumentLine>,
}

#[derive(Serialize)]
struct StyledLine {
    text: String,
    style: &'static str,
}

#[derive(Serialize)]
struct TaskLine {
    name: String,
    estimate: String,
}

#[derive(Serialize)]
struct ReportData {
    title: String,
    lines: Vec<StyledLine>,
    tasks: Vec<TaskLine>,
    progress: String,
    remaining: String,
}

#[derive(Serialize)]
struct ConfigEntry {
    key: String,
    value: String,
    style: &'static str,
}

#[derive(Serialize)]
struct ConfigData {
    entries: Vec<ConfigEntry>,
}

#[derive(Serialize)]
struct TextListData {
    lines: Vec<String>,
    line_style: &'static str,
}

#[derive(Serialize)]
struct MessageData {
    content: String,
    style: &'static str,
}

#[derive(Serialize)]
struct MessagesData {
    messages: Vec<MessageData>,
}

fn use_color(choice: Option<bool>) -> bool {
    choice.unwrap_or_else(|| Term::stdout().features().colors_supported())
}

fn render_template<T: Serialize>(
    template: &str,
    data: &T,
    use_color: bool,
) -> Result<String, minijinja::Error> {
    let mut env = Environment::new();
    env.add_filter("style", move |value: Value, name: String| -> String {
        styles::apply(&name, &value.to_string(), use_color)
    });
    env.add_template("_inline", template)?;
    let tmpl = env.get_template("_inline")?;
    tmpl.render(data)
}

/// Document names with their modification age, one per line.
pub fn render_document_list(documents: &[DocumentEntry]) -> String {
    render_document_list_internal(documents, None)
}

fn render_document_list_internal(documents: &[DocumentEntry], color: Option<bool>) -> String {
    let available = LINE_WIDTH.saturating_sub(TIME_WIDTH + 2);
    let lines = documents
        .iter()
        .map(|doc| {
            let name = truncate_to_width(&doc.name, available);
            let padding = " ".repeat(available.saturating_sub(name.width()));
            DocumentLine {
                name,
                padding,
                time_ago: doc.modified.map(format_time_ago).unwrap_or_default(),
            }
        })
        .collect();

    render_template(
        LIST_TEMPLATE,
        &ListData { documents: lines },
        use_color(color),
    )
    .unwrap_or_else(|e| format!("Render error: {}\n", e))
}

fn line_style(line: &str) -> &'static str {
    match ChecklistLine::parse(line) {
        Some(item) if item.checked => names::CHECKED,
        Some(_) => names::ITEM,
        None if line.trim_start().starts_with('#') => names::HEADING,
        None => names::REGULAR,
    }
}

/// The numbered checklist followed by task estimates, progress and
/// remaining time.
pub fn render_report(report: &DocumentReport) -> String {
    render_report_internal(report, None)
}

fn render_report_internal(report: &DocumentReport, color: Option<bool>) -> String {
    let lines = report
        .numbered_text
        .split('\n')
        .map(|line| StyledLine {
            text: line.to_string(),
            style: line_style(line),
        })
        .collect();
    let tasks = report
        .summary
        .tasks
        .iter()
        .map(|task| TaskLine {
            name: task.name.clone(),
            estimate: format!("{:.2}h / {}min", task.hours, task.final_minutes),
        })
        .collect();

    let data = ReportData {
        title: report.name.clone(),
        lines,
        tasks,
        progress: report.summary.progress.summary_line(),
        remaining: report.summary.remaining.line(),
    };

    render_template(REPORT_TEMPLATE, &data, use_color(color))
        .unwrap_or_else(|e| format!("Render error: {}\n", e))
}

pub fn render_config(config: &CheckpadConfig) -> String {
    render_config_internal(config, None)
}

fn render_config_internal(config: &CheckpadConfig, color: Option<bool>) -> String {
    let entries = config
        .entries()
        .into_iter()
        .map(|(key, value)| {
            if value.is_empty() {
                ConfigEntry {
                    key,
                    value: "(unset)".to_string(),
                    style: names::MUTED,
                }
            } else {
                ConfigEntry {
                    key,
                    value,
                    style: names::REGULAR,
                }
            }
        })
        .collect();

    render_template(CONFIG_TEMPLATE, &ConfigData { entries }, use_color(color))
        .unwrap_or_else(|e| format!("Render error: {}\n", e))
}

/// Plain lines such as completion suggestions or written paths.
pub fn render_text_list(lines: &[String]) -> String {
    let data = TextListData {
        lines: lines.to_vec(),
        line_style: names::REGULAR,
    };
    render_template(TEXT_LIST_TEMPLATE, &data, use_color(None)).unwrap_or_else(|_| {
        lines.iter().map(|line| format!("{}\n", line)).collect()
    })
}

pub fn render_messages(messages: &[CmdMessage]) -> String {
    render_messages_internal(messages, None)
}

fn render_messages_internal(messages: &[CmdMessage], color: Option<bool>) -> String {
    if messages.is_empty() {
        return String::new();
    }

    let data = MessagesData {
        messages: messages
            .iter()
            .map(|msg| MessageData {
                content: msg.content.clone(),
                style: match msg.level {
                    MessageLevel::Info => names::INFO,
                    MessageLevel::Success => names::SUCCESS,
                    MessageLevel::Warning => names::WARNING,
                    MessageLevel::Error => names::ERROR,
                },
            })
            .collect(),
    };

    render_template(MESSAGES_TEMPLATE, &data, use_color(color)).unwrap_or_else(|_| {
        messages
            .iter()
            .map(|m| format!("{}\n", m.content))
            .collect()
    })
}

pub fn print_messages(messages: &[CmdMessage]) {
    let output = render_messages(messages);
    if !output.is_empty() {
        print!("{}", output);
    }
}

fn truncate_to_width(s: &str, max_width: usize) -> String {
    let mut result = String::new();
    let mut current_width = 0;
    let limit = max_width.saturating_sub(1);

    for c in s.chars() {
        let char_width = c.width().unwrap_or(0);
        if current_width + char_width > limit {
            result.push('…');
            return result;
        }
        result.push(c);
        current_width += char_width;
    }

    result
}

fn format_time_ago(timestamp: DateTime<Utc>) -> String {
    let duration = Utc::now().signed_duration_since(timestamp);
    let time_str = timeago::Formatter::new().convert(duration.to_std().unwrap_or_default());
    format!("{:>width$}", time_str, width = TIME_WIDTH)
}

#[cfg(test)]
mod tests {
    use super::*;
    use checkpad::aggregate::Summary;
    use checkpad::model::DocumentState;
    use checkpad::source::memory::InMemorySource;
    use checkpad::view::render;

    fn sample_report() -> DocumentReport {
        let source = "# Tarea: A\n- [ ] step (estimate:: 30m)\n- [x] step2 (estimate:: 1h)";
        let view = render(
            &DocumentState::new("plan.md", source),
            &InMemorySource::new(),
        );
        DocumentReport {
            name: view.name.clone(),
            revision: view.revision,
            numbered_text: view.numbered_text.clone(),
            items: view.items.clone(),
            summary: Summary::of(&view),
        }
    }

    #[test]
    fn test_report_plain_output() {
        let output = render_report_internal(&sample_report(), Some(false));
        assert!(output.starts_with("plan.md\n"));
        assert!(output.contains("- [ ] 1. step (estimate:: 30m)\n"));
        assert!(output.contains("- [x] 2. step2 (estimate:: 1h)\n"));
        assert!(output.contains("A  1.95h / 117min\n"));
        assert!(output.contains("50% completado (1 de 2 pasos)"));
        assert!(output.contains("Tiempo restante"));
    }

    #[test]
    fn test_line_styles() {
        assert_eq!(line_style("- [x] 1. done"), names::CHECKED);
        assert_eq!(line_style("  - [ ] 2. todo"), names::ITEM);
        assert_eq!(line_style("# Tarea: A"), names::HEADING);
        assert_eq!(line_style("text"), names::REGULAR);
    }

    #[test]
    fn test_document_list_truncates_long_names() {
        let long = format!("{}.md", "x".repeat(120));
        let output = render_document_list_internal(&[DocumentEntry::new(long)], Some(false));
        assert!(output.contains('…'));
        assert!(output.trim_end().width() <= LINE_WIDTH);
    }

    #[test]
    fn test_empty_list_renders_nothing() {
        assert_eq!(render_document_list_internal(&[], Some(false)), "");
    }

    #[test]
    fn test_config_shows_unset_values() {
        let output = render_config_internal(&CheckpadConfig::default(), Some(false));
        assert!(output.contains("docs-dir = markdown-files\n"));
        assert!(output.contains("server-url = (unset)\n"));
    }

    #[test]
    fn test_messages_plain() {
        let messages = vec![CmdMessage::success("done"), CmdMessage::error("bad")];
        assert_eq!(
            render_messages_internal(&messages, Some(false)),
            "done\nbad\n"
        );
    }
}
