//! # Task Aggregation
//!
//! Groups checkbox items under task headings and turns their estimates into
//! per-task and whole-document figures. Every number shown in the terminal and
//! baked into an export comes from here.
//!
//! ## Tasks
//!
//! A task starts at a level-one heading whose text begins with `Tarea:` and
//! runs until the next such heading:
//!
//! ```text
//! # Tarea: Backend              task "Backend"
//!
//! (estimate:: [reemplazar])     placeholder, replaced with the computed figure
//!
//! - [ ] api (estimate:: 1h)     60 min
//! - [ ] db                      nothing
//!   - [ ] schema (estimate:: 20m)   20 min
//! ```
//!
//! Each item contributes the first estimate of its label, or, when the label
//! has none, the first estimate anywhere in its list item. Items before the
//! first task heading still count toward progress but belong to no task.
//!
//! ## Margin
//!
//! Task totals get a 30% margin and a 15 minute floor. The remaining-time
//! figure applies the margin per item and then once more to the sum; both
//! steps are intentional and the export script does the same.

use crate::estimate::{first_estimate_minutes, label_minutes, ESTIMATE_KEY};
use crate::view::{BlockKind, ViewItem, ViewModel};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;
use std::collections::BTreeMap;

pub const TASK_PREFIX: &str = "Tarea:";
pub const MARGIN: f64 = 1.3;
pub const MIN_TASK_MINUTES: i64 = 15;
pub const MIN_TASK_HOURS: f64 = 0.25;

static PLACEHOLDER_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\(estimate::\s*\[reemplazar\]\)").expect("placeholder pattern is valid")
});

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TaskEstimate {
    pub name: String,
    /// Block index of the task heading.
    pub heading_block: usize,
    /// Block index of the `(estimate:: [reemplazar])` paragraph, if any.
    pub placeholder_block: Option<usize>,
    /// Item indices attributed to this task.
    pub items: Vec<usize>,
    pub raw_minutes: f64,
    pub final_minutes: i64,
    pub hours: f64,
}

impl TaskEstimate {
    fn new(name: String, heading_block: usize) -> Self {
        Self {
            name,
            heading_block,
            placeholder_block: None,
            items: Vec::new(),
            raw_minutes: 0.0,
            final_minutes: 0,
            hours: 0.0,
        }
    }

    fn finalize(&mut self) {
        let minutes = (self.raw_minutes * MARGIN).round() as i64;
        let hours = minutes as f64 / 60.0;
        if hours < MIN_TASK_HOURS {
            self.hours = MIN_TASK_HOURS;
            self.final_minutes = MIN_TASK_MINUTES;
        } else {
            self.hours = round2(hours);
            self.final_minutes = minutes;
        }
    }

    /// Text that replaces the placeholder paragraph.
    pub fn placeholder_text(&self) -> String {
        format!("(estimate:: {:.2}h / {}min)", self.hours, self.final_minutes)
    }
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

fn task_name(heading: &str) -> Option<String> {
    heading
        .trim()
        .starts_with(TASK_PREFIX)
        .then(|| heading.replacen(TASK_PREFIX, "", 1).trim().to_string())
}

/// Text an item's estimate is read from.
fn estimate_text(item: &ViewItem) -> &str {
    if item.label.contains(ESTIMATE_KEY) {
        &item.label
    } else {
        &item.text
    }
}

/// Walks the top-level blocks and sums item estimates per task.
pub fn aggregate_tasks(view: &ViewModel) -> Vec<TaskEstimate> {
    let mut tasks: Vec<TaskEstimate> = Vec::new();
    let mut awaiting_placeholder = false;

    for (idx, block) in view.blocks.iter().enumerate() {
        if block.is_heading(1) {
            if let Some(name) = task_name(&block.text) {
                tasks.push(TaskEstimate::new(name, idx));
                awaiting_placeholder = true;
                continue;
            }
        }

        let Some(task) = tasks.last_mut() else {
            continue;
        };

        match &block.kind {
            BlockKind::Paragraph if awaiting_placeholder => {
                awaiting_placeholder = false;
                if PLACEHOLDER_RE.is_match(&block.text) {
                    task.placeholder_block = Some(idx);
                }
            }
            BlockKind::List { items } => {
                for &item in items {
                    task.items.push(item);
                    if let Some(minutes) = first_estimate_minutes(estimate_text(&view.items[item])) {
                        task.raw_minutes += minutes;
                    }
                }
            }
            _ => {}
        }
    }

    for task in &mut tasks {
        task.finalize();
    }
    tasks
}

/// Placeholder paragraph replacements, keyed by block index.
pub fn placeholder_replacements(tasks: &[TaskEstimate]) -> BTreeMap<usize, String> {
    tasks
        .iter()
        .filter_map(|task| {
            task.placeholder_block
                .map(|block| (block, task.placeholder_text()))
        })
        .collect()
}

/// HTML of `view` with every task placeholder replaced by its estimate.
pub fn apply_task_estimates(view: &ViewModel, tasks: &[TaskEstimate]) -> String {
    view.to_html_with(&view.checked_states(), &placeholder_replacements(tasks))
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ProgressSnapshot {
    pub checked: usize,
    pub total: usize,
    pub percentage: u32,
    pub total_estimate_hours: f64,
}

impl ProgressSnapshot {
    /// The one-line summary shown next to the progress bar.
    pub fn summary_line(&self) -> String {
        format!(
            "{}% completado ({} de {} pasos) - Estimado total: {}h",
            self.percentage, self.checked, self.total, self.total_estimate_hours
        )
    }

    pub fn percent_text(&self) -> String {
        format!("Progreso: {}%", self.percentage)
    }

    pub fn steps_text(&self) -> String {
        format!("Pasos: {} de {} completados", self.checked, self.total)
    }
}

pub fn progress(items: &[ViewItem], total_estimate_hours: f64) -> ProgressSnapshot {
    let total = items.len();
    let checked = items.iter().filter(|item| item.checked).count();
    let percentage = if total == 0 {
        0
    } else {
        (checked as f64 / total as f64 * 100.0).round() as u32
    };
    ProgressSnapshot {
        checked,
        total,
        percentage,
        total_estimate_hours,
    }
}

/// Minutes left, from minute-valued labels of unchecked items.
pub fn remaining_minutes(items: &[ViewItem]) -> i64 {
    let remaining: f64 = items
        .iter()
        .filter(|item| !item.checked)
        .filter_map(|item| label_minutes(&item.label))
        .map(|minutes| minutes * MARGIN)
        .sum();
    (remaining * MARGIN).round() as i64
}

/// Sum of task hours (two decimals) and of task minutes.
pub fn total_time(tasks: &[TaskEstimate]) -> (f64, i64) {
    let hours: f64 = tasks.iter().map(|task| task.hours).sum();
    let minutes: i64 = tasks.iter().map(|task| task.final_minutes).sum();
    (round2(hours), minutes)
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RemainingTime {
    pub remaining_minutes: i64,
    pub remaining_hours: f64,
    pub total_hours: f64,
    pub total_minutes: i64,
}

impl RemainingTime {
    pub fn compute(items: &[ViewItem], tasks: &[TaskEstimate]) -> Self {
        let remaining_minutes = remaining_minutes(items);
        let (total_hours, total_minutes) = total_time(tasks);
        Self {
            remaining_minutes,
            remaining_hours: remaining_minutes as f64 / 60.0,
            total_hours,
            total_minutes,
        }
    }

    pub fn line(&self) -> String {
        format!(
            "⏳ Tiempo restante: {:.2}h de {:.2}h ó {}min de {}min",
            self.remaining_hours, self.total_hours, self.remaining_minutes, self.total_minutes
        )
    }
}

/// Every figure derived from one view.
#[derive(Debug, Clone, Serialize)]
pub struct Summary {
    pub progress: ProgressSnapshot,
    pub tasks: Vec<TaskEstimate>,
    pub remaining: RemainingTime,
}

impl Summary {
    pub fn of(view: &ViewModel) -> Self {
        let tasks = aggregate_tasks(view);
        Self {
            progress: progress(&view.items, view.coarse_estimate_hours),
            remaining: RemainingTime::compute(&view.items, &tasks),
            tasks,
        }
    }
}
