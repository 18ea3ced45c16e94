//! Named styles for terminal output.
//!
//! Templates refer to styles by meaning (`checked`, `time`, `warning`), never
//! by color. The `style` filter in [`super::render`] looks the name up here; an
//! unknown name is prefixed with `(!?)` so typos show up in the output.

use console::Style;
use once_cell::sync::Lazy;
use std::collections::HashMap;

/// Style identifiers shared between templates and renderers.
pub mod names {
    pub const REGULAR: &str = "regular";
    pub const MUTED: &str = "muted";
    pub const TITLE: &str = "title";
    pub const HEADING: &str = "heading";
    pub const ITEM: &str = "item";
    pub const CHECKED: &str = "checked";
    pub const PROGRESS: &str = "progress";
    pub const ESTIMATE: &str = "estimate";
    pub const TIME: &str = "time";
    pub const ERROR: &str = "error";
    pub const WARNING: &str = "warning";
    pub const SUCCESS: &str = "success";
    pub const INFO: &str = "info";
}

pub const MISSING_STYLE_INDICATOR: &str = "(!?)";

pub static CHECKPAD_THEME: Lazy<HashMap<&'static str, Style>> = Lazy::new(|| {
    let muted = Style::new().color256(245);
    HashMap::from([
        (names::REGULAR, Style::new()),
        (names::MUTED, muted.clone()),
        (names::TITLE, Style::new().bold().underlined()),
        (names::HEADING, Style::new().bold()),
        (names::ITEM, Style::new()),
        (names::CHECKED, Style::new().green()),
        (names::PROGRESS, Style::new().cyan().bold()),
        (names::ESTIMATE, Style::new().yellow()),
        (names::TIME, muted.clone().italic()),
        (names::ERROR, Style::new().red().bold()),
        (names::WARNING, Style::new().yellow().bold()),
        (names::SUCCESS, Style::new().green()),
        (names::INFO, muted),
    ])
});

/// Applies the named style, or marks the text when the name is unknown.
pub fn apply(name: &str, text: &str, use_color: bool) -> String {
    match CHECKPAD_THEME.get(name) {
        Some(style) if use_color => style.apply_to(text).to_string(),
        Some(_) => text.to_string(),
        None => format!("{} {}", MISSING_STYLE_INDICATOR, text),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_mode_keeps_text() {
        assert_eq!(apply(names::CHECKED, "done", false), "done");
    }

    #[test]
    fn test_unknown_style_is_marked() {
        assert_eq!(apply("chekced", "done", false), "(!?) done");
    }
}
