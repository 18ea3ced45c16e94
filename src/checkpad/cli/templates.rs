//! Terminal output templates.
//!
//! Templates live as standalone `.tmp` files next to this module and are
//! embedded at compile time. They are minijinja templates; styling goes
//! through the `style` filter with names from [`super::styles::names`].
//!
//! Line breaks are explicit: every loop body ends with its own newline, so
//! blank lines in the output can be traced to a line in the template.

pub const LIST_TEMPLATE: &str = include_str!("templates/list.tmp");
pub const REPORT_TEMPLATE: &str = include_str!("templates/report.tmp");
pub const CONFIG_TEMPLATE: &str = include_str!("templates/config.tmp");
pub const TEXT_LIST_TEMPLATE: &str = include_str!("templates/text_list.tmp");
pub const MESSAGES_TEMPLATE: &str = include_str!("templates/messages.tmp");
