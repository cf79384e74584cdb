//! Report generation modules.
//!
//! Charts and the terminal, Markdown, and JSON renderings of a page.

pub mod chart;
pub mod generator;

pub use chart::{Chart, ChartStyle};
pub use generator::{generate_json_report, generate_markdown_report, generate_terminal_report};
