//! Report rendering for console, JSON and Markdown output

pub mod formatter;
pub mod report;

pub use formatter::{ReportGenerator, save_report_to_file};
pub use report::RelevanceReport;
