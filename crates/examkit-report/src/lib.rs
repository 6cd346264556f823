//! examkit-report: rendering grade reports for sharing.
//!
//! Turns an [`examkit_core::ExamReport`] into a self-contained HTML page.

pub mod html;

pub use html::{generate_html, write_html_report};
