//! # Mailcraft HTML Compiler
//!
//! Turns an email document into a standalone HTML page, plus the
//! `email-data.json` companion file.

mod compiler;
pub mod config;
pub mod export;
pub mod sanitize;

pub use compiler::{render, render_state, RenderOptions};
pub use config::ExportConfig;
pub use export::{export_project, html_filename, EmailData, Export, ExportError, EMAIL_DATA_FILENAME};
pub use sanitize::{sanitize_html, sanitize_url};
