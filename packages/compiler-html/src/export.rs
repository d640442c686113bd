//! # Export
//!
//! The two downloadable artifacts of a document: the rendered HTML page and
//! a JSON dump of the email data.

use crate::compiler::render;
use crate::config::ExportConfig;
use mailcraft_schema::{EmailBuilderState, EmailSettings, Module};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::info;

pub const EMAIL_DATA_FILENAME: &str = "email-data.json";
pub const FALLBACK_HTML_FILENAME: &str = "email-template.html";

#[derive(Error, Debug)]
pub enum ExportError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Filename for the HTML download derived from the subject line
///
/// Every character outside `[A-Za-z0-9]` becomes `-`; the result is
/// lowercased and gets a `.html` suffix.
pub fn html_filename(subject: &str) -> String {
    if subject.is_empty() {
        return FALLBACK_HTML_FILENAME.to_string();
    }

    let slug: String = subject
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() {
                c.to_ascii_lowercase()
            } else {
                '-'
            }
        })
        .collect();

    format!("{}.html", slug)
}

/// Contents of `email-data.json`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmailData {
    pub subject: String,
    pub preheader: String,
    pub html: String,
    pub modules: Vec<Module>,
    pub settings: EmailSettings,
}

impl EmailData {
    pub fn new(state: &EmailBuilderState, html: String) -> Self {
        Self {
            subject: state.settings.subject.clone(),
            preheader: state.settings.preheader.clone(),
            html,
            modules: state.modules.clone(),
            settings: state.settings.clone(),
        }
    }

    pub fn to_json(&self) -> Result<String, ExportError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Rendered artifacts ready to be written
#[derive(Debug, Clone)]
pub struct Export {
    pub html_filename: String,
    pub html: String,
    pub data: EmailData,
}

impl Export {
    pub fn from_state(state: &EmailBuilderState, config: &ExportConfig) -> Self {
        let html = render(&state.modules, &state.settings, &config.render_options());
        let html_filename = config
            .html_filename
            .clone()
            .unwrap_or_else(|| html_filename(&state.settings.subject));

        Self {
            html_filename,
            data: EmailData::new(state, html.clone()),
            html,
        }
    }

    /// Write both files into `dir`, creating it if needed
    ///
    /// Returns the paths written, HTML first.
    pub fn write_to(&self, dir: impl AsRef<Path>) -> Result<Vec<PathBuf>, ExportError> {
        let dir = dir.as_ref();
        std::fs::create_dir_all(dir)?;

        let html_path = dir.join(&self.html_filename);
        std::fs::write(&html_path, &self.html)?;

        let data_path = dir.join(EMAIL_DATA_FILENAME);
        std::fs::write(&data_path, self.data.to_json()?)?;

        info!(
            html = %html_path.display(),
            data = %data_path.display(),
            "Exported email"
        );

        Ok(vec![html_path, data_path])
    }
}

/// Export `state` the way the project in `cwd` is configured
///
/// Reads `mailcraft.config.json` from `cwd` (defaults when absent) and writes
/// both files into its `outDir`, resolved against `cwd`.
pub fn export_project(state: &EmailBuilderState, cwd: impl AsRef<Path>) -> anyhow::Result<Vec<PathBuf>> {
    let cwd = cwd.as_ref();
    let config = ExportConfig::load(cwd)?;

    let export = Export::from_state(state, &config);
    Ok(export.write_to(config.out_path(cwd))?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DEFAULT_CONFIG_NAME;
    use mailcraft_schema::{create_default, IdGenerator, ModuleKind};

    fn state() -> EmailBuilderState {
        let mut ids = IdGenerator::from_seed("export");
        let mut state = EmailBuilderState::new();
        state.settings.subject = "Spring Sale!".to_string();
        state.settings.preheader = "Up to 50% off".to_string();
        state.modules.push(create_default(ModuleKind::ImageText, &mut ids));
        state
    }

    #[test]
    fn test_html_filename() {
        assert_eq!(html_filename("Spring Sale!"), "spring-sale-.html");
        assert_eq!(html_filename("Q3 Report"), "q3-report.html");
        assert_eq!(html_filename("Café"), "caf-.html");
        assert_eq!(html_filename(""), "email-template.html");
    }

    #[test]
    fn test_email_data_keeps_nested_ids() {
        let state = state();
        let export = Export::from_state(&state, &ExportConfig::default());

        let json = export.data.to_json().unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value["subject"], "Spring Sale!");
        assert_eq!(value["preheader"], "Up to 50% off");
        assert_eq!(value["html"], export.html.as_str());
        assert_eq!(value["settings"]["contentWidth"], 600);

        let nested_id = state.modules[0].columns().unwrap()[0].modules[0].id();
        assert_eq!(value["modules"][0]["columns"][0]["modules"][0]["id"], nested_id);

        let back: EmailData = serde_json::from_str(&json).unwrap();
        assert_eq!(back.modules, state.modules);
    }

    #[test]
    fn test_configured_filename_wins() {
        let config = ExportConfig {
            html_filename: Some("weekly.html".to_string()),
            ..Default::default()
        };
        let export = Export::from_state(&state(), &config);
        assert_eq!(export.html_filename, "weekly.html");
    }

    #[test]
    fn test_write_to_directory() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("dist");

        let export = Export::from_state(&state(), &ExportConfig::default());
        let written = export.write_to(&out).unwrap();

        assert_eq!(written.len(), 2);
        assert_eq!(written[0], out.join("spring-sale-.html"));
        assert_eq!(written[1], out.join(EMAIL_DATA_FILENAME));
        assert_eq!(std::fs::read_to_string(&written[0]).unwrap(), export.html);
    }

    #[test]
    fn test_export_project_uses_config() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join(DEFAULT_CONFIG_NAME),
            r#"{ "outDir": "out/mail", "htmlFilename": "weekly.html", "pretty": false }"#,
        )
        .unwrap();

        let written = export_project(&state(), dir.path()).unwrap();

        let out = dir.path().join("out/mail");
        assert_eq!(written, vec![out.join("weekly.html"), out.join(EMAIL_DATA_FILENAME)]);

        let html = std::fs::read_to_string(&written[0]).unwrap();
        assert!(!html.contains('\n'));
    }

    #[test]
    fn test_export_project_without_config_writes_to_dist() {
        let dir = tempfile::tempdir().unwrap();

        let written = export_project(&state(), dir.path()).unwrap();
        assert_eq!(written[0], dir.path().join("dist").join("spring-sale-.html"));
        assert!(written[1].exists());
    }
}
