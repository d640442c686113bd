use crate::compiler::RenderOptions;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const DEFAULT_CONFIG_NAME: &str = "mailcraft.config.json";

/// Export configuration file format
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportConfig {
    /// Directory the HTML and JSON files are written to
    #[serde(default = "default_out_dir")]
    pub out_dir: String,

    /// Fixed HTML filename; derived from the subject when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub html_filename: Option<String>,

    /// Pretty print HTML
    #[serde(default = "default_pretty")]
    pub pretty: bool,

    #[serde(default = "default_indent")]
    pub indent: String,
}

fn default_out_dir() -> String {
    "dist".to_string()
}

fn default_pretty() -> bool {
    true
}

fn default_indent() -> String {
    "  ".to_string()
}

impl ExportConfig {
    /// Load config from a directory
    pub fn load(cwd: impl AsRef<Path>) -> anyhow::Result<Self> {
        let config_path = cwd.as_ref().join(DEFAULT_CONFIG_NAME);

        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            let config: ExportConfig = serde_json::from_str(&content)?;
            Ok(config)
        } else {
            Ok(ExportConfig::default())
        }
    }

    /// Output directory resolved against `cwd`
    pub fn out_path(&self, cwd: impl AsRef<Path>) -> PathBuf {
        cwd.as_ref().join(&self.out_dir)
    }

    pub fn render_options(&self) -> RenderOptions {
        RenderOptions {
            pretty: self.pretty,
            indent: self.indent.clone(),
        }
    }
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            out_dir: default_out_dir(),
            html_filename: None,
            pretty: default_pretty(),
            indent: default_indent(),
        }
    }
}
