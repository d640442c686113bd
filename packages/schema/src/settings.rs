use crate::module::Module;
use serde::{Deserialize, Serialize};

/// Document-wide settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmailSettings {
    pub subject: String,
    pub preheader: String,
    pub background_color: String,
    /// Width of the content column in pixels
    pub content_width: u32,
}

impl Default for EmailSettings {
    fn default() -> Self {
        Self {
            subject: String::new(),
            preheader: String::new(),
            background_color: "#ffffff".to_string(),
            content_width: 600,
        }
    }
}

/// The whole email document: top-level modules plus settings
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EmailBuilderState {
    pub modules: Vec<Module>,
    #[serde(default)]
    pub settings: EmailSettings,
}

impl EmailBuilderState {
    pub fn new() -> Self {
        Self::default()
    }
}
