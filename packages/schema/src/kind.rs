use crate::error::SchemaError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The closed palette of module kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ModuleKind {
    Text,
    Image,
    Button,
    Divider,
    Spacer,
    ImageText,
    Columns,
    Code,
    Social,
    Unsubscribe,
}

impl ModuleKind {
    /// Every kind, in palette order
    pub const ALL: [ModuleKind; 10] = [
        ModuleKind::Text,
        ModuleKind::Image,
        ModuleKind::Button,
        ModuleKind::Divider,
        ModuleKind::Spacer,
        ModuleKind::ImageText,
        ModuleKind::Columns,
        ModuleKind::Code,
        ModuleKind::Social,
        ModuleKind::Unsubscribe,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ModuleKind::Text => "text",
            ModuleKind::Image => "image",
            ModuleKind::Button => "button",
            ModuleKind::Divider => "divider",
            ModuleKind::Spacer => "spacer",
            ModuleKind::ImageText => "image-text",
            ModuleKind::Columns => "columns",
            ModuleKind::Code => "code",
            ModuleKind::Social => "social",
            ModuleKind::Unsubscribe => "unsubscribe",
        }
    }

    /// Containers own columns instead of direct content
    pub fn is_container(&self) -> bool {
        matches!(self, ModuleKind::Columns | ModuleKind::ImageText)
    }
}

impl fmt::Display for ModuleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ModuleKind {
    type Err = SchemaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ModuleKind::ALL
            .iter()
            .copied()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| SchemaError::UnknownModuleKind(s.to_string()))
    }
}
