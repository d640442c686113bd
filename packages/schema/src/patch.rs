//! # Partial Updates
//!
//! Every module struct has a patch twin whose fields are all optional.
//! Merging a patch replaces exactly the provided fields (shallow merge);
//! ids are never part of a patch.

use crate::error::{SchemaError, SchemaResult};
use crate::kind::ModuleKind;
use crate::module::*;
use crate::settings::EmailSettings;
use serde::{Deserialize, Serialize};

macro_rules! patch_struct {
    ($(#[$meta:meta])* $patch:ident => $target:ident { $($field:ident : $ty:ty),* $(,)? }) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
        #[serde(rename_all = "camelCase")]
        pub struct $patch {
            $(
                #[serde(default, skip_serializing_if = "Option::is_none")]
                pub $field: Option<$ty>,
            )*
        }

        impl $patch {
            /// Overwrite the provided fields of `target`
            pub fn merge_into(self, target: &mut $target) {
                $(
                    if let Some(value) = self.$field {
                        target.$field = value;
                    }
                )*
            }

            pub fn is_empty(&self) -> bool {
                true $(&& self.$field.is_none())*
            }
        }
    };
}

patch_struct!(TextPatch => TextModule {
    content: String,
    font_size: u32,
    font_family: String,
    font_weight: String,
    font_style: String,
    text_decoration: String,
    text_align: Alignment,
    line_height: f64,
    color: String,
    background_color: String,
    highlight_color: String,
    padding: Padding,
});

patch_struct!(ImagePatch => ImageModule {
    src: String,
    alt: String,
    width: String,
    height: String,
    alignment: Alignment,
});

patch_struct!(ButtonPatch => ButtonModule {
    text: String,
    href: String,
    background_color: String,
    text_color: String,
    width: String,
    height: String,
    padding: Padding,
    alignment: Alignment,
    border_color: String,
    border_width: u32,
    border_radius: u32,
    font_family: String,
    font_weight: String,
    font_size: u32,
});

patch_struct!(DividerPatch => DividerModule {
    height: u32,
    color: String,
    style: DividerStyle,
});

patch_struct!(SpacerPatch => SpacerModule {
    height: u32,
    background_color: String,
});

patch_struct!(ImageTextPatch => ImageTextModule {
    gap: u32,
    columns: Vec<Column>,
});

patch_struct!(
    /// Providing `layout` or `columns` triggers column reconciliation
    ColumnsPatch => ColumnsModule {
        layout: String,
        gap: u32,
        background_color: String,
        columns: Vec<Column>,
    }
);

patch_struct!(CodePatch => CodeModule {
    code: String,
    language: String,
});

patch_struct!(SocialPatch => SocialModule {
    links: Vec<SocialLink>,
});

patch_struct!(UnsubscribePatch => UnsubscribeModule {
    label: String,
    href: String,
});

patch_struct!(SettingsPatch => EmailSettings {
    subject: String,
    preheader: String,
    background_color: String,
    content_width: u32,
});

/// Partial update for one module, tagged with the kind it applies to
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum ModulePatch {
    Text(TextPatch),
    Image(ImagePatch),
    Button(ButtonPatch),
    Divider(DividerPatch),
    Spacer(SpacerPatch),
    ImageText(ImageTextPatch),
    Columns(ColumnsPatch),
    Code(CodePatch),
    Social(SocialPatch),
    Unsubscribe(UnsubscribePatch),
}

impl ModulePatch {
    pub fn kind(&self) -> ModuleKind {
        match self {
            ModulePatch::Text(_) => ModuleKind::Text,
            ModulePatch::Image(_) => ModuleKind::Image,
            ModulePatch::Button(_) => ModuleKind::Button,
            ModulePatch::Divider(_) => ModuleKind::Divider,
            ModulePatch::Spacer(_) => ModuleKind::Spacer,
            ModulePatch::ImageText(_) => ModuleKind::ImageText,
            ModulePatch::Columns(_) => ModuleKind::Columns,
            ModulePatch::Code(_) => ModuleKind::Code,
            ModulePatch::Social(_) => ModuleKind::Social,
            ModulePatch::Unsubscribe(_) => ModuleKind::Unsubscribe,
        }
    }

    /// Replacement column list for a container, if the patch carries one
    pub fn columns(&self) -> Option<&[Column]> {
        match self {
            ModulePatch::Columns(p) => p.columns.as_deref(),
            ModulePatch::ImageText(p) => p.columns.as_deref(),
            _ => None,
        }
    }

    /// Layout descriptor, if this is a `columns` patch that sets one
    pub fn layout(&self) -> Option<&str> {
        match self {
            ModulePatch::Columns(p) => p.layout.as_deref(),
            _ => None,
        }
    }

    /// Patch that only replaces a container's columns
    pub fn replace_columns(kind: ModuleKind, columns: Vec<Column>) -> Option<Self> {
        match kind {
            ModuleKind::Columns => Some(ModulePatch::Columns(ColumnsPatch {
                columns: Some(columns),
                ..Default::default()
            })),
            ModuleKind::ImageText => Some(ModulePatch::ImageText(ImageTextPatch {
                columns: Some(columns),
                ..Default::default()
            })),
            _ => None,
        }
    }
}

impl Module {
    /// Shallow-merge a patch of the same kind into this module
    pub fn merge(&mut self, patch: ModulePatch) -> SchemaResult<()> {
        match (self, patch) {
            (Module::Text(m), ModulePatch::Text(p)) => p.merge_into(m),
            (Module::Image(m), ModulePatch::Image(p)) => p.merge_into(m),
            (Module::Button(m), ModulePatch::Button(p)) => p.merge_into(m),
            (Module::Divider(m), ModulePatch::Divider(p)) => p.merge_into(m),
            (Module::Spacer(m), ModulePatch::Spacer(p)) => p.merge_into(m),
            (Module::ImageText(m), ModulePatch::ImageText(p)) => p.merge_into(m),
            (Module::Columns(m), ModulePatch::Columns(p)) => p.merge_into(m),
            (Module::Code(m), ModulePatch::Code(p)) => p.merge_into(m),
            (Module::Social(m), ModulePatch::Social(p)) => p.merge_into(m),
            (Module::Unsubscribe(m), ModulePatch::Unsubscribe(p)) => p.merge_into(m),
            (module, patch) => {
                return Err(SchemaError::KindMismatch {
                    module_id: module.id().to_string(),
                    expected: module.kind(),
                    found: patch.kind(),
                })
            }
        }
        Ok(())
    }
}
