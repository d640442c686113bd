//! # Default Factory
//!
//! Canonical, fully-populated instances for each module kind. Composite
//! kinds get fresh ids for every nested column and module.

use crate::error::SchemaResult;
use crate::id_generator::IdGenerator;
use crate::kind::ModuleKind;
use crate::module::*;

pub const DEFAULT_FONT_FAMILY: &str = "Arial, sans-serif";

/// Build the default module for `kind`
pub fn create_default(kind: ModuleKind, ids: &mut IdGenerator) -> Module {
    match kind {
        ModuleKind::Text => Module::Text(TextModule {
            id: ids.new_id(),
            content: "Enter your text here...".to_string(),
            font_size: 16,
            font_family: DEFAULT_FONT_FAMILY.to_string(),
            font_weight: "normal".to_string(),
            font_style: "normal".to_string(),
            text_decoration: "none".to_string(),
            text_align: Alignment::Left,
            line_height: 1.4,
            color: "#000000".to_string(),
            background_color: "#ffffff".to_string(),
            highlight_color: "#ffffff".to_string(),
            padding: Padding::new(18, 0, 18, 0),
        }),

        ModuleKind::Image => Module::Image(ImageModule {
            id: ids.new_id(),
            src: String::new(),
            alt: "Image".to_string(),
            width: "100%".to_string(),
            height: "auto".to_string(),
            alignment: Alignment::Center,
        }),

        ModuleKind::Button => Module::Button(ButtonModule {
            id: ids.new_id(),
            text: String::new(),
            href: String::new(),
            background_color: "#007bff".to_string(),
            text_color: "#ffffff".to_string(),
            width: "auto".to_string(),
            height: "auto".to_string(),
            padding: Padding::new(12, 24, 12, 24),
            alignment: Alignment::Left,
            border_color: "#007bff".to_string(),
            border_width: 0,
            border_radius: 4,
            font_family: DEFAULT_FONT_FAMILY.to_string(),
            font_weight: "normal".to_string(),
            font_size: 14,
        }),

        ModuleKind::Divider => Module::Divider(DividerModule {
            id: ids.new_id(),
            height: 1,
            color: "#cccccc".to_string(),
            style: DividerStyle::Solid,
        }),

        ModuleKind::Spacer => Module::Spacer(SpacerModule {
            id: ids.new_id(),
            height: 30,
            background_color: "transparent".to_string(),
        }),

        ModuleKind::ImageText => {
            let id = ids.new_id();
            let image_column = Column {
                id: ids.new_id(),
                modules: vec![create_default(ModuleKind::Image, ids)],
            };
            let text_column = Column {
                id: ids.new_id(),
                modules: vec![create_default(ModuleKind::Text, ids)],
            };

            Module::ImageText(ImageTextModule {
                id,
                gap: 16,
                columns: vec![image_column, text_column],
            })
        }

        ModuleKind::Columns => {
            let id = ids.new_id();
            let columns = (0..2).map(|_| Column::empty(ids.new_id())).collect();

            Module::Columns(ColumnsModule {
                id,
                layout: "2".to_string(),
                gap: 16,
                background_color: "transparent".to_string(),
                columns,
            })
        }

        ModuleKind::Code => Module::Code(CodeModule {
            id: ids.new_id(),
            code: "// your code here".to_string(),
            language: "html".to_string(),
        }),

        ModuleKind::Social => Module::Social(SocialModule {
            id: ids.new_id(),
            links: SocialPlatform::ALL
                .iter()
                .map(|&platform| SocialLink {
                    platform,
                    url: String::new(),
                })
                .collect(),
        }),

        ModuleKind::Unsubscribe => Module::Unsubscribe(UnsubscribeModule {
            id: ids.new_id(),
            label: "Unsubscribe - Manage Preferences".to_string(),
            href: String::new(),
        }),
    }
}

/// Build the default module for a kind given by name
///
/// Fails with `UnknownModuleKind` for names outside the palette.
pub fn create_default_named(kind: &str, ids: &mut IdGenerator) -> SchemaResult<Module> {
    let kind = kind.parse::<ModuleKind>()?;
    Ok(create_default(kind, ids))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SchemaError;
    use crate::visitor::collect_ids;
    use std::collections::HashSet;

    #[test]
    fn test_every_kind_has_matching_type_and_id() {
        let mut ids = IdGenerator::from_seed("t");

        for kind in ModuleKind::ALL {
            let module = create_default(kind, &mut ids);
            assert_eq!(module.kind(), kind);
            assert!(!module.id().is_empty());
        }
    }

    #[test]
    fn test_two_calls_never_share_ids() {
        let mut ids = IdGenerator::from_seed("t");
        let mut seen = HashSet::new();

        for kind in ModuleKind::ALL {
            for _ in 0..2 {
                let module = create_default(kind, &mut ids);
                for id in collect_ids(std::slice::from_ref(&module)) {
                    assert!(seen.insert(id.clone()), "id {} reused", id);
                }
            }
        }
    }

    #[test]
    fn test_text_defaults() {
        let mut ids = IdGenerator::from_seed("t");
        match create_default(ModuleKind::Text, &mut ids) {
            Module::Text(text) => {
                assert_eq!(text.font_size, 16);
                assert_eq!(text.font_family, "Arial, sans-serif");
                assert_eq!(text.text_align, Alignment::Left);
                assert_eq!(text.color, "#000000");
                assert_eq!(text.padding, Padding::new(18, 0, 18, 0));
            }
            other => panic!("Expected text, got {:?}", other),
        }
    }

    #[test]
    fn test_columns_defaults() {
        let mut ids = IdGenerator::from_seed("t");
        match create_default(ModuleKind::Columns, &mut ids) {
            Module::Columns(cols) => {
                assert_eq!(cols.layout, "2");
                assert_eq!(cols.gap, 16);
                assert_eq!(cols.columns.len(), 2);
                assert!(cols.columns.iter().all(|c| c.modules.is_empty()));
                assert_ne!(cols.columns[0].id, cols.columns[1].id);
            }
            other => panic!("Expected columns, got {:?}", other),
        }
    }

    #[test]
    fn test_image_text_is_prepopulated() {
        let mut ids = IdGenerator::from_seed("t");
        let module = create_default(ModuleKind::ImageText, &mut ids);
        let columns = module.columns().unwrap();

        assert_eq!(columns.len(), 2);
        assert_eq!(columns[0].modules.len(), 1);
        assert_eq!(columns[0].modules[0].kind(), ModuleKind::Image);
        assert_eq!(columns[1].modules[0].kind(), ModuleKind::Text);

        // container + 2 columns + 2 children
        assert_eq!(collect_ids(std::slice::from_ref(&module)).len(), 5);
    }

    #[test]
    fn test_social_lists_every_platform_empty() {
        let mut ids = IdGenerator::from_seed("t");
        match create_default(ModuleKind::Social, &mut ids) {
            Module::Social(social) => {
                assert_eq!(social.links.len(), SocialPlatform::ALL.len());
                assert!(social.links.iter().all(|l| l.url.is_empty()));
            }
            other => panic!("Expected social, got {:?}", other),
        }
    }

    #[test]
    fn test_unknown_name_fails() {
        let mut ids = IdGenerator::from_seed("t");
        let err = create_default_named("video", &mut ids).unwrap_err();
        assert_eq!(err, SchemaError::UnknownModuleKind("video".to_string()));
        assert_eq!(ids.count(), 0, "no id is spent on a rejected kind");

        let module = create_default_named("spacer", &mut ids).unwrap();
        assert_eq!(module.kind(), ModuleKind::Spacer);
    }
}
