use crate::kind::ModuleKind;
use serde::{Deserialize, Serialize};

/// Box padding in pixels
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Padding {
    pub top: u32,
    pub right: u32,
    pub bottom: u32,
    pub left: u32,
}

impl Padding {
    pub fn new(top: u32, right: u32, bottom: u32, left: u32) -> Self {
        Self { top, right, bottom, left }
    }

    /// CSS shorthand: `"top right bottom left"`
    pub fn to_css(&self) -> String {
        format!(
            "{}px {}px {}px {}px",
            self.top, self.right, self.bottom, self.left
        )
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Alignment {
    #[default]
    Left,
    Center,
    Right,
}

impl Alignment {
    pub fn as_str(&self) -> &'static str {
        match self {
            Alignment::Left => "left",
            Alignment::Center => "center",
            Alignment::Right => "right",
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DividerStyle {
    #[default]
    Solid,
    Dashed,
    Dotted,
}

impl DividerStyle {
    pub fn as_str(&self) -> &'static str {
        match self {
            DividerStyle::Solid => "solid",
            DividerStyle::Dashed => "dashed",
            DividerStyle::Dotted => "dotted",
        }
    }
}

/// Social networks a social module can link to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SocialPlatform {
    Facebook,
    Instagram,
    X,
    Pinterest,
    Linkedin,
    Tiktok,
}

impl SocialPlatform {
    /// Display order of the icon row
    pub const ALL: [SocialPlatform; 6] = [
        SocialPlatform::Facebook,
        SocialPlatform::Instagram,
        SocialPlatform::X,
        SocialPlatform::Pinterest,
        SocialPlatform::Linkedin,
        SocialPlatform::Tiktok,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            SocialPlatform::Facebook => "Facebook",
            SocialPlatform::Instagram => "Instagram",
            SocialPlatform::X => "X",
            SocialPlatform::Pinterest => "Pinterest",
            SocialPlatform::Linkedin => "LinkedIn",
            SocialPlatform::Tiktok => "TikTok",
        }
    }

    pub fn brand_color(&self) -> &'static str {
        match self {
            SocialPlatform::Facebook => "#1877F3",
            SocialPlatform::Instagram => "#E4405F",
            SocialPlatform::X => "#000000",
            SocialPlatform::Pinterest => "#E60023",
            SocialPlatform::Linkedin => "#0A66C2",
            SocialPlatform::Tiktok => "#000000",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SocialLink {
    pub platform: SocialPlatform,
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextModule {
    pub id: String,
    pub content: String,
    pub font_size: u32,
    pub font_family: String,
    pub font_weight: String,
    pub font_style: String,
    pub text_decoration: String,
    pub text_align: Alignment,
    pub line_height: f64,
    pub color: String,
    pub background_color: String,
    pub highlight_color: String,
    pub padding: Padding,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageModule {
    pub id: String,
    /// Remote URL or data URL
    pub src: String,
    pub alt: String,
    pub width: String,
    pub height: String,
    pub alignment: Alignment,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ButtonModule {
    pub id: String,
    pub text: String,
    pub href: String,
    pub background_color: String,
    pub text_color: String,
    pub width: String,
    pub height: String,
    pub padding: Padding,
    pub alignment: Alignment,
    pub border_color: String,
    pub border_width: u32,
    pub border_radius: u32,
    pub font_family: String,
    pub font_weight: String,
    pub font_size: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DividerModule {
    pub id: String,
    pub height: u32,
    pub color: String,
    pub style: DividerStyle,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpacerModule {
    pub id: String,
    pub height: u32,
    pub background_color: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageTextModule {
    pub id: String,
    pub gap: u32,
    pub columns: Vec<Column>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ColumnsModule {
    pub id: String,
    /// Layout descriptor, see [`crate::Layout`]
    pub layout: String,
    pub gap: u32,
    pub background_color: String,
    pub columns: Vec<Column>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CodeModule {
    pub id: String,
    pub code: String,
    pub language: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SocialModule {
    pub id: String,
    pub links: Vec<SocialLink>,
}

impl SocialModule {
    /// URL configured for a platform; later entries win over earlier ones
    pub fn url_for(&self, platform: SocialPlatform) -> Option<&str> {
        self.links
            .iter()
            .rev()
            .find(|link| link.platform == platform)
            .map(|link| link.url.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UnsubscribeModule {
    pub id: String,
    pub label: String,
    #[serde(default)]
    pub href: String,
}

/// A column inside a container module
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Column {
    pub id: String,
    pub modules: Vec<Module>,
}

impl Column {
    pub fn empty(id: String) -> Self {
        Self {
            id,
            modules: Vec::new(),
        }
    }
}

/// One content block of the email document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum Module {
    Text(TextModule),
    Image(ImageModule),
    Button(ButtonModule),
    Divider(DividerModule),
    Spacer(SpacerModule),
    ImageText(ImageTextModule),
    Columns(ColumnsModule),
    Code(CodeModule),
    Social(SocialModule),
    Unsubscribe(UnsubscribeModule),
}

impl Module {
    pub fn id(&self) -> &str {
        match self {
            Module::Text(m) => &m.id,
            Module::Image(m) => &m.id,
            Module::Button(m) => &m.id,
            Module::Divider(m) => &m.id,
            Module::Spacer(m) => &m.id,
            Module::ImageText(m) => &m.id,
            Module::Columns(m) => &m.id,
            Module::Code(m) => &m.id,
            Module::Social(m) => &m.id,
            Module::Unsubscribe(m) => &m.id,
        }
    }

    pub fn kind(&self) -> ModuleKind {
        match self {
            Module::Text(_) => ModuleKind::Text,
            Module::Image(_) => ModuleKind::Image,
            Module::Button(_) => ModuleKind::Button,
            Module::Divider(_) => ModuleKind::Divider,
            Module::Spacer(_) => ModuleKind::Spacer,
            Module::ImageText(_) => ModuleKind::ImageText,
            Module::Columns(_) => ModuleKind::Columns,
            Module::Code(_) => ModuleKind::Code,
            Module::Social(_) => ModuleKind::Social,
            Module::Unsubscribe(_) => ModuleKind::Unsubscribe,
        }
    }

    /// Columns of a container module, `None` for leaf kinds
    pub fn columns(&self) -> Option<&[Column]> {
        match self {
            Module::Columns(m) => Some(&m.columns),
            Module::ImageText(m) => Some(&m.columns),
            _ => None,
        }
    }

    pub fn columns_mut(&mut self) -> Option<&mut Vec<Column>> {
        match self {
            Module::Columns(m) => Some(&mut m.columns),
            Module::ImageText(m) => Some(&mut m.columns),
            _ => None,
        }
    }

    pub fn is_container(&self) -> bool {
        self.kind().is_container()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_padding_css() {
        assert_eq!(Padding::new(18, 0, 18, 0).to_css(), "18px 0px 18px 0px");
    }

    #[test]
    fn test_module_json_shape() {
        let module = Module::Spacer(SpacerModule {
            id: "s-1".to_string(),
            height: 30,
            background_color: "transparent".to_string(),
        });

        let json = serde_json::to_value(&module).unwrap();
        assert_eq!(json["type"], "spacer");
        assert_eq!(json["id"], "s-1");
        assert_eq!(json["backgroundColor"], "transparent");

        let back: Module = serde_json::from_value(json).unwrap();
        assert_eq!(back, module);
    }

    #[test]
    fn test_image_text_tag_is_kebab_case() {
        let module = Module::ImageText(ImageTextModule {
            id: "it-1".to_string(),
            gap: 16,
            columns: vec![Column::empty("c-1".to_string())],
        });

        let json = serde_json::to_value(&module).unwrap();
        assert_eq!(json["type"], "image-text");
        assert_eq!(json["columns"][0]["id"], "c-1");
        assert_eq!(module.kind(), ModuleKind::ImageText);
        assert!(module.is_container());
    }

    #[test]
    fn test_unknown_type_tag_fails_to_deserialize() {
        let json = r#"{ "type": "carousel", "id": "x" }"#;
        assert!(serde_json::from_str::<Module>(json).is_err());
    }

    #[test]
    fn test_social_url_lookup_last_wins() {
        let social = SocialModule {
            id: "so-1".to_string(),
            links: vec![
                SocialLink { platform: SocialPlatform::X, url: "x.com/a".to_string() },
                SocialLink { platform: SocialPlatform::X, url: "x.com/b".to_string() },
            ],
        };

        assert_eq!(social.url_for(SocialPlatform::X), Some("x.com/b"));
        assert_eq!(social.url_for(SocialPlatform::Tiktok), None);
    }
}
