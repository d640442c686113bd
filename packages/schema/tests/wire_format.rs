//! JSON shape of the document model as exchanged with the browser editor

use mailcraft_schema::*;
use serde_json::json;

#[test]
fn test_module_json_shape() {
    let mut ids = IdGenerator::from_seed("wire");
    let module = create_default(ModuleKind::Button, &mut ids);

    let value = serde_json::to_value(&module).unwrap();
    assert_eq!(value["type"], "button");
    assert_eq!(value["id"], "wire-1");
    assert_eq!(value["backgroundColor"], "#007bff");
    assert_eq!(value["borderRadius"], 4);
    assert_eq!(value["alignment"], "left");
    assert_eq!(value["padding"], json!({ "top": 12, "right": 24, "bottom": 12, "left": 24 }));
}

#[test]
fn test_container_json_shape() {
    let mut ids = IdGenerator::from_seed("wire");
    let module = create_default(ModuleKind::ImageText, &mut ids);

    let value = serde_json::to_value(&module).unwrap();
    assert_eq!(value["type"], "image-text");
    assert_eq!(value["columns"][0]["id"], "wire-2");
    assert_eq!(value["columns"][0]["modules"][0]["type"], "image");
    assert_eq!(value["columns"][1]["modules"][0]["type"], "text");
    assert_eq!(value["columns"][1]["modules"][0]["lineHeight"], 1.4);
}

#[test]
fn test_state_from_handwritten_json() {
    let json = json!({
        "modules": [
            {
                "type": "columns",
                "id": "c1",
                "layout": "1:2",
                "gap": 8,
                "backgroundColor": "#eeeeee",
                "columns": [
                    { "id": "c1-a", "modules": [] },
                    {
                        "id": "c1-b",
                        "modules": [
                            { "type": "unsubscribe", "id": "u1", "label": "Leave" }
                        ]
                    }
                ]
            },
            {
                "type": "social",
                "id": "s1",
                "links": [{ "platform": "linkedin", "url": "https://linkedin.com/x" }]
            }
        ],
        "settings": {
            "subject": "Hi",
            "preheader": "",
            "backgroundColor": "#ffffff",
            "contentWidth": 600
        }
    });

    let state: EmailBuilderState = serde_json::from_value(json).unwrap();
    assert_eq!(count_modules(&state.modules), 3);
    assert_eq!(validate_tree(&state.modules), Ok(()));

    match &state.modules[0].columns().unwrap()[1].modules[0] {
        Module::Unsubscribe(unsubscribe) => {
            assert_eq!(unsubscribe.label, "Leave");
            assert_eq!(unsubscribe.href, "");
        }
        other => panic!("Expected unsubscribe, got {:?}", other),
    }

    match &state.modules[1] {
        Module::Social(social) => {
            assert_eq!(social.url_for(SocialPlatform::Linkedin), Some("https://linkedin.com/x"));
            assert_eq!(social.url_for(SocialPlatform::Facebook), None);
        }
        other => panic!("Expected social, got {:?}", other),
    }
}

#[test]
fn test_missing_settings_default() {
    let state: EmailBuilderState = serde_json::from_value(json!({ "modules": [] })).unwrap();
    assert_eq!(state.settings, EmailSettings::default());
}

#[test]
fn test_unknown_module_type_rejected() {
    let json = json!({ "type": "video", "id": "v1" });
    assert!(serde_json::from_value::<Module>(json).is_err());
}

#[test]
fn test_patch_json_shape() {
    let patch: ModulePatch = serde_json::from_value(json!({
        "type": "columns",
        "layout": "1:1:1"
    }))
    .unwrap();

    assert_eq!(patch.kind(), ModuleKind::Columns);
    assert_eq!(patch.layout(), Some("1:1:1"));

    let back = serde_json::to_value(&patch).unwrap();
    assert_eq!(back, json!({ "type": "columns", "layout": "1:1:1" }));
}
