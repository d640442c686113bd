use mailcraft_compiler_html::{html_filename, render, render_state, Export, ExportConfig};
use mailcraft_editor::{Command, Document};
use mailcraft_schema::EmailBuilderState;
use std::fmt::Display;
use wasm_bindgen::prelude::*;

#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();
}

fn js_error(context: &str, err: impl Display) -> JsValue {
    JsValue::from_str(&format!("{}: {}", context, err))
}

/// Email document handle for the browser editor
#[wasm_bindgen]
pub struct EmailBuilder {
    doc: Document,
    config: ExportConfig,
}

impl Default for EmailBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[wasm_bindgen]
impl EmailBuilder {
    #[wasm_bindgen(constructor)]
    pub fn new() -> Self {
        Self {
            doc: Document::new(),
            config: ExportConfig::default(),
        }
    }

    /// Restore a document from `stateJson()` output
    #[wasm_bindgen(js_name = fromJson)]
    pub fn from_json(json: &str) -> Result<EmailBuilder, JsValue> {
        let doc = Document::from_json(json).map_err(|e| js_error("Load error", e))?;
        Ok(Self {
            doc,
            config: ExportConfig::default(),
        })
    }

    /// Apply a JSON-encoded command and return the JSON-encoded result
    pub fn dispatch(&mut self, command_json: &str) -> Result<String, JsValue> {
        let command: Command =
            serde_json::from_str(command_json).map_err(|e| js_error("Invalid command", e))?;

        let result = self
            .doc
            .apply(command)
            .map_err(|e| js_error("Command error", e))?;

        serde_json::to_string(&result).map_err(|e| js_error("Serialization error", e))
    }

    /// Append a default module of `kind` and return its id
    #[wasm_bindgen(js_name = addModule)]
    pub fn add_module(&mut self, kind: &str) -> Result<String, JsValue> {
        let result = self
            .doc
            .add_module_named(kind)
            .map_err(|e| js_error("Command error", e))?;

        Ok(result.created.unwrap_or_default())
    }

    #[wasm_bindgen(js_name = deleteModule)]
    pub fn delete_module(&mut self, id: &str) -> Result<(), JsValue> {
        self.doc
            .delete_module(id)
            .map(|_| ())
            .map_err(|e| js_error("Command error", e))
    }

    pub fn select(&mut self, id: Option<String>) {
        self.doc.select(id.as_deref());
    }

    #[wasm_bindgen(getter, js_name = selectedModuleId)]
    pub fn selected_module_id(&self) -> Option<String> {
        self.doc.selected_id().map(str::to_string)
    }

    #[wasm_bindgen(getter)]
    pub fn version(&self) -> f64 {
        self.doc.version as f64
    }

    #[wasm_bindgen(js_name = stateJson)]
    pub fn state_json(&self) -> Result<String, JsValue> {
        self.doc.to_json().map_err(|e| js_error("Serialization error", e))
    }

    /// JSON of one module anywhere in the tree, `undefined` when absent
    #[wasm_bindgen(js_name = moduleJson)]
    pub fn module_json(&self, id: &str) -> Result<Option<String>, JsValue> {
        self.doc
            .module(id)
            .map(serde_json::to_string)
            .transpose()
            .map_err(|e| js_error("Serialization error", e))
    }

    pub fn html(&self) -> String {
        let state = self.doc.state();
        render(&state.modules, &state.settings, &self.config.render_options())
    }

    #[wasm_bindgen(js_name = emailDataJson)]
    pub fn email_data_json(&self) -> Result<String, JsValue> {
        Export::from_state(self.doc.state(), &self.config)
            .data
            .to_json()
            .map_err(|e| js_error("Serialization error", e))
    }

    #[wasm_bindgen(js_name = htmlFilename)]
    pub fn html_filename(&self) -> String {
        html_filename(&self.doc.state().settings.subject)
    }
}

/// Render a serialized state straight to HTML
#[wasm_bindgen(js_name = renderStateJson)]
pub fn render_state_json(json: &str) -> Result<String, JsValue> {
    let state: EmailBuilderState =
        serde_json::from_str(json).map_err(|e| js_error("Parse error", e))?;

    Ok(render_state(&state))
}
