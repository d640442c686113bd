//! # Document Handle
//!
//! Holds the current email state for an editing session and funnels every
//! change through [`Command::apply`].
//!
//! ```text
//! Command → apply(state) → new state → version += 1
//!                 ↓
//!               error → state and version untouched
//! ```

use crate::commands::{Applied, Command};
use crate::errors::EditorResult;
use crate::tree;
use mailcraft_schema::{
    validate_tree, Column, EmailBuilderState, IdGenerator, Module, ModuleKind, ModulePatch,
    SettingsPatch,
};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// Result of applying a command to a document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommandResult {
    /// Document version after the command
    pub version: u64,

    /// Id of the module created by the command
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created: Option<String>,

    /// Ids removed by the command
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub removed: Vec<String>,
}

/// Editable email document
#[derive(Debug)]
pub struct Document {
    /// Current version number (increments on each successful command)
    pub version: u64,

    state: EmailBuilderState,
    ids: IdGenerator,
    selected: Option<String>,
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl Document {
    /// Empty document with a random id seed
    pub fn new() -> Self {
        Self::with_ids(IdGenerator::new())
    }

    /// Empty document with a caller-provided id generator
    pub fn with_ids(ids: IdGenerator) -> Self {
        Self {
            version: 0,
            state: EmailBuilderState::new(),
            ids,
            selected: None,
        }
    }

    /// Document over an existing state, which must be structurally valid
    pub fn from_state(state: EmailBuilderState) -> EditorResult<Self> {
        validate_tree(&state.modules)?;

        Ok(Self {
            state,
            ..Self::new()
        })
    }

    /// Document over a serialized state (as produced by [`Document::to_json`])
    pub fn from_json(json: &str) -> EditorResult<Self> {
        let state: EmailBuilderState = serde_json::from_str(json)?;
        Self::from_state(state)
    }

    /// Apply a command
    pub fn apply(&mut self, command: Command) -> EditorResult<CommandResult> {
        let Applied {
            state,
            created,
            removed,
        } = command.apply(&self.state, &mut self.ids).map_err(|err| {
            warn!(command = command.name(), error = %err, "Command rejected");
            err
        })?;

        self.state = state;
        self.version += 1;

        if let Some(selected) = &self.selected {
            if removed.contains(selected) {
                debug!(module_id = %selected, "Selected module removed, clearing selection");
                self.selected = None;
            }
        }

        Ok(CommandResult {
            version: self.version,
            created,
            removed,
        })
    }

    pub fn add_module(&mut self, kind: ModuleKind) -> EditorResult<CommandResult> {
        self.apply(Command::AddModule { kind })
    }

    /// Add a module whose kind is given by name
    ///
    /// Unknown names fail with `UnknownModuleKind` and leave the document
    /// untouched.
    pub fn add_module_named(&mut self, kind: &str) -> EditorResult<CommandResult> {
        let kind = kind.parse::<ModuleKind>()?;
        self.add_module(kind)
    }

    pub fn add_module_to_column(
        &mut self,
        parent_id: &str,
        column_id: &str,
        kind: ModuleKind,
    ) -> EditorResult<CommandResult> {
        self.apply(Command::AddModuleToColumn {
            parent_id: parent_id.to_string(),
            column_id: column_id.to_string(),
            kind,
        })
    }

    pub fn update_module(&mut self, id: &str, updates: ModulePatch) -> EditorResult<CommandResult> {
        self.apply(Command::UpdateModule {
            id: id.to_string(),
            updates,
        })
    }

    pub fn delete_module(&mut self, id: &str) -> EditorResult<CommandResult> {
        self.apply(Command::DeleteModule { id: id.to_string() })
    }

    pub fn reorder_modules(&mut self, from: usize, to: usize) -> EditorResult<CommandResult> {
        self.apply(Command::ReorderModules { from, to })
    }

    pub fn reorder_in_column(
        &mut self,
        parent_id: &str,
        column_id: &str,
        from: usize,
        to: usize,
    ) -> EditorResult<CommandResult> {
        self.apply(Command::ReorderInColumn {
            parent_id: parent_id.to_string(),
            column_id: column_id.to_string(),
            from,
            to,
        })
    }

    pub fn swap_columns(&mut self, module_id: &str, first: usize, second: usize) -> EditorResult<CommandResult> {
        self.apply(Command::SwapColumns {
            module_id: module_id.to_string(),
            first,
            second,
        })
    }

    pub fn resize_columns(&mut self, module_id: &str, layout: &str) -> EditorResult<CommandResult> {
        self.apply(Command::ResizeColumns {
            module_id: module_id.to_string(),
            layout: layout.to_string(),
        })
    }

    pub fn update_settings(&mut self, updates: SettingsPatch) -> EditorResult<CommandResult> {
        self.apply(Command::UpdateSettings { updates })
    }

    pub fn state(&self) -> &EmailBuilderState {
        &self.state
    }

    pub fn modules(&self) -> &[Module] {
        &self.state.modules
    }

    /// Find a module anywhere in the tree
    pub fn module(&self, id: &str) -> Option<&Module> {
        tree::find_by_id(&self.state.modules, id)
    }

    pub fn column(&self, parent_id: &str, column_id: &str) -> Option<&Column> {
        tree::find_column(&self.state.modules, parent_id, column_id)
    }

    /// Select a module, or clear the selection with `None`
    ///
    /// Selecting an id that is not in the tree clears the selection.
    pub fn select(&mut self, id: Option<&str>) {
        self.selected = id
            .filter(|id| self.module(id).is_some())
            .map(str::to_string);
    }

    pub fn selected_id(&self) -> Option<&str> {
        self.selected.as_deref()
    }

    pub fn selected_module(&self) -> Option<&Module> {
        self.selected.as_deref().and_then(|id| self.module(id))
    }

    /// Pretty-printed JSON of the full state
    pub fn to_json(&self) -> EditorResult<String> {
        Ok(serde_json::to_string_pretty(&self.state)?)
    }
}
