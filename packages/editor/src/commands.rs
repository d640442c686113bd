//! # Commands
//!
//! The closed set of state transitions of an email document.
//!
//! ## Semantics
//!
//! - Each command maps `(state, payload)` to a new state. The input state is
//!   never modified; a failing command produces no state at all, so the
//!   caller keeps the previous one.
//! - Commands that address a module, column or container that does not
//!   exist are no-ops, not errors. A UI may legitimately send an update for
//!   a module it just deleted.
//! - Errors are reserved for structurally invalid payloads: out-of-range
//!   indices, malformed layouts, patches of the wrong kind, container
//!   operations on leaf modules.
//! - A merged update must leave the tree valid: a `columns` list copied from
//!   elsewhere in the document would duplicate ids and is rejected.

use crate::errors::EditorResult;
use crate::tree;
use mailcraft_schema::{
    collect_ids, create_default, validate_tree, ColumnsPatch, EmailBuilderState, IdGenerator, ModuleKind,
    ModulePatch, SettingsPatch,
};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(
    tag = "type",
    rename_all = "SCREAMING_SNAKE_CASE",
    rename_all_fields = "camelCase"
)]
pub enum Command {
    /// Append a default module of `kind` to the top level
    AddModule { kind: ModuleKind },

    /// Append a default module to one column of a container
    AddModuleToColumn {
        parent_id: String,
        column_id: String,
        kind: ModuleKind,
    },

    /// Shallow-merge fields into a module anywhere in the tree
    UpdateModule { id: String, updates: ModulePatch },

    /// Remove a module (and everything inside it) from the tree
    DeleteModule { id: String },

    /// Move a top-level module
    ReorderModules { from: usize, to: usize },

    /// Move a module within one column of a container
    ReorderInColumn {
        parent_id: String,
        column_id: String,
        from: usize,
        to: usize,
    },

    /// Exchange the contents of two columns of a container
    SwapColumns {
        module_id: String,
        first: usize,
        second: usize,
    },

    /// Change the layout of a `columns` module
    ResizeColumns { module_id: String, layout: String },

    /// Shallow-merge document settings
    UpdateSettings { updates: SettingsPatch },
}

/// Outcome of a successfully applied command
#[derive(Debug, Clone)]
pub struct Applied {
    pub state: EmailBuilderState,

    /// Id of the module the command created, if any
    pub created: Option<String>,

    /// Ids of every module and column the command removed
    pub removed: Vec<String>,
}

impl Applied {
    fn unchanged(state: EmailBuilderState) -> Self {
        Self {
            state,
            created: None,
            removed: Vec::new(),
        }
    }
}

impl Command {
    pub fn name(&self) -> &'static str {
        match self {
            Command::AddModule { .. } => "ADD_MODULE",
            Command::AddModuleToColumn { .. } => "ADD_MODULE_TO_COLUMN",
            Command::UpdateModule { .. } => "UPDATE_MODULE",
            Command::DeleteModule { .. } => "DELETE_MODULE",
            Command::ReorderModules { .. } => "REORDER_MODULES",
            Command::ReorderInColumn { .. } => "REORDER_IN_COLUMN",
            Command::SwapColumns { .. } => "SWAP_COLUMNS",
            Command::ResizeColumns { .. } => "RESIZE_COLUMNS",
            Command::UpdateSettings { .. } => "UPDATE_SETTINGS",
        }
    }

    /// Compute the state that results from applying this command to `state`
    pub fn apply(&self, state: &EmailBuilderState, ids: &mut IdGenerator) -> EditorResult<Applied> {
        debug!(command = self.name(), "Applying command");

        let mut next = state.clone();

        match self {
            Command::AddModule { kind } => {
                let module = create_default(*kind, ids);
                let created = module.id().to_string();
                next.modules.push(module);

                Ok(Applied {
                    created: Some(created),
                    ..Applied::unchanged(next)
                })
            }

            Command::AddModuleToColumn {
                parent_id,
                column_id,
                kind,
            } => {
                let Some(column) = tree::find_column_mut(&mut next.modules, parent_id, column_id)
                else {
                    warn!(%parent_id, %column_id, "Target column not found, nothing added");
                    return Ok(Applied::unchanged(next));
                };

                let module = create_default(*kind, ids);
                let created = module.id().to_string();
                column.modules.push(module);

                Ok(Applied {
                    created: Some(created),
                    ..Applied::unchanged(next)
                })
            }

            Command::UpdateModule { id, updates } => {
                if tree::update_by_id(&mut next.modules, id, updates.clone(), ids)? {
                    validate_tree(&next.modules)?;
                }
                Ok(Applied::unchanged(next))
            }

            Command::DeleteModule { id } => {
                let removed = tree::delete_by_id(&mut next.modules, id);
                if removed.is_empty() {
                    debug!(module_id = %id, "Delete target not found, ignoring");
                }

                Ok(Applied {
                    removed: collect_ids(&removed),
                    ..Applied::unchanged(next)
                })
            }

            Command::ReorderModules { from, to } => {
                tree::reorder(&mut next.modules, *from, *to)?;
                Ok(Applied::unchanged(next))
            }

            Command::ReorderInColumn {
                parent_id,
                column_id,
                from,
                to,
            } => {
                let Some(parent) = tree::find_by_id(&next.modules, parent_id) else {
                    warn!(%parent_id, "Container not found, nothing reordered");
                    return Ok(Applied::unchanged(next));
                };

                let kind = parent.kind();
                let mut columns = parent.columns().map(<[_]>::to_vec).unwrap_or_default();
                let Some(column) = columns.iter_mut().find(|c| &c.id == column_id) else {
                    warn!(%parent_id, %column_id, "Column not found, nothing reordered");
                    return Ok(Applied::unchanged(next));
                };

                tree::reorder(&mut column.modules, *from, *to)?;

                // Written back as an ordinary update of the parent
                if let Some(patch) = ModulePatch::replace_columns(kind, columns) {
                    tree::update_by_id(&mut next.modules, parent_id, patch, ids)?;
                    validate_tree(&next.modules)?;
                }

                Ok(Applied::unchanged(next))
            }

            Command::SwapColumns {
                module_id,
                first,
                second,
            } => {
                match tree::find_by_id_mut(&mut next.modules, module_id) {
                    Some(module) => tree::swap_columns(module, *first, *second)?,
                    None => warn!(%module_id, "Container not found, nothing swapped"),
                }
                Ok(Applied::unchanged(next))
            }

            Command::ResizeColumns { module_id, layout } => {
                let patch = ModulePatch::Columns(ColumnsPatch {
                    layout: Some(layout.clone()),
                    ..Default::default()
                });
                tree::update_by_id(&mut next.modules, module_id, patch, ids)?;
                Ok(Applied::unchanged(next))
            }

            Command::UpdateSettings { updates } => {
                updates.clone().merge_into(&mut next.settings);
                Ok(Applied::unchanged(next))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::EditorError;
    use mailcraft_schema::{Module, SchemaError, TextPatch};

    fn ids() -> IdGenerator {
        IdGenerator::from_seed("cmd")
    }

    fn run(command: Command, state: &EmailBuilderState, ids: &mut IdGenerator) -> Applied {
        command.apply(state, ids).unwrap()
    }

    #[test]
    fn test_command_serialization() {
        let command = Command::AddModuleToColumn {
            parent_id: "p".to_string(),
            column_id: "c".to_string(),
            kind: ModuleKind::ImageText,
        };

        let json = serde_json::to_value(&command).unwrap();
        assert_eq!(json["type"], "ADD_MODULE_TO_COLUMN");
        assert_eq!(json["parentId"], "p");
        assert_eq!(json["kind"], "image-text");

        let back: Command = serde_json::from_value(json).unwrap();
        assert_eq!(back, command);
    }

    #[test]
    fn test_update_command_from_json() {
        let json = r#"{
            "type": "UPDATE_MODULE",
            "id": "m-1",
            "updates": { "type": "text", "content": "Hello" }
        }"#;

        let command: Command = serde_json::from_str(json).unwrap();
        assert_eq!(
            command,
            Command::UpdateModule {
                id: "m-1".to_string(),
                updates: ModulePatch::Text(TextPatch {
                    content: Some("Hello".to_string()),
                    ..Default::default()
                }),
            }
        );
    }

    #[test]
    fn test_unknown_kind_in_json_rejected() {
        let json = r#"{ "type": "ADD_MODULE", "kind": "marquee" }"#;
        assert!(serde_json::from_str::<Command>(json).is_err());
    }

    #[test]
    fn test_add_module_does_not_touch_input() {
        let mut ids = ids();
        let state = EmailBuilderState::new();

        let applied = run(Command::AddModule { kind: ModuleKind::Text }, &state, &mut ids);

        assert!(state.modules.is_empty());
        assert_eq!(applied.state.modules.len(), 1);
        assert_eq!(applied.created.as_deref(), Some(applied.state.modules[0].id()));
    }

    #[test]
    fn test_add_to_missing_column_is_noop() {
        let mut ids = ids();
        let state = run(Command::AddModule { kind: ModuleKind::Columns }, &EmailBuilderState::new(), &mut ids).state;
        let parent_id = state.modules[0].id().to_string();

        let applied = run(
            Command::AddModuleToColumn {
                parent_id: parent_id.clone(),
                column_id: "nope".to_string(),
                kind: ModuleKind::Text,
            },
            &state,
            &mut ids,
        );
        assert_eq!(applied.state, state);
        assert!(applied.created.is_none());

        // A leaf "parent" has no columns and is treated the same way
        let text = run(Command::AddModule { kind: ModuleKind::Text }, &state, &mut ids).state;
        let text_id = text.modules[1].id().to_string();
        let applied = run(
            Command::AddModuleToColumn {
                parent_id: text_id,
                column_id: "nope".to_string(),
                kind: ModuleKind::Text,
            },
            &text,
            &mut ids,
        );
        assert_eq!(applied.state, text);
    }

    #[test]
    fn test_reorder_in_column() {
        let mut ids = ids();
        let mut state = run(Command::AddModule { kind: ModuleKind::Columns }, &EmailBuilderState::new(), &mut ids).state;
        let parent_id = state.modules[0].id().to_string();
        let column_id = state.modules[0].columns().unwrap()[0].id.clone();

        for kind in [ModuleKind::Text, ModuleKind::Button, ModuleKind::Divider] {
            state = run(
                Command::AddModuleToColumn {
                    parent_id: parent_id.clone(),
                    column_id: column_id.clone(),
                    kind,
                },
                &state,
                &mut ids,
            )
            .state;
        }

        let applied = run(
            Command::ReorderInColumn {
                parent_id: parent_id.clone(),
                column_id: column_id.clone(),
                from: 2,
                to: 0,
            },
            &state,
            &mut ids,
        );

        let kinds: Vec<_> = applied.state.modules[0].columns().unwrap()[0]
            .modules
            .iter()
            .map(Module::kind)
            .collect();
        assert_eq!(kinds, vec![ModuleKind::Divider, ModuleKind::Text, ModuleKind::Button]);
        assert_eq!(applied.state.modules[0].columns().unwrap()[0].id, column_id);
    }

    #[test]
    fn test_update_with_foreign_columns_rejected() {
        let mut ids = ids();
        let mut state = EmailBuilderState::new();
        for _ in 0..2 {
            state = run(Command::AddModule { kind: ModuleKind::Columns }, &state, &mut ids).state;
        }
        let target = state.modules[0].id().to_string();
        let borrowed = state.modules[1].columns().unwrap().to_vec();

        let err = Command::UpdateModule {
            id: target,
            updates: ModulePatch::Columns(ColumnsPatch {
                columns: Some(borrowed.clone()),
                ..Default::default()
            }),
        }
        .apply(&state, &mut ids)
        .unwrap_err();

        assert!(matches!(
            err,
            EditorError::Schema(SchemaError::DuplicateId(ref id)) if *id == borrowed[0].id
        ));
    }

    #[test]
    fn test_reorder_in_column_out_of_range() {
        let mut ids = ids();
        let state = run(Command::AddModule { kind: ModuleKind::ImageText }, &EmailBuilderState::new(), &mut ids).state;
        let parent_id = state.modules[0].id().to_string();
        let column_id = state.modules[0].columns().unwrap()[0].id.clone();

        let err = Command::ReorderInColumn {
            parent_id,
            column_id,
            from: 0,
            to: 1,
        }
        .apply(&state, &mut ids)
        .unwrap_err();

        assert!(matches!(err, EditorError::IndexOutOfRange { index: 1, len: 1 }));
    }

    #[test]
    fn test_resize_columns() {
        let mut ids = ids();
        let state = run(Command::AddModule { kind: ModuleKind::Columns }, &EmailBuilderState::new(), &mut ids).state;
        let module_id = state.modules[0].id().to_string();

        let applied = run(
            Command::ResizeColumns {
                module_id: module_id.clone(),
                layout: "1:1:2".to_string(),
            },
            &state,
            &mut ids,
        );
        assert_eq!(applied.state.modules[0].columns().unwrap().len(), 3);

        let err = Command::ResizeColumns {
            module_id,
            layout: "wide".to_string(),
        }
        .apply(&state, &mut ids)
        .unwrap_err();
        assert!(matches!(err, EditorError::Schema(SchemaError::MalformedLayout(_))));
    }

    #[test]
    fn test_swap_on_leaf_is_an_error() {
        let mut ids = ids();
        let state = run(Command::AddModule { kind: ModuleKind::Spacer }, &EmailBuilderState::new(), &mut ids).state;

        let err = Command::SwapColumns {
            module_id: state.modules[0].id().to_string(),
            first: 0,
            second: 1,
        }
        .apply(&state, &mut ids)
        .unwrap_err();
        assert!(matches!(err, EditorError::NotAContainer(_)));

        // Missing container is a no-op
        let applied = run(
            Command::SwapColumns {
                module_id: "ghost".to_string(),
                first: 0,
                second: 1,
            },
            &state,
            &mut ids,
        );
        assert_eq!(applied.state, state);
    }

    #[test]
    fn test_delete_reports_removed_subtree() {
        let mut ids = ids();
        let state = run(Command::AddModule { kind: ModuleKind::ImageText }, &EmailBuilderState::new(), &mut ids).state;
        let id = state.modules[0].id().to_string();

        let applied = run(Command::DeleteModule { id: id.clone() }, &state, &mut ids);
        assert!(applied.state.modules.is_empty());
        // container, 2 columns, image, text
        assert_eq!(applied.removed.len(), 5);
        assert_eq!(applied.removed[0], id);
    }

    #[test]
    fn test_update_settings() {
        let mut ids = ids();
        let applied = run(
            Command::UpdateSettings {
                updates: SettingsPatch {
                    subject: Some("Launch".to_string()),
                    content_width: Some(640),
                    ..Default::default()
                },
            },
            &EmailBuilderState::new(),
            &mut ids,
        );

        assert_eq!(applied.state.settings.subject, "Launch");
        assert_eq!(applied.state.settings.content_width, 640);
        assert_eq!(applied.state.settings.background_color, "#ffffff");
    }
}
