//! # Tree Locator / Mutator
//!
//! Recursive search and in-place edits over a module tree of unbounded
//! depth. A container module owns columns, each column owns modules, and any
//! of those modules may be a container again.
//!
//! Search is pre-order: a module is checked before its columns, and a
//! container's columns are searched left to right before moving on to the
//! module's next sibling.
//!
//! "Not found" is never an error here: lookups return `None`, updates return
//! `Ok(false)` and deletes remove nothing. Errors are reserved for input that
//! is structurally invalid (bad indices, bad layouts, wrong patch kind).

use crate::errors::{EditorError, EditorResult};
use mailcraft_schema::{Column, IdGenerator, Layout, Module, ModulePatch, SchemaError};
use tracing::debug;

/// Find a module anywhere in the tree
pub fn find_by_id<'a>(modules: &'a [Module], id: &str) -> Option<&'a Module> {
    for module in modules {
        if module.id() == id {
            return Some(module);
        }

        if let Some(columns) = module.columns() {
            for column in columns {
                if let Some(found) = find_by_id(&column.modules, id) {
                    return Some(found);
                }
            }
        }
    }

    None
}

pub fn find_by_id_mut<'a>(modules: &'a mut [Module], id: &str) -> Option<&'a mut Module> {
    for module in modules.iter_mut() {
        if module.id() == id {
            return Some(module);
        }

        if let Some(columns) = module.columns_mut() {
            for column in columns.iter_mut() {
                if let Some(found) = find_by_id_mut(&mut column.modules, id) {
                    return Some(found);
                }
            }
        }
    }

    None
}

/// Column `column_id` of container `parent_id`
pub fn find_column<'a>(modules: &'a [Module], parent_id: &str, column_id: &str) -> Option<&'a Column> {
    find_by_id(modules, parent_id)?
        .columns()?
        .iter()
        .find(|column| column.id == column_id)
}

pub fn find_column_mut<'a>(
    modules: &'a mut [Module],
    parent_id: &str,
    column_id: &str,
) -> Option<&'a mut Column> {
    find_by_id_mut(modules, parent_id)?
        .columns_mut()?
        .iter_mut()
        .find(|column| column.id == column_id)
}

/// Merge `patch` into the module with `id`
///
/// Returns `Ok(false)` and leaves the tree untouched when no module has that
/// id. See [`apply_patch`] for the merge rules.
pub fn update_by_id(
    modules: &mut [Module],
    id: &str,
    patch: ModulePatch,
    ids: &mut IdGenerator,
) -> EditorResult<bool> {
    let Some(module) = find_by_id_mut(modules, id) else {
        debug!(module_id = %id, "Update target not found, ignoring");
        return Ok(false);
    };

    apply_patch(module, patch, ids)?;
    Ok(true)
}

/// Shallow-merge `patch` into `module`
///
/// For a `columns` module, a patch that sets `layout` or `columns` also
/// reconciles the column list against the (new) layout in the same step:
/// missing columns are appended empty with fresh ids, surplus columns are
/// dropped from the end together with their modules. The layout is parsed
/// before anything is written, so a malformed layout leaves the module as it
/// was.
pub fn apply_patch(module: &mut Module, patch: ModulePatch, ids: &mut IdGenerator) -> EditorResult<()> {
    if module.kind() != patch.kind() {
        return Err(SchemaError::KindMismatch {
            module_id: module.id().to_string(),
            expected: module.kind(),
            found: patch.kind(),
        }
        .into());
    }

    let reconcile_to = match (&*module, &patch) {
        (Module::Columns(current), ModulePatch::Columns(p))
            if p.layout.is_some() || p.columns.is_some() =>
        {
            let descriptor = p.layout.as_deref().unwrap_or(current.layout.as_str());
            Some(Layout::parse(descriptor)?.column_count())
        }
        _ => None,
    };

    module.merge(patch)?;

    if let Some(count) = reconcile_to {
        if let Some(columns) = module.columns_mut() {
            reconcile_columns(columns, count, ids);
        }
    }

    Ok(())
}

/// Grow or shrink `columns` to exactly `count` entries
pub fn reconcile_columns(columns: &mut Vec<Column>, count: usize, ids: &mut IdGenerator) {
    let before = columns.len();

    if before < count {
        columns.extend((before..count).map(|_| Column::empty(ids.new_id())));
    } else {
        columns.truncate(count);
    }

    if before != count {
        debug!(before, after = count, "Reconciled column count");
    }
}

/// Remove every module with `id`, at whichever depth it lives
///
/// The removed modules are returned together with everything they contained.
/// Deleting an id that is not in the tree removes nothing.
pub fn delete_by_id(modules: &mut Vec<Module>, id: &str) -> Vec<Module> {
    let mut removed = Vec::new();
    let mut index = 0;

    while index < modules.len() {
        if modules[index].id() == id {
            removed.push(modules.remove(index));
            continue;
        }

        if let Some(columns) = modules[index].columns_mut() {
            for column in columns.iter_mut() {
                removed.extend(delete_by_id(&mut column.modules, id));
            }
        }

        index += 1;
    }

    removed
}

/// Move the element at `from` so it ends up at `to`
///
/// Both indices are checked before anything moves.
pub fn reorder<T>(items: &mut Vec<T>, from: usize, to: usize) -> EditorResult<()> {
    let len = items.len();
    if from >= len {
        return Err(EditorError::out_of_range(from, len));
    }
    if to >= len {
        return Err(EditorError::out_of_range(to, len));
    }

    if from != to {
        let item = items.remove(from);
        items.insert(to, item);
    }

    Ok(())
}

/// Exchange the module lists of two columns of a container
///
/// Column ids stay where they are; only the content moves.
pub fn swap_columns(module: &mut Module, first: usize, second: usize) -> EditorResult<()> {
    let module_id = module.id().to_string();
    let Some(columns) = module.columns_mut() else {
        return Err(EditorError::NotAContainer(module_id));
    };

    let len = columns.len();
    if first >= len {
        return Err(EditorError::out_of_range(first, len));
    }
    if second >= len {
        return Err(EditorError::out_of_range(second, len));
    }
    if first == second {
        return Ok(());
    }

    let (low, high) = (first.min(second), first.max(second));
    let (left, right) = columns.split_at_mut(high);
    std::mem::swap(&mut left[low].modules, &mut right[0].modules);

    Ok(())
}
