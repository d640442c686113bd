use crate::error::{SchemaError, SchemaResult};
use crate::layout::Layout;
use crate::module::{Column, Module};
use std::collections::HashSet;

/// Visitor pattern for traversing a module tree immutably
///
/// The default implementations walk the whole tree in pre-order: a module,
/// then its first column and that column's modules, then the next column,
/// then the module's next sibling. Override specific visit_* methods to act
/// on nodes.
pub trait ModuleVisitor: Sized {
    fn visit_module(&mut self, module: &Module) {
        walk_module(self, module);
    }

    fn visit_column(&mut self, column: &Column) {
        walk_column(self, column);
    }
}

pub fn walk_modules<V: ModuleVisitor>(visitor: &mut V, modules: &[Module]) {
    for module in modules {
        visitor.visit_module(module);
    }
}

pub fn walk_module<V: ModuleVisitor>(visitor: &mut V, module: &Module) {
    if let Some(columns) = module.columns() {
        for column in columns {
            visitor.visit_column(column);
        }
    }
}

pub fn walk_column<V: ModuleVisitor>(visitor: &mut V, column: &Column) {
    walk_modules(visitor, &column.modules);
}

struct IdCollector {
    ids: Vec<String>,
}

impl ModuleVisitor for IdCollector {
    fn visit_module(&mut self, module: &Module) {
        self.ids.push(module.id().to_string());
        walk_module(self, module);
    }

    fn visit_column(&mut self, column: &Column) {
        self.ids.push(column.id.clone());
        walk_column(self, column);
    }
}

/// Every module and column id in the tree, in pre-order
pub fn collect_ids(modules: &[Module]) -> Vec<String> {
    let mut collector = IdCollector { ids: Vec::new() };
    walk_modules(&mut collector, modules);
    collector.ids
}

struct ModuleCounter(usize);

impl ModuleVisitor for ModuleCounter {
    fn visit_module(&mut self, module: &Module) {
        self.0 += 1;
        walk_module(self, module);
    }
}

/// Number of modules at every depth
pub fn count_modules(modules: &[Module]) -> usize {
    let mut counter = ModuleCounter(0);
    walk_modules(&mut counter, modules);
    counter.0
}

struct TreeValidator {
    seen: HashSet<String>,
    error: Option<SchemaError>,
}

impl TreeValidator {
    fn check_id(&mut self, id: &str, node: &str) {
        if self.error.is_some() {
            return;
        }
        if id.is_empty() {
            self.error = Some(SchemaError::EmptyId(node.to_string()));
        } else if !self.seen.insert(id.to_string()) {
            self.error = Some(SchemaError::DuplicateId(id.to_string()));
        }
    }

    fn check_layout(&mut self, module: &Module) {
        if self.error.is_some() {
            return;
        }
        if let Module::Columns(columns) = module {
            match Layout::parse(&columns.layout) {
                Ok(layout) if layout.column_count() != columns.columns.len() => {
                    self.error = Some(SchemaError::LayoutMismatch {
                        module_id: columns.id.clone(),
                        layout: columns.layout.clone(),
                        expected: layout.column_count(),
                        found: columns.columns.len(),
                    });
                }
                Ok(_) => {}
                Err(err) => self.error = Some(err),
            }
        }
    }
}

impl ModuleVisitor for TreeValidator {
    fn visit_module(&mut self, module: &Module) {
        self.check_id(module.id(), module.kind().as_str());
        self.check_layout(module);
        walk_module(self, module);
    }

    fn visit_column(&mut self, column: &Column) {
        self.check_id(&column.id, "column");
        walk_column(self, column);
    }
}

/// Check the structural invariants of a tree
///
/// Ids must be non-empty and unique across modules and columns at every
/// depth, and every `columns` module must have as many columns as its
/// layout describes.
pub fn validate_tree(modules: &[Module]) -> SchemaResult<()> {
    let mut validator = TreeValidator {
        seen: HashSet::new(),
        error: None,
    };
    walk_modules(&mut validator, modules);

    match validator.error {
        Some(err) => Err(err),
        None => Ok(()),
    }
}
