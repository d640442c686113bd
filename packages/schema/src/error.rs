use crate::kind::ModuleKind;
use thiserror::Error;

pub type SchemaResult<T> = Result<T, SchemaError>;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum SchemaError {
    #[error("Unknown module kind: {0}")]
    UnknownModuleKind(String),

    #[error("Malformed layout: {0:?}")]
    MalformedLayout(String),

    #[error("Duplicate id: {0}")]
    DuplicateId(String),

    #[error("Empty id on {0} node")]
    EmptyId(String),

    #[error("Module {module_id} is a {expected}, patch targets {found}")]
    KindMismatch {
        module_id: String,
        expected: ModuleKind,
        found: ModuleKind,
    },

    #[error("Layout {layout:?} of module {module_id} expects {expected} columns, found {found}")]
    LayoutMismatch {
        module_id: String,
        layout: String,
        expected: usize,
        found: usize,
    },
}

impl SchemaError {
    pub fn malformed_layout(layout: impl Into<String>) -> Self {
        Self::MalformedLayout(layout.into())
    }
}
