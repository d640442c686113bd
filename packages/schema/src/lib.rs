//! # Mailcraft Schema
//!
//! The email document model: a closed set of module kinds, container
//! modules that own columns of further modules, document settings, and the
//! factory that produces each kind's default instance.
//!
//! ```text
//! EmailBuilderState
//!  ├─ settings
//!  └─ modules: [Module]
//!       └─ (columns | image-text) → [Column] → [Module] → …
//! ```

pub mod defaults;
pub mod error;
pub mod id_generator;
pub mod kind;
pub mod layout;
pub mod module;
pub mod patch;
pub mod settings;
pub mod visitor;

pub use defaults::{create_default, create_default_named, DEFAULT_FONT_FAMILY};
pub use error::{SchemaError, SchemaResult};
pub use id_generator::IdGenerator;
pub use kind::ModuleKind;
pub use layout::{Layout, MAX_COLUMNS};
pub use module::*;
pub use patch::*;
pub use settings::{EmailBuilderState, EmailSettings};
pub use visitor::{collect_ids, count_modules, validate_tree, ModuleVisitor};
