//! # Mailcraft Editor
//!
//! Command-driven editing of an email document.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │ schema: modules, columns, settings, patches │
//! └─────────────────────────────────────────────┘
//!                     ↓
//! ┌─────────────────────────────────────────────┐
//! │ editor: Document + commands                 │
//! │  - Locate and mutate modules at any depth   │
//! │  - Apply commands with validation           │
//! │  - Track version and selection              │
//! └─────────────────────────────────────────────┘
//!                     ↓
//! ┌─────────────────────────────────────────────┐
//! │ compiler-html: state → HTML document        │
//! └─────────────────────────────────────────────┘
//! ```
//!
//! ## Core Principles
//!
//! 1. **State is a value**: every command produces a new state or an error
//! 2. **Not found is not an error**: commands on missing ids are no-ops
//! 3. **Validate before mutating**: a rejected command changes nothing
//!
//! ## Usage
//!
//! ```rust
//! use mailcraft_editor::{Command, Document};
//! use mailcraft_schema::ModuleKind;
//!
//! let mut doc = Document::new();
//! let columns = doc.add_module(ModuleKind::Columns)?.created.unwrap();
//! let first_column = doc.module(&columns).unwrap().columns().unwrap()[0].id.clone();
//!
//! doc.add_module_to_column(&columns, &first_column, ModuleKind::Image)?;
//! doc.apply(Command::ResizeColumns {
//!     module_id: columns.clone(),
//!     layout: "1:2".to_string(),
//! })?;
//!
//! assert_eq!(doc.version, 3);
//! # Ok::<(), mailcraft_editor::EditorError>(())
//! ```

mod commands;
mod document;
mod errors;
pub mod tree;

pub use commands::{Applied, Command};
pub use document::{CommandResult, Document};
pub use errors::{EditorError, EditorResult};
