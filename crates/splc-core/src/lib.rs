//! Core types shared by every compilation phase.
//!
//! This crate holds the data model the phases communicate through:
//!
//! - [`ast`]: the abstract syntax tree with its resolved-type slots
//! - [`types`]: semantic types (`int`, `boolean`, arrays)
//! - [`table`]: symbol tables, entries and stack layouts
//! - [`span`]: source positions for diagnostics
//! - [`error`]: the per-phase error enums and the unified [`SplError`]
//!
//! No phase logic lives here; the phases are in `splc-compiler`.

pub mod ast;
pub mod error;
pub mod span;
pub mod table;
pub mod types;

pub use error::{CodegenError, SemanticError, SplError, TableBuildError};
pub use span::Span;
pub use table::{
    Entry, ParameterType, ProcedureEntry, Scope, StackLayout, SymbolTable, TypeEntry,
    VariableEntry,
};
pub use types::{ArrayType, Type, WORD_SIZE};
