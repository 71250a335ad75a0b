//! The compilation phases.
//!
//! A clean 4-phase middle and back end over the shared AST and symbol
//! table from `splc-core`:
//!
//! - **Phase 1 ([`table`])**: build the global symbol table from the
//!   declarations, resolving type expressions
//! - **Phase 2 ([`semant`])**: type-check every procedure body, writing
//!   resolved types into the AST
//! - **Phase 3 ([`varalloc`])**: compute stack frame layouts and variable
//!   offsets
//! - **Phase 4 ([`codegen`])**: lower the checked, allocated program to
//!   assembly text
//!
//! The phases run strictly in sequence; each reads the annotations the
//! previous one guarantees to have written everywhere. Any violation is
//! fatal and aborts the compilation, so a later phase never sees a
//! half-annotated program.

pub mod codegen;
pub mod options;
pub mod semant;
pub mod table;
pub mod varalloc;

#[cfg(test)]
pub(crate) mod testutil;

pub use codegen::generate;
pub use options::CompileOptions;
pub use semant::check;
pub use table::{build, predefined_table};
pub use varalloc::allocate;
