//! splc: middle and back end of a compiler for SPL, a small imperative
//! language with procedures, typed variables, arrays and the usual control
//! statements.
//!
//! The crate consumes an already-parsed [`Program`] (AST with source
//! positions) together with the predefined global symbol table and produces
//! assembly text for a simple load/store register machine. Lexing, parsing
//! and the command-line driver live outside this workspace.
//!
//! ## Pipeline
//!
//! [`Compiler::compile`] runs the four phases strictly in sequence:
//!
//! 1. **Table building**: populate the global symbol table from the
//!    declarations, one local table per procedure
//! 2. **Semantic checking**: type-check every procedure body
//! 3. **Storage allocation**: compute stack frame layouts and offsets
//! 4. **Code generation**: emit the assembly text
//!
//! The first violation found aborts the whole compilation; later phases
//! never run on a broken program.
//!
//! ## Example
//!
//! ```ignore
//! use splc::{CompileOptions, Compiler};
//!
//! let mut program = parse(source)?; // external parser
//! let mut out = Vec::new();
//! Compiler::compile(&mut program, &CompileOptions::default(), &mut out)?;
//! ```

pub use splc_core::ast::{self, Program};
pub use splc_core::error::{CodegenError, SemanticError, SplError, TableBuildError};
pub use splc_core::span::Span;
pub use splc_core::table::{
    Entry, ParameterType, ProcedureEntry, Scope, StackLayout, SymbolTable, TypeEntry,
    VariableEntry,
};
pub use splc_core::types::{ArrayType, Type};

pub use splc_compiler::codegen;
pub use splc_compiler::options::CompileOptions;
pub use splc_compiler::semant;
pub use splc_compiler::table;
pub use splc_compiler::varalloc;

use std::io::Write;

/// The phase-sequencing entry point.
pub struct Compiler;

impl Compiler {
    /// Compile `program` to assembly text written into `out`.
    ///
    /// Returns the symbol table on success so drivers can render the
    /// diagnostic dumps. Fails fast with the first error of the earliest
    /// failing phase.
    pub fn compile<W: Write>(
        program: &mut Program,
        options: &CompileOptions,
        out: W,
    ) -> Result<SymbolTable, SplError> {
        let mut table = table::build(program, options)?;
        semant::check(program, &table)?;
        varalloc::allocate(program, &mut table, options);
        codegen::generate(program, &table, out)?;
        Ok(table)
    }
}
