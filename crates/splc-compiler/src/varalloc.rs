//! Storage allocation: the third compilation phase.
//!
//! Computes the stack frame layout of every procedure and assigns
//! frame-pointer-relative offsets to parameters and local variables. The
//! results land in the symbol table: the procedure entry's [`StackLayout`]
//! plus the offsets on its parameter metadata and local-table entries.
//!
//! Allocation runs on a checked program and cannot fail: every type has
//! been resolved and every call target exists.
//!
//! Frame shape, growing downwards (offsets relative to the new frame
//! pointer, which sits at the top of the frame):
//!
//! ```text
//! FP + 4k   incoming parameter k (in the caller's outgoing area)
//! FP        ---- frame top ----
//! FP - n    local variables, in declaration order
//!           saved return address        (non-leaf only)
//!           outgoing argument area      (non-leaf only)
//!           saved frame pointer
//! SP        ---- frame bottom ----
//! ```

use log::debug;

use splc_core::ast::{GlobalDeclaration, ProcedureDeclaration, Program, Statement};
use splc_core::table::{Entry, ProcedureEntry, StackLayout, SymbolTable};
use splc_core::types::WORD_SIZE;

use crate::options::CompileOptions;

/// Allocate stack frames for every procedure of `program`.
pub fn allocate(program: &Program, table: &mut SymbolTable, options: &CompileOptions) {
    for declaration in &program.declarations {
        let GlobalDeclaration::Procedure(decl) = declaration else {
            continue;
        };
        let allocation = compute(decl, table);
        commit(decl, table, allocation);

        if options.show_varalloc {
            let entry = table
                .lookup(&decl.name)
                .and_then(Entry::as_procedure)
                .expect("procedure entered during table building");
            debug!("{}", format_allocation(decl, entry));
        }
    }
}

/// The layout and offsets computed for one procedure.
struct ProcAllocation {
    layout: StackLayout,
    /// Offset per local variable, in declaration order.
    local_offsets: Vec<i32>,
}

/// Compute the layout of one procedure without touching the table.
fn compute(decl: &ProcedureDeclaration, table: &SymbolTable) -> ProcAllocation {
    let argument_area_size = decl.parameters.len() as i32 * WORD_SIZE;

    // Local variables get strictly descending contiguous offsets below the
    // frame pointer; the first one sits directly at FP - its size.
    let mut local_var_area_size = 0;
    let mut local_offsets = Vec::with_capacity(decl.variables.len());
    let mut offset = 0;
    for variable in &decl.variables {
        let byte_size = variable
            .type_expression
            .data_type()
            .expect("type resolved during table building")
            .byte_size();
        local_var_area_size += byte_size;
        offset -= byte_size;
        local_offsets.push(offset);
    }

    // The outgoing area accumulates the largest call of this body; a body
    // without calls keeps `None` and the procedure is a leaf.
    let mut outgoing_area_size = None;
    for statement in &decl.body {
        scan_calls(statement, table, &mut outgoing_area_size);
    }

    ProcAllocation {
        layout: StackLayout {
            argument_area_size,
            local_var_area_size,
            outgoing_area_size,
        },
        local_offsets,
    }
}

/// Find every call statement at any nesting depth and raise the outgoing
/// area to the callee's argument bytes.
fn scan_calls(statement: &Statement, table: &SymbolTable, outgoing: &mut Option<i32>) {
    match statement {
        Statement::Call(stmt) => {
            let callee = table
                .lookup(&stmt.procedure)
                .and_then(Entry::as_procedure)
                .expect("call target resolved during checking");
            let bytes = callee.parameter_types.len() as i32 * WORD_SIZE;
            *outgoing = Some(outgoing.map_or(bytes, |current| current.max(bytes)));
        }
        Statement::Compound(stmt) => {
            for statement in &stmt.statements {
                scan_calls(statement, table, outgoing);
            }
        }
        Statement::If(stmt) => {
            scan_calls(&stmt.then_branch, table, outgoing);
            if let Some(else_branch) = &stmt.else_branch {
                scan_calls(else_branch, table, outgoing);
            }
        }
        Statement::While(stmt) => scan_calls(&stmt.body, table, outgoing),
        Statement::DoWhile(stmt) => scan_calls(&stmt.body, table, outgoing),
        Statement::Assign(_) | Statement::Empty(_) => {}
    }
}

/// Write the computed layout and offsets into the table.
fn commit(decl: &ProcedureDeclaration, table: &mut SymbolTable, allocation: ProcAllocation) {
    let entry = table
        .lookup_mut(&decl.name)
        .and_then(Entry::as_procedure_mut)
        .expect("procedure entered during table building");

    // Parameters ascend from the frame pointer; the offset is stored on
    // both the parameter metadata and the local-table entry, and the two
    // must stay consistent.
    for (i, parameter) in decl.parameters.iter().enumerate() {
        let offset = i as i32 * WORD_SIZE;
        entry.parameter_types[i].offset = Some(offset);
        if let Some(variable) = entry
            .local_table
            .lookup_mut(&parameter.name)
            .and_then(Entry::as_variable_mut)
        {
            variable.offset = Some(offset);
        }
    }

    for (variable, offset) in decl.variables.iter().zip(allocation.local_offsets) {
        if let Some(entry) = entry
            .local_table
            .lookup_mut(&variable.name)
            .and_then(Entry::as_variable_mut)
        {
            entry.offset = Some(offset);
        }
    }

    entry.stack_layout = Some(allocation.layout);
}

/// Render one procedure's allocation for the `show_varalloc` dump.
fn format_allocation(decl: &ProcedureDeclaration, entry: &ProcedureEntry) -> String {
    use std::fmt::Write;

    let layout = entry
        .stack_layout
        .as_ref()
        .expect("layout committed before dumping");

    let mut out = String::new();
    let _ = writeln!(out, "variable allocation for procedure '{}':", decl.name);
    let _ = writeln!(out, "  argument area size = {}", layout.argument_area_size);
    let _ = writeln!(out, "  localvar area size = {}", layout.local_var_area_size);
    match layout.outgoing_area_size {
        None => {
            let _ = writeln!(out, "  outgoing area size = none (leaf procedure)");
        }
        Some(size) => {
            let _ = writeln!(out, "  outgoing area size = {size}");
        }
    }
    let _ = writeln!(out, "  frame size = {}", layout.frame_size());

    for (i, parameter) in decl.parameters.iter().enumerate() {
        let meta_offset = entry.parameter_types[i].offset;
        let table_offset = entry
            .local_table
            .lookup(&parameter.name)
            .and_then(Entry::as_variable)
            .and_then(|v| v.offset);
        if meta_offset == table_offset {
            let _ = writeln!(out, "  par {} -> FP + {}", parameter.name, meta_offset.unwrap_or(0));
        } else {
            let _ = writeln!(
                out,
                "  par {} -> INCONSISTENT ({:?}/{:?})",
                parameter.name, meta_offset, table_offset
            );
        }
    }
    for variable in &decl.variables {
        let offset = entry
            .local_table
            .lookup(&variable.name)
            .and_then(Entry::as_variable)
            .and_then(|v| v.offset)
            .unwrap_or(0);
        let _ = writeln!(out, "  var {} -> FP - {}", variable.name, -offset);
    }
    out
}
