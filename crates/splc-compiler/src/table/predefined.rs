//! The predefined global table.
//!
//! Seeds the primitive types and the builtin procedures of the runtime
//! library. The seed is a fixed input to table building: it exists before
//! any user declaration is entered, so user code resolves builtin names
//! unless it redeclares them.

use splc_core::table::{Entry, ProcedureEntry, SymbolTable, TypeEntry};
use splc_core::types::Type;

/// Build the global table seeded with predefined types and procedures.
pub fn predefined_table() -> SymbolTable {
    let mut table = SymbolTable::new();

    enter_type(&mut table, "int", Type::Int);
    enter_type(&mut table, "boolean", Type::Bool);

    let val = (Type::Int, false);
    let reference = (Type::Int, true);

    enter_proc(&mut table, "printi", vec![val.clone()]);
    enter_proc(&mut table, "printc", vec![val.clone()]);
    enter_proc(&mut table, "readi", vec![reference.clone()]);
    enter_proc(&mut table, "readc", vec![reference.clone()]);
    enter_proc(&mut table, "exit", vec![]);
    enter_proc(&mut table, "time", vec![reference]);
    enter_proc(&mut table, "clearAll", vec![val.clone()]);
    enter_proc(&mut table, "setPixel", vec![val.clone(), val.clone(), val.clone()]);
    enter_proc(
        &mut table,
        "drawLine",
        vec![val.clone(), val.clone(), val.clone(), val.clone(), val.clone()],
    );
    enter_proc(
        &mut table,
        "drawCircle",
        vec![val.clone(), val.clone(), val.clone(), val],
    );

    table
}

fn enter_type(table: &mut SymbolTable, name: &str, ty: Type) {
    table
        .enter(name, Entry::Type(TypeEntry { ty }))
        .unwrap_or_else(|_| panic!("predefined name '{name}' seeded twice"));
}

fn enter_proc(table: &mut SymbolTable, name: &str, parameters: Vec<(Type, bool)>) {
    table
        .enter(name, Entry::Procedure(ProcedureEntry::predefined(parameters)))
        .unwrap_or_else(|_| panic!("predefined name '{name}' seeded twice"));
}
