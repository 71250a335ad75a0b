//! Table building: the first compilation phase.
//!
//! Walks the program's declarations in source order and populates the
//! global symbol table, attaching a local table to every procedure entry.
//! Type expressions are resolved here and their resolved-type slots
//! written; everything else in the AST is left untouched for the checker.
//!
//! After the walk the phase verifies the `main` contract: a procedure named
//! `main` must exist and must declare no parameters. Violations abort the
//! compilation; no later phase runs on a partial table.

mod predefined;

pub use predefined::predefined_table;

use log::debug;

use splc_core::ast::{
    GlobalDeclaration, ProcedureDeclaration, Program, TypeDeclaration, TypeExpression,
};
use splc_core::error::TableBuildError;
use splc_core::table::{Entry, ParameterType, ProcedureEntry, SymbolTable, TypeEntry, VariableEntry};
use splc_core::types::Type;

use crate::options::CompileOptions;

type Result<T> = std::result::Result<T, TableBuildError>;

/// Build the global symbol table for `program`.
///
/// Resolves every type expression (writing its resolved-type slot), enters
/// every declaration, and checks the `main` contract. Fails fast on the
/// first violation.
pub fn build(program: &mut Program, options: &CompileOptions) -> Result<SymbolTable> {
    let mut global = predefined_table();

    for declaration in &mut program.declarations {
        match declaration {
            GlobalDeclaration::Type(decl) => enter_type_declaration(decl, &mut global)?,
            GlobalDeclaration::Procedure(decl) => {
                enter_procedure_declaration(decl, &mut global, options)?
            }
        }
    }

    check_main(&global)?;
    Ok(global)
}

/// Resolve a type expression against the global table.
///
/// Array type expressions resolve their base type first and then
/// synthesize a fresh array type; the declaration site is the type's
/// identity. The resolved type is written into the node's slot.
fn resolve_type_expression(
    type_expression: &mut TypeExpression,
    global: &SymbolTable,
) -> Result<Type> {
    match type_expression {
        TypeExpression::Named(named) => {
            let entry =
                global
                    .lookup(&named.name)
                    .ok_or_else(|| TableBuildError::UndefinedType {
                        name: named.name.clone(),
                        span: named.span,
                    })?;
            let type_entry = entry.as_type().ok_or_else(|| TableBuildError::NotAType {
                name: named.name.clone(),
                span: named.span,
            })?;
            let ty = type_entry.ty.clone();
            named.data_type = Some(ty.clone());
            Ok(ty)
        }
        TypeExpression::Array(array) => {
            let base = resolve_type_expression(&mut array.base, global)?;
            let ty = Type::array(base, array.size);
            array.data_type = Some(ty.clone());
            Ok(ty)
        }
    }
}

fn enter_type_declaration(decl: &mut TypeDeclaration, global: &mut SymbolTable) -> Result<()> {
    let ty = resolve_type_expression(&mut decl.type_expression, global)?;
    global
        .enter(&decl.name, Entry::Type(TypeEntry { ty }))
        .map_err(|_| TableBuildError::RedeclarationAsType {
            name: decl.name.clone(),
            span: decl.span,
        })?;
    Ok(())
}

fn enter_procedure_declaration(
    decl: &mut ProcedureDeclaration,
    global: &mut SymbolTable,
    options: &CompileOptions,
) -> Result<()> {
    let mut local_table = SymbolTable::new();
    let mut parameter_types = Vec::with_capacity(decl.parameters.len());

    for parameter in &mut decl.parameters {
        let ty = resolve_type_expression(&mut parameter.type_expression, global)?;

        // Arrays are only passable by reference; a by-value array
        // parameter is a language error, not a warning.
        if ty.is_array() && !parameter.is_reference {
            return Err(TableBuildError::MustBeAReferenceParameter {
                name: parameter.name.clone(),
                span: parameter.span,
            });
        }

        local_table
            .enter(
                &parameter.name,
                Entry::Variable(VariableEntry {
                    ty: ty.clone(),
                    is_reference: parameter.is_reference,
                    offset: None,
                }),
            )
            .map_err(|_| TableBuildError::RedeclarationAsParameter {
                name: parameter.name.clone(),
                span: parameter.span,
            })?;

        parameter_types.push(ParameterType {
            ty,
            is_reference: parameter.is_reference,
            offset: None,
        });
    }

    for variable in &mut decl.variables {
        let ty = resolve_type_expression(&mut variable.type_expression, global)?;
        local_table
            .enter(
                &variable.name,
                Entry::Variable(VariableEntry {
                    ty,
                    is_reference: false,
                    offset: None,
                }),
            )
            .map_err(|_| TableBuildError::RedeclarationAsVariable {
                name: variable.name.clone(),
                span: variable.span,
            })?;
    }

    if options.show_tables {
        debug!(
            "symbol table at end of procedure '{}':\n{}",
            decl.name, local_table
        );
    }

    global
        .enter(
            &decl.name,
            Entry::Procedure(ProcedureEntry {
                local_table,
                parameter_types,
                stack_layout: None,
            }),
        )
        .map_err(|_| TableBuildError::RedeclarationAsProcedure {
            name: decl.name.clone(),
            span: decl.span,
        })?;
    Ok(())
}

/// Verify that `main` exists, is a procedure, and has no parameters.
fn check_main(global: &SymbolTable) -> Result<()> {
    let entry = global.lookup("main").ok_or(TableBuildError::MainIsMissing)?;
    let procedure = entry
        .as_procedure()
        .ok_or(TableBuildError::MainIsNotAProcedure)?;
    if !procedure.parameter_types.is_empty() {
        return Err(TableBuildError::MainMustNotHaveParameters);
    }
    Ok(())
}
