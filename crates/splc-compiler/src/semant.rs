//! Semantic checking: the second compilation phase.
//!
//! Walks every procedure body against its local table, enforcing the typing
//! rules and writing resolved types into expression and variable nodes.
//! The checker fails fast: the first violation aborts the phase, and later
//! phases never run.
//!
//! Visit order matters for which error surfaces first and mirrors the
//! statement structure: operands before the operation, all call arguments
//! before the callee checks.

use splc_core::ast::{
    Expression, GlobalDeclaration, Program, Statement, Variable,
};
use splc_core::error::SemanticError;
use splc_core::table::{Entry, Scope, SymbolTable};
use splc_core::types::Type;

type Result<T> = std::result::Result<T, SemanticError>;

/// Check every procedure body of `program` against `table`.
///
/// On success, every expression, variable and type-expression node of the
/// program carries a resolved type.
pub fn check(program: &mut Program, table: &SymbolTable) -> Result<()> {
    for declaration in &mut program.declarations {
        let GlobalDeclaration::Procedure(decl) = declaration else {
            continue;
        };
        let entry = table
            .lookup(&decl.name)
            .and_then(Entry::as_procedure)
            .expect("procedure entered during table building");
        let checker = BodyChecker {
            scope: Scope {
                local: &entry.local_table,
                global: table,
            },
        };
        for statement in &mut decl.body {
            checker.check_statement(statement)?;
        }
    }
    Ok(())
}

/// Checks one procedure body against its scope.
struct BodyChecker<'a> {
    scope: Scope<'a>,
}

impl BodyChecker<'_> {
    fn check_statement(&self, statement: &mut Statement) -> Result<()> {
        match statement {
            Statement::Assign(stmt) => {
                self.check_variable(&mut stmt.target)?;
                self.check_expression(&mut stmt.value)?;
                if stmt.value.data_type() != stmt.target.data_type() {
                    return Err(SemanticError::AssignmentHasDifferentTypes { span: stmt.span });
                }
                if stmt.target.data_type() != Some(&Type::Int) {
                    return Err(SemanticError::AssignmentRequiresIntegers { span: stmt.span });
                }
                Ok(())
            }
            Statement::Call(stmt) => {
                for argument in &mut stmt.arguments {
                    self.check_expression(argument)?;
                }
                let entry = self.scope.global.lookup(&stmt.procedure).ok_or_else(|| {
                    SemanticError::UndefinedProcedure {
                        name: stmt.procedure.clone(),
                        span: stmt.span,
                    }
                })?;
                let procedure =
                    entry
                        .as_procedure()
                        .ok_or_else(|| SemanticError::CallOfNonProcedure {
                            name: stmt.procedure.clone(),
                            span: stmt.span,
                        })?;
                if stmt.arguments.len() > procedure.parameter_types.len() {
                    return Err(SemanticError::TooManyArguments {
                        name: stmt.procedure.clone(),
                        span: stmt.span,
                    });
                }
                if stmt.arguments.len() < procedure.parameter_types.len() {
                    return Err(SemanticError::TooFewArguments {
                        name: stmt.procedure.clone(),
                        span: stmt.span,
                    });
                }
                for (i, (argument, parameter)) in stmt
                    .arguments
                    .iter()
                    .zip(&procedure.parameter_types)
                    .enumerate()
                {
                    if argument.data_type() != Some(&parameter.ty) {
                        return Err(SemanticError::ArgumentTypeMismatch {
                            name: stmt.procedure.clone(),
                            index: i + 1,
                            span: stmt.span,
                        });
                    }
                    // A reference parameter needs an address: the argument
                    // must itself be a storage location.
                    if parameter.is_reference && !matches!(argument, Expression::Variable(_)) {
                        return Err(SemanticError::ArgumentMustBeAVariable {
                            name: stmt.procedure.clone(),
                            index: i + 1,
                            span: stmt.span,
                        });
                    }
                }
                Ok(())
            }
            Statement::If(stmt) => {
                self.check_expression(&mut stmt.condition)?;
                if let Some(else_branch) = &mut stmt.else_branch {
                    self.check_statement(else_branch)?;
                }
                self.check_statement(&mut stmt.then_branch)?;
                if stmt.condition.data_type() != Some(&Type::Bool) {
                    return Err(SemanticError::IfConditionMustBeBoolean { span: stmt.span });
                }
                Ok(())
            }
            Statement::While(stmt) => {
                self.check_expression(&mut stmt.condition)?;
                self.check_statement(&mut stmt.body)?;
                if stmt.condition.data_type() != Some(&Type::Bool) {
                    return Err(SemanticError::WhileConditionMustBeBoolean { span: stmt.span });
                }
                Ok(())
            }
            Statement::DoWhile(stmt) => {
                self.check_statement(&mut stmt.body)?;
                self.check_expression(&mut stmt.condition)?;
                if stmt.condition.data_type() != Some(&Type::Bool) {
                    return Err(SemanticError::DoWhileConditionMustBeBoolean { span: stmt.span });
                }
                Ok(())
            }
            Statement::Compound(stmt) => {
                for statement in &mut stmt.statements {
                    self.check_statement(statement)?;
                }
                Ok(())
            }
            Statement::Empty(_) => Ok(()),
        }
    }

    fn check_expression(&self, expression: &mut Expression) -> Result<()> {
        match expression {
            Expression::Binary(expr) => {
                self.check_expression(&mut expr.left)?;
                self.check_expression(&mut expr.right)?;
                if expr.left.data_type() != expr.right.data_type() {
                    return Err(SemanticError::OperatorDifferentTypes { span: expr.span });
                }
                if expr.operator.is_arithmetic() {
                    if expr.left.data_type() == Some(&Type::Bool) {
                        return Err(SemanticError::ArithmeticOperatorNonInteger {
                            span: expr.span,
                        });
                    }
                    expr.data_type = Some(Type::Int);
                } else {
                    if expr.left.data_type() == Some(&Type::Bool) {
                        return Err(SemanticError::ComparisonNonInteger { span: expr.span });
                    }
                    expr.data_type = Some(Type::Bool);
                }
                Ok(())
            }
            Expression::Variable(expr) => {
                self.check_variable(&mut expr.variable)?;
                expr.data_type = expr.variable.data_type().cloned();
                Ok(())
            }
            Expression::IntLiteral(expr) => {
                expr.data_type = Some(Type::Int);
                Ok(())
            }
        }
    }

    fn check_variable(&self, variable: &mut Variable) -> Result<()> {
        match variable {
            Variable::Named(var) => {
                let entry =
                    self.scope
                        .lookup(&var.name)
                        .ok_or_else(|| SemanticError::UndefinedVariable {
                            name: var.name.clone(),
                            span: var.span,
                        })?;
                let variable_entry =
                    entry
                        .as_variable()
                        .ok_or_else(|| SemanticError::NotAVariable {
                            name: var.name.clone(),
                            span: var.span,
                        })?;
                var.data_type = Some(variable_entry.ty.clone());
                Ok(())
            }
            Variable::ArrayAccess(access) => {
                self.check_variable(&mut access.array)?;
                self.check_expression(&mut access.index)?;
                if access.index.data_type() != Some(&Type::Int) {
                    return Err(SemanticError::IndexingWithNonInteger { span: access.span });
                }
                let element = match access.array.data_type() {
                    Some(Type::Array(array)) => array.base.clone(),
                    _ => return Err(SemanticError::IndexingNonArray { span: access.span }),
                };
                access.data_type = Some(element);
                Ok(())
            }
        }
    }
}
