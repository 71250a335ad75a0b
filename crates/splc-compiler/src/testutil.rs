//! AST construction helpers for the phase tests.
//!
//! All nodes are created at the default span unless a test cares about the
//! position; the `*_at` variants take an explicit one.

use splc_core::Span;
use splc_core::ast::*;

pub fn program(declarations: Vec<GlobalDeclaration>) -> Program {
    Program::new(declarations)
}

pub fn proc_decl(
    name: &str,
    parameters: Vec<ParameterDeclaration>,
    variables: Vec<VariableDeclaration>,
    body: Vec<Statement>,
) -> GlobalDeclaration {
    GlobalDeclaration::Procedure(ProcedureDeclaration::new(
        name,
        parameters,
        variables,
        body,
        Span::default(),
    ))
}

pub fn type_decl(name: &str, type_expression: TypeExpression) -> GlobalDeclaration {
    GlobalDeclaration::Type(TypeDeclaration::new(name, type_expression, Span::default()))
}

pub fn param(name: &str, type_expression: TypeExpression, is_reference: bool) -> ParameterDeclaration {
    ParameterDeclaration::new(name, type_expression, is_reference, Span::default())
}

pub fn var_decl(name: &str, type_expression: TypeExpression) -> VariableDeclaration {
    VariableDeclaration::new(name, type_expression, Span::default())
}

pub fn var_decl_at(name: &str, type_expression: TypeExpression, span: Span) -> VariableDeclaration {
    VariableDeclaration::new(name, type_expression, span)
}

pub fn named_type(name: &str) -> TypeExpression {
    NamedTypeExpression::new(name, Span::default())
}

pub fn array_type(base: TypeExpression, size: u32) -> TypeExpression {
    ArrayTypeExpression::new(base, size, Span::default())
}

pub fn int(value: i32) -> Expression {
    IntLiteral::new(value, Span::default())
}

pub fn named(name: &str) -> Variable {
    NamedVariable::new(name, Span::default())
}

pub fn index(array: Variable, index: Expression) -> Variable {
    ArrayAccess::new(array, index, Span::default())
}

/// An expression reading `name`.
pub fn var_expr(name: &str) -> Expression {
    VariableExpression::new(named(name), Span::default())
}

pub fn binary(operator: BinaryOperator, left: Expression, right: Expression) -> Expression {
    BinaryExpression::new(operator, left, right, Span::default())
}

pub fn assign(target: Variable, value: Expression) -> Statement {
    AssignStatement::new(target, value, Span::default())
}

pub fn call(procedure: &str, arguments: Vec<Expression>) -> Statement {
    CallStatement::new(procedure, arguments, Span::default())
}

pub fn if_stmt(condition: Expression, then_branch: Statement) -> Statement {
    IfStatement::new(condition, then_branch, None, Span::default())
}

pub fn if_else(condition: Expression, then_branch: Statement, else_branch: Statement) -> Statement {
    IfStatement::new(condition, then_branch, Some(else_branch), Span::default())
}

pub fn while_stmt(condition: Expression, body: Statement) -> Statement {
    WhileStatement::new(condition, body, Span::default())
}

pub fn do_while(body: Statement, condition: Expression) -> Statement {
    DoWhileStatement::new(body, condition, Span::default())
}

pub fn compound(statements: Vec<Statement>) -> Statement {
    CompoundStatement::new(statements, Span::default())
}

pub fn empty() -> Statement {
    EmptyStatement::new(Span::default())
}
