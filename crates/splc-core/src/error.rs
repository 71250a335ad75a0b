//! Unified error types for the compiler.
//!
//! This module provides a consistent error type hierarchy for the phases
//! of compilation: table building, semantic checking, and code generation.
//!
//! ## Error Hierarchy
//!
//! ```text
//! SplError (top-level wrapper)
//! ├── TableBuildError - declaration and table-building errors
//! ├── SemanticError   - type checking and call checking errors
//! └── CodegenError    - code generation and output errors
//! ```
//!
//! Every violation is fatal: a phase returns the first error it finds and
//! the driver propagates it, so later phases never run on a broken program.

use thiserror::Error;

use crate::Span;

// ============================================================================
// Table Building Errors
// ============================================================================

/// Errors raised while building the symbol tables from declarations.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TableBuildError {
    /// A type expression referenced an undeclared name.
    #[error("at {span}: undefined type '{name}'")]
    UndefinedType { name: String, span: Span },

    /// A type expression referenced a name that is not a type.
    #[error("at {span}: '{name}' is not a type")]
    NotAType { name: String, span: Span },

    /// A type declaration reused an already declared name.
    #[error("at {span}: redeclaration of '{name}' as type")]
    RedeclarationAsType { name: String, span: Span },

    /// A variable declaration reused an already declared name.
    #[error("at {span}: redeclaration of '{name}' as variable")]
    RedeclarationAsVariable { name: String, span: Span },

    /// A parameter declaration reused an already declared name.
    #[error("at {span}: redeclaration of '{name}' as parameter")]
    RedeclarationAsParameter { name: String, span: Span },

    /// A procedure declaration reused an already declared name.
    #[error("at {span}: redeclaration of '{name}' as procedure")]
    RedeclarationAsProcedure { name: String, span: Span },

    /// An array-typed parameter was declared by value.
    #[error("at {span}: parameter '{name}' has array type and must be a reference parameter")]
    MustBeAReferenceParameter { name: String, span: Span },

    /// The program declares no procedure named `main`.
    #[error("procedure 'main' is missing")]
    MainIsMissing,

    /// `main` is declared, but not as a procedure.
    #[error("'main' is not a procedure")]
    MainIsNotAProcedure,

    /// `main` is a procedure, but declares parameters.
    #[error("procedure 'main' must not have any parameters")]
    MainMustNotHaveParameters,
}

impl TableBuildError {
    /// Get the span where this error occurred.
    pub fn span(&self) -> Span {
        match self {
            TableBuildError::UndefinedType { span, .. } => *span,
            TableBuildError::NotAType { span, .. } => *span,
            TableBuildError::RedeclarationAsType { span, .. } => *span,
            TableBuildError::RedeclarationAsVariable { span, .. } => *span,
            TableBuildError::RedeclarationAsParameter { span, .. } => *span,
            TableBuildError::RedeclarationAsProcedure { span, .. } => *span,
            TableBuildError::MustBeAReferenceParameter { span, .. } => *span,
            TableBuildError::MainIsMissing
            | TableBuildError::MainIsNotAProcedure
            | TableBuildError::MainMustNotHaveParameters => Span::default(),
        }
    }
}

// ============================================================================
// Semantic Errors
// ============================================================================

/// Errors raised while checking procedure bodies.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SemanticError {
    /// Assignment target and value have different types.
    #[error("at {span}: assignment has different types")]
    AssignmentHasDifferentTypes { span: Span },

    /// Assignment target is not of type `int`.
    #[error("at {span}: assignment requires integer variable")]
    AssignmentRequiresIntegers { span: Span },

    /// A binary operator was applied to operands of different types.
    #[error("at {span}: expression combines different types")]
    OperatorDifferentTypes { span: Span },

    /// A comparison operator was applied to boolean operands.
    #[error("at {span}: comparison requires integer operands")]
    ComparisonNonInteger { span: Span },

    /// An arithmetic operator was applied to boolean operands.
    #[error("at {span}: arithmetic operation requires integer operands")]
    ArithmeticOperatorNonInteger { span: Span },

    /// The test expression of an `if` is not boolean.
    #[error("at {span}: 'if' test expression must be of type boolean")]
    IfConditionMustBeBoolean { span: Span },

    /// The test expression of a `while` is not boolean.
    #[error("at {span}: 'while' test expression must be of type boolean")]
    WhileConditionMustBeBoolean { span: Span },

    /// The test expression of a `do-while` is not boolean.
    #[error("at {span}: 'do-while' test expression must be of type boolean")]
    DoWhileConditionMustBeBoolean { span: Span },

    /// A variable reference named an undeclared identifier.
    #[error("at {span}: undefined variable '{name}'")]
    UndefinedVariable { name: String, span: Span },

    /// A variable reference resolved to a non-variable entry.
    #[error("at {span}: '{name}' is not a variable")]
    NotAVariable { name: String, span: Span },

    /// An index operation was applied to a non-array value.
    #[error("at {span}: illegal indexing a non-array")]
    IndexingNonArray { span: Span },

    /// An index expression is not of type `int`.
    #[error("at {span}: illegal indexing with a non-integer")]
    IndexingWithNonInteger { span: Span },

    /// A call statement named an undeclared identifier.
    #[error("at {span}: undefined procedure '{name}'")]
    UndefinedProcedure { name: String, span: Span },

    /// A call statement resolved to a non-procedure entry.
    #[error("at {span}: call of non-procedure '{name}'")]
    CallOfNonProcedure { name: String, span: Span },

    /// A call passes fewer arguments than the procedure declares.
    #[error("at {span}: procedure '{name}' called with too few arguments")]
    TooFewArguments { name: String, span: Span },

    /// A call passes more arguments than the procedure declares.
    #[error("at {span}: procedure '{name}' called with too many arguments")]
    TooManyArguments { name: String, span: Span },

    /// An argument's type does not match the corresponding parameter.
    #[error("at {span}: procedure '{name}' argument {index} has wrong type")]
    ArgumentTypeMismatch {
        name: String,
        /// 1-based argument position.
        index: usize,
        span: Span,
    },

    /// A value was passed where a reference parameter requires a variable.
    #[error("at {span}: procedure '{name}' argument {index} must be a variable")]
    ArgumentMustBeAVariable {
        name: String,
        /// 1-based argument position.
        index: usize,
        span: Span,
    },
}

impl SemanticError {
    /// Get the span where this error occurred.
    pub fn span(&self) -> Span {
        match self {
            SemanticError::AssignmentHasDifferentTypes { span }
            | SemanticError::AssignmentRequiresIntegers { span }
            | SemanticError::OperatorDifferentTypes { span }
            | SemanticError::ComparisonNonInteger { span }
            | SemanticError::ArithmeticOperatorNonInteger { span }
            | SemanticError::IfConditionMustBeBoolean { span }
            | SemanticError::WhileConditionMustBeBoolean { span }
            | SemanticError::DoWhileConditionMustBeBoolean { span }
            | SemanticError::IndexingNonArray { span }
            | SemanticError::IndexingWithNonInteger { span } => *span,
            SemanticError::UndefinedVariable { span, .. }
            | SemanticError::NotAVariable { span, .. }
            | SemanticError::UndefinedProcedure { span, .. }
            | SemanticError::CallOfNonProcedure { span, .. }
            | SemanticError::TooFewArguments { span, .. }
            | SemanticError::TooManyArguments { span, .. }
            | SemanticError::ArgumentTypeMismatch { span, .. }
            | SemanticError::ArgumentMustBeAVariable { span, .. } => *span,
        }
    }
}

// ============================================================================
// Code Generation Errors
// ============================================================================

/// Errors raised while generating assembly output.
#[derive(Debug, Error)]
pub enum CodegenError {
    /// Writing to the output sink failed.
    #[error("write error: {0}")]
    Io(#[from] std::io::Error),

    /// An expression nests deeper than the scratch register bank.
    ///
    /// This is a documented compilation limit of the target model, not a
    /// program error: the expression stack spans registers `$8` to `$23`.
    #[error("at {span}: expression too complex (out of scratch registers)")]
    RegisterOverflow { span: Span },

    /// A cross-phase invariant was broken.
    #[error("internal error: {message}")]
    Internal { message: String },
}

// ============================================================================
// Unified Error Type
// ============================================================================

/// The unified error type for a whole compilation run.
///
/// Wraps the phase-specific error types. Each variant uses `#[from]` to
/// enable propagation with the `?` operator across phase boundaries.
#[derive(Debug, Error)]
pub enum SplError {
    /// A table-building error.
    #[error(transparent)]
    Table(#[from] TableBuildError),

    /// A semantic error.
    #[error(transparent)]
    Semantic(#[from] SemanticError),

    /// A code generation error.
    #[error(transparent)]
    Codegen(#[from] CodegenError),
}

impl SplError {
    /// Check if this is a table-building error.
    pub fn is_table(&self) -> bool {
        matches!(self, SplError::Table(_))
    }

    /// Check if this is a semantic error.
    pub fn is_semantic(&self) -> bool {
        matches!(self, SplError::Semantic(_))
    }

    /// Check if this is a code generation error.
    pub fn is_codegen(&self) -> bool {
        matches!(self, SplError::Codegen(_))
    }
}
