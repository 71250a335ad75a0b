//! Compilation options.

/// Toggles controlling the optional diagnostic dumps.
///
/// The dumps are logged through the `log` facade at debug level; they never
/// change the compilation result.
#[derive(Debug, Clone, Copy, Default)]
pub struct CompileOptions {
    /// Log each procedure's local symbol table when table building
    /// completes it.
    pub show_tables: bool,
    /// Log each procedure's stack layout when storage allocation
    /// completes it.
    pub show_varalloc: bool,
}
