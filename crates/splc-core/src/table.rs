//! Symbol tables and their entries.
//!
//! A [`SymbolTable`] maps identifiers to [`Entry`] values. The program has
//! one global table (types and procedures) and one local table per
//! procedure (parameters and local variables), owned by the procedure's
//! entry. Scope chaining is expressed by the [`Scope`] view, which walks
//! from a local table to the global table on lookup.
//!
//! Identifiers are unique within one table: entering a name twice is
//! rejected, never shadowed.

use std::fmt;

use rustc_hash::FxHashMap;

use crate::types::{Type, WORD_SIZE};

// ============================================================================
// Entries
// ============================================================================

/// The payload stored for one identifier.
#[derive(Debug)]
pub enum Entry {
    /// A declared type.
    Type(TypeEntry),
    /// A variable or parameter.
    Variable(VariableEntry),
    /// A procedure with its local scope.
    Procedure(ProcedureEntry),
}

impl Entry {
    /// View this entry as a type entry, if it is one.
    pub fn as_type(&self) -> Option<&TypeEntry> {
        match self {
            Entry::Type(entry) => Some(entry),
            _ => None,
        }
    }

    /// View this entry as a variable entry, if it is one.
    pub fn as_variable(&self) -> Option<&VariableEntry> {
        match self {
            Entry::Variable(entry) => Some(entry),
            _ => None,
        }
    }

    /// View this entry as a procedure entry, if it is one.
    pub fn as_procedure(&self) -> Option<&ProcedureEntry> {
        match self {
            Entry::Procedure(entry) => Some(entry),
            _ => None,
        }
    }

    /// Mutable view as a variable entry, if it is one.
    pub fn as_variable_mut(&mut self) -> Option<&mut VariableEntry> {
        match self {
            Entry::Variable(entry) => Some(entry),
            _ => None,
        }
    }

    /// Mutable view as a procedure entry, if it is one.
    pub fn as_procedure_mut(&mut self) -> Option<&mut ProcedureEntry> {
        match self {
            Entry::Procedure(entry) => Some(entry),
            _ => None,
        }
    }
}

impl fmt::Display for Entry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Entry::Type(entry) => write!(f, "type {}", entry.ty),
            Entry::Variable(entry) if entry.is_reference => write!(f, "ref var {}", entry.ty),
            Entry::Variable(entry) => write!(f, "var {}", entry.ty),
            Entry::Procedure(entry) => {
                write!(f, "proc (")?;
                for (i, param) in entry.parameter_types.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    if param.is_reference {
                        write!(f, "ref ")?;
                    }
                    write!(f, "{}", param.ty)?;
                }
                write!(f, ")")
            }
        }
    }
}

/// Table entry for a declared type.
#[derive(Debug)]
pub struct TypeEntry {
    pub ty: Type,
}

/// Table entry for a variable or parameter.
#[derive(Debug)]
pub struct VariableEntry {
    pub ty: Type,
    /// Whether the entry denotes a by-reference parameter.
    pub is_reference: bool,
    /// Frame-pointer-relative offset, `None` until storage allocation.
    pub offset: Option<i32>,
}

/// Table entry for a procedure.
#[derive(Debug)]
pub struct ProcedureEntry {
    /// The procedure's local scope, owned by this entry.
    pub local_table: SymbolTable,
    /// Parameter metadata in declaration order.
    pub parameter_types: Vec<ParameterType>,
    /// Frame layout, `None` until storage allocation.
    pub stack_layout: Option<StackLayout>,
}

impl ProcedureEntry {
    /// Entry for a builtin procedure.
    ///
    /// Builtins have no body, so their parameter offsets are assigned here
    /// (`0, 4, 8, …`): code generation needs them when storing outgoing
    /// arguments for calls to builtins.
    pub fn predefined(parameters: Vec<(Type, bool)>) -> Self {
        let parameter_types = parameters
            .into_iter()
            .enumerate()
            .map(|(i, (ty, is_reference))| ParameterType {
                ty,
                is_reference,
                offset: Some(i as i32 * WORD_SIZE),
            })
            .collect();
        Self {
            local_table: SymbolTable::new(),
            parameter_types,
            stack_layout: None,
        }
    }
}

/// Metadata for one procedure parameter.
#[derive(Debug)]
pub struct ParameterType {
    pub ty: Type,
    pub is_reference: bool,
    /// Offset of the parameter's slot, `None` until storage allocation.
    pub offset: Option<i32>,
}

// ============================================================================
// Stack Layout
// ============================================================================

/// The stack frame layout of one procedure.
///
/// Created and filled by storage allocation, read-only afterwards. All
/// sizes are in bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StackLayout {
    /// Bytes reserved for the procedure's own incoming parameters.
    pub argument_area_size: i32,
    /// Sum of the local variables' byte sizes.
    pub local_var_area_size: i32,
    /// Bytes needed for the largest call made from the body, or `None`
    /// for a leaf procedure (a body that makes no calls).
    pub outgoing_area_size: Option<i32>,
}

impl StackLayout {
    /// Whether the procedure makes no calls.
    ///
    /// Leaf procedures get a smaller frame: no saved return address and no
    /// outgoing argument area.
    pub fn is_leaf(&self) -> bool {
        self.outgoing_area_size.is_none()
    }

    /// Total size of the frame.
    ///
    /// 4 bytes are always reserved for the saved frame pointer; non-leaf
    /// frames spend 4 more for the saved return address plus the outgoing
    /// argument area.
    pub fn frame_size(&self) -> i32 {
        match self.outgoing_area_size {
            None => 4 + self.local_var_area_size,
            Some(outgoing) => 8 + self.local_var_area_size + outgoing,
        }
    }

    /// Offset of the saved frame pointer, relative to the new stack pointer.
    pub fn old_frame_pointer_offset(&self) -> i32 {
        match self.outgoing_area_size {
            None => 0,
            Some(outgoing) => outgoing + 4,
        }
    }

    /// Offset of the saved return address, relative to the new frame
    /// pointer. Only meaningful for non-leaf procedures.
    pub fn old_return_address_offset(&self) -> i32 {
        -(self.frame_size() - self.outgoing_area_size.unwrap_or(0))
    }
}

// ============================================================================
// SymbolTable
// ============================================================================

/// A single scope: a mapping from identifier to entry.
#[derive(Debug, Default)]
pub struct SymbolTable {
    entries: FxHashMap<String, Entry>,
}

impl SymbolTable {
    /// Create an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Enter `entry` under `name`.
    ///
    /// Identifiers are unique within one table: if `name` is already
    /// declared, the table is unchanged and the rejected entry is handed
    /// back so the caller can report a redeclaration error.
    pub fn enter(&mut self, name: &str, entry: Entry) -> Result<(), Entry> {
        if self.entries.contains_key(name) {
            return Err(entry);
        }
        self.entries.insert(name.to_string(), entry);
        Ok(())
    }

    /// Look up `name` in this table only.
    pub fn lookup(&self, name: &str) -> Option<&Entry> {
        self.entries.get(name)
    }

    /// Look up `name` in this table only, mutably.
    pub fn lookup_mut(&mut self, name: &str) -> Option<&mut Entry> {
        self.entries.get_mut(name)
    }

    /// Whether this table has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of entries in this table.
    pub fn len(&self) -> usize {
        self.entries.len()
    }
}

impl fmt::Display for SymbolTable {
    /// Renders the entries sorted by name, one per line.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut names: Vec<&String> = self.entries.keys().collect();
        names.sort();
        for name in names {
            writeln!(f, "  {}: {}", name, self.entries[name])?;
        }
        Ok(())
    }
}

/// A lookup view chaining a local table to the global table.
///
/// First match wins: the local table hides global names.
#[derive(Clone, Copy)]
pub struct Scope<'a> {
    pub local: &'a SymbolTable,
    pub global: &'a SymbolTable,
}

impl<'a> Scope<'a> {
    /// Look up `name`, walking local then global.
    pub fn lookup(&self, name: &str) -> Option<&'a Entry> {
        self.local
            .lookup(name)
            .or_else(|| self.global.lookup(name))
    }
}
