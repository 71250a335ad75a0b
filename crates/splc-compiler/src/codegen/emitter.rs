//! Assembly text emitter.
//!
//! [`AssemblyEmitter`] is the thin formatting layer between the code
//! generator and the output sink. It pins down the textual contract of the
//! generated assembly; any compatibility testing against reference output
//! depends on this exact shape:
//!
//! - directives: `\t.import\t<name>`, `\t.code`, `\t.align\t<n>`,
//!   `\t.export\t<name>`
//! - labels: `<name>:` in column zero
//! - instructions: `\t<mnemonic>\t<op>,<op>,<op>` with an optional
//!   `\t\t; <comment>` suffix; register operands print as `$<n>`,
//!   immediates in decimal
//! - control-flow labels: `L<n>`, numbered by one counter per generation
//!   pass

use std::fmt;
use std::io::{self, Write};

use super::register::Register;

/// A synthesized control-flow label, printed as `L<n>`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Label(pub u32);

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "L{}", self.0)
    }
}

/// Hands out label numbers from a single monotonically increasing counter.
#[derive(Debug, Default)]
pub struct LabelAllocator {
    next: u32,
}

impl LabelAllocator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocate the next label.
    pub fn next(&mut self) -> Label {
        let label = Label(self.next);
        self.next += 1;
        label
    }
}

/// Emits assembly text to an output sink.
pub struct AssemblyEmitter<W: Write> {
    out: W,
}

impl<W: Write> AssemblyEmitter<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    /// Emit an `.import` directive.
    pub fn emit_import(&mut self, name: &str) -> io::Result<()> {
        writeln!(self.out, "\t.import\t{name}")
    }

    /// Emit an `.export` directive.
    pub fn emit_export(&mut self, name: &str) -> io::Result<()> {
        writeln!(self.out, "\t.export\t{name}")
    }

    /// Emit the code-section directive.
    pub fn emit_code_section(&mut self) -> io::Result<()> {
        writeln!(self.out, "\t.code")
    }

    /// Emit an alignment directive.
    pub fn emit_align(&mut self, bytes: u32) -> io::Result<()> {
        writeln!(self.out, "\t.align\t{bytes}")
    }

    /// Emit a label definition.
    pub fn emit_label(&mut self, name: impl fmt::Display) -> io::Result<()> {
        writeln!(self.out, "{name}:")
    }

    /// Emit a blank separator line.
    pub fn emit_blank(&mut self) -> io::Result<()> {
        writeln!(self.out)
    }

    /// Emit a three-register instruction.
    pub fn emit_rrr(
        &mut self,
        mnemonic: &str,
        a: Register,
        b: Register,
        c: Register,
        comment: Option<&str>,
    ) -> io::Result<()> {
        self.emit_line(mnemonic, format_args!("{a},{b},{c}"), comment)
    }

    /// Emit a register-register-immediate instruction.
    pub fn emit_rri(
        &mut self,
        mnemonic: &str,
        a: Register,
        b: Register,
        value: i32,
        comment: Option<&str>,
    ) -> io::Result<()> {
        self.emit_line(mnemonic, format_args!("{a},{b},{value}"), comment)
    }

    /// Emit a conditional branch on two registers.
    pub fn emit_branch(
        &mut self,
        mnemonic: &str,
        a: Register,
        b: Register,
        target: impl fmt::Display,
    ) -> io::Result<()> {
        self.emit_line(mnemonic, format_args!("{a},{b},{target}"), None)
    }

    /// Emit an unconditional jump.
    pub fn emit_jump(&mut self, target: Label) -> io::Result<()> {
        self.emit_line("j", format_args!("{target}"), None)
    }

    /// Emit a call instruction.
    pub fn emit_call(&mut self, name: &str) -> io::Result<()> {
        self.emit_line("jal", format_args!("{name}"), None)
    }

    /// Emit a register jump (procedure return).
    pub fn emit_jump_register(&mut self, register: Register, comment: Option<&str>) -> io::Result<()> {
        self.emit_line("jr", format_args!("{register}"), comment)
    }

    fn emit_line(
        &mut self,
        mnemonic: &str,
        operands: fmt::Arguments<'_>,
        comment: Option<&str>,
    ) -> io::Result<()> {
        match comment {
            Some(comment) => writeln!(self.out, "\t{mnemonic}\t{operands}\t\t; {comment}"),
            None => writeln!(self.out, "\t{mnemonic}\t{operands}"),
        }
    }
}
