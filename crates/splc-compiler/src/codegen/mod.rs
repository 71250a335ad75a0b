//! Code generation: the fourth compilation phase.
//!
//! Lowers the checked, allocated program to assembly text for the target
//! load/store machine. Every procedure gets an export directive, a label,
//! a frame prologue, its lowered body and the mirrored epilogue.
//!
//! Expressions evaluate on a register stack over the scratch bank (see
//! [`register`]); conditions lower to conditional branches, flipped for
//! constructs that branch past their body (`if`, `while`) and taken
//! directly for `do-while`, which branches back while the condition still
//! holds. Array accesses emit a bounds check branching to the runtime's
//! `_indexError` routine.

mod emitter;
mod register;

pub use emitter::{AssemblyEmitter, Label, LabelAllocator};
pub use register::{Register, RegisterStack};

use std::io::Write;

use splc_core::ast::{
    BinaryOperator, Expression, GlobalDeclaration, ProcedureDeclaration, Program, Statement,
    Variable,
};
use splc_core::error::CodegenError;
use splc_core::table::{Entry, Scope, SymbolTable};
use splc_core::types::Type;

use register::{FRAME_POINTER, RETURN_ADDRESS, STACK_POINTER, ZERO};

type Result<T> = std::result::Result<T, CodegenError>;

/// Runtime symbols imported by every generated module.
const RUNTIME_IMPORTS: [&str; 11] = [
    "printi",
    "printc",
    "readi",
    "readc",
    "exit",
    "time",
    "clearAll",
    "setPixel",
    "drawLine",
    "drawCircle",
    "_indexError",
];

/// Generate assembly text for `program` into `out`.
pub fn generate<W: Write>(program: &Program, table: &SymbolTable, out: W) -> Result<()> {
    let mut generator = CodeGenerator {
        global: table,
        emitter: AssemblyEmitter::new(out),
        labels: LabelAllocator::new(),
        registers: RegisterStack::new(),
    };
    generator.run(program)
}

/// Generates code for one program; holds the pass-wide label counter and
/// the per-procedure register cursor.
struct CodeGenerator<'a, W: Write> {
    global: &'a SymbolTable,
    emitter: AssemblyEmitter<W>,
    labels: LabelAllocator,
    registers: RegisterStack,
}

impl<'a, W: Write> CodeGenerator<'a, W> {
    fn run(&mut self, program: &Program) -> Result<()> {
        self.emit_prolog()?;
        for declaration in &program.declarations {
            if let GlobalDeclaration::Procedure(decl) = declaration {
                self.gen_procedure(decl)?;
            }
        }
        Ok(())
    }

    /// The fixed module prolog: runtime imports and section directives.
    fn emit_prolog(&mut self) -> Result<()> {
        for name in RUNTIME_IMPORTS {
            self.emitter.emit_import(name)?;
        }
        self.emitter.emit_blank()?;
        self.emitter.emit_code_section()?;
        self.emitter.emit_align(4)?;
        Ok(())
    }

    fn gen_procedure(&mut self, decl: &ProcedureDeclaration) -> Result<()> {
        let global = self.global;
        let entry = global
            .lookup(&decl.name)
            .and_then(Entry::as_procedure)
            .ok_or_else(|| internal("procedure missing from global table"))?;
        let layout = entry
            .stack_layout
            .as_ref()
            .ok_or_else(|| internal("procedure has no stack layout"))?;
        let frame_size = layout.frame_size();
        let local = &entry.local_table;

        self.registers = RegisterStack::new();

        self.emitter.emit_blank()?;
        self.emitter.emit_export(&decl.name)?;
        self.emitter.emit_label(&decl.name)?;

        self.emitter.emit_rri(
            "sub",
            STACK_POINTER,
            STACK_POINTER,
            frame_size,
            Some("allocate frame"),
        )?;
        self.emitter.emit_rri(
            "stw",
            FRAME_POINTER,
            STACK_POINTER,
            layout.old_frame_pointer_offset(),
            Some("save old frame pointer"),
        )?;
        self.emitter.emit_rri(
            "add",
            FRAME_POINTER,
            STACK_POINTER,
            frame_size,
            Some("set new frame pointer"),
        )?;
        if !layout.is_leaf() {
            self.emitter.emit_rri(
                "stw",
                RETURN_ADDRESS,
                FRAME_POINTER,
                layout.old_return_address_offset(),
                Some("save return address"),
            )?;
        }

        for statement in &decl.body {
            self.gen_statement(statement, local)?;
        }

        if !layout.is_leaf() {
            self.emitter.emit_rri(
                "ldw",
                RETURN_ADDRESS,
                FRAME_POINTER,
                layout.old_return_address_offset(),
                Some("restore return address"),
            )?;
        }
        self.emitter.emit_rri(
            "ldw",
            FRAME_POINTER,
            STACK_POINTER,
            layout.old_frame_pointer_offset(),
            Some("restore old frame pointer"),
        )?;
        self.emitter.emit_rri(
            "add",
            STACK_POINTER,
            STACK_POINTER,
            frame_size,
            Some("release frame"),
        )?;
        self.emitter
            .emit_jump_register(RETURN_ADDRESS, Some("return"))?;
        Ok(())
    }

    fn gen_statement(&mut self, statement: &Statement, local: &'a SymbolTable) -> Result<()> {
        match statement {
            Statement::Assign(stmt) => {
                let target = self.gen_variable(&stmt.target, local)?;
                let value = self.gen_expression(&stmt.value, local)?;
                self.emitter
                    .emit_rri("stw", value, target, 0, Some("assignment"))?;
                self.registers.pop();
                self.registers.pop();
                Ok(())
            }
            Statement::Call(stmt) => self.gen_call(stmt, local),
            Statement::If(stmt) => {
                if let Some(else_branch) = &stmt.else_branch {
                    let else_label = self.labels.next();
                    let exit_label = self.labels.next();
                    self.gen_branch(&stmt.condition, else_label, true, local)?;
                    self.gen_statement(&stmt.then_branch, local)?;
                    self.emitter.emit_jump(exit_label)?;
                    self.emitter.emit_label(else_label)?;
                    self.gen_statement(else_branch, local)?;
                    self.emitter.emit_label(exit_label)?;
                } else {
                    let exit_label = self.labels.next();
                    self.gen_branch(&stmt.condition, exit_label, true, local)?;
                    self.gen_statement(&stmt.then_branch, local)?;
                    self.emitter.emit_label(exit_label)?;
                }
                Ok(())
            }
            Statement::While(stmt) => {
                let loop_label = self.labels.next();
                self.emitter.emit_label(loop_label)?;
                let exit_label = self.labels.next();
                self.gen_branch(&stmt.condition, exit_label, true, local)?;
                self.gen_statement(&stmt.body, local)?;
                self.emitter.emit_jump(loop_label)?;
                self.emitter.emit_label(exit_label)?;
                Ok(())
            }
            Statement::DoWhile(stmt) => {
                let loop_label = self.labels.next();
                self.emitter.emit_label(loop_label)?;
                self.gen_statement(&stmt.body, local)?;
                // The loop re-enters while the condition holds, so this is
                // the one construct whose branch is not flipped.
                self.gen_branch(&stmt.condition, loop_label, false, local)
            }
            Statement::Compound(stmt) => {
                for statement in &stmt.statements {
                    self.gen_statement(statement, local)?;
                }
                Ok(())
            }
            Statement::Empty(_) => Ok(()),
        }
    }

    fn gen_call(
        &mut self,
        stmt: &splc_core::ast::CallStatement,
        local: &'a SymbolTable,
    ) -> Result<()> {
        let global = self.global;
        let entry = global
            .lookup(&stmt.procedure)
            .and_then(Entry::as_procedure)
            .ok_or_else(|| internal("call target missing from global table"))?;

        for (i, (argument, parameter)) in stmt
            .arguments
            .iter()
            .zip(&entry.parameter_types)
            .enumerate()
        {
            // Reference parameters receive the variable's address, value
            // parameters the evaluated argument.
            let register = if parameter.is_reference {
                let Expression::Variable(variable) = argument else {
                    return Err(internal("reference argument is not a variable"));
                };
                self.gen_variable(&variable.variable, local)?
            } else {
                self.gen_expression(argument, local)?
            };
            let offset = parameter
                .offset
                .ok_or_else(|| internal("parameter has no offset"))?;
            self.emitter.emit_rri(
                "stw",
                register,
                STACK_POINTER,
                offset,
                Some(&format!("store arg #{i}")),
            )?;
            self.registers.pop();
        }
        self.emitter.emit_call(&stmt.procedure)?;
        Ok(())
    }

    /// Lower a condition to a conditional branch to `target`.
    ///
    /// With `flip`, the branch is taken when the condition is false (used
    /// by `if` and `while` to jump past their body); without, when it is
    /// true (`do-while`).
    fn gen_branch(
        &mut self,
        condition: &Expression,
        target: Label,
        flip: bool,
        local: &'a SymbolTable,
    ) -> Result<()> {
        let Expression::Binary(expr) = condition else {
            return Err(internal("condition does not lower to a conditional branch"));
        };
        let left = self.gen_expression(&expr.left, local)?;
        let right = self.gen_expression(&expr.right, local)?;

        let operator = if flip {
            expr.operator.flipped()
        } else {
            expr.operator
        };
        let mnemonic = match operator {
            BinaryOperator::Eq => "beq",
            BinaryOperator::Ne => "bne",
            BinaryOperator::Lt => "blt",
            BinaryOperator::Le => "ble",
            BinaryOperator::Gt => "bgt",
            BinaryOperator::Ge => "bge",
            _ => return Err(internal("condition does not lower to a conditional branch")),
        };
        self.emitter.emit_branch(mnemonic, left, right, target)?;
        self.registers.pop();
        self.registers.pop();
        Ok(())
    }

    /// Evaluate an expression; its value ends up in the returned register,
    /// the new top of the expression stack.
    fn gen_expression(&mut self, expression: &Expression, local: &'a SymbolTable) -> Result<Register> {
        match expression {
            Expression::IntLiteral(expr) => {
                let register = self.registers.push(expr.span)?;
                self.emitter
                    .emit_rri("add", register, ZERO, expr.value, None)?;
                Ok(register)
            }
            Expression::Variable(expr) => {
                // The variable walk leaves the address; one load turns it
                // into the value, in place.
                let register = self.gen_variable(&expr.variable, local)?;
                self.emitter.emit_rri("ldw", register, register, 0, None)?;
                Ok(register)
            }
            Expression::Binary(expr) => {
                let mnemonic = match expr.operator {
                    BinaryOperator::Add => "add",
                    BinaryOperator::Sub => "sub",
                    BinaryOperator::Mul => "mul",
                    BinaryOperator::Div => "div",
                    _ => return Err(internal("comparison evaluated outside a condition")),
                };
                let left = self.gen_expression(&expr.left, local)?;
                let right = self.gen_expression(&expr.right, local)?;
                self.emitter.emit_rrr(mnemonic, left, left, right, None)?;
                self.registers.pop();
                Ok(left)
            }
        }
    }

    /// Compute a variable's address; it ends up in the returned register.
    fn gen_variable(&mut self, variable: &Variable, local: &'a SymbolTable) -> Result<Register> {
        match variable {
            Variable::Named(var) => {
                let scope = Scope {
                    local,
                    global: self.global,
                };
                let entry = scope
                    .lookup(&var.name)
                    .and_then(Entry::as_variable)
                    .ok_or_else(|| internal("variable missing from scope"))?;
                let offset = entry
                    .offset
                    .ok_or_else(|| internal("variable has no offset"))?;

                let register = self.registers.push(var.span)?;
                self.emitter
                    .emit_rri("add", register, FRAME_POINTER, offset, None)?;
                // A reference entry holds an address; one extra load
                // recovers the caller's storage location.
                if entry.is_reference {
                    self.emitter.emit_rri("ldw", register, register, 0, None)?;
                }
                Ok(register)
            }
            Variable::ArrayAccess(access) => {
                let base = self.gen_variable(&access.array, local)?;
                let index = self.gen_expression(&access.index, local)?;

                let array = match access.array.data_type() {
                    Some(Type::Array(array)) => array.clone(),
                    _ => return Err(internal("array access over a non-array type")),
                };

                // Bounds check: unsigned comparison catches negative
                // indices as well, then the index is scaled and added.
                let bound = self.registers.push(access.span)?;
                self.emitter
                    .emit_rri("add", bound, ZERO, array.size as i32, None)?;
                self.emitter
                    .emit_branch("bgeu", index, bound, "_indexError")?;
                self.registers.pop();
                self.emitter
                    .emit_rri("mul", index, index, array.base.byte_size(), None)?;
                self.emitter.emit_rrr("add", base, base, index, None)?;
                self.registers.pop();
                Ok(base)
            }
        }
    }
}

fn internal(message: &str) -> CodegenError {
    CodegenError::Internal {
        message: message.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::options::CompileOptions;
    use crate::testutil::*;
    use crate::{semant, table, varalloc};
    use splc_core::ast::BinaryOperator;

    /// Run all phases and return the generated assembly.
    fn compile(program: &mut Program) -> String {
        let options = CompileOptions::default();
        let mut table = table::build(program, &options).unwrap();
        semant::check(program, &table).unwrap();
        varalloc::allocate(program, &mut table, &options);

        let mut out = Vec::new();
        generate(program, &table, &mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    /// The body lines of `name`, between its prologue and epilogue.
    fn body_of<'t>(text: &'t str, name: &str) -> Vec<&'t str> {
        let start = text
            .find(&format!("{name}:\n"))
            .expect("procedure label present");
        let lines: Vec<&str> = text[start..].lines().skip(1).collect();
        // Prologue is 3 lines for leaf procedures, 4 for non-leaf.
        let prologue = if lines[3].contains("save return address") {
            4
        } else {
            3
        };
        let epilogue = lines
            .iter()
            .position(|l| l.contains("restore return address") || l.contains("restore old frame pointer"))
            .unwrap();
        lines[prologue..epilogue].to_vec()
    }

    #[test]
    fn module_prolog_imports_runtime() {
        let mut program = program(vec![proc_decl("main", vec![], vec![], vec![])]);
        let text = compile(&mut program);
        let expected = "\t.import\tprinti\n\
                        \t.import\tprintc\n\
                        \t.import\treadi\n\
                        \t.import\treadc\n\
                        \t.import\texit\n\
                        \t.import\ttime\n\
                        \t.import\tclearAll\n\
                        \t.import\tsetPixel\n\
                        \t.import\tdrawLine\n\
                        \t.import\tdrawCircle\n\
                        \t.import\t_indexError\n\
                        \n\
                        \t.code\n\
                        \t.align\t4\n";
        assert!(text.starts_with(expected), "prolog mismatch:\n{text}");
    }

    #[test]
    fn leaf_procedure_frame() {
        let mut program = program(vec![proc_decl(
            "main",
            vec![],
            vec![var_decl("x", named_type("int"))],
            vec![],
        )]);
        let text = compile(&mut program);
        let expected = "\n\
                        \t.export\tmain\n\
                        main:\n\
                        \tsub\t$29,$29,8\t\t; allocate frame\n\
                        \tstw\t$25,$29,0\t\t; save old frame pointer\n\
                        \tadd\t$25,$29,8\t\t; set new frame pointer\n\
                        \tldw\t$25,$29,0\t\t; restore old frame pointer\n\
                        \tadd\t$29,$29,8\t\t; release frame\n\
                        \tjr\t$31\t\t; return\n";
        assert!(text.ends_with(expected), "frame mismatch:\n{text}");
    }

    #[test]
    fn non_leaf_procedure_saves_return_address() {
        let mut program = program(vec![proc_decl(
            "main",
            vec![],
            vec![],
            vec![call("exit", vec![])],
        )]);
        let text = compile(&mut program);
        // Frame: 8 + 0 locals + 0 outgoing; old FP at SP+4, old RA at FP-8.
        let expected = "\n\
                        \t.export\tmain\n\
                        main:\n\
                        \tsub\t$29,$29,8\t\t; allocate frame\n\
                        \tstw\t$25,$29,4\t\t; save old frame pointer\n\
                        \tadd\t$25,$29,8\t\t; set new frame pointer\n\
                        \tstw\t$31,$25,-8\t\t; save return address\n\
                        \tjal\texit\n\
                        \tldw\t$31,$25,-8\t\t; restore return address\n\
                        \tldw\t$25,$29,4\t\t; restore old frame pointer\n\
                        \tadd\t$29,$29,8\t\t; release frame\n\
                        \tjr\t$31\t\t; return\n";
        assert!(text.ends_with(expected), "frame mismatch:\n{text}");
    }

    #[test]
    fn array_store_emits_bounds_check() {
        // var x: array [5] of int; x[2] := 7;
        let mut program = program(vec![proc_decl(
            "main",
            vec![],
            vec![var_decl("x", array_type(named_type("int"), 5))],
            vec![assign(index(named("x"), int(2)), int(7))],
        )]);
        let text = compile(&mut program);
        let body = body_of(&text, "main");
        assert_eq!(
            body,
            vec![
                "\tadd\t$8,$25,-20",
                "\tadd\t$9,$0,2",
                "\tadd\t$10,$0,5",
                "\tbgeu\t$9,$10,_indexError",
                "\tmul\t$9,$9,4",
                "\tadd\t$8,$8,$9",
                "\tadd\t$9,$0,7",
                "\tstw\t$9,$8,0\t\t; assignment",
            ]
        );
    }

    #[test]
    fn if_flips_the_comparison() {
        // if a > b then x := 1 else x := 2: the branch to the else label
        // tests the complement, a <= b.
        let mut program = program(vec![proc_decl(
            "main",
            vec![],
            vec![
                var_decl("a", named_type("int")),
                var_decl("b", named_type("int")),
                var_decl("x", named_type("int")),
            ],
            vec![if_else(
                binary(BinaryOperator::Gt, var_expr("a"), var_expr("b")),
                assign(named("x"), int(1)),
                assign(named("x"), int(2)),
            )],
        )]);
        let text = compile(&mut program);
        let body = body_of(&text, "main");
        assert_eq!(
            body,
            vec![
                "\tadd\t$8,$25,-4",
                "\tldw\t$8,$8,0",
                "\tadd\t$9,$25,-8",
                "\tldw\t$9,$9,0",
                "\tble\t$8,$9,L0",
                "\tadd\t$8,$25,-12",
                "\tadd\t$9,$0,1",
                "\tstw\t$9,$8,0\t\t; assignment",
                "\tj\tL1",
                "L0:",
                "\tadd\t$8,$25,-12",
                "\tadd\t$9,$0,2",
                "\tstw\t$9,$8,0\t\t; assignment",
                "L1:",
            ]
        );
    }

    #[test]
    fn if_without_else_branches_past_the_body() {
        let mut program = program(vec![proc_decl(
            "main",
            vec![],
            vec![var_decl("x", named_type("int"))],
            vec![if_stmt(
                binary(BinaryOperator::Eq, var_expr("x"), int(0)),
                assign(named("x"), int(1)),
            )],
        )]);
        let text = compile(&mut program);
        let body = body_of(&text, "main");
        // eq flips to ne; one label past the single block.
        assert_eq!(
            body,
            vec![
                "\tadd\t$8,$25,-4",
                "\tldw\t$8,$8,0",
                "\tadd\t$9,$0,0",
                "\tbne\t$8,$9,L0",
                "\tadd\t$8,$25,-4",
                "\tadd\t$9,$0,1",
                "\tstw\t$9,$8,0\t\t; assignment",
                "L0:",
            ]
        );
    }

    #[test]
    fn while_loops_jump_back_and_exit_flipped() {
        let mut program = program(vec![proc_decl(
            "main",
            vec![],
            vec![var_decl("x", named_type("int"))],
            vec![while_stmt(
                binary(BinaryOperator::Lt, var_expr("x"), int(10)),
                assign(
                    named("x"),
                    binary(BinaryOperator::Add, var_expr("x"), int(1)),
                ),
            )],
        )]);
        let text = compile(&mut program);
        let body = body_of(&text, "main");
        assert_eq!(
            body,
            vec![
                "L0:",
                "\tadd\t$8,$25,-4",
                "\tldw\t$8,$8,0",
                "\tadd\t$9,$0,10",
                "\tbge\t$8,$9,L1",
                "\tadd\t$8,$25,-4",
                "\tadd\t$9,$25,-4",
                "\tldw\t$9,$9,0",
                "\tadd\t$10,$0,1",
                "\tadd\t$9,$9,$10",
                "\tstw\t$9,$8,0\t\t; assignment",
                "\tj\tL0",
                "L1:",
            ]
        );
    }

    #[test]
    fn do_while_branches_back_unflipped() {
        let mut program = program(vec![proc_decl(
            "main",
            vec![],
            vec![var_decl("x", named_type("int"))],
            vec![do_while(
                assign(
                    named("x"),
                    binary(BinaryOperator::Sub, var_expr("x"), int(1)),
                ),
                binary(BinaryOperator::Gt, var_expr("x"), int(0)),
            )],
        )]);
        let text = compile(&mut program);
        let body = body_of(&text, "main");
        // The condition keeps its sense: bgt back to the loop head.
        assert_eq!(*body.first().unwrap(), "L0:");
        assert_eq!(*body.last().unwrap(), "\tbgt\t$8,$9,L0");
    }

    #[test]
    fn call_stores_arguments_at_parameter_offsets() {
        let mut program = program(vec![proc_decl(
            "main",
            vec![],
            vec![],
            vec![call("setPixel", vec![int(1), int(2), int(3)])],
        )]);
        let text = compile(&mut program);
        let body = body_of(&text, "main");
        assert_eq!(
            body,
            vec![
                "\tadd\t$8,$0,1",
                "\tstw\t$8,$29,0\t\t; store arg #0",
                "\tadd\t$8,$0,2",
                "\tstw\t$8,$29,4\t\t; store arg #1",
                "\tadd\t$8,$0,3",
                "\tstw\t$8,$29,8\t\t; store arg #2",
                "\tjal\tsetPixel",
            ]
        );
    }

    #[test]
    fn reference_argument_passes_the_address() {
        let mut program = program(vec![proc_decl(
            "main",
            vec![],
            vec![var_decl("x", named_type("int"))],
            vec![call("readi", vec![var_expr("x")])],
        )]);
        let text = compile(&mut program);
        let body = body_of(&text, "main");
        // Address only: no load after computing FP-relative address.
        assert_eq!(
            body,
            vec![
                "\tadd\t$8,$25,-4",
                "\tstw\t$8,$29,0\t\t; store arg #0",
                "\tjal\treadi",
            ]
        );
    }

    #[test]
    fn reference_parameter_reads_add_an_indirection() {
        // proc p(ref a: int) { a := a + 1; }
        let mut program = program(vec![
            proc_decl(
                "p",
                vec![param("a", named_type("int"), true)],
                vec![],
                vec![assign(
                    named("a"),
                    binary(BinaryOperator::Add, var_expr("a"), int(1)),
                )],
            ),
            proc_decl("main", vec![], vec![], vec![]),
        ]);
        let text = compile(&mut program);
        let body = body_of(&text, "p");
        assert_eq!(
            body,
            vec![
                "\tadd\t$8,$25,0",
                "\tldw\t$8,$8,0",
                "\tadd\t$9,$25,0",
                "\tldw\t$9,$9,0",
                "\tldw\t$9,$9,0",
                "\tadd\t$10,$0,1",
                "\tadd\t$9,$9,$10",
                "\tstw\t$9,$8,0\t\t; assignment",
            ]
        );
    }

    #[test]
    fn label_numbers_span_the_whole_pass() {
        // Two procedures share one label counter.
        let mut program = program(vec![
            proc_decl(
                "p",
                vec![],
                vec![var_decl("x", named_type("int"))],
                vec![if_stmt(
                    binary(BinaryOperator::Eq, var_expr("x"), int(0)),
                    empty(),
                )],
            ),
            proc_decl(
                "main",
                vec![],
                vec![var_decl("y", named_type("int"))],
                vec![if_stmt(
                    binary(BinaryOperator::Eq, var_expr("y"), int(0)),
                    empty(),
                )],
            ),
        ]);
        let text = compile(&mut program);
        assert!(text.contains("L0:"));
        assert!(text.contains("L1:"));
        assert!(!text.contains("L2:"));
    }

    #[test]
    fn deeply_nested_expression_overflows_the_bank() {
        // Right-leaning addition chain: each pending operand holds a
        // register, so 17 pending values exceed $8..$23.
        let mut expr = int(0);
        for i in 0..17 {
            expr = binary(BinaryOperator::Add, int(i), expr);
        }
        let mut program = program(vec![proc_decl(
            "main",
            vec![],
            vec![var_decl("x", named_type("int"))],
            vec![assign(named("x"), expr)],
        )]);

        let options = CompileOptions::default();
        let mut table = table::build(&mut program, &options).unwrap();
        semant::check(&mut program, &table).unwrap();
        varalloc::allocate(&mut program, &mut table, &options);

        let mut out = Vec::new();
        let err = generate(&program, &table, &mut out).unwrap_err();
        assert!(matches!(err, CodegenError::RegisterOverflow { .. }));
    }
}
