//! x86-64 code generation.
//!
//! Expressions are evaluated with a stack machine: every expression leaves its
//! value in `rax`, and the left operand of an addition waits on the stack while
//! the right one is computed. The statement then hands `rax` to the Linux
//! `exit` syscall.


use std::fmt;

use plusc_ir::tree::{Expr, ExprKind, Stmt};
use plusc_ir::BinOp;
use target_lexicon::{Architecture, OperatingSystem, Triple};

use crate::{BackendError, BackendResult};

const SYS_EXIT: i64 = 60;

/// Assembler dialect of the listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Syntax {
    #[default]
    Intel,
    Att,
}

/// One machine instruction of the stack scheme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Inst {
    /// `rax = value`
    LoadImm(i64),
    /// push `rax`
    PushAcc,
    /// pop into `rcx`
    PopScratch,
    /// `rax += rcx`
    AddScratch,
    /// `rdi = rax`
    MoveAccToExitArg,
    /// `rax = 60`
    LoadExitSyscall,
    Syscall,
}

impl Inst {
    /// The instruction as one line of assembly in `syntax`.
    pub fn display(self, syntax: Syntax) -> DisplayInst {
        DisplayInst { inst: self, syntax }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct DisplayInst {
    inst: Inst,
    syntax: Syntax,
}

impl fmt::Display for DisplayInst {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self.syntax {
            Syntax::Intel => match self.inst {
                Inst::LoadImm(n) => write!(f, "mov rax, {n}"),
                Inst::PushAcc => f.write_str("push rax"),
                Inst::PopScratch => f.write_str("pop rcx"),
                Inst::AddScratch => f.write_str("add rax, rcx"),
                Inst::MoveAccToExitArg => f.write_str("mov rdi, rax"),
                Inst::LoadExitSyscall => write!(f, "mov rax, {SYS_EXIT}"),
                Inst::Syscall => f.write_str("syscall"),
            },

            Syntax::Att => match self.inst {
                Inst::LoadImm(n) => write!(f, "movq ${n}, %rax"),
                Inst::PushAcc => f.write_str("pushq %rax"),
                Inst::PopScratch => f.write_str("popq %rcx"),
                Inst::AddScratch => f.write_str("addq %rcx, %rax"),
                Inst::MoveAccToExitArg => f.write_str("movq %rax, %rdi"),
                Inst::LoadExitSyscall => write!(f, "movq ${SYS_EXIT}, %rax"),
                Inst::Syscall => f.write_str("syscall"),
            },
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct Codegen {
    syntax: Syntax,
}

impl Codegen {
    /// Only x86-64 Linux is supported: the exit syscall number is specific to it.
    pub fn new(target: &Triple, syntax: Syntax) -> BackendResult<Self> {
        if target.architecture != Architecture::X86_64 {
            return Err(BackendError::UnsupportedArch(target.architecture));
        }

        if target.operating_system != OperatingSystem::Linux {
            return Err(BackendError::UnsupportedOs(target.operating_system));
        }

        Ok(Self { syntax })
    }

    pub fn lower_stmt(&self, stmt: &Stmt) -> Vec<Inst> {
        let mut insts = vec![];

        match stmt {
            Stmt::Return(expr) => {
                lower_expr(expr, &mut insts);

                insts.push(Inst::MoveAccToExitArg);
                insts.push(Inst::LoadExitSyscall);
                insts.push(Inst::Syscall);
            }
        }

        insts
    }

    /// The whole listing, with `_start` as its entry point.
    pub fn emit(&self, stmt: &Stmt) -> String {
        let mut writer = AsmWriter {
            syntax: self.syntax,
            output: String::new(),
        };

        writer.directives();
        for inst in self.lower_stmt(stmt) {
            writer.inst(inst);
        }

        writer.output
    }
}

/// Outputs to `rax`.
fn lower_expr(expr: &Expr, insts: &mut Vec<Inst>) {
    match &expr.kind {
        ExprKind::Integer(n) => insts.push(Inst::LoadImm(*n)),

        ExprKind::BinOp { op, lhs, rhs } => {
            lower_expr(lhs, insts);
            insts.push(Inst::PushAcc);
            lower_expr(rhs, insts);
            insts.push(Inst::PopScratch);

            match op {
                BinOp::Add => insts.push(Inst::AddScratch),
            }
        }
    }
}

struct AsmWriter {
    syntax: Syntax,
    output: String,
}

impl AsmWriter {
    fn directives(&mut self) {
        if self.syntax == Syntax::Intel {
            self.push_line(0, ".intel_syntax noprefix");
        }

        self.push_line(0, ".global _start");
        self.push_line(0, "_start:");
    }

    fn inst(&mut self, inst: Inst) {
        self.push_line(1, inst.display(self.syntax).to_string());
    }

    fn push_line(&mut self, indent: u8, s: impl AsRef<str>) {
        const INDENT: &str = "    ";

        for _ in 0..indent {
            self.output.push_str(INDENT);
        }

        self.output.push_str(s.as_ref());
        self.output.push('\n');
    }
}
