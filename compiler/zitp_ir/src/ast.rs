//! Syntax tree produced by the parser and walked by the evaluator.
//!
//! The tree is immutable once built. Function definitions are stored once,
//! in [`Program::functions`], and every other reference to them (the
//! definition statement, runtime function values) goes through [`FunctionId`].

use std::fmt;

use crate::{Name, Span};

/// Index into [`Program::functions`].
#[derive(Copy, Clone, Eq, PartialEq, Hash)]
#[repr(transparent)]
pub struct FunctionId(u32);

impl FunctionId {
    #[inline]
    pub const fn new(index: u32) -> Self {
        FunctionId(index)
    }

    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    #[inline]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl fmt::Debug for FunctionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "FunctionId({})", self.0)
    }
}

/// A parsed program: the root block plus every function defined anywhere in it.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Program {
    pub functions: Vec<FunctionDef>,
    pub body: Block,
}

impl Program {
    /// Get a function definition by id.
    ///
    /// # Panics
    /// Panics if the id was not allocated by this program's parser.
    #[inline]
    pub fn function(&self, id: FunctionId) -> &FunctionDef {
        &self.functions[id.index()]
    }

    /// Store a function definition and hand out its id.
    pub fn push_function(&mut self, def: FunctionDef) -> FunctionId {
        let index = u32::try_from(self.functions.len()).unwrap_or(u32::MAX);
        self.functions.push(def);
        FunctionId::new(index)
    }
}

/// A `fun name(params) { body }` definition.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FunctionDef {
    pub name: Name,
    pub params: Vec<Name>,
    pub body: Block,
    pub span: Span,
}

/// A braced statement sequence.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Block {
    pub stmts: Vec<Stmt>,
    pub span: Span,
}

impl Block {
    pub fn new(stmts: Vec<Stmt>, span: Span) -> Self {
        Block { stmts, span }
    }

    /// An empty block, used for an omitted `else`.
    pub fn empty(span: Span) -> Self {
        Block {
            stmts: Vec::new(),
            span,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Stmt {
    pub kind: StmtKind,
    pub span: Span,
}

impl Stmt {
    pub fn new(kind: StmtKind, span: Span) -> Self {
        Stmt { kind, span }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum StmtKind {
    /// `var a, b;`
    Declaration(Vec<Name>),
    /// `a = expr;`
    Assign { target: Name, value: Expr },
    /// `read a;`
    Read(Name),
    /// `print expr;`
    Print(Expr),
    /// `call f(args);` - result discarded.
    Call(CallExpr),
    /// `if cond { .. } else { .. }`; an omitted else is an empty block.
    If {
        cond: Expr,
        then_branch: Block,
        else_branch: Block,
    },
    /// `while cond { .. }`
    While { cond: Expr, body: Block },
    /// `return expr;`
    Return(Expr),
    /// A function definition appearing as a statement.
    Function(FunctionId),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Expr {
    pub kind: ExprKind,
    pub span: Span,
}

impl Expr {
    pub fn new(kind: ExprKind, span: Span) -> Self {
        Expr { kind, span }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ExprKind {
    Number(i32),
    Bool(bool),
    Var(Name),
    Binary {
        op: BinaryOp,
        left: Box<Expr>,
        right: Box<Expr>,
    },
    /// Boolean negation (`not e`).
    Not(Box<Expr>),
    /// Function application used as a value.
    Apply(CallExpr),
}

/// Callee name plus argument expressions, shared by `Call` and `Apply`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CallExpr {
    pub callee: Name,
    pub args: Vec<Expr>,
    pub span: Span,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum BinaryOp {
    Add,
    Sub,
    Mul,
    Div,
    Mod,
    Lt,
    Gt,
    Eq,
    And,
    Or,
}

impl BinaryOp {
    /// Get the operator's source spelling.
    pub fn as_symbol(self) -> &'static str {
        match self {
            BinaryOp::Add => "+",
            BinaryOp::Sub => "-",
            BinaryOp::Mul => "*",
            BinaryOp::Div => "/",
            BinaryOp::Mod => "%",
            BinaryOp::Lt => "<",
            BinaryOp::Gt => ">",
            BinaryOp::Eq => "==",
            BinaryOp::And => "and",
            BinaryOp::Or => "or",
        }
    }

    /// `and` / `or`: the right operand may be skipped.
    #[inline]
    pub fn is_short_circuit(self) -> bool {
        matches!(self, BinaryOp::And | BinaryOp::Or)
    }

    /// `<`, `>`, `==`: integer operands, boolean result.
    #[inline]
    pub fn is_comparison(self) -> bool {
        matches!(self, BinaryOp::Lt | BinaryOp::Gt | BinaryOp::Eq)
    }
}

impl fmt::Display for BinaryOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_symbol())
    }
}
