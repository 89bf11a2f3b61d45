//! Runtime values.

use std::cell::Cell;
use std::fmt;
use std::rc::Rc;

use zitp_ir::FunctionId;

use crate::errors::{type_mismatch, EvalResult};
use crate::scope::ScopeId;

/// A runtime value.
///
/// Integers and booleans are plain copies. Functions share one [`Closure`]
/// between every slot that holds them, so the use count seen through any
/// of them is the same.
#[derive(Clone)]
pub enum Value {
    Int(i32),
    Bool(bool),
    Function(Rc<Closure>),
}

impl Value {
    /// Name of the value's tag, for diagnostics.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Int(_) => "integer",
            Value::Bool(_) => "boolean",
            Value::Function(_) => "function",
        }
    }

    pub fn as_integer(&self, context: &'static str) -> EvalResult<i32> {
        match self {
            Value::Int(n) => Ok(*n),
            other => Err(type_mismatch("integer", other.type_name(), context)),
        }
    }

    pub fn as_boolean(&self, context: &'static str) -> EvalResult<bool> {
        match self {
            Value::Bool(b) => Ok(*b),
            other => Err(type_mismatch("boolean", other.type_name(), context)),
        }
    }

    pub fn as_function(&self, context: &'static str) -> EvalResult<&Rc<Closure>> {
        match self {
            Value::Function(closure) => Ok(closure),
            other => Err(type_mismatch("function", other.type_name(), context)),
        }
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Int(n) => write!(f, "Int({n})"),
            Value::Bool(b) => write!(f, "Bool({b})"),
            Value::Function(c) => write!(f, "Function({:?} in {})", c.function, c.scope),
        }
    }
}

impl PartialEq for Value {
    /// Functions compare by identity.
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Int(a), Value::Int(b)) => a == b,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Function(a), Value::Function(b)) => Rc::ptr_eq(a, b),
            _ => false,
        }
    }
}

/// A function value: a definition paired with the scope it was defined in.
pub struct Closure {
    pub function: FunctionId,
    /// Defining scope.
    pub scope: ScopeId,
    /// Number of the defining scope's own bindings the body may see.
    pub visible: usize,
    /// Slots currently holding this closure.
    uses: Cell<u32>,
}

impl Closure {
    pub(crate) fn new(function: FunctionId, scope: ScopeId, visible: usize) -> Self {
        Closure {
            function,
            scope,
            visible,
            uses: Cell::new(0),
        }
    }

    pub fn uses(&self) -> u32 {
        self.uses.get()
    }

    pub(crate) fn add_use(&self) {
        self.uses.set(self.uses.get().saturating_add(1));
    }

    /// Drop one use, returning the remaining count.
    pub(crate) fn drop_use(&self) -> u32 {
        let remaining = self.uses.get().saturating_sub(1);
        self.uses.set(remaining);
        remaining
    }
}

#[cfg(test)]
mod tests;
