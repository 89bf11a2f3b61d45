//! `InterpreterBuilder` for wiring a program to its I/O channels.

use zitp_ir::{Program, StringInterner};

use super::Interpreter;
use crate::io::{InputHandler, OutputHandler, SharedBuffer};
use crate::scope::ScopeArena;

/// Builder for creating Interpreter instances.
///
/// Without explicit channels the interpreter reads from an empty buffer and
/// writes into a fresh [`SharedBuffer`].
pub struct InterpreterBuilder<'a> {
    program: &'a Program,
    interner: &'a StringInterner,
    input: Option<InputHandler>,
    output: Option<OutputHandler>,
}

impl<'a> InterpreterBuilder<'a> {
    pub fn new(program: &'a Program, interner: &'a StringInterner) -> Self {
        Self {
            program,
            interner,
            input: None,
            output: None,
        }
    }

    /// Set the channel `read` draws from.
    #[must_use]
    pub fn input(mut self, input: InputHandler) -> Self {
        self.input = Some(input);
        self
    }

    /// Set the channel `print` writes to.
    #[must_use]
    pub fn output(mut self, output: OutputHandler) -> Self {
        self.output = Some(output);
        self
    }

    /// Build the interpreter.
    pub fn build(self) -> Interpreter<'a> {
        Interpreter {
            program: self.program,
            interner: self.interner,
            scopes: ScopeArena::new(),
            input: self
                .input
                .unwrap_or_else(|| InputHandler::buffer(std::iter::empty())),
            output: self
                .output
                .unwrap_or_else(|| OutputHandler::buffer(SharedBuffer::new())),
            calls: 0,
        }
    }
}
