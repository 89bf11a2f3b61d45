//! Whole-program tests: source text in, printed output and scope counters out.

mod program_tests;

use crate::{EvalResult, InputHandler, InterpreterBuilder, OutputHandler, RunSummary, SharedBuffer};
use zitp_ir::StringInterner;

pub(crate) struct Outcome {
    pub output: String,
    pub result: EvalResult<RunSummary>,
}

pub(crate) fn run_with_input(source: &str, input: &[i32]) -> Outcome {
    let interner = StringInterner::new();
    let program = zitp_parse::parse(source, &interner)
        .unwrap_or_else(|e| panic!("parse error in test program: {e}"));
    let buffer = SharedBuffer::new();
    let result = InterpreterBuilder::new(&program, &interner)
        .input(InputHandler::buffer(input.iter().copied()))
        .output(OutputHandler::buffer(buffer.clone()))
        .build()
        .run();
    Outcome {
        output: buffer.contents(),
        result,
    }
}

pub(crate) fn run(source: &str) -> Outcome {
    run_with_input(source, &[])
}

/// Run a program that must succeed; returns its output and summary.
pub(crate) fn run_ok(source: &str) -> (String, RunSummary) {
    let outcome = run(source);
    match outcome.result {
        Ok(summary) => (outcome.output, summary),
        Err(e) => panic!("program failed: {e}"),
    }
}
