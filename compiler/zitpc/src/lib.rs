//! Zitpc - driver for the zitp interpreter.
//!
//! Reads a program file, parses it and runs it against file-backed input
//! and output channels. Errors come back as [`RunError`], which renders
//! itself as a diagnostic with a source snippet.

mod config;
mod diagnostic;
mod dump;

pub use config::{CliAction, CliError, RunConfig, USAGE};
pub use dump::dump_program;

use std::path::PathBuf;
use std::sync::Once;

use thiserror::Error;
use tracing::info;
use zitp_eval::{EvalError, InputHandler, InterpreterBuilder, OutputHandler, RunSummary};
use zitp_ir::StringInterner;
use zitp_parse::ParseError;

static TRACING_INIT: Once = Once::new();

/// Install a `tracing` subscriber filtered by `RUST_LOG`.
///
/// Does nothing unless `RUST_LOG` is set; safe to call more than once.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, prelude::*, EnvFilter};

        if std::env::var("RUST_LOG").is_ok() {
            let filter = EnvFilter::from_default_env();
            tracing_subscriber::registry()
                .with(
                    fmt::layer()
                        .with_writer(std::io::stderr)
                        .with_target(true)
                        .with_level(true),
                )
                .with(filter)
                .init();
        }
    });
}

/// Failure of a whole run.
#[derive(Debug, Error)]
pub enum RunError {
    #[error("cannot read program {}: {source}", .path.display())]
    ReadProgram {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("{error}")]
    Parse {
        path: PathBuf,
        text: String,
        error: ParseError,
    },

    #[error("{error}")]
    Eval {
        path: PathBuf,
        text: String,
        error: EvalError,
    },
}

impl RunError {
    /// Human-readable report, with a source snippet when the error has a location.
    pub fn render(&self) -> String {
        match self {
            RunError::ReadProgram { .. } => format!("error: {self}\n"),
            RunError::Parse { path, text, error } => {
                diagnostic::render(path, text, &error.to_string(), Some(error.span))
            }
            RunError::Eval { path, text, error } => {
                diagnostic::render(path, text, &error.to_string(), error.span)
            }
        }
    }
}

/// Parse and run the program named by `config`.
pub fn run_program(config: &RunConfig) -> Result<RunSummary, RunError> {
    let text = std::fs::read_to_string(&config.program).map_err(|source| RunError::ReadProgram {
        path: config.program.clone(),
        source,
    })?;

    let interner = StringInterner::new();
    let program = match zitp_parse::parse(&text, &interner) {
        Ok(program) => program,
        Err(error) => {
            return Err(RunError::Parse {
                path: config.program.clone(),
                text,
                error,
            })
        }
    };

    if config.dump_ast {
        print!("{}", dump_program(&program, &interner));
    }

    let result = InterpreterBuilder::new(&program, &interner)
        .input(InputHandler::file(&config.input))
        .output(OutputHandler::file(&config.output))
        .build()
        .run();

    match result {
        Ok(summary) => {
            info!(
                program = %config.program.display(),
                calls = summary.calls,
                scopes = summary.scopes.created,
                "run complete"
            );
            Ok(summary)
        }
        Err(error) => Err(RunError::Eval {
            path: config.program.clone(),
            text,
            error,
        }),
    }
}
