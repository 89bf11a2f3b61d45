//! Input and output channels for `read` and `print`.
//!
//! Both channels use enum dispatch: file-backed for real runs, buffer-backed
//! for tests and embedding. File-backed channels open their file on first
//! use, so a program that never reads never touches its input path.

use std::collections::VecDeque;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use parking_lot::Mutex;

use crate::errors::{io_failure, EvalError, EvalResult};

/// Output buffer that outlives the interpreter writing into it.
#[derive(Clone, Debug, Default)]
pub struct SharedBuffer(Arc<Mutex<String>>);

impl SharedBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Copy of everything written so far.
    pub fn contents(&self) -> String {
        self.0.lock().clone()
    }

    fn push_str(&self, s: &str) {
        self.0.lock().push_str(s);
    }
}

/// Integers from a whitespace-separated file, read in full on first use.
pub struct FileInput {
    path: PathBuf,
    tokens: Option<VecDeque<String>>,
}

impl FileInput {
    fn next_token(&mut self) -> EvalResult<Option<String>> {
        if self.tokens.is_none() {
            let text = std::fs::read_to_string(&self.path).map_err(|e| {
                io_failure(format!("cannot open input {}: {e}", self.path.display()))
            })?;
            self.tokens = Some(text.split_whitespace().map(str::to_owned).collect());
        }
        Ok(self.tokens.as_mut().and_then(VecDeque::pop_front))
    }
}

/// Source of integers for `read`.
pub enum InputHandler {
    File(FileInput),
    Buffer(VecDeque<i32>),
}

impl InputHandler {
    pub fn file(path: impl Into<PathBuf>) -> Self {
        InputHandler::File(FileInput {
            path: path.into(),
            tokens: None,
        })
    }

    pub fn buffer(values: impl IntoIterator<Item = i32>) -> Self {
        InputHandler::Buffer(values.into_iter().collect())
    }

    /// Next integer, or `IoFailure` if the input is missing, exhausted or
    /// holds something other than a 32-bit integer.
    pub fn read_integer(&mut self) -> EvalResult<i32> {
        match self {
            InputHandler::File(input) => {
                let token = input.next_token()?.ok_or_else(|| {
                    io_failure(format!("input {} is exhausted", input.path.display()))
                })?;
                token.parse::<i32>().map_err(|_| {
                    io_failure(format!(
                        "input {} holds `{token}`, not an integer",
                        input.path.display()
                    ))
                })
            }
            InputHandler::Buffer(values) => values
                .pop_front()
                .ok_or_else(|| io_failure("input buffer is exhausted")),
        }
    }
}

/// Writes to a file created on the first value.
struct FileOutput {
    path: PathBuf,
    writer: Option<BufWriter<File>>,
}

impl FileOutput {
    fn write_str(&mut self, s: &str) -> EvalResult<()> {
        let writer = match self.writer.take() {
            Some(writer) => writer,
            None => {
                let file = File::create(&self.path).map_err(|e| {
                    io_failure(format!("cannot create output {}: {e}", self.path.display()))
                })?;
                BufWriter::new(file)
            }
        };
        self.writer
            .insert(writer)
            .write_all(s.as_bytes())
            .map_err(|e| write_failure(&self.path, &e))
    }

    fn flush(&mut self) -> EvalResult<()> {
        match &mut self.writer {
            Some(writer) => writer.flush().map_err(|e| write_failure(&self.path, &e)),
            None => Ok(()),
        }
    }
}

fn write_failure(path: &Path, e: &std::io::Error) -> EvalError {
    io_failure(format!("cannot write output {}: {e}", path.display()))
}

enum OutputSink {
    File(FileOutput),
    Buffer(SharedBuffer),
}

/// Destination for `print`.
///
/// Values are separated by a single space. [`finish`](Self::finish) ends
/// the line, but only when something was written: a run that prints
/// nothing leaves no output file behind.
pub struct OutputHandler {
    sink: OutputSink,
    written: bool,
}

impl OutputHandler {
    pub fn file(path: impl Into<PathBuf>) -> Self {
        OutputHandler {
            sink: OutputSink::File(FileOutput {
                path: path.into(),
                writer: None,
            }),
            written: false,
        }
    }

    pub fn buffer(buffer: SharedBuffer) -> Self {
        OutputHandler {
            sink: OutputSink::Buffer(buffer),
            written: false,
        }
    }

    fn write_str(&mut self, s: &str) -> EvalResult<()> {
        match &mut self.sink {
            OutputSink::File(out) => out.write_str(s),
            OutputSink::Buffer(buffer) => {
                buffer.push_str(s);
                Ok(())
            }
        }
    }

    pub fn write_integer(&mut self, value: i32) -> EvalResult<()> {
        if self.written {
            self.write_str(" ")?;
        }
        self.write_str(&value.to_string())?;
        self.written = true;
        Ok(())
    }

    /// Push buffered output to its destination.
    pub fn flush(&mut self) -> EvalResult<()> {
        match &mut self.sink {
            OutputSink::File(out) => out.flush(),
            OutputSink::Buffer(_) => Ok(()),
        }
    }

    /// End the run's output: trailing newline if anything was written, then flush.
    pub fn finish(&mut self) -> EvalResult<()> {
        if self.written {
            self.write_str("\n")?;
        }
        self.flush()
    }
}
