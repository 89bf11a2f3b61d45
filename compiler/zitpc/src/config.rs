//! Command-line configuration.

use std::path::PathBuf;

use thiserror::Error;

pub const USAGE: &str = "Usage: zitp [-p <program.txt>] [-i <input.txt>] [-o <output.txt>] [--dump-ast]

Options:
  -p <path>     Program to run (default: program.txt)
  -i <path>     Integers consumed by `read` (default: input.txt)
  -o <path>     Destination of `print` (default: output.txt)
  --dump-ast    Print the parsed program before running it
  -h, --help    Show this message";

/// Paths and switches for one run.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RunConfig {
    pub program: PathBuf,
    pub input: PathBuf,
    pub output: PathBuf,
    pub dump_ast: bool,
}

impl Default for RunConfig {
    fn default() -> Self {
        RunConfig {
            program: PathBuf::from("program.txt"),
            input: PathBuf::from("input.txt"),
            output: PathBuf::from("output.txt"),
            dump_ast: false,
        }
    }
}

/// What the command line asks for.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CliAction {
    Run(RunConfig),
    Help,
}

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum CliError {
    #[error("unknown option `{0}`")]
    UnknownOption(String),
    #[error("option `{0}` needs a path")]
    MissingValue(String),
}

impl RunConfig {
    /// Parse arguments (without the executable name).
    ///
    /// Path options take their value from the next argument or glued on,
    /// so `-p prog.txt` and `-pprog.txt` are the same.
    pub fn from_args<I>(args: I) -> Result<CliAction, CliError>
    where
        I: IntoIterator<Item = String>,
    {
        let mut config = RunConfig::default();
        let mut args = args.into_iter();

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "-h" | "--help" => return Ok(CliAction::Help),
                "--dump-ast" => config.dump_ast = true,
                _ => {
                    let slot = match arg.get(..2) {
                        Some("-p") => &mut config.program,
                        Some("-i") => &mut config.input,
                        Some("-o") => &mut config.output,
                        _ => return Err(CliError::UnknownOption(arg)),
                    };
                    let glued = arg.get(2..).unwrap_or_default();
                    *slot = if glued.is_empty() {
                        let flag = arg.get(..2).unwrap_or_default().to_string();
                        PathBuf::from(args.next().ok_or(CliError::MissingValue(flag))?)
                    } else {
                        PathBuf::from(glued)
                    };
                }
            }
        }
        Ok(CliAction::Run(config))
    }
}

#[cfg(test)]
mod tests;
