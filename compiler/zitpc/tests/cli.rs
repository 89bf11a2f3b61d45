//! End-to-end runs against real files.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use std::fs;
use std::path::Path;

use pretty_assertions::assert_eq;
use tempfile::TempDir;
use zitp_eval::EvalErrorKind;
use zitpc::{run_program, RunConfig, RunError};

fn config_in(dir: &Path, program: &str, input: Option<&str>) -> RunConfig {
    let config = RunConfig {
        program: dir.join("program.txt"),
        input: dir.join("input.txt"),
        output: dir.join("output.txt"),
        dump_ast: false,
    };
    fs::write(&config.program, program).unwrap();
    if let Some(input) = input {
        fs::write(&config.input, input).unwrap();
    }
    config
}

#[test]
fn test_program_reads_input_and_writes_output() {
    let dir = TempDir::new().unwrap();
    let config = config_in(
        dir.path(),
        "var n, i, s;
         read n;
         while i < n { var x; read x; s = s + x; i = i + 1; }
         print s;
         print n;",
        Some("3\n10 20\n30\n"),
    );

    let summary = run_program(&config).unwrap();
    assert_eq!(fs::read_to_string(&config.output).unwrap(), "60 3\n");
    assert_eq!(summary.leaked_scopes, 0);
}

#[test]
fn test_program_without_read_needs_no_input_file() {
    let dir = TempDir::new().unwrap();
    let config = config_in(dir.path(), "print 42;", None);

    run_program(&config).unwrap();
    assert_eq!(fs::read_to_string(&config.output).unwrap(), "42\n");
}

#[test]
fn test_missing_input_file_fails() {
    let dir = TempDir::new().unwrap();
    let config = config_in(dir.path(), "var a; read a; print a;", None);

    let err = run_program(&config).unwrap_err();
    assert!(matches!(
        err,
        RunError::Eval {
            error: zitp_eval::EvalError {
                kind: EvalErrorKind::IoFailure { .. },
                ..
            },
            ..
        }
    ));
}

#[test]
fn test_aborted_run_before_print_leaves_no_output() {
    let dir = TempDir::new().unwrap();
    let config = config_in(dir.path(), "print (10 / 0);", None);

    let err = run_program(&config).unwrap_err();
    assert!(err.render().contains("division by zero"));
    assert!(!config.output.exists());
}

#[test]
fn test_aborted_run_keeps_partial_output() {
    let dir = TempDir::new().unwrap();
    let config = config_in(dir.path(), "print 1; print 2; print z;", None);

    let err = run_program(&config).unwrap_err();
    assert!(err.render().contains("unbound variable `z`"));
    assert_eq!(fs::read_to_string(&config.output).unwrap(), "1 2");
}

#[test]
fn test_parse_error_is_reported_with_location() {
    let dir = TempDir::new().unwrap();
    let config = config_in(dir.path(), "var x\nprint x;", None);

    let err = run_program(&config).unwrap_err();
    assert!(matches!(err, RunError::Parse { .. }));
    let report = err.render();
    assert!(report.contains("expected `;`"));
    assert!(report.contains("at 2:1"));
    assert!(!config.output.exists());
}

#[test]
fn test_missing_program_file() {
    let dir = TempDir::new().unwrap();
    let config = RunConfig {
        program: dir.path().join("absent.txt"),
        ..RunConfig::default()
    };

    let err = run_program(&config).unwrap_err();
    assert!(matches!(err, RunError::ReadProgram { .. }));
    assert!(err.render().starts_with("error: cannot read program"));
}
