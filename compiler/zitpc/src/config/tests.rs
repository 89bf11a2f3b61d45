use super::*;
use pretty_assertions::assert_eq;

fn parse(args: &[&str]) -> Result<CliAction, CliError> {
    RunConfig::from_args(args.iter().map(|s| (*s).to_string()))
}

#[test]
fn test_defaults() {
    assert_eq!(parse(&[]), Ok(CliAction::Run(RunConfig::default())));
    let config = RunConfig::default();
    assert_eq!(config.program, PathBuf::from("program.txt"));
    assert_eq!(config.input, PathBuf::from("input.txt"));
    assert_eq!(config.output, PathBuf::from("output.txt"));
}

#[test]
fn test_separate_and_glued_values() {
    let expected = RunConfig {
        program: PathBuf::from("a.zt"),
        input: PathBuf::from("in"),
        output: PathBuf::from("out"),
        dump_ast: true,
    };
    assert_eq!(
        parse(&["-p", "a.zt", "-iin", "-o", "out", "--dump-ast"]),
        Ok(CliAction::Run(expected))
    );
}

#[test]
fn test_help_wins() {
    assert_eq!(parse(&["-p", "x", "-h"]), Ok(CliAction::Help));
    assert_eq!(parse(&["--help"]), Ok(CliAction::Help));
}

#[test]
fn test_unknown_option() {
    assert_eq!(
        parse(&["-x"]),
        Err(CliError::UnknownOption("-x".to_string()))
    );
    assert_eq!(
        parse(&["program.txt"]),
        Err(CliError::UnknownOption("program.txt".to_string()))
    );
}

#[test]
fn test_missing_value() {
    assert_eq!(
        parse(&["-o"]),
        Err(CliError::MissingValue("-o".to_string()))
    );
}
