use super::*;
use pretty_assertions::assert_eq;

fn dump(source: &str) -> String {
    let interner = StringInterner::new();
    let program = zitp_parse::parse(source, &interner)
        .unwrap_or_else(|e| panic!("parse error in test program: {e}"));
    dump_program(&program, &interner)
}

#[test]
fn test_dump_spells_out_names() {
    let out = dump(
        "var x;
         fun add(a, b) { return a + b; }
         x = add(1, 2);
         print x;",
    );
    assert_eq!(
        out,
        "\
Program
  Declaration x
  Function add(a, b)
    Return
      Binary +
        Var a
        Var b
  Assign x
    Apply add
      Number 1
      Number 2
  Print
    Var x
"
    );
}

#[test]
fn test_dump_omits_empty_else() {
    let out = dump("if not x < 1 { print 1; }");
    assert_eq!(
        out,
        "\
Program
  If
    Not
      Binary <
        Var x
        Number 1
    Then
      Print
        Number 1
"
    );
}

#[test]
fn test_dump_loop_and_call_statement() {
    let out = dump("while true { call f(y); read y; }");
    assert_eq!(
        out,
        "\
Program
  While
    Bool true
    Do
      Call f
        Var y
      Read y
"
    );
}
