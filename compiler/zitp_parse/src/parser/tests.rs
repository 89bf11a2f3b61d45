use super::*;
use pretty_assertions::assert_eq;
use zitp_ir::StringInterner;

fn parse_src(source: &str) -> (Result<Program, ParseError>, StringInterner) {
    let interner = StringInterner::new();
    let result = crate::parse(source, &interner);
    (result, interner)
}

fn parse_ok(source: &str) -> (Program, StringInterner) {
    let (result, interner) = parse_src(source);
    match result {
        Ok(program) => (program, interner),
        Err(e) => panic!("unexpected parse error: {e}"),
    }
}

fn first_expr(program: &Program) -> &Expr {
    match &program.body.stmts[0].kind {
        StmtKind::Print(e) | StmtKind::Return(e) => e,
        StmtKind::Assign { value, .. } => value,
        other => panic!("no expression in {other:?}"),
    }
}

#[test]
fn test_parse_declaration_and_assign() {
    let (program, interner) = parse_ok("var x, y; x = 2 + 3;");
    let x = interner.intern("x");
    let y = interner.intern("y");
    assert_eq!(program.body.stmts.len(), 2);
    assert_eq!(program.body.stmts[0].kind, StmtKind::Declaration(vec![x, y]));
    match &program.body.stmts[1].kind {
        StmtKind::Assign { target, value } => {
            assert_eq!(*target, x);
            assert!(matches!(
                value.kind,
                ExprKind::Binary {
                    op: BinaryOp::Add,
                    ..
                }
            ));
        }
        other => panic!("expected assignment, got {other:?}"),
    }
}

#[test]
fn test_parse_function_goes_to_table() {
    let (program, interner) = parse_ok("fun add(a, b) { return a + b; } print add(2, 3);");
    assert_eq!(program.functions.len(), 1);
    let def = &program.functions[0];
    assert_eq!(def.name, interner.intern("add"));
    assert_eq!(def.params, vec![interner.intern("a"), interner.intern("b")]);
    assert_eq!(def.body.stmts.len(), 1);
    assert!(matches!(program.body.stmts[0].kind, StmtKind::Function(_)));
    match &first_expr_at(&program, 1).kind {
        ExprKind::Apply(call) => assert_eq!(call.args.len(), 2),
        other => panic!("expected apply, got {other:?}"),
    }
}

fn first_expr_at(program: &Program, index: usize) -> &Expr {
    match &program.body.stmts[index].kind {
        StmtKind::Print(e) => e,
        other => panic!("expected print, got {other:?}"),
    }
}

#[test]
fn test_nested_functions_all_registered() {
    let (program, _) = parse_ok("fun outer() { fun inner() { return 1; } return inner(); }");
    assert_eq!(program.functions.len(), 2);
}

#[test]
fn test_precedence_mul_over_add() {
    let (program, _) = parse_ok("print 1 + 2 * 3;");
    match &first_expr(&program).kind {
        ExprKind::Binary { op, right, .. } => {
            assert_eq!(*op, BinaryOp::Add);
            assert!(matches!(
                right.kind,
                ExprKind::Binary {
                    op: BinaryOp::Mul,
                    ..
                }
            ));
        }
        other => panic!("expected binary, got {other:?}"),
    }
}

#[test]
fn test_precedence_or_and_not() {
    let (program, _) = parse_ok("x = not a < b and c == d or e > f;");
    match &first_expr(&program).kind {
        ExprKind::Binary { op, left, .. } => {
            assert_eq!(*op, BinaryOp::Or);
            match &left.kind {
                ExprKind::Binary { op, left, .. } => {
                    assert_eq!(*op, BinaryOp::And);
                    assert!(matches!(left.kind, ExprKind::Not(_)));
                }
                other => panic!("expected and, got {other:?}"),
            }
        }
        other => panic!("expected or, got {other:?}"),
    }
}

#[test]
fn test_subtraction_is_left_associative() {
    let (program, _) = parse_ok("print 10 - 3 - 2;");
    match &first_expr(&program).kind {
        ExprKind::Binary { op, left, right } => {
            assert_eq!(*op, BinaryOp::Sub);
            assert_eq!(right.kind, ExprKind::Number(2));
            assert!(matches!(left.kind, ExprKind::Binary { .. }));
        }
        other => panic!("expected binary, got {other:?}"),
    }
}

#[test]
fn test_negative_literal_folds() {
    let (program, _) = parse_ok("print -2147483648;");
    assert_eq!(first_expr(&program).kind, ExprKind::Number(i32::MIN));
}

#[test]
fn test_negated_variable_is_subtraction() {
    let (program, interner) = parse_ok("print -x;");
    let x = interner.intern("x");
    match &first_expr(&program).kind {
        ExprKind::Binary { op, left, right } => {
            assert_eq!(*op, BinaryOp::Sub);
            assert_eq!(left.kind, ExprKind::Number(0));
            assert_eq!(right.kind, ExprKind::Var(x));
        }
        other => panic!("expected binary, got {other:?}"),
    }
}

#[test]
fn test_literal_out_of_range() {
    let (result, _) = parse_src("print 2147483648;");
    let err = result.err().map(|e| e.message);
    assert_eq!(
        err.as_deref(),
        Some("integer literal 2147483648 does not fit in 32 bits")
    );
}

#[test]
fn test_if_without_else_has_empty_else() {
    let (program, _) = parse_ok("if x < 1 { print 1; }");
    match &program.body.stmts[0].kind {
        StmtKind::If { else_branch, .. } => assert!(else_branch.stmts.is_empty()),
        other => panic!("expected if, got {other:?}"),
    }
}

#[test]
fn test_else_if_nests() {
    let (program, _) = parse_ok("if a { print 1; } else if b { print 2; } else { print 3; }");
    match &program.body.stmts[0].kind {
        StmtKind::If { else_branch, .. } => {
            assert_eq!(else_branch.stmts.len(), 1);
            assert!(matches!(else_branch.stmts[0].kind, StmtKind::If { .. }));
        }
        other => panic!("expected if, got {other:?}"),
    }
}

#[test]
fn test_call_statement_with_and_without_keyword() {
    let (program, _) = parse_ok("call f(1); f(2);");
    assert!(matches!(program.body.stmts[0].kind, StmtKind::Call(_)));
    assert!(matches!(program.body.stmts[1].kind, StmtKind::Call(_)));
}

#[test]
fn test_parenthesized_expression() {
    let (program, _) = parse_ok("print (10 / 0);");
    assert!(matches!(
        first_expr(&program).kind,
        ExprKind::Binary {
            op: BinaryOp::Div,
            ..
        }
    ));
}

#[test]
fn test_missing_semicolon_reports_context() {
    let (result, _) = parse_src("var x");
    let err = result.err();
    assert_eq!(
        err.as_ref().map(|e| e.context),
        Some(ErrorContext::Declaration)
    );
    assert_eq!(
        err.map(|e| e.to_string()).as_deref(),
        Some("expected `;`, found end of file while parsing a variable declaration")
    );
}

#[test]
fn test_unclosed_block() {
    let (result, _) = parse_src("while x { print 1;");
    assert_eq!(result.err().map(|e| e.context), Some(ErrorContext::Block));
}

#[test]
fn test_bare_identifier_statement_is_error() {
    let (result, _) = parse_src("x;");
    let err = result.err();
    assert_eq!(err.as_ref().map(|e| e.context), Some(ErrorContext::Statement));
    assert_eq!(err.map(|e| e.span), Some(Span::new(1, 2)));
}

#[test]
fn test_unrecognized_character() {
    let (result, _) = parse_src("print 1 $ 2;");
    assert_eq!(
        result.err().map(|e| e.message).as_deref(),
        Some("unrecognized input")
    );
}

#[test]
fn test_comparison_does_not_chain() {
    let (result, _) = parse_src("print 1 < 2 < 3;");
    assert!(result.is_err());
}
