use super::{run_ok, run_with_input};
use pretty_assertions::assert_eq;

#[test]
fn test_assign_and_print() {
    let (out, _) = run_ok("var x; x = 2 + 3; print x;");
    assert_eq!(out, "5\n");
}

#[test]
fn test_function_call_result() {
    let (out, summary) = run_ok(
        "fun add(a, b) { return a + b; }
         var y;
         y = add(2, 3);
         print y;",
    );
    assert_eq!(out, "5\n");
    assert_eq!(summary.calls, 1);
}

#[test]
fn test_recursive_factorial() {
    let (out, summary) = run_ok(
        "fun factorial(n) {
             if n < 1 { return 1; } else { return n * factorial(n - 1); }
         }
         print factorial(5);",
    );
    assert_eq!(out, "120\n");
    assert_eq!(summary.calls, 6);
}

#[test]
fn test_while_accumulates() {
    let (out, _) = run_ok(
        "var i, s;
         i = 0; s = 0;
         while i < 5 { s = s + i; i = i + 1; }
         print s;",
    );
    assert_eq!(out, "10\n");
}

#[test]
fn test_read_from_input() {
    let outcome = run_with_input("var a, b; read a; read b; print a * b;", &[4, -5]);
    assert!(outcome.result.is_ok());
    assert_eq!(outcome.output, "-20\n");
}

#[test]
fn test_prints_are_space_separated() {
    let (out, _) = run_ok("print 1; print 2; print -3;");
    assert_eq!(out, "1 2 -3\n");
}

#[test]
fn test_no_prints_no_output() {
    let (out, _) = run_ok("var x; x = 1;");
    assert_eq!(out, "");
}

#[test]
fn test_fall_through_returns_zero() {
    let (out, _) = run_ok("fun f() { var x; x = 9; } print f();");
    assert_eq!(out, "0\n");
}

#[test]
fn test_return_inside_loop_unwinds() {
    let (out, summary) = run_ok(
        "fun first_over(limit) {
             var i;
             while true {
                 if i > limit { return i; }
                 i = i + 1;
             }
         }
         print first_over(3);",
    );
    assert_eq!(out, "4\n");
    assert_eq!(summary.leaked_scopes, 0);
    assert_eq!(summary.scopes.created, summary.scopes.destroyed);
}

#[test]
fn test_else_if_chain() {
    let (out, _) = run_ok(
        "fun sign(n) {
             if n < 0 { return -1; } else if n == 0 { return 0; } else { return 1; }
         }
         print sign(-7); print sign(0); print sign(12);",
    );
    assert_eq!(out, "-1 0 1\n");
}

#[test]
fn test_top_level_return_ends_run() {
    let (out, _) = run_ok("print 1; return 0; print 2;");
    assert_eq!(out, "1\n");
}

#[test]
fn test_call_statement_discards_result() {
    let (out, summary) = run_ok(
        "var n;
         fun bump() { n = n + 1; return n; }
         call bump();
         bump();
         print n;",
    );
    assert_eq!(out, "2\n");
    assert_eq!(summary.calls, 2);
}

#[test]
fn test_arguments_evaluated_in_caller() {
    let (out, _) = run_ok(
        "var a;
         a = 10;
         fun f(a) { return a * 2; }
         print f(a + 1);
         print a;",
    );
    assert_eq!(out, "22 10\n");
}

#[test]
fn test_booleans_and_negation() {
    let (out, _) = run_ok(
        "if not (1 > 2) and (3 == 3 or false) { print 1; } else { print 0; }",
    );
    assert_eq!(out, "1\n");
}

#[test]
fn test_mutual_recursion_through_outer_scope() {
    let (out, _) = run_ok(
        "var is_odd;
         fun is_even(n) { if n == 0 { return 1; } return is_odd(n - 1); }
         fun odd(n) { if n == 0 { return 0; } return is_even(n - 1); }
         is_odd = odd;
         print is_even(10);
         print is_even(7);",
    );
    assert_eq!(out, "1 0\n");
}

#[test]
fn test_fibonacci() {
    let (out, _) = run_ok(
        "fun fib(n) { if n < 2 { return n; } return fib(n - 1) + fib(n - 2); }
         print fib(15);",
    );
    assert_eq!(out, "610\n");
}

#[test]
fn test_arithmetic_wraps() {
    let (out, _) = run_ok("print 2147483647 + 1; print -7 / 2; print -7 % 2;");
    assert_eq!(out, "-2147483648 -3 -1\n");
}
