use super::*;
use crate::errors::EvalErrorKind;
use pretty_assertions::assert_eq;
use proptest::prelude::*;

fn int(op: BinaryOp, l: i32, r: i32) -> Option<i32> {
    match evaluate_binary(op, l, r) {
        Ok(Value::Int(n)) => Some(n),
        _ => None,
    }
}

#[test]
fn test_truncating_division() {
    assert_eq!(int(BinaryOp::Div, 7, 2), Some(3));
    assert_eq!(int(BinaryOp::Div, -7, 2), Some(-3));
    assert_eq!(int(BinaryOp::Mod, -7, 2), Some(-1));
    assert_eq!(int(BinaryOp::Mod, 7, -2), Some(1));
}

#[test]
fn test_division_by_zero() {
    for op in [BinaryOp::Div, BinaryOp::Mod] {
        let kind = evaluate_binary(op, 1, 0).err().map(|e| e.kind);
        assert_eq!(kind, Some(EvalErrorKind::DivisionByZero));
    }
}

#[test]
fn test_overflow_wraps() {
    assert_eq!(int(BinaryOp::Add, i32::MAX, 1), Some(i32::MIN));
    assert_eq!(int(BinaryOp::Div, i32::MIN, -1), Some(i32::MIN));
    assert_eq!(int(BinaryOp::Mod, i32::MIN, -1), Some(0));
}

#[test]
fn test_comparisons_yield_booleans() {
    assert_eq!(evaluate_binary(BinaryOp::Lt, 1, 2), Ok(Value::Bool(true)));
    assert_eq!(evaluate_binary(BinaryOp::Gt, 1, 2), Ok(Value::Bool(false)));
    assert_eq!(evaluate_binary(BinaryOp::Eq, 2, 2), Ok(Value::Bool(true)));
}

#[test]
fn test_boolean_operator_on_integers_is_mismatch() {
    let kind = evaluate_binary(BinaryOp::And, 1, 1).err().map(|e| e.kind);
    assert_eq!(
        kind,
        Some(EvalErrorKind::TypeMismatch {
            expected: "boolean",
            got: "integer",
            context: "boolean operator",
        })
    );
}

proptest! {
    #[test]
    fn prop_add_sub_mul_wrap(l in any::<i32>(), r in any::<i32>()) {
        prop_assert_eq!(int(BinaryOp::Add, l, r), Some(l.wrapping_add(r)));
        prop_assert_eq!(int(BinaryOp::Sub, l, r), Some(l.wrapping_sub(r)));
        prop_assert_eq!(int(BinaryOp::Mul, l, r), Some(l.wrapping_mul(r)));
    }

    #[test]
    fn prop_div_rem_identity(l in any::<i32>(), r in any::<i32>().prop_filter("non-zero", |r| *r != 0)) {
        let q = int(BinaryOp::Div, l, r);
        let m = int(BinaryOp::Mod, l, r);
        prop_assert_eq!(q, Some(l.wrapping_div(r)));
        prop_assert_eq!(m, Some(l.wrapping_rem(r)));
        if let (Some(q), Some(m)) = (q, m) {
            prop_assert_eq!(q.wrapping_mul(r).wrapping_add(m), l);
            prop_assert!(m == 0 || (m < 0) == (l < 0));
        }
    }
}
