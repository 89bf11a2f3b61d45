//! Integer operators.
//!
//! Arithmetic wraps on overflow like native two's-complement `i32`;
//! division and remainder truncate toward zero.

use zitp_ir::BinaryOp;

use crate::errors::{division_by_zero, type_mismatch, EvalResult};
use crate::value::Value;

/// Apply a non-short-circuit operator to two integers.
pub fn evaluate_binary(op: BinaryOp, left: i32, right: i32) -> EvalResult<Value> {
    let value = match op {
        BinaryOp::Add => Value::Int(left.wrapping_add(right)),
        BinaryOp::Sub => Value::Int(left.wrapping_sub(right)),
        BinaryOp::Mul => Value::Int(left.wrapping_mul(right)),
        BinaryOp::Div => {
            if right == 0 {
                return Err(division_by_zero());
            }
            Value::Int(left.wrapping_div(right))
        }
        BinaryOp::Mod => {
            if right == 0 {
                return Err(division_by_zero());
            }
            Value::Int(left.wrapping_rem(right))
        }
        BinaryOp::Lt => Value::Bool(left < right),
        BinaryOp::Gt => Value::Bool(left > right),
        BinaryOp::Eq => Value::Bool(left == right),
        BinaryOp::And | BinaryOp::Or => {
            return Err(type_mismatch("boolean", "integer", operator_context(op)));
        }
    };
    Ok(value)
}

/// Diagnostic context naming the kind of operator.
pub(crate) fn operator_context(op: BinaryOp) -> &'static str {
    if op.is_short_circuit() {
        "boolean operator"
    } else if op.is_comparison() {
        "comparison"
    } else {
        "arithmetic"
    }
}

#[cfg(test)]
mod tests;
