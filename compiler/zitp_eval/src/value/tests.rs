use super::*;
use crate::errors::EvalErrorKind;
use pretty_assertions::assert_eq;

fn closure() -> Rc<Closure> {
    Rc::new(Closure::new(FunctionId::new(0), ScopeId::new(0, 0), 1))
}

#[test]
fn test_narrowing_accessors() {
    assert_eq!(Value::Int(7).as_integer("print"), Ok(7));
    assert_eq!(Value::Bool(true).as_boolean("condition"), Ok(true));
}

#[test]
fn test_narrowing_mismatch_names_both_tags() {
    let err = Value::Bool(false).as_integer("print").err().map(|e| e.kind);
    assert_eq!(
        err,
        Some(EvalErrorKind::TypeMismatch {
            expected: "integer",
            got: "boolean",
            context: "print",
        })
    );
    let err = Value::Function(closure()).as_boolean("condition");
    assert!(err.is_err());
}

#[test]
fn test_functions_compare_by_identity() {
    let a = closure();
    let b = closure();
    assert_eq!(Value::Function(Rc::clone(&a)), Value::Function(Rc::clone(&a)));
    assert!(Value::Function(a) != Value::Function(b));
    assert!(Value::Int(1) != Value::Bool(true));
}

#[test]
fn test_use_count_is_shared_between_clones() {
    let c = closure();
    let v1 = Value::Function(Rc::clone(&c));
    let v2 = v1.clone();
    if let Value::Function(inner) = &v1 {
        inner.add_use();
        inner.add_use();
    }
    if let Value::Function(inner) = &v2 {
        assert_eq!(inner.uses(), 2);
        assert_eq!(inner.drop_use(), 1);
    }
    assert_eq!(c.uses(), 1);
}
