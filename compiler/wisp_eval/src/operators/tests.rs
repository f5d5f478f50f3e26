#![allow(clippy::unwrap_used, reason = "Tests use unwrap for brevity")]

use super::*;
use crate::eval::evaluate;
use crate::print_handler::silent_handler;
use crate::registry::Fixity;
use pretty_assertions::assert_eq;

fn eval(text: &str) -> Result<Variable, ScriptError> {
    let mut ctx = ExecutionContext::new(Registry::with_defaults(), silent_handler(), None);
    evaluate(text, &mut ctx)
}

#[test]
fn default_table_priorities() {
    let registry = Registry::with_defaults();
    let expected = [
        ("-", Fixity::Prefix, UNARY),
        ("not", Fixity::Prefix, UNARY),
        ("*", Fixity::Infix, PRODUCT),
        ("%", Fixity::Infix, PRODUCT),
        ("+", Fixity::Infix, SUM),
        ("-", Fixity::Infix, SUM),
        ("<=", Fixity::Infix, COMPARISON),
        ("isnt", Fixity::Infix, EQUALITY),
        ("&&", Fixity::Infix, AND),
        ("or", Fixity::Infix, OR),
    ];
    for (token, arity, priority) in expected {
        assert_eq!(registry.priority(token, arity), Some(priority), "{token}");
    }
}

#[test]
fn modulo_and_division() {
    assert_eq!(eval("9 / 2").unwrap(), Variable::number(4.5));
    assert_eq!(eval("9 % 2").unwrap(), Variable::number(1.0));
    assert_eq!(eval("1 % 0"), Err(ScriptError::DivisionByZero));
}

#[test]
fn string_ordering_is_lexicographic() {
    assert_eq!(eval(r#""b" > "abc""#).unwrap(), Variable::boolean(true));
    assert_eq!(eval(r#""a" <= "a""#).unwrap(), Variable::boolean(true));
    assert!(eval(r#""a" < 1"#).is_err());
}

#[test]
fn equality_accepts_any_types() {
    assert_eq!(eval("abc is abc").unwrap(), Variable::boolean(true));
    assert_eq!(eval(r#"abc is "abc""#).unwrap(), Variable::boolean(false));
    assert_eq!(eval("null == null").unwrap(), Variable::boolean(true));
    assert_eq!(eval("1 != 2").unwrap(), Variable::boolean(true));
}

#[test]
fn negation_needs_a_number() {
    assert_eq!(eval("- 4").unwrap(), Variable::number(-4.0));
    assert!(matches!(
        eval(r#"-"a""#),
        Err(ScriptError::NoOverload { .. })
    ));
}
