#![allow(clippy::unwrap_used, reason = "Tests use unwrap for brevity")]

use super::*;
use pretty_assertions::assert_eq;
use wisp_eval::{buffer_handler, Interpreter, SharedPrintHandler};

fn interpreter() -> (Interpreter, SharedPrintHandler) {
    let output = buffer_handler();
    let mut interp = Interpreter::builder().print_handler(output.clone()).build();
    assert!(interp.bake_factory(reference_extension).is_ok());
    (interp, output)
}

#[test]
fn callee_updates_caller_variable() {
    let (mut interp, output) = interpreter();
    let done = interp.eval(
        r#"
@main[]
    n = 1
    call(bump, ref(n))
    call(bump, ref(n))
    echoln($n)

@bump[r]
    setref($r, deref($r) + 1)
"#,
    );
    assert!(done.is_ok());
    assert_eq!(output.get_output(), "3\n");
}

#[test]
fn dangling_reference_is_an_error() {
    let (mut interp, _) = interpreter();
    let done = interp.eval(
        r#"
@main[]
    r = call(make)
    return(deref($r))

@make[]
    x = 1
    return(ref(x))
"#,
    );
    let err = done.error().unwrap();
    assert_eq!(err.category(), ErrorCategory::Binding);
    assert_eq!(err.line(), Some(4));
}

#[test]
fn reference_needs_an_existing_variable() {
    let (mut interp, _) = interpreter();
    assert_eq!(
        interp.expression("ref(nothing)").into_result().unwrap_err(),
        undefined_variable("nothing")
    );
    assert!(!interp.expression("ref(1)").is_ok());
    assert!(!interp.expression("deref(1)").is_ok());
}

#[test]
fn references_are_never_equal() {
    let (mut interp, output) = interpreter();
    assert!(interp.set_variable("x", 1).is_ok());
    assert_eq!(
        interp.expression("ref(x) is ref(x)").value_or(1),
        Variable::boolean(false)
    );
    assert!(interp.eval("x = 1\necholn(ref(x), \" \", typeof(ref(x)))").is_ok());
    assert_eq!(output.get_output(), "ref($x) Reference\n");
}
