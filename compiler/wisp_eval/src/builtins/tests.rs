#![allow(clippy::unwrap_used, reason = "Tests use unwrap for brevity")]

use super::*;
use crate::preprocess::preprocess;
use crate::print_handler::buffer_handler;
use pretty_assertions::assert_eq;
use std::rc::Rc;

fn context() -> ExecutionContext {
    ExecutionContext::new(Registry::with_defaults(), buffer_handler(), None)
}

fn load(ctx: &mut ExecutionContext, source: &str) {
    let labels = preprocess(source, ctx).unwrap();
    ctx.labels = Rc::new(labels);
}

#[test]
fn echo_concatenates_display_forms() {
    let mut ctx = context();
    evaluate(r#"echo("a", 1, null)"#, &mut ctx).unwrap();
    evaluate(r#"echoln(" ", 2.5)"#, &mut ctx).unwrap();
    assert_eq!(ctx.print_handler().get_output(), "a1null 2.5\n");
    assert_eq!(ctx.print_handler().events().len(), 2);
}

#[test]
fn conversions() {
    let mut ctx = context();
    assert_eq!(evaluate("typeof(null)", &mut ctx).unwrap(), Variable::string("Null"));
    assert_eq!(evaluate("typeof(abc)", &mut ctx).unwrap(), Variable::string("Name"));
    assert_eq!(evaluate(r#"to_number(" 42 ")"#, &mut ctx).unwrap(), Variable::number(42.0));
    assert!(evaluate(r#"to_number("forty")"#, &mut ctx).is_err());
    assert!(evaluate("to_number(null)", &mut ctx).is_err());
}

#[test]
fn return_sets_exit_and_value() {
    let mut ctx = context();
    assert_eq!(evaluate("return(5)", &mut ctx).unwrap(), Variable::number(5.0));
    assert!(ctx.exit);
    assert_eq!(ctx.return_value, Variable::number(5.0));

    ctx.exit = false;
    evaluate("return()", &mut ctx).unwrap();
    assert!(ctx.return_value.is_null());
    assert!(evaluate("return(1, 2)", &mut ctx).is_err());
}

#[test]
fn call_runs_labels_by_name() {
    let mut ctx = context();
    load(&mut ctx, "@twice[x]\n  return($x * 2)\n");
    assert_eq!(evaluate("call(twice, 21)", &mut ctx).unwrap(), Variable::number(42.0));
    assert_eq!(evaluate(r#"call("twice", 1)"#, &mut ctx).unwrap(), Variable::number(2.0));
    assert!(!ctx.exit);
    assert!(evaluate("call(twice)", &mut ctx).is_err());
    assert!(evaluate("call(missing)", &mut ctx).is_err());
    assert!(evaluate("call(1)", &mut ctx).is_err());
}

#[test]
fn exit_returns_null() {
    let mut ctx = context();
    load(&mut ctx, "@f[]\n  exit()\n  return(1)\n");
    assert!(evaluate("call(f)", &mut ctx).unwrap().is_null());
}

#[test]
fn if_else_endif() {
    let mut ctx = context();
    load(
        &mut ctx,
        r#"@pick[n]
    if($n > 0)
        echo("positive")
    else()
        echo("not positive")
    endif()
    echoln()
"#,
    );
    evaluate("call(pick, 1)", &mut ctx).unwrap();
    evaluate("call(pick, 0)", &mut ctx).unwrap();
    assert_eq!(ctx.print_handler().get_output(), "positive\nnot positive\n");
}

#[test]
fn condition_is_not_evaluated_when_suppressed() {
    let mut ctx = context();
    load(
        &mut ctx,
        "@f[]\n  if(0)\n    if($undefined)\n      echo(1)\n    endif()\n  endif()\n  return(7)\n",
    );
    assert_eq!(evaluate("call(f)", &mut ctx).unwrap(), Variable::number(7.0));
}

#[test]
fn endif_without_if() {
    let mut ctx = context();
    assert_eq!(evaluate("endif()", &mut ctx), Err(ScriptError::UnbalancedEndif));
    assert_eq!(evaluate("else()", &mut ctx), Err(ScriptError::UnbalancedElse));
    ctx.ignore_endifs = 1;
    assert!(evaluate("endif()", &mut ctx).is_ok());
    assert_eq!(ctx.ignore_endifs, 0);
}

#[test]
fn endif_closes_open_block_before_ignored_ones() {
    let mut ctx = context();
    ctx.registry_mut().add_raw_builtin(
        "skip",
        RawBuiltin::new(|_, ctx| {
            ctx.ignore_endifs += 1;
            Ok(Variable::null())
        }),
    );
    load(
        &mut ctx,
        "@f[]\n  if(0)\n    skip()\n  endif()\n  echoln(\"after\")\n",
    );
    evaluate("call(f)", &mut ctx).unwrap();
    assert_eq!(ctx.print_handler().get_output(), "after\n");
}

#[test]
fn block_builtins_take_no_arguments() {
    let mut ctx = context();
    evaluate("if(1)", &mut ctx).unwrap();
    assert!(evaluate("endif(1)", &mut ctx).is_err());
}
