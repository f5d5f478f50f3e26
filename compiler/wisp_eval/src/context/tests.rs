#![allow(clippy::unwrap_used, reason = "Tests use unwrap for brevity")]

use super::*;
use crate::print_handler::silent_handler;
use pretty_assertions::assert_eq;
use wisp_value::ErrorCategory;

fn context() -> ExecutionContext {
    ExecutionContext::new(Registry::empty(), silent_handler(), None)
}

#[test]
fn scopes_hide_outer_bindings() {
    let mut env = Environment::new();
    env.define("x", Variable::number(1.0));
    env.push_scope();
    assert!(env.lookup("x").is_none());
    env.define("x", Variable::number(2.0));
    env.pop_scope();
    assert_eq!(env.lookup("x"), Some(&Variable::number(1.0)));
}

#[test]
fn global_scope_is_never_popped() {
    let mut env = Environment::new();
    env.pop_scope();
    env.pop_scope();
    assert_eq!(env.depth(), 1);
}

#[test]
fn scope_refs_outlive_nothing() {
    let mut env = Environment::new();
    env.push_scope();
    env.define("y", Variable::string("kept"));
    let handle = env.current();
    env.push_scope();
    assert_eq!(env.resolve(handle, "y"), Some(&Variable::string("kept")));
    *env.resolve_mut(handle, "y").unwrap() = Variable::string("changed");
    env.pop_scope();
    assert_eq!(env.lookup("y"), Some(&Variable::string("changed")));

    env.pop_scope();
    env.push_scope();
    env.define("y", Variable::null());
    assert_eq!(env.current().depth, handle.depth);
    assert!(env.resolve(handle, "y").is_none());
}

#[test]
fn blocks_nest_and_stay_suppressed() {
    let mut blocks = BlockStack::new();
    assert!(blocks.is_active());
    blocks.push_if(false);
    assert!(!blocks.is_active());
    blocks.push_if(true);
    assert!(!blocks.is_active());
    blocks.flip_else().unwrap();
    assert!(!blocks.is_active());
    blocks.pop_endif().unwrap();
    blocks.flip_else().unwrap();
    assert!(blocks.is_active());
    blocks.pop_endif().unwrap();
    assert!(blocks.is_empty());
    assert_eq!(blocks.pop_endif(), Err(ScriptError::UnbalancedEndif));
    assert_eq!(blocks.flip_else(), Err(ScriptError::UnbalancedElse));
}

#[test]
fn call_stack_limit() {
    let mut stack = CallStack::new(Some(2));
    let frame = |label: &str| CallFrame {
        label: label.to_string(),
        call_line: 0,
    };
    stack.push(frame("main")).unwrap();
    stack.push(frame("f")).unwrap();
    assert_eq!(
        stack.push(frame("g")),
        Err(ScriptError::CallDepthExceeded { limit: 2 })
    );
    assert_eq!(stack.labels().collect::<Vec<_>>(), vec!["main", "f"]);
}

#[test]
fn constants_are_write_once() {
    let mut ctx = context();
    ctx.define_constant("answer", Variable::number(42.0)).unwrap();
    assert!(ctx.define_constant("answer", Variable::number(1.0)).is_err());
    let err = ctx.assign("answer", Variable::number(0.0)).unwrap_err();
    assert_eq!(err.category(), ErrorCategory::Binding);
    assert_eq!(ctx.variable("answer"), Some(&Variable::number(42.0)));
}

#[test]
fn native_failures_become_errors() {
    let mut ctx = context();
    assert!(ctx.take_native_error().is_none());
    ctx.fail("bad operand");
    assert_eq!(
        ctx.take_native_error(),
        Some(ScriptError::custom(ErrorCategory::Type, "bad operand"))
    );
    assert!(ctx.error_msg.is_empty());
    ctx.fail_raw("already formatted");
    assert_eq!(
        ctx.take_native_error(),
        Some(ScriptError::raw("already formatted"))
    );
    assert!(!ctx.raw_error);
}

#[test]
fn storage_is_typed() {
    let mut ctx = context();
    ctx.with_storage("counter", |n: &mut u32| *n += 2);
    let total = ctx.with_storage("counter", |n: &mut u32| {
        *n += 3;
        *n
    });
    assert_eq!(total, 5);
    assert_eq!(ctx.storage::<u32>("counter"), Some(&5));
    assert!(ctx.storage::<String>("counter").is_none());
    ctx.with_storage("counter", |s: &mut String| s.push_str("reset"));
    assert_eq!(ctx.storage::<String>("counter").map(String::as_str), Some("reset"));
    ctx.insert_storage("name", String::from("wisp"));
    ctx.storage_mut::<String>("name").unwrap().push('!');
    assert_eq!(ctx.storage::<String>("name").map(String::as_str), Some("wisp!"));
    assert!(ctx.remove_storage("name").is_some());
}

#[test]
fn frames_save_and_restore() {
    let mut ctx = context();
    ctx.blocks.push_if(false);
    ctx.return_value = Variable::number(7.0);
    ctx.exit = true;
    let saved = ctx.enter_frame();
    assert!(ctx.blocks.is_empty());
    assert!(!ctx.exit);
    ctx.return_value = Variable::number(1.0);
    let returned = ctx.leave_frame(saved);
    assert_eq!(returned, Variable::number(1.0));
    assert_eq!(ctx.return_value, Variable::number(7.0));
    assert!(ctx.exit);
    assert_eq!(ctx.blocks.depth(), 1);
}
