//! Statement execution.
//!
//! [`run_label`] binds arguments, runs a label's statements in order and
//! returns the label's return value. A statement is one of:
//!
//! - `name = expr`: assignment into the current scope
//! - `name(args)`: a call whose result is discarded
//! - anything else: an expression whose result is discarded
//!
//! Inside a suppressed `if` block only raw builtins run, since they manage
//! the block state themselves. The first failing statement stops the label;
//! its error carries the label name and the statement's global line.

use std::rc::Rc;

use tracing::instrument;

use wisp_lexer::Token;
use wisp_stack::ensure_sufficient_stack;
use wisp_value::{arity_mismatch, undefined_label, EvalResult, ScriptError, Variable};

use crate::context::{CallFrame, ExecutionContext};
use crate::eval::{call_named, evaluate_tokens, is_call};
use crate::label::{Label, Statement};
use crate::literal::is_identifier;

/// Run label `name` with positional `args`.
#[instrument(level = "debug", skip_all, fields(label = name, depth = ctx.call_stack.depth()))]
pub fn run_label(name: &str, args: Vec<Variable>, ctx: &mut ExecutionContext) -> EvalResult {
    let labels = Rc::clone(&ctx.labels);
    let Some(label) = labels.get(name) else {
        return Err(undefined_label(name));
    };
    if args.len() != label.params.len() {
        return Err(arity_mismatch(name, label.params.len(), args.len()));
    }
    ctx.call_stack.push(CallFrame {
        label: name.to_string(),
        call_line: ctx.line,
    })?;

    let saved = ctx.enter_frame();
    ctx.env.push_scope();
    // Parameters are bound like assignments, so they cannot shadow constants.
    let outcome = label
        .params
        .iter()
        .zip(args)
        .try_for_each(|(param, arg)| ctx.assign(param, arg))
        .and_then(|()| ensure_sufficient_stack(|| execute_body(label, ctx)));

    ctx.env.pop_scope();
    let value = ctx.leave_frame(saved);
    ctx.call_stack.pop();
    outcome.map(|()| value)
}

fn execute_body(label: &Label, ctx: &mut ExecutionContext) -> Result<(), ScriptError> {
    for statement in &label.statements {
        if ctx.exit {
            break;
        }
        ctx.line = statement.line;
        execute_statement(statement, ctx).map_err(|err| err.located(&label.name, statement.line))?;
    }
    Ok(())
}

fn execute_statement(statement: &Statement, ctx: &mut ExecutionContext) -> Result<(), ScriptError> {
    let active = ctx.blocks.is_active();
    match statement.tokens.as_slice() {
        [target, eq, value @ ..] if is_assignment(target, eq) => {
            if active {
                let result = evaluate_tokens(value, ctx)?;
                ctx.assign(&target.text, result)?;
            }
        }
        [callee, args] if is_call(callee, args) => {
            if active || ctx.registry().raw_builtin(&callee.text).is_some() {
                call_named(&callee.text, args.capsule_inner().unwrap_or_default(), ctx)?;
            }
        }
        tokens => {
            if active {
                evaluate_tokens(tokens, ctx)?;
            }
        }
    }
    Ok(())
}

fn is_assignment(target: &Token, eq: &Token) -> bool {
    target.is_bare_word() && is_identifier(&target.text) && eq.is_word("=")
}
