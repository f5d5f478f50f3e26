//! Expression evaluation.
//!
//! An expression is lexed into a token run and reduced by splitting at
//! operators:
//!
//! - Every registered operator token is a split candidate, except one that
//!   directly follows another operator (it belongs to that operator's right
//!   side, as in `3 * -2`).
//! - A candidate at the start of the run is prefix-unary, one at the end is
//!   postfix-unary, anything else is binary. The token needs an overload of
//!   that fixity: `5 -` is a binary `-` missing its right operand, not a
//!   postfix negation.
//! - The candidate whose overloads for that shape carry the highest priority
//!   is split first; ties go to the leftmost occurrence. Equal-priority
//!   chains therefore group to the right: `10 - 2 - 3` is `10 - (2 - 3)`.
//!
//! Both sides are evaluated (left first) before the overload is picked by
//! their runtime types. A run without candidates must be a single literal,
//! a parenthesised group, or a `name(args)` call.

use tracing::trace;

use wisp_lexer::{is_operator_char, Token};
use wisp_stack::ensure_sufficient_stack;
use wisp_value::{undefined_builtin, unknown_operator, EvalResult, ScriptError, Variable};

use crate::context::ExecutionContext;
use crate::literal::{self, is_identifier};
use crate::registry::{Arity, Fixity, Registry};

#[derive(Clone, Copy, Debug)]
struct Split {
    index: usize,
    fixity: Fixity,
    priority: i32,
}

/// Lex `text` with the expression lexer and evaluate it.
pub fn evaluate(text: &str, ctx: &mut ExecutionContext) -> EvalResult {
    let tokens = ctx.lexers().expression.lex(text)?;
    evaluate_tokens(&tokens, ctx)
}

/// Evaluate an already lexed token run.
pub fn evaluate_tokens(tokens: &[Token], ctx: &mut ExecutionContext) -> EvalResult {
    ensure_sufficient_stack(|| eval_run(tokens, ctx))
}

fn eval_run(tokens: &[Token], ctx: &mut ExecutionContext) -> EvalResult {
    if tokens.is_empty() {
        return Err(ScriptError::EmptyExpression);
    }
    let registry = ctx.registry_rc();
    match find_split(tokens, &registry)? {
        Some(split) => apply(split, tokens, &registry, ctx),
        None => eval_atom(tokens, ctx),
    }
}

fn is_operator(token: &Token, registry: &Registry) -> bool {
    token.is_bare_word() && registry.is_operator(&token.text)
}

fn find_split(tokens: &[Token], registry: &Registry) -> Result<Option<Split>, ScriptError> {
    let last = tokens.len() - 1;
    let mut best: Option<Split> = None;
    for (index, token) in tokens.iter().enumerate() {
        if !is_operator(token, registry) {
            if token.is_bare_word() && token.text.chars().all(is_operator_char) {
                return Err(unknown_operator(token.text.as_str()));
            }
            continue;
        }
        if index > 0 && is_operator(&tokens[index - 1], registry) {
            continue;
        }
        if last == 0 {
            return Err(ScriptError::OperatorArity {
                token: token.text.clone(),
                problem: "is missing its operand",
            });
        }
        let fixity = if index == 0 {
            Fixity::Prefix
        } else if index == last {
            Fixity::Postfix
        } else {
            Fixity::Infix
        };
        let Some(priority) = registry.priority(&token.text, fixity) else {
            return Err(misplaced_operator(token, fixity, registry));
        };
        if best.map_or(true, |b| priority > b.priority) {
            best = Some(Split {
                index,
                fixity,
                priority,
            });
        }
    }
    Ok(best)
}

/// Error for `token` standing where it has no overload.
fn misplaced_operator(token: &Token, fixity: Fixity, registry: &Registry) -> ScriptError {
    let binary = registry.priority(&token.text, Fixity::Infix).is_some();
    let problem = match fixity {
        Fixity::Postfix if binary => "is missing its right operand",
        Fixity::Prefix if binary => "is missing its left operand",
        Fixity::Postfix => "cannot be used as a postfix operator",
        Fixity::Prefix => "cannot be used as a prefix operator",
        Fixity::Infix => "cannot be used as a binary operator",
    };
    ScriptError::OperatorArity {
        token: token.text.clone(),
        problem,
    }
}

fn apply(
    split: Split,
    tokens: &[Token],
    registry: &Registry,
    ctx: &mut ExecutionContext,
) -> EvalResult {
    let token = &tokens[split.index].text;
    let (left, right) = match split.fixity {
        Fixity::Infix => {
            let left = evaluate_tokens(&tokens[..split.index], ctx)?;
            let right = evaluate_tokens(&tokens[split.index + 1..], ctx)?;
            (left, right)
        }
        Fixity::Prefix => (evaluate_tokens(&tokens[1..], ctx)?, Variable::null()),
        Fixity::Postfix => (
            evaluate_tokens(&tokens[..split.index], ctx)?,
            Variable::null(),
        ),
    };
    let Some(operator) = registry.resolve_operator(token, split.fixity, &left, &right) else {
        let operands = match split.fixity.arity() {
            Arity::Unary => left.type_name().to_string(),
            Arity::Binary => format!("{} and {}", left.type_name(), right.type_name()),
        };
        return Err(ScriptError::NoOverload {
            token: token.clone(),
            operands,
        });
    };
    trace!(operator = %token, priority = split.priority, "apply operator");
    let result = (operator.run)(&left, &right, ctx)?;
    native_result(result, ctx)
}

fn eval_atom(tokens: &[Token], ctx: &mut ExecutionContext) -> EvalResult {
    match tokens {
        [group] if group.is_capsule('(') => evaluate(group.capsule_inner().unwrap_or_default(), ctx),
        [token] => match literal::recognize(token, ctx)? {
            Some(value) => Ok(Variable::new(value)),
            None => Err(ScriptError::NotALiteral {
                token: token.to_string(),
            }),
        },
        [callee, args] if is_call(callee, args) => {
            call_named(&callee.text, args.capsule_inner().unwrap_or_default(), ctx)
        }
        _ => Err(ScriptError::Malformed {
            text: tokens
                .iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>()
                .join(" "),
        }),
    }
}

/// True for `name(...)`.
pub(crate) fn is_call(callee: &Token, args: &Token) -> bool {
    callee.is_bare_word() && is_identifier(&callee.text) && args.is_capsule('(')
}

/// Call the raw builtin or builtin `name`.
///
/// A raw builtin gets `args` verbatim; a builtin gets them split on
/// top-level commas and evaluated left to right.
pub fn call_named(name: &str, args: &str, ctx: &mut ExecutionContext) -> EvalResult {
    let registry = ctx.registry_rc();
    if let Some(raw) = registry.raw_builtin(name) {
        let result = (raw.run)(args, ctx)?;
        return native_result(result, ctx);
    }
    let Some(builtin) = registry.builtin(name) else {
        return Err(undefined_builtin(name));
    };
    let args = evaluate_arguments(args, ctx)?;
    let result = builtin.call(name, &args, ctx)?;
    native_result(result, ctx)
}

/// Split `text` on top-level commas and evaluate each piece.
pub fn evaluate_arguments(text: &str, ctx: &mut ExecutionContext) -> Result<Vec<Variable>, ScriptError> {
    let tokens = ctx.lexers().argument_list.lex(text)?;
    if tokens.is_empty() {
        return Ok(Vec::new());
    }
    let mut args = Vec::new();
    for group in tokens.split(|token| token.is_word(",")) {
        let (Some(first), Some(last)) = (group.first(), group.last()) else {
            return Err(ScriptError::EmptyExpression);
        };
        args.push(evaluate(&text[first.span.start..last.span.end], ctx)?);
    }
    Ok(args)
}

/// Turn a failure reported through `ExecutionContext::fail` into an error.
fn native_result(result: Variable, ctx: &mut ExecutionContext) -> EvalResult {
    match ctx.take_native_error() {
        Some(err) => Err(err),
        None => Ok(result),
    }
}
