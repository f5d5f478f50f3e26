//! The `List` value type.
//!
//! Literal form `[a, b, c]`: the elements are expressions, evaluated left
//! to right when the literal is recognized. Lists are values like any
//! other, so the builtins return new lists instead of mutating their
//! argument:
//!
//! ```text
//! xs = [1, 2]
//! xs = push($xs, 3, 4)   # [1, 2, 3, 4]
//! xs = pop($xs, 2)       # [1, 2]
//! echoln(len($xs), at($xs, 0))
//! ```

use std::any::Any;

use tracing::trace;

use wisp_eval::{evaluate_arguments, Builtin, ExecutionContext, Extension, Operator, Probe};
use wisp_lexer::Token;
use wisp_value::{
    arity_mismatch, format_number, CustomValue, ErrorCategory, EvalResult, ScriptError, Value,
    Variable,
};

/// Priority of `+` in the default operator table.
const SUM: i32 = 4;

#[derive(Clone, Debug, Default, PartialEq)]
pub struct List {
    pub items: Vec<Variable>,
}

impl List {
    pub const TYPE: &'static str = "List";

    pub fn new(items: Vec<Variable>) -> Self {
        List { items }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    fn into_variable(self) -> Variable {
        Variable::new(Value::custom(self))
    }
}

impl CustomValue for List {
    fn type_name(&self) -> &str {
        Self::TYPE
    }

    fn equals(&self, other: &Value) -> bool {
        other.downcast_ref::<List>() == Some(self)
    }

    fn to_display_string(&self) -> String {
        let items: Vec<String> = self.items.iter().map(Variable::literal).collect();
        format!("[{}]", items.join(", "))
    }

    fn clone_box(&self) -> Box<dyn CustomValue> {
        Box::new(self.clone())
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

pub struct ListExtension;

impl ListExtension {
    pub const NAME: &'static str = "list";
}

pub fn list_extension() -> Box<dyn Extension> {
    Box::new(ListExtension)
}

impl Extension for ListExtension {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn builtins(&self) -> Vec<(String, Builtin)> {
        vec![
            ("push".to_string(), Builtin::variadic(push)),
            ("pop".to_string(), Builtin::variadic(pop)),
            ("len".to_string(), Builtin::fixed(1, len)),
            ("at".to_string(), Builtin::fixed(2, at)),
        ]
    }

    fn operators(&self) -> Vec<(String, Operator)> {
        vec![(
            "+".to_string(),
            Operator::binary(SUM, concat).operands(List::TYPE, List::TYPE),
        )]
    }

    fn probes(&self) -> Vec<Probe> {
        vec![Probe::new("list", list_literal)]
    }
}

fn list_literal(token: &Token, ctx: &mut ExecutionContext) -> Result<Option<Value>, ScriptError> {
    if !token.is_capsule('[') {
        return Ok(None);
    }
    let inner = token.capsule_inner().unwrap_or_default();
    let items = evaluate_arguments(inner, ctx)?;
    trace!(len = items.len(), "list literal");
    Ok(Some(Value::custom(List::new(items))))
}

fn expect_list(arg: &Variable) -> Result<&List, ScriptError> {
    arg.expect_custom::<List>(List::TYPE)
}

/// A non-negative whole number.
fn expect_index(arg: &Variable) -> Result<usize, ScriptError> {
    let n = arg.expect_number()?;
    if n < 0.0 || n.fract() != 0.0 {
        return Err(ScriptError::custom(
            ErrorCategory::Type,
            format!("expected a non-negative whole number, got {}", format_number(n)),
        ));
    }
    #[expect(
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss,
        reason = "checked non-negative and whole above"
    )]
    let index = n as usize;
    Ok(index)
}

/// `push(list, items..)`: `list` with `items` appended.
fn push(args: &[Variable], _: &mut ExecutionContext) -> EvalResult {
    let Some((list, items)) = args.split_first() else {
        return Err(arity_mismatch("push", 1, 0));
    };
    let mut list = expect_list(list)?.clone();
    list.items.extend_from_slice(items);
    Ok(list.into_variable())
}

/// `pop(list, count?)`: `list` without its last `count` items (default 1).
fn pop(args: &[Variable], _: &mut ExecutionContext) -> EvalResult {
    let (list, count) = match args {
        [list] => (list, 1),
        [list, count] => (list, expect_index(count)?),
        _ => return Err(arity_mismatch("pop", 2, args.len())),
    };
    let mut list = expect_list(list)?.clone();
    if list.len() < count {
        return Err(ScriptError::custom(
            ErrorCategory::Type,
            format!("cannot pop {count} items from a list of {}", list.len()),
        ));
    }
    list.items.truncate(list.len() - count);
    Ok(list.into_variable())
}

fn len(args: &[Variable], _: &mut ExecutionContext) -> EvalResult {
    let list = expect_list(&args[0])?;
    #[expect(clippy::cast_precision_loss, reason = "list lengths fit in f64")]
    let len = list.len() as f64;
    Ok(Variable::number(len))
}

/// `at(list, index)`: the item at zero-based `index`.
fn at(args: &[Variable], _: &mut ExecutionContext) -> EvalResult {
    let list = expect_list(&args[0])?;
    let index = expect_index(&args[1])?;
    list.items.get(index).cloned().ok_or_else(|| {
        ScriptError::custom(
            ErrorCategory::Type,
            format!("index {index} out of range for a list of {}", list.len()),
        )
    })
}

fn concat(left: &Variable, right: &Variable, _: &mut ExecutionContext) -> EvalResult {
    let mut joined = expect_list(left)?.clone();
    joined.items.extend_from_slice(&expect_list(right)?.items);
    Ok(joined.into_variable())
}
