//! Default operator table.
//!
//! | Token                       | Shape  | Priority |
//! |-----------------------------|--------|----------|
//! | `-` `not` `!`               | unary  | 1        |
//! | `*` `/` `%`                 | binary | 3        |
//! | `+` `-`                     | binary | 4        |
//! | `<` `>` `<=` `>=`           | binary | 6        |
//! | `==` `is` `!=` `isnt`       | binary | 7        |
//! | `and` `&&`                  | binary | 8        |
//! | `or` `\|\|`                 | binary | 9        |
//!
//! A higher priority splits first, so it binds looser.

use std::cmp::Ordering;

use wisp_value::{EvalResult, ScriptError, Value, Variable};

use crate::context::ExecutionContext;
use crate::registry::{Operator, Registry};

const UNARY: i32 = 1;
const PRODUCT: i32 = 3;
const SUM: i32 = 4;
const COMPARISON: i32 = 6;
const EQUALITY: i32 = 7;
const AND: i32 = 8;
const OR: i32 = 9;

pub(crate) fn install(registry: &mut Registry) {
    const N: &str = Value::NUMBER;
    const S: &str = Value::STRING;

    registry.add_operator("-", Operator::unary(UNARY, negate).operand(N));
    for token in ["not", "!"] {
        registry.add_operator(token, Operator::unary(UNARY, not));
    }

    registry.add_operator("*", numeric(PRODUCT, |a, b| Ok(a * b)));
    registry.add_operator("/", numeric(PRODUCT, |a, b| nonzero(b).map(|b| a / b)));
    registry.add_operator("%", numeric(PRODUCT, |a, b| nonzero(b).map(|b| a % b)));

    registry.add_operator("+", numeric(SUM, |a, b| Ok(a + b)));
    registry.add_operator("+", Operator::binary(SUM, concat).operands(S, S));
    registry.add_operator("-", numeric(SUM, |a, b| Ok(a - b)));

    let comparisons: [(&str, fn(Ordering) -> bool); 4] = [
        ("<", Ordering::is_lt),
        (">", Ordering::is_gt),
        ("<=", Ordering::is_le),
        (">=", Ordering::is_ge),
    ];
    for (token, accept) in comparisons {
        registry.add_operator(token, comparison(N, accept));
        registry.add_operator(token, comparison(S, accept));
    }

    for token in ["==", "is"] {
        registry.add_operator(token, Operator::binary(EQUALITY, |l, r, _| Ok(Variable::boolean(l == r))));
    }
    for token in ["!=", "isnt"] {
        registry.add_operator(token, Operator::binary(EQUALITY, |l, r, _| Ok(Variable::boolean(l != r))));
    }

    for token in ["and", "&&"] {
        registry.add_operator(
            token,
            Operator::binary(AND, |l, r, _| Ok(Variable::boolean(l.truthy()? && r.truthy()?))),
        );
    }
    for token in ["or", "||"] {
        registry.add_operator(
            token,
            Operator::binary(OR, |l, r, _| Ok(Variable::boolean(l.truthy()? || r.truthy()?))),
        );
    }
}

fn negate(operand: &Variable, _: &Variable, _: &mut ExecutionContext) -> EvalResult {
    Ok(Variable::number(-operand.expect_number()?))
}

fn not(operand: &Variable, _: &Variable, _: &mut ExecutionContext) -> EvalResult {
    Ok(Variable::boolean(!operand.truthy()?))
}

fn concat(left: &Variable, right: &Variable, _: &mut ExecutionContext) -> EvalResult {
    Ok(Variable::string(format!(
        "{}{}",
        left.expect_str()?,
        right.expect_str()?
    )))
}

fn nonzero(divisor: f64) -> Result<f64, ScriptError> {
    if divisor == 0.0 {
        Err(ScriptError::DivisionByZero)
    } else {
        Ok(divisor)
    }
}

fn numeric(priority: i32, f: fn(f64, f64) -> Result<f64, ScriptError>) -> Operator {
    Operator::binary(priority, move |l, r, _| {
        Ok(Variable::number(f(l.expect_number()?, r.expect_number()?)?))
    })
    .operands(Value::NUMBER, Value::NUMBER)
}

/// Ordering comparison over two operands of type `ty`.
fn comparison(ty: &str, accept: fn(Ordering) -> bool) -> Operator {
    Operator::binary(COMPARISON, move |l, r, _| {
        let ordering = match (l.value(), r.value()) {
            (Value::Number(a), Value::Number(b)) => a.partial_cmp(b),
            (Value::String(a), Value::String(b)) => Some(a.cmp(b)),
            _ => None,
        };
        Ok(Variable::boolean(ordering.is_some_and(accept)))
    })
    .operands(ty, ty)
}

#[cfg(test)]
mod tests;
