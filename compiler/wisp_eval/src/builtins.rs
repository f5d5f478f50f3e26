//! Default builtins and raw builtins.

use wisp_value::{
    arity_mismatch, type_mismatch, ErrorCategory, EvalResult, ScriptError, Value, Variable,
};

use crate::context::ExecutionContext;
use crate::eval::evaluate;
use crate::exec::run_label;
use crate::literal::parse_number;
use crate::registry::{Builtin, RawBuiltin, Registry};

pub(crate) fn install(registry: &mut Registry) {
    registry.add_builtin("echo", Builtin::variadic(echo));
    registry.add_builtin("echoln", Builtin::variadic(echoln));
    registry.add_builtin("return", Builtin::variadic(return_));
    registry.add_builtin("call", Builtin::variadic(call));
    registry.add_builtin("exit", Builtin::fixed(0, exit));
    registry.add_builtin("typeof", Builtin::fixed(1, type_of));
    registry.add_builtin("to_string", Builtin::fixed(1, to_string));
    registry.add_builtin("to_number", Builtin::fixed(1, to_number));

    registry.add_raw_builtin("if", RawBuiltin::new(if_));
    registry.add_raw_builtin("else", RawBuiltin::new(else_));
    registry.add_raw_builtin("endif", RawBuiltin::new(endif));
}

fn concat(args: &[Variable]) -> String {
    args.iter().map(Variable::printable).collect()
}

fn echo(args: &[Variable], ctx: &mut ExecutionContext) -> EvalResult {
    ctx.print(&concat(args));
    Ok(Variable::null())
}

fn echoln(args: &[Variable], ctx: &mut ExecutionContext) -> EvalResult {
    ctx.println(&concat(args));
    Ok(Variable::null())
}

fn return_(args: &[Variable], ctx: &mut ExecutionContext) -> EvalResult {
    let value = match args {
        [] => Variable::null(),
        [value] => value.clone(),
        _ => return Err(arity_mismatch("return", 1, args.len())),
    };
    ctx.return_value = value.clone();
    ctx.exit = true;
    Ok(value)
}

fn exit(_: &[Variable], ctx: &mut ExecutionContext) -> EvalResult {
    ctx.return_value = Variable::null();
    ctx.exit = true;
    Ok(Variable::null())
}

/// `call(label, args..)`: the label's return value.
fn call(args: &[Variable], ctx: &mut ExecutionContext) -> EvalResult {
    let Some((target, rest)) = args.split_first() else {
        return Err(arity_mismatch("call", 1, 0));
    };
    let name = match target.value() {
        Value::Name(name) | Value::String(name) => name.clone(),
        other => return Err(type_mismatch("label name", other.type_name())),
    };
    run_label(&name, rest.to_vec(), ctx)
}

fn type_of(args: &[Variable], _: &mut ExecutionContext) -> EvalResult {
    Ok(Variable::string(args[0].type_name()))
}

fn to_string(args: &[Variable], _: &mut ExecutionContext) -> EvalResult {
    Ok(Variable::string(args[0].printable()))
}

fn to_number(args: &[Variable], _: &mut ExecutionContext) -> EvalResult {
    match args[0].value() {
        Value::Number(n) => Ok(Variable::number(*n)),
        Value::String(s) => parse_number(s.trim()).map(Variable::number).ok_or_else(|| {
            ScriptError::custom(
                ErrorCategory::Type,
                format!("cannot convert \"{s}\" to a number"),
            )
        }),
        other => Err(type_mismatch("Number or String", other.type_name())),
    }
}

/// `if(cond)`: the condition is only evaluated inside an active block.
fn if_(args: &str, ctx: &mut ExecutionContext) -> EvalResult {
    let condition = if ctx.blocks.is_active() {
        evaluate(args, ctx)?.truthy()?
    } else {
        false
    };
    ctx.blocks.push_if(condition);
    Ok(Variable::null())
}

fn else_(args: &str, ctx: &mut ExecutionContext) -> EvalResult {
    no_arguments("else", args)?;
    ctx.blocks.flip_else()?;
    Ok(Variable::null())
}

fn endif(args: &str, ctx: &mut ExecutionContext) -> EvalResult {
    no_arguments("endif", args)?;
    if !ctx.blocks.is_empty() {
        ctx.blocks.pop_endif()?;
    } else if ctx.ignore_endifs > 0 {
        ctx.ignore_endifs -= 1;
    } else {
        return Err(ScriptError::UnbalancedEndif);
    }
    Ok(Variable::null())
}

fn no_arguments(name: &str, args: &str) -> Result<(), ScriptError> {
    if args.trim().is_empty() {
        Ok(())
    } else {
        Err(arity_mismatch(name, 0, 1))
    }
}

#[cfg(test)]
mod tests;
