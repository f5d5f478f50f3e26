//! Literal recognition.
//!
//! A token becomes a value by running the registry's probes in order; the
//! first probe that claims the token wins. The default probes, in order:
//!
//! 1. quoted string → `String`
//! 2. numeric text (`12`, `-3`, `2.5`) → `Number`
//! 3. `null` → `Null`
//! 4. `$name` → the variable's value (current scope, then constants)
//! 5. identifier → `Name`
//!
//! The identifier probe is deliberately narrow so that probes appended by
//! extensions still see bracketed and other non-identifier tokens.

use tracing::trace;

use wisp_lexer::Token;
use wisp_value::{undefined_variable, ScriptError, Value};

use crate::context::ExecutionContext;
use crate::registry::Probe;

/// Run the probes over `token`.
pub fn recognize(token: &Token, ctx: &mut ExecutionContext) -> Result<Option<Value>, ScriptError> {
    let registry = ctx.registry_rc();
    for probe in registry.probes() {
        let claimed = (probe.run)(token, ctx)?;
        if let Some(err) = ctx.take_native_error() {
            return Err(err);
        }
        if let Some(value) = claimed {
            trace!(token = %token, probe = %probe.name, "recognized literal");
            return Ok(Some(value));
        }
    }
    Ok(None)
}

pub fn default_probes() -> Vec<Probe> {
    vec![
        Probe::new("string", string_probe),
        Probe::new("number", number_probe),
        Probe::new("null", null_probe),
        Probe::new("variable", variable_probe),
        Probe::new("name", name_probe),
    ]
}

fn string_probe(token: &Token, _: &mut ExecutionContext) -> Result<Option<Value>, ScriptError> {
    Ok(token.is_str().then(|| Value::string(token.text.as_str())))
}

fn number_probe(token: &Token, _: &mut ExecutionContext) -> Result<Option<Value>, ScriptError> {
    if !token.is_bare_word() {
        return Ok(None);
    }
    Ok(parse_number(&token.text).map(Value::Number))
}

fn null_probe(token: &Token, _: &mut ExecutionContext) -> Result<Option<Value>, ScriptError> {
    Ok(token.is_word("null").then_some(Value::Null))
}

fn variable_probe(token: &Token, ctx: &mut ExecutionContext) -> Result<Option<Value>, ScriptError> {
    if !token.is_bare_word() {
        return Ok(None);
    }
    let Some(name) = token.text.strip_prefix('$') else {
        return Ok(None);
    };
    match ctx.variable(name) {
        Some(var) => Ok(Some(var.value().clone())),
        None => Err(undefined_variable(name)),
    }
}

fn name_probe(token: &Token, _: &mut ExecutionContext) -> Result<Option<Value>, ScriptError> {
    if token.is_bare_word() && is_identifier(&token.text) {
        Ok(Some(Value::name(token.text.as_str())))
    } else {
        Ok(None)
    }
}

/// Parse numeric literal text: an optional `-`, digits, at most one `.`.
pub fn parse_number(text: &str) -> Option<f64> {
    let digits = text.strip_prefix('-').unwrap_or(text);
    let mut seen_digit = false;
    let mut seen_dot = false;
    for c in digits.chars() {
        match c {
            '0'..='9' => seen_digit = true,
            '.' if !seen_dot => seen_dot = true,
            _ => return None,
        }
    }
    if !seen_digit {
        return None;
    }
    text.parse().ok()
}

/// `[A-Za-z_][A-Za-z0-9_]*`
pub fn is_identifier(text: &str) -> bool {
    let mut chars = text.chars();
    chars
        .next()
        .is_some_and(|c| c.is_ascii_alphabetic() || c == '_')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}
