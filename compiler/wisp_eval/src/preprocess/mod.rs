//! Source preprocessing.
//!
//! Turns script text into a label table:
//!
//! ```text
//! @const[
//!     answer = 42
//! ]
//!
//! @add[x, y]
//!     return($x + $y)
//!
//! @main[] echoln(call(add, $answer, 1))
//! ```
//!
//! Macros are expanded first. The preprocess lexer then splits the text;
//! `@` + identifier + `[...]` declares a label (or, for `const`, a block of
//! `name = expr` lines evaluated on the spot into the constants map). Every
//! other token belongs to the most recent label and is grouped into one
//! statement per source line.

use std::rc::Rc;

use tracing::debug;

use wisp_lexer::Token;
use wisp_value::ScriptError;

use crate::context::ExecutionContext;
use crate::eval::evaluate;
use crate::label::{Label, LabelTable, Statement};
use crate::literal::is_identifier;

/// Name of the pseudo-label that declares constants.
pub const CONST_BLOCK: &str = "const";

/// Preprocess `source`, defining its constants in `ctx`.
pub fn preprocess(source: &str, ctx: &mut ExecutionContext) -> Result<LabelTable, ScriptError> {
    let expanded = expand_macros(source, ctx.registry().macros());
    let tokens = ctx.lexers().preprocess.lex(&expanded)?;

    let mut labels = LabelTable::default();
    let mut current: Option<Label> = None;
    let mut constants = 0usize;
    let mut i = 0;
    while i < tokens.len() {
        let token = &tokens[i];
        if token.is_word("@") {
            let (name, params) = declaration(&tokens[i..])?;
            if let Some(done) = current.take() {
                insert_label(&mut labels, done)?;
            }
            if name.text == CONST_BLOCK {
                constants += define_constants(params, ctx)?;
            } else {
                if labels.contains_key(&name.text) {
                    return Err(ScriptError::DuplicateLabel {
                        name: name.text.clone(),
                    });
                }
                current = Some(Label {
                    name: name.text.clone(),
                    params: parameters(params)?,
                    statements: Vec::new(),
                    line: line_of(token),
                });
            }
            i += 3;
            continue;
        }

        while i < tokens.len() && tokens[i].line == token.line && !tokens[i].is_word("@") {
            i += 1;
        }
        let Some(label) = current.as_mut() else {
            return Err(declaration_error(format!(
                "statement on line {} is not inside a label",
                token.line
            )));
        };
        let text = &expanded[token.span.start..tokens[i - 1].span.end];
        label.statements.push(Statement {
            line: line_of(token),
            text: text.to_string(),
            tokens: ctx.lexers().expression.lex(text)?,
        });
    }
    if let Some(done) = current.take() {
        insert_label(&mut labels, done)?;
    }

    debug!(labels = labels.len(), constants, "preprocessed source");
    Ok(labels)
}

/// Apply `macros` in one left-to-right pass, longest match first.
/// Replacement text is not scanned again.
pub fn expand_macros(source: &str, macros: &[(String, String)]) -> String {
    if macros.is_empty() {
        return source.to_string();
    }
    let mut out = String::with_capacity(source.len());
    let mut rest = source;
    while let Some(c) = rest.chars().next() {
        let longest = macros
            .iter()
            .filter(|(find, _)| !find.is_empty() && rest.starts_with(find.as_str()))
            .max_by_key(|(find, _)| find.len());
        match longest {
            Some((find, replace)) => {
                out.push_str(replace);
                rest = &rest[find.len()..];
            }
            None => {
                out.push(c);
                rest = &rest[c.len_utf8()..];
            }
        }
    }
    out
}

fn line_of(token: &Token) -> usize {
    token.line as usize
}

fn declaration_error(message: impl Into<String>) -> ScriptError {
    ScriptError::Declaration {
        message: message.into(),
    }
}

/// Split `@ name [params]` off the front of `tokens`.
fn declaration(tokens: &[Token]) -> Result<(&Token, &Token), ScriptError> {
    let line = tokens.first().map_or(0, |at| at.line);
    match tokens {
        [_, name, params, ..]
            if name.is_bare_word()
                && is_identifier(&name.text)
                && params.is_capsule('[')
                && name.line == line =>
        {
            Ok((name, params))
        }
        _ => Err(declaration_error(format!(
            "expected `@name[params]` on line {line}"
        ))),
    }
}

fn parameters(capsule: &Token) -> Result<Vec<String>, ScriptError> {
    let inner = capsule.capsule_inner().unwrap_or_default().trim();
    if inner.is_empty() {
        return Ok(Vec::new());
    }
    let mut params: Vec<String> = Vec::new();
    for param in inner.split(',').map(str::trim) {
        if !is_identifier(param) {
            return Err(declaration_error(format!(
                "invalid parameter name `{param}` on line {}",
                capsule.line
            )));
        }
        if params.iter().any(|p| p == param) {
            return Err(declaration_error(format!(
                "duplicate parameter `{param}` on line {}",
                capsule.line
            )));
        }
        params.push(param.to_string());
    }
    Ok(params)
}

fn insert_label(labels: &mut LabelTable, label: Label) -> Result<(), ScriptError> {
    if labels.contains_key(&label.name) {
        return Err(ScriptError::DuplicateLabel { name: label.name });
    }
    labels.insert(label.name.clone(), Rc::new(label));
    Ok(())
}

/// Evaluate each `name = expr` line of a `@const[...]` block.
fn define_constants(capsule: &Token, ctx: &mut ExecutionContext) -> Result<usize, ScriptError> {
    let inner = capsule.capsule_inner().unwrap_or_default();
    let first_line = line_of(capsule);
    let mut count = 0;
    for (offset, raw) in inner.lines().enumerate() {
        let text = raw.trim();
        if text.is_empty() || text.starts_with('#') {
            continue;
        }
        let line = first_line + offset;
        define_constant(text, line, ctx).map_err(|err| err.located(CONST_BLOCK, line))?;
        count += 1;
    }
    Ok(count)
}

fn define_constant(text: &str, line: usize, ctx: &mut ExecutionContext) -> Result<(), ScriptError> {
    let tokens = ctx.lexers().expression.lex(text)?;
    match tokens.as_slice() {
        [name, eq, value, ..] if name.is_bare_word() && is_identifier(&name.text) && eq.is_word("=") => {
            let result = evaluate(&text[value.span.start..], ctx)?;
            ctx.define_constant(&name.text, result)
        }
        _ => Err(declaration_error(format!(
            "expected `name = expression` in constant block on line {line}"
        ))),
    }
}

#[cfg(test)]
mod tests;
