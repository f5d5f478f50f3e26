//! Error taxonomy for preprocessing and evaluation.
//!
//! Factory functions (`undefined_variable()`, `type_mismatch()`, ...) are
//! the preferred way to build errors; they keep message wording in one
//! place.

use thiserror::Error;
use wisp_lexer::LexError;

use crate::variable::Variable;

/// Result of evaluating anything that produces a value.
pub type EvalResult = Result<Variable, ScriptError>;

/// Coarse error classes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ErrorCategory {
    /// Malformed tokens, unknown operators, malformed declarations.
    Parse,
    /// Undefined names, wrong argument counts, writes to constants.
    Binding,
    /// Operand or argument of the wrong type.
    Type,
    /// Unbalanced block statements, call depth limit.
    Control,
}

#[derive(Clone, Debug, PartialEq, Error)]
pub enum ScriptError {
    // Parse
    #[error(transparent)]
    Lex(#[from] LexError),
    #[error("unknown operator `{token}`")]
    UnknownOperator { token: String },
    #[error("operator `{token}` {problem}")]
    OperatorArity { token: String, problem: &'static str },
    #[error("expected a single value, found `{text}`")]
    Malformed { text: String },
    #[error("empty expression")]
    EmptyExpression,
    #[error("`{token}` is not a valid literal")]
    NotALiteral { token: String },
    #[error("malformed declaration: {message}")]
    Declaration { message: String },

    // Binding
    #[error("undefined variable `${name}`")]
    UndefinedVariable { name: String },
    #[error("undefined label `@{name}`")]
    UndefinedLabel { name: String },
    #[error("undefined builtin `{name}`")]
    UndefinedBuiltin { name: String },
    #[error("`{name}` expects {expected} argument{}, got {got}", plural(.expected))]
    ArityMismatch {
        name: String,
        expected: usize,
        got: usize,
    },
    #[error("cannot assign to constant `{name}`")]
    AssignToConstant { name: String },
    #[error("label `@{name}` is declared more than once")]
    DuplicateLabel { name: String },

    // Type
    #[error("type mismatch: expected {expected}, got {got}")]
    TypeMismatch { expected: String, got: String },
    #[error("operator `{token}` cannot be applied to {operands}")]
    NoOverload { token: String, operands: String },
    #[error("division by zero")]
    DivisionByZero,

    // Control
    #[error("`endif` without a matching `if`")]
    UnbalancedEndif,
    #[error("`else` without a matching `if`")]
    UnbalancedElse,
    #[error("call depth exceeded the limit of {limit}")]
    CallDepthExceeded { limit: usize },

    /// Error raised by a native function in one of the categories.
    #[error("{message}")]
    Custom {
        category: ErrorCategory,
        message: String,
    },
    /// Already formatted by whoever raised it; never annotated with a line.
    #[error("{0}")]
    Raw(String),
    /// Error annotated with the label and global line it happened on.
    #[error("line {line} in @{label}: {inner}")]
    Located {
        label: String,
        line: usize,
        inner: Box<ScriptError>,
    },
}

impl ScriptError {
    pub fn custom(category: ErrorCategory, message: impl Into<String>) -> Self {
        ScriptError::Custom {
            category,
            message: message.into(),
        }
    }

    pub fn raw(message: impl Into<String>) -> Self {
        ScriptError::Raw(message.into())
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            ScriptError::Lex(_)
            | ScriptError::UnknownOperator { .. }
            | ScriptError::OperatorArity { .. }
            | ScriptError::Malformed { .. }
            | ScriptError::EmptyExpression
            | ScriptError::NotALiteral { .. }
            | ScriptError::Declaration { .. }
            | ScriptError::Raw(_) => ErrorCategory::Parse,
            ScriptError::UndefinedVariable { .. }
            | ScriptError::UndefinedLabel { .. }
            | ScriptError::UndefinedBuiltin { .. }
            | ScriptError::ArityMismatch { .. }
            | ScriptError::AssignToConstant { .. }
            | ScriptError::DuplicateLabel { .. } => ErrorCategory::Binding,
            ScriptError::TypeMismatch { .. }
            | ScriptError::NoOverload { .. }
            | ScriptError::DivisionByZero => ErrorCategory::Type,
            ScriptError::UnbalancedEndif
            | ScriptError::UnbalancedElse
            | ScriptError::CallDepthExceeded { .. } => ErrorCategory::Control,
            ScriptError::Custom { category, .. } => *category,
            ScriptError::Located { inner, .. } => inner.category(),
        }
    }

    /// True if the message must be shown as is, without line annotation.
    #[inline]
    pub fn is_raw(&self) -> bool {
        matches!(self, ScriptError::Raw(_) | ScriptError::Located { .. })
    }

    /// Attach `label` and `line` unless the error is raw or already located.
    #[must_use]
    pub fn located(self, label: &str, line: usize) -> Self {
        if self.is_raw() {
            return self;
        }
        ScriptError::Located {
            label: label.to_string(),
            line,
            inner: Box::new(self),
        }
    }

    /// Global line the error was located at, if any.
    pub fn line(&self) -> Option<usize> {
        match self {
            ScriptError::Located { line, .. } => Some(*line),
            _ => None,
        }
    }

    /// The error without its location wrapper.
    pub fn root(&self) -> &ScriptError {
        match self {
            ScriptError::Located { inner, .. } => inner.root(),
            other => other,
        }
    }
}

fn plural(n: &usize) -> &'static str {
    if *n == 1 {
        ""
    } else {
        "s"
    }
}

// Binding errors

pub fn undefined_variable(name: impl Into<String>) -> ScriptError {
    ScriptError::UndefinedVariable { name: name.into() }
}

pub fn undefined_label(name: impl Into<String>) -> ScriptError {
    ScriptError::UndefinedLabel { name: name.into() }
}

pub fn undefined_builtin(name: impl Into<String>) -> ScriptError {
    ScriptError::UndefinedBuiltin { name: name.into() }
}

pub fn arity_mismatch(name: impl Into<String>, expected: usize, got: usize) -> ScriptError {
    ScriptError::ArityMismatch {
        name: name.into(),
        expected,
        got,
    }
}

pub fn assign_to_constant(name: impl Into<String>) -> ScriptError {
    ScriptError::AssignToConstant { name: name.into() }
}

// Type and parse errors

pub fn type_mismatch(expected: impl Into<String>, got: impl Into<String>) -> ScriptError {
    ScriptError::TypeMismatch {
        expected: expected.into(),
        got: got.into(),
    }
}

pub fn unknown_operator(token: impl Into<String>) -> ScriptError {
    ScriptError::UnknownOperator {
        token: token.into(),
    }
}

#[cfg(test)]
mod tests;
