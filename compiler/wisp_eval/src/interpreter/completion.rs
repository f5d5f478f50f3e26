//! Outcome of a facade operation.

use wisp_value::{ScriptError, Variable};

/// What a facade operation produced: a value, or the error that stopped it.
#[derive(Clone, Debug, PartialEq)]
#[must_use]
pub struct Completion {
    result: Result<Variable, ScriptError>,
}

impl Completion {
    pub fn ok(value: Variable) -> Self {
        Completion { result: Ok(value) }
    }

    pub fn failed(error: ScriptError) -> Self {
        Completion { result: Err(error) }
    }

    #[inline]
    pub fn is_ok(&self) -> bool {
        self.result.is_ok()
    }

    pub fn error(&self) -> Option<&ScriptError> {
        self.result.as_ref().err()
    }

    pub fn value(&self) -> Option<&Variable> {
        self.result.as_ref().ok()
    }

    /// The value, or `default` if the operation failed.
    pub fn value_or(self, default: impl Into<Variable>) -> Variable {
        self.result.unwrap_or_else(|_| default.into())
    }

    pub fn into_result(self) -> Result<Variable, ScriptError> {
        self.result
    }
}

impl From<Result<Variable, ScriptError>> for Completion {
    fn from(result: Result<Variable, ScriptError>) -> Self {
        Completion { result }
    }
}
