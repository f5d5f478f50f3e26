//! The owning wrapper the interpreter passes around.

use std::fmt;

use crate::errors::{type_mismatch, ScriptError};
use crate::value::{CustomValue, Value};

/// Exclusive owner of one [`Value`].
///
/// There is no "empty" variable: absence is the `Null` value. Cloning
/// deep-copies the held value, so two variables never share state.
#[derive(Clone, Debug)]
pub struct Variable {
    value: Value,
}

impl Variable {
    #[inline]
    pub fn new(value: Value) -> Self {
        Variable { value }
    }

    #[inline]
    pub fn null() -> Self {
        Variable::new(Value::Null)
    }

    /// Booleans are numbers: `1` for true, `0` for false.
    #[inline]
    pub fn boolean(b: bool) -> Self {
        Variable::new(Value::Number(if b { 1.0 } else { 0.0 }))
    }

    #[inline]
    pub fn number(n: f64) -> Self {
        Variable::new(Value::Number(n))
    }

    #[inline]
    pub fn string(s: impl Into<String>) -> Self {
        Variable::new(Value::String(s.into()))
    }

    #[inline]
    pub fn name(s: impl Into<String>) -> Self {
        Variable::new(Value::Name(s.into()))
    }

    #[inline]
    pub fn value(&self) -> &Value {
        &self.value
    }

    #[inline]
    pub fn value_mut(&mut self) -> &mut Value {
        &mut self.value
    }

    #[inline]
    pub fn into_value(self) -> Value {
        self.value
    }

    /// Replace the held value, dropping the old one.
    #[inline]
    pub fn set(&mut self, value: Value) {
        self.value = value;
    }

    #[inline]
    pub fn type_name(&self) -> &str {
        self.value.type_name()
    }

    #[inline]
    pub fn is_null(&self) -> bool {
        self.value.is_null()
    }

    pub fn printable(&self) -> String {
        self.value.to_display_string()
    }

    pub fn literal(&self) -> String {
        self.value.to_literal_string()
    }

    /// Condition value of `if`, `and`, `or` and `not`.
    ///
    /// Numbers are true when non-zero and `Null` is false; every other type
    /// is rejected.
    pub fn truthy(&self) -> Result<bool, ScriptError> {
        match &self.value {
            Value::Number(n) => Ok(*n != 0.0),
            Value::Null => Ok(false),
            other => Err(type_mismatch("Number or Null", other.type_name())),
        }
    }

    pub fn expect_number(&self) -> Result<f64, ScriptError> {
        self.value
            .as_number()
            .ok_or_else(|| type_mismatch(Value::NUMBER, self.type_name()))
    }

    pub fn expect_str(&self) -> Result<&str, ScriptError> {
        self.value
            .as_str()
            .ok_or_else(|| type_mismatch(Value::STRING, self.type_name()))
    }

    pub fn expect_name(&self) -> Result<&str, ScriptError> {
        self.value
            .as_name()
            .ok_or_else(|| type_mismatch(Value::NAME, self.type_name()))
    }

    /// Checked downcast to an extension type named `expected`.
    pub fn expect_custom<T: CustomValue>(&self, expected: &str) -> Result<&T, ScriptError> {
        self.value
            .downcast_ref::<T>()
            .ok_or_else(|| type_mismatch(expected, self.type_name()))
    }
}

impl Default for Variable {
    fn default() -> Self {
        Variable::null()
    }
}

impl PartialEq for Variable {
    fn eq(&self, other: &Self) -> bool {
        self.value.equals(&other.value)
    }
}

impl fmt::Display for Variable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.value, f)
    }
}

impl From<Value> for Variable {
    fn from(value: Value) -> Self {
        Variable::new(value)
    }
}

impl From<f64> for Variable {
    fn from(n: f64) -> Self {
        Variable::number(n)
    }
}

impl From<i32> for Variable {
    fn from(n: i32) -> Self {
        Variable::number(f64::from(n))
    }
}

impl From<u32> for Variable {
    fn from(n: u32) -> Self {
        Variable::number(f64::from(n))
    }
}

impl From<bool> for Variable {
    fn from(b: bool) -> Self {
        Variable::boolean(b)
    }
}

impl From<&str> for Variable {
    fn from(s: &str) -> Self {
        Variable::string(s)
    }
}

impl From<String> for Variable {
    fn from(s: String) -> Self {
        Variable::string(s)
    }
}
