//! Runtime values.

use std::any::Any;
use std::fmt;

/// Capability set every extension-provided value type implements.
///
/// `equals` receives the other operand as a full [`Value`] so that a type
/// can decide for itself how it compares against values of other types
/// (usually: unequal).
pub trait CustomValue: fmt::Debug + Any {
    /// Name reported by `typeof` and used for operator overload filters.
    fn type_name(&self) -> &str;

    fn equals(&self, other: &Value) -> bool;

    /// Text shown by `echo` and friends.
    fn to_display_string(&self) -> String;

    /// Source form of the value. Types without a literal syntax return
    /// their display form.
    fn to_literal_string(&self) -> String {
        self.to_display_string()
    }

    /// Independent deep copy.
    fn clone_box(&self) -> Box<dyn CustomValue>;

    fn as_any(&self) -> &dyn Any;

    fn as_any_mut(&mut self) -> &mut dyn Any;
}

impl Clone for Box<dyn CustomValue> {
    fn clone(&self) -> Self {
        self.clone_box()
    }
}

/// A runtime value.
#[derive(Clone, Debug)]
pub enum Value {
    Number(f64),
    String(String),
    /// An identifier that has not been resolved to anything. Builtins such
    /// as `call` interpret it (as a label name, a variable name, ...).
    Name(String),
    /// The unit / absent value.
    Null,
    /// Extension-provided value.
    Custom(Box<dyn CustomValue>),
}

impl Value {
    pub const NUMBER: &'static str = "Number";
    pub const STRING: &'static str = "String";
    pub const NAME: &'static str = "Name";
    pub const NULL: &'static str = "Null";

    #[inline]
    pub fn string(s: impl Into<String>) -> Self {
        Value::String(s.into())
    }

    #[inline]
    pub fn name(s: impl Into<String>) -> Self {
        Value::Name(s.into())
    }

    #[inline]
    pub fn custom(value: impl CustomValue) -> Self {
        Value::Custom(Box::new(value))
    }

    pub fn type_name(&self) -> &str {
        match self {
            Value::Number(_) => Self::NUMBER,
            Value::String(_) => Self::STRING,
            Value::Name(_) => Self::NAME,
            Value::Null => Self::NULL,
            Value::Custom(custom) => custom.type_name(),
        }
    }

    pub fn equals(&self, other: &Value) -> bool {
        match (self, other) {
            (Value::Number(a), Value::Number(b)) => a == b,
            (Value::String(a), Value::String(b)) | (Value::Name(a), Value::Name(b)) => a == b,
            (Value::Null, Value::Null) => true,
            (Value::Custom(custom), _) => custom.equals(other),
            _ => false,
        }
    }

    pub fn to_display_string(&self) -> String {
        match self {
            Value::Number(n) => format_number(*n),
            Value::String(s) | Value::Name(s) => s.clone(),
            Value::Null => "null".to_string(),
            Value::Custom(custom) => custom.to_display_string(),
        }
    }

    pub fn to_literal_string(&self) -> String {
        match self {
            Value::String(s) => quote_string(s),
            Value::Custom(custom) => custom.to_literal_string(),
            Value::Number(_) | Value::Name(_) | Value::Null => self.to_display_string(),
        }
    }

    #[inline]
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    #[inline]
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Value::Number(n) => Some(*n),
            _ => None,
        }
    }

    #[inline]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    #[inline]
    pub fn as_name(&self) -> Option<&str> {
        match self {
            Value::Name(s) => Some(s),
            _ => None,
        }
    }

    /// Checked conversion to an extension payload.
    pub fn downcast_ref<T: CustomValue>(&self) -> Option<&T> {
        match self {
            Value::Custom(custom) => custom.as_any().downcast_ref::<T>(),
            _ => None,
        }
    }

    pub fn downcast_mut<T: CustomValue>(&mut self) -> Option<&mut T> {
        match self {
            Value::Custom(custom) => custom.as_any_mut().downcast_mut::<T>(),
            _ => None,
        }
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        self.equals(other)
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_display_string())
    }
}

/// Display form of a number: integral values print without a fraction.
pub fn format_number(n: f64) -> String {
    // f64's Display never uses exponent notation and drops a zero fraction.
    format!("{n}")
}

/// Quote `s` as a string literal the expression lexer reads back verbatim.
pub fn quote_string(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    out.push('"');
    for c in s.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\t' => out.push_str("\\t"),
            '\r' => out.push_str("\\r"),
            c => out.push(c),
        }
    }
    out.push('"');
    out
}
