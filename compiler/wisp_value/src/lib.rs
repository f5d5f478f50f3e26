//! Wisp Value - runtime values and errors shared by the interpreter and
//! by extensions.
//!
//! # Value model
//!
//! [`Value`] is a closed sum of the built-in variants (`Number`, `String`,
//! `Name`, `Null`) plus one open slot, `Custom`, for extension types
//! implementing [`CustomValue`]. Code that needs an extension payload goes
//! through a checked downcast ([`Value::downcast_ref`],
//! [`Variable::expect_custom`]) which reports a type error on mismatch.
//!
//! [`Variable`] exclusively owns one value. Cloning a variable deep-copies
//! the value, so assignment never aliases.
//!
//! # Errors
//!
//! Every failure inside the interpreter is a [`ScriptError`]. Each variant
//! belongs to one [`ErrorCategory`]. Errors raised by a statement are
//! wrapped into [`ScriptError::Located`] with the label and line before they
//! leave the statement loop.

mod errors;
mod value;
mod variable;

pub use errors::{
    arity_mismatch, assign_to_constant, type_mismatch, undefined_builtin, undefined_label,
    undefined_variable, unknown_operator, ErrorCategory, EvalResult, ScriptError,
};
pub use value::{format_number, quote_string, CustomValue, Value};
pub use variable::Variable;
