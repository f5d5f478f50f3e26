//! The `Reference` value type.
//!
//! A reference names a variable in a particular scope of the context's
//! scope stack. It is a handle (scope position, scope id, variable name),
//! so it can be passed down to called labels and used to update the
//! caller's variable. A handle whose scope has been popped no longer
//! resolves.
//!
//! ```text
//! @main[]
//!     n = 1
//!     call(bump, ref(n))
//!     echoln($n)          # 2
//!
//! @bump[r]
//!     setref($r, deref($r) + 1)
//! ```

use std::any::Any;

use wisp_eval::{Builtin, ExecutionContext, Extension, Operator, ScopeRef};
use wisp_value::{
    type_mismatch, undefined_variable, CustomValue, ErrorCategory, EvalResult, ScriptError, Value,
    Variable,
};

#[derive(Clone, Debug)]
pub struct Reference {
    pub scope: ScopeRef,
    pub name: String,
}

impl Reference {
    pub const TYPE: &'static str = "Reference";

    /// Handle to `name` in the innermost scope of `ctx`.
    pub fn to_current(name: impl Into<String>, ctx: &ExecutionContext) -> Self {
        Reference {
            scope: ctx.env.current(),
            name: name.into(),
        }
    }

    pub fn get<'a>(&self, ctx: &'a ExecutionContext) -> Result<&'a Variable, ScriptError> {
        ctx.env
            .resolve(self.scope, &self.name)
            .ok_or_else(|| self.dangling())
    }

    pub fn get_mut<'a>(
        &self,
        ctx: &'a mut ExecutionContext,
    ) -> Result<&'a mut Variable, ScriptError> {
        match ctx.env.resolve_mut(self.scope, &self.name) {
            Some(variable) => Ok(variable),
            None => Err(self.dangling()),
        }
    }

    fn dangling(&self) -> ScriptError {
        ScriptError::custom(
            ErrorCategory::Binding,
            format!("reference to `${}` outlived its scope", self.name),
        )
    }
}

impl CustomValue for Reference {
    fn type_name(&self) -> &str {
        Self::TYPE
    }

    /// References have no identity visible to scripts.
    fn equals(&self, _: &Value) -> bool {
        false
    }

    fn to_display_string(&self) -> String {
        format!("ref(${})", self.name)
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

pub struct ReferenceExtension;

impl ReferenceExtension {
    pub const NAME: &'static str = "ref";
}

pub fn reference_extension() -> Box<dyn Extension> {
    Box::new(ReferenceExtension)
}

impl Extension for ReferenceExtension {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn builtins(&self) -> Vec<(String, Builtin)> {
        vec![
            ("ref".to_string(), Builtin::fixed(1, reference)),
            ("deref".to_string(), Builtin::fixed(1, deref)),
            ("setref".to_string(), Builtin::fixed(2, setref)),
        ]
    }

    fn operators(&self) -> Vec<(String, Operator)> {
        Vec::new()
    }
}

fn expect_reference(arg: &Variable) -> Result<&Reference, ScriptError> {
    arg.expect_custom::<Reference>(Reference::TYPE)
}

/// `ref(name)`: handle to variable `name` of the current scope.
fn reference(args: &[Variable], ctx: &mut ExecutionContext) -> EvalResult {
    let name = match args[0].value() {
        Value::Name(name) | Value::String(name) => name.as_str(),
        other => return Err(type_mismatch("variable name", other.type_name())),
    };
    if ctx.env.lookup(name).is_none() {
        return Err(undefined_variable(name));
    }
    let handle = Reference::to_current(name, ctx);
    Ok(Variable::new(Value::custom(handle)))
}

fn deref(args: &[Variable], ctx: &mut ExecutionContext) -> EvalResult {
    let handle = expect_reference(&args[0])?;
    handle.get(ctx).cloned()
}

/// `setref(r, value)`: overwrite the referenced variable.
fn setref(args: &[Variable], ctx: &mut ExecutionContext) -> EvalResult {
    let handle = expect_reference(&args[0])?;
    *handle.get_mut(ctx)? = args[1].clone();
    Ok(Variable::null())
}

#[cfg(test)]
mod tests;
