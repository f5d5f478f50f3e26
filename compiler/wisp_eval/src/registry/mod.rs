//! Extensibility registry.
//!
//! Named builtins, raw builtins, operator overloads per token, literal
//! probes, text macros and the lexer configuration. The interpreter owns
//! one live registry; snapshots are plain clones (every callable is an
//! `Rc`, so cloning is cheap).

use std::fmt;
use std::rc::Rc;

use rustc_hash::FxHashMap;

use wisp_lexer::{LexerCollection, Token};
use wisp_value::{arity_mismatch, EvalResult, ScriptError, Value, Variable};

use crate::context::ExecutionContext;

pub type BuiltinFn = Rc<dyn Fn(&[Variable], &mut ExecutionContext) -> EvalResult>;
pub type RawBuiltinFn = Rc<dyn Fn(&str, &mut ExecutionContext) -> EvalResult>;
pub type OperatorFn = Rc<dyn Fn(&Variable, &Variable, &mut ExecutionContext) -> EvalResult>;
pub type ProbeFn =
    Rc<dyn Fn(&Token, &mut ExecutionContext) -> Result<Option<Value>, ScriptError>>;

/// Native function receiving evaluated arguments.
#[derive(Clone)]
pub struct Builtin {
    /// Exact argument count, or `None` to accept any.
    pub arity: Option<usize>,
    pub run: BuiltinFn,
}

impl Builtin {
    pub fn new(
        arity: Option<usize>,
        run: impl Fn(&[Variable], &mut ExecutionContext) -> EvalResult + 'static,
    ) -> Self {
        Builtin {
            arity,
            run: Rc::new(run),
        }
    }

    pub fn fixed(
        arity: usize,
        run: impl Fn(&[Variable], &mut ExecutionContext) -> EvalResult + 'static,
    ) -> Self {
        Self::new(Some(arity), run)
    }

    pub fn variadic(
        run: impl Fn(&[Variable], &mut ExecutionContext) -> EvalResult + 'static,
    ) -> Self {
        Self::new(None, run)
    }

    /// Check the argument count and run.
    pub fn call(&self, name: &str, args: &[Variable], ctx: &mut ExecutionContext) -> EvalResult {
        if let Some(expected) = self.arity {
            if args.len() != expected {
                return Err(arity_mismatch(name, expected, args.len()));
            }
        }
        (self.run)(args, ctx)
    }
}

/// Native function receiving the unparsed text between its parentheses.
#[derive(Clone)]
pub struct RawBuiltin {
    pub run: RawBuiltinFn,
}

impl RawBuiltin {
    pub fn new(run: impl Fn(&str, &mut ExecutionContext) -> EvalResult + 'static) -> Self {
        RawBuiltin { run: Rc::new(run) }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Arity {
    Unary,
    Binary,
}

/// Where an operator stands relative to its operands.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Fixity {
    /// Unary, before its operand: `-x`.
    Prefix,
    /// Binary, between its operands.
    Infix,
    /// Unary, after its operand.
    Postfix,
}

impl Fixity {
    #[inline]
    pub fn arity(self) -> Arity {
        match self {
            Fixity::Infix => Arity::Binary,
            Fixity::Prefix | Fixity::Postfix => Arity::Unary,
        }
    }
}

/// One overload of an operator token.
///
/// Unary operators receive their operand as `left`; `right` is `Null`.
#[derive(Clone)]
pub struct Operator {
    /// Higher priority splits first, so it binds loosest.
    pub priority: i32,
    pub fixity: Fixity,
    /// Required type name of the left (or only) operand; `None` accepts any.
    pub left: Option<String>,
    pub right: Option<String>,
    pub run: OperatorFn,
}

impl Operator {
    pub fn unary(
        priority: i32,
        run: impl Fn(&Variable, &Variable, &mut ExecutionContext) -> EvalResult + 'static,
    ) -> Self {
        Operator {
            priority,
            fixity: Fixity::Prefix,
            left: None,
            right: None,
            run: Rc::new(run),
        }
    }

    pub fn binary(
        priority: i32,
        run: impl Fn(&Variable, &Variable, &mut ExecutionContext) -> EvalResult + 'static,
    ) -> Self {
        Operator {
            priority,
            fixity: Fixity::Infix,
            left: None,
            right: None,
            run: Rc::new(run),
        }
    }

    /// Place a unary operator after its operand instead of before it.
    #[must_use]
    pub fn postfix(mut self) -> Self {
        if self.fixity == Fixity::Prefix {
            self.fixity = Fixity::Postfix;
        }
        self
    }

    #[inline]
    pub fn arity(&self) -> Arity {
        self.fixity.arity()
    }

    /// Restrict the operand of a unary operator to one type.
    #[must_use]
    pub fn operand(mut self, type_name: &str) -> Self {
        self.left = Some(type_name.to_string());
        self
    }

    /// Restrict both operands of a binary operator.
    #[must_use]
    pub fn operands(mut self, left: &str, right: &str) -> Self {
        self.left = Some(left.to_string());
        self.right = Some(right.to_string());
        self
    }

    /// True if this overload takes operands of these runtime types.
    pub fn accepts(&self, fixity: Fixity, left: &Variable, right: &Variable) -> bool {
        fn matches(filter: Option<&String>, operand: &Variable) -> bool {
            filter.map_or(true, |name| name == operand.type_name())
        }
        self.fixity == fixity
            && matches(self.left.as_ref(), left)
            && (fixity.arity() == Arity::Unary || matches(self.right.as_ref(), right))
    }
}

impl fmt::Debug for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Operator")
            .field("priority", &self.priority)
            .field("fixity", &self.fixity)
            .field("left", &self.left)
            .field("right", &self.right)
            .finish_non_exhaustive()
    }
}

/// Literal recognizer entry.
///
/// Returns `Ok(None)` for tokens it does not claim; an `Err` means the
/// token was claimed but is malformed.
#[derive(Clone)]
pub struct Probe {
    pub name: String,
    pub run: ProbeFn,
}

impl Probe {
    pub fn new(
        name: impl Into<String>,
        run: impl Fn(&Token, &mut ExecutionContext) -> Result<Option<Value>, ScriptError> + 'static,
    ) -> Self {
        Probe {
            name: name.into(),
            run: Rc::new(run),
        }
    }
}

impl fmt::Debug for Probe {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Probe").field(&self.name).finish()
    }
}

#[derive(Clone)]
pub struct Registry {
    builtins: FxHashMap<String, Builtin>,
    raw_builtins: FxHashMap<String, RawBuiltin>,
    operators: FxHashMap<String, Vec<Operator>>,
    probes: Vec<Probe>,
    macros: Vec<(String, String)>,
    lexers: LexerCollection,
}

impl Registry {
    /// No builtins, operators, probes or macros; default lexers.
    pub fn empty() -> Self {
        Registry {
            builtins: FxHashMap::default(),
            raw_builtins: FxHashMap::default(),
            operators: FxHashMap::default(),
            probes: Vec::new(),
            macros: Vec::new(),
            lexers: LexerCollection::default(),
        }
    }

    /// The registry every interpreter starts from.
    pub fn with_defaults() -> Self {
        let mut registry = Self::empty();
        crate::builtins::install(&mut registry);
        crate::operators::install(&mut registry);
        for probe in crate::literal::default_probes() {
            registry.add_probe(probe);
        }
        registry
    }

    /// Register `builtin` under `name`, replacing any previous one.
    pub fn add_builtin(&mut self, name: impl Into<String>, builtin: Builtin) {
        self.builtins.insert(name.into(), builtin);
    }

    pub fn add_raw_builtin(&mut self, name: impl Into<String>, builtin: RawBuiltin) {
        self.raw_builtins.insert(name.into(), builtin);
    }

    /// Append an overload for `token`. Earlier overloads keep precedence.
    pub fn add_operator(&mut self, token: impl Into<String>, operator: Operator) {
        self.operators.entry(token.into()).or_default().push(operator);
    }

    pub fn add_probe(&mut self, probe: Probe) {
        self.probes.push(probe);
    }

    pub fn prepend_probe(&mut self, probe: Probe) {
        self.probes.insert(0, probe);
    }

    /// Add or replace the macro for `find`.
    pub fn add_macro(&mut self, find: impl Into<String>, replace: impl Into<String>) {
        let (find, replace) = (find.into(), replace.into());
        match self.macros.iter_mut().find(|(existing, _)| *existing == find) {
            Some(entry) => entry.1 = replace,
            None => self.macros.push((find, replace)),
        }
    }

    #[inline]
    pub fn builtin(&self, name: &str) -> Option<&Builtin> {
        self.builtins.get(name)
    }

    #[inline]
    pub fn raw_builtin(&self, name: &str) -> Option<&RawBuiltin> {
        self.raw_builtins.get(name)
    }

    /// All overloads of `token`, in registration order.
    pub fn operators(&self, token: &str) -> &[Operator] {
        self.operators
            .get(token)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    #[inline]
    pub fn is_operator(&self, token: &str) -> bool {
        self.operators.contains_key(token)
    }

    /// Split priority of `token` used with `fixity`: that of its first
    /// overload with that fixity.
    pub fn priority(&self, token: &str, fixity: Fixity) -> Option<i32> {
        self.operators(token)
            .iter()
            .find(|op| op.fixity == fixity)
            .map(|op| op.priority)
    }

    /// First overload of `token` accepting these operands.
    pub fn resolve_operator(
        &self,
        token: &str,
        fixity: Fixity,
        left: &Variable,
        right: &Variable,
    ) -> Option<&Operator> {
        self.operators(token)
            .iter()
            .find(|op| op.accepts(fixity, left, right))
    }

    pub fn probes(&self) -> &[Probe] {
        &self.probes
    }

    pub fn macros(&self) -> &[(String, String)] {
        &self.macros
    }

    #[inline]
    pub fn lexers(&self) -> &LexerCollection {
        &self.lexers
    }

    pub fn lexers_mut(&mut self) -> &mut LexerCollection {
        &mut self.lexers
    }

    /// Builtin names, sorted.
    pub fn builtin_names(&self) -> Vec<&str> {
        sorted_keys(&self.builtins)
    }

    pub fn raw_builtin_names(&self) -> Vec<&str> {
        sorted_keys(&self.raw_builtins)
    }

    pub fn operator_tokens(&self) -> Vec<&str> {
        sorted_keys(&self.operators)
    }
}

fn sorted_keys<V>(map: &FxHashMap<String, V>) -> Vec<&str> {
    let mut keys: Vec<&str> = map.keys().map(String::as_str).collect();
    keys.sort_unstable();
    keys
}

impl Default for Registry {
    fn default() -> Self {
        Self::with_defaults()
    }
}

impl fmt::Debug for Registry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Registry")
            .field("builtins", &self.builtin_names())
            .field("raw_builtins", &self.raw_builtin_names())
            .field("operators", &self.operator_tokens())
            .field("probes", &self.probes)
            .field("macros", &self.macros)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests;
