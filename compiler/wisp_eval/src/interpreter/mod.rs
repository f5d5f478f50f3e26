//! The host-facing interpreter.
//!
//! An [`Interpreter`] owns the live registry, the execution context and the
//! saved registry snapshots. A typical session:
//!
//! ```
//! use wisp_eval::Interpreter;
//! use wisp_value::Variable;
//!
//! let mut interp = Interpreter::new();
//! assert!(interp.preprocess("@add[x, y]\n    return($x + $y)\n").is_ok());
//! let sum = interp
//!     .run_label("add", vec![Variable::from(5), Variable::from(213)])
//!     .value_or(Variable::null());
//! assert_eq!(sum, Variable::from(218));
//! ```
//!
//! Every operation that can fail returns a [`Completion`]. A failure is
//! also recorded as [`Interpreter::error`] and reported to the callback set
//! with [`Interpreter::on_error`].
//!
//! One interpreter runs one script at a time and is not `Send`; hosts that
//! run scripts on several threads use one interpreter per thread.

mod builder;
mod completion;

pub use builder::InterpreterBuilder;
pub use completion::Completion;

use std::fmt;
use std::rc::Rc;

use rustc_hash::FxHashMap;
use tracing::debug;

use wisp_lexer::LexerCollection;
use wisp_value::{ErrorCategory, ScriptError, Variable};

use crate::context::ExecutionContext;
use crate::eval::evaluate;
use crate::exec;
use crate::extension::{Extension, ExtensionFactory};
use crate::label::Label;
use crate::preprocess::{self, expand_macros};
use crate::print_handler::SharedPrintHandler;
use crate::registry::{Builtin, Operator, Probe, RawBuiltin, Registry};

/// Label run by [`Interpreter::run`] and created by [`Interpreter::eval`].
pub const MAIN_LABEL: &str = "main";

type ErrorCallback = Box<dyn FnMut(&ScriptError)>;

pub struct Interpreter {
    ctx: ExecutionContext,
    snapshots: FxHashMap<i32, Registry>,
    on_error: Option<ErrorCallback>,
}

impl Interpreter {
    /// Interpreter with the default registry, writing to stdout.
    pub fn new() -> Self {
        InterpreterBuilder::new().build()
    }

    pub fn builder() -> InterpreterBuilder {
        InterpreterBuilder::new()
    }

    pub fn context(&self) -> &ExecutionContext {
        &self.ctx
    }

    pub fn context_mut(&mut self) -> &mut ExecutionContext {
        &mut self.ctx
    }

    pub fn registry(&self) -> &Registry {
        self.ctx.registry()
    }

    pub fn lexers_mut(&mut self) -> &mut LexerCollection {
        self.ctx.registry_mut().lexers_mut()
    }

    pub fn set_print_handler(&mut self, handler: SharedPrintHandler) -> &mut Self {
        self.ctx.set_print_handler(handler);
        self
    }

    // Registration

    pub fn add_builtin(&mut self, name: impl Into<String>, builtin: Builtin) -> &mut Self {
        self.ctx.registry_mut().add_builtin(name, builtin);
        self
    }

    pub fn add_raw_builtin(&mut self, name: impl Into<String>, builtin: RawBuiltin) -> &mut Self {
        self.ctx.registry_mut().add_raw_builtin(name, builtin);
        self
    }

    /// Append an overload for `token`.
    ///
    /// The token must come out of the expression lexer as exactly one bare
    /// token, otherwise expressions could never contain it.
    pub fn add_operator(&mut self, token: &str, operator: Operator) -> Completion {
        let result = self.check_operator_token(token).map(|()| {
            self.ctx.registry_mut().add_operator(token, operator);
            Variable::null()
        });
        self.finish(result)
    }

    fn check_operator_token(&self, token: &str) -> Result<(), ScriptError> {
        match self.ctx.lexers().expression.lex(token) {
            Ok(tokens) if tokens.len() == 1 && tokens[0].is_word(token) => Ok(()),
            _ => Err(ScriptError::custom(
                ErrorCategory::Parse,
                format!("`{token}` does not lex as a single operator token"),
            )),
        }
    }

    pub fn add_probe(&mut self, probe: Probe) -> &mut Self {
        self.ctx.registry_mut().add_probe(probe);
        self
    }

    /// Insert `probe` before every existing probe.
    pub fn prepend_probe(&mut self, probe: Probe) -> &mut Self {
        self.ctx.registry_mut().prepend_probe(probe);
        self
    }

    pub fn add_macro(&mut self, find: impl Into<String>, replace: impl Into<String>) -> &mut Self {
        self.ctx.registry_mut().add_macro(find, replace);
        self
    }

    /// Merge `extension` into the live registry.
    ///
    /// Nothing is registered if one of its operator tokens is invalid.
    pub fn bake(&mut self, extension: &dyn Extension) -> Completion {
        let operators = extension.operators();
        let checked = operators
            .iter()
            .try_for_each(|(token, _)| self.check_operator_token(token));
        let result = checked.map(|()| {
            let registry = self.ctx.registry_mut();
            for (name, builtin) in extension.builtins() {
                registry.add_builtin(name, builtin);
            }
            for (name, builtin) in extension.raw_builtins() {
                registry.add_raw_builtin(name, builtin);
            }
            for (token, operator) in operators {
                registry.add_operator(token, operator);
            }
            for (find, replace) in extension.macros() {
                registry.add_macro(find, replace);
            }
            for probe in extension.probes() {
                registry.add_probe(probe);
            }
            debug!(extension = extension.name(), "baked extension");
            Variable::null()
        });
        self.finish(result)
    }

    pub fn bake_factory(&mut self, factory: ExtensionFactory) -> Completion {
        let extension = factory();
        self.bake(extension.as_ref())
    }

    // Snapshots

    /// Save the registry (lexers included) under `id`, replacing any
    /// previous snapshot with that id.
    pub fn save(&mut self, id: i32) -> &mut Self {
        self.snapshots.insert(id, self.ctx.registry().clone());
        debug!(id, "saved registry snapshot");
        self
    }

    /// Replace the registry with snapshot `id` and clear the context.
    ///
    /// An unknown id is an error and changes nothing.
    pub fn load(&mut self, id: i32) -> Completion {
        let result = match self.snapshots.get(&id) {
            Some(snapshot) => {
                let registry = snapshot.clone();
                self.ctx.clear();
                self.ctx.replace_registry(registry);
                debug!(id, "loaded registry snapshot");
                Ok(Variable::null())
            }
            None => Err(ScriptError::custom(
                ErrorCategory::Binding,
                format!("no saved interpreter state with id {id}"),
            )),
        };
        self.finish(result)
    }

    /// Forget labels, constants, variables and the last error.
    pub fn clear(&mut self) -> &mut Self {
        self.ctx.clear();
        self
    }

    // Running

    /// Replace the label table and constants with those of `source`.
    pub fn preprocess(&mut self, source: &str) -> Completion {
        self.ctx.clear();
        let result = preprocess::preprocess(source, &mut self.ctx).map(|labels| {
            self.ctx.labels = Rc::new(labels);
            Variable::null()
        });
        self.finish(result)
    }

    /// Run the `main` label.
    pub fn run(&mut self) -> Completion {
        self.run_label(MAIN_LABEL, Vec::new())
    }

    /// Run `label` with positional `args`.
    pub fn run_label(&mut self, label: &str, args: Vec<Variable>) -> Completion {
        self.ctx.reset_run_state();
        let result = exec::run_label(label, args, &mut self.ctx);
        if let Ok(value) = &result {
            self.ctx.return_value = value.clone();
        }
        self.finish(result)
    }

    /// Preprocess `source` and run its `main` label.
    ///
    /// Source without any `@` declaration is the body of an implicit `main`.
    pub fn eval(&mut self, source: &str) -> Completion {
        let source = match self.has_declaration(source) {
            Ok(true) => source.to_string(),
            Ok(false) => format!("@{MAIN_LABEL}[] {source}"),
            Err(err) => return self.finish(Err(err)),
        };
        let preprocessed = self.preprocess(&source);
        if !preprocessed.is_ok() {
            return preprocessed;
        }
        self.run()
    }

    fn has_declaration(&self, source: &str) -> Result<bool, ScriptError> {
        let expanded = expand_macros(source, self.ctx.registry().macros());
        let tokens = self.ctx.lexers().preprocess.lex(&expanded)?;
        Ok(tokens.iter().any(|token| token.is_word("@")))
    }

    /// Evaluate one expression in the global scope.
    pub fn expression(&mut self, text: &str) -> Completion {
        self.ctx.reset_run_state();
        let result = evaluate(text, &mut self.ctx);
        self.finish(result)
    }

    fn finish(&mut self, result: Result<Variable, ScriptError>) -> Completion {
        match &result {
            Ok(_) => {
                self.ctx.error_msg.clear();
                self.ctx.raw_error = false;
            }
            Err(err) => {
                self.ctx.record_error(err);
                if let Some(callback) = self.on_error.as_mut() {
                    callback(err);
                }
            }
        }
        Completion::from(result)
    }

    // Inspection

    /// Message of the last failed operation; empty if it succeeded.
    pub fn error(&self) -> &str {
        &self.ctx.error_msg
    }

    /// Call `callback` whenever an operation fails.
    pub fn on_error(&mut self, callback: impl FnMut(&ScriptError) + 'static) -> &mut Self {
        self.on_error = Some(Box::new(callback));
        self
    }

    /// Return value of the last run.
    pub fn return_value(&self) -> &Variable {
        &self.ctx.return_value
    }

    /// A global variable or constant.
    pub fn variable(&self, name: &str) -> Option<&Variable> {
        self.ctx.variable(name)
    }

    /// Bind a global variable, visible to [`expression`](Self::expression).
    pub fn set_variable(&mut self, name: &str, value: impl Into<Variable>) -> Completion {
        let result = if self.ctx.is_constant(name) {
            Err(wisp_value::assign_to_constant(name))
        } else {
            self.ctx.env.define_global(name, value.into());
            Ok(Variable::null())
        };
        self.finish(result)
    }

    pub fn label(&self, name: &str) -> Option<&Label> {
        self.ctx.labels.get(name).map(|label| &**label)
    }

    /// Names of the preprocessed labels, sorted.
    pub fn label_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.ctx.labels.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Translate a global line into one relative to `label`.
    pub fn to_local_line(&self, label: &str, global: usize) -> Option<usize> {
        self.label(label)?.to_local_line(global)
    }

    pub fn to_global_line(&self, label: &str, local: usize) -> Option<usize> {
        self.label(label)?.to_global_line(local)
    }
}

impl Default for Interpreter {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Interpreter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Interpreter")
            .field("registry", self.ctx.registry())
            .field("labels", &self.label_names())
            .field("snapshots", &self.snapshots.len())
            .field("error", &self.ctx.error_msg)
            .finish_non_exhaustive()
    }
}
