//! The mutable state threaded through one interpreter run.

mod blocks;
mod call_stack;
mod environment;

use std::any::Any;
use std::path::PathBuf;
use std::rc::Rc;

use rustc_hash::FxHashMap;

use wisp_lexer::LexerCollection;
use wisp_value::{assign_to_constant, ErrorCategory, ScriptError, Variable};

use crate::label::LabelTable;
use crate::print_handler::SharedPrintHandler;
use crate::registry::Registry;

pub use blocks::{BlockStack, BlockState};
pub use call_stack::{CallFrame, CallStack};
pub use environment::{Environment, ScopeId, ScopeRef};

/// State of one label invocation, saved across a nested call.
pub(crate) struct FrameState {
    exit: bool,
    blocks: BlockStack,
    ignore_endifs: usize,
    return_value: Variable,
    line: usize,
}

/// Everything a builtin, operator or probe may read or change.
///
/// Created by the interpreter and reused across runs. Per-call state
/// (`exit`, `blocks`, `ignore_endifs`, `return_value`) is saved before a
/// nested `call(...)` and restored after it.
pub struct ExecutionContext {
    /// Global line of the statement being executed.
    pub line: usize,
    /// Set by `return`, `exit` and the first error; stops the statement loop.
    pub exit: bool,
    pub blocks: BlockStack,
    pub env: Environment,
    /// Write-once bindings from `@const` blocks.
    pub constants: FxHashMap<String, Variable>,
    pub labels: Rc<LabelTable>,
    /// Directory of the running script, for extensions that resolve paths.
    pub parent_path: PathBuf,
    /// Pending `endif`s to swallow instead of popping a block.
    pub ignore_endifs: usize,
    pub return_value: Variable,
    /// Message of the last failure; empty means no error.
    pub error_msg: String,
    /// `error_msg` is already formatted and must not get a line prefix.
    pub raw_error: bool,
    pub call_stack: CallStack,
    storage: FxHashMap<String, Box<dyn Any>>,
    registry: Rc<Registry>,
    print: SharedPrintHandler,
}

impl ExecutionContext {
    pub fn new(registry: Registry, print: SharedPrintHandler, max_call_depth: Option<usize>) -> Self {
        ExecutionContext {
            line: 0,
            exit: false,
            blocks: BlockStack::new(),
            env: Environment::new(),
            constants: FxHashMap::default(),
            labels: Rc::new(LabelTable::default()),
            parent_path: PathBuf::new(),
            ignore_endifs: 0,
            return_value: Variable::null(),
            error_msg: String::new(),
            raw_error: false,
            call_stack: CallStack::new(max_call_depth),
            storage: FxHashMap::default(),
            registry: Rc::new(registry),
            print,
        }
    }

    #[inline]
    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// Shared handle to the registry, for holding it across calls that
    /// need `&mut self`.
    #[inline]
    pub fn registry_rc(&self) -> Rc<Registry> {
        Rc::clone(&self.registry)
    }

    /// Copy-on-write access to the registry.
    pub fn registry_mut(&mut self) -> &mut Registry {
        Rc::make_mut(&mut self.registry)
    }

    pub fn replace_registry(&mut self, registry: Registry) {
        self.registry = Rc::new(registry);
    }

    #[inline]
    pub fn lexers(&self) -> &LexerCollection {
        self.registry.lexers()
    }

    pub fn print_handler(&self) -> &SharedPrintHandler {
        &self.print
    }

    pub fn set_print_handler(&mut self, print: SharedPrintHandler) {
        self.print = print;
    }

    pub fn print(&self, msg: &str) {
        self.print.print(msg);
    }

    pub fn println(&self, msg: &str) {
        self.print.println(msg);
    }

    /// Value of `name` in the current scope, falling back to constants.
    pub fn variable(&self, name: &str) -> Option<&Variable> {
        self.env.lookup(name).or_else(|| self.constants.get(name))
    }

    #[inline]
    pub fn is_constant(&self, name: &str) -> bool {
        self.constants.contains_key(name)
    }

    /// Bind `name` in the current scope. Constants cannot be shadowed.
    pub fn assign(&mut self, name: &str, value: Variable) -> Result<(), ScriptError> {
        if self.is_constant(name) {
            return Err(assign_to_constant(name));
        }
        self.env.define(name, value);
        Ok(())
    }

    /// Bind a constant. Redefinition is an error.
    pub fn define_constant(&mut self, name: &str, value: Variable) -> Result<(), ScriptError> {
        if self.is_constant(name) {
            return Err(assign_to_constant(name));
        }
        self.constants.insert(name.to_string(), value);
        Ok(())
    }

    /// Name of the innermost active label.
    pub fn current_label(&self) -> Option<&str> {
        self.call_stack
            .current_frame()
            .map(|frame| frame.label.as_str())
    }

    /// Translate a global line into a line relative to the current label.
    pub fn to_local_line(&self, global: usize) -> Option<usize> {
        let label = self.labels.get(self.current_label()?)?;
        label.to_local_line(global)
    }

    pub fn to_global_line(&self, local: usize) -> Option<usize> {
        let label = self.labels.get(self.current_label()?)?;
        label.to_global_line(local)
    }

    /// Report a failure from native code.
    ///
    /// The engine picks the message up as soon as the builtin or operator
    /// returns and aborts the statement.
    pub fn fail(&mut self, message: impl Into<String>) {
        self.error_msg = message.into();
        self.raw_error = false;
    }

    /// Like [`fail`](Self::fail), but the message is shown without a line.
    pub fn fail_raw(&mut self, message: impl Into<String>) {
        self.error_msg = message.into();
        self.raw_error = true;
    }

    /// Take a failure reported through [`fail`](Self::fail), if any.
    pub(crate) fn take_native_error(&mut self) -> Option<ScriptError> {
        if self.error_msg.is_empty() {
            return None;
        }
        let message = std::mem::take(&mut self.error_msg);
        let raw = std::mem::replace(&mut self.raw_error, false);
        Some(if raw {
            ScriptError::Raw(message)
        } else {
            ScriptError::custom(ErrorCategory::Type, message)
        })
    }

    /// Record `err` as the result of the outermost run.
    pub(crate) fn record_error(&mut self, err: &ScriptError) {
        self.error_msg = err.to_string();
        self.raw_error = err.is_raw();
        self.exit = true;
    }

    pub fn storage<T: Any>(&self, key: &str) -> Option<&T> {
        self.storage.get(key)?.downcast_ref::<T>()
    }

    pub fn storage_mut<T: Any>(&mut self, key: &str) -> Option<&mut T> {
        self.storage.get_mut(key)?.downcast_mut::<T>()
    }

    /// Run `f` on the storage under `key`, starting from `T::default()`
    /// if the slot is missing or holds another type.
    pub fn with_storage<T: Any + Default, R>(
        &mut self,
        key: &str,
        f: impl FnOnce(&mut T) -> R,
    ) -> R {
        let mut value = match self.storage.remove(key).map(|slot| slot.downcast::<T>()) {
            Some(Ok(value)) => value,
            Some(Err(_)) | None => Box::<T>::default(),
        };
        let result = f(&mut *value);
        self.storage.insert(key.to_string(), value);
        result
    }

    pub fn insert_storage<T: Any>(&mut self, key: impl Into<String>, value: T) {
        self.storage.insert(key.into(), Box::new(value));
    }

    pub fn remove_storage(&mut self, key: &str) -> Option<Box<dyn Any>> {
        self.storage.remove(key)
    }

    /// Save per-call state and start a fresh frame.
    pub(crate) fn enter_frame(&mut self) -> FrameState {
        FrameState {
            exit: std::mem::replace(&mut self.exit, false),
            blocks: std::mem::take(&mut self.blocks),
            ignore_endifs: std::mem::replace(&mut self.ignore_endifs, 0),
            return_value: std::mem::take(&mut self.return_value),
            line: self.line,
        }
    }

    /// Restore the caller's frame, handing back the callee's return value.
    pub(crate) fn leave_frame(&mut self, saved: FrameState) -> Variable {
        self.exit = saved.exit;
        self.blocks = saved.blocks;
        self.ignore_endifs = saved.ignore_endifs;
        self.line = saved.line;
        std::mem::replace(&mut self.return_value, saved.return_value)
    }

    /// Reset per-run state before the host starts a new run.
    pub fn reset_run_state(&mut self) {
        self.line = 0;
        self.exit = false;
        self.blocks.clear();
        self.ignore_endifs = 0;
        self.return_value = Variable::null();
        self.error_msg.clear();
        self.raw_error = false;
        self.call_stack.clear();
        self.env.unwind();
    }

    /// Forget labels, constants, variables and extension storage.
    pub fn clear(&mut self) {
        self.reset_run_state();
        self.env.clear();
        self.constants.clear();
        self.labels = Rc::new(LabelTable::default());
        self.storage.clear();
    }
}

#[cfg(test)]
mod tests;
