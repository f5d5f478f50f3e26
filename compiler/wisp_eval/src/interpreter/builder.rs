//! `InterpreterBuilder` for creating interpreters with non-default settings.

use std::path::PathBuf;

use rustc_hash::FxHashMap;

use super::Interpreter;
use crate::context::ExecutionContext;
use crate::print_handler::{stdout_handler, SharedPrintHandler};
use crate::registry::Registry;

/// Builder for [`Interpreter`].
///
/// ```
/// use wisp_eval::{buffer_handler, Interpreter};
///
/// let output = buffer_handler();
/// let mut interp = Interpreter::builder()
///     .print_handler(output.clone())
///     .max_call_depth(64)
///     .build();
/// assert!(interp.eval(r#"echoln("hi")"#).is_ok());
/// assert_eq!(output.get_output(), "hi\n");
/// ```
#[derive(Default)]
pub struct InterpreterBuilder {
    print_handler: Option<SharedPrintHandler>,
    max_call_depth: Option<usize>,
    parent_path: Option<PathBuf>,
    empty_registry: bool,
}

impl InterpreterBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Where `echo`/`echoln` write. Default is stdout.
    #[must_use]
    pub fn print_handler(mut self, handler: SharedPrintHandler) -> Self {
        self.print_handler = Some(handler);
        self
    }

    /// Turn recursion deeper than `depth` label calls into an error.
    ///
    /// Unbounded by default.
    #[must_use]
    pub fn max_call_depth(mut self, depth: usize) -> Self {
        self.max_call_depth = Some(depth);
        self
    }

    /// Directory of the script being run.
    #[must_use]
    pub fn parent_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.parent_path = Some(path.into());
        self
    }

    /// Start without any builtins, operators, probes or macros.
    #[must_use]
    pub fn empty_registry(mut self) -> Self {
        self.empty_registry = true;
        self
    }

    pub fn build(self) -> Interpreter {
        let registry = if self.empty_registry {
            Registry::empty()
        } else {
            Registry::with_defaults()
        };
        let print = self.print_handler.unwrap_or_else(stdout_handler);
        let mut ctx = ExecutionContext::new(registry, print, self.max_call_depth);
        if let Some(path) = self.parent_path {
            ctx.parent_path = path;
        }
        Interpreter {
            ctx,
            snapshots: FxHashMap::default(),
            on_error: None,
        }
    }
}
