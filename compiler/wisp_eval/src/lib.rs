//! Wisp Eval - the language engine.
//!
//! Pipeline: [`preprocess`] turns source into [`Label`]s, [`run_label`]
//! executes a label's statements, and each expression goes through
//! [`evaluate`], which asks the [`Registry`] for operators, builtins and
//! literal probes. The [`Interpreter`] facade ties these together for hosts.
//!
//! # Extending
//!
//! Everything the language knows beyond labels and statements lives in the
//! registry: builtins (`echoln`, `call`, ...), raw builtins (`if`, `else`,
//! `endif`), operator overloads, literal probes and text macros. Hosts add
//! entries one by one or bake an [`Extension`] bundle; registry snapshots
//! can be saved and restored by integer id.
//!
//! # Errors
//!
//! Components return `Result<_, ScriptError>` and propagate with `?`. The
//! first failing statement stops its label and every caller up to the
//! host. Native code may also report a failure by calling
//! [`ExecutionContext::fail`]; the engine checks for it after every native
//! call.

mod builtins;
mod context;
mod eval;
mod exec;
mod extension;
mod interpreter;
mod label;
mod literal;
mod operators;
mod preprocess;
mod print_handler;
mod registry;

pub use context::{
    BlockState, BlockStack, CallFrame, CallStack, Environment, ExecutionContext, ScopeId, ScopeRef,
};
pub use eval::{call_named, evaluate, evaluate_arguments, evaluate_tokens};
pub use exec::run_label;
pub use extension::{Extension, ExtensionFactory};
pub use interpreter::{Completion, Interpreter, InterpreterBuilder, MAIN_LABEL};
pub use label::{Label, LabelTable, Statement};
pub use literal::{default_probes, is_identifier, parse_number, recognize};
pub use preprocess::{expand_macros, preprocess, CONST_BLOCK};
pub use print_handler::{
    buffer_handler, silent_handler, stdout_handler, BufferPrintHandler, OutputEvent,
    PrintHandlerImpl, SharedPrintHandler, StdoutPrintHandler,
};
pub use registry::{
    Arity, Builtin, BuiltinFn, Fixity, Operator, OperatorFn, Probe, ProbeFn, RawBuiltin, RawBuiltinFn,
    Registry,
};

#[cfg(test)]
mod tests;
