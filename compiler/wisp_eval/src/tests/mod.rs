//! End-to-end tests through the [`Interpreter`](crate::Interpreter) facade.

#![allow(clippy::unwrap_used, reason = "Tests use unwrap for brevity")]


use crate::{buffer_handler, Interpreter, SharedPrintHandler};

/// Interpreter capturing its output.
fn interpreter() -> (Interpreter, SharedPrintHandler) {
    let output = buffer_handler();
    let interp = Interpreter::builder().print_handler(output.clone()).build();
    (interp, output)
}
