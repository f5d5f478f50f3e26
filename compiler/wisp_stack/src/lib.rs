//! Stack growth guard for the Wisp interpreter.
//!
//! Expression evaluation is a tree recursion over token runs and every
//! `call(...)` re-enters the statement loop of another label. Both paths
//! wrap their recursive step in [`ensure_sufficient_stack`], so nesting
//! depth is limited by memory rather than by the host thread's stack size.
//!
//! Runaway recursion in a script is still fatal: the guard only moves the
//! point of exhaustion, it does not turn it into a script error. Hosts that
//! need a recoverable limit configure a maximum call depth on the
//! interpreter instead.
//!
//! # Platform Support
//!
//! - **Native targets**: grows the stack on demand through `stacker`.
//! - **WASM targets**: plain passthrough.

/// Remaining stack below which a new segment is allocated (128KB).
const RED_ZONE: usize = 128 * 1024;

/// Size of each freshly allocated stack segment (2MB).
///
/// A label call costs several evaluator frames (statement, expression,
/// operator split, builtin dispatch), so segments are sized generously.
const SEGMENT_SIZE: usize = 2 * 1024 * 1024;

/// Run `f`, first growing the stack if less than the red zone remains.
///
/// ```text
/// fn eval_run(tokens: &[Token], ctx: &mut ExecutionContext) -> EvalResult {
///     ensure_sufficient_stack(|| {
///         // split at the operator, recurse into both sides
///     })
/// }
/// ```
#[inline]
#[cfg(not(target_arch = "wasm32"))]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    stacker::maybe_grow(RED_ZONE, SEGMENT_SIZE, f)
}

/// WASM version, calls `f` directly.
#[inline]
#[cfg(target_arch = "wasm32")]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    f()
}
