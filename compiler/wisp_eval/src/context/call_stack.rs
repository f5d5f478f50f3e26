//! Active label calls.

use wisp_value::ScriptError;

/// One active label call.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CallFrame {
    pub label: String,
    /// Global line of the statement that made the call; 0 for host calls.
    pub call_line: usize,
}

/// Stack of active label calls, innermost last.
///
/// Each `call(...)` pushes a frame and pops it on return. The depth check
/// is part of `push()`, so an optional limit turns runaway recursion into
/// a script error instead of stack exhaustion.
#[derive(Clone, Debug, Default)]
pub struct CallStack {
    frames: Vec<CallFrame>,
    max_depth: Option<usize>,
}

impl CallStack {
    /// `max_depth` is `None` for unlimited.
    pub fn new(max_depth: Option<usize>) -> Self {
        CallStack {
            frames: Vec::new(),
            max_depth,
        }
    }

    /// Push a frame. On overflow the frame is not pushed.
    pub fn push(&mut self, frame: CallFrame) -> Result<(), ScriptError> {
        if let Some(limit) = self.max_depth {
            if self.frames.len() >= limit {
                return Err(ScriptError::CallDepthExceeded { limit });
            }
        }
        self.frames.push(frame);
        Ok(())
    }

    pub fn pop(&mut self) {
        debug_assert!(!self.frames.is_empty(), "CallStack::pop() on empty stack");
        self.frames.pop();
    }

    #[inline]
    pub fn depth(&self) -> usize {
        self.frames.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    #[inline]
    pub fn max_depth(&self) -> Option<usize> {
        self.max_depth
    }

    #[inline]
    pub fn current_frame(&self) -> Option<&CallFrame> {
        self.frames.last()
    }

    /// Label names, outermost first.
    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.frames.iter().map(|frame| frame.label.as_str())
    }

    pub fn clear(&mut self) {
        self.frames.clear();
    }
}
