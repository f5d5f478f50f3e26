//! Where `echo` and `echoln` write to.
//!
//! The host picks a destination when building the interpreter:
//! - `Stdout`: the process's standard output (default)
//! - `Buffer`: an in-memory event log, for embedding and tests
//! - `Silent`: discards everything
//!
//! Enum dispatch keeps the hot path free of vtable calls.

use std::sync::Arc;

use parking_lot::Mutex;

/// One call to `print` or `println`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OutputEvent {
    pub text: String,
    pub newline: bool,
}

/// Writes to stdout.
#[derive(Default)]
pub struct StdoutPrintHandler;

impl StdoutPrintHandler {
    pub fn println(&self, msg: &str) {
        println!("{msg}");
    }

    pub fn print(&self, msg: &str) {
        print!("{msg}");
    }
}

/// Records every output event.
#[derive(Default)]
pub struct BufferPrintHandler {
    events: Mutex<Vec<OutputEvent>>,
}

impl BufferPrintHandler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn println(&self, msg: &str) {
        self.push(msg, true);
    }

    pub fn print(&self, msg: &str) {
        self.push(msg, false);
    }

    fn push(&self, msg: &str, newline: bool) {
        self.events.lock().push(OutputEvent {
            text: msg.to_string(),
            newline,
        });
    }

    /// Everything written so far, as it would have appeared on a terminal.
    pub fn get_output(&self) -> String {
        let events = self.events.lock();
        let mut out = String::new();
        for event in events.iter() {
            out.push_str(&event.text);
            if event.newline {
                out.push('\n');
            }
        }
        out
    }

    pub fn events(&self) -> Vec<OutputEvent> {
        self.events.lock().clone()
    }

    pub fn clear(&self) {
        self.events.lock().clear();
    }
}

pub enum PrintHandlerImpl {
    Stdout(StdoutPrintHandler),
    Buffer(BufferPrintHandler),
    Silent,
}

impl PrintHandlerImpl {
    pub fn println(&self, msg: &str) {
        match self {
            Self::Stdout(h) => h.println(msg),
            Self::Buffer(h) => h.println(msg),
            Self::Silent => {}
        }
    }

    pub fn print(&self, msg: &str) {
        match self {
            Self::Stdout(h) => h.print(msg),
            Self::Buffer(h) => h.print(msg),
            Self::Silent => {}
        }
    }

    /// Captured output; empty for handlers that don't capture.
    pub fn get_output(&self) -> String {
        match self {
            Self::Buffer(h) => h.get_output(),
            Self::Stdout(_) | Self::Silent => String::new(),
        }
    }

    /// Captured output events; empty for handlers that don't capture.
    pub fn events(&self) -> Vec<OutputEvent> {
        match self {
            Self::Buffer(h) => h.events(),
            Self::Stdout(_) | Self::Silent => Vec::new(),
        }
    }

    pub fn clear(&self) {
        if let Self::Buffer(h) = self {
            h.clear();
        }
    }
}

/// Print handler shared between the host and the interpreter.
pub type SharedPrintHandler = Arc<PrintHandlerImpl>;

pub fn stdout_handler() -> SharedPrintHandler {
    Arc::new(PrintHandlerImpl::Stdout(StdoutPrintHandler))
}

pub fn buffer_handler() -> SharedPrintHandler {
    Arc::new(PrintHandlerImpl::Buffer(BufferPrintHandler::new()))
}

pub fn silent_handler() -> SharedPrintHandler {
    Arc::new(PrintHandlerImpl::Silent)
}

#[cfg(test)]
#[expect(clippy::unwrap_used, reason = "Tests use unwrap for brevity")]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn buffer_records_one_event_per_call() {
        let handler = BufferPrintHandler::new();
        handler.print("hello");
        handler.println(" world");
        assert_eq!(
            handler.events(),
            vec![
                OutputEvent {
                    text: "hello".into(),
                    newline: false
                },
                OutputEvent {
                    text: " world".into(),
                    newline: true
                },
            ]
        );
        assert_eq!(handler.get_output(), "hello world\n");
    }

    #[test]
    fn buffer_clear_empties_log() {
        let handler = buffer_handler();
        handler.println("x");
        handler.clear();
        assert!(handler.events().is_empty());
        assert_eq!(handler.get_output(), "");
    }

    #[test]
    fn silent_and_stdout_capture_nothing() {
        let silent = silent_handler();
        silent.println("hello");
        assert!(silent.events().is_empty());
        assert_eq!(stdout_handler().get_output(), "");
    }

    #[test]
    fn buffer_handler_is_thread_safe() {
        use std::thread;

        let handler = buffer_handler();
        let other = Arc::clone(&handler);
        let worker = thread::spawn(move || {
            for _ in 0..50 {
                other.println("a");
            }
        });
        for _ in 0..50 {
            handler.println("b");
        }
        worker.join().unwrap();
        assert_eq!(handler.events().len(), 100);
    }
}
