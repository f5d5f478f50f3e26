//! The `run` command: preprocess a script and run one of its labels.

use std::path::Path;

use tracing::debug;

use wisp_eval::{stdout_handler, Interpreter, MAIN_LABEL};

use super::{bake_extensions, read_file, RunOptions};

/// Run the script described by `options`, exiting with status 1 on any
/// script error.
pub fn run_file(options: &RunOptions) {
    let source = read_file(&options.path);
    let parent = Path::new(&options.path)
        .parent()
        .unwrap_or_else(|| Path::new("."));
    let mut interp = Interpreter::builder()
        .print_handler(stdout_handler())
        .parent_path(parent)
        .build();

    if let Err(msg) = bake_extensions(&mut interp, &options.extensions) {
        eprintln!("error: {msg}");
        std::process::exit(1);
    }

    if let Some(err) = interp.preprocess(&source).error() {
        eprintln!("error in '{}': {err}", options.path);
        std::process::exit(1);
    }

    let label = options.label.as_deref().unwrap_or(MAIN_LABEL);
    debug!(path = %options.path, label, args = options.args.len(), "running script");
    let done = interp.run_label(label, options.args.clone());
    if let Some(err) = done.error() {
        eprintln!("error in '{}': {err}", options.path);
        std::process::exit(1);
    }
}
