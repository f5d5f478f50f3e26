//! CLI command implementations.

mod eval;
mod lex;
mod run;

pub use eval::eval_expression;
pub use lex::lex_file;
pub use run::run_file;

use wisp_eval::{parse_number, Interpreter};
use wisp_value::Variable;

/// Options of `wisp run`.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RunOptions {
    pub path: String,
    /// Label to run; `main` if absent.
    pub label: Option<String>,
    pub args: Vec<Variable>,
    /// Sample extensions to bake before preprocessing.
    pub extensions: Vec<String>,
}

impl RunOptions {
    /// Parse `<file> [label] [args..] [--ext list,ref]`.
    pub fn parse(args: &[String]) -> Result<Self, String> {
        let mut options = RunOptions::default();
        let mut positional = Vec::new();
        let mut i = 0;
        while i < args.len() {
            let arg = &args[i];
            if arg == "--ext" {
                let Some(names) = args.get(i + 1) else {
                    return Err("missing extension list after --ext".to_string());
                };
                options.extensions.extend(split_names(names));
                i += 2;
                continue;
            }
            if let Some(names) = arg.strip_prefix("--ext=") {
                options.extensions.extend(split_names(names));
            } else {
                positional.push(arg.as_str());
            }
            i += 1;
        }

        let mut positional = positional.into_iter();
        let Some(path) = positional.next() else {
            return Err("missing file path".to_string());
        };
        options.path = path.to_string();
        options.label = positional.next().map(str::to_string);
        options.args = positional.map(script_argument).collect();
        Ok(options)
    }
}

fn split_names(names: &str) -> impl Iterator<Item = String> + '_ {
    names
        .split(',')
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .map(str::to_string)
}

/// Command-line argument as a script value: a Number if it reads as one,
/// otherwise a String.
pub fn script_argument(text: &str) -> Variable {
    match parse_number(text) {
        Some(n) => Variable::number(n),
        None => Variable::string(text),
    }
}

/// Bake the named sample extensions into `interp`.
pub fn bake_extensions(interp: &mut Interpreter, names: &[String]) -> Result<(), String> {
    for name in names {
        let Some(factory) = wisp_ext::factory(name) else {
            return Err(format!(
                "unknown extension '{name}' (available: {})",
                wisp_ext::EXTENSION_NAMES.join(", ")
            ));
        };
        if let Some(err) = interp.bake_factory(factory).error() {
            return Err(format!("cannot load extension '{name}': {err}"));
        }
    }
    Ok(())
}

pub(crate) fn read_file(path: &str) -> String {
    match std::fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) => {
            let msg = match e.kind() {
                std::io::ErrorKind::NotFound => format!("cannot find file '{path}'"),
                std::io::ErrorKind::PermissionDenied => {
                    format!("permission denied reading '{path}'")
                }
                std::io::ErrorKind::InvalidData => {
                    format!("'{path}' contains invalid UTF-8 data")
                }
                _ => format!("error reading '{path}': {e}"),
            };
            eprintln!("{msg}");
            std::process::exit(1);
        }
    }
}

#[cfg(test)]
mod tests;
