//! The `eval` command: evaluate one expression and print its value.

use wisp_eval::{stdout_handler, Interpreter};

use super::bake_extensions;

pub fn eval_expression(expression: &str, extensions: &[String]) {
    let mut interp = Interpreter::builder().print_handler(stdout_handler()).build();
    if let Err(msg) = bake_extensions(&mut interp, extensions) {
        eprintln!("error: {msg}");
        std::process::exit(1);
    }
    match interp.expression(expression).into_result() {
        Ok(value) => println!("{}", value.literal()),
        Err(err) => {
            eprintln!("error: {err}");
            std::process::exit(1);
        }
    }
}
