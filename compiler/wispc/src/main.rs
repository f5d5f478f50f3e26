//! Wisp CLI

use wispc::commands::{eval_expression, lex_file, run_file, RunOptions};

fn main() {
    wispc::init_tracing();

    let args: Vec<String> = std::env::args().collect();

    if args.len() < 2 {
        print_usage();
        return;
    }

    match args[1].as_str() {
        "run" => {
            let options = match RunOptions::parse(&args[2..]) {
                Ok(options) => options,
                Err(msg) => {
                    eprintln!("error: {msg}");
                    eprintln!("Usage: wisp run <file.wisp> [label] [args..] [--ext list,ref]");
                    std::process::exit(1);
                }
            };
            run_file(&options);
        }
        "eval" => {
            let mut expression = None;
            let mut extensions = Vec::new();
            let mut rest = args.iter().skip(2);
            while let Some(arg) = rest.next() {
                if arg == "--ext" {
                    if let Some(names) = rest.next() {
                        extensions.extend(names.split(',').map(str::to_string));
                    }
                } else if expression.is_none() {
                    expression = Some(arg.as_str());
                }
            }
            let Some(expression) = expression else {
                eprintln!("Usage: wisp eval <expression> [--ext list,ref]");
                std::process::exit(1);
            };
            eval_expression(expression, &extensions);
        }
        "lex" => {
            if args.len() < 3 {
                eprintln!("Usage: wisp lex <file.wisp>");
                std::process::exit(1);
            }
            lex_file(&args[2]);
        }
        "help" | "--help" | "-h" => print_usage(),
        other => {
            eprintln!("error: unknown command '{other}'");
            print_usage();
            std::process::exit(1);
        }
    }
}

fn print_usage() {
    println!("Wisp - an embeddable scripting language");
    println!();
    println!("Usage: wisp <command> [options]");
    println!();
    println!("Commands:");
    println!("  run <file> [label] [args..]   Run a label of a script (default: main)");
    println!("  eval <expression>             Evaluate one expression and print it");
    println!("  lex <file>                    Show the script's token stream");
    println!();
    println!("Options:");
    println!("  --ext list,ref                Load sample extensions");
    println!();
    println!("Set RUST_LOG=wisp_eval=debug to trace label calls.");
}
