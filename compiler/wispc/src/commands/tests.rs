#![allow(clippy::unwrap_used, reason = "Tests use unwrap for brevity")]

use super::*;
use pretty_assertions::assert_eq;
use wisp_eval::silent_handler;

fn strings(args: &[&str]) -> Vec<String> {
    args.iter().map(ToString::to_string).collect()
}

#[test]
fn run_options() {
    let options = RunOptions::parse(&strings(&["add.wisp", "add", "5", "x", "--ext", "list,ref"]))
        .unwrap();
    assert_eq!(
        options,
        RunOptions {
            path: "add.wisp".to_string(),
            label: Some("add".to_string()),
            args: vec![Variable::from(5), Variable::from("x")],
            extensions: strings(&["list", "ref"]),
        }
    );
}

#[test]
fn run_options_defaults_and_errors() {
    let options = RunOptions::parse(&strings(&["--ext=list", "main.wisp"])).unwrap();
    assert_eq!(options.path, "main.wisp");
    assert_eq!(options.label, None);
    assert_eq!(options.extensions, strings(&["list"]));

    assert!(RunOptions::parse(&[]).is_err());
    assert!(RunOptions::parse(&strings(&["a.wisp", "--ext"])).is_err());
}

#[test]
fn arguments_become_numbers_when_they_can() {
    assert_eq!(script_argument("-2.5"), Variable::from(-2.5));
    assert_eq!(script_argument("2x"), Variable::from("2x"));
    assert_eq!(script_argument(""), Variable::from(""));
}

#[test]
fn unknown_extension() {
    let mut interp = Interpreter::builder().print_handler(silent_handler()).build();
    assert!(bake_extensions(&mut interp, &strings(&["list"])).is_ok());
    let err = bake_extensions(&mut interp, &strings(&["matrix"])).unwrap_err();
    assert!(err.contains("matrix"));
    assert!(err.contains("list, ref"));
}
