#![allow(clippy::unwrap_used, reason = "Tests use unwrap for brevity")]

use super::*;
use crate::print_handler::silent_handler;
use crate::registry::Registry;
use pretty_assertions::assert_eq;
use wisp_value::{ErrorCategory, Variable};

fn context() -> ExecutionContext {
    ExecutionContext::new(Registry::with_defaults(), silent_handler(), None)
}

const SOURCE: &str = r#"
@const[
    the_answer = 12
    double = $the_answer * 2
]

@add[x,y]
    return($x + $y)

# multiplication by repeated addition
@mul[x, y]
    if($y is 1 or $y is 0)
        return($x)
    endif()
    return(call(mul,$x,$y - 1) + $x)

@main[] echoln("Hello, World!")
"#;

#[test]
fn labels_constants_and_statements() {
    let mut ctx = context();
    let labels = preprocess(SOURCE, &mut ctx).unwrap();

    let mut names: Vec<&str> = labels.keys().map(String::as_str).collect();
    names.sort_unstable();
    assert_eq!(names, vec!["add", "main", "mul"]);

    let add = &labels["add"];
    assert_eq!(add.params, vec!["x", "y"]);
    assert_eq!(add.line, 7);
    assert_eq!(add.statements.len(), 1);
    assert_eq!(add.statements[0].line, 8);
    assert_eq!(add.statements[0].text, "return($x + $y)");

    let mul = &labels["mul"];
    let lines: Vec<usize> = mul.statements.iter().map(|s| s.line).collect();
    assert_eq!(lines, vec![12, 13, 14, 15]);
    assert_eq!(mul.statements[0].text, "if($y is 1 or $y is 0)");

    let main = &labels["main"];
    assert!(main.params.is_empty());
    assert_eq!(main.statements[0].line, main.line);
    assert_eq!(main.statements[0].text, r#"echoln("Hello, World!")"#);

    assert_eq!(ctx.constants["the_answer"], Variable::number(12.0));
    assert_eq!(ctx.constants["double"], Variable::number(24.0));
}

#[test]
fn local_and_global_lines() {
    let mut ctx = context();
    let labels = preprocess(SOURCE, &mut ctx).unwrap();
    let mul = &labels["mul"];
    assert_eq!(mul.to_local_line(13), Some(3));
    assert_eq!(mul.to_global_line(3), Some(13));
    assert_eq!(mul.to_local_line(2), None);
}

#[test]
fn comments_are_dropped() {
    let mut ctx = context();
    let labels = preprocess("@main[]\n  echo(1) # trailing\n  # whole line\n  echo(\"#\")\n", &mut ctx).unwrap();
    let texts: Vec<&str> = labels["main"].statements.iter().map(|s| s.text.as_str()).collect();
    assert_eq!(texts, vec!["echo(1)", r##"echo("#")"##]);
}

#[test]
fn declaration_errors() {
    let cases = [
        "echoln(1)\n@main[]",
        "@main\n  echo(1)",
        "@f[a, a]",
        "@f[a, 2b]",
        "@[]",
    ];
    for source in cases {
        let err = preprocess(source, &mut context()).unwrap_err();
        assert_eq!(err.category(), ErrorCategory::Parse, "{source:?}");
    }
}

#[test]
fn duplicate_labels_are_binding_errors() {
    let err = preprocess("@main[]\n@other[]\n@main[]", &mut context()).unwrap_err();
    assert_eq!(
        err,
        ScriptError::DuplicateLabel {
            name: "main".to_string()
        }
    );
}

#[test]
fn constant_errors() {
    let err = preprocess("@const[\n  1 + 1\n]", &mut context()).unwrap_err();
    assert_eq!(err.line(), Some(2));

    let err = preprocess("@const[\n  a = 1\n]\n@const[\n  a = 2\n]", &mut context()).unwrap_err();
    assert_eq!(err.root(), &wisp_value::assign_to_constant("a"));
    assert_eq!(err.line(), Some(5));
}

#[test]
fn macros_expand_once_longest_first() {
    let macros = vec![
        ("PI".to_string(), "3.14".to_string()),
        ("PIE".to_string(), "\"pie\"".to_string()),
        ("A".to_string(), "AA".to_string()),
    ];
    assert_eq!(expand_macros("PIE PI A", &macros), "\"pie\" 3.14 AA");
    assert_eq!(expand_macros("no macros here", &[]), "no macros here");
}

#[test]
fn macros_apply_before_lexing() {
    let mut ctx = context();
    ctx.registry_mut().add_macro("say", "echoln");
    let labels = preprocess("@main[] say(1)", &mut ctx).unwrap();
    assert_eq!(labels["main"].statements[0].text, "echoln(1)");
}
