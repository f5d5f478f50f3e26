use super::*;
use pretty_assertions::assert_eq;

fn noop() -> Operator {
    Operator::binary(5, |_, _, _| Ok(Variable::null()))
}

#[test]
fn defaults_are_installed() {
    let registry = Registry::with_defaults();
    for name in ["echo", "echoln", "return", "call", "exit", "typeof", "to_string", "to_number"] {
        assert!(registry.builtin(name).is_some(), "missing builtin {name}");
    }
    assert_eq!(registry.raw_builtin_names(), vec!["else", "endif", "if"]);
    let probes: Vec<&str> = registry.probes().iter().map(|p| p.name.as_str()).collect();
    assert_eq!(probes, vec!["string", "number", "null", "variable", "name"]);
}

#[test]
fn operators_append_per_token() {
    let mut registry = Registry::empty();
    registry.add_operator("<>", noop().operands("Number", "Number"));
    registry.add_operator("<>", noop());
    registry.add_operator("><", Operator::unary(2, |_, _, _| Ok(Variable::null())));
    assert_eq!(registry.operators("<>").len(), 2);
    assert_eq!(registry.operators("><").len(), 1);
    assert!(registry.operators("??").is_empty());
    assert_eq!(registry.priority("><", Fixity::Prefix), Some(2));
    assert_eq!(registry.priority("><", Fixity::Infix), None);
    assert_eq!(registry.priority("><", Fixity::Postfix), None);
}

#[test]
fn overloads_resolve_by_operand_type() {
    let mut registry = Registry::empty();
    registry.add_operator("+", noop().operands("Number", "Number"));
    registry.add_operator("+", Operator::binary(9, |_, _, _| Ok(Variable::null())).operands("String", "String"));
    let n = Variable::number(1.0);
    let s = Variable::string("a");
    assert_eq!(
        registry.resolve_operator("+", Fixity::Infix, &s, &s).map(|op| op.priority),
        Some(9)
    );
    assert_eq!(
        registry.resolve_operator("+", Fixity::Infix, &n, &n).map(|op| op.priority),
        Some(5)
    );
    assert!(registry.resolve_operator("+", Fixity::Infix, &n, &s).is_none());
    assert!(registry.resolve_operator("+", Fixity::Prefix, &n, &n).is_none());
}

#[test]
fn macros_replace_by_key_and_keep_order() {
    let mut registry = Registry::empty();
    registry.add_macro("PI", "3.14");
    registry.add_macro("E", "2.71");
    registry.add_macro("PI", "3.14159");
    assert_eq!(
        registry.macros(),
        &[
            ("PI".to_string(), "3.14159".to_string()),
            ("E".to_string(), "2.71".to_string())
        ]
    );
}

#[test]
fn probes_can_be_prepended() {
    let mut registry = Registry::empty();
    registry.add_probe(Probe::new("b", |_, _| Ok(None)));
    registry.add_probe(Probe::new("c", |_, _| Ok(None)));
    registry.prepend_probe(Probe::new("a", |_, _| Ok(None)));
    let names: Vec<&str> = registry.probes().iter().map(|p| p.name.as_str()).collect();
    assert_eq!(names, vec!["a", "b", "c"]);
}

#[test]
fn clones_are_independent_snapshots() {
    let mut live = Registry::with_defaults();
    let snapshot = live.clone();
    live.add_builtin("extra", Builtin::fixed(0, |_, _| Ok(Variable::null())));
    assert!(live.builtin("extra").is_some());
    assert!(snapshot.builtin("extra").is_none());
}
