/// Round-trip tests: parse → serialize → parse must be stable
use crate::*;

fn assert_roundtrip(source: &str) {
    let tree = parse(source);
    let serialized = serialize(&tree);
    let reparsed = parse(&serialized);

    assert_eq!(tree, reparsed, "tree changed after round-trip of {:?}", source);
    assert_eq!(
        serialized,
        serialize(&reparsed),
        "text changed after round-trip of {:?}",
        source
    );
}

#[test]
fn test_roundtrip_reproduces_canonical_text() {
    let sources = vec![
        "Hello {world|there}!",
        "{A|B|C}",
        "{a {x|y}|b}",
        "plain text only",
        "{a|b} {c|d} {e|f}",
        "start {one {two {three|3}|2}|1} end",
        "{only}",
        "{|}",
    ];

    for source in sources {
        assert_eq!(serialize(&parse(source)), source);
        assert_roundtrip(source);
    }
}

#[test]
fn test_roundtrip_canonicalizes_whitespace() {
    let source = "  { a | b\n} ";
    let serialized = serialize(&parse(source));

    assert_eq!(serialized, "{a|b}");
    assert_roundtrip(source);
}

#[test]
fn test_roundtrip_of_recovered_trees() {
    let sources = vec!["{a|b", "x {a|{b|c", "a} {b|c}", "abc {", "a {} b", "{{p|q} {r|s}|z}"];

    for source in sources {
        assert_roundtrip(source);
    }
}

#[test]
fn test_roundtrip_escapes() {
    let source = r"costs \{5\} {a\|b|c}";
    assert_eq!(serialize(&parse(source)), source);
    assert_roundtrip(source);
}

#[test]
fn test_unescaped_pipe_in_text_does_not_roundtrip_into_choice() {
    // A bare pipe outside braces is plain text and stays that way
    let source = "a|b {c|d}";
    assert_eq!(serialize(&parse(source)), source);
    assert_roundtrip(source);
}

#[test]
fn test_text_with_braces_changes_shape() {
    // Text nodes are written verbatim, so literal braces become syntax
    let tree = Node::root(vec![Node::text("{x|y}")]);
    let reparsed = parse(&serialize(&tree));

    assert_ne!(tree, reparsed);
    assert_eq!(reparsed.children().unwrap()[0].kind(), NodeKind::Choice);
}

#[test]
fn test_empty_choice_reparses_as_one_empty_option() {
    let tree = Node::root(vec![Node::text("a"), Node::choice(vec![]), Node::text("b")]);
    let serialized = serialize(&tree);

    assert_eq!(serialized, "a{}b");
    let reparsed = parse(&serialized);
    assert_eq!(
        reparsed,
        Node::root(vec![
            Node::text("a"),
            Node::choice(vec![Node::option("")]),
            Node::text("b"),
        ])
    );
    assert_eq!(serialize(&reparsed), serialized);
}

#[test]
fn test_roundtrip_of_empty_braces_at_the_edges() {
    for source in ["{} tail", "head {}", "{}", "{} {}"] {
        assert_eq!(serialize(&parse(source)), source);
        assert_roundtrip(source);
    }

    assert_eq!(
        parse("{} tail"),
        Node::root(vec![Node::choice(vec![Node::option("")]), Node::text(" tail")])
    );
}

#[test]
fn test_second_pass_is_a_fixed_point() {
    // Recovery may reshape the first tree, but its canonical text is stable
    let sources = [
        "{{",
        "{|{",
        "{a{",
        "{\\",
        "}{",
        "{}}",
        "a{b}c}d{e",
        "{{{}}}",
        "{a {p|q} {r|s}|z}",
        "abc {",
    ];

    for source in sources {
        let once = serialize(&parse(source));
        let tree = parse(&once);
        let twice = serialize(&tree);

        assert_eq!(parse(&twice), tree, "source: {:?}", source);
        assert_eq!(serialize(&parse(&twice)), twice, "source: {:?}", source);
    }
}
