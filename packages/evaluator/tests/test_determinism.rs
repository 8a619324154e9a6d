/// Determinism tests - counting and seeded rendering are reproducible
///
/// These tests validate that:
/// - Counting the same tree always yields the same result
/// - The same seed always yields the same sequence of renderings
/// - Enumeration order is stable

use choicetext_evaluator::{count_variations, enumerate_variations, Renderer};
use choicetext_parser::parse;

const SOURCE: &str = "{Good|Bad} {morning|evening {everyone|all}}, {dear|} {reader|visitor}!";

#[test]
fn test_count_determinism() {
    let tree = parse(SOURCE);
    let counts: Vec<_> = (0..10).map(|_| count_variations(&tree)).collect();

    for i in 1..counts.len() {
        assert_eq!(counts[0], counts[i], "Count {} differs from count 0", i);
    }
}

#[test]
fn test_seeded_render_determinism() {
    let tree = parse(SOURCE);
    let runs: Vec<Vec<String>> = (0..5)
        .map(|_| Renderer::seeded(2024).render_many(&tree, 50))
        .collect();

    for i in 1..runs.len() {
        assert_eq!(runs[0], runs[i], "Run {} differs from run 0", i);
    }
}

#[test]
fn test_enumeration_determinism() {
    let tree = parse(SOURCE);
    let first = enumerate_variations(&tree, 1_000).unwrap();
    let second = enumerate_variations(&parse(SOURCE), 1_000).unwrap();

    assert_eq!(first, second);
    assert_eq!(first[0], "Good morning, dear reader!");
}
