//! Property checks over randomly generated choice text
//!
//! Trees come from a seeded generator so failures are reproducible.

use choicetext_evaluator::{count_variations, enumerate_variations, Renderer, VariationCount};
use choicetext_parser::{parse, serialize, Node};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::collections::HashSet;

const WORDS: &[&str] = &["alpha", "beta ", " gamma", "d e", "x", "Hello, ", "!"];

fn gen_sequence(rng: &mut StdRng, depth: usize) -> String {
    let parts = rng.gen_range(1..4);
    let mut out = String::new();

    for _ in 0..parts {
        if depth < 3 && rng.gen_bool(0.5) {
            out.push_str(&gen_choice(rng, depth));
        } else {
            out.push_str(WORDS[rng.gen_range(0..WORDS.len())]);
        }
    }

    out
}

fn gen_choice(rng: &mut StdRng, depth: usize) -> String {
    let options = rng.gen_range(1..4);
    let rendered: Vec<String> = (0..options)
        .map(|_| {
            if options > 1 && rng.gen_bool(0.1) {
                String::new()
            } else {
                gen_sequence(rng, depth + 1)
            }
        })
        .collect();

    format!("{{{}}}", rendered.join("|"))
}

fn samples(count: usize) -> Vec<String> {
    let mut rng = StdRng::seed_from_u64(0x5eed);
    (0..count).map(|_| gen_sequence(&mut rng, 0)).collect()
}

fn product_of_children(node: &Node) -> Option<u64> {
    node.children()
        .unwrap()
        .iter()
        .try_fold(1u64, |acc, child| {
            count_variations(child).finite().and_then(|c| acc.checked_mul(c))
        })
}

#[test]
fn test_counts_are_positive_or_overflow() {
    for source in samples(200) {
        match count_variations(&parse(&source)) {
            VariationCount::Finite(n) => assert!(n >= 1, "source: {:?}", source),
            VariationCount::Overflow => {}
        }
    }
}

#[test]
fn test_root_count_is_product_of_children() {
    for source in samples(200) {
        let tree = parse(&source);
        if let VariationCount::Finite(n) = count_variations(&tree) {
            assert_eq!(Some(n), product_of_children(&tree), "source: {:?}", source);
        }
    }
}

#[test]
fn test_choice_count_is_sum_of_options() {
    for source in samples(200) {
        let tree = parse(&source);
        for child in tree.children().unwrap() {
            if let Node::Choice { children } = child.as_ref() {
                let sum: Option<u64> = children
                    .iter()
                    .map(|option| count_variations(option).finite())
                    .sum();
                if let (Some(sum), Some(count)) = (sum, count_variations(child).finite()) {
                    assert_eq!(sum, count, "source: {:?}", source);
                }
            }
        }
    }
}

#[test]
fn test_roundtrip_is_stable() {
    for source in samples(300) {
        let tree = parse(&source);
        let reparsed = parse(&serialize(&tree));
        assert_eq!(tree, reparsed, "source: {:?}", source);
    }
}

#[test]
fn test_random_samples_are_variations() {
    let mut renderer = Renderer::seeded(99);

    for source in samples(100) {
        let tree = parse(&source);
        let Ok(all) = enumerate_variations(&tree, 2_000) else {
            continue;
        };
        let all: HashSet<String> = all.into_iter().collect();

        for _ in 0..20 {
            let sample = renderer.render(&tree);
            assert!(all.contains(&sample), "{:?} not a variation of {:?}", sample, source);
        }
    }
}
