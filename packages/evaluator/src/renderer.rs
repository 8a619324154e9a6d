//! # Random Renderer
//!
//! Draws one concrete rendering of a tree, picking an option uniformly at
//! every choice. The randomness source is injected so that callers (and
//! tests) can seed it; nothing is memoized between draws.

use choicetext_parser::Node;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Renders trees using the wrapped random number generator
#[derive(Debug, Clone)]
pub struct Renderer<R: Rng> {
    rng: R,
}

impl Renderer<StdRng> {
    /// Renderer whose output is reproducible for a given seed
    pub fn seeded(seed: u64) -> Self {
        Self::new(StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng> Renderer<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }

    /// Draw one rendering
    pub fn render(&mut self, node: &Node) -> String {
        let mut output = String::new();
        self.write_node(node, &mut output);
        output
    }

    /// Draw `count` independent renderings
    pub fn render_many(&mut self, node: &Node, count: usize) -> Vec<String> {
        (0..count).map(|_| self.render(node)).collect()
    }

    fn write_node(&mut self, node: &Node, output: &mut String) {
        match node {
            Node::Text { content } => output.push_str(content),
            Node::Option { content, children } => {
                output.push_str(content);
                for child in children {
                    self.write_node(child, output);
                }
            }
            Node::Choice { children } => {
                if children.is_empty() {
                    return;
                }
                let picked = self.rng.gen_range(0..children.len());
                self.write_node(&children[picked], output);
            }
            Node::Root { children } => {
                for child in children {
                    self.write_node(child, output);
                }
            }
        }
    }
}

/// Render with the thread-local random number generator
pub fn render_random(node: &Node) -> String {
    Renderer::new(rand::thread_rng()).render(node)
}

/// Render with a generator seeded from `seed`
pub fn render_seeded(node: &Node, seed: u64) -> String {
    Renderer::seeded(seed).render(node)
}
