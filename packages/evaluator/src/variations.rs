//! # Variation Counter
//!
//! Counts the distinct renderings of a tree:
//!
//! - text → 1
//! - option, root → product of the children's counts (empty → 1)
//! - choice → sum of the options' counts (no options → 1)
//!
//! Counting stops as soon as any partial result passes the ceiling, and
//! [`VariationCount::Overflow`] propagates to every ancestor without the
//! remaining siblings being visited.

use choicetext_parser::Node;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Largest count reported exactly by default
pub const DEFAULT_VARIATION_CEILING: u64 = 1_000_000;

/// Number of renderings, or a marker that the ceiling was passed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum VariationCount {
    Finite(u64),
    Overflow,
}

impl VariationCount {
    pub fn is_overflow(&self) -> bool {
        matches!(self, VariationCount::Overflow)
    }

    pub fn finite(&self) -> Option<u64> {
        match self {
            VariationCount::Finite(n) => Some(*n),
            VariationCount::Overflow => None,
        }
    }
}

impl fmt::Display for VariationCount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VariationCount::Finite(n) => write!(f, "{}", n),
            VariationCount::Overflow => f.write_str("overflow"),
        }
    }
}

/// Variation counter with a configurable safety ceiling
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VariationCounter {
    ceiling: u64,
}

impl VariationCounter {
    pub fn new() -> Self {
        Self::with_ceiling(DEFAULT_VARIATION_CEILING)
    }

    /// Counter that reports overflow above `ceiling` (at least 1)
    pub fn with_ceiling(ceiling: u64) -> Self {
        Self {
            ceiling: ceiling.max(1),
        }
    }

    pub fn ceiling(&self) -> u64 {
        self.ceiling
    }

    pub fn count(&self, node: &Node) -> VariationCount {
        match self.count_node(node) {
            Some(n) => VariationCount::Finite(n),
            None => VariationCount::Overflow,
        }
    }

    // `None` means the ceiling was passed somewhere in the subtree
    fn count_node(&self, node: &Node) -> Option<u64> {
        match node {
            Node::Text { .. } => Some(1),
            Node::Option { children, .. } | Node::Root { children } => {
                let mut total = 1u64;
                for child in children {
                    let count = self.count_node(child)?;
                    total = self.within_ceiling(total.checked_mul(count))?;
                }
                Some(total)
            }
            Node::Choice { children } => {
                if children.is_empty() {
                    return Some(1);
                }

                let mut total = 0u64;
                for option in children {
                    let count = self.count_node(option)?;
                    total = self.within_ceiling(total.checked_add(count))?;
                }
                Some(total)
            }
        }
    }

    fn within_ceiling(&self, value: Option<u64>) -> Option<u64> {
        match value {
            Some(v) if v <= self.ceiling => Some(v),
            _ => {
                tracing::trace!("variation count passed ceiling {}", self.ceiling);
                None
            }
        }
    }
}

impl Default for VariationCounter {
    fn default() -> Self {
        Self::new()
    }
}

/// Count variations with the default ceiling
pub fn count_variations(node: &Node) -> VariationCount {
    VariationCounter::new().count(node)
}
