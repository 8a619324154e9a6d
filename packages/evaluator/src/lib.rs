//! # Choicetext Evaluator
//!
//! Read-only queries over a parsed choice-text tree.
//!
//! ## Variation counting
//!
//! [`count_variations`] reports how many distinct renderings a tree has.
//! Sequences (roots and option children) multiply, choices add, and an empty
//! choice still renders one way. Counting is bounded by a ceiling
//! ([`DEFAULT_VARIATION_CEILING`] unless configured); past it the result is
//! [`VariationCount::Overflow`], which is an expected outcome, not an error.
//!
//! ## Rendering
//!
//! [`Renderer`] draws one rendering by picking an option uniformly at each
//! choice. Inject a seeded generator for reproducible output.
//!
//! ## Enumeration
//!
//! [`enumerate_variations`] lists every rendering when the count is small.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use choicetext_evaluator::{count_variations, render_seeded};
//! use choicetext_parser::parse;
//!
//! let tree = parse("Hello {world|there}!");
//! assert_eq!(count_variations(&tree).finite(), Some(2));
//! println!("{}", render_seeded(&tree, 42));
//! ```

pub mod enumerate;
pub mod renderer;
pub mod variations;

pub use enumerate::{enumerate_variations, EnumerateError};
pub use renderer::{render_random, render_seeded, Renderer};
pub use variations::{
    count_variations, VariationCount, VariationCounter, DEFAULT_VARIATION_CEILING,
};
