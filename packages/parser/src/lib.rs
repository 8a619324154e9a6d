//! # Choicetext Parser
//!
//! Choice text is literal text interleaved with `{option|option|...}`
//! alternation blocks, nested to any depth:
//!
//! ```text
//! Hello {world|there {friend|pal}}!
//! ```
//!
//! This crate turns that text into a [`Node`] tree and back. Parsing never
//! fails; malformed input is repaired and the repairs are reported as
//! [`ParseError`] diagnostics next to the tree.

pub mod ast;
pub mod error;
pub mod parser;
pub mod serializer;
pub mod validate;

#[cfg(test)]
mod tests_serializer;

pub use ast::{Node, NodeKind, NodeRef};
pub use error::ParseError;
pub use parser::{
    normalize, parse, parse_with_diagnostics, parse_with_options, ParseOptions, ParseOutput,
    Parser, DEFAULT_MAX_DEPTH,
};
pub use serializer::{serialize, serialize_opt, Serializer};
pub use validate::{validate, StructureError};
