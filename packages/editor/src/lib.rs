//! # Choicetext Editor
//!
//! Editing engine for choice-text trees.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │ parser: choice text → tree                  │
//! └─────────────────────────────────────────────┘
//!                     ↓
//! ┌─────────────────────────────────────────────┐
//! │ editor: Document session + mutations        │
//! │  - Address nodes by path                    │
//! │  - Copy-on-write edits with validation      │
//! │  - Bounded undo/redo of tree snapshots      │
//! └─────────────────────────────────────────────┘
//!                     ↓
//! ┌─────────────────────────────────────────────┐
//! │ evaluator: counts and random renderings     │
//! └─────────────────────────────────────────────┘
//! ```
//!
//! ## Core Principles
//!
//! 1. **Trees are immutable**: an edit returns a new root and shares every
//!    untouched subtree with the old one
//! 2. **Paths, not pointers**: a [`Path`] is plain data and can be replayed
//!    against any snapshot
//! 3. **Rejected edits change nothing**: failures come back as
//!    [`MutationError`] and the current tree stays as it was
//!
//! ## Usage
//!
//! ```rust,ignore
//! use choicetext_editor::{Document, Mutation, Path};
//! use choicetext_parser::Node;
//!
//! let mut doc = Document::from_source("Hello {world|there}!");
//!
//! doc.apply(&Mutation::Insert {
//!     path: Path::from_indices(&[1, 2]),
//!     node: Node::option("friend"),
//! })?;
//! assert_eq!(doc.source(), "Hello {world|there|friend}!");
//!
//! doc.undo();
//! assert_eq!(doc.source(), "Hello {world|there}!");
//! ```

mod config;
mod document;
mod errors;
mod mutations;
mod path;
mod undo_stack;

pub use config::EditorConfig;
pub use document::Document;
pub use errors::EditorError;
pub use mutations::{
    delete, insert, move_node, update, update_with, Direction, Mutation, MutationError,
    MutationResult,
};
pub use path::{resolve, resolve_node, Path, PathError, PathSegment, CHILDREN_FIELD};
pub use undo_stack::{Snapshot, UndoStack, DEFAULT_MAX_LEVELS};
