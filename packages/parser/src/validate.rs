//! Structural checks for trees built outside the parser.
//!
//! The parser only ever produces well-formed trees. Trees assembled by hand,
//! deserialized from JSON, or handed to the editor as replacement subtrees
//! are checked here against the child-kind rules of [`NodeKind::accepts`].

use crate::ast::{Node, NodeKind};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{child} cannot be a child of {parent} (at child path {path:?})")]
pub struct StructureError {
    pub parent: NodeKind,
    pub child: NodeKind,
    /// Child indices from the validated node down to the offending child
    pub path: Vec<usize>,
}

/// Check every parent/child pair in the subtree rooted at `node`
pub fn validate(node: &Node) -> Result<(), StructureError> {
    let mut path = Vec::new();
    validate_at(node, &mut path)
}

fn validate_at(node: &Node, path: &mut Vec<usize>) -> Result<(), StructureError> {
    let Some(children) = node.children() else {
        return Ok(());
    };

    for (i, child) in children.iter().enumerate() {
        path.push(i);

        if !node.kind().accepts(child.kind()) {
            return Err(StructureError {
                parent: node.kind(),
                child: child.kind(),
                path: path.clone(),
            });
        }

        validate_at(child, path)?;
        path.pop();
    }

    Ok(())
}
