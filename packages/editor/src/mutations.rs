//! # Tree Mutations
//!
//! Pure edit operations on a choice-text tree.
//!
//! Every operation borrows the current root and returns a new one. Only the
//! chain of ancestors from the root down to the edited position is rebuilt;
//! every other subtree is shared with the input through its [`NodeRef`].
//! The input tree is never modified, so on failure the caller simply keeps
//! using what it already has.
//!
//! ## Constraints
//!
//! - A choice only ever holds options; roots and options hold text and choices
//! - The root can be replaced, but only by another root
//! - The root cannot be deleted
//! - Insert clamps its index into `[0, len]` instead of failing
//! - Moving a node past either end of its siblings is a no-op

use crate::path::{resolve_indices, Path, PathError};
use choicetext_parser::{validate, Node, NodeKind, NodeRef, StructureError};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use thiserror::Error;

/// Scriptable edit operations
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "camelCase")]
pub enum Mutation {
    /// Replace the node at `path`
    Update { path: Path, node: Node },

    /// Remove the node at `path` from its parent
    Delete { path: Path },

    /// Insert `node` into the parent of `path`, at its last index (clamped)
    Insert { path: Path, node: Node },

    /// Swap with the previous sibling
    MoveUp { path: Path },

    /// Swap with the next sibling
    MoveDown { path: Path },
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MutationError {
    #[error("Node not found: {0}")]
    NotFound(Path),

    #[error("Invalid path: {0}")]
    InvalidPath(#[from] PathError),

    #[error("Cannot delete the root")]
    CannotDeleteRoot,

    #[error("Cannot insert at the root position")]
    CannotInsertRoot,

    #[error("The root can only be replaced by a root, not a {0}")]
    RootReplacement(NodeKind),

    #[error("Node at {0} has no children")]
    NotAContainer(Path),

    #[error("Index {index} out of range for {len} children")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("{child} cannot be a child of {parent}")]
    InvalidChild { parent: NodeKind, child: NodeKind },

    #[error("Invalid structure: {0}")]
    InvalidStructure(#[from] StructureError),

    #[error("Update aborted")]
    Aborted,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Direction {
    Up,
    Down,
}

/// Outcome of a mutation applied through a [`crate::Document`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MutationResult {
    /// Document version after the mutation
    pub version: u64,

    /// False when the mutation left the tree as it was (e.g. a boundary move)
    pub changed: bool,
}

impl Mutation {
    pub fn name(&self) -> &'static str {
        match self {
            Mutation::Update { .. } => "update",
            Mutation::Delete { .. } => "delete",
            Mutation::Insert { .. } => "insert",
            Mutation::MoveUp { .. } => "moveUp",
            Mutation::MoveDown { .. } => "moveDown",
        }
    }

    pub fn path(&self) -> &Path {
        match self {
            Mutation::Update { path, .. }
            | Mutation::Delete { path }
            | Mutation::Insert { path, .. }
            | Mutation::MoveUp { path }
            | Mutation::MoveDown { path } => path,
        }
    }

    /// Apply to `root`, returning the new root
    pub fn apply(&self, root: &NodeRef) -> Result<NodeRef, MutationError> {
        self.validate(root)?;

        let result = match self {
            Mutation::Update { path, node } => update(root, path, node.clone()),
            Mutation::Delete { path } => delete(root, path),
            Mutation::Insert { path, node } => insert(root, path, node.clone()),
            Mutation::MoveUp { path } => move_node(root, path, Direction::Up),
            Mutation::MoveDown { path } => move_node(root, path, Direction::Down),
        };

        match &result {
            Ok(_) => tracing::debug!(op = self.name(), path = %self.path(), "applied mutation"),
            Err(e) => tracing::debug!(op = self.name(), path = %self.path(), error = %e, "rejected mutation"),
        }

        result
    }

    /// Check the mutation against `root` without building anything
    pub fn validate(&self, root: &Node) -> Result<(), MutationError> {
        let path = self.path();
        let indices = path.indices()?;

        match self {
            Mutation::Update { node, .. } => {
                validate(node)?;
                if indices.is_empty() && !node.is_root() {
                    return Err(MutationError::RootReplacement(node.kind()));
                }
                require_node(root, &indices, path)
            }
            Mutation::Delete { .. } => {
                if indices.is_empty() {
                    return Err(MutationError::CannotDeleteRoot);
                }
                require_node(root, &indices, path)
            }
            Mutation::Insert { node, .. } => {
                validate(node)?;
                let Some((_, parent)) = indices.split_last() else {
                    return Err(MutationError::CannotInsertRoot);
                };
                require_node(root, parent, path)
            }
            Mutation::MoveUp { .. } | Mutation::MoveDown { .. } => {
                require_node(root, &indices, path)
            }
        }
    }
}

fn require_node(root: &Node, indices: &[usize], path: &Path) -> Result<(), MutationError> {
    let found = indices
        .iter()
        .try_fold(root, |node, &index| node.children()?.get(index).map(|c| c.as_ref()));

    match found {
        Some(_) => Ok(()),
        None => Err(MutationError::NotFound(path.clone())),
    }
}

/// Replace the node at `path` with `replacement`
pub fn update(root: &NodeRef, path: &Path, replacement: Node) -> Result<NodeRef, MutationError> {
    update_with(root, path, move |_| Some(replacement))
}

/// Replace the node at `path` with whatever `updater` returns.
///
/// The updater sees the current node, or `None` when the path does not
/// resolve. Returning `None` aborts the update.
pub fn update_with<F>(root: &NodeRef, path: &Path, updater: F) -> Result<NodeRef, MutationError>
where
    F: FnOnce(Option<&Node>) -> Option<Node>,
{
    let indices = path.indices();
    let current = indices
        .as_ref()
        .ok()
        .and_then(|indices| resolve_indices(root, indices));

    let replacement = updater(current.map(|node| node.as_ref())).ok_or(MutationError::Aborted)?;
    let indices = indices?;
    if current.is_none() {
        return Err(MutationError::NotFound(path.clone()));
    }

    validate(&replacement)?;

    let Some((&last, parent)) = indices.split_last() else {
        if !replacement.is_root() {
            return Err(MutationError::RootReplacement(replacement.kind()));
        }
        return Ok(Arc::new(replacement));
    };

    rebuild_at(root, parent, &Path::from_indices(parent), |container, children| {
        check_child(container, replacement.kind())?;
        let len = children.len();
        let slot = children
            .get_mut(last)
            .ok_or(MutationError::IndexOutOfRange { index: last, len })?;
        *slot = Arc::new(replacement);
        Ok(())
    })
}

/// Remove the node at `path` from its parent
pub fn delete(root: &NodeRef, path: &Path) -> Result<NodeRef, MutationError> {
    if path.len() <= 1 {
        return Err(MutationError::CannotDeleteRoot);
    }

    let indices = path.indices()?;
    let Some((&last, parent)) = indices.split_last() else {
        return Err(MutationError::CannotDeleteRoot);
    };

    rebuild_at(root, parent, &Path::from_indices(parent), |_, children| {
        if last >= children.len() {
            return Err(MutationError::IndexOutOfRange {
                index: last,
                len: children.len(),
            });
        }
        children.remove(last);
        Ok(())
    })
}

/// Insert `node` into the children of `path`'s parent.
///
/// The last index of `path` is the insertion point, clamped to the
/// current number of children.
pub fn insert(root: &NodeRef, path: &Path, node: Node) -> Result<NodeRef, MutationError> {
    validate(&node)?;
    insert_shared(root, path, Arc::new(node))
}

fn insert_shared(root: &NodeRef, path: &Path, node: NodeRef) -> Result<NodeRef, MutationError> {
    let indices = path.indices()?;
    let Some((&index, parent)) = indices.split_last() else {
        return Err(MutationError::CannotInsertRoot);
    };

    rebuild_at(root, parent, &Path::from_indices(parent), |container, children| {
        check_child(container, node.kind())?;
        let index = index.min(children.len());
        children.insert(index, node);
        Ok(())
    })
}

/// Swap the node at `path` with its neighbour in `direction`.
///
/// At the boundary (or for the root) the input root is returned as is.
pub fn move_node(
    root: &NodeRef,
    path: &Path,
    direction: Direction,
) -> Result<NodeRef, MutationError> {
    let indices = path.indices()?;
    let Some((&index, parent)) = indices.split_last() else {
        return Ok(Arc::clone(root));
    };

    let node = resolve_indices(root, &indices)
        .ok_or_else(|| MutationError::NotFound(path.clone()))?;
    let siblings = resolve_indices(root, parent)
        .and_then(|container| container.children())
        .map_or(0, |children| children.len());

    let target = match direction {
        Direction::Up => index.checked_sub(1),
        Direction::Down => Some(index + 1).filter(|&next| next < siblings),
    };
    let Some(target) = target else {
        return Ok(Arc::clone(root));
    };

    let node = Arc::clone(node);
    let without = delete(root, path)?;
    insert_shared(&without, &Path::from_indices(parent).child(target), node)
}

fn check_child(container: &Node, child: NodeKind) -> Result<(), MutationError> {
    if container.kind().accepts(child) {
        Ok(())
    } else {
        Err(MutationError::InvalidChild {
            parent: container.kind(),
            child,
        })
    }
}

/// Rebuild the ancestor chain down to the container at `steps`, letting
/// `edit` change a copy of that container's children.
fn rebuild_at<F>(
    node: &NodeRef,
    steps: &[usize],
    container_path: &Path,
    edit: F,
) -> Result<NodeRef, MutationError>
where
    F: FnOnce(&Node, &mut Vec<NodeRef>) -> Result<(), MutationError>,
{
    let Some(children) = node.children() else {
        return Err(match steps {
            [] => MutationError::NotAContainer(container_path.clone()),
            _ => MutationError::NotFound(container_path.clone()),
        });
    };

    let mut children = children.to_vec();

    match steps.split_first() {
        None => edit(node, &mut children)?,
        Some((&index, rest)) => {
            let child = children
                .get_mut(index)
                .ok_or_else(|| MutationError::NotFound(container_path.clone()))?;
            *child = rebuild_at(child, rest, container_path, edit)?;
        }
    }

    node.with_children(children)
        .map(Arc::new)
        .ok_or_else(|| MutationError::NotAContainer(container_path.clone()))
}
