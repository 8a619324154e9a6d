//! # Undo/Redo History
//!
//! Linear history of whole-tree snapshots.
//!
//! Trees are persistent, so a snapshot is just a [`NodeRef`] to the
//! pre-mutation root. Nothing is copied and nothing needs inverting.
//!
//! - Every recorded change pushes the tree it replaced onto the undo stack
//! - A new change clears the redo stack
//! - Undo swaps the current tree with the most recent undo snapshot
//! - Redo does the same in the other direction
//! - Both stacks are bounded; the oldest entry is dropped first
//! - A batch folds several changes into a single undo step

use choicetext_parser::NodeRef;
use std::collections::VecDeque;

/// Default number of undo levels
pub const DEFAULT_MAX_LEVELS: usize = 50;

/// A tree as it was before a change
#[derive(Debug, Clone)]
pub struct Snapshot {
    pub tree: NodeRef,

    /// Optional description of the change
    pub description: Option<String>,
}

#[derive(Debug, Default)]
struct PendingBatch {
    before: Option<NodeRef>,
    description: Option<String>,
}

/// Undo/redo stacks for a single editing session
#[derive(Debug)]
pub struct UndoStack {
    /// Oldest first, most recent last
    undo_stack: VecDeque<Snapshot>,

    /// Oldest first, most recent last
    redo_stack: VecDeque<Snapshot>,

    /// Maximum number of levels per stack (0 = unlimited)
    max_levels: usize,

    current_batch: Option<PendingBatch>,
}

impl UndoStack {
    /// Create an undo stack with [`DEFAULT_MAX_LEVELS`]
    pub fn new() -> Self {
        Self::with_max_levels(DEFAULT_MAX_LEVELS)
    }

    pub fn with_max_levels(max_levels: usize) -> Self {
        Self {
            undo_stack: VecDeque::new(),
            redo_stack: VecDeque::new(),
            max_levels,
            current_batch: None,
        }
    }

    pub fn max_levels(&self) -> usize {
        self.max_levels
    }

    /// Record `before` as the tree replaced by a new change.
    ///
    /// Inside a batch only the first tree is kept; it is pushed on
    /// [`end_batch`](Self::end_batch).
    pub fn record(&mut self, before: NodeRef, description: Option<String>) {
        if let Some(batch) = &mut self.current_batch {
            if batch.before.is_none() {
                batch.before = Some(before);
            }
            if batch.description.is_none() {
                batch.description = description;
            }
            return;
        }

        self.push_undo(Snapshot {
            tree: before,
            description,
        });
    }

    /// Start grouping changes into one undo step
    pub fn begin_batch(&mut self) {
        if self.current_batch.is_none() {
            self.current_batch = Some(PendingBatch::default());
        }
    }

    /// Set description for current batch (if batching)
    pub fn set_batch_description(&mut self, description: impl Into<String>) {
        if let Some(batch) = &mut self.current_batch {
            batch.description = Some(description.into());
        }
    }

    /// Close the current batch. Empty batches leave no trace.
    pub fn end_batch(&mut self) {
        if let Some(PendingBatch {
            before: Some(tree),
            description,
        }) = self.current_batch.take()
        {
            self.push_undo(Snapshot { tree, description });
        }
    }

    fn push_undo(&mut self, snapshot: Snapshot) {
        push_bounded(&mut self.undo_stack, snapshot, self.max_levels);

        // A new change invalidates the redo line
        self.redo_stack.clear();
    }

    /// Step back. Returns the tree to restore, or `None` if there is no
    /// history. `current` becomes the redo target.
    pub fn undo(&mut self, current: &NodeRef) -> Option<NodeRef> {
        self.end_batch();

        let snapshot = self.undo_stack.pop_back()?;
        push_bounded(
            &mut self.redo_stack,
            Snapshot {
                tree: NodeRef::clone(current),
                description: snapshot.description.clone(),
            },
            self.max_levels,
        );

        tracing::trace!(
            undo_levels = self.undo_stack.len(),
            redo_levels = self.redo_stack.len(),
            "undo"
        );
        Some(snapshot.tree)
    }

    /// Step forward again after an undo
    pub fn redo(&mut self, current: &NodeRef) -> Option<NodeRef> {
        self.end_batch();

        let snapshot = self.redo_stack.pop_back()?;
        push_bounded(
            &mut self.undo_stack,
            Snapshot {
                tree: NodeRef::clone(current),
                description: snapshot.description.clone(),
            },
            self.max_levels,
        );

        tracing::trace!(
            undo_levels = self.undo_stack.len(),
            redo_levels = self.redo_stack.len(),
            "redo"
        );
        Some(snapshot.tree)
    }

    /// Check if undo is available
    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    /// Check if redo is available
    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    pub fn undo_levels(&self) -> usize {
        self.undo_stack.len()
    }

    pub fn redo_levels(&self) -> usize {
        self.redo_stack.len()
    }

    /// Undo snapshots, oldest first
    pub fn undo_snapshots(&self) -> impl Iterator<Item = &Snapshot> {
        self.undo_stack.iter()
    }

    /// Clear all undo/redo history
    pub fn clear(&mut self) {
        self.undo_stack.clear();
        self.redo_stack.clear();
        self.current_batch = None;
    }

    /// Get description of the next undo operation
    pub fn undo_description(&self) -> Option<&str> {
        self.undo_stack
            .back()
            .and_then(|snapshot| snapshot.description.as_deref())
    }

    /// Get description of the next redo operation
    pub fn redo_description(&self) -> Option<&str> {
        self.redo_stack
            .back()
            .and_then(|snapshot| snapshot.description.as_deref())
    }
}

impl Default for UndoStack {
    fn default() -> Self {
        Self::new()
    }
}

fn push_bounded(stack: &mut VecDeque<Snapshot>, snapshot: Snapshot, max_levels: usize) {
    stack.push_back(snapshot);
    if max_levels > 0 && stack.len() > max_levels {
        stack.pop_front();
    }
}
