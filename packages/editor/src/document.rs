//! # Document Session
//!
//! A `Document` is one editing session over a choice-text tree: the
//! current tree, its history, and the views derived from it.
//!
//! ## Lifecycle
//!
//! ```text
//! Source → Parse → Edit ⇄ Undo/Redo
//!   ↓        ↓       ↓
//! text     tree   canonical text + variation count
//! ```
//!
//! Every successful change records the replaced tree in the
//! [`UndoStack`], bumps [`Document::version`] and refreshes the cached
//! canonical source and variation count. A rejected change leaves the
//! document exactly as it was.

use crate::config::EditorConfig;
use crate::mutations::{self, Direction, Mutation, MutationResult};
use crate::path::Path;
use crate::undo_stack::UndoStack;
use crate::EditorError;
use choicetext_evaluator::{Renderer, VariationCount, VariationCounter};
use choicetext_parser::{parse_with_options, serialize, Node, NodeRef, ParseError};
use rand::Rng;
use std::sync::Arc;

/// Editable choice-text document
#[derive(Debug)]
pub struct Document {
    /// Current version number (increments on each recorded change)
    pub version: u64,

    tree: NodeRef,
    history: UndoStack,
    config: EditorConfig,
    counter: VariationCounter,

    /// Canonical text of `tree`
    source: String,

    variations: VariationCount,

    /// Recovery diagnostics from the last parse; undo, redo and clear reset them
    diagnostics: Vec<ParseError>,
}

impl Document {
    /// Empty document with default configuration
    pub fn new() -> Self {
        Self::with_config(EditorConfig::default())
    }

    pub fn with_config(config: EditorConfig) -> Self {
        Self::from_tree(Node::empty_root(), config)
    }

    pub fn from_source(source: &str) -> Self {
        Self::from_source_with_config(source, EditorConfig::default())
    }

    pub fn from_source_with_config(source: &str, config: EditorConfig) -> Self {
        let output = parse_with_options(source, config.parse_options());
        let mut doc = Self::from_tree(output.root, config);
        doc.diagnostics = output.diagnostics;
        doc
    }

    fn from_tree(root: Node, config: EditorConfig) -> Self {
        let tree = Arc::new(root);
        let counter = config.counter();

        Self {
            version: 0,
            source: serialize(&tree),
            variations: counter.count(&tree),
            history: UndoStack::with_max_levels(config.history_limit),
            diagnostics: Vec::new(),
            tree,
            config,
            counter,
        }
    }

    pub fn tree(&self) -> &NodeRef {
        &self.tree
    }

    /// Canonical text of the current tree
    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn variations(&self) -> VariationCount {
        self.variations
    }

    pub fn diagnostics(&self) -> &[ParseError] {
        &self.diagnostics
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    pub fn history(&self) -> &UndoStack {
        &self.history
    }

    pub fn render_random(&self) -> String {
        choicetext_evaluator::render_random(&self.tree)
    }

    /// Render with a caller-supplied generator
    pub fn render_with<R: Rng>(&self, rng: &mut R) -> String {
        Renderer::new(rng).render(&self.tree)
    }

    /// Apply a mutation with validation
    pub fn apply(&mut self, mutation: &Mutation) -> Result<MutationResult, EditorError> {
        let next = mutation.apply(&self.tree)?;
        Ok(self.commit(next, Some(mutation.name().to_string())))
    }

    pub fn update(&mut self, path: &Path, node: Node) -> Result<MutationResult, EditorError> {
        let next = mutations::update(&self.tree, path, node)?;
        Ok(self.commit(next, Some("update".to_string())))
    }

    pub fn update_with<F>(&mut self, path: &Path, updater: F) -> Result<MutationResult, EditorError>
    where
        F: FnOnce(Option<&Node>) -> Option<Node>,
    {
        let next = mutations::update_with(&self.tree, path, updater)?;
        Ok(self.commit(next, Some("update".to_string())))
    }

    pub fn insert(&mut self, path: &Path, node: Node) -> Result<MutationResult, EditorError> {
        let next = mutations::insert(&self.tree, path, node)?;
        Ok(self.commit(next, Some("insert".to_string())))
    }

    pub fn delete(&mut self, path: &Path) -> Result<MutationResult, EditorError> {
        let next = mutations::delete(&self.tree, path)?;
        Ok(self.commit(next, Some("delete".to_string())))
    }

    pub fn move_up(&mut self, path: &Path) -> Result<MutationResult, EditorError> {
        let next = mutations::move_node(&self.tree, path, Direction::Up)?;
        Ok(self.commit(next, Some("moveUp".to_string())))
    }

    pub fn move_down(&mut self, path: &Path) -> Result<MutationResult, EditorError> {
        let next = mutations::move_node(&self.tree, path, Direction::Down)?;
        Ok(self.commit(next, Some("moveDown".to_string())))
    }

    /// Re-parse `source` as a single undoable change
    pub fn replace_source(&mut self, source: &str) -> MutationResult {
        let output = parse_with_options(source, self.config.parse_options());
        self.diagnostics = output.diagnostics;
        self.commit(Arc::new(output.root), Some("replaceSource".to_string()))
    }

    /// Replace the tree with an empty root (undoable)
    pub fn clear_all(&mut self) -> MutationResult {
        self.diagnostics.clear();
        self.commit(Arc::new(Node::empty_root()), Some("clearAll".to_string()))
    }

    /// Group the following changes into one undo step
    pub fn begin_batch(&mut self, description: impl Into<String>) {
        self.history.begin_batch();
        self.history.set_batch_description(description);
    }

    pub fn end_batch(&mut self) {
        self.history.end_batch();
    }

    /// Returns false when there is nothing to undo
    pub fn undo(&mut self) -> bool {
        match self.history.undo(&self.tree) {
            Some(previous) => {
                self.restore(previous);
                true
            }
            None => false,
        }
    }

    /// Returns false when there is nothing to redo
    pub fn redo(&mut self) -> bool {
        match self.history.redo(&self.tree) {
            Some(next) => {
                self.restore(next);
                true
            }
            None => false,
        }
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    fn commit(&mut self, next: NodeRef, description: Option<String>) -> MutationResult {
        if Arc::ptr_eq(&next, &self.tree) {
            return MutationResult {
                version: self.version,
                changed: false,
            };
        }

        let before = std::mem::replace(&mut self.tree, next);
        self.history.record(before, description);
        self.version += 1;
        self.refresh();

        MutationResult {
            version: self.version,
            changed: true,
        }
    }

    fn restore(&mut self, tree: NodeRef) {
        self.tree = tree;
        self.diagnostics.clear();
        self.version += 1;
        self.refresh();
    }

    fn refresh(&mut self) {
        self.source = serialize(&self.tree);
        self.variations = self.counter.count(&self.tree);
        tracing::debug!(
            version = self.version,
            variations = %self.variations,
            "document updated"
        );
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_from_source() {
        let doc = Document::from_source("Hello {world|there}!");
        assert_eq!(doc.source(), "Hello {world|there}!");
        assert_eq!(doc.variations(), VariationCount::Finite(2));
        assert_eq!(doc.version, 0);
        assert!(doc.diagnostics().is_empty());
        assert!(!doc.can_undo());
    }

    #[test]
    fn test_diagnostics_are_kept() {
        let doc = Document::from_source("{a|b");
        assert_eq!(doc.source(), "{a|b}");
        assert_eq!(doc.diagnostics().len(), 1);
    }

    #[test]
    fn test_diagnostics_follow_history() {
        let mut doc = Document::from_source("{a|b}");
        doc.replace_source("x {c");
        assert_eq!(doc.diagnostics().len(), 1);

        assert!(doc.undo());
        assert_eq!(doc.source(), "{a|b}");
        assert!(doc.diagnostics().is_empty());

        assert!(doc.redo());
        assert_eq!(doc.source(), "x {c}");
        assert!(doc.diagnostics().is_empty());

        let mut recovered = Document::from_source("{a|b");
        recovered.clear_all();
        assert!(recovered.diagnostics().is_empty());
    }

    #[test]
    fn test_apply_updates_caches() {
        let mut doc = Document::from_source("{a|b}");
        let result = doc
            .insert(&Path::from_indices(&[0, 2]), Node::option("c"))
            .unwrap();

        assert_eq!(result, MutationResult { version: 1, changed: true });
        assert_eq!(doc.source(), "{a|b|c}");
        assert_eq!(doc.variations(), VariationCount::Finite(3));
    }

    #[test]
    fn test_rejected_change_leaves_document_alone() {
        let mut doc = Document::from_source("{a|b}");
        let before = Arc::clone(doc.tree());

        let err = doc
            .insert(&Path::from_indices(&[0, 0]), Node::text("x"))
            .unwrap_err();
        assert!(matches!(err, EditorError::Mutation(_)));
        assert!(Arc::ptr_eq(doc.tree(), &before));
        assert_eq!(doc.version, 0);
        assert!(!doc.can_undo());
    }

    #[test]
    fn test_boundary_move_is_not_recorded() {
        let mut doc = Document::from_source("{a|b}");
        let result = doc.move_up(&Path::from_indices(&[0, 0])).unwrap();

        assert!(!result.changed);
        assert_eq!(doc.version, 0);
        assert!(!doc.can_undo());
    }

    #[test]
    fn test_clear_all_is_undoable() {
        let mut doc = Document::from_source("Hello {world|there}!");
        doc.clear_all();
        assert_eq!(doc.source(), "");
        assert_eq!(doc.variations(), VariationCount::Finite(1));

        assert!(doc.undo());
        assert_eq!(doc.source(), "Hello {world|there}!");
    }

    #[test]
    fn test_history_limit_from_config() {
        let config = EditorConfig {
            history_limit: 2,
            ..EditorConfig::default()
        };
        let mut doc = Document::from_source_with_config("x", config);
        for text in ["a", "b", "c", "d"] {
            doc.replace_source(text);
        }

        assert!(doc.undo());
        assert!(doc.undo());
        assert!(!doc.undo());
        assert_eq!(doc.source(), "b");
    }

    #[test]
    fn test_seeded_render() {
        let doc = Document::from_source("{a|b|c} {x|y}");
        let mut first = StdRng::seed_from_u64(3);
        let mut second = StdRng::seed_from_u64(3);
        assert_eq!(doc.render_with(&mut first), doc.render_with(&mut second));
    }

    #[test]
    fn test_variation_ceiling_from_config() {
        let config = EditorConfig {
            variation_ceiling: 4,
            ..EditorConfig::default()
        };
        let doc = Document::from_source_with_config("{a|b} {c|d} {e|f}", config);
        assert_eq!(doc.variations(), VariationCount::Overflow);
    }
}
