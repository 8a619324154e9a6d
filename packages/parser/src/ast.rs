use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

/// Shared handle to a node.
///
/// Trees are persistent: an edit rebuilds only the ancestor chain of the
/// edited node and every untouched subtree is shared between snapshots.
pub type NodeRef = Arc<Node>;

/// Choice-text tree node
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Node {
    /// Literal text
    Text { content: String },

    /// One alternative of a choice: a literal prefix followed by children
    Option {
        content: String,
        #[serde(default)]
        children: Vec<NodeRef>,
    },

    /// Mutually exclusive alternatives (children are always options)
    Choice {
        #[serde(default)]
        children: Vec<NodeRef>,
    },

    /// Top-level sequence
    Root {
        #[serde(default)]
        children: Vec<NodeRef>,
    },
}

/// Field-less discriminant of [`Node`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NodeKind {
    Text,
    Option,
    Choice,
    Root,
}

impl NodeKind {
    /// Whether a node of this kind may hold a child of kind `child`
    pub fn accepts(self, child: NodeKind) -> bool {
        match self {
            NodeKind::Root | NodeKind::Option => {
                matches!(child, NodeKind::Text | NodeKind::Choice)
            }
            NodeKind::Choice => child == NodeKind::Option,
            NodeKind::Text => false,
        }
    }

    /// Whether nodes of this kind have a children list
    pub fn is_container(self) -> bool {
        !matches!(self, NodeKind::Text)
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            NodeKind::Text => "text",
            NodeKind::Option => "option",
            NodeKind::Choice => "choice",
            NodeKind::Root => "root",
        };
        f.write_str(name)
    }
}

impl Node {
    pub fn text(content: impl Into<String>) -> Self {
        Node::Text {
            content: content.into(),
        }
    }

    /// Option with literal content and no children
    pub fn option(content: impl Into<String>) -> Self {
        Node::Option {
            content: content.into(),
            children: Vec::new(),
        }
    }

    pub fn option_with(content: impl Into<String>, children: Vec<Node>) -> Self {
        Node::Option {
            content: content.into(),
            children: children.into_iter().map(Arc::new).collect(),
        }
    }

    pub fn choice(options: Vec<Node>) -> Self {
        Node::Choice {
            children: options.into_iter().map(Arc::new).collect(),
        }
    }

    pub fn root(children: Vec<Node>) -> Self {
        Node::Root {
            children: children.into_iter().map(Arc::new).collect(),
        }
    }

    pub fn empty_root() -> Self {
        Node::Root {
            children: Vec::new(),
        }
    }

    pub fn kind(&self) -> NodeKind {
        match self {
            Node::Text { .. } => NodeKind::Text,
            Node::Option { .. } => NodeKind::Option,
            Node::Choice { .. } => NodeKind::Choice,
            Node::Root { .. } => NodeKind::Root,
        }
    }

    pub fn is_root(&self) -> bool {
        matches!(self, Node::Root { .. })
    }

    /// Literal content of text and option nodes
    pub fn content(&self) -> Option<&str> {
        match self {
            Node::Text { content } | Node::Option { content, .. } => Some(content.as_str()),
            Node::Choice { .. } | Node::Root { .. } => None,
        }
    }

    /// Children list, or `None` for text nodes
    pub fn children(&self) -> Option<&[NodeRef]> {
        match self {
            Node::Option { children, .. }
            | Node::Choice { children }
            | Node::Root { children } => Some(children.as_slice()),
            Node::Text { .. } => None,
        }
    }

    /// Copy of this node with its children list replaced.
    ///
    /// Returns `None` for text nodes.
    pub fn with_children(&self, children: Vec<NodeRef>) -> Option<Node> {
        match self {
            Node::Text { .. } => None,
            Node::Option { content, .. } => Some(Node::Option {
                content: content.clone(),
                children,
            }),
            Node::Choice { .. } => Some(Node::Choice { children }),
            Node::Root { .. } => Some(Node::Root { children }),
        }
    }
}

impl Default for Node {
    fn default() -> Self {
        Self::empty_root()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_child_constraints() {
        assert!(NodeKind::Root.accepts(NodeKind::Text));
        assert!(NodeKind::Root.accepts(NodeKind::Choice));
        assert!(!NodeKind::Root.accepts(NodeKind::Option));
        assert!(!NodeKind::Root.accepts(NodeKind::Root));

        assert!(NodeKind::Option.accepts(NodeKind::Choice));
        assert!(!NodeKind::Option.accepts(NodeKind::Option));

        assert!(NodeKind::Choice.accepts(NodeKind::Option));
        assert!(!NodeKind::Choice.accepts(NodeKind::Text));
        assert!(!NodeKind::Choice.accepts(NodeKind::Choice));

        assert!(!NodeKind::Text.accepts(NodeKind::Text));
        assert!(!NodeKind::Text.is_container());
    }

    #[test]
    fn test_with_children_keeps_content() {
        let option = Node::option("prefix ");
        let rebuilt = option
            .with_children(vec![Arc::new(Node::text("tail"))])
            .unwrap();

        assert_eq!(rebuilt.content(), Some("prefix "));
        assert_eq!(rebuilt.children().unwrap().len(), 1);
        assert!(Node::text("x").with_children(vec![]).is_none());
    }

    #[test]
    fn test_json_shape() {
        let root = Node::root(vec![
            Node::text("Hi "),
            Node::choice(vec![Node::option("a"), Node::option("b")]),
        ]);

        let json = serde_json::to_value(&root).unwrap();
        assert_eq!(json["type"], "Root");
        assert_eq!(json["children"][1]["type"], "Choice");
        assert_eq!(json["children"][1]["children"][0]["content"], "a");

        let back: Node = serde_json::from_value(json).unwrap();
        assert_eq!(back, root);
    }
}
