use crate::ast::Node;

/// Canonical text for a choice with no options.
///
/// The parser reads `{}` back as a choice holding one empty option, which
/// renders the same way and counts as one variation.
pub const EMPTY_CHOICE: &str = "{}";

/// Serializer converts a tree back to choice text
///
/// Output is canonical: whitespace the parser trimmed from options is
/// gone, and every choice is braced even when it has a single option.
/// Literal `{`, `}` and `|` inside text are written as-is, so text holding
/// unescaped braces does not round-trip byte-for-byte.
#[derive(Debug, Default)]
pub struct Serializer {
    output: String,
}

impl Serializer {
    pub fn new() -> Self {
        Self {
            output: String::new(),
        }
    }

    /// Serialize a node (and its subtree) to choice text
    pub fn serialize(&mut self, node: &Node) -> String {
        self.output.clear();
        self.write_node(node);
        std::mem::take(&mut self.output)
    }

    fn write_node(&mut self, node: &Node) {
        match node {
            Node::Text { content } => self.output.push_str(content),
            Node::Option { content, children } => {
                self.output.push_str(content);
                for child in children {
                    self.write_node(child);
                }
            }
            Node::Choice { children } => {
                if children.is_empty() {
                    self.output.push_str(EMPTY_CHOICE);
                    return;
                }

                self.output.push('{');
                for (i, option) in children.iter().enumerate() {
                    if i > 0 {
                        self.output.push('|');
                    }
                    self.write_node(option);
                }
                self.output.push('}');
            }
            Node::Root { children } => {
                for child in children {
                    self.write_node(child);
                }
            }
        }
    }
}

/// Serialize a node to choice text
pub fn serialize(node: &Node) -> String {
    Serializer::new().serialize(node)
}

/// Serialize an optional node; an absent node is the empty string
pub fn serialize_opt(node: Option<&Node>) -> String {
    node.map(serialize).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serialize_each_kind() {
        assert_eq!(serialize(&Node::text("plain")), "plain");
        assert_eq!(serialize(&Node::option("opt")), "opt");
        assert_eq!(
            serialize(&Node::choice(vec![Node::option("a"), Node::option("b")])),
            "{a|b}"
        );
        assert_eq!(serialize(&Node::empty_root()), "");
    }

    #[test]
    fn test_single_option_keeps_braces() {
        assert_eq!(serialize(&Node::choice(vec![Node::option("only")])), "{only}");
    }

    #[test]
    fn test_empty_choice() {
        assert_eq!(serialize(&Node::choice(vec![])), EMPTY_CHOICE);
        assert_eq!(serialize(&Node::choice(vec![Node::option("")])), EMPTY_CHOICE);
    }

    #[test]
    fn test_absent_node() {
        assert_eq!(serialize_opt(None), "");
        assert_eq!(serialize_opt(Some(&Node::text("x"))), "x");
    }

    #[test]
    fn test_serializer_is_reusable() {
        let mut serializer = Serializer::new();
        assert_eq!(serializer.serialize(&Node::text("one")), "one");
        assert_eq!(serializer.serialize(&Node::text("two")), "two");
    }
}
