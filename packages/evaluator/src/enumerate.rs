//! Exhaustive listing of every rendering of a small tree.

use crate::variations::VariationCounter;
use choicetext_parser::{Node, NodeRef};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EnumerateError {
    #[error("More than {limit} variations; refusing to enumerate")]
    TooMany { limit: u64 },
}

/// List every rendering of `node`, first options first.
///
/// One entry is produced per variation, so identical renderings reached
/// through different options appear more than once and the length always
/// equals the variation count. Fails without allocating when the count is
/// above `limit`.
pub fn enumerate_variations(node: &Node, limit: u64) -> Result<Vec<String>, EnumerateError> {
    let counter = VariationCounter::with_ceiling(limit);
    if counter.count(node).is_overflow() {
        return Err(EnumerateError::TooMany {
            limit: counter.ceiling(),
        });
    }

    Ok(expand(node))
}

fn expand(node: &Node) -> Vec<String> {
    match node {
        Node::Text { content } => vec![content.clone()],
        Node::Option { content, children } => expand_sequence(content, children),
        Node::Root { children } => expand_sequence("", children),
        Node::Choice { children } => {
            if children.is_empty() {
                return vec![String::new()];
            }
            children.iter().flat_map(|option| expand(option)).collect()
        }
    }
}

fn expand_sequence(prefix: &str, children: &[NodeRef]) -> Vec<String> {
    let mut renderings = vec![prefix.to_string()];

    for child in children {
        let suffixes = expand(child);
        let mut next = Vec::with_capacity(renderings.len() * suffixes.len());
        for head in &renderings {
            for tail in &suffixes {
                let mut joined = String::with_capacity(head.len() + tail.len());
                joined.push_str(head);
                joined.push_str(tail);
                next.push(joined);
            }
        }
        renderings = next;
    }

    renderings
}
