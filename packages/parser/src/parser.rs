use crate::ast::{Node, NodeRef};
use crate::error::ParseError;
use std::sync::Arc;

/// Default limit on choice nesting before input is kept as literal text
pub const DEFAULT_MAX_DEPTH: usize = 128;

/// Parser settings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParseOptions {
    /// Maximum number of nested choices
    pub max_depth: usize,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

/// Tree plus everything the parser had to repair to build it
#[derive(Debug, Clone, PartialEq)]
pub struct ParseOutput {
    /// Always a [`Node::Root`]
    pub root: Node,

    /// Trimmed input with line breaks folded to spaces; diagnostic
    /// positions index into this string
    pub normalized: String,

    pub diagnostics: Vec<ParseError>,
}

impl ParseOutput {
    pub fn has_diagnostics(&self) -> bool {
        !self.diagnostics.is_empty()
    }
}

/// Result of scanning one `{`
enum Scanned {
    Choice(Node),
    Literal,
}

/// Recovering parser for choice text.
///
/// Works on already normalized input (see [`normalize`]); use [`parse`] or
/// [`parse_with_diagnostics`] for raw text.
pub struct Parser<'src> {
    source: &'src str,
    options: ParseOptions,
    diagnostics: Vec<ParseError>,
}

impl<'src> Parser<'src> {
    pub fn new(source: &'src str) -> Self {
        Self::with_options(source, ParseOptions::default())
    }

    pub fn with_options(source: &'src str, options: ParseOptions) -> Self {
        Self {
            source,
            options,
            diagnostics: Vec::new(),
        }
    }

    /// Parse the whole source into a root node
    pub fn parse_root(&mut self) -> Node {
        let children = self
            .parse_sequence(0, self.source.len(), 0)
            .into_iter()
            .map(Arc::new)
            .collect();

        Node::Root { children }
    }

    pub fn diagnostics(&self) -> &[ParseError] {
        &self.diagnostics
    }

    pub fn into_diagnostics(self) -> Vec<ParseError> {
        self.diagnostics
    }

    fn report(&mut self, diagnostic: ParseError) {
        tracing::debug!("recovered from malformed choice text: {}", diagnostic);
        self.diagnostics.push(diagnostic);
    }

    /// Parse `source[start..end]` as a run of text and choices.
    ///
    /// Returned text nodes are never empty and never adjacent; a stray `{`
    /// joins the surrounding text.
    fn parse_sequence(&mut self, start: usize, end: usize, depth: usize) -> Vec<Node> {
        let src = self.source;
        let bytes = src.as_bytes();
        let mut nodes = Vec::new();
        let mut pending = String::new();

        if depth >= self.options.max_depth {
            if let Some(offset) = src[start..end].find('{') {
                self.report(ParseError::nesting_too_deep(
                    start + offset,
                    self.options.max_depth,
                ));
            }
            pending.push_str(&src[start..end]);
            flush_text(&mut pending, &mut nodes);
            return nodes;
        }

        let mut text_start = start;
        let mut i = start;

        while i < end {
            match bytes[i] {
                b'\\' => {
                    i = skip_escape(src, i, end);
                }
                b'{' => {
                    pending.push_str(&src[text_start..i]);
                    let (scanned, next) = self.parse_choice(i, end, depth);
                    match scanned {
                        Scanned::Choice(choice) => {
                            flush_text(&mut pending, &mut nodes);
                            nodes.push(choice);
                        }
                        Scanned::Literal => pending.push('{'),
                    }
                    i = next;
                    text_start = next;
                }
                b'}' => {
                    self.report(ParseError::unmatched_close(i));
                    i += 1;
                }
                _ => i += 1,
            }
        }

        pending.push_str(&src[text_start..end]);
        flush_text(&mut pending, &mut nodes);
        nodes
    }

    /// Scan the choice opened at `open`, returning it and the position after it
    fn parse_choice(&mut self, open: usize, end: usize, depth: usize) -> (Scanned, usize) {
        let src = self.source;
        let bytes = src.as_bytes();

        if open + 1 >= end {
            self.report(ParseError::stray_open(open));
            return (Scanned::Literal, open + 1);
        }

        let mut segments = Vec::new();
        let mut segment_start = open + 1;
        let mut level = 1usize;
        let mut close = None;
        let mut i = open + 1;

        while i < end {
            match bytes[i] {
                b'\\' => {
                    i = skip_escape(src, i, end);
                    continue;
                }
                b'{' => level += 1,
                b'}' => {
                    level -= 1;
                    if level == 0 {
                        segments.push((segment_start, i));
                        close = Some(i + 1);
                        break;
                    }
                }
                b'|' if level == 1 => {
                    segments.push((segment_start, i));
                    segment_start = i + 1;
                }
                _ => {}
            }
            i += 1;
        }

        let next = match close {
            Some(next) => next,
            None => {
                self.report(ParseError::unterminated_choice(open));
                segments.push((segment_start, end));
                end
            }
        };

        let children = segments
            .into_iter()
            .map(|(a, b)| Arc::new(self.parse_option(a, b, depth + 1)))
            .collect();

        (Scanned::Choice(Node::Choice { children }), next)
    }

    fn parse_option(&mut self, start: usize, end: usize, depth: usize) -> Node {
        let raw = &self.source[start..end];
        let start = start + (raw.len() - raw.trim_start().len());
        let end = end - (raw.len() - raw.trim_end().len());

        if start >= end {
            return Node::option("");
        }

        let mut content = String::new();
        let mut children: Vec<NodeRef> = Vec::new();

        for (index, node) in self.parse_sequence(start, end, depth).into_iter().enumerate() {
            match node {
                Node::Text { content: text } if index == 0 => content = text,
                Node::Text { content: text } => {
                    if !text.trim().is_empty() {
                        children.push(Arc::new(Node::Text { content: text }));
                    }
                }
                other => children.push(Arc::new(other)),
            }
        }

        simplify_option(content, children)
    }
}

/// Canonical form of an option: a lone text child is folded into the
/// option's content, and childless content is trimmed.
pub fn simplify_option(content: String, children: Vec<NodeRef>) -> Node {
    if content.is_empty() && children.len() == 1 {
        if let Node::Text { content: text } = children[0].as_ref() {
            return Node::option(text.trim());
        }
    }

    if children.is_empty() {
        return Node::option(content.trim());
    }

    Node::Option { content, children }
}

/// Trim and fold every line break to a single space
pub fn normalize(text: &str) -> String {
    text.trim()
        .replace("\r\n", " ")
        .replace(|c: char| c == '\r' || c == '\n', " ")
}

/// Position after a backslash escape starting at `i`
fn skip_escape(src: &str, i: usize, end: usize) -> usize {
    let next = i + 1;
    if next >= end {
        return end;
    }
    let width = src[next..].chars().next().map_or(1, char::len_utf8);
    (next + width).min(end)
}

fn flush_text(pending: &mut String, nodes: &mut Vec<Node>) {
    if !pending.is_empty() {
        nodes.push(Node::text(std::mem::take(pending)));
    }
}

/// Parse raw choice text into a root node, discarding diagnostics
pub fn parse(text: &str) -> Node {
    parse_with_diagnostics(text).root
}

/// Parse raw choice text, keeping the diagnostics
pub fn parse_with_diagnostics(text: &str) -> ParseOutput {
    parse_with_options(text, ParseOptions::default())
}

pub fn parse_with_options(text: &str, options: ParseOptions) -> ParseOutput {
    let normalized = normalize(text);
    let mut parser = Parser::with_options(&normalized, options);
    let root = parser.parse_root();
    let diagnostics = parser.into_diagnostics();

    ParseOutput {
        root,
        normalized,
        diagnostics,
    }
}
