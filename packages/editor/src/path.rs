//! # Path Addressing
//!
//! A path alternates the `children` field selector with an index:
//! `["children", 0, "children", 2]` is "child 0 of the root, then child 2
//! of that". The empty path is the root itself.
//!
//! Paths are plain data, not references into a particular tree, so the
//! same path can be replayed against any snapshot in the history.

use choicetext_parser::{Node, NodeRef};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// The only traversable field
pub const CHILDREN_FIELD: &str = "children";

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PathSegment {
    Index(usize),
    Field(String),
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PathError {
    #[error("Unknown field '{0}' (only 'children' can be traversed)")]
    UnknownField(String),

    #[error("Index {0} is not preceded by a field")]
    MissingField(usize),

    #[error("Field '{0}' is not followed by an index")]
    DanglingField(String),
}

/// Location of a node, relative to the root
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Path {
    segments: Vec<PathSegment>,
}

impl Path {
    pub fn root() -> Self {
        Self::default()
    }

    pub fn from_segments(segments: Vec<PathSegment>) -> Self {
        Self { segments }
    }

    /// Build a well-formed path from child indices
    pub fn from_indices(indices: &[usize]) -> Self {
        indices
            .iter()
            .fold(Self::root(), |path, &index| path.child(index))
    }

    /// Path of the `index`th child of the node at this path
    pub fn child(&self, index: usize) -> Self {
        let mut segments = self.segments.clone();
        segments.push(PathSegment::Field(CHILDREN_FIELD.to_string()));
        segments.push(PathSegment::Index(index));
        Self { segments }
    }

    pub fn segments(&self) -> &[PathSegment] {
        &self.segments
    }

    /// Number of raw segments (fields and indices)
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn is_root(&self) -> bool {
        self.segments.is_empty()
    }

    /// Child indices, checking that fields and indices alternate
    pub fn indices(&self) -> Result<Vec<usize>, PathError> {
        let mut indices = Vec::with_capacity(self.segments.len() / 2);
        let mut pending_field: Option<&str> = None;

        for segment in &self.segments {
            match (segment, pending_field) {
                (PathSegment::Field(name), None) => {
                    if name != CHILDREN_FIELD {
                        return Err(PathError::UnknownField(name.clone()));
                    }
                    pending_field = Some(name.as_str());
                }
                (PathSegment::Field(_), Some(previous)) => {
                    return Err(PathError::DanglingField(previous.to_string()));
                }
                (PathSegment::Index(index), Some(_)) => {
                    indices.push(*index);
                    pending_field = None;
                }
                (PathSegment::Index(index), None) => {
                    return Err(PathError::MissingField(*index));
                }
            }
        }

        match pending_field {
            Some(field) => Err(PathError::DanglingField(field.to_string())),
            None => Ok(indices),
        }
    }

    /// Path of the parent node, or `None` for the root
    pub fn parent(&self) -> Option<Self> {
        let indices = self.indices().ok()?;
        let (_, parent) = indices.split_last()?;
        Some(Self::from_indices(parent))
    }

    /// Index of the addressed node within its parent
    pub fn last_index(&self) -> Option<usize> {
        self.indices().ok()?.last().copied()
    }

    /// Same parent, different position
    pub fn with_last_index(&self, index: usize) -> Option<Self> {
        self.parent().map(|parent| parent.child(index))
    }
}

impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.segments.is_empty() {
            return f.write_str("/");
        }
        for segment in &self.segments {
            match segment {
                PathSegment::Field(name) => write!(f, "/{}", name)?,
                PathSegment::Index(index) => write!(f, "/{}", index)?,
            }
        }
        Ok(())
    }
}

impl FromStr for Path {
    type Err = PathError;

    /// Parse `/children/0/children/2` (leading slash optional, `/` is the root)
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let segments = s
            .trim()
            .split('/')
            .filter(|part| !part.is_empty())
            .map(|part| match part.parse::<usize>() {
                Ok(index) => PathSegment::Index(index),
                Err(_) => PathSegment::Field(part.to_string()),
            })
            .collect();

        let path = Self { segments };
        path.indices()?;
        Ok(path)
    }
}

/// Find the node at `path`.
///
/// Every hop is checked: the current node must have children and the index
/// must be in bounds. Malformed paths resolve to nothing.
pub fn resolve<'a>(root: &'a NodeRef, path: &Path) -> Option<&'a NodeRef> {
    let indices = path.indices().ok()?;
    resolve_indices(root, &indices)
}

/// Like [`resolve`], starting from a borrowed node
pub fn resolve_node<'a>(root: &'a Node, path: &Path) -> Option<&'a Node> {
    let indices = path.indices().ok()?;
    indices.iter().try_fold(root, |node, &index| {
        node.children()?.get(index).map(|child| child.as_ref())
    })
}

pub(crate) fn resolve_indices<'a>(root: &'a NodeRef, indices: &[usize]) -> Option<&'a NodeRef> {
    indices
        .iter()
        .try_fold(root, |node, &index| node.children()?.get(index))
}

#[cfg(test)]
mod tests {
    use super::*;
    use choicetext_parser::parse;
    use std::sync::Arc;

    #[test]
    fn test_resolve_nested() {
        let root = Arc::new(parse("Hello {world|there {a|b}}!"));

        let choice = resolve(&root, &Path::from_indices(&[1])).unwrap();
        assert!(matches!(choice.as_ref(), Node::Choice { .. }));

        let inner = resolve(&root, &Path::from_indices(&[1, 1, 0, 1])).unwrap();
        assert_eq!(inner.as_ref(), &Node::option("b"));

        assert!(Arc::ptr_eq(resolve(&root, &Path::root()).unwrap(), &root));
        let option = resolve_node(&root, &Path::from_indices(&[1, 1])).unwrap();
        assert_eq!(option.content(), Some("there "));
        assert!(resolve_node(&root, &Path::from_indices(&[9])).is_none());
    }

    #[test]
    fn test_resolve_rejects_bad_hops() {
        let root = Arc::new(parse("Hello {world|there}!"));

        // Out of bounds
        assert!(resolve(&root, &Path::from_indices(&[3])).is_none());
        // Text has no children
        assert!(resolve(&root, &Path::from_indices(&[0, 0])).is_none());
        // Malformed
        let bad = Path::from_segments(vec![PathSegment::Index(0)]);
        assert!(resolve(&root, &bad).is_none());
    }

    #[test]
    fn test_indices_validation() {
        let dangling = Path::from_segments(vec![PathSegment::Field("children".into())]);
        assert_eq!(
            dangling.indices(),
            Err(PathError::DanglingField("children".into()))
        );

        let unknown = Path::from_segments(vec![
            PathSegment::Field("options".into()),
            PathSegment::Index(0),
        ]);
        assert_eq!(unknown.indices(), Err(PathError::UnknownField("options".into())));

        let doubled = Path::from_segments(vec![
            PathSegment::Field("children".into()),
            PathSegment::Field("children".into()),
        ]);
        assert!(doubled.indices().is_err());
    }

    #[test]
    fn test_parent_and_siblings() {
        let path = Path::from_indices(&[2, 5]);
        assert_eq!(path.parent(), Some(Path::from_indices(&[2])));
        assert_eq!(path.last_index(), Some(5));
        assert_eq!(path.with_last_index(4), Some(Path::from_indices(&[2, 4])));
        assert_eq!(Path::root().parent(), None);
        assert_eq!(Path::root().last_index(), None);
    }

    #[test]
    fn test_display_and_parse() {
        let path = Path::from_indices(&[0, 2]);
        assert_eq!(path.to_string(), "/children/0/children/2");
        assert_eq!("/children/0/children/2".parse::<Path>().unwrap(), path);
        assert_eq!("children/0/children/2".parse::<Path>().unwrap(), path);
        assert_eq!("/".parse::<Path>().unwrap(), Path::root());
        assert_eq!(Path::root().to_string(), "/");
        assert!("/children/x".parse::<Path>().is_err());
    }

    #[test]
    fn test_json_form_alternates() {
        let path = Path::from_indices(&[0, 2]);
        let json = serde_json::to_string(&path).unwrap();
        assert_eq!(json, r#"["children",0,"children",2]"#);

        let back: Path = serde_json::from_str(&json).unwrap();
        assert_eq!(back, path);
    }
}
