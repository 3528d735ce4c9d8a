//! Selector-driven discovery of the nodes a widget may activate.

use crate::dom::{Document, NodeId};
use crate::error::Result;
use crate::exclusion::Exclusion;

/// Structural kind a widget accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    /// Any element.
    Any,
    /// Elements with the given tag.
    Element(&'static str),
    /// `<input>` elements with the given `type`.
    Input(&'static str),
}

impl NodeKind {
    pub fn accepts(&self, doc: &Document, node: NodeId) -> bool {
        match *self {
            NodeKind::Any => doc.is_element(node),
            NodeKind::Element(tag) => doc.tag(node) == Some(tag),
            NodeKind::Input(kind) => {
                doc.tag(node) == Some("input") && doc.input_type(node) == kind
            }
        }
    }

    /// Human-readable form for error messages.
    pub fn describe(&self) -> String {
        match self {
            NodeKind::Any => "an element".to_string(),
            NodeKind::Element(tag) => format!("a <{tag}> element"),
            NodeKind::Input(kind) => format!("an <input type=\"{kind}\"> element"),
        }
    }
}

/// Resolves a selector to the nodes a widget may activate.
#[derive(Debug, Clone, Default)]
pub struct Scanner {
    exclusion: Exclusion,
}

impl Scanner {
    pub fn new(exclusion: Exclusion) -> Self {
        Self { exclusion }
    }

    pub fn exclusion(&self) -> &Exclusion {
        &self.exclusion
    }

    /// Snapshot of the elements matching `selector` that are of `kind` and
    /// not excluded, in document order.
    ///
    /// Nodes of another kind are skipped silently. The snapshot is not
    /// refreshed when the document changes afterwards.
    pub fn scan(&self, doc: &Document, selector: &str, kind: NodeKind) -> Result<Vec<NodeId>> {
        Ok(doc
            .query_all(selector)?
            .into_iter()
            .filter(|&node| kind.accepts(doc, node))
            .filter(|&node| !self.exclusion.is_excluded(doc, node))
            .collect())
    }
}
