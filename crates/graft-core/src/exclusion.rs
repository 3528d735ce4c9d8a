//! Opt-out markers: subtrees no widget may touch.

use crate::dom::{Document, NodeId, Selector};
use crate::error::Result;

/// Class of the default exclusion marker.
pub const DISABLED_NODE: &str = "UI_disabled-node";

/// Exclusion filter over a list of marker selectors.
#[derive(Debug, Clone)]
pub struct Exclusion {
    selectors: Vec<(String, Selector)>,
}

impl Default for Exclusion {
    fn default() -> Self {
        Self {
            selectors: vec![(format!(".{DISABLED_NODE}"), Selector::class(DISABLED_NODE))],
        }
    }
}

impl Exclusion {
    /// Build a filter from marker selectors. An empty list excludes nothing.
    pub fn new<I, S>(selectors: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let selectors = selectors
            .into_iter()
            .map(|s| {
                let s = s.into();
                Selector::parse(&s).map(|parsed| (s, parsed))
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { selectors })
    }

    /// Marker selectors in use.
    pub fn selectors(&self) -> impl Iterator<Item = &str> {
        self.selectors.iter().map(|(s, _)| s.as_str())
    }

    /// Whether `node` or one of its ancestors matches a marker.
    ///
    /// A hit logs one warning naming whether the node itself (`node`) or an
    /// ancestor (`element`) carries the marker.
    pub fn is_excluded(&self, doc: &Document, node: NodeId) -> bool {
        for (source, selector) in &self.selectors {
            if let Some(found) = selector.closest(doc, node) {
                let entity = if found == node { "node" } else { "element" };
                tracing::warn!(
                    entity,
                    marker = %source,
                    node = ?node,
                    "UI found disabled {entity}"
                );
                return true;
            }
        }
        false
    }
}
