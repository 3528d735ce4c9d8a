//! Per-node widget instance side-table.
//!
//! Each widget kind keeps its instances in its own
//! [`SecondaryMap`](slotmap::SecondaryMap) keyed by [`NodeId`], so any
//! handle can look up (and tear down) the instance attached to a node even
//! when that node was activated through a different handle. Entries are
//! dropped when their node is freed.

use crate::dom::NodeId;
use slotmap::SecondaryMap;
use std::any::{Any, TypeId};
use std::collections::HashMap;

trait Table: Any {
    fn forget(&mut self, node: NodeId);
    fn as_any(&self) -> &dyn Any;
    fn as_any_mut(&mut self) -> &mut dyn Any;
}

impl<I: 'static> Table for SecondaryMap<NodeId, I> {
    fn forget(&mut self, node: NodeId) {
        self.remove(node);
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

#[derive(Default)]
pub struct InstanceStore {
    tables: HashMap<TypeId, Box<dyn Table>>,
}

impl std::fmt::Debug for InstanceStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InstanceStore")
            .field("tables", &self.tables.len())
            .finish()
    }
}

impl InstanceStore {
    fn table<I: 'static>(&self) -> Option<&SecondaryMap<NodeId, I>> {
        self.tables
            .get(&TypeId::of::<I>())
            .and_then(|table| table.as_any().downcast_ref())
    }

    fn table_mut<I: 'static>(&mut self) -> Option<&mut SecondaryMap<NodeId, I>> {
        self.tables
            .get_mut(&TypeId::of::<I>())
            .and_then(|table| table.as_any_mut().downcast_mut())
    }

    /// Drop every instance attached to a freed node.
    pub(crate) fn forget(&mut self, node: NodeId) {
        for table in self.tables.values_mut() {
            table.forget(node);
        }
    }

    /// Instance of type `I` attached to `node`.
    pub fn get<I: 'static>(&self, node: NodeId) -> Option<&I> {
        self.table::<I>().and_then(|table| table.get(node))
    }

    pub fn get_mut<I: 'static>(&mut self, node: NodeId) -> Option<&mut I> {
        self.table_mut::<I>().and_then(|table| table.get_mut(node))
    }

    /// Attach `instance` to `node`, returning the previous one.
    pub fn insert<I: 'static>(&mut self, node: NodeId, instance: I) -> Option<I> {
        if self.table::<I>().is_none() {
            self.tables
                .insert(TypeId::of::<I>(), Box::new(SecondaryMap::<NodeId, I>::new()));
        }
        self.table_mut::<I>()
            .and_then(|table| table.insert(node, instance))
    }

    pub fn remove<I: 'static>(&mut self, node: NodeId) -> Option<I> {
        self.table_mut::<I>().and_then(|table| table.remove(node))
    }

    pub fn contains<I: 'static>(&self, node: NodeId) -> bool {
        self.table::<I>().is_some_and(|table| table.contains_key(node))
    }

    /// Nodes that currently hold an instance of type `I`.
    pub fn nodes<I: 'static>(&self) -> Vec<NodeId> {
        self.table::<I>()
            .map(|table| table.keys().collect())
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::Document;

    #[test]
    fn tables_are_separated_by_type() {
        let mut doc = Document::new();
        let node = doc.create_element("div");
        let store = doc.store_mut();
        store.insert::<u32>(node, 7);
        store.insert::<String>(node, "seven".into());
        assert_eq!(store.get::<u32>(node), Some(&7));
        assert_eq!(store.get::<String>(node).map(String::as_str), Some("seven"));
        assert_eq!(store.remove::<u32>(node), Some(7));
        assert!(!store.contains::<u32>(node));
        assert!(store.contains::<String>(node));
    }

    #[test]
    fn freed_nodes_drop_out() {
        let mut doc = Document::new();
        let node = doc.create_element("div");
        doc.store_mut().insert::<u8>(node, 1);
        doc.remove(node);
        assert!(doc.store().nodes::<u8>().is_empty());
    }
}
