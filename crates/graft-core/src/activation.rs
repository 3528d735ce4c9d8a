//! The activation contract shared by every widget.
//!
//! A [`Collection`] is the snapshot of nodes one widget call governs.
//! [`Collection::activate`] first tears down every instance the collection
//! already carries, then mounts a fresh instance on each node with its
//! resolved configuration and tags the node. Running it again with other
//! overrides is therefore always consistent; transient UI state (an open
//! dropdown, a search query) is lost on the way.
//!
//! Instances live in the document's [`InstanceStore`](crate::InstanceStore),
//! keyed by node, so any collection that reaches a node can tear it down.

use crate::config::{resolve, Configure};
use crate::dom::{Document, NodeId};
use crate::error::{Error, Result};
use crate::hooks::{Hooks, Lifecycle};
use crate::scanner::{NodeKind, Scanner};
use crate::tagging;
use std::marker::PhantomData;

/// A widget kind that follows the activation contract.
pub trait Widget: 'static {
    /// Name used for tagging (`UI_{NAME}-activated`) and diagnostics.
    const NAME: &'static str;

    /// Effective configuration of one instance.
    type Config: Configure;

    /// Per-node runtime state.
    type Instance: 'static;

    /// Structural kind of node the widget accepts.
    fn kind() -> NodeKind;

    /// Selector used when the caller does not supply one.
    fn default_selector() -> String {
        format!(".UI_{}", Self::NAME)
    }

    /// Build the widget around `node`.
    fn mount(
        doc: &mut Document,
        node: NodeId,
        config: Self::Config,
        hooks: &mut Hooks,
    ) -> Result<Self::Instance>;

    /// Remove everything [`mount`](Widget::mount) generated and restore
    /// `node`.
    fn unmount(doc: &mut Document, node: NodeId, instance: Self::Instance);
}

/// Which nodes of a collection an operation applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scope {
    /// Every live node of the collection.
    All,
    /// One node, if it belongs to the collection and is live.
    Node(NodeId),
}

impl From<NodeId> for Scope {
    fn from(node: NodeId) -> Self {
        Scope::Node(node)
    }
}

impl From<Option<NodeId>> for Scope {
    fn from(node: Option<NodeId>) -> Self {
        node.map_or(Scope::All, Scope::Node)
    }
}

/// Snapshot of nodes governed by one widget call, plus its observers.
pub struct Collection<W: Widget> {
    nodes: Vec<NodeId>,
    hooks: Hooks,
    _widget: PhantomData<fn() -> W>,
}

impl<W: Widget> std::fmt::Debug for Collection<W> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Collection")
            .field("widget", &W::NAME)
            .field("nodes", &self.nodes)
            .field("hooks", &self.hooks)
            .finish()
    }
}

impl<W: Widget> Collection<W> {
    /// Collect the eligible nodes matching `selector`.
    pub fn scan(doc: &Document, scanner: &Scanner, selector: &str) -> Result<Self> {
        Ok(Self::new(scanner.scan(doc, selector, W::kind())?))
    }

    /// Collect explicitly given nodes.
    ///
    /// A node of the wrong kind is a structural error; excluded nodes are
    /// dropped.
    pub fn from_nodes(
        doc: &Document,
        scanner: &Scanner,
        nodes: impl IntoIterator<Item = NodeId>,
    ) -> Result<Self> {
        let mut kept = Vec::new();
        for node in nodes {
            if !W::kind().accepts(doc, node) {
                return Err(Error::structural(
                    W::NAME,
                    format!("expected {}", W::kind().describe()),
                ));
            }
            if !scanner.exclusion().is_excluded(doc, node) {
                kept.push(node);
            }
        }
        Ok(Self::new(kept))
    }

    fn new(nodes: Vec<NodeId>) -> Self {
        Self {
            nodes,
            hooks: Hooks::new(),
            _widget: PhantomData,
        }
    }

    /// Replace the observer list.
    pub fn with_hooks(mut self, hooks: Hooks) -> Self {
        self.hooks = hooks;
        self
    }

    pub fn hooks_mut(&mut self) -> &mut Hooks {
        &mut self.hooks
    }

    /// The snapshot, including nodes that are no longer live.
    pub fn nodes(&self) -> &[NodeId] {
        &self.nodes
    }

    /// Tear down, then mount and tag every node of the snapshot.
    pub fn activate(
        &mut self,
        doc: &mut Document,
        overrides: &<W::Config as Configure>::Overrides,
    ) -> Result<()> {
        self.remove(doc, Scope::All);
        for node in self.nodes.clone() {
            self.mount(doc, node, overrides)?;
        }
        Ok(())
    }

    /// Mount and tag only the nodes of the snapshot that carry no tag yet.
    /// Live instances are left as they are.
    pub fn activate_untagged(
        &mut self,
        doc: &mut Document,
        overrides: &<W::Config as Configure>::Overrides,
    ) -> Result<()> {
        for node in self.nodes.clone() {
            if !tagging::is_marked(doc, node, W::NAME) {
                self.mount(doc, node, overrides)?;
            }
        }
        Ok(())
    }

    fn mount(
        &mut self,
        doc: &mut Document,
        node: NodeId,
        overrides: &<W::Config as Configure>::Overrides,
    ) -> Result<()> {
        if !doc.exists(node) {
            return Ok(());
        }
        let config: W::Config = resolve(overrides, &doc.dataset(node));
        let instance = W::mount(doc, node, config, &mut self.hooks)?;
        doc.store_mut().insert(node, instance);
        tagging::mark(doc, node, W::NAME);
        self.hooks.emit(W::NAME, node, Lifecycle::Activated);
        tracing::debug!(widget = W::NAME, node = ?node, "activated");
        Ok(())
    }

    /// Tear down the instances in `scope`.
    pub fn remove(&mut self, doc: &mut Document, scope: impl Into<Scope>) {
        for node in self.targets(doc, scope.into()) {
            self.hooks.emit(W::NAME, node, Lifecycle::BeforeRemove);
            tagging::unmark(doc, node, W::NAME);
            self.hooks.emit(W::NAME, node, Lifecycle::Unactivated);
            if let Some(instance) = doc.store_mut().remove::<W::Instance>(node) {
                W::unmount(doc, node, instance);
            }
            self.hooks.emit(W::NAME, node, Lifecycle::Removed);
            tracing::debug!(widget = W::NAME, node = ?node, "removed");
        }
    }

    /// The live, tagged subset of the collection.
    pub fn get(&self, doc: &Document) -> Vec<NodeId> {
        self.targets(doc, Scope::All)
    }

    /// Live, tagged nodes of the collection within `scope`.
    pub fn targets(&self, doc: &Document, scope: Scope) -> Vec<NodeId> {
        self.nodes
            .iter()
            .copied()
            .filter(|&node| match scope {
                Scope::All => true,
                Scope::Node(target) => node == target,
            })
            .filter(|&node| doc.exists(node) && tagging::is_marked(doc, node, W::NAME))
            .collect()
    }

    /// The instance attached to `node`.
    pub fn instance<'d>(&self, doc: &'d Document, node: NodeId) -> Option<&'d W::Instance> {
        doc.store().get::<W::Instance>(node)
    }

    /// Run `f` with the instance on `node` taken out of the store, putting
    /// it back afterwards. Returns `None` when `node` has no instance.
    pub fn with_instance<R>(
        &mut self,
        doc: &mut Document,
        node: NodeId,
        f: impl FnOnce(&mut Document, &mut W::Instance, &mut Hooks) -> R,
    ) -> Option<R> {
        let mut instance = doc.store_mut().remove::<W::Instance>(node)?;
        let out = f(doc, &mut instance, &mut self.hooks);
        if doc.exists(node) {
            doc.store_mut().insert(node, instance);
        }
        Some(out)
    }
}
