//! Lifecycle observers.
//!
//! Widgets announce named lifecycle points (activation, show/hide, render,
//! search, selection, removal, ...) to the observers registered on their
//! collection. Observers run synchronously, in registration order, while
//! the operation is in progress.

use crate::dom::NodeId;
use std::fmt;

/// A named lifecycle point.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Lifecycle {
    /// The node was tagged as activated.
    Activated,
    /// The node's tag was removed.
    Unactivated,
    /// An instance was created outside of a scan (single-field widgets).
    Created,
    BeforeShow,
    Shown,
    BeforeHide,
    Hidden,
    BeforeTabShow { index: usize },
    TabShown { index: usize },
    BeforeRender,
    Rendered,
    BeforeSearch { query: String },
    Searched { query: String },
    BeforeSelect { indexes: Vec<usize>, selected: bool },
    Selected { indexes: Vec<usize>, selected: bool },
    BeforeCut,
    Cut,
    BeforeRemove,
    Removed,
}

/// Payload handed to observers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LifecycleEvent {
    /// Widget name (`"Select"`, `"Tabs"`, ...).
    pub widget: &'static str,
    /// The widget's source node.
    pub node: NodeId,
    pub kind: Lifecycle,
}

type Observer = Box<dyn FnMut(&LifecycleEvent)>;

/// Ordered observer list.
#[derive(Default)]
pub struct Hooks {
    observers: Vec<Observer>,
}

impl fmt::Debug for Hooks {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Hooks")
            .field("observers", &self.observers.len())
            .finish()
    }
}

impl Hooks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an observer; it sees every later event.
    pub fn subscribe(&mut self, observer: impl FnMut(&LifecycleEvent) + 'static) {
        self.observers.push(Box::new(observer));
    }

    /// Builder form of [`subscribe`](Hooks::subscribe).
    pub fn with(mut self, observer: impl FnMut(&LifecycleEvent) + 'static) -> Self {
        self.subscribe(observer);
        self
    }

    pub fn len(&self) -> usize {
        self.observers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.observers.is_empty()
    }

    /// Notify every observer.
    pub fn emit(&mut self, widget: &'static str, node: NodeId, kind: Lifecycle) {
        if self.observers.is_empty() {
            return;
        }
        let event = LifecycleEvent { widget, node, kind };
        for observer in &mut self.observers {
            observer(&event);
        }
    }
}
