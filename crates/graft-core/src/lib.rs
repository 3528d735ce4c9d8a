//! Core of **graft**, a declarative widget activation library.
//!
//! Consumers write plain markup with marker classes and attributes;
//! `graft-core` provides the in-memory [`Document`] that markup lives in and
//! the activation lifecycle every widget follows: scan the tree, skip
//! opted-out subtrees, resolve configuration, build the widget, tag the
//! node, and tear it all down again on request.
//!
//! # Key types
//!
//! | Type | Purpose |
//! |------|---------|
//! | [`Document`] | Arena-backed markup tree with selectors and form semantics |
//! | [`Widget`] | The activation contract a widget kind implements |
//! | [`Collection`] | Snapshot of nodes one widget call governs; activate / remove / get |
//! | [`Configure`] | Typed three-layer configuration (defaults, overrides, `data-*`) |
//! | [`Scanner`] / [`Exclusion`] | Selector-driven node discovery with opt-out markers |
//! | [`Hooks`] | Lifecycle observers |
//! | [`Component`] | Routes [`DomEvent`]s to messages and updates the document |
//! | [`Command`] | Follow-up work returned from an update |
//! | [`Page`] | Owns a document and a component, drives deferred work |
//! | [`TestPage`](testing::TestPage) | Headless harness for unit-testing a [`Component`] |
//!
//! # Lifecycle
//!
//! 1. **scan** -- [`Scanner::scan`] resolves a selector to eligible nodes of
//!    the widget's kind, dropping those under an [`Exclusion`] marker.
//! 2. **deactivate** -- [`Collection::activate`] tears down whatever the
//!    collection already carries.
//! 3. **mount** -- each node gets its resolved configuration and a fresh
//!    instance, stored in the document's [`InstanceStore`].
//! 4. **tag** -- the node receives its `UI_{Name}-activated` class.
//! 5. **interact** -- events reach the widget through a [`Component`], whose
//!    updates call back into the widget's operations.
//!
//! # Quick example
//!
//! ```ignore
//! use graft_core::{Document, Collection, Scanner, Widget};
//!
//! let mut doc = Document::parse(r#"<select class="UI_Select"><option>A</option></select>"#)?;
//! let mut selects = Collection::<MySelect>::scan(&doc, &Scanner::default(), ".UI_Select")?;
//! selects.activate(&mut doc, &Default::default())?;
//! assert_eq!(selects.get(&doc).len(), 1);
//! ```

pub mod activation;
pub mod command;
pub mod component;
pub mod config;
pub mod dom;
pub mod error;
pub mod event;
pub mod exclusion;
pub mod form;
pub mod hooks;
pub mod runtime;
pub mod scanner;
pub mod store;
pub mod tagging;
pub mod testing;
pub mod trigger;

pub use activation::{Collection, Scope, Widget};
pub use command::Command;
pub use component::Component;
pub use config::{resolve, ConfigValue, Configure};
pub use dom::{Document, NodeId, Selector};
pub use error::{Error, Result};
pub use event::{DomEvent, EventKind};
pub use exclusion::Exclusion;
pub use form::Wrapped;
pub use hooks::{Hooks, Lifecycle, LifecycleEvent};
pub use runtime::Page;
pub use scanner::{NodeKind, Scanner};
pub use store::InstanceStore;
pub use trigger::{Invocation, TriggerAction, TriggerArg, TriggerEvent, TriggerRegistry};
