//! Input length limiter with a live counter.
//!
//! [`Lim::attach`] wraps a text field in a form component and places a
//! counter of remaining characters after it. Every run updates the counter,
//! or cuts the value down to the limit once it overflows. Losing focus cuts
//! the value and hides the counter.

use graft_core::form::{self, Wrapped};
use graft_core::{
    Command, Component, Document, DomEvent, Error, EventKind, Exclusion, Hooks, Lifecycle,
    NodeId, Result,
};

/// Widget name used in lifecycle events.
pub const NAME: &str = "Lim";

/// Limit used when a trigger does not give one.
pub const DEFAULT_LIMIT: usize = 50;

/// State of a limited field, kept in the document's instance store.
#[derive(Debug)]
pub struct LimInstance {
    limit: usize,
    wrapped: Wrapped,
    counter: NodeId,
    hooks: Hooks,
}

impl LimInstance {
    pub fn limit(&self) -> usize {
        self.limit
    }

    /// The form component container.
    pub fn component(&self) -> NodeId {
        self.wrapped.container
    }

    pub fn counter(&self) -> NodeId {
        self.counter
    }
}

fn is_text_field(doc: &Document, node: NodeId) -> bool {
    match doc.tag(node) {
        Some("textarea") => true,
        Some("input") => doc.input_type(node) == "text",
        _ => false,
    }
}

/// Handle over one limited field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Lim {
    field: NodeId,
}

impl Lim {
    /// Limit `field` to `limit` characters and run once.
    ///
    /// The first call on a field builds the counter; later calls only run.
    /// Fields under an exclusion marker are left alone and yield `None`.
    pub fn attach(doc: &mut Document, field: NodeId, limit: usize) -> Result<Option<Self>> {
        Self::attach_with(doc, field, limit, &Exclusion::default(), Hooks::new())
    }

    /// [`attach`](Lim::attach) with a custom exclusion list and lifecycle
    /// observers. The observers are only installed when the field is
    /// attached for the first time.
    pub fn attach_with(
        doc: &mut Document,
        field: NodeId,
        limit: usize,
        exclusion: &Exclusion,
        mut hooks: Hooks,
    ) -> Result<Option<Self>> {
        let lim = Self { field };
        if lim.is_attached(doc) {
            lim.run(doc);
            return Ok(Some(lim));
        }
        if !is_text_field(doc, field) {
            return Err(Error::structural(
                NAME,
                "expected an <input type=\"text\"> or <textarea> element",
            ));
        }
        if exclusion.is_excluded(doc, field) {
            return Ok(None);
        }

        let wrapped = form::wrap(doc, field);
        let counter = doc.create_element("span");
        doc.set_text(counter, &limit.to_string());
        doc.add_class(counter, crate::css::lim::COUNTER);
        doc.insert_after(field, counter);
        hooks.emit(NAME, field, Lifecycle::Created);
        tracing::debug!(node = ?field, limit, "limiter created");
        doc.store_mut().insert(
            field,
            LimInstance {
                limit,
                wrapped,
                counter,
                hooks,
            },
        );
        lim.run(doc);
        Ok(Some(lim))
    }

    /// The limiter already attached to `field`, if any.
    pub fn find(doc: &Document, field: NodeId) -> Option<Self> {
        let lim = Self { field };
        lim.is_attached(doc).then_some(lim)
    }

    pub fn field(&self) -> NodeId {
        self.field
    }

    pub fn is_attached(&self, doc: &Document) -> bool {
        doc.store().contains::<LimInstance>(self.field)
    }

    pub fn instance<'d>(&self, doc: &'d Document) -> Option<&'d LimInstance> {
        doc.store().get::<LimInstance>(self.field)
    }

    fn with<R>(&self, doc: &mut Document, f: impl FnOnce(&mut Document, &mut LimInstance) -> R) -> Option<R> {
        let mut instance = doc.store_mut().remove::<LimInstance>(self.field)?;
        let out = f(doc, &mut instance);
        if doc.exists(self.field) {
            doc.store_mut().insert(self.field, instance);
        }
        Some(out)
    }

    /// Show the counter, then update it or cut an overflowing value.
    pub fn run(&self, doc: &mut Document) {
        let field = self.field;
        self.with(doc, |doc, lim| {
            show(doc, field, lim);
            let length = doc.value(field).chars().count();
            if length <= lim.limit {
                doc.set_text(lim.counter, &(lim.limit - length).to_string());
            } else {
                cut(doc, field, lim);
            }
        });
    }

    /// Put the counter back after the field and focus the field.
    pub fn show(&self, doc: &mut Document) {
        let field = self.field;
        self.with(doc, |doc, lim| show(doc, field, lim));
    }

    /// Detach the counter.
    pub fn hide(&self, doc: &mut Document) {
        let field = self.field;
        self.with(doc, |doc, lim| hide(doc, field, lim));
    }

    /// Truncate the value to the limit and zero the counter.
    pub fn cut(&self, doc: &mut Document) {
        let field = self.field;
        self.with(doc, |doc, lim| cut(doc, field, lim));
    }

    /// Focus loss: cut, then hide the counter.
    pub fn blur(&self, doc: &mut Document) {
        let field = self.field;
        self.with(doc, |doc, lim| {
            cut(doc, field, lim);
            hide(doc, field, lim);
        });
    }

    /// Drop the counter and unwrap the field.
    pub fn remove(&self, doc: &mut Document) {
        let Some(mut lim) = doc.store_mut().remove::<LimInstance>(self.field) else {
            return;
        };
        lim.hooks.emit(NAME, self.field, Lifecycle::BeforeRemove);
        doc.remove(lim.counter);
        form::unwrap(doc, self.field, &lim.wrapped);
        lim.hooks.emit(NAME, self.field, Lifecycle::Removed);
    }
}

fn show(doc: &mut Document, field: NodeId, lim: &mut LimInstance) {
    lim.hooks.emit(NAME, field, Lifecycle::BeforeShow);
    doc.insert_after(field, lim.counter);
    doc.focus(field);
    lim.hooks.emit(NAME, field, Lifecycle::Shown);
}

fn hide(doc: &mut Document, field: NodeId, lim: &mut LimInstance) {
    lim.hooks.emit(NAME, field, Lifecycle::BeforeHide);
    doc.detach(lim.counter);
    lim.hooks.emit(NAME, field, Lifecycle::Hidden);
}

fn cut(doc: &mut Document, field: NodeId, lim: &mut LimInstance) {
    lim.hooks.emit(NAME, field, Lifecycle::BeforeCut);
    let value: String = doc.value(field).chars().take(lim.limit).collect();
    doc.set_value(field, &value);
    doc.set_text(lim.counter, "0");
    lim.hooks.emit(NAME, field, Lifecycle::Cut);
}

/// Messages for [`Limiters`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Message {
    Input(NodeId),
    Blur(NodeId),
}

/// Routes input and focus loss on limited fields to their limiter.
#[derive(Debug, Default)]
pub struct Limiters;

impl Component for Limiters {
    type Message = Message;

    fn route(&self, doc: &Document, event: &DomEvent) -> Option<Message> {
        Lim::find(doc, event.target)?;
        match event.kind {
            EventKind::Input => Some(Message::Input(event.target)),
            EventKind::Blur => Some(Message::Blur(event.target)),
            _ => None,
        }
    }

    fn update(&mut self, doc: &mut Document, msg: Message) -> Result<Command<Message>> {
        match msg {
            Message::Input(field) => {
                if let Some(lim) = Lim::find(doc, field) {
                    lim.run(doc);
                }
            }
            Message::Blur(field) => {
                if let Some(lim) = Lim::find(doc, field) {
                    lim.blur(doc);
                }
            }
        }
        Ok(Command::none())
    }
}
