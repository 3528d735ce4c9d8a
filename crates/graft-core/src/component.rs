use crate::command::Command;
use crate::dom::Document;
use crate::error::Result;
use crate::event::DomEvent;
use ratatui::{layout::Rect, Frame};

/// A stateful controller that reacts to document events.
///
/// A component owns no nodes itself: it works on the [`Document`] it is
/// handed. Events flow in two steps. [`route`](Component::route) decides
/// whether an event concerns the component and turns it into a message;
/// [`update`](Component::update) then mutates the document and returns a
/// [`Command`] for any follow-up work.
///
/// # Composition pattern
///
/// To combine components, wrap each child's message type in a variant of
/// the parent message and use [`Command::map`] to translate commands:
///
/// ```rust,ignore
/// use graft_core::{Command, Component, Document, DomEvent, Result};
///
/// enum PageMsg { Select(SelectMsg), Tabs(TabsMsg) }
///
/// impl Component for PageWidgets {
///     type Message = PageMsg;
///
///     fn route(&self, doc: &Document, event: &DomEvent) -> Option<PageMsg> {
///         self.select.route(doc, event).map(PageMsg::Select)
///             .or_else(|| self.tabs.route(doc, event).map(PageMsg::Tabs))
///     }
///
///     fn update(&mut self, doc: &mut Document, msg: PageMsg) -> Result<Command<PageMsg>> {
///         match msg {
///             PageMsg::Select(m) => Ok(self.select.update(doc, m)?.map(PageMsg::Select)),
///             PageMsg::Tabs(m) => Ok(self.tabs.update(doc, m)?.map(PageMsg::Tabs)),
///         }
///     }
/// }
/// ```
pub trait Component {
    /// The component's internal message type.
    type Message: Send + 'static;

    /// Translate a document event into a message, or `None` when the event
    /// does not concern this component.
    fn route(&self, doc: &Document, event: &DomEvent) -> Option<Self::Message>;

    /// Process a message, mutate the document, and return a [`Command`] for
    /// side effects.
    fn update(&mut self, doc: &mut Document, msg: Self::Message) -> Result<Command<Self::Message>>;

    /// Render a summary of the component's state into `area`.
    ///
    /// The default implementation draws nothing.
    fn view(&self, _doc: &Document, _frame: &mut Frame, _area: Rect) {}
}
