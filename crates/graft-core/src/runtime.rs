use crate::command::{Action, Command, CommandInner};
use crate::component::Component;
use crate::dom::Document;
use crate::error::Result;
use crate::event::DomEvent;
use futures::future::BoxFuture;
use futures::stream::{FuturesUnordered, StreamExt};
use ratatui::Frame;
use std::collections::VecDeque;

/// Owns a [`Document`] and the [`Component`] controlling it, and drives the
/// route/update cycle.
///
/// Events are delivered with [`dispatch`](Page::dispatch). Immediate
/// messages produced by commands are processed before `dispatch` returns;
/// deferred commands (timers, futures) are parked until
/// [`settle`](Page::settle) is awaited.
///
/// # Example
///
/// ```rust,ignore
/// let doc = Document::parse(markup)?;
/// let mut page = Page::new(doc, widgets);
/// page.dispatch(DomEvent::click(toggle))?;
/// page.settle().await?;
/// ```
pub struct Page<C: Component> {
    document: Document,
    component: C,
    queue: VecDeque<C::Message>,
    deferred: FuturesUnordered<BoxFuture<'static, C::Message>>,
}

impl<C: Component> Page<C> {
    pub fn new(document: Document, component: C) -> Self {
        Self {
            document,
            component,
            queue: VecDeque::new(),
            deferred: FuturesUnordered::new(),
        }
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn document_mut(&mut self) -> &mut Document {
        &mut self.document
    }

    pub fn component(&self) -> &C {
        &self.component
    }

    pub fn component_mut(&mut self) -> &mut C {
        &mut self.component
    }

    /// Split the page back into its document and component.
    pub fn into_parts(self) -> (Document, C) {
        (self.document, self.component)
    }

    /// Deliver `event`: route it to the component, process the resulting
    /// messages, then run the document's default action for it.
    ///
    /// Returns whether the component handled the event.
    pub fn dispatch(&mut self, event: DomEvent) -> Result<bool> {
        tracing::trace!(event = event.name(), "dispatch");
        let handled = match self.component.route(&self.document, &event) {
            Some(msg) => {
                self.send(msg)?;
                true
            }
            None => false,
        };
        self.document.perform_default_action(&event);
        Ok(handled)
    }

    /// Process `msg` and every immediate message it produces.
    pub fn send(&mut self, msg: C::Message) -> Result<()> {
        self.queue.push_back(msg);
        self.drain()
    }

    fn drain(&mut self) -> Result<()> {
        while let Some(msg) = self.queue.pop_front() {
            let cmd = self.component.update(&mut self.document, msg)?;
            self.execute(cmd);
        }
        Ok(())
    }

    fn execute(&mut self, cmd: Command<C::Message>) {
        match cmd.inner {
            CommandInner::None => {}
            CommandInner::Action(Action::Message(msg)) => self.queue.push_back(msg),
            CommandInner::Future(fut) => self.deferred.push(fut),
            CommandInner::Batch(cmds) => {
                for cmd in cmds {
                    self.execute(cmd);
                }
            }
        }
    }

    /// Whether deferred work is still outstanding.
    pub fn has_pending(&self) -> bool {
        !self.deferred.is_empty()
    }

    /// Drive deferred commands to completion, feeding each resulting message
    /// through the component, until nothing is left.
    pub async fn settle(&mut self) -> Result<()> {
        while let Some(msg) = self.deferred.next().await {
            self.send(msg)?;
        }
        Ok(())
    }

    /// Render the component into the whole frame.
    pub fn view(&self, frame: &mut Frame) {
        let area = frame.area();
        self.component.view(&self.document, frame, area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::NodeId;
    use std::time::Duration;

    /// Counts clicks on one node; the second click schedules a delayed echo.
    struct Clicker {
        target: NodeId,
        clicks: u32,
        echoes: u32,
    }

    enum ClickMsg {
        Click,
        Echo,
    }

    impl Component for Clicker {
        type Message = ClickMsg;

        fn route(&self, _doc: &Document, event: &DomEvent) -> Option<ClickMsg> {
            (event.target == self.target && event.name() == "click").then_some(ClickMsg::Click)
        }

        fn update(&mut self, doc: &mut Document, msg: ClickMsg) -> Result<Command<ClickMsg>> {
            match msg {
                ClickMsg::Click => {
                    self.clicks += 1;
                    doc.add_class(self.target, "clicked");
                    if self.clicks == 2 {
                        return Ok(Command::after(Duration::from_millis(5), ClickMsg::Echo));
                    }
                    Ok(Command::none())
                }
                ClickMsg::Echo => {
                    self.echoes += 1;
                    Ok(Command::none())
                }
            }
        }
    }

    fn page() -> (Page<Clicker>, NodeId) {
        let doc = Document::parse("<button id=\"b\"></button><form id=\"f\"><input id=\"i\" value=\"x\"></form>").unwrap();
        let target = doc.element_by_id("b").unwrap();
        (
            Page::new(
                doc,
                Clicker {
                    target,
                    clicks: 0,
                    echoes: 0,
                },
            ),
            target,
        )
    }

    #[test]
    fn dispatch_routes_and_updates() {
        let (mut page, target) = page();
        assert!(page.dispatch(DomEvent::click(target)).unwrap());
        assert!(page.document().has_class(target, "clicked"));
        let other = page.document().element_by_id("f").unwrap();
        assert!(!page.dispatch(DomEvent::click(other)).unwrap());
        assert_eq!(page.component().clicks, 1);
    }

    #[test]
    fn unhandled_reset_still_resets_form() {
        let (mut page, _) = page();
        let form = page.document().element_by_id("f").unwrap();
        let input = page.document().element_by_id("i").unwrap();
        page.document_mut().set_value(input, "edited");
        page.dispatch(DomEvent::reset(form)).unwrap();
        assert_eq!(page.document().value(input), "x");
    }

    #[tokio::test]
    async fn settle_runs_deferred_messages() {
        let (mut page, target) = page();
        page.dispatch(DomEvent::click(target)).unwrap();
        page.dispatch(DomEvent::click(target)).unwrap();
        assert!(page.has_pending());
        page.settle().await.unwrap();
        assert!(!page.has_pending());
        assert_eq!(page.component().echoes, 1);
    }
}
