use crate::command::{Action, Command, CommandInner};
use crate::component::Component;
use crate::dom::Document;
use crate::error::Result;
use crate::event::DomEvent;
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::Terminal;

/// A headless test harness that drives a [`Component`] over a [`Document`].
///
/// `TestPage` lets you exercise the route/update/view cycle in a plain
/// `#[test]` function, with no tokio runtime required. Immediate commands
/// (e.g. [`Command::message`]) are collected and can be flushed with
/// [`drain_messages`](TestPage::drain_messages); deferred commands are
/// counted but never run. Use [`Page`](crate::Page) in an async test when
/// the deferred work itself is under test.
///
/// # Example
///
/// ```rust,ignore
/// use graft_core::testing::TestPage;
///
/// let mut page = TestPage::new(doc, select);
/// page.dispatch(DomEvent::click(toggle))?;
/// assert!(page.component().is_open(page.document(), node));
///
/// let output = page.render_string(40, 3);
/// assert!(output.contains("Make a choice"));
/// ```
pub struct TestPage<C: Component> {
    document: Document,
    component: C,
    pending_messages: Vec<C::Message>,
    deferred: usize,
}

impl<C: Component> TestPage<C> {
    pub fn new(document: Document, component: C) -> Self {
        Self {
            document,
            component,
            pending_messages: Vec::new(),
            deferred: 0,
        }
    }

    /// Route `event` to the component and run a single update cycle for the
    /// resulting message, then apply the document's default action.
    ///
    /// Returns whether the component handled the event.
    pub fn dispatch(&mut self, event: DomEvent) -> Result<bool> {
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

    /// Send a message, triggering a single update cycle.
    ///
    /// Immediate commands returned by `update` are enqueued; call
    /// [`drain_messages`](TestPage::drain_messages) to flush them.
    pub fn send(&mut self, msg: C::Message) -> Result<()> {
        let cmd = self.component.update(&mut self.document, msg)?;
        self.collect_sync_messages(cmd);
        Ok(())
    }

    /// Process pending immediate messages until none are generated.
    pub fn drain_messages(&mut self) -> Result<()> {
        while !self.pending_messages.is_empty() {
            let messages: Vec<_> = self.pending_messages.drain(..).collect();
            for msg in messages {
                self.send(msg)?;
            }
        }
        Ok(())
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    /// Mutable access to the document for arranging test state.
    pub fn document_mut(&mut self) -> &mut Document {
        &mut self.document
    }

    pub fn component(&self) -> &C {
        &self.component
    }

    pub fn component_mut(&mut self) -> &mut C {
        &mut self.component
    }

    /// Both halves at once, for calling widget operations directly.
    pub fn parts_mut(&mut self) -> (&mut Document, &mut C) {
        (&mut self.document, &mut self.component)
    }

    /// Number of deferred commands returned so far.
    pub fn deferred(&self) -> usize {
        self.deferred
    }

    /// Render the component to a ratatui [`Buffer`] of the given dimensions.
    pub fn render(&self, width: u16, height: u16) -> Buffer {
        let backend = ratatui::backend::TestBackend::new(width, height);
        let mut terminal = Terminal::new(backend).expect("test backend never fails");
        terminal
            .draw(|frame| {
                let area = frame.area();
                self.component.view(&self.document, frame, area);
            })
            .expect("test backend never fails");
        terminal.backend().buffer().clone()
    }

    /// Render the component and return the visible content as a plain
    /// string, one line per row.
    pub fn render_string(&self, width: u16, height: u16) -> String {
        let buf = self.render(width, height);
        let area = Rect::new(0, 0, width, height);
        let mut output = String::new();
        for y in area.top()..area.bottom() {
            for x in area.left()..area.right() {
                let cell = &buf[(x, y)];
                output.push_str(cell.symbol());
            }
            if y < area.bottom() - 1 {
                output.push('\n');
            }
        }
        output
    }

    fn collect_sync_messages(&mut self, cmd: Command<C::Message>) {
        match cmd.inner {
            CommandInner::None => {}
            CommandInner::Action(Action::Message(msg)) => {
                self.pending_messages.push(msg);
            }
            CommandInner::Batch(cmds) => {
                for cmd in cmds {
                    self.collect_sync_messages(cmd);
                }
            }
            CommandInner::Future(_) => self.deferred += 1,
        }
    }
}
