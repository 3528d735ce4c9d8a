//! Modal popup boxes keyed by element id.
//!
//! Every `.UI_Popup` element with an id is moved into a backdrop box
//! appended to the document root, with a close button prepended to its
//! content. A popup is opened by id; clicking the backdrop or the close
//! button hides every popup.

use crate::css::{self, popup as class};
use graft_core::{
    Collection, Command, Component, ConfigValue, Configure, Document, DomEvent, Error, EventKind,
    Hooks, Lifecycle, NodeId, NodeKind, Result, Scanner, Scope, Widget,
};
use ratatui::layout::Rect;
use ratatui::style::{Color, Style};
use ratatui::widgets::{Block, Clear, Paragraph, Wrap};
use ratatui::Frame;

/// Popups take no configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PopupConfig;

impl Configure for PopupConfig {
    type Overrides = ();

    fn override_with(&mut self, _overrides: &()) {}

    fn apply(&mut self, _key: &str, _value: &ConfigValue) -> bool {
        false
    }
}

/// Where a popup sat before activation.
#[derive(Debug, Clone, Copy)]
struct Origin {
    parent: NodeId,
    index: usize,
    next: Option<NodeId>,
}

/// Runtime state of one activated popup.
#[derive(Debug)]
pub struct PopupInstance {
    component: NodeId,
    close_button: NodeId,
    origin: Option<Origin>,
}

impl PopupInstance {
    /// The backdrop box holding the popup.
    pub fn component(&self) -> NodeId {
        self.component
    }

    pub fn close_button(&self) -> NodeId {
        self.close_button
    }

    pub fn is_shown(&self, doc: &Document) -> bool {
        doc.has_class(self.component, class::SHOW)
    }
}

/// The Popup widget kind.
pub struct PopupWidget;

impl Widget for PopupWidget {
    const NAME: &'static str = "Popup";
    type Config = PopupConfig;
    type Instance = PopupInstance;

    fn kind() -> NodeKind {
        NodeKind::Any
    }

    fn mount(
        doc: &mut Document,
        node: NodeId,
        _config: PopupConfig,
        _hooks: &mut Hooks,
    ) -> Result<PopupInstance> {
        let origin = doc
            .parent(node)
            .zip(doc.index_in_parent(node))
            .map(|(parent, index)| Origin {
                parent,
                index,
                next: doc.children(parent).get(index + 1).copied(),
            });

        let component = doc.create_element("div");
        doc.add_class(component, css::BODY_OVERLAY);
        doc.add_class(component, class::BOX);
        let close_button = doc.create_element("span");
        doc.add_class(close_button, class::CLOSE_BUTTON);
        for icon in class::CLOSE_ICON {
            doc.add_class(close_button, icon);
        }
        doc.prepend(node, close_button);
        doc.append(component, node);
        let root = doc.body();
        doc.append(root, component);

        Ok(PopupInstance {
            component,
            close_button,
            origin,
        })
    }

    fn unmount(doc: &mut Document, node: NodeId, instance: PopupInstance) {
        doc.remove(instance.close_button);
        match instance.origin.filter(|origin| doc.exists(origin.parent)) {
            Some(Origin {
                parent,
                index,
                next,
            }) => {
                let reference = next
                    .filter(|&next| doc.parent(next) == Some(parent))
                    .or_else(|| doc.children(parent).get(index).copied());
                match reference {
                    Some(reference) => doc.insert_before(reference, node),
                    None => doc.append(parent, node),
                }
            }
            None => doc.detach(node),
        }
        doc.remove(instance.component);
    }
}

/// Messages for the popup component.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Message {
    /// Open the popup with this id.
    Show(String),
    /// Close every popup.
    Hide,
}

/// Handle over the popups of a document.
#[derive(Debug)]
pub struct Popup {
    collection: Collection<PopupWidget>,
}

impl Popup {
    /// Activate every `.UI_Popup` element that has an id and is not
    /// activated yet. Popups activated by an earlier handle are governed by
    /// this one too.
    pub fn activate(doc: &mut Document) -> Result<Self> {
        Self::activate_with(doc, &Scanner::default(), Hooks::new())
    }

    pub fn activate_with(doc: &mut Document, scanner: &Scanner, hooks: Hooks) -> Result<Self> {
        let nodes = scanner
            .scan(doc, &PopupWidget::default_selector(), PopupWidget::kind())?
            .into_iter()
            .filter(|&node| doc.id(node).is_some_and(|id| !id.is_empty()))
            .collect::<Vec<_>>();
        let mut collection = Collection::from_nodes(doc, scanner, nodes)?.with_hooks(hooks);
        collection.activate_untagged(doc, &())?;
        Ok(Self { collection })
    }

    pub fn hooks_mut(&mut self) -> &mut Hooks {
        self.collection.hooks_mut()
    }

    /// The activated popup with this id.
    pub fn find(&self, doc: &Document, id: &str) -> Option<NodeId> {
        self.get(doc)
            .into_iter()
            .find(|&node| doc.id(node) == Some(id))
    }

    /// Open the popup `id` and lock scrolling of the document root.
    pub fn show(&mut self, doc: &mut Document, id: &str) -> Result<()> {
        let node = self
            .find(doc, id)
            .ok_or_else(|| Error::NotFound(format!("no activated popup with id '{id}'")))?;
        self.collection.with_instance(doc, node, |doc, instance, hooks| {
            hooks.emit(PopupWidget::NAME, node, Lifecycle::BeforeShow);
            doc.add_class(instance.component, class::SHOW);
            let root = doc.body();
            doc.add_class(root, css::BODY_HIDE_OVERFLOW);
            hooks.emit(PopupWidget::NAME, node, Lifecycle::Shown);
        });
        Ok(())
    }

    /// Close every popup and unlock scrolling.
    pub fn hide(&mut self, doc: &mut Document) {
        for node in self.get(doc) {
            self.collection.with_instance(doc, node, |doc, instance, hooks| {
                hooks.emit(PopupWidget::NAME, node, Lifecycle::BeforeHide);
                doc.remove_class(instance.component, class::SHOW);
                hooks.emit(PopupWidget::NAME, node, Lifecycle::Hidden);
            });
        }
        let root = doc.body();
        doc.remove_class(root, css::BODY_HIDE_OVERFLOW);
    }

    /// Move popups back to where they were and drop their boxes.
    pub fn remove(&mut self, doc: &mut Document, scope: impl Into<Scope>) {
        self.collection.remove(doc, scope);
    }

    pub fn get(&self, doc: &Document) -> Vec<NodeId> {
        self.collection.get(doc)
    }

    pub fn instance<'d>(&self, doc: &'d Document, node: NodeId) -> Option<&'d PopupInstance> {
        self.collection.instance(doc, node)
    }

    /// The open popups.
    pub fn shown(&self, doc: &Document) -> Vec<NodeId> {
        self.get(doc)
            .into_iter()
            .filter(|&node| self.instance(doc, node).is_some_and(|i| i.is_shown(doc)))
            .collect()
    }
}

fn centered(width: u16, height: u16, area: Rect) -> Rect {
    let w = width.min(area.width);
    let h = height.min(area.height);
    Rect::new(
        area.x + area.width.saturating_sub(w) / 2,
        area.y + area.height.saturating_sub(h) / 2,
        w,
        h,
    )
}

impl Component for Popup {
    type Message = Message;

    fn route(&self, doc: &Document, event: &DomEvent) -> Option<Message> {
        if event.kind != EventKind::Click {
            return None;
        }
        self.get(doc).into_iter().find_map(|node| {
            let instance = self.instance(doc, node)?;
            let closes = event.target == instance.component
                || doc.contains(instance.close_button, event.target);
            closes.then_some(Message::Hide)
        })
    }

    fn update(&mut self, doc: &mut Document, msg: Message) -> Result<Command<Message>> {
        match msg {
            Message::Show(id) => self.show(doc, &id)?,
            Message::Hide => self.hide(doc),
        }
        Ok(Command::none())
    }

    fn view(&self, doc: &Document, frame: &mut Frame, area: Rect) {
        for node in self.shown(doc) {
            let text = doc.text_content(node).trim().to_string();
            let title = doc.id(node).unwrap_or_default().to_string();
            let width = area.width.saturating_mul(3) / 5;
            let popup_area = centered(width.max(10), 5, area);
            frame.render_widget(Clear, popup_area);
            let block = Block::bordered()
                .title(format!(" {title} "))
                .border_style(Style::default().fg(Color::Cyan));
            frame.render_widget(
                Paragraph::new(text).block(block).wrap(Wrap { trim: true }),
                popup_area,
            );
        }
    }
}
