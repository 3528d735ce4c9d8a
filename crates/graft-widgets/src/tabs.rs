//! Tabbed panels over definition lists.
//!
//! Each `<dl class="UI_Tabs">` holds `dt`/`dd` pairs. Activation moves every
//! `dt` into a generated control bar prepended to the list; clicking a `dt`
//! shows its `dd`. The location fragment can pick the initial tab per list:
//! `#news=2&faq=1` opens tab 2 of `<dl id="news">` and tab 1 of
//! `<dl id="faq">`.

use crate::css::{self, tabs as class};
use crossterm::event::KeyCode;
use graft_core::trigger::integer_prefix;
use graft_core::{
    Collection, Command, Component, ConfigValue, Configure, Document, DomEvent, EventKind, Hooks,
    Lifecycle, NodeId, NodeKind, Result, Scanner, Scope, Widget,
};
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::Line;
use ratatui::widgets::{Paragraph, Tabs as RatatuiTabs};
use ratatui::Frame;

/// Effective configuration of one tab list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TabsConfig {
    /// Tab opened when no other choice applies.
    pub show_tab_index: usize,
    /// Let the location fragment pick the initial tab.
    pub smart_show: bool,
}

impl Default for TabsConfig {
    fn default() -> Self {
        Self {
            show_tab_index: 0,
            smart_show: true,
        }
    }
}

impl Configure for TabsConfig {
    type Overrides = TabsOptions;

    fn override_with(&mut self, overrides: &TabsOptions) {
        if let Some(index) = overrides.show_tab_index {
            self.show_tab_index = index;
        }
        if let Some(smart_show) = overrides.smart_show {
            self.smart_show = smart_show;
        }
    }

    fn apply(&mut self, key: &str, value: &ConfigValue) -> bool {
        match (key, value.as_index(), value.as_bool()) {
            ("showTabIndex", Some(index), _) => self.show_tab_index = index,
            ("smartShow", _, Some(smart_show)) => self.smart_show = smart_show,
            _ => return false,
        }
        true
    }
}

/// Caller overrides for [`Tabs`] activation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TabsOptions {
    /// Selector of the `<dl>` elements to activate; `.UI_Tabs` when unset.
    pub selector: Option<String>,
    pub show_tab_index: Option<usize>,
    pub smart_show: Option<bool>,
}

impl TabsOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_selector(mut self, selector: impl Into<String>) -> Self {
        self.selector = Some(selector.into());
        self
    }

    pub fn with_show_tab_index(mut self, index: usize) -> Self {
        self.show_tab_index = Some(index);
        self
    }

    pub fn with_smart_show(mut self, smart_show: bool) -> Self {
        self.smart_show = Some(smart_show);
        self
    }
}

/// Initial tab requested for the list `id` by a fragment such as
/// `a=2&b=3`. The last entry for `id` wins. Negative numbers are returned
/// as `None`.
fn fragment_index(hash: &str, id: &str) -> Option<Option<usize>> {
    hash.split('&')
        .filter_map(|entry| {
            let (key, value) = entry.split_once('=')?;
            let number = integer_prefix(value.trim_start())?;
            (!key.is_empty() && key == id).then(|| usize::try_from(number).ok())
        })
        .last()
}

/// Runtime state of one activated tab list.
#[derive(Debug)]
pub struct TabsInstance {
    config: TabsConfig,
    control: NodeId,
    tabs: Vec<NodeId>,
    contents: Vec<NodeId>,
    current: Option<usize>,
}

impl TabsInstance {
    pub fn config(&self) -> &TabsConfig {
        &self.config
    }

    /// The generated bar holding the `dt` elements.
    pub fn control(&self) -> NodeId {
        self.control
    }

    pub fn tabs(&self) -> &[NodeId] {
        &self.tabs
    }

    pub fn contents(&self) -> &[NodeId] {
        &self.contents
    }

    /// Index of the open tab.
    pub fn current(&self) -> Option<usize> {
        self.current
    }

    fn show(&mut self, doc: &mut Document, dl: NodeId, index: Option<usize>, hooks: &mut Hooks) {
        for node in self.tabs.iter().chain(&self.contents) {
            doc.remove_class(*node, class::SHOW);
        }
        let requested = index.unwrap_or(usize::MAX);
        hooks.emit(TabsWidget::NAME, dl, Lifecycle::BeforeTabShow { index: requested });
        let index = [requested, self.config.show_tab_index]
            .into_iter()
            .find(|&i| i < self.tabs.len())
            .unwrap_or(0);
        let Some(&tab) = self.tabs.get(index) else {
            tracing::debug!(node = ?dl, "tab list without tabs");
            return;
        };
        doc.add_class(tab, class::SHOW);
        if let Some(&content) = self.contents.get(index) {
            doc.add_class(content, class::SHOW);
        }
        self.current = Some(index);
        hooks.emit(TabsWidget::NAME, dl, Lifecycle::TabShown { index });
    }

    fn route(&self, doc: &Document, dl: NodeId, event: &DomEvent) -> Option<Message> {
        let position = self
            .tabs
            .iter()
            .position(|&tab| doc.contains(tab, event.target))?;
        match event.kind {
            EventKind::Click => Some(Message::Show {
                node: dl,
                index: position,
            }),
            EventKind::KeyDown(key) => {
                let count = self.tabs.len();
                let index = match key.code {
                    KeyCode::Left => (position + count - 1) % count,
                    KeyCode::Right => (position + 1) % count,
                    _ => return None,
                };
                Some(Message::Show { node: dl, index })
            }
            _ => None,
        }
    }
}

/// The Tabs widget kind.
pub struct TabsWidget;

impl Widget for TabsWidget {
    const NAME: &'static str = "Tabs";
    type Config = TabsConfig;
    type Instance = TabsInstance;

    fn kind() -> NodeKind {
        NodeKind::Element("dl")
    }

    fn mount(
        doc: &mut Document,
        dl: NodeId,
        config: TabsConfig,
        hooks: &mut Hooks,
    ) -> Result<TabsInstance> {
        let descendants = doc.descendants(dl);
        let of_tag = |tag: &str| -> Vec<NodeId> {
            descendants
                .iter()
                .copied()
                .filter(|&node| doc.tag(node) == Some(tag))
                .collect()
        };
        let tabs = of_tag("dt");
        let contents = of_tag("dd");

        let control = doc.create_element("div");
        doc.add_class(control, class::CONTROL);
        doc.add_class(control, css::NO_SCROLLBAR);
        for &tab in &tabs {
            doc.append(control, tab);
        }
        doc.prepend(dl, control);

        let initial = if config.smart_show {
            doc.id(dl)
                .and_then(|id| fragment_index(doc.location_hash(), id))
                .unwrap_or(Some(config.show_tab_index))
        } else {
            Some(config.show_tab_index)
        };

        let mut instance = TabsInstance {
            config,
            control,
            tabs,
            contents,
            current: None,
        };
        instance.show(doc, dl, initial, hooks);
        Ok(instance)
    }

    fn unmount(doc: &mut Document, dl: NodeId, instance: TabsInstance) {
        for (index, &tab) in instance.tabs.iter().enumerate() {
            match instance.contents.get(index) {
                Some(&content) if doc.exists(content) => doc.insert_before(content, tab),
                _ => doc.append(dl, tab),
            }
        }
        for &node in instance.tabs.iter().chain(&instance.contents) {
            doc.remove_class(node, class::SHOW);
            if doc.classes(node).is_empty() {
                doc.set_class_name(node, None);
            }
        }
        doc.remove(instance.control);
    }
}

/// Messages for the tabs component.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Message {
    /// Open tab `index` of the list `node`.
    Show { node: NodeId, index: usize },
}

/// Visual style of the tab bar preview.
#[derive(Debug, Clone)]
pub struct TabsStyle {
    pub normal: Style,
    pub selected: Style,
    pub divider: String,
}

impl Default for TabsStyle {
    fn default() -> Self {
        Self {
            normal: Style::default().fg(Color::DarkGray),
            selected: Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
            divider: " | ".to_string(),
        }
    }
}

/// Handle over a collection of activated tab lists.
#[derive(Debug)]
pub struct Tabs {
    collection: Collection<TabsWidget>,
    style: TabsStyle,
}

impl Tabs {
    /// Activate every `<dl>` matching the options' selector.
    pub fn activate(doc: &mut Document, options: &TabsOptions) -> Result<Self> {
        Self::activate_with(doc, &Scanner::default(), options, Hooks::new())
    }

    pub fn activate_with(
        doc: &mut Document,
        scanner: &Scanner,
        options: &TabsOptions,
        hooks: Hooks,
    ) -> Result<Self> {
        let selector = options
            .selector
            .clone()
            .unwrap_or_else(TabsWidget::default_selector);
        let mut collection = Collection::scan(doc, scanner, &selector)?.with_hooks(hooks);
        collection.activate(doc, options)?;
        Ok(Self {
            collection,
            style: TabsStyle::default(),
        })
    }

    pub fn with_style(mut self, style: TabsStyle) -> Self {
        self.style = style;
        self
    }

    /// Tear down and rebuild with new options.
    pub fn reactivate(&mut self, doc: &mut Document, options: &TabsOptions) -> Result<()> {
        self.collection.activate(doc, options)
    }

    pub fn hooks_mut(&mut self) -> &mut Hooks {
        self.collection.hooks_mut()
    }

    /// Open tab `index` in every list of `scope`. An index out of range
    /// falls back to the list's `showTabIndex`, then to the first tab.
    pub fn show(&mut self, doc: &mut Document, index: usize, scope: impl Into<Scope>) {
        for node in self.collection.targets(doc, scope.into()) {
            self.collection
                .with_instance(doc, node, |doc, instance, hooks| {
                    instance.show(doc, node, Some(index), hooks)
                });
        }
    }

    pub fn remove(&mut self, doc: &mut Document, scope: impl Into<Scope>) {
        self.collection.remove(doc, scope);
    }

    pub fn get(&self, doc: &Document) -> Vec<NodeId> {
        self.collection.get(doc)
    }

    pub fn instance<'d>(&self, doc: &'d Document, node: NodeId) -> Option<&'d TabsInstance> {
        self.collection.instance(doc, node)
    }

    /// Index of the open tab of `node`.
    pub fn current(&self, doc: &Document, node: NodeId) -> Option<usize> {
        self.instance(doc, node).and_then(TabsInstance::current)
    }
}

impl Component for Tabs {
    type Message = Message;

    fn route(&self, doc: &Document, event: &DomEvent) -> Option<Message> {
        self.get(doc).into_iter().find_map(|node| {
            self.instance(doc, node)
                .and_then(|instance| instance.route(doc, node, event))
        })
    }

    fn update(&mut self, doc: &mut Document, msg: Message) -> Result<Command<Message>> {
        match msg {
            Message::Show { node, index } => self.show(doc, index, node),
        }
        Ok(Command::none())
    }

    fn view(&self, doc: &Document, frame: &mut Frame, area: Rect) {
        let mut y = area.y;
        for node in self.get(doc) {
            let Some(instance) = self.instance(doc, node) else {
                continue;
            };
            if area.bottom().saturating_sub(y) < 2 {
                break;
            }
            let titles: Vec<Line> = instance
                .tabs
                .iter()
                .map(|&tab| Line::raw(doc.text_content(tab).trim().to_string()))
                .collect();
            let bar = RatatuiTabs::new(titles)
                .select(instance.current)
                .style(self.style.normal)
                .highlight_style(self.style.selected)
                .divider(self.style.divider.as_str());
            frame.render_widget(bar, Rect::new(area.x, y, area.width, 1));

            let body = instance
                .current
                .and_then(|index| instance.contents.get(index))
                .map(|&content| doc.text_content(content).trim().to_string())
                .unwrap_or_default();
            frame.render_widget(Paragraph::new(body), Rect::new(area.x, y + 1, area.width, 1));
            y += 2;
        }
    }
}
