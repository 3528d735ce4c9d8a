//! Custom single/multiple selection dropdown over a native `<select>`.
//!
//! Activation wraps each `<select>` in a form component and builds, around
//! it, a control showing the current choice as chips, a dropdown listing
//! one item per `<option>`, a toggle button and, optionally, a search
//! field. The `<option>` elements stay the source of truth: every
//! operation writes selection state to them and [`Select::render`] derives
//! the generated markup back from them.
//!
//! ```text
//! <label class="UI_form-component ...">
//!   <div class="UI_Select-control">chips or placeholder</div>
//!   <select class="UI_Select UI_Select-activated">...</select>
//!   <div class="UI_Select-overlay"></div>            (while open)
//!   <div class="UI_Select-dropdown">
//!     <input class="UI_Select-search-input">          (withSearch)
//!     <div class="UI_Select-dropdown-list">items</div>
//!   </div>
//!   <span class="UI_form-component-control">icon</span>
//! </label>
//! ```
//!
//! At most one dropdown of a collection is open at a time.

mod config;
mod navigation;
mod placement;
mod preview;

pub use config::{SelectConfig, SelectOptions};
pub use navigation::Cursor;
pub use placement::{Horizontal, Placement, Vertical};
pub use preview::{PreviewStyle, SelectPreview};

use crate::css::{self, select as class};
use crossterm::event::{KeyCode, KeyEvent};
use graft_core::form::{self, Wrapped};
use graft_core::{
    Collection, Command, Component, Document, DomEvent, Error, EventKind, Hooks, Lifecycle,
    NodeId, NodeKind, Result, Scanner, Scope, Widget,
};
use ratatui::layout::Rect;
use ratatui::Frame;
use std::time::Duration;

/// Delay between a form reset and the re-render of its selects, letting the
/// reset settle first.
pub const RESET_SETTLE: Duration = Duration::from_millis(100);

/// Value of a select as last rendered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectValue {
    Single(String),
    /// Values of the selected options in index order.
    Multiple(Vec<String>),
}

impl SelectValue {
    pub fn is_empty(&self) -> bool {
        match self {
            SelectValue::Single(value) => value.is_empty(),
            SelectValue::Multiple(values) => values.is_empty(),
        }
    }
}

/// One `<option>` as projected into the dropdown.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OptionItem {
    pub index: usize,
    /// The generated dropdown item.
    pub node: NodeId,
    pub label: String,
    /// `data-find-of` of the option, searched next to the label.
    pub find_of: Option<String>,
    pub is_selected: bool,
    pub is_disabled: bool,
    pub is_hidden_by_search: bool,
}

impl OptionItem {
    /// Selected and disabled options are never offered.
    pub fn is_hidden(&self) -> bool {
        self.is_selected || self.is_disabled || self.is_hidden_by_search
    }

    /// Could still be picked, whatever the search says.
    pub fn is_candidate(&self) -> bool {
        !self.is_selected && !self.is_disabled
    }
}

/// A selected option shown in the control.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Chip {
    pub index: usize,
    /// Text part; clicking it opens the dropdown.
    pub text: NodeId,
    /// Delete affordance, multiple mode only.
    pub delete: Option<NodeId>,
}

/// Runtime state of one activated select.
#[derive(Debug)]
pub struct SelectInstance {
    config: SelectConfig,
    wrapped: Wrapped,
    control: NodeId,
    dropdown: NodeId,
    dropdown_list: NodeId,
    toggle_button: NodeId,
    overlay: NodeId,
    search_input: Option<NodeId>,
    placeholder: Option<NodeId>,
    is_multiple: bool,
    is_disabled: bool,
    items: Vec<OptionItem>,
    chips: Vec<Chip>,
    value: SelectValue,
    is_open: bool,
    cursor: Cursor,
    placement: Placement,
}

fn element(doc: &mut Document, tag: &str, classes: &[&str]) -> NodeId {
    let node = doc.create_element(tag);
    for class in classes {
        doc.add_class(node, class);
    }
    node
}

/// Fill `node` with an option's rich content, or its plain label.
fn fill(doc: &mut Document, node: NodeId, content: Option<&str>, label: &str) {
    match content {
        Some(markup) => doc.set_markup(node, markup),
        None => doc.set_text(node, label),
    }
}

impl SelectInstance {
    fn build(
        doc: &mut Document,
        select: NodeId,
        config: SelectConfig,
        hooks: &mut Hooks,
    ) -> Self {
        let is_disabled = doc.is_disabled(select);
        let is_multiple = doc.is_multiple(select);
        let wrapped = form::wrap(doc, select);

        let overlay = element(doc, "div", &[class::OVERLAY]);
        let control = element(doc, "div", &[class::CONTROL, css::NO_SCROLLBAR]);
        let dropdown = element(doc, "div", &[class::DROPDOWN]);
        let dropdown_list = element(doc, "div", &[class::DROPDOWN_LIST, css::SCROLLBAR]);
        doc.set_attr(dropdown_list, "tabindex", "0");
        let toggle_button = element(doc, "span", &[form::FORM_COMPONENT_CONTROL]);
        doc.set_markup(toggle_button, &config.open_icon);

        doc.insert_before(select, control);
        doc.insert_after(select, toggle_button);
        doc.insert_after(select, dropdown);
        doc.append(dropdown, dropdown_list);

        let search_input = config.with_search.then(|| {
            let input = element(doc, "input", &[class::SEARCH_INPUT]);
            doc.set_attr(input, "type", "text");
            doc.set_attr(input, "placeholder", &config.search_placeholder);
            doc.prepend(dropdown, input);
            input
        });

        let has_default = doc
            .options(select)
            .iter()
            .any(|&option| doc.is_default_selected(option));
        if !config.select_placeholder.is_empty() && !has_default {
            doc.set_selected_index(select, None);
        }

        let mut instance = Self {
            config,
            wrapped,
            control,
            dropdown,
            dropdown_list,
            toggle_button,
            overlay,
            search_input,
            placeholder: None,
            is_multiple,
            is_disabled,
            items: Vec::new(),
            chips: Vec::new(),
            value: SelectValue::Single(String::new()),
            is_open: false,
            cursor: Cursor::default(),
            placement: Placement::default(),
        };
        instance.render(doc, select, hooks);
        instance
    }

    fn teardown(self, doc: &mut Document, select: NodeId) {
        doc.remove(self.overlay);
        form::unwrap(doc, select, &self.wrapped);
    }

    pub fn config(&self) -> &SelectConfig {
        &self.config
    }

    /// The form component container.
    pub fn component(&self) -> NodeId {
        self.wrapped.container
    }

    pub fn control(&self) -> NodeId {
        self.control
    }

    pub fn dropdown(&self) -> NodeId {
        self.dropdown
    }

    pub fn dropdown_list(&self) -> NodeId {
        self.dropdown_list
    }

    pub fn toggle_button(&self) -> NodeId {
        self.toggle_button
    }

    /// Click catcher placed after the select while the dropdown is open.
    pub fn overlay(&self) -> NodeId {
        self.overlay
    }

    pub fn search_input(&self) -> Option<NodeId> {
        self.search_input
    }

    /// The placeholder shown in the control, if any.
    pub fn placeholder(&self) -> Option<NodeId> {
        self.placeholder
    }

    pub fn is_multiple(&self) -> bool {
        self.is_multiple
    }

    pub fn is_disabled(&self) -> bool {
        self.is_disabled
    }

    pub fn has_search(&self) -> bool {
        self.search_input.is_some()
    }

    pub fn items(&self) -> &[OptionItem] {
        &self.items
    }

    pub fn chips(&self) -> &[Chip] {
        &self.chips
    }

    pub fn value(&self) -> &SelectValue {
        &self.value
    }

    pub fn is_open(&self) -> bool {
        self.is_open
    }

    pub fn cursor(&self) -> Cursor {
        self.cursor
    }

    pub fn placement(&self) -> Placement {
        self.placement
    }

    fn render(&mut self, doc: &mut Document, select: NodeId, hooks: &mut Hooks) {
        hooks.emit(SelectWidget::NAME, select, Lifecycle::BeforeRender);
        doc.clear_children(self.control);
        doc.clear_children(self.dropdown_list);
        self.items.clear();
        self.chips.clear();
        self.placeholder = None;

        for (index, option) in doc.options(select).into_iter().enumerate() {
            let is_selected = doc.is_selected(option);
            let is_disabled = doc.is_disabled(option);
            let content = doc
                .attr(option, "data-content")
                .filter(|content| !content.is_empty())
                .map(str::to_string);
            let text = doc.option_label(option);
            let option_classes = doc.classes(option).to_vec();

            let item = element(doc, "div", &[class::DROPDOWN_ITEM]);
            for option_class in &option_classes {
                doc.add_class(item, option_class);
            }
            fill(doc, item, content.as_deref(), &text);
            doc.set_hidden(item, is_selected || is_disabled);
            doc.append(self.dropdown_list, item);

            let label = doc
                .text_content(item)
                .split_whitespace()
                .collect::<Vec<_>>()
                .join(" ");
            self.items.push(OptionItem {
                index,
                node: item,
                label,
                find_of: doc.attr(option, "data-find-of").map(str::to_string),
                is_selected,
                is_disabled,
                is_hidden_by_search: false,
            });

            if is_selected {
                let chip_class = if self.is_multiple {
                    class::CONTROL_ITEM_MULTIPLE
                } else {
                    class::CONTROL_ITEM
                };
                let chip = element(doc, "span", &[chip_class]);
                let chip_text = element(doc, "span", &[class::CONTROL_ITEM_TEXT]);
                fill(doc, chip_text, content.as_deref(), &text);
                doc.append(chip, chip_text);
                doc.append(self.control, chip);
                let delete = self.is_multiple.then(|| {
                    let delete = element(doc, "span", &[class::CONTROL_ITEM_DEL]);
                    doc.set_markup(delete, &self.config.del_item_icon);
                    doc.append(chip, delete);
                    delete
                });
                self.chips.push(Chip {
                    index,
                    text: chip_text,
                    delete,
                });
            }
        }

        if doc.select_value(select).is_empty() {
            self.add_placeholder(doc, select);
        }

        let required = doc.is_required(select);
        doc.toggle_class(self.control, css::REQUIRED_FORM, required);
        doc.toggle_class(self.wrapped.container, css::DISABLED_FORM, self.is_disabled);

        if let Some(input) = self.search_input {
            let query = doc.value(input);
            if !query.is_empty() {
                self.search(doc, select, &query, hooks);
            }
        }

        self.value = if self.is_multiple {
            SelectValue::Multiple(doc.selected_values(select))
        } else {
            SelectValue::Single(doc.select_value(select))
        };
        hooks.emit(SelectWidget::NAME, select, Lifecycle::Rendered);
    }

    fn add_placeholder(&mut self, doc: &mut Document, select: NodeId) {
        if self.config.select_placeholder.is_empty() {
            return;
        }
        doc.set_selected_index(select, None);
        doc.clear_children(self.control);
        self.chips.clear();
        for item in &mut self.items {
            item.is_selected = false;
            doc.set_hidden(item.node, item.is_hidden());
        }
        let placeholder = element(doc, "span", &[class::CONTROL_PLACEHOLDER]);
        doc.set_text(placeholder, &self.config.select_placeholder);
        doc.prepend(self.control, placeholder);
        self.placeholder = Some(placeholder);
    }

    fn search(&mut self, doc: &mut Document, select: NodeId, query: &str, hooks: &mut Hooks) {
        if self.is_disabled || self.search_input.is_none() || self.items.is_empty() {
            return;
        }
        hooks.emit(
            SelectWidget::NAME,
            select,
            Lifecycle::BeforeSearch {
                query: query.to_string(),
            },
        );
        let query_lower = query.to_lowercase();
        for item in &mut self.items {
            let matches = item.label.to_lowercase().contains(&query_lower)
                || item
                    .find_of
                    .as_ref()
                    .is_some_and(|terms| terms.to_lowercase().contains(&query_lower));
            item.is_hidden_by_search = !matches;
            doc.set_hidden(item.node, item.is_hidden());
        }
        hooks.emit(
            SelectWidget::NAME,
            select,
            Lifecycle::Searched {
                query: query.to_string(),
            },
        );
    }

    fn show(&mut self, doc: &mut Document, select: NodeId, hooks: &mut Hooks) -> bool {
        if self.is_disabled || !self.items.iter().any(OptionItem::is_candidate) {
            return false;
        }
        hooks.emit(SelectWidget::NAME, select, Lifecycle::BeforeShow);
        doc.insert_after(select, self.overlay);
        if !doc.replace_class(self.control, css::INVALID_FORM, css::FOCUS_FORM) {
            doc.add_class(self.control, css::FOCUS_FORM);
        }
        doc.add_class(self.dropdown, class::DROPDOWN_SHOW);
        doc.set_markup(self.toggle_button, &self.config.close_icon);
        self.placement = self
            .placement
            .compute(doc.rect(self.dropdown), doc.viewport());
        self.placement.apply(doc, self.dropdown);
        self.arm_keyboard(doc);
        self.is_open = true;
        hooks.emit(SelectWidget::NAME, select, Lifecycle::Shown);
        true
    }

    /// Reset the cursor and move focus into the dropdown. The search field,
    /// when there is one, ends up focused.
    fn arm_keyboard(&mut self, doc: &mut Document) {
        for item in &self.items {
            doc.remove_class(item.node, class::HOVER);
        }
        let start = if self.placeholder.is_some() { None } else { Some(0) };
        self.cursor.reset(start);
        doc.focus(self.dropdown_list);
        if let Some(input) = self.search_input {
            doc.focus(input);
        }
    }

    fn hide(&mut self, doc: &mut Document, select: NodeId, hooks: &mut Hooks) {
        if self.is_disabled || !self.is_open {
            return;
        }
        hooks.emit(SelectWidget::NAME, select, Lifecycle::BeforeHide);
        doc.detach(self.overlay);
        doc.remove_class(self.dropdown, class::DROPDOWN_SHOW);
        doc.remove_class(self.control, css::FOCUS_FORM);
        doc.set_markup(self.toggle_button, &self.config.open_icon);
        self.is_open = false;
        hooks.emit(SelectWidget::NAME, select, Lifecycle::Hidden);
    }

    fn select_indexes(
        &mut self,
        doc: &mut Document,
        select: NodeId,
        selected: bool,
        indexes: &[usize],
        hooks: &mut Hooks,
    ) {
        if self.is_disabled {
            return;
        }
        hooks.emit(
            SelectWidget::NAME,
            select,
            Lifecycle::BeforeSelect {
                indexes: indexes.to_vec(),
                selected,
            },
        );
        let options = doc.options(select);
        for (position, &index) in indexes.iter().enumerate() {
            if !self.is_multiple && position > 0 {
                break;
            }
            let Some(&option) = options.get(index) else {
                continue;
            };
            if doc.is_disabled(option) {
                if self.is_multiple {
                    continue;
                }
                break;
            }
            doc.set_selected(option, selected);
        }
        self.render(doc, select, hooks);
        if !self.is_multiple || !self.items.iter().any(OptionItem::is_candidate) {
            self.hide(doc, select, hooks);
        }
        doc.notify(DomEvent::change(select));
        hooks.emit(
            SelectWidget::NAME,
            select,
            Lifecycle::Selected {
                indexes: indexes.to_vec(),
                selected,
            },
        );
    }

    fn key(&mut self, doc: &mut Document, select: NodeId, key: KeyEvent, hooks: &mut Hooks) {
        if !self.is_open {
            return;
        }
        match key.code {
            KeyCode::Up | KeyCode::Down => {
                doc.focus(self.dropdown_list);
                let hidden: Vec<bool> = self.items.iter().map(OptionItem::is_hidden).collect();
                let moved = if key.code == KeyCode::Up {
                    self.cursor.move_up(&hidden)
                } else {
                    self.cursor.move_down(&hidden)
                };
                if let Some(index) = moved {
                    for item in &self.items {
                        doc.remove_class(item.node, class::HOVER);
                    }
                    doc.add_class(self.items[index].node, class::HOVER);
                }
            }
            KeyCode::Enter => {
                let visible = self
                    .cursor
                    .index()
                    .filter(|&i| self.items.get(i).is_some_and(|item| !item.is_hidden()));
                if let Some(index) = visible {
                    self.select_indexes(doc, select, true, &[index], hooks);
                }
            }
            _ => {
                if let Some(input) = self.search_input {
                    doc.focus(input);
                }
            }
        }
    }

    fn route(&self, doc: &Document, select: NodeId, event: &DomEvent) -> Option<Message> {
        let target = event.target;
        match event.kind {
            EventKind::Click => {
                if target == self.overlay {
                    return Some(Message::Hide(select));
                }
                if !doc.contains(self.wrapped.container, target) {
                    return None;
                }
                if let Some(item) = self.items.iter().find(|item| doc.contains(item.node, target)) {
                    return (!item.is_hidden()).then_some(Message::Select {
                        node: select,
                        index: item.index,
                    });
                }
                for chip in &self.chips {
                    if chip.delete.is_some_and(|delete| doc.contains(delete, target)) {
                        return Some(Message::Deselect {
                            node: select,
                            index: chip.index,
                        });
                    }
                    if doc.contains(chip.text, target) {
                        return Some(Message::Show(select));
                    }
                }
                let toggles = target == self.wrapped.container
                    || target == self.control
                    || Some(target) == self.placeholder
                    || doc.contains(self.toggle_button, target);
                toggles.then_some(Message::Toggle(select))
            }
            EventKind::Input if Some(target) == self.search_input => Some(Message::Search(select)),
            EventKind::KeyDown(key)
                if self.is_open
                    && (target == self.dropdown_list || Some(target) == self.search_input) =>
            {
                Some(Message::Key { node: select, key })
            }
            EventKind::Invalid if target == select => Some(Message::Invalid(select)),
            _ => None,
        }
    }
}

/// The Select widget kind.
pub struct SelectWidget;

impl Widget for SelectWidget {
    const NAME: &'static str = "Select";
    type Config = SelectConfig;
    type Instance = SelectInstance;

    fn kind() -> NodeKind {
        NodeKind::Element("select")
    }

    fn mount(
        doc: &mut Document,
        node: NodeId,
        config: SelectConfig,
        hooks: &mut Hooks,
    ) -> Result<SelectInstance> {
        Ok(SelectInstance::build(doc, node, config, hooks))
    }

    fn unmount(doc: &mut Document, node: NodeId, instance: SelectInstance) {
        instance.teardown(doc, node);
    }
}

/// Messages for the select component.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Message {
    /// Open the dropdown if closed, close it if open.
    Toggle(NodeId),
    /// Open the dropdown; a no-op when it is already open.
    Show(NodeId),
    Hide(NodeId),
    /// Pick the option at `index`.
    Select { node: NodeId, index: usize },
    /// Drop the option at `index` from a multiple selection.
    Deselect { node: NodeId, index: usize },
    /// The search field changed.
    Search(NodeId),
    Key { node: NodeId, key: KeyEvent },
    /// The select failed validation.
    Invalid(NodeId),
    /// The form carrying one or more selects was reset.
    FormReset(NodeId),
    Render(NodeId),
}

/// Handle over a collection of activated selects.
///
/// # Example
///
/// ```rust,ignore
/// let mut doc = Document::parse(r#"<select class="UI_Select">...</select>"#)?;
/// let mut selects = Select::activate(&mut doc, &SelectOptions::new().with_search(true))?;
/// let node = selects.get(&doc)[0];
/// selects.selected(&mut doc, true, &[1], node)?;
/// ```
#[derive(Debug)]
pub struct Select {
    collection: Collection<SelectWidget>,
}

impl Select {
    /// Activate every `<select>` matching the options' selector.
    pub fn activate(doc: &mut Document, options: &SelectOptions) -> Result<Self> {
        Self::activate_with(doc, &Scanner::default(), options, Hooks::new())
    }

    /// Activate with a custom scanner and lifecycle observers.
    pub fn activate_with(
        doc: &mut Document,
        scanner: &Scanner,
        options: &SelectOptions,
        hooks: Hooks,
    ) -> Result<Self> {
        let selector = options
            .selector
            .clone()
            .unwrap_or_else(SelectWidget::default_selector);
        let collection = Collection::scan(doc, scanner, &selector)?.with_hooks(hooks);
        Self::from_collection(doc, collection, options)
    }

    /// Activate explicitly given nodes. A node that is not a `<select>` is
    /// a structural error.
    pub fn activate_nodes(
        doc: &mut Document,
        scanner: &Scanner,
        nodes: impl IntoIterator<Item = NodeId>,
        options: &SelectOptions,
    ) -> Result<Self> {
        let collection = Collection::from_nodes(doc, scanner, nodes)?;
        Self::from_collection(doc, collection, options)
    }

    fn from_collection(
        doc: &mut Document,
        collection: Collection<SelectWidget>,
        options: &SelectOptions,
    ) -> Result<Self> {
        let mut select = Self { collection };
        select.reactivate(doc, options)?;
        Ok(select)
    }

    /// Tear down and rebuild every select of the collection with new
    /// options. Open dropdowns and search queries are lost.
    pub fn reactivate(&mut self, doc: &mut Document, options: &SelectOptions) -> Result<()> {
        self.collection.activate(doc, options)
    }

    pub fn hooks_mut(&mut self) -> &mut Hooks {
        self.collection.hooks_mut()
    }

    fn each(
        &mut self,
        doc: &mut Document,
        scope: impl Into<Scope>,
        mut f: impl FnMut(&mut Document, NodeId, &mut SelectInstance, &mut Hooks),
    ) {
        for node in self.collection.targets(doc, scope.into()) {
            self.collection
                .with_instance(doc, node, |doc, instance, hooks| f(doc, node, instance, hooks));
        }
    }

    /// Open the dropdown in `scope`, closing every other one first. With
    /// [`Scope::All`] the first select able to open wins.
    pub fn show(&mut self, doc: &mut Document, scope: impl Into<Scope>) {
        let scope = scope.into();
        self.hide(doc, Scope::All);
        for node in self.collection.targets(doc, scope) {
            let shown = self
                .collection
                .with_instance(doc, node, |doc, instance, hooks| {
                    instance.show(doc, node, hooks)
                })
                .unwrap_or(false);
            if shown {
                break;
            }
        }
    }

    pub fn hide(&mut self, doc: &mut Document, scope: impl Into<Scope>) {
        self.each(doc, scope, |doc, node, instance, hooks| {
            instance.hide(doc, node, hooks)
        });
    }

    /// Hide dropdown items matching neither `query` nor their
    /// `data-find-of`, case-insensitively. Selects without a search field
    /// are left alone.
    pub fn search(&mut self, doc: &mut Document, query: &str, scope: impl Into<Scope>) {
        self.each(doc, scope, |doc, node, instance, hooks| {
            instance.search(doc, node, query, hooks)
        });
    }

    /// Set the selectedness of the options at `indexes`, then re-render,
    /// close the dropdown unless a multiple select still has candidates,
    /// and notify `change`.
    ///
    /// A single select honors only the first index. Disabled options are
    /// never changed; in single mode one stops the loop. Out-of-range
    /// indexes are skipped.
    pub fn selected(
        &mut self,
        doc: &mut Document,
        selected: bool,
        indexes: &[usize],
        scope: impl Into<Scope>,
    ) -> Result<()> {
        if indexes.is_empty() {
            return Err(Error::InvalidArgument("indexes is empty".to_string()));
        }
        self.each(doc, scope, |doc, node, instance, hooks| {
            instance.select_indexes(doc, node, selected, indexes, hooks)
        });
        Ok(())
    }

    /// Rebuild the generated markup from the `<option>` elements.
    pub fn render(&mut self, doc: &mut Document, scope: impl Into<Scope>) {
        self.each(doc, scope, |doc, node, instance, hooks| {
            instance.render(doc, node, hooks)
        });
    }

    /// Handle a key press on an open dropdown.
    ///
    /// Up and Down move the cursor over visible items with wraparound,
    /// focusing the list first. Enter picks the item under the cursor. Any
    /// other key focuses the search field.
    pub fn key(&mut self, doc: &mut Document, node: NodeId, key: KeyEvent) {
        self.each(doc, node, |doc, node, instance, hooks| {
            instance.key(doc, node, key, hooks)
        });
    }

    /// Flag the control as invalid.
    pub fn mark_invalid(&mut self, doc: &mut Document, node: NodeId) {
        if let Some(instance) = self.instance(doc, node) {
            let control = instance.control;
            doc.add_class(control, css::INVALID_FORM);
        }
    }

    /// Tear down the selects in `scope`, restoring their markup.
    pub fn remove(&mut self, doc: &mut Document, scope: impl Into<Scope>) {
        self.collection.remove(doc, scope);
    }

    /// The live, activated selects of the collection.
    pub fn get(&self, doc: &Document) -> Vec<NodeId> {
        self.collection.get(doc)
    }

    pub fn instance<'d>(&self, doc: &'d Document, node: NodeId) -> Option<&'d SelectInstance> {
        self.collection.instance(doc, node)
    }

    pub fn value<'d>(&self, doc: &'d Document, node: NodeId) -> Option<&'d SelectValue> {
        self.instance(doc, node).map(SelectInstance::value)
    }

    pub fn is_open(&self, doc: &Document, node: NodeId) -> bool {
        self.instance(doc, node).is_some_and(SelectInstance::is_open)
    }
}

impl Component for Select {
    type Message = Message;

    fn route(&self, doc: &Document, event: &DomEvent) -> Option<Message> {
        if event.kind == EventKind::Reset {
            let owns = self
                .get(doc)
                .into_iter()
                .any(|node| doc.form_of(node) == Some(event.target));
            return owns.then_some(Message::FormReset(event.target));
        }
        self.get(doc).into_iter().find_map(|node| {
            self.instance(doc, node)
                .and_then(|instance| instance.route(doc, node, event))
        })
    }

    fn update(&mut self, doc: &mut Document, msg: Message) -> Result<Command<Message>> {
        match msg {
            Message::Toggle(node) => {
                if self.is_open(doc, node) {
                    self.hide(doc, node);
                } else {
                    self.show(doc, node);
                }
            }
            Message::Show(node) => {
                if !self.is_open(doc, node) {
                    self.show(doc, node);
                }
            }
            Message::Hide(node) => self.hide(doc, node),
            Message::Select { node, index } => self.selected(doc, true, &[index], node)?,
            Message::Deselect { node, index } => self.selected(doc, false, &[index], node)?,
            Message::Search(node) => {
                let query = self
                    .instance(doc, node)
                    .and_then(SelectInstance::search_input)
                    .map(|input| doc.value(input));
                if let Some(query) = query {
                    self.search(doc, &query, node);
                }
            }
            Message::Key { node, key } => self.key(doc, node, key),
            Message::Invalid(node) => self.mark_invalid(doc, node),
            Message::FormReset(form) => {
                let renders: Vec<_> = self
                    .get(doc)
                    .into_iter()
                    .filter(|&node| doc.form_of(node) == Some(form))
                    .map(|node| Command::after(RESET_SETTLE, Message::Render(node)))
                    .collect();
                return Ok(Command::batch(renders));
            }
            Message::Render(node) => {
                tracing::debug!(node = ?node, "deferred select render");
                self.render(doc, node);
            }
        }
        Ok(Command::none())
    }

    fn view(&self, doc: &Document, frame: &mut Frame, area: Rect) {
        let mut y = area.y;
        for node in self.get(doc) {
            let Some(instance) = self.instance(doc, node) else {
                continue;
            };
            let preview = SelectPreview::new(doc, instance);
            let height = preview.height().min(area.bottom().saturating_sub(y));
            if height == 0 {
                break;
            }
            frame.render_widget(preview, Rect::new(area.x, y, area.width, height));
            y += height;
        }
    }
}

#[cfg(test)]
mod tests;
