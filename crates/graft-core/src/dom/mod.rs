//! In-memory markup tree that widgets are grafted onto.
//!
//! A [`Document`] is an arena of nodes addressed by [`NodeId`] handles. Ids
//! stay valid until the node (or one of its ancestors) is
//! [`remove`](Document::remove)d; every accessor tolerates stale ids by
//! returning an empty answer, and every mutator ignores them.
//!
//! The document carries just enough browser semantics for form widgets:
//! class lists, attributes, `data-*` datasets, text content, form control
//! state (value, disabled, selected, ...), a focused node, per-node layout
//! boxes and a viewport.

mod controls;
mod markup;
mod selector;

pub use selector::Selector;

use crate::error::Result;
use crate::event::DomEvent;
use crate::store::InstanceStore;
use ratatui::layout::Rect;
use slotmap::{new_key_type, SlotMap};
use std::collections::BTreeMap;
use std::fmt;

new_key_type! {
    /// Stable handle to a node of a [`Document`].
    pub struct NodeId;
}

/// Tag of the root element every document starts with.
pub const ROOT_TAG: &str = "body";

const VOID_TAGS: [&str; 12] = [
    "area", "br", "col", "embed", "hr", "img", "input", "link", "meta", "source", "track", "wbr",
];

pub(crate) fn is_void_tag(tag: &str) -> bool {
    VOID_TAGS.iter().any(|t| t.eq_ignore_ascii_case(tag))
}

#[derive(Debug, Clone)]
enum NodeData {
    Element(Element),
    Text(String),
}

#[derive(Debug, Clone)]
struct Node {
    parent: Option<NodeId>,
    children: Vec<NodeId>,
    data: NodeData,
}

#[derive(Debug, Clone, Default)]
struct Element {
    tag: String,
    /// `None` when the element carries no `class` attribute at all.
    class: Option<Vec<String>>,
    attrs: BTreeMap<String, String>,
    style: BTreeMap<String, String>,
    hidden: bool,
    rect: Rect,
    form: FormState,
}

#[derive(Debug, Clone, Default)]
struct FormState {
    value: String,
    disabled: bool,
    required: bool,
    multiple: bool,
    selected: bool,
    default_selected: bool,
}

/// An in-memory markup tree.
pub struct Document {
    nodes: SlotMap<NodeId, Node>,
    root: NodeId,
    focused: Option<NodeId>,
    viewport: Rect,
    location_hash: String,
    notifications: Vec<DomEvent>,
    store: InstanceStore,
}

impl fmt::Debug for Document {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Document")
            .field("nodes", &self.nodes.len())
            .field("focused", &self.focused)
            .field("viewport", &self.viewport)
            .finish()
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl Document {
    /// Create an empty document holding only its root element.
    pub fn new() -> Self {
        let mut nodes = SlotMap::with_key();
        let root = nodes.insert(Node {
            parent: None,
            children: Vec::new(),
            data: NodeData::Element(Element {
                tag: ROOT_TAG.to_string(),
                ..Element::default()
            }),
        });
        Self {
            nodes,
            root,
            focused: None,
            viewport: Rect::new(0, 0, 80, 24),
            location_hash: String::new(),
            notifications: Vec::new(),
            store: InstanceStore::default(),
        }
    }

    /// Parse a markup fragment into a fresh document, under the root element.
    pub fn parse(markup: &str) -> Result<Self> {
        let mut doc = Self::new();
        let root = doc.root;
        doc.append_markup(root, markup)?;
        Ok(doc)
    }

    /// Parse `markup` and append the resulting nodes to `parent`.
    ///
    /// Returns the top-level nodes that were created.
    pub fn append_markup(&mut self, parent: NodeId, markup: &str) -> Result<Vec<NodeId>> {
        let created = markup::parse_fragment(self, parent, markup)?;
        for &node in &created {
            self.initialize_controls(node);
        }
        Ok(created)
    }

    /// The root element (`body`).
    pub fn body(&self) -> NodeId {
        self.root
    }

    /// Whether `node` still exists in the arena (attached or not).
    pub fn exists(&self, node: NodeId) -> bool {
        self.nodes.contains_key(node)
    }

    // ----- construction -------------------------------------------------

    /// Create a detached element.
    pub fn create_element(&mut self, tag: &str) -> NodeId {
        self.nodes.insert(Node {
            parent: None,
            children: Vec::new(),
            data: NodeData::Element(Element {
                tag: tag.to_ascii_lowercase(),
                ..Element::default()
            }),
        })
    }

    /// Create a detached text node.
    pub fn create_text(&mut self, text: &str) -> NodeId {
        self.nodes.insert(Node {
            parent: None,
            children: Vec::new(),
            data: NodeData::Text(text.to_string()),
        })
    }

    pub(crate) fn create_element_with(&mut self, tag: &str, attrs: Vec<(String, String)>) -> NodeId {
        let node = self.create_element(tag);
        for (name, value) in attrs {
            self.set_attr(node, &name, &value);
        }
        if let Some(value) = self.attr(node, "value").map(str::to_string) {
            if self.tag(node) == Some("input") {
                self.set_value(node, &value);
            }
        }
        node
    }

    // ----- element access -----------------------------------------------

    fn element(&self, node: NodeId) -> Option<&Element> {
        match self.nodes.get(node).map(|n| &n.data) {
            Some(NodeData::Element(el)) => Some(el),
            _ => None,
        }
    }

    fn element_mut(&mut self, node: NodeId) -> Option<&mut Element> {
        match self.nodes.get_mut(node).map(|n| &mut n.data) {
            Some(NodeData::Element(el)) => Some(el),
            _ => None,
        }
    }

    /// Lower-cased tag name, `None` for text nodes and stale ids.
    pub fn tag(&self, node: NodeId) -> Option<&str> {
        self.element(node).map(|el| el.tag.as_str())
    }

    /// Whether `node` is a live element.
    pub fn is_element(&self, node: NodeId) -> bool {
        self.element(node).is_some()
    }

    // ----- tree navigation ----------------------------------------------

    /// Parent of `node`, if attached.
    pub fn parent(&self, node: NodeId) -> Option<NodeId> {
        self.nodes.get(node).and_then(|n| n.parent)
    }

    /// All child nodes (elements and text) in order.
    pub fn children(&self, node: NodeId) -> &[NodeId] {
        self.nodes
            .get(node)
            .map(|n| n.children.as_slice())
            .unwrap_or(&[])
    }

    /// Element children in order.
    pub fn element_children(&self, node: NodeId) -> Vec<NodeId> {
        self.children(node)
            .iter()
            .copied()
            .filter(|&child| self.is_element(child))
            .collect()
    }

    /// First child node (element or text).
    pub fn first_child(&self, node: NodeId) -> Option<NodeId> {
        self.children(node).first().copied()
    }

    /// Ancestors of `node`, nearest first.
    pub fn ancestors(&self, node: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut cursor = self.parent(node);
        while let Some(current) = cursor {
            out.push(current);
            cursor = self.parent(current);
        }
        out
    }

    /// Element descendants of `node` in document order, excluding `node`.
    pub fn descendants(&self, node: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack: Vec<NodeId> = self.children(node).iter().rev().copied().collect();
        while let Some(current) = stack.pop() {
            if self.is_element(current) {
                out.push(current);
            }
            stack.extend(self.children(current).iter().rev().copied());
        }
        out
    }

    /// Whether `node` is `ancestor` or lies inside it.
    pub fn contains(&self, ancestor: NodeId, node: NodeId) -> bool {
        if !self.exists(node) {
            return false;
        }
        node == ancestor || self.ancestors(node).contains(&ancestor)
    }

    /// Whether `node` is attached under the document root.
    pub fn is_connected(&self, node: NodeId) -> bool {
        self.contains(self.root, node)
    }

    /// Position of `node` among its parent's children.
    pub fn index_in_parent(&self, node: NodeId) -> Option<usize> {
        let parent = self.parent(node)?;
        self.children(parent).iter().position(|&c| c == node)
    }

    // ----- tree mutation ------------------------------------------------

    fn can_adopt(&self, parent: NodeId, child: NodeId) -> bool {
        self.is_element(parent) && self.exists(child) && !self.contains(child, parent)
    }

    /// Append `child` as the last child of `parent`, moving it if attached.
    pub fn append(&mut self, parent: NodeId, child: NodeId) {
        if !self.can_adopt(parent, child) {
            return;
        }
        self.detach(child);
        if let Some(p) = self.nodes.get_mut(parent) {
            p.children.push(child);
        }
        if let Some(c) = self.nodes.get_mut(child) {
            c.parent = Some(parent);
        }
    }

    /// Insert `child` as the first child of `parent`, moving it if attached.
    pub fn prepend(&mut self, parent: NodeId, child: NodeId) {
        if !self.can_adopt(parent, child) {
            return;
        }
        self.detach(child);
        if let Some(p) = self.nodes.get_mut(parent) {
            p.children.insert(0, child);
        }
        if let Some(c) = self.nodes.get_mut(child) {
            c.parent = Some(parent);
        }
    }

    /// Insert `node` immediately before `reference`. No-op when `reference`
    /// is detached.
    pub fn insert_before(&mut self, reference: NodeId, node: NodeId) {
        self.insert_beside(reference, node, 0);
    }

    /// Insert `node` immediately after `reference`. No-op when `reference`
    /// is detached.
    pub fn insert_after(&mut self, reference: NodeId, node: NodeId) {
        self.insert_beside(reference, node, 1);
    }

    fn insert_beside(&mut self, reference: NodeId, node: NodeId, offset: usize) {
        if reference == node {
            return;
        }
        let Some(parent) = self.parent(reference) else {
            return;
        };
        if !self.can_adopt(parent, node) {
            return;
        }
        self.detach(node);
        let Some(position) = self.index_in_parent(reference) else {
            return;
        };
        if let Some(p) = self.nodes.get_mut(parent) {
            p.children.insert(position + offset, node);
        }
        if let Some(n) = self.nodes.get_mut(node) {
            n.parent = Some(parent);
        }
    }

    /// Detach `node` from its parent, keeping it (and its subtree) alive.
    pub fn detach(&mut self, node: NodeId) {
        let Some(parent) = self.parent(node) else {
            return;
        };
        if let Some(p) = self.nodes.get_mut(parent) {
            p.children.retain(|&c| c != node);
        }
        if let Some(n) = self.nodes.get_mut(node) {
            n.parent = None;
        }
    }

    /// Detach `node` and free it together with its whole subtree.
    ///
    /// The root element cannot be removed.
    pub fn remove(&mut self, node: NodeId) {
        if node == self.root || !self.exists(node) {
            return;
        }
        self.detach(node);
        let mut stack = vec![node];
        while let Some(current) = stack.pop() {
            if let Some(removed) = self.nodes.remove(current) {
                stack.extend(removed.children);
            }
            self.store.forget(current);
            if self.focused == Some(current) {
                self.focused = None;
            }
        }
    }

    /// Remove and free every child of `node`.
    pub fn clear_children(&mut self, node: NodeId) {
        let children: Vec<NodeId> = self.children(node).to_vec();
        for child in children {
            self.remove(child);
        }
    }

    // ----- classes ------------------------------------------------------

    /// The class list of `node`, empty when it has none.
    pub fn classes(&self, node: NodeId) -> &[String] {
        self.element(node)
            .and_then(|el| el.class.as_deref())
            .unwrap_or(&[])
    }

    /// Whether `node` carries `class`.
    pub fn has_class(&self, node: NodeId, class: &str) -> bool {
        self.classes(node).iter().any(|c| c == class)
    }

    /// Add `class` to `node` unless already present.
    pub fn add_class(&mut self, node: NodeId, class: &str) {
        if class.is_empty() {
            return;
        }
        if let Some(el) = self.element_mut(node) {
            let list = el.class.get_or_insert_with(Vec::new);
            if !list.iter().any(|c| c == class) {
                list.push(class.to_string());
            }
        }
    }

    /// Remove `class` from `node`. The `class` attribute stays, possibly
    /// empty.
    pub fn remove_class(&mut self, node: NodeId, class: &str) {
        if let Some(list) = self.element_mut(node).and_then(|el| el.class.as_mut()) {
            list.retain(|c| c != class);
        }
    }

    /// Add or remove `class` depending on `on`.
    pub fn toggle_class(&mut self, node: NodeId, class: &str, on: bool) {
        if on {
            self.add_class(node, class);
        } else {
            self.remove_class(node, class);
        }
    }

    /// Replace `old` with `new` in place. Returns `false` when `old` was
    /// absent.
    pub fn replace_class(&mut self, node: NodeId, old: &str, new: &str) -> bool {
        let Some(list) = self.element_mut(node).and_then(|el| el.class.as_mut()) else {
            return false;
        };
        let Some(position) = list.iter().position(|c| c == old) else {
            return false;
        };
        if list.iter().any(|c| c == new) {
            list.remove(position);
        } else {
            list[position] = new.to_string();
        }
        true
    }

    /// The raw `class` attribute, `None` when the attribute is absent.
    pub fn class_name(&self, node: NodeId) -> Option<String> {
        self.element(node)
            .and_then(|el| el.class.as_ref())
            .map(|list| list.join(" "))
    }

    /// Overwrite the `class` attribute. `None` removes the attribute.
    pub fn set_class_name(&mut self, node: NodeId, class_name: Option<&str>) {
        if let Some(el) = self.element_mut(node) {
            el.class = class_name.map(|s| s.split_whitespace().map(str::to_string).collect());
        }
    }

    // ----- attributes ---------------------------------------------------

    /// Attribute value of `node`. `class`, `style` and `hidden` have
    /// dedicated accessors and are not returned here.
    pub fn attr(&self, node: NodeId, name: &str) -> Option<&str> {
        self.element(node)
            .and_then(|el| el.attrs.get(&name.to_ascii_lowercase()))
            .map(String::as_str)
    }

    /// Whether `node` carries attribute `name`.
    pub fn has_attr(&self, node: NodeId, name: &str) -> bool {
        let name = name.to_ascii_lowercase();
        match name.as_str() {
            "class" => self.element(node).is_some_and(|el| el.class.is_some()),
            "hidden" => self.is_hidden(node),
            "style" => self.element(node).is_some_and(|el| !el.style.is_empty()),
            _ => self.attr(node, &name).is_some(),
        }
    }

    /// Set an attribute, reflecting boolean form attributes onto the
    /// control state.
    pub fn set_attr(&mut self, node: NodeId, name: &str, value: &str) {
        let name = name.to_ascii_lowercase();
        match name.as_str() {
            "class" => self.set_class_name(node, Some(value)),
            "hidden" => self.set_hidden(node, true),
            "style" => {
                for declaration in value.split(';') {
                    if let Some((prop, val)) = declaration.split_once(':') {
                        self.set_style(node, prop.trim(), val.trim());
                    }
                }
            }
            _ => {
                let Some(el) = self.element_mut(node) else {
                    return;
                };
                match name.as_str() {
                    "disabled" => el.form.disabled = true,
                    "required" => el.form.required = true,
                    "multiple" => el.form.multiple = true,
                    "selected" => {
                        el.form.default_selected = true;
                        el.form.selected = true;
                    }
                    _ => {}
                }
                el.attrs.insert(name, value.to_string());
            }
        }
    }

    /// Remove an attribute, reflecting boolean form attributes.
    pub fn remove_attr(&mut self, node: NodeId, name: &str) {
        let name = name.to_ascii_lowercase();
        match name.as_str() {
            "class" => self.set_class_name(node, None),
            "hidden" => self.set_hidden(node, false),
            "style" => {
                if let Some(el) = self.element_mut(node) {
                    el.style.clear();
                }
            }
            _ => {
                let Some(el) = self.element_mut(node) else {
                    return;
                };
                match name.as_str() {
                    "disabled" => el.form.disabled = false,
                    "required" => el.form.required = false,
                    "multiple" => el.form.multiple = false,
                    "selected" => el.form.default_selected = false,
                    _ => {}
                }
                el.attrs.remove(&name);
            }
        }
    }

    /// The `id` attribute.
    pub fn id(&self, node: NodeId) -> Option<&str> {
        self.attr(node, "id")
    }

    /// First element in document order whose `id` equals `id`.
    pub fn element_by_id(&self, id: &str) -> Option<NodeId> {
        std::iter::once(self.root)
            .chain(self.descendants(self.root))
            .find(|&node| self.id(node) == Some(id))
    }

    /// `data-*` attributes keyed by their camel-cased name
    /// (`data-select-placeholder` becomes `selectPlaceholder`).
    pub fn dataset(&self, node: NodeId) -> BTreeMap<String, String> {
        let Some(el) = self.element(node) else {
            return BTreeMap::new();
        };
        el.attrs
            .iter()
            .filter_map(|(name, value)| {
                name.strip_prefix("data-")
                    .map(|rest| (camel_case(rest), value.clone()))
            })
            .collect()
    }

    // ----- text ---------------------------------------------------------

    /// Concatenated text of `node` and all its descendants.
    pub fn text_content(&self, node: NodeId) -> String {
        let mut out = String::new();
        self.collect_text(node, &mut out);
        out
    }

    fn collect_text(&self, node: NodeId, out: &mut String) {
        match self.nodes.get(node).map(|n| &n.data) {
            Some(NodeData::Text(text)) => out.push_str(text),
            Some(NodeData::Element(_)) => {
                for &child in self.children(node) {
                    self.collect_text(child, out);
                }
            }
            None => {}
        }
    }

    /// Replace the content of `node` with a single text node.
    pub fn set_text(&mut self, node: NodeId, text: &str) {
        if !self.is_element(node) {
            return;
        }
        self.clear_children(node);
        if !text.is_empty() {
            let child = self.create_text(text);
            self.append(node, child);
        }
    }

    /// Replace the content of `node` with parsed `markup`.
    ///
    /// Markup that does not parse is inserted as plain text instead.
    pub fn set_markup(&mut self, node: NodeId, markup: &str) {
        if !self.is_element(node) {
            return;
        }
        self.clear_children(node);
        if let Err(err) = self.append_markup(node, markup) {
            tracing::debug!(%err, "markup rejected, inserting as text");
            self.set_text(node, markup);
        }
    }

    // ----- presentation -------------------------------------------------

    /// Inline style property of `node`.
    pub fn style(&self, node: NodeId, prop: &str) -> Option<&str> {
        self.element(node)
            .and_then(|el| el.style.get(prop))
            .map(String::as_str)
    }

    /// Set an inline style property.
    pub fn set_style(&mut self, node: NodeId, prop: &str, value: &str) {
        if let Some(el) = self.element_mut(node) {
            el.style.insert(prop.to_string(), value.to_string());
        }
    }

    /// Whether `node` carries the `hidden` flag.
    pub fn is_hidden(&self, node: NodeId) -> bool {
        self.element(node).is_some_and(|el| el.hidden)
    }

    /// Set or clear the `hidden` flag.
    pub fn set_hidden(&mut self, node: NodeId, hidden: bool) {
        if let Some(el) = self.element_mut(node) {
            el.hidden = hidden;
        }
    }

    /// Layout box of `node` in viewport coordinates, as last reported by the
    /// host.
    pub fn rect(&self, node: NodeId) -> Rect {
        self.element(node).map(|el| el.rect).unwrap_or_default()
    }

    /// Record the layout box of `node`.
    pub fn set_rect(&mut self, node: NodeId, rect: Rect) {
        if let Some(el) = self.element_mut(node) {
            el.rect = rect;
        }
    }

    /// The visible viewport.
    pub fn viewport(&self) -> Rect {
        self.viewport
    }

    /// Resize the visible viewport.
    pub fn set_viewport(&mut self, viewport: Rect) {
        self.viewport = viewport;
    }

    // ----- focus, location, notifications -------------------------------

    /// Give keyboard focus to `node`.
    pub fn focus(&mut self, node: NodeId) {
        if self.is_element(node) {
            self.focused = Some(node);
        }
    }

    /// Drop keyboard focus if `node` holds it.
    pub fn blur(&mut self, node: NodeId) {
        if self.focused == Some(node) {
            self.focused = None;
        }
    }

    /// The node holding keyboard focus.
    pub fn focused(&self) -> Option<NodeId> {
        self.focused
    }

    /// The location fragment without its leading `#`.
    pub fn location_hash(&self) -> &str {
        &self.location_hash
    }

    /// Set the location fragment; a leading `#` is stripped.
    pub fn set_location_hash(&mut self, hash: &str) {
        self.location_hash = hash.trim_start_matches('#').to_string();
    }

    /// Queue a notification raised by a widget (for instance `change` on a
    /// source `<select>`).
    pub fn notify(&mut self, event: DomEvent) {
        self.notifications.push(event);
    }

    /// Drain notifications raised since the last call.
    pub fn take_notifications(&mut self) -> Vec<DomEvent> {
        std::mem::take(&mut self.notifications)
    }

    /// Widget instance side-table.
    pub fn store(&self) -> &InstanceStore {
        &self.store
    }

    /// Mutable widget instance side-table.
    pub fn store_mut(&mut self) -> &mut InstanceStore {
        &mut self.store
    }

    // ----- selectors ----------------------------------------------------

    /// All elements matching `selector` in document order, root included.
    pub fn query_all(&self, selector: &str) -> Result<Vec<NodeId>> {
        let selector = Selector::parse(selector)?;
        Ok(std::iter::once(self.root)
            .chain(self.descendants(self.root))
            .filter(|&node| selector.matches(self, node))
            .collect())
    }

    /// Descendants of `scope` matching `selector`.
    pub fn query_all_in(&self, scope: NodeId, selector: &str) -> Result<Vec<NodeId>> {
        let selector = Selector::parse(selector)?;
        Ok(self
            .descendants(scope)
            .into_iter()
            .filter(|&node| selector.matches(self, node))
            .collect())
    }

    /// First element matching `selector`.
    pub fn query(&self, selector: &str) -> Result<Option<NodeId>> {
        Ok(self.query_all(selector)?.into_iter().next())
    }

    /// Whether `node` matches `selector`.
    pub fn matches(&self, node: NodeId, selector: &str) -> Result<bool> {
        Ok(Selector::parse(selector)?.matches(self, node))
    }

    /// `node` itself or its nearest ancestor matching `selector`.
    pub fn closest(&self, node: NodeId, selector: &str) -> Result<Option<NodeId>> {
        let selector = Selector::parse(selector)?;
        Ok(selector.closest(self, node))
    }

    // ----- serialization ------------------------------------------------

    /// Serialize `node` and its subtree back to markup.
    pub fn outer_html(&self, node: NodeId) -> String {
        let mut out = String::new();
        self.write_html(node, &mut out);
        out
    }

    /// Serialize the children of `node`.
    pub fn inner_html(&self, node: NodeId) -> String {
        let mut out = String::new();
        for &child in self.children(node) {
            self.write_html(child, &mut out);
        }
        out
    }

    fn write_html(&self, node: NodeId, out: &mut String) {
        let Some(data) = self.nodes.get(node).map(|n| &n.data) else {
            return;
        };
        let el = match data {
            NodeData::Text(text) => {
                out.push_str(&escape(text, false));
                return;
            }
            NodeData::Element(el) => el,
        };
        out.push('<');
        out.push_str(&el.tag);
        if let Some(class) = &el.class {
            out.push_str(&format!(" class=\"{}\"", escape(&class.join(" "), true)));
        }
        for (name, value) in &el.attrs {
            if value.is_empty() {
                out.push_str(&format!(" {name}"));
            } else {
                out.push_str(&format!(" {name}=\"{}\"", escape(value, true)));
            }
        }
        if !el.style.is_empty() {
            let style: Vec<String> = el.style.iter().map(|(p, v)| format!("{p}: {v}")).collect();
            out.push_str(&format!(" style=\"{}\"", escape(&style.join("; "), true)));
        }
        if el.hidden {
            out.push_str(" hidden");
        }
        out.push('>');
        if is_void_tag(&el.tag) {
            return;
        }
        for &child in self.children(node) {
            self.write_html(child, out);
        }
        out.push_str(&format!("</{}>", el.tag));
    }
}

fn camel_case(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    let mut upper = false;
    for ch in name.chars() {
        if ch == '-' {
            upper = true;
            continue;
        }
        if upper && ch.is_ascii_lowercase() {
            out.push(ch.to_ascii_uppercase());
        } else {
            if upper {
                out.push('-');
            }
            out.push(ch);
        }
        upper = false;
    }
    if upper {
        out.push('-');
    }
    out
}

fn escape(text: &str, attribute: bool) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' if attribute => out.push_str("&quot;"),
            _ => out.push(ch),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_document_has_body_root() {
        let doc = Document::new();
        assert_eq!(doc.tag(doc.body()), Some("body"));
        assert!(doc.children(doc.body()).is_empty());
    }

    #[test]
    fn append_moves_existing_child() {
        let mut doc = Document::new();
        let a = doc.create_element("div");
        let b = doc.create_element("div");
        let child = doc.create_element("span");
        doc.append(doc.body(), a);
        doc.append(doc.body(), b);
        doc.append(a, child);
        doc.append(b, child);
        assert!(doc.children(a).is_empty());
        assert_eq!(doc.children(b), &[child]);
        assert_eq!(doc.parent(child), Some(b));
    }

    #[test]
    fn insert_before_and_after_keep_order() {
        let mut doc = Document::parse("<p id=\"mid\"></p>").unwrap();
        let mid = doc.element_by_id("mid").unwrap();
        let before = doc.create_element("i");
        let after = doc.create_element("b");
        doc.insert_before(mid, before);
        doc.insert_after(mid, after);
        assert_eq!(doc.children(doc.body()), &[before, mid, after]);
    }

    #[test]
    fn insert_beside_detached_reference_is_noop() {
        let mut doc = Document::new();
        let lonely = doc.create_element("div");
        let other = doc.create_element("div");
        doc.insert_after(lonely, other);
        assert_eq!(doc.parent(other), None);
    }

    #[test]
    fn cannot_append_ancestor_into_descendant() {
        let mut doc = Document::parse("<div id=\"outer\"><div id=\"inner\"></div></div>").unwrap();
        let outer = doc.element_by_id("outer").unwrap();
        let inner = doc.element_by_id("inner").unwrap();
        doc.append(inner, outer);
        assert_eq!(doc.parent(inner), Some(outer));
        assert_eq!(doc.parent(outer), Some(doc.body()));
    }

    #[test]
    fn remove_frees_subtree() {
        let mut doc = Document::parse("<div id=\"a\"><span id=\"b\"></span></div>").unwrap();
        let a = doc.element_by_id("a").unwrap();
        let b = doc.element_by_id("b").unwrap();
        doc.remove(a);
        assert!(!doc.exists(a));
        assert!(!doc.exists(b));
        assert!(doc.children(doc.body()).is_empty());
    }

    #[test]
    fn stale_ids_are_tolerated() {
        let mut doc = Document::new();
        let node = doc.create_element("div");
        doc.remove(node);
        doc.add_class(node, "x");
        assert!(!doc.has_class(node, "x"));
        assert_eq!(doc.tag(node), None);
        assert!(doc.children(node).is_empty());
    }

    #[test]
    fn class_list_operations() {
        let mut doc = Document::new();
        let node = doc.create_element("div");
        assert_eq!(doc.class_name(node), None);
        doc.add_class(node, "a");
        doc.add_class(node, "b");
        doc.add_class(node, "a");
        assert_eq!(doc.class_name(node).as_deref(), Some("a b"));
        assert!(doc.replace_class(node, "a", "c"));
        assert_eq!(doc.classes(node), &["c".to_string(), "b".to_string()]);
        doc.remove_class(node, "c");
        doc.remove_class(node, "b");
        assert_eq!(doc.class_name(node).as_deref(), Some(""));
        doc.set_class_name(node, None);
        assert!(!doc.has_attr(node, "class"));
    }

    #[test]
    fn dataset_is_camel_cased() {
        let doc = Document::parse(
            "<select id=\"s\" data-with-search=\"TRUE\" data-select-placeholder=\"Pick\"></select>",
        )
        .unwrap();
        let node = doc.element_by_id("s").unwrap();
        let dataset = doc.dataset(node);
        assert_eq!(dataset.get("withSearch").map(String::as_str), Some("TRUE"));
        assert_eq!(dataset.get("selectPlaceholder").map(String::as_str), Some("Pick"));
    }

    #[test]
    fn camel_case_edge_cases() {
        assert_eq!(camel_case("find-of"), "findOf");
        assert_eq!(camel_case("a-1"), "a-1");
        assert_eq!(camel_case("trailing-"), "trailing-");
    }

    #[test]
    fn text_and_markup_content() {
        let mut doc = Document::new();
        let node = doc.create_element("div");
        doc.append(doc.body(), node);
        doc.set_markup(node, "<b>bold</b> text");
        assert_eq!(doc.text_content(node), "bold text");
        assert_eq!(doc.element_children(node).len(), 1);
        doc.set_text(node, "plain");
        assert_eq!(doc.inner_html(node), "plain");
    }

    #[test]
    fn outer_html_round_trips_attributes() {
        let doc = Document::parse(
            "<div class=\"a b\" id=\"x\" data-k=\"v\"><input type=\"text\" disabled></div>",
        )
        .unwrap();
        let node = doc.element_by_id("x").unwrap();
        assert_eq!(
            doc.outer_html(node),
            "<div class=\"a b\" data-k=\"v\" id=\"x\"><input disabled type=\"text\"></div>"
        );
    }

    #[test]
    fn focus_follows_removal() {
        let mut doc = Document::parse("<input id=\"f\">").unwrap();
        let field = doc.element_by_id("f").unwrap();
        doc.focus(field);
        assert_eq!(doc.focused(), Some(field));
        doc.remove(field);
        assert_eq!(doc.focused(), None);
    }

    #[test]
    fn location_hash_strips_marker() {
        let mut doc = Document::new();
        doc.set_location_hash("#tabs=2");
        assert_eq!(doc.location_hash(), "tabs=2");
    }
}
