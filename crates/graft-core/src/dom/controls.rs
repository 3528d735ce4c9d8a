//! Form control state: values, disabled/required flags, `<select>` option
//! selection and form reset.

use super::{Document, NodeId};
use crate::event::{DomEvent, EventKind};

impl Document {
    /// Current value of a form control. For `<select>` this is the value of
    /// the first selected option.
    pub fn value(&self, node: NodeId) -> String {
        match self.tag(node) {
            Some("select") => self.select_value(node),
            Some("option") => self.option_value(node),
            _ => self.element(node).map(|el| el.form.value.clone()).unwrap_or_default(),
        }
    }

    /// Set the value of a form control. On a `<select>` this selects the
    /// first option carrying `value`, or clears the selection.
    pub fn set_value(&mut self, node: NodeId, value: &str) {
        if self.tag(node) == Some("select") {
            let index = self
                .options(node)
                .iter()
                .position(|&option| self.option_value(option) == value);
            self.set_selected_index(node, index);
            return;
        }
        if let Some(el) = self.element_mut(node) {
            el.form.value = value.to_string();
        }
    }

    /// `type` of an `<input>`, defaulting to `text`.
    pub fn input_type(&self, node: NodeId) -> String {
        self.attr(node, "type")
            .map(str::to_ascii_lowercase)
            .unwrap_or_else(|| "text".to_string())
    }

    pub fn is_disabled(&self, node: NodeId) -> bool {
        self.element(node).is_some_and(|el| el.form.disabled)
    }

    /// Set the disabled state, keeping the `disabled` attribute in sync.
    pub fn set_disabled(&mut self, node: NodeId, disabled: bool) {
        if disabled {
            self.set_attr(node, "disabled", "");
        } else {
            self.remove_attr(node, "disabled");
        }
    }

    pub fn is_required(&self, node: NodeId) -> bool {
        self.element(node).is_some_and(|el| el.form.required)
    }

    pub fn is_multiple(&self, node: NodeId) -> bool {
        self.element(node).is_some_and(|el| el.form.multiple)
    }

    /// Selectedness of an `<option>`.
    pub fn is_selected(&self, node: NodeId) -> bool {
        self.element(node).is_some_and(|el| el.form.selected)
    }

    /// Whether an `<option>` carries the `selected` attribute.
    pub fn is_default_selected(&self, node: NodeId) -> bool {
        self.element(node).is_some_and(|el| el.form.default_selected)
    }

    /// Select or deselect an `<option>`. Selecting in a single-value
    /// `<select>` deselects its siblings.
    pub fn set_selected(&mut self, option: NodeId, selected: bool) {
        if selected {
            if let Some(select) = self.owning_select(option) {
                if !self.is_multiple(select) {
                    for other in self.options(select) {
                        if let Some(el) = self.element_mut(other) {
                            el.form.selected = false;
                        }
                    }
                }
            }
        }
        if let Some(el) = self.element_mut(option) {
            el.form.selected = selected;
        }
    }

    fn owning_select(&self, option: NodeId) -> Option<NodeId> {
        self.ancestors(option)
            .into_iter()
            .find(|&node| self.tag(node) == Some("select"))
    }

    /// `<option>` elements of a `<select>` in document order.
    pub fn options(&self, select: NodeId) -> Vec<NodeId> {
        self.descendants(select)
            .into_iter()
            .filter(|&node| self.tag(node) == Some("option"))
            .collect()
    }

    /// The `value` attribute of an `<option>`, falling back to its text with
    /// whitespace collapsed.
    pub fn option_value(&self, option: NodeId) -> String {
        match self.attr(option, "value") {
            Some(value) => value.to_string(),
            None => self.option_label(option),
        }
    }

    /// Display text of an `<option>` with whitespace collapsed.
    pub fn option_label(&self, option: NodeId) -> String {
        self.text_content(option)
            .split_whitespace()
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Index of the first selected option.
    pub fn selected_index(&self, select: NodeId) -> Option<usize> {
        self.options(select)
            .iter()
            .position(|&option| self.is_selected(option))
    }

    /// Select the option at `index` alone; `None` (or an out-of-range index)
    /// clears the selection.
    pub fn set_selected_index(&mut self, select: NodeId, index: Option<usize>) {
        for (i, option) in self.options(select).into_iter().enumerate() {
            if let Some(el) = self.element_mut(option) {
                el.form.selected = Some(i) == index;
            }
        }
    }

    /// Value of the first selected option, empty when nothing is selected.
    pub fn select_value(&self, select: NodeId) -> String {
        self.options(select)
            .into_iter()
            .find(|&option| self.is_selected(option))
            .map(|option| self.option_value(option))
            .unwrap_or_default()
    }

    /// Values of every selected option in document order.
    pub fn selected_values(&self, select: NodeId) -> Vec<String> {
        self.options(select)
            .into_iter()
            .filter(|&option| self.is_selected(option))
            .map(|option| self.option_value(option))
            .collect()
    }

    /// The `<form>` owning `node`.
    pub fn form_of(&self, node: NodeId) -> Option<NodeId> {
        self.ancestors(node)
            .into_iter()
            .find(|&ancestor| self.tag(ancestor) == Some("form"))
    }

    /// Restore every control inside `form` to its default state.
    pub fn reset_form(&mut self, form: NodeId) {
        for node in self.descendants(form) {
            match self.tag(node) {
                Some("select") => self.reset_select(node),
                Some("input") => {
                    let value = self.attr(node, "value").unwrap_or_default().to_string();
                    self.set_value(node, &value);
                }
                Some("textarea") => {
                    let value = self.text_content(node);
                    self.set_value(node, &value);
                }
                _ => {}
            }
        }
    }

    /// Restore the default option selection of a `<select>`.
    ///
    /// A single-value select keeps only the last default option, and falls
    /// back to its first enabled option when none is marked.
    pub fn reset_select(&mut self, select: NodeId) {
        let options = self.options(select);
        let multiple = self.is_multiple(select);
        let last_default = options
            .iter()
            .rposition(|&option| self.is_default_selected(option));
        for (i, &option) in options.iter().enumerate() {
            let selected = if multiple {
                self.is_default_selected(option)
            } else {
                Some(i) == last_default
            };
            if let Some(el) = self.element_mut(option) {
                el.form.selected = selected;
            }
        }
        if !multiple && last_default.is_none() {
            if let Some(&first) = options.iter().find(|&&option| !self.is_disabled(option)) {
                if let Some(el) = self.element_mut(first) {
                    el.form.selected = true;
                }
            }
        }
    }

    /// Bring controls under `node` (inclusive) to their initial state after
    /// parsing.
    pub(crate) fn initialize_controls(&mut self, node: NodeId) {
        let nodes: Vec<NodeId> = std::iter::once(node).chain(self.descendants(node)).collect();
        for current in nodes {
            match self.tag(current) {
                Some("select") => self.reset_select(current),
                Some("textarea") => {
                    let value = self.text_content(current);
                    self.set_value(current, &value);
                }
                _ => {}
            }
        }
    }

    /// Run the built-in behavior of an event that nobody handled
    /// (form reset, focus loss).
    pub fn perform_default_action(&mut self, event: &DomEvent) {
        match event.kind {
            EventKind::Reset => {
                if self.tag(event.target) == Some("form") {
                    self.reset_form(event.target);
                }
            }
            EventKind::Blur => self.blur(event.target),
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn select_doc(markup: &str) -> (Document, NodeId) {
        let doc = Document::parse(markup).unwrap();
        let select = doc.query("select").unwrap().unwrap();
        (doc, select)
    }

    #[test]
    fn single_select_defaults_to_first_enabled_option() {
        let (doc, s) = select_doc(
            "<select><option disabled>x</option><option value=\"a\">A</option><option>B</option></select>",
        );
        assert_eq!(doc.selected_index(s), Some(1));
        assert_eq!(doc.value(s), "a");
    }

    #[test]
    fn single_select_keeps_last_default() {
        let (doc, s) = select_doc(
            "<select><option selected>A</option><option selected>B</option></select>",
        );
        assert_eq!(doc.selected_values(s), vec!["B".to_string()]);
    }

    #[test]
    fn multiple_select_starts_with_defaults_only() {
        let (doc, s) = select_doc(
            "<select multiple><option>A</option><option selected>B</option><option selected>C</option></select>",
        );
        assert_eq!(doc.selected_values(s), vec!["B".to_string(), "C".to_string()]);
    }

    #[test]
    fn set_selected_is_exclusive_in_single_mode() {
        let (mut doc, s) = select_doc("<select><option>A</option><option>B</option></select>");
        let options = doc.options(s);
        doc.set_selected(options[1], true);
        assert_eq!(doc.selected_index(s), Some(1));
        assert!(!doc.is_selected(options[0]));
    }

    #[test]
    fn set_value_on_select_matches_option_value() {
        let (mut doc, s) = select_doc(
            "<select><option value=\"1\">One</option><option value=\"2\">Two</option></select>",
        );
        doc.set_value(s, "2");
        assert_eq!(doc.selected_index(s), Some(1));
        doc.set_value(s, "missing");
        assert_eq!(doc.selected_index(s), None);
    }

    #[test]
    fn option_value_falls_back_to_collapsed_text() {
        let (doc, s) = select_doc("<select><option>  Two   words </option></select>");
        let option = doc.options(s)[0];
        assert_eq!(doc.option_value(option), "Two words");
    }

    #[test]
    fn reset_form_restores_defaults() {
        let mut doc = Document::parse(
            "<form id=\"f\"><input id=\"i\" value=\"start\">\
             <select id=\"s\"><option>A</option><option selected>B</option></select></form>",
        )
        .unwrap();
        let form = doc.element_by_id("f").unwrap();
        let input = doc.element_by_id("i").unwrap();
        let select = doc.element_by_id("s").unwrap();
        doc.set_value(input, "changed");
        doc.set_selected_index(select, Some(0));
        doc.perform_default_action(&DomEvent::reset(form));
        assert_eq!(doc.value(input), "start");
        assert_eq!(doc.selected_index(select), Some(1));
    }

    #[test]
    fn textarea_value_comes_from_text() {
        let doc = Document::parse("<textarea id=\"t\">hello</textarea>").unwrap();
        let t = doc.element_by_id("t").unwrap();
        assert_eq!(doc.value(t), "hello");
    }

    #[test]
    fn disabled_attribute_is_reflected() {
        let mut doc = Document::parse("<input id=\"i\">").unwrap();
        let i = doc.element_by_id("i").unwrap();
        doc.set_disabled(i, true);
        assert!(doc.has_attr(i, "disabled"));
        doc.set_disabled(i, false);
        assert!(!doc.is_disabled(i));
        assert!(!doc.has_attr(i, "disabled"));
    }
}
