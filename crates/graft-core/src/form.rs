//! Form-control wrapper: moves a field into a generated `label` container
//! that takes over the field's visual classes.

use crate::dom::{Document, NodeId};

/// Class of every generated container.
pub const FORM_COMPONENT: &str = "UI_form-component";

/// Class of buttons and boxes generated inside a container.
pub const FORM_COMPONENT_CONTROL: &str = "UI_form-component-control";

/// Widget-owned classes that stay on the field when it is wrapped.
pub const DENY_CLASSES: [&str; 8] = [
    "UI_InputFile",
    "UI_InputRange",
    "UI_InputNumber",
    "UI_Select",
    "UI_range",
    "UI_select",
    "UI_input",
    "UI_textarea",
];

/// Record of a wrapped field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Wrapped {
    /// The generated `label` container.
    pub container: NodeId,
    /// The field's `class` attribute before wrapping.
    pub original_class: Option<String>,
}

/// Wrap `field` in a new container placed where the field was.
///
/// Classes not in [`DENY_CLASSES`] move from the field to the container.
pub fn wrap(doc: &mut Document, field: NodeId) -> Wrapped {
    let original_class = doc.class_name(field);
    let moved: Vec<String> = doc
        .classes(field)
        .iter()
        .filter(|class| !DENY_CLASSES.contains(&class.as_str()))
        .cloned()
        .collect();

    let container = doc.create_element("label");
    doc.add_class(container, FORM_COMPONENT);
    for class in &moved {
        doc.remove_class(field, class);
        doc.add_class(container, class);
    }
    doc.insert_before(field, container);
    doc.append(container, field);

    Wrapped {
        container,
        original_class,
    }
}

/// Undo [`wrap`]: restore the field's class attribute verbatim, put the
/// field back where the container is, and free the container with
/// everything else generated inside it.
pub fn unwrap(doc: &mut Document, field: NodeId, wrapped: &Wrapped) {
    doc.set_class_name(field, wrapped.original_class.as_deref());
    doc.insert_before(wrapped.container, field);
    doc.remove(wrapped.container);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wrap_moves_visual_classes() {
        let mut doc =
            Document::parse("<p><select id=\"s\" class=\"UI_Select wide red\"></select></p>").unwrap();
        let s = doc.element_by_id("s").unwrap();
        let parent = doc.parent(s).unwrap();
        let wrapped = wrap(&mut doc, s);
        assert_eq!(doc.tag(wrapped.container), Some("label"));
        assert_eq!(doc.parent(wrapped.container), Some(parent));
        assert_eq!(doc.parent(s), Some(wrapped.container));
        assert_eq!(doc.class_name(s).as_deref(), Some("UI_Select"));
        assert_eq!(
            doc.class_name(wrapped.container).as_deref(),
            Some("UI_form-component wide red")
        );
    }

    #[test]
    fn unwrap_round_trips_class_and_position() {
        let mut doc = Document::parse(
            "<div id=\"box\"><i></i><select id=\"s\" class=\"UI_Select  wide\"></select><b></b></div>",
        )
        .unwrap();
        let s = doc.element_by_id("s").unwrap();
        let parent = doc.element_by_id("box").unwrap();
        let before_class = doc.class_name(s);
        let before_index = doc.index_in_parent(s);

        let wrapped = wrap(&mut doc, s);
        let generated = doc.create_element("div");
        doc.append(wrapped.container, generated);
        unwrap(&mut doc, s, &wrapped);

        assert_eq!(doc.class_name(s), before_class);
        assert_eq!(doc.parent(s), Some(parent));
        assert_eq!(doc.index_in_parent(s), before_index);
        assert!(!doc.exists(wrapped.container));
        assert!(!doc.exists(generated));
    }

    #[test]
    fn unwrap_restores_missing_class_attribute() {
        let mut doc = Document::parse("<textarea id=\"t\"></textarea>").unwrap();
        let t = doc.element_by_id("t").unwrap();
        let wrapped = wrap(&mut doc, t);
        doc.add_class(t, "UI_Lim-field");
        unwrap(&mut doc, t, &wrapped);
        assert!(!doc.has_attr(t, "class"));
    }
}
