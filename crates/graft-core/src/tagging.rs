//! Ownership tags: the `UI_{Name}-activated` class that marks a node as
//! activated by a widget.

use crate::dom::{Document, NodeId};

/// Prefix of every class a widget generates.
pub fn class_prefix(name: &str) -> String {
    format!("UI_{name}")
}

/// The class marking a node as activated by widget `name`.
pub fn activated_class(name: &str) -> String {
    format!("UI_{name}-activated")
}

/// Tag `node` as activated by widget `name`.
pub fn mark(doc: &mut Document, node: NodeId, name: &str) {
    doc.add_class(node, &activated_class(name));
}

/// Whether `node` carries widget `name`'s tag.
pub fn is_marked(doc: &Document, node: NodeId, name: &str) -> bool {
    doc.has_class(node, &activated_class(name))
}

/// Remove widget `name`'s tag from `node`, along with every generated
/// `UI_{name}*` class left on its descendants. Descendants whose class list
/// ends up empty lose the attribute entirely.
pub fn unmark(doc: &mut Document, node: NodeId, name: &str) {
    let prefix = class_prefix(name);
    for child in doc.descendants(node) {
        let starts_with_prefix = doc
            .class_name(child)
            .is_some_and(|class| class.starts_with(&prefix));
        if !starts_with_prefix {
            continue;
        }
        let generated: Vec<String> = doc
            .classes(child)
            .iter()
            .filter(|class| class.contains(&prefix))
            .cloned()
            .collect();
        for class in generated {
            doc.remove_class(child, &class);
        }
        if doc.classes(child).is_empty() {
            doc.set_class_name(child, None);
        }
    }
    doc.remove_class(node, &activated_class(name));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mark_and_unmark() {
        let mut doc = Document::parse("<dl id=\"d\" class=\"UI_Tabs\"></dl>").unwrap();
        let d = doc.element_by_id("d").unwrap();
        mark(&mut doc, d, "Tabs");
        assert!(is_marked(&doc, d, "Tabs"));
        assert!(!is_marked(&doc, d, "Select"));
        unmark(&mut doc, d, "Tabs");
        assert!(!is_marked(&doc, d, "Tabs"));
        assert_eq!(doc.class_name(d).as_deref(), Some("UI_Tabs"));
    }

    #[test]
    fn unmark_strips_generated_descendant_classes() {
        let mut doc = Document::parse(
            "<dl id=\"d\"><dt id=\"a\" class=\"UI_Tabs-show\">A</dt>\
             <dd id=\"b\" class=\"UI_Tabs-show own\">B</dd>\
             <dd id=\"c\" class=\"own UI_Tabs-show\">C</dd></dl>",
        )
        .unwrap();
        let d = doc.element_by_id("d").unwrap();
        mark(&mut doc, d, "Tabs");
        unmark(&mut doc, d, "Tabs");
        let a = doc.element_by_id("a").unwrap();
        let b = doc.element_by_id("b").unwrap();
        let c = doc.element_by_id("c").unwrap();
        assert_eq!(doc.class_name(a), None);
        assert_eq!(doc.class_name(b).as_deref(), Some("own"));
        // Only class lists that start with the prefix are scanned.
        assert_eq!(doc.class_name(c).as_deref(), Some("own UI_Tabs-show"));
    }
}
