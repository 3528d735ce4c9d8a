use super::*;
use crossterm::event::KeyCode;
use graft_core::testing::TestPage;
use graft_core::Page;
use std::cell::RefCell;
use std::rc::Rc;

const COLORS: &str = r#"<form id="f">
    <select id="s" class="UI_Select wide">
        <option>Red</option><option>Green</option><option>Blue</option>
    </select>
</form>"#;

const MULTI: &str = r#"<select id="m" class="UI_Select" multiple>
    <option value="optionValue0">Zero</option>
    <option value="optionValue1">One</option>
    <option value="optionValue2">Two</option>
</select>"#;

fn setup(markup: &str, id: &str, options: SelectOptions) -> (Document, Select, NodeId) {
    let mut doc = Document::parse(markup).unwrap();
    let node = doc.element_by_id(id).unwrap();
    let select = Select::activate(&mut doc, &options).unwrap();
    (doc, select, node)
}

fn key(code: KeyCode) -> KeyEvent {
    KeyEvent::from(code)
}

fn visible_labels(doc: &Document, select: &Select, node: NodeId) -> Vec<String> {
    select
        .instance(doc, node)
        .unwrap()
        .items()
        .iter()
        .filter(|item| !doc.is_hidden(item.node))
        .map(|item| item.label.clone())
        .collect()
}

fn hovered(doc: &Document, select: &Select, node: NodeId) -> Vec<usize> {
    select
        .instance(doc, node)
        .unwrap()
        .items()
        .iter()
        .filter(|item| doc.has_class(item.node, class::HOVER))
        .map(|item| item.index)
        .collect()
}

#[test]
fn single_select_placeholder_then_choice() {
    let (mut doc, mut select, s) = setup(COLORS, "s", SelectOptions::default());
    let instance = select.instance(&doc, s).unwrap();
    assert!(instance.placeholder().is_some());
    assert_eq!(doc.text_content(instance.control()), "Make a choice");
    assert_eq!(doc.selected_index(s), None);
    assert!(instance.value().is_empty());

    select.show(&mut doc, s);
    assert!(select.is_open(&doc, s));
    select.selected(&mut doc, true, &[1], s).unwrap();

    assert_eq!(
        select.value(&doc, s),
        Some(&SelectValue::Single("Green".to_string()))
    );
    let instance = select.instance(&doc, s).unwrap();
    assert_eq!(doc.text_content(instance.control()), "Green");
    assert!(instance.placeholder().is_none());
    assert!(!select.is_open(&doc, s));
    assert!(doc.take_notifications().contains(&DomEvent::change(s)));
}

#[test]
fn multiple_select_stays_open_while_candidates_remain() {
    let (mut doc, mut select, m) = setup(MULTI, "m", SelectOptions::default());
    select.show(&mut doc, m);

    select.selected(&mut doc, true, &[0], m).unwrap();
    assert_eq!(
        select.value(&doc, m),
        Some(&SelectValue::Multiple(vec!["optionValue0".into()]))
    );
    assert!(select.is_open(&doc, m));

    select.selected(&mut doc, true, &[2], m).unwrap();
    assert_eq!(
        select.value(&doc, m),
        Some(&SelectValue::Multiple(vec![
            "optionValue0".into(),
            "optionValue2".into()
        ]))
    );
    assert!(select.is_open(&doc, m));

    select.selected(&mut doc, true, &[1], m).unwrap();
    assert!(!select.is_open(&doc, m));
    assert_eq!(select.instance(&doc, m).unwrap().chips().len(), 3);
}

#[test]
fn single_mode_keeps_at_most_one_selected() {
    let (mut doc, mut select, s) = setup(COLORS, "s", SelectOptions::default());
    select.selected(&mut doc, true, &[0, 2], s).unwrap();
    assert_eq!(doc.selected_values(s), vec!["Red".to_string()]);

    select.selected(&mut doc, true, &[9, 1], s).unwrap();
    assert_eq!(doc.selected_values(s), vec!["Red".to_string()]);
}

#[test]
fn disabled_options_stop_single_and_are_skipped_in_multiple() {
    let markup = r#"<select id="s" class="UI_Select"><option>A</option><option disabled>B</option><option>C</option></select>
        <select id="m" class="UI_Select" multiple><option>A</option><option disabled>B</option><option>C</option></select>"#;
    let mut doc = Document::parse(markup).unwrap();
    let s = doc.element_by_id("s").unwrap();
    let m = doc.element_by_id("m").unwrap();
    let mut select = Select::activate(&mut doc, &SelectOptions::default()).unwrap();

    select.selected(&mut doc, true, &[1, 2], s).unwrap();
    assert!(doc.selected_values(s).is_empty());

    select.selected(&mut doc, true, &[1, 0, 7, 2], m).unwrap();
    assert_eq!(doc.selected_values(m), vec!["A".to_string(), "C".to_string()]);
}

#[test]
fn empty_indexes_are_rejected() {
    let (mut doc, mut select, s) = setup(COLORS, "s", SelectOptions::default());
    let err = select.selected(&mut doc, true, &[], s).unwrap_err();
    assert!(matches!(err, Error::InvalidArgument(_)));
}

#[test]
fn multiple_round_trip_through_chips() {
    let (doc, select, m) = setup(MULTI, "m", SelectOptions::default());
    let mut page = TestPage::new(doc, select);
    {
        let (doc, select) = page.parts_mut();
        select.selected(doc, true, &[0, 2], m).unwrap();
    }
    let chip = page.component().instance(page.document(), m).unwrap().chips()[0].clone();
    assert_eq!(chip.index, 0);
    let delete = chip.delete.unwrap();
    assert!(page.dispatch(DomEvent::click(delete)).unwrap());
    assert_eq!(
        page.component().value(page.document(), m),
        Some(&SelectValue::Multiple(vec!["optionValue2".into()]))
    );
}

#[test]
fn selected_and_disabled_items_stay_hidden() {
    let markup = r#"<select id="s" class="UI_Select"><option selected>Red</option><option disabled>Green</option><option>Blue</option></select>"#;
    let (doc, select, s) = setup(markup, "s", SelectOptions::default());
    assert_eq!(visible_labels(&doc, &select, s), vec!["Blue"]);
    assert!(select.instance(&doc, s).unwrap().placeholder().is_none());
}

#[test]
fn search_filters_labels_and_find_of() {
    let markup = r#"<select id="s" class="UI_Select">
        <option>Red</option><option>Green</option><option data-find-of="Azure Sky">Blue</option>
    </select>"#;
    let (mut doc, mut select, s) = setup(markup, "s", SelectOptions::new().with_search(true));

    select.search(&mut doc, "RE", s);
    assert_eq!(visible_labels(&doc, &select, s), vec!["Red", "Green"]);

    select.search(&mut doc, "sky", s);
    assert_eq!(visible_labels(&doc, &select, s), vec!["Blue"]);

    select.search(&mut doc, "zzz", s);
    assert!(visible_labels(&doc, &select, s).is_empty());

    select.search(&mut doc, "", s);
    assert_eq!(visible_labels(&doc, &select, s), vec!["Red", "Green", "Blue"]);
}

#[test]
fn search_never_reveals_selected_items() {
    let markup = r#"<select id="s" class="UI_Select"><option selected>Red</option><option>Rose</option></select>"#;
    let (mut doc, mut select, s) = setup(markup, "s", SelectOptions::new().with_search(true));
    select.search(&mut doc, "r", s);
    assert_eq!(visible_labels(&doc, &select, s), vec!["Rose"]);
}

#[test]
fn search_without_field_is_noop() {
    let (mut doc, mut select, s) = setup(COLORS, "s", SelectOptions::default());
    select.search(&mut doc, "zzz", s);
    assert_eq!(visible_labels(&doc, &select, s), vec!["Red", "Green", "Blue"]);
}

#[test]
fn render_reapplies_active_query() {
    let (mut doc, mut select, s) = setup(COLORS, "s", SelectOptions::new().with_search(true));
    let input = select.instance(&doc, s).unwrap().search_input().unwrap();
    doc.set_value(input, "bl");
    select.render(&mut doc, s);
    assert_eq!(visible_labels(&doc, &select, s), vec!["Blue"]);
}

#[test]
fn keyboard_cursor_wraps_from_placeholder() {
    let (mut doc, mut select, s) = setup(COLORS, "s", SelectOptions::default());
    select.show(&mut doc, s);
    assert_eq!(select.instance(&doc, s).unwrap().cursor().index(), None);

    let mut seen = Vec::new();
    for _ in 0..4 {
        select.key(&mut doc, s, key(KeyCode::Down));
        seen.push(select.instance(&doc, s).unwrap().cursor().index().unwrap());
    }
    assert_eq!(seen, vec![0, 1, 2, 0]);
    assert_eq!(hovered(&doc, &select, s), vec![0]);

    select.key(&mut doc, s, key(KeyCode::Up));
    assert_eq!(hovered(&doc, &select, s), vec![2]);
}

#[test]
fn keyboard_skips_hidden_and_enter_commits() {
    let markup = r#"<select id="s" class="UI_Select"><option>Apple</option><option>Banana</option><option>Cherry</option></select>"#;
    let (mut doc, mut select, s) = setup(markup, "s", SelectOptions::new().with_search(true));
    select.show(&mut doc, s);
    select.search(&mut doc, "an", s);

    select.key(&mut doc, s, key(KeyCode::Down));
    select.key(&mut doc, s, key(KeyCode::Down));
    assert_eq!(select.instance(&doc, s).unwrap().cursor().index(), Some(1));

    select.key(&mut doc, s, key(KeyCode::Enter));
    assert_eq!(doc.value(s), "Banana");
    assert!(!select.is_open(&doc, s));
}

#[test]
fn enter_ignores_cursor_on_hidden_item() {
    let markup = r#"<select id="s" class="UI_Select"><option>Apple</option><option selected>Banana</option><option>Cherry</option></select>"#;
    let (mut doc, mut select, s) = setup(markup, "s", SelectOptions::new().with_search(true));
    select.show(&mut doc, s);
    select.search(&mut doc, "cher", s);
    assert_eq!(visible_labels(&doc, &select, s), vec!["Cherry"]);
    assert_eq!(select.instance(&doc, s).unwrap().cursor().index(), Some(0));

    select.key(&mut doc, s, key(KeyCode::Enter));
    assert_eq!(doc.value(s), "Banana");
    assert!(select.is_open(&doc, s));

    select.key(&mut doc, s, key(KeyCode::Down));
    select.key(&mut doc, s, key(KeyCode::Enter));
    assert_eq!(doc.value(s), "Cherry");
}

#[test]
fn cursor_starts_on_first_item_without_placeholder() {
    let markup = r#"<select id="s" class="UI_Select"><option selected>A</option><option>B</option><option>C</option></select>"#;
    let (mut doc, mut select, s) = setup(markup, "s", SelectOptions::default());
    select.show(&mut doc, s);
    assert_eq!(select.instance(&doc, s).unwrap().cursor().index(), Some(0));
    select.key(&mut doc, s, key(KeyCode::Down));
    assert_eq!(select.instance(&doc, s).unwrap().cursor().index(), Some(1));
}

#[test]
fn focus_order_between_list_and_search() {
    let (mut doc, mut select, s) = setup(COLORS, "s", SelectOptions::new().with_search(true));
    let instance = select.instance(&doc, s).unwrap();
    let (list, input) = (instance.dropdown_list(), instance.search_input().unwrap());

    select.show(&mut doc, s);
    assert_eq!(doc.focused(), Some(input));
    select.key(&mut doc, s, key(KeyCode::Down));
    assert_eq!(doc.focused(), Some(list));
    select.key(&mut doc, s, key(KeyCode::Char('g')));
    assert_eq!(doc.focused(), Some(input));
}

#[test]
fn show_focuses_list_without_search() {
    let (mut doc, mut select, s) = setup(COLORS, "s", SelectOptions::default());
    select.show(&mut doc, s);
    let list = select.instance(&doc, s).unwrap().dropdown_list();
    assert_eq!(doc.focused(), Some(list));
}

#[test]
fn only_one_dropdown_open() {
    let markup = r#"<select id="a" class="UI_Select"><option>1</option></select>
        <select id="b" class="UI_Select"><option>2</option></select>"#;
    let mut doc = Document::parse(markup).unwrap();
    let a = doc.element_by_id("a").unwrap();
    let b = doc.element_by_id("b").unwrap();
    let mut select = Select::activate(&mut doc, &SelectOptions::default()).unwrap();

    select.show(&mut doc, a);
    select.show(&mut doc, b);
    assert!(!select.is_open(&doc, a));
    assert!(select.is_open(&doc, b));

    select.show(&mut doc, Scope::All);
    assert!(select.is_open(&doc, a));
    assert!(!select.is_open(&doc, b));
}

#[test]
fn disabled_or_empty_selects_do_not_open() {
    let markup = r#"<select id="d" class="UI_Select" disabled><option>1</option></select>
        <select id="e" class="UI_Select"></select>"#;
    let mut doc = Document::parse(markup).unwrap();
    let d = doc.element_by_id("d").unwrap();
    let e = doc.element_by_id("e").unwrap();
    let mut select = Select::activate(&mut doc, &SelectOptions::default()).unwrap();

    select.show(&mut doc, d);
    select.show(&mut doc, e);
    assert!(!select.is_open(&doc, d));
    assert!(!select.is_open(&doc, e));
    let component = select.instance(&doc, d).unwrap().component();
    assert!(doc.has_class(component, css::DISABLED_FORM));
    select.selected(&mut doc, true, &[0], d).unwrap();
    assert_eq!(doc.selected_index(d), None);
}

#[test]
fn selects_without_candidates_do_not_open() {
    let markup = r#"<select id="m" class="UI_Select" multiple><option selected>1</option><option selected>2</option></select>
        <select id="d" class="UI_Select"><option disabled>1</option><option disabled>2</option></select>"#;
    let mut doc = Document::parse(markup).unwrap();
    let m = doc.element_by_id("m").unwrap();
    let d = doc.element_by_id("d").unwrap();
    let mut select = Select::activate(&mut doc, &SelectOptions::default()).unwrap();

    select.show(&mut doc, m);
    assert!(!select.is_open(&doc, m));
    select.show(&mut doc, d);
    assert!(!select.is_open(&doc, d));

    select.selected(&mut doc, false, &[1], m).unwrap();
    select.show(&mut doc, m);
    assert!(select.is_open(&doc, m));
}

#[test]
fn query_matching_nothing_keeps_dropdown_openable() {
    let (mut doc, mut select, s) = setup(COLORS, "s", SelectOptions::new().with_search(true));
    select.search(&mut doc, "zzz", s);
    select.show(&mut doc, s);
    assert!(select.is_open(&doc, s));
    assert!(visible_labels(&doc, &select, s).is_empty());
}

#[test]
fn open_state_classes_and_overlay() {
    let (mut doc, mut select, s) = setup(COLORS, "s", SelectOptions::default());
    let instance = select.instance(&doc, s).unwrap();
    let (control, dropdown, toggle, overlay) = (
        instance.control(),
        instance.dropdown(),
        instance.toggle_button(),
        instance.overlay(),
    );
    assert_eq!(doc.inner_html(toggle), r#"<i class="fa-solid fa-chevron-down"></i>"#);

    select.show(&mut doc, s);
    assert!(doc.has_class(dropdown, class::DROPDOWN_SHOW));
    assert!(doc.has_class(control, css::FOCUS_FORM));
    assert_eq!(doc.parent(overlay), doc.parent(s));
    assert_eq!(doc.inner_html(toggle), r#"<i class="fa-solid fa-chevron-up"></i>"#);

    select.hide(&mut doc, s);
    assert!(!doc.has_class(dropdown, class::DROPDOWN_SHOW));
    assert!(!doc.has_class(control, css::FOCUS_FORM));
    assert_eq!(doc.parent(overlay), None);
    assert_eq!(doc.inner_html(toggle), r#"<i class="fa-solid fa-chevron-down"></i>"#);
}

#[test]
fn show_places_dropdown_against_viewport() {
    let (mut doc, mut select, s) = setup(COLORS, "s", SelectOptions::default());
    let dropdown = select.instance(&doc, s).unwrap().dropdown();
    doc.set_viewport(Rect::new(0, 0, 80, 24));
    doc.set_rect(dropdown, Rect::new(70, 20, 20, 6));

    select.show(&mut doc, s);
    let placement = select.instance(&doc, s).unwrap().placement();
    assert_eq!(placement.vertical, Vertical::Above);
    assert_eq!(placement.horizontal, Horizontal::End);
    assert_eq!(doc.style(dropdown, "top"), Some("auto"));

    select.hide(&mut doc, s);
    doc.set_rect(dropdown, Rect::new(10, 0, 20, 6));
    select.show(&mut doc, s);
    assert_eq!(
        select.instance(&doc, s).unwrap().placement().vertical,
        Vertical::Below
    );
}

#[test]
fn invalid_then_focus_then_hide() {
    let (doc, select, s) = setup(COLORS, "s", SelectOptions::default());
    let control = select.instance(&doc, s).unwrap().control();
    let mut page = TestPage::new(doc, select);

    assert!(page.dispatch(DomEvent::invalid(s)).unwrap());
    assert!(page.document().has_class(control, css::INVALID_FORM));

    {
        let (doc, select) = page.parts_mut();
        select.show(doc, s);
    }
    assert!(!page.document().has_class(control, css::INVALID_FORM));
    assert!(page.document().has_class(control, css::FOCUS_FORM));
}

#[test]
fn required_select_marks_control() {
    let markup = r#"<select id="s" class="UI_Select" required><option>1</option></select>"#;
    let (doc, select, s) = setup(markup, "s", SelectOptions::default());
    let control = select.instance(&doc, s).unwrap().control();
    assert!(doc.has_class(control, css::REQUIRED_FORM));
}

#[test]
fn items_carry_option_classes_and_rich_content() {
    let markup = r#"<select id="s" class="UI_Select"><option class="hot" data-content="<b>Red</b> hot">Red</option></select>"#;
    let (doc, select, s) = setup(markup, "s", SelectOptions::default());
    let item = &select.instance(&doc, s).unwrap().items()[0];
    assert!(doc.has_class(item.node, class::DROPDOWN_ITEM));
    assert!(doc.has_class(item.node, "hot"));
    assert_eq!(doc.inner_html(item.node), "<b>Red</b> hot");
    assert_eq!(item.label, "Red hot");
}

#[test]
fn generated_structure() {
    let (doc, select, s) = setup(COLORS, "s", SelectOptions::new().with_search(true));
    let instance = select.instance(&doc, s).unwrap();
    let component = instance.component();
    assert_eq!(doc.tag(component), Some("label"));
    assert_eq!(
        doc.class_name(component).as_deref(),
        Some("UI_form-component wide")
    );
    assert_eq!(
        doc.children(component),
        &[
            instance.control(),
            s,
            instance.dropdown(),
            instance.toggle_button()
        ]
    );
    let input = instance.search_input().unwrap();
    assert_eq!(doc.first_child(instance.dropdown()), Some(input));
    assert_eq!(doc.attr(input, "placeholder"), Some("Search on the list"));
    assert!(doc.has_class(s, "UI_Select-activated"));
}

#[test]
fn remove_restores_markup() {
    let mut doc = Document::parse(COLORS).unwrap();
    let before = doc.outer_html(doc.body());
    let s = doc.element_by_id("s").unwrap();
    let mut select = Select::activate(&mut doc, &SelectOptions::new().with_search(true)).unwrap();
    select.show(&mut doc, s);
    select.remove(&mut doc, Scope::All);

    assert_eq!(doc.outer_html(doc.body()), before);
    assert!(select.get(&doc).is_empty());
    assert!(select.instance(&doc, s).is_none());
    assert!(doc.query_all(".UI_Select-control").unwrap().is_empty());
}

#[test]
fn reactivation_is_idempotent_and_applies_options() {
    let (mut doc, mut select, s) = setup(COLORS, "s", SelectOptions::default());
    select.show(&mut doc, s);
    select
        .reactivate(&mut doc, &SelectOptions::new().with_select_placeholder("Pick"))
        .unwrap();

    assert_eq!(select.get(&doc), vec![s]);
    assert_eq!(doc.query_all(".UI_Select-control").unwrap().len(), 1);
    assert_eq!(doc.query_all("label").unwrap().len(), 1);
    assert!(!select.is_open(&doc, s));
    let control = select.instance(&doc, s).unwrap().control();
    assert_eq!(doc.text_content(control), "Pick");
}

#[test]
fn dataset_overrides_options() {
    let markup = r#"<select id="s" class="UI_Select" data-with-search="TRUE" data-select-placeholder="Colour?"><option>Red</option></select>"#;
    let (doc, select, s) = setup(markup, "s", SelectOptions::default());
    let instance = select.instance(&doc, s).unwrap();
    assert!(instance.has_search());
    assert_eq!(instance.config().select_placeholder, "Colour?");
}

#[test]
fn excluded_selects_are_not_activated() {
    let markup = r#"<div class="UI_disabled-node"><select id="x" class="UI_Select"><option>1</option></select></div>"#;
    let (doc, select, x) = setup(markup, "x", SelectOptions::default());
    assert!(select.get(&doc).is_empty());
    assert!(!doc.has_class(x, "UI_Select-activated"));
}

#[test]
fn wrong_kind_is_structural() {
    let mut doc = Document::parse(r#"<div id="d"></div>"#).unwrap();
    let d = doc.element_by_id("d").unwrap();
    let err = Select::activate_nodes(&mut doc, &Scanner::default(), [d], &SelectOptions::default())
        .unwrap_err();
    assert!(matches!(err, Error::Structural { widget: "Select", .. }));
}

#[test]
fn lifecycle_of_a_single_choice() {
    let mut doc = Document::parse(COLORS).unwrap();
    let s = doc.element_by_id("s").unwrap();
    let log = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&log);
    let hooks = Hooks::new().with(move |e| sink.borrow_mut().push(e.kind.clone()));
    let mut select =
        Select::activate_with(&mut doc, &Scanner::default(), &SelectOptions::default(), hooks)
            .unwrap();
    assert_eq!(
        *log.borrow(),
        vec![
            Lifecycle::BeforeRender,
            Lifecycle::Rendered,
            Lifecycle::Activated
        ]
    );

    select.show(&mut doc, s);
    log.borrow_mut().clear();
    select.selected(&mut doc, true, &[2], s).unwrap();
    let picked = Lifecycle::Selected {
        indexes: vec![2],
        selected: true,
    };
    assert_eq!(
        *log.borrow(),
        vec![
            Lifecycle::BeforeSelect {
                indexes: vec![2],
                selected: true
            },
            Lifecycle::BeforeRender,
            Lifecycle::Rendered,
            Lifecycle::BeforeHide,
            Lifecycle::Hidden,
            picked,
        ]
    );
}

#[test]
fn clicks_route_to_operations() {
    let (doc, select, s) = setup(COLORS, "s", SelectOptions::default());
    let instance = select.instance(&doc, s).unwrap();
    let toggle_icon = doc.first_child(instance.toggle_button()).unwrap();
    let overlay = instance.overlay();
    let placeholder = instance.placeholder().unwrap();
    let mut page = TestPage::new(doc, select);

    assert!(page.dispatch(DomEvent::click(toggle_icon)).unwrap());
    assert!(page.component().is_open(page.document(), s));
    assert!(page.dispatch(DomEvent::click(overlay)).unwrap());
    assert!(!page.component().is_open(page.document(), s));

    page.dispatch(DomEvent::click(placeholder)).unwrap();
    let item = page.component().instance(page.document(), s).unwrap().items()[2].node;
    assert!(page.dispatch(DomEvent::click(item)).unwrap());
    assert_eq!(page.document().value(s), "Blue");

    let hidden_item = page.component().instance(page.document(), s).unwrap().items()[2].node;
    assert!(!page.dispatch(DomEvent::click(hidden_item)).unwrap());
}

#[test]
fn chip_text_click_only_opens() {
    let (doc, select, m) = setup(MULTI, "m", SelectOptions::default());
    let mut page = TestPage::new(doc, select);
    {
        let (doc, select) = page.parts_mut();
        select.selected(doc, true, &[0], m).unwrap();
    }
    let text = page.component().instance(page.document(), m).unwrap().chips()[0].text;
    assert!(!page.component().is_open(page.document(), m));

    assert!(page.dispatch(DomEvent::click(text)).unwrap());
    assert!(page.component().is_open(page.document(), m));
    assert!(page.dispatch(DomEvent::click(text)).unwrap());
    assert!(page.component().is_open(page.document(), m));
}

#[test]
fn typing_in_search_field_filters() {
    let (doc, select, s) = setup(COLORS, "s", SelectOptions::new().with_search(true));
    let input = select.instance(&doc, s).unwrap().search_input().unwrap();
    let mut page = TestPage::new(doc, select);
    page.document_mut().set_value(input, "gre");
    assert!(page.dispatch(DomEvent::input(input)).unwrap());
    assert_eq!(
        visible_labels(page.document(), page.component(), s),
        vec!["Green"]
    );
}

#[test]
fn keys_route_only_while_open() {
    let (doc, select, s) = setup(COLORS, "s", SelectOptions::default());
    let list = select.instance(&doc, s).unwrap().dropdown_list();
    let mut page = TestPage::new(doc, select);
    assert!(!page.dispatch(DomEvent::key(list, KeyCode::Down)).unwrap());
    {
        let (doc, select) = page.parts_mut();
        select.show(doc, s);
    }
    assert!(page.dispatch(DomEvent::key(list, KeyCode::Down)).unwrap());
    assert_eq!(
        page.component().instance(page.document(), s).unwrap().cursor().index(),
        Some(0)
    );
}

#[test]
fn form_reset_schedules_render() {
    let (doc, select, _) = setup(COLORS, "s", SelectOptions::default());
    let form = doc.element_by_id("f").unwrap();
    let mut page = TestPage::new(doc, select);
    assert!(page.dispatch(DomEvent::reset(form)).unwrap());
    assert_eq!(page.deferred(), 1);
}

#[tokio::test]
async fn form_reset_renders_after_settling() {
    let (mut doc, mut select, s) = setup(COLORS, "s", SelectOptions::default());
    let form = doc.element_by_id("f").unwrap();
    select.selected(&mut doc, true, &[1], s).unwrap();
    let mut page = Page::new(doc, select);

    page.dispatch(DomEvent::reset(form)).unwrap();
    assert!(page.has_pending());
    let control = page
        .component()
        .instance(page.document(), s)
        .unwrap()
        .control();
    assert_eq!(page.document().text_content(control), "Green");

    page.settle().await.unwrap();
    assert_eq!(page.document().text_content(control), "Red");
    assert_eq!(
        page.component().value(page.document(), s),
        Some(&SelectValue::Single("Red".into()))
    );
}

#[test]
fn preview_shows_control_and_open_list() {
    let (doc, select, s) = setup(COLORS, "s", SelectOptions::default());
    let mut page = TestPage::new(doc, select);
    let closed = page.render_string(30, 5);
    assert!(closed.contains("Make a choice ▸"));
    assert!(!closed.contains("Green"));

    {
        let (doc, select) = page.parts_mut();
        select.show(doc, s);
        select.key(doc, s, KeyEvent::from(KeyCode::Down));
    }
    let open = page.render_string(30, 5);
    assert!(open.contains("Make a choice ▾"));
    assert!(open.contains("▸ Red"));
    assert!(open.contains("  Green"));
    assert!(open.contains("  Blue"));
}
