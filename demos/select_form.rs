//! # Select Form Example
//!
//! Activates a searchable multiple select inside a form and drives it with
//! synthetic events:
//! - Opening the dropdown by clicking its toggle button
//! - Filtering items through the search field
//! - Picking items with the keyboard
//! - Resetting the form and letting the deferred re-render settle
//!
//! Every step prints the rendered preview.
//!
//! Run with: `cargo run --example select_form`

use graft::crossterm::event::KeyCode;
use graft::ratatui::backend::TestBackend;
use graft::ratatui::Terminal;
use graft::widgets::{Select, SelectOptions};
use graft::{Document, DomEvent, NodeId, Page};

const MARKUP: &str = r#"<form id="profile">
    <label for="langs">Languages</label>
    <select id="langs" class="UI_Select" multiple required data-with-search="true">
        <option value="rs" data-find-of="rust cargo">Rust</option>
        <option value="go">Go</option>
        <option value="zig">Zig</option>
        <option value="c" disabled>C</option>
        <option value="ml" data-find-of="ocaml">OCaml</option>
    </select>
</form>"#;

fn print(page: &Page<Select>, step: &str) -> Result<(), Box<dyn std::error::Error>> {
    let mut terminal = Terminal::new(TestBackend::new(40, 10))?;
    terminal.draw(|frame| page.view(frame))?;
    println!("── {step}");
    let buffer = terminal.backend().buffer();
    for y in 0..buffer.area.height {
        let line: String = (0..buffer.area.width)
            .map(|x| buffer[(x, y)].symbol())
            .collect();
        println!("{}", line.trim_end());
    }
    Ok(())
}

fn search_field(page: &Page<Select>, node: NodeId) -> Option<NodeId> {
    page.component()
        .instance(page.document(), node)
        .and_then(|instance| instance.search_input())
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let mut doc = Document::parse(MARKUP)?;
    let select = Select::activate(&mut doc, &SelectOptions::new())?;
    let langs = doc
        .element_by_id("langs")
        .ok_or("markup has no #langs select")?;
    let form = doc.element_by_id("profile").ok_or("markup has no form")?;
    let toggle = select
        .instance(&doc, langs)
        .ok_or("select was not activated")?
        .toggle_button();
    let mut page = Page::new(doc, select);
    print(&page, "activated")?;

    page.dispatch(DomEvent::click(toggle))?;
    print(&page, "opened")?;

    if let Some(search) = search_field(&page, langs) {
        page.document_mut().set_value(search, "caml");
        page.dispatch(DomEvent::input(search))?;
        print(&page, "searching for 'caml'")?;

        page.document_mut().set_value(search, "");
        page.dispatch(DomEvent::input(search))?;
    }

    let list = page
        .component()
        .instance(page.document(), langs)
        .ok_or("select was not activated")?
        .dropdown_list();
    page.dispatch(DomEvent::key(list, KeyCode::Down))?;
    page.dispatch(DomEvent::key(list, KeyCode::Enter))?;
    page.dispatch(DomEvent::key(list, KeyCode::Down))?;
    page.dispatch(DomEvent::key(list, KeyCode::Enter))?;
    print(&page, "picked two with the keyboard")?;
    println!("value: {:?}", page.component().value(page.document(), langs));

    page.dispatch(DomEvent::reset(form))?;
    page.settle().await?;
    print(&page, "form reset")?;
    println!("value: {:?}", page.component().value(page.document(), langs));
    Ok(())
}
