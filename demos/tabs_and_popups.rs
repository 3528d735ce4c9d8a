//! # Tabs and Popups Example
//!
//! Activates a whole page through the [`Ui`] hub:
//! - Tabs built from a definition list, with the initial tab taken from
//!   the location fragment
//! - A popup opened by a `data-popup` trigger and closed by its close button
//! - A `data-lim` trigger limiting a comment field
//!
//! Run with: `cargo run --example tabs_and_popups`

use graft::ratatui::backend::TestBackend;
use graft::ratatui::Terminal;
use graft::{Document, DomEvent, Page, Ui};

const MARKUP: &str = r#"<main>
    <dl id="docs" class="UI_Tabs">
        <dt>Intro</dt><dd>Plain markup in, widgets out.</dd>
        <dt>Install</dt><dd>Add graft to your dependencies.</dd>
        <dt>Usage</dt><dd>Call Ui::activate on a parsed document.</dd>
    </dl>
    <button id="about" data-popup="credits">About</button>
    <div id="credits" class="UI_Popup">Built with ratatui.</div>
    <textarea id="comment" data-lim="this, 12"></textarea>
</main>"#;

fn print(page: &Page<Ui>, step: &str) -> Result<(), Box<dyn std::error::Error>> {
    let mut terminal = Terminal::new(TestBackend::new(50, 12))?;
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

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let mut doc = Document::parse(MARKUP)?;
    doc.set_location_hash("docs=1");
    let ui = Ui::activate(&mut doc)?;
    let docs = doc.element_by_id("docs").ok_or("markup has no tabs")?;
    let about = doc.element_by_id("about").ok_or("markup has no button")?;
    let comment = doc.element_by_id("comment").ok_or("markup has no field")?;
    let mut page = Page::new(doc, ui);
    print(&page, "activated on #docs=1")?;

    let usage = page
        .component()
        .tabs()
        .instance(page.document(), docs)
        .and_then(|instance| instance.tabs().last().copied())
        .ok_or("tabs were not activated")?;
    page.dispatch(DomEvent::click(usage))?;
    print(&page, "clicked the last tab")?;

    page.dispatch(DomEvent::click(about))?;
    print(&page, "opened the credits popup")?;

    let credits = page
        .component()
        .popup()
        .find(page.document(), "credits")
        .ok_or("popup was not activated")?;
    let close = page
        .component()
        .popup()
        .instance(page.document(), credits)
        .map(|instance| instance.close_button())
        .ok_or("popup was not activated")?;
    page.dispatch(DomEvent::click(close))?;
    print(&page, "closed it again")?;

    page.document_mut().set_value(comment, "far too long for the field");
    page.dispatch(DomEvent::input(comment))?;
    println!("comment limited to {:?}", page.document().value(comment));
    Ok(())
}
