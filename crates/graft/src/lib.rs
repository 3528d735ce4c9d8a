//! **graft** -- declarative, attribute-driven widget activation.
//!
//! Plain markup with marker classes and `data-*` attributes is promoted
//! into stateful components. This umbrella crate re-exports everything
//! needed from a single dependency:
//!
//! ```toml
//! [dependencies]
//! graft = "0.1"
//! ```
//!
//! # Re-exports
//!
//! * All public items from [`graft_core`] are available at the crate root
//!   ([`Document`], [`Collection`], [`Component`], [`Page`], etc.).
//! * The [`widgets`] module re-exports everything from [`graft_widgets`].
//! * [`ratatui`], [`crossterm`] and [`tokio`] are re-exported so downstream
//!   crates do not need to depend on them directly.
//!
//! # The `Ui` hub
//!
//! [`Ui`] activates every widget of a document in one call and routes
//! events: declarative triggers (`data-popup`, `data-lim`) first, then the
//! select, tabs, popup and limiter handles in that order.
//!
//! ```ignore
//! use graft::{Document, DomEvent, Page, Ui};
//!
//! let mut doc = Document::parse(markup)?;
//! let ui = Ui::activate(&mut doc)?;
//! let mut page = Page::new(doc, ui);
//! page.dispatch(DomEvent::click(button))?;
//! page.settle().await?;
//! ```

pub use graft_core::*;
pub mod widgets {
    pub use graft_widgets::*;
}

pub use crossterm;
pub use ratatui;
pub use tokio;

use graft_widgets::lim::{self, Lim, Limiters, DEFAULT_LIMIT};
use graft_widgets::popup::{self, Popup};
use graft_widgets::select::{self, Select, SelectOptions};
use graft_widgets::tabs::{self, Tabs, TabsOptions};
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::Frame;

/// Options for [`Ui::activate_with`].
#[derive(Debug, Clone, Default)]
pub struct UiOptions {
    pub select: SelectOptions,
    pub tabs: TabsOptions,
    /// Opt-out markers; `.UI_disabled-node` when unset.
    pub exclusion: Option<Exclusion>,
    /// Declarative triggers; `data-popup` and `data-lim` when unset.
    pub triggers: Option<TriggerRegistry>,
}

impl UiOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_select(mut self, options: SelectOptions) -> Self {
        self.select = options;
        self
    }

    pub fn with_tabs(mut self, options: TabsOptions) -> Self {
        self.tabs = options;
        self
    }

    pub fn with_exclusion(mut self, exclusion: Exclusion) -> Self {
        self.exclusion = Some(exclusion);
        self
    }

    pub fn with_triggers(mut self, triggers: TriggerRegistry) -> Self {
        self.triggers = Some(triggers);
        self
    }
}

/// Messages of the [`Ui`] hub.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiMessage {
    Select(select::Message),
    Tabs(tabs::Message),
    Popup(popup::Message),
    Lim(lim::Message),
    /// A declarative trigger fired.
    Trigger(Invocation),
}

/// Every widget of a document behind one [`Component`].
#[derive(Debug)]
pub struct Ui {
    scanner: Scanner,
    triggers: TriggerRegistry,
    select: Select,
    tabs: Tabs,
    popup: Popup,
    limiters: Limiters,
}

impl Ui {
    /// Activate selects, tabs and popups with default options.
    pub fn activate(doc: &mut Document) -> Result<Self> {
        Self::activate_with(doc, UiOptions::default())
    }

    pub fn activate_with(doc: &mut Document, options: UiOptions) -> Result<Self> {
        let scanner = Scanner::new(options.exclusion.unwrap_or_default());
        let select = Select::activate_with(doc, &scanner, &options.select, Hooks::new())?;
        let tabs = Tabs::activate_with(doc, &scanner, &options.tabs, Hooks::new())?;
        let popup = Popup::activate_with(doc, &scanner, Hooks::new())?;
        Ok(Self {
            scanner,
            triggers: options.triggers.unwrap_or_default(),
            select,
            tabs,
            popup,
            limiters: Limiters,
        })
    }

    pub fn scanner(&self) -> &Scanner {
        &self.scanner
    }

    pub fn select(&self) -> &Select {
        &self.select
    }

    pub fn select_mut(&mut self) -> &mut Select {
        &mut self.select
    }

    pub fn tabs(&self) -> &Tabs {
        &self.tabs
    }

    pub fn tabs_mut(&mut self) -> &mut Tabs {
        &mut self.tabs
    }

    pub fn popup(&self) -> &Popup {
        &self.popup
    }

    pub fn popup_mut(&mut self) -> &mut Popup {
        &mut self.popup
    }

    /// Run a matched trigger.
    ///
    /// `data-popup="id"` opens the popup `id`. `data-lim="this, 20"` limits
    /// the field to 20 characters; the limit defaults to 50 when missing or
    /// `null`.
    pub fn run_trigger(&mut self, doc: &mut Document, invocation: &Invocation) -> Result<()> {
        tracing::debug!(action = ?invocation.action, node = ?invocation.node, "trigger");
        match invocation.action {
            TriggerAction::Popup => {
                let id = invocation
                    .args
                    .first()
                    .and_then(TriggerArg::to_text)
                    .ok_or_else(|| {
                        Error::InvalidArgument("data-popup expects an element id".to_string())
                    })?;
                self.popup.show(doc, &id)
            }
            TriggerAction::Lim => {
                let field = invocation
                    .args
                    .first()
                    .and_then(TriggerArg::as_node)
                    .ok_or_else(|| {
                        Error::InvalidArgument("data-lim expects a field as first argument".into())
                    })?;
                let limit = match invocation.args.get(1) {
                    None | Some(TriggerArg::Null) => DEFAULT_LIMIT,
                    Some(arg) => arg
                        .as_number()
                        .and_then(|n| usize::try_from(n).ok())
                        .ok_or_else(|| {
                            Error::InvalidArgument(format!(
                                "data-lim limit must be a non-negative number, got {arg:?}"
                            ))
                        })?,
                };
                Lim::attach_with(doc, field, limit, self.scanner.exclusion(), Hooks::new())?;
                Ok(())
            }
        }
    }
}

impl Component for Ui {
    type Message = UiMessage;

    fn route(&self, doc: &Document, event: &DomEvent) -> Option<UiMessage> {
        if let Some(invocation) = self.triggers.match_event(doc, event) {
            return Some(UiMessage::Trigger(invocation));
        }
        self.select
            .route(doc, event)
            .map(UiMessage::Select)
            .or_else(|| self.tabs.route(doc, event).map(UiMessage::Tabs))
            .or_else(|| self.popup.route(doc, event).map(UiMessage::Popup))
            .or_else(|| self.limiters.route(doc, event).map(UiMessage::Lim))
    }

    fn update(&mut self, doc: &mut Document, msg: UiMessage) -> Result<Command<UiMessage>> {
        match msg {
            UiMessage::Select(msg) => Ok(self.select.update(doc, msg)?.map(UiMessage::Select)),
            UiMessage::Tabs(msg) => Ok(self.tabs.update(doc, msg)?.map(UiMessage::Tabs)),
            UiMessage::Popup(msg) => Ok(self.popup.update(doc, msg)?.map(UiMessage::Popup)),
            UiMessage::Lim(msg) => Ok(self.limiters.update(doc, msg)?.map(UiMessage::Lim)),
            UiMessage::Trigger(invocation) => {
                self.run_trigger(doc, &invocation)?;
                Ok(Command::none())
            }
        }
    }

    fn view(&self, doc: &Document, frame: &mut Frame, area: Rect) {
        let [top, bottom] =
            Layout::vertical([Constraint::Percentage(50), Constraint::Percentage(50)]).areas(area);
        self.select.view(doc, frame, top);
        self.tabs.view(doc, frame, bottom);
        self.popup.view(doc, frame, area);
    }
}
