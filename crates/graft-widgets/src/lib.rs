//! Ready-made widgets for **graft**.
//!
//! Every widget follows the activation contract of [`graft_core`]: it is
//! built around nodes of a [`graft_core::Document`], keeps its state in the
//! document's instance store, and tears itself down on request. Each
//! collection handle also implements [`graft_core::Component`], so events
//! can be routed to it and its state previewed with [`ratatui`].
//!
//! # Widgets
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`select`] | Single/multiple selection dropdown over `<select>` |
//! | [`tabs`] | Tabbed panels over `<dl>` definition lists |
//! | [`popup`] | Modal boxes opened by element id |
//! | [`lim`] | Length limiter with a remaining-characters counter |
//!
//! # Utilities
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`css`] | Class names the widgets generate |
//! | [`runeutil`] | Unicode-aware string width and truncation utilities |

pub mod css;
pub mod lim;
pub mod popup;
pub mod runeutil;
pub mod select;
pub mod tabs;

pub use lim::{Lim, Limiters};
pub use popup::Popup;
pub use select::{Select, SelectOptions, SelectValue};
pub use tabs::{Tabs, TabsOptions};
