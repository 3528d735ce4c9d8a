//! Effective select configuration and the caller-facing [`SelectOptions`] builder.

use graft_core::{ConfigValue, Configure};

/// Effective configuration of one select.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectConfig {
    /// Add a search field to the dropdown.
    pub with_search: bool,
    /// Shown in the control when nothing is selected. Empty disables the
    /// placeholder.
    pub select_placeholder: String,
    pub search_placeholder: String,
    /// Toggle button markup while the dropdown is closed.
    pub open_icon: String,
    /// Toggle button markup while the dropdown is open.
    pub close_icon: String,
    /// Markup of the delete affordance on multiple-mode chips.
    pub del_item_icon: String,
}

impl Default for SelectConfig {
    fn default() -> Self {
        Self {
            with_search: false,
            select_placeholder: "Make a choice".to_string(),
            search_placeholder: "Search on the list".to_string(),
            open_icon: r#"<i class="fa-solid fa-chevron-down"></i>"#.to_string(),
            close_icon: r#"<i class="fa-solid fa-chevron-up"></i>"#.to_string(),
            del_item_icon: r#"<i class="fa-solid fa-xmark"></i>"#.to_string(),
        }
    }
}

impl Configure for SelectConfig {
    type Overrides = SelectOptions;

    fn override_with(&mut self, overrides: &SelectOptions) {
        if let Some(with_search) = overrides.with_search {
            self.with_search = with_search;
        }
        let texts = [
            (&mut self.select_placeholder, &overrides.select_placeholder),
            (&mut self.search_placeholder, &overrides.search_placeholder),
            (&mut self.open_icon, &overrides.open_icon),
            (&mut self.close_icon, &overrides.close_icon),
            (&mut self.del_item_icon, &overrides.del_item_icon),
        ];
        for (field, value) in texts {
            if let Some(value) = value {
                field.clone_from(value);
            }
        }
    }

    fn apply(&mut self, key: &str, value: &ConfigValue) -> bool {
        let field = match key {
            "withSearch" => {
                return match value.as_bool() {
                    Some(b) => {
                        self.with_search = b;
                        true
                    }
                    None => false,
                };
            }
            "selectPlaceholder" => &mut self.select_placeholder,
            "searchPlaceholder" => &mut self.search_placeholder,
            "openIcon" => &mut self.open_icon,
            "closeIcon" => &mut self.close_icon,
            "delItemIcon" => &mut self.del_item_icon,
            _ => return false,
        };
        match value.as_text() {
            Some(text) => {
                *field = text.to_string();
                true
            }
            None => false,
        }
    }
}

/// Caller overrides for [`Select`](super::Select) activation.
///
/// # Example
///
/// ```rust,ignore
/// let options = SelectOptions::new()
///     .with_selector("select.country")
///     .with_search(true)
///     .with_select_placeholder("Pick a country");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectOptions {
    /// Selector of the `<select>` elements to activate; `.UI_Select` when
    /// unset.
    pub selector: Option<String>,
    pub with_search: Option<bool>,
    pub select_placeholder: Option<String>,
    pub search_placeholder: Option<String>,
    pub open_icon: Option<String>,
    pub close_icon: Option<String>,
    pub del_item_icon: Option<String>,
}

impl SelectOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_selector(mut self, selector: impl Into<String>) -> Self {
        self.selector = Some(selector.into());
        self
    }

    pub fn with_search(mut self, with_search: bool) -> Self {
        self.with_search = Some(with_search);
        self
    }

    pub fn with_select_placeholder(mut self, text: impl Into<String>) -> Self {
        self.select_placeholder = Some(text.into());
        self
    }

    pub fn with_search_placeholder(mut self, text: impl Into<String>) -> Self {
        self.search_placeholder = Some(text.into());
        self
    }

    pub fn with_open_icon(mut self, markup: impl Into<String>) -> Self {
        self.open_icon = Some(markup.into());
        self
    }

    pub fn with_close_icon(mut self, markup: impl Into<String>) -> Self {
        self.close_icon = Some(markup.into());
        self
    }

    pub fn with_del_item_icon(mut self, markup: impl Into<String>) -> Self {
        self.del_item_icon = Some(markup.into());
        self
    }
}
