//! Class names the widgets generate.
//!
//! Styling lives outside the library; these names are the contract between
//! the generated markup and a stylesheet.

/// Shared form-state classes.
pub const FOCUS_FORM: &str = "UI_focus-form";
pub const INVALID_FORM: &str = "UI_invalid-form";
pub const REQUIRED_FORM: &str = "UI_required-form";
pub const DISABLED_FORM: &str = "UI_disabled-form";

pub const SCROLLBAR: &str = "UI_scrollbar";
pub const NO_SCROLLBAR: &str = "UI_no-scrollbar";
pub const BODY_OVERLAY: &str = "UI_body-overlay";
pub const BODY_HIDE_OVERFLOW: &str = "UI_body-hide-overflow";

/// Select widget classes.
pub mod select {
    pub const OVERLAY: &str = "UI_Select-overlay";
    pub const DROPDOWN: &str = "UI_Select-dropdown";
    pub const DROPDOWN_LIST: &str = "UI_Select-dropdown-list";
    pub const DROPDOWN_ITEM: &str = "UI_Select-dropdown-item";
    pub const DROPDOWN_SHOW: &str = "UI_Select-dropdown-show";
    pub const CONTROL: &str = "UI_Select-control";
    pub const CONTROL_ITEM: &str = "UI_Select-control-item";
    pub const CONTROL_ITEM_MULTIPLE: &str = "UI_Select-control-item-multiple";
    pub const CONTROL_ITEM_TEXT: &str = "UI_Select-control-item-text";
    pub const CONTROL_ITEM_DEL: &str = "UI_Select-control-item-del";
    pub const CONTROL_PLACEHOLDER: &str = "UI_Select-control-placeholder";
    pub const SEARCH_INPUT: &str = "UI_Select-search-input";
    pub const HOVER: &str = "UI_Select-item-hover";
}

/// Tabs widget classes.
pub mod tabs {
    pub const CONTROL: &str = "UI_Tabs-control";
    pub const SHOW: &str = "UI_Tabs-show";
}

/// Popup widget classes.
pub mod popup {
    pub const BOX: &str = "UI_Popup-box";
    pub const SHOW: &str = "UI_Popup-show";
    pub const CLOSE_BUTTON: &str = "UI_Popup-close-btn";
    /// Icon classes put on the close button next to [`CLOSE_BUTTON`].
    pub const CLOSE_ICON: [&str; 2] = ["fa-solid", "fa-times-circle"];
}

/// Lim widget classes.
pub mod lim {
    pub const COUNTER: &str = "UI_Lim";
}
