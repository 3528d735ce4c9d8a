//! Error types shared by every graft crate.

/// Result type alias for graft operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised synchronously by activation and widget operations.
///
/// All variants describe integration bugs (bad markup, bad arguments); none
/// of them is a transient runtime condition worth retrying.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A node handed to a widget is of the wrong element kind or misses a
    /// structural requirement.
    #[error("{widget}: {message}")]
    Structural {
        widget: &'static str,
        message: String,
    },

    /// A widget operation received an argument it cannot work with.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// Selector syntax the document query engine does not understand.
    #[error("invalid selector '{selector}': {message}")]
    InvalidSelector { selector: String, message: String },

    /// Markup that could not be turned into a document tree.
    #[error("markup parse error: {0}")]
    Markup(String),

    /// A lookup by id or reference found nothing.
    #[error("not found: {0}")]
    NotFound(String),
}

impl Error {
    /// Create a structural precondition error for `widget`.
    pub fn structural(widget: &'static str, message: impl Into<String>) -> Self {
        Self::Structural {
            widget,
            message: message.into(),
        }
    }

    /// Create a selector error.
    pub fn invalid_selector(selector: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidSelector {
            selector: selector.into(),
            message: message.into(),
        }
    }
}
