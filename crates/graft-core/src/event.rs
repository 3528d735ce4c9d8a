use crate::dom::NodeId;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Kinds of document events that widgets react to.
///
/// Keyboard events wrap the [`crossterm`] key payload so handlers can
/// pattern-match on key codes and modifiers with the full crossterm API.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventKind {
    /// Primary activation of a node (mouse click or equivalent).
    Click,
    /// A key was pressed while the target had focus.
    KeyDown(KeyEvent),
    /// The value of an editable field changed.
    Input,
    /// A committed value change, raised by controls and widgets.
    Change,
    /// A form control failed constraint validation.
    Invalid,
    /// The target lost focus.
    Blur,
    /// A form was reset.
    Reset,
}

/// An event dispatched at a node of the [`Document`](crate::Document).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DomEvent {
    pub target: NodeId,
    pub kind: EventKind,
}

impl DomEvent {
    pub fn new(target: NodeId, kind: EventKind) -> Self {
        Self { target, kind }
    }

    pub fn click(target: NodeId) -> Self {
        Self::new(target, EventKind::Click)
    }

    /// Key press without modifiers.
    pub fn key(target: NodeId, code: KeyCode) -> Self {
        Self::key_event(target, KeyEvent::new(code, KeyModifiers::NONE))
    }

    pub fn key_event(target: NodeId, key: KeyEvent) -> Self {
        Self::new(target, EventKind::KeyDown(key))
    }

    pub fn input(target: NodeId) -> Self {
        Self::new(target, EventKind::Input)
    }

    pub fn change(target: NodeId) -> Self {
        Self::new(target, EventKind::Change)
    }

    pub fn invalid(target: NodeId) -> Self {
        Self::new(target, EventKind::Invalid)
    }

    pub fn blur(target: NodeId) -> Self {
        Self::new(target, EventKind::Blur)
    }

    pub fn reset(target: NodeId) -> Self {
        Self::new(target, EventKind::Reset)
    }

    /// Lower-case event name, as used in logs.
    pub fn name(&self) -> &'static str {
        match self.kind {
            EventKind::Click => "click",
            EventKind::KeyDown(_) => "keydown",
            EventKind::Input => "input",
            EventKind::Change => "change",
            EventKind::Invalid => "invalid",
            EventKind::Blur => "blur",
            EventKind::Reset => "reset",
        }
    }

    /// The key code of a keyboard event.
    pub fn key_code(&self) -> Option<KeyCode> {
        match self.kind {
            EventKind::KeyDown(key) => Some(key.code),
            _ => None,
        }
    }
}
