//! Declarative attribute triggers.
//!
//! A reserved attribute such as `data-popup="login"` turns a node into a
//! trigger: when a matching event reaches the node (or one of its
//! descendants), the registered widget action runs with the attribute value
//! parsed as a comma-separated argument list.

use crate::dom::{Document, NodeId};
use crate::event::{DomEvent, EventKind};

/// One parsed trigger argument.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TriggerArg {
    Bool(bool),
    /// `null` or `undefined`.
    Null,
    /// The `this` token: the node carrying the attribute.
    Node(NodeId),
    Number(i64),
    Text(String),
}

impl TriggerArg {
    pub fn as_number(&self) -> Option<i64> {
        match self {
            TriggerArg::Number(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_node(&self) -> Option<NodeId> {
        match self {
            TriggerArg::Node(node) => Some(*node),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            TriggerArg::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Textual form, for arguments used as ids or names.
    pub fn to_text(&self) -> Option<String> {
        match self {
            TriggerArg::Text(s) => Some(s.clone()),
            TriggerArg::Number(n) => Some(n.to_string()),
            TriggerArg::Bool(b) => Some(b.to_string()),
            TriggerArg::Null | TriggerArg::Node(_) => None,
        }
    }
}

/// Parse a trigger attribute value.
///
/// Tokens are trimmed. `true`, `false`, `null`, `undefined` and `this` are
/// matched case-insensitively; a token starting with an optionally signed
/// integer becomes that integer (`"12px"` is `12`); anything else stays
/// text.
pub fn parse_args(node: NodeId, value: &str) -> Vec<TriggerArg> {
    value
        .split(',')
        .map(|token| {
            let token = token.trim();
            match token.to_ascii_lowercase().as_str() {
                "true" => TriggerArg::Bool(true),
                "false" => TriggerArg::Bool(false),
                "null" | "undefined" => TriggerArg::Null,
                "this" => TriggerArg::Node(node),
                _ => integer_prefix(token)
                    .map(TriggerArg::Number)
                    .unwrap_or_else(|| TriggerArg::Text(token.to_string())),
            }
        })
        .collect()
}

/// Leading optionally signed integer of `token`, if any.
pub fn integer_prefix(token: &str) -> Option<i64> {
    let (sign, digits) = match token.as_bytes().first() {
        Some(b'-') => (-1, &token[1..]),
        Some(b'+') => (1, &token[1..]),
        _ => (1, token),
    };
    let end = digits
        .bytes()
        .position(|b| !b.is_ascii_digit())
        .unwrap_or(digits.len());
    digits[..end].parse::<i64>().ok().map(|n| sign * n)
}

/// Events a trigger can listen to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TriggerEvent {
    Click,
    Input,
}

impl TriggerEvent {
    fn matches(&self, kind: &EventKind) -> bool {
        matches!(
            (self, kind),
            (TriggerEvent::Click, EventKind::Click)
                | (TriggerEvent::Input, EventKind::Input)
        )
    }
}

/// Widget actions reachable through triggers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TriggerAction {
    Popup,
    Lim,
}

/// A matched trigger, ready to be executed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub action: TriggerAction,
    /// The node carrying the trigger attribute.
    pub node: NodeId,
    pub args: Vec<TriggerArg>,
}

#[derive(Debug, Clone)]
struct Registration {
    attribute: String,
    action: TriggerAction,
    event: TriggerEvent,
}

/// Attribute → action table.
#[derive(Debug, Clone)]
pub struct TriggerRegistry {
    registrations: Vec<Registration>,
}

impl Default for TriggerRegistry {
    fn default() -> Self {
        Self::empty()
            .register("data-popup", TriggerAction::Popup, TriggerEvent::Click)
            .register("data-lim", TriggerAction::Lim, TriggerEvent::Input)
    }
}

impl TriggerRegistry {
    /// A registry with no triggers.
    pub fn empty() -> Self {
        Self {
            registrations: Vec::new(),
        }
    }

    pub fn register(mut self, attribute: &str, action: TriggerAction, event: TriggerEvent) -> Self {
        self.registrations.push(Registration {
            attribute: attribute.to_ascii_lowercase(),
            action,
            event,
        });
        self
    }

    /// Find the first registration matching `event`.
    ///
    /// The nearest ancestor-or-self of the target carrying the attribute is
    /// the trigger node. An empty attribute value triggers nothing.
    pub fn match_event(&self, doc: &Document, event: &DomEvent) -> Option<Invocation> {
        self.registrations.iter().find_map(|registration| {
            if !registration.event.matches(&event.kind) {
                return None;
            }
            let node = std::iter::once(event.target)
                .chain(doc.ancestors(event.target))
                .find(|&node| doc.has_attr(node, &registration.attribute))?;
            let value = doc.attr(node, &registration.attribute)?;
            if value.is_empty() {
                return None;
            }
            Some(Invocation {
                action: registration.action,
                node,
                args: parse_args(node, value),
            })
        })
    }
}
