use super::{Document, NodeId};
use crate::error::{Error, Result};

/// A parsed selector list.
///
/// Supported syntax: type (`select`), universal (`*`), id (`#id`), class
/// (`.name`), attribute presence and equality (`[data-lim]`,
/// `[type="text"]`), descendant and child (`>`) combinators, and comma
/// separated groups.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selector {
    groups: Vec<Vec<Part>>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct Part {
    /// How this step relates to the step before it.
    combinator: Combinator,
    step: Step,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Combinator {
    Descendant,
    Child,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
struct Step {
    tag: Option<String>,
    id: Option<String>,
    classes: Vec<String>,
    attrs: Vec<(String, Option<String>)>,
}

impl Step {
    fn is_empty(&self) -> bool {
        self.tag.is_none() && self.id.is_none() && self.classes.is_empty() && self.attrs.is_empty()
    }

    fn matches(&self, doc: &Document, node: NodeId) -> bool {
        let Some(tag) = doc.tag(node) else {
            return false;
        };
        if let Some(want) = &self.tag {
            if want != "*" && want != tag {
                return false;
            }
        }
        if let Some(id) = &self.id {
            if doc.id(node) != Some(id.as_str()) {
                return false;
            }
        }
        if !self.classes.iter().all(|c| doc.has_class(node, c)) {
            return false;
        }
        self.attrs.iter().all(|(name, value)| match value {
            None => doc.has_attr(node, name),
            Some(expected) => attr_value(doc, node, name).as_deref() == Some(expected.as_str()),
        })
    }
}

fn attr_value(doc: &Document, node: NodeId, name: &str) -> Option<String> {
    if name == "class" {
        return doc.class_name(node);
    }
    doc.attr(node, name).map(str::to_string)
}

impl Selector {
    /// Parse a selector list.
    pub fn parse(source: &str) -> Result<Self> {
        let mut groups = Vec::new();
        for group in split_groups(source) {
            let group = group.trim();
            if group.is_empty() {
                return Err(Error::invalid_selector(source, "empty selector group"));
            }
            groups.push(parse_group(source, group)?);
        }
        if groups.is_empty() {
            return Err(Error::invalid_selector(source, "empty selector"));
        }
        Ok(Self { groups })
    }

    /// Selector matching every element that carries `class`.
    pub fn class(class: &str) -> Self {
        Self {
            groups: vec![vec![Part {
                combinator: Combinator::Descendant,
                step: Step {
                    classes: vec![class.to_string()],
                    ..Step::default()
                },
            }]],
        }
    }

    /// Whether `node` matches any group of this selector.
    pub fn matches(&self, doc: &Document, node: NodeId) -> bool {
        self.groups
            .iter()
            .any(|parts| matches_from(doc, parts, parts.len() - 1, node))
    }

    /// `node` or its nearest ancestor matching this selector.
    pub fn closest(&self, doc: &Document, node: NodeId) -> Option<NodeId> {
        std::iter::once(node)
            .chain(doc.ancestors(node))
            .find(|&candidate| self.matches(doc, candidate))
    }
}

fn matches_from(doc: &Document, parts: &[Part], index: usize, node: NodeId) -> bool {
    let part = &parts[index];
    if !part.step.matches(doc, node) {
        return false;
    }
    if index == 0 {
        return true;
    }
    match part.combinator {
        Combinator::Child => doc
            .parent(node)
            .is_some_and(|parent| matches_from(doc, parts, index - 1, parent)),
        Combinator::Descendant => doc
            .ancestors(node)
            .into_iter()
            .any(|ancestor| matches_from(doc, parts, index - 1, ancestor)),
    }
}

/// Split on commas that are not inside brackets or quotes.
fn split_groups(source: &str) -> Vec<&str> {
    let mut out = Vec::new();
    let mut depth = 0usize;
    let mut quote: Option<char> = None;
    let mut start = 0;
    for (i, ch) in source.char_indices() {
        match (quote, ch) {
            (Some(q), c) if c == q => quote = None,
            (Some(_), _) => {}
            (None, '"' | '\'') => quote = Some(ch),
            (None, '[') => depth += 1,
            (None, ']') => depth = depth.saturating_sub(1),
            (None, ',') if depth == 0 => {
                out.push(&source[start..i]);
                start = i + 1;
            }
            _ => {}
        }
    }
    out.push(&source[start..]);
    out
}

fn parse_group(source: &str, group: &str) -> Result<Vec<Part>> {
    let chars: Vec<char> = group.chars().collect();
    let mut parts = Vec::new();
    let mut i = 0;
    let mut pending = Combinator::Descendant;
    let mut saw_space = false;

    while i < chars.len() {
        let ch = chars[i];
        if ch.is_whitespace() {
            saw_space = true;
            i += 1;
            continue;
        }
        if ch == '>' {
            if parts.is_empty() || pending == Combinator::Child {
                return Err(Error::invalid_selector(source, "dangling '>' combinator"));
            }
            pending = Combinator::Child;
            i += 1;
            continue;
        }
        if !parts.is_empty() && !saw_space && pending == Combinator::Descendant {
            return Err(Error::invalid_selector(
                source,
                format!("unexpected character '{ch}'"),
            ));
        }
        let (step, next) = parse_step(source, &chars, i)?;
        parts.push(Part {
            combinator: pending,
            step,
        });
        pending = Combinator::Descendant;
        saw_space = false;
        i = next;
    }

    if pending == Combinator::Child {
        return Err(Error::invalid_selector(source, "dangling '>' combinator"));
    }
    if parts.is_empty() {
        return Err(Error::invalid_selector(source, "empty selector group"));
    }
    Ok(parts)
}

fn is_ident_char(ch: char) -> bool {
    ch.is_alphanumeric() || ch == '-' || ch == '_'
}

fn read_ident(chars: &[char], mut i: usize) -> (String, usize) {
    let start = i;
    while i < chars.len() && is_ident_char(chars[i]) {
        i += 1;
    }
    (chars[start..i].iter().collect(), i)
}

fn parse_step(source: &str, chars: &[char], mut i: usize) -> Result<(Step, usize)> {
    let mut step = Step::default();

    if chars[i] == '*' {
        step.tag = Some("*".to_string());
        i += 1;
    } else if is_ident_char(chars[i]) {
        let (tag, next) = read_ident(chars, i);
        step.tag = Some(tag.to_ascii_lowercase());
        i = next;
    }

    while i < chars.len() {
        match chars[i] {
            '#' => {
                let (id, next) = read_ident(chars, i + 1);
                if id.is_empty() {
                    return Err(Error::invalid_selector(source, "empty id"));
                }
                step.id = Some(id);
                i = next;
            }
            '.' => {
                let (class, next) = read_ident(chars, i + 1);
                if class.is_empty() {
                    return Err(Error::invalid_selector(source, "empty class name"));
                }
                step.classes.push(class);
                i = next;
            }
            '[' => {
                let (attr, next) = parse_attr(source, chars, i + 1)?;
                step.attrs.push(attr);
                i = next;
            }
            c if c.is_whitespace() || c == '>' => break,
            c => {
                return Err(Error::invalid_selector(
                    source,
                    format!("unexpected character '{c}'"),
                ))
            }
        }
    }

    if step.is_empty() {
        return Err(Error::invalid_selector(source, "empty compound selector"));
    }
    Ok((step, i))
}

fn parse_attr(source: &str, chars: &[char], mut i: usize) -> Result<((String, Option<String>), usize)> {
    let skip_ws = |mut i: usize| {
        while i < chars.len() && chars[i].is_whitespace() {
            i += 1;
        }
        i
    };
    i = skip_ws(i);
    let (name, next) = read_ident(chars, i);
    if name.is_empty() {
        return Err(Error::invalid_selector(source, "empty attribute name"));
    }
    i = skip_ws(next);
    match chars.get(i) {
        Some(']') => Ok(((name.to_ascii_lowercase(), None), i + 1)),
        Some('=') => {
            i = skip_ws(i + 1);
            let value;
            match chars.get(i) {
                Some(&q) if q == '"' || q == '\'' => {
                    let start = i + 1;
                    let Some(end) = chars[start..].iter().position(|&c| c == q) else {
                        return Err(Error::invalid_selector(source, "unterminated string"));
                    };
                    value = chars[start..start + end].iter().collect::<String>();
                    i = start + end + 1;
                }
                _ => {
                    let (bare, next) = read_ident(chars, i);
                    value = bare;
                    i = next;
                }
            }
            i = skip_ws(i);
            if chars.get(i) != Some(&']') {
                return Err(Error::invalid_selector(source, "expected ']'"));
            }
            Ok(((name.to_ascii_lowercase(), Some(value)), i + 1))
        }
        _ => Err(Error::invalid_selector(source, "unsupported attribute operator")),
    }
}
