//! Terminal rendering of a select's state.
//!
//! [`SelectPreview`] draws what the generated markup shows: the control on
//! the first row and, while open, the search field and the visible items
//! with the keyboard cursor.

use super::SelectInstance;
use crate::runeutil::truncate;
use graft_core::Document;
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Paragraph, Widget};

/// Visual style of a [`SelectPreview`].
#[derive(Debug, Clone)]
pub struct PreviewStyle {
    /// Chips and items.
    pub normal: Style,
    /// The item under the cursor.
    pub cursor: Style,
    /// Placeholder texts and the open/closed marker.
    pub muted: Style,
    /// Everything, when the select is disabled.
    pub disabled: Style,
    /// Prefix of the item under the cursor.
    pub highlight_symbol: String,
}

impl Default for PreviewStyle {
    fn default() -> Self {
        Self {
            normal: Style::default(),
            cursor: Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
            muted: Style::default().fg(Color::DarkGray),
            disabled: Style::default()
                .fg(Color::DarkGray)
                .add_modifier(Modifier::CROSSED_OUT),
            highlight_symbol: "▸ ".to_string(),
        }
    }
}

/// Renders one select instance.
pub struct SelectPreview<'a> {
    doc: &'a Document,
    instance: &'a SelectInstance,
    style: PreviewStyle,
}

impl<'a> SelectPreview<'a> {
    pub fn new(doc: &'a Document, instance: &'a SelectInstance) -> Self {
        Self {
            doc,
            instance,
            style: PreviewStyle::default(),
        }
    }

    pub fn with_style(mut self, style: PreviewStyle) -> Self {
        self.style = style;
        self
    }

    /// Rows needed to draw everything.
    pub fn height(&self) -> u16 {
        if !self.instance.is_open() {
            return 1;
        }
        let search = u16::from(self.instance.has_search());
        let visible = self
            .instance
            .items()
            .iter()
            .filter(|item| !item.is_hidden())
            .count();
        1 + search + u16::try_from(visible).unwrap_or(u16::MAX - 2)
    }

    fn control_line(&self, width: usize) -> Line<'static> {
        let instance = self.instance;
        let marker = if instance.is_open() { " ▾" } else { " ▸" };
        let budget = width.saturating_sub(2);
        let (text, style) = if instance.placeholder().is_some() {
            (instance.config().select_placeholder.clone(), self.style.muted)
        } else {
            let labels: Vec<&str> = instance
                .chips()
                .iter()
                .filter_map(|chip| instance.items().get(chip.index))
                .map(|item| item.label.as_str())
                .collect();
            (labels.join(", "), self.style.normal)
        };
        let style = if instance.is_disabled() {
            self.style.disabled
        } else {
            style
        };
        Line::from(vec![
            Span::styled(truncate(&text, budget, "…"), style),
            Span::styled(marker, self.style.muted),
        ])
    }

    fn search_line(&self, width: usize) -> Option<Line<'static>> {
        let input = self.instance.search_input()?;
        let query = self.doc.value(input);
        let line = if query.is_empty() {
            let hint = format!("/ {}", self.instance.config().search_placeholder);
            Line::from(Span::styled(truncate(&hint, width, "…"), self.style.muted))
        } else {
            Line::from(Span::styled(
                truncate(&format!("/ {query}"), width, "…"),
                self.style.normal,
            ))
        };
        Some(line)
    }

    fn item_lines(&self, width: usize) -> Vec<Line<'static>> {
        let cursor = self.instance.cursor().index();
        let budget = width.saturating_sub(self.style.highlight_symbol.chars().count());
        self.instance
            .items()
            .iter()
            .filter(|item| !item.is_hidden())
            .map(|item| {
                let (prefix, style) = if Some(item.index) == cursor {
                    (self.style.highlight_symbol.clone(), self.style.cursor)
                } else {
                    (" ".repeat(self.style.highlight_symbol.chars().count()), self.style.normal)
                };
                Line::from(vec![
                    Span::styled(prefix, style),
                    Span::styled(truncate(&item.label, budget, "…"), style),
                ])
            })
            .collect()
    }
}

impl Widget for SelectPreview<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let width = usize::from(area.width);
        let mut lines = vec![self.control_line(width)];
        if self.instance.is_open() {
            lines.extend(self.search_line(width));
            lines.extend(self.item_lines(width));
        }
        Paragraph::new(lines).render(area, buf);
    }
}
