//! Viewport-aware dropdown placement.

use graft_core::{Document, NodeId};
use ratatui::layout::Rect;

/// Vertical anchoring of the dropdown relative to the control.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Vertical {
    #[default]
    Below,
    Above,
}

/// Horizontal anchoring of the dropdown.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Horizontal {
    /// Whatever the stylesheet does.
    #[default]
    Natural,
    /// Pinned to the component's left edge.
    Start,
    /// Pinned to the component's right edge.
    End,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Placement {
    pub vertical: Vertical,
    pub horizontal: Horizontal,
}

impl Placement {
    /// Where the dropdown should go given its measured box.
    ///
    /// Overflowing the bottom edge flips it above; otherwise overflowing the
    /// top edge flips it below. Overflowing the left edge pins it to the
    /// start; otherwise overflowing the right edge pins it to the end. An
    /// axis that fits keeps its previous anchoring.
    pub fn compute(self, dropdown: Rect, viewport: Rect) -> Self {
        let vertical = if dropdown.bottom() >= viewport.bottom() {
            Vertical::Above
        } else if dropdown.top() <= viewport.top() {
            Vertical::Below
        } else {
            self.vertical
        };
        let horizontal = if dropdown.left() <= viewport.left() {
            Horizontal::Start
        } else if dropdown.right() >= viewport.right() {
            Horizontal::End
        } else {
            self.horizontal
        };
        Self {
            vertical,
            horizontal,
        }
    }

    /// Write the anchoring to the dropdown's inline style.
    pub fn apply(&self, doc: &mut Document, dropdown: NodeId) {
        match self.vertical {
            Vertical::Above => {
                doc.set_style(dropdown, "bottom", "100%");
                doc.set_style(dropdown, "top", "auto");
            }
            Vertical::Below => {
                doc.set_style(dropdown, "top", "100%");
                doc.set_style(dropdown, "bottom", "auto");
            }
        }
        match self.horizontal {
            Horizontal::Natural => {}
            Horizontal::Start => {
                doc.set_style(dropdown, "left", "0");
                doc.set_style(dropdown, "right", "auto");
            }
            Horizontal::End => {
                doc.set_style(dropdown, "right", "0");
                doc.set_style(dropdown, "left", "auto");
            }
        }
    }
}
