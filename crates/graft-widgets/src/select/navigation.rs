//! Keyboard cursor over dropdown items.
//!
//! `Cursor` tracks the highlighted item of an open dropdown and moves it
//! with wraparound at both ends, stepping over hidden items.

/// Highlighted dropdown item; `None` while nothing is highlighted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Cursor {
    index: Option<usize>,
}

impl Cursor {
    pub fn new(index: Option<usize>) -> Self {
        Self { index }
    }

    pub fn index(&self) -> Option<usize> {
        self.index
    }

    pub fn reset(&mut self, index: Option<usize>) {
        self.index = index;
    }

    /// Move to the previous visible item. From no highlight, lands on the
    /// last visible item.
    pub fn move_up(&mut self, hidden: &[bool]) -> Option<usize> {
        self.step(hidden, false)
    }

    /// Move to the next visible item. From no highlight, lands on the first
    /// visible item.
    pub fn move_down(&mut self, hidden: &[bool]) -> Option<usize> {
        self.step(hidden, true)
    }

    fn step(&mut self, hidden: &[bool], forward: bool) -> Option<usize> {
        let count = hidden.len();
        if hidden.iter().all(|&h| h) {
            return None;
        }
        let advance = |i: usize| {
            if forward {
                (i + 1) % count
            } else {
                (i + count - 1) % count
            }
        };
        let mut next = match self.index {
            None if forward => 0,
            None => count - 1,
            Some(i) => advance(i.min(count - 1)),
        };
        while hidden[next] {
            next = advance(next);
        }
        self.index = Some(next);
        self.index
    }
}
