use crate::geometry::{contains, Coord};
use std::collections::VecDeque;

/// Snake state.  Snate.
///
/// All positions are relative to the top-left corner of the board.
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct Snake {
    /// The positions of all of the snake's segments, oldest first.  The last
    /// element is the head.  Never empty.
    pub(super) segments: VecDeque<Coord>,
}

impl Snake {
    /// Create a one-segment snake at `head`
    pub(crate) fn new(head: Coord) -> Snake {
        Snake {
            segments: VecDeque::from([head]),
        }
    }

    /// Return the position of the snake's head
    pub(crate) fn head(&self) -> Coord {
        *self
            .segments
            .back()
            .expect("snake should always have at least one segment")
    }

    /// Return the positions of all segments, tail first
    pub(crate) fn segments(&self) -> &VecDeque<Coord> {
        &self.segments
    }

    pub(crate) fn len(&self) -> usize {
        self.segments.len()
    }

    /// Append a new head
    pub(super) fn push_head(&mut self, pos: Coord) {
        self.segments.push_back(pos);
    }

    /// Remove the oldest segment, unless it is also the head
    pub(super) fn drop_tail(&mut self) {
        if self.segments.len() > 1 {
            let _ = self.segments.pop_front();
        }
    }

    /// Does the head occupy the same cell as any other segment?
    pub(super) fn bites_itself(&self) -> bool {
        let body_len = self.segments.len().saturating_sub(1);
        contains(self.head(), self.segments.iter().take(body_len))
    }
}
