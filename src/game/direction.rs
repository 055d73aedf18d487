use crate::geometry::{BoardSize, Coord};

/// One of the four cardinal directions the snake can travel in
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum Direction {
    North,
    East,
    South,
    West,
}

impl Direction {
    /// All directions, in the order used when drawing one at random
    pub(crate) const ALL: [Direction; 4] = [
        Direction::North,
        Direction::East,
        Direction::South,
        Direction::West,
    ];

    /// The unit step `(dx, dy)` for this direction, with y growing downwards
    pub(crate) fn delta(self) -> (i32, i32) {
        match self {
            Direction::North => (0, -1),
            Direction::East => (1, 0),
            Direction::South => (0, 1),
            Direction::West => (-1, 0),
        }
    }

    pub(crate) fn is_horizontal(self) -> bool {
        matches!(self, Direction::East | Direction::West)
    }

    /// Whether a snake currently moving in `self` may be steered towards
    /// `other`.  Only a change onto the perpendicular axis is allowed; this
    /// rejects both reversals and repeats of the current heading.
    pub(crate) fn can_turn_to(self, other: Direction) -> bool {
        self.is_horizontal() != other.is_horizontal()
    }

    /// Move one cell from `pos` in this direction.  Off-board results are
    /// wrapped back onto the board if `wrap` is true; otherwise `None` is
    /// returned.
    pub(crate) fn advance(self, pos: Coord, board: BoardSize, wrap: bool) -> Option<Coord> {
        let next = pos.offset(self.delta());
        if board.contains(next) {
            Some(next)
        } else if wrap {
            Some(board.wrap(next))
        } else {
            None
        }
    }
}
