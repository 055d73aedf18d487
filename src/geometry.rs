//! Board coordinates
use ratatui::layout::Size;
use std::borrow::Borrow;

/// A cell on the board, relative to its top-left corner.
///
/// Components are signed so that a head that has just stepped off the board
/// can still be represented before the bounds check rejects it.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
pub(crate) struct Coord {
    pub(crate) x: i32,
    pub(crate) y: i32,
}

impl Coord {
    pub(crate) const fn new(x: i32, y: i32) -> Coord {
        Coord { x, y }
    }

    /// Return the coordinate one step away in the direction `(dx, dy)`
    pub(crate) fn offset(self, (dx, dy): (i32, i32)) -> Coord {
        Coord {
            x: self.x.saturating_add(dx),
            y: self.y.saturating_add(dy),
        }
    }

    /// Manhattan distance between two coordinates
    pub(crate) fn manhattan(self, other: Coord) -> u32 {
        self.x
            .abs_diff(other.x)
            .saturating_add(self.y.abs_diff(other.y))
    }
}

/// Extent of the playing field in cells
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct BoardSize {
    pub(crate) width: i32,
    pub(crate) height: i32,
}

impl BoardSize {
    pub(crate) const fn new(width: i32, height: i32) -> BoardSize {
        BoardSize { width, height }
    }

    /// Derive the board from the size of the terminal.  Each cell is two
    /// columns wide, and the top row is taken up by the status bar.
    pub(crate) fn from_terminal(size: Size) -> BoardSize {
        BoardSize::new(
            i32::from(size.width / 2),
            i32::from(size.height.saturating_sub(1)),
        )
    }

    pub(crate) fn contains(self, c: Coord) -> bool {
        (0..self.width).contains(&c.x) && (0..self.height).contains(&c.y)
    }

    /// Map an out-of-bounds coordinate back onto the board, treating each
    /// axis as circular.
    pub(crate) fn wrap(self, c: Coord) -> Coord {
        Coord {
            x: c.x.rem_euclid(self.width.max(1)),
            y: c.y.rem_euclid(self.height.max(1)),
        }
    }

    /// The cell the snake starts on
    pub(crate) fn center(self) -> Coord {
        Coord::new(self.width / 2, self.height / 2)
    }

    /// Number of cells on the board
    pub(crate) fn area(self) -> usize {
        usize::try_from(self.width.max(0))
            .unwrap_or_default()
            .saturating_mul(usize::try_from(self.height.max(0)).unwrap_or_default())
    }

    /// Iterate over every cell of the board in row-major order
    pub(crate) fn cells(self) -> impl Iterator<Item = Coord> {
        (0..self.height).flat_map(move |y| (0..self.width).map(move |x| Coord::new(x, y)))
    }
}

/// Test whether `target` is equal to any element of `coords`
pub(crate) fn contains<I>(target: Coord, coords: I) -> bool
where
    I: IntoIterator,
    I::Item: Borrow<Coord>,
{
    coords.into_iter().any(|c| *c.borrow() == target)
}
