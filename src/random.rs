//! Random draws used by the game: initial heading, fruit placement, and
//! whether a new fruit is special
use crate::consts;
use crate::game::Direction;
use crate::geometry::{contains, BoardSize, Coord};
use rand::{seq::IteratorRandom, Rng};

/// Pick one of the four cardinal directions uniformly
pub(crate) fn random_direction<R: Rng>(rng: &mut R) -> Direction {
    Direction::ALL[rng.random_range(0..Direction::ALL.len())]
}

/// Pick a uniformly random cell of `board` that is not in `occupied`.
///
/// Cells are drawn and rejected until a free one turns up.  Once the
/// occupied cells make up too much of the board, or after
/// [`MAX_PLACEMENT_ATTEMPTS`][consts::MAX_PLACEMENT_ATTEMPTS] rejections,
/// the free cells are enumerated instead.  Returns `None` if the board is
/// full.
pub(crate) fn random_empty_cell<R: Rng>(
    rng: &mut R,
    board: BoardSize,
    occupied: &[Coord],
) -> Option<Coord> {
    if board.width <= 0 || board.height <= 0 {
        return None;
    }
    if occupied.len().saturating_mul(consts::OCCUPANCY_SCAN_DIVISOR) < board.area() {
        for _ in 0..consts::MAX_PLACEMENT_ATTEMPTS {
            let c = Coord::new(
                rng.random_range(0..board.width),
                rng.random_range(0..board.height),
            );
            if !contains(c, occupied) {
                return Some(c);
            }
        }
    }
    board
        .cells()
        .filter(|&c| !contains(c, occupied))
        .choose(rng)
}

/// Decide whether a newly-placed fruit is special
pub(crate) fn special_fruit<R: Rng>(rng: &mut R) -> bool {
    rng.random_range(0..100) >= 100 - consts::SPECIAL_FRUIT_PERCENT
}
